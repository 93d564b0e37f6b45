//! Well-known locations on disk

use std::path::PathBuf;

/// Application directory name under the platform config/data roots
const APP_DIR: &str = "padcursor";

/// Default configuration file: `<config dir>/padcursor/config.toml`
pub fn config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

/// Log directory: `<data dir>/padcursor/logs`
pub fn logs_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_namespaced() {
        assert!(config_file().ends_with("padcursor/config.toml"));
        assert!(logs_dir().ends_with("padcursor/logs"));
    }
}
