//! padcursor - drive a terminal UI with a gamepad cursor
//!
//! Press the activation button (Select by default) to swap the player marker
//! for a free-moving cursor; the left stick moves it, the right stick scrolls
//! the list under it, and B or any keyboard input hands control back.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use padcursor_core::{CursorConfig, CursorController, GamepadId};

mod app;
mod host;
mod pad;
mod paths;
mod render;
mod ui_tree;

use app::{viewport_for, App};
use host::DemoHost;
use pad::GamepadHandler;
use ui_tree::DemoUi;

/// padcursor - gamepad cursor demo
#[derive(Parser)]
#[command(name = "padcursor")]
#[command(about = "Virtual gamepad cursor over a terminal UI", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Gamepad slot that owns the cursor (1-based)
    #[arg(short, long)]
    gamepad: Option<u8>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        event::DisableMouseCapture,
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Explicit path, else the default file when present, else built-in defaults
fn load_config(cli: &Cli) -> Result<CursorConfig> {
    let mut config = match &cli.config {
        Some(path) => CursorConfig::load(path)?,
        None => {
            let path = paths::config_file();
            if path.exists() {
                CursorConfig::load(&path)?
            } else {
                tracing::info!("No config at {}, using defaults", path.display());
                CursorConfig::default()
            }
        }
    };

    if let Some(slot) = cli.gamepad {
        config.gamepad = GamepadId(slot);
        config.validate()?;
    }
    Ok(config)
}

fn init_logging() {
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();

    // Logs go to a file; stdout belongs to the TUI
    let Ok(log_file) = std::fs::File::create(log_dir.join("padcursor.log")) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    init_logging();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if cli.dump_config {
        let text = toml::to_string_pretty(&config).context("serializing configuration")?;
        print!("{}", text);
        return Ok(());
    }

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let host = DemoHost::new(DemoUi::sample(viewport_for(cols, rows)));
    let controller = CursorController::init(host, config)?;

    let gamepad = GamepadHandler::new();
    if !gamepad.connected() {
        tracing::info!("No controller connected, waiting for hotplug");
    }

    let mut app = App::new(controller, gamepad);
    let result = app.run().await;
    if let Err(e) = &result {
        tracing::error!("padcursor exited with error: {:#}", e);
    }
    result
}
