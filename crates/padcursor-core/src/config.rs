//! Cursor controller configuration
//!
//! Fixed for the lifetime of a controller: read once (defaults, or a TOML
//! file), validated, then handed to `CursorController::init`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{CursorError, Result};
use crate::host::RenderPriority;
use crate::input::{GamepadId, PadButton};

/// Configuration for the cursor controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Asset reference for the cursor image
    pub icon: String,
    /// Cursor image edge length in pixels
    pub cursor_size: f32,
    /// Pixels per reference frame at full deflection
    pub sensitivity: f32,
    /// Scroll pixels per reference frame at full deflection
    pub scroll_speed: f32,
    /// Stick magnitude at or below which input is ignored
    pub deadzone: f32,
    /// Toggles cursor mode
    pub activation_button: PadButton,
    /// Leaves cursor mode
    pub cancel_button: PadButton,
    /// The only gamepad the controller listens to
    pub gamepad: GamepadId,
    /// Element classes eligible for selection
    pub selectable_classes: Vec<String>,
    /// Overlay layer holding the cursor image
    pub overlay_name: String,
    /// Create the overlay when the host does not already have one
    pub auto_create_overlay: bool,
    /// Where the per-frame update runs relative to other frame work
    pub render_priority: RenderPriority,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            icon: constants::visual::CURSOR_ICON.to_string(),
            cursor_size: constants::visual::CURSOR_SIZE,
            sensitivity: constants::motion::SENSITIVITY,
            scroll_speed: constants::motion::SCROLL_SPEED,
            deadzone: constants::motion::STICK_DEADZONE,
            activation_button: PadButton::Select,
            cancel_button: PadButton::B,
            gamepad: GamepadId::default(),
            selectable_classes: constants::selection::SELECTABLE_CLASSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            overlay_name: constants::visual::OVERLAY_NAME.to_string(),
            auto_create_overlay: true,
            render_priority: RenderPriority::INPUT,
        }
    }
}

impl CursorConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: CursorConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| CursorError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!("Loaded cursor config from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.deadzone) {
            return Err(CursorError::InvalidConfig(format!(
                "deadzone must be in [0, 1), got {}",
                self.deadzone
            )));
        }
        if !self.sensitivity.is_finite() || self.sensitivity < 0.0 {
            return Err(CursorError::InvalidConfig(format!(
                "sensitivity must be finite and non-negative, got {}",
                self.sensitivity
            )));
        }
        if !self.scroll_speed.is_finite() || self.scroll_speed < 0.0 {
            return Err(CursorError::InvalidConfig(format!(
                "scroll_speed must be finite and non-negative, got {}",
                self.scroll_speed
            )));
        }
        if !(self.cursor_size.is_finite() && self.cursor_size > 0.0) {
            return Err(CursorError::InvalidConfig(format!(
                "cursor_size must be positive, got {}",
                self.cursor_size
            )));
        }
        if self.selectable_classes.is_empty() {
            return Err(CursorError::InvalidConfig(
                "selectable_classes must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether elements of `class_name` may become the selection
    pub fn is_selectable_class(&self, class_name: &str) -> bool {
        self.selectable_classes.iter().any(|c| c == class_name)
    }
}
