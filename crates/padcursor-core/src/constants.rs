//! Controller constants and configuration defaults
//!
//! Centralized location for magic numbers and default values

/// Cursor motion
pub mod motion {
    /// Reference frame rate the sensitivity values are tuned against
    pub const REFERENCE_FRAME_RATE: f32 = 60.0;

    /// Pixels per reference frame at full stick deflection
    pub const SENSITIVITY: f32 = 10.0;

    /// Scroll pixels per reference frame at full stick deflection
    pub const SCROLL_SPEED: f32 = 15.0;

    /// Stick magnitude at or below which input reads as zero
    pub const STICK_DEADZONE: f32 = 0.2;
}

/// Cursor visual
pub mod visual {
    /// Asset reference for the cursor icon
    pub const CURSOR_ICON: &str = "asset://padcursor/cursor.png";

    /// Cursor image edge length in pixels
    pub const CURSOR_SIZE: f32 = 32.0;

    /// Name of the overlay layer the cursor image lives in
    pub const OVERLAY_NAME: &str = "GamepadCursor";
}

/// Element classes the cursor may select
pub mod selection {
    pub const SELECTABLE_CLASSES: &[&str] =
        &["TextButton", "ImageButton", "TextBox", "ScrollingFrame"];
}
