//! Gamepad backends
//!
//! gilrs on Unix (libudev on Linux, IOKit on macOS); a no-op handler elsewhere
//! so the demo still runs with the keyboard.

use padcursor_core::{GamepadId, PadButton};

#[cfg(unix)]
pub mod gamepad;

#[cfg(unix)]
pub use gamepad::GamepadHandler;

/// Input observed during one poll
#[derive(Debug, Clone, PartialEq)]
pub enum PadEvent {
    ButtonDown(GamepadId, PadButton),
    /// Any deliberate input on this pad (button or large stick motion)
    Activity(GamepadId),
    Connected(GamepadId, String),
    Disconnected(GamepadId),
}

/// No-op gamepad handler for non-Unix platforms
#[cfg(not(unix))]
#[derive(Default)]
pub struct GamepadHandler {
    pub controller_name: Option<String>,
}

#[cfg(not(unix))]
impl GamepadHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn connected(&self) -> bool {
        false
    }

    pub fn poll(&mut self) -> Vec<PadEvent> {
        Vec::new()
    }

    pub fn samples(
        &self,
    ) -> std::collections::HashMap<GamepadId, padcursor_core::GamepadSample> {
        std::collections::HashMap::new()
    }
}
