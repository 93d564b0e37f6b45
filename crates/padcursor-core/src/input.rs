//! Gamepad input model
//!
//! Host-agnostic button, device and analog stick types plus the deadzone
//! filtering shared by cursor motion and scrolling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Gamepad slot as numbered by the host (slot 1 is the first pad)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GamepadId(pub u8);

impl Default for GamepadId {
    fn default() -> Self {
        GamepadId(1)
    }
}

impl std::fmt::Display for GamepadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Gamepad{}", self.0)
    }
}

/// Gamepad buttons the controller can bind to (Xbox face-button naming)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PadButton {
    A,
    B,
    X,
    Y,
    L1,
    R1,
    L2,
    R2,
    L3,
    R3,
    Select,
    Start,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

/// Class of the input device the user most recently touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Gamepad(GamepadId),
    KeyboardMouse,
    Touch,
}

/// Analog sticks consumed by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Thumbstick {
    /// Drives the cursor
    Left,
    /// Scrolls the container under the cursor
    Right,
}

/// One stick reading. `position` has up as positive Y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickState {
    pub position: Vec2,
    pub magnitude: f32,
}

impl StickState {
    /// Build a reading from raw axes, deriving the magnitude
    pub fn from_axes(x: f32, y: f32) -> Self {
        let position = Vec2::new(x, y);
        Self {
            position,
            magnitude: position.length(),
        }
    }

    /// Stick position with Y flipped to screen orientation (down positive),
    /// or `None` when the magnitude does not exceed `deadzone`
    pub fn screen_deflection(&self, deadzone: f32) -> Option<Vec2> {
        if self.magnitude > deadzone {
            Some(Vec2::new(self.position.x, -self.position.y))
        } else {
            None
        }
    }
}

/// Snapshot of analog state for one gamepad
#[derive(Debug, Clone, Default)]
pub struct GamepadSample {
    sticks: HashMap<Thumbstick, StickState>,
}

impl GamepadSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with_stick(mut self, stick: Thumbstick, state: StickState) -> Self {
        self.sticks.insert(stick, state);
        self
    }

    pub fn set(&mut self, stick: Thumbstick, state: StickState) {
        self.sticks.insert(stick, state);
    }

    /// Reading for `stick`; sticks the host did not report read as centered
    pub fn stick(&self, stick: Thumbstick) -> StickState {
        self.sticks.get(&stick).copied().unwrap_or_default()
    }
}

/// Per-frame cursor velocity in normalized units for one reference frame
pub fn cursor_velocity(
    stick: &StickState,
    deadzone: f32,
    sensitivity: f32,
    viewport: Vec2,
) -> Vec2 {
    let Some(deflection) = stick.screen_deflection(deadzone) else {
        return Vec2::ZERO;
    };
    let per_axis = |value: f32, extent: f32| {
        if extent > 0.0 {
            value * sensitivity / extent
        } else {
            0.0
        }
    };
    Vec2::new(
        per_axis(deflection.x, viewport.x),
        per_axis(deflection.y, viewport.y),
    )
}
