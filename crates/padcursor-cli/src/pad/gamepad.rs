//! Gamepad Input Handler
//!
//! Polls controllers through gilrs and translates them into padcursor's
//! input model. Supports hotplugging.

use std::collections::HashMap;

use gilrs::{Axis, Button, Event, EventType, Gilrs};
use padcursor_core::{GamepadId, GamepadSample, PadButton, StickState, Thumbstick};

use super::PadEvent;

/// Axis deflection that counts as the user picking up the pad
const ACTIVITY_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, Default)]
struct StickAxes {
    left: (f32, f32),
    right: (f32, f32),
}

/// Gamepad state and input handling
pub struct GamepadHandler {
    /// Gilrs instance for gamepad management
    gilrs: Option<Gilrs>,
    /// Latest raw stick axes per pad
    axes: HashMap<GamepadId, StickAxes>,
    /// Controller name (if connected)
    pub controller_name: Option<String>,
}

impl Default for GamepadHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl GamepadHandler {
    /// Create a new gamepad handler
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                tracing::info!("Gamepad handler initialized");
                Some(g)
            }
            Err(e) => {
                tracing::warn!("Failed to initialize gamepad support: {}", e);
                None
            }
        };

        let mut handler = Self {
            gilrs,
            axes: HashMap::new(),
            controller_name: None,
        };

        // Check for already-connected controllers
        handler.check_connected();
        handler
    }

    /// Handler with gamepad support switched off
    pub fn disabled() -> Self {
        Self {
            gilrs: None,
            axes: HashMap::new(),
            controller_name: None,
        }
    }

    /// Check for connected controllers
    fn check_connected(&mut self) {
        if let Some(ref gilrs) = self.gilrs {
            for (_id, gamepad) in gilrs.gamepads() {
                if gamepad.is_connected() {
                    self.controller_name = Some(gamepad.name().to_string());
                    tracing::info!("Controller connected: {}", gamepad.name());
                    return;
                }
            }
        }
        self.controller_name = None;
    }

    pub fn connected(&self) -> bool {
        self.controller_name.is_some()
    }

    /// Drain pending gilrs events
    pub fn poll(&mut self) -> Vec<PadEvent> {
        let gilrs = match self.gilrs.as_mut() {
            Some(g) => g,
            None => return Vec::new(),
        };

        let mut events = Vec::new();
        let mut need_reconnect_check = false;

        while let Some(Event { id, event, .. }) = gilrs.next_event() {
            let pad = pad_slot(id);
            match event {
                EventType::ButtonPressed(button, _) => {
                    events.push(PadEvent::Activity(pad));
                    if let Some(mapped) = map_button(button) {
                        tracing::trace!("Button pressed: {:?} -> {:?}", button, mapped);
                        events.push(PadEvent::ButtonDown(pad, mapped));
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    let axes = self.axes.entry(pad).or_default();
                    match axis {
                        Axis::LeftStickX => axes.left.0 = value,
                        Axis::LeftStickY => axes.left.1 = value,
                        Axis::RightStickX => axes.right.0 = value,
                        Axis::RightStickY => axes.right.1 = value,
                        _ => continue,
                    }
                    if value.abs() > ACTIVITY_THRESHOLD {
                        events.push(PadEvent::Activity(pad));
                    }
                }
                EventType::Connected => {
                    let name = gilrs.gamepad(id).name().to_string();
                    tracing::info!("Controller connected: {}", name);
                    self.controller_name = Some(name.clone());
                    events.push(PadEvent::Connected(pad, name));
                }
                EventType::Disconnected => {
                    tracing::info!("Controller disconnected");
                    self.axes.remove(&pad);
                    need_reconnect_check = true;
                    events.push(PadEvent::Disconnected(pad));
                }
                _ => {}
            }
        }

        // Check for remaining controllers after processing all events
        if need_reconnect_check {
            self.check_connected();
        }

        events
    }

    /// Current analog snapshot for one pad (gilrs reports up as positive Y)
    pub fn sample(&self, pad: GamepadId) -> GamepadSample {
        let axes = self.axes.get(&pad).copied().unwrap_or_default();
        GamepadSample::new()
            .with_stick(Thumbstick::Left, StickState::from_axes(axes.left.0, axes.left.1))
            .with_stick(Thumbstick::Right, StickState::from_axes(axes.right.0, axes.right.1))
    }

    /// Snapshots for every pad that has reported axes
    pub fn samples(&self) -> HashMap<GamepadId, GamepadSample> {
        self.axes.keys().map(|pad| (*pad, self.sample(*pad))).collect()
    }
}

/// gilrs ids start at 0, host slots at 1
fn pad_slot(id: gilrs::GamepadId) -> GamepadId {
    let index: usize = id.into();
    GamepadId(u8::try_from(index + 1).unwrap_or(u8::MAX))
}

/// Map gilrs button to a padcursor button
fn map_button(button: Button) -> Option<PadButton> {
    match button {
        // Face buttons (Xbox layout: A=bottom, B=right, X=left, Y=top)
        Button::South => Some(PadButton::A),
        Button::East => Some(PadButton::B),
        Button::West => Some(PadButton::X),
        Button::North => Some(PadButton::Y),

        // D-pad
        Button::DPadUp => Some(PadButton::DPadUp),
        Button::DPadDown => Some(PadButton::DPadDown),
        Button::DPadLeft => Some(PadButton::DPadLeft),
        Button::DPadRight => Some(PadButton::DPadRight),

        // Shoulder buttons
        Button::LeftTrigger => Some(PadButton::L1),
        Button::RightTrigger => Some(PadButton::R1),
        Button::LeftTrigger2 => Some(PadButton::L2),
        Button::RightTrigger2 => Some(PadButton::R2),

        // Start/Select (Menu/View on Xbox)
        Button::Start => Some(PadButton::Start),
        Button::Select => Some(PadButton::Select),

        // Stick buttons
        Button::LeftThumb => Some(PadButton::L3),
        Button::RightThumb => Some(PadButton::R3),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_face_buttons() {
        assert_eq!(map_button(Button::South), Some(PadButton::A));
        assert_eq!(map_button(Button::East), Some(PadButton::B));
        assert_eq!(map_button(Button::Select), Some(PadButton::Select));
        assert_eq!(map_button(Button::Mode), None);
    }
}
