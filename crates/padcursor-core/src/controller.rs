//! Cursor Controller
//!
//! Owns the cursor state machine and the per-frame update. The host forwards
//! button presses and device changes to `on_button_down` /
//! `on_active_device_changed`, and calls `on_render_step` every frame while
//! the controller holds a frame subscription.

use crate::config::CursorConfig;
use crate::constants;
use crate::error::{CursorError, Result};
use crate::events::Signal;
use crate::geometry::{NormalizedPoint, Vec2};
use crate::host::{CursorHost, CursorImage, FrameSubscription};
use crate::input::{
    cursor_velocity, DeviceKind, GamepadId, GamepadSample, PadButton, Thumbstick,
};
use crate::scroll::{scroll_delta, scrollable_ancestor};
use crate::selection::{first_qualifying, SelectionChange};

/// Snapshot of the controller's cursor state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorState {
    /// True iff the per-frame update is subscribed
    pub active: bool,
    pub position: NormalizedPoint,
    /// Velocity computed on the last frame, normalized units per reference frame
    pub move_direction: Vec2,
}

/// Gamepad-driven cursor over a host UI
pub struct CursorController<H: CursorHost> {
    host: H,
    config: CursorConfig,
    cursor_image: H::Image,
    position: NormalizedPoint,
    move_direction: Vec2,
    subscription: Option<FrameSubscription>,
    /// Fired after entering cursor mode
    pub cursor_activated: Signal<()>,
    /// Fired after leaving cursor mode
    pub cursor_deactivated: Signal<()>,
    /// Fired when an element becomes selected while nothing was selected
    pub selection_started: Signal<H::Element>,
    /// Fired whenever the selected element loses the selection
    pub selection_ended: Signal<H::Element>,
}

impl<H: CursorHost> CursorController<H> {
    /// Validate `config`, set up the cursor visual and start inactive
    pub fn init(mut host: H, config: CursorConfig) -> Result<Self> {
        config.validate()?;

        let overlay = match host.find_overlay(&config.overlay_name) {
            Some(overlay) => overlay,
            None if config.auto_create_overlay => {
                tracing::info!("Creating cursor overlay '{}'", config.overlay_name);
                host.create_overlay(&config.overlay_name)
            }
            None => return Err(CursorError::MissingOverlay(config.overlay_name.clone())),
        };

        let cursor_image = host.create_cursor_image(
            &overlay,
            &CursorImage {
                icon: config.icon.clone(),
                size: Vec2::new(config.cursor_size, config.cursor_size),
                anchor: Vec2::new(0.5, 0.5),
            },
        );
        host.set_image_visible(&cursor_image, false);

        tracing::info!(
            gamepad = %config.gamepad,
            activation = ?config.activation_button,
            "Cursor controller initialized"
        );

        Ok(Self {
            host,
            config,
            cursor_image,
            position: NormalizedPoint::CENTER,
            move_direction: Vec2::ZERO,
            subscription: None,
            cursor_activated: Signal::new("cursor_activated"),
            cursor_deactivated: Signal::new("cursor_deactivated"),
            selection_started: Signal::new("selection_started"),
            selection_ended: Signal::new("selection_ended"),
        })
    }

    /// Leave cursor mode if needed and hand the host back
    pub fn dispose(mut self) -> H {
        self.hide_cursor();
        tracing::debug!("Cursor controller disposed");
        self.host
    }

    pub fn state(&self) -> CursorState {
        CursorState {
            active: self.is_active(),
            position: self.position,
            move_direction: self.move_direction,
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn position(&self) -> NormalizedPoint {
        self.position
    }

    pub fn move_direction(&self) -> Vec2 {
        self.move_direction
    }

    pub fn config(&self) -> &CursorConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Enter cursor mode. No-op when already active.
    pub fn show_cursor(&mut self) {
        if self.is_active() {
            return;
        }

        self.host.set_system_pointer_visible(false);
        self.host.set_auto_navigation(false);
        self.host.set_auto_select(false);
        self.host.set_image_visible(&self.cursor_image, true);
        self.host.set_selected(None);
        self.host.disable_movement();

        self.position = NormalizedPoint::CENTER;
        self.move_direction = Vec2::ZERO;
        self.place_cursor();

        tracing::info!("Cursor mode activated");
        self.cursor_activated.fire(&());

        self.subscription = Some(self.host.subscribe_frame_update(self.config.render_priority));
    }

    /// Leave cursor mode. No-op when already inactive.
    pub fn hide_cursor(&mut self) {
        let Some(subscription) = self.subscription else {
            return;
        };

        self.host.set_system_pointer_visible(true);
        self.host.set_auto_navigation(true);
        self.host.set_auto_select(true);
        self.host.set_image_visible(&self.cursor_image, false);

        if let Some(previous) = self.host.selected() {
            self.host.set_selected(None);
            tracing::debug!(element = ?previous, "Selection ended on deactivation");
            self.selection_ended.fire(&previous);
        }

        self.host.enable_movement();
        self.move_direction = Vec2::ZERO;

        tracing::info!("Cursor mode deactivated");
        self.cursor_deactivated.fire(&());

        self.host.unsubscribe_frame_update(subscription);
        self.subscription = None;
    }

    // =========================================================================
    // Host input events
    // =========================================================================

    /// Button pressed on `gamepad`. Only the configured gamepad is heard.
    pub fn on_button_down(&mut self, gamepad: GamepadId, button: PadButton) {
        if gamepad != self.config.gamepad {
            return;
        }

        if button == self.config.activation_button {
            if self.is_active() {
                self.hide_cursor();
            } else {
                self.show_cursor();
            }
        } else if button == self.config.cancel_button && self.is_active() {
            self.hide_cursor();
        }
    }

    /// The user switched input device. Anything but the configured gamepad
    /// ends cursor mode.
    pub fn on_active_device_changed(&mut self, device: DeviceKind) {
        if !self.is_active() || device == DeviceKind::Gamepad(self.config.gamepad) {
            return;
        }
        tracing::debug!(device = ?device, "Input device changed away from gamepad");
        self.hide_cursor();
    }

    // =========================================================================
    // Per-frame update
    // =========================================================================

    /// Advance the cursor by `dt` seconds. Ignored while inactive.
    pub fn on_render_step(&mut self, dt: f32) {
        if !self.is_active() {
            return;
        }

        let frames = if dt.is_finite() && dt > 0.0 {
            dt * constants::motion::REFERENCE_FRAME_RATE
        } else {
            0.0
        };

        let sample = self.host.analog_state(self.config.gamepad);
        let viewport = self.host.viewport_size();

        self.move_direction = cursor_velocity(
            &sample.stick(Thumbstick::Left),
            self.config.deadzone,
            self.config.sensitivity,
            viewport,
        );
        self.position = self.position.translate(self.move_direction * frames);
        let pixel = self.place_cursor();

        tracing::trace!(
            x = self.position.x(),
            y = self.position.y(),
            "Cursor position updated"
        );

        let hits = self.host.elements_at(pixel);
        let qualifying = first_qualifying(&self.host, hits, &self.config);
        let change = SelectionChange::between(self.host.selected(), qualifying);
        self.apply_selection_change(change, &sample, frames);
    }

    /// Place the cursor image at the current position; returns the pixel position
    fn place_cursor(&mut self) -> Vec2 {
        let pixel = self.position.to_pixels(self.host.viewport_size());
        self.host.place_image(&self.cursor_image, pixel);
        pixel
    }

    fn apply_selection_change(
        &mut self,
        change: SelectionChange<H::Element>,
        sample: &GamepadSample,
        frames: f32,
    ) {
        match change {
            SelectionChange::Retained(element) => {
                self.scroll_container_of(&element, sample, frames)
            }
            SelectionChange::Started(next) => {
                tracing::debug!(element = ?next, "Selection started");
                self.selection_started.fire(&next);
                self.host.set_selected(Some(next));
            }
            SelectionChange::Replaced { ended, next } => {
                tracing::debug!(from = ?ended, to = ?next, "Selection moved");
                self.selection_ended.fire(&ended);
                self.host.set_selected(Some(next));
            }
            SelectionChange::Ended(ended) => {
                tracing::debug!(element = ?ended, "Selection ended");
                self.selection_ended.fire(&ended);
                self.host.set_selected(None);
            }
            SelectionChange::Idle => {}
        }
    }

    fn scroll_container_of(&mut self, element: &H::Element, sample: &GamepadSample, frames: f32) {
        let stick = sample.stick(Thumbstick::Right);
        if stick.screen_deflection(self.config.deadzone).is_none() {
            return;
        }
        let Some((container, axes)) = scrollable_ancestor(&self.host, element) else {
            return;
        };
        let Some(delta) = scroll_delta(
            &stick,
            self.config.deadzone,
            self.config.scroll_speed,
            frames,
            axes,
        ) else {
            return;
        };

        let offset = self.host.scroll_offset(&container) + delta;
        self.host.set_scroll_offset(&container, offset);
    }
}

impl<H: CursorHost> std::fmt::Debug for CursorController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorController")
            .field("state", &self.state())
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}
