//! Demo host
//!
//! Bundles the element tree, the latest gamepad snapshots, the player marker
//! and the frame-subscription registry behind padcursor's host traits.

use std::collections::HashMap;

use padcursor_core::{
    CursorImage, FrameScheduler, FrameSubscription, GamepadId, GamepadSample, InputHost,
    MovementControl, RenderPriority, ScrollAxes, Thumbstick, UiHost, Vec2,
};

use crate::ui_tree::{DemoUi, NodeId};

/// Player marker speed in pixels per second at full deflection
const PLAYER_SPEED: f32 = 240.0;

/// Stand-in for a character controller: a marker the left stick walks around
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub enabled: bool,
}

pub struct DemoHost {
    pub ui: DemoUi,
    pub player: Player,
    pub pointer_visible: bool,
    samples: HashMap<GamepadId, GamepadSample>,
    subscriptions: Vec<(FrameSubscription, RenderPriority)>,
    next_subscription: u64,
}

impl DemoHost {
    pub fn new(ui: DemoUi) -> Self {
        let viewport = ui.viewport();
        Self {
            ui,
            player: Player {
                position: Vec2::new(viewport.x * 0.8, viewport.y * 0.5),
                enabled: true,
            },
            pointer_visible: true,
            samples: HashMap::new(),
            subscriptions: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Replace the analog snapshots read by `analog_state`
    pub fn set_samples(&mut self, samples: HashMap<GamepadId, GamepadSample>) {
        self.samples = samples;
    }

    /// Whether anything wants a per-frame update
    pub fn has_frame_subscribers(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Walk the player with `gamepad`'s left stick while movement is enabled
    pub fn step_player(&mut self, gamepad: GamepadId, deadzone: f32, dt: f32) {
        if !self.player.enabled {
            return;
        }
        let stick = self.analog_state(gamepad).stick(Thumbstick::Left);
        let Some(direction) = stick.screen_deflection(deadzone) else {
            return;
        };
        let viewport = self.ui.viewport();
        let next = self.player.position + direction * (PLAYER_SPEED * dt);
        self.player.position = Vec2::new(
            next.x.clamp(0.0, viewport.x.max(0.0)),
            next.y.clamp(0.0, viewport.y.max(0.0)),
        );
    }
}

impl InputHost for DemoHost {
    fn analog_state(&self, gamepad: GamepadId) -> GamepadSample {
        self.samples.get(&gamepad).cloned().unwrap_or_default()
    }

    fn set_system_pointer_visible(&mut self, visible: bool) {
        self.pointer_visible = visible;
    }
}

impl UiHost for DemoHost {
    type Element = NodeId;
    type Overlay = String;
    type Image = ();

    fn find_overlay(&self, name: &str) -> Option<String> {
        self.ui.overlays.iter().find(|o| *o == name).cloned()
    }

    fn create_overlay(&mut self, name: &str) -> String {
        self.ui.overlays.push(name.to_string());
        name.to_string()
    }

    fn create_cursor_image(&mut self, _overlay: &String, image: &CursorImage) {
        self.ui.cursor.icon = image.icon.clone();
        self.ui.cursor.size = image.size;
        self.ui.cursor.anchor = image.anchor;
    }

    fn set_image_visible(&mut self, _image: &(), visible: bool) {
        self.ui.cursor.visible = visible;
    }

    fn place_image(&mut self, _image: &(), position: Vec2) {
        self.ui.cursor.position = position;
    }

    fn viewport_size(&self) -> Vec2 {
        self.ui.viewport()
    }

    fn elements_at(&self, position: Vec2) -> Vec<NodeId> {
        self.ui.hit_test(position)
    }

    fn class_name(&self, element: &NodeId) -> String {
        self.ui
            .node(*element)
            .map(|n| n.class_name.clone())
            .unwrap_or_default()
    }

    fn is_selectable(&self, element: &NodeId) -> bool {
        self.ui.node(*element).is_some_and(|n| n.selectable)
    }

    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        self.ui.node(*element).and_then(|n| n.parent)
    }

    fn scroll_axes(&self, element: &NodeId) -> Option<ScrollAxes> {
        self.ui.node(*element).and_then(|n| n.scroll).map(|s| s.axes)
    }

    fn scroll_offset(&self, element: &NodeId) -> Vec2 {
        self.ui.scroll_offset(*element)
    }

    fn set_scroll_offset(&mut self, element: &NodeId, offset: Vec2) {
        self.ui.set_scroll_offset(*element, offset);
    }

    fn selected(&self) -> Option<NodeId> {
        self.ui.selected
    }

    fn set_selected(&mut self, element: Option<NodeId>) {
        self.ui.selected = element;
    }

    fn set_auto_navigation(&mut self, enabled: bool) {
        self.ui.auto_navigation = enabled;
    }

    fn set_auto_select(&mut self, enabled: bool) {
        self.ui.auto_select = enabled;
    }
}

impl MovementControl for DemoHost {
    fn disable_movement(&mut self) {
        self.player.enabled = false;
    }

    fn enable_movement(&mut self) {
        self.player.enabled = true;
    }
}

impl FrameScheduler for DemoHost {
    fn subscribe_frame_update(&mut self, priority: RenderPriority) -> FrameSubscription {
        let token = FrameSubscription::new(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push((token, priority));
        self.subscriptions.sort_by_key(|(_, p)| *p);
        tracing::debug!(token = token.raw(), "Frame update subscribed");
        token
    }

    fn unsubscribe_frame_update(&mut self, subscription: FrameSubscription) {
        self.subscriptions.retain(|(t, _)| *t != subscription);
        tracing::debug!(token = subscription.raw(), "Frame update unsubscribed");
    }
}
