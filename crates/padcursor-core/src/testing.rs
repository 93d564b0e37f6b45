//! In-memory host for tests
//!
//! `MockHost` keeps a flat element table with rectangles and z-order, a
//! settable gamepad sample, and a log of every side effect the controller
//! asked for.

use crate::geometry::Vec2;
use crate::host::{
    CursorImage, FrameScheduler, FrameSubscription, InputHost, MovementControl, RenderPriority,
    ScrollAxes, UiHost,
};
use crate::input::{GamepadId, GamepadSample, StickState, Thumbstick};

/// Element handle (index into the element table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MockElement(pub usize);

/// Side effect recorded by `MockHost`
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    PointerVisible(bool),
    AutoNavigation(bool),
    AutoSelect(bool),
    ImageVisible(bool),
    Selected(Option<MockElement>),
    MovementEnabled(bool),
    Subscribed(FrameSubscription),
    Unsubscribed(FrameSubscription),
    OverlayCreated(String),
}

#[derive(Debug, Clone)]
struct Node {
    class_name: String,
    selectable: bool,
    parent: Option<MockElement>,
    origin: Vec2,
    size: Vec2,
    z_index: i32,
    scroll_axes: Option<ScrollAxes>,
    scroll_offset: Vec2,
}

/// Recording host for controller tests
#[derive(Debug)]
pub struct MockHost {
    nodes: Vec<Node>,
    overlays: Vec<String>,
    pub viewport: Vec2,
    pub sample: GamepadSample,
    pub selected: Option<MockElement>,
    pub pointer_visible: bool,
    pub auto_navigation: bool,
    pub auto_select: bool,
    pub movement_enabled: bool,
    pub image: Option<CursorImage>,
    pub image_visible: bool,
    pub image_position: Option<Vec2>,
    pub subscriptions: Vec<(FrameSubscription, RenderPriority)>,
    next_subscription: u64,
    pub calls: Vec<HostCall>,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new(Vec2::new(1000.0, 1000.0))
    }
}

impl MockHost {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            nodes: Vec::new(),
            overlays: Vec::new(),
            viewport,
            sample: GamepadSample::new(),
            selected: None,
            pointer_visible: true,
            auto_navigation: true,
            auto_select: true,
            movement_enabled: true,
            image: None,
            image_visible: false,
            image_position: None,
            subscriptions: Vec::new(),
            next_subscription: 1,
            calls: Vec::new(),
        }
    }

    /// Register an existing overlay so `find_overlay` succeeds
    pub fn with_overlay(mut self, name: &str) -> Self {
        self.overlays.push(name.to_string());
        self
    }

    /// Add an element covering `origin..origin+size`. Later elements with the
    /// same z-index sit on top of earlier ones.
    pub fn add(
        &mut self,
        class_name: &str,
        origin: Vec2,
        size: Vec2,
        z_index: i32,
        parent: Option<MockElement>,
    ) -> MockElement {
        self.nodes.push(Node {
            class_name: class_name.to_string(),
            selectable: true,
            parent,
            origin,
            size,
            z_index,
            scroll_axes: None,
            scroll_offset: Vec2::ZERO,
        });
        MockElement(self.nodes.len() - 1)
    }

    pub fn set_selectable(&mut self, element: MockElement, selectable: bool) {
        self.nodes[element.0].selectable = selectable;
    }

    pub fn make_scrollable(&mut self, element: MockElement, axes: ScrollAxes) {
        self.nodes[element.0].scroll_axes = Some(axes);
    }

    pub fn move_element(&mut self, element: MockElement, origin: Vec2) {
        self.nodes[element.0].origin = origin;
    }

    pub fn set_stick(&mut self, stick: Thumbstick, x: f32, y: f32) {
        self.sample.set(stick, StickState::from_axes(x, y));
    }

    pub fn scroll_offset_of(&self, element: MockElement) -> Vec2 {
        self.nodes[element.0].scroll_offset
    }

    pub fn live_subscriptions(&self) -> usize {
        self.subscriptions.len()
    }
}

impl InputHost for MockHost {
    fn analog_state(&self, _gamepad: GamepadId) -> GamepadSample {
        self.sample.clone()
    }

    fn set_system_pointer_visible(&mut self, visible: bool) {
        self.pointer_visible = visible;
        self.calls.push(HostCall::PointerVisible(visible));
    }
}

impl UiHost for MockHost {
    type Element = MockElement;
    type Overlay = String;
    type Image = usize;

    fn find_overlay(&self, name: &str) -> Option<String> {
        self.overlays.iter().find(|o| *o == name).cloned()
    }

    fn create_overlay(&mut self, name: &str) -> String {
        self.overlays.push(name.to_string());
        self.calls.push(HostCall::OverlayCreated(name.to_string()));
        name.to_string()
    }

    fn create_cursor_image(&mut self, _overlay: &String, image: &CursorImage) -> usize {
        self.image = Some(image.clone());
        0
    }

    fn set_image_visible(&mut self, _image: &usize, visible: bool) {
        self.image_visible = visible;
        self.calls.push(HostCall::ImageVisible(visible));
    }

    fn place_image(&mut self, _image: &usize, position: Vec2) {
        self.image_position = Some(position);
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn elements_at(&self, position: Vec2) -> Vec<MockElement> {
        let mut hits: Vec<(usize, &Node)> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| {
                position.x >= n.origin.x
                    && position.x < n.origin.x + n.size.x
                    && position.y >= n.origin.y
                    && position.y < n.origin.y + n.size.y
            })
            .collect();
        hits.sort_by(|(ia, a), (ib, b)| b.z_index.cmp(&a.z_index).then(ib.cmp(ia)));
        hits.into_iter().map(|(i, _)| MockElement(i)).collect()
    }

    fn class_name(&self, element: &MockElement) -> String {
        self.nodes[element.0].class_name.clone()
    }

    fn is_selectable(&self, element: &MockElement) -> bool {
        self.nodes[element.0].selectable
    }

    fn parent(&self, element: &MockElement) -> Option<MockElement> {
        self.nodes[element.0].parent
    }

    fn scroll_axes(&self, element: &MockElement) -> Option<ScrollAxes> {
        self.nodes[element.0].scroll_axes
    }

    fn scroll_offset(&self, element: &MockElement) -> Vec2 {
        self.nodes[element.0].scroll_offset
    }

    fn set_scroll_offset(&mut self, element: &MockElement, offset: Vec2) {
        self.nodes[element.0].scroll_offset = offset;
    }

    fn selected(&self) -> Option<MockElement> {
        self.selected
    }

    fn set_selected(&mut self, element: Option<MockElement>) {
        self.selected = element;
        self.calls.push(HostCall::Selected(element));
    }

    fn set_auto_navigation(&mut self, enabled: bool) {
        self.auto_navigation = enabled;
        self.calls.push(HostCall::AutoNavigation(enabled));
    }

    fn set_auto_select(&mut self, enabled: bool) {
        self.auto_select = enabled;
        self.calls.push(HostCall::AutoSelect(enabled));
    }
}

impl MovementControl for MockHost {
    fn disable_movement(&mut self) {
        self.movement_enabled = false;
        self.calls.push(HostCall::MovementEnabled(false));
    }

    fn enable_movement(&mut self) {
        self.movement_enabled = true;
        self.calls.push(HostCall::MovementEnabled(true));
    }
}

impl FrameScheduler for MockHost {
    fn subscribe_frame_update(&mut self, priority: RenderPriority) -> FrameSubscription {
        let token = FrameSubscription::new(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push((token, priority));
        self.calls.push(HostCall::Subscribed(token));
        token
    }

    fn unsubscribe_frame_update(&mut self, subscription: FrameSubscription) {
        self.subscriptions.retain(|(t, _)| *t != subscription);
        self.calls.push(HostCall::Unsubscribed(subscription));
    }
}
