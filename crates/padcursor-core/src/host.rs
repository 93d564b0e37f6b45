//! Host runtime seams
//!
//! The controller never talks to a window system, input backend or widget
//! toolkit directly. A host implements these traits and forwards its input
//! events to the controller:
//! - `InputHost`: analog sampling and system pointer visibility
//! - `UiHost`: element tree queries, global selection, cursor visual
//! - `MovementControl`: the player-movement controller to pause
//! - `FrameScheduler`: per-frame hook registration

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;
use crate::input::{GamepadId, GamepadSample};

/// Ordering slot for per-frame work (lower runs first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderPriority(pub u32);

impl RenderPriority {
    pub const FIRST: RenderPriority = RenderPriority(0);
    /// Input handling, before camera and character updates
    pub const INPUT: RenderPriority = RenderPriority(100);
    pub const CAMERA: RenderPriority = RenderPriority(200);
    pub const LAST: RenderPriority = RenderPriority(2000);
}

/// Token for a live per-frame subscription
///
/// Minted by the host on subscribe and handed back on unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameSubscription(u64);

impl FrameSubscription {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Which axes a scrollable container scrolls along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollAxes {
    X,
    Y,
    XY,
}

impl ScrollAxes {
    /// Zero out the components this container does not scroll along
    pub fn mask(self, delta: Vec2) -> Vec2 {
        match self {
            ScrollAxes::X => Vec2::new(delta.x, 0.0),
            ScrollAxes::Y => Vec2::new(0.0, delta.y),
            ScrollAxes::XY => delta,
        }
    }
}

/// Description of the cursor image the host should create
#[derive(Debug, Clone, PartialEq)]
pub struct CursorImage {
    /// Asset reference
    pub icon: String,
    /// Size in pixels
    pub size: Vec2,
    /// Fraction of the image that sits on the cursor position ((0.5, 0.5) = centered)
    pub anchor: Vec2,
}

/// Input service owned by the host
pub trait InputHost {
    /// Current analog stick readings for one gamepad
    fn analog_state(&self, gamepad: GamepadId) -> GamepadSample;

    /// Show or hide the operating system / mouse pointer
    fn set_system_pointer_visible(&mut self, visible: bool);
}

/// UI runtime owned by the host
pub trait UiHost {
    /// Handle to a UI element. Equality means "same element".
    type Element: Clone + PartialEq + std::fmt::Debug;
    /// Handle to an overlay layer
    type Overlay;
    /// Handle to an image element
    type Image;

    /// Look up an existing overlay layer by name
    fn find_overlay(&self, name: &str) -> Option<Self::Overlay>;

    /// Create an overlay layer drawn above the regular UI
    fn create_overlay(&mut self, name: &str) -> Self::Overlay;

    /// Create the cursor image inside `overlay`
    fn create_cursor_image(&mut self, overlay: &Self::Overlay, image: &CursorImage) -> Self::Image;

    fn set_image_visible(&mut self, image: &Self::Image, visible: bool);

    /// Move the image so its anchor sits at `position` (pixels)
    fn place_image(&mut self, image: &Self::Image, position: Vec2);

    /// Screen size in pixels
    fn viewport_size(&self) -> Vec2;

    /// Elements under `position` (pixels), topmost first
    fn elements_at(&self, position: Vec2) -> Vec<Self::Element>;

    /// Class name used for selectability filtering (e.g. "TextButton")
    fn class_name(&self, element: &Self::Element) -> String;

    /// The element's own selectable flag
    fn is_selectable(&self, element: &Self::Element) -> bool;

    fn parent(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Scroll axes if the element is a scrollable container
    fn scroll_axes(&self, element: &Self::Element) -> Option<ScrollAxes>;

    fn scroll_offset(&self, element: &Self::Element) -> Vec2;

    fn set_scroll_offset(&mut self, element: &Self::Element, offset: Vec2);

    /// The globally selected element
    fn selected(&self) -> Option<Self::Element>;

    fn set_selected(&mut self, element: Option<Self::Element>);

    /// Built-in directional (d-pad) navigation between elements
    fn set_auto_navigation(&mut self, enabled: bool);

    /// Automatic selection of an element when gamepad input starts
    fn set_auto_select(&mut self, enabled: bool);
}

/// Player-movement controller
pub trait MovementControl {
    fn disable_movement(&mut self);
    fn enable_movement(&mut self);
}

/// Per-frame hook registration
///
/// While a subscription is live the host calls
/// `CursorController::on_render_step` once per frame.
pub trait FrameScheduler {
    fn subscribe_frame_update(&mut self, priority: RenderPriority) -> FrameSubscription;
    fn unsubscribe_frame_update(&mut self, subscription: FrameSubscription);
}

/// Everything the controller needs from its host
pub trait CursorHost: InputHost + UiHost + MovementControl + FrameScheduler {}

impl<T> CursorHost for T where T: InputHost + UiHost + MovementControl + FrameScheduler {}
