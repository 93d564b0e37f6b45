//! Right-stick scrolling of the container under the selection

use crate::geometry::Vec2;
use crate::host::{ScrollAxes, UiHost};
use crate::input::StickState;

/// Nearest scrollable container, starting at `element` itself and walking up
pub fn scrollable_ancestor<H: UiHost + ?Sized>(
    host: &H,
    element: &H::Element,
) -> Option<(H::Element, ScrollAxes)> {
    let mut node = Some(element.clone());
    while let Some(current) = node {
        if let Some(axes) = host.scroll_axes(&current) {
            return Some((current, axes));
        }
        node = host.parent(&current);
    }
    None
}

/// Scroll offset change in pixels for `frames` reference frames.
/// `None` when the stick rests inside the deadzone.
pub fn scroll_delta(
    stick: &StickState,
    deadzone: f32,
    scroll_speed: f32,
    frames: f32,
    axes: ScrollAxes,
) -> Option<Vec2> {
    let deflection = stick.screen_deflection(deadzone)?;
    Some(axes.mask(deflection * (scroll_speed * frames)))
}
