//! Hit-test filtering and selection transitions

use crate::config::CursorConfig;
use crate::host::UiHost;

/// Outcome of comparing this frame's qualifying element with the current selection
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange<E> {
    /// Same element as last frame; the scroll stick applies to it
    Retained(E),
    /// Nothing was selected and `E` now qualifies
    Started(E),
    /// `ended` loses the selection to `next`. No started event for `next`.
    Replaced { ended: E, next: E },
    /// The selected element no longer qualifies
    Ended(E),
    /// Nothing selected, nothing qualifies
    Idle,
}

impl<E: PartialEq> SelectionChange<E> {
    pub fn between(current: Option<E>, qualifying: Option<E>) -> Self {
        match (current, qualifying) {
            (Some(current), Some(next)) if current == next => SelectionChange::Retained(next),
            (Some(ended), Some(next)) => SelectionChange::Replaced { ended, next },
            (None, Some(next)) => SelectionChange::Started(next),
            (Some(ended), None) => SelectionChange::Ended(ended),
            (None, None) => SelectionChange::Idle,
        }
    }
}

/// First hit (topmost first) whose class is selectable and whose own flag is set
pub fn first_qualifying<H: UiHost + ?Sized>(
    host: &H,
    hits: Vec<H::Element>,
    config: &CursorConfig,
) -> Option<H::Element> {
    hits.into_iter().find(|element| {
        config.is_selectable_class(&host.class_name(element)) && host.is_selectable(element)
    })
}
