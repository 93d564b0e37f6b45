//! In-memory element tree
//!
//! Positions are virtual pixels. Children are laid out relative to their
//! parent's content origin, shifted by the parent's scroll offset and clipped
//! to the parent's bounds.

use padcursor_core::{ScrollAxes, Vec2};

/// Virtual pixels per terminal cell
pub const CELL_WIDTH: f32 = 8.0;
pub const CELL_HEIGHT: f32 = 16.0;

/// Element handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Axis-aligned rectangle in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Overlapping area, or `None` when the rectangles do not touch
    pub fn intersection(&self, other: &PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y1 = (self.y + self.height).min(other.y + other.height);
        if x1 > x0 && y1 > y0 {
            Some(PixelRect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }
}

/// Scroll state of a scrolling frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollArea {
    pub axes: ScrollAxes,
    pub offset: Vec2,
    /// Total scrollable content size
    pub content: Vec2,
}

/// One element of the tree
#[derive(Debug, Clone)]
pub struct UiNode {
    pub name: String,
    pub class_name: String,
    /// Position relative to the parent's content origin
    pub rect: PixelRect,
    pub z_index: i32,
    pub selectable: bool,
    pub parent: Option<NodeId>,
    pub scroll: Option<ScrollArea>,
}

/// Cursor image state as the host renders it
#[derive(Debug, Clone, Default)]
pub struct CursorSprite {
    pub icon: String,
    pub size: Vec2,
    pub anchor: Vec2,
    pub visible: bool,
    pub position: Vec2,
}

/// Element tree plus the UI runtime's global state
#[derive(Debug, Clone)]
pub struct DemoUi {
    nodes: Vec<UiNode>,
    viewport: Vec2,
    pub selected: Option<NodeId>,
    pub auto_navigation: bool,
    pub auto_select: bool,
    pub overlays: Vec<String>,
    pub cursor: CursorSprite,
}

impl DemoUi {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            nodes: Vec::new(),
            viewport,
            selected: None,
            auto_navigation: true,
            auto_select: true,
            overlays: Vec::new(),
            cursor: CursorSprite::default(),
        }
    }

    /// Built-in demo screen: a menu, a text box, a disabled button and a
    /// scrolling list of levels
    pub fn sample(viewport: Vec2) -> Self {
        let mut ui = Self::new(viewport);
        let cell = |col: f32, row: f32, w: f32, h: f32| {
            PixelRect::new(col * CELL_WIDTH, row * CELL_HEIGHT, w * CELL_WIDTH, h * CELL_HEIGHT)
        };

        ui.add("Title", "TextLabel", cell(2.0, 1.0, 36.0, 3.0), 1, None);

        let menu = ui.add("Menu", "Frame", cell(2.0, 5.0, 24.0, 17.0), 1, None);
        for (i, label) in ["Play", "Options", "Credits"].iter().enumerate() {
            ui.add(
                label,
                "TextButton",
                cell(2.0, 1.0 + 4.0 * i as f32, 20.0, 3.0),
                2,
                Some(menu),
            );
        }
        let locked = ui.add("Locked", "ImageButton", cell(2.0, 13.0, 20.0, 3.0), 2, Some(menu));
        ui.set_selectable(locked, false);

        ui.add("Name", "TextBox", cell(2.0, 23.0, 24.0, 3.0), 1, None);

        let list = ui.add("Levels", "ScrollingFrame", cell(30.0, 5.0, 30.0, 21.0), 1, None);
        let item_count = 15;
        let content = Vec2::new(
            30.0 * CELL_WIDTH,
            (2.0 + 3.0 * item_count as f32) * CELL_HEIGHT,
        );
        ui.make_scrollable(list, ScrollAxes::Y, content);
        for i in 0..item_count {
            ui.add(
                &format!("Level {}", i + 1),
                "TextButton",
                cell(2.0, 1.0 + 3.0 * i as f32, 24.0, 3.0),
                2,
                Some(list),
            );
        }

        ui
    }

    pub fn add(
        &mut self,
        name: &str,
        class_name: &str,
        rect: PixelRect,
        z_index: i32,
        parent: Option<NodeId>,
    ) -> NodeId {
        self.nodes.push(UiNode {
            name: name.to_string(),
            class_name: class_name.to_string(),
            rect,
            z_index,
            selectable: true,
            parent,
            scroll: None,
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn set_selectable(&mut self, id: NodeId, selectable: bool) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.selectable = selectable;
        }
    }

    pub fn make_scrollable(&mut self, id: NodeId, axes: ScrollAxes, content: Vec2) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.scroll = Some(ScrollArea {
                axes,
                offset: Vec2::ZERO,
                content,
            });
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&UiNode> {
        self.nodes.get(id.0)
    }

    pub fn name(&self, id: NodeId) -> &str {
        self.node(id).map(|n| n.name.as_str()).unwrap_or("?")
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut node = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = node {
            depth += 1;
            node = self.node(parent).and_then(|n| n.parent);
        }
        depth
    }

    /// Screen rectangle of `id`, ignoring clipping
    pub fn absolute_rect(&self, id: NodeId) -> PixelRect {
        let Some(node) = self.node(id) else {
            return PixelRect::default();
        };
        let mut rect = node.rect;
        if let Some(parent) = node.parent {
            let origin = self.absolute_rect(parent);
            let scroll = self
                .node(parent)
                .and_then(|p| p.scroll)
                .map(|s| s.offset)
                .unwrap_or(Vec2::ZERO);
            rect.x += origin.x - scroll.x;
            rect.y += origin.y - scroll.y;
        }
        rect
    }

    /// Visible part of `id` after clipping against every ancestor and the
    /// viewport
    pub fn visible_rect(&self, id: NodeId) -> Option<PixelRect> {
        let screen = PixelRect::new(0.0, 0.0, self.viewport.x, self.viewport.y);
        let mut rect = self.absolute_rect(id).intersection(&screen)?;
        let mut ancestor = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = ancestor {
            rect = rect.intersection(&self.absolute_rect(parent))?;
            ancestor = self.node(parent).and_then(|n| n.parent);
        }
        Some(rect)
    }

    /// Back-to-front draw order: z-index, then tree depth, then insertion
    pub fn paint_order(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.ids().collect();
        ids.sort_by_key(|id| {
            (
                self.node(*id).map(|n| n.z_index).unwrap_or_default(),
                self.depth(*id),
                id.0,
            )
        });
        ids
    }

    /// Elements whose visible area contains `point`, topmost first
    pub fn hit_test(&self, point: Vec2) -> Vec<NodeId> {
        let mut hits: Vec<NodeId> = self
            .paint_order()
            .into_iter()
            .filter(|id| self.visible_rect(*id).is_some_and(|r| r.contains(point)))
            .collect();
        hits.reverse();
        hits
    }

    pub fn scroll_offset(&self, id: NodeId) -> Vec2 {
        self.node(id)
            .and_then(|n| n.scroll)
            .map(|s| s.offset)
            .unwrap_or(Vec2::ZERO)
    }

    /// Set the scroll offset, clamped to the scrollable range
    pub fn set_scroll_offset(&mut self, id: NodeId, offset: Vec2) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        let size = Vec2::new(node.rect.width, node.rect.height);
        if let Some(scroll) = node.scroll.as_mut() {
            let max_x = (scroll.content.x - size.x).max(0.0);
            let max_y = (scroll.content.y - size.y).max(0.0);
            scroll.offset = Vec2::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (DemoUi, NodeId, NodeId, NodeId) {
        let mut ui = DemoUi::new(Vec2::new(800.0, 600.0));
        let list = ui.add(
            "List",
            "ScrollingFrame",
            PixelRect::new(100.0, 100.0, 200.0, 100.0),
            1,
            None,
        );
        ui.make_scrollable(list, ScrollAxes::Y, Vec2::new(200.0, 400.0));
        let button = |y| PixelRect::new(0.0, y, 200.0, 50.0);
        let first = ui.add("First", "TextButton", button(0.0), 2, Some(list));
        let fourth = ui.add("Fourth", "TextButton", button(150.0), 2, Some(list));
        (ui, list, first, fourth)
    }

    #[test]
    fn test_hit_test_topmost_first() {
        let (ui, list, first, _) = tree();
        assert_eq!(ui.hit_test(Vec2::new(150.0, 120.0)), vec![first, list]);
        assert!(ui.hit_test(Vec2::new(10.0, 10.0)).is_empty());
    }

    #[test]
    fn test_children_clipped_to_parent() {
        let (ui, list, _, fourth) = tree();
        // Fourth sits below the visible part of the list
        assert!(ui.visible_rect(fourth).is_none());
        assert_eq!(ui.hit_test(Vec2::new(150.0, 260.0)), Vec::<NodeId>::new());
        assert!(ui.visible_rect(list).is_some());
    }

    #[test]
    fn test_scroll_moves_children() {
        let (mut ui, list, first, fourth) = tree();
        ui.set_scroll_offset(list, Vec2::new(0.0, 150.0));
        assert_eq!(ui.absolute_rect(fourth).y, 100.0);
        assert_eq!(ui.hit_test(Vec2::new(150.0, 120.0)), vec![fourth, list]);
        assert!(ui.visible_rect(first).is_none());
    }

    #[test]
    fn test_scroll_offset_clamped() {
        let (mut ui, list, _, _) = tree();
        ui.set_scroll_offset(list, Vec2::new(50.0, 1000.0));
        assert_eq!(ui.scroll_offset(list), Vec2::new(0.0, 300.0));
        ui.set_scroll_offset(list, Vec2::new(0.0, -20.0));
        assert_eq!(ui.scroll_offset(list), Vec2::ZERO);
    }

    #[test]
    fn test_sample_screen_layout() {
        let ui = DemoUi::sample(Vec2::new(100.0 * CELL_WIDTH, 40.0 * CELL_HEIGHT));
        let play = ui.ids().find(|id| ui.name(*id) == "Play").unwrap();
        let rect = ui.visible_rect(play).unwrap();
        let centre = Vec2::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
        assert_eq!(ui.hit_test(centre).first(), Some(&play));
    }
}
