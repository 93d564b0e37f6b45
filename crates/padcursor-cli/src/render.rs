//! Terminal rendering of the demo screen

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LogEntry};
use crate::ui_tree::{DemoUi, NodeId, PixelRect, CELL_HEIGHT, CELL_WIDTH};

const ACCENT: Color = Color::Cyan;
const DIM: Color = Color::DarkGray;
const SELECTED: Color = Color::Yellow;

/// Width of the event log panel in cells
const LOG_PANEL_WIDTH: u16 = 34;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let host = app.controller.host();
    let ui = &host.ui;

    for id in ui.paint_order() {
        render_node(f, ui, id, chunks[0]);
    }

    if host.player.enabled {
        let (x, y) = pixel_to_cell(host.player.position.x, host.player.position.y);
        put_char(f.buffer_mut(), chunks[0], x, y, '@', Style::default().fg(Color::Green));
    }

    if ui.cursor.visible {
        let (x, y) = pixel_to_cell(ui.cursor.position.x, ui.cursor.position.y);
        put_char(
            f.buffer_mut(),
            chunks[0],
            x,
            y,
            '◆',
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        );
    }

    render_event_log(f, app, chunks[0]);
    render_status_bar(f, app, chunks[1]);
}

/// Cell containing a virtual pixel position
fn pixel_to_cell(x: f32, y: f32) -> (u16, u16) {
    (
        (x / CELL_WIDTH).floor().max(0.0) as u16,
        (y / CELL_HEIGHT).floor().max(0.0) as u16,
    )
}

/// Cells covered by a pixel rectangle
fn cell_rect(rect: PixelRect) -> Rect {
    let (x0, y0) = pixel_to_cell(rect.x, rect.y);
    let x1 = ((rect.x + rect.width) / CELL_WIDTH).ceil().max(0.0) as u16;
    let y1 = ((rect.y + rect.height) / CELL_HEIGHT).ceil().max(0.0) as u16;
    Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}

fn put_char(buf: &mut Buffer, bounds: Rect, x: u16, y: u16, ch: char, style: Style) {
    let x = x.min(bounds.right().saturating_sub(1));
    let y = y.min(bounds.bottom().saturating_sub(1));
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch).set_style(style);
    }
}

fn render_node(f: &mut Frame, ui: &DemoUi, id: NodeId, bounds: Rect) {
    let Some(node) = ui.node(id) else {
        return;
    };
    let Some(visible) = ui.visible_rect(id) else {
        return;
    };
    let area = cell_rect(visible).intersection(bounds);
    if area.width == 0 || area.height == 0 {
        return;
    }

    let style = if ui.selected == Some(id) {
        Style::default().fg(SELECTED).add_modifier(Modifier::BOLD)
    } else if !node.selectable {
        Style::default().fg(DIM)
    } else {
        Style::default()
    };

    match node.class_name.as_str() {
        "TextLabel" => {
            let title = Paragraph::new(node.name.as_str())
                .style(style.fg(ACCENT).add_modifier(Modifier::BOLD));
            f.render_widget(title, area);
        }
        "ScrollingFrame" => {
            let block = Block::default()
                .borders(Borders::ALL)
                .title(node.name.as_str())
                .border_style(style);
            f.render_widget(block, area);
            if let Some(scroll) = node.scroll {
                let track = Rect::new(
                    area.right().saturating_sub(2),
                    area.y + 1,
                    1,
                    area.height.saturating_sub(2),
                );
                render_scrollbar(
                    f.buffer_mut(),
                    track,
                    (scroll.offset.y / CELL_HEIGHT).round() as usize,
                    (scroll.content.y / CELL_HEIGHT).round() as usize,
                    (node.rect.height / CELL_HEIGHT).round() as usize,
                );
            }
        }
        _ => {
            // Clipped elements lose the border on the cut side
            let full = cell_rect(ui.absolute_rect(id));
            let mut borders = Borders::NONE;
            if area.y == full.y {
                borders |= Borders::TOP;
            }
            if area.bottom() == full.bottom() {
                borders |= Borders::BOTTOM;
            }
            if area.x == full.x {
                borders |= Borders::LEFT;
            }
            if area.right() == full.right() {
                borders |= Borders::RIGHT;
            }
            let label = if node.class_name == "TextBox" {
                format!("{}: ____", node.name)
            } else {
                node.name.clone()
            };
            let widget = Paragraph::new(label)
                .style(style)
                .block(Block::default().borders(borders).border_style(style));
            f.render_widget(widget, area);
        }
    }
}

/// Vertical scrollbar one cell wide
fn render_scrollbar(buf: &mut Buffer, area: Rect, offset: usize, total: usize, visible: usize) {
    if total <= visible || area.height == 0 {
        return;
    }

    let height = area.height as usize;
    let thumb_size = ((visible as f32 / total as f32) * height as f32)
        .max(1.0)
        .min(height as f32)
        .round() as usize;

    let max_offset = total.saturating_sub(visible);
    let thumb_pos = if max_offset > 0 {
        ((offset.min(max_offset) as f32 / max_offset as f32)
            * height.saturating_sub(thumb_size) as f32)
            .round() as usize
    } else {
        0
    };

    for y in 0..height {
        let is_thumb = y >= thumb_pos && y < thumb_pos + thumb_size;
        let (ch, color) = if is_thumb { ('█', ACCENT) } else { ('░', DIM) };
        if let Some(cell) = buf.cell_mut((area.x, area.y + y as u16)) {
            cell.set_char(ch).set_fg(color);
        }
    }
}

fn render_event_log(f: &mut Frame, app: &App, bounds: Rect) {
    let ui = &app.controller.host().ui;
    let events = app.events.borrow();
    let height = (events.len() as u16 + 2).min(bounds.height);
    let width = LOG_PANEL_WIDTH.min(bounds.width);
    let area = Rect::new(
        bounds.right().saturating_sub(width),
        bounds.bottom().saturating_sub(height),
        width,
        height,
    );

    let lines: Vec<Line> = events
        .iter()
        .map(|entry| match entry {
            LogEntry::Activated => {
                Line::from(Span::styled("cursor activated", Style::default().fg(ACCENT)))
            }
            LogEntry::Deactivated => {
                Line::from(Span::styled("cursor deactivated", Style::default().fg(DIM)))
            }
            LogEntry::SelectionStarted(id) => Line::from(vec![
                Span::styled("+ ", Style::default().fg(SELECTED)),
                Span::raw(ui.name(*id).to_string()),
            ]),
            LogEntry::SelectionEnded(id) => Line::from(vec![
                Span::styled("- ", Style::default().fg(DIM)),
                Span::raw(ui.name(*id).to_string()),
            ]),
        })
        .collect();

    let panel =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Events"));
    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let ctl = &app.controller;
    let mode = if ctl.is_active() {
        Span::styled(" CURSOR ", Style::default().fg(Color::Black).bg(ACCENT))
    } else {
        Span::styled(" PLAYER ", Style::default().fg(Color::Black).bg(Color::Green))
    };
    let position = ctl.position();
    let controller = app
        .gamepad
        .controller_name
        .as_deref()
        .unwrap_or("no controller");

    let line = Line::from(vec![
        mode,
        Span::raw(format!(" ({:.2}, {:.2})", position.x(), position.y())),
        Span::styled(" │ ", Style::default().fg(DIM)),
        Span::styled(controller.to_string(), Style::default().fg(DIM)),
        Span::styled(" │ ", Style::default().fg(DIM)),
        Span::styled(
            format!(
                "{:?} toggle  {:?} cancel  q quit",
                ctl.config().activation_button,
                ctl.config().cancel_button
            ),
            Style::default().fg(DIM),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
