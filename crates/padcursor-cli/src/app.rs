//! Demo application and frame loop

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use padcursor_core::{CursorController, DeviceKind, Vec2};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::host::DemoHost;
use crate::pad::{GamepadHandler, PadEvent};
use crate::ui_tree::{NodeId, CELL_HEIGHT, CELL_WIDTH};

/// Entries kept in the on-screen event log
const EVENT_LOG_LEN: usize = 6;

/// Controller signal as shown in the event log
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogEntry {
    Activated,
    Deactivated,
    SelectionStarted(NodeId),
    SelectionEnded(NodeId),
}

pub type EventLog = Rc<RefCell<VecDeque<LogEntry>>>;

/// Viewport in virtual pixels for a terminal of `cols` x `rows`
pub fn viewport_for(cols: u16, rows: u16) -> Vec2 {
    Vec2::new(cols as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

pub struct App {
    pub controller: CursorController<DemoHost>,
    pub gamepad: GamepadHandler,
    pub events: EventLog,
    last_device: Option<DeviceKind>,
    last_frame: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(mut controller: CursorController<DemoHost>, gamepad: GamepadHandler) -> Self {
        let events: EventLog = Rc::new(RefCell::new(VecDeque::new()));
        connect_log(&mut controller, &events);
        Self {
            controller,
            gamepad,
            events,
            last_device: None,
            last_frame: Instant::now(),
            should_quit: false,
        }
    }

    /// Run the application
    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let size = terminal.size()?;
        self.controller
            .host_mut()
            .ui
            .set_viewport(viewport_for(size.width, size.height));

        let result = self.main_loop(&mut terminal).await;

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;
        result
    }

    /// Main event loop
    async fn main_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        loop {
            for event in self.gamepad.poll() {
                self.handle_pad_event(event);
            }
            self.controller.host_mut().set_samples(self.gamepad.samples());

            let now = Instant::now();
            let dt = now.duration_since(self.last_frame).as_secs_f32();
            self.last_frame = now;
            self.tick(dt);

            terminal.draw(|f| crate::render::draw(f, self))?;

            tokio::select! {
                biased; // Prefer events over timeout when both are ready

                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_terminal_event(event);
                    }
                }
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    // 60fps frame tick
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.controller.hide_cursor();
        Ok(())
    }

    /// One frame: the per-frame hook while subscribed, player movement otherwise
    pub fn tick(&mut self, dt: f32) {
        if self.controller.host().has_frame_subscribers() {
            self.controller.on_render_step(dt);
        }
        let gamepad = self.controller.config().gamepad;
        let deadzone = self.controller.config().deadzone;
        self.controller.host_mut().step_player(gamepad, deadzone, dt);
    }

    pub fn handle_pad_event(&mut self, event: PadEvent) {
        match event {
            PadEvent::ButtonDown(pad, button) => self.controller.on_button_down(pad, button),
            PadEvent::Activity(pad) => self.set_device(DeviceKind::Gamepad(pad)),
            PadEvent::Connected(pad, name) => {
                tracing::info!(pad = %pad, "Using controller {}", name);
            }
            PadEvent::Disconnected(pad) => {
                if pad == self.controller.config().gamepad {
                    self.controller.hide_cursor();
                }
            }
        }
    }

    pub fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.set_device(DeviceKind::KeyboardMouse);
                match key.code {
                    KeyCode::Char('q') => self.should_quit = true,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.should_quit = true
                    }
                    _ => {}
                }
            }
            Event::Mouse(_) => self.set_device(DeviceKind::KeyboardMouse),
            Event::Resize(cols, rows) => {
                self.controller
                    .host_mut()
                    .ui
                    .set_viewport(viewport_for(cols, rows));
            }
            _ => {}
        }
    }

    /// Report a device change only when the device class actually changes
    fn set_device(&mut self, device: DeviceKind) {
        if self.last_device == Some(device) {
            return;
        }
        self.last_device = Some(device);
        self.controller.on_active_device_changed(device);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

fn connect_log(controller: &mut CursorController<DemoHost>, events: &EventLog) {
    fn push(events: &EventLog, entry: LogEntry) {
        let mut log = events.borrow_mut();
        if log.len() == EVENT_LOG_LEN {
            log.pop_front();
        }
        log.push_back(entry);
    }

    let log = Rc::clone(events);
    controller
        .cursor_activated
        .connect(move |_| push(&log, LogEntry::Activated));
    let log = Rc::clone(events);
    controller
        .cursor_deactivated
        .connect(move |_| push(&log, LogEntry::Deactivated));
    let log = Rc::clone(events);
    controller
        .selection_started
        .connect(move |id: &NodeId| push(&log, LogEntry::SelectionStarted(*id)));
    let log = Rc::clone(events);
    controller
        .selection_ended
        .connect(move |id: &NodeId| push(&log, LogEntry::SelectionEnded(*id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui_tree::DemoUi;
    use crossterm::event::{KeyEvent, KeyEventState};
    use padcursor_core::{CursorConfig, GamepadId, PadButton};

    fn app() -> App {
        let host = DemoHost::new(DemoUi::sample(viewport_for(100, 40)));
        let controller = CursorController::init(host, CursorConfig::default()).unwrap();
        App::new(controller, GamepadHandler::disabled())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_keyboard_use_leaves_cursor_mode() {
        let mut app = app();
        app.handle_pad_event(PadEvent::Activity(GamepadId(1)));
        app.handle_pad_event(PadEvent::ButtonDown(GamepadId(1), PadButton::Select));
        assert!(app.controller.is_active());

        app.handle_terminal_event(key(KeyCode::Char('x')));
        app.handle_terminal_event(key(KeyCode::Char('y')));
        assert!(!app.controller.is_active());
        assert_eq!(
            app.events.borrow().iter().copied().collect::<Vec<_>>(),
            vec![LogEntry::Activated, LogEntry::Deactivated]
        );
    }

    #[test]
    fn test_tick_selects_under_cursor() {
        let mut app = app();
        app.handle_pad_event(PadEvent::ButtonDown(GamepadId(1), PadButton::Select));
        app.tick(1.0 / 60.0);
        // Centre of a 100x40 screen lands inside the level list
        let selected = app.controller.host().ui.selected;
        assert!(selected.is_some());
        assert!(matches!(
            app.events.borrow().back(),
            Some(LogEntry::SelectionStarted(_))
        ));
    }

    #[test]
    fn test_quit_key() {
        let mut app = app();
        app.handle_terminal_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut app = app();
        for _ in 0..10 {
            app.handle_pad_event(PadEvent::ButtonDown(GamepadId(1), PadButton::Select));
        }
        assert_eq!(app.events.borrow().len(), EVENT_LOG_LEN);
    }
}
