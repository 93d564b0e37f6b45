use std::cell::RefCell;
use std::rc::Rc;

use padcursor_core::testing::{HostCall, MockElement, MockHost};
use padcursor_core::{
    CursorConfig, CursorController, CursorError, DeviceKind, GamepadId, PadButton, ScrollAxes,
    Thumbstick, Vec2,
};

const DT: f32 = 1.0 / 60.0;
const PAD: GamepadId = GamepadId(1);

fn config() -> CursorConfig {
    CursorConfig {
        sensitivity: 10.0,
        scroll_speed: 15.0,
        deadzone: 0.2,
        ..CursorConfig::default()
    }
}

fn controller(host: MockHost) -> CursorController<MockHost> {
    CursorController::init(host, config()).unwrap()
}

/// Record every signal fire as a string
fn record(ctl: &mut CursorController<MockHost>) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));

    let l = Rc::clone(&log);
    ctl.cursor_activated.connect(move |_| l.borrow_mut().push("activated".into()));
    let l = Rc::clone(&log);
    ctl.cursor_deactivated.connect(move |_| l.borrow_mut().push("deactivated".into()));
    let l = Rc::clone(&log);
    ctl.selection_started
        .connect(move |e: &MockElement| l.borrow_mut().push(format!("started {}", e.0)));
    let l = Rc::clone(&log);
    ctl.selection_ended
        .connect(move |e: &MockElement| l.borrow_mut().push(format!("ended {}", e.0)));

    log
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_starts_inactive_and_centered() {
    let ctl = controller(MockHost::default());
    let state = ctl.state();
    assert!(!state.active);
    assert_eq!(state.position.x(), 0.5);
    assert_eq!(state.position.y(), 0.5);
    assert!(!ctl.host().image_visible);
    assert_eq!(ctl.host().live_subscriptions(), 0);
}

#[test]
fn test_init_creates_overlay_when_allowed() {
    let ctl = controller(MockHost::default());
    assert!(ctl
        .host()
        .calls
        .contains(&HostCall::OverlayCreated("GamepadCursor".into())));
    let image = ctl.host().image.clone().unwrap();
    assert_eq!(image.size, Vec2::new(32.0, 32.0));
    assert_eq!(image.anchor, Vec2::new(0.5, 0.5));
}

#[test]
fn test_init_reuses_existing_overlay() {
    let host = MockHost::default().with_overlay("GamepadCursor");
    let cfg = CursorConfig {
        auto_create_overlay: false,
        ..config()
    };
    let ctl = CursorController::init(host, cfg).unwrap();
    assert!(!ctl
        .host()
        .calls
        .iter()
        .any(|c| matches!(c, HostCall::OverlayCreated(_))));
}

#[test]
fn test_init_missing_overlay_is_fatal() {
    let cfg = CursorConfig {
        auto_create_overlay: false,
        ..config()
    };
    let err = CursorController::init(MockHost::default(), cfg).unwrap_err();
    assert!(matches!(err, CursorError::MissingOverlay(name) if name == "GamepadCursor"));
}

#[test]
fn test_init_rejects_invalid_config() {
    let cfg = CursorConfig {
        deadzone: -0.1,
        ..config()
    };
    let err = CursorController::init(MockHost::default(), cfg).unwrap_err();
    assert!(matches!(err, CursorError::InvalidConfig(_)));
}

// =============================================================================
// Activation state machine
// =============================================================================

#[test]
fn test_activation_side_effects() {
    let mut ctl = controller(MockHost::default());
    let log = record(&mut ctl);
    ctl.host_mut().calls.clear();

    ctl.on_button_down(PAD, PadButton::Select);

    assert!(ctl.is_active());
    let host = ctl.host();
    assert!(!host.pointer_visible);
    assert!(!host.auto_navigation);
    assert!(!host.auto_select);
    assert!(host.image_visible);
    assert!(!host.movement_enabled);
    assert_eq!(host.live_subscriptions(), 1);
    assert_eq!(host.image_position, Some(Vec2::new(500.0, 500.0)));
    assert!(matches!(host.calls.last(), Some(HostCall::Subscribed(_))));
    assert_eq!(*log.borrow(), vec!["activated"]);
}

#[test]
fn test_activation_clears_foreign_selection_silently() {
    let mut host = MockHost::default();
    let button = host.add("TextButton", Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), 1, None);
    host.selected = Some(button);
    let mut ctl = controller(host);
    let log = record(&mut ctl);

    ctl.show_cursor();

    assert_eq!(ctl.host().selected, None);
    assert_eq!(*log.borrow(), vec!["activated"]);
}

#[test]
fn test_activation_resets_position() {
    let mut ctl = controller(MockHost::default());
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Left, 1.0, 0.0);
    for _ in 0..10 {
        ctl.on_render_step(DT);
    }
    assert!(ctl.position().x() > 0.5);

    ctl.hide_cursor();
    ctl.show_cursor();
    assert_eq!(ctl.position().x(), 0.5);
    assert_eq!(ctl.position().y(), 0.5);
}

#[test]
fn test_deactivation_side_effects() {
    let mut ctl = controller(MockHost::default());
    ctl.show_cursor();
    let log = record(&mut ctl);
    ctl.host_mut().calls.clear();

    ctl.on_button_down(PAD, PadButton::Select);

    assert!(!ctl.is_active());
    let host = ctl.host();
    assert!(host.pointer_visible);
    assert!(host.auto_navigation);
    assert!(host.auto_select);
    assert!(!host.image_visible);
    assert!(host.movement_enabled);
    assert_eq!(host.live_subscriptions(), 0);
    assert!(matches!(host.calls.last(), Some(HostCall::Unsubscribed(_))));
    assert_eq!(*log.borrow(), vec!["deactivated"]);
}

#[test]
fn test_activation_toggle_parity() {
    for presses in 0..7 {
        let mut ctl = controller(MockHost::default());
        for _ in 0..presses {
            ctl.on_button_down(PAD, PadButton::Select);
        }
        assert_eq!(ctl.is_active(), presses % 2 == 1, "presses = {}", presses);
        assert_eq!(ctl.host().live_subscriptions(), presses % 2);
    }
}

#[test]
fn test_cancel_button_only_deactivates() {
    let mut ctl = controller(MockHost::default());

    ctl.on_button_down(PAD, PadButton::B);
    assert!(!ctl.is_active());

    ctl.on_button_down(PAD, PadButton::Select);
    ctl.on_button_down(PAD, PadButton::B);
    assert!(!ctl.is_active());
}

#[test]
fn test_other_buttons_and_gamepads_ignored() {
    let mut ctl = controller(MockHost::default());

    ctl.on_button_down(GamepadId(2), PadButton::Select);
    assert!(!ctl.is_active());

    ctl.on_button_down(PAD, PadButton::A);
    assert!(!ctl.is_active());

    ctl.on_button_down(PAD, PadButton::Select);
    ctl.on_button_down(GamepadId(2), PadButton::B);
    assert!(ctl.is_active());
}

#[test]
fn test_show_and_hide_are_idempotent() {
    let mut ctl = controller(MockHost::default());
    let log = record(&mut ctl);

    ctl.hide_cursor();
    ctl.show_cursor();
    ctl.show_cursor();
    assert_eq!(ctl.host().live_subscriptions(), 1);
    ctl.hide_cursor();
    ctl.hide_cursor();

    assert_eq!(*log.borrow(), vec!["activated", "deactivated"]);
}

#[test]
fn test_device_change_deactivates_once() {
    let mut ctl = controller(MockHost::default());
    ctl.show_cursor();
    let log = record(&mut ctl);
    ctl.host_mut().calls.clear();

    ctl.on_active_device_changed(DeviceKind::KeyboardMouse);
    ctl.on_active_device_changed(DeviceKind::KeyboardMouse);
    ctl.on_active_device_changed(DeviceKind::Touch);

    assert!(!ctl.is_active());
    assert_eq!(*log.borrow(), vec!["deactivated"]);
    let pointer_restores = ctl
        .host()
        .calls
        .iter()
        .filter(|c| **c == HostCall::PointerVisible(true))
        .count();
    assert_eq!(pointer_restores, 1);
}

#[test]
fn test_device_change_to_configured_pad_keeps_cursor() {
    let mut ctl = controller(MockHost::default());
    ctl.show_cursor();

    ctl.on_active_device_changed(DeviceKind::Gamepad(PAD));
    assert!(ctl.is_active());

    ctl.on_active_device_changed(DeviceKind::Gamepad(GamepadId(3)));
    assert!(!ctl.is_active());
}

#[test]
fn test_dispose_deactivates() {
    let mut ctl = controller(MockHost::default());
    ctl.show_cursor();
    let host = ctl.dispose();
    assert!(host.pointer_visible);
    assert!(host.movement_enabled);
    assert_eq!(host.live_subscriptions(), 0);
}

// =============================================================================
// Motion
// =============================================================================

#[test]
fn test_one_frame_full_up_deflection() {
    let mut ctl = controller(MockHost::default());
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Left, 0.0, 1.0);

    ctl.on_render_step(DT);

    let dir = ctl.move_direction();
    assert!(approx(dir.x, 0.0));
    assert!(approx(dir.y, -0.01));
    assert!(approx(ctl.position().x(), 0.5));
    assert!(approx(ctl.position().y(), 0.49));
    let pixel = ctl.host().image_position.unwrap();
    assert!((pixel.y - 490.0).abs() < 0.01);
}

#[test]
fn test_no_drift_inside_deadzone() {
    let mut ctl = controller(MockHost::default());
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Left, 0.1, -0.15);

    for _ in 0..120 {
        ctl.on_render_step(DT);
        assert_eq!(ctl.move_direction(), Vec2::ZERO);
    }
    assert_eq!(ctl.position().x(), 0.5);
    assert_eq!(ctl.position().y(), 0.5);
}

#[test]
fn test_position_stays_in_unit_square() {
    let mut ctl = controller(MockHost::default());
    ctl.show_cursor();

    let inputs = [(1.0, 1.0), (-1.0, -1.0), (50.0, -50.0), (-1.0, 0.3)];
    for (x, y) in inputs {
        ctl.host_mut().set_stick(Thumbstick::Left, x, y);
        for dt in [DT, 0.5, 10.0] {
            ctl.on_render_step(dt);
            let p = ctl.position();
            assert!((0.0..=1.0).contains(&p.x()));
            assert!((0.0..=1.0).contains(&p.y()));
        }
    }
}

#[test]
fn test_frame_rate_independence() {
    let mut whole = controller(MockHost::default());
    let mut halves = controller(MockHost::default());
    for ctl in [&mut whole, &mut halves] {
        ctl.show_cursor();
        ctl.host_mut().set_stick(Thumbstick::Left, 0.7, -0.4);
    }

    let dt = 0.05;
    whole.on_render_step(dt);
    halves.on_render_step(dt / 2.0);
    halves.on_render_step(dt / 2.0);

    assert!(approx(whole.position().x(), halves.position().x()));
    assert!(approx(whole.position().y(), halves.position().y()));
}

#[test]
fn test_render_step_ignored_while_inactive() {
    let mut ctl = controller(MockHost::default());
    ctl.host_mut().set_stick(Thumbstick::Left, 1.0, 0.0);
    ctl.on_render_step(DT);
    assert_eq!(ctl.position().x(), 0.5);
    assert_eq!(ctl.host().image_position, None);
}

#[test]
fn test_non_finite_dt_does_not_move() {
    let mut ctl = controller(MockHost::default());
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Left, 1.0, 0.0);
    ctl.on_render_step(f32::NAN);
    ctl.on_render_step(-1.0);
    assert_eq!(ctl.position().x(), 0.5);
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn test_selection_started_fires_once() {
    let mut host = MockHost::default();
    let button = host.add("TextButton", Vec2::new(400.0, 400.0), Vec2::new(200.0, 200.0), 1, None);
    let mut ctl = controller(host);
    ctl.show_cursor();
    let log = record(&mut ctl);

    for _ in 0..5 {
        ctl.on_render_step(DT);
    }

    assert_eq!(ctl.host().selected, Some(button));
    assert_eq!(*log.borrow(), vec![format!("started {}", button.0)]);
}

#[test]
fn test_selection_ended_when_cursor_moves_off() {
    let mut host = MockHost::default();
    let button = host.add("TextButton", Vec2::new(450.0, 450.0), Vec2::new(100.0, 100.0), 1, None);
    let mut ctl = controller(host);
    ctl.show_cursor();
    let log = record(&mut ctl);

    ctl.on_render_step(DT);
    ctl.host_mut().set_stick(Thumbstick::Left, 1.0, 0.0);
    for _ in 0..30 {
        ctl.on_render_step(DT);
    }

    assert_eq!(ctl.host().selected, None);
    assert_eq!(
        *log.borrow(),
        vec![format!("started {}", button.0), format!("ended {}", button.0)]
    );
}

#[test]
fn test_selection_ended_when_element_becomes_unselectable() {
    let mut host = MockHost::default();
    let button = host.add("ImageButton", Vec2::new(0.0, 0.0), Vec2::new(1000.0, 1000.0), 1, None);
    let mut ctl = controller(host);
    ctl.show_cursor();
    let log = record(&mut ctl);

    ctl.on_render_step(DT);
    ctl.host_mut().set_selectable(button, false);
    ctl.on_render_step(DT);
    ctl.on_render_step(DT);

    assert_eq!(ctl.host().selected, None);
    assert_eq!(
        *log.borrow(),
        vec![format!("started {}", button.0), format!("ended {}", button.0)]
    );
}

#[test]
fn test_selection_ended_on_deactivation() {
    let mut host = MockHost::default();
    let button = host.add("TextBox", Vec2::new(0.0, 0.0), Vec2::new(1000.0, 1000.0), 1, None);
    let mut ctl = controller(host);
    ctl.show_cursor();
    let log = record(&mut ctl);

    ctl.on_render_step(DT);
    ctl.on_button_down(PAD, PadButton::B);

    assert_eq!(ctl.host().selected, None);
    assert_eq!(
        *log.borrow(),
        vec![
            format!("started {}", button.0),
            format!("ended {}", button.0),
            "deactivated".to_string()
        ]
    );
}

#[test]
fn test_direct_swap_ends_without_starting() {
    let mut host = MockHost::default();
    let first = host.add("TextButton", Vec2::new(400.0, 400.0), Vec2::new(200.0, 200.0), 1, None);
    let second = host.add("TextButton", Vec2::new(2000.0, 0.0), Vec2::new(200.0, 200.0), 1, None);
    let mut ctl = controller(host);
    ctl.show_cursor();
    let log = record(&mut ctl);

    ctl.on_render_step(DT);
    // Swap the buttons under a stationary cursor
    ctl.host_mut().move_element(first, Vec2::new(2000.0, 0.0));
    ctl.host_mut().move_element(second, Vec2::new(400.0, 400.0));
    ctl.on_render_step(DT);
    ctl.on_render_step(DT);

    assert_eq!(ctl.host().selected, Some(second));
    assert_eq!(
        *log.borrow(),
        vec![format!("started {}", first.0), format!("ended {}", first.0)]
    );
}

#[test]
fn test_topmost_qualifying_element_wins() {
    let mut host = MockHost::default();
    let lower = host.add("TextButton", Vec2::new(0.0, 0.0), Vec2::new(1000.0, 1000.0), 1, None);
    let _label = host.add("TextLabel", Vec2::new(0.0, 0.0), Vec2::new(1000.0, 1000.0), 5, None);
    let upper = host.add("ImageButton", Vec2::new(0.0, 0.0), Vec2::new(1000.0, 1000.0), 3, None);
    let mut ctl = controller(host);
    ctl.show_cursor();

    ctl.on_render_step(DT);
    assert_eq!(ctl.host().selected, Some(upper));

    ctl.host_mut().set_selectable(upper, false);
    ctl.on_render_step(DT);
    ctl.on_render_step(DT);
    assert_eq!(ctl.host().selected, Some(lower));
}

#[test]
fn test_non_selectable_class_never_selected() {
    let mut host = MockHost::default();
    host.add("Frame", Vec2::new(0.0, 0.0), Vec2::new(1000.0, 1000.0), 1, None);
    let mut ctl = controller(host);
    ctl.show_cursor();
    let log = record(&mut ctl);

    ctl.on_render_step(DT);

    assert_eq!(ctl.host().selected, None);
    assert!(log.borrow().is_empty());
}

// =============================================================================
// Scrolling
// =============================================================================

fn scrolling_host(axes: ScrollAxes) -> (MockHost, MockElement, MockElement) {
    let mut host = MockHost::default();
    let frame = host.add("ScrollingFrame", Vec2::new(0.0, 0.0), Vec2::new(1000.0, 1000.0), 1, None);
    host.make_scrollable(frame, axes);
    host.set_selectable(frame, false);
    let item = host.add(
        "TextButton",
        Vec2::new(300.0, 300.0),
        Vec2::new(400.0, 400.0),
        2,
        Some(frame),
    );
    (host, frame, item)
}

#[test]
fn test_scroll_applies_to_ancestor_of_retained_selection() {
    let (host, frame, item) = scrolling_host(ScrollAxes::XY);
    let mut ctl = controller(host);
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Right, 0.0, -1.0);

    // First frame selects, no scroll yet
    ctl.on_render_step(DT);
    assert_eq!(ctl.host().selected, Some(item));
    assert_eq!(ctl.host().scroll_offset_of(frame), Vec2::ZERO);

    ctl.on_render_step(DT);
    let offset = ctl.host().scroll_offset_of(frame);
    assert!(approx(offset.x, 0.0));
    assert!(approx(offset.y, 15.0));
}

#[test]
fn test_scroll_respects_axes() {
    let (host, frame, _) = scrolling_host(ScrollAxes::X);
    let mut ctl = controller(host);
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Right, 0.6, 0.8);

    ctl.on_render_step(DT);
    ctl.on_render_step(DT);

    let offset = ctl.host().scroll_offset_of(frame);
    assert!(approx(offset.x, 9.0));
    assert_eq!(offset.y, 0.0);
}

#[test]
fn test_scroll_inside_deadzone_does_nothing() {
    let (host, frame, _) = scrolling_host(ScrollAxes::XY);
    let mut ctl = controller(host);
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Right, 0.1, 0.1);

    for _ in 0..10 {
        ctl.on_render_step(DT);
    }
    assert_eq!(ctl.host().scroll_offset_of(frame), Vec2::ZERO);
}

#[test]
fn test_scroll_without_scrollable_ancestor_is_skipped() {
    let mut host = MockHost::default();
    let button = host.add("TextButton", Vec2::new(0.0, 0.0), Vec2::new(1000.0, 1000.0), 1, None);
    let mut ctl = controller(host);
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Right, 1.0, 0.0);

    ctl.on_render_step(DT);
    ctl.on_render_step(DT);
    assert_eq!(ctl.host().selected, Some(button));
    assert_eq!(ctl.host().scroll_offset_of(button), Vec2::ZERO);
}

#[test]
fn test_selected_scrolling_frame_scrolls_itself() {
    let mut host = MockHost::default();
    let frame = host.add("ScrollingFrame", Vec2::new(0.0, 0.0), Vec2::new(1000.0, 1000.0), 1, None);
    host.make_scrollable(frame, ScrollAxes::Y);
    let mut ctl = controller(host);
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Right, 0.0, 1.0);

    ctl.on_render_step(DT);
    ctl.on_render_step(DT);

    assert!(approx(ctl.host().scroll_offset_of(frame).y, -15.0));
}

#[test]
fn test_deactivation_stops_scrolling() {
    let (host, frame, _) = scrolling_host(ScrollAxes::XY);
    let mut ctl = controller(host);
    ctl.show_cursor();
    ctl.host_mut().set_stick(Thumbstick::Right, 0.0, -1.0);

    ctl.on_render_step(DT);
    ctl.on_render_step(DT);
    let before = ctl.host().scroll_offset_of(frame);

    ctl.hide_cursor();
    assert_eq!(ctl.host().selected, None);
    for _ in 0..5 {
        ctl.on_render_step(DT);
    }
    assert_eq!(ctl.host().scroll_offset_of(frame), before);
}
