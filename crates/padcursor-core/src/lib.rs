//! padcursor core - gamepad-driven cursor for a host UI
//!
//! This crate turns analog thumbstick input into an on-screen cursor:
//! - Deadzone-filtered, frame-rate independent cursor motion
//! - Hit testing against the host's element tree with selectable filtering
//! - Selection started/ended signals and right-stick container scrolling
//! - An activation state machine driven by the host's input events
//!
//! Hosts plug in through the traits in [`host`].

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod events;
pub mod geometry;
pub mod host;
pub mod input;
pub mod scroll;
pub mod selection;
pub mod testing;

// Re-exports for convenience
pub use config::CursorConfig;
pub use controller::{CursorController, CursorState};
pub use error::{CursorError, Result};
pub use events::{ListenerId, Signal};
pub use geometry::{NormalizedPoint, Vec2};
pub use host::{
    CursorHost, CursorImage, FrameScheduler, FrameSubscription, InputHost, MovementControl,
    RenderPriority, ScrollAxes, UiHost,
};
pub use input::{DeviceKind, GamepadId, GamepadSample, PadButton, StickState, Thumbstick};
