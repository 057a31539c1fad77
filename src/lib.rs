//! Gesture-driven pan/zoom canvas with freehand stroke capture.
//!
//! The crate turns raw pointer, touch and wheel input into a 2D view
//! transform (pan, wheel zoom, pinch zoom, optional smoothing and momentum)
//! and records freehand strokes in world space so they stay attached to the
//! canvas under that transform. The core is browser-agnostic and fully
//! testable; the `web` feature adds a wasm-bindgen host that wires DOM events
//! to the engine. Rendering is left to the page, which applies
//! [`camera::ViewTransform::css_transform`] to its layers and draws the
//! [`path::RenderedPath`]s the engine produces.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::CanvasEngine`] state machine and returned [`engine::Action`]s |
//! | [`camera`] | View transform, viewport geometry and coordinate conversions |
//! | [`input`] | Input event types and the gesture session |
//! | [`inertia`] | Post-release momentum |
//! | [`scheduler`] | Cancellable per-frame task abstraction |
//! | [`stroke`] | Stroke capture, undo and clear |
//! | [`path`] | Smoothed path output for the renderer |
//! | [`config`] | Engine options, defaults and validation |
//! | [`error`] | Configuration errors |
//! | [`consts`] | Shared numeric constants (zoom limits, friction, stroke defaults) |
//! | `web` | Browser host (feature `web`) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod inertia;
pub mod input;
pub mod path;
pub mod scheduler;
pub mod stroke;
#[cfg(feature = "web")]
pub mod web;

pub use camera::{Point, ViewTransform, Viewport, WorldRect};
pub use config::{AnchorPolicy, CanvasOptions, StrokeStyle};
pub use engine::{Action, CanvasEngine, ViewportSource};
pub use error::ConfigError;
pub use input::{GestureInput, GestureMode, Modifiers, WheelDelta};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use stroke::{Color, Stroke, StrokeId};
