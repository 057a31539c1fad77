//! Input model: contacts, modifier keys, wheel deltas, and the gesture session.
//!
//! `GestureInput` is what a host hands the engine for every pointer or touch
//! event: the active contact points in client coordinates plus a timestamp.
//! `GestureSession` is the gesture being tracked between press and release,
//! carrying the baselines needed to compute incremental transforms.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl (or Cmd on macOS) turns wheel scrolling into zoom.
    #[must_use]
    pub fn zoom_requested(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Contact points of a pointer or touch event.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureInput {
    /// Active contacts in client coordinates. A mouse event has exactly one.
    pub points: Vec<Point>,
    /// Event time in milliseconds. Only differences are used.
    pub timestamp_ms: f64,
}

impl GestureInput {
    /// A mouse (single pointer) event.
    #[must_use]
    pub fn pointer(point: Point, timestamp_ms: f64) -> Self {
        Self { points: vec![point], timestamp_ms }
    }

    /// A touch event with every finger currently on the surface.
    #[must_use]
    pub fn touches(points: &[Point], timestamp_ms: f64) -> Self {
        Self { points: points.to_vec(), timestamp_ms }
    }

    /// Whether every contact and the timestamp are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.timestamp_ms.is_finite() && self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// The first contact, which drives single-finger drags.
    #[must_use]
    pub fn primary(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Distance and midpoint of the first two contacts when exactly two are down.
    #[must_use]
    pub fn pinch_geometry(&self) -> Option<PinchGeometry> {
        match self.points.as_slice() {
            [a, b] => Some(PinchGeometry { distance: a.distance_to(*b), midpoint: a.midpoint(*b) }),
            _ => None,
        }
    }
}

/// Two-finger measurements for a single event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchGeometry {
    pub distance: f64,
    /// Client-space midpoint between the fingers.
    pub midpoint: Point,
}

/// Coarse gesture mode exposed to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureMode {
    #[default]
    Idle,
    Dragging,
    Pinching,
}

/// Baselines recorded when a one-finger (or mouse) drag begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Client position of the press.
    pub start_screen: Point,
    /// View offset at the press; drags are computed relative to it.
    pub start_offset: Point,
    /// Client position of the previous sample, for velocity.
    pub last_position: Point,
    /// Timestamp of the previous sample.
    pub last_time_ms: f64,
    /// Latest velocity estimate in px/frame.
    pub velocity: Point,
}

impl DragSession {
    #[must_use]
    pub fn new(start_screen: Point, start_offset: Point, timestamp_ms: f64) -> Self {
        Self {
            start_screen,
            start_offset,
            last_position: start_screen,
            last_time_ms: timestamp_ms,
            velocity: Point::ZERO,
        }
    }

    /// Offset the drag would apply at `current`, before smoothing.
    #[must_use]
    pub fn candidate_offset(&self, current: Point) -> Point {
        self.start_offset + (current - self.start_screen)
    }

    /// Update the velocity estimate from a new sample.
    ///
    /// Samples with no elapsed time keep the previous estimate.
    pub fn sample(&mut self, current: Point, timestamp_ms: f64, frame_ms: f64) {
        let dt = timestamp_ms - self.last_time_ms;
        if dt > 0.0 {
            self.velocity = (current - self.last_position).scale(frame_ms / dt);
        }
        self.last_position = current;
        self.last_time_ms = timestamp_ms;
    }
}

/// Baselines recorded when a two-finger pinch begins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchSession {
    /// Finger distance at the start of the pinch.
    pub initial_distance: f64,
    /// View scale at the start of the pinch.
    pub initial_scale: f64,
}

impl PinchSession {
    /// Scale the pinch asks for at `current_distance`, before clamping.
    ///
    /// Returns `None` when the baseline distance is zero, which makes the
    /// ratio meaningless for this event.
    #[must_use]
    pub fn requested_scale(&self, current_distance: f64) -> Option<f64> {
        if self.initial_distance <= 0.0 || !current_distance.is_finite() {
            return None;
        }
        Some(self.initial_scale * (current_distance / self.initial_distance))
    }
}

/// The gesture tracked between press and release.
///
/// Owned by the engine and replaced wholesale on every press and release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureSession {
    /// No gesture in progress; waiting for the next press.
    #[default]
    Idle,
    /// One pointer is panning the canvas.
    Dragging(DragSession),
    /// Two fingers are zooming the canvas.
    Pinching(PinchSession),
}

impl GestureSession {
    #[must_use]
    pub fn mode(&self) -> GestureMode {
        match self {
            Self::Idle => GestureMode::Idle,
            Self::Dragging(_) => GestureMode::Dragging,
            Self::Pinching(_) => GestureMode::Pinching,
        }
    }
}
