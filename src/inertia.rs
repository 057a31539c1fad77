//! Momentum after a drag is released.
//!
//! The simulation is a single decaying velocity. Each frame moves the view by
//! the current velocity and then multiplies it by the friction factor; the
//! loop ends once the speed drops below [`INERTIA_MIN_SPEED`]. The engine
//! drives it one frame at a time through a [`FrameScheduler`](crate::scheduler::FrameScheduler)
//! and records the pending handle here so stale frames can be recognised.

#[cfg(test)]
#[path = "inertia_test.rs"]
mod inertia_test;

use crate::camera::Point;
use crate::consts::INERTIA_MIN_SPEED;
use crate::scheduler::FrameHandle;

#[derive(Debug, Clone, PartialEq)]
pub struct Inertia {
    velocity: Point,
    friction: f64,
    pending: Option<FrameHandle>,
}

impl Inertia {
    #[must_use]
    pub fn new(friction: f64) -> Self {
        Self { velocity: Point::ZERO, friction, pending: None }
    }

    /// Whether a velocity is too small (or not finite) to be worth simulating.
    #[must_use]
    pub fn is_negligible(velocity: Point) -> bool {
        let speed = velocity.length();
        !speed.is_finite() || speed < INERTIA_MIN_SPEED
    }

    /// Begin coasting at `velocity` (px/frame); `handle` is the first frame.
    pub fn launch(&mut self, velocity: Point, handle: FrameHandle) {
        self.velocity = velocity;
        self.pending = Some(handle);
    }

    /// Stop coasting. Returns the frame that must be cancelled, if any.
    pub fn stop(&mut self) -> Option<FrameHandle> {
        self.velocity = Point::ZERO;
        self.pending.take()
    }

    /// Consume `handle` if it is the frame currently awaited.
    ///
    /// Returns `false` for stale or unknown handles, which must be ignored.
    pub fn claim(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Record the next scheduled frame.
    pub fn rearm(&mut self, handle: FrameHandle) {
        self.pending = Some(handle);
    }

    /// Advance one frame.
    ///
    /// Returns the offset delta to apply, or `None` once the speed has fallen
    /// below the threshold (velocity is then zeroed).
    pub fn step(&mut self) -> Option<Point> {
        if Self::is_negligible(self.velocity) {
            self.velocity = Point::ZERO;
            return None;
        }
        let delta = self.velocity;
        self.velocity = self.velocity.scale(self.friction);
        Some(delta)
    }

    #[must_use]
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }
}
