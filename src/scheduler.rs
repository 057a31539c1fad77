//! Per-frame task scheduling.
//!
//! The engine never talks to `requestAnimationFrame` directly. It asks a
//! [`FrameScheduler`] for the next frame and keeps the returned handle so a new
//! gesture can cancel it synchronously. When the host's frame fires it calls
//! [`crate::engine::CanvasEngine::on_frame`] with the same handle; ticks for a
//! handle that is no longer pending are dropped.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

/// Identifies one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Source of animation frames.
pub trait FrameScheduler {
    /// Ask for a single callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a previously requested frame. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A scheduler driven by hand, for headless hosts and tests.
///
/// Requested frames queue up until the host drains them with
/// [`ManualScheduler::take_pending`] and feeds each handle back to the engine.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    cancelled: usize,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles requested and not yet cancelled or taken.
    #[must_use]
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Remove and return every pending handle, oldest first.
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    /// Remove and return the oldest pending handle.
    pub fn pop_next(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() { None } else { Some(self.pending.remove(0)) }
    }

    /// How many pending frames have been cancelled so far.
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}
