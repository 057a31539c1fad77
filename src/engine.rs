//! The canvas engine: gestures in, view transform and strokes out.
//!
//! `CanvasEngine` owns all mutable state. Hosts feed it input through the
//! `on_*` handlers and act on the returned [`Action`]s. The engine has no
//! browser dependencies; geometry comes from a [`ViewportSource`] and frames
//! from a [`FrameScheduler`], so the whole state machine runs in plain unit
//! tests.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::camera::{Point, ViewTransform, Viewport, WorldRect};
use crate::config::{AnchorPolicy, CanvasOptions};
use crate::consts::{FRAME_MS, SMOOTHING_RETAIN, VISIBILITY_MARGIN, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::error::ConfigError;
use crate::inertia::Inertia;
use crate::input::{DragSession, GestureInput, GestureMode, GestureSession, Modifiers, PinchSession, WheelDelta};
use crate::path::{RenderedPath, render_in_progress, render_stroke};
use crate::scheduler::{FrameHandle, FrameScheduler};
use crate::stroke::{Stroke, StrokeCapture, StrokeId};

/// Synchronous read of the container's client rectangle.
pub trait ViewportSource {
    /// Current geometry, or `None` when the container is not laid out.
    fn viewport(&self) -> Option<Viewport>;
}

impl ViewportSource for Viewport {
    fn viewport(&self) -> Option<Viewport> {
        Some(*self)
    }
}

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The view transform changed; carries the new value.
    ViewChanged(ViewTransform),
    /// A stroke was committed.
    StrokeCommitted(StrokeId),
    /// The most recent stroke was removed.
    StrokeUndone(StrokeId),
    /// Every stroke was removed.
    StrokesCleared,
    /// The in-progress stroke changed and needs repainting.
    RenderNeeded,
}

pub struct CanvasEngine<S: FrameScheduler> {
    options: CanvasOptions,
    transform: ViewTransform,
    session: GestureSession,
    inertia: Inertia,
    strokes: StrokeCapture,
    scheduler: S,
    source: Option<Box<dyn ViewportSource>>,
}

impl<S: FrameScheduler> CanvasEngine<S> {
    /// Create a detached engine at the identity transform.
    ///
    /// # Errors
    ///
    /// Returns the first constraint `options` violates.
    pub fn new(options: CanvasOptions, scheduler: S) -> Result<Self, ConfigError> {
        if let Err(err) = options.validate() {
            tracing::warn!(%err, "canvas options rejected");
            return Err(err);
        }
        let strokes = StrokeCapture::new(options.stroke.clone(), options.min_point_distance, options.drawing_enabled);
        Ok(Self {
            inertia: Inertia::new(options.inertia_friction),
            transform: ViewTransform::IDENTITY,
            session: GestureSession::Idle,
            strokes,
            scheduler,
            source: None,
            options,
        })
    }

    // --- Lifecycle ---

    /// Start receiving input against `source`'s geometry.
    pub fn attach(&mut self, source: impl ViewportSource + 'static) {
        self.source = Some(Box::new(source));
        tracing::debug!("canvas engine attached");
    }

    /// Stop receiving input. Cancels inertia and abandons any gesture and
    /// unfinished stroke. Safe to call repeatedly.
    pub fn detach(&mut self) {
        if self.source.take().is_some() {
            tracing::debug!("canvas engine detached");
        }
        self.cancel_inertia();
        self.session = GestureSession::Idle;
        self.strokes.abandon();
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.source.is_some()
    }

    // --- Input events ---

    /// A pointer or touch went down.
    ///
    /// Two touches begin a pinch; anything else begins a drag from the
    /// primary contact. Any momentum is cancelled first.
    pub fn on_gesture_start(&mut self, input: &GestureInput) -> Vec<Action> {
        if !self.is_attached() || !input.is_finite() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.cancel_inertia();
        self.finish_stroke(&mut actions);

        if let Some(pinch) = input.pinch_geometry() {
            self.session = GestureSession::Pinching(PinchSession {
                initial_distance: pinch.distance,
                initial_scale: self.transform.scale,
            });
            tracing::debug!(distance = pinch.distance, scale = self.transform.scale, "pinch started");
            return actions;
        }

        let Some(point) = input.primary() else {
            return actions;
        };
        self.session = GestureSession::Dragging(DragSession::new(point, self.transform.offset(), input.timestamp_ms));
        tracing::trace!(x = point.x, y = point.y, "drag started");
        if self.strokes.start_stroke(self.stroke_anchor(point)) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// A pointer or touch moved while down.
    pub fn on_gesture_move(&mut self, input: &GestureInput) -> Vec<Action> {
        if !self.is_attached() || !input.is_finite() {
            return Vec::new();
        }
        match self.session {
            GestureSession::Idle => Vec::new(),
            GestureSession::Pinching(pinch) => self.pinch_move(pinch, input),
            GestureSession::Dragging(drag) => self.drag_move(drag, input),
        }
    }

    /// The pointer was released, left the surface, or the touch ended.
    pub fn on_gesture_end(&mut self) -> Vec<Action> {
        let previous = std::mem::take(&mut self.session);
        let mut actions = Vec::new();
        self.finish_stroke(&mut actions);
        if let GestureSession::Dragging(drag) = previous {
            tracing::trace!("drag ended");
            if self.options.enable_inertia {
                self.launch_inertia(drag.velocity);
            }
        }
        actions
    }

    /// Wheel or trackpad scroll at `client`.
    ///
    /// With Ctrl/Meta held the view zooms about the pointer; otherwise it
    /// pans by the scroll delta.
    pub fn on_wheel(&mut self, client: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !self.is_attached() || !delta.dx.is_finite() || !delta.dy.is_finite() {
            return Vec::new();
        }
        if modifiers.zoom_requested() {
            if delta.dy == 0.0 {
                return Vec::new();
            }
            let new_scale = self.options.clamp_scale(self.transform.scale * self.options.wheel_factor(delta.dy));
            let anchor = self.centered(client);
            self.transform = self.transform.zoomed_about(anchor, new_scale);
        } else {
            self.transform.x -= delta.dx;
            self.transform.y -= delta.dy;
        }
        vec![self.view_changed()]
    }

    /// A frame requested from the scheduler has arrived.
    ///
    /// Frames that are no longer pending (cancelled or superseded) are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle) -> Vec<Action> {
        if !self.inertia.claim(handle) {
            tracing::trace!(handle = handle.0, "stale frame ignored");
            return Vec::new();
        }
        match self.inertia.step() {
            Some(delta) => {
                self.transform.x += delta.x;
                self.transform.y += delta.y;
                let next = self.scheduler.request_frame();
                self.inertia.rearm(next);
                vec![self.view_changed()]
            }
            None => {
                tracing::debug!("inertia settled");
                Vec::new()
            }
        }
    }

    // --- View actions ---

    /// Back to the origin at 100% zoom.
    pub fn reset_transform(&mut self) -> Vec<Action> {
        self.cancel_inertia();
        self.transform = ViewTransform::new(0.0, 0.0, self.options.clamp_scale(1.0));
        vec![self.view_changed()]
    }

    /// Move the world origin to the viewport center, keeping the zoom.
    pub fn center_view(&mut self) -> Vec<Action> {
        self.cancel_inertia();
        self.transform.x = 0.0;
        self.transform.y = 0.0;
        vec![self.view_changed()]
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.set_scale(self.transform.scale * ZOOM_IN_FACTOR)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.set_scale(self.transform.scale * ZOOM_OUT_FACTOR)
    }

    /// Set the zoom, clamped to the configured range. The offset is unchanged.
    pub fn set_scale(&mut self, scale: f64) -> Vec<Action> {
        if !scale.is_finite() {
            return Vec::new();
        }
        self.transform.scale = self.options.clamp_scale(scale);
        vec![self.view_changed()]
    }

    /// Replace the whole transform. The scale is clamped; non-finite input is ignored.
    pub fn set_transform(&mut self, transform: ViewTransform) -> Vec<Action> {
        if !(transform.x.is_finite() && transform.y.is_finite() && transform.scale.is_finite()) {
            return Vec::new();
        }
        self.cancel_inertia();
        self.transform = ViewTransform::new(transform.x, transform.y, self.options.clamp_scale(transform.scale));
        vec![self.view_changed()]
    }

    // --- Drawing actions ---

    /// Turn stroke capture on or off. Disabling drops the stroke in progress.
    pub fn set_drawing_enabled(&mut self, enabled: bool) -> Vec<Action> {
        let was_drawing = self.strokes.is_drawing();
        self.strokes.set_enabled(enabled);
        if was_drawing && !self.strokes.is_drawing() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Remove the most recent stroke.
    pub fn undo(&mut self) -> Vec<Action> {
        match self.strokes.undo() {
            Some(stroke) => {
                tracing::debug!(id = %stroke.id, "stroke undone");
                vec![Action::StrokeUndone(stroke.id)]
            }
            None => Vec::new(),
        }
    }

    /// Remove every stroke, including the one in progress.
    pub fn clear_all(&mut self) -> Vec<Action> {
        self.strokes.clear_all();
        tracing::debug!("strokes cleared");
        vec![Action::StrokesCleared]
    }

    // --- Queries ---

    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    #[must_use]
    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    #[must_use]
    pub fn mode(&self) -> GestureMode {
        self.session.mode()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.mode() == GestureMode::Dragging
    }

    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.mode() == GestureMode::Pinching
    }

    #[must_use]
    pub fn is_coasting(&self) -> bool {
        self.inertia.is_active()
    }

    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        self.strokes.strokes()
    }

    #[must_use]
    pub fn in_progress(&self) -> Option<&[Point]> {
        self.strokes.in_progress()
    }

    #[must_use]
    pub fn is_drawing_enabled(&self) -> bool {
        self.strokes.is_enabled()
    }

    #[must_use]
    pub fn has_drawings(&self) -> bool {
        self.strokes.has_drawings()
    }

    #[must_use]
    pub fn drawing_count(&self) -> usize {
        self.strokes.drawing_count()
    }

    /// Current container geometry, if attached and laid out.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.source.as_ref().and_then(|source| source.viewport())
    }

    /// Map a client point to world space. [`Point::ZERO`] without geometry.
    #[must_use]
    pub fn screen_to_world(&self, client: Point) -> Point {
        self.viewport().map_or(Point::ZERO, |viewport| self.transform.screen_to_world(client, &viewport))
    }

    /// Map a world point to client space. [`Point::ZERO`] without geometry.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.viewport().map_or(Point::ZERO, |viewport| self.transform.world_to_screen(world, &viewport))
    }

    /// World position under the crosshair.
    #[must_use]
    pub fn crosshair_world(&self) -> Point {
        self.transform.center_world()
    }

    /// World region on screen, grown by `margin` world units.
    #[must_use]
    pub fn visible_world_rect(&self, margin: f64) -> Option<WorldRect> {
        self.viewport().map(|viewport| self.transform.visible_world_rect(&viewport, margin))
    }

    /// Whether `bounds` is on or near the screen. Always true without geometry.
    #[must_use]
    pub fn is_visible(&self, bounds: &WorldRect) -> bool {
        self.visible_world_rect(VISIBILITY_MARGIN).is_none_or(|visible| visible.intersects(bounds))
    }

    /// Committed strokes in render order.
    #[must_use]
    pub fn rendered_strokes(&self) -> Vec<RenderedPath> {
        self.strokes.strokes().iter().map(|stroke| render_stroke(stroke, self.transform.scale)).collect()
    }

    /// The stroke being drawn, once it has at least two points.
    #[must_use]
    pub fn rendered_in_progress(&self) -> Option<RenderedPath> {
        let scale = self.transform.scale;
        self.strokes.in_progress().and_then(|points| render_in_progress(points, self.strokes.style(), scale))
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // --- Internals ---

    fn view_changed(&self) -> Action {
        Action::ViewChanged(self.transform)
    }

    /// Client point relative to the viewport center, or the center itself
    /// when geometry is unavailable.
    fn centered(&self, client: Point) -> Point {
        self.viewport().map_or(Point::ZERO, |viewport| viewport.relative_to_center(client))
    }

    /// World point the stroke follows, read from the current transform.
    fn stroke_anchor(&self, client: Point) -> Point {
        match self.options.anchor {
            AnchorPolicy::Crosshair => self.transform.center_world(),
            AnchorPolicy::Pointer => self.screen_to_world(client),
        }
    }

    fn drag_move(&mut self, mut drag: DragSession, input: &GestureInput) -> Vec<Action> {
        let Some(point) = input.primary() else {
            return Vec::new();
        };
        let candidate = drag.candidate_offset(point);
        let offset = if self.options.smoothing {
            self.transform.offset().scale(SMOOTHING_RETAIN) + candidate.scale(1.0 - SMOOTHING_RETAIN)
        } else {
            candidate
        };
        drag.sample(point, input.timestamp_ms, FRAME_MS);
        self.session = GestureSession::Dragging(drag);
        self.transform.x = offset.x;
        self.transform.y = offset.y;

        let mut actions = vec![self.view_changed()];
        if self.strokes.add_point(self.stroke_anchor(point), self.transform.scale) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn pinch_move(&mut self, pinch: PinchSession, input: &GestureInput) -> Vec<Action> {
        let Some(geometry) = input.pinch_geometry() else {
            return Vec::new();
        };
        let Some(requested) = pinch.requested_scale(geometry.distance) else {
            return Vec::new();
        };
        let new_scale = self.options.clamp_scale(requested);
        let anchor = self.centered(geometry.midpoint);
        self.transform = self.transform.zoomed_about(anchor, new_scale);
        vec![self.view_changed()]
    }

    fn finish_stroke(&mut self, actions: &mut Vec<Action>) {
        let was_drawing = self.strokes.is_drawing();
        match self.strokes.end_stroke() {
            Some(id) => actions.push(Action::StrokeCommitted(id)),
            None if was_drawing => actions.push(Action::RenderNeeded),
            None => {}
        }
    }

    fn launch_inertia(&mut self, velocity: Point) {
        if Inertia::is_negligible(velocity) {
            return;
        }
        let handle = self.scheduler.request_frame();
        self.inertia.launch(velocity, handle);
        tracing::debug!(vx = velocity.x, vy = velocity.y, "inertia started");
    }

    fn cancel_inertia(&mut self) {
        if let Some(handle) = self.inertia.stop() {
            self.scheduler.cancel_frame(handle);
            tracing::debug!(handle = handle.0, "inertia cancelled");
        }
    }
}
