//! Shared numeric constants for the canvas crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Default lower bound for the view scale.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Default upper bound for the view scale.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Default wheel zoom sensitivity; one wheel notch changes scale by 10× this.
pub const DEFAULT_SCALE_SENSITIVITY: f64 = 0.01;

/// Multiplier applied to the sensitivity for a single wheel notch.
pub const WHEEL_NOTCH_FACTOR: f64 = 10.0;

/// Scale multiplier for the "zoom in" button.
pub const ZOOM_IN_FACTOR: f64 = 1.2;

/// Scale multiplier for the "zoom out" button.
pub const ZOOM_OUT_FACTOR: f64 = 0.8;

// ── Drag ────────────────────────────────────────────────────────

/// Weight of the previous offset in the drag low-pass filter.
pub const SMOOTHING_RETAIN: f64 = 0.8;

/// Nominal frame interval used to express velocity in px/frame.
pub const FRAME_MS: f64 = 16.0;

// ── Inertia ─────────────────────────────────────────────────────

/// Default per-frame velocity decay.
pub const DEFAULT_INERTIA_FRICTION: f64 = 0.95;

/// Speed (px/frame) below which momentum stops.
pub const INERTIA_MIN_SPEED: f64 = 0.1;

// ── Drawing ─────────────────────────────────────────────────────

/// Minimum spacing between retained stroke samples, in screen pixels.
pub const DEFAULT_MIN_POINT_DISTANCE_PX: f64 = 2.0;

/// Default stroke width in screen pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Default stroke color.
pub const DEFAULT_STROKE_COLOR: &str = "rgba(0, 0, 0, 0.8)";

/// Opacity used when rendering the stroke still being drawn.
pub const IN_PROGRESS_OPACITY: f64 = 0.7;

// ── Culling ─────────────────────────────────────────────────────

/// World-unit margin added around the viewport for visibility checks.
pub const VISIBILITY_MARGIN: f64 = 100.0;
