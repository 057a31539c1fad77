//! Freehand stroke capture.
//!
//! Strokes are recorded in world coordinates so they stay glued to the canvas
//! while the view pans and zooms. A stroke under construction lives in
//! [`StrokeCapture`] until the drag ends; it is committed only if it has at
//! least two points.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::config::StrokeStyle;
use crate::consts::DEFAULT_STROKE_COLOR;

/// Unique identifier for a committed stroke.
pub type StrokeId = Uuid;

/// A CSS color string, passed through to the renderer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    #[must_use]
    pub fn new(css: impl Into<String>) -> Self {
        Self(css.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(DEFAULT_STROKE_COLOR.to_owned())
    }
}

/// A committed polyline in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub id: StrokeId,
    pub points: Vec<Point>,
    pub stroke_width: f64,
    pub stroke_color: Color,
}

/// The polyline being built during the active drag.
#[derive(Debug, Clone, PartialEq)]
struct InProgressStroke {
    points: Vec<Point>,
}

impl InProgressStroke {
    fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Records strokes from a stream of anchor samples.
#[derive(Debug, Clone)]
pub struct StrokeCapture {
    strokes: Vec<Stroke>,
    current: Option<InProgressStroke>,
    enabled: bool,
    style: StrokeStyle,
    /// Minimum sample spacing in screen pixels.
    min_distance_px: f64,
}

impl StrokeCapture {
    #[must_use]
    pub fn new(style: StrokeStyle, min_distance_px: f64, enabled: bool) -> Self {
        Self { strokes: Vec::new(), current: None, enabled, style, min_distance_px }
    }

    // --- Drawing toggle ---

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn drawing on or off. Turning it off drops the stroke in progress.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled && self.current.take().is_some() {
            tracing::debug!("drawing disabled; in-progress stroke dropped");
        }
    }

    // --- Capture ---

    /// Begin a stroke at `anchor`. Any unfinished stroke is discarded.
    ///
    /// Returns `false` when drawing is disabled.
    pub fn start_stroke(&mut self, anchor: Point) -> bool {
        if !self.enabled {
            return false;
        }
        self.current = Some(InProgressStroke { points: vec![anchor] });
        true
    }

    /// Append `anchor` if it is far enough from the last retained point.
    ///
    /// The threshold is `min_distance_px` screen pixels, i.e.
    /// `min_distance_px / scale` world units at the current zoom.
    /// Returns whether the point was kept.
    pub fn add_point(&mut self, anchor: Point, scale: f64) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        let Some(last) = current.last() else {
            current.points.push(anchor);
            return true;
        };
        let threshold = self.min_distance_px / scale;
        if last.distance_to(anchor) >= threshold {
            current.points.push(anchor);
            true
        } else {
            false
        }
    }

    /// Finish the stroke in progress.
    ///
    /// Commits and returns its id when it has at least two points; shorter
    /// attempts (a tap) are dropped silently.
    pub fn end_stroke(&mut self) -> Option<StrokeId> {
        let current = self.current.take()?;
        if current.points.len() < 2 {
            tracing::trace!(points = current.points.len(), "stroke too short; dropped");
            return None;
        }
        let stroke = Stroke {
            id: Uuid::new_v4(),
            points: current.points,
            stroke_width: self.style.width,
            stroke_color: self.style.color.clone(),
        };
        let id = stroke.id;
        tracing::debug!(%id, points = stroke.points.len(), "stroke committed");
        self.strokes.push(stroke);
        Some(id)
    }

    /// Drop the stroke in progress without committing it.
    pub fn abandon(&mut self) {
        self.current = None;
    }

    // --- History ---

    /// Remove and return the most recently committed stroke.
    pub fn undo(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Remove every committed stroke and the one in progress.
    pub fn clear_all(&mut self) {
        self.strokes.clear();
        self.current = None;
    }

    // --- Queries ---

    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Points of the stroke in progress, if one is being drawn.
    #[must_use]
    pub fn in_progress(&self) -> Option<&[Point]> {
        self.current.as_ref().map(|c| c.points.as_slice())
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn has_drawings(&self) -> bool {
        !self.strokes.is_empty()
    }

    #[must_use]
    pub fn drawing_count(&self) -> usize {
        self.strokes.len()
    }

    #[must_use]
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }
}
