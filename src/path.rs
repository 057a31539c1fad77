//! Render contract for strokes.
//!
//! Strokes are drawn as a quadratic spline through their samples: every
//! interior point is a control point and each curve ends at the midpoint to
//! the following sample, with a straight segment into the final point. The
//! output is renderer-neutral ([`PathCommand`]) with an SVG `d` serialiser,
//! since the drawing layer in the browser is an SVG group carrying the view
//! transform. Widths are divided by the view scale so lines keep a constant
//! on-screen thickness at any zoom.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use std::fmt::Write as _;

use serde::Serialize;

use crate::camera::Point;
use crate::config::StrokeStyle;
use crate::consts::IN_PROGRESS_OPACITY;
use crate::stroke::{Color, Stroke};

/// One segment of a stroke outline, in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    QuadTo { ctrl: Point, to: Point },
    LineTo(Point),
}

/// Build the smoothed outline for `points`.
#[must_use]
pub fn smooth_path(points: &[Point]) -> Vec<PathCommand> {
    let Some((first, rest)) = points.split_first() else {
        return Vec::new();
    };
    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(*first));
    for (i, current) in rest.iter().enumerate() {
        match rest.get(i + 1) {
            Some(next) => commands.push(PathCommand::QuadTo { ctrl: *current, to: current.midpoint(*next) }),
            None => commands.push(PathCommand::LineTo(*current)),
        }
    }
    commands
}

/// Serialise commands as SVG path data.
#[must_use]
pub fn to_svg_d(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for (i, cmd) in commands.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        // Writing to a String cannot fail.
        let written = match cmd {
            PathCommand::MoveTo(p) => write!(d, "M {} {}", p.x, p.y),
            PathCommand::QuadTo { ctrl, to } => write!(d, "Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y),
            PathCommand::LineTo(p) => write!(d, "L {} {}", p.x, p.y),
        };
        if written.is_err() {
            break;
        }
    }
    d
}

/// World-space width that renders as `width` screen pixels at `scale`.
#[must_use]
pub fn screen_stroke_width(width: f64, scale: f64) -> f64 {
    width / scale
}

/// A stroke ready for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPath {
    /// SVG path data in world coordinates.
    pub d: String,
    pub stroke_color: Color,
    /// Width in world units (screen width divided by the view scale).
    pub stroke_width: f64,
    pub opacity: f64,
}

/// Render a committed stroke at the given view scale.
#[must_use]
pub fn render_stroke(stroke: &Stroke, scale: f64) -> RenderedPath {
    RenderedPath {
        d: to_svg_d(&smooth_path(&stroke.points)),
        stroke_color: stroke.stroke_color.clone(),
        stroke_width: screen_stroke_width(stroke.stroke_width, scale),
        opacity: 1.0,
    }
}

/// Render the stroke still being drawn. Nothing is drawn for fewer than two points.
#[must_use]
pub fn render_in_progress(points: &[Point], style: &StrokeStyle, scale: f64) -> Option<RenderedPath> {
    if points.len() < 2 {
        return None;
    }
    Some(RenderedPath {
        d: to_svg_d(&smooth_path(points)),
        stroke_color: style.color.clone(),
        stroke_width: screen_stroke_width(style.width, scale),
        opacity: IN_PROGRESS_OPACITY,
    })
}
