//! Drive a headless engine from a script and summarise the result.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::fmt::Write as _;

use gesture_canvas::path::RenderedPath;
use gesture_canvas::{
    Action, CanvasEngine, GestureInput, ManualScheduler, Modifiers, Point, Stroke, ViewTransform, Viewport, WheelDelta,
};
use serde::Serialize;

use crate::script::ScriptEvent;

pub type ReplayEngine = CanvasEngine<ManualScheduler>;

/// Final state after a replay.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub transform: ViewTransform,
    pub zoom_percent: i64,
    pub layer_transform: String,
    pub events: usize,
    pub actions: usize,
    pub frames: usize,
    pub strokes: Vec<Stroke>,
    pub paths: Vec<RenderedPath>,
}

#[derive(Debug, Default)]
struct Tally {
    actions: usize,
    frames: usize,
}

impl Tally {
    fn record(&mut self, actions: &[Action]) {
        self.actions += actions.len();
    }
}

/// Feed every event to `engine` in order.
pub fn replay(engine: &mut ReplayEngine, events: &[ScriptEvent]) -> Report {
    let mut tally = Tally::default();
    for (index, event) in events.iter().enumerate() {
        tracing::trace!(index, ?event, "replaying event");
        let actions = apply(engine, event, &mut tally);
        tally.record(&actions);
    }
    let transform = engine.transform();
    Report {
        transform,
        zoom_percent: transform.zoom_percent(),
        layer_transform: transform.css_transform(),
        events: events.len(),
        actions: tally.actions,
        frames: tally.frames,
        strokes: engine.strokes().to_vec(),
        paths: engine.rendered_strokes(),
    }
}

fn apply(engine: &mut ReplayEngine, event: &ScriptEvent, tally: &mut Tally) -> Vec<Action> {
    match event {
        ScriptEvent::PointerDown { x, y, t } => engine.on_gesture_start(&GestureInput::pointer(Point::new(*x, *y), *t)),
        ScriptEvent::TouchStart { touches, t } => engine.on_gesture_start(&GestureInput::touches(touches, *t)),
        ScriptEvent::Move { x, y, t } => engine.on_gesture_move(&GestureInput::pointer(Point::new(*x, *y), *t)),
        ScriptEvent::TouchMove { touches, t } => engine.on_gesture_move(&GestureInput::touches(touches, *t)),
        ScriptEvent::Up => engine.on_gesture_end(),
        ScriptEvent::Wheel { x, y, dx, dy, ctrl, meta } => engine.on_wheel(
            Point::new(*x, *y),
            WheelDelta { dx: *dx, dy: *dy },
            Modifiers { ctrl: *ctrl, meta: *meta, ..Modifiers::default() },
        ),
        ScriptEvent::Frames { count } => run_frames(engine, count.unwrap_or(usize::MAX), tally),
        ScriptEvent::ZoomIn => engine.zoom_in(),
        ScriptEvent::ZoomOut => engine.zoom_out(),
        ScriptEvent::Reset => engine.reset_transform(),
        ScriptEvent::Center => engine.center_view(),
        ScriptEvent::SetScale { scale } => engine.set_scale(*scale),
        ScriptEvent::Undo => engine.undo(),
        ScriptEvent::Clear => engine.clear_all(),
        ScriptEvent::ToggleDrawing { enabled } => engine.set_drawing_enabled(*enabled),
    }
}

/// Deliver up to `limit` frames, one scheduled frame at a time.
fn run_frames(engine: &mut ReplayEngine, limit: usize, tally: &mut Tally) -> Vec<Action> {
    let mut actions = Vec::new();
    let mut delivered = 0;
    while delivered < limit {
        let Some(handle) = engine.scheduler_mut().pop_next() else {
            break;
        };
        actions.extend(engine.on_frame(handle));
        delivered += 1;
    }
    tally.frames += delivered;
    actions
}

/// Render the strokes as a standalone SVG document of the viewport's size.
pub fn to_svg(report: &Report, viewport: &Viewport) -> String {
    let mut svg = String::new();
    if let Err(err) = write_svg(&mut svg, report, viewport) {
        tracing::warn!(%err, "svg rendering failed");
    }
    svg
}

fn write_svg(out: &mut String, report: &Report, viewport: &Viewport) -> std::fmt::Result {
    let (w, h) = (viewport.width, viewport.height);
    writeln!(out, r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#)?;
    // The view offset is measured from the viewport center.
    writeln!(out, r#"  <g transform="translate({}, {})">"#, w / 2.0, h / 2.0)?;
    writeln!(out, r#"    <g transform="{}">"#, report.layer_transform)?;
    for path in &report.paths {
        writeln!(
            out,
            concat!(
                r#"      <path d="{}" fill="none" stroke="{}" stroke-width="{}""#,
                r#" stroke-linecap="round" stroke-linejoin="round" opacity="{}"/>"#,
            ),
            path.d,
            escape_attr(path.stroke_color.as_str()),
            path.stroke_width,
            path.opacity,
        )?;
    }
    writeln!(out, "    </g>")?;
    writeln!(out, "  </g>")?;
    writeln!(out, "</svg>")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}
