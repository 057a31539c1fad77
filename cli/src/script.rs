//! Recorded input scripts.
//!
//! A script is a JSON document with an optional viewport and a list of
//! events tagged by `type`:
//!
//! ```json
//! {
//!   "viewport": { "left": 0, "top": 0, "width": 800, "height": 600 },
//!   "events": [
//!     { "type": "pointerDown", "x": 400, "y": 300, "t": 0 },
//!     { "type": "move", "x": 450, "y": 320, "t": 16 },
//!     { "type": "up" },
//!     { "type": "frames" }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use gesture_canvas::{Point, Viewport};
use serde::Deserialize;

pub const DEFAULT_VIEWPORT: Viewport = Viewport { left: 0.0, top: 0.0, width: 800.0, height: 600.0 };

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: Option<Viewport>,
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn viewport(&self) -> Viewport {
        self.viewport.unwrap_or(DEFAULT_VIEWPORT)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        t: f64,
    },
    TouchStart {
        touches: Vec<Point>,
        #[serde(default)]
        t: f64,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        t: f64,
    },
    TouchMove {
        touches: Vec<Point>,
        #[serde(default)]
        t: f64,
    },
    Up,
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        meta: bool,
    },
    /// Deliver scheduled animation frames; all of them when `count` is absent.
    Frames {
        #[serde(default)]
        count: Option<usize>,
    },
    ZoomIn,
    ZoomOut,
    Reset,
    Center,
    SetScale {
        scale: f64,
    },
    Undo,
    Clear,
    ToggleDrawing {
        enabled: bool,
    },
}
