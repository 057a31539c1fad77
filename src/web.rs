//! Browser host for the canvas engine.
//!
//! `CanvasHost` is the object a page constructs from JavaScript. It owns the
//! engine behind `Rc<RefCell<..>>`, installs DOM listeners on the container
//! element, reads the container rectangle on every event, and drives inertia
//! with `requestAnimationFrame`. Whenever a handler reports actions the
//! optional `onChange` callback receives the new transform as JSON.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use js_sys::{Date, Function};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{AddEventListenerOptions, Element, Event, MouseEvent, TouchEvent, TouchList, WheelEvent};

use crate::camera::{Point, ViewTransform, Viewport};
use crate::config::CanvasOptions;
use crate::engine::{Action, CanvasEngine, ViewportSource};
use crate::input::{GestureInput, Modifiers, WheelDelta};
use crate::path::RenderedPath;
use crate::scheduler::{FrameHandle, FrameScheduler};

type HostEngine = CanvasEngine<RafScheduler>;
type SharedEngine = Rc<RefCell<HostEngine>>;
type Notifier = Rc<RefCell<Option<Function>>>;
type EventHandler = fn(&mut HostEngine, &Event) -> Vec<Action>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

// =============================================================================
// Viewport source
// =============================================================================

/// Reads geometry from the container's `getBoundingClientRect()`.
struct ElementViewport {
    element: Element,
}

impl ViewportSource for ElementViewport {
    fn viewport(&self) -> Option<Viewport> {
        let rect = self.element.get_bounding_client_rect();
        if rect.width() <= 0.0 && rect.height() <= 0.0 {
            return None;
        }
        Some(Viewport::new(rect.left(), rect.top(), rect.width(), rect.height()))
    }
}

// =============================================================================
// Frame scheduler
// =============================================================================

struct PendingFrame {
    raf_id: i32,
    _callback: Closure<dyn FnMut(f64)>,
}

/// `requestAnimationFrame`-backed scheduler.
///
/// Each requested frame owns its closure until it fires or is cancelled. The
/// callback reaches the engine through a weak reference, bound once the
/// engine has been placed in its `Rc`.
pub struct RafScheduler {
    engine: Weak<RefCell<HostEngine>>,
    notifier: Notifier,
    frames: Rc<RefCell<HashMap<u64, PendingFrame>>>,
    next_id: u64,
}

impl RafScheduler {
    fn new(notifier: Notifier) -> Self {
        Self { engine: Weak::new(), notifier, frames: Rc::new(RefCell::new(HashMap::new())), next_id: 0 }
    }

    fn bind(&mut self, engine: &SharedEngine) {
        self.engine = Rc::downgrade(engine);
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        let Some(window) = web_sys::window() else {
            tracing::warn!("no window; animation frame not scheduled");
            return handle;
        };

        let engine = Weak::clone(&self.engine);
        let notifier = Rc::clone(&self.notifier);
        let frames = Rc::clone(&self.frames);
        let callback = Closure::wrap(Box::new(move |_ts: f64| {
            let own = frames.borrow_mut().remove(&handle.0);
            if let Some(engine) = engine.upgrade() {
                dispatch(&engine, &notifier, |engine| engine.on_frame(handle));
            }
            drop(own);
        }) as Box<dyn FnMut(f64)>);

        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(raf_id) => {
                self.frames.borrow_mut().insert(handle.0, PendingFrame { raf_id, _callback: callback });
            }
            Err(err) => tracing::warn!(?err, "requestAnimationFrame failed"),
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let Some(frame) = self.frames.borrow_mut().remove(&handle.0) else {
            return;
        };
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.cancel_animation_frame(frame.raf_id) {
                tracing::warn!(?err, "cancelAnimationFrame failed");
            }
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Run `handler` against the engine, then report any actions to the page.
///
/// The engine borrow is released before the JS callback runs so the page may
/// call back into the host.
fn dispatch(engine: &SharedEngine, notifier: &Notifier, handler: impl FnOnce(&mut HostEngine) -> Vec<Action>) {
    let (actions, transform) = {
        let Ok(mut engine) = engine.try_borrow_mut() else {
            tracing::warn!("engine busy; event dropped");
            return;
        };
        let actions = handler(&mut engine);
        (actions, engine.transform())
    };
    notify(notifier, &actions, transform);
}

fn notify(notifier: &Notifier, actions: &[Action], transform: ViewTransform) {
    if actions.is_empty() {
        return;
    }
    let Some(callback) = notifier.borrow().clone() else {
        return;
    };
    let payload = match serde_json::to_string(&transform) {
        Ok(json) => JsValue::from_str(&json),
        Err(err) => {
            tracing::warn!(%err, "transform serialization failed");
            return;
        }
    };
    if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
        tracing::warn!(?err, "onChange callback threw");
    }
}

// =============================================================================
// DOM events
// =============================================================================

fn client_point(mouse: &MouseEvent) -> Point {
    Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()))
}

fn touch_points(list: &TouchList) -> Vec<Point> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
        .collect()
}

fn mouse_input(event: &Event) -> Option<GestureInput> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(GestureInput::pointer(client_point(mouse), Date::now()))
}

fn touch_input(event: &Event) -> Option<GestureInput> {
    let touch = event.dyn_ref::<TouchEvent>()?;
    // Keep the page from scrolling or zooming underneath the canvas.
    event.prevent_default();
    Some(GestureInput::touches(&touch_points(&touch.touches()), Date::now()))
}

fn on_mouse_down(engine: &mut HostEngine, event: &Event) -> Vec<Action> {
    mouse_input(event).map_or_else(Vec::new, |input| engine.on_gesture_start(&input))
}

fn on_mouse_move(engine: &mut HostEngine, event: &Event) -> Vec<Action> {
    mouse_input(event).map_or_else(Vec::new, |input| engine.on_gesture_move(&input))
}

fn on_touch_start(engine: &mut HostEngine, event: &Event) -> Vec<Action> {
    touch_input(event).map_or_else(Vec::new, |input| engine.on_gesture_start(&input))
}

fn on_touch_move(engine: &mut HostEngine, event: &Event) -> Vec<Action> {
    touch_input(event).map_or_else(Vec::new, |input| engine.on_gesture_move(&input))
}

fn on_release(engine: &mut HostEngine, _event: &Event) -> Vec<Action> {
    engine.on_gesture_end()
}

fn on_wheel(engine: &mut HostEngine, event: &Event) -> Vec<Action> {
    let Some(wheel) = event.dyn_ref::<WheelEvent>() else {
        return Vec::new();
    };
    event.prevent_default();
    let modifiers =
        Modifiers { shift: wheel.shift_key(), ctrl: wheel.ctrl_key(), alt: wheel.alt_key(), meta: wheel.meta_key() };
    engine.on_wheel(client_point(wheel), WheelDelta { dx: wheel.delta_x(), dy: wheel.delta_y() }, modifiers)
}

const BINDINGS: [(&str, EventHandler); 9] = [
    ("mousedown", on_mouse_down),
    ("mousemove", on_mouse_move),
    ("mouseup", on_release),
    ("mouseleave", on_release),
    ("touchstart", on_touch_start),
    ("touchmove", on_touch_move),
    ("touchend", on_release),
    ("touchcancel", on_release),
    ("wheel", on_wheel),
];

struct Listener {
    element: Element,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Register a non-passive listener so handlers may call `preventDefault`.
    fn install(
        element: &Element,
        event: &'static str,
        handler: EventHandler,
        engine: &SharedEngine,
        notifier: &Notifier,
    ) -> Result<Self, JsValue> {
        let engine = Rc::clone(engine);
        let notifier = Rc::clone(notifier);
        let callback = Closure::wrap(Box::new(move |event: Event| {
            dispatch(&engine, &notifier, |engine| handler(engine, &event));
        }) as Box<dyn FnMut(Event)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        element.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { element: element.clone(), event, callback })
    }

    fn remove(self) {
        let callback = self.callback.as_ref().unchecked_ref();
        if let Err(err) = self.element.remove_event_listener_with_callback(self.event, callback) {
            tracing::warn!(event = self.event, ?err, "failed to remove listener");
        }
    }
}

// =============================================================================
// Host
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderSnapshot {
    layer_transform: String,
    zoom_percent: i64,
    strokes: Vec<RenderedPath>,
    in_progress: Option<RenderedPath>,
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Page-facing handle to a canvas engine.
#[wasm_bindgen]
pub struct CanvasHost {
    engine: SharedEngine,
    notifier: Notifier,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl CanvasHost {
    /// Create a detached host. `options` is a JSON options document; omitted
    /// keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a message when the options are malformed or invalid.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<CanvasHost, JsValue> {
        let options = match options {
            Some(json) => CanvasOptions::from_json(&json).map_err(to_js_error)?,
            None => CanvasOptions::default(),
        };
        let notifier: Notifier = Rc::new(RefCell::new(None));
        let engine = CanvasEngine::new(options, RafScheduler::new(Rc::clone(&notifier))).map_err(to_js_error)?;
        let engine = Rc::new(RefCell::new(engine));
        engine.borrow_mut().scheduler_mut().bind(&engine);
        Ok(Self { engine, notifier, listeners: Vec::new() })
    }

    /// Start handling input on `element`. Re-attaching moves the listeners.
    ///
    /// # Errors
    ///
    /// Returns the DOM error if a listener cannot be installed.
    pub fn attach(&mut self, element: Element) -> Result<(), JsValue> {
        self.detach();
        for (event, handler) in BINDINGS {
            let listener = Listener::install(&element, event, handler, &self.engine, &self.notifier)?;
            self.listeners.push(listener);
        }
        self.engine.borrow_mut().attach(ElementViewport { element });
        Ok(())
    }

    /// Remove listeners and stop any motion. Safe to call repeatedly.
    pub fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.remove();
        }
        self.engine.borrow_mut().detach();
    }

    /// Called with the transform JSON after every change.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: Option<Function>) {
        *self.notifier.borrow_mut() = callback;
    }

    // --- View actions ---

    #[wasm_bindgen(js_name = resetTransform)]
    pub fn reset_transform(&self) {
        self.run(HostEngine::reset_transform);
    }

    #[wasm_bindgen(js_name = centerView)]
    pub fn center_view(&self) {
        self.run(HostEngine::center_view);
    }

    #[wasm_bindgen(js_name = zoomIn)]
    pub fn zoom_in(&self) {
        self.run(HostEngine::zoom_in);
    }

    #[wasm_bindgen(js_name = zoomOut)]
    pub fn zoom_out(&self) {
        self.run(HostEngine::zoom_out);
    }

    #[wasm_bindgen(js_name = setScale)]
    pub fn set_scale(&self, scale: f64) {
        self.run(|engine| engine.set_scale(scale));
    }

    #[wasm_bindgen(js_name = setTransform)]
    pub fn set_transform(&self, x: f64, y: f64, scale: f64) {
        self.run(|engine| engine.set_transform(ViewTransform::new(x, y, scale)));
    }

    // --- Drawing actions ---

    #[wasm_bindgen(js_name = setDrawingEnabled)]
    pub fn set_drawing_enabled(&self, enabled: bool) {
        self.run(|engine| engine.set_drawing_enabled(enabled));
    }

    pub fn undo(&self) {
        self.run(HostEngine::undo);
    }

    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&self) {
        self.run(HostEngine::clear_all);
    }

    // --- Queries ---

    #[must_use]
    pub fn x(&self) -> f64 {
        self.engine.borrow().transform().x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.engine.borrow().transform().y
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.engine.borrow().transform().scale
    }

    /// `translate(x, y) scale(s)` for the world layer.
    #[wasm_bindgen(js_name = layerTransform)]
    #[must_use]
    pub fn layer_transform(&self) -> String {
        self.engine.borrow().transform().css_transform()
    }

    #[wasm_bindgen(js_name = isDragging)]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.engine.borrow().is_dragging()
    }

    #[wasm_bindgen(js_name = isPinching)]
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.engine.borrow().is_pinching()
    }

    #[wasm_bindgen(js_name = isDrawingEnabled)]
    #[must_use]
    pub fn is_drawing_enabled(&self) -> bool {
        self.engine.borrow().is_drawing_enabled()
    }

    #[wasm_bindgen(js_name = hasDrawings)]
    #[must_use]
    pub fn has_drawings(&self) -> bool {
        self.engine.borrow().has_drawings()
    }

    #[wasm_bindgen(js_name = drawingCount)]
    #[must_use]
    pub fn drawing_count(&self) -> usize {
        self.engine.borrow().drawing_count()
    }

    /// Committed strokes as JSON.
    ///
    /// # Errors
    ///
    /// Returns a message if serialization fails.
    #[wasm_bindgen(js_name = strokesJson)]
    pub fn strokes_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.engine.borrow().strokes()).map_err(to_js_error)
    }

    /// Everything the drawing layer needs for one paint, as JSON.
    ///
    /// # Errors
    ///
    /// Returns a message if serialization fails.
    #[wasm_bindgen(js_name = renderJson)]
    pub fn render_json(&self) -> Result<String, JsValue> {
        let engine = self.engine.borrow();
        let transform = engine.transform();
        let snapshot = RenderSnapshot {
            layer_transform: transform.css_transform(),
            zoom_percent: transform.zoom_percent(),
            strokes: engine.rendered_strokes(),
            in_progress: engine.rendered_in_progress(),
        };
        serde_json::to_string(&snapshot).map_err(to_js_error)
    }
}

impl CanvasHost {
    fn run(&self, action: impl FnOnce(&mut HostEngine) -> Vec<Action>) {
        dispatch(&self.engine, &self.notifier, action);
    }
}

impl Drop for CanvasHost {
    fn drop(&mut self) {
        self.detach();
    }
}
