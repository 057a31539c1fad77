//! End-to-end sessions against the public API.

#![allow(clippy::float_cmp)]

use gesture_canvas::{
    Action, AnchorPolicy, CanvasEngine, CanvasOptions, GestureInput, ManualScheduler, Modifiers, Point,
    ViewTransform, Viewport, WheelDelta,
};

fn attached(options: CanvasOptions) -> CanvasEngine<ManualScheduler> {
    let mut engine = CanvasEngine::new(options, ManualScheduler::new()).unwrap();
    engine.attach(Viewport::new(100.0, 50.0, 1000.0, 800.0));
    engine
}

fn drain(engine: &mut CanvasEngine<ManualScheduler>) {
    loop {
        let handles = engine.scheduler_mut().take_pending();
        if handles.is_empty() {
            break;
        }
        for handle in handles {
            engine.on_frame(handle);
        }
    }
}

#[test]
fn draw_pan_zoom_and_undo() {
    let mut engine = attached(CanvasOptions::from_json(r#"{"enableInertia": false}"#).unwrap());

    // Draw an L under the crosshair by dragging the canvas.
    engine.on_gesture_start(&GestureInput::pointer(Point::new(600.0, 450.0), 0.0));
    engine.on_gesture_move(&GestureInput::pointer(Point::new(500.0, 450.0), 16.0));
    engine.on_gesture_move(&GestureInput::pointer(Point::new(500.0, 350.0), 32.0));
    let actions = engine.on_gesture_end();
    assert!(matches!(actions.as_slice(), [Action::StrokeCommitted(_)]));
    assert_eq!(
        engine.strokes()[0].points,
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)]
    );

    // Zoom in about a point; strokes keep their world coordinates.
    let pointer = Point::new(300.0, 200.0);
    let world_before = engine.screen_to_world(pointer);
    engine.on_wheel(pointer, WheelDelta { dx: 0.0, dy: -120.0 }, Modifiers { ctrl: true, ..Default::default() });
    let world_after = engine.screen_to_world(pointer);
    assert!((world_before.x - world_after.x).abs() < 1e-9);
    assert!((world_before.y - world_after.y).abs() < 1e-9);
    assert_eq!(engine.strokes()[0].points[2], Point::new(100.0, 100.0));

    // Second stroke, then undo it.
    engine.on_gesture_start(&GestureInput::pointer(Point::new(0.0, 0.0), 100.0));
    engine.on_gesture_move(&GestureInput::pointer(Point::new(40.0, 0.0), 116.0));
    engine.on_gesture_end();
    assert_eq!(engine.drawing_count(), 2);
    engine.undo();
    assert_eq!(engine.drawing_count(), 1);
    assert!((engine.rendered_strokes()[0].stroke_width - 3.0 / 1.1).abs() < 1e-12);
}

#[test]
fn fling_then_grab_stops_motion() {
    let mut engine = attached(CanvasOptions { drawing_enabled: false, ..Default::default() });
    engine.on_gesture_start(&GestureInput::pointer(Point::new(0.0, 0.0), 0.0));
    engine.on_gesture_move(&GestureInput::pointer(Point::new(30.0, 0.0), 16.0));
    engine.on_gesture_end();

    let first = engine.scheduler_mut().take_pending()[0];
    engine.on_frame(first);
    assert_eq!(engine.transform().x, 60.0);

    // A new press cancels the rescheduled tick before it runs.
    let x = engine.transform().x;
    engine.on_gesture_start(&GestureInput::pointer(Point::new(0.0, 0.0), 50.0));
    drain(&mut engine);
    assert_eq!(engine.transform().x, x);
    assert_eq!(engine.scheduler().cancelled_count(), 1);
}

#[test]
fn pinch_zoom_session() {
    let mut engine = attached(CanvasOptions { max_scale: 3.0, ..Default::default() });
    let a = Point::new(500.0, 450.0);
    let b = Point::new(700.0, 450.0);
    engine.on_gesture_start(&GestureInput::touches(&[a, b], 0.0));
    assert!(engine.is_pinching());

    engine.on_gesture_move(&GestureInput::touches(&[Point::new(400.0, 450.0), Point::new(800.0, 450.0)], 16.0));
    assert_eq!(engine.transform().scale, 2.0);
    engine.on_gesture_move(&GestureInput::touches(&[Point::new(0.0, 450.0), Point::new(1200.0, 450.0)], 32.0));
    assert_eq!(engine.transform().scale, 3.0);

    engine.on_gesture_end();
    assert!(!engine.is_pinching());
    assert!(engine.scheduler().pending().is_empty());
}

#[test]
fn pointer_anchor_with_smoothing_traces_lag() {
    let options = CanvasOptions { anchor: AnchorPolicy::Pointer, smoothing: true, ..Default::default() };
    let mut engine = attached(options);
    engine.on_gesture_start(&GestureInput::pointer(Point::new(600.0, 450.0), 0.0));
    for i in 1..=10 {
        let x = 600.0 + f64::from(i) * 20.0;
        engine.on_gesture_move(&GestureInput::pointer(Point::new(x, 450.0), f64::from(i) * 16.0));
    }
    engine.on_gesture_end();
    let stroke = &engine.strokes()[0];
    assert!(stroke.points.len() > 2);
    assert!(stroke.points.windows(2).all(|w| w[1].x > w[0].x));
}

#[test]
fn zoom_buttons_and_reset() {
    let mut engine = attached(CanvasOptions::default());
    for _ in 0..10 {
        engine.zoom_in();
    }
    assert_eq!(engine.transform().scale, 5.0);
    assert_eq!(engine.transform().zoom_percent(), 500);
    engine.reset_transform();
    assert_eq!(engine.transform(), ViewTransform::IDENTITY);
    assert_eq!(engine.transform().css_transform(), "translate(0, 0) scale(1)");
}
