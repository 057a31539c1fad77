#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_documented_values() {
    let o = CanvasOptions::default();
    assert_eq!(o.min_scale, 0.1);
    assert_eq!(o.max_scale, 5.0);
    assert_eq!(o.scale_sensitivity, 0.01);
    assert!(!o.smoothing);
    assert!(o.enable_inertia);
    assert_eq!(o.inertia_friction, 0.95);
    assert_eq!(o.anchor, AnchorPolicy::Crosshair);
    assert_eq!(o.min_point_distance, 2.0);
    assert!(o.drawing_enabled);
    assert_eq!(o.stroke.width, 3.0);
    assert_eq!(o.stroke.color.as_str(), "rgba(0, 0, 0, 0.8)");
    assert!(o.validate().is_ok());
}

#[test]
fn from_json_empty_object_uses_defaults() {
    let o = CanvasOptions::from_json("{}").unwrap();
    assert_eq!(o, CanvasOptions::default());
}

#[test]
fn from_json_reads_camel_case_keys() {
    let o = CanvasOptions::from_json(
        r#"{
            "minScale": 0.5, "maxScale": 8, "smoothing": true, "enableInertia": false,
            "inertiaFriction": 0.9, "anchor": "pointer", "stroke": { "width": 5, "color": "red" }
        }"#,
    )
    .unwrap();
    assert_eq!(o.min_scale, 0.5);
    assert_eq!(o.max_scale, 8.0);
    assert!(o.smoothing);
    assert!(!o.enable_inertia);
    assert_eq!(o.inertia_friction, 0.9);
    assert_eq!(o.anchor, AnchorPolicy::Pointer);
    assert_eq!(o.stroke.width, 5.0);
    assert_eq!(o.stroke.color.as_str(), "red");
    // Untouched keys keep their defaults.
    assert_eq!(o.scale_sensitivity, 0.01);
}

#[test]
fn from_json_partial_stroke_keeps_default_color() {
    let o = CanvasOptions::from_json(r#"{"stroke":{"width":1.5}}"#).unwrap();
    assert_eq!(o.stroke.width, 1.5);
    assert_eq!(o.stroke.color, Color::default());
}

#[test]
fn from_json_rejects_malformed() {
    assert!(matches!(CanvasOptions::from_json("{ nope"), Err(ConfigError::Json(_))));
    assert!(matches!(CanvasOptions::from_json(r#"{"minScale":"big"}"#), Err(ConfigError::Json(_))));
}

#[test]
fn validate_rejects_inverted_range() {
    let o = CanvasOptions { min_scale: 3.0, max_scale: 2.0, ..Default::default() };
    assert!(matches!(o.validate(), Err(ConfigError::InvertedScaleRange { .. })));
}

#[test]
fn validate_rejects_non_positive_min_scale() {
    let o = CanvasOptions { min_scale: 0.0, ..Default::default() };
    assert!(matches!(o.validate(), Err(ConfigError::NonPositiveMinScale(_))));
}

#[test]
fn validate_rejects_non_finite() {
    let o = CanvasOptions { max_scale: f64::INFINITY, ..Default::default() };
    assert!(matches!(o.validate(), Err(ConfigError::NotFinite("maxScale"))));
}

#[test]
fn validate_rejects_bad_friction() {
    for friction in [0.0, 1.0, 1.5, -0.2] {
        let o = CanvasOptions { inertia_friction: friction, ..Default::default() };
        assert!(matches!(o.validate(), Err(ConfigError::InvalidFriction(_))), "{friction}");
    }
}

#[test]
fn validate_rejects_bad_sensitivity() {
    for s in [-0.01, 0.1, 0.5] {
        let o = CanvasOptions { scale_sensitivity: s, ..Default::default() };
        assert!(matches!(o.validate(), Err(ConfigError::InvalidSensitivity(_))), "{s}");
    }
}

#[test]
fn validate_rejects_bad_stroke_and_distance() {
    let o = CanvasOptions { min_point_distance: -1.0, ..Default::default() };
    assert!(matches!(o.validate(), Err(ConfigError::NegativePointDistance(_))));
    let o = CanvasOptions { stroke: StrokeStyle { width: 0.0, color: Color::default() }, ..Default::default() };
    assert!(matches!(o.validate(), Err(ConfigError::NonPositiveStrokeWidth(_))));
}

#[test]
fn clamp_scale_bounds() {
    let o = CanvasOptions::default();
    assert_eq!(o.clamp_scale(0.01), 0.1);
    assert_eq!(o.clamp_scale(50.0), 5.0);
    assert_eq!(o.clamp_scale(2.5), 2.5);
}

#[test]
fn wheel_factor_direction() {
    let o = CanvasOptions::default();
    assert!((o.wheel_factor(120.0) - 0.9).abs() < 1e-12);
    assert!((o.wheel_factor(-120.0) - 1.1).abs() < 1e-12);
}

#[test]
fn error_messages_are_readable() {
    let err = ConfigError::InvertedScaleRange { min: 3.0, max: 2.0 };
    assert_eq!(err.to_string(), "minScale (3) must not exceed maxScale (2)");
}
