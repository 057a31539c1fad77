//! Engine configuration.
//!
//! `CanvasOptions` mirrors the options object a page passes when mounting the
//! canvas. Keys are camelCase and every key is optional; missing keys take the
//! defaults in [`crate::consts`]. Values are validated once, on construction,
//! so the engine can rely on `0 < min_scale <= max_scale` from then on.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_INERTIA_FRICTION, DEFAULT_MAX_SCALE, DEFAULT_MIN_POINT_DISTANCE_PX, DEFAULT_MIN_SCALE,
    DEFAULT_SCALE_SENSITIVITY, DEFAULT_STROKE_WIDTH, WHEEL_NOTCH_FACTOR,
};
use crate::error::ConfigError;
use crate::stroke::Color;

/// Which screen point is sampled to extend the stroke during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorPolicy {
    /// The fixed viewport center. Panning the canvas draws under the crosshair.
    #[default]
    Crosshair,
    /// The pointer position mapped through the inverse view transform.
    Pointer,
}

/// Width and color applied to newly committed strokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// Width in screen pixels; the renderer divides by the view scale.
    pub width: f64,
    pub color: Color,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self { width: DEFAULT_STROKE_WIDTH, color: Color::default() }
    }
}

/// Options recognised by [`crate::engine::CanvasEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasOptions {
    pub min_scale: f64,
    pub max_scale: f64,
    pub scale_sensitivity: f64,
    /// Low-pass filter drag offsets.
    pub smoothing: bool,
    /// Keep panning with decaying velocity after a drag is released.
    pub enable_inertia: bool,
    /// Per-frame velocity multiplier while coasting.
    pub inertia_friction: f64,
    pub anchor: AnchorPolicy,
    /// Minimum spacing between stroke samples, in screen pixels.
    pub min_point_distance: f64,
    /// Whether drags record strokes when the engine starts.
    pub drawing_enabled: bool,
    pub stroke: StrokeStyle,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            scale_sensitivity: DEFAULT_SCALE_SENSITIVITY,
            smoothing: false,
            enable_inertia: true,
            inertia_friction: DEFAULT_INERTIA_FRICTION,
            anchor: AnchorPolicy::default(),
            min_point_distance: DEFAULT_MIN_POINT_DISTANCE_PX,
            drawing_enabled: true,
            stroke: StrokeStyle::default(),
        }
    }
}

impl CanvasOptions {
    /// Parse and validate an options document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or the first
    /// validation failure reported by [`CanvasOptions::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
            ("scaleSensitivity", self.scale_sensitivity),
            ("inertiaFriction", self.inertia_friction),
            ("minPointDistance", self.min_point_distance),
            ("stroke.width", self.stroke.width),
        ];
        if let Some((name, _)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite(name));
        }
        if self.min_scale <= 0.0 {
            return Err(ConfigError::NonPositiveMinScale(self.min_scale));
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedScaleRange { min: self.min_scale, max: self.max_scale });
        }
        if self.scale_sensitivity < 0.0 || self.scale_sensitivity * WHEEL_NOTCH_FACTOR >= 1.0 {
            return Err(ConfigError::InvalidSensitivity(self.scale_sensitivity));
        }
        if self.inertia_friction <= 0.0 || self.inertia_friction >= 1.0 {
            return Err(ConfigError::InvalidFriction(self.inertia_friction));
        }
        if self.min_point_distance < 0.0 {
            return Err(ConfigError::NegativePointDistance(self.min_point_distance));
        }
        if self.stroke.width <= 0.0 {
            return Err(ConfigError::NonPositiveStrokeWidth(self.stroke.width));
        }
        Ok(())
    }

    /// Clamp a requested scale into `[min_scale, max_scale]`.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Scale multiplier for one wheel notch. Positive `dy` (wheel down) zooms out.
    #[must_use]
    pub fn wheel_factor(&self, dy: f64) -> f64 {
        let step = self.scale_sensitivity * WHEEL_NOTCH_FACTOR;
        if dy > 0.0 { 1.0 - step } else { 1.0 + step }
    }
}
