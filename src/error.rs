//! Error types for the canvas crate.
//!
//! The gesture math itself never fails: bad input is clamped or ignored.
//! Configuration is the only boundary that rejects values.

/// Reasons a [`crate::config::CanvasOptions`] value is rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The options document is not valid JSON or has the wrong shape.
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A numeric option is NaN or infinite.
    #[error("option `{0}` must be a finite number")]
    NotFinite(&'static str),
    /// `minScale` is zero or negative.
    #[error("minScale must be positive, got {0}")]
    NonPositiveMinScale(f64),
    /// `minScale` exceeds `maxScale`.
    #[error("minScale ({min}) must not exceed maxScale ({max})")]
    InvertedScaleRange { min: f64, max: f64 },
    /// A wheel notch would shrink the scale to zero or below.
    #[error("scaleSensitivity must be in [0, 0.1), got {0}")]
    InvalidSensitivity(f64),
    /// Friction outside the open unit interval never (or instantly) stops.
    #[error("inertiaFriction must be in (0, 1), got {0}")]
    InvalidFriction(f64),
    /// `minPointDistance` is negative.
    #[error("minPointDistance must not be negative, got {0}")]
    NegativePointDistance(f64),
    /// Stroke width is zero or negative.
    #[error("stroke width must be positive, got {0}")]
    NonPositiveStrokeWidth(f64),
}
