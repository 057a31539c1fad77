#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of the vector from the origin to this point.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (other - self).length()
    }

    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self { x: (self.x + other.x) / 2.0, y: (self.y + other.y) / 2.0 }
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

/// Container geometry as reported by the host, in client (CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Client-space point at the middle of the container.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Express a client-space point relative to the container center.
    #[must_use]
    pub fn relative_to_center(&self, client: Point) -> Point {
        client - self.center()
    }
}

/// An axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldRect {
    pub min: Point,
    pub max: Point,
}

impl WorldRect {
    /// Build a rectangle from its top-left corner and size.
    #[must_use]
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { min: Point::new(x, y), max: Point::new(x + width, y + height) }
    }

    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

/// The affine view state: world origin offset from the viewport center, and zoom.
///
/// `x` / `y` are in CSS pixels relative to the viewport center.
/// `scale` is a zoom factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, scale: 1.0 };

    #[must_use]
    pub fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    #[must_use]
    pub fn offset(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Map a point already expressed relative to the viewport center into world space.
    #[must_use]
    pub fn centered_to_world(&self, centered: Point) -> Point {
        Point { x: (centered.x - self.x) / self.scale, y: (centered.y - self.y) / self.scale }
    }

    /// Map a world point to screen space relative to the viewport center.
    #[must_use]
    pub fn world_to_centered(&self, world: Point) -> Point {
        Point { x: world.x * self.scale + self.x, y: world.y * self.scale + self.y }
    }

    /// Convert a client-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point, viewport: &Viewport) -> Point {
        self.centered_to_world(viewport.relative_to_center(screen))
    }

    /// Convert a world-space point to client coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point, viewport: &Viewport) -> Point {
        self.world_to_centered(world) + viewport.center()
    }

    /// World position under the viewport center (the drawing crosshair).
    #[must_use]
    pub fn center_world(&self) -> Point {
        self.centered_to_world(Point::ZERO)
    }

    /// Offset that keeps the world point under `anchor` fixed when the scale
    /// changes from `self.scale` to `new_scale`.
    ///
    /// `anchor` is relative to the viewport center.
    #[must_use]
    pub fn zoomed_about(&self, anchor: Point, new_scale: f64) -> Self {
        let ratio = new_scale / self.scale;
        Self {
            x: anchor.x - (anchor.x - self.x) * ratio,
            y: anchor.y - (anchor.y - self.y) * ratio,
            scale: new_scale,
        }
    }

    /// The world region currently covered by `viewport`, grown by `margin` world units.
    #[must_use]
    pub fn visible_world_rect(&self, viewport: &Viewport, margin: f64) -> WorldRect {
        let center = self.center_world();
        let half_w = viewport.width / self.scale / 2.0 + margin;
        let half_h = viewport.height / self.scale / 2.0 + margin;
        WorldRect {
            min: Point::new(center.x - half_w, center.y - half_h),
            max: Point::new(center.x + half_w, center.y + half_h),
        }
    }

    /// SVG/CSS group transform for a layer drawn in world coordinates.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!("translate({}, {}) scale({})", self.x, self.y, self.scale)
    }

    /// Zoom readout as a whole percentage.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn zoom_percent(&self) -> i64 {
        (self.scale * 100.0).round() as i64
    }
}
