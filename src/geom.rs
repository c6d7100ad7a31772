//! Geometric primitives used by the chart pipeline.
//!
//! Points produced by the resolver live in plot space: X grows to the right
//! from the left edge of the plot area and Y grows upward from its bottom
//! edge. Render commands use screen space, where Y grows downward.

use serde::{Deserialize, Serialize};

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    /// X value in pixels.
    pub x: f32,
    /// Y value in pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// The origin, also used as the "nothing resolved" sentinel.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Size of the plotting area used for the sample mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSize {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl PlotSize {
    /// Create a new plot size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check whether the size has positive, finite area.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    pub fn new(min: ScreenPoint, max: ScreenPoint) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(origin: ScreenPoint, size: PlotSize) -> Self {
        Self::new(
            origin,
            ScreenPoint::new(origin.x + size.width, origin.y + size.height),
        )
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Rectangle size.
    pub fn size(&self) -> PlotSize {
        PlotSize::new(self.width(), self.height())
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether the rectangle contains a point (edges inclusive).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Express a screen point relative to the top-left corner.
    pub fn to_local(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(point.x - self.min.x, point.y - self.min.y)
    }

    /// Map a plot-space point (Y up from the bottom edge) into screen space.
    pub fn plot_to_screen(&self, point: ScreenPoint) -> ScreenPoint {
        ScreenPoint::new(self.min.x + point.x, self.max.y - point.y)
    }
}
