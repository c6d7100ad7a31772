//! Rendering primitives.
//!
//! These types are backend-agnostic and are used by render backends (such as the
//! GPUI backend) to describe how a chart should be drawn.

pub mod scene;

use serde::{Deserialize, Serialize};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::series::SampleSeries;
use crate::transform::SampleTransform;

pub use scene::{Scene, SceneOptions, TextMeasurer, build_scene};

/// RGBA color.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::new(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        )
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_rgb_u32),
            8 => {
                let packed = u32::from_str_radix(digits, 16).ok()?;
                let mut color = Self::from_rgb_u32(packed >> 8);
                color.a = (packed & 0xff) as f32 / 255.0;
                Some(color)
            }
            _ => None,
        }
    }

    /// Return the same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Mid gray.
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5, 1.0);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

/// Two-stop gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientColor {
    /// Color at the start of the gradient.
    pub start: Color,
    /// Color at the end of the gradient.
    pub end: Color,
}

impl GradientColor {
    /// Create a gradient.
    pub const fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }
}

/// Paint used for strokes and fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// A single color.
    Solid(Color),
    /// A linear gradient along `angle` degrees (0 points up, 90 points right).
    Linear {
        /// Gradient stops.
        gradient: GradientColor,
        /// Direction in degrees.
        angle: f32,
    },
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke paint.
    pub paint: Paint,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            paint: Paint::Solid(Color::BLACK),
            width: 1.0,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
    /// Corner radius.
    pub corner_radius: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::TRANSPARENT,
            stroke: Color::BLACK,
            stroke_width: 0.0,
            corner_radius: 0.0,
        }
    }
}

/// Text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Bold weight.
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            bold: false,
        }
    }
}

/// Render command list.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Start clipping to a rectangle.
    ClipRect(ScreenRect),
    /// End clipping.
    ClipEnd,
    /// Stroke a connected polyline.
    Polyline {
        /// Vertices in screen space.
        points: Vec<ScreenPoint>,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Fill a closed polygon.
    Polygon {
        /// Vertices in screen space.
        points: Vec<ScreenPoint>,
        /// Fill paint.
        paint: Paint,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw a filled circle with an outline.
    Circle {
        /// Circle center.
        center: ScreenPoint,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        fill: Color,
        /// Outline color.
        stroke: Color,
        /// Outline width.
        stroke_width: f32,
    },
    /// Draw text with its top-left corner at `position`.
    Text {
        /// Text position.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

/// Aggregated render commands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Screen-space vertices of the chart line.
pub fn build_line_path(
    series: &SampleSeries,
    transform: &SampleTransform,
    plot_rect: ScreenRect,
) -> Vec<ScreenPoint> {
    transform
        .plot_points(series)
        .into_iter()
        .map(|point| plot_rect.plot_to_screen(point))
        .collect()
}

/// Closed polygon covering the area between the line and the plot bottom.
pub fn build_area_polygon(line: &[ScreenPoint], plot_rect: ScreenRect) -> Vec<ScreenPoint> {
    let (Some(first), Some(last)) = (line.first(), line.last()) else {
        return Vec::new();
    };
    let mut polygon = Vec::with_capacity(line.len() + 2);
    polygon.push(ScreenPoint::new(first.x, plot_rect.max.y));
    polygon.extend_from_slice(line);
    polygon.push(ScreenPoint::new(last.x, plot_rect.max.y));
    polygon
}
