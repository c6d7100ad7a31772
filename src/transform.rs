//! Mapping from sample index/value to plot-space pixels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::{PlotSize, ScreenPoint};
use crate::series::SampleSeries;

const MIN_SPAN: f64 = 1.0;
// Column edges tolerate this many f32 ulps of a coordinate no smaller than the floor.
const EDGE_SLACK_ULPS: f64 = 4.0;
const EDGE_SLACK_FLOOR: f64 = 64.0;

/// How sample values are scaled onto the plot height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalScale {
    /// `height / (max + min)`, values measured from zero.
    ///
    /// Only meaningful for positive samples of comparable magnitude. A series
    /// whose extremes sum to zero has no defined scale.
    #[default]
    SumOfExtremes,
    /// `height / (max - min)`, values measured from the minimum.
    ///
    /// Flat series are widened to a unit span centred on their value.
    Range,
}

/// Errors raised while building a [`SampleTransform`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// The plot area has no positive, finite area.
    #[error("plot area {width}x{height} is empty")]
    EmptyPlotArea {
        /// Plot width.
        width: f32,
        /// Plot height.
        height: f32,
    },
    /// The vertical divisor leaves the step height undefined.
    #[error("vertical scale is undefined for divisor {divisor}")]
    DegenerateVertical {
        /// The value the plot height was divided by.
        divisor: f64,
    },
}

/// Equal-spacing transform between samples and plot-space pixels.
///
/// Sample `0` sits at `x = 0` and the last sample at `x = width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleTransform {
    size: PlotSize,
    step_width: f64,
    step_height: f64,
    baseline: f64,
    scale: VerticalScale,
}

impl SampleTransform {
    /// Build the transform for a series drawn into a plot of the given size.
    pub fn new(
        series: &SampleSeries,
        size: PlotSize,
        scale: VerticalScale,
    ) -> Result<Self, ScaleError> {
        if !size.is_valid() {
            return Err(ScaleError::EmptyPlotArea {
                width: size.width,
                height: size.height,
            });
        }

        let step_width = size.width as f64 / (series.len() - 1) as f64;
        let (divisor, baseline) = match scale {
            VerticalScale::SumOfExtremes => (series.max() + series.min(), 0.0),
            VerticalScale::Range => {
                let span = series.span();
                if span > 0.0 {
                    (span, series.min())
                } else {
                    let center = (series.min() + series.max()) * 0.5;
                    (MIN_SPAN, center - MIN_SPAN * 0.5)
                }
            }
        };

        let step_height = size.height as f64 / divisor;
        if divisor == 0.0 || !step_height.is_finite() {
            return Err(ScaleError::DegenerateVertical { divisor });
        }

        Ok(Self {
            size,
            step_width,
            step_height,
            baseline,
            scale,
        })
    }

    /// Plot size the transform was built for.
    pub fn size(&self) -> PlotSize {
        self.size
    }

    /// Horizontal distance between consecutive samples.
    pub fn step_width(&self) -> f64 {
        self.step_width
    }

    /// Pixels per value unit.
    pub fn step_height(&self) -> f64 {
        self.step_height
    }

    /// Vertical scale mode.
    pub fn scale(&self) -> VerticalScale {
        self.scale
    }

    /// X coordinate of a sample column.
    pub fn x_for_index(&self, index: usize) -> f32 {
        (index as f64 * self.step_width) as f32
    }

    /// Y coordinate (upward from the plot bottom) of a value.
    pub fn y_for_value(&self, value: f64) -> f32 {
        ((value - self.baseline) * self.step_height) as f32
    }

    /// Plot-space position of a sample.
    pub fn sample_to_plot(&self, index: usize, value: f64) -> ScreenPoint {
        ScreenPoint::new(self.x_for_index(index), self.y_for_value(value))
    }

    /// Column a plot-space X coordinate falls into, floored.
    ///
    /// Coordinates within a few `f32` ulps left of a column edge count as on
    /// the edge, so `column_at(x_for_index(i))` is `i` even after the pointer
    /// went through `f32` arithmetic. Returns `None` for non-finite input.
    /// The result may lie outside the series; callers bound-check it.
    pub fn column_at(&self, x: f32) -> Option<i64> {
        let x = x as f64;
        let slack = (x.abs() + EDGE_SLACK_FLOOR) * EDGE_SLACK_ULPS * f64::from(f32::EPSILON);
        let column = ((x + slack) / self.step_width).floor();
        column.is_finite().then_some(column as i64)
    }

    /// Plot-space positions for every sample.
    pub fn plot_points(&self, series: &SampleSeries) -> Vec<ScreenPoint> {
        series
            .values()
            .iter()
            .enumerate()
            .map(|(index, value)| self.sample_to_plot(index, *value))
            .collect()
    }
}
