//! Line chart entry points and builders.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::ChartError;
use crate::format::{DEFAULT_SPECIFIER, ValueFormat};
use crate::geom::PlotSize;
use crate::series::SampleSeries;
use crate::style::ChartStyle;
use crate::transform::{SampleTransform, ScaleError, VerticalScale};

type ValueChangeFn = dyn Fn(usize) + Send + Sync;
type GestureEndFn = dyn Fn() + Send + Sync;

/// Upper bound on [`ChartLayout::legend_lines`].
pub const MAX_LEGEND_LINES: usize = 64;

/// Layout metrics that cannot be drawn.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A metric is negative or not finite.
    #[error("layout metric `{field}` must be finite and non-negative, got {value}")]
    InvalidMetric {
        /// Name of the metric.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// More legend lines than can be labelled.
    #[error("at most {max} legend lines are supported, got {lines}")]
    TooManyLegendLines {
        /// Requested line count.
        lines: usize,
        /// Allowed maximum.
        max: usize,
    },
}

/// Fixed layout metrics, in logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    /// Width reserved left of the plot for legend labels.
    pub gutter: f32,
    /// Offset subtracted from the pointer X before resolving a column.
    pub pointer_margin: f32,
    /// Height of the chart area.
    pub chart_height: f32,
    /// Height of the indicator anchor.
    pub indicator_y: f32,
    /// Number of legend guide lines.
    pub legend_lines: usize,
    /// Line stroke width.
    pub line_width: f32,
    /// Indicator marker radius.
    pub indicator_radius: f32,
    /// Title font size.
    pub title_size: f32,
    /// Legend font size.
    pub legend_size: f32,
    /// Legend label font size.
    pub label_size: f32,
    /// Magnifier font size.
    pub magnifier_size: f32,
    /// Distance from the chart top to the magnifier label.
    pub magnifier_top: f32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            gutter: 30.0,
            pointer_margin: 15.0,
            chart_height: 240.0,
            indicator_y: 32.0,
            legend_lines: 5,
            line_width: 3.0,
            indicator_radius: 6.0,
            title_size: 18.0,
            legend_size: 14.0,
            label_size: 10.0,
            magnifier_size: 18.0,
            magnifier_top: 10.0,
        }
    }
}

impl ChartLayout {
    /// Check that every metric can be laid out.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let metrics = [
            ("gutter", self.gutter),
            ("pointer_margin", self.pointer_margin),
            ("chart_height", self.chart_height),
            ("indicator_y", self.indicator_y),
            ("line_width", self.line_width),
            ("indicator_radius", self.indicator_radius),
            ("title_size", self.title_size),
            ("legend_size", self.legend_size),
            ("label_size", self.label_size),
            ("magnifier_size", self.magnifier_size),
            ("magnifier_top", self.magnifier_top),
        ];
        if let Some((field, value)) = metrics
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(LayoutError::InvalidMetric { field, value });
        }
        if self.legend_lines > MAX_LEGEND_LINES {
            return Err(LayoutError::TooManyLegendLines {
                lines: self.legend_lines,
                max: MAX_LEGEND_LINES,
            });
        }
        Ok(())
    }
}

/// Hooks invoked by the drag tracker.
#[derive(Clone, Default)]
pub struct ChartCallbacks {
    on_value_change: Option<Arc<ValueChangeFn>>,
    on_gesture_end: Option<Arc<GestureEndFn>>,
}

impl ChartCallbacks {
    pub(crate) fn value_changed(&self, index: usize) {
        if let Some(callback) = &self.on_value_change {
            callback(index);
        }
    }

    pub(crate) fn gesture_ended(&self) {
        if let Some(callback) = &self.on_gesture_end {
            callback();
        }
    }
}

impl fmt::Debug for ChartCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartCallbacks")
            .field("on_value_change", &self.on_value_change.is_some())
            .field("on_gesture_end", &self.on_gesture_end.is_some())
            .finish()
    }
}

/// An immutable line chart definition.
#[derive(Debug, Clone)]
pub struct LineChart {
    series: SampleSeries,
    title: Option<String>,
    legend: Option<String>,
    style: ChartStyle,
    format: ValueFormat,
    vertical_scale: VerticalScale,
    layout: ChartLayout,
    callbacks: ChartCallbacks,
}

impl LineChart {
    /// Create a chart with default configuration.
    pub fn new(samples: Vec<f64>) -> Result<Self, ChartError> {
        Self::builder(samples).build()
    }

    /// Start building a chart with custom configuration.
    pub fn builder<I, T>(samples: I) -> LineChartBuilder
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        LineChartBuilder::new(samples.into_iter().map(Into::into).collect())
    }

    /// Access the samples.
    pub fn series(&self) -> &SampleSeries {
        &self.series
    }

    /// Access the title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Access the legend text.
    pub fn legend(&self) -> Option<&str> {
        self.legend.as_deref()
    }

    /// Access the style.
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Access the value format.
    pub fn value_format(&self) -> &ValueFormat {
        &self.format
    }

    /// Access the vertical scale mode.
    pub fn vertical_scale(&self) -> VerticalScale {
        self.vertical_scale
    }

    /// Access the layout metrics.
    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub(crate) fn callbacks(&self) -> &ChartCallbacks {
        &self.callbacks
    }

    /// Plot size for a container of the given width.
    ///
    /// The gutter is taken off the width; the height is the chart height.
    pub fn plot_size(&self, container_width: f32) -> PlotSize {
        PlotSize::new(
            container_width - self.layout.gutter,
            self.layout.chart_height,
        )
    }

    /// Build the sample transform for a plot of the given size.
    pub fn transform(&self, size: PlotSize) -> Result<SampleTransform, ScaleError> {
        SampleTransform::new(&self.series, size, self.vertical_scale)
    }
}

/// Builder for configuring a chart before construction.
#[derive(Debug)]
pub struct LineChartBuilder {
    samples: Vec<f64>,
    title: Option<String>,
    legend: Option<String>,
    style: ChartStyle,
    value_specifier: String,
    vertical_scale: VerticalScale,
    layout: ChartLayout,
    callbacks: ChartCallbacks,
}

impl LineChartBuilder {
    fn new(samples: Vec<f64>) -> Self {
        Self {
            samples,
            title: None,
            legend: None,
            style: ChartStyle::default(),
            value_specifier: DEFAULT_SPECIFIER.to_string(),
            vertical_scale: VerticalScale::default(),
            layout: ChartLayout::default(),
            callbacks: ChartCallbacks::default(),
        }
    }

    /// Set the title drawn above the chart.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the legend text drawn under the title.
    pub fn legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = Some(legend.into());
        self
    }

    /// Set the style, from a [`ChartStyle`] or a preset.
    pub fn style(mut self, style: impl Into<ChartStyle>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the printf-style value specifier, `"%.1f"` by default.
    pub fn value_specifier(mut self, specifier: impl Into<String>) -> Self {
        self.value_specifier = specifier.into();
        self
    }

    /// Set the vertical scale mode.
    pub fn vertical_scale(mut self, scale: VerticalScale) -> Self {
        self.vertical_scale = scale;
        self
    }

    /// Set the layout metrics.
    pub fn layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Called on every drag move with the current sample index.
    pub fn on_value_change(mut self, callback: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.callbacks.on_value_change = Some(Arc::new(callback));
        self
    }

    /// Called when a drag ends.
    pub fn on_gesture_end(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.callbacks.on_gesture_end = Some(Arc::new(callback));
        self
    }

    /// Validate the samples and specifier and build the chart.
    pub fn build(self) -> Result<LineChart, ChartError> {
        let series = SampleSeries::new(self.samples)?;
        let format = ValueFormat::parse(&self.value_specifier)?;
        self.layout.validate()?;

        if self.vertical_scale == VerticalScale::SumOfExtremes && series.max() + series.min() == 0.0
        {
            warn!(
                min = series.min(),
                max = series.max(),
                "sample extremes sum to zero; the line cannot be scaled"
            );
        }

        Ok(LineChart {
            series,
            title: self.title,
            legend: self.legend,
            style: self.style,
            format,
            vertical_scale: self.vertical_scale,
            layout: self.layout,
            callbacks: self.callbacks,
        })
    }
}
