//! Serializable chart configuration.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartLayout, LineChart, LineChartBuilder};
use crate::error::ChartError;
use crate::format::DEFAULT_SPECIFIER;
use crate::style::StylePreset;
use crate::transform::VerticalScale;

/// Chart settings that can be loaded from JSON.
///
/// Missing fields take their defaults. Callbacks cannot be serialized; add
/// them on the returned builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    /// Title drawn above the chart.
    pub title: Option<String>,
    /// Legend text drawn under the title.
    pub legend: Option<String>,
    /// Style preset.
    pub style: StylePreset,
    /// printf-style value specifier.
    pub value_specifier: String,
    /// Vertical scale mode.
    pub vertical_scale: VerticalScale,
    /// Layout metrics.
    pub layout: ChartLayout,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            title: None,
            legend: None,
            style: StylePreset::default(),
            value_specifier: DEFAULT_SPECIFIER.to_string(),
            vertical_scale: VerticalScale::default(),
            layout: ChartLayout::default(),
        }
    }
}

impl LineChartConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Start a chart builder with these settings.
    pub fn builder<I, T>(&self, samples: I) -> LineChartBuilder
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        let mut builder = LineChart::builder(samples)
            .style(self.style)
            .value_specifier(self.value_specifier.clone())
            .vertical_scale(self.vertical_scale)
            .layout(self.layout.clone());
        if let Some(title) = &self.title {
            builder = builder.title(title.clone());
        }
        if let Some(legend) = &self.legend {
            builder = builder.legend(legend.clone());
        }
        builder
    }

    /// Build a chart with these settings.
    pub fn build<I, T>(&self, samples: I) -> Result<LineChart, ChartError>
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        self.builder(samples).build()
    }
}
