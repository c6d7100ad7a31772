//! gpui_linechart is an axis-free line chart widget for GPUI.
//! Dragging across the chart shows a magnifier readout of the sample under the
//! pointer and publishes it to sibling views.

#![forbid(unsafe_code)]

pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod geom;
pub mod gpui_backend;
pub mod interaction;
pub mod render;
pub mod series;
pub mod style;
pub mod transform;

pub use chart::{
    ChartCallbacks, ChartLayout, LayoutError, LineChart, LineChartBuilder, MAX_LEGEND_LINES,
};
pub use config::LineChartConfig;
pub use error::ChartError;
pub use format::{FormatError, ValueFormat};
pub use geom::{PlotSize, ScreenPoint, ScreenRect};
pub use gpui_backend::{GpuiLineChartView, LineChartViewConfig};
pub use interaction::{
    ReadoutSnapshot, ResolvedPoint, SampleReadout, Tracker, TrackingPhase, resolve_closest,
};
pub use render::{
    Color, GradientColor, LineStyle, Paint, RectStyle, RenderCommand, RenderList, Scene,
    SceneOptions, TextMeasurer, TextStyle, build_scene,
};
pub use series::{SampleSeries, SeriesError};
pub use style::{ChartStyle, ColorScheme, StylePreset};
pub use transform::{SampleTransform, ScaleError, VerticalScale};
