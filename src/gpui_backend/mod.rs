//! GPUI integration for gpui_linechart.
//!
//! This module provides a GPUI view that renders a [`LineChart`](crate::chart::LineChart)
//! and turns left-button drags into magnifier readouts.

mod config;
mod paint;
mod state;
mod text;
mod view;

pub use config::LineChartViewConfig;
pub use view::GpuiLineChartView;
