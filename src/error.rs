//! Crate-level error type.

use thiserror::Error;

use crate::chart::LayoutError;
use crate::format::FormatError;
use crate::series::SeriesError;
use crate::transform::ScaleError;

/// Errors raised while building or configuring a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The samples cannot be plotted.
    #[error(transparent)]
    Series(#[from] SeriesError),
    /// The value specifier is malformed.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The layout metrics cannot be drawn.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// The samples have no usable scale for the plot area.
    #[error(transparent)]
    Scale(#[from] ScaleError),
    /// A serialized configuration could not be read.
    #[error("invalid chart configuration: {0}")]
    Config(#[from] serde_json::Error),
}
