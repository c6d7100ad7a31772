use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::{SampleReadout, Tracker};

#[derive(Debug, Clone, Default)]
pub(crate) struct ChartUiState {
    pub(crate) tracker: Tracker,
    pub(crate) chart_rect: Option<ScreenRect>,
    pub(crate) plot_rect: Option<ScreenRect>,
}

impl ChartUiState {
    pub(crate) fn with_readout(readout: SampleReadout) -> Self {
        Self {
            tracker: Tracker::with_readout(readout),
            ..Self::default()
        }
    }

    /// Convert a window position into chart-local coordinates, if laid out.
    pub(crate) fn chart_local(&self, pos: ScreenPoint) -> Option<ScreenPoint> {
        self.chart_rect.map(|rect| rect.to_local(pos))
    }

    /// Check whether a window position lands on the chart area.
    pub(crate) fn hit(&self, pos: ScreenPoint) -> bool {
        self.chart_rect.is_some_and(|rect| rect.contains(pos))
    }
}
