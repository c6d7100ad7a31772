//! Drag tracking and nearest-sample resolution.
//!
//! The resolver maps a pointer location to the sample whose column it falls
//! into. The [`Tracker`] drives the idle/tracking state machine around it and
//! publishes the current sample through a [`SampleReadout`] so sibling views
//! (such as a magnifier) can observe it.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::chart::LineChart;
use crate::geom::{PlotSize, ScreenPoint};
use crate::series::SampleSeries;
use crate::transform::SampleTransform;

/// A sample located under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPoint {
    /// Index of the sample in the series.
    pub index: usize,
    /// Sample value.
    pub value: f64,
    /// Plotted position in plot space (Y up from the plot bottom).
    pub position: ScreenPoint,
}

/// Resolve the sample column under a pointer.
///
/// `pointer` is in chart-local coordinates; `pointer_margin` is subtracted
/// from its X coordinate before the column is floored. Returns `None` when
/// the column lies outside the series.
pub fn resolve_closest(
    series: &SampleSeries,
    transform: &SampleTransform,
    pointer: ScreenPoint,
    pointer_margin: f32,
) -> Option<ResolvedPoint> {
    let column = transform.column_at(pointer.x - pointer_margin)?;
    let index = usize::try_from(column).ok()?;
    let value = series.get(index)?;
    Some(ResolvedPoint {
        index,
        value,
        position: transform.sample_to_plot(index, value),
    })
}

/// Interaction phase of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingPhase {
    /// No drag in progress; the magnifier is hidden.
    #[default]
    Idle,
    /// A drag is in progress; the magnifier follows the pointer.
    Tracking,
}

/// Point-in-time copy of a [`SampleReadout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadoutSnapshot {
    /// Index of the last resolved sample.
    pub current_index: usize,
    /// Value of the last resolved sample.
    pub current_value: f64,
    /// Interaction phase.
    pub phase: TrackingPhase,
    /// Magnifier opacity, 0.0 or 1.0.
    pub opacity: f32,
}

impl Default for ReadoutSnapshot {
    fn default() -> Self {
        Self {
            current_index: 0,
            current_value: 0.0,
            phase: TrackingPhase::Idle,
            opacity: 0.0,
        }
    }
}

/// Shared, read-mostly view of the current sample.
///
/// Clones share the same cell. Only the owning [`Tracker`] writes to it.
#[derive(Debug, Clone, Default)]
pub struct SampleReadout {
    inner: Arc<RwLock<ReadoutSnapshot>>,
}

impl SampleReadout {
    /// Create a readout in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the current state.
    pub fn snapshot(&self) -> ReadoutSnapshot {
        *self.inner.read()
    }

    /// Index of the last resolved sample.
    pub fn current_index(&self) -> usize {
        self.inner.read().current_index
    }

    /// Value of the last resolved sample.
    pub fn current_value(&self) -> f64 {
        self.inner.read().current_value
    }

    /// Interaction phase.
    pub fn phase(&self) -> TrackingPhase {
        self.inner.read().phase
    }

    /// Check whether a drag is in progress.
    pub fn is_tracking(&self) -> bool {
        self.phase() == TrackingPhase::Tracking
    }

    /// Magnifier opacity.
    pub fn opacity(&self) -> f32 {
        self.inner.read().opacity
    }

    fn update<R>(&self, f: impl FnOnce(&mut ReadoutSnapshot) -> R) -> R {
        let mut state = self.inner.write();
        f(&mut state)
    }
}

/// Drag state machine for one chart.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    readout: SampleReadout,
    drag_location: Option<ScreenPoint>,
    indicator: ScreenPoint,
    closest: Option<ResolvedPoint>,
}

impl Tracker {
    /// Create an idle tracker with its own readout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle tracker that publishes into an existing readout.
    pub fn with_readout(readout: SampleReadout) -> Self {
        Self {
            readout,
            ..Self::default()
        }
    }

    /// Access the shared readout.
    pub fn readout(&self) -> &SampleReadout {
        &self.readout
    }

    /// Check whether a drag is in progress.
    pub fn is_tracking(&self) -> bool {
        self.readout.is_tracking()
    }

    /// Last pointer location of the active drag, chart-local.
    pub fn drag_location(&self) -> Option<ScreenPoint> {
        self.drag_location
    }

    /// Indicator anchor: the pointer X less the gutter, at a fixed height.
    pub fn indicator(&self) -> ScreenPoint {
        self.indicator
    }

    /// Sample resolved by the last move, if it hit the series.
    pub fn closest(&self) -> Option<ResolvedPoint> {
        self.closest
    }

    /// Plotted position resolved by the last move, or the origin on a miss.
    pub fn closest_point(&self) -> ScreenPoint {
        self.closest.map_or(ScreenPoint::ORIGIN, |resolved| resolved.position)
    }

    /// Handle a drag start or move at a chart-local pointer location.
    ///
    /// Enters the tracking phase, resolves the closest sample for a plot of
    /// `plot_size` and, on a hit, records it as the current sample. The
    /// chart's value-change callback then receives the current index, whether
    /// or not this move hit.
    pub fn drag_moved(
        &mut self,
        chart: &LineChart,
        plot_size: PlotSize,
        pointer: ScreenPoint,
    ) -> Option<ResolvedPoint> {
        let layout = chart.layout();
        self.drag_location = Some(pointer);
        self.indicator = ScreenPoint::new((pointer.x - layout.gutter).max(0.0), layout.indicator_y);

        let resolved = match chart.transform(plot_size) {
            Ok(transform) => {
                resolve_closest(chart.series(), &transform, pointer, layout.pointer_margin)
            }
            Err(err) => {
                debug!(%err, "cannot resolve pointer");
                None
            }
        };
        self.closest = resolved;

        let (was_idle, current_index) = self.readout.update(|state| {
            let was_idle = state.phase == TrackingPhase::Idle;
            state.phase = TrackingPhase::Tracking;
            state.opacity = 1.0;
            if let Some(point) = resolved {
                state.current_index = point.index;
                state.current_value = point.value;
            }
            (was_idle, state.current_index)
        });
        if was_idle {
            debug!(x = pointer.x, y = pointer.y, "drag started");
        }

        chart.callbacks().value_changed(current_index);
        resolved
    }

    /// Handle the end of a drag.
    ///
    /// Always returns to idle and hides the magnifier. The current sample is
    /// kept.
    pub fn drag_ended(&mut self, chart: &LineChart) {
        self.drag_location = None;
        let current_index = self.readout.update(|state| {
            state.phase = TrackingPhase::Idle;
            state.opacity = 0.0;
            state.current_index
        });
        debug!(current_index, "drag ended");
        chart.callbacks().gesture_ended();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::geom::PlotSize;
    use crate::transform::VerticalScale;

    const SAMPLES: [f64; 9] = [8.0, 23.0, 54.0, 32.0, 12.0, 37.0, 7.0, 23.0, 43.0];
    const MARGIN: f32 = 15.0;

    fn transform(series: &SampleSeries, width: f32) -> SampleTransform {
        SampleTransform::new(
            series,
            PlotSize::new(width, 240.0),
            VerticalScale::SumOfExtremes,
        )
        .expect("valid transform")
    }

    #[test]
    fn resolves_exact_sample_columns() {
        let series = SampleSeries::new(SAMPLES.to_vec()).expect("valid series");
        let transform = transform(&series, 800.0);
        for index in 0..series.len() {
            let x = MARGIN + transform.x_for_index(index);
            let resolved = resolve_closest(&series, &transform, ScreenPoint::new(x, 0.0), MARGIN)
                .expect("column inside series");
            assert_eq!(resolved.index, index);
            assert_eq!(resolved.value, SAMPLES[index]);
        }
    }

    #[test]
    fn middle_column_maps_to_sample_four() {
        let series = SampleSeries::new(SAMPLES.to_vec()).expect("valid series");
        let transform = transform(&series, 400.0);
        assert_eq!(transform.step_width(), 50.0);
        let pointer = ScreenPoint::new(MARGIN + 4.0 * 50.0, 100.0);
        let resolved = resolve_closest(&series, &transform, pointer, MARGIN).expect("hit");
        assert_eq!(resolved.index, 4);
        assert_eq!(resolved.value, 12.0);
        let expected_y = (12.0 * (240.0 / 61.0)) as f32;
        assert_eq!(resolved.position, ScreenPoint::new(200.0, expected_y));
    }

    #[test]
    fn pointer_outside_series_misses() {
        let series = SampleSeries::new(SAMPLES.to_vec()).expect("valid series");
        let transform = transform(&series, 400.0);
        let left = ScreenPoint::new(MARGIN - 0.5, 10.0);
        assert_eq!(resolve_closest(&series, &transform, left, MARGIN), None);
        let right = ScreenPoint::new(MARGIN + 9.0 * 50.0, 10.0);
        assert_eq!(resolve_closest(&series, &transform, right, MARGIN), None);
        let nan = ScreenPoint::new(f32::NAN, 10.0);
        assert_eq!(resolve_closest(&series, &transform, nan, MARGIN), None);
    }

    #[test]
    fn misses_keep_current_sample_and_reset_closest_point() {
        let chart = LineChart::new(SAMPLES.to_vec()).expect("valid chart");
        let size = PlotSize::new(400.0, 240.0);
        let mut tracker = Tracker::new();

        tracker.drag_moved(&chart, size, ScreenPoint::new(MARGIN + 150.0, 10.0));
        assert_eq!(tracker.readout().current_index(), 3);
        assert_eq!(tracker.readout().current_value(), 32.0);
        assert_ne!(tracker.closest_point(), ScreenPoint::ORIGIN);

        let miss = tracker.drag_moved(&chart, size, ScreenPoint::new(2.0, 10.0));
        assert!(miss.is_none());
        assert_eq!(tracker.readout().current_index(), 3);
        assert_eq!(tracker.readout().current_value(), 32.0);
        assert_eq!(tracker.closest_point(), ScreenPoint::ORIGIN);
        assert!(tracker.is_tracking());
    }

    #[test]
    fn computed_sample_positions_resolve_back_at_any_width() {
        for width in [100.0, 450.0, 1234.0] {
            for len in 2..40 {
                let series = SampleSeries::from_iter_y((0..len).map(|i| f64::from(i % 7 + 1)))
                    .expect("valid series");
                let transform = transform(&series, width);
                for index in 0..series.len() {
                    let pointer = ScreenPoint::new(MARGIN + transform.x_for_index(index), 50.0);
                    let resolved = resolve_closest(&series, &transform, pointer, MARGIN)
                        .map(|point| point.index);
                    assert_eq!(
                        resolved,
                        Some(index),
                        "width {width}, {len} samples, sample {index}"
                    );
                }
            }
        }
    }

    #[test]
    fn miss_past_last_step_keeps_current_sample() {
        let chart = LineChart::new(SAMPLES.to_vec()).expect("valid chart");
        let size = PlotSize::new(400.0, 240.0);
        let mut tracker = Tracker::new();

        tracker.drag_moved(&chart, size, ScreenPoint::new(MARGIN + 250.0, 10.0));
        assert_eq!(tracker.readout().current_index(), 5);
        assert_eq!(tracker.readout().current_value(), 37.0);

        let beyond = ScreenPoint::new(MARGIN + 400.0 + 50.0, 10.0);
        assert!(tracker.drag_moved(&chart, size, beyond).is_none());
        assert_eq!(tracker.readout().current_index(), 5);
        assert_eq!(tracker.readout().current_value(), 37.0);
        assert_eq!(tracker.closest_point(), ScreenPoint::ORIGIN);
        assert!(tracker.is_tracking());
    }

    #[test]
    fn drag_end_always_returns_to_idle() {
        let chart = LineChart::new(SAMPLES.to_vec()).expect("valid chart");
        let size = PlotSize::new(400.0, 240.0);
        let mut tracker = Tracker::new();
        let readout = tracker.readout().clone();

        tracker.drag_moved(&chart, size, ScreenPoint::new(MARGIN + 400.0, 0.0));
        assert_eq!(readout.phase(), TrackingPhase::Tracking);
        assert_eq!(readout.opacity(), 1.0);
        assert_eq!(readout.current_index(), 8);

        tracker.drag_ended(&chart);
        assert_eq!(readout.phase(), TrackingPhase::Idle);
        assert_eq!(readout.opacity(), 0.0);
        assert_eq!(readout.current_index(), 8);
        assert_eq!(tracker.drag_location(), None);

        tracker.drag_ended(&chart);
        assert_eq!(readout.phase(), TrackingPhase::Idle);
    }

    #[test]
    fn indicator_follows_pointer_minus_gutter() {
        let chart = LineChart::new(SAMPLES.to_vec()).expect("valid chart");
        let mut tracker = Tracker::new();
        tracker.drag_moved(&chart, PlotSize::new(400.0, 240.0), ScreenPoint::new(100.0, 80.0));
        assert_eq!(tracker.indicator(), ScreenPoint::new(70.0, 32.0));
        tracker.drag_moved(&chart, PlotSize::new(400.0, 240.0), ScreenPoint::new(10.0, 80.0));
        assert_eq!(tracker.indicator(), ScreenPoint::new(0.0, 32.0));
    }

    #[test]
    fn callbacks_fire_on_every_move_and_on_end() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let ended = Arc::new(Mutex::new(0));
        let chart = LineChart::builder(SAMPLES)
            .on_value_change({
                let seen = Arc::clone(&seen);
                move |index| seen.lock().expect("lock").push(index)
            })
            .on_gesture_end({
                let ended = Arc::clone(&ended);
                move || *ended.lock().expect("lock") += 1
            })
            .build()
            .expect("valid chart");
        let size = PlotSize::new(400.0, 240.0);
        let mut tracker = Tracker::new();

        tracker.drag_moved(&chart, size, ScreenPoint::new(MARGIN + 100.0, 0.0));
        tracker.drag_moved(&chart, size, ScreenPoint::new(0.0, 0.0));
        tracker.drag_moved(&chart, size, ScreenPoint::new(MARGIN + 350.0, 0.0));
        tracker.drag_ended(&chart);

        assert_eq!(*seen.lock().expect("lock"), vec![2, 2, 7]);
        assert_eq!(*ended.lock().expect("lock"), 1);
    }

    #[test]
    fn degenerate_scale_is_a_miss() {
        let chart = LineChart::new(vec![0.0, 0.0]).expect("series is valid");
        let mut tracker = Tracker::new();
        let resolved =
            tracker.drag_moved(&chart, PlotSize::new(400.0, 240.0), ScreenPoint::new(20.0, 0.0));
        assert!(resolved.is_none());
        assert!(tracker.is_tracking());
        assert_eq!(tracker.readout().current_index(), 0);
    }
}
