use std::sync::Arc;

use gpui::prelude::*;
use gpui::{
    MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, Window, canvas, div,
};
use parking_lot::RwLock;
use tracing::trace;

use crate::chart::LineChart;
use crate::geom::{PlotSize, ScreenPoint, ScreenRect};
use crate::interaction::{SampleReadout, Tracker};
use crate::render::build_scene;

use super::config::LineChartViewConfig;
use super::paint::paint_render_list;
use super::state::ChartUiState;
use super::text::GpuiTextMeasurer;

/// A GPUI view that renders a [`LineChart`] with a drag-to-inspect magnifier.
///
/// Pressing the left button over the chart area starts tracking; moving with
/// the button held updates the current sample; releasing it ends tracking.
#[derive(Clone)]
pub struct GpuiLineChartView {
    chart: Arc<LineChart>,
    state: Arc<RwLock<ChartUiState>>,
    readout: SampleReadout,
    config: LineChartViewConfig,
}

impl GpuiLineChartView {
    /// Create a new view for the given chart.
    ///
    /// Uses the default [`LineChartViewConfig`].
    pub fn new(chart: LineChart) -> Self {
        Self::with_config(chart, LineChartViewConfig::default())
    }

    /// Create a new view with a custom configuration.
    pub fn with_config(chart: LineChart, config: LineChartViewConfig) -> Self {
        let state = ChartUiState::default();
        Self {
            chart: Arc::new(chart),
            readout: state.tracker.readout().clone(),
            state: Arc::new(RwLock::new(state)),
            config,
        }
    }

    /// Publish the current sample into an existing readout.
    ///
    /// Use this to share one readout between the chart and a sibling view.
    pub fn with_readout(mut self, readout: SampleReadout) -> Self {
        *self.state.write() = ChartUiState::with_readout(readout.clone());
        self.readout = readout;
        self
    }

    /// Access the chart.
    pub fn chart(&self) -> &LineChart {
        &self.chart
    }

    /// Access the view configuration.
    pub fn config(&self) -> LineChartViewConfig {
        self.config
    }

    /// Get a handle to the current sample readout.
    ///
    /// Safe to call from the chart's callbacks.
    pub fn readout(&self) -> SampleReadout {
        self.readout.clone()
    }

    /// Run `f` on a copy of the tracker and store it back.
    ///
    /// The UI state stays unlocked while `f` runs so chart callbacks can
    /// reach back into this view.
    fn with_tracker<R>(&self, f: impl FnOnce(&mut Tracker) -> R) -> R {
        let mut tracker = self.state.read().tracker.clone();
        let result = f(&mut tracker);
        self.state.write().tracker = tracker;
        result
    }

    /// Chart-local pointer position and plot size, if `pos` hits the chart.
    fn locate(&self, pos: ScreenPoint, require_hit: bool) -> Option<(ScreenPoint, PlotSize)> {
        let state = self.state.read();
        if require_hit && !state.hit(pos) {
            return None;
        }
        Some((state.chart_local(pos)?, state.plot_rect?.size()))
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let Some((local, plot_size)) = self.locate(screen_point(ev.position), true) else {
            return;
        };
        self.with_tracker(|tracker| tracker.drag_moved(&self.chart, plot_size, local));
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        if !self.readout.is_tracking() {
            return;
        }
        if ev.pressed_button != Some(MouseButton::Left) {
            trace!("button released outside the chart");
            self.with_tracker(|tracker| tracker.drag_ended(&self.chart));
            cx.notify();
            return;
        }
        let Some((local, plot_size)) = self.locate(screen_point(ev.position), false) else {
            return;
        };
        self.with_tracker(|tracker| tracker.drag_moved(&self.chart, plot_size, local));
        cx.notify();
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        if !self.readout.is_tracking() {
            return;
        }
        self.with_tracker(|tracker| tracker.drag_ended(&self.chart));
        cx.notify();
    }
}

impl Render for GpuiLineChartView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let chart = Arc::clone(&self.chart);
        let state = Arc::clone(&self.state);
        let options = self.config.scene_options();

        div()
            .size_full()
            .child(
                canvas(
                    move |bounds, window, _| {
                        let mut state = state.write();
                        let measurer = GpuiTextMeasurer::new(window);
                        let scene = build_scene(
                            &chart,
                            &state.tracker,
                            &options,
                            screen_rect(bounds.origin, bounds.size.width, bounds.size.height),
                            &measurer,
                        );
                        state.chart_rect = scene.chart_rect;
                        state.plot_rect = scene.plot_rect;
                        scene.render
                    },
                    move |_, render, window, cx| {
                        paint_render_list(&render, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}

fn screen_rect(origin: Point<Pixels>, width: Pixels, height: Pixels) -> ScreenRect {
    let min = screen_point(origin);
    ScreenRect::new(
        min,
        ScreenPoint::new(min.x + f32::from(width), min.y + f32::from(height)),
    )
}
