use gpui::prelude::*;
use gpui::{AppContext, Application, Bounds, Entity, WindowBounds, WindowOptions, div, px, size};

use gpui_linechart::{GpuiLineChartView, LineChart, SampleReadout, StylePreset, TrackingPhase};

struct LineViewDemo {
    chart: Entity<GpuiLineChartView>,
    readout: SampleReadout,
}

impl gpui::Render for LineViewDemo {
    fn render(
        &mut self,
        _window: &mut gpui::Window,
        _cx: &mut gpui::Context<Self>,
    ) -> impl gpui::IntoElement {
        let snapshot = self.readout.snapshot();
        let status = if snapshot.phase == TrackingPhase::Tracking {
            format!(
                "sample {} = {}",
                snapshot.current_index, snapshot.current_value
            )
        } else {
            "drag across the chart".to_string()
        };

        div()
            .size_full()
            .flex()
            .flex_col()
            .p_4()
            .bg(gpui::white())
            .child(div().h(px(360.0)).child(self.chart.clone()))
            .child(div().text_color(gpui::black()).child(status))
    }
}

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(480.0), px(480.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let chart = LineChart::builder([8.0, 23.0, 54.0, 32.0, 12.0, 37.0, 7.0, 23.0, 43.0])
                .title("Full chart")
                .legend("Weekly")
                .style(StylePreset::LineChartStyleOne)
                .on_value_change(|index| tracing::debug!(index, "value changed"))
                .build()
                .expect("demo samples are valid");

            let readout = SampleReadout::new();
            let view = GpuiLineChartView::new(chart).with_readout(readout.clone());
            let chart = cx.new(|_| view);

            cx.new(|cx| {
                cx.observe(&chart, |_, _, cx| cx.notify()).detach();
                LineViewDemo { chart, readout }
            })
        })
        .unwrap();
    });
}
