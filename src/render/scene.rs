//! Frame composition for a line chart.
//!
//! [`build_scene`] lays out the header, chart area and plot area inside the
//! given bounds and emits the render commands for one frame. It also returns
//! the rectangles and transform the backend needs to route pointer events
//! back into the [`Tracker`].

use tracing::debug;

use crate::chart::LineChart;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::interaction::{TrackingPhase, Tracker};
use crate::style::ColorScheme;
use crate::transform::SampleTransform;

use super::{
    Color, GradientColor, LineStyle, Paint, RectStyle, RenderCommand, RenderList, TextStyle,
    build_area_polygon, build_line_path,
};

const INVALID_SCALE_MESSAGE: &str = "Invalid value range";
const AREA_ALPHA_TOP: f32 = 0.4;
const GUIDE_ALPHA: f32 = 0.3;
const MAGNIFIER_PADDING: f32 = 6.0;

/// Measures text extents for layout.
pub trait TextMeasurer {
    /// Return the `(width, height)` of `text` at font `size`.
    fn measure(&self, text: &str, size: f32) -> (f32, f32);
}

/// Presentation toggles for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    /// Appearance used for title and legend text.
    pub color_scheme: ColorScheme,
    /// Draw legend guide lines and labels.
    pub show_legend: bool,
    /// Fill the area under the line.
    pub show_area_fill: bool,
    /// Draw the indicator and magnifier while tracking.
    pub show_magnifier: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Light,
            show_legend: true,
            show_area_fill: false,
            show_magnifier: true,
        }
    }
}

/// Output of [`build_scene`].
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Commands to paint.
    pub render: RenderList,
    /// Area that receives drag gestures; pointer locations are relative to it.
    pub chart_rect: Option<ScreenRect>,
    /// Area the samples are spread across.
    pub plot_rect: Option<ScreenRect>,
    /// Sample transform for `plot_rect`, if the series has a scale.
    pub transform: Option<SampleTransform>,
}

/// Compose one frame of `chart` inside `bounds`.
pub fn build_scene(
    chart: &LineChart,
    tracker: &Tracker,
    options: &SceneOptions,
    bounds: ScreenRect,
    measurer: &dyn TextMeasurer,
) -> Scene {
    let mut scene = Scene::default();
    if !bounds.is_valid() {
        return scene;
    }

    let layout = chart.layout();
    let style = chart.style();
    let text_style = style.for_scheme(options.color_scheme);

    let mut cursor_y = bounds.min.y;
    if let Some(title) = chart.title() {
        cursor_y += push_centered_text(
            &mut scene.render,
            measurer,
            title,
            bounds,
            cursor_y,
            TextStyle {
                color: text_style.text,
                size: layout.title_size,
                bold: true,
            },
        );
    }
    if let Some(legend) = chart.legend() {
        cursor_y += push_centered_text(
            &mut scene.render,
            measurer,
            legend,
            bounds,
            cursor_y,
            TextStyle {
                color: text_style.legend_text,
                size: layout.legend_size,
                bold: false,
            },
        );
    }

    let chart_height = layout.chart_height.min(bounds.max.y - cursor_y);
    if chart_height <= 0.0 || bounds.width() <= layout.gutter {
        return scene;
    }
    let chart_rect = ScreenRect::new(
        ScreenPoint::new(bounds.min.x, cursor_y),
        ScreenPoint::new(bounds.max.x, cursor_y + chart_height),
    );
    let plot_rect = ScreenRect::new(
        ScreenPoint::new(chart_rect.min.x + layout.gutter, chart_rect.min.y),
        chart_rect.max,
    );
    scene.chart_rect = Some(chart_rect);
    scene.plot_rect = Some(plot_rect);

    scene.render.push(RenderCommand::Rect {
        rect: chart_rect,
        style: RectStyle {
            fill: style.background,
            ..RectStyle::default()
        },
    });

    let transform = match chart.transform(plot_rect.size()) {
        Ok(transform) => transform,
        Err(err) => {
            debug!(%err, "skipping line");
            push_centered_text(
                &mut scene.render,
                measurer,
                INVALID_SCALE_MESSAGE,
                chart_rect,
                chart_rect.min.y + (chart_rect.height() - layout.legend_size) * 0.5,
                TextStyle {
                    color: text_style.legend_text,
                    size: layout.legend_size,
                    bold: false,
                },
            );
            return scene;
        }
    };
    scene.transform = Some(transform);

    scene.render.push(RenderCommand::ClipRect(chart_rect));
    if options.show_legend {
        build_legend(&mut scene.render, chart, &transform, chart_rect, plot_rect, measurer);
    }

    let line = build_line_path(chart.series(), &transform, plot_rect);
    let gradient = style.line_gradient();
    if options.show_area_fill {
        scene.render.push(RenderCommand::Polygon {
            points: build_area_polygon(&line, plot_rect),
            paint: Paint::Linear {
                gradient: GradientColor::new(
                    gradient.start.with_alpha(AREA_ALPHA_TOP),
                    gradient.end.with_alpha(0.0),
                ),
                angle: 180.0,
            },
        });
    }
    scene.render.push(RenderCommand::Polyline {
        points: line,
        style: LineStyle {
            paint: Paint::Linear {
                gradient,
                angle: 90.0,
            },
            width: layout.line_width,
        },
    });

    if options.show_magnifier {
        build_magnifier(&mut scene.render, chart, tracker, chart_rect, plot_rect, measurer);
    }
    scene.render.push(RenderCommand::ClipEnd);

    scene
}

fn push_centered_text(
    render: &mut RenderList,
    measurer: &dyn TextMeasurer,
    text: &str,
    area: ScreenRect,
    top: f32,
    style: TextStyle,
) -> f32 {
    let (width, height) = measurer.measure(text, style.size);
    let x = area.min.x + ((area.width() - width) * 0.5).max(0.0);
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(x, top),
        text: text.to_string(),
        style,
    });
    height
}

/// Values for the legend guide lines, evenly spaced from min to max.
pub(crate) fn legend_values(min: f64, max: f64, lines: usize) -> Vec<f64> {
    match lines {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (lines - 1) as f64;
            (0..lines).map(|i| min + step * i as f64).collect()
        }
    }
}

fn build_legend(
    render: &mut RenderList,
    chart: &LineChart,
    transform: &SampleTransform,
    chart_rect: ScreenRect,
    plot_rect: ScreenRect,
    measurer: &dyn TextMeasurer,
) {
    let layout = chart.layout();
    let color = chart.style().legend_text;
    let series = chart.series();
    for value in legend_values(series.min(), series.max(), layout.legend_lines) {
        let y = plot_rect.max.y - transform.y_for_value(value);
        render.push(RenderCommand::Polyline {
            points: vec![
                ScreenPoint::new(plot_rect.min.x, y),
                ScreenPoint::new(plot_rect.max.x, y),
            ],
            style: LineStyle {
                paint: Paint::Solid(color.with_alpha(GUIDE_ALPHA)),
                width: 1.0,
            },
        });
        let label = chart.value_format().format(value);
        let (_, height) = measurer.measure(&label, layout.label_size);
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(chart_rect.min.x, y - height * 0.5),
            text: label,
            style: TextStyle {
                color,
                size: layout.label_size,
                bold: false,
            },
        });
    }
}

fn build_magnifier(
    render: &mut RenderList,
    chart: &LineChart,
    tracker: &Tracker,
    chart_rect: ScreenRect,
    plot_rect: ScreenRect,
    measurer: &dyn TextMeasurer,
) {
    let readout = tracker.readout().snapshot();
    if readout.phase != TrackingPhase::Tracking || readout.opacity <= 0.0 {
        return;
    }
    let layout = chart.layout();
    let style = chart.style();

    let anchor_x = match tracker.closest() {
        Some(resolved) => {
            let center = plot_rect.plot_to_screen(resolved.position);
            render.push(RenderCommand::Circle {
                center,
                radius: layout.indicator_radius,
                fill: Color::WHITE.with_alpha(readout.opacity),
                stroke: style.accent.with_alpha(readout.opacity),
                stroke_width: layout.indicator_radius * 0.5,
            });
            center.x
        }
        None => plot_rect.min.x + tracker.indicator().x,
    };

    let text = chart.value_format().format(readout.current_value);
    let (width, height) = measurer.measure(&text, layout.magnifier_size);
    let box_width = width + MAGNIFIER_PADDING * 2.0;
    let box_height = height + MAGNIFIER_PADDING * 2.0;
    let left = (anchor_x - box_width * 0.5)
        .max(chart_rect.min.x)
        .min(chart_rect.max.x - box_width);
    let top = chart_rect.min.y + layout.magnifier_top;
    render.push(RenderCommand::Rect {
        rect: ScreenRect::new(
            ScreenPoint::new(left, top),
            ScreenPoint::new(left + box_width, top + box_height),
        ),
        style: RectStyle {
            fill: style.accent.with_alpha(readout.opacity),
            corner_radius: MAGNIFIER_PADDING,
            ..RectStyle::default()
        },
    });
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(left + MAGNIFIER_PADDING, top + MAGNIFIER_PADDING),
        text,
        style: TextStyle {
            color: Color::WHITE.with_alpha(readout.opacity),
            size: layout.magnifier_size,
            bold: true,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::PlotSize;
    use crate::style::StylePreset;

    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, text: &str, size: f32) -> (f32, f32) {
            (text.chars().count() as f32 * size * 0.5, size)
        }
    }

    const SAMPLES: [f64; 9] = [8.0, 23.0, 54.0, 32.0, 12.0, 37.0, 7.0, 23.0, 43.0];

    fn bounds() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(430.0, 400.0))
    }

    fn texts(scene: &Scene) -> Vec<&str> {
        scene
            .render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn header_pushes_chart_area_down() {
        let chart = LineChart::builder(SAMPLES)
            .title("Full chart")
            .legend("Visitors")
            .build()
            .expect("valid chart");
        let scene = build_scene(
            &chart,
            &Tracker::new(),
            &SceneOptions::default(),
            bounds(),
            &FixedMeasurer,
        );
        let chart_rect = scene.chart_rect.expect("chart area");
        assert_eq!(chart_rect.min.y, 18.0 + 14.0);
        assert_eq!(chart_rect.height(), 240.0);
        let plot_rect = scene.plot_rect.expect("plot area");
        assert_eq!(plot_rect.size(), PlotSize::new(400.0, 240.0));
        assert_eq!(&texts(&scene)[..2], &["Full chart", "Visitors"]);

        let title_style = scene.render.commands().iter().find_map(|command| match command {
            RenderCommand::Text { text, style, .. } if text == "Full chart" => Some(style.clone()),
            _ => None,
        });
        let title_style = title_style.expect("title text");
        assert!(title_style.bold);
        assert_eq!(title_style.color, Color::BLACK);
    }

    #[test]
    fn dark_scheme_recolors_header_only() {
        let chart = LineChart::builder(SAMPLES)
            .title("Full chart")
            .build()
            .expect("valid chart");
        let options = SceneOptions {
            color_scheme: ColorScheme::Dark,
            ..SceneOptions::default()
        };
        let scene = build_scene(&chart, &Tracker::new(), &options, bounds(), &FixedMeasurer);
        let commands = scene.render.commands();
        assert!(matches!(
            &commands[0],
            RenderCommand::Text { style, .. } if style.color == Color::WHITE
        ));
        assert!(matches!(
            &commands[1],
            RenderCommand::Rect { style, .. } if style.fill == StylePreset::LineChartStyleOne.style().background
        ));
    }

    #[test]
    fn line_spans_plot_area() {
        let chart = LineChart::new(SAMPLES.to_vec()).expect("valid chart");
        let options = SceneOptions {
            show_legend: false,
            ..SceneOptions::default()
        };
        let scene = build_scene(&chart, &Tracker::new(), &options, bounds(), &FixedMeasurer);
        let line = scene
            .render
            .commands()
            .iter()
            .find_map(|command| match command {
                RenderCommand::Polyline { points, .. } => Some(points.clone()),
                _ => None,
            })
            .expect("line");
        assert_eq!(line.len(), 9);
        assert_eq!(line[0].x, 30.0);
        assert_eq!(line[8].x, 430.0);
        assert!(texts(&scene).is_empty());
    }

    #[test]
    fn legend_lines_cover_range() {
        assert_eq!(legend_values(0.0, 40.0, 5), vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        assert_eq!(legend_values(3.0, 9.0, 1), vec![3.0]);
        assert!(legend_values(3.0, 9.0, 0).is_empty());

        let chart = LineChart::new(vec![0.0, 40.0, 20.0]).expect("valid chart");
        let scene = build_scene(
            &chart,
            &Tracker::new(),
            &SceneOptions::default(),
            bounds(),
            &FixedMeasurer,
        );
        assert_eq!(texts(&scene), vec!["0.0", "10.0", "20.0", "30.0", "40.0"]);
    }

    #[test]
    fn area_fill_is_optional() {
        let chart = LineChart::new(SAMPLES.to_vec()).expect("valid chart");
        let has_polygon = |scene: &Scene| {
            scene
                .render
                .commands()
                .iter()
                .any(|command| matches!(command, RenderCommand::Polygon { .. }))
        };
        let plain = build_scene(
            &chart,
            &Tracker::new(),
            &SceneOptions::default(),
            bounds(),
            &FixedMeasurer,
        );
        assert!(!has_polygon(&plain));
        let filled = build_scene(
            &chart,
            &Tracker::new(),
            &SceneOptions {
                show_area_fill: true,
                ..SceneOptions::default()
            },
            bounds(),
            &FixedMeasurer,
        );
        assert!(has_polygon(&filled));
    }

    #[test]
    fn magnifier_follows_tracking() {
        let chart = LineChart::new(SAMPLES.to_vec()).expect("valid chart");
        let options = SceneOptions {
            show_legend: false,
            ..SceneOptions::default()
        };
        let mut tracker = Tracker::new();
        let idle = build_scene(&chart, &tracker, &options, bounds(), &FixedMeasurer);
        assert!(texts(&idle).is_empty());

        let plot = idle.plot_rect.expect("plot area");
        tracker.drag_moved(&chart, plot.size(), ScreenPoint::new(15.0 + 200.0, 50.0));
        let tracking = build_scene(&chart, &tracker, &options, bounds(), &FixedMeasurer);
        assert_eq!(texts(&tracking), vec!["12.0"]);
        let marker = tracking
            .render
            .commands()
            .iter()
            .find_map(|command| match command {
                RenderCommand::Circle { center, .. } => Some(*center),
                _ => None,
            })
            .expect("indicator marker");
        assert_eq!(marker.x, 230.0);

        tracker.drag_ended(&chart);
        let ended = build_scene(&chart, &tracker, &options, bounds(), &FixedMeasurer);
        assert!(texts(&ended).is_empty());
    }

    #[test]
    fn degenerate_scale_renders_message() {
        let chart = LineChart::new(vec![0.0, 0.0]).expect("valid chart");
        let scene = build_scene(
            &chart,
            &Tracker::new(),
            &SceneOptions::default(),
            bounds(),
            &FixedMeasurer,
        );
        assert!(scene.transform.is_none());
        assert!(scene.plot_rect.is_some());
        assert_eq!(texts(&scene), vec![INVALID_SCALE_MESSAGE]);
        assert!(
            !scene
                .render
                .commands()
                .iter()
                .any(|command| matches!(command, RenderCommand::Polyline { .. }))
        );
    }

    #[test]
    fn empty_bounds_render_nothing() {
        let chart = LineChart::new(SAMPLES.to_vec()).expect("valid chart");
        let bounds = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 0.0));
        let scene = build_scene(
            &chart,
            &Tracker::new(),
            &SceneOptions::default(),
            bounds,
            &FixedMeasurer,
        );
        assert!(scene.render.is_empty());
        assert!(scene.chart_rect.is_none());
    }
}
