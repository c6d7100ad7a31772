use gpui::{
    App, Background, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels,
    Window, linear_color_stop, linear_gradient, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{Color, LineStyle, Paint, RectStyle, RenderCommand, RenderList, TextStyle};

use super::text::text_run;

pub(crate) fn paint_render_list(render: &RenderList, window: &mut Window, cx: &mut App) {
    let mut clip_stack: Vec<ContentMask<Pixels>> = Vec::new();
    for command in render.commands() {
        match command {
            RenderCommand::ClipRect(rect) => {
                clip_stack.push(ContentMask {
                    bounds: to_bounds(*rect),
                });
            }
            RenderCommand::ClipEnd => {
                clip_stack.pop();
            }
            RenderCommand::Polyline { points, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_polyline(window, points, *style);
                });
            }
            RenderCommand::Polygon { points, paint } => {
                with_clip(window, &clip_stack, |window| {
                    paint_polygon(window, points, *paint);
                });
            }
            RenderCommand::Rect { rect, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_rect(window, *rect, *style);
                });
            }
            RenderCommand::Circle {
                center,
                radius,
                fill,
                stroke,
                stroke_width,
            } => {
                with_clip(window, &clip_stack, |window| {
                    paint_circle(window, *center, *radius, *fill, *stroke, *stroke_width);
                });
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                with_clip(window, &clip_stack, |window| {
                    paint_text(window, cx, *position, text, style);
                });
            }
        }
    }
}

fn paint_polyline(window: &mut Window, points: &[ScreenPoint], style: LineStyle) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    let width = style.width.max(0.5);
    let mut builder = PathBuilder::stroke(px(width));
    builder.move_to(to_point(*first));
    for pt in rest {
        builder.line_to(to_point(*pt));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_background(style.paint));
    }
}

fn paint_polygon(window: &mut Window, points: &[ScreenPoint], paint: Paint) {
    if points.len() < 3 {
        return;
    }
    let mut builder = PathBuilder::fill();
    builder.move_to(to_point(points[0]));
    for pt in &points[1..] {
        builder.line_to(to_point(*pt));
    }
    builder.close();
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_background(paint));
    }
}

fn paint_rect(window: &mut Window, rect: ScreenRect, style: RectStyle) {
    window.paint_quad(quad(
        to_bounds(rect),
        Corners::all(px(style.corner_radius)),
        to_hsla(style.fill),
        Edges::all(px(style.stroke_width)),
        to_hsla(style.stroke),
        BorderStyle::default(),
    ));
}

fn paint_circle(
    window: &mut Window,
    center: ScreenPoint,
    radius: f32,
    fill: Color,
    stroke: Color,
    stroke_width: f32,
) {
    let bounds = Bounds::from_corners(
        point(px(center.x - radius), px(center.y - radius)),
        point(px(center.x + radius), px(center.y + radius)),
    );
    window.paint_quad(quad(
        bounds,
        Corners::all(px(radius)),
        to_hsla(fill),
        Edges::all(px(stroke_width)),
        to_hsla(stroke),
        BorderStyle::default(),
    ));
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
) {
    if text.is_empty() {
        return;
    }
    let run = text_run(text.len(), to_hsla(style.color), style.bold);
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let _ = shaped.paint(to_point(position), line_height, window, cx);
}

fn to_background(paint: Paint) -> Background {
    match paint {
        Paint::Solid(color) => to_hsla(color).into(),
        Paint::Linear { gradient, angle } => linear_gradient(
            angle,
            linear_color_stop(to_hsla(gradient.start), 0.0),
            linear_color_stop(to_hsla(gradient.end), 1.0),
        ),
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_point(pt: ScreenPoint) -> gpui::Point<Pixels> {
    point(px(pt.x), px(pt.y))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(to_point(rect.min), to_point(rect.max))
}

fn with_clip(window: &mut Window, stack: &[ContentMask<Pixels>], f: impl FnOnce(&mut Window)) {
    if let Some(mask) = stack.last() {
        window.with_content_mask(Some(mask.clone()), f);
    } else {
        f(window);
    }
}
