use gpui::{FontWeight, TextRun, Window, font, px};

use crate::render::TextMeasurer;

pub(crate) const FONT_FAMILY: &str = ".SystemUIFont";

pub(crate) fn text_run(len: usize, color: gpui::Hsla, bold: bool) -> TextRun {
    let mut font = font(FONT_FAMILY);
    if bold {
        font.weight = FontWeight::BOLD;
    }
    TextRun {
        len,
        font,
        color,
        background_color: None,
        underline: None,
        strikethrough: None,
    }
}

pub(crate) struct GpuiTextMeasurer<'a> {
    window: &'a Window,
}

impl<'a> GpuiTextMeasurer<'a> {
    pub(crate) fn new(window: &'a Window) -> Self {
        Self { window }
    }
}

impl TextMeasurer for GpuiTextMeasurer<'_> {
    fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        if text.is_empty() {
            return (0.0, 0.0);
        }
        let run = text_run(text.len(), gpui::black(), false);
        let shaped =
            self.window
                .text_system()
                .shape_line(text.to_string().into(), px(size), &[run], None);
        let width = f32::from(shaped.width);
        let height = f32::from(shaped.ascent + shaped.descent);
        (width, height.max(size * 1.2))
    }
}
