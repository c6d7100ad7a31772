use crate::render::SceneOptions;
use crate::style::ColorScheme;

/// Configuration for the GPUI line chart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChartViewConfig {
    /// Appearance used for title and legend text.
    pub color_scheme: ColorScheme,
    /// Show the legend overlay.
    pub show_legend: bool,
    /// Fill the area under the line with the style gradient.
    pub show_area_fill: bool,
    /// Show the indicator and magnifier while dragging.
    pub show_magnifier: bool,
}

impl Default for LineChartViewConfig {
    fn default() -> Self {
        let scene = SceneOptions::default();
        Self {
            color_scheme: scene.color_scheme,
            show_legend: scene.show_legend,
            show_area_fill: scene.show_area_fill,
            show_magnifier: scene.show_magnifier,
        }
    }
}

impl LineChartViewConfig {
    pub(crate) fn scene_options(&self) -> SceneOptions {
        SceneOptions {
            color_scheme: self.color_scheme,
            show_legend: self.show_legend,
            show_area_fill: self.show_area_fill,
            show_magnifier: self.show_magnifier,
        }
    }
}
