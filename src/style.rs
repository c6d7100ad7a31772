//! Chart styles, presets and color scheme selection.

use serde::{Deserialize, Serialize};

use crate::render::{Color, GradientColor};

const ORANGE_START: Color = Color::from_rgb_u32(0xFF782C);
const ORANGE_END: Color = Color::from_rgb_u32(0xEC2301);
const NEON_BLUE: Color = Color::from_rgb_u32(0x7B75FF);
const PURPLE: Color = Color::from_rgb_u32(0x793FF6);
const MIDNIGHT_GREEN: Color = Color::from_rgb_u32(0x36534D);
const MIDNIGHT_YELLOW: Color = Color::from_rgb_u32(0xFFD603);
const MIDNIGHT_MINT: Color = Color::from_rgb_u32(0xD2E5E1);
const SAGE: Color = Color::from_rgb_u32(0x84A094);
const SAGE_DARK: Color = Color::from_rgb_u32(0x50675D);
const LEGEND_GRAY: Color = Color::from_rgb_u32(0x8E8E93);

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Light appearance.
    #[default]
    Light,
    /// Dark appearance.
    Dark,
}

/// Colors for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    /// Plot area background.
    pub background: Color,
    /// First accent color.
    pub accent: Color,
    /// Second accent color, end of the accent gradient.
    pub second_gradient_accent: Color,
    /// Title color.
    pub text: Color,
    /// Legend text and legend label color.
    pub legend_text: Color,
    /// Shadow color used by hosts that draw a card behind the chart.
    pub drop_shadow: Color,
    /// Line gradient; `None` strokes the line with `accent`.
    #[serde(default)]
    pub gradient: Option<GradientColor>,
    /// Colors used in dark mode.
    #[serde(default)]
    pub dark_mode: Option<Box<ChartStyle>>,
}

impl ChartStyle {
    /// Create a style whose line gradient runs between the two accents.
    pub fn new(
        background: Color,
        accent: Color,
        second_gradient_accent: Color,
        text: Color,
        legend_text: Color,
        drop_shadow: Color,
    ) -> Self {
        Self {
            background,
            accent,
            second_gradient_accent,
            text,
            legend_text,
            drop_shadow,
            gradient: Some(GradientColor::new(accent, second_gradient_accent)),
            dark_mode: None,
        }
    }

    /// Attach a dark mode variant.
    pub fn with_dark_mode(mut self, dark: ChartStyle) -> Self {
        self.dark_mode = Some(Box::new(dark));
        self
    }

    /// Replace the line gradient.
    pub fn with_gradient(mut self, gradient: Option<GradientColor>) -> Self {
        self.gradient = gradient;
        self
    }

    /// Line gradient, falling back to a flat accent gradient.
    pub fn line_gradient(&self) -> GradientColor {
        self.gradient.unwrap_or(GradientColor::new(self.accent, self.accent))
    }

    /// Style to read title and legend colors from under `scheme`.
    ///
    /// Dark mode uses the attached variant or [`StylePreset::LineViewDarkMode`].
    pub fn for_scheme(&self, scheme: ColorScheme) -> ChartStyle {
        match scheme {
            ColorScheme::Light => self.clone(),
            ColorScheme::Dark => self
                .dark_mode
                .as_deref()
                .cloned()
                .unwrap_or_else(|| StylePreset::LineViewDarkMode.style()),
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        StylePreset::default().style()
    }
}

/// Built-in style bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylePreset {
    /// White card, orange line.
    #[default]
    LineChartStyleOne,
    /// White card, orange accents.
    BarChartStyleOrangeLight,
    /// Black card, orange accents.
    BarChartStyleOrangeDark,
    /// White card, blue to purple accents.
    BarChartStyleNeonBlueLight,
    /// Black card, blue to purple accents.
    BarChartStyleNeonBlueDark,
    /// White card, sage accents.
    BarChartMidnightGreenLight,
    /// Green card, yellow accents.
    BarChartMidnightGreenDark,
    /// White card, blue to purple accents.
    PieChartStyleOne,
    /// Dark variant used when a style has none.
    LineViewDarkMode,
}

impl StylePreset {
    /// All presets.
    pub const ALL: [StylePreset; 9] = [
        Self::LineChartStyleOne,
        Self::BarChartStyleOrangeLight,
        Self::BarChartStyleOrangeDark,
        Self::BarChartStyleNeonBlueLight,
        Self::BarChartStyleNeonBlueDark,
        Self::BarChartMidnightGreenLight,
        Self::BarChartMidnightGreenDark,
        Self::PieChartStyleOne,
        Self::LineViewDarkMode,
    ];

    /// Build the style for this preset.
    pub fn style(self) -> ChartStyle {
        match self {
            Self::LineChartStyleOne | Self::BarChartStyleOrangeLight => ChartStyle::new(
                Color::WHITE,
                ORANGE_START,
                ORANGE_END,
                Color::BLACK,
                LEGEND_GRAY,
                Color::GRAY,
            ),
            Self::BarChartStyleOrangeDark => ChartStyle::new(
                Color::BLACK,
                ORANGE_START,
                ORANGE_END,
                Color::WHITE,
                LEGEND_GRAY,
                Color::GRAY,
            ),
            Self::BarChartStyleNeonBlueLight | Self::PieChartStyleOne => ChartStyle::new(
                Color::WHITE,
                NEON_BLUE,
                PURPLE,
                Color::BLACK,
                LEGEND_GRAY,
                Color::GRAY,
            ),
            Self::BarChartStyleNeonBlueDark => ChartStyle::new(
                Color::BLACK,
                NEON_BLUE,
                PURPLE,
                Color::WHITE,
                LEGEND_GRAY,
                Color::GRAY,
            ),
            Self::BarChartMidnightGreenLight => ChartStyle::new(
                Color::WHITE,
                SAGE,
                SAGE_DARK,
                Color::BLACK,
                LEGEND_GRAY,
                Color::GRAY,
            ),
            Self::BarChartMidnightGreenDark => ChartStyle::new(
                MIDNIGHT_GREEN,
                MIDNIGHT_YELLOW,
                MIDNIGHT_YELLOW,
                Color::WHITE,
                MIDNIGHT_MINT,
                Color::GRAY,
            ),
            Self::LineViewDarkMode => ChartStyle::new(
                Color::BLACK,
                ORANGE_START,
                ORANGE_END,
                Color::WHITE,
                Color::WHITE,
                Color::GRAY,
            ),
        }
    }
}

impl From<StylePreset> for ChartStyle {
    fn from(preset: StylePreset) -> Self {
        preset.style()
    }
}
