use ratatui::style::Color;

use crate::domain::Theme;

/// Resolved colors for one theme. Render functions take this instead of
/// reading any global styling state.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight: Color,
    pub error: Color,
    pub series_a: Color,
    pub series_b: Color,
    pub prediction: Color,
}

pub const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            accent: Color::Cyan,
            text: Color::White,
            dim: Color::Gray,
            highlight: Color::Yellow,
            error: Color::Red,
            series_a: Color::LightBlue,
            series_b: Color::LightGreen,
            prediction: Color::LightMagenta,
        },
        Theme::Light => Palette {
            accent: Color::Blue,
            text: Color::Black,
            dim: Color::DarkGray,
            highlight: Color::Magenta,
            error: Color::Red,
            series_a: Color::Blue,
            series_b: Color::Green,
            prediction: Color::Magenta,
        },
    }
}

/// Sequential scale of the choropleth, light to dark, nine steps.
pub const CHOROPLETH_SCALE: [Color; 9] = [
    Color::Rgb(255, 255, 204),
    Color::Rgb(255, 237, 160),
    Color::Rgb(254, 217, 118),
    Color::Rgb(254, 178, 76),
    Color::Rgb(253, 141, 60),
    Color::Rgb(252, 78, 42),
    Color::Rgb(227, 26, 28),
    Color::Rgb(189, 0, 38),
    Color::Rgb(128, 0, 38),
];

/// Features without a value render neutral gray.
pub const CHOROPLETH_NEUTRAL: Color = Color::Rgb(224, 224, 224);

/// Colors cycled by donut slices and grouped bars.
pub const CATEGORICAL: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightYellow,
];
