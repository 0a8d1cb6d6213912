use projdash_core::BadgeTone;
use ratatui::style::Color;

use crate::motion::timing::lerp_u8;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Semantic colors
    pub selection: Color,
    pub accent: Color,
    pub link: Color,
    pub error: Color,
    pub info: Color,

    // Status badges
    pub positive: Color,
    pub caution: Color,
    pub negative: Color,
    pub neutral: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::gruvbox::dark()
    }
}

impl Theme {
    /// Badge color for a status tone
    pub fn badge(&self, tone: BadgeTone) -> Color {
        match tone {
            BadgeTone::Positive => self.positive,
            BadgeTone::Caution => self.caution,
            BadgeTone::Negative => self.negative,
            BadgeTone::Neutral => self.neutral,
        }
    }

    /// Fade `color` in from the background: opacity 0.0 is the background itself
    pub fn fade(&self, color: Color, opacity: f64) -> Color {
        if opacity >= 1.0 {
            return color;
        }
        blend(self.bg0, color, opacity)
    }
}

/// Blend two colors; non-RGB colors snap at the halfway point
pub fn blend(from: Color, to: Color, t: f64) -> Color {
    match (from, to) {
        (Color::Rgb(r0, g0, b0), Color::Rgb(r1, g1, b1)) => Color::Rgb(
            lerp_u8(r0, r1, t),
            lerp_u8(g0, g1, t),
            lerp_u8(b0, b1, t),
        ),
        _ => {
            if t < 0.5 {
                from
            } else {
                to
            }
        }
    }
}
