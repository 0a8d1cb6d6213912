//! One Dark theme
//! https://github.com/atom/atom/tree/master/packages/one-dark-syntax

use ratatui::style::Color;
use crate::theme::Theme;

/// One Dark default theme
pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2c, 0x34),
        bg1: Color::Rgb(0x21, 0x25, 0x2b),
        bg2: Color::Rgb(0x3e, 0x44, 0x51),
        fg0: Color::Rgb(0xab, 0xb2, 0xbf),
        fg1: Color::Rgb(0xc8, 0xcc, 0xd4),
        grey0: Color::Rgb(0x5c, 0x63, 0x70),
        grey1: Color::Rgb(0x4b, 0x52, 0x63),
        grey2: Color::Rgb(0x7f, 0x84, 0x8e),
        selection: Color::Rgb(0x3e, 0x44, 0x51),
        accent: Color::Rgb(0x61, 0xaf, 0xef), // blue
        link: Color::Rgb(0x56, 0xb6, 0xc2),   // cyan
        error: Color::Rgb(0xe0, 0x6c, 0x75),
        info: Color::Rgb(0x61, 0xaf, 0xef),
        positive: Color::Rgb(0x98, 0xc3, 0x79), // green
        caution: Color::Rgb(0xe5, 0xc0, 0x7b),  // yellow
        negative: Color::Rgb(0xe0, 0x6c, 0x75), // red
        neutral: Color::Rgb(0x5c, 0x63, 0x70),
    }
}
