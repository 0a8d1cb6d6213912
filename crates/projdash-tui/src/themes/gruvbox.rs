//! Gruvbox Material theme
//! https://github.com/sainnhe/gruvbox-material

use ratatui::style::Color;
use crate::theme::Theme;

/// Gruvbox Material dark
pub fn dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x32, 0x30, 0x2f),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        grey0: Color::Rgb(0x7c, 0x6f, 0x64),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        grey2: Color::Rgb(0xa8, 0x99, 0x84),
        selection: Color::Rgb(0x45, 0x40, 0x3d),
        accent: Color::Rgb(0x89, 0xb4, 0x82), // aqua
        link: Color::Rgb(0x7d, 0xae, 0xa3),   // blue
        error: Color::Rgb(0xea, 0x69, 0x62),
        info: Color::Rgb(0x7d, 0xae, 0xa3),
        positive: Color::Rgb(0xa9, 0xb6, 0x65), // green
        caution: Color::Rgb(0xd8, 0xa6, 0x57),  // yellow
        negative: Color::Rgb(0xea, 0x69, 0x62), // red
        neutral: Color::Rgb(0x92, 0x83, 0x74),  // grey1
    }
}

/// Gruvbox Material light
pub fn light() -> Theme {
    Theme {
        bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
        bg1: Color::Rgb(0xf4, 0xe8, 0xbe),
        bg2: Color::Rgb(0xf2, 0xe5, 0xbc),
        fg0: Color::Rgb(0x65, 0x47, 0x35),
        fg1: Color::Rgb(0x4f, 0x38, 0x29),
        grey0: Color::Rgb(0xa8, 0x99, 0x84),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        grey2: Color::Rgb(0x7c, 0x6f, 0x64),
        selection: Color::Rgb(0xeb, 0xdb, 0xb2),
        accent: Color::Rgb(0x4c, 0x7a, 0x5d),
        link: Color::Rgb(0x45, 0x70, 0x7a),
        error: Color::Rgb(0xc1, 0x4a, 0x4a),
        info: Color::Rgb(0x45, 0x70, 0x7a),
        positive: Color::Rgb(0x6c, 0x78, 0x2e),
        caution: Color::Rgb(0xb4, 0x71, 0x09),
        negative: Color::Rgb(0xc1, 0x4a, 0x4a),
        neutral: Color::Rgb(0x92, 0x83, 0x74),
    }
}
