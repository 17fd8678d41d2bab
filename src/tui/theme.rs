//! Catppuccin colors for the questionnaire. Only the swatches the views and
//! the renderer actually paint with are carried.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    /// Dark theme
    #[default]
    Mocha,
    /// Light theme
    Latte,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub red: Color,
    pub peach: Color,
    pub yellow: Color,
    pub green: Color,
    pub teal: Color,
    pub sky: Color,
    pub blue: Color,
    pub lavender: Color,
    pub mauve: Color,
    pub text: Color,
    pub subtext0: Color,
    pub overlay1: Color,
    pub surface1: Color,
    pub surface0: Color,
    pub base: Color,
}

/// Swatches in `Theme` field order, as 0xRRGGBB
type Palette = [u32; 15];

const MOCHA: Palette = [
    0xf38ba8, 0xfab387, 0xf9e2af, 0xa6e3a1, 0x94e2d5, 0x89dceb, 0x89b4fa, 0xb4befe,
    0xcba6f7, 0xcdd6f4, 0xa6adc8, 0x7f849c, 0x45475a, 0x313244, 0x1e1e2e,
];

const LATTE: Palette = [
    0xd20f39, 0xfe640b, 0xdf8e1d, 0x40a02b, 0x179299, 0x04a5e5, 0x1e66f5, 0x7287fd,
    0x8839ef, 0x4c4f69, 0x6c6f85, 0x8c8fa1, 0xbcc0cc, 0xccd0da, 0xeff1f5,
];

impl Theme {
    pub fn new(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Mocha => Self::from_palette(&MOCHA),
            ThemeVariant::Latte => Self::from_palette(&LATTE),
        }
    }

    fn from_palette(palette: &Palette) -> Self {
        let [red, peach, yellow, green, teal, sky, blue, lavender, mauve, text, subtext0, overlay1, surface1, surface0, base] =
            palette.map(Color::from_u32);

        Self {
            red,
            peach,
            yellow,
            green,
            teal,
            sky,
            blue,
            lavender,
            mauve,
            text,
            subtext0,
            overlay1,
            surface1,
            surface0,
            base,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_use_their_own_palette() {
        let mocha = Theme::new(ThemeVariant::Mocha);
        let latte = Theme::new(ThemeVariant::Latte);

        assert_eq!(mocha.base, Color::Rgb(0x1e, 0x1e, 0x2e));
        assert_eq!(latte.base, Color::Rgb(0xef, 0xf1, 0xf5));
        assert_eq!(Theme::default().red, mocha.red);
    }

    #[test]
    fn variant_names_are_lowercase_in_toml() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            theme: ThemeVariant,
        }

        let text = toml::to_string(&Wrapper { theme: ThemeVariant::Latte }).unwrap();
        assert_eq!(text.trim(), "theme = \"latte\"");
        let parsed: Wrapper = toml::from_str("theme = \"mocha\"").unwrap();
        assert_eq!(parsed.theme, ThemeVariant::Mocha);
    }
}
