//! Theme presets for spark-folio.
//!
//! - portfolio (default - dark page, blue and purple accents)
//! - light

use super::Theme;
use crate::types::Rgba;

/// Names accepted by [`get_preset`].
pub const PRESET_NAMES: [&str; 2] = ["portfolio", "light"];

// =============================================================================
// Portfolio Theme (Default)
// =============================================================================

/// Dark page with a blue primary and a purple secondary accent.
pub fn portfolio() -> Theme {
    Theme {
        name: "portfolio",
        description: "Dark portfolio theme",
        primary: Rgba::rgb(0x3B, 0x82, 0xF6),   // blue-500
        secondary: Rgba::rgb(0xA8, 0x55, 0xF7), // purple-500
        text: Rgba::rgb(0xE5, 0xE7, 0xEB),
        text_muted: Rgba::rgb(0x9C, 0xA3, 0xAF),
        background: Rgba::rgb(0x0B, 0x0F, 0x19),
        surface: Rgba::rgb(0x16, 0x1B, 0x29),
        border: Rgba::rgb(0x2A, 0x31, 0x42),
        highlight: Rgba::rgb(0x60, 0xA5, 0xFA), // blue-400
    }
}

// =============================================================================
// Light Theme
// =============================================================================

pub fn light() -> Theme {
    Theme {
        name: "light",
        description: "Light portfolio theme",
        primary: Rgba::rgb(0x25, 0x63, 0xEB),
        secondary: Rgba::rgb(0x93, 0x33, 0xEA),
        text: Rgba::rgb(0x11, 0x18, 0x27),
        text_muted: Rgba::rgb(0x4B, 0x55, 0x63),
        background: Rgba::rgb(0xFA, 0xFA, 0xFA),
        surface: Rgba::rgb(0xEE, 0xF0, 0xF4),
        border: Rgba::rgb(0xD1, 0xD5, 0xDB),
        highlight: Rgba::rgb(0x3B, 0x82, 0xF6),
    }
}

/// Look up a preset by name (case-insensitive).
pub fn get_preset(name: &str) -> Option<Theme> {
    match name.to_ascii_lowercase().as_str() {
        "portfolio" | "dark" => Some(portfolio()),
        "light" => Some(light()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_preset_resolves() {
        for name in PRESET_NAMES {
            assert_eq!(get_preset(name).map(|t| t.name), Some(name));
        }
        assert_eq!(get_preset("Dark").map(|t| t.name), Some("portfolio"));
        assert!(get_preset("dracula").is_none());
    }

    #[test]
    fn test_text_contrasts_with_background() {
        for theme in [portfolio(), light()] {
            let diff = (theme.text.r - theme.background.r).abs();
            assert!(diff > 128, "{}", theme.name);
        }
    }
}
