//! Theme System for spark-folio.
//!
//! A theme is the page palette: semantic colors the sections build their
//! nodes from. Presets are looked up by name from the config file.
//!
//! # Example
//!
//! ```rust
//! use spark_folio::theme::get_preset;
//!
//! let theme = get_preset("portfolio").unwrap();
//! let accent = theme.primary;
//! ```

use crate::types::Rgba;

mod presets;

pub use presets::{get_preset, light, portfolio, PRESET_NAMES};

// =============================================================================
// Theme - All semantic colors
// =============================================================================

/// Theme definition with all semantic colors.
///
/// - Accents: primary, secondary
/// - Text: text, text_muted
/// - Background: background, surface (cards, scrolled navbar)
/// - Lines: border
/// - Highlight: the follower halo while over a link
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub description: &'static str,

    /// Brand color (links, active nav entry, headings accents).
    pub primary: Rgba,
    /// Second accent (background shapes, badges).
    pub secondary: Rgba,

    pub text: Rgba,
    pub text_muted: Rgba,

    pub background: Rgba,
    pub surface: Rgba,

    pub border: Rgba,
    pub highlight: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        portfolio()
    }
}

impl Theme {
    /// Parse a skill's accent color, falling back to the primary color.
    pub fn accent(&self, hex: &str) -> Rgba {
        Rgba::from_hex(hex).unwrap_or(self.primary)
    }
}

// =============================================================================
// Tests
// =============================================================================
