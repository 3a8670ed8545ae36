//! Core types for spark-folio.
//!
//! Colors and cells are what the renderer understands. Pixel geometry is what
//! the page, the scroll store and the animation triggers understand. The two
//! meet in [`CellMetrics`], which maps virtual page pixels onto terminal cells.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Linear interpolation between two colors.
    ///
    /// Terminal default endpoints are treated as black.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let a = if a.is_terminal_default() { Self::BLACK } else { a };
        let b = if b.is_terminal_default() { Self::BLACK } else { b };
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self {
            r: ((a.r as f32 * inv_t) + (b.r as f32 * t)).round() as i16,
            g: ((a.g as f32 * inv_t) + (b.g as f32 * t)).round() as i16,
            b: ((a.b as f32 * inv_t) + (b.b as f32 * t)).round() as i16,
            a: ((a.a as f32 * inv_t) + (b.a as f32 * t)).round() as i16,
        }
    }

    /// Parse a hex color (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            8 => Some(Self::new(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
                hex_byte(bytes, 6)?,
            )),
            _ => None,
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 5;
    }
}

// =============================================================================
// Cell
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint (32 for space).
    pub char: u32,
    /// Foreground color.
    pub fg: Rgba,
    /// Background color.
    pub bg: Rgba,
    /// Attribute flags.
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: b' ' as u32,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// Pixel geometry
// =============================================================================

/// A point in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in page pixels.
///
/// `top` is measured from the top of the page, not the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PxRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PxRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Half-open containment: left/top inclusive, right/bottom exclusive.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }
}

/// Size of one terminal cell in virtual page pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl CellMetrics {
    /// Columns → pixels.
    #[inline]
    pub fn cols_to_px(&self, cols: u16) -> f64 {
        cols as f64 * self.cell_width
    }

    /// Rows → pixels.
    #[inline]
    pub fn rows_to_px(&self, rows: u16) -> f64 {
        rows as f64 * self.cell_height
    }

    /// Pixels → whole columns (rounded to nearest).
    #[inline]
    pub fn px_to_cols(&self, px: f64) -> i32 {
        (px / self.cell_width).round() as i32
    }

    /// Pixels → whole rows (rounded to nearest).
    #[inline]
    pub fn px_to_rows(&self, px: f64) -> i32 {
        (px / self.cell_height).round() as i32
    }

    /// Center of a terminal cell in pixels.
    #[inline]
    pub fn cell_center(&self, col: u16, row: u16) -> Point {
        Point::new(
            (col as f64 + 0.5) * self.cell_width,
            (row as f64 + 0.5) * self.cell_height,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#61DAFB"), Some(Rgba::rgb(0x61, 0xDA, 0xFB)));
        assert_eq!(Rgba::from_hex("fff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::from_hex("#12345"), None);
        assert_eq!(Rgba::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgba::rgb(0, 0, 0);
        let b = Rgba::rgb(200, 100, 50);
        assert_eq!(Rgba::lerp(a, b, 0.0), a);
        assert_eq!(Rgba::lerp(a, b, 1.0), b);
        assert_eq!(Rgba::lerp(a, b, 0.5), Rgba::rgb(100, 50, 25));
    }

    #[test]
    fn test_rect_half_open() {
        let r = PxRect::new(0.0, 800.0, 100.0, 600.0);
        assert!(r.contains(Point::new(0.0, 800.0)));
        assert!(!r.contains(Point::new(0.0, 1400.0)));
        assert!(!r.contains(Point::new(100.0, 900.0)));
    }

    #[test]
    fn test_cell_metrics() {
        let m = CellMetrics::default();
        assert_eq!(m.rows_to_px(50), 800.0);
        assert_eq!(m.px_to_rows(150.0), 9);
        assert_eq!(m.cell_center(0, 0), Point::new(4.0, 8.0));
    }
}
