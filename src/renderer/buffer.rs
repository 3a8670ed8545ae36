//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells holding what the viewport should
//! show. The painter draws into it; the diff renderer writes it out.
//!
//! # Design Decisions
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing.
//! - **Signed origins**: animated nodes can be translated partly off screen,
//!   so drawing calls take `i32` coordinates and clip to the buffer.
//! - **Wide characters**: CJK and most symbols use a continuation cell
//!   (`char == 0`) that the renderer skips.

use crate::layout::char_width;
use crate::types::{Attr, Cell, Rgba};

/// Rounded box-drawing set: horizontal, vertical, corners (tl, tr, br, bl).
const BORDER: (char, char, char, char, char, char) = ('─', '│', '╭', '╮', '╯', '╰');

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_background(width, height, Rgba::TERMINAL_DEFAULT)
    }

    /// Create a new buffer with a specific background color.
    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let cell = Cell {
            bg,
            ..Cell::default()
        };
        Self {
            width,
            height,
            cells: vec![cell; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if signed coordinates land inside the buffer.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x as i32, y as i32) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Get a mutable cell reference (returns None if out of bounds).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x as i32, y as i32) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Background at a signed position, or `fallback` off screen.
    pub fn bg_at(&self, x: i32, y: i32, fallback: Rgba) -> Rgba {
        if self.in_bounds(x, y) {
            self.cells[self.index(x as u16, y as u16)].bg
        } else {
            fallback
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire buffer to default cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell. Returns true if the cell was inside the buffer.
    pub fn set_cell(&mut self, x: i32, y: i32, ch: u32, fg: Rgba, bg: Option<Rgba>, attrs: Attr) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let idx = self.index(x as u16, y as u16);
        let cell = &mut self.cells[idx];
        cell.char = ch;
        cell.fg = fg;
        if let Some(bg) = bg {
            cell.bg = bg;
        }
        cell.attrs = attrs;
        true
    }

    /// Fill a rectangle with a background color, clearing its glyphs.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, bg: Rgba) {
        let x1 = x.max(0);
        let y1 = y.max(0);
        let x2 = (x + width as i32).min(self.width as i32);
        let y2 = (y + height as i32).min(self.height as i32);
        if x2 <= x1 || y2 <= y1 {
            return;
        }

        for row in y1..y2 {
            let start = self.index(x1 as u16, row as u16);
            let end = start + (x2 - x1) as usize;
            for cell in &mut self.cells[start..end] {
                cell.char = b' ' as u32;
                cell.bg = bg;
                cell.attrs = Attr::NONE;
            }
        }
    }

    /// Draw a single character, keeping the existing background when `bg`
    /// is None. Wide characters claim the next cell as a continuation.
    ///
    /// Returns the number of columns the character occupies.
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char, fg: Rgba, bg: Option<Rgba>, attrs: Attr) -> u16 {
        let width = char_width(ch);
        if width == 0 {
            return 0;
        }
        if self.set_cell(x, y, ch as u32, fg, bg, attrs) && width == 2 {
            self.set_cell(x + 1, y, 0, fg, bg, attrs);
        }
        width
    }

    /// Draw text at a position.
    ///
    /// Returns the number of cells used (handles wide characters).
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, fg: Rgba, bg: Option<Rgba>, attrs: Attr) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            if col >= self.width as i32 {
                break;
            }
            col += self.draw_char(col, y, ch, fg, bg, attrs) as i32;
        }
        (col - x).max(0) as u16
    }

    /// Draw a rounded border around a rectangle.
    pub fn draw_border(&mut self, x: i32, y: i32, width: u16, height: u16, color: Rgba) {
        if width < 2 || height < 2 {
            return;
        }
        let (horiz, vert, tl, tr, br, bl) = BORDER;
        let x2 = x + width as i32 - 1;
        let y2 = y + height as i32 - 1;

        self.draw_char(x, y, tl, color, None, Attr::NONE);
        self.draw_char(x2, y, tr, color, None, Attr::NONE);
        self.draw_char(x2, y2, br, color, None, Attr::NONE);
        self.draw_char(x, y2, bl, color, None, Attr::NONE);

        for col in (x + 1)..x2 {
            self.draw_char(col, y, horiz, color, None, Attr::NONE);
            self.draw_char(col, y2, horiz, color, None, Attr::NONE);
        }
        for row in (y + 1)..y2 {
            self.draw_char(x, row, vert, color, None, Attr::NONE);
            self.draw_char(x2, row, vert, color, None, Attr::NONE);
        }
    }

    /// Draw a horizontal rule.
    pub fn draw_hline(&mut self, x: i32, y: i32, width: u16, color: Rgba) {
        for col in x..x + width as i32 {
            self.draw_char(col, y, '─', color, None, Attr::NONE);
        }
    }

    /// Plain-text rows with trailing spaces trimmed (used for `--dump`).
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .take(self.height as usize)
            .map(|row| {
                let line: String = row
                    .iter()
                    .filter(|cell| cell.char != 0)
                    .map(|cell| char::from_u32(cell.char).unwrap_or(' '))
                    .collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_creation() {
        let buffer = FrameBuffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.cells().len(), 80 * 24);
    }

    #[test]
    fn test_set_cell_clips() {
        let mut buffer = FrameBuffer::new(10, 10);
        assert!(buffer.set_cell(5, 5, 'X' as u32, Rgba::WHITE, Some(Rgba::BLACK), Attr::BOLD));
        assert!(!buffer.set_cell(-1, 5, 'X' as u32, Rgba::WHITE, None, Attr::NONE));
        assert!(!buffer.set_cell(10, 0, 'X' as u32, Rgba::WHITE, None, Attr::NONE));

        let cell = buffer.get(5, 5).unwrap();
        assert_eq!(cell.char, 'X' as u32);
        assert_eq!(cell.bg, Rgba::BLACK);
        assert_eq!(cell.attrs, Attr::BOLD);
    }

    #[test]
    fn test_fill_rect_partially_off_screen() {
        let mut buffer = FrameBuffer::new(20, 20);
        let blue = Rgba::rgb(0, 0, 255);
        buffer.fill_rect(-5, -5, 10, 10, blue);

        assert_eq!(buffer.get(0, 0).unwrap().bg, blue);
        assert_eq!(buffer.get(4, 4).unwrap().bg, blue);
        assert_eq!(buffer.get(5, 5).unwrap().bg, Rgba::TERMINAL_DEFAULT);
    }

    #[test]
    fn test_draw_text_keeps_background() {
        let mut buffer = FrameBuffer::with_background(20, 5, Rgba::BLACK);
        let used = buffer.draw_text(0, 0, "Hello", Rgba::WHITE, None, Attr::NONE);

        assert_eq!(used, 5);
        assert_eq!(buffer.get(0, 0).unwrap().char, 'H' as u32);
        assert_eq!(buffer.get(4, 0).unwrap().char, 'o' as u32);
        assert_eq!(buffer.get(0, 0).unwrap().bg, Rgba::BLACK);
    }

    #[test]
    fn test_wide_char_continuation() {
        let mut buffer = FrameBuffer::new(10, 1);
        let used = buffer.draw_text(0, 0, "中a", Rgba::WHITE, None, Attr::NONE);
        assert_eq!(used, 3);
        assert_eq!(buffer.get(1, 0).unwrap().char, 0);
        assert_eq!(buffer.get(2, 0).unwrap().char, 'a' as u32);
        assert_eq!(buffer.to_lines(), vec!["中a"]);
    }

    #[test]
    fn test_draw_border() {
        let mut buffer = FrameBuffer::new(4, 3);
        buffer.draw_border(0, 0, 4, 3, Rgba::GRAY);
        assert_eq!(buffer.to_lines(), vec!["╭──╮", "│  │", "╰──╯"]);
    }

    #[test]
    fn test_to_lines_trims() {
        let mut buffer = FrameBuffer::new(8, 2);
        buffer.draw_text(2, 1, "hi", Rgba::WHITE, None, Attr::NONE);
        assert_eq!(buffer.to_lines(), vec!["", "  hi"]);
    }
}
