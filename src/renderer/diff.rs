//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: queue it, emitting only the cursor moves, colors and
//!      attributes that differ from the terminal's current state
//! 3. Flush the output buffer (single write)
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::queue;

use super::buffer::FrameBuffer;
use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// Cell state tracking
// =============================================================================

/// Terminal state after the last queued cell.
#[derive(Debug, Default)]
struct CellState {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Option<Attr>,
}

impl CellState {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn queue_cell<W: Write>(&mut self, out: &mut W, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // Continuation of a wide character: the terminal already advanced
        if cell.char == 0 {
            self.cursor = Some((x + 1, y));
            return Ok(());
        }

        if self.cursor != Some((x, y)) {
            queue!(out, MoveTo(x, y))?;
        }

        if self.attrs != Some(cell.attrs) {
            // Attribute reset also resets colors
            queue!(out, SetAttribute(Attribute::Reset))?;
            for (flag, attribute) in [
                (Attr::BOLD, Attribute::Bold),
                (Attr::DIM, Attribute::Dim),
                (Attr::ITALIC, Attribute::Italic),
                (Attr::UNDERLINE, Attribute::Underlined),
                (Attr::INVERSE, Attribute::Reverse),
            ] {
                if cell.attrs.contains(flag) {
                    queue!(out, SetAttribute(attribute))?;
                }
            }
            self.attrs = Some(cell.attrs);
            self.fg = None;
            self.bg = None;
        }

        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_color(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_color(cell.bg)))?;
            self.bg = Some(cell.bg);
        }

        let ch = char::from_u32(cell.char).unwrap_or(' ');
        queue!(out, Print(ch))?;
        self.cursor = Some((x + 1, y));
        Ok(())
    }
}

/// Map a cell color onto a crossterm color.
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

// =============================================================================
// DiffRenderer
// =============================================================================

/// Differential renderer for fullscreen mode.
///
/// Keeps track of the previous frame to enable diff-based rendering.
/// Only cells that have changed since the last frame are output.
pub struct DiffRenderer {
    output: Vec<u8>,
    state: CellState,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self {
            output: Vec::with_capacity(16384),
            state: CellState::default(),
            previous: None,
        }
    }

    /// Render a frame to stdout, outputting only changed cells.
    ///
    /// Returns true if any cells were changed.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut stdout = io::stdout().lock();
        self.render_to(buffer, &mut stdout)
    }

    /// Render a frame to any writer.
    pub fn render_to<W: Write>(&mut self, buffer: &FrameBuffer, writer: &mut W) -> io::Result<bool> {
        let mut has_changes = false;
        self.output.clear();
        self.state.reset();

        queue!(self.output, BeginSynchronizedUpdate)?;

        let width = buffer.width();
        let height = buffer.height();
        let previous = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == width && prev.height() == height);

        for y in 0..height {
            for x in 0..width {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                let changed = match previous.and_then(|prev| prev.get(x, y)) {
                    Some(prev_cell) => prev_cell != cell,
                    None => true,
                };
                if changed {
                    has_changes = true;
                    self.state.queue_cell(&mut self.output, x, y, cell)?;
                }
            }
        }

        queue!(self.output, EndSynchronizedUpdate)?;

        if has_changes {
            writer.write_all(&self.output)?;
            writer.flush()?;
        }

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw. Use this after a terminal resize.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter fullscreen mode (alternate screen buffer).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        queue!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        stdout.flush()?;
        self.invalidate();
        Ok(())
    }

    /// Exit fullscreen mode.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        queue!(
            stdout,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Show,
            LeaveAlternateScreen
        )?;
        stdout.flush()
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
