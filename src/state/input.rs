//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the page: pointer events go to the
//! mouse module, keys become page [`Command`]s.
//!
//! # API
//!
//! - `convert_mouse_event` - crossterm MouseEvent → PointerEvent
//! - `convert_key_event` - crossterm KeyEvent → Command
//! - `poll_event` - Non-blocking event check with timeout
//! - `enable_mouse` / `disable_mouse` - Control mouse capture

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
    KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers, MouseButton as CrosstermMouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use crossterm::execute;
use std::io::stdout;
use std::time::Duration;

use crate::types::CellMetrics;

use super::mouse::{MouseButton, PointerEvent, ScrollDirection};

// =============================================================================
// EVENT TYPES
// =============================================================================

/// A page-level action produced by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Scroll by wheel steps (negative is up)
    Scroll(i32),
    /// Scroll by whole viewports (negative is up)
    Page(i32),
    Top,
    Bottom,
    ToggleMenu,
    /// Jump to the nth navbar link (0-indexed)
    Jump(usize),
    Quit,
}

/// Unified event type
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Command(Command),
    /// Terminal resize (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Convert a crossterm mouse event. The pointer sits at the cell's center.
pub fn convert_mouse_event(event: CrosstermMouseEvent, metrics: &CellMetrics) -> Option<PointerEvent> {
    let position = metrics.cell_center(event.column, event.row);
    let (col, row) = (event.column, event.row);
    let pointer = match event.kind {
        MouseEventKind::Down(btn) => PointerEvent::down(convert_mouse_button(btn), col, row, position),
        MouseEventKind::Up(btn) => PointerEvent::up(convert_mouse_button(btn), col, row, position),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => PointerEvent::move_to(col, row, position),
        MouseEventKind::ScrollUp => PointerEvent::scroll(col, row, position, ScrollDirection::Up),
        MouseEventKind::ScrollDown => PointerEvent::scroll(col, row, position, ScrollDirection::Down),
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
    };
    Some(pointer)
}

fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a key press into a page command. Releases and unbound keys map
/// to nothing.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<Command> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(event.code, KeyCode::Char('c')).then_some(Command::Quit);
    }
    let command = match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('m') => Command::ToggleMenu,
        KeyCode::Char(c @ '1'..='9') => Command::Jump(c as usize - '1' as usize),
        KeyCode::Char('j') | KeyCode::Down => Command::Scroll(1),
        KeyCode::Char('k') | KeyCode::Up => Command::Scroll(-1),
        KeyCode::Char(' ') | KeyCode::PageDown => Command::Page(1),
        KeyCode::PageUp => Command::Page(-1),
        KeyCode::Home | KeyCode::Char('g') => Command::Top,
        KeyCode::End | KeyCode::Char('G') => Command::Bottom,
        _ => return None,
    };
    Some(command)
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration, metrics: &CellMetrics) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event(metrics)?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event(metrics: &CellMetrics) -> std::io::Result<InputEvent> {
    Ok(convert_event(read()?, metrics))
}

pub fn convert_event(event: CrosstermEvent, metrics: &CellMetrics) -> InputEvent {
    match event {
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse, metrics)
            .map(InputEvent::Pointer)
            .unwrap_or(InputEvent::None),
        CrosstermEvent::Key(key) => convert_key_event(key)
            .map(InputEvent::Command)
            .unwrap_or(InputEvent::None),
        CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

// =============================================================================
// MOUSE CAPTURE
// =============================================================================

/// Enable mouse capture (clicks, moves, wheel).
pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

// =============================================================================
// TESTS
// =============================================================================
