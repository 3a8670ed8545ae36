//! Terminal setup and size detection.

use crossterm::terminal;

use crate::error::{Error, Result};

/// Size used when the terminal cannot be queried (pipes, tests).
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Current terminal size in cells.
pub fn terminal_size() -> (u16, u16) {
    match terminal::size() {
        Ok((0, _)) | Ok((_, 0)) | Err(_) => FALLBACK_SIZE,
        Ok(size) => size,
    }
}

/// Raw mode for the life of the guard.
#[derive(Debug)]
pub struct RawMode {
    active: bool,
}

impl RawMode {
    pub fn enable() -> Result<Self> {
        terminal::enable_raw_mode().map_err(|err| Error::Terminal(format!("raw mode: {err}")))?;
        Ok(Self { active: true })
    }

    /// Raw mode that was never entered; disabling it is a no-op.
    #[cfg(test)]
    pub(crate) fn inactive() -> Self {
        Self { active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn disable(&mut self) {
        if std::mem::take(&mut self.active) {
            let _ = terminal::disable_raw_mode();
        }
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        self.disable();
    }
}
