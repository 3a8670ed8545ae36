//! Reactive Pipeline
//!
//! Connects the page to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! Page::tick → scene signal → painted frame derived → render effect
//! ```
//!
//! ## Data Flow
//!
//! 1. **scene signal** - the event loop publishes the page's scene each frame
//! 2. **frame derived** - paints the scene (pure) into a buffer and hit grid
//! 3. **render effect** - installs the hit grid, diffs the buffer to stdout
//!
//! Only the render effect has side effects.

pub mod mount;
pub mod terminal;

pub use mount::{dump, mount, run, tick, MountHandle};
pub use terminal::{terminal_size, RawMode};
