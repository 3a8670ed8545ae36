//! Renderer Module
//!
//! Cell framebuffer, the painter that fills it from a page scene, and the
//! differential terminal writer.
//!
//! # Architecture
//!
//! ```text
//! Scene (tree + layout + visual states + scroll) → paint() → Frame → DiffRenderer → terminal
//! ```
//!
//! The painter is pure; only [`DiffRenderer`] touches the terminal.

mod buffer;
mod diff;
mod paint;

pub use buffer::FrameBuffer;
pub use diff::{to_color, DiffRenderer};
pub use paint::{fade, paint, Frame, Overlay, Scene};
