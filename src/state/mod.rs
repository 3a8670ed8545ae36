//! State Module - Runtime state systems that drive the page
//!
//! - **Store** - The observable page state (scroll, pointer, active section)
//! - **Mouse** - HitGrid, pointer dispatch, scoped hover listeners
//! - **Frame** - Cancellable per-frame tasks on a shared clock
//! - **Scroll** - Page scroll offset with eased scroll-to
//! - **Input** - crossterm event conversion

pub mod frame;
pub mod input;
pub mod mouse;
mod scroll;
mod store;

pub use scroll::{SmoothScroll, SCROLL_DURATION};
pub use store::{AppStore, Viewport};
