//! # spark-folio
//!
//! Animated single-page developer portfolio for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! The page is a tree of styled elements laid out by Taffy in pixel space
//! (one cell = one [`CellMetrics`] box). Sections register scroll-triggered
//! animations with a frame-driven runner; the runner rewrites per-node
//! visual state (opacity, offset, scale) every frame and the painter
//! composes it over the laid-out tree.
//!
//! ```text
//! Page::tick → animation runner → Scene → paint → DiffRenderer
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Point, Rect, CellMetrics)
//! - [`layout`] - Element tree and Taffy layout
//! - [`animation`] - Tweens, timelines, triggers and the frame runner
//! - [`sections`] - Navbar, Hero, Skills, Projects, About, Contact, Footer
//! - [`follower`] - Mouse follower overlay
//! - [`page`] - Page composer
//! - [`renderer`] - Painting and diff rendering
//! - [`pipeline`] - Terminal lifecycle and event loop

pub mod animation;
pub mod config;
pub mod content;
pub mod error;
pub mod follower;
pub mod layout;
pub mod page;
pub mod pipeline;
pub mod renderer;
pub mod sections;
pub mod state;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use follower::MouseFollower;
pub use page::{Flow, Page};
pub use pipeline::{dump, mount, run, MountHandle};
pub use theme::Theme;
