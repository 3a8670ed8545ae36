//! Layout Module
//!
//! Flexbox layout of the page's node tree using Taffy.
//!
//! # Architecture
//!
//! 1. Sections build nodes into a [`NodeTree`]
//! 2. The bridge converts node styles → Taffy styles and measures text
//! 3. Computed rectangles come back as absolute page cells, convertible to
//!    page pixels through the layout's [`CellMetrics`](crate::types::CellMetrics)
//!
//! # Reactivity
//!
//! Layout is a pure function of the tree and the viewport size. The page
//! re-runs it on resize and whenever the navbar changes shape.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::layout::{compute_layout, NodeTree};
//!
//! let layout = compute_layout(&tree, 120, 40, false, metrics)?;
//! let sections = layout.section_bounds(&tree);
//! ```

mod taffy_bridge;
mod text_measure;
pub mod tree;
mod types;

pub use taffy_bridge::compute_layout;
pub use text_measure::*;
pub use tree::{
    Align, Direction, Edges, Element, LinkAction, MinHeight, Node, NodeId, NodeKind, NodeTree,
    Responsive, Selector, Style, Width,
};
pub use types::*;
