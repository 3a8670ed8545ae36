//! Layout output types.

use crate::types::{CellMetrics, PxRect};

use super::tree::{NodeId, NodeTree};

/// A node's box in absolute page cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y as u32 + self.height as u32
    }
}

/// Vertical extent of one page section, in page pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// Lower bound inclusive, upper bound exclusive.
    #[inline]
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Result of a layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLayout {
    /// Indexed by `NodeId.0`.
    pub rects: Vec<CellRect>,
    /// Page width in columns (the viewport width).
    pub page_width: u16,
    /// Page height in rows (never less than one viewport).
    pub page_height: u16,
    pub metrics: CellMetrics,
}

impl ComputedLayout {
    /// An empty layout of the given viewport size.
    pub fn empty(page_width: u16, page_height: u16, metrics: CellMetrics) -> Self {
        Self {
            rects: Vec::new(),
            page_width,
            page_height,
            metrics,
        }
    }

    pub fn rect(&self, id: NodeId) -> Option<CellRect> {
        self.rects.get(id.0).copied()
    }

    /// A node's box in page pixels.
    pub fn rect_px(&self, id: NodeId) -> Option<PxRect> {
        self.rect(id).map(|r| {
            PxRect::new(
                self.metrics.cols_to_px(r.x),
                self.metrics.rows_to_px(r.y),
                self.metrics.cols_to_px(r.width),
                self.metrics.rows_to_px(r.height),
            )
        })
    }

    pub fn page_height_px(&self) -> f64 {
        self.metrics.rows_to_px(self.page_height)
    }

    /// Bounds of every node tagged `section` that has an element id, in
    /// document order.
    pub fn section_bounds(&self, tree: &NodeTree) -> Vec<SectionBounds> {
        tree.document_order()
            .into_iter()
            .filter_map(|id| {
                let node = tree.get(id)?;
                if !node.has_class("section") {
                    return None;
                }
                let element_id = node.element_id.clone()?;
                let px = self.rect_px(id)?;
                Some(SectionBounds::new(element_id, px.top, px.height))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tree::{Element, MinHeight};
    use crate::layout::compute_layout;

    #[test]
    fn test_section_bounds_contains() {
        let s = SectionBounds::new("skills", 800.0, 600.0);
        assert!(s.contains(800.0));
        assert!(s.contains(1399.9));
        assert!(!s.contains(1400.0));
        assert!(!s.contains(799.9));
    }

    #[test]
    fn test_section_bounds_from_tree() {
        let mut tree = NodeTree::new();
        tree.append(
            tree.root(),
            Element::column().id("home").class("section").min_height(MinHeight::Cells(50)),
        );
        tree.append(tree.root(), Element::column().class("section").min_height(MinHeight::Cells(5)));
        tree.append(
            tree.root(),
            Element::column().id("skills").class("section").min_height(MinHeight::Cells(20)),
        );

        let layout = compute_layout(&tree, 80, 24, false, CellMetrics::default()).unwrap();
        let bounds = layout.section_bounds(&tree);
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds[0], SectionBounds::new("home", 0.0, 800.0));
        assert_eq!(bounds[1], SectionBounds::new("skills", 880.0, 320.0));
    }
}
