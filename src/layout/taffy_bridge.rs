//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts node styles to Taffy styles, runs layout computation with text
//! measurement, and extracts absolute cell rectangles back into a
//! [`ComputedLayout`].

use std::collections::HashMap;

use taffy::{
    AlignItems as TaffyAlignItems, AvailableSpace, Dimension as TaffyDimension, Display,
    FlexDirection as TaffyFlexDirection, FlexWrap as TaffyFlexWrap,
    JustifyContent as TaffyJustifyContent, LengthPercentage, LengthPercentageAuto,
    NodeId as TaffyNodeId, Position as TaffyPosition, Rect, Size, Style, TaffyTree,
};

use crate::error::Result;
use crate::types::CellMetrics;

use super::text_measure::{string_width, wrap_text};
use super::tree::{Align, Direction, MinHeight, NodeId, NodeKind, NodeTree, Width};
use super::types::{CellRect, ComputedLayout};

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn to_taffy_width(width: Width) -> TaffyDimension {
    match width {
        Width::Auto => TaffyDimension::Auto,
        Width::Cells(n) => TaffyDimension::Length(n as f32),
        Width::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_justify(align: Align) -> Option<TaffyJustifyContent> {
    Some(match align {
        Align::Start => TaffyJustifyContent::FlexStart,
        Align::Center => TaffyJustifyContent::Center,
        Align::End => TaffyJustifyContent::FlexEnd,
        Align::SpaceBetween => TaffyJustifyContent::SpaceBetween,
    })
}

/// Build a Taffy Style for one node.
fn build_style(
    tree: &NodeTree,
    id: NodeId,
    viewport_cols: u16,
    viewport_rows: u16,
    narrow: bool,
) -> Style {
    let Some(node) = tree.get(id) else {
        return Style::default();
    };
    let s = &node.style;

    let border = if s.border { 1.0 } else { 0.0 };
    let row_gap = match s.direction {
        Direction::Column => s.gap,
        Direction::Row => s.gap.min(1),
    };

    let mut style = Style {
        display: if s.visible && s.responsive.shown(narrow) {
            Display::Flex
        } else {
            Display::None
        },
        flex_direction: match s.direction {
            Direction::Column => TaffyFlexDirection::Column,
            Direction::Row => TaffyFlexDirection::Row,
        },
        flex_wrap: if s.wrap {
            TaffyFlexWrap::Wrap
        } else {
            TaffyFlexWrap::NoWrap
        },
        gap: Size {
            width: LengthPercentage::Length(s.gap as f32),
            height: LengthPercentage::Length(row_gap as f32),
        },
        padding: Rect {
            top: LengthPercentage::Length(s.padding.top as f32),
            right: LengthPercentage::Length(s.padding.right as f32),
            bottom: LengthPercentage::Length(s.padding.bottom as f32),
            left: LengthPercentage::Length(s.padding.left as f32),
        },
        border: Rect {
            top: LengthPercentage::Length(border),
            right: LengthPercentage::Length(border),
            bottom: LengthPercentage::Length(border),
            left: LengthPercentage::Length(border),
        },
        size: Size {
            width: to_taffy_width(s.width),
            height: TaffyDimension::Auto,
        },
        min_size: Size {
            width: TaffyDimension::Auto,
            height: match s.min_height {
                MinHeight::None => TaffyDimension::Auto,
                MinHeight::Cells(n) => TaffyDimension::Length(n as f32),
                MinHeight::Viewport => TaffyDimension::Length(viewport_rows as f32),
            },
        },
        max_size: Size {
            width: s
                .max_width
                .map(|w| TaffyDimension::Length(w as f32))
                .unwrap_or(TaffyDimension::Auto),
            height: TaffyDimension::Auto,
        },
        ..Default::default()
    };

    match s.direction {
        Direction::Column => {
            style.align_items = Some(match s.align {
                Align::Center => TaffyAlignItems::Center,
                Align::End => TaffyAlignItems::FlexEnd,
                Align::Start | Align::SpaceBetween => TaffyAlignItems::Stretch,
            });
            style.justify_content = if s.min_height != MinHeight::None && s.align == Align::Center
            {
                Some(TaffyJustifyContent::Center)
            } else {
                None
            };
        }
        Direction::Row => {
            style.justify_content = to_taffy_justify(s.align);
            style.align_items = Some(TaffyAlignItems::FlexStart);
        }
    }

    // Blocks with a max width sit centered in their parent
    if s.max_width.is_some() {
        style.margin = Rect {
            top: LengthPercentageAuto::Length(0.0),
            right: LengthPercentageAuto::Auto,
            bottom: LengthPercentageAuto::Length(0.0),
            left: LengthPercentageAuto::Auto,
        };
    }

    // Fixed-width cards keep their width inside wrapping rows
    if matches!(s.width, Width::Cells(_)) {
        style.flex_shrink = 0.0;
    }

    if let Some((left, top)) = s.anchor {
        style.position = TaffyPosition::Absolute;
        style.inset = Rect {
            left: LengthPercentageAuto::Percent(left / 100.0),
            top: LengthPercentageAuto::Percent(top / 100.0),
            right: LengthPercentageAuto::Auto,
            bottom: LengthPercentageAuto::Auto,
        };
    }

    if id == tree.root() {
        style.size.width = TaffyDimension::Length(viewport_cols as f32);
    }

    if matches!(node.kind, NodeKind::Rule) {
        style.size.height = TaffyDimension::Length(1.0);
    }

    style
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Measure function for text content.
fn measure_text(
    tree: &NodeTree,
    id: NodeId,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let Some(content) = tree.get(id).and_then(|n| n.text()) else {
        return Size::ZERO;
    };
    if content.is_empty() {
        return Size::ZERO;
    }

    let text_width = string_width(content);
    let avail_width = match available_space.width {
        AvailableSpace::Definite(w) => (w.max(1.0) as u16).min(text_width),
        AvailableSpace::MinContent => content
            .split_whitespace()
            .map(string_width)
            .max()
            .unwrap_or(1),
        AvailableSpace::MaxContent => text_width,
    };

    let width = known_dimensions
        .width
        .map(|w| w as u16)
        .unwrap_or(avail_width)
        .max(1);
    let height = wrap_text(content, width).len() as f32;

    Size {
        width: known_dimensions.width.unwrap_or(width as f32),
        height: known_dimensions.height.unwrap_or(height),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute layout for the whole page.
///
/// The root is as wide as the viewport and grows vertically with its content.
/// Rectangles are absolute page cells; the page origin is (0, 0). Nodes not
/// shown on this viewport (see [`Responsive`](super::tree::Responsive)) get
/// an empty rectangle.
pub fn compute_layout(
    tree: &NodeTree,
    viewport_cols: u16,
    viewport_rows: u16,
    narrow: bool,
    metrics: CellMetrics,
) -> Result<ComputedLayout> {
    let order = tree.document_order();

    let mut taffy: TaffyTree<NodeId> = TaffyTree::new();
    let mut id_to_node: HashMap<NodeId, TaffyNodeId> = HashMap::with_capacity(order.len());

    // First pass: create all nodes
    for &id in &order {
        let style = build_style(tree, id, viewport_cols, viewport_rows, narrow);
        let is_text = tree.get(id).is_some_and(|n| n.text().is_some());
        let node = if is_text {
            taffy.new_leaf_with_context(style, id)?
        } else {
            taffy.new_leaf(style)?
        };
        id_to_node.insert(id, node);
    }

    // Second pass: parent-child relationships (document order keeps child order)
    for &id in &order {
        let Some(parent) = tree.get(id).and_then(|n| n.parent) else {
            continue;
        };
        if let (Some(&parent_node), Some(&child_node)) =
            (id_to_node.get(&parent), id_to_node.get(&id))
        {
            taffy.add_child(parent_node, child_node)?;
        }
    }

    let available = Size {
        width: AvailableSpace::Definite(viewport_cols as f32),
        height: AvailableSpace::MaxContent,
    };

    let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                          available_space: Size<AvailableSpace>,
                          _node_id: TaffyNodeId,
                          context: Option<&mut NodeId>,
                          _style: &Style| {
        match context {
            Some(&mut id) => measure_text(tree, id, known_dimensions, available_space),
            None => Size::ZERO,
        }
    };

    let root = id_to_node[&tree.root()];
    taffy.compute_layout_with_measure(root, available, &mut measure_fn)?;

    // Extract results, accumulating parent offsets (parents precede children)
    let mut rects = vec![CellRect::default(); tree.len()];
    let mut origin: Vec<(f32, f32)> = vec![(0.0, 0.0); tree.len()];
    for &id in &order {
        let Some(&node) = id_to_node.get(&id) else {
            continue;
        };
        let layout = taffy.layout(node)?;
        let (px, py) = tree
            .get(id)
            .and_then(|n| n.parent)
            .map(|p| origin[p.0])
            .unwrap_or((0.0, 0.0));
        let x = px + layout.location.x;
        let y = py + layout.location.y;
        origin[id.0] = (x, y);
        rects[id.0] = CellRect {
            x: x.max(0.0).round() as u16,
            y: y.max(0.0).round() as u16,
            width: layout.size.width.round() as u16,
            height: layout.size.height.round() as u16,
        };
    }

    let page_height = rects[tree.root().0].height.max(viewport_rows);

    Ok(ComputedLayout {
        rects,
        page_width: viewport_cols,
        page_height,
        metrics,
    })
}
