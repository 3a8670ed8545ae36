//! Painter - turns a [`Scene`] into a [`Frame`].
//!
//! The painter walks the node tree in document order and draws each node at
//! its laid-out position, shifted by the page scroll and by the node's
//! animated [`VisualState`]. Painting is a pure function of the scene, so the
//! pipeline can wrap it in a derived and skip identical frames.
//!
//! Visual states map onto cells like this:
//!
//! - `opacity` fades colors toward the background; below 0.05 the node and
//!   its subtree are not painted (and cannot be hit)
//! - `x`/`y`/`y_percent` translate the node and its subtree by whole cells
//! - `scale` above 1 paints bold; `rotation` paints italic
//! - per-character states (split text) apply to individual glyphs
//!
//! Fixed nodes ignore the scroll offset and are painted after everything
//! else, so they stay on top.

use std::collections::HashMap;
use std::rc::Rc;

use crate::animation::{Target, VisualState};
use crate::layout::{wrap_text, string_width, Align, ComputedLayout, NodeId, NodeKind, NodeTree};
use crate::state::mouse::HitGrid;
use crate::types::{Attr, CellMetrics, Point, Rgba};

use super::buffer::FrameBuffer;

/// Below this opacity nothing is painted.
const MIN_OPACITY: f64 = 0.05;

// =============================================================================
// Types
// =============================================================================

/// A glyph drawn over the page at a viewport position (the mouse follower).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    /// Viewport pixels.
    pub position: Point,
    pub glyph: char,
    pub color: Rgba,
    pub opacity: f64,
}

/// Everything one frame depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub tree: Rc<NodeTree>,
    pub layout: Rc<ComputedLayout>,
    pub styles: Rc<HashMap<Target, VisualState>>,
    pub scroll_y: f64,
    pub cols: u16,
    pub rows: u16,
    pub foreground: Rgba,
    pub background: Rgba,
    /// Interactive node under the pointer (painted underlined).
    pub hovered: Option<NodeId>,
    pub overlays: Vec<Overlay>,
}

/// Result of painting: what to show and what is under each cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub buffer: FrameBuffer,
    pub hits: HitGrid,
}

impl Frame {
    pub fn size(&self) -> (u16, u16) {
        (self.buffer.width(), self.buffer.height())
    }
}

/// Style carried from a node to its children.
#[derive(Debug, Clone, Copy)]
struct Inherited {
    dx: i32,
    dy: i32,
    opacity: f64,
    fg: Rgba,
    bg: Rgba,
    attrs: Attr,
    fixed: bool,
}

struct Painter<'a> {
    scene: &'a Scene,
    metrics: CellMetrics,
    scroll_rows: i32,
    buffer: FrameBuffer,
    hits: HitGrid,
    deferred: Vec<(NodeId, Inherited)>,
}

// =============================================================================
// Entry point
// =============================================================================

/// Paint a scene into a viewport-sized frame.
pub fn paint(scene: &Scene) -> Frame {
    let metrics = scene.layout.metrics;
    let mut painter = Painter {
        scene,
        metrics,
        scroll_rows: metrics.px_to_rows(scene.scroll_y),
        buffer: FrameBuffer::with_background(scene.cols, scene.rows, scene.background),
        hits: HitGrid::new(scene.cols, scene.rows),
        deferred: Vec::new(),
    };

    let root = Inherited {
        dx: 0,
        dy: 0,
        opacity: 1.0,
        fg: scene.foreground,
        bg: scene.background,
        attrs: Attr::NONE,
        fixed: false,
    };
    painter.paint_node(scene.tree.root(), root);

    // Fixed layers go on top, in document order
    let deferred = std::mem::take(&mut painter.deferred);
    for (id, inherited) in deferred {
        painter.paint_node(id, inherited);
    }

    for overlay in &scene.overlays {
        painter.paint_overlay(overlay);
    }

    Frame {
        buffer: painter.buffer,
        hits: painter.hits,
    }
}

/// Blend `color` toward `toward` by `opacity` (1 = fully `color`).
pub fn fade(color: Rgba, toward: Rgba, opacity: f64) -> Rgba {
    if opacity >= 1.0 {
        return color;
    }
    Rgba::lerp(toward, color, opacity.clamp(0.0, 1.0) as f32)
}

// =============================================================================
// Node painting
// =============================================================================

impl<'a> Painter<'a> {
    fn state(&self, target: Target) -> VisualState {
        self.scene
            .styles
            .get(&target)
            .copied()
            .unwrap_or(VisualState::REST)
    }

    fn paint_node(&mut self, id: NodeId, inherited: Inherited) {
        let scene: &'a Scene = self.scene;
        let Some(node) = scene.tree.get(id) else {
            return;
        };
        let Some(rect) = scene.layout.rect(id) else {
            return;
        };
        if !node.style.visible || rect.width == 0 || rect.height == 0 {
            return;
        }

        if node.style.fixed && !inherited.fixed {
            self.deferred.push((
                id,
                Inherited {
                    fixed: true,
                    ..inherited
                },
            ));
            return;
        }

        let state = self.state(Target::node(id));
        let opacity = inherited.opacity * state.opacity;
        if opacity < MIN_OPACITY || state.scale <= 0.0 {
            return;
        }

        let height_px = self.metrics.rows_to_px(rect.height);
        let dx = inherited.dx + self.metrics.px_to_cols(state.x);
        let dy = inherited.dy + self.metrics.px_to_rows(state.y_offset(height_px));
        let scroll = if inherited.fixed { 0 } else { self.scroll_rows };
        let x = rect.x as i32 + dx;
        let y = rect.y as i32 - scroll + dy;

        let mut attrs = inherited.attrs | node.style.attrs | transform_attrs(&state);
        if scene.hovered == Some(id) {
            attrs |= Attr::UNDERLINE;
        }

        let bg = match node.style.bg {
            Some(bg) => {
                let bg = fade(bg, inherited.bg, opacity);
                self.buffer.fill_rect(x, y, rect.width, rect.height, bg);
                bg
            }
            None => inherited.bg,
        };
        let fg = if node.style.fg.is_terminal_default() {
            inherited.fg
        } else {
            node.style.fg
        };

        self.hits.fill_rect(x, y, rect.width, rect.height, id);

        let s = &node.style;
        let inset = u16::from(s.border);
        if s.border {
            let color = fade(s.border_color, bg, opacity);
            self.buffer.draw_border(x, y, rect.width, rect.height, color);
        }
        let content_x = x + (s.padding.left + inset) as i32;
        let content_y = y + (s.padding.top + inset) as i32;
        let content_w = rect
            .width
            .saturating_sub(s.padding.left + s.padding.right + inset * 2);

        match &node.kind {
            NodeKind::Text(text) => {
                self.paint_text(id, text, content_x, content_y, content_w, s.align, fg, bg, opacity, attrs);
            }
            NodeKind::Rule => {
                self.buffer
                    .draw_hline(content_x, content_y, content_w, fade(fg, bg, opacity));
            }
            NodeKind::Container => {}
        }

        let child = Inherited {
            dx,
            dy,
            opacity,
            fg,
            bg,
            attrs,
            fixed: inherited.fixed,
        };
        for &child_id in &node.children {
            self.paint_node(child_id, child);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_text(
        &mut self,
        id: NodeId,
        text: &str,
        x: i32,
        y: i32,
        width: u16,
        align: Align,
        fg: Rgba,
        bg: Rgba,
        opacity: f64,
        attrs: Attr,
    ) {
        let mut glyph = 0u32;
        for (row, line) in wrap_text(text, width).iter().enumerate() {
            let line_width = string_width(line);
            let offset = match align {
                Align::Center => width.saturating_sub(line_width) / 2,
                Align::End => width.saturating_sub(line_width),
                Align::Start | Align::SpaceBetween => 0,
            };
            let mut col = x + offset as i32;
            let line_y = y + row as i32;

            for ch in line.chars() {
                let advance = crate::layout::char_width(ch) as i32;
                if ch.is_whitespace() {
                    col += advance;
                    continue;
                }

                let state = self.state(Target::glyph(id, glyph));
                glyph += 1;
                let glyph_opacity = opacity * state.opacity;
                if glyph_opacity >= MIN_OPACITY && state.scale > 0.0 {
                    let gx = col + self.metrics.px_to_cols(state.x);
                    let gy = line_y + self.metrics.px_to_rows(state.y_offset(self.metrics.cell_height));
                    let under = self.buffer.bg_at(gx, gy, bg);
                    let color = fade(fg, under, glyph_opacity);
                    self.buffer
                        .draw_char(gx, gy, ch, color, None, attrs | transform_attrs(&state));
                }
                col += advance;
            }
        }
    }

    fn paint_overlay(&mut self, overlay: &Overlay) {
        if overlay.opacity < MIN_OPACITY {
            return;
        }
        let col = (overlay.position.x / self.metrics.cell_width).floor() as i32;
        let row = (overlay.position.y / self.metrics.cell_height).floor() as i32;
        let under = self.buffer.bg_at(col, row, self.scene.background);
        let color = fade(overlay.color, under, overlay.opacity);
        self.buffer
            .draw_char(col, row, overlay.glyph, color, None, Attr::NONE);
    }
}

/// Attributes standing in for transforms a terminal cannot show.
fn transform_attrs(state: &VisualState) -> Attr {
    let mut attrs = Attr::NONE;
    if state.scale > 1.02 {
        attrs |= Attr::BOLD;
    }
    if state.rotation.abs() >= 1.0 {
        attrs |= Attr::ITALIC;
    }
    attrs
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Props;
    use crate::layout::{compute_layout, Element, LinkAction, MinHeight};

    const FG: Rgba = Rgba::rgb(200, 200, 200);
    const BG: Rgba = Rgba::rgb(10, 10, 10);

    fn scene(tree: NodeTree, styles: HashMap<Target, VisualState>, scroll_y: f64) -> Scene {
        let layout = compute_layout(&tree, 20, 5, false, CellMetrics::default()).unwrap();
        Scene {
            tree: Rc::new(tree),
            layout: Rc::new(layout),
            styles: Rc::new(styles),
            scroll_y,
            cols: 20,
            rows: 5,
            foreground: FG,
            background: BG,
            hovered: None,
            overlays: Vec::new(),
        }
    }

    fn state(props: Props) -> VisualState {
        VisualState::REST.with(&props)
    }

    #[test]
    fn test_paints_text_and_hits() {
        let mut tree = NodeTree::new();
        let link = tree.append(
            tree.root(),
            Element::text("Home").link(LinkAction::Anchor("home".into())),
        );
        let frame = paint(&scene(tree, HashMap::new(), 0.0));

        assert_eq!(frame.buffer.to_lines()[0], "Home");
        assert_eq!(frame.buffer.get(0, 0).unwrap().fg, FG);
        assert_eq!(frame.hits.get(0, 0), Some(link));
        assert_eq!(frame.size(), (20, 5));
    }

    #[test]
    fn test_scroll_moves_content_up() {
        let mut tree = NodeTree::new();
        tree.append(tree.root(), Element::column().min_height(MinHeight::Cells(3)));
        tree.append(tree.root(), Element::text("below"));
        // 3 rows * 16 px
        let frame = paint(&scene(tree, HashMap::new(), 48.0));
        assert_eq!(frame.buffer.to_lines()[0], "below");
    }

    #[test]
    fn test_fixed_ignores_scroll_and_stays_on_top() {
        let mut tree = NodeTree::new();
        tree.append(tree.root(), Element::text("NAV").fixed().anchored(0.0, 0.0));
        tree.append(tree.root(), Element::column().min_height(MinHeight::Cells(2)));
        tree.append(tree.root(), Element::text("content"));
        let frame = paint(&scene(tree, HashMap::new(), 32.0));
        // "content" scrolled to row 0 but the fixed node paints over it
        assert!(frame.buffer.to_lines()[0].starts_with("NAV"));
    }

    #[test]
    fn test_transparent_nodes_not_painted_or_hit() {
        let mut tree = NodeTree::new();
        let text = tree.append(tree.root(), Element::text("ghost"));
        let mut styles = HashMap::new();
        styles.insert(Target::node(text), state(Props::new().opacity(0.0)));
        let frame = paint(&scene(tree, styles, 0.0));

        assert_eq!(frame.buffer.to_lines()[0], "");
        assert_ne!(frame.hits.get(0, 0), Some(text));
    }

    #[test]
    fn test_half_opacity_fades_toward_background() {
        let mut tree = NodeTree::new();
        let text = tree.append(tree.root(), Element::text("x"));
        let mut styles = HashMap::new();
        styles.insert(Target::node(text), state(Props::new().opacity(0.5)));
        let frame = paint(&scene(tree, styles, 0.0));

        assert_eq!(frame.buffer.get(0, 0).unwrap().fg, Rgba::rgb(105, 105, 105));
    }

    #[test]
    fn test_translate_by_cells() {
        let mut tree = NodeTree::new();
        let text = tree.append(tree.root(), Element::text("ab"));
        let mut styles = HashMap::new();
        // 16 px right = 2 columns, 16 px down = 1 row
        styles.insert(Target::node(text), state(Props::new().x(16.0).y(16.0)));
        let frame = paint(&scene(tree, styles, 0.0));

        assert_eq!(frame.buffer.to_lines()[1], "  ab");
    }

    #[test]
    fn test_glyph_states() {
        let mut tree = NodeTree::new();
        let text = tree.append(tree.root(), Element::text("a b"));
        let mut styles = HashMap::new();
        // Second non-space glyph is hidden
        styles.insert(Target::glyph(text, 1), state(Props::new().opacity(0.0)));
        let frame = paint(&scene(tree, styles, 0.0));

        assert_eq!(frame.buffer.to_lines()[0], "a");
    }

    #[test]
    fn test_scale_paints_bold() {
        let mut tree = NodeTree::new();
        let text = tree.append(tree.root(), Element::text("big"));
        let mut styles = HashMap::new();
        styles.insert(Target::node(text), state(Props::new().scale(1.05)));
        let frame = paint(&scene(tree, styles, 0.0));

        assert!(frame.buffer.get(0, 0).unwrap().attrs.contains(Attr::BOLD));
    }

    #[test]
    fn test_hidden_nodes_skip() {
        let mut tree = NodeTree::new();
        tree.append(tree.root(), Element::text("menu").hidden());
        let frame = paint(&scene(tree, HashMap::new(), 0.0));
        assert_eq!(frame.buffer.to_lines()[0], "");
    }

    #[test]
    fn test_overlay_not_hit() {
        let tree = NodeTree::new();
        let mut s = scene(tree, HashMap::new(), 0.0);
        s.overlays.push(Overlay {
            position: Point::new(20.0, 20.0),
            glyph: '•',
            color: Rgba::WHITE,
            opacity: 1.0,
        });
        let frame = paint(&s);
        assert_eq!(frame.buffer.get(2, 1).unwrap().char, '•' as u32);
        assert_eq!(frame.buffer.get(2, 1).unwrap().bg, BG);
    }
}
