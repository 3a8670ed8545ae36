//! Mouse Module - Pointer event state and listener registry
//!
//! HitGrid for viewport-cell-to-node lookup (filled by the painter, deepest
//! node last). Hover tracking with enter/leave per node, global pointer-move
//! and click listeners.
//!
//! Every registration returns a [`Listener`] guard. Dropping the guard
//! detaches the handler, so a section's listeners go away with the section.
//!
//! # API
//!
//! - `dispatch(event, tree)` - Hit-test, fire leave/enter, then move/click
//! - `on_enter(node, fn)` / `on_leave(node, fn)` - Per-node hover handlers
//! - `on_pointer_move(fn)` - Global pointer-move handler
//! - `on_click(fn)` - Global click handler
//! - `hovered_node` - Deepest node under the pointer
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::mouse;
//!
//! let _guard = mouse::on_enter(card, |event| {
//!     tracing::debug!(x = event.position.x, "card hovered");
//! });
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::layout::{NodeId, NodeTree};
use crate::types::Point;

// =============================================================================
// TYPES
// =============================================================================

/// Pointer action type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Move,
    Down,
    Up,
    Scroll,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    #[default]
    None,
}

/// Scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Pointer event
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub button: MouseButton,
    /// Viewport column (0-indexed)
    pub col: u16,
    /// Viewport row (0-indexed)
    pub row: u16,
    /// Pointer position in viewport pixels
    pub position: Point,
    /// Scroll direction (only for scroll events)
    pub scroll: Option<ScrollDirection>,
    /// Deepest node at this position (filled by dispatch)
    pub node: Option<NodeId>,
}

impl PointerEvent {
    pub fn new(action: PointerAction, col: u16, row: u16, position: Point) -> Self {
        Self {
            action,
            button: MouseButton::None,
            col,
            row,
            position,
            scroll: None,
            node: None,
        }
    }

    pub fn move_to(col: u16, row: u16, position: Point) -> Self {
        Self::new(PointerAction::Move, col, row, position)
    }

    pub fn down(button: MouseButton, col: u16, row: u16, position: Point) -> Self {
        Self {
            button,
            ..Self::new(PointerAction::Down, col, row, position)
        }
    }

    pub fn up(button: MouseButton, col: u16, row: u16, position: Point) -> Self {
        Self {
            button,
            ..Self::new(PointerAction::Up, col, row, position)
        }
    }

    pub fn scroll(col: u16, row: u16, position: Point, direction: ScrollDirection) -> Self {
        Self {
            scroll: Some(direction),
            ..Self::new(PointerAction::Scroll, col, row, position)
        }
    }
}

// =============================================================================
// LISTENER GUARD
// =============================================================================

/// Owns a registered handler. Dropping it detaches the handler.
#[must_use = "dropping the listener detaches it"]
pub struct Listener {
    cleanup: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    pub fn new(cleanup: impl FnOnce() + 'static) -> Self {
        Self {
            cleanup: Some(Box::new(cleanup)),
        }
    }

    /// Detach now.
    pub fn detach(mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("attached", &self.cleanup.is_some())
            .finish()
    }
}

// =============================================================================
// HIT GRID - O(1) Coordinate to Node Lookup
// =============================================================================

/// A grid for O(1) pointer hit detection over the viewport.
///
/// Each cell holds the node painted there last, or nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<NodeId>>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the grid, clearing all contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![None; width as usize * height as usize];
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a rectangle, clipped to the grid. Negative origins are allowed.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, node: NodeId) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width as i32).min(self.width as i32);
        let y1 = (y + height as i32).min(self.height as i32);
        for cy in y0..y1 {
            let row = cy as usize * self.width as usize;
            for cx in x0..x1 {
                self.cells[row + cx as usize] = Some(node);
            }
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<NodeId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .flatten()
    }
}

thread_local! {
    static HIT_GRID: RefCell<HitGrid> = RefCell::new(HitGrid::new(80, 24));
}

/// Replace the global hit grid (the painter builds a fresh one per frame).
pub fn set_hit_grid(grid: HitGrid) {
    HIT_GRID.with(|g| *g.borrow_mut() = grid);
}

pub fn hit_test(col: u16, row: u16) -> Option<NodeId> {
    HIT_GRID.with(|g| g.borrow().get(col, row))
}

// =============================================================================
// HANDLER REGISTRY
// =============================================================================

/// Handler for pointer events.
pub type PointerHandler = Rc<dyn Fn(&PointerEvent)>;

struct HandlerRegistry {
    enter: HashMap<NodeId, Vec<(usize, PointerHandler)>>,
    leave: HashMap<NodeId, Vec<(usize, PointerHandler)>>,
    moves: Vec<(usize, PointerHandler)>,
    clicks: Vec<(usize, PointerHandler)>,
    /// Hit node and its ancestors, deepest first
    hover_path: Vec<NodeId>,
    next_id: usize,
}

impl HandlerRegistry {
    fn new() -> Self {
        Self {
            enter: HashMap::new(),
            leave: HashMap::new(),
            moves: Vec::new(),
            clicks: Vec::new(),
            hover_path: Vec::new(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

thread_local! {
    static REGISTRY: RefCell<HandlerRegistry> = RefCell::new(HandlerRegistry::new());
}

#[derive(Clone, Copy)]
enum HoverKind {
    Enter,
    Leave,
}

fn on_hover<F>(kind: HoverKind, node: NodeId, handler: F) -> Listener
where
    F: Fn(&PointerEvent) + 'static,
{
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        let map = match kind {
            HoverKind::Enter => &mut reg.enter,
            HoverKind::Leave => &mut reg.leave,
        };
        let handler: PointerHandler = Rc::new(handler);
        map.entry(node).or_default().push((id, handler));
        id
    });

    Listener::new(move || {
        let _ = REGISTRY.try_with(|reg| {
            let mut reg = reg.borrow_mut();
            let map = match kind {
                HoverKind::Enter => &mut reg.enter,
                HoverKind::Leave => &mut reg.leave,
            };
            if let Some(handlers) = map.get_mut(&node) {
                handlers.retain(|(handler_id, _)| *handler_id != id);
                if handlers.is_empty() {
                    map.remove(&node);
                }
            }
        });
    })
}

/// Fire when the pointer enters `node` or any of its descendants.
pub fn on_enter<F>(node: NodeId, handler: F) -> Listener
where
    F: Fn(&PointerEvent) + 'static,
{
    on_hover(HoverKind::Enter, node, handler)
}

/// Fire when the pointer leaves `node` and all of its descendants.
pub fn on_leave<F>(node: NodeId, handler: F) -> Listener
where
    F: Fn(&PointerEvent) + 'static,
{
    on_hover(HoverKind::Leave, node, handler)
}

fn on_global(clicks: bool, handler: PointerHandler) -> Listener {
    let id = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = reg.next_id();
        if clicks {
            reg.clicks.push((id, handler));
        } else {
            reg.moves.push((id, handler));
        }
        id
    });

    Listener::new(move || {
        let _ = REGISTRY.try_with(|reg| {
            let mut reg = reg.borrow_mut();
            let list = if clicks { &mut reg.clicks } else { &mut reg.moves };
            list.retain(|(handler_id, _)| *handler_id != id);
        });
    })
}

/// Fire on every pointer move anywhere in the viewport.
pub fn on_pointer_move<F>(handler: F) -> Listener
where
    F: Fn(&PointerEvent) + 'static,
{
    on_global(false, Rc::new(handler))
}

/// Fire on every left-button press.
pub fn on_click<F>(handler: F) -> Listener
where
    F: Fn(&PointerEvent) + 'static,
{
    on_global(true, Rc::new(handler))
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Dispatch a pointer event: hit-test, fire leave then enter handlers for
/// the change in hover path, then move or click handlers.
///
/// Handlers are collected before any runs, so a handler may register or
/// drop listeners freely.
pub fn dispatch(mut event: PointerEvent, tree: &NodeTree) {
    event.node = hit_test(event.col, event.row);

    let mut path = Vec::new();
    let mut current = event.node;
    while let Some(id) = current {
        path.push(id);
        current = tree.get(id).and_then(|n| n.parent);
    }

    let (leaves, enters, globals) = REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let old = std::mem::replace(&mut reg.hover_path, path.clone());

        let collect = |map: &HashMap<NodeId, Vec<(usize, PointerHandler)>>, nodes: &mut dyn Iterator<Item = NodeId>| {
            nodes
                .filter_map(|n| map.get(&n))
                .flat_map(|handlers| handlers.iter().map(|(_, h)| h.clone()))
                .collect::<Vec<_>>()
        };
        let leaves = collect(&reg.leave, &mut old.iter().copied().filter(|n| !path.contains(n)));
        let enters = collect(&reg.enter, &mut path.iter().rev().copied().filter(|n| !old.contains(n)));

        let globals: Vec<PointerHandler> = match event.action {
            PointerAction::Move => reg.moves.iter().map(|(_, h)| h.clone()).collect(),
            PointerAction::Down if event.button == MouseButton::Left => {
                reg.clicks.iter().map(|(_, h)| h.clone()).collect()
            }
            _ => Vec::new(),
        };
        (leaves, enters, globals)
    });

    for handler in leaves.iter().chain(&enters).chain(&globals) {
        handler(&event);
    }
}

/// Deepest node under the pointer.
pub fn hovered_node() -> Option<NodeId> {
    REGISTRY.with(|reg| reg.borrow().hover_path.first().copied())
}

/// Whether `node` (or one of its descendants) is under the pointer.
pub fn is_hovered(node: NodeId) -> bool {
    REGISTRY.with(|reg| reg.borrow().hover_path.contains(&node))
}

/// Number of attached handlers (for leak checks).
pub fn listener_count() -> usize {
    REGISTRY.with(|reg| {
        let reg = reg.borrow();
        reg.enter.values().map(Vec::len).sum::<usize>()
            + reg.leave.values().map(Vec::len).sum::<usize>()
            + reg.moves.len()
            + reg.clicks.len()
    })
}

/// Reset mouse state (for testing)
pub fn reset_mouse_state() {
    REGISTRY.with(|reg| *reg.borrow_mut() = HandlerRegistry::new());
    HIT_GRID.with(|g| *g.borrow_mut() = HitGrid::new(80, 24));
}

// =============================================================================
// TESTS
// =============================================================================
