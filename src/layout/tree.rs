//! Node Tree - the page's element tree.
//!
//! Sections build their markup into a [`NodeTree`] with [`Element`] builders.
//! Nodes carry an optional element id (`#skills`), class tags (`.skill-card`)
//! and an optional link action. Animation targets and event listeners refer to
//! nodes either directly by [`NodeId`] or through a [`Selector`].
//!
//! # Example
//!
//! ```ignore
//! let mut tree = NodeTree::new();
//! let section = tree.append(tree.root(), Element::column().id("skills").class("section"));
//! tree.append(section, Element::text("Technical Skills").class("section-title"));
//!
//! let titles = tree.select_str("#skills .section-title");
//! ```

use crate::types::{Attr, Rgba};

// =============================================================================
// IDS AND STYLE TYPES
// =============================================================================

/// Index of a node in its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Main axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Column,
    Row,
}

/// Horizontal alignment for text lines and row children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// Row only: first child at the start, last at the end.
    SpaceBetween,
}

/// Width request for a node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Width {
    #[default]
    Auto,
    Cells(u16),
    Percent(f32),
}

/// Minimum height request for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MinHeight {
    #[default]
    None,
    Cells(u16),
    /// At least one full viewport.
    Viewport,
}

/// Which viewports a node is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Responsive {
    #[default]
    Always,
    WideOnly,
    NarrowOnly,
}

impl Responsive {
    #[inline]
    pub fn shown(self, narrow: bool) -> bool {
        match self {
            Responsive::Always => true,
            Responsive::WideOnly => !narrow,
            Responsive::NarrowOnly => narrow,
        }
    }
}

/// Padding in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const fn all(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    pub const fn symmetric(vertical: u16, horizontal: u16) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// What a node paints.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Box that lays out children.
    Container,
    /// Word-wrapped text.
    Text(String),
    /// One-row horizontal line.
    Rule,
}

/// What activating a node does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// Smooth scroll to the element with this id.
    Anchor(String),
    /// Leave the page (URL, `mailto:`, `tel:`).
    External(String),
    /// Smooth scroll to offset 0.
    ScrollTop,
    /// Open or close the mobile menu.
    ToggleMenu,
}

/// Visual and layout properties of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub direction: Direction,
    pub wrap: bool,
    pub gap: u16,
    pub padding: Edges,
    pub width: Width,
    pub max_width: Option<u16>,
    pub min_height: MinHeight,
    pub align: Align,
    pub border: bool,
    pub fg: Rgba,
    pub bg: Option<Rgba>,
    pub border_color: Rgba,
    pub attrs: Attr,
    /// Taken out of flow and pinned at (left %, top %) of the parent.
    pub anchor: Option<(f32, f32)>,
    pub responsive: Responsive,
    /// Painted relative to the viewport instead of the page (ignores scroll).
    pub fixed: bool,
    /// Hidden nodes take no space and paint nothing.
    pub visible: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Column,
            wrap: false,
            gap: 0,
            padding: Edges::default(),
            width: Width::Auto,
            max_width: None,
            min_height: MinHeight::None,
            align: Align::Start,
            border: false,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: None,
            border_color: Rgba::GRAY,
            attrs: Attr::NONE,
            anchor: None,
            responsive: Responsive::Always,
            fixed: false,
            visible: true,
        }
    }
}

// =============================================================================
// ELEMENT BUILDER
// =============================================================================

/// Builder for a node before it is appended to a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: NodeKind,
    pub element_id: Option<String>,
    pub classes: Vec<String>,
    pub style: Style,
    pub link: Option<LinkAction>,
}

impl Element {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            element_id: None,
            classes: Vec::new(),
            style: Style::default(),
            link: None,
        }
    }

    /// Vertical container.
    pub fn column() -> Self {
        Self::with_kind(NodeKind::Container)
    }

    /// Horizontal container.
    pub fn row() -> Self {
        let mut el = Self::with_kind(NodeKind::Container);
        el.style.direction = Direction::Row;
        el
    }

    /// Text leaf.
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_kind(NodeKind::Text(content.into()))
    }

    /// Horizontal rule.
    pub fn rule() -> Self {
        Self::with_kind(NodeKind::Rule)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.element_id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn gap(mut self, gap: u16) -> Self {
        self.style.gap = gap;
        self
    }

    pub fn wrap(mut self) -> Self {
        self.style.wrap = true;
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.style.padding = padding;
        self
    }

    pub fn width(mut self, width: Width) -> Self {
        self.style.width = width;
        self
    }

    pub fn max_width(mut self, cells: u16) -> Self {
        self.style.max_width = Some(cells);
        self
    }

    pub fn min_height(mut self, min_height: MinHeight) -> Self {
        self.style.min_height = min_height;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.style.align = align;
        self
    }

    pub fn center(self) -> Self {
        self.align(Align::Center)
    }

    pub fn border(mut self, color: Rgba) -> Self {
        self.style.border = true;
        self.style.border_color = color;
        self
    }

    pub fn fg(mut self, fg: Rgba) -> Self {
        self.style.fg = fg;
        self
    }

    pub fn bg(mut self, bg: Rgba) -> Self {
        self.style.bg = Some(bg);
        self
    }

    pub fn attrs(mut self, attrs: Attr) -> Self {
        self.style.attrs |= attrs;
        self
    }

    pub fn bold(self) -> Self {
        self.attrs(Attr::BOLD)
    }

    /// Pin the node at a percentage position inside its parent.
    pub fn anchored(mut self, left_pct: f32, top_pct: f32) -> Self {
        self.style.anchor = Some((left_pct, top_pct));
        self
    }

    pub fn wide_only(mut self) -> Self {
        self.style.responsive = Responsive::WideOnly;
        self
    }

    pub fn narrow_only(mut self) -> Self {
        self.style.responsive = Responsive::NarrowOnly;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.style.fixed = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.style.visible = false;
        self
    }

    pub fn link(mut self, action: LinkAction) -> Self {
        self.link = Some(action);
        self
    }
}

// =============================================================================
// NODE TREE
// =============================================================================

/// A node in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
    pub element_id: Option<String>,
    pub classes: Vec<String>,
    pub style: Style,
    pub link: Option<LinkAction>,
}

impl Node {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Links and buttons are the interactive elements.
    pub fn is_interactive(&self) -> bool {
        self.link.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Arena of nodes rooted at a page container.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    /// Create a tree holding only the root page container.
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            kind: NodeKind::Container,
            element_id: Some("page".to_string()),
            classes: Vec::new(),
            style: Style::default(),
            link: None,
        };
        Self { nodes: vec![root] }
    }

    /// The root page container.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes (including the root).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Append an element as the last child of `parent`.
    ///
    /// An unknown parent attaches to the root.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let parent = if parent.0 < self.nodes.len() {
            parent
        } else {
            self.root()
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind: element.kind,
            element_id: element.element_id,
            classes: element.classes,
            style: element.style,
            link: element.link,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Replace the text of a text node. Returns false for other nodes.
    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(Node {
                kind: NodeKind::Text(s),
                ..
            }) => {
                *s = content.into();
                true
            }
            _ => false,
        }
    }

    /// Show or hide a node. Returns true if the visibility changed.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) if node.style.visible != visible => {
                node.style.visible = visible;
                true
            }
            _ => false,
        }
    }

    /// Whether the node and all its ancestors are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            match self.nodes.get(c.0) {
                Some(node) if node.style.visible => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// All node ids in document (pre-)order, root first.
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(id.0) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Descendants of `id` in document order (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.nodes.get(id.0) else {
            return out;
        };
        let mut stack: Vec<NodeId> = node.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(n) = self.nodes.get(next.0) {
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    /// True if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.nodes.get(id.0).and_then(|n| n.parent);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.nodes.get(p.0).and_then(|n| n.parent);
        }
        false
    }

    /// Nearest interactive node at or above `id`.
    pub fn interactive_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.nodes.get(c.0)?;
            if node.is_interactive() {
                return Some(c);
            }
            current = node.parent;
        }
        None
    }

    /// Find the node with the given element id.
    pub fn find_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|id| self.nodes[id.0].element_id.as_deref() == Some(element_id))
    }

    /// Nodes matching a selector, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        match selector {
            Selector::Node(id) => {
                if id.0 < self.nodes.len() {
                    vec![*id]
                } else {
                    Vec::new()
                }
            }
            Selector::Descendant(parent, child) => {
                let parents = self.select(parent);
                self.document_order()
                    .into_iter()
                    .filter(|id| {
                        self.matches_simple(*id, child)
                            && parents.iter().any(|p| self.is_ancestor(*p, *id))
                    })
                    .collect()
            }
            simple => self
                .document_order()
                .into_iter()
                .filter(|id| self.matches_simple(*id, simple))
                .collect(),
        }
    }

    /// Parse and run a selector string. Unparseable selectors match nothing.
    pub fn select_str(&self, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Some(sel) => self.select(&sel),
            None => Vec::new(),
        }
    }

    fn matches_simple(&self, id: NodeId, selector: &Selector) -> bool {
        let node = &self.nodes[id.0];
        match selector {
            Selector::Id(want) => node.element_id.as_deref() == Some(want.as_str()),
            Selector::Class(want) => node.has_class(want),
            Selector::Node(n) => *n == id,
            Selector::Descendant(..) => self.select(selector).contains(&id),
        }
    }
}

// =============================================================================
// SELECTORS
// =============================================================================

/// A node query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// A node reference.
    Node(NodeId),
    /// `parent child`
    Descendant(Box<Selector>, Box<Selector>),
}

impl Selector {
    /// Parse `#id`, `.class` or a whitespace-separated descendant chain.
    pub fn parse(input: &str) -> Option<Selector> {
        let mut parts = input.split_whitespace().map(Self::parse_simple);
        let mut selector = parts.next()??;
        for part in parts {
            selector = Selector::Descendant(Box::new(selector), Box::new(part?));
        }
        Some(selector)
    }

    fn parse_simple(part: &str) -> Option<Selector> {
        if let Some(id) = part.strip_prefix('#') {
            (!id.is_empty()).then(|| Selector::Id(id.to_string()))
        } else if let Some(class) = part.strip_prefix('.') {
            (!class.is_empty()).then(|| Selector::Class(class.to_string()))
        } else {
            None
        }
    }
}

impl From<NodeId> for Selector {
    fn from(id: NodeId) -> Self {
        Selector::Node(id)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (NodeTree, NodeId, NodeId) {
        let mut tree = NodeTree::new();
        let skills = tree.append(tree.root(), Element::column().id("skills").class("section"));
        tree.append(skills, Element::text("Technical Skills").class("section-title"));
        let grid = tree.append(skills, Element::row().class("grid"));
        for name in ["React", "CSS"] {
            let card = tree.append(grid, Element::column().class("skill-card"));
            tree.append(card, Element::text(name));
        }
        let contact = tree.append(tree.root(), Element::column().id("contact").class("section"));
        tree.append(contact, Element::column().class("skill-card"));
        (tree, skills, contact)
    }

    #[test]
    fn test_find_by_id() {
        let (tree, skills, contact) = sample();
        assert_eq!(tree.find_by_id("skills"), Some(skills));
        assert_eq!(tree.find_by_id("contact"), Some(contact));
        assert_eq!(tree.find_by_id("missing"), None);
    }

    #[test]
    fn test_select_class_document_order() {
        let (tree, _, _) = sample();
        let cards = tree.select_str(".skill-card");
        assert_eq!(cards.len(), 3);
        assert!(cards.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_select_descendant() {
        let (tree, skills, _) = sample();
        let cards = tree.select_str("#skills .skill-card");
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| tree.is_ancestor(skills, *c)));
    }

    #[test]
    fn test_select_missing_is_empty() {
        let (tree, _, _) = sample();
        assert!(tree.select_str(".nothing").is_empty());
        assert!(tree.select_str("garbage").is_empty());
        assert!(tree.select(&Selector::Node(NodeId(999))).is_empty());
    }

    #[test]
    fn test_document_order_is_preorder() {
        let mut tree = NodeTree::new();
        let a = tree.append(tree.root(), Element::column());
        let b = tree.append(tree.root(), Element::column());
        // Appended after b but is a child of a, so it comes before b
        let a1 = tree.append(a, Element::text("x"));
        assert_eq!(tree.document_order(), vec![tree.root(), a, a1, b]);
    }

    #[test]
    fn test_interactive_ancestor() {
        let mut tree = NodeTree::new();
        let link = tree.append(
            tree.root(),
            Element::row().link(LinkAction::Anchor("contact".into())),
        );
        let label = tree.append(link, Element::text("Contact Me"));
        assert_eq!(tree.interactive_ancestor(label), Some(link));
        assert_eq!(tree.interactive_ancestor(tree.root()), None);
    }

    #[test]
    fn test_visibility_inherits() {
        let mut tree = NodeTree::new();
        let menu = tree.append(tree.root(), Element::column().hidden());
        let link = tree.append(menu, Element::text("Home"));
        assert!(!tree.is_visible(link));
        assert!(tree.set_visible(menu, true));
        assert!(!tree.set_visible(menu, true));
        assert!(tree.is_visible(link));
    }

    #[test]
    fn test_set_text() {
        let mut tree = NodeTree::new();
        let t = tree.append(tree.root(), Element::text("a"));
        assert!(tree.set_text(t, "b"));
        assert_eq!(tree.get(t).and_then(|n| n.text()), Some("b"));
        assert!(!tree.set_text(tree.root(), "c"));
    }
}
