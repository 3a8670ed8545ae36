//! Page Sections - Navbar, Hero, Skills, Projects, About, Contact, Footer.
//!
//! Every section works in two steps:
//!
//! 1. `build` appends the section's markup to the page tree from the fixed
//!    content lists (one node per list entry, in list order)
//! 2. `mount` looks its nodes up again by selector, registers entrance
//!    animations and hover listeners, and returns a [`Scope`] owning them
//!
//! A node that cannot be found skips its animation; nothing here fails.
//!
//! # Lifetime
//!
//! Dropping a [`Scope`] detaches every listener, cancels every animation and
//! stops every frame task the section started.
//!
//! ```ignore
//! let skills = sections::skills::build(&mut tree, root, &theme);
//! let scope = sections::skills::mount(&SectionContext::new(&tree, &store, &theme));
//! drop(scope); // hover listeners gone
//! ```

pub mod about;
pub mod contact;
pub mod footer;
pub mod hero;
pub mod navbar;
pub mod projects;
pub mod skills;

use crate::animation::{play_to, AnimationHandle, Ease, Props, Target, Tween, VisualState};
use crate::layout::{Align, Edges, Element, LinkAction, NodeId, NodeTree, Width};
use crate::state::frame::FrameTask;
use crate::state::mouse::{self, Listener};
use crate::state::AppStore;
use crate::theme::Theme;
use crate::types::Attr;

// =============================================================================
// SCOPE
// =============================================================================

/// Everything a mounted section owns.
#[derive(Default)]
pub struct Scope {
    animations: Vec<AnimationHandle>,
    listeners: Vec<Listener>,
    tasks: Vec<FrameTask>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animation(&mut self, handle: AnimationHandle) {
        self.animations.push(handle);
    }

    pub fn listener(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn task(&mut self, task: FrameTask) {
        self.tasks.push(task);
    }

    /// Take over another scope's guards.
    pub fn extend(&mut self, other: Scope) {
        let Scope {
            animations,
            listeners,
            tasks,
        } = other;
        self.animations.extend(animations);
        self.listeners.extend(listeners);
        self.tasks.extend(tasks);
    }

    /// Number of registered animations (inert handles included).
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty() && self.listeners.is_empty() && self.tasks.is_empty()
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("animations", &self.animations.len())
            .field("listeners", &self.listeners.len())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

/// What `mount` gets to look at.
#[derive(Clone, Copy)]
pub struct SectionContext<'a> {
    pub tree: &'a NodeTree,
    pub store: &'a AppStore,
    pub theme: &'a Theme,
}

impl<'a> SectionContext<'a> {
    pub fn new(tree: &'a NodeTree, store: &'a AppStore, theme: &'a Theme) -> Self {
        Self { tree, store, theme }
    }

    /// First node matching `selector`.
    pub fn first(&self, selector: &str) -> Option<NodeId> {
        self.tree.select_str(selector).into_iter().next()
    }

    pub fn all(&self, selector: &str) -> Vec<NodeId> {
        self.tree.select_str(selector)
    }

    /// First descendant of `parent` tagged with `class`.
    pub fn within(&self, parent: NodeId, class: &str) -> Option<NodeId> {
        self.tree
            .descendants(parent)
            .into_iter()
            .find(|id| self.tree.get(*id).is_some_and(|n| n.has_class(class)))
    }
}

// =============================================================================
// MARKUP HELPERS
// =============================================================================

/// Content sections sit on the page with this much padding (rows, cols).
pub(crate) const SECTION_PADDING: Edges = Edges::symmetric(3, 4);

/// Append a content section root (`#id.section`).
pub(crate) fn section(tree: &mut NodeTree, parent: NodeId, id: &str) -> NodeId {
    tree.append(
        parent,
        Element::column()
            .id(id)
            .class("section")
            .padding(SECTION_PADDING)
            .gap(1),
    )
}

/// Centered bold section heading.
pub(crate) fn section_title(tree: &mut NodeTree, parent: NodeId, text: &str, theme: &Theme) -> NodeId {
    tree.append(
        parent,
        Element::text(text)
            .class("section-title")
            .center()
            .fg(theme.text)
            .bold(),
    )
}

/// Small rounded label (`.tag`).
pub(crate) fn tag(text: &str, theme: &Theme) -> Element {
    Element::text(format!(" {text} "))
        .class("tag")
        .fg(theme.text_muted)
        .bg(theme.surface)
}

/// Inline text link.
pub(crate) fn text_link(label: &str, action: LinkAction, theme: &Theme) -> Element {
    Element::text(label).fg(theme.primary).link(action)
}

/// Filled call-to-action button.
pub(crate) fn button(tree: &mut NodeTree, parent: NodeId, label: &str, action: LinkAction, theme: &Theme) -> NodeId {
    let button = tree.append(
        parent,
        Element::row()
            .class("button")
            .padding(Edges::symmetric(0, 2))
            .bg(theme.primary)
            .link(action),
    );
    tree.append(button, Element::text(label).fg(theme.background).bold());
    button
}

/// Outlined button.
pub(crate) fn outline_button(
    tree: &mut NodeTree,
    parent: NodeId,
    label: &str,
    action: LinkAction,
    theme: &Theme,
) -> NodeId {
    let button = tree.append(
        parent,
        Element::row()
            .class("button")
            .padding(Edges::symmetric(0, 1))
            .border(theme.primary)
            .link(action),
    );
    tree.append(button, Element::text(label).fg(theme.text));
    button
}

/// Bordered card on the surface color.
pub(crate) fn card(class: &str, width: Width, theme: &Theme) -> Element {
    Element::column()
        .class(class)
        .width(width)
        .padding(Edges::symmetric(0, 1))
        .border(theme.border)
        .bg(theme.surface)
}

/// Centered paragraph in the muted color.
pub(crate) fn paragraph(text: &str, max_width: u16, theme: &Theme) -> Element {
    Element::text(text)
        .fg(theme.text_muted)
        .align(Align::Center)
        .max_width(max_width)
}

/// Icon glyph element.
pub(crate) fn icon(icon: crate::content::Icon, color: crate::types::Rgba, class: &str) -> Element {
    Element::text(icon.glyph().to_string())
        .class(class)
        .fg(color)
        .attrs(Attr::BOLD)
}

// =============================================================================
// HOVER FEEDBACK
// =============================================================================

/// One property change played while a node is hovered.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HoverEffect {
    /// Tweens on the same channel and target replace each other
    pub channel: &'static str,
    pub target: NodeId,
    pub props: Props,
    pub duration: f64,
}

impl HoverEffect {
    pub fn new(channel: &'static str, target: NodeId, props: Props, duration: f64) -> Self {
        Self {
            channel,
            target,
            props,
            duration,
        }
    }
}

/// Play `effects` while the pointer is over `node`; return them to rest on
/// leave. The returned guard detaches both listeners.
pub(crate) fn hover(node: NodeId, effects: Vec<HoverEffect>) -> Listener {
    let play = move |effects: &[HoverEffect], entering: bool| {
        for effect in effects {
            let props = if entering {
                effect.props
            } else {
                Props::capture(&VisualState::REST, &effect.props)
            };
            play_to(
                effect.channel,
                Tween::to(vec![Target::node(effect.target)], props)
                    .duration(effect.duration)
                    .ease(Ease::Power2Out),
                !entering,
            );
        }
    };

    let on_enter = effects.clone();
    let enter = mouse::on_enter(node, move |_| play(&on_enter, true));
    let leave = mouse::on_leave(node, move |_| play(&effects, false));

    Listener::new(move || {
        drop(enter);
        drop(leave);
    })
}
