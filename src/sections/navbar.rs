//! Navbar - fixed top bar with the logo, section links and the mobile menu.
//!
//! The navbar is the only section with state of its own: the scrolled chrome,
//! the active link and the mobile menu. That state lives in the
//! [`AppStore`](crate::state::AppStore); the page feeds it back here through
//! [`apply`] whenever it changes.

use crate::animation::{
    animate, glyph_targets, play_to, AnimationSpec, Ease, Props, Target, Trigger, Tween,
};
use crate::content::{NavLink, LOGO_TEXT, NAV_LINKS};
use crate::layout::{Align, Edges, Element, LinkAction, NodeId, NodeTree, SectionBounds, Width};
use crate::state::mouse::{self, Listener};
use crate::theme::Theme;
use crate::types::Attr;

use super::{Scope, SectionContext};

const MENU_CLOSED: &str = "☰";
const MENU_OPEN: &str = "✕";

/// Logo characters rise this far on hover (one row).
const LOGO_WAVE_PX: f64 = -16.0;

// =============================================================================
// PURE STATE RULES
// =============================================================================

/// Scrolled chrome is on strictly past the threshold.
pub fn is_scrolled(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Section containing `anchor_y` (top inclusive, bottom exclusive).
///
/// The first match in document order wins; with no match the previous
/// section stays active.
pub fn active_section(bounds: &[SectionBounds], anchor_y: f64, previous: &str) -> String {
    bounds
        .iter()
        .find(|section| section.contains(anchor_y))
        .map(|section| section.id.clone())
        .unwrap_or_else(|| previous.to_string())
}

// =============================================================================
// MARKUP
// =============================================================================

/// Node ids the page needs to restyle the navbar.
#[derive(Debug, Clone, PartialEq)]
pub struct NavbarNodes {
    pub root: NodeId,
    pub logo: NodeId,
    /// Desktop links, one per nav entry
    pub links: Vec<(NodeId, NavLink)>,
    pub menu_button: NodeId,
    pub menu: NodeId,
    /// Mobile menu links, one per nav entry
    pub mobile_links: Vec<(NodeId, NavLink)>,
}

/// Chrome inputs read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NavbarState {
    pub scrolled: bool,
    pub active: String,
    pub menu_open: bool,
}

pub fn build(tree: &mut NodeTree, parent: NodeId, theme: &Theme) -> NavbarNodes {
    let root = tree.append(
        parent,
        Element::column()
            .id("navbar")
            .class("navbar")
            .fixed()
            .anchored(0.0, 0.0)
            .width(Width::Percent(100.0))
            .padding(Edges::symmetric(1, 4)),
    );
    let bar = tree.append(root, Element::row().align(Align::SpaceBetween));

    let logo = tree.append(
        bar,
        Element::text(LOGO_TEXT)
            .class("logo")
            .fg(theme.text)
            .bold()
            .link(LinkAction::Anchor("home".into())),
    );

    let list = tree.append(bar, Element::row().class("nav-links").gap(3).wide_only());
    let links = NAV_LINKS
        .iter()
        .map(|link| {
            let id = tree.append(
                list,
                Element::text(link.label)
                    .class("nav-link")
                    .fg(theme.text_muted)
                    .link(LinkAction::Anchor(link.target_id().into())),
            );
            (id, *link)
        })
        .collect();

    let menu_button = tree.append(
        bar,
        Element::text(MENU_CLOSED)
            .class("menu-button")
            .fg(theme.text)
            .narrow_only()
            .link(LinkAction::ToggleMenu),
    );

    let menu = tree.append(
        root,
        Element::column()
            .class("mobile-menu")
            .narrow_only()
            .hidden()
            .gap(1)
            .padding(Edges::symmetric(1, 0)),
    );
    let mobile_links = NAV_LINKS
        .iter()
        .map(|link| {
            let id = tree.append(
                menu,
                Element::text(link.label)
                    .class("mobile-link")
                    .fg(theme.text_muted)
                    .link(LinkAction::Anchor(link.target_id().into())),
            );
            (id, *link)
        })
        .collect();

    NavbarNodes {
        root,
        logo,
        links,
        menu_button,
        menu,
        mobile_links,
    }
}

/// Restyle the navbar for `state`.
///
/// Returns true when node visibility changed and the page needs a relayout.
pub fn apply(tree: &mut NodeTree, nodes: &NavbarNodes, state: &NavbarState, theme: &Theme) -> bool {
    if let Some(root) = tree.get_mut(nodes.root) {
        root.style.bg = state.scrolled.then_some(theme.surface);
    }

    for (id, link) in nodes.links.iter().chain(&nodes.mobile_links) {
        let active = link.target_id() == state.active;
        if let Some(node) = tree.get_mut(*id) {
            node.style.fg = if active { theme.primary } else { theme.text_muted };
            node.style.attrs = if active { Attr::BOLD } else { Attr::NONE };
        }
    }

    tree.set_text(
        nodes.menu_button,
        if state.menu_open { MENU_OPEN } else { MENU_CLOSED },
    );
    tree.set_visible(nodes.menu, state.menu_open)
}

// =============================================================================
// MOUNT
// =============================================================================

/// Entrance for the bar and its links, plus the logo's character wave.
pub fn mount(ctx: &SectionContext<'_>) -> Scope {
    let mut scope = Scope::new();

    if let Some(root) = ctx.first("#navbar") {
        scope.animation(animate(AnimationSpec::new(
            Tween::from_to(
                vec![Target::node(root)],
                Props::new().y(-100.0).opacity(0.0),
                Props::new().y(0.0).opacity(1.0),
            )
            .duration(0.8)
            .delay(0.2)
            .ease(Ease::Power3Out),
            Trigger::Immediate,
        )));
    }

    let links = ctx.all(".nav-link");
    scope.animation(animate(AnimationSpec::new(
        Tween::from_to(
            links.into_iter().map(Target::node).collect(),
            Props::new().y(-20.0).opacity(0.0),
            Props::new().y(0.0).opacity(1.0),
        )
        .duration(0.6)
        .stagger(0.1)
        .delay(0.8)
        .ease(Ease::Power3Out),
        Trigger::Immediate,
    )));

    if let Some(logo) = ctx.first(".logo") {
        scope.listener(logo_wave(ctx.tree, logo));
    }

    tracing::debug!(?scope, "navbar mounted");
    scope
}

fn logo_wave(tree: &NodeTree, logo: NodeId) -> Listener {
    let glyphs = glyph_targets(tree, logo);
    let wave = move |glyphs: &[Target], y: f64, release: bool| {
        play_to(
            "logo-wave",
            Tween::to(glyphs.to_vec(), Props::new().y(y))
                .duration(0.3)
                .stagger(0.05)
                .ease(Ease::Power2Out),
            release,
        );
    };

    let up = glyphs.clone();
    let enter = mouse::on_enter(logo, move |_| wave(&up, LOGO_WAVE_PX, false));
    let leave = mouse::on_leave(logo, move |_| wave(&glyphs, 0.0, true));
    Listener::new(move || {
        drop(enter);
        drop(leave);
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{animation_count, reset_animations};
    use crate::config::NavbarConfig;
    use crate::state::mouse::{listener_count, reset_mouse_state};
    use crate::state::{AppStore, Viewport};
    use crate::types::CellMetrics;

    fn setup() {
        reset_animations();
        reset_mouse_state();
    }

    fn bounds() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 0.0, 800.0),
            SectionBounds::new("skills", 800.0, 600.0),
            SectionBounds::new("projects", 1400.0, 700.0),
        ]
    }

    fn state(scrolled: bool, active: &str, menu_open: bool) -> NavbarState {
        NavbarState {
            scrolled,
            active: active.to_string(),
            menu_open,
        }
    }

    #[test]
    fn test_scrolled_threshold_is_strict() {
        let threshold = NavbarConfig::default().scrolled_threshold_px;
        assert!(!is_scrolled(0.0, threshold));
        assert!(!is_scrolled(20.0, threshold));
        assert!(is_scrolled(20.5, threshold));
        assert!(is_scrolled(150.0, threshold));
    }

    #[test]
    fn test_active_section_bounds() {
        let b = bounds();
        assert_eq!(active_section(&b, 0.0, "home"), "home");
        assert_eq!(active_section(&b, 150.0, "home"), "home");
        assert_eq!(active_section(&b, 799.0, "home"), "home");
        assert_eq!(active_section(&b, 800.0, "home"), "skills");
        assert_eq!(active_section(&b, 850.0, "home"), "skills");
        assert_eq!(active_section(&b, 1400.0, "skills"), "projects");
    }

    #[test]
    fn test_active_section_first_match_wins() {
        let overlapping = vec![
            SectionBounds::new("about", 0.0, 500.0),
            SectionBounds::new("contact", 300.0, 500.0),
        ];
        assert_eq!(active_section(&overlapping, 400.0, "home"), "about");
    }

    #[test]
    fn test_active_section_keeps_previous_outside() {
        assert_eq!(active_section(&bounds(), 5000.0, "projects"), "projects");
        assert_eq!(active_section(&[], 10.0, "home"), "home");
    }

    #[test]
    fn test_one_link_per_entry() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let nodes = build(&mut tree, root, &Theme::default());
        assert_eq!(nodes.links.len(), NAV_LINKS.len());
        assert_eq!(nodes.mobile_links.len(), NAV_LINKS.len());

        let labels: Vec<_> = tree
            .select_str(".nav-link")
            .into_iter()
            .filter_map(|id| tree.get(id).and_then(|n| n.text()).map(str::to_string))
            .collect();
        let expected: Vec<_> = NAV_LINKS.iter().map(|l| l.label.to_string()).collect();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_apply_styles_and_menu() {
        let theme = Theme::default();
        let mut tree = NodeTree::new();
        let root = tree.root();
        let nodes = build(&mut tree, root, &theme);
        assert!(!tree.is_visible(nodes.menu));

        assert!(apply(&mut tree, &nodes, &state(true, "skills", true), &theme));
        assert!(tree.is_visible(nodes.menu));
        assert_eq!(tree.get(nodes.root).unwrap().style.bg, Some(theme.surface));
        assert_eq!(tree.get(nodes.menu_button).unwrap().text(), Some(MENU_OPEN));

        let skills = nodes.links[1].0;
        let home = nodes.links[0].0;
        assert_eq!(tree.get(skills).unwrap().style.fg, theme.primary);
        assert_eq!(tree.get(home).unwrap().style.fg, theme.text_muted);

        // Same menu state: no relayout
        assert!(!apply(&mut tree, &nodes, &state(false, "home", true), &theme));
        assert_eq!(tree.get(nodes.root).unwrap().style.bg, None);
        assert!(apply(&mut tree, &nodes, &state(false, "home", false), &theme));
        assert!(!tree.is_visible(nodes.menu));
    }

    #[test]
    fn test_mount_registers_entrance_and_logo_hover() {
        setup();
        let theme = Theme::default();
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &theme);
        let store = AppStore::new(Viewport::new(120, 40, CellMetrics::default()));

        let scope = mount(&SectionContext::new(&tree, &store, &theme));
        assert_eq!(animation_count(), 2);
        assert_eq!(listener_count(), 2);

        drop(scope);
        assert_eq!(animation_count(), 0);
        assert_eq!(listener_count(), 0);
    }
}
