//! Footer - name, social links and the back-to-top button (`#footer`).
//!
//! The footer is not a navigable section; it never becomes the active link.
//! Its three blocks fade up one by one the first time each is half visible.

use crate::animation::{animate, AnimationSpec, Ease, Props, Target, Trigger, Tween};
use crate::content::{Icon, COPYRIGHT, OWNER_NAME, SOCIAL_LINKS};
use crate::layout::{Align, Edges, Element, LinkAction, NodeId, NodeTree};
use crate::theme::Theme;

use super::{outline_button, Scope, SectionContext};

/// Fraction of a block that must be visible before it animates.
const VISIBLE_THRESHOLD: f64 = 0.5;

pub fn build(tree: &mut NodeTree, parent: NodeId, theme: &Theme) -> NodeId {
    let footer = tree.append(
        parent,
        Element::column()
            .id("footer")
            .class("footer")
            .padding(Edges::symmetric(2, 4))
            .gap(1),
    );
    tree.append(footer, Element::rule().fg(theme.border));

    let inner = tree.append(footer, Element::column().max_width(100).gap(2));
    let top = tree.append(
        inner,
        Element::row()
            .wrap()
            .align(Align::SpaceBetween)
            .gap(4),
    );

    let identity = tree.append(top, Element::column().class("footer-animate"));
    tree.append(
        identity,
        Element::text(OWNER_NAME)
            .class("footer-name")
            .fg(theme.text)
            .bold()
            .link(LinkAction::Anchor("home".into())),
    );
    tree.append(identity, Element::text(COPYRIGHT).class("copyright").fg(theme.text_muted));

    let socials = tree.append(top, Element::row().class("footer-animate").class("social-links").gap(3));
    for link in SOCIAL_LINKS {
        tree.append(
            socials,
            Element::text(link.icon.glyph().to_string())
                .class("social-link")
                .fg(theme.text_muted)
                .link(LinkAction::External(link.url.into())),
        );
    }

    let bottom = tree.append(inner, Element::row().class("footer-animate").align(Align::Center));
    let back = outline_button(
        tree,
        bottom,
        &format!("{} Back to top", Icon::ArrowUp.glyph()),
        LinkAction::ScrollTop,
        theme,
    );
    if let Some(node) = tree.get_mut(back) {
        node.classes.push("back-to-top".into());
    }

    footer
}

pub fn mount(ctx: &SectionContext<'_>) -> Scope {
    let mut scope = Scope::new();
    for (i, block) in ctx.all("#footer .footer-animate").into_iter().enumerate() {
        scope.animation(animate(AnimationSpec::new(
            Tween::from_to(
                vec![Target::node(block)],
                Props::new().y(16.0).opacity(0.0),
                Props::new().y(0.0).opacity(1.0),
            )
            .duration(0.5)
            .delay(0.1 * i as f64)
            .ease(Ease::Power2Out),
            Trigger::Intersect {
                target: block,
                threshold: VISIBLE_THRESHOLD,
            },
        )));
    }
    tracing::debug!(?scope, "footer mounted");
    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{self as anim, reset_animations, FrameContext, ScrollView, TriggerEvent};
    use crate::layout::{compute_layout, MinHeight};
    use crate::state::{AppStore, Viewport};
    use crate::types::CellMetrics;

    fn setup() {
        reset_animations();
    }

    #[test]
    fn test_footer_is_not_a_section() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &Theme::default());
        let layout = compute_layout(&tree, 120, 30, false, CellMetrics::default()).unwrap();
        assert!(layout.section_bounds(&tree).is_empty());
        assert_eq!(tree.select_str(".footer-animate").len(), 3);
    }

    #[test]
    fn test_links() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &Theme::default());
        let link = |selector: &str| {
            tree.select_str(selector)
                .into_iter()
                .filter_map(|id| tree.get(id).and_then(|n| n.link.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(link(".footer-name"), [LinkAction::Anchor("home".into())]);
        assert_eq!(link(".back-to-top"), [LinkAction::ScrollTop]);
        let socials = link(".social-link");
        assert_eq!(socials.len(), SOCIAL_LINKS.len());
        assert_eq!(socials[0], LinkAction::External(SOCIAL_LINKS[0].url.into()));
    }

    #[test]
    fn test_blocks_fade_in_once_when_half_visible() {
        setup();
        let theme = Theme::default();
        let mut tree = NodeTree::new();
        tree.append(tree.root(), Element::column().min_height(MinHeight::Cells(60)));
        let root = tree.root();
        build(&mut tree, root, &theme);
        let layout = compute_layout(&tree, 120, 30, false, CellMetrics::default()).unwrap();
        let store = AppStore::new(Viewport::new(120, 30, CellMetrics::default()));
        let _scope = mount(&SectionContext::new(&tree, &store, &theme));
        let blocks = tree.select_str(".footer-animate");

        let view = |y| FrameContext {
            layout: &layout,
            view: ScrollView::new(y, 480.0),
        };
        let events = anim::tick(1.0, &view(0.0));
        assert!(events.is_empty());
        assert_eq!(anim::style(Target::node(blocks[0])).opacity, 0.0);

        let bottom = layout.page_height_px() - 480.0;
        let events = anim::tick(0.0, &view(bottom));
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| matches!(e, TriggerEvent::Intersect(_))));

        // Staggered by 0.1 s per block
        anim::tick(0.5, &view(bottom));
        assert!(anim::style(Target::node(blocks[0])).is_rest());
        assert!(anim::style(Target::node(blocks[2])).opacity < 1.0);

        anim::tick(1.0, &view(bottom));
        let events = anim::tick(1.0, &view(0.0));
        assert!(events.is_empty());
        for block in blocks {
            assert!(anim::style(Target::node(block)).is_rest());
        }
    }
}
