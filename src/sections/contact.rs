//! Contact - contact method cards and the opportunities call-out (`#contact`).

use crate::animation::{animate, scroll_reveal, AnimationSpec, Ease, Props, Target, Trigger, Tween};
use crate::content::{
    ContactMethod, CONTACT_INTRO, CONTACT_METHODS, OPPORTUNITIES_TEXT, OPPORTUNITIES_TITLE,
    OPPORTUNITIES_URL,
};
use crate::layout::{Align, Edges, Element, LinkAction, NodeId, NodeTree, Width};
use crate::theme::Theme;

use super::{button, card, hover, icon, paragraph, section, section_title, HoverEffect, Scope, SectionContext};

pub fn build(tree: &mut NodeTree, parent: NodeId, theme: &Theme) -> NodeId {
    let contact = section(tree, parent, "contact");
    section_title(tree, contact, "Get In Touch", theme);
    tree.append(contact, paragraph(CONTACT_INTRO, 70, theme).class("contact-intro"));

    let grid = tree.append(
        contact,
        Element::row()
            .class("contact-cards")
            .wrap()
            .align(Align::Center)
            .gap(2)
            .max_width(100),
    );
    for method in CONTACT_METHODS {
        contact_card(tree, grid, method, theme);
    }

    let callout = tree.append(
        contact,
        Element::column()
            .class("opportunities")
            .border(theme.border)
            .bg(theme.surface)
            .padding(Edges::symmetric(1, 3))
            .max_width(80)
            .center()
            .gap(1),
    );
    tree.append(
        callout,
        Element::text(OPPORTUNITIES_TITLE)
            .class("opportunities-title")
            .fg(theme.text)
            .bold(),
    );
    tree.append(callout, paragraph(OPPORTUNITIES_TEXT, 70, theme));
    button(
        tree,
        callout,
        "Send Message",
        LinkAction::External(OPPORTUNITIES_URL.into()),
        theme,
    );

    contact
}

fn contact_card(tree: &mut NodeTree, parent: NodeId, method: &ContactMethod, theme: &Theme) -> NodeId {
    let mut element = card("contact-card", Width::Cells(24), theme).center();
    if let Some(url) = method.url {
        element = element.link(LinkAction::External(url.into()));
    }
    let node = tree.append(parent, element);
    tree.append(node, icon(method.icon, theme.primary, "contact-icon"));
    tree.append(
        node,
        Element::text(method.label)
            .class("contact-label")
            .fg(theme.text)
            .bold(),
    );
    tree.append(
        node,
        Element::text(method.value)
            .class("contact-value")
            .fg(theme.text_muted),
    );
    node
}

pub fn mount(ctx: &SectionContext<'_>) -> Scope {
    let mut scope = Scope::new();
    scope.animation(scroll_reveal(ctx.tree, "#contact .section-title", None));

    let cards = ctx.all("#contact .contact-card");
    if let Some(grid) = ctx.first("#contact .contact-cards") {
        scope.animation(animate(AnimationSpec::new(
            Tween::from_to(
                cards.iter().copied().map(Target::node).collect(),
                Props::new().y(30.0).opacity(0.0),
                Props::new().y(0.0).opacity(1.0),
            )
            .duration(0.6)
            .stagger(0.1)
            .ease(Ease::Power3Out),
            Trigger::top_at(grid, 85.0),
        )));
    }

    for card in cards {
        let mut effects = vec![HoverEffect::new("contact-card", card, Props::new().y(-5.0), 0.3)];
        if let Some(icon) = ctx.within(card, "contact-icon") {
            effects.push(HoverEffect::new("contact-icon", icon, Props::new().scale(1.1), 0.3));
        }
        scope.listener(hover(card, effects));
    }

    tracing::debug!(?scope, "contact mounted");
    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{animation_count, reset_animations};
    use crate::state::mouse::{listener_count, reset_mouse_state};
    use crate::state::{AppStore, Viewport};
    use crate::types::CellMetrics;

    fn setup() {
        reset_animations();
        reset_mouse_state();
    }

    #[test]
    fn test_one_card_per_method_with_link() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &Theme::default());

        let cards = tree.select_str(".contact-card");
        assert_eq!(cards.len(), CONTACT_METHODS.len());
        for (card, method) in cards.iter().zip(CONTACT_METHODS) {
            let link = tree.get(*card).and_then(|n| n.link.clone());
            assert_eq!(link, method.url.map(|url| LinkAction::External(url.into())));
        }

        let labels: Vec<_> = tree
            .select_str(".contact-label")
            .into_iter()
            .filter_map(|id| tree.get(id).and_then(|n| n.text()).map(str::to_string))
            .collect();
        assert_eq!(labels, ["Email", "Phone", "GitHub", "LinkedIn"]);
    }

    #[test]
    fn test_send_message_button() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &Theme::default());
        let buttons = tree.select_str(".opportunities .button");
        assert_eq!(buttons.len(), 1);
        assert_eq!(
            tree.get(buttons[0]).and_then(|n| n.link.clone()),
            Some(LinkAction::External(OPPORTUNITIES_URL.into()))
        );
    }

    #[test]
    fn test_mount_and_unmount() {
        setup();
        let theme = Theme::default();
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &theme);
        let store = AppStore::new(Viewport::new(120, 40, CellMetrics::default()));

        let scope = mount(&SectionContext::new(&tree, &store, &theme));
        assert_eq!(animation_count(), 2);
        assert_eq!(listener_count(), CONTACT_METHODS.len() * 2);

        drop(scope);
        assert_eq!(animation_count(), 0);
        assert_eq!(listener_count(), 0);
    }
}
