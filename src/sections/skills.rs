//! Skills - the technology grid (`#skills`).

use crate::animation::{animate, scroll_reveal, AnimationSpec, Ease, Props, Target, Trigger, Tween};
use crate::content::{SKILLS_BLURB, SKILL_TAGS, TECH_SKILLS};
use crate::layout::{Align, Element, NodeId, NodeTree, Width};
use crate::theme::Theme;

use super::{card, hover, icon, paragraph, section, section_title, tag, HoverEffect, Scope, SectionContext};

pub fn build(tree: &mut NodeTree, parent: NodeId, theme: &Theme) -> NodeId {
    let skills = section(tree, parent, "skills");
    section_title(tree, skills, "Technical Skills", theme);

    let grid = tree.append(
        skills,
        Element::row()
            .class("skills-grid")
            .wrap()
            .align(Align::Center)
            .gap(2)
            .max_width(100),
    );
    for skill in TECH_SKILLS {
        let accent = theme.accent(skill.color);
        let node = tree.append(grid, card("skill-card", Width::Cells(22), theme).center());
        tree.append(node, icon(skill.icon, accent, "skill-icon"));
        tree.append(node, Element::text(skill.name).class("skill-name").fg(theme.text));
    }

    tree.append(skills, paragraph(SKILLS_BLURB, 80, theme).class("skills-blurb"));
    let tags = tree.append(
        skills,
        Element::row().class("skill-tags").wrap().align(Align::Center).gap(2),
    );
    for name in SKILL_TAGS {
        tree.append(tags, tag(name, theme));
    }

    skills
}

pub fn mount(ctx: &SectionContext<'_>) -> Scope {
    let mut scope = Scope::new();
    scope.animation(scroll_reveal(ctx.tree, "#skills .section-title", Some("#skills")));

    let cards = ctx.all("#skills .skill-card");
    if let Some(section) = ctx.first("#skills") {
        scope.animation(animate(AnimationSpec::new(
            Tween::from_to(
                cards.iter().copied().map(Target::node).collect(),
                Props::new().y(30.0).opacity(0.0),
                Props::new().y(0.0).opacity(1.0),
            )
            .duration(0.6)
            .stagger(0.1)
            .ease(Ease::Power3Out),
            Trigger::top_at(section, 80.0),
        )));
    }

    for card in cards {
        let mut effects = vec![HoverEffect::new(
            "skill-card",
            card,
            Props::new().y(-5.0).scale(1.03),
            0.3,
        )];
        if let Some(icon) = ctx.within(card, "skill-icon") {
            effects.push(HoverEffect::new(
                "skill-icon",
                icon,
                Props::new().scale(1.1).rotation(5.0),
                0.3,
            ));
        }
        scope.listener(hover(card, effects));
    }

    tracing::debug!(?scope, "skills mounted");
    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{self as anim, reset_animations, FrameContext, ScrollView};
    use crate::layout::compute_layout;
    use crate::state::mouse::{listener_count, reset_mouse_state};
    use crate::state::{AppStore, Viewport};
    use crate::types::CellMetrics;

    fn setup() {
        reset_animations();
        reset_mouse_state();
    }

    #[test]
    fn test_one_card_per_skill_in_order() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &Theme::default());
        let names: Vec<_> = tree
            .select_str("#skills .skill-name")
            .into_iter()
            .filter_map(|id| tree.get(id).and_then(|n| n.text()).map(str::to_string))
            .collect();
        let expected: Vec<_> = TECH_SKILLS.iter().map(|s| s.name.to_string()).collect();
        assert_eq!(names, expected);
        assert_eq!(tree.select_str("#skills .tag").len(), SKILL_TAGS.len());
    }

    #[test]
    fn test_cards_wait_for_section() {
        setup();
        let theme = Theme::default();
        let mut tree = NodeTree::new();
        // 50-row spacer pushes #skills to 800 px
        tree.append(
            tree.root(),
            Element::column().min_height(crate::layout::MinHeight::Cells(50)),
        );
        let root = tree.root();
        build(&mut tree, root, &theme);
        let layout = compute_layout(&tree, 120, 30, false, CellMetrics::default()).unwrap();
        let store = AppStore::new(Viewport::new(120, 30, CellMetrics::default()));
        let scope = mount(&SectionContext::new(&tree, &store, &theme));
        assert_eq!(listener_count(), TECH_SKILLS.len() * 2);

        let card = tree.select_str(".skill-card")[0];
        let view = |y| FrameContext {
            layout: &layout,
            view: ScrollView::new(y, 480.0),
        };
        anim::tick(1.0, &view(0.0));
        assert_eq!(anim::style(Target::node(card)).opacity, 0.0);

        // 800 - 0.8 * 480 = 416
        anim::tick(0.0, &view(420.0));
        anim::tick(5.0, &view(420.0));
        assert!(anim::style(Target::node(card)).is_rest());

        drop(scope);
        assert_eq!(listener_count(), 0);
    }
}
