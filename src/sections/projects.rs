//! Projects - featured project cards (`#projects`).

use crate::animation::{animate, scroll_reveal, AnimationSpec, Ease, Props, Target, Trigger, Tween};
use crate::content::{Icon, Project, ALL_PROJECTS_URL, PROJECTS};
use crate::layout::{Align, Edges, Element, LinkAction, NodeId, NodeTree, Width};
use crate::theme::Theme;

use super::{card, hover, outline_button, section, section_title, tag, text_link, HoverEffect, Scope, SectionContext};

pub fn build(tree: &mut NodeTree, parent: NodeId, theme: &Theme) -> NodeId {
    let projects = section(tree, parent, "projects");
    section_title(tree, projects, "Featured Projects", theme);

    let list = tree.append(projects, Element::column().class("projects-list").gap(2).max_width(100));
    for project in PROJECTS {
        project_card(tree, list, project, theme);
    }

    let footer = tree.append(projects, Element::row().align(Align::Center));
    let view_all = outline_button(
        tree,
        footer,
        &format!("View All Projects {}", Icon::ArrowRight.glyph()),
        LinkAction::External(ALL_PROJECTS_URL.into()),
        theme,
    );
    if let Some(node) = tree.get_mut(view_all) {
        node.classes.push("view-all".into());
    }

    projects
}

fn project_card(tree: &mut NodeTree, parent: NodeId, project: &Project, theme: &Theme) -> NodeId {
    let node = tree.append(parent, card("project-card", Width::Auto, theme).gap(1));

    let image = tree.append(
        node,
        Element::column()
            .class("project-image")
            .border(theme.border)
            .padding(Edges::symmetric(1, 2))
            .center(),
    );
    let file = project.image.rsplit('/').next().unwrap_or(project.image);
    tree.append(image, Element::text(format!("▣ {file}")).fg(theme.text_muted));

    let content = tree.append(node, Element::column().class("project-content").gap(1));
    tree.append(
        content,
        Element::text(project.title)
            .class("project-title")
            .fg(theme.text)
            .bold(),
    );
    tree.append(
        content,
        Element::text(project.description)
            .class("project-description")
            .fg(theme.text_muted),
    );

    let tags = tree.append(content, Element::row().class("project-tags").wrap().gap(1));
    for tech in project.technologies {
        tree.append(tags, tag(tech, theme).class("tech-tag"));
    }

    let links = tree.append(content, Element::row().class("project-links").gap(3));
    tree.append(
        links,
        text_link(
            &format!("View More {}", Icon::ExternalLink.glyph()),
            LinkAction::External(project.live_url.into()),
            theme,
        )
        .class("project-link"),
    );
    tree.append(
        links,
        text_link(
            &format!("{} GitHub", Icon::Github.glyph()),
            LinkAction::External(project.github_url.into()),
            theme,
        )
        .class("project-link"),
    );

    node
}

pub fn mount(ctx: &SectionContext<'_>) -> Scope {
    let mut scope = Scope::new();
    scope.animation(scroll_reveal(ctx.tree, "#projects .section-title", None));

    for (i, card) in ctx.all("#projects .project-card").into_iter().enumerate() {
        scope.animation(animate(AnimationSpec::new(
            Tween::from_to(
                vec![Target::node(card)],
                Props::new().y(50.0).opacity(0.0),
                Props::new().y(0.0).opacity(1.0),
            )
            .duration(0.8)
            .delay(0.1 * i as f64)
            .ease(Ease::Power3Out),
            Trigger::top_at(card, 85.0),
        )));

        let mut effects = vec![HoverEffect::new("project-card", card, Props::new().y(-10.0), 0.3)];
        if let Some(image) = ctx.within(card, "project-image") {
            effects.push(HoverEffect::new("project-image", image, Props::new().scale(1.05), 0.5));
        }
        if let Some(content) = ctx.within(card, "project-content") {
            effects.push(HoverEffect::new("project-content", content, Props::new().y(-5.0), 0.3));
        }
        scope.listener(hover(card, effects));
    }

    tracing::debug!(?scope, "projects mounted");
    scope
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{animation_count, reset_animations};
    use crate::state::mouse::reset_mouse_state;
    use crate::state::{AppStore, Viewport};
    use crate::types::CellMetrics;

    fn setup() {
        reset_animations();
        reset_mouse_state();
    }

    fn text_of(tree: &NodeTree, selector: &str) -> Vec<String> {
        tree.select_str(selector)
            .into_iter()
            .filter_map(|id| tree.get(id).and_then(|n| n.text()).map(str::to_string))
            .collect()
    }

    #[test]
    fn test_one_card_per_project_in_order() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &Theme::default());

        assert_eq!(tree.select_str(".project-card").len(), PROJECTS.len());
        let expected: Vec<_> = PROJECTS.iter().map(|p| p.title.to_string()).collect();
        assert_eq!(text_of(&tree, ".project-title"), expected);

        let tags: usize = PROJECTS.iter().map(|p| p.technologies.len()).sum();
        assert_eq!(tree.select_str(".tech-tag").len(), tags);
    }

    #[test]
    fn test_links_leave_the_page() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &Theme::default());
        let links: Vec<_> = tree
            .select_str(".project-link")
            .into_iter()
            .filter_map(|id| tree.get(id).and_then(|n| n.link.clone()))
            .collect();
        assert_eq!(links.len(), PROJECTS.len() * 2);
        assert_eq!(links[0], LinkAction::External(PROJECTS[0].live_url.into()));
        assert_eq!(links[1], LinkAction::External(PROJECTS[0].github_url.into()));

        let view_all = tree.select_str(".view-all")[0];
        assert_eq!(
            tree.get(view_all).and_then(|n| n.link.clone()),
            Some(LinkAction::External(ALL_PROJECTS_URL.into()))
        );
    }

    #[test]
    fn test_mount_one_reveal_per_card() {
        setup();
        let theme = Theme::default();
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &theme);
        let store = AppStore::new(Viewport::new(120, 40, CellMetrics::default()));
        let scope = mount(&SectionContext::new(&tree, &store, &theme));
        assert_eq!(animation_count(), 1 + PROJECTS.len());
        assert_eq!(scope.listener_count(), PROJECTS.len());
    }
}
