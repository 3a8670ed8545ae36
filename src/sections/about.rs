//! About - bio paragraphs beside a framed picture (`#about`).

use crate::animation::{animate, AnimationSpec, Ease, Position, Props, Target, Timeline, Trigger, Tween};
use crate::content::{ABOUT_BADGE_CAPTION, ABOUT_BADGE_TITLE, ABOUT_PARAGRAPHS, RESUME_URL};
use crate::layout::{Align, Edges, Element, LinkAction, NodeId, NodeTree, Width};
use crate::theme::Theme;

use super::{button, section, Scope, SectionContext};

/// Picture frame contents.
const PICTURE: [&str; 3] = ["</>", "", "~/portfolio $ _"];

pub fn build(tree: &mut NodeTree, parent: NodeId, theme: &Theme) -> NodeId {
    let about = section(tree, parent, "about");
    let layout = tree.append(
        about,
        Element::row()
            .class("about-layout")
            .wrap()
            .gap(6)
            .align(Align::Center)
            .max_width(110),
    );

    let content = tree.append(
        layout,
        Element::column()
            .class("about-content")
            .width(Width::Percent(55.0))
            .gap(1),
    );
    tree.append(
        content,
        Element::text("About Me")
            .class("section-title")
            .fg(theme.text)
            .bold(),
    );
    for text in ABOUT_PARAGRAPHS {
        tree.append(content, Element::text(*text).class("about-text").fg(theme.text_muted));
    }
    let download = button(
        tree,
        content,
        "Download Resume",
        LinkAction::External(RESUME_URL.to_string()),
        theme,
    );
    if let Some(node) = tree.get_mut(download) {
        node.classes.push("download-btn".into());
    }

    let image = tree.append(
        layout,
        Element::column()
            .class("about-image")
            .width(Width::Percent(35.0))
            .border(theme.border)
            .bg(theme.surface)
            .padding(Edges::symmetric(2, 2))
            .center()
            .gap(1),
    );
    for line in PICTURE {
        tree.append(image, Element::text(line).fg(theme.primary));
    }

    let badge = tree.append(
        image,
        Element::column()
            .class("experience-badge")
            .border(theme.border)
            .bg(theme.background)
            .padding(Edges::symmetric(0, 2))
            .center(),
    );
    tree.append(badge, Element::text(ABOUT_BADGE_TITLE).fg(theme.primary).bold());
    tree.append(badge, Element::text(ABOUT_BADGE_CAPTION).fg(theme.text_muted));

    about
}

pub fn mount(ctx: &SectionContext<'_>) -> Scope {
    let mut scope = Scope::new();
    let Some(section) = ctx.first("#about") else {
        return scope;
    };
    let content: Vec<Target> = ctx.all("#about .about-content").into_iter().map(Target::node).collect();
    let image: Vec<Target> = ctx.all("#about .about-image").into_iter().map(Target::node).collect();
    let download: Vec<Target> = ctx.all("#about .download-btn").into_iter().map(Target::node).collect();

    let timeline = Timeline::new()
        .then(
            Tween::from_to(
                content,
                Props::new().x(-50.0).opacity(0.0),
                Props::new().x(0.0).opacity(1.0),
            )
            .duration(0.8)
            .ease(Ease::Power3Out),
        )
        .then_at(
            Tween::from_to(
                image.clone(),
                Props::new().x(50.0).opacity(0.0),
                Props::new().x(0.0).opacity(1.0),
            )
            .duration(0.8)
            .ease(Ease::Power3Out),
            Position::Relative(-0.6),
        )
        .then_at(
            Tween::from_to(
                download,
                Props::new().y(20.0).opacity(0.0),
                Props::new().y(0.0).opacity(1.0),
            )
            .duration(0.6)
            .ease(Ease::BACK_OUT),
            Position::Relative(-0.4),
        );
    scope.animation(animate(AnimationSpec::new(timeline, Trigger::top_at(section, 70.0))));

    scope.animation(animate(AnimationSpec::new(
        Tween::to(image, Props::new().y(-30.0)).duration(1.0).ease(Ease::Power1Out),
        Trigger::Scrub {
            trigger: section,
            smoothing: 1.0,
        },
    )));

    tracing::debug!(?scope, "about mounted");
    scope
}
