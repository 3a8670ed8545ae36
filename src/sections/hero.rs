//! Hero - the full-viewport landing section (`#home`).
//!
//! The title reveals character by character, then the subtitle, then the
//! background shapes grow in. While mounted, the shapes drift against the
//! pointer.

use crate::animation::{
    animate, glyph_targets, play_to, AnimationSpec, Ease, Position, Props, Target, Timeline,
    Trigger, Tween,
};
use crate::content::{HERO_SUBTITLE, HERO_TITLE};
use crate::layout::{Align, Edges, Element, LinkAction, MinHeight, NodeId, NodeTree};
use crate::renderer::fade;
use crate::state::mouse::{self, Listener};
use crate::state::AppStore;
use crate::theme::Theme;
use crate::types::Point;

use super::{button, outline_button, Scope, SectionContext};

/// Pixel drift per unit of pointer offset from center, per shape.
pub const PARALLAX_FACTORS: [f64; 3] = [20.0, -30.0, 40.0];

/// Shapes: glyph, anchor (left %, top %).
const SHAPES: [(&str, (f32, f32)); 3] = [("◯", (15.0, 20.0)), ("◇", (80.0, 70.0)), ("△", (65.0, 60.0))];

pub fn build(tree: &mut NodeTree, parent: NodeId, theme: &Theme) -> NodeId {
    let hero = tree.append(
        parent,
        Element::column()
            .id("home")
            .class("section")
            .class("hero")
            .min_height(MinHeight::Viewport)
            .center()
            .padding(Edges::symmetric(4, 4)),
    );

    let colors = [theme.primary, theme.highlight, theme.secondary];
    for (i, ((glyph, (left, top)), color)) in SHAPES.iter().zip(colors).enumerate() {
        tree.append(
            hero,
            Element::text(*glyph)
                .class("bg-shape")
                .class(format!("bg-shape-{}", i + 1))
                .fg(fade(color, theme.background, 0.6))
                .anchored(*left, *top),
        );
    }

    let content = tree.append(
        hero,
        Element::column()
            .class("hero-content")
            .max_width(72)
            .center()
            .gap(1),
    );
    tree.append(
        content,
        Element::text(HERO_TITLE)
            .id("hero-title")
            .class("hero-title")
            .center()
            .fg(theme.text)
            .bold(),
    );
    tree.append(
        content,
        Element::text(HERO_SUBTITLE)
            .class("hero-subtitle")
            .center()
            .fg(theme.text_muted),
    );

    let actions = tree.append(content, Element::row().class("hero-actions").align(Align::Center).gap(2));
    button(tree, actions, "View Projects", LinkAction::Anchor("projects".into()), theme);
    outline_button(tree, actions, "Contact Me", LinkAction::Anchor("contact".into()), theme);

    let indicator = tree.append(
        hero,
        Element::column()
            .class("scroll-indicator")
            .anchored(48.0, 88.0)
            .center(),
    );
    tree.append(indicator, Element::text("↓").fg(theme.text_muted));
    tree.append(indicator, Element::text("Scroll").fg(theme.text_muted));

    hero
}

/// Offset of a pointer from the viewport center, each axis in [-1, 1].
pub fn pointer_offset(pointer: Point, width: f64, height: f64) -> (f64, f64) {
    let cx = width / 2.0;
    let cy = height / 2.0;
    if cx <= 0.0 || cy <= 0.0 {
        return (0.0, 0.0);
    }
    ((pointer.x - cx) / cx, (pointer.y - cy) / cy)
}

pub fn mount(ctx: &SectionContext<'_>) -> Scope {
    let mut scope = Scope::new();
    let shapes = ctx.all("#home .bg-shape");

    let Some(title) = ctx.first("#hero-title") else {
        return scope;
    };
    let subtitle: Vec<Target> = ctx.all(".hero-subtitle").into_iter().map(Target::node).collect();

    let timeline = Timeline::new()
        .then(
            Tween::from_to(
                glyph_targets(ctx.tree, title),
                Props::new().y(100.0).opacity(0.0),
                Props::new().y(0.0).opacity(1.0),
            )
            .duration(0.5)
            .stagger(0.03)
            .delay(0.5)
            .ease(Ease::Power3Out),
        )
        .then_at(
            Tween::from_to(
                subtitle,
                Props::new().y(20.0).opacity(0.0),
                Props::new().y(0.0).opacity(1.0),
            )
            .duration(0.8)
            .ease(Ease::Power3Out),
            Position::Relative(-0.2),
        )
        .then_at(
            Tween::from_to(
                shapes.iter().copied().map(Target::node).collect(),
                Props::new().scale(0.0).opacity(0.0),
                Props::new().scale(1.0).opacity(1.0),
            )
            .duration(1.0)
            .stagger(0.1)
            .ease(Ease::Power3Out),
            Position::Relative(-0.5),
        );
    scope.animation(animate(AnimationSpec::new(timeline, Trigger::Immediate)));

    if !shapes.is_empty() {
        scope.listener(shape_parallax(ctx.store.clone(), shapes));
    }

    tracing::debug!(?scope, "hero mounted");
    scope
}

/// Move every shape toward its parallax offset on each pointer move.
fn shape_parallax(store: AppStore, shapes: Vec<NodeId>) -> Listener {
    mouse::on_pointer_move(move |event| {
        let viewport = store.viewport.get();
        let (mx, my) = pointer_offset(event.position, viewport.width_px(), viewport.height_px());
        for (shape, factor) in shapes.iter().zip(PARALLAX_FACTORS) {
            play_to(
                "hero-parallax",
                Tween::to(
                    vec![Target::node(*shape)],
                    Props::new().x(mx * factor).y(my * factor),
                )
                .duration(1.0)
                .ease(Ease::Power1Out),
                false,
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{self as anim, animation_count, reset_animations, FrameContext, ScrollView};
    use crate::layout::compute_layout;
    use crate::state::mouse::{dispatch, listener_count, reset_mouse_state, PointerEvent};
    use crate::state::Viewport;
    use crate::types::CellMetrics;

    fn setup() {
        reset_animations();
        reset_mouse_state();
    }

    #[test]
    fn test_pointer_offset() {
        assert_eq!(pointer_offset(Point::new(400.0, 300.0), 800.0, 600.0), (0.0, 0.0));
        assert_eq!(pointer_offset(Point::new(800.0, 0.0), 800.0, 600.0), (1.0, -1.0));
        assert_eq!(pointer_offset(Point::new(5.0, 5.0), 0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_hero_fills_viewport() {
        let mut tree = NodeTree::new();
        let root = tree.root();
        let hero = build(&mut tree, root, &Theme::default());
        let layout = compute_layout(&tree, 120, 50, false, CellMetrics::default()).unwrap();
        assert_eq!(layout.rect_px(hero).unwrap().height, 800.0);
        assert_eq!(tree.select_str(".bg-shape").len(), 3);
    }

    #[test]
    fn test_title_reveals_per_character() {
        setup();
        let theme = Theme::default();
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &theme);
        let layout = compute_layout(&tree, 120, 50, false, CellMetrics::default()).unwrap();
        let store = AppStore::new(Viewport::new(120, 50, CellMetrics::default()));
        let _scope = mount(&SectionContext::new(&tree, &store, &theme));
        let title = tree.find_by_id("hero-title").unwrap();

        let ctx = FrameContext {
            layout: &layout,
            view: ScrollView::new(0.0, 800.0),
        };
        anim::tick(0.0, &ctx);
        assert_eq!(anim::style(Target::glyph(title, 0)).opacity, 0.0);
        anim::tick(0.7, &ctx);
        let first = anim::style(Target::glyph(title, 0)).opacity;
        let last = anim::style(Target::glyph(title, 20)).opacity;
        assert!(first > last);
        anim::tick(10.0, &ctx);
        assert!(anim::style(Target::glyph(title, 20)).is_rest());
    }

    #[test]
    fn test_pointer_parallax_and_detach() {
        setup();
        let theme = Theme::default();
        let mut tree = NodeTree::new();
        let root = tree.root();
        build(&mut tree, root, &theme);
        let layout = compute_layout(&tree, 100, 50, false, CellMetrics::default()).unwrap();
        let store = AppStore::new(Viewport::new(100, 50, CellMetrics::default()));
        let scope = mount(&SectionContext::new(&tree, &store, &theme));
        assert_eq!(animation_count(), 1);
        let shapes = tree.select_str(".bg-shape");

        // Right edge, vertical center: full offset on x only
        dispatch(PointerEvent::move_to(99, 25, Point::new(800.0, 400.0)), &tree);
        let ctx = FrameContext {
            layout: &layout,
            view: ScrollView::new(0.0, 800.0),
        };
        anim::tick(10.0, &ctx);
        for (shape, factor) in shapes.iter().zip(PARALLAX_FACTORS) {
            let state = anim::style(Target::node(*shape));
            assert!((state.x - factor).abs() < 1e-9);
            assert!(state.y.abs() < 1e-9);
        }

        drop(scope);
        assert_eq!(listener_count(), 0);
    }
}
