//! Named animation helpers.
//!
//! Each helper resolves its selectors against the page tree, builds a
//! declarative [`AnimationSpec`] and registers it with the thread's runner.
//! A selector that matches nothing yields an inert handle.

use crate::layout::{NodeId, NodeTree};
use crate::state::mouse::{self, Listener};

use super::easing::Ease;
use super::runner::{animate, play_to, AnimationHandle, AnimationSpec};
use super::trigger::Trigger;
use super::tween::{Props, Target, Tween};

/// One target per non-space character of a text node.
pub fn glyph_targets(tree: &NodeTree, node: NodeId) -> Vec<Target> {
    let count = tree
        .get(node)
        .and_then(|n| n.text())
        .map(|text| text.chars().filter(|c| !c.is_whitespace()).count())
        .unwrap_or(0);
    (0..count as u32).map(|i| Target::glyph(node, i)).collect()
}

fn node_targets(nodes: Vec<NodeId>) -> Vec<Target> {
    nodes.into_iter().map(Target::node).collect()
}

fn first(tree: &NodeTree, selector: &str) -> Option<NodeId> {
    tree.select_str(selector).into_iter().next()
}

fn inert() -> AnimationHandle {
    animate(AnimationSpec::new(super::tween::Timeline::new(), Trigger::Immediate))
}

fn fade_up(targets: Vec<Target>, y: f64) -> Tween {
    Tween::from_to(
        targets,
        Props::new().opacity(0.0).y(y),
        Props::new().opacity(1.0).y(0.0),
    )
}

/// Fade in while rising `y` px, starting right away after `delay`.
pub fn reveal(tree: &NodeTree, target: &str, delay: f64, y: f64) -> AnimationHandle {
    let tween = fade_up(node_targets(tree.select_str(target)), y)
        .duration(1.0)
        .delay(delay)
        .ease(Ease::Power3Out);
    animate(AnimationSpec::new(tween, Trigger::Immediate))
}

/// [`reveal`] applied to each `children` match inside `parent`, one after
/// another.
pub fn sequential_reveal(
    tree: &NodeTree,
    parent: &str,
    children: &str,
    stagger: f64,
    y: f64,
) -> AnimationHandle {
    let selector = format!("{parent} {children}");
    let tween = fade_up(node_targets(tree.select_str(&selector)), y)
        .duration(0.8)
        .stagger(stagger)
        .ease(Ease::Power3Out);
    animate(AnimationSpec::new(tween, Trigger::Immediate))
}

/// Drift the target by `strength` × its own height while it crosses the
/// viewport.
pub fn parallax(tree: &NodeTree, target: &str, strength: f64) -> AnimationHandle {
    let Some(node) = first(tree, target) else {
        return inert();
    };
    let tween = Tween::to(
        node_targets(tree.select_str(target)),
        Props::new().y_percent(strength * 100.0),
    )
    .ease(Ease::None);
    animate(AnimationSpec::new(
        tween,
        Trigger::Scrub {
            trigger: node,
            smoothing: 0.0,
        },
    ))
}

/// Fade in and rise 50 px when `trigger` (default: the target) reaches 80%
/// of the viewport; reverse when scrolled back above it.
pub fn scroll_reveal(tree: &NodeTree, target: &str, trigger: Option<&str>) -> AnimationHandle {
    let Some(trigger) = first(tree, trigger.unwrap_or(target)) else {
        return inert();
    };
    let tween = fade_up(node_targets(tree.select_str(target)), 50.0)
        .duration(0.8)
        .ease(Ease::Power3Out);
    animate(AnimationSpec::new(tween, Trigger::top_at(trigger, 80.0)))
}

/// Scale the node up while hovered. Dropping the guard detaches both
/// listeners.
pub fn hover_animation(node: NodeId) -> Listener {
    let scale_to = move |scale: f64, release: bool| {
        play_to(
            "hover-scale",
            Tween::to(vec![Target::node(node)], Props::new().scale(scale))
                .duration(0.3)
                .ease(Ease::Power2Out),
            release,
        );
    };
    let enter = mouse::on_enter(node, move |_| scale_to(1.05, false));
    let leave = mouse::on_leave(node, move |_| scale_to(1.0, true));

    Listener::new(move || {
        drop(enter);
        drop(leave);
    })
}

/// Reveal the target's text one character at a time when `trigger` reaches
/// 80% of the viewport.
pub fn split_text_reveal(tree: &NodeTree, target: &str, trigger: Option<&str>) -> AnimationHandle {
    let (Some(node), Some(trigger)) = (first(tree, target), first(tree, trigger.unwrap_or(target)))
    else {
        return inert();
    };
    let tween = fade_up(glyph_targets(tree, node), 20.0)
        .duration(0.5)
        .stagger(0.03)
        .ease(Ease::Power3Out);
    animate(AnimationSpec::new(tween, Trigger::top_at(trigger, 80.0)))
}

/// Grow from 90% with a slight overshoot when `trigger` reaches 85% of the
/// viewport.
pub fn scale_animation(tree: &NodeTree, target: &str, trigger: Option<&str>) -> AnimationHandle {
    let Some(trigger) = first(tree, trigger.unwrap_or(target)) else {
        return inert();
    };
    let tween = Tween::from_to(
        node_targets(tree.select_str(target)),
        Props::new().scale(0.9).opacity(0.0),
        Props::new().scale(1.0).opacity(1.0),
    )
    .duration(0.7)
    .ease(Ease::BACK_OUT);
    animate(AnimationSpec::new(tween, Trigger::top_at(trigger, 85.0)))
}
