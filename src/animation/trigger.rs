//! Trigger conditions.
//!
//! A trigger decides when an animation's clock runs. Geometry checks are pure
//! functions over the trigger node's page rect and the current scroll view.

use crate::layout::NodeId;
use crate::types::PxRect;

/// What happens when a viewport trigger is crossed back upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleActions {
    /// `play none none none`: play once on enter, then stay
    #[default]
    PlayOnce,
    /// `play none none reverse`: play on enter, reverse on leave back
    PlayReverse,
}

/// When an animation plays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Play as soon as it is registered
    Immediate,
    /// Play when the trigger node's top crosses `start` (a fraction of the
    /// viewport height from the top) while scrolling down
    Viewport {
        trigger: NodeId,
        start: f64,
        toggle: ToggleActions,
    },
    /// Tie progress to scroll position between "top bottom" and "bottom top".
    /// `smoothing` is the catch-up time in seconds (0 follows exactly).
    Scrub { trigger: NodeId, smoothing: f64 },
    /// Play once when at least `threshold` of the node's height is visible
    Intersect { target: NodeId, threshold: f64 },
    /// Driven by the caller (hover tweens). Plays on registration.
    Manual,
}

impl Trigger {
    /// `top 80%`, reversing on leave back.
    pub fn top_at(trigger: NodeId, percent: f64) -> Self {
        Trigger::Viewport {
            trigger,
            start: percent / 100.0,
            toggle: ToggleActions::PlayReverse,
        }
    }

    /// `top P%`, playing once.
    pub fn top_at_once(trigger: NodeId, percent: f64) -> Self {
        Trigger::Viewport {
            trigger,
            start: percent / 100.0,
            toggle: ToggleActions::PlayOnce,
        }
    }

    /// Node whose geometry drives this trigger, if any.
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Trigger::Viewport { trigger, .. } | Trigger::Scrub { trigger, .. } => Some(trigger),
            Trigger::Intersect { target, .. } => Some(target),
            Trigger::Immediate | Trigger::Manual => None,
        }
    }
}

/// The visible slice of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollView {
    pub scroll_y: f64,
    pub viewport_height: f64,
}

impl ScrollView {
    pub fn new(scroll_y: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_height,
        }
    }
}

/// Whether the rect's top has reached `start` of the viewport height.
pub fn start_reached(rect: &PxRect, start: f64, view: &ScrollView) -> bool {
    rect.top - view.scroll_y <= start * view.viewport_height
}

/// Scroll progress from "top bottom" (0) to "bottom top" (1).
pub fn scrub_progress(rect: &PxRect, view: &ScrollView) -> f64 {
    let span = view.viewport_height + rect.height;
    if span <= 0.0 {
        return 0.0;
    }
    ((view.scroll_y + view.viewport_height - rect.top) / span).clamp(0.0, 1.0)
}

/// Fraction of the rect's height inside the viewport.
pub fn visible_fraction(rect: &PxRect, view: &ScrollView) -> f64 {
    if rect.height <= 0.0 {
        return 0.0;
    }
    let top = rect.top.max(view.scroll_y);
    let bottom = rect.bottom().min(view.scroll_y + view.viewport_height);
    ((bottom - top) / rect.height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(top: f64, height: f64) -> PxRect {
        PxRect::new(0.0, top, 100.0, height)
    }

    #[test]
    fn test_start_reached_at_80_percent() {
        let r = rect(1000.0, 200.0);
        let view = |y| ScrollView::new(y, 500.0);
        assert!(!start_reached(&r, 0.8, &view(599.0)));
        assert!(start_reached(&r, 0.8, &view(600.0)));
        assert!(start_reached(&r, 0.8, &view(900.0)));
    }

    #[test]
    fn test_scrub_progress_span() {
        let r = rect(1000.0, 200.0);
        assert_eq!(scrub_progress(&r, &ScrollView::new(0.0, 500.0)), 0.0);
        assert_eq!(scrub_progress(&r, &ScrollView::new(500.0, 500.0)), 0.0);
        assert!((scrub_progress(&r, &ScrollView::new(850.0, 500.0)) - 0.5).abs() < 1e-9);
        assert_eq!(scrub_progress(&r, &ScrollView::new(1200.0, 500.0)), 1.0);
    }

    #[test]
    fn test_visible_fraction() {
        let r = rect(1000.0, 200.0);
        assert_eq!(visible_fraction(&r, &ScrollView::new(0.0, 500.0)), 0.0);
        assert_eq!(visible_fraction(&r, &ScrollView::new(600.0, 500.0)), 0.5);
        assert_eq!(visible_fraction(&r, &ScrollView::new(900.0, 500.0)), 1.0);
    }

    #[test]
    fn test_trigger_node() {
        assert_eq!(Trigger::top_at(NodeId(3), 80.0).node(), Some(NodeId(3)));
        assert_eq!(Trigger::Immediate.node(), None);
        match Trigger::top_at(NodeId(3), 85.0) {
            Trigger::Viewport { start, toggle, .. } => {
                assert!((start - 0.85).abs() < 1e-9);
                assert_eq!(toggle, ToggleActions::PlayReverse);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
