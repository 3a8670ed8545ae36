//! Animation Module
//!
//! Declarative tweens, timelines and triggers interpreted by one runner.
//!
//! # Architecture
//!
//! 1. Sections describe what moves: a [`Timeline`] of [`Tween`]s over
//!    [`Target`]s (whole nodes or single characters)
//! 2. A [`Trigger`] says when: immediately, at a viewport threshold, tied to
//!    scroll (scrub), on intersection, or on demand (hover)
//! 3. The [`AnimationRunner`] evaluates triggers every frame and publishes a
//!    [`VisualState`] per target, which the painter applies
//!
//! The helpers in [`library`] cover the common cases.

mod easing;
pub mod library;
mod runner;
mod trigger;
mod tween;

pub use easing::Ease;
pub use library::*;
pub use runner::{
    animate, animation_count, configure, is_animating, play_to, reset_animations, style,
    styles, tick, AnimationHandle, AnimationId, AnimationRunner, AnimationSpec, FrameContext,
    TriggerEvent,
};
pub use trigger::{scrub_progress, start_reached, visible_fraction, ScrollView, ToggleActions, Trigger};
pub use tween::{Position, Props, Target, Timeline, Tween, VisualState};
