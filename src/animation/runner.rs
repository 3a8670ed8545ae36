//! Animation Runner - one interpreter for every declared animation
//!
//! Sections describe animations as [`AnimationSpec`]s (a timeline plus a
//! trigger). The runner evaluates triggers against the current scroll view,
//! advances each clock, and publishes one resolved [`VisualState`] per target.
//!
//! # Pattern
//!
//! - `AnimationRunner` is a plain struct (deterministic, testable)
//! - The thread-local runner is what the page and sections use
//! - `animate(spec)` returns an [`AnimationHandle`]; dropping it cancels
//!
//! # Composition
//!
//! Every frame starts from [`VisualState::REST`] and overlays each animation's
//! sampled properties in registration order, so later animations win on the
//! channels they touch.
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::animation::{animate, AnimationSpec, Trigger};
//!
//! let handle = animate(AnimationSpec::new(tween, Trigger::top_at(section, 80.0)));
//! // ... each frame ...
//! spark_folio::animation::tick(dt, &ctx);
//! drop(handle); // stops and removes it
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use crate::config::AnimationConfig;
use crate::layout::ComputedLayout;

use super::trigger::{scrub_progress, start_reached, visible_fraction, ScrollView, ToggleActions, Trigger};
use super::tween::{Props, Target, Timeline, Tween, VisualState};

// =============================================================================
// TYPES
// =============================================================================

/// Identifies a registered animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// Declarative animation: what moves, and when.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub timeline: Timeline,
    pub trigger: Trigger,
}

impl AnimationSpec {
    pub fn new(timeline: impl Into<Timeline>, trigger: Trigger) -> Self {
        Self {
            timeline: timeline.into(),
            trigger,
        }
    }
}

/// A trigger that fired during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Started playing forward
    Enter(AnimationId),
    /// Scrolled back past the start and began reversing
    LeaveBack(AnimationId),
    /// Became visible enough and played (one-shot)
    Intersect(AnimationId),
}

/// Geometry the runner evaluates triggers against.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    pub layout: &'a ComputedLayout,
    pub view: ScrollView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playback {
    Idle,
    Forward,
    Reverse,
}

struct Entry {
    id: AnimationId,
    spec: AnimationSpec,
    time: f64,
    playback: Playback,
    /// Last known side of the start line (viewport triggers)
    past_start: Option<bool>,
    /// One-shot triggers that already fired
    fired: bool,
    /// Current and target progress (scrub triggers)
    scrub: f64,
    scrub_target: f64,
    /// Starting values for "to" tweens, per track per target
    origins: Option<Vec<Vec<Props>>>,
    /// Hover tweens: replaced by later tweens on the same channel
    channel: Option<&'static str>,
    release_on_complete: bool,
}

impl Entry {
    fn new(id: AnimationId, spec: AnimationSpec) -> Self {
        Self {
            id,
            spec,
            time: 0.0,
            playback: Playback::Idle,
            past_start: None,
            fired: false,
            scrub: 0.0,
            scrub_target: 0.0,
            origins: None,
            channel: None,
            release_on_complete: false,
        }
    }

    fn play(&mut self, styles: &HashMap<Target, VisualState>) {
        self.playback = Playback::Forward;
        if self.origins.is_none() {
            self.origins = Some(capture_origins(&self.spec.timeline, styles));
        }
    }

    fn is_settled(&self) -> bool {
        match self.playback {
            Playback::Idle => true,
            Playback::Forward => self.time >= self.spec.timeline.total(),
            Playback::Reverse => self.time <= 0.0,
        }
    }

    /// Overlay this entry's sampled properties onto `styles`.
    fn apply(&self, styles: &mut HashMap<Target, VisualState>, time: f64) {
        let empty = Props::default();
        for (track, (start, tween)) in self.spec.timeline.tracks().iter().enumerate() {
            let local = time - start;
            for (i, target) in tween.targets.iter().enumerate() {
                let origin = match (&tween.from, &self.origins) {
                    (Some(_), _) => &empty,
                    (None, Some(origins)) => &origins[track][i],
                    // A "to" tween that never started contributes nothing
                    (None, None) => continue,
                };
                let props = tween.sample(i, local, origin);
                let state = styles.entry(*target).or_insert(VisualState::REST);
                *state = state.with(&props);
            }
        }
    }
}

fn capture_origins(timeline: &Timeline, styles: &HashMap<Target, VisualState>) -> Vec<Vec<Props>> {
    timeline
        .tracks()
        .iter()
        .map(|(_, tween)| {
            tween
                .targets
                .iter()
                .map(|target| {
                    let current = styles.get(target).copied().unwrap_or(VisualState::REST);
                    Props::capture(&current, &tween.to)
                })
                .collect()
        })
        .collect()
}

// =============================================================================
// RUNNER
// =============================================================================

/// Interprets registered animations frame by frame.
pub struct AnimationRunner {
    entries: Vec<Entry>,
    styles: HashMap<Target, VisualState>,
    next_id: u64,
    enabled: bool,
    time_scale: f64,
}

impl Default for AnimationRunner {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

impl AnimationRunner {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            entries: Vec::new(),
            styles: HashMap::new(),
            next_id: 0,
            enabled: config.enabled,
            time_scale: config.time_scale,
        }
    }

    /// Apply animation settings. Disabled animations jump to their end.
    pub fn configure(&mut self, config: &AnimationConfig) {
        self.enabled = config.enabled;
        self.time_scale = config.time_scale;
    }

    fn next_id(&mut self) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register an animation. Nothing moves until the next [`tick`](Self::tick).
    pub fn register(&mut self, spec: AnimationSpec) -> AnimationId {
        let id = self.next_id();
        let mut entry = Entry::new(id, spec);
        if entry.spec.trigger == Trigger::Manual {
            entry.play(&self.styles);
        }
        self.entries.push(entry);
        id
    }

    /// Start a caller-driven "to" tween from the targets' current state.
    ///
    /// Earlier tweens on the same channel that share a target are replaced.
    /// With `release`, the tween is dropped once it settles, handing the
    /// targets back to whatever lies beneath.
    pub fn play_to(&mut self, channel: &'static str, tween: Tween, release: bool) -> AnimationId {
        self.entries.retain(|e| {
            e.channel != Some(channel) || !e.spec.timeline.targets().any(|t| tween.targets.contains(&t))
        });
        let id = self.register(AnimationSpec::new(tween, Trigger::Manual));
        if let Some(entry) = self.entries.last_mut() {
            entry.channel = Some(channel);
            entry.release_on_complete = release;
        }
        id
    }

    /// Remove an animation. Returns false if it was not registered.
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.recompose();
        }
        removed
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any clock is still moving (the loop keeps rendering while true).
    pub fn is_animating(&self) -> bool {
        self.entries.iter().any(|e| {
            !e.is_settled() || (e.scrub - e.scrub_target).abs() > 1e-4
        })
    }

    /// Evaluate triggers, advance clocks, and recompose every target's state.
    pub fn tick(&mut self, dt: f64, ctx: &FrameContext<'_>) -> Vec<TriggerEvent> {
        let dt = dt.max(0.0) * self.time_scale;
        let mut events = Vec::new();
        let Self { entries, styles, enabled, .. } = self;

        for entry in entries.iter_mut() {
            evaluate_trigger(entry, ctx, dt, *enabled, styles, &mut events);

            let total = entry.spec.timeline.total();
            match entry.playback {
                Playback::Forward => {
                    entry.time = if *enabled { (entry.time + dt).min(total) } else { total };
                }
                Playback::Reverse => {
                    entry.time = if *enabled { (entry.time - dt).max(0.0) } else { 0.0 };
                }
                Playback::Idle => {}
            }
        }

        self.entries
            .retain(|e| !(e.release_on_complete && e.is_settled()));
        for entry in self.entries.iter_mut() {
            if entry.is_settled() {
                entry.playback = Playback::Idle;
            }
        }

        self.recompose();
        events
    }

    fn recompose(&mut self) {
        let mut styles = HashMap::with_capacity(self.styles.len());
        for entry in &self.entries {
            let time = match entry.spec.trigger {
                Trigger::Scrub { .. } => entry.scrub * entry.spec.timeline.total(),
                _ => entry.time,
            };
            entry.apply(&mut styles, time);
        }
        self.styles = styles;
    }

    /// Resolved state of a target (rest if nothing animates it).
    pub fn style(&self, target: Target) -> VisualState {
        self.styles.get(&target).copied().unwrap_or(VisualState::REST)
    }

    pub fn styles(&self) -> &HashMap<Target, VisualState> {
        &self.styles
    }

    /// Drop every animation and resolved state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.styles.clear();
    }
}

fn evaluate_trigger(
    entry: &mut Entry,
    ctx: &FrameContext<'_>,
    dt: f64,
    enabled: bool,
    styles: &HashMap<Target, VisualState>,
    events: &mut Vec<TriggerEvent>,
) {
    let rect = entry.spec.trigger.node().and_then(|n| ctx.layout.rect_px(n));

    match entry.spec.trigger {
        Trigger::Immediate => {
            if entry.past_start.is_none() {
                entry.past_start = Some(true);
                entry.play(styles);
                events.push(TriggerEvent::Enter(entry.id));
            }
        }
        Trigger::Viewport { start, toggle, .. } => {
            let Some(rect) = rect else { return };
            let now = start_reached(&rect, start, &ctx.view);
            match (entry.past_start, now) {
                (None | Some(false), true) => {
                    entry.play(styles);
                    events.push(TriggerEvent::Enter(entry.id));
                }
                (Some(true), false) if toggle == ToggleActions::PlayReverse => {
                    entry.playback = Playback::Reverse;
                    events.push(TriggerEvent::LeaveBack(entry.id));
                }
                _ => {}
            }
            entry.past_start = Some(now);
        }
        Trigger::Scrub { smoothing, .. } => {
            let Some(rect) = rect else { return };
            if entry.origins.is_none() {
                entry.origins = Some(capture_origins(&entry.spec.timeline, styles));
            }
            entry.scrub_target = scrub_progress(&rect, &ctx.view);
            entry.scrub = if smoothing <= 0.0 || !enabled {
                entry.scrub_target
            } else {
                let step = (dt / smoothing).min(1.0);
                entry.scrub + (entry.scrub_target - entry.scrub) * step
            };
        }
        Trigger::Intersect { threshold, .. } => {
            let Some(rect) = rect else { return };
            if !entry.fired && visible_fraction(&rect, &ctx.view) >= threshold {
                entry.fired = true;
                entry.play(styles);
                events.push(TriggerEvent::Intersect(entry.id));
            }
        }
        Trigger::Manual => {}
    }
}

// =============================================================================
// THREAD-LOCAL RUNNER
// =============================================================================

thread_local! {
    static RUNNER: RefCell<AnimationRunner> = RefCell::new(AnimationRunner::default());
}

/// Owns a registered animation. Dropping it cancels the animation.
#[must_use = "dropping the handle cancels the animation"]
pub struct AnimationHandle {
    id: Option<AnimationId>,
}

impl AnimationHandle {
    pub fn id(&self) -> Option<AnimationId> {
        self.id
    }

    /// Keep the animation running for the life of the thread.
    pub fn forget(mut self) {
        self.id = None;
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            // The runner may already be gone during thread teardown
            let _ = RUNNER.try_with(|r| {
                if let Ok(mut runner) = r.try_borrow_mut() {
                    runner.cancel(id);
                }
            });
        }
    }
}

/// Register an animation with the thread's runner.
pub fn animate(spec: AnimationSpec) -> AnimationHandle {
    if spec.timeline.is_empty() {
        return AnimationHandle { id: None };
    }
    let id = RUNNER.with(|r| r.borrow_mut().register(spec));
    AnimationHandle { id: Some(id) }
}

/// Start a caller-driven tween (see [`AnimationRunner::play_to`]).
pub fn play_to(channel: &'static str, tween: Tween, release: bool) {
    if tween.targets.is_empty() {
        return;
    }
    RUNNER.with(|r| {
        r.borrow_mut().play_to(channel, tween, release);
    });
}

/// Advance the thread's runner by `dt` seconds.
pub fn tick(dt: f64, ctx: &FrameContext<'_>) -> Vec<TriggerEvent> {
    let events = RUNNER.with(|r| r.borrow_mut().tick(dt, ctx));
    for event in &events {
        tracing::debug!(?event, "animation trigger fired");
    }
    events
}

pub fn style(target: Target) -> VisualState {
    RUNNER.with(|r| r.borrow().style(target))
}

/// Snapshot of every resolved state (read by the painter).
pub fn styles() -> HashMap<Target, VisualState> {
    RUNNER.with(|r| r.borrow().styles().clone())
}

pub fn is_animating() -> bool {
    RUNNER.with(|r| r.borrow().is_animating())
}

pub fn animation_count() -> usize {
    RUNNER.with(|r| r.borrow().len())
}

pub fn configure(config: &AnimationConfig) {
    RUNNER.with(|r| r.borrow_mut().configure(config));
}

/// Reset the thread's runner (for testing).
pub fn reset_animations() {
    RUNNER.with(|r| *r.borrow_mut() = AnimationRunner::default());
}
