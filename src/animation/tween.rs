//! Tweens and timelines.
//!
//! A [`Tween`] interpolates a set of visual properties on one or more targets.
//! A [`Timeline`] places tweens on a shared clock with position offsets.
//! Sampling is a pure function of elapsed time: the runner only decides which
//! way the clock moves.

use crate::layout::NodeId;

use super::easing::Ease;

// =============================================================================
// VISUAL STATE
// =============================================================================

/// Resolved visual properties for one target.
///
/// `x`/`y` are pixel offsets, `y_percent` is an offset relative to the
/// target's own height, `rotation` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub y_percent: f64,
    pub scale: f64,
    pub rotation: f64,
}

impl VisualState {
    /// Untouched state: fully visible, in place, unscaled.
    pub const REST: VisualState = VisualState {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        y_percent: 0.0,
        scale: 1.0,
        rotation: 0.0,
    };

    /// Overlay the channels present in `props`.
    pub fn with(mut self, props: &Props) -> Self {
        if let Some(v) = props.opacity {
            self.opacity = v;
        }
        if let Some(v) = props.x {
            self.x = v;
        }
        if let Some(v) = props.y {
            self.y = v;
        }
        if let Some(v) = props.y_percent {
            self.y_percent = v;
        }
        if let Some(v) = props.scale {
            self.scale = v;
        }
        if let Some(v) = props.rotation {
            self.rotation = v;
        }
        self
    }

    /// Total vertical offset in pixels for a target of the given height.
    pub fn y_offset(&self, height: f64) -> f64 {
        self.y + self.y_percent / 100.0 * height
    }

    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }
}

impl Default for VisualState {
    fn default() -> Self {
        Self::REST
    }
}

// =============================================================================
// PROPS (partial keyframe)
// =============================================================================

/// A partial keyframe. Absent channels are left to whatever lies beneath.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Props {
    pub opacity: Option<f64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub y_percent: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, v: f64) -> Self {
        self.opacity = Some(v);
        self
    }

    pub fn x(mut self, v: f64) -> Self {
        self.x = Some(v);
        self
    }

    pub fn y(mut self, v: f64) -> Self {
        self.y = Some(v);
        self
    }

    pub fn y_percent(mut self, v: f64) -> Self {
        self.y_percent = Some(v);
        self
    }

    pub fn scale(mut self, v: f64) -> Self {
        self.scale = Some(v);
        self
    }

    pub fn rotation(mut self, v: f64) -> Self {
        self.rotation = Some(v);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Read the channels named by `keys` out of a resolved state.
    pub fn capture(state: &VisualState, keys: &Props) -> Props {
        Props {
            opacity: keys.opacity.map(|_| state.opacity),
            x: keys.x.map(|_| state.x),
            y: keys.y.map(|_| state.y),
            y_percent: keys.y_percent.map(|_| state.y_percent),
            scale: keys.scale.map(|_| state.scale),
            rotation: keys.rotation.map(|_| state.rotation),
        }
    }

    /// Interpolate the channels of `to`. A channel missing from `from` starts
    /// at its resting value.
    pub fn lerp(from: &Props, to: &Props, t: f64) -> Props {
        let rest = VisualState::REST;
        let mix = |a: Option<f64>, b: Option<f64>, base: f64| b.map(|b| {
            let a = a.unwrap_or(base);
            a + (b - a) * t
        });
        Props {
            opacity: mix(from.opacity, to.opacity, rest.opacity),
            x: mix(from.x, to.x, rest.x),
            y: mix(from.y, to.y, rest.y),
            y_percent: mix(from.y_percent, to.y_percent, rest.y_percent),
            scale: mix(from.scale, to.scale, rest.scale),
            rotation: mix(from.rotation, to.rotation, rest.rotation),
        }
    }
}

// =============================================================================
// TARGET
// =============================================================================

/// What a tween animates: a whole node, or one character unit of a text node.
///
/// Glyph units count non-space characters only, so `glyph(n, 0)` is the first
/// visible character of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub node: NodeId,
    pub glyph: Option<u32>,
}

impl Target {
    pub fn node(node: NodeId) -> Self {
        Self { node, glyph: None }
    }

    pub fn glyph(node: NodeId, index: u32) -> Self {
        Self {
            node,
            glyph: Some(index),
        }
    }
}

impl From<NodeId> for Target {
    fn from(node: NodeId) -> Self {
        Target::node(node)
    }
}

// =============================================================================
// TWEEN
// =============================================================================

/// A timed transition applied to each target in order.
///
/// With `from: None` the tween starts from whatever state the target shows at
/// the moment it begins playing (a "to" tween).
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    pub targets: Vec<Target>,
    pub from: Option<Props>,
    pub to: Props,
    pub duration: f64,
    pub delay: f64,
    pub stagger: f64,
    pub ease: Ease,
}

impl Tween {
    pub fn from_to(targets: Vec<Target>, from: Props, to: Props) -> Self {
        Self {
            targets,
            from: Some(from),
            to,
            duration: 0.5,
            delay: 0.0,
            stagger: 0.0,
            ease: Ease::default(),
        }
    }

    pub fn to(targets: Vec<Target>, to: Props) -> Self {
        Self {
            from: None,
            ..Self::from_to(targets, Props::default(), to)
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Time from start until the last target settles.
    pub fn total(&self) -> f64 {
        let extra = self.targets.len().saturating_sub(1) as f64 * self.stagger;
        self.delay + extra + self.duration
    }

    /// Eased progress of target `index` at local time `t`.
    pub fn progress(&self, index: usize, t: f64) -> f64 {
        let start = self.delay + index as f64 * self.stagger;
        let raw = if self.duration <= 0.0 {
            if t >= start { 1.0 } else { 0.0 }
        } else {
            (t - start) / self.duration
        };
        self.ease.apply(raw)
    }

    /// Properties of target `index` at local time `t`, starting from `origin`.
    pub fn sample(&self, index: usize, t: f64, origin: &Props) -> Props {
        let from = self.from.as_ref().unwrap_or(origin);
        Props::lerp(from, &self.to, self.progress(index, t))
    }
}

// =============================================================================
// TIMELINE
// =============================================================================

/// Where a tween is placed on a timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// At the current end of the timeline
    End,
    /// Relative to the current end (`-=0.2` is `Relative(-0.2)`)
    Relative(f64),
    /// At an absolute time
    At(f64),
}

/// Tweens laid out on one clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tracks: Vec<(f64, Tween)>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tween at the end of the timeline.
    pub fn then(self, tween: Tween) -> Self {
        self.then_at(tween, Position::End)
    }

    /// Place a tween at a position. Start times never go below zero.
    pub fn then_at(mut self, tween: Tween, position: Position) -> Self {
        let end = self.total();
        let start = match position {
            Position::End => end,
            Position::Relative(offset) => end + offset,
            Position::At(t) => t,
        };
        self.tracks.push((start.max(0.0), tween));
        self
    }

    pub fn tracks(&self) -> &[(f64, Tween)] {
        &self.tracks
    }

    /// Time at which every track has settled.
    pub fn total(&self) -> f64 {
        self.tracks
            .iter()
            .map(|(start, tween)| start + tween.total())
            .fold(0.0, f64::max)
    }

    /// Whether any track has no targets to act on.
    pub fn is_empty(&self) -> bool {
        self.tracks.iter().all(|(_, tween)| tween.targets.is_empty())
    }

    pub fn targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.tracks
            .iter()
            .flat_map(|(_, tween)| tween.targets.iter().copied())
    }
}

impl From<Tween> for Timeline {
    fn from(tween: Tween) -> Self {
        Timeline::new().then(tween)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(n: usize) -> Vec<Target> {
        (0..n).map(|i| Target::node(NodeId(i + 1))).collect()
    }

    #[test]
    fn test_from_state_before_start() {
        let tween = Tween::from_to(targets(1), Props::new().opacity(0.0).y(50.0), Props::new().opacity(1.0).y(0.0))
            .duration(1.0)
            .delay(0.5);
        let p = tween.sample(0, 0.2, &Props::default());
        assert_eq!(p.opacity, Some(0.0));
        assert_eq!(p.y, Some(50.0));
    }

    #[test]
    fn test_end_state_after_duration() {
        let tween = Tween::from_to(targets(1), Props::new().y(50.0), Props::new().y(0.0))
            .duration(1.0)
            .ease(Ease::Power3Out);
        assert_eq!(tween.sample(0, 1.0, &Props::default()).y, Some(0.0));
        assert_eq!(tween.sample(0, 5.0, &Props::default()).y, Some(0.0));
    }

    #[test]
    fn test_stagger_offsets_targets() {
        let tween = Tween::from_to(targets(3), Props::new().opacity(0.0), Props::new().opacity(1.0))
            .duration(1.0)
            .stagger(0.1)
            .ease(Ease::None);
        let a = tween.sample(0, 0.5, &Props::default()).opacity.unwrap();
        let b = tween.sample(1, 0.5, &Props::default()).opacity.unwrap();
        let c = tween.sample(2, 0.5, &Props::default()).opacity.unwrap();
        assert!((a - 0.5).abs() < 1e-9);
        assert!((b - 0.4).abs() < 1e-9);
        assert!((c - 0.3).abs() < 1e-9);
        assert!((tween.total() - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_to_tween_starts_from_origin() {
        let tween = Tween::to(targets(1), Props::new().scale(1.05)).duration(1.0).ease(Ease::None);
        let origin = Props::new().scale(1.0);
        let p = tween.sample(0, 0.5, &origin);
        assert!((p.scale.unwrap() - 1.025).abs() < 1e-9);
        assert_eq!(p.opacity, None);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let tween = Tween::from_to(targets(1), Props::new().x(10.0), Props::new().x(0.0)).duration(0.0);
        assert_eq!(tween.sample(0, 0.0, &Props::default()).x, Some(0.0));
    }

    #[test]
    fn test_timeline_relative_positions() {
        let a = Tween::from_to(targets(1), Props::new().y(100.0), Props::new().y(0.0)).duration(1.0).delay(0.5);
        let b = Tween::from_to(targets(1), Props::new().y(20.0), Props::new().y(0.0)).duration(0.8);
        let c = Tween::from_to(targets(1), Props::new().scale(0.0), Props::new().scale(1.0)).duration(1.0);
        let timeline = Timeline::new()
            .then(a)
            .then_at(b, Position::Relative(-0.2))
            .then_at(c, Position::Relative(-0.5));

        let starts: Vec<f64> = timeline.tracks().iter().map(|(s, _)| *s).collect();
        assert!((starts[0] - 0.0).abs() < 1e-9);
        assert!((starts[1] - 1.3).abs() < 1e-9);
        assert!((starts[2] - 1.6).abs() < 1e-9);
        assert!((timeline.total() - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_visual_state_overlay() {
        let state = VisualState::REST.with(&Props::new().y(-5.0).scale(1.03));
        assert_eq!(state.y, -5.0);
        assert_eq!(state.scale, 1.03);
        assert_eq!(state.opacity, 1.0);
        assert!(!state.is_rest());
        assert_eq!(VisualState::REST.with(&Props::new().y_percent(10.0)).y_offset(200.0), 20.0);
    }

    #[test]
    fn test_capture_reads_requested_channels() {
        let state = VisualState::REST.with(&Props::new().scale(1.2).y(3.0));
        let captured = Props::capture(&state, &Props::new().scale(1.0));
        assert_eq!(captured, Props::new().scale(1.2));
    }
}
