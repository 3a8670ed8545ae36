//! Smooth Scroll - page scroll offset with eased scroll-to
//!
//! Wheel and key steps move the offset directly; anchor navigation animates
//! it with an ease-out curve. Time advances through [`SmoothScroll::update`]
//! so playback is deterministic.

use crate::animation::Ease;

/// Duration of an animated scroll, in seconds.
pub const SCROLL_DURATION: f64 = 0.6;

/// Active scroll animation state
#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveScroll {
    from: f64,
    to: f64,
    elapsed: f64,
    duration: f64,
    ease: Ease,
}

/// Page scroll controller.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    animation: Option<ActiveScroll>,
    current: f64,
    max: f64,
    smooth: bool,
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SmoothScroll {
    /// With `smooth` off, every scroll-to jumps.
    pub fn new(smooth: bool) -> Self {
        Self {
            animation: None,
            current: 0.0,
            max: 0.0,
            smooth,
        }
    }

    /// Current offset in pixels.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.current
    }

    /// Largest reachable offset.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final offset once any animation completes.
    pub fn target(&self) -> f64 {
        self.animation.map(|a| a.to).unwrap_or(self.current)
    }

    /// Update the scroll range for a page and viewport height.
    ///
    /// Clamps the current offset and any animation target into range.
    pub fn set_extent(&mut self, page_height: f64, viewport_height: f64) {
        self.max = (page_height - viewport_height).max(0.0);
        self.current = self.current.clamp(0.0, self.max);
        if let Some(anim) = self.animation.as_mut() {
            anim.to = anim.to.clamp(0.0, self.max);
        }
    }

    /// Jump to an offset, cancelling any animation.
    pub fn set_offset(&mut self, offset: f64) {
        self.animation = None;
        self.current = offset.clamp(0.0, self.max);
    }

    /// Move by a delta right away (wheel, arrow keys).
    pub fn scroll_by(&mut self, delta: f64) {
        let base = self.target();
        self.set_offset(base + delta);
    }

    /// Animate to an offset.
    pub fn scroll_to(&mut self, target: f64) {
        let target = target.clamp(0.0, self.max);
        if !self.smooth {
            self.set_offset(target);
            return;
        }
        if (self.current - target).abs() < f64::EPSILON {
            self.animation = None;
            return;
        }
        self.animation = Some(ActiveScroll {
            from: self.current,
            to: target,
            elapsed: 0.0,
            duration: SCROLL_DURATION,
            ease: Ease::Power2Out,
        });
    }

    /// Advance the animation by `dt` seconds. Returns the new offset.
    pub fn update(&mut self, dt: f64) -> f64 {
        if let Some(mut anim) = self.animation {
            anim.elapsed += dt.max(0.0);
            let t = if anim.duration > 0.0 {
                anim.elapsed / anim.duration
            } else {
                1.0
            };
            if t >= 1.0 {
                self.current = anim.to;
                self.animation = None;
            } else {
                self.current = anim.from + (anim.to - anim.from) * anim.ease.apply(t);
                self.animation = Some(anim);
            }
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroller() -> SmoothScroll {
        let mut s = SmoothScroll::new(true);
        s.set_extent(4000.0, 500.0);
        s
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut s = scroller();
        s.scroll_by(-100.0);
        assert_eq!(s.offset(), 0.0);
        s.scroll_by(10_000.0);
        assert_eq!(s.offset(), 3500.0);
    }

    #[test]
    fn test_scroll_to_animates_and_lands() {
        let mut s = scroller();
        s.scroll_to(800.0);
        assert!(s.is_animating());
        assert_eq!(s.target(), 800.0);

        let mid = s.update(SCROLL_DURATION / 2.0);
        assert!(mid > 0.0 && mid < 800.0);

        let mut prev = mid;
        for _ in 0..10 {
            let next = s.update(0.05);
            assert!(next >= prev);
            prev = next;
        }
        assert_eq!(s.offset(), 800.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn test_instant_mode_jumps() {
        let mut s = SmoothScroll::new(false);
        s.set_extent(4000.0, 500.0);
        s.scroll_to(1200.0);
        assert_eq!(s.offset(), 1200.0);
        assert!(!s.is_animating());
    }

    #[test]
    fn test_short_page_has_no_range() {
        let mut s = SmoothScroll::new(true);
        s.set_extent(300.0, 500.0);
        s.scroll_to(100.0);
        assert_eq!(s.max(), 0.0);
        assert!(!s.is_animating());
        assert_eq!(s.offset(), 0.0);
    }

    #[test]
    fn test_wheel_during_animation_starts_from_target() {
        let mut s = scroller();
        s.scroll_to(800.0);
        s.update(0.1);
        s.scroll_by(48.0);
        assert_eq!(s.offset(), 848.0);
        assert!(!s.is_animating());
    }
}
