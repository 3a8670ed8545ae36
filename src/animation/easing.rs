//! Easing curves.
//!
//! Each curve maps progress in [0, 1] to eased progress. Every curve starts at
//! 0 and ends at 1; `BackOut` overshoots past 1 on the way.

/// Named easing curve used by tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    /// Linear progress. Scrubbed animations always use this.
    None,
    /// Quadratic ease-out: f(t) = 1 - (1-t)²
    Power1Out,
    /// Cubic ease-out: f(t) = 1 - (1-t)³
    Power2Out,
    /// Quartic ease-out: f(t) = 1 - (1-t)⁴
    Power3Out,
    /// Ease-out with overshoot. The parameter is the overshoot strength.
    BackOut(f64),
}

impl Ease {
    /// Overshoot strength used by the scale reveal.
    pub const BACK_OUT: Ease = Ease::BackOut(1.7);

    /// Apply the curve to a progress value. Input is clamped to [0, 1].
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Ease::None => t,
            Ease::Power1Out => power_out(t, 2),
            Ease::Power2Out => power_out(t, 3),
            Ease::Power3Out => power_out(t, 4),
            Ease::BackOut(s) => back_out(t, s),
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power1Out
    }
}

#[inline]
fn power_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

#[inline]
fn back_out(t: f64, s: f64) -> f64 {
    let p = t - 1.0;
    p * p * ((s + 1.0) * p + s) + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [
        Ease::None,
        Ease::Power1Out,
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::BACK_OUT,
    ];

    #[test]
    fn test_easing_boundaries() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-9, "{:?} at t=0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{:?} at t=1", ease);
        }
    }

    #[test]
    fn test_power_curves_monotonic() {
        for ease in [Ease::None, Ease::Power1Out, Ease::Power2Out, Ease::Power3Out] {
            let mut prev = 0.0;
            for i in 0..=20 {
                let v = ease.apply(i as f64 / 20.0);
                assert!(v >= prev, "{:?} not monotonic", ease);
                prev = v;
            }
        }
    }

    #[test]
    fn test_stronger_power_is_ahead() {
        let t = 0.3;
        assert!(Ease::Power3Out.apply(t) > Ease::Power2Out.apply(t));
        assert!(Ease::Power2Out.apply(t) > Ease::Power1Out.apply(t));
        assert!(Ease::Power1Out.apply(t) > Ease::None.apply(t));
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..20)
            .map(|i| Ease::BACK_OUT.apply(i as f64 / 20.0))
            .fold(0.0, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_input_clamped() {
        assert_eq!(Ease::Power2Out.apply(-1.0), 0.0);
        assert_eq!(Ease::Power2Out.apply(2.0), 1.0);
    }
}
