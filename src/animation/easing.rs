use std::f32::consts::{FRAC_PI_2, PI};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// A full sine period: rises from the start to the end value at the midpoint and
    /// returns to the start, so looping tweens swing back and forth without a jump.
    SineCurve,
}

impl Easing {
    /// Maps linear progress `t` in `0.0..=1.0` to eased progress.
    pub fn value(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::SineCurve => ((t * PI * 2.0 - FRAC_PI_2).sin() + 1.0) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_curve_returns_to_start() {
        assert!(Easing::SineCurve.value(0.0).abs() < 0.0001);
        assert!((Easing::SineCurve.value(0.5) - 1.0).abs() < 0.0001);
        assert!(Easing::SineCurve.value(1.0).abs() < 0.0001);
        assert!((Easing::SineCurve.value(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(Easing::Linear.value(-1.0), 0.0);
        assert_eq!(Easing::Linear.value(2.0), 1.0);
    }
}
