//! Numeric helpers shared by the clock and the morph engine.

/// Easing curve applied to raw transition progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Easing {
    Linear,
    #[default]
    CubicInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::CubicInOut => ease_in_out_cubic(t),
        }
    }
}

pub fn ease_in_out_cubic(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Cubic Hermite step between `edge0` and `edge1`.
///
/// The normalized input is clamped, so the result is always in `[0, 1]` and
/// non-decreasing in `x`. Collapsed edges give a hard step at `edge0`.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_monotonic(f: impl Fn(f64) -> f64) {
        let mut prev = f(0.0);

        for i in 1..=200 {
            let t = i as f64 / 200.0;
            let val = f(t);
            assert!(val >= prev - 1e-12, "non-monotonic at t={t}: {prev} > {val}");
            prev = val;
        }
    }

    #[test]
    fn cubic_boundaries() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn cubic_clamps_input() {
        assert_eq!(ease_in_out_cubic(-3.0), 0.0);
        assert_eq!(ease_in_out_cubic(7.0), 1.0);
    }

    #[test]
    fn cubic_starts_slow() {
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn curves_are_monotonic() {
        assert_monotonic(ease_in_out_cubic);
        assert_monotonic(|t| smoothstep(0.3, 0.34, t));
        assert_monotonic(|t| Easing::Linear.apply(t));
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(0.2, 0.4, 0.0), 0.0);
        assert_eq!(smoothstep(0.2, 0.4, 0.2), 0.0);
        assert!((smoothstep(0.2, 0.4, 0.3) - 0.5).abs() < 1e-12);
        assert_eq!(smoothstep(0.2, 0.4, 0.4), 1.0);
        assert_eq!(smoothstep(0.2, 0.4, 1.0), 1.0);
    }

    #[test]
    fn smoothstep_collapsed_edges_is_a_hard_step() {
        assert_eq!(smoothstep(0.5, 0.5, 0.49), 0.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.5), 1.0);
        assert_eq!(smoothstep(0.5, 0.5, 0.9), 1.0);
    }
}
