//! Piecewise easing curves.
//!
//! A swing's angular motion is authored as a short list of easing segments
//! over normalized phase time. Each segment starts at `start_time` with value
//! `start_value` and moves by `lift` along its easing shape until the next
//! segment takes over.
//!
//! ```text
//! value
//!   1 ┤                         ╭────
//!     │                      ╭──╯        segment 2: PolyIn, lift 1.8
//!     │                   ╭──╯
//!     │            ╭──────╯
//!  -1 ┼────────────╯                     segment 1: SineOut, lift 0.2
//!     └────────────┬──────────────────── progress
//!     0           0.3                 1
//! ```
//!
//! The evaluator never smooths boundaries. A segment whose `start_value`
//! does not match the previous segment's end value produces a visible pop;
//! that is an authoring error, caught at load time by the definition
//! builder's continuity warnings.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// Easing primitive used by a [`CurveSegment`].
///
/// Every kind maps 0 to 0. Every kind except [`EasingKind::SineBump`] maps
/// 1 to 1; the bump rises and returns to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingKind {
    /// Constant velocity.
    #[default]
    Linear,
    /// Slow start (quarter cosine).
    SineIn,
    /// Slow end (quarter sine).
    SineOut,
    /// Slow start and end.
    SineInOut,
    /// Half sine: rises to 1 at the midpoint and falls back to 0.
    SineBump,
    /// `t^e`.
    PolyIn,
    /// `1 - (1 - t)^e`.
    PolyOut,
    /// Polynomial in, then out.
    PolyInOut,
    /// Exponential acceleration (steepness = exponent).
    ExpIn,
    /// Exponential deceleration.
    ExpOut,
    /// Exponential in, then out.
    ExpInOut,
    /// Quarter circle, slow start.
    CircIn,
    /// Quarter circle, slow end.
    CircOut,
    /// Circular in, then out.
    CircInOut,
}

impl EasingKind {
    /// Exponent used by the polynomial kinds when none is authored.
    pub const DEFAULT_POLY_EXPONENT: f32 = 2.0;

    /// Steepness used by the exponential kinds when none is authored.
    pub const DEFAULT_EXP_STEEPNESS: f32 = 10.0;

    /// Applies the easing to `t` (clamped to 0-1).
    ///
    /// `exponent` shapes the polynomial and exponential kinds; the others
    /// ignore it. Non-positive or non-finite exponents fall back to the
    /// defaults.
    #[must_use]
    pub fn apply(self, t: f32, exponent: Option<f32>) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Linear => t,

            Self::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            Self::SineOut => (t * FRAC_PI_2).sin(),
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Self::SineBump => (PI * t).sin(),

            Self::PolyIn => {
                let e = shape(exponent, Self::DEFAULT_POLY_EXPONENT);
                t.powf(e)
            }
            Self::PolyOut => {
                let e = shape(exponent, Self::DEFAULT_POLY_EXPONENT);
                1.0 - (1.0 - t).powf(e)
            }
            Self::PolyInOut => {
                let e = shape(exponent, Self::DEFAULT_POLY_EXPONENT);
                if t < 0.5 {
                    (2.0 * t).powf(e) / 2.0
                } else {
                    1.0 - (2.0 - 2.0 * t).powf(e) / 2.0
                }
            }

            Self::ExpIn => {
                let k = shape(exponent, Self::DEFAULT_EXP_STEEPNESS);
                exp_in(t, k)
            }
            Self::ExpOut => {
                let k = shape(exponent, Self::DEFAULT_EXP_STEEPNESS);
                1.0 - exp_in(1.0 - t, k)
            }
            Self::ExpInOut => {
                let k = shape(exponent, Self::DEFAULT_EXP_STEEPNESS);
                if t < 0.5 {
                    exp_in(2.0 * t, k) / 2.0
                } else {
                    1.0 - exp_in(2.0 - 2.0 * t, k) / 2.0
                }
            }

            Self::CircIn => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Self::CircOut => (1.0 - (t - 1.0) * (t - 1.0)).max(0.0).sqrt(),
            Self::CircInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
                } else {
                    ((1.0 - (2.0 - 2.0 * t).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
                }
            }
        }
    }
}

fn shape(exponent: Option<f32>, default: f32) -> f32 {
    match exponent {
        Some(e) if e.is_finite() && e > 0.0 => e,
        _ => default,
    }
}

/// Exponential ease-in normalized to hit exactly 0 and 1.
fn exp_in(t: f32, steepness: f32) -> f32 {
    let denom = steepness.exp2() - 1.0;
    if denom <= f32::EPSILON {
        return t;
    }
    ((steepness * t).exp2() - 1.0) / denom
}

/// One easing primitive of a piecewise curve. Pure data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSegment {
    /// Easing shape.
    pub easing: EasingKind,
    /// Normalized time (0-1) at which this segment takes over.
    pub start_time: f32,
    /// Curve value at `start_time`.
    pub start_value: f32,
    /// Change in value across the segment.
    pub lift: f32,
    /// Optional shaping exponent.
    #[serde(default)]
    pub exponent: Option<f32>,
}

impl CurveSegment {
    /// Creates a segment with no explicit exponent.
    #[must_use]
    pub const fn new(easing: EasingKind, start_time: f32, start_value: f32, lift: f32) -> Self {
        Self {
            easing,
            start_time,
            start_value,
            lift,
            exponent: None,
        }
    }

    /// Sets the shaping exponent.
    #[must_use]
    pub const fn with_exponent(mut self, exponent: f32) -> Self {
        self.exponent = Some(exponent);
        self
    }

    /// Value at local segment time `local_t` (0-1).
    #[inline]
    #[must_use]
    pub fn value_at(&self, local_t: f32) -> f32 {
        self.start_value + self.easing.apply(local_t, self.exponent) * self.lift
    }

    /// Value at the end of the segment.
    #[must_use]
    pub fn end_value(&self) -> f32 {
        self.value_at(1.0)
    }
}

/// Evaluates a piecewise curve at `progress`.
///
/// `progress` is clamped to 0-1 (NaN counts as 0). The segment in effect is
/// the last one whose `start_time` is at or before `progress`; its local time
/// runs from its own start to the next segment's start (or 1). An empty
/// curve evaluates to 0.
#[must_use]
pub fn evaluate(progress: f32, segments: &[CurveSegment]) -> f32 {
    if segments.is_empty() {
        return 0.0;
    }
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };

    let mut active = 0;
    for (i, segment) in segments.iter().enumerate().skip(1) {
        if segment.start_time <= progress {
            active = i;
        } else {
            break;
        }
    }

    let segment = &segments[active];
    let end = segments.get(active + 1).map_or(1.0, |next| next.start_time);
    let span = end - segment.start_time;
    let local = if span > f32::EPSILON {
        (progress - segment.start_time) / span
    } else {
        1.0
    };

    segment.value_at(local)
}

/// True if segment start times never decrease.
#[must_use]
pub fn is_monotonic(segments: &[CurveSegment]) -> bool {
    segments.windows(2).all(|pair| pair[0].start_time <= pair[1].start_time)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [EasingKind; 14] = [
        EasingKind::Linear,
        EasingKind::SineIn,
        EasingKind::SineOut,
        EasingKind::SineInOut,
        EasingKind::SineBump,
        EasingKind::PolyIn,
        EasingKind::PolyOut,
        EasingKind::PolyInOut,
        EasingKind::ExpIn,
        EasingKind::ExpOut,
        EasingKind::ExpInOut,
        EasingKind::CircIn,
        EasingKind::CircOut,
        EasingKind::CircInOut,
    ];

    fn swing_curve() -> [CurveSegment; 3] {
        [
            CurveSegment::new(EasingKind::SineOut, 0.0, -1.0, 0.25),
            CurveSegment::new(EasingKind::PolyIn, 0.3, -0.75, 1.65).with_exponent(4.0),
            CurveSegment::new(EasingKind::PolyOut, 0.8, 0.9, 0.1).with_exponent(2.0),
        ]
    }

    #[test]
    fn test_easing_endpoints() {
        for kind in ALL {
            assert!(kind.apply(0.0, None).abs() < 1e-5, "{kind:?} at 0");
            let end = kind.apply(1.0, None);
            if kind == EasingKind::SineBump {
                assert!(end.abs() < 1e-5, "{kind:?} at 1");
            } else {
                assert!((end - 1.0).abs() < 1e-5, "{kind:?} at 1: {end}");
            }
        }
    }

    #[test]
    fn test_in_out_kinds_hit_half_at_midpoint() {
        for kind in [
            EasingKind::SineInOut,
            EasingKind::PolyInOut,
            EasingKind::ExpInOut,
            EasingKind::CircInOut,
        ] {
            assert!((kind.apply(0.5, None) - 0.5).abs() < 1e-4, "{kind:?}");
        }
    }

    #[test]
    fn test_exponent_sharpens_poly() {
        let soft = EasingKind::PolyIn.apply(0.5, Some(2.0));
        let sharp = EasingKind::PolyIn.apply(0.5, Some(5.0));
        assert!(sharp < soft);
        // Bad exponents fall back to the default.
        assert_eq!(EasingKind::PolyIn.apply(0.5, Some(-1.0)), soft);
        assert_eq!(EasingKind::PolyIn.apply(0.5, Some(f32::NAN)), soft);
    }

    #[test]
    fn test_clamped_progress_matches_endpoints() {
        let curve = swing_curve();
        let at_zero = evaluate(0.0, &curve);
        let at_one = evaluate(1.0, &curve);
        for p in [-0.01, -1.0, -1e9, f32::NEG_INFINITY] {
            assert_eq!(evaluate(p, &curve), at_zero);
        }
        for p in [1.01, 2.0, 1e9, f32::INFINITY] {
            assert_eq!(evaluate(p, &curve), at_one);
        }
        assert_eq!(evaluate(f32::NAN, &curve), at_zero);
    }

    #[test]
    fn test_continuous_at_authored_boundaries() {
        let curve = swing_curve();
        for boundary in [0.3_f32, 0.8] {
            let before = evaluate(boundary - 1e-4, &curve);
            let after = evaluate(boundary, &curve);
            assert!((before - after).abs() < 1e-2, "pop at {boundary}: {before} vs {after}");
        }
    }

    #[test]
    fn test_mismatched_authoring_pops() {
        // The evaluator does not smooth a bad start value.
        let curve = [
            CurveSegment::new(EasingKind::Linear, 0.0, 0.0, 0.5),
            CurveSegment::new(EasingKind::Linear, 0.5, 2.0, 0.0),
        ];
        assert!((evaluate(0.4999, &curve) - 0.5).abs() < 1e-3);
        assert_eq!(evaluate(0.5, &curve), 2.0);
    }

    #[test]
    fn test_empty_curve_is_zero() {
        assert_eq!(evaluate(0.5, &[]), 0.0);
    }

    #[test]
    fn test_progress_before_first_segment_uses_its_start() {
        let curve = [CurveSegment::new(EasingKind::Linear, 0.2, 3.0, 1.0)];
        assert_eq!(evaluate(0.0, &curve), 3.0);
        assert_eq!(evaluate(1.0, &curve), 4.0);
    }

    #[test]
    fn test_monotonic_check() {
        let curve = swing_curve();
        assert!(is_monotonic(&curve));
        let mut reversed = curve;
        reversed.reverse();
        assert!(!is_monotonic(&reversed));
    }
}
