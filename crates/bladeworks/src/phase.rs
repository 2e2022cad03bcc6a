//! Combo phases: the data side of a swing.
//!
//! A phase is pure data. The instance state machine reads it every tick;
//! nothing mutates it after the owning definition is built.

use bladeworks_core::{evaluate, is_monotonic, CurveSegment, EasingKind};
use bladeworks_shared::SQUISH_STRETCH;

/// One movement of a combo.
#[derive(Debug, Clone, PartialEq)]
pub struct ComboPhase {
    /// Angular motion over normalized phase time.
    pub curves: Vec<CurveSegment>,
    /// Peak swing angle (radians).
    pub max_angle: f32,
    /// Base duration at attack speed 1.
    pub duration_ticks: u32,
    /// Blade length in world units.
    pub blade_length: f32,
    /// Swing against the wielder's facing.
    pub flip: bool,
    /// Squish at full rotation, in `[0, 1]` (1 = none).
    pub squish_range: f32,
    /// Multiplier on the wielder's base damage.
    pub damage_multiplier: f32,
}

impl ComboPhase {
    /// Creates a phase with no squish, no flip and unit damage.
    #[must_use]
    pub fn new(curves: Vec<CurveSegment>, max_angle: f32, duration_ticks: u32, blade_length: f32) -> Self {
        Self {
            curves,
            max_angle,
            duration_ticks,
            blade_length,
            flip: false,
            squish_range: 1.0,
            damage_multiplier: 1.0,
        }
    }

    /// Sets the flip flag.
    #[must_use]
    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Sets the squish range.
    #[must_use]
    pub fn with_squish_range(mut self, squish_range: f32) -> Self {
        self.squish_range = squish_range;
        self
    }

    /// Sets the damage multiplier.
    #[must_use]
    pub fn with_damage_multiplier(mut self, damage_multiplier: f32) -> Self {
        self.damage_multiplier = damage_multiplier;
        self
    }

    /// Angular offset from the aim at `progression`.
    #[inline]
    #[must_use]
    pub fn angle_shift(&self, progression: f32) -> f32 {
        self.max_angle * evaluate(progression, &self.curves)
    }

    /// Swing direction for a wielder facing `facing` (+1 or -1).
    #[inline]
    #[must_use]
    pub fn direction(&self, facing: f32) -> f32 {
        let facing = if facing < 0.0 { -1.0 } else { 1.0 };
        if self.flip {
            -facing
        } else {
            facing
        }
    }

    /// Fixes authoring mistakes in place and returns how many it found.
    ///
    /// Unsorted curve starts are sorted, an empty curve becomes a single
    /// linear sweep, and out-of-range or non-finite scalars are clamped.
    pub fn repair(&mut self, weapon: &str, step: usize) -> usize {
        let mut repairs = 0;

        if self.curves.is_empty() {
            tracing::warn!(weapon, step, "Phase has no curves, using a linear sweep");
            self.curves.push(CurveSegment::new(EasingKind::Linear, 0.0, 0.0, 1.0));
            repairs += 1;
        }
        if !is_monotonic(&self.curves) {
            tracing::warn!(weapon, step, "Phase curve starts are unsorted, sorting them");
            self.curves.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
            repairs += 1;
        }
        for pair in self.curves.windows(2) {
            if (pair[0].end_value() - pair[1].start_value).abs() > 1e-3 {
                tracing::warn!(
                    weapon,
                    step,
                    at = pair[1].start_time,
                    "Curve segments do not meet, the swing will pop"
                );
            }
        }
        if !(0.0..=1.0).contains(&self.squish_range) {
            let fixed = if self.squish_range.is_nan() { 1.0 } else { self.squish_range.clamp(0.0, 1.0) };
            tracing::warn!(weapon, step, squish_range = self.squish_range, fixed, "Squish range out of [0, 1]");
            self.squish_range = fixed;
            repairs += 1;
        }
        if !self.max_angle.is_finite() {
            tracing::warn!(weapon, step, "Non-finite max angle, using 0");
            self.max_angle = 0.0;
            repairs += 1;
        }
        if !self.blade_length.is_finite() || self.blade_length < 0.0 {
            tracing::warn!(weapon, step, blade_length = self.blade_length, "Bad blade length, using 0");
            self.blade_length = 0.0;
            repairs += 1;
        }
        if !self.damage_multiplier.is_finite() {
            tracing::warn!(weapon, step, "Non-finite damage multiplier, using 1");
            self.damage_multiplier = 1.0;
            repairs += 1;
        }
        repairs
    }
}

/// Blade squish for a squish range and current angle shift.
///
/// Stretches up to `1 + (1 - range) * 0.6` at zero shift and compresses to
/// `range` at a quarter turn.
#[inline]
#[must_use]
pub fn squish(squish_range: f32, angle_shift: f32) -> f32 {
    let stretched = 1.0 + (1.0 - squish_range) * SQUISH_STRETCH;
    let t = angle_shift.sin().abs();
    stretched + (squish_range - stretched) * t
}

/// Immutable ordered phases of one weapon. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTable {
    phases: Box<[ComboPhase]>,
}

impl PhaseTable {
    /// Builds a table. Returns `None` for an empty list.
    #[must_use]
    pub fn new(phases: Vec<ComboPhase>) -> Option<Self> {
        if phases.is_empty() {
            return None;
        }
        Some(Self {
            phases: phases.into_boxed_slice(),
        })
    }

    /// Number of phases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false: a table holds at least one phase.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phase index used for `combo_step`. Steps past the end reuse the last
    /// phase.
    #[inline]
    #[must_use]
    pub fn clamp_step(&self, combo_step: usize) -> usize {
        combo_step.min(self.phases.len() - 1)
    }

    /// Phase for `combo_step`, clamped into the table.
    #[inline]
    #[must_use]
    pub fn phase(&self, combo_step: usize) -> &ComboPhase {
        &self.phases[self.clamp_step(combo_step)]
    }

    /// Phases in step order.
    pub fn iter(&self) -> impl Iterator<Item = &ComboPhase> {
        self.phases.iter()
    }

    pub(crate) fn repair(&mut self, weapon: &str) -> usize {
        self.phases
            .iter_mut()
            .enumerate()
            .map(|(step, phase)| phase.repair(weapon, step))
            .sum()
    }
}
