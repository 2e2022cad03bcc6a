//! Weapon swing definitions.
//!
//! A definition is everything the engine needs to know about one weapon.
//! It is resolved and repaired once, then shared by `Arc` with every swing
//! of that weapon.

use bladeworks_rendering::WeaponVisuals;
use bladeworks_shared::{Color, SwingPalette};
use serde::{Deserialize, Serialize};

use crate::error::{SwingError, SwingResult};
use crate::id::WeaponTypeId;
use crate::phase::{ComboPhase, PhaseTable};

/// Host particle tags spawned along the swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DustTags {
    /// Dust spawned as the swing starts.
    pub initial: u16,
    /// Dust spawned along the blade during the swing.
    pub secondary: u16,
}

/// How a swing lights its surroundings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LightProfile {
    /// Sample the palette by progression, brighter on later combo steps.
    Palette {
        /// Intensity at combo step 0.
        base_intensity: f32,
        /// Intensity added per combo step.
        per_step: f32,
    },
    /// A constant packed 0xRRGGBBAA color.
    Fixed {
        /// Packed color.
        rgba: u32,
    },
}

impl Default for LightProfile {
    fn default() -> Self {
        Self::Palette {
            base_intensity: 0.6,
            per_step: 0.2,
        }
    }
}

impl LightProfile {
    /// Light color at `combo_step` and `progression`.
    #[must_use]
    pub fn color(&self, palette: &SwingPalette, combo_step: usize, progression: f32) -> Color {
        match *self {
            Self::Palette {
                base_intensity,
                per_step,
            } => {
                let intensity = base_intensity + per_step * combo_step as f32;
                palette.sample(progression).scale(intensity.max(0.0))
            }
            Self::Fixed { rgba } => Color::hex(rgba),
        }
    }
}

/// Everything the engine knows about one weapon.
#[derive(Debug, Clone)]
pub struct WeaponSwingDefinition {
    weapon_type: WeaponTypeId,
    name: String,
    phases: PhaseTable,
    palette: SwingPalette,
    combo_length: usize,
    special_threshold: Option<f32>,
    visuals: WeaponVisuals,
    dust: DustTags,
    light: LightProfile,
}

impl WeaponSwingDefinition {
    /// Builds a definition, repairing recoverable phase mistakes.
    ///
    /// The combo length starts at the phase count.
    ///
    /// # Errors
    ///
    /// Returns [`SwingError::NoPhases`] for an empty phase list.
    pub fn new(
        weapon_type: WeaponTypeId,
        name: impl Into<String>,
        phases: Vec<ComboPhase>,
        palette: SwingPalette,
    ) -> SwingResult<Self> {
        let name = name.into();
        let Some(mut phases) = PhaseTable::new(phases) else {
            return Err(SwingError::NoPhases(name));
        };
        let repairs = phases.repair(&name);
        if repairs > 0 {
            tracing::warn!(weapon = %name, repairs, "Weapon definition repaired");
        }

        Ok(Self {
            weapon_type,
            combo_length: phases.len(),
            name,
            phases,
            palette,
            special_threshold: None,
            visuals: WeaponVisuals::default(),
            dust: DustTags::default(),
            light: LightProfile::default(),
        })
    }

    /// Sets the logical combo length. It may exceed the phase count; extra
    /// steps reuse the last phase. Zero is raised to 1.
    #[must_use]
    pub fn with_combo_length(mut self, combo_length: usize) -> Self {
        if combo_length == 0 {
            tracing::warn!(weapon = %self.name, "Combo length 0, using 1");
        }
        self.combo_length = combo_length.max(1);
        self
    }

    /// Sets the progression at which the combo special fires.
    #[must_use]
    pub fn with_special_threshold(mut self, threshold: f32) -> Self {
        let fixed = if threshold.is_nan() { 0.0 } else { threshold.clamp(0.0, 1.0) };
        if fixed != threshold {
            tracing::warn!(weapon = %self.name, threshold, fixed, "Special threshold out of [0, 1]");
        }
        self.special_threshold = Some(fixed);
        self
    }

    /// Sets the visuals.
    #[must_use]
    pub fn with_visuals(mut self, visuals: WeaponVisuals) -> Self {
        self.visuals = visuals;
        self
    }

    /// Sets the dust tags.
    #[must_use]
    pub fn with_dust(mut self, dust: DustTags) -> Self {
        self.dust = dust;
        self
    }

    /// Sets the light profile.
    #[must_use]
    pub fn with_light(mut self, light: LightProfile) -> Self {
        self.light = light;
        self
    }

    /// Weapon type id.
    #[must_use]
    pub fn weapon_type(&self) -> WeaponTypeId {
        self.weapon_type
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phase table.
    #[must_use]
    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    /// Swing colors.
    #[must_use]
    pub fn palette(&self) -> &SwingPalette {
        &self.palette
    }

    /// Logical combo length.
    #[must_use]
    pub fn combo_length(&self) -> usize {
        self.combo_length
    }

    /// Progression at which the combo special fires, if any.
    #[must_use]
    pub fn special_threshold(&self) -> Option<f32> {
        self.special_threshold
    }

    /// Textures and shaping.
    #[must_use]
    pub fn visuals(&self) -> &WeaponVisuals {
        &self.visuals
    }

    /// Dust tags.
    #[must_use]
    pub fn dust(&self) -> DustTags {
        self.dust
    }

    /// Light color at `combo_step` and `progression`.
    #[must_use]
    pub fn light_color(&self, combo_step: usize, progression: f32) -> Color {
        self.light.color(&self.palette, combo_step, progression)
    }
}
