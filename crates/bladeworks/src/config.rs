//! # Configuration
//!
//! Two TOML documents feed the engine:
//!
//! - [`EngineConfig`]: timing and capacity knobs shared by every weapon.
//! - [`WeaponConfig`]: one weapon's phases, palette and visuals, turned into
//!   a [`WeaponSwingDefinition`] at load time.
//!
//! Both are read once at startup. Nothing here runs per tick.

use std::fs;
use std::path::Path;

use bladeworks_core::CurveSegment;
use bladeworks_rendering::{TextureId, WeaponVisuals};
use bladeworks_shared::{
    SwingPalette, COLLISION_THICKNESS, COMBO_RESET_TICKS, MIN_PALETTE_COLORS, MIN_SWING_TICKS,
    STASIS_LINGER_TICKS, STASIS_TERMINAL_TICKS, TRAIL_CAPACITY,
};
use serde::{Deserialize, Serialize};

use crate::definition::{DustTags, LightProfile, WeaponSwingDefinition};
use crate::error::{SwingError, SwingResult};
use crate::id::WeaponTypeId;
use crate::phase::ComboPhase;

/// Reads a config file, mapping failures to [`SwingError::Io`].
fn read_file(path: &Path) -> SwingResult<String> {
    fs::read_to_string(path).map_err(|source| SwingError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Engine-wide timing and capacity settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Samples per trail ring buffer.
    pub trail_capacity: usize,
    /// Remaining lifetime at or below which a held swing enters stasis.
    pub stasis_terminal_ticks: i32,
    /// Lifetime a stasis swing is topped back up to while held.
    pub stasis_linger_ticks: i32,
    /// Ticks without activation before the combo resets.
    pub combo_reset_ticks: u32,
    /// Shortest swing, in ticks, regardless of attack speed.
    pub min_swing_ticks: i32,
    /// Instance sub-steps per game tick.
    pub updates_per_tick: u32,
    /// Blade line thickness for hit tests.
    pub collision_thickness: f32,
    /// Live swing instances across all wielders.
    pub max_instances: usize,
    /// Live swing instances per wielder and weapon (active plus lingering).
    pub instances_per_wielder: usize,
    /// Draw commands per recorded frame.
    pub draw_commands: usize,
    /// Ribbon vertices per recorded frame.
    pub draw_vertices: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trail_capacity: TRAIL_CAPACITY,
            stasis_terminal_ticks: STASIS_TERMINAL_TICKS,
            stasis_linger_ticks: STASIS_LINGER_TICKS,
            combo_reset_ticks: COMBO_RESET_TICKS,
            min_swing_ticks: MIN_SWING_TICKS,
            updates_per_tick: 1,
            collision_thickness: COLLISION_THICKNESS,
            max_instances: 256,
            instances_per_wielder: 4,
            draw_commands: 64,
            draw_vertices: TRAIL_CAPACITY * 2,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document. Missing keys keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SwingError::Parse`] for malformed TOML and
    /// [`SwingError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(content: &str) -> SwingResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SwingError::Io`] if the file cannot be read, otherwise the
    /// errors of [`EngineConfig::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> SwingResult<Self> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&read_file(path)?)?;
        tracing::info!(
            path = %path.display(),
            trail_capacity = config.trail_capacity,
            updates_per_tick = config.updates_per_tick,
            "Loaded engine config"
        );
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SwingError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> SwingResult<()> {
        let invalid = |message: &str| Err(SwingError::InvalidConfig(message.to_string()));
        if self.trail_capacity == 0 {
            return invalid("trail_capacity must be at least 1");
        }
        if self.updates_per_tick == 0 {
            return invalid("updates_per_tick must be at least 1");
        }
        if self.stasis_terminal_ticks < 0 {
            return invalid("stasis_terminal_ticks must not be negative");
        }
        if self.stasis_linger_ticks <= self.stasis_terminal_ticks {
            return invalid("stasis_linger_ticks must exceed stasis_terminal_ticks");
        }
        if self.min_swing_ticks < 1 {
            return invalid("min_swing_ticks must be at least 1");
        }
        if !self.collision_thickness.is_finite() || self.collision_thickness < 0.0 {
            return invalid("collision_thickness must be finite and not negative");
        }
        if self.max_instances == 0 || self.instances_per_wielder == 0 {
            return invalid("instance capacities must be at least 1");
        }
        if self.draw_commands == 0 {
            return invalid("draw_commands must be at least 1");
        }
        Ok(())
    }
}

/// One combo phase as authored in a weapon file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Angular motion over normalized phase time.
    #[serde(default)]
    pub curves: Vec<CurveSegment>,
    /// Peak swing angle in degrees.
    pub max_angle_degrees: f32,
    /// Base duration at attack speed 1.
    pub duration_ticks: u32,
    /// Blade length in world units.
    pub blade_length: f32,
    /// Swing against the wielder's facing.
    #[serde(default)]
    pub flip: bool,
    /// Squish at full rotation (1 = none).
    #[serde(default = "default_squish_range")]
    pub squish_range: f32,
    /// Multiplier on the wielder's base damage.
    #[serde(default = "default_damage_multiplier")]
    pub damage_multiplier: f32,
}

fn default_squish_range() -> f32 {
    1.0
}

fn default_damage_multiplier() -> f32 {
    1.0
}

impl From<PhaseConfig> for ComboPhase {
    fn from(config: PhaseConfig) -> Self {
        ComboPhase {
            curves: config.curves,
            max_angle: config.max_angle_degrees.to_radians(),
            duration_ticks: config.duration_ticks,
            blade_length: config.blade_length,
            flip: config.flip,
            squish_range: config.squish_range,
            damage_multiplier: config.damage_multiplier,
        }
    }
}

/// A weapon file.
///
/// ```toml
/// weapon_type = 7
/// name = "Starfall Saber"
/// palette = [0x1A0A2EFF, 0x3B125CFF, 0x7A1FA2FF, 0xC83CE0FF, 0xF08CFFFF, 0xFFF0FFFF]
/// smear_textures = [41, 42, 0]
///
/// [[phases]]
/// max_angle_degrees = 90.0
/// duration_ticks = 30
/// blade_length = 80.0
/// curves = [
///     { easing = "sine_out", start_time = 0.0, start_value = -1.0, lift = 0.2 },
///     { easing = "poly_in", start_time = 0.3, start_value = -0.8, lift = 1.8, exponent = 3.0 },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Weapon type id.
    pub weapon_type: u32,
    /// Display name, used in diagnostics.
    pub name: String,
    /// Packed 0xRRGGBBAA colors, darkest first.
    pub palette: Vec<u32>,
    /// Combo phases in step order.
    pub phases: Vec<PhaseConfig>,
    /// Logical combo length. Defaults to the phase count.
    #[serde(default)]
    pub combo_length: Option<usize>,
    /// Progression at which the combo special fires.
    #[serde(default)]
    pub special_threshold: Option<f32>,
    /// Smear texture per combo step; 0 means no smear for that step.
    #[serde(default)]
    pub smear_textures: Vec<u32>,
    /// Textures and shaping.
    #[serde(default)]
    pub visuals: WeaponVisuals,
    /// Dust tags.
    #[serde(default)]
    pub dust: DustTags,
    /// Light color rule.
    #[serde(default)]
    pub light: LightProfile,
}

impl WeaponConfig {
    /// Parses a weapon document.
    ///
    /// # Errors
    ///
    /// Returns [`SwingError::Parse`] for malformed TOML.
    pub fn from_toml_str(content: &str) -> SwingResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a weapon file.
    ///
    /// # Errors
    ///
    /// Returns [`SwingError::Io`] or [`SwingError::Parse`].
    pub fn load<P: AsRef<Path>>(path: P) -> SwingResult<Self> {
        Self::from_toml_str(&read_file(path.as_ref())?)
    }

    /// Resolves the document into a definition.
    ///
    /// # Errors
    ///
    /// Returns [`SwingError::PaletteTooSmall`] or [`SwingError::NoPhases`].
    pub fn into_definition(self) -> SwingResult<WeaponSwingDefinition> {
        let palette = SwingPalette::from_hex(&self.palette).ok_or_else(|| SwingError::PaletteTooSmall {
            weapon: self.name.clone(),
            count: self.palette.len(),
            min: MIN_PALETTE_COLORS,
        })?;

        let mut visuals = self.visuals;
        visuals.smear_textures = self
            .smear_textures
            .iter()
            .map(|&id| (id != 0).then_some(TextureId(id)))
            .collect();

        let phases = self.phases.into_iter().map(ComboPhase::from).collect();
        let mut definition =
            WeaponSwingDefinition::new(WeaponTypeId(self.weapon_type), self.name, phases, palette)?
                .with_visuals(visuals)
                .with_dust(self.dust)
                .with_light(self.light);
        if let Some(length) = self.combo_length {
            definition = definition.with_combo_length(length);
        }
        if let Some(threshold) = self.special_threshold {
            definition = definition.with_special_threshold(threshold);
        }
        Ok(definition)
    }
}
