//! # Swing Instance
//!
//! The live state of one swing.
//!
//! ## States
//!
//! ```text
//!                 first tick
//! UNINITIALIZED ─────────────► ACTIVE ──── remaining ≤ 0 ─────────► TERMINATED
//!                                │                                     ▲
//!                                │ remaining ≤ terminal && held        │
//!                                ▼                                     │
//!                        POST-SWING STASIS ── released / successor ────┘
//! ```
//!
//! - **ACTIVE**: pose follows the phase curve, one trail sample per tick,
//!   blade hits are tested.
//! - **POST-SWING STASIS**: pose frozen at the end of the swing, lifetime
//!   topped up every tick while the command is held. Does not block a new
//!   activation, which is how combos chain.
//!
//! ## Determinism
//!
//! Progression depends only on elapsed ticks and `swing_time_ticks`. Two
//! instances with the same phase and the same replicated scalars produce
//! bit-identical poses.

use std::sync::Arc;

use bladeworks_core::{BladeSegment, TrailRingBuffer, TrailSample};
use bladeworks_rendering::{DrawList, RenderPipeline, StageGate, SwingFrame};
use bladeworks_shared::{SwingSync, Vec2};

use crate::config::EngineConfig;
use crate::definition::WeaponSwingDefinition;
use crate::hooks::{HitInfo, HitTarget, SwingContext, SwingHooks};
use crate::phase::{squish, ComboPhase};

/// Lifecycle state of a swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwingState {
    /// Spawned, not yet ticked.
    Uninitialized,
    /// Swinging.
    Active,
    /// Lingering at the end of the swing while the command is held.
    PostSwingStasis,
    /// Done. The controller frees it at the end of the tick.
    Terminated,
}

/// How a swing is launched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    /// Wielder anchor at spawn.
    pub origin: Vec2,
    /// Aim direction (radians) the swing sweeps around.
    pub base_rotation: f32,
    /// Wielder facing: +1 or -1.
    pub facing: f32,
    /// Damage before the phase multiplier.
    pub base_damage: f32,
    /// Attack speed multiplier (2 = twice as fast).
    pub attack_speed: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            base_rotation: 0.0,
            facing: 1.0,
            base_damage: 0.0,
            attack_speed: 1.0,
        }
    }
}

impl SpawnParams {
    /// Replaces non-finite values with defaults.
    fn sanitized(self) -> Self {
        let fallback = Self::default();
        Self {
            origin: if self.origin.is_finite() { self.origin } else { fallback.origin },
            base_rotation: if self.base_rotation.is_finite() { self.base_rotation } else { 0.0 },
            facing: if self.facing < 0.0 { -1.0 } else { 1.0 },
            base_damage: if self.base_damage.is_finite() { self.base_damage } else { 0.0 },
            attack_speed: self.attack_speed,
        }
    }
}

/// Wielder state sampled every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WielderInput {
    /// Current blade anchor (the wielder's hand).
    pub anchor: Vec2,
    /// Whether the activation command is held.
    pub held: bool,
}

impl WielderInput {
    /// Creates an input sample.
    #[must_use]
    pub const fn new(anchor: Vec2, held: bool) -> Self {
        Self { anchor, held }
    }
}

/// Derived blade pose for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwingPose {
    /// Hilt position.
    pub anchor: Vec2,
    /// Tip position.
    pub tip: Vec2,
    /// Blade rotation (radians).
    pub rotation: f32,
    /// Offset from the aim (radians).
    pub angle_shift: f32,
    /// Squish along the blade.
    pub squish: f32,
    /// Unsquished blade length.
    pub blade_length: f32,
    /// +1 or -1.
    pub direction: f32,
    /// Normalized swing time.
    pub progression: f32,
}

/// Swing length in ticks for a phase duration and attack speed.
///
/// Non-positive or non-finite speeds count as 1. Never below `floor`.
#[must_use]
pub fn swing_time_ticks(duration_ticks: u32, attack_speed: f32, updates_per_tick: u32, floor: i32) -> i32 {
    let speed = if attack_speed.is_finite() && attack_speed > 0.0 {
        attack_speed
    } else {
        1.0
    };
    #[allow(clippy::cast_possible_truncation)]
    let ticks = (duration_ticks as f32 / speed * updates_per_tick as f32) as i32;
    ticks.max(floor)
}

/// Normalized progression. 0 when `swing_time_ticks` is not positive.
#[inline]
#[must_use]
pub fn progression(elapsed_ticks: i32, swing_time_ticks: i32) -> f32 {
    if swing_time_ticks <= 0 {
        return 0.0;
    }
    (elapsed_ticks as f32 / swing_time_ticks as f32).clamp(0.0, 1.0)
}

/// Replicated squish, or the phase's when the value is unusable.
fn sanitize_squish(squish_factor: f32, phase: &ComboPhase) -> f32 {
    if squish_factor.is_finite() {
        squish_factor.clamp(0.0, 1.0)
    } else {
        phase.squish_range
    }
}

/// One live swing.
#[derive(Debug)]
pub struct SwingInstance {
    /// Weapon data, shared with every swing of the weapon.
    definition: Arc<WeaponSwingDefinition>,
    /// Identity passed to hooks.
    context: SwingContext,
    /// Launch parameters.
    params: SpawnParams,
    /// Lifecycle state.
    state: SwingState,
    /// Authoritative swing duration (replicated).
    swing_time_ticks: i32,
    /// Lifetime at activation.
    total_lifetime: i32,
    /// Ticks left.
    remaining_lifetime: i32,
    /// Squish range in effect (replicated).
    squish_factor: f32,
    /// Scalars received before the first tick.
    pending_sync: Option<SwingSync>,
    /// Damage after the phase multiplier.
    damage: f32,
    /// The combo special already fired.
    fired_special: bool,
    /// Current pose.
    pose: SwingPose,
    /// Tip history.
    trail: TrailRingBuffer,
}

impl SwingInstance {
    /// Creates an uninitialized swing with a trail of `trail_capacity`
    /// samples. This is the only allocation a swing makes.
    #[must_use]
    pub fn new(
        definition: Arc<WeaponSwingDefinition>,
        context: SwingContext,
        params: SpawnParams,
        trail_capacity: usize,
    ) -> Self {
        let params = params.sanitized();
        let phase = definition.phases().phase(context.combo_step);
        let pose = SwingPose {
            anchor: params.origin,
            tip: params.origin,
            rotation: params.base_rotation,
            squish: 1.0,
            blade_length: phase.blade_length,
            direction: phase.direction(params.facing),
            ..SwingPose::default()
        };
        let squish_factor = phase.squish_range;
        Self {
            definition,
            context,
            params,
            state: SwingState::Uninitialized,
            swing_time_ticks: 0,
            total_lifetime: 0,
            remaining_lifetime: 0,
            squish_factor,
            pending_sync: None,
            damage: 0.0,
            fired_special: false,
            pose,
            trail: TrailRingBuffer::new(trail_capacity),
        }
    }

    /// Uses replicated scalars instead of deriving them from the phase.
    #[must_use]
    pub fn with_sync(mut self, sync: SwingSync) -> Self {
        self.pending_sync = Some(sync);
        self
    }

    /// Advances one simulation step.
    pub fn tick<H>(&mut self, config: &EngineConfig, input: &WielderInput, targets: &[HitTarget], hooks: &mut H)
    where
        H: SwingHooks + ?Sized,
    {
        match self.state {
            SwingState::Terminated => return,
            SwingState::Uninitialized => self.activate(config, hooks),
            SwingState::PostSwingStasis => {
                if input.held {
                    self.remaining_lifetime = config.stasis_linger_ticks;
                    self.trail.push(TrailSample::new(self.pose.tip, self.pose.rotation));
                } else {
                    self.terminate();
                }
                return;
            }
            SwingState::Active => {}
        }

        if input.anchor.is_finite() {
            self.pose.anchor = input.anchor;
        }
        self.update_pose();
        self.trail.push(TrailSample::new(self.pose.tip, self.pose.rotation));

        self.remaining_lifetime -= 1;
        let enters_stasis = self.remaining_lifetime <= config.stasis_terminal_ticks && input.held;
        let last_active_tick = enters_stasis || self.remaining_lifetime <= 0;
        self.check_special(last_active_tick, hooks);
        self.collide(config, targets, hooks);

        if enters_stasis {
            self.state = SwingState::PostSwingStasis;
            self.remaining_lifetime = config.stasis_linger_ticks;
            tracing::debug!(
                wielder = self.context.wielder.0,
                weapon = self.context.weapon.0,
                combo_step = self.context.combo_step,
                "Swing entered post-swing stasis"
            );
        } else if self.remaining_lifetime <= 0 {
            self.terminate();
        }
    }

    fn activate<H>(&mut self, config: &EngineConfig, hooks: &mut H)
    where
        H: SwingHooks + ?Sized,
    {
        let definition = Arc::clone(&self.definition);
        let phase = definition.phases().phase(self.context.combo_step);

        let (swing_time, squish_factor) = match self.pending_sync.take() {
            Some(sync) => (sync.swing_time_ticks, sanitize_squish(sync.squish_factor, phase)),
            None => (
                swing_time_ticks(
                    phase.duration_ticks,
                    self.params.attack_speed,
                    config.updates_per_tick,
                    config.min_swing_ticks,
                ),
                phase.squish_range,
            ),
        };
        self.swing_time_ticks = swing_time;
        self.total_lifetime = swing_time.max(0);
        self.remaining_lifetime = self.total_lifetime;
        self.squish_factor = squish_factor;
        self.damage = self.params.base_damage * phase.damage_multiplier;
        self.fired_special = false;
        self.state = SwingState::Active;

        tracing::debug!(
            wielder = self.context.wielder.0,
            weapon = self.context.weapon.0,
            combo_step = self.context.combo_step,
            phase = definition.phases().clamp_step(self.context.combo_step),
            swing_time_ticks = swing_time,
            "Swing started"
        );
        hooks.on_swing_start(&self.context);
    }

    fn update_pose(&mut self) {
        let definition = Arc::clone(&self.definition);
        let phase = definition.phases().phase(self.context.combo_step);

        let progression = progression(self.elapsed_ticks(), self.swing_time_ticks);
        let angle_shift = phase.angle_shift(progression);
        let direction = phase.direction(self.params.facing);
        let rotation = self.params.base_rotation + angle_shift * direction;
        let squish = squish(self.squish_factor, angle_shift);
        let anchor = self.pose.anchor;

        self.pose = SwingPose {
            anchor,
            tip: anchor + Vec2::from_angle(rotation) * (squish * phase.blade_length),
            rotation,
            angle_shift,
            squish,
            blade_length: phase.blade_length,
            direction,
            progression,
        };
    }

    /// Fires the combo special once. Thresholds the sampled progression
    /// never reaches fire on the last active tick.
    fn check_special<H>(&mut self, last_active_tick: bool, hooks: &mut H)
    where
        H: SwingHooks + ?Sized,
    {
        let Some(threshold) = self.definition.special_threshold() else {
            return;
        };
        if !self.fired_special && (self.pose.progression >= threshold || last_active_tick) {
            self.fired_special = true;
            hooks.on_combo_special(&self.context, self.context.combo_step, self.pose.progression);
        }
    }

    fn collide<H>(&self, config: &EngineConfig, targets: &[HitTarget], hooks: &mut H)
    where
        H: SwingHooks + ?Sized,
    {
        let blade = BladeSegment::new(self.pose.anchor, self.pose.tip);
        for target in targets {
            let Some(contact) = blade.contact(&target.bounds, config.collision_thickness) else {
                continue;
            };
            if !hooks.can_hit_target(&self.context, target.id) {
                continue;
            }
            let away = (target.bounds.center() - self.pose.anchor).normalize_or_zero();
            let knockback = if away.length_squared() > 0.0 {
                away
            } else {
                Vec2::new(self.params.facing, 0.0)
            };
            let hit = HitInfo {
                damage: self.damage,
                combo_step: self.context.combo_step,
                progression: self.pose.progression,
                contact,
                knockback,
            };
            hooks.on_hit_target(&self.context, target.id, &hit);
        }
    }

    /// Ends the swing immediately.
    pub fn terminate(&mut self) {
        if self.state == SwingState::Terminated {
            return;
        }
        self.state = SwingState::Terminated;
        tracing::debug!(
            wielder = self.context.wielder.0,
            weapon = self.context.weapon.0,
            combo_step = self.context.combo_step,
            "Swing terminated"
        );
    }

    /// Applies replicated scalars.
    ///
    /// Before the first tick they replace the derived values. Afterwards
    /// the swing keeps its elapsed time and adopts the new duration; the
    /// squish factor is fixed at activation and the packet's is ignored.
    pub fn apply_sync(&mut self, sync: SwingSync) {
        match self.state {
            SwingState::Uninitialized => self.pending_sync = Some(sync),
            SwingState::Terminated => {}
            SwingState::Active | SwingState::PostSwingStasis => {
                if self.state == SwingState::Active {
                    let elapsed = self.elapsed_ticks();
                    self.total_lifetime = sync.swing_time_ticks.max(0);
                    self.remaining_lifetime = self.total_lifetime - elapsed;
                }
                self.swing_time_ticks = sync.swing_time_ticks;
            }
        }
    }

    /// The scalars a remote peer needs to reproduce this swing.
    #[must_use]
    pub fn sync_state(&self) -> SwingSync {
        match (self.state, self.pending_sync) {
            (SwingState::Uninitialized, Some(sync)) => sync,
            _ => SwingSync::new(self.swing_time_ticks, self.squish_factor),
        }
    }

    /// Pipeline input for this swing, or `None` before the first tick and
    /// after termination.
    #[must_use]
    pub fn frame(&self) -> Option<SwingFrame<'_>> {
        if matches!(self.state, SwingState::Uninitialized | SwingState::Terminated) {
            return None;
        }
        Some(SwingFrame {
            combo_step: self.context.combo_step,
            progression: self.pose.progression,
            anchor: self.pose.anchor,
            tip: self.pose.tip,
            rotation: self.pose.rotation,
            angle_shift: self.pose.angle_shift,
            squish: self.pose.squish,
            blade_length: self.pose.blade_length,
            direction: self.pose.direction,
            trail: &self.trail,
            palette: self.definition.palette(),
            visuals: self.definition.visuals(),
        })
    }

    /// Records this swing into `pipeline`, with the host's extra effects
    /// drawn last.
    pub fn render<'p, G, H>(&self, pipeline: &'p mut RenderPipeline, gate: &G, hooks: &H) -> Option<&'p DrawList>
    where
        G: StageGate + ?Sized,
        H: SwingHooks + ?Sized,
    {
        let frame = self.frame()?;
        let context = self.context;
        let progression = frame.progression;
        Some(pipeline.render(&frame, gate, |draw| hooks.draw_extra_vfx(&context, progression, draw)))
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> SwingState {
        self.state
    }

    /// True while this swing prevents a new activation.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self.state, SwingState::Uninitialized | SwingState::Active)
    }

    /// True once the swing is done.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.state == SwingState::Terminated
    }

    /// True while lingering in post-swing stasis.
    #[must_use]
    pub fn in_stasis(&self) -> bool {
        self.state == SwingState::PostSwingStasis
    }

    /// Hook identity.
    #[must_use]
    pub fn context(&self) -> &SwingContext {
        &self.context
    }

    /// Combo step the swing was spawned with.
    #[must_use]
    pub fn combo_step(&self) -> usize {
        self.context.combo_step
    }

    /// Phase index actually used.
    #[must_use]
    pub fn phase_index(&self) -> usize {
        self.definition.phases().clamp_step(self.context.combo_step)
    }

    /// Weapon definition.
    #[must_use]
    pub fn definition(&self) -> &Arc<WeaponSwingDefinition> {
        &self.definition
    }

    /// Authoritative swing duration.
    #[must_use]
    pub fn swing_time_ticks(&self) -> i32 {
        self.swing_time_ticks
    }

    /// Ticks since activation.
    #[must_use]
    pub fn elapsed_ticks(&self) -> i32 {
        self.total_lifetime - self.remaining_lifetime
    }

    /// Ticks left.
    #[must_use]
    pub fn remaining_lifetime(&self) -> i32 {
        self.remaining_lifetime
    }

    /// Normalized swing time of the current pose.
    #[must_use]
    pub fn progression(&self) -> f32 {
        self.pose.progression
    }

    /// Squish range in effect.
    #[must_use]
    pub fn squish_factor(&self) -> f32 {
        self.squish_factor
    }

    /// Damage after the phase multiplier (0 before the first tick).
    #[must_use]
    pub fn damage(&self) -> f32 {
        self.damage
    }

    /// True once the combo special fired.
    #[must_use]
    pub fn has_fired_special(&self) -> bool {
        self.fired_special
    }

    /// Current pose.
    #[must_use]
    pub fn pose(&self) -> &SwingPose {
        &self.pose
    }

    /// Tip history.
    #[must_use]
    pub fn trail(&self) -> &TrailRingBuffer {
        &self.trail
    }
}
