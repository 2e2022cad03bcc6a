//! # Combo Controller
//!
//! Owns every live swing and the combo bookkeeping of each wielder/weapon
//! pair.
//!
//! ## Registry
//!
//! ```text
//! entries: (wielder, weapon) ──► ComboState { step, reset timer }
//!                                handles: [h0, h1]   (pre-sized)
//!                                    │
//! pool:    InstancePool<SwingInstance> (fixed capacity, generational)
//! ```
//!
//! A wielder's swings are found through its own handle list, never by
//! scanning every live swing.
//!
//! ## Chaining
//!
//! A swing in post-swing stasis does not block activation. Holding the
//! command therefore chains phases indefinitely, while pausing longer than
//! the reset delay drops the combo back to step 0.

use std::collections::HashMap;
use std::sync::Arc;

use bladeworks_core::{InstanceHandle, InstancePool};
use bladeworks_shared::SwingSync;

use crate::config::EngineConfig;
use crate::definition::WeaponSwingDefinition;
use crate::hooks::{HitTarget, SwingContext, SwingHooks};
use crate::id::{ComboKey, WielderId};
use crate::instance::{SpawnParams, SwingInstance, WielderInput};

/// Combo step and reset timer of one wielder/weapon pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComboState {
    combo_step: usize,
    reset_timer: u32,
}

impl ComboState {
    /// Creates a state at `combo_step` with `reset_timer` ticks to go.
    #[must_use]
    pub const fn new(combo_step: usize, reset_timer: u32) -> Self {
        Self {
            combo_step,
            reset_timer,
        }
    }

    /// Step the next swing will be tagged with.
    #[must_use]
    pub const fn combo_step(&self) -> usize {
        self.combo_step
    }

    /// Ticks until the combo resets.
    #[must_use]
    pub const fn reset_timer(&self) -> u32 {
        self.reset_timer
    }

    /// Counts the reset timer down. Returns true if the combo just reset.
    pub fn tick(&mut self) -> bool {
        if self.reset_timer == 0 {
            return false;
        }
        self.reset_timer -= 1;
        if self.reset_timer == 0 && self.combo_step != 0 {
            self.combo_step = 0;
            return true;
        }
        false
    }

    /// Returns the current step, then advances it and reloads the timer.
    pub fn advance(&mut self, combo_length: usize, reset_ticks: u32) -> usize {
        let step = self.combo_step;
        self.combo_step = (step + 1) % combo_length.max(1);
        self.reset_timer = reset_ticks;
        step
    }
}

/// Per-pair bookkeeping.
#[derive(Debug)]
struct ComboEntry {
    state: ComboState,
    handles: Vec<InstanceHandle>,
}

impl ComboEntry {
    fn new(capacity: usize) -> Self {
        Self {
            state: ComboState::default(),
            handles: Vec::with_capacity(capacity),
        }
    }
}

/// Spawns, ticks and frees swings for every wielder.
#[derive(Debug)]
pub struct ComboController {
    config: EngineConfig,
    entries: HashMap<ComboKey, ComboEntry>,
    pool: InstancePool<SwingInstance>,
}

impl ComboController {
    /// Creates a controller sized by `config`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let pool = InstancePool::new(config.max_instances);
        Self {
            config,
            entries: HashMap::new(),
            pool,
        }
    }

    /// Engine settings.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True unless the pair already has an uninitialized or active swing.
    #[must_use]
    pub fn can_activate(&self, key: ComboKey) -> bool {
        let Some(entry) = self.entries.get(&key) else {
            return true;
        };
        !entry
            .handles
            .iter()
            .filter_map(|&handle| self.pool.get(handle))
            .any(SwingInstance::is_blocking)
    }

    /// Spawns the next swing of the combo.
    ///
    /// The swing is tagged with the current combo step, which then advances
    /// and reloads the reset timer. Any swing of the pair lingering in stasis
    /// is ended, so the new swing takes over. Returns `None` if a blocking
    /// swing exists or the pool is full.
    pub fn activate(
        &mut self,
        key: ComboKey,
        definition: &Arc<WeaponSwingDefinition>,
        params: SpawnParams,
    ) -> Option<InstanceHandle> {
        if !self.can_activate(key) {
            return None;
        }
        let combo_step = self.entries.get(&key).map_or(0, |entry| entry.state.combo_step());
        let handle = self.spawn(key, definition, params, combo_step, None)?;

        let reset_ticks = self.config.combo_reset_ticks;
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.state.advance(definition.combo_length(), reset_ticks);
        }
        Some(handle)
    }

    /// Spawns a swing replicated from another peer.
    ///
    /// The local combo state is left alone: the remote side owns it.
    pub fn spawn_remote(
        &mut self,
        key: ComboKey,
        definition: &Arc<WeaponSwingDefinition>,
        params: SpawnParams,
        combo_step: usize,
        sync: SwingSync,
    ) -> Option<InstanceHandle> {
        self.spawn(key, definition, params, combo_step, Some(sync))
    }

    fn spawn(
        &mut self,
        key: ComboKey,
        definition: &Arc<WeaponSwingDefinition>,
        params: SpawnParams,
        combo_step: usize,
        sync: Option<SwingSync>,
    ) -> Option<InstanceHandle> {
        let per_wielder = self.config.instances_per_wielder;
        let pool = &mut self.pool;
        let entry = self.entries.entry(key).or_insert_with(|| ComboEntry::new(per_wielder));

        // Hand-off: lingering swings of this pair end when a successor starts.
        entry.handles.retain(|&handle| match pool.get(handle) {
            Some(instance) if instance.in_stasis() => {
                pool.free(handle);
                false
            }
            Some(_) => true,
            None => false,
        });

        if entry.handles.len() >= per_wielder {
            tracing::warn!(
                wielder = key.wielder.0,
                weapon = key.weapon.0,
                live = entry.handles.len(),
                "Per-wielder swing limit reached, activation refused"
            );
            return None;
        }
        let Some(handle) = pool.next_handle() else {
            tracing::warn!(capacity = pool.capacity(), "Swing pool exhausted, activation refused");
            return None;
        };

        let context = SwingContext {
            wielder: key.wielder,
            weapon: key.weapon,
            combo_step,
            handle,
        };
        let mut instance = SwingInstance::new(Arc::clone(definition), context, params, self.config.trail_capacity);
        if let Some(sync) = sync {
            instance = instance.with_sync(sync);
        }
        let handle = pool.allocate(instance)?;
        entry.handles.push(handle);

        tracing::debug!(
            wielder = key.wielder.0,
            weapon = key.weapon.0,
            combo_step,
            remote = sync.is_some(),
            "Swing spawned"
        );
        Some(handle)
    }

    /// Runs one game tick for a pair: combo decay, then
    /// `updates_per_tick` sub-steps of every swing, then frees finished
    /// swings.
    pub fn tick_wielder<H>(&mut self, key: ComboKey, input: &WielderInput, targets: &[HitTarget], hooks: &mut H)
    where
        H: SwingHooks + ?Sized,
    {
        let Some(entry) = self.entries.get_mut(&key) else {
            return;
        };
        if entry.state.tick() {
            tracing::debug!(wielder = key.wielder.0, weapon = key.weapon.0, "Combo reset");
        }

        for _ in 0..self.config.updates_per_tick {
            for &handle in &entry.handles {
                if let Some(instance) = self.pool.get_mut(handle) {
                    instance.tick(&self.config, input, targets, hooks);
                }
            }
        }

        let pool = &mut self.pool;
        entry.handles.retain(|&handle| match pool.get(handle) {
            Some(instance) if instance.is_terminated() => {
                pool.free(handle);
                false
            }
            Some(_) => true,
            None => false,
        });
    }

    /// Ticks only the combo timers of pairs that are not simulated this
    /// tick. `skip` lists the pairs already run through
    /// [`ComboController::tick_wielder`], whose timers have decayed once.
    pub fn tick_timers(&mut self, skip: &[ComboKey]) {
        for (key, entry) in &mut self.entries {
            if skip.contains(key) {
                continue;
            }
            if entry.state.tick() {
                tracing::debug!(wielder = key.wielder.0, weapon = key.weapon.0, "Combo reset");
            }
        }
    }

    /// Swing behind `handle`.
    #[must_use]
    pub fn get(&self, handle: InstanceHandle) -> Option<&SwingInstance> {
        self.pool.get(handle)
    }

    /// Mutable swing behind `handle` (e.g. to apply a sync packet).
    pub fn get_mut(&mut self, handle: InstanceHandle) -> Option<&mut SwingInstance> {
        self.pool.get_mut(handle)
    }

    /// Live swings of a pair, oldest first.
    pub fn instances(&self, key: ComboKey) -> impl Iterator<Item = &SwingInstance> {
        let pool = &self.pool;
        self.entries
            .get(&key)
            .into_iter()
            .flat_map(|entry| entry.handles.iter())
            .filter_map(move |&handle| pool.get(handle))
    }

    /// Combo state of a pair.
    #[must_use]
    pub fn combo_state(&self, key: ComboKey) -> Option<ComboState> {
        self.entries.get(&key).map(|entry| entry.state)
    }

    /// Overrides a pair's combo state (e.g. from a host save or a
    /// server correction).
    pub fn set_combo_state(&mut self, key: ComboKey, state: ComboState) {
        let per_wielder = self.config.instances_per_wielder;
        self.entries
            .entry(key)
            .or_insert_with(|| ComboEntry::new(per_wielder))
            .state = state;
    }

    /// Drops every swing and combo state of `wielder`. Returns the number
    /// of swings freed.
    pub fn remove_wielder(&mut self, wielder: WielderId) -> usize {
        let pool = &mut self.pool;
        let mut freed = 0;
        self.entries.retain(|key, entry| {
            if key.wielder != wielder {
                return true;
            }
            freed += entry.handles.drain(..).filter(|&handle| pool.free(handle).is_some()).count();
            false
        });
        if freed > 0 {
            tracing::debug!(wielder = wielder.0, freed, "Wielder removed");
        }
        freed
    }

    /// Live swings across all wielders.
    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.pool.allocated_count()
    }
}
