//! # BLADEWORKS
//!
//! Data-driven melee combo swings: each weapon is a table of phases, each
//! phase an easing curve over normalized swing time. The engine runs the
//! swing lifecycle, blade collision, trail history and the layered render
//! pass; the host supplies input, targets and callbacks.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized ──first tick──► Active ──held & nearly done──► PostSwingStasis
//!                                  │                               │
//!                                  └──lifetime spent──► Terminated ◄┘ released
//! ```
//!
//! ## Design Principles
//!
//! 1. **Weapons are data** - phases, palettes and visuals load from TOML
//! 2. **Hosts own game rules** - damage, cooldowns and effects go through [`SwingHooks`]
//! 3. **No allocation per tick** - trails, pools and draw lists are pre-sized
//! 4. **Two scalars replicate a swing** - everything else is recomputed
//!
//! ## Example
//!
//! ```rust
//! use bladeworks::{
//!     ComboController, ComboKey, EngineConfig, NoHooks, SpawnParams, WeaponRegistry,
//!     WeaponTypeId, WielderId, WielderInput,
//! };
//! use bladeworks_shared::Vec2;
//!
//! let mut registry = WeaponRegistry::new();
//! let blade = registry
//!     .load_str(
//!         "weapon_type = 1\nname = \"Oak Blade\"\npalette = [0x402010FF, 0xC09060FF]\n\
//!          [[phases]]\nmax_angle_degrees = 90.0\nduration_ticks = 24\nblade_length = 56.0\n",
//!     )
//!     .unwrap();
//!
//! let mut controller = ComboController::new(EngineConfig::default());
//! let key = ComboKey::new(WielderId(1), WeaponTypeId(1));
//! let handle = controller.activate(key, &blade, SpawnParams::default()).unwrap();
//!
//! controller.tick_wielder(key, &WielderInput::new(Vec2::ZERO, true), &[], &mut NoHooks);
//! assert!(controller.get(handle).unwrap().is_blocking());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod controller;
pub mod definition;
pub mod error;
pub mod hooks;
pub mod id;
pub mod instance;
pub mod phase;
pub mod registry;
pub mod replication;

pub use config::{EngineConfig, PhaseConfig, WeaponConfig};
pub use controller::{ComboController, ComboState};
pub use definition::{DustTags, LightProfile, WeaponSwingDefinition};
pub use error::{SwingError, SwingResult};
pub use hooks::{HitInfo, HitTarget, NoHooks, SwingContext, SwingHooks};
pub use id::{ComboKey, TargetId, WeaponTypeId, WielderId};
pub use instance::{progression, swing_time_ticks, SpawnParams, SwingInstance, SwingPose, SwingState, WielderInput};
pub use phase::{squish, ComboPhase, PhaseTable};
pub use registry::WeaponRegistry;
pub use replication::{apply_packet, decode_swing, encode_swing};
