//! # Reference Constants
//!
//! Reference values for the swing engine. Every one of these can be
//! overridden through the engine configuration; these are the defaults a
//! fresh `EngineConfig` starts from.

// =============================================================================
// TIMING
// =============================================================================

/// Simulation ticks per second.
pub const TICK_RATE: u32 = 60;

/// Remaining lifetime (ticks) at or below which a held swing enters
/// post-swing stasis.
pub const STASIS_TERMINAL_TICKS: i32 = 2;

/// Lifetime (ticks) a stasis swing is topped back up to every tick while the
/// activation command is held.
pub const STASIS_LINGER_TICKS: i32 = 5;

/// Ticks without an activation before a wielder's combo resets to step 0.
pub const COMBO_RESET_TICKS: u32 = 45;

/// Shortest swing a phase can produce, regardless of attack speed.
pub const MIN_SWING_TICKS: i32 = 2;

// =============================================================================
// GEOMETRY
// =============================================================================

/// Samples kept per trail ring buffer.
pub const TRAIL_CAPACITY: usize = 60;

/// Perpendicular tolerance of the blade line versus target boxes.
pub const COLLISION_THICKNESS: f32 = 24.0;

/// How far the blade stretches past its length when the squish range is 0.
pub const SQUISH_STRETCH: f32 = 0.6;

// =============================================================================
// PALETTE
// =============================================================================

/// Reference palette size (darkest to brightest).
pub const PALETTE_SIZE: usize = 6;

/// Fewest colors the engine can interpolate between.
pub const MIN_PALETTE_COLORS: usize = 2;
