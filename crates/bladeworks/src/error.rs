//! # Swing Error Types
//!
//! Errors exist only at load time. A running swing never fails: bad runtime
//! input is clamped or skipped instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::id::WeaponTypeId;

/// Errors raised while loading engine or weapon configuration.
#[derive(Error, Debug)]
pub enum SwingError {
    /// A config file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A config document is not valid TOML for its schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A weapon was defined without any combo phase.
    #[error("weapon '{0}' has no combo phases")]
    NoPhases(String),

    /// A weapon palette cannot be interpolated.
    #[error("weapon '{weapon}' palette has {count} colors, need at least {min}")]
    PaletteTooSmall {
        /// Weapon name.
        weapon: String,
        /// Colors supplied.
        count: usize,
        /// Colors required.
        min: usize,
    },

    /// Two definitions claimed the same weapon type.
    #[error("weapon type {0} is already registered")]
    DuplicateWeapon(WeaponTypeId),

    /// Engine configuration values are out of range.
    #[error("invalid engine config: {0}")]
    InvalidConfig(String),
}

/// Result type for load-time operations.
pub type SwingResult<T> = Result<T, SwingError>;
