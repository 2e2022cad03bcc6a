//! Identifiers shared between the host and the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Host entity that wields weapons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WielderId(pub u32);

/// Weapon type, agreed out of band by every peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponTypeId(pub u32);

impl fmt::Display for WeaponTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-owned hit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub u64);

/// One combo track: a wielder using one weapon type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComboKey {
    /// The wielder.
    pub wielder: WielderId,
    /// The weapon type.
    pub weapon: WeaponTypeId,
}

impl ComboKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(wielder: WielderId, weapon: WeaponTypeId) -> Self {
        Self { wielder, weapon }
    }
}
