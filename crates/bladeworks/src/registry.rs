//! Weapon definitions by type id.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::config::WeaponConfig;
use crate::definition::WeaponSwingDefinition;
use crate::error::{SwingError, SwingResult};
use crate::id::WeaponTypeId;

/// Every loaded weapon, shared by `Arc`.
///
/// Filled at startup; lookups during play never allocate.
#[derive(Debug, Default)]
pub struct WeaponRegistry {
    weapons: HashMap<WeaponTypeId, Arc<WeaponSwingDefinition>>,
}

impl WeaponRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition.
    ///
    /// # Errors
    ///
    /// Returns [`SwingError::DuplicateWeapon`] if the type id is taken.
    pub fn register(&mut self, definition: WeaponSwingDefinition) -> SwingResult<Arc<WeaponSwingDefinition>> {
        let weapon_type = definition.weapon_type();
        if self.weapons.contains_key(&weapon_type) {
            return Err(SwingError::DuplicateWeapon(weapon_type));
        }
        tracing::info!(
            weapon_type = weapon_type.0,
            name = definition.name(),
            phases = definition.phases().len(),
            combo_length = definition.combo_length(),
            "Registered weapon"
        );
        let definition = Arc::new(definition);
        self.weapons.insert(weapon_type, Arc::clone(&definition));
        Ok(definition)
    }

    /// Parses a weapon document and registers it.
    ///
    /// # Errors
    ///
    /// Any parse, resolution or duplicate error.
    pub fn load_str(&mut self, content: &str) -> SwingResult<Arc<WeaponSwingDefinition>> {
        self.register(WeaponConfig::from_toml_str(content)?.into_definition()?)
    }

    /// Reads a weapon file and registers it.
    ///
    /// # Errors
    ///
    /// Any read, parse, resolution or duplicate error.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> SwingResult<Arc<WeaponSwingDefinition>> {
        self.register(WeaponConfig::load(path)?.into_definition()?)
    }

    /// Definition for `weapon_type`.
    #[must_use]
    pub fn get(&self, weapon_type: WeaponTypeId) -> Option<&Arc<WeaponSwingDefinition>> {
        self.weapons.get(&weapon_type)
    }

    /// Number of registered weapons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// All definitions, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<WeaponSwingDefinition>> {
        self.weapons.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAGGER: &str = r#"
weapon_type = 3
name = "Dusk Dagger"
palette = [0x101020FF, 0x8080C0FF]

[[phases]]
max_angle_degrees = 60.0
duration_ticks = 18
blade_length = 40.0
"#;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = WeaponRegistry::new();
        let dagger = registry.load_str(DAGGER).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(registry.get(WeaponTypeId(3)).unwrap(), &dagger));
        assert!(registry.get(WeaponTypeId(4)).is_none());
    }

    #[test]
    fn test_duplicate_type_rejected() {
        let mut registry = WeaponRegistry::new();
        registry.load_str(DAGGER).unwrap();
        let err = registry.load_str(DAGGER).unwrap_err();
        assert!(matches!(err, SwingError::DuplicateWeapon(WeaponTypeId(3))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut registry = WeaponRegistry::new();
        let err = registry.load_file("/nonexistent/weapons/dagger.toml").unwrap_err();
        assert!(matches!(err, SwingError::Io { .. }));
        assert!(registry.is_empty());
    }
}
