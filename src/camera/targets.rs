//! Orbit-able targets and the registry cursor algorithm.
use std::collections::HashMap;

use bevy::prelude::*;

use super::errors::ControlError;

/// Scene component marking an entity as a registry entry.
///
/// Excluded candidates (terrain, lights) are registered so the registry
/// mirrors the scene, but are never chosen as an orbit focus.
#[derive(Component, Debug, Clone)]
pub struct OrbitCandidate {
    pub name: String,
    pub excluded: bool,
}

impl OrbitCandidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            excluded: false,
        }
    }

    pub fn excluded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            excluded: true,
        }
    }
}

/// Read-only access to the world positions that targets reference.
pub trait TargetPositions {
    fn position_of(&self, entity: Entity) -> Option<Vec3>;
}

impl TargetPositions for HashMap<Entity, Vec3> {
    fn position_of(&self, entity: Entity) -> Option<Vec3> {
        self.get(&entity).copied()
    }
}

impl TargetPositions for Query<'_, '_, &Transform, With<OrbitCandidate>> {
    fn position_of(&self, entity: Entity) -> Option<Vec3> {
        self.get(entity).ok().map(|transform| transform.translation)
    }
}

/// A registry entry; `source` is the entity whose transform is the target position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub source: Entity,
    pub excluded: bool,
}

impl Target {
    pub fn position(&self, positions: &impl TargetPositions) -> Result<Vec3, ControlError> {
        positions
            .position_of(self.source)
            .ok_or_else(|| ControlError::target_unresolved(&self.name))
    }
}

/// Targets in registration (load completion) order.
#[derive(Resource, Debug, Default, Clone)]
pub struct TargetRegistry {
    entries: Vec<Target>,
}

impl TargetRegistry {
    /// Appends a target; display names are unique within the registry.
    pub fn add_target(
        &mut self,
        name: impl Into<String>,
        source: Entity,
        excluded: bool,
    ) -> Result<usize, ControlError> {
        let name = name.into();
        if self.entries.iter().any(|entry| entry.name == name) {
            return Err(ControlError::duplicate_target(name));
        }
        self.entries.push(Target {
            name,
            source,
            excluded,
        });
        Ok(self.entries.len() - 1)
    }

    /// Removes the entry backed by `source`, returning its former index.
    pub fn remove_source(&mut self, source: Entity) -> Option<(usize, Target)> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.source == source)?;
        Some((index, self.entries.remove(index)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.entries.get(index)
    }

    pub fn is_eligible(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|entry| !entry.excluded)
    }

    /// Advances from `cursor` one entry at a time, skipping excluded entries,
    /// for at most one full lap. `None` starts the lap just before index 0.
    ///
    /// Returns `None` when no entry is eligible; the caller keeps its cursor.
    pub fn next_eligible(&self, cursor: Option<usize>) -> Option<usize> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }
        let start = cursor.map_or(len - 1, |index| index % len);
        (1..=len)
            .map(|step| (start + step) % len)
            .find(|index| self.is_eligible(*index))
    }

    /// Keeps `cursor` when it already points at an eligible entry, otherwise
    /// advances as `next_eligible` does.
    pub fn resolve_cursor(&self, cursor: Option<usize>) -> Option<usize> {
        match cursor {
            Some(index) if self.is_eligible(index) => Some(index),
            _ => self.next_eligible(cursor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(entries: &[(&str, bool)]) -> TargetRegistry {
        let mut world = World::new();
        let mut registry = TargetRegistry::default();
        for (name, excluded) in entries {
            let source = world.spawn_empty().id();
            registry.add_target(*name, source, *excluded).unwrap();
        }
        registry
    }

    #[test]
    fn cycling_never_revisits_excluded_entries() {
        let registry = registry(&[("terrain", true), ("cop", false), ("house1", false)]);

        let cursor = registry.next_eligible(Some(0));
        assert_eq!(cursor, Some(1));
        let cursor = registry.next_eligible(cursor);
        assert_eq!(cursor, Some(2));
        let cursor = registry.next_eligible(cursor);
        assert_eq!(cursor, Some(1));
        assert_eq!(registry.get(1).unwrap().name, "cop");
    }

    #[test]
    fn fully_excluded_registry_yields_no_candidate() {
        let registry = registry(&[("terrain", true), ("sun", true)]);
        for cursor in [None, Some(0), Some(1)] {
            assert_eq!(registry.next_eligible(cursor), None);
        }
        assert_eq!(TargetRegistry::default().next_eligible(None), None);
    }

    #[test]
    fn single_eligible_entry_is_reached_from_any_cursor() {
        let registry = registry(&[("terrain", true), ("sun", true), ("cop", false), ("sky", true)]);
        for cursor in [None, Some(0), Some(1), Some(2), Some(3)] {
            assert_eq!(registry.next_eligible(cursor), Some(2));
        }
    }

    #[test]
    fn resolve_cursor_keeps_eligible_cursor() {
        let registry = registry(&[("terrain", true), ("cop", false), ("house1", false)]);
        assert_eq!(registry.resolve_cursor(Some(2)), Some(2));
        assert_eq!(registry.resolve_cursor(Some(0)), Some(1));
        assert_eq!(registry.resolve_cursor(None), Some(1));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = registry(&[("cop", false)]);
        let source = registry.get(0).unwrap().source;
        let result = registry.add_target("cop", source, false);
        assert_eq!(result, Err(ControlError::duplicate_target("cop")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removal_reports_former_index() {
        let mut registry = registry(&[("terrain", true), ("cop", false), ("house1", false)]);
        let source = registry.get(1).unwrap().source;
        let (index, target) = registry.remove_source(source).unwrap();
        assert_eq!(index, 1);
        assert_eq!(target.name, "cop");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).unwrap().name, "house1");
        assert!(registry.remove_source(source).is_none());
    }

    #[test]
    fn unresolved_position_is_an_error() {
        let registry = registry(&[("cop", false)]);
        let positions: HashMap<Entity, Vec3> = HashMap::new();
        let error = registry.get(0).unwrap().position(&positions).unwrap_err();
        assert_eq!(error, ControlError::target_unresolved("cop"));
    }
}
