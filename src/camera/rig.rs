//! Pre-allocated camera slots and their roles.
use bevy::prelude::*;

use super::config::{CameraSlotSpec, ProjectionSettings};

/// One camera the viewer can look through.
#[derive(Debug, Clone)]
pub struct CameraSlot {
    name: String,
    projection: ProjectionSettings,
    /// Current transform; the only part of a slot that mutates at runtime.
    pub transform: Transform,
}

impl CameraSlot {
    pub fn new(
        name: impl Into<String>,
        projection: ProjectionSettings,
        transform: Transform,
    ) -> Self {
        Self {
            name: name.into(),
            projection,
            transform,
        }
    }

    pub fn from_spec(spec: &CameraSlotSpec, projection: ProjectionSettings) -> Self {
        let transform = Transform::from_translation(spec.position);
        let transform = if spec.look_at.distance_squared(spec.position) > f32::EPSILON {
            transform.looking_at(spec.look_at, Vec3::Y)
        } else {
            transform
        };
        Self::new(spec.name.clone(), projection, transform)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn projection(&self) -> ProjectionSettings {
        self.projection
    }
}

/// Ordered camera slots with an active slot, the next slot for cycling and
/// an optional orbit-reserved slot.
#[derive(Resource, Debug, Clone, Default)]
pub struct CameraRig {
    slots: Vec<CameraSlot>,
    active: usize,
    next: usize,
    orbit: Option<usize>,
}

impl CameraRig {
    /// Builds a rig from fly-eligible slots followed by the orbit-reserved slot.
    pub fn new(fly_slots: Vec<CameraSlot>, orbit_slot: Option<CameraSlot>) -> Self {
        let mut slots = fly_slots;
        let orbit = orbit_slot.map(|slot| {
            slots.push(slot);
            slots.len() - 1
        });
        let mut rig = Self {
            slots,
            active: 0,
            next: 0,
            orbit,
        };
        rig.active = rig.fly_slot_after(None).unwrap_or(0);
        rig.refresh_next();
        rig
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> Option<&CameraSlot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut CameraSlot> {
        self.slots.get_mut(index)
    }

    pub fn slots(&self) -> impl Iterator<Item = &CameraSlot> {
        self.slots.iter()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn next_index(&self) -> usize {
        self.next
    }

    pub fn orbit_index(&self) -> Option<usize> {
        self.orbit
    }

    pub fn is_fly_eligible(&self, index: usize) -> bool {
        index < self.slots.len() && Some(index) != self.orbit
    }

    pub fn fly_slot_count(&self) -> usize {
        (0..self.slots.len())
            .filter(|index| self.is_fly_eligible(*index))
            .count()
    }

    /// First fly-eligible slot strictly after `from` in circular order; with
    /// `None` the search starts at index 0.
    pub fn fly_slot_after(&self, from: Option<usize>) -> Option<usize> {
        let len = self.slots.len();
        if len == 0 {
            return None;
        }
        let start = from.map_or(len - 1, |index| index % len);
        (1..=len)
            .map(|step| (start + step) % len)
            .find(|index| self.is_fly_eligible(*index))
    }

    /// Fly slot to bind when entering fly mode: the active slot if it is
    /// eligible, otherwise the next eligible one after it.
    pub fn resolve_fly_slot(&self) -> Option<usize> {
        if self.is_fly_eligible(self.active) {
            Some(self.active)
        } else {
            self.fly_slot_after(Some(self.active))
        }
    }

    /// Makes `index` the active slot and recomputes `next`.
    pub fn set_active(&mut self, index: usize) {
        self.active = index;
        self.refresh_next();
    }

    /// Advances the active slot over fly-eligible slots, returning the new index.
    pub fn advance_active(&mut self) -> Option<usize> {
        let index = self.fly_slot_after(Some(self.active))?;
        self.set_active(index);
        Some(index)
    }

    fn refresh_next(&mut self) {
        self.next = self.fly_slot_after(Some(self.active)).unwrap_or(self.active);
    }
}
