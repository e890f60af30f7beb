//! Control session: current mode, live controller and the orbit target cursor.
use std::cmp::Ordering;

use bevy::prelude::*;

use super::{
    config::{FlySettings, OrbitSettings},
    controller::{ActiveController, NavigationController, OrbitController},
    errors::ControlError,
    rig::CameraRig,
    targets::{TargetPositions, TargetRegistry},
};

/// Which controller currently has authority over the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ControlMode {
    #[default]
    Fly,
    Orbit,
}

impl ControlMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fly => "Mode: Fly",
            Self::Orbit => "Mode: Orbit",
        }
    }
}

/// Result of a cycle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Fly mode moved to this camera slot.
    Camera(usize),
    /// Orbit mode moved to this registry entry.
    Target(usize),
    /// Nothing to cycle to; previous binding kept.
    Unchanged,
}

/// What a registry removal did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    Untracked,
    CursorAdjusted,
    Retargeted(usize),
    FellBackToFly,
}

#[derive(Resource, Debug)]
pub struct ControlSession {
    mode: ControlMode,
    orbit_cursor: Option<usize>,
    controller: Option<ActiveController>,
    fly: FlySettings,
    orbit: OrbitSettings,
}

impl ControlSession {
    /// Creates the session in fly mode bound to the rig's active slot.
    pub fn new(
        rig: &mut CameraRig,
        fly: FlySettings,
        orbit: OrbitSettings,
    ) -> Result<Self, ControlError> {
        let mut session = Self {
            mode: ControlMode::Fly,
            orbit_cursor: None,
            controller: None,
            fly,
            orbit,
        };
        session.enter_fly(rig)?;
        Ok(session)
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn orbit_cursor(&self) -> Option<usize> {
        self.orbit_cursor
    }

    pub fn controller(&self) -> Option<&ActiveController> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut ActiveController> {
        self.controller.as_mut()
    }

    /// Camera slot the live controller drives.
    pub fn bound_slot(&self) -> Option<usize> {
        self.controller.as_ref().map(ActiveController::slot)
    }

    fn dispose_controller(&mut self) {
        if let Some(controller) = self.controller.take() {
            controller.dispose();
        }
    }

    /// Switches to free navigation on the rig's active fly slot, rebuilding
    /// the navigation controller even when already flying.
    pub fn enter_fly(&mut self, rig: &mut CameraRig) -> Result<usize, ControlError> {
        let slot = rig.resolve_fly_slot().ok_or(ControlError::NoFlyCamera)?;

        self.dispose_controller();
        rig.set_active(slot);
        self.controller = Some(ActiveController::Navigation(NavigationController::new(
            slot, self.fly,
        )));
        self.mode = ControlMode::Fly;

        info!(
            "Fly mode on camera slot {} ({})",
            slot,
            rig.slot(slot).map_or("unnamed", |camera| camera.name())
        );
        Ok(slot)
    }

    /// Locks the orbit-reserved camera onto the cursor's target. On error the
    /// previous mode and controller stay in place.
    pub fn enter_orbit(
        &mut self,
        rig: &mut CameraRig,
        registry: &TargetRegistry,
        positions: &impl TargetPositions,
    ) -> Result<usize, ControlError> {
        let slot = rig.orbit_index().ok_or(ControlError::NoOrbitCamera)?;
        let cursor = registry
            .resolve_cursor(self.orbit_cursor)
            .ok_or_else(|| ControlError::no_eligible_target(registry.len()))?;
        let target = registry
            .get(cursor)
            .ok_or_else(|| ControlError::no_eligible_target(registry.len()))?;
        let focus = target.position(positions)?;

        self.dispose_controller();
        let controller = OrbitController::new(slot, target.source, focus, self.orbit);
        if let Some(camera) = rig.slot_mut(slot) {
            controller.place(&mut camera.transform);
        }
        self.controller = Some(ActiveController::Orbit(controller));
        self.orbit_cursor = Some(cursor);
        self.mode = ControlMode::Orbit;

        info!("Orbit mode around '{}'", target.name);
        Ok(cursor)
    }

    /// FLY <-> ORBIT.
    pub fn toggle_mode(
        &mut self,
        rig: &mut CameraRig,
        registry: &TargetRegistry,
        positions: &impl TargetPositions,
    ) -> Result<ControlMode, ControlError> {
        match self.mode {
            ControlMode::Fly => self.enter_orbit(rig, registry, positions)?,
            ControlMode::Orbit => self.enter_fly(rig)?,
        };
        Ok(self.mode)
    }

    /// Cycles cameras in fly mode and targets in orbit mode.
    pub fn cycle_selection(
        &mut self,
        rig: &mut CameraRig,
        registry: &TargetRegistry,
        positions: &impl TargetPositions,
    ) -> CycleOutcome {
        match self.mode {
            ControlMode::Fly => self.cycle_camera(rig),
            ControlMode::Orbit => self.cycle_orbit_target(rig, registry, positions),
        }
    }

    fn cycle_camera(&mut self, rig: &mut CameraRig) -> CycleOutcome {
        let Some(slot) = rig.advance_active() else {
            return CycleOutcome::Unchanged;
        };
        if let Some(ActiveController::Navigation(controller)) = self.controller.as_mut() {
            controller.bind(slot);
        }
        info!("Switched to camera slot {}", slot);
        CycleOutcome::Camera(slot)
    }

    /// Moves the cursor to the next non-excluded target within one lap and
    /// re-places the orbit camera at its fixed offset. A lap without a
    /// candidate leaves everything as it was.
    pub fn cycle_orbit_target(
        &mut self,
        rig: &mut CameraRig,
        registry: &TargetRegistry,
        positions: &impl TargetPositions,
    ) -> CycleOutcome {
        let Some(next) = registry.next_eligible(self.orbit_cursor) else {
            debug!(
                "No orbit target to cycle to among {} entries",
                registry.len()
            );
            return CycleOutcome::Unchanged;
        };

        match self.retarget(next, rig, registry, positions) {
            Ok(()) => CycleOutcome::Target(next),
            Err(err) => {
                warn!("Orbit target cycle aborted: {}", err);
                CycleOutcome::Unchanged
            }
        }
    }

    fn retarget(
        &mut self,
        index: usize,
        rig: &mut CameraRig,
        registry: &TargetRegistry,
        positions: &impl TargetPositions,
    ) -> Result<(), ControlError> {
        let target = registry
            .get(index)
            .ok_or_else(|| ControlError::no_eligible_target(registry.len()))?;

        if let Some(ActiveController::Orbit(controller)) = self.controller.as_mut() {
            let focus = target.position(positions)?;
            controller.retarget(target.source, focus);
            if let Some(camera) = rig.slot_mut(controller.slot()) {
                controller.place(&mut camera.transform);
            }
            info!("Orbit target changed to '{}'", target.name);
        }
        self.orbit_cursor = Some(index);
        Ok(())
    }

    /// Reconciles the cursor after `registry` dropped the entry at `removed`.
    /// Losing the current orbit focus retargets to the next eligible entry or,
    /// failing that, falls back to fly mode.
    pub fn handle_target_removed(
        &mut self,
        removed: usize,
        rig: &mut CameraRig,
        registry: &TargetRegistry,
        positions: &impl TargetPositions,
    ) -> Result<RemovalOutcome, ControlError> {
        let Some(cursor) = self.orbit_cursor else {
            return Ok(RemovalOutcome::Untracked);
        };

        match cursor.cmp(&removed) {
            Ordering::Less => Ok(RemovalOutcome::Untracked),
            Ordering::Greater => {
                self.orbit_cursor = Some(cursor - 1);
                Ok(RemovalOutcome::CursorAdjusted)
            }
            Ordering::Equal if self.mode == ControlMode::Fly => {
                self.orbit_cursor = None;
                Ok(RemovalOutcome::CursorAdjusted)
            }
            Ordering::Equal => {
                // Resume the lap at the entry that slid into the removed index.
                let resume = removed.checked_sub(1);
                if let Some(next) = registry.next_eligible(resume) {
                    if self.retarget(next, rig, registry, positions).is_ok() {
                        return Ok(RemovalOutcome::Retargeted(next));
                    }
                }
                self.orbit_cursor = None;
                self.enter_fly(rig)?;
                Ok(RemovalOutcome::FellBackToFly)
            }
        }
    }
}
