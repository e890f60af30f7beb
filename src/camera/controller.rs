//! Navigation (fly) and orbit controllers driving a single camera slot.
use bevy::prelude::*;

use super::config::{FlySettings, OrbitSettings};

/// Continuous input gathered for one render step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerInput {
    /// Local-space movement axes: x = right, y = up, z = forward.
    pub movement: Vec3,
    /// Positive rolls clockwise as seen from behind the camera.
    pub roll: f32,
    /// Mouse motion accumulated this step, in pixels.
    pub look_delta: Vec2,
    /// Whether the drag button is held.
    pub dragging: bool,
}

/// Free-roam controller translating and rotating its camera directly.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationController {
    slot: usize,
    settings: FlySettings,
}

impl NavigationController {
    pub fn new(slot: usize, settings: FlySettings) -> Self {
        Self { slot, settings }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn settings(&self) -> FlySettings {
        self.settings
    }

    /// Swaps the bound camera in place.
    pub fn bind(&mut self, slot: usize) {
        self.slot = slot;
    }

    pub fn update(&self, delta_secs: f32, input: &ControllerInput, transform: &mut Transform) {
        let movement = input.movement.clamp_length_max(1.0);
        if movement != Vec3::ZERO {
            let step = self.settings.movement_speed * delta_secs;
            let world = transform.right() * movement.x
                + transform.up() * movement.y
                + transform.forward() * movement.z;
            transform.translation += world * step;
        }

        let looking = !self.settings.drag_to_look || input.dragging;
        let look = if looking {
            input.look_delta * self.settings.look_speed
        } else {
            Vec2::ZERO
        };
        let roll = -input.roll * self.settings.roll_speed * delta_secs;

        if look != Vec2::ZERO || roll != 0.0 {
            let local = Quat::from_euler(EulerRot::YXZ, -look.x, -look.y, roll);
            transform.rotation = (transform.rotation * local).normalize();
        }
    }
}

/// Target-locked controller; only the angular position around the focus changes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    slot: usize,
    target: Entity,
    focus: Vec3,
    settings: OrbitSettings,
    pan_enabled: bool,
    zoom_enabled: bool,
}

impl OrbitController {
    pub fn new(slot: usize, target: Entity, focus: Vec3, settings: OrbitSettings) -> Self {
        Self {
            slot,
            target,
            focus,
            settings,
            pan_enabled: false,
            zoom_enabled: false,
        }
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn target(&self) -> Entity {
        self.target
    }

    pub fn focus(&self) -> Vec3 {
        self.focus
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pan_enabled(&self) -> bool {
        self.pan_enabled
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn zoom_enabled(&self) -> bool {
        self.zoom_enabled
    }

    /// Points the controller at a new target.
    pub fn retarget(&mut self, target: Entity, focus: Vec3) {
        self.target = target;
        self.focus = focus;
    }

    /// Records where the target currently is.
    pub fn set_focus(&mut self, focus: Vec3) {
        self.focus = focus;
    }

    /// Places the camera at `focus + offset`, facing the focus.
    pub fn place(&self, transform: &mut Transform) {
        transform.translation = self.focus + self.settings.offset;
        self.face_focus(transform);
    }

    pub fn face_focus(&self, transform: &mut Transform) {
        if transform.translation.distance_squared(self.focus) > f32::EPSILON {
            transform.look_at(self.focus, Vec3::Y);
        }
    }

    /// Rotates the camera around the focus while dragging; distance is kept.
    pub fn update(&self, input: &ControllerInput, transform: &mut Transform) {
        let offset = transform.translation - self.focus;
        let radius = offset.length();

        if input.dragging && input.look_delta != Vec2::ZERO && radius > f32::EPSILON {
            let azimuth = offset.z.atan2(offset.x) - input.look_delta.x * self.settings.rotate_speed;
            let polar = ((offset.y / radius).clamp(-1.0, 1.0).acos()
                - input.look_delta.y * self.settings.rotate_speed)
                .clamp(self.settings.min_polar, self.settings.max_polar);

            let direction = Vec3::new(
                polar.sin() * azimuth.cos(),
                polar.cos(),
                polar.sin() * azimuth.sin(),
            );
            transform.translation = self.focus + direction * radius;
        }

        self.face_focus(transform);
    }
}

/// The single live controller of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveController {
    Navigation(NavigationController),
    Orbit(OrbitController),
}

impl ActiveController {
    pub fn slot(&self) -> usize {
        match self {
            Self::Navigation(controller) => controller.slot(),
            Self::Orbit(controller) => controller.slot(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Navigation(_) => "navigation",
            Self::Orbit(_) => "orbit",
        }
    }

    /// Releases the controller; called on the outgoing controller before its
    /// replacement is built.
    pub fn dispose(self) {
        debug!(
            "Disposing {} controller bound to camera slot {}",
            self.kind(),
            self.slot()
        );
    }
}
