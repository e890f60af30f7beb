//! CameraPlugin wires the control session, its input and the orbit tracker.
use bevy::prelude::*;

use crate::world::systems::follow_paths;

use super::{
    config::CameraSettings,
    events::{
        ControlModeChanged, CycleSelectionRequest, OrbitRequestRejected, OrbitTargetChanged,
        ToggleModeRequest,
    },
    session::ControlSession,
    systems::{
        apply_control_requests, prune_removed_candidates, read_control_input,
        register_orbit_candidates, spawn_camera_rig, sync_preview_camera, sync_rig_cameras,
        track_orbit_target, update_active_controller,
    },
    targets::TargetRegistry,
    tracker::OrbitTracker,
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        let settings = CameraSettings::load_or_default();
        info!(
            "Camera controls configured: fly speed {:.2}, roll speed {:.2}, orbit radius {:.2}",
            settings.fly.movement_speed, settings.fly.roll_speed, settings.orbit.desired_radius
        );

        app.insert_resource(OrbitTracker::new(
            settings.orbit.desired_radius,
            settings.orbit.offset,
        ))
        .insert_resource(settings)
        .init_resource::<TargetRegistry>()
        .add_message::<ToggleModeRequest>()
        .add_message::<CycleSelectionRequest>()
        .add_message::<ControlModeChanged>()
        .add_message::<OrbitTargetChanged>()
        .add_message::<OrbitRequestRejected>()
        .add_systems(Startup, spawn_camera_rig)
        .add_systems(
            Update,
            (
                register_orbit_candidates,
                read_control_input,
                (
                    prune_removed_candidates,
                    apply_control_requests,
                    update_active_controller,
                    (sync_rig_cameras, sync_preview_camera),
                )
                    .chain()
                    .run_if(resource_exists::<ControlSession>),
            )
                .chain(),
        )
        .add_systems(
            FixedUpdate,
            track_orbit_target
                .after(follow_paths)
                .run_if(resource_exists::<ControlSession>),
        );
    }
}
