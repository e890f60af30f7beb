//! Systems feeding the control session and mirroring the rig onto render cameras.
use bevy::{
    camera::Viewport,
    ecs::system::SystemParam,
    input::{mouse::MouseMotion, ButtonInput},
    prelude::*,
    window::PrimaryWindow,
};

use super::{
    components::{PreviewCamera, RigCamera},
    config::{CameraSettings, ProjectionSettings},
    controller::{ActiveController, ControllerInput},
    events::{
        ControlModeChanged, CycleSelectionRequest, OrbitRequestRejected, OrbitTargetChanged,
        ToggleModeRequest,
    },
    rig::{CameraRig, CameraSlot},
    session::{ControlMode, ControlSession, CycleOutcome, RemovalOutcome},
    targets::{OrbitCandidate, TargetPositions, TargetRegistry},
    tracker::OrbitTracker,
};

const TOGGLE_KEYS: [KeyCode; 2] = [KeyCode::KeyO, KeyCode::Tab];
const CYCLE_KEY: KeyCode = KeyCode::KeyC;

/// Notifications for the UI collaborator.
#[derive(SystemParam)]
pub struct ControlNotifications<'w> {
    mode: MessageWriter<'w, ControlModeChanged>,
    target: MessageWriter<'w, OrbitTargetChanged>,
    rejected: MessageWriter<'w, OrbitRequestRejected>,
}

impl ControlNotifications<'_> {
    /// Announces the session's current mode and, in orbit, its target.
    fn announce(&mut self, session: &ControlSession, registry: &TargetRegistry) {
        let mode = session.mode();
        self.mode.write(ControlModeChanged { mode });
        if mode == ControlMode::Orbit {
            self.announce_target(session, registry);
        }
    }

    fn announce_target(&mut self, session: &ControlSession, registry: &TargetRegistry) {
        if let Some(target) = session.orbit_cursor().and_then(|index| registry.get(index)) {
            self.target.write(OrbitTargetChanged {
                name: target.name.clone(),
            });
        }
    }

    fn reject(&mut self, reason: String) {
        self.rejected.write(OrbitRequestRejected { reason });
    }
}

fn perspective(settings: ProjectionSettings) -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: settings.fov_degrees.to_radians(),
        near: settings.near,
        far: settings.far,
        ..default()
    })
}

/// Builds the rig from configuration, spawns one render camera per slot plus
/// the preview camera, and opens the control session in fly mode.
pub fn spawn_camera_rig(mut commands: Commands, settings: Res<CameraSettings>) {
    let projection = settings.projection;
    let fly_slots = settings
        .cameras
        .iter()
        .map(|spec| CameraSlot::from_spec(spec, projection))
        .collect();
    let orbit_slot = CameraSlot::new(
        "Orbit",
        projection,
        Transform::from_translation(settings.orbit.offset).looking_at(Vec3::ZERO, Vec3::Y),
    );
    let mut rig = CameraRig::new(fly_slots, Some(orbit_slot));

    for (index, slot) in rig.slots().enumerate() {
        commands.spawn((
            Camera3d::default(),
            Camera {
                is_active: false,
                ..default()
            },
            perspective(slot.projection()),
            slot.transform,
            RigCamera { slot: index },
            Name::new(format!("Camera: {}", slot.name())),
        ));
    }

    if settings.preview.enabled {
        commands.spawn((
            Camera3d::default(),
            Camera {
                order: 1,
                is_active: false,
                ..default()
            },
            perspective(projection),
            Transform::default(),
            PreviewCamera,
            Name::new("Camera: Preview"),
        ));
    }

    match ControlSession::new(&mut rig, settings.fly, settings.orbit) {
        Ok(session) => {
            info!(
                "Camera rig ready: {} fly slots, orbit slot {:?}",
                rig.fly_slot_count(),
                rig.orbit_index()
            );
            commands.insert_resource(session);
        }
        Err(err) => warn!("Camera controls disabled: {}", err),
    }
    commands.insert_resource(rig);
}

/// Appends newly spawned orbit candidates to the registry in arrival order.
pub fn register_orbit_candidates(
    candidates: Query<(Entity, &OrbitCandidate), Added<OrbitCandidate>>,
    mut registry: ResMut<TargetRegistry>,
) {
    for (entity, candidate) in candidates.iter() {
        match registry.add_target(candidate.name.clone(), entity, candidate.excluded) {
            Ok(index) => info!(
                "Registered target #{} '{}'{}",
                index,
                candidate.name,
                if candidate.excluded { " (excluded)" } else { "" }
            ),
            Err(err) => warn!("Ignoring target: {}", err),
        }
    }
}

/// Drops registry entries whose entities left the scene and reconciles the session.
pub fn prune_removed_candidates(
    mut removed: RemovedComponents<OrbitCandidate>,
    mut registry: ResMut<TargetRegistry>,
    mut session: ResMut<ControlSession>,
    mut rig: ResMut<CameraRig>,
    positions: Query<&Transform, With<OrbitCandidate>>,
    mut notifications: ControlNotifications,
) {
    for entity in removed.read() {
        let Some((index, target)) = registry.remove_source(entity) else {
            continue;
        };
        info!("Target '{}' left the scene", target.name);

        match session.handle_target_removed(index, &mut rig, &registry, &positions) {
            Ok(RemovalOutcome::Retargeted(_)) => {
                notifications.announce_target(&session, &registry);
            }
            Ok(RemovalOutcome::FellBackToFly) => {
                notifications.announce(&session, &registry);
                notifications.reject(format!("Orbit target '{}' was removed", target.name));
            }
            Ok(RemovalOutcome::Untracked | RemovalOutcome::CursorAdjusted) => {}
            Err(err) => warn!("Could not recover from removal of '{}': {}", target.name, err),
        }
    }
}

/// Maps key presses onto control requests.
pub fn read_control_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut toggles: MessageWriter<ToggleModeRequest>,
    mut cycles: MessageWriter<CycleSelectionRequest>,
) {
    if keyboard.any_just_pressed(TOGGLE_KEYS) {
        toggles.write(ToggleModeRequest);
    }
    if keyboard.just_pressed(CYCLE_KEY) {
        cycles.write(CycleSelectionRequest);
    }
}

/// Applies queued toggle and cycle requests to the session.
pub fn apply_control_requests(
    mut toggles: MessageReader<ToggleModeRequest>,
    mut cycles: MessageReader<CycleSelectionRequest>,
    mut session: ResMut<ControlSession>,
    mut rig: ResMut<CameraRig>,
    registry: Res<TargetRegistry>,
    positions: Query<&Transform, With<OrbitCandidate>>,
    mut notifications: ControlNotifications,
) {
    for _ in toggles.read() {
        match session.toggle_mode(&mut rig, &registry, &positions) {
            Ok(_) => notifications.announce(&session, &registry),
            Err(err) => {
                warn!("Mode toggle rejected: {}", err);
                notifications.reject(err.to_string());
            }
        }
    }

    for _ in cycles.read() {
        match session.cycle_selection(&mut rig, &registry, &positions) {
            CycleOutcome::Target(_) => notifications.announce_target(&session, &registry),
            CycleOutcome::Camera(_) | CycleOutcome::Unchanged => {}
        }
    }
}

fn axis(keyboard: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
    let mut value = 0.0;
    if keyboard.pressed(positive) {
        value += 1.0;
    }
    if keyboard.pressed(negative) {
        value -= 1.0;
    }
    value
}

/// Continuous controller input: WASD move, R/F rise and sink, Q/E roll,
/// left-drag to look or orbit.
pub fn controller_input(
    keyboard: &ButtonInput<KeyCode>,
    mouse_buttons: &ButtonInput<MouseButton>,
    look_delta: Vec2,
) -> ControllerInput {
    ControllerInput {
        movement: Vec3::new(
            axis(keyboard, KeyCode::KeyD, KeyCode::KeyA),
            axis(keyboard, KeyCode::KeyR, KeyCode::KeyF),
            axis(keyboard, KeyCode::KeyW, KeyCode::KeyS),
        ),
        roll: axis(keyboard, KeyCode::KeyE, KeyCode::KeyQ),
        look_delta,
        dragging: mouse_buttons.pressed(MouseButton::Left),
    }
}

/// Runs the live controller once per rendered frame.
pub fn update_active_controller(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut motion_events: MessageReader<MouseMotion>,
    mut session: ResMut<ControlSession>,
    mut rig: ResMut<CameraRig>,
    positions: Query<&Transform, With<OrbitCandidate>>,
) {
    let look_delta = motion_events.read().map(|ev| ev.delta).sum::<Vec2>();
    let input = controller_input(&keyboard, &mouse_buttons, look_delta);

    let Some(controller) = session.controller_mut() else {
        return;
    };
    let Some(camera) = rig.slot_mut(controller.slot()) else {
        return;
    };

    match controller {
        ActiveController::Navigation(navigation) => {
            navigation.update(time.delta_secs(), &input, &mut camera.transform);
        }
        ActiveController::Orbit(orbit) => {
            if let Some(focus) = positions.position_of(orbit.target()) {
                orbit.set_focus(focus);
            }
            orbit.update(&input, &mut camera.transform);
        }
    }
}

/// Fixed-tick radius correction for the orbit camera. Runs after actors moved.
pub fn track_orbit_target(
    mut session: ResMut<ControlSession>,
    mut rig: ResMut<CameraRig>,
    mut tracker: ResMut<OrbitTracker>,
    positions: Query<&Transform, With<OrbitCandidate>>,
) {
    let Some(ActiveController::Orbit(controller)) = session.controller_mut() else {
        return;
    };
    let Some(target) = positions.position_of(controller.target()) else {
        return;
    };
    let Some(camera) = rig.slot_mut(controller.slot()) else {
        return;
    };

    controller.set_focus(target);
    camera.transform.translation = tracker.correct(camera.transform.translation, target);
    controller.face_focus(&mut camera.transform);
}

/// Render step: copies slot transforms to their cameras and activates only
/// the slot the session is bound to.
pub fn sync_rig_cameras(
    rig: Res<CameraRig>,
    session: Res<ControlSession>,
    mut cameras: Query<(&RigCamera, &mut Camera, &mut Transform), Without<PreviewCamera>>,
) {
    let bound = session.bound_slot();
    for (rig_camera, mut camera, mut transform) in cameras.iter_mut() {
        let Some(slot) = rig.slot(rig_camera.slot) else {
            continue;
        };
        let active = bound == Some(rig_camera.slot);
        if camera.is_active != active {
            camera.is_active = active;
        }
        if *transform != slot.transform {
            *transform = slot.transform;
        }
    }
}

/// Corner viewport covering `scale` of the window, anchored top-right.
pub fn preview_viewport(window_size: UVec2, scale: f32) -> Option<Viewport> {
    let size = (window_size.as_vec2() * scale).floor().as_uvec2();
    if size.x == 0 || size.y == 0 {
        return None;
    }
    Some(Viewport {
        physical_position: UVec2::new(window_size.x - size.x, 0),
        physical_size: size,
        ..default()
    })
}

fn same_viewport(current: Option<&Viewport>, wanted: Option<&Viewport>) -> bool {
    match (current, wanted) {
        (None, None) => true,
        (Some(current), Some(wanted)) => {
            current.physical_position == wanted.physical_position
                && current.physical_size == wanted.physical_size
        }
        _ => false,
    }
}

/// Shows the rig's `next` slot in the preview viewport, resized with the window.
pub fn sync_preview_camera(
    rig: Res<CameraRig>,
    session: Res<ControlSession>,
    settings: Res<CameraSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut previews: Query<(&mut Camera, &mut Transform), With<PreviewCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let viewport = preview_viewport(window.physical_size(), settings.preview.scale);
    let next = rig.next_index();
    let visible = viewport.is_some() && session.bound_slot() != Some(next);

    for (mut camera, mut transform) in previews.iter_mut() {
        if camera.is_active != visible {
            camera.is_active = visible;
        }
        if !same_viewport(camera.viewport.as_ref(), viewport.as_ref()) {
            camera.viewport = viewport.clone();
        }
        if let Some(slot) = rig.slot(next) {
            if *transform != slot.transform {
                *transform = slot.transform;
            }
        }
    }
}
