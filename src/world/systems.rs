//! Systems for the world module.
use bevy::{math::primitives::Plane3d, prelude::*};

use crate::{
    camera::targets::OrbitCandidate,
    world::components::{PathFollower, PrimarySun},
};

const GROUND_SCALE: f32 = 100.0;
const COP_SPEED: f32 = 3.0;
const COP_HEIGHT: f32 = 0.9;
const SUN_ORBIT_RADIUS: f32 = 10.0;
const SUN_HEIGHT: f32 = 10.0;
const SUN_PERIOD_SECS: f32 = 86.4;

/// Spawns the initial scene. Every object is announced as an orbit candidate;
/// the ground and the sun are excluded from targeting.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(90, 140, 90),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
        OrbitCandidate::excluded("terrain"),
        Name::new("terrain"),
    ));

    let sun = PrimarySun::new(SUN_ORBIT_RADIUS, SUN_HEIGHT, SUN_PERIOD_SECS);
    commands.spawn((
        DirectionalLight {
            illuminance: 20_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(sun.position()).looking_at(Vec3::ZERO, Vec3::Y),
        sun,
        OrbitCandidate::excluded("sun"),
        Name::new("sun"),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(1.0).mesh().uv(32, 18))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(200, 200, 210),
            metallic: 0.6,
            perceptual_roughness: 0.3,
            ..default()
        })),
        Transform::from_xyz(0.0, 1.0, 0.0),
        OrbitCandidate::new("sphere"),
        Name::new("sphere"),
    ));

    let house_mesh = meshes.add(Cuboid::new(4.0, 3.0, 5.0));
    for (name, position, color) in [
        ("house1", Vec3::new(-8.0, 1.5, -6.0), Color::srgb_u8(180, 120, 80)),
        ("house2", Vec3::new(9.0, 1.5, 5.0), Color::srgb_u8(150, 150, 190)),
    ] {
        commands.spawn((
            Mesh3d(house_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                perceptual_roughness: 0.8,
                ..default()
            })),
            Transform::from_translation(position),
            OrbitCandidate::new(name),
            Name::new(name),
        ));
    }

    let patrol = vec![
        Vec3::new(-4.0, COP_HEIGHT, 6.0),
        Vec3::new(5.0, COP_HEIGHT, 8.0),
        Vec3::new(5.0, COP_HEIGHT, -3.0),
        Vec3::new(-4.0, COP_HEIGHT, -2.0),
    ];
    commands.spawn((
        Mesh3d(meshes.add(Capsule3d::new(0.35, 1.1))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(40, 60, 160),
            ..default()
        })),
        Transform::from_translation(patrol[patrol.len() - 1]),
        PathFollower::new(patrol, COP_SPEED),
        OrbitCandidate::new("cop"),
        Name::new("cop"),
    ));
}

/// Advances path followers on the fixed world tick and turns them to face
/// where they are heading.
pub fn follow_paths(time: Res<Time>, mut followers: Query<(&mut PathFollower, &mut Transform)>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for (mut follower, mut transform) in followers.iter_mut() {
        transform.translation = follower.advance(transform.translation, dt);
        if let Some(heading) = follower.heading() {
            let flat = Vec3::new(heading.x, transform.translation.y, heading.z);
            if flat.distance_squared(transform.translation) > f32::EPSILON {
                transform.look_at(flat, Vec3::Y);
            }
        }
    }
}

/// Circles the sun around the origin on the fixed world tick, keeping it
/// aimed at the scene centre.
pub fn orbit_sun(time: Res<Time>, mut suns: Query<(&mut PrimarySun, &mut Transform)>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for (mut sun, mut transform) in suns.iter_mut() {
        let position = sun.advance(dt);
        *transform = Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn follower_moves_by_speed_times_tick() {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default())
            .add_systems(Update, follow_paths);
        let entity = app
            .world_mut()
            .spawn((
                PathFollower::new(vec![Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO], 4.0),
                Transform::default(),
            ))
            .id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(500));
        app.update();

        let transform = app.world().get::<Transform>(entity).unwrap();
        assert!((transform.translation - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        assert!((transform.forward().as_vec3() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn sun_moves_around_the_origin_each_tick() {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default())
            .add_systems(Update, orbit_sun);
        let sun = PrimarySun::new(10.0, 10.0, 4.0);
        let start = sun.position();
        let entity = app
            .world_mut()
            .spawn((sun, Transform::from_translation(start)))
            .id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs(1));
        app.update();

        let transform = app.world().get::<Transform>(entity).unwrap();
        assert!((transform.translation - Vec3::new(10.0, 10.0, 0.0)).length() < 1e-4);
        let to_origin = (-transform.translation).normalize();
        assert!((transform.forward().as_vec3() - to_origin).length() < 1e-5);
    }
}
