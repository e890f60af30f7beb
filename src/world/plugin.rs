//! WorldPlugin spawns the scene and moves its actors and the sun on the fixed tick.
use bevy::prelude::*;

use crate::world::systems::{follow_paths, orbit_sun, spawn_world_environment};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_world_environment)
            .add_systems(FixedUpdate, (follow_paths, orbit_sun));
    }
}
