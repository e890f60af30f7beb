use bevy::prelude::*;

mod camera;
mod core;
mod ui;
mod world;

use crate::{camera::CameraPlugin, core::CorePlugin, ui::HudPlugin, world::WorldPlugin};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin::default(),
            WorldPlugin,
            CameraPlugin,
            HudPlugin, // After CameraPlugin to read its control notifications
        ))
        .run();
}
