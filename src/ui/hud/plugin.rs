// src/ui/hud/plugin.rs
//
// HudPlugin spawns the control HUD and keeps it in step with the session.

use bevy::prelude::*;

use super::components::HudSettings;
use super::systems::{show_rejection_notice, spawn_hud, update_mode_label, update_target_label};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        info!("HudPlugin registered");

        app.insert_resource(HudSettings::default())
            .add_systems(Startup, spawn_hud)
            .add_systems(
                Update,
                (update_mode_label, update_target_label, show_rejection_notice).chain(),
            );
    }
}
