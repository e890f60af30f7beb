// src/ui/hud/systems.rs
//
// Systems spawning the HUD and reflecting control notifications in it.

use bevy::{camera::ClearColorConfig, prelude::*};

use crate::camera::{
    events::{ControlModeChanged, OrbitRequestRejected, OrbitTargetChanged},
    session::ControlMode,
};

use super::components::{HudCamera, HudSettings, ModeLabel, NoticeLabel, TargetLabel};

const BACKGROUND_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.7);
const TEXT_COLOR: Color = Color::WHITE;
const TARGET_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const NOTICE_COLOR: Color = Color::srgb(1.0, 0.45, 0.35);
const HUD_CAMERA_ORDER: isize = 2;

/// Spawns the overlay UI camera and the label panel in the top-left corner.
pub fn spawn_hud(mut commands: Commands, settings: Res<HudSettings>) {
    commands.spawn((
        Camera2d,
        Camera {
            order: HUD_CAMERA_ORDER,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        IsDefaultUiCamera,
        HudCamera,
        Name::new("Camera: HUD"),
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(settings.margin),
                left: Val::Px(settings.margin),
                padding: UiRect::all(Val::Px(settings.padding)),
                row_gap: Val::Px(settings.row_gap),
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(BACKGROUND_COLOR),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(ControlMode::default().label()),
                TextFont {
                    font_size: settings.mode_font_size,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                ModeLabel,
            ));
            panel.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.detail_font_size,
                    ..default()
                },
                TextColor(TARGET_COLOR),
                Visibility::Hidden,
                TargetLabel,
            ));
            panel.spawn((
                Text::new(""),
                TextFont {
                    font_size: settings.detail_font_size,
                    ..default()
                },
                TextColor(NOTICE_COLOR),
                NoticeLabel,
            ));
        });
}

/// Updates the mode label, shows the target label only in orbit, and clears
/// any stale notice after a successful transition.
pub fn update_mode_label(
    mut changes: MessageReader<ControlModeChanged>,
    mut modes: Query<&mut Text, (With<ModeLabel>, Without<NoticeLabel>)>,
    mut targets: Query<&mut Visibility, With<TargetLabel>>,
    mut notices: Query<&mut Text, (With<NoticeLabel>, Without<ModeLabel>)>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    debug!("HUD mode -> {:?}", change.mode);

    for mut text in modes.iter_mut() {
        text.0 = change.mode.label().to_string();
    }
    let visibility = match change.mode {
        ControlMode::Orbit => Visibility::Inherited,
        ControlMode::Fly => Visibility::Hidden,
    };
    for mut target_visibility in targets.iter_mut() {
        *target_visibility = visibility;
    }
    for mut text in notices.iter_mut() {
        text.0.clear();
    }
}

/// Shows the name of the newly focused orbit target.
pub fn update_target_label(
    mut changes: MessageReader<OrbitTargetChanged>,
    mut labels: Query<&mut Text, With<TargetLabel>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    for mut text in labels.iter_mut() {
        text.0 = change.label();
    }
}

/// Shows the reason an orbit request was refused.
pub fn show_rejection_notice(
    mut rejections: MessageReader<OrbitRequestRejected>,
    mut labels: Query<&mut Text, With<NoticeLabel>>,
) {
    let Some(rejection) = rejections.read().last() else {
        return;
    };
    for mut text in labels.iter_mut() {
        text.0 = rejection.reason.clone();
    }
}
