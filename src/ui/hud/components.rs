// src/ui/hud/components.rs
//
// Components and settings for the control HUD.

use bevy::prelude::*;

/// Overlay camera that renders the HUD above whichever 3D camera is live.
#[derive(Component, Debug, Default)]
pub struct HudCamera;

/// Text showing the current control mode.
#[derive(Component, Debug, Default)]
pub struct ModeLabel;

/// Text showing the orbit target; hidden outside orbit mode.
#[derive(Component, Debug, Default)]
pub struct TargetLabel;

/// Text showing why the last orbit request failed.
#[derive(Component, Debug, Default)]
pub struct NoticeLabel;

/// Layout and font settings for the HUD.
#[derive(Resource, Debug, Clone)]
pub struct HudSettings {
    /// Offset from the top-left corner (pixels).
    pub margin: f32,

    /// Padding inside the HUD panel (pixels).
    pub padding: f32,

    /// Gap between label rows (pixels).
    pub row_gap: f32,

    /// Font size for the mode label (points).
    pub mode_font_size: f32,

    /// Font size for target and notice labels (points).
    pub detail_font_size: f32,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            margin: 12.0,
            padding: 8.0,
            row_gap: 4.0,
            mode_font_size: 20.0,
            detail_font_size: 16.0,
        }
    }
}
