//! Components attached to render camera entities.
use bevy::prelude::*;

/// Render camera mirroring one rig slot.
#[derive(Component, Debug, Clone, Copy)]
pub struct RigCamera {
    pub slot: usize,
}

/// Corner camera showing the rig's `next` slot.
#[derive(Component, Debug, Default)]
pub struct PreviewCamera;
