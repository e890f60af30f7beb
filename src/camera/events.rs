//! Requests consumed and notifications emitted by the control session.
use bevy::prelude::Message;

use super::session::ControlMode;

/// Asks the session to switch between fly and orbit mode.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ToggleModeRequest;

/// Asks the session to cycle cameras (fly) or targets (orbit).
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct CycleSelectionRequest;

/// Fired after every successful mode transition.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlModeChanged {
    pub mode: ControlMode,
}

/// Fired when the orbit focus moves to a new target.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct OrbitTargetChanged {
    pub name: String,
}

impl OrbitTargetChanged {
    pub fn label(&self) -> String {
        format!("Target: {}", self.name)
    }
}

/// Fired when orbit mode could not be entered.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct OrbitRequestRejected {
    pub reason: String,
}
