// src/ui/hud/mod.rs
//
// Control HUD showing the camera mode, the orbit target and rejection notices.

pub mod components;
pub mod plugin;
pub mod systems;

// Re-export main types
pub use plugin::HudPlugin;
