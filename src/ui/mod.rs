// src/ui/mod.rs
//
// UI module providing screen-space overlays.
//
// Current features:
// - Control HUD (mode, orbit target and rejection notices)

pub mod hud;

// Re-export the main plugin
pub use hud::HudPlugin;
