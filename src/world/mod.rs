//! World module housing the scene and the actors the cameras can follow.
pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
