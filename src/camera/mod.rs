//! Camera rig, fly/orbit control session and orbit target tracking.
pub mod components;
pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod plugin;
pub mod rig;
pub mod session;
pub mod systems;
pub mod targets;
pub mod tracker;

pub use plugin::CameraPlugin;
