//! Core module hosting the fixed world tick.
pub mod plugin;

pub use plugin::CorePlugin;
