//! AI components

pub mod config;
pub mod mode;
pub mod timers;
pub mod waypoints;

#[cfg(test)]
mod waypoints_tests;

// Re-export all components
pub use config::*;
pub use mode::*;
pub use timers::*;
pub use waypoints::*;
