//! AI systems (ECS glue вокруг BehaviorController)

pub mod behavior;
pub mod navigation;
pub mod world_view;

// Re-export all systems
pub use behavior::*;
pub use navigation::*;
pub use world_view::*;
