//! AI decision-making module
//!
//! Guard behavior: perception (FOV + LOS) + Patrol/Alert/Investigate/Chase/Caught FSM.
//! Core (`controller`, `perception`) не зависит от ECS — ECS systems только
//! собирают snapshot мира и передают elapsed time.

use bevy::prelude::*;

pub mod builder;
pub mod components;
pub mod controller;
pub mod events;
pub mod locomotion;
pub mod perception;
pub mod spawn;
pub mod systems;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod locomotion_tests;
#[cfg(test)]
mod perception_tests;

// Re-export основных типов
pub use builder::{BehaviorAgent, BehaviorAgentBuilder};
pub use components::*;
pub use controller::{AgentPose, BehaviorController, TickContext, TickReport};
pub use events::{BehaviorModeChanged, CatchRequest, ResetRequest};
pub use locomotion::{Locomotion, LocomotionAdapter};
pub use perception::{perceive, PerceptionResult};
pub use spawn::{spawn_guard, GuardBundle};
pub use systems::{BehaviorFault, NavAgent, Occluder, Targetable};
pub use world::{Candidate, ObstacleBox, SpatialQuery, StaticWorld, TagLookup, TargetKind};

/// System set всех guard систем (host ставит свои системы `.before`/`.after`)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BehaviorSet;

/// AI Plugin
///
/// Регистрирует системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. validate_behavior_agents — агенты без локомоции → BehaviorFault
/// 2. handle_behavior_requests — CatchRequest / ResetRequest
/// 3. tick_behavior_controllers — perception + FSM → NavAgent
/// 4. drive_nav_agents — NavAgent → Transform (headless mover)
pub struct BehaviorPlugin;

impl Plugin for BehaviorPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BehaviorModeChanged>()
            .add_event::<CatchRequest>()
            .add_event::<ResetRequest>()
            .add_systems(
                FixedUpdate,
                (
                    systems::validate_behavior_agents,
                    systems::handle_behavior_requests,
                    systems::tick_behavior_controllers,
                    systems::drive_nav_agents,
                )
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(BehaviorSet),
            );
    }
}
