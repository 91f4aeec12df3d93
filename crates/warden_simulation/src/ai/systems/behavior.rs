//! FSM systems: валидация агентов, тик контроллеров, внешние сигналы.

use bevy::prelude::*;

use super::navigation::{NavAgent, NavAgentDriver};
use super::world_view::{snapshot_world, Occluder, Targetable};
use crate::ai::controller::{AgentPose, BehaviorController, TickContext};
use crate::ai::events::{BehaviorModeChanged, CatchRequest, ResetRequest};

/// Маркер: агент не прошёл setup (нет локомоции) и не тикается
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct BehaviorFault {
    pub reason: &'static str,
}

/// Система: проверка новых агентов до первого тика.
///
/// Controller без `NavAgent` = collaborator unavailable → BehaviorFault.
pub fn validate_behavior_agents(
    mut commands: Commands,
    added: Query<(Entity, &BehaviorController, Has<NavAgent>), Added<BehaviorController>>,
) {
    for (entity, controller, has_nav) in added.iter() {
        if has_nav {
            continue;
        }

        crate::log_error(&format!(
            "❌ {} ({:?}): collaborator unavailable: locomotion (NavAgent missing)",
            controller.name(),
            entity
        ));
        commands.entity(entity).insert(BehaviorFault { reason: "locomotion" });
    }
}

/// Система: CatchRequest / ResetRequest → controller
pub fn handle_behavior_requests(
    mut catches: EventReader<CatchRequest>,
    mut resets: EventReader<ResetRequest>,
    mut controllers: Query<&mut BehaviorController>,
) {
    for request in catches.read() {
        if let Ok(mut controller) = controllers.get_mut(request.agent) {
            controller.mark_caught();
        }
    }

    for request in resets.read() {
        if let Ok(mut controller) = controllers.get_mut(request.agent) {
            controller.reset();
        }
    }
}

/// Система: один тик FSM для каждого агента
///
/// Perception → transitions → NavAgent команды. Мир снимается один раз за тик.
pub fn tick_behavior_controllers(
    mut agents: Query<
        (Entity, &Transform, &mut BehaviorController, &mut NavAgent),
        Without<BehaviorFault>,
    >,
    targets: Query<(&Transform, &Targetable)>,
    occluders: Query<(&Transform, &Occluder)>,
    mut mode_events: EventWriter<BehaviorModeChanged>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let world = snapshot_world(&targets, &occluders);

    for (entity, transform, mut controller, mut nav) in agents.iter_mut() {
        let mut driver = NavAgentDriver {
            agent: &mut *nav,
            position: transform.translation,
        };
        let mut ctx = TickContext {
            pose: AgentPose::from_transform(transform),
            delta,
            spatial: &world,
            tags: &world,
            locomotion: &mut driver,
        };

        let report = controller.tick(&mut ctx);

        if report.changed() {
            mode_events.write(BehaviorModeChanged {
                agent: entity,
                from: report.previous,
                to: report.mode,
            });
        }
    }
}
