//! Локомоция в ECS: `NavAgent` компонент + прямолинейный kinematic mover.
//!
//! Path planning — не наша забота: host с navmesh читает
//! NavAgent сам, в headless режиме двигаемся по прямой.

use bevy::prelude::*;

use crate::ai::locomotion::Locomotion;

/// Состояние навигации агента (destination + speed от FSM)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub destination: Option<Vec3>,
    /// 0 = стоим (destination может оставаться pending)
    pub speed: f32,
}

/// `Locomotion` поверх `NavAgent` + текущей позиции агента
pub struct NavAgentDriver<'a> {
    pub agent: &'a mut NavAgent,
    pub position: Vec3,
}

impl Locomotion for NavAgentDriver<'_> {
    fn set_destination(&mut self, destination: Vec3) {
        self.agent.destination = Some(destination);
    }

    fn set_speed(&mut self, speed: f32) {
        self.agent.speed = speed;
    }

    fn remaining_distance(&self) -> f32 {
        self.agent
            .destination
            .map_or(f32::INFINITY, |destination| self.position.distance(destination))
    }

    fn has_destination(&self) -> bool {
        self.agent.destination.is_some()
    }
}

/// Система: NavAgent → Transform (headless mover)
///
/// Двигает по прямой к destination на `speed * dt`, не перелетая цель,
/// и разворачивает агента по направлению движения (forward = -Z).
pub fn drive_nav_agents(
    mut agents: Query<(&mut Transform, &NavAgent)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, nav) in agents.iter_mut() {
        let Some(destination) = nav.destination else {
            continue;
        };
        if nav.speed <= 0.0 {
            continue;
        }

        let to_destination = destination - transform.translation;
        let distance = to_destination.length();
        if distance <= f32::EPSILON {
            continue;
        }

        let step = (nav.speed * delta).min(distance);
        let direction = to_destination / distance;
        transform.translation += direction * step;

        // Поворачиваемся только в горизонтальной плоскости
        let flat = Vec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() > f32::EPSILON {
            transform.look_to(flat, Vec3::Y);
        }
    }
}
