//! Test fakes для collaborator'ов.

use bevy::prelude::*;

use super::components::{BehaviorConfig, TimingConfig};
use super::controller::{AgentPose, BehaviorController, TickContext, TickReport};
use super::locomotion::Locomotion;
use super::world::StaticWorld;

/// Локомоция со скриптованным remaining distance
#[derive(Debug, Default)]
pub struct FakeNav {
    pub destination: Option<Vec3>,
    pub speed: f32,
    pub remaining: f32,
    pub destination_calls: usize,
}

impl FakeNav {
    /// Далеко от любой цели
    pub fn far() -> Self {
        Self {
            remaining: 100.0,
            ..Default::default()
        }
    }
}

impl Locomotion for FakeNav {
    fn set_destination(&mut self, destination: Vec3) {
        self.destination_calls += 1;
        self.destination = Some(destination);
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining
    }

    fn has_destination(&self) -> bool {
        self.destination.is_some()
    }
}

pub fn square_waypoints() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, -20.0),
        Vec3::new(20.0, 0.0, -20.0),
        Vec3::new(20.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
    ]
}

pub fn guard_config() -> BehaviorConfig {
    BehaviorConfig::with_waypoints(square_waypoints())
}

pub fn guard(config: BehaviorConfig) -> BehaviorController {
    BehaviorController::new("test-guard", config).expect("valid test config")
}

/// Агент в начале координат смотрит вдоль -Z
pub fn origin_pose() -> AgentPose {
    AgentPose::new(Vec3::ZERO, Vec3::NEG_Z)
}

pub fn step(
    controller: &mut BehaviorController,
    world: &StaticWorld,
    nav: &mut FakeNav,
    delta: f32,
) -> TickReport {
    step_at(controller, origin_pose(), world, nav, delta)
}

pub fn step_at(
    controller: &mut BehaviorController,
    pose: AgentPose,
    world: &StaticWorld,
    nav: &mut FakeNav,
    delta: f32,
) -> TickReport {
    let mut ctx = TickContext {
        pose,
        delta,
        spatial: world,
        tags: world,
        locomotion: nav,
    };
    controller.tick(&mut ctx)
}

pub fn timing_with(wait: f32, rotate: f32) -> TimingConfig {
    TimingConfig {
        wait_duration: wait,
        rotate_duration: rotate,
        ..Default::default()
    }
}
