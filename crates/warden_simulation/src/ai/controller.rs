//! Behavior state machine: Patrol → Alert → Investigate / Chase → Patrol, + Caught.
//!
//! Один тик = perception → переходы → команды локомоции. Elapsed time приходит
//! параметром (никакого глобального времени), так что controller
//! детерминирован и тестируется без host loop.

use bevy::prelude::*;

use super::components::{
    AgentState, BehaviorConfig, BehaviorMode, LostTargetPolicy, PerceptionConfig, TargetStrategy,
    TimingConfig, WaypointCycle,
};
use super::locomotion::{Locomotion, LocomotionAdapter};
use super::perception::{perceive, PerceptionResult};
use super::world::{SpatialQuery, TagLookup, TargetKind};
use crate::error::ConfigError;

/// Поза агента на начало тика
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentPose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl AgentPose {
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self { position, forward }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            forward: *transform.forward(),
        }
    }
}

/// Всё, что нужно одному тику от host'а
pub struct TickContext<'a> {
    pub pose: AgentPose,
    /// Elapsed time (секунды), >= 0
    pub delta: f32,
    pub spatial: &'a dyn SpatialQuery,
    pub tags: &'a dyn TagLookup,
    pub locomotion: &'a mut dyn Locomotion,
}

/// Итог тика (для событий/логов host'а)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub previous: BehaviorMode,
    pub mode: BehaviorMode,
    pub perception: PerceptionResult,
}

impl TickReport {
    pub fn changed(&self) -> bool {
        self.previous != self.mode
    }
}

/// Guard controller (ECS component: один на агента, state принадлежит только ему)
#[derive(Component, Debug, Clone)]
pub struct BehaviorController {
    name: String,
    perception: PerceptionConfig,
    timing: TimingConfig,
    strategy: TargetStrategy,
    lost_target: LostTargetPolicy,
    waypoints: WaypointCycle,
    state: AgentState,
    nav: LocomotionAdapter,
}

impl BehaviorController {
    /// Валидирует конфиг. Пустой waypoint set → ConfigError здесь, а не на тике.
    pub fn new(name: impl Into<String>, config: BehaviorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let BehaviorConfig {
            perception,
            timing,
            strategy,
            lost_target,
            waypoints,
        } = config;

        Ok(Self {
            name: name.into(),
            state: AgentState::new(&timing),
            waypoints: WaypointCycle::new(waypoints)?,
            perception,
            timing,
            strategy,
            lost_target,
            nav: LocomotionAdapter::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> BehaviorMode {
        self.state.mode
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn waypoints(&self) -> &WaypointCycle {
        &self.waypoints
    }

    pub fn perception_config(&self) -> &PerceptionConfig {
        &self.perception
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Внешний сигнал: цель поймана. Агент стоит до `reset()`.
    pub fn mark_caught(&mut self) {
        if self.state.mode != BehaviorMode::Caught {
            crate::log(&format!("🪤 {}: {} → Caught", self.name, self.state.mode.as_str()));
            self.state.mode = BehaviorMode::Caught;
        }
    }

    /// Внешний reset: назад в Patrol, таймеры сброшены, waypoint index сохранён.
    pub fn reset(&mut self) {
        crate::log(&format!("🔁 {}: reset {} → Patrol", self.name, self.state.mode.as_str()));
        self.state.mode = BehaviorMode::Patrol;
        self.state.reset_timers();
        self.state.clear_targets();
        self.nav.invalidate();
    }

    /// Один simulation tick.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> TickReport {
        let previous = self.state.mode;
        let delta = ctx.delta.max(0.0);

        // Perception всегда первым
        let perception = perceive(&self.perception, ctx.pose.position, ctx.pose.forward, ctx.spatial);

        match self.state.mode {
            BehaviorMode::Patrol => self.patrol(ctx, &perception, delta),
            BehaviorMode::Alert => self.alert(ctx, &perception, delta),
            BehaviorMode::Investigate => self.investigate(ctx, &perception, delta),
            BehaviorMode::Chase => self.chase(ctx, &perception, delta),
            BehaviorMode::Caught => {
                self.nav.stop(ctx.locomotion);
            }
        }

        let report = TickReport {
            previous,
            mode: self.state.mode,
            perception,
        };

        if report.changed() {
            crate::log(&format!(
                "🧭 {}: {} → {} (target: {:?})",
                self.name,
                previous.as_str(),
                report.mode.as_str(),
                perception.target_position
            ));
        }

        report
    }

    fn patrol(&mut self, ctx: &mut TickContext<'_>, perception: &PerceptionResult, delta: f32) {
        if let Some(position) = perception.target_position {
            self.state.last_known_target_position = Some(position);
            self.state.rotate_timer.reset();
            self.state.mode = BehaviorMode::Alert;
            self.nav.stop(ctx.locomotion);
            return;
        }

        let waypoint = self.waypoints.current();
        self.nav.set_destination(ctx.locomotion, waypoint);

        if !self.nav.has_arrived(ctx.locomotion, self.timing.arrival_threshold) {
            self.nav.move_at(ctx.locomotion, self.timing.walk_speed);
            return;
        }

        if self.state.wait_timer.is_running() {
            self.nav.stop(ctx.locomotion);
            self.state.wait_timer.tick(delta);
        } else {
            let next = self.waypoints.next_point();
            self.nav.set_destination(ctx.locomotion, next);
            self.nav.move_at(ctx.locomotion, self.timing.walk_speed);
            self.state.wait_timer.reset();
        }
    }

    fn alert(&mut self, ctx: &mut TickContext<'_>, perception: &PerceptionResult, delta: f32) {
        if let Some((position, kind)) = perception.target() {
            self.start_chase(ctx, position, kind);
            return;
        }

        self.nav.stop(ctx.locomotion);
        self.state.rotate_timer.tick(delta);

        if self.state.rotate_timer.is_finished() {
            match self.state.last_known_target_position {
                Some(last_known) => {
                    self.state.mode = BehaviorMode::Investigate;
                    self.nav.set_destination(ctx.locomotion, last_known);
                    self.nav.move_at(ctx.locomotion, self.timing.walk_speed);
                }
                None => self.return_to_patrol(ctx),
            }
        }
    }

    fn investigate(&mut self, ctx: &mut TickContext<'_>, perception: &PerceptionResult, delta: f32) {
        if let Some((position, kind)) = perception.target() {
            self.start_chase(ctx, position, kind);
            return;
        }

        let Some(last_known) = self.state.last_known_target_position else {
            self.return_to_patrol(ctx);
            return;
        };

        self.nav.set_destination(ctx.locomotion, last_known);

        if !self.nav.has_arrived(ctx.locomotion, self.timing.arrival_threshold) {
            self.nav.move_at(ctx.locomotion, self.timing.walk_speed);
            return;
        }

        if self.state.wait_timer.is_running() {
            self.nav.stop(ctx.locomotion);
            self.state.wait_timer.tick(delta);
        } else {
            self.return_to_patrol(ctx);
        }
    }

    fn chase(&mut self, ctx: &mut TickContext<'_>, perception: &PerceptionResult, delta: f32) {
        match self.resolve_target(ctx, perception) {
            Some((position, kind)) => {
                self.state.current_target_position = Some(position);
                self.state.current_target_kind = Some(kind);
            }
            None if self.lost_target == LostTargetPolicy::RevertToPatrol => {
                self.return_to_patrol(ctx);
                return;
            }
            None => {}
        }

        let Some(target) = self.state.current_target_position else {
            self.return_to_patrol(ctx);
            return;
        };

        self.nav.set_destination(ctx.locomotion, target);

        if !self.nav.has_arrived(ctx.locomotion, self.timing.arrival_threshold) {
            self.nav.move_at(ctx.locomotion, self.timing.run_speed);
            return;
        }

        // Disengage меряется до живой позиции отслеживаемой цели; нет её в мире → держим позицию
        let tracked_kind = self.state.current_target_kind.unwrap_or(TargetKind::Player);
        let far_enough = ctx
            .tags
            .find_first_with_tag(tracked_kind)
            .is_some_and(|live| ctx.pose.position.distance(live) >= self.timing.disengage_distance);

        if far_enough && self.state.wait_timer.is_finished() {
            self.return_to_patrol(ctx);
        } else {
            self.nav.stop(ctx.locomotion);
            self.state.wait_timer.tick(delta);
        }
    }

    /// Выбор цели в Chase согласно стратегии.
    fn resolve_target(
        &self,
        ctx: &TickContext<'_>,
        perception: &PerceptionResult,
    ) -> Option<(Vec3, TargetKind)> {
        match self.strategy {
            TargetStrategy::SingleTarget => perception.target(),
            TargetStrategy::ClosestOfMany => {
                closest_tagged(ctx.tags, ctx.pose.position).or_else(|| perception.target())
            }
        }
    }

    fn start_chase(&mut self, ctx: &mut TickContext<'_>, position: Vec3, kind: TargetKind) {
        self.state.mode = BehaviorMode::Chase;
        self.state.current_target_position = Some(position);
        self.state.current_target_kind = Some(kind);
        self.state.last_known_target_position = None;
        self.state.wait_timer.reset();
        self.nav.set_destination(ctx.locomotion, position);
        self.nav.move_at(ctx.locomotion, self.timing.run_speed);
    }

    fn return_to_patrol(&mut self, ctx: &mut TickContext<'_>) {
        self.state.mode = BehaviorMode::Patrol;
        self.state.reset_timers();
        self.state.clear_targets();
        self.nav.set_destination(ctx.locomotion, self.waypoints.current());
        self.nav.move_at(ctx.locomotion, self.timing.walk_speed);
    }
}

/// Ближайшая из живых tagged целей. Ничья → Player (он первый в `TargetKind::ALL`).
pub fn closest_tagged(tags: &dyn TagLookup, origin: Vec3) -> Option<(Vec3, TargetKind)> {
    let mut best: Option<(f32, Vec3, TargetKind)> = None;

    for kind in TargetKind::ALL {
        let Some(position) = tags.find_first_with_tag(kind) else {
            continue;
        };
        let distance = origin.distance(position);
        if best.map_or(true, |(best_distance, _, _)| distance < best_distance) {
            best = Some((distance, position, kind));
        }
    }

    best.map(|(_, position, kind)| (position, kind))
}
