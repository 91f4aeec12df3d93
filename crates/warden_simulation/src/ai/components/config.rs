//! Конфигурация агента: perception, timing, стратегия выбора цели.
//!
//! Задаётся один раз при спавне и дальше не меняется.
//! Defaults: 15м / 90° / 4с / 2с / walk 6 / run 9.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Параметры зрения
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Радиус обнаружения (метры)
    pub view_radius: f32,
    /// Полный угол обзора (градусы), 360 = без углового фильтра
    pub view_angle_degrees: f32,
    /// Проверять line-of-sight против obstacle geometry
    pub occlusion_enabled: bool,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            view_radius: 15.0,
            view_angle_degrees: 90.0,
            occlusion_enabled: true,
        }
    }
}

/// Таймеры, скорости, пороги
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Ожидание в точке (секунды)
    pub wait_duration: f32,
    /// Поворот перед investigate (секунды)
    pub rotate_duration: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Remaining distance <= threshold → "прибыли" (зеркалит stopping tolerance локомоции)
    pub arrival_threshold: f32,
    /// Минимальная дистанция до цели для возврата в Patrol
    pub disengage_distance: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wait_duration: 4.0,
            rotate_duration: 2.0,
            walk_speed: 6.0,
            run_speed: 9.0,
            arrival_threshold: 0.3,
            disengage_distance: 6.0,
        }
    }
}

/// Как Chase выбирает цель на каждом тике
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum TargetStrategy {
    /// Только результат Perception (кэшированная позиция цели)
    SingleTarget,
    /// Ближайший из живых Player / Pickup через TagLookup (ничья → Player)
    #[default]
    ClosestOfMany,
}

/// Что делать в Chase, когда Perception потерял цель
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum LostTargetPolicy {
    /// Бежать к последней известной позиции, disengage по прибытии
    #[default]
    ContinueToLastKnown,
    /// Сразу назад в Patrol
    RevertToPatrol,
}

/// Полная конфигурация guard агента
#[derive(Debug, Clone, PartialEq, Default, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub perception: PerceptionConfig,
    pub timing: TimingConfig,
    pub strategy: TargetStrategy,
    pub lost_target: LostTargetPolicy,
    pub waypoints: Vec<Vec3>,
}

impl BehaviorConfig {
    pub fn with_waypoints(waypoints: Vec<Vec3>) -> Self {
        Self {
            waypoints,
            ..Default::default()
        }
    }

    /// Парсинг + валидация JSON конфига.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Проверяет все ограничения конфигурации (вызывается до первого тика).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waypoints.is_empty() {
            return Err(ConfigError::EmptyWaypoints);
        }

        let perception = &self.perception;
        if !(perception.view_radius > 0.0) {
            return Err(ConfigError::NonPositiveViewRadius(perception.view_radius));
        }
        if !(perception.view_angle_degrees > 0.0 && perception.view_angle_degrees <= 360.0) {
            return Err(ConfigError::ViewAngleOutOfRange(perception.view_angle_degrees));
        }

        let timing = &self.timing;
        for (what, value) in [("walk_speed", timing.walk_speed), ("run_speed", timing.run_speed)] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveSpeed { what, value });
            }
        }
        for (what, value) in [
            ("wait_duration", timing.wait_duration),
            ("rotate_duration", timing.rotate_duration),
            ("arrival_threshold", timing.arrival_threshold),
            ("disengage_distance", timing.disengage_distance),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeValue { what, value });
            }
        }

        Ok(())
    }
}
