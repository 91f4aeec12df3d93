//! Perception — field-of-view + line-of-sight запрос.
//!
//! Чистая функция: ничего не мутирует, state обновляет вызывающий (FSM).
//!
//! Алгоритм:
//! 1. Кандидаты в `view_radius` от spatial query collaborator'а
//! 2. Угол между forward и направлением на кандидата `< view_angle / 2`
//! 3. Если occlusion включен — отрезок до кандидата не пересекает obstacles
//! 4. Из выживших — ближайший (ничья → первый в порядке перечисления)

use bevy::prelude::*;

use super::components::PerceptionConfig;
use super::world::{SpatialQuery, TargetKind};

/// Допуск на f32 округление: цель ровно на краю конуса не видна
const CONE_EDGE_EPSILON: f32 = 1e-5;

/// Результат perception на один тик
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerceptionResult {
    pub detected: bool,
    pub target_position: Option<Vec3>,
    pub target_kind: Option<TargetKind>,
}

impl PerceptionResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn seen(position: Vec3, kind: TargetKind) -> Self {
        Self {
            detected: true,
            target_position: Some(position),
            target_kind: Some(kind),
        }
    }

    pub fn target(&self) -> Option<(Vec3, TargetKind)> {
        self.target_position.zip(self.target_kind)
    }
}

/// Находит ближайшую видимую цель.
///
/// `forward` нормализуется; нулевой forward трактуется как -Z (Bevy forward).
pub fn perceive(
    config: &PerceptionConfig,
    origin: Vec3,
    forward: Vec3,
    world: &dyn SpatialQuery,
) -> PerceptionResult {
    if config.view_radius <= 0.0 {
        return PerceptionResult::none();
    }

    let forward = forward.try_normalize().unwrap_or(Vec3::NEG_Z);
    // angle >= half ⇔ cos(angle) <= cos(half); сравниваем косинусы, граница конуса не проходит
    let min_cos = (config.view_angle_degrees * 0.5).to_radians().cos();
    let angular_filter = config.view_angle_degrees < 360.0;

    let mut best: Option<(f32, Vec3, TargetKind)> = None;

    for candidate in world.candidates_within_radius(origin, config.view_radius, &TargetKind::ALL) {
        let to_target = candidate.position - origin;
        let distance = to_target.length();

        // Collaborator обещает радиус, но граница проверяется здесь же
        if distance > config.view_radius {
            continue;
        }

        if angular_filter {
            // Кандидат в точке агента — направление не определено, считаем "прямо перед"
            if let Some(direction) = to_target.try_normalize() {
                if forward.dot(direction) <= min_cos + CONE_EDGE_EPSILON {
                    continue;
                }
            }
        }

        if config.occlusion_enabled && world.is_occluded(origin, candidate.position, distance) {
            continue;
        }

        // Строгое `<`: при равной дистанции остаётся первый
        if best.map_or(true, |(best_distance, _, _)| distance < best_distance) {
            best = Some((distance, candidate.position, candidate.kind));
        }
    }

    match best {
        Some((_, position, kind)) => PerceptionResult::seen(position, kind),
        None => PerceptionResult::none(),
    }
}
