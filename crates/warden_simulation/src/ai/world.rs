//! World collaborators — spatial query и tag lookup.
//!
//! Core не ходит в scene graph напрямую: host (ECS, тесты) реализует
//! эти traits, core только спрашивает.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Вид цели, за которой может погнаться агент.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum TargetKind {
    /// Основная цель преследования
    Player,
    /// Вторичный interactable (брошенный предмет)
    Pickup,
}

impl TargetKind {
    pub const ALL: [TargetKind; 2] = [TargetKind::Player, TargetKind::Pickup];

    /// Scene tag для lookup
    pub const fn tag(&self) -> &'static str {
        match self {
            TargetKind::Player => "Player",
            TargetKind::Pickup => "canPickUp",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

/// Кандидат из spatial query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub position: Vec3,
    pub kind: TargetKind,
}

/// Spatial query collaborator (overlap sphere + raycast против obstacles).
pub trait SpatialQuery {
    /// Все кандидаты указанных видов в радиусе `radius` от `origin`.
    /// Порядок — порядок перечисления collaborator'а (perception его не пересортировывает).
    fn candidates_within_radius(&self, origin: Vec3, radius: f32, kinds: &[TargetKind]) -> Vec<Candidate>;

    /// true если obstacle geometry пересекает отрезок `origin → target` в пределах `max_distance`.
    fn is_occluded(&self, origin: Vec3, target: Vec3, max_distance: f32) -> bool;
}

/// World/tag lookup collaborator.
///
/// `None` = entity с таким tag сейчас нет в мире. Это не ошибка:
/// на этом тике просто нет кандидата, следующий тик спросит снова.
pub trait TagLookup {
    fn find_first_with_tag(&self, kind: TargetKind) -> Option<Vec3>;
}

/// Axis-aligned box occluder
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct ObstacleBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl ObstacleBox {
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Slab test: пересекает ли отрезок `origin → origin + dir * max_distance` этот box.
    pub fn intersects_segment(&self, origin: Vec3, target: Vec3, max_distance: f32) -> bool {
        let delta = target - origin;
        let length = delta.length();
        if length <= f32::EPSILON {
            return self.contains(origin);
        }
        let dir = delta / length;
        let limit = length.min(max_distance.max(0.0));

        let mut t_min = 0.0_f32;
        let mut t_max = limit;

        for axis in 0..3 {
            let o = origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() <= f32::EPSILON {
                // Луч параллелен slab'у: либо внутри, либо мимо
                if o < lo || o > hi {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }

        true
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Фиксированный мир: список кандидатов + obstacles.
///
/// Используется headless сценариями и тестами вместо живого scene graph.
#[derive(Debug, Clone, Default)]
pub struct StaticWorld {
    pub targets: Vec<Candidate>,
    pub obstacles: Vec<ObstacleBox>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, kind: TargetKind, position: Vec3) -> Self {
        self.targets.push(Candidate { position, kind });
        self
    }

    pub fn with_obstacle(mut self, obstacle: ObstacleBox) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Переместить первую цель указанного вида
    pub fn move_target(&mut self, kind: TargetKind, position: Vec3) {
        if let Some(target) = self.targets.iter_mut().find(|t| t.kind == kind) {
            target.position = position;
        }
    }

    pub fn remove_targets(&mut self, kind: TargetKind) {
        self.targets.retain(|t| t.kind != kind);
    }
}

impl SpatialQuery for StaticWorld {
    fn candidates_within_radius(&self, origin: Vec3, radius: f32, kinds: &[TargetKind]) -> Vec<Candidate> {
        self.targets
            .iter()
            .filter(|t| kinds.contains(&t.kind) && t.position.distance(origin) <= radius)
            .copied()
            .collect()
    }

    fn is_occluded(&self, origin: Vec3, target: Vec3, max_distance: f32) -> bool {
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.intersects_segment(origin, target, max_distance))
    }
}

impl TagLookup for StaticWorld {
    fn find_first_with_tag(&self, kind: TargetKind) -> Option<Vec3> {
        self.targets.iter().find(|t| t.kind == kind).map(|t| t.position)
    }
}
