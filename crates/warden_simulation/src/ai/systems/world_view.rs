//! ECS реализация spatial query / tag lookup.
//!
//! Цели (`Targetable`) и препятствия (`Occluder`) собираются в `StaticWorld`
//! один раз за тик, все агенты спрашивают один и тот же snapshot.

use bevy::prelude::*;

use crate::ai::world::{Candidate, ObstacleBox, StaticWorld, TargetKind};

/// Entity, за которой может погнаться guard
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Targetable {
    pub kind: TargetKind,
}

impl Targetable {
    pub fn player() -> Self {
        Self { kind: TargetKind::Player }
    }

    pub fn pickup() -> Self {
        Self { kind: TargetKind::Pickup }
    }
}

/// Axis-aligned препятствие для line-of-sight (центр = Transform.translation)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Occluder {
    pub half_extents: Vec3,
}

impl Occluder {
    pub fn new(half_extents: Vec3) -> Self {
        Self { half_extents }
    }
}

/// Snapshot мира для одного тика (порядок целей = порядок query).
pub fn snapshot_world(
    targets: &Query<(&Transform, &Targetable)>,
    occluders: &Query<(&Transform, &Occluder)>,
) -> StaticWorld {
    StaticWorld {
        targets: targets
            .iter()
            .map(|(transform, targetable)| Candidate {
                position: transform.translation,
                kind: targetable.kind,
            })
            .collect(),
        obstacles: occluders
            .iter()
            .map(|(transform, occluder)| {
                ObstacleBox::from_center_half_extents(transform.translation, occluder.half_extents)
            })
            .collect(),
    }
}
