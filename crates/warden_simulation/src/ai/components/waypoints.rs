//! Waypoint cycle — упорядоченный замкнутый маршрут патруля.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Непустой список patrol точек + текущий индекс.
///
/// Инвариант: `index < points.len()`. Точки неизменяемы после конструирования,
/// двигается только индекс (через `next_point`).
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct WaypointCycle {
    points: Vec<Vec3>,
    index: usize,
}

impl WaypointCycle {
    pub fn new(points: Vec<Vec3>) -> Result<Self, ConfigError> {
        if points.is_empty() {
            return Err(ConfigError::EmptyWaypoints);
        }
        Ok(Self { points, index: 0 })
    }

    pub fn current(&self) -> Vec3 {
        self.points[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Всегда false: пустой cycle не конструируется.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// `(index + 1) mod len`, возвращает новую текущую точку.
    pub fn next_point(&mut self) -> Vec3 {
        self.index = (self.index + 1) % self.points.len();
        self.current()
    }
}
