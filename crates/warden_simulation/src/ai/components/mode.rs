//! Behavior mode + per-agent mutable state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::timers::Countdown;
use super::config::TimingConfig;
use crate::ai::world::TargetKind;

/// Активный режим агента (ровно один за тик).
///
/// Заменяет набор флагов (player near / in range / is patrol / caught)
/// одним enum'ом — невалидные комбинации невозможны.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum BehaviorMode {
    /// Обход waypoints (начальное состояние)
    #[default]
    Patrol,
    /// Заметили цель: стоим и "поворачиваемся", пока тикает rotate timer
    Alert,
    /// Идём к последней известной позиции цели
    Investigate,
    /// Преследование на run speed
    Chase,
    /// Цель поймана извне (`mark_caught`), стоим до reset
    Caught,
}

impl BehaviorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorMode::Patrol => "Patrol",
            BehaviorMode::Alert => "Alert",
            BehaviorMode::Investigate => "Investigate",
            BehaviorMode::Chase => "Chase",
            BehaviorMode::Caught => "Caught",
        }
    }
}

/// Состояние агента, мутируется только state machine.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct AgentState {
    pub mode: BehaviorMode,
    pub wait_timer: Countdown,
    pub rotate_timer: Countdown,
    /// Куда идти в Investigate
    pub last_known_target_position: Option<Vec3>,
    /// Куда бежать в Chase
    pub current_target_position: Option<Vec3>,
    /// Кого преследуем (для live lookup при disengage)
    pub current_target_kind: Option<TargetKind>,
}

impl AgentState {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            mode: BehaviorMode::Patrol,
            wait_timer: Countdown::new(timing.wait_duration),
            rotate_timer: Countdown::new(timing.rotate_duration),
            last_known_target_position: None,
            current_target_position: None,
            current_target_kind: None,
        }
    }

    pub fn reset_timers(&mut self) {
        self.wait_timer.reset();
        self.rotate_timer.reset();
    }

    pub fn clear_targets(&mut self) {
        self.last_known_target_position = None;
        self.current_target_position = None;
        self.current_target_kind = None;
    }
}
