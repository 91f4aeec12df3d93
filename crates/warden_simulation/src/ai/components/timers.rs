//! Countdown таймеры для гистерезиса FSM (wait-at-point, rotate-before-look).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Обратный отсчёт в секундах.
///
/// `remaining` может уйти в минус на последнем тике — FSM сравнивает `<= 0`,
/// так что перелёт не важен. `reset()` возвращает к `duration`.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct Countdown {
    pub remaining: f32,
    pub duration: f32,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
            duration,
        }
    }

    /// Вычитает elapsed time. Отрицательный delta игнорируется (host обязан давать монотонное время).
    pub fn tick(&mut self, delta: f32) {
        self.remaining -= delta.max(0.0);
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn is_running(&self) -> bool {
        !self.is_finished()
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(0.0)
    }
}
