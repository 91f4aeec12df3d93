//! AI Events — переходы FSM наружу, внешние сигналы внутрь.

use bevy::prelude::*;

use super::components::BehaviorMode;

/// FSM агента сменил режим (пишется tick системой)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct BehaviorModeChanged {
    pub agent: Entity,
    pub from: BehaviorMode,
    pub to: BehaviorMode,
}

/// Host: агент поймал цель → Caught
#[derive(Event, Debug, Clone)]
pub struct CatchRequest {
    pub agent: Entity,
}

/// Host: вернуть агента в Patrol (выход из Caught)
#[derive(Event, Debug, Clone)]
pub struct ResetRequest {
    pub agent: Entity,
}
