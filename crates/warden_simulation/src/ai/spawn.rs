//! Spawn helpers для guard агентов.

use bevy::prelude::*;

use super::components::BehaviorConfig;
use super::controller::BehaviorController;
use super::systems::NavAgent;
use crate::error::{SetupError, WardenResult};

/// Полный набор компонентов guard'а: controller + локомоция
#[derive(Bundle)]
pub struct GuardBundle {
    pub transform: Transform,
    pub controller: BehaviorController,
    pub nav: NavAgent,
}

impl GuardBundle {
    pub fn new(name: impl Into<String>, config: BehaviorConfig, transform: Transform) -> WardenResult<Self> {
        let controller = BehaviorController::new(name, config).map_err(|err| {
            crate::log_error(&format!("❌ guard setup failed: {}", err));
            SetupError::from(err)
        })?;

        Ok(Self {
            transform,
            controller,
            nav: NavAgent::default(),
        })
    }
}

/// Spawn guard'а. Невалидный конфиг → ошибка, entity не создаётся.
pub fn spawn_guard(
    commands: &mut Commands,
    name: impl Into<String>,
    config: BehaviorConfig,
    transform: Transform,
) -> WardenResult<Entity> {
    let bundle = GuardBundle::new(name, config, transform)?;
    let entity = commands.spawn(bundle).id();
    crate::log_info(&format!("🛡️ guard spawned: {:?}", entity));
    Ok(entity)
}
