//! Fluent builder: валидирует конфиг и привязку локомоции до первого тика.

use super::components::{BehaviorConfig, LostTargetPolicy, PerceptionConfig, TargetStrategy, TimingConfig};
use super::controller::{AgentPose, BehaviorController, TickContext, TickReport};
use super::locomotion::Locomotion;
use super::world::{SpatialQuery, TagLookup};
use crate::error::{SetupError, WardenResult};

/// Controller + привязанная локомоция (standalone использование без ECS).
pub struct BehaviorAgent<L: Locomotion> {
    pub controller: BehaviorController,
    pub locomotion: L,
}

impl<L: Locomotion> BehaviorAgent<L> {
    pub fn tick(
        &mut self,
        pose: AgentPose,
        delta: f32,
        spatial: &dyn SpatialQuery,
        tags: &dyn TagLookup,
    ) -> TickReport {
        let mut ctx = TickContext {
            pose,
            delta,
            spatial,
            tags,
            locomotion: &mut self.locomotion,
        };
        self.controller.tick(&mut ctx)
    }
}

/// # Example
///
/// ```rust,ignore
/// let mut agent = BehaviorAgentBuilder::new(config)
///     .name("guard-1")
///     .strategy(TargetStrategy::SingleTarget)
///     .locomotion(nav)
///     .build()?;
/// agent.tick(pose, 1.0 / 60.0, &world, &world);
/// ```
pub struct BehaviorAgentBuilder<L: Locomotion> {
    name: String,
    config: BehaviorConfig,
    locomotion: Option<L>,
}

impl<L: Locomotion> BehaviorAgentBuilder<L> {
    pub fn new(config: BehaviorConfig) -> Self {
        Self {
            name: "agent".to_string(),
            config,
            locomotion: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn perception(mut self, perception: PerceptionConfig) -> Self {
        self.config.perception = perception;
        self
    }

    pub fn timing(mut self, timing: TimingConfig) -> Self {
        self.config.timing = timing;
        self
    }

    pub fn strategy(mut self, strategy: TargetStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn lost_target(mut self, policy: LostTargetPolicy) -> Self {
        self.config.lost_target = policy;
        self
    }

    pub fn locomotion(mut self, locomotion: L) -> Self {
        self.locomotion = Some(locomotion);
        self
    }

    pub fn build(self) -> WardenResult<BehaviorAgent<L>> {
        let controller = BehaviorController::new(self.name, self.config).map_err(|err| {
            crate::log_error(&format!("❌ behavior agent setup failed: {}", err));
            SetupError::from(err)
        })?;

        let Some(locomotion) = self.locomotion else {
            crate::log_error(&format!("❌ {}: locomotion not bound", controller.name()));
            return Err(SetupError::CollaboratorUnavailable("locomotion"));
        };

        Ok(BehaviorAgent {
            controller,
            locomotion,
        })
    }
}
