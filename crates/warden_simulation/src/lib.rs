//! WARDEN Simulation Core
//!
//! Guard AI на Bevy 0.16: perception (FOV + line-of-sight) + patrol/chase FSM.
//!
//! Слои:
//! - core (`ai::controller`, `ai::perception`) — чистая логика, elapsed time параметром
//! - ECS (`ai::systems`) — snapshot мира, NavAgent локомоция, события переходов
//! - host (engine binding / headless main) — path following, рендер, ввод

use std::time::Duration;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod error;
pub mod logger;

// Re-export базовых типов для удобства
pub use ai::{
    AgentPose, BehaviorConfig, BehaviorController, BehaviorMode, BehaviorModeChanged, BehaviorPlugin,
    BehaviorSet, CatchRequest, NavAgent, Occluder, ResetRequest, Targetable, TargetKind,
};
pub use error::{ConfigError, SetupError, WardenResult};
pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins(BehaviorPlugin);

        // Детерминистичный RNG (seed по умолчанию), если host не задал свой
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Прогнать один FixedUpdate тик с явным elapsed time.
///
/// Не зависит от wall clock: headless прогоны и тесты детерминированы.
pub fn step_fixed(app: &mut App, delta: f32) {
    app.world_mut()
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(delta.max(0.0)));
    app.world_mut().run_schedule(FixedUpdate);

    // First (и event_update_system) без app.update() не крутится — буферы событий свопаем сами
    let world = app.world_mut();
    update_events::<BehaviorModeChanged>(world);
    update_events::<CatchRequest>(world);
    update_events::<ResetRequest>(world);
}

/// Double-buffer swap: событие живёт два шага, потом отбрасывается
fn update_events<E: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.update();
    }
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
