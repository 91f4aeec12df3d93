//! Headless симуляция WARDEN
//!
//! Один guard патрулирует квадрат из 4 точек, игрок бродит случайно (seeded RNG).
//! Опционально: `warden_simulation <config.json>` — конфиг guard'а из файла.

use bevy::prelude::*;
use rand::Rng;
use warden_simulation::ai::spawn_guard;
use warden_simulation::{
    create_headless_app, log_error, log_info, step_fixed, BehaviorConfig, BehaviorMode,
    BehaviorModeChanged, CatchRequest, DeterministicRng, Occluder, SimulationPlugin, Targetable,
    WardenResult,
};

const TICKS: usize = 3600;
const TICK_DELTA: f32 = 1.0 / 60.0;
const PLAYER_SPEED: f32 = 4.0;
const CATCH_DISTANCE: f32 = 1.0;

/// Случайное блуждание игрока
#[derive(Component)]
struct Wander {
    heading: Vec3,
    turn_timer: f32,
}

fn wander_player(
    mut players: Query<(&mut Transform, &mut Wander)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut wander) in players.iter_mut() {
        wander.turn_timer -= delta;
        if wander.turn_timer <= 0.0 {
            let angle = rng.rng.gen::<f32>() * std::f32::consts::TAU;
            wander.heading = Vec3::new(angle.cos(), 0.0, angle.sin());
            wander.turn_timer = 1.0 + rng.rng.gen::<f32>() * 3.0;
        }

        transform.translation += wander.heading * PLAYER_SPEED * delta;
        // Держим игрока в пределах арены 40x40
        transform.translation = transform.translation.clamp(Vec3::splat(-20.0), Vec3::splat(20.0));
    }
}

/// Host логика: guard в Chase подошёл вплотную → CatchRequest
fn detect_catches(
    guards: Query<(Entity, &Transform, &warden_simulation::BehaviorController)>,
    players: Query<&Transform, With<Targetable>>,
    mut catches: EventWriter<CatchRequest>,
) {
    for (guard, guard_transform, controller) in guards.iter() {
        if controller.mode() != BehaviorMode::Chase {
            continue;
        }
        let caught = players
            .iter()
            .any(|player| player.translation.distance(guard_transform.translation) <= CATCH_DISTANCE);
        if caught {
            catches.write(CatchRequest { agent: guard });
        }
    }
}

fn log_transitions(mut events: EventReader<BehaviorModeChanged>) {
    for event in events.read() {
        log_info(&format!(
            "{:?}: {} → {}",
            event.agent,
            event.from.as_str(),
            event.to.as_str()
        ));
    }
}

/// Конфиг из файла или дефолтный квадратный патруль
fn load_config(path: Option<&str>) -> WardenResult<BehaviorConfig> {
    let config = match path {
        Some(path) => BehaviorConfig::from_json_file(path)?,
        None => BehaviorConfig::with_waypoints(vec![
            Vec3::new(-10.0, 0.0, -10.0),
            Vec3::new(10.0, 0.0, -10.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(-10.0, 0.0, 10.0),
        ]),
    };
    Ok(config)
}

fn spawn_scene(world: &mut World, config: BehaviorConfig) -> WardenResult<Entity> {
    let guard = spawn_guard(
        &mut world.commands(),
        "guard-1",
        config,
        Transform::from_xyz(-10.0, 0.0, 10.0),
    )?;

    // Стена посреди арены — прячет игрока от guard'а
    world.spawn((Transform::from_xyz(0.0, 0.0, 0.0), Occluder::new(Vec3::new(4.0, 2.0, 0.5))));

    world.spawn((
        Transform::from_xyz(5.0, 0.0, -12.0),
        Targetable::player(),
        Wander {
            heading: Vec3::X,
            turn_timer: 0.0,
        },
    ));

    world.flush();
    Ok(guard)
}

fn main() {
    let seed = 42;
    println!("Starting WARDEN headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin).add_systems(
        FixedUpdate,
        (
            wander_player.before(warden_simulation::BehaviorSet),
            (detect_catches, log_transitions).after(warden_simulation::BehaviorSet),
        ),
    );

    let config_path = std::env::args().nth(1);
    let setup = load_config(config_path.as_deref()).and_then(|config| spawn_scene(app.world_mut(), config));
    if let Err(err) = setup {
        log_error(&format!("guard setup failed: {}", err));
        std::process::exit(1);
    }

    for tick in 0..TICKS {
        step_fixed(&mut app, TICK_DELTA);

        if tick % 600 == 0 {
            let mut guards = app
                .world_mut()
                .query::<(&Transform, &warden_simulation::BehaviorController)>();
            for (transform, controller) in guards.iter(app.world()) {
                println!(
                    "Tick {}: guard at {:?}, mode {}",
                    tick,
                    transform.translation,
                    controller.mode().as_str()
                );
            }
        }
    }

    println!("Simulation complete!");
}
