use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use vanguard::components::{Team, Unit, UnitName, UnitOrder};
use vanguard::game_logic::spawning::formation_position;
use vanguard::pathfinding::NavGrid;
use vanguard::plugins::ai::AiPlugin;
use vanguard::plugins::combat::CombatPlugin;
use vanguard::plugins::commands::{CommandPlugin, UnitCommand};
use vanguard::plugins::locomotion::LocomotionPlugin;
use vanguard::plugins::spawning::spawn_tank;
use vanguard::resources::{GameConfig, SpawnCounter};

/// Headless skirmish runner: two teams attack-move toward each other across
/// a walled battlefield.
#[derive(Parser)]
#[command(name = "vanguard", about = "Headless tank skirmish simulation")]
struct Args {
    /// Decision ticks to simulate (60 per second)
    #[arg(long, default_value_t = 3600)]
    ticks: u32,

    /// Seed for spawn placement jitter
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Units on the red team
    #[arg(long, default_value_t = 4)]
    red: u32,

    /// Units on the blue team
    #[arg(long, default_value_t = 4)]
    blue: u32,
}

#[derive(Resource)]
struct Scenario {
    seed: u64,
    red: u32,
    blue: u32,
}

fn main() {
    let args = Args::parse();
    let config = vanguard::config::load_config();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(TransformPlugin)
        // Fixed-length ticks make runs reproducible for a given seed
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .insert_resource(config)
        .insert_resource(SpawnCounter::default())
        .insert_resource(battlefield())
        .insert_resource(Scenario {
            seed: args.seed,
            red: args.red,
            blue: args.blue,
        })
        .add_plugins((CommandPlugin, AiPlugin, LocomotionPlugin, CombatPlugin))
        .add_systems(Startup, setup_skirmish);

    for _ in 0..args.ticks {
        app.update();
    }

    report(&mut app);
}

/// Flat 192x192 battlefield with a center wall split by a gap, so advances
/// have to path around or through the middle.
fn battlefield() -> NavGrid {
    let mut grid = NavGrid::flat(96, 96, 2.0);
    grid.block_rect(Vec3::new(-40.0, 0.0, -2.0), Vec3::new(-8.0, 0.0, 2.0));
    grid.block_rect(Vec3::new(8.0, 0.0, -2.0), Vec3::new(40.0, 0.0, 2.0));
    grid
}

fn setup_skirmish(
    mut commands: Commands,
    config: Res<GameConfig>,
    scenario: Res<Scenario>,
    mut counter: ResMut<SpawnCounter>,
    mut orders: EventWriter<UnitCommand>,
) {
    let mut rng = StdRng::seed_from_u64(scenario.seed);
    let mut jitter = |rng: &mut StdRng| {
        Vec3::new(rng.gen_range(-1.5..1.5), 0.0, rng.gen_range(-1.5..1.5))
    };

    let red_anchor = Vec3::new(0.0, 0.0, 60.0);
    let blue_anchor = Vec3::new(0.0, 0.0, -60.0);

    for slot in 0..scenario.red {
        let position = formation_position(red_anchor, slot, 6.0) + jitter(&mut rng);
        let unit = spawn_tank(&mut commands, &config.settings, &mut counter, Team::Red, position);
        orders.write(UnitCommand {
            unit,
            order: UnitOrder::AttackMove {
                location: blue_anchor,
            },
        });
    }

    for slot in 0..scenario.blue {
        let position = formation_position(blue_anchor, slot, 6.0) + jitter(&mut rng);
        let unit = spawn_tank(&mut commands, &config.settings, &mut counter, Team::Blue, position);
        orders.write(UnitCommand {
            unit,
            order: UnitOrder::AttackMove {
                location: red_anchor,
            },
        });
    }

    info!(
        "Skirmish: {} red vs {} blue, seed {}",
        scenario.red, scenario.blue, scenario.seed
    );
}

fn report(app: &mut App) {
    let world = app.world_mut();
    let mut survivors = world.query::<(&UnitName, &Unit, &Transform)>();

    println!("--- survivors ---");
    let mut any = false;
    for (name, unit, transform) in survivors.iter(world) {
        any = true;
        println!(
            "{:<16} {:>8}  at ({:>6.1}, {:>6.1})",
            name.0, unit.health, transform.translation.x, transform.translation.z
        );
    }
    if !any {
        println!("mutual annihilation");
    }
}
