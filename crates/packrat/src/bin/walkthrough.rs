//! # Walkthrough
//!
//! Drives the store end to end: compose entities from the demonstration
//! kinds, show that removal is deferred until sync, poke the sentinel
//! fallback hazard, then run the tick loop until the poison wins.
//!
//! Run with: `cargo run --bin walkthrough [scenario.toml]`
//!
//! Set `RUST_LOG=debug` to see storage reservation and teardown events.

use std::env;
use std::path::Path;
use std::process;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use packrat::components::{
    component_registry, Description, Health, Inventory, Item, Physics, ShortDescription,
    Transform,
};
use packrat::scenario::{Scenario, ScenarioError};
use packrat::systems::{HealthSystem, MovementSystem};
use packrat::Shorthand;
use packrat_core::{Component, World};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), ScenarioError> {
    let scenario = match env::args().nth(1) {
        Some(path) => Scenario::load(Path::new(&path))?,
        None => Scenario::default(),
    };
    let mut rng = StdRng::seed_from_u64(scenario.seed);

    let mut world = World::with_capacity(component_registry(), scenario.capacity);
    world.add_system(Box::new(HealthSystem::new(scenario.poison_drain_per_second)));
    world.add_system(Box::new(MovementSystem));

    // A poisoned robot, composed one component at a time.
    let robot = world.create();
    let eyes = rng.gen_range(2..=9);
    world.attach(robot, Transform::new(4.0, 5.0));
    world.attach(robot, Health::new(99.0, true));
    world.attach(robot, Physics::new(0.5, 0.0));
    world.attach(robot, ShortDescription::new(&format!("Bob-{eyes}")));
    world.attach(
        robot,
        Description::new(&format!("An angry robot with {eyes} eyes.")),
    );
    world.attach_to_systems(robot);

    println!("entity creation");
    print!("{}", world.describe(robot));

    println!("\ncomponent removal waits for sync");
    world.detach::<Description>(robot);
    println!("before sync:");
    print!("{}", world.describe(robot));
    print!("{}", world.debug_report());
    world.sync();
    println!("after sync:");
    print!("{}", world.describe(robot));
    print!("{}", world.debug_report());

    println!("\nentity removal waits for sync");
    world.remove(robot);
    print!("{}", world.debug_report());
    world.sync();
    print!("{}", world.debug_report());

    // The stale identifier now degrades to the sentinel entity.
    print!("{}", world.describe(robot));

    // A write through the fallback accessor lands on the sentinel
    // instance — gate on has_component before trusting either direction.
    world.component_mut::<Transform>(robot).x = 0.0;

    println!("\nseeding {} treasure chests", scenario.chest_count);
    let inscriptions = ["Don't open this!", "Treasure inside!", "You stink!"];
    for i in 0..scenario.chest_count {
        let chest = world.create();
        world.attach(chest, Transform::new(-4.5 + i as f32, 0.8));
        world.attach(
            chest,
            Inventory::new(&[
                (Item::Sword, 1),
                (Item::Potion, 4),
                (Item::Potion, 3),
                (Item::Arrow, 64),
            ]),
        );
        let line = inscriptions[rng.gen_range(0..inscriptions.len())];
        world.attach(
            chest,
            Description::new(&format!(
                "An ornate treasure chest with an inscription that reads \"{line}\"."
            )),
        );
        world.attach_to_systems(chest);
    }

    // A poisoned wanderer for the tick loop to drain.
    let wanderer = world.create();
    world.attach(wanderer, Transform::new(0.0, 0.0));
    world.attach(wanderer, Physics::new(1.0, 0.5));
    world.attach(wanderer, Health::new(0.5, true));
    world.attach_to_systems(wanderer);
    world.sync();

    println!("\nall live entities");
    for entity in world.entities() {
        print!("{}", world.describe(entity.id()));
    }

    println!(
        "\nticking {} times at {}s per tick",
        scenario.ticks, scenario.tick_seconds
    );
    for _ in 0..scenario.ticks {
        world.update(scenario.tick_seconds);
        world.sync();
    }

    println!("\nafter the tick loop");
    for entity in world.entities() {
        if entity.has_kind(Health::KIND) {
            println!("{}", world.health(entity.id()).describe());
        }
    }
    println!(
        "wanderer {} the poison",
        if world.has(wanderer) { "survived" } else { "did not survive" }
    );
    print!("{}", world.debug_report());

    Ok(())
}
