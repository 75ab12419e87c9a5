//! Gardenkeeper headless runner.
//!
//! Runs the garden simulation without a window:
//! - **bevy_ecs** for the entity-component-system core
//! - a background asset thread handing out [`HeadlessModel`]s
//! - an autopilot input adapter standing in for the player
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults if missing), the terrain and the flower layout
//! 2. Insert resources and observers, start the asset thread
//! 3. Run the fixed-order schedule once per frame with a fixed `dt`
//! 4. Stop when the garden completes or the frame limit is reached
//! 5. Shut down the asset thread
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 20000
//! ```
//!
//! [`HeadlessModel`]: gardenkeeper::resources::assets::HeadlessModel

use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use gardenkeeper::game::{build_schedule, load_scene, run_frame, setup_world};
use gardenkeeper::resources::assets::{AssetBridge, HeadlessLoader, setup_assets, shutdown_assets};
use gardenkeeper::resources::gameconfig::GameConfig;
use gardenkeeper::resources::gamestate::{GameState, GameStates};
use gardenkeeper::resources::score::{SpeciesLabels, WateringScore};
use gardenkeeper::systems::assets::request_garden_models;
use gardenkeeper::systems::autopilot::Autopilot;

/// Gardenkeeper
#[derive(Parser)]
#[command(version, about = "Headless garden-watering simulation")]
struct Cli {
    /// Configuration file (default: assets/garden/config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long, default_value_t = 36_000)]
    frames: u32,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Override the placement seed from the configuration.
    #[arg(long)]
    seed: Option<u64>,

    /// Run without the autopilot; nothing will be watered.
    #[arg(long)]
    no_autopilot: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --------------- Configuration ---------------
    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    // --------------- Scene ---------------
    let scene = match load_scene(&config) {
        Ok(scene) => scene,
        Err(e) => {
            error!("Failed to load the garden: {}", e);
            std::process::exit(1);
        }
    };
    let seeds = scene.seeds.clone();

    let mut world = bevy_ecs::world::World::new();
    setup_world(&mut world, &config, scene);
    if let Err(e) = setup_assets(&mut world, HeadlessLoader) {
        error!("{}", e);
        std::process::exit(1);
    }
    request_garden_models(world.resource::<AssetBridge>(), &seeds);
    if !cli.no_autopilot {
        world.insert_resource(Autopilot::default());
    }

    let mut update = build_schedule();

    // --------------- Main loop ---------------
    let mut frames = 0;
    while frames < cli.frames {
        run_frame(&mut world, &mut update, cli.dt);
        frames += 1;
        if *world.resource::<GameState>().get() == GameStates::Completed {
            break;
        }
    }

    let score = world.resource::<WateringScore>();
    let time = frames as f32 * cli.dt;
    info!(
        "Stopped after {} frames ({:.1}s): watered {}/{} flowers in {} actions",
        frames, time, score.watered, score.total, score.actions
    );
    for label in &world.resource::<SpeciesLabels>().0 {
        info!("  {}", label.text);
    }
    if *world.resource::<GameState>().get() != GameStates::Completed {
        info!("Garden not completed");
    }

    shutdown_assets(&mut world);
}
