//! Scene setup and the per-frame schedule.
//!
//! [`load_scene`] reads the terrain and flower layout named by the
//! configuration, [`setup_world`] inserts every simulation resource and
//! observer, and [`build_schedule`] chains the systems in their fixed tick
//! order. The host calls [`run_frame`] once per rendered frame.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{info, warn};

use crate::components::flower::FlowerInstance;
use crate::components::model::{AvatarModel, FlowerModel};
use crate::components::sway::WindSway;
use crate::error::Result;
use crate::events::assets::AssetMessage;
use crate::events::gamestate::{GameStateChangedEvent, observe_gamestate_change_event};
use crate::events::garden::{observe_garden_completed, observe_species_completed, observe_watering};
use crate::resources::assets::{AssetBridge, ModelHandle};
use crate::resources::camera::CameraRig;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::highlight::HighlightSets;
use crate::resources::input::InputState;
use crate::resources::layout::{FlowerLayout, FlowerSeed};
use crate::resources::player::PlayerAvatar;
use crate::resources::score::{SpeciesLabels, SpeciesProgress, WateringScore};
use crate::resources::spatial::SpatialResolver;
use crate::resources::terrain::TerrainDescription;
use crate::resources::worldtime::WorldTime;
use crate::systems::assets::{poll_asset_messages, spawn_loaded_models};
use crate::systems::autopilot::{autopilot_enabled, autopilot_input};
use crate::systems::camera::update_camera;
use crate::systems::flowers::{
    advance_flower_growth, apply_wind_sway, check_species_completion, update_highlight_sets,
};
use crate::systems::gamestate::{check_pending_state, finish_setup, state_is_playing};
use crate::systems::input::{clear_frame_input, player_input_system, update_input_state};
use crate::systems::models::{sync_avatar_model, sync_flower_models};
use crate::systems::player::{move_player, tick_player};
use crate::systems::time::update_world_time;

/// Where the avatar starts, before clamping and ground snapping.
pub const PLAYER_START: Vec3 = Vec3::ZERO;

/// Terrain and planted flowers, ready to go into a world.
#[derive(Debug)]
pub struct Scene {
    pub resolver: SpatialResolver,
    pub seeds: Vec<FlowerSeed>,
}

/// Load the terrain and plant the layout.
///
/// A missing or broken layout file falls back to the built-in layout; the
/// terrain has no such fallback.
pub fn load_scene(config: &GameConfig) -> Result<Scene> {
    let terrain = TerrainDescription::load_from_file(config.terrain_file())?;
    let resolver = terrain.build_resolver()?;

    let layout = match FlowerLayout::load_from_file(config.layout_file()) {
        Ok(layout) => layout,
        Err(err) => {
            warn!("{}; using the built-in flower layout", err);
            FlowerLayout::default()
        }
    };
    let seeds = layout.plant(&resolver, config.seed);

    Ok(Scene { resolver, seeds })
}

/// Insert the simulation resources and observers, then request `Setup`.
///
/// Flowers are not spawned here: they arrive through the asset messages (or
/// [`spawn_flower`]) as their models load.
pub fn setup_world(world: &mut World, config: &GameConfig, scene: Scene) {
    let Scene { resolver, seeds } = scene;

    let mut player = PlayerAvatar::new(PLAYER_START, config.player);
    player.place(&resolver);
    info!(
        "Player placed at ({:.1}, {:.1}, {:.1})",
        player.position.x, player.position.y, player.position.z
    );

    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(config.growth);
    world.insert_resource(config.wind);
    world.insert_resource(CameraRig::new(player.position, config.camera));
    world.insert_resource(player);
    world.insert_resource(resolver);
    world.insert_resource(InputState::default());
    world.insert_resource(WateringScore::default());
    world.insert_resource(SpeciesProgress::new(
        seeds.iter().map(|s| s.kind),
        config.completion_delay,
    ));
    world.insert_resource(SpeciesLabels::default());
    world.insert_resource(HighlightSets::default());
    world.insert_resource(Messages::<AssetMessage>::default());
    world.insert_resource(config.clone());

    // Game state
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());

    world.spawn(Observer::new(observe_gamestate_change_event));
    world.spawn(Observer::new(observe_watering));
    world.spawn(Observer::new(observe_species_completed));
    world.spawn(Observer::new(observe_garden_completed));
    world.flush();

    world.resource_mut::<NextGameState>().set(GameStates::Setup);
    world.trigger(GameStateChangedEvent {});
    world.flush();
}

/// The per-frame schedule, chained in tick order.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            poll_asset_messages.run_if(resource_exists::<AssetBridge>),
            spawn_loaded_models,
            autopilot_input.run_if(autopilot_enabled),
            update_input_state,
            player_input_system.run_if(state_is_playing),
            move_player,
            tick_player,
            advance_flower_growth,
            apply_wind_sway,
            check_species_completion,
            update_highlight_sets,
            update_camera,
            (sync_flower_models, sync_avatar_model),
            finish_setup,
            check_pending_state,
            clear_frame_input,
        )
            .chain(),
    );
    update
}

/// Advance time by `dt` seconds and run one tick.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    update_world_time(world, dt);
    schedule.run(world);
    world.clear_trackers();
}

/// Spawn a flower directly, as if its model had just loaded.
pub fn spawn_flower(world: &mut World, seed: &FlowerSeed, model: Box<dyn ModelHandle>) -> Entity {
    let entity = world
        .spawn((
            FlowerInstance::new(seed.id, seed.kind, seed.ground, seed.rotation_y, seed.phase),
            WindSway::default(),
            FlowerModel(model),
        ))
        .id();
    if let Some(mut score) = world.get_resource_mut::<WateringScore>() {
        score.total += 1;
    }
    entity
}

/// Install the avatar model directly, as if it had just loaded.
pub fn install_avatar(world: &mut World, model: Box<dyn ModelHandle>) {
    world.insert_resource(AvatarModel(model));
}
