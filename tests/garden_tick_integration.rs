//! Full-tick integration tests: a world built by `setup_world`, driven through
//! the chained schedule one frame at a time.

use bevy_ecs::prelude::*;
use glam::Vec3;

use gardenkeeper::components::flower::{FlowerId, FlowerInstance, FlowerKind, FlowerState};
use gardenkeeper::components::model::{AvatarModel, FlowerModel};
use gardenkeeper::game::{Scene, build_schedule, install_avatar, run_frame, setup_world, spawn_flower};
use gardenkeeper::resources::assets::{HeadlessModel, ModelHandle};
use gardenkeeper::resources::camera::{CameraMode, CameraRig, CameraSettings};
use gardenkeeper::resources::gameconfig::GameConfig;
use gardenkeeper::resources::gamestate::{GameState, GameStates};
use gardenkeeper::resources::highlight::HighlightSets;
use gardenkeeper::resources::input::{InputState, Key};
use gardenkeeper::resources::layout::FlowerSeed;
use gardenkeeper::resources::player::{AnimationClip, AnimationMode, PlayerAvatar};
use gardenkeeper::resources::score::{SpeciesLabels, WateringScore};
use gardenkeeper::resources::spatial::{Aabb, Bounds, GroundMesh, Obstacle, SpatialResolver, Triangle};
use gardenkeeper::resources::worldtime::WorldTime;

const EPSILON: f32 = 1e-4;
const DT: f32 = 0.5;

fn approx_v3(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn flat_resolver(obstacles: Vec<Obstacle>) -> SpatialResolver {
    let a = Vec3::new(-50.0, 0.0, -50.0);
    let b = Vec3::new(50.0, 0.0, -50.0);
    let c = Vec3::new(50.0, 0.0, 50.0);
    let d = Vec3::new(-50.0, 0.0, 50.0);
    SpatialResolver::new(
        Bounds::new(-50.0, 50.0, -50.0, 50.0),
        vec![GroundMesh::new("Ground_Main", vec![Triangle::new(a, b, c), Triangle::new(a, c, d)])],
        obstacles,
    )
}

fn seed(id: u32, kind: FlowerKind, x: f32, z: f32) -> FlowerSeed {
    FlowerSeed {
        id: FlowerId(id),
        kind,
        ground: Vec3::new(x, 0.0, z),
        rotation_y: 0.0,
        phase: 0.0,
    }
}

/// World with every model already loaded, after the first frame has moved
/// it into `Playing`.
fn make_garden(seeds: &[FlowerSeed], obstacles: Vec<Obstacle>) -> (World, Schedule, Vec<Entity>) {
    let mut world = World::new();
    let scene = Scene {
        resolver: flat_resolver(obstacles),
        seeds: seeds.to_vec(),
    };
    setup_world(&mut world, &GameConfig::new(), scene);
    install_avatar(&mut world, Box::new(HeadlessModel::new("avatar")));
    let entities = seeds
        .iter()
        .map(|s| spawn_flower(&mut world, s, Box::new(HeadlessModel::new(s.kind.model_key()))))
        .collect();

    let mut schedule = build_schedule();
    run_frame(&mut world, &mut schedule, DT);
    assert_eq!(*world.resource::<GameState>().get(), GameStates::Playing);
    (world, schedule, entities)
}

fn flower(world: &World, entity: Entity) -> FlowerInstance {
    world.get::<FlowerInstance>(entity).unwrap().clone()
}

fn press_once(world: &mut World, schedule: &mut Schedule, key: Key) {
    world.resource_mut::<InputState>().press(key);
    run_frame(world, schedule, DT);
    world.resource_mut::<InputState>().release(key);
}

#[test]
fn water_key_activates_zone_and_scores() {
    let seeds = [
        seed(0, FlowerKind::Daisy, 3.0, 0.0),
        seed(1, FlowerKind::Daisy, 0.0, -6.0),
        seed(2, FlowerKind::Daisy, 30.0, 0.0),
    ];
    let (mut world, mut schedule, flowers) = make_garden(&seeds, Vec::new());
    assert_eq!(world.resource::<HighlightSets>().eligible, vec![flowers[0], flowers[1]]);

    press_once(&mut world, &mut schedule, Key::Space);

    let states: Vec<FlowerState> = flowers.iter().map(|e| flower(&world, *e).state).collect();
    assert_eq!(
        states,
        vec![FlowerState::Growing, FlowerState::Growing, FlowerState::Dormant]
    );
    let score = world.resource::<WateringScore>();
    assert_eq!((score.watered, score.total, score.actions), (2, 3, 1));
    assert!(world.resource::<HighlightSets>().eligible.is_empty());
    assert_eq!(world.resource::<HighlightSets>().ungrown.len(), 3);

    let player = world.resource::<PlayerAvatar>();
    assert!(player.is_watering);
    assert_eq!(player.mode, AnimationMode::Watering);
    assert_eq!(world.resource::<CameraRig>().mode, CameraMode::ZoomIn);
}

#[test]
fn growth_reaches_exact_end_state_without_overshoot() {
    let (mut world, mut schedule, flowers) =
        make_garden(&[seed(0, FlowerKind::Tulip, 3.0, 0.0)], Vec::new());

    // Activated at elapsed 1.0.
    press_once(&mut world, &mut schedule, Key::Space);
    let rest = flower(&world, flowers[0]);
    assert_eq!(rest.activation_time, Some(1.0));

    // Delay ends at 1.5: still exactly at rest.
    run_frame(&mut world, &mut schedule, DT);
    let f = flower(&world, flowers[0]);
    assert!(approx_v3(f.scale, f.resting_scale));
    assert!(approx_v3(f.position, f.resting_position));

    let mut last_scale = f.scale.y;
    for _ in 0..6 {
        run_frame(&mut world, &mut schedule, DT);
        let f = flower(&world, flowers[0]);
        assert!(f.scale.y >= last_scale);
        assert!(f.scale.y <= f.grown_scale.y);
        last_scale = f.scale.y;
    }

    // 1.0 + 0.5 + 3.0
    assert_eq!(world.resource::<WorldTime>().elapsed, 4.5);
    let f = flower(&world, flowers[0]);
    assert_eq!(f.state, FlowerState::Grown);
    assert_eq!(f.scale, f.grown_scale);
    assert_eq!(f.position, f.grown_position);
    assert_eq!(f.color, f.grown_color);
}

#[test]
fn movement_interrupts_watering() {
    let (mut world, mut schedule, _) =
        make_garden(&[seed(0, FlowerKind::Daisy, 3.0, 0.0)], Vec::new());
    press_once(&mut world, &mut schedule, Key::Space);
    assert!(world.resource::<PlayerAvatar>().is_watering);
    let start = world.resource::<PlayerAvatar>().position;

    world.resource_mut::<InputState>().press(Key::W);
    run_frame(&mut world, &mut schedule, DT);

    let player = world.resource::<PlayerAvatar>();
    assert!(!player.is_watering);
    assert_eq!(player.water_deadline, None);
    assert_eq!(player.mode, AnimationMode::Walking);
    assert!(approx_v3(player.position, start + Vec3::new(0.0, 0.0, -0.2)));
    let avatar = world.resource::<AvatarModel>();
    assert_eq!(avatar.0.clip(), Some(AnimationClip::Walk));
}

#[test]
fn watering_ends_after_its_duration() {
    let (mut world, mut schedule, _) =
        make_garden(&[seed(0, FlowerKind::Daisy, 3.0, 0.0)], Vec::new());
    press_once(&mut world, &mut schedule, Key::Space);
    for _ in 0..4 {
        run_frame(&mut world, &mut schedule, DT);
    }
    let player = world.resource::<PlayerAvatar>();
    assert!(!player.is_watering);
    assert_eq!(player.mode, AnimationMode::Idle);
}

#[test]
fn camera_zoom_round_trip_returns_to_follow() {
    let (mut world, mut schedule, _) =
        make_garden(&[seed(0, FlowerKind::Daisy, 3.0, 0.0)], Vec::new());
    press_once(&mut world, &mut schedule, Key::Space);
    assert_eq!(world.resource::<CameraRig>().mode, CameraMode::ZoomIn);

    // One second in, one second out.
    run_frame(&mut world, &mut schedule, DT);
    run_frame(&mut world, &mut schedule, DT);
    assert_eq!(world.resource::<CameraRig>().mode, CameraMode::ZoomOut);
    let rig = world.resource::<CameraRig>();
    assert!(approx_v3(rig.offset(), CameraSettings::default().zoom_offset));

    run_frame(&mut world, &mut schedule, DT);
    run_frame(&mut world, &mut schedule, DT);
    let rig = world.resource::<CameraRig>();
    assert_eq!(rig.mode, CameraMode::AutoFollow);
    assert!(approx_v3(rig.offset(), CameraSettings::default().follow_offset));
}

#[test]
fn camera_drag_survives_zoom() {
    let (mut world, mut schedule, _) =
        make_garden(&[seed(0, FlowerKind::Daisy, 3.0, 0.0)], Vec::new());
    press_once(&mut world, &mut schedule, Key::Space);
    world.resource_mut::<InputState>().camera_drag_started = true;
    for _ in 0..5 {
        run_frame(&mut world, &mut schedule, DT);
    }
    assert_eq!(world.resource::<CameraRig>().mode, CameraMode::UserControlled);
}

#[test]
fn species_complete_once_then_garden_completes() {
    let seeds = [
        seed(0, FlowerKind::Tulip, 3.0, 0.0),
        seed(1, FlowerKind::Tulip, -3.0, 0.0),
        seed(2, FlowerKind::Cactus, 40.0, 40.0),
    ];
    let (mut world, mut schedule, _) = make_garden(&seeds, Vec::new());

    press_once(&mut world, &mut schedule, Key::Space);
    for _ in 0..8 {
        run_frame(&mut world, &mut schedule, DT);
    }
    let labels = &world.resource::<SpeciesLabels>().0;
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].text, "Tulip: declaration of love");
    assert!(approx_v3(labels[0].position, Vec3::new(0.0, 1.0 + 5.0, 0.0)));
    assert_eq!(*world.resource::<GameState>().get(), GameStates::Playing);

    // Grow-all does not count toward the score.
    press_once(&mut world, &mut schedule, Key::Enter);
    assert_eq!(world.resource::<WateringScore>().watered, 2);
    for _ in 0..8 {
        run_frame(&mut world, &mut schedule, DT);
    }
    assert_eq!(world.resource::<SpeciesLabels>().0.len(), 2);

    // Completion arrives after the delay.
    for _ in 0..4 {
        run_frame(&mut world, &mut schedule, DT);
    }
    assert_eq!(*world.resource::<GameState>().get(), GameStates::Completed);

    for _ in 0..10 {
        run_frame(&mut world, &mut schedule, DT);
    }
    assert_eq!(world.resource::<SpeciesLabels>().0.len(), 2);
}

#[test]
fn completed_garden_ignores_input() {
    let (mut world, mut schedule, _) =
        make_garden(&[seed(0, FlowerKind::Daisy, 3.0, 0.0)], Vec::new());
    press_once(&mut world, &mut schedule, Key::Space);
    for _ in 0..14 {
        run_frame(&mut world, &mut schedule, DT);
    }
    assert_eq!(*world.resource::<GameState>().get(), GameStates::Completed);

    let before = world.resource::<PlayerAvatar>().position;
    world.resource_mut::<InputState>().press(Key::D);
    run_frame(&mut world, &mut schedule, DT);
    world.resource_mut::<InputState>().click(Vec3::new(30.0, 0.0, 30.0));
    run_frame(&mut world, &mut schedule, DT);
    assert_eq!(world.resource::<PlayerAvatar>().position, before);
}

#[test]
fn click_walks_until_blocked() {
    let rock = Obstacle {
        name: "Rock_01".into(),
        aabb: Aabb::from_corners(Vec3::new(10.0, 0.0, -5.0), Vec3::new(12.0, 4.0, 5.0)),
    };
    let (mut world, mut schedule, _) =
        make_garden(&[seed(0, FlowerKind::Daisy, 40.0, 40.0)], vec![rock]);

    world.resource_mut::<InputState>().click(Vec3::new(30.0, 0.0, 0.0));
    // The click becomes the target during the first frame.
    run_frame(&mut world, &mut schedule, DT);
    assert!(world.resource::<PlayerAvatar>().target.is_some());
    let mut frames = 0;
    while world.resource::<PlayerAvatar>().target.is_some() && frames < 500 {
        run_frame(&mut world, &mut schedule, DT);
        frames += 1;
    }
    let player = world.resource::<PlayerAvatar>();
    assert!(player.position.x > 8.0 && player.position.x < 10.0);
    assert_eq!(player.mode, AnimationMode::Idle);
}

#[test]
fn flower_models_follow_state() {
    let (world, _schedule, flowers) =
        make_garden(&[seed(0, FlowerKind::Marigold, 3.0, 0.0)], Vec::new());
    let f = flower(&world, flowers[0]);
    let model = world.get::<FlowerModel>(flowers[0]).unwrap();
    let transform = model.0.transform();
    assert_eq!(transform.position, f.position);
    assert_eq!(transform.scale, f.scale);

    let avatar = world.resource::<AvatarModel>();
    let player = world.resource::<PlayerAvatar>();
    assert_eq!(avatar.0.transform().position, player.position - Vec3::Y);
    assert_eq!(avatar.0.clip(), Some(AnimationClip::Idle));
}
