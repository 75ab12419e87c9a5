//! Scripted input adapter for headless runs.
//!
//! Stands in for a human: water whatever is in the zone, otherwise click the
//! nearest dormant flower and walk there. It only writes [`InputState`], so
//! everything downstream runs exactly as it would for real input.
use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashSet;

use crate::components::flower::FlowerInstance;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::highlight::HighlightSets;
use crate::resources::input::{InputState, Key};
use crate::resources::player::PlayerAvatar;

#[derive(Resource, Debug, Clone, Default)]
pub struct Autopilot {
    /// The water key is down and must be released before the next press.
    water_held: bool,
    /// Last clicked flower and where the player stood when clicking it.
    last_click: Option<(Entity, glam::Vec3)>,
    /// Flowers the player could not reach.
    unreachable: FxHashSet<Entity>,
}

pub fn autopilot_input(
    mut pilot: ResMut<Autopilot>,
    mut input: ResMut<InputState>,
    state: Res<GameState>,
    player: Res<PlayerAvatar>,
    sets: Res<HighlightSets>,
    flowers: Query<(Entity, &FlowerInstance)>,
) {
    if pilot.water_held {
        input.release(Key::Space);
        pilot.water_held = false;
        return;
    }
    if *state.get() != GameStates::Playing || player.is_watering {
        return;
    }
    if !sets.eligible.is_empty() {
        input.press(Key::Space);
        pilot.water_held = true;
        return;
    }
    if player.target.is_some() {
        return;
    }

    // Clicked last time and never moved: that flower is behind an obstacle.
    if let Some((entity, from)) = pilot.last_click.take() {
        if from == player.position {
            debug!("autopilot: {:?} is unreachable, skipping it", entity);
            pilot.unreachable.insert(entity);
        }
    }

    let nearest = flowers
        .iter()
        .filter(|(e, f)| f.is_dormant() && !pilot.unreachable.contains(e))
        .min_by(|(_, a), (_, b)| {
            a.horizontal_distance(player.position)
                .total_cmp(&b.horizontal_distance(player.position))
        });
    if let Some((entity, flower)) = nearest {
        input.click(flower.position);
        pilot.last_click = Some((entity, player.position));
    }
}

pub fn autopilot_enabled(pilot: Option<Res<Autopilot>>) -> bool {
    pilot.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::flower::{FlowerId, FlowerKind};
    use glam::Vec3;

    fn world() -> World {
        let mut world = World::new();
        world.insert_resource(Autopilot::default());
        world.insert_resource(InputState::default());
        world.insert_resource(GameState::new());
        world.insert_resource(PlayerAvatar::default());
        world.insert_resource(HighlightSets::default());
        world.resource_mut::<GameState>().set(GameStates::Playing);
        world
    }

    fn run(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(autopilot_input);
        schedule.run(world);
    }

    #[test]
    fn test_presses_then_releases_water() {
        let mut world = world();
        let e = world.spawn_empty().id();
        world.resource_mut::<HighlightSets>().eligible.push(e);

        run(&mut world);
        assert!(world.resource::<InputState>().held.contains(&Key::Space));
        run(&mut world);
        assert!(!world.resource::<InputState>().held.contains(&Key::Space));
    }

    #[test]
    fn test_clicks_nearest_dormant_flower() {
        let mut world = world();
        let near = Vec3::new(20.0, 0.0, 0.0);
        world.spawn(FlowerInstance::new(FlowerId(0), FlowerKind::Daisy, Vec3::new(50.0, 0.0, 0.0), 0.0, 0.0));
        world.spawn(FlowerInstance::new(FlowerId(1), FlowerKind::Daisy, near, 0.0, 0.0));

        run(&mut world);
        assert_eq!(world.resource::<InputState>().pointer_click, Some(near));
    }

    #[test]
    fn test_idle_outside_playing() {
        let mut world = world();
        world.resource_mut::<GameState>().set(GameStates::Completed);
        world.spawn(FlowerInstance::new(FlowerId(0), FlowerKind::Daisy, Vec3::new(50.0, 0.0, 0.0), 0.0, 0.0));

        run(&mut world);
        assert_eq!(world.resource::<InputState>().pointer_click, None);
    }
}
