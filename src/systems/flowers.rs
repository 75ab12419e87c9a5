//! Flower lifecycle systems.
//!
//! All flower access goes through the [`Garden`] system parameter: proximity
//! queries, activation, per-species completion checks and read-only
//! snapshots. The systems below advance growth, apply wind sway, detect
//! species completion and rebuild the highlight sets once per tick.

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use glam::Vec3;
use log::debug;
use smallvec::SmallVec;

use crate::components::flower::{FlowerInstance, FlowerKind, FlowerState, GrowthTiming};
use crate::components::sway::WindSway;
use crate::events::garden::{GardenCompletedEvent, SpeciesCompletedEvent};
use crate::resources::highlight::HighlightSets;
use crate::resources::player::PlayerAvatar;
use crate::resources::score::SpeciesProgress;
use crate::resources::wind::Wind;
use crate::resources::worldtime::WorldTime;

/// Nearby-flower buffer; a zone rarely holds more than a few dozen.
pub type Nearby = SmallVec<[Entity; 32]>;

/// The flower collection.
#[derive(SystemParam)]
pub struct Garden<'w, 's> {
    flowers: Query<'w, 's, (Entity, &'static mut FlowerInstance)>,
}

impl Garden<'_, '_> {
    /// Dormant flowers within `radius` of `center` on the XZ plane, nearest first.
    pub fn query_nearby(&self, center: Vec3, radius: f32) -> Nearby {
        let mut found: SmallVec<[(f32, Entity); 32]> = self
            .flowers
            .iter()
            .filter(|(_, f)| f.is_dormant())
            .filter_map(|(e, f)| {
                let d = f.horizontal_distance(center);
                (d <= radius).then_some((d, e))
            })
            .collect();
        found.sort_by(|a, b| a.0.total_cmp(&b.0));
        found.into_iter().map(|(_, e)| e).collect()
    }

    /// Start growing one flower. `false` if it is not dormant or does not exist.
    pub fn activate(&mut self, entity: Entity, now: f32) -> bool {
        match self.flowers.get_mut(entity) {
            Ok((_, mut flower)) => flower.activate(now),
            Err(_) => false,
        }
    }

    /// Activate every dormant flower; returns how many started.
    pub fn activate_all(&mut self, now: f32) -> u32 {
        let mut count = 0;
        for (_, mut flower) in self.flowers.iter_mut() {
            if flower.activate(now) {
                count += 1;
            }
        }
        count
    }

    /// At least one flower of `kind` exists and all of them are grown.
    pub fn all_grown_for_kind(&self, kind: FlowerKind) -> bool {
        let mut any = false;
        for (_, f) in self.flowers.iter().filter(|(_, f)| f.kind == kind) {
            if !f.is_grown() {
                return false;
            }
            any = true;
        }
        any
    }

    /// Mean position of every flower of `kind`.
    pub fn species_center(&self, kind: FlowerKind) -> Option<Vec3> {
        let (sum, n) = self
            .flowers
            .iter()
            .filter(|(_, f)| f.kind == kind)
            .fold((Vec3::ZERO, 0u32), |(sum, n), (_, f)| (sum + f.position, n + 1));
        (n > 0).then(|| sum / n as f32)
    }

    /// Read-only copy of one flower.
    pub fn snapshot(&self, entity: Entity) -> Option<FlowerInstance> {
        self.flowers.get(entity).ok().map(|(_, f)| f.clone())
    }

    /// Flowers not yet grown.
    pub fn ungrown(&self) -> Vec<Entity> {
        self.flowers
            .iter()
            .filter(|(_, f)| !f.is_grown())
            .map(|(e, _)| e)
            .collect()
    }
}

/// Advance every growing flower.
pub fn advance_flower_growth(
    time: Res<WorldTime>,
    timing: Res<GrowthTiming>,
    mut query: Query<&mut FlowerInstance>,
) {
    for mut flower in query.iter_mut() {
        if flower.state != FlowerState::Growing {
            continue;
        }
        if flower.advance(time.elapsed, &timing) {
            debug!("{} #{} grown", flower.kind, flower.id.0);
        }
    }
}

/// Idle wind sway for every flower.
pub fn apply_wind_sway(
    time: Res<WorldTime>,
    wind: Res<Wind>,
    mut query: Query<(&FlowerInstance, &mut WindSway)>,
) {
    for (flower, mut sway) in query.iter_mut() {
        sway.rotation_z = wind.sway(time.elapsed, flower.phase);
    }
}

/// Fire species completion once per species, then schedule garden completion.
pub fn check_species_completion(
    mut commands: Commands,
    time: Res<WorldTime>,
    garden: Garden,
    mut progress: ResMut<SpeciesProgress>,
) {
    for kind in FlowerKind::ALL {
        if !progress.expected.contains(&kind) || progress.is_complete(kind) {
            continue;
        }
        if garden.all_grown_for_kind(kind) && progress.complete(kind) {
            let center = garden.species_center(kind).unwrap_or(Vec3::ZERO);
            commands.trigger(SpeciesCompletedEvent { kind, center });
        }
    }

    if progress.garden_complete {
        return;
    }
    let due = progress.garden_complete_at;
    match due {
        None if progress.all_complete() => {
            progress.garden_complete_at = Some(time.elapsed + progress.completion_delay);
        }
        Some(at) if time.elapsed >= at => {
            progress.garden_complete = true;
            commands.trigger(GardenCompletedEvent {});
        }
        _ => {}
    }
}

/// Rebuild the outline layer's eligible and ungrown sets.
pub fn update_highlight_sets(
    garden: Garden,
    player: Res<PlayerAvatar>,
    mut sets: ResMut<HighlightSets>,
) {
    sets.eligible.clear();
    sets.eligible
        .extend(garden.query_nearby(player.position, player.settings.zone_radius));
    sets.ungrown = garden.ungrown();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::flower::FlowerId;
    use bevy_ecs::system::SystemState;

    fn spawn(world: &mut World, id: u32, kind: FlowerKind, at: Vec3) -> Entity {
        world
            .spawn((
                FlowerInstance::new(FlowerId(id), kind, at, 0.0, 0.0),
                WindSway::default(),
            ))
            .id()
    }

    #[test]
    fn test_query_nearby_sorted_dormant_horizontal() {
        let mut world = World::new();
        let far = spawn(&mut world, 0, FlowerKind::Daisy, Vec3::new(8.0, 0.0, 0.0));
        let near = spawn(&mut world, 1, FlowerKind::Daisy, Vec3::new(0.0, 50.0, 2.0));
        let grown = spawn(&mut world, 2, FlowerKind::Daisy, Vec3::new(1.0, 0.0, 0.0));
        let _out = spawn(&mut world, 3, FlowerKind::Daisy, Vec3::new(11.0, 0.0, 0.0));
        world.get_mut::<FlowerInstance>(grown).unwrap().activate(0.0);

        let mut state: SystemState<Garden> = SystemState::new(&mut world);
        let garden = state.get_mut(&mut world);
        let nearby = garden.query_nearby(Vec3::ZERO, 10.0);
        assert_eq!(nearby.as_slice(), &[near, far]);
    }

    #[test]
    fn test_activate_rejects_committed() {
        let mut world = World::new();
        let e = spawn(&mut world, 0, FlowerKind::Tulip, Vec3::ZERO);
        let mut state: SystemState<Garden> = SystemState::new(&mut world);
        let mut garden = state.get_mut(&mut world);
        assert!(garden.activate(e, 1.0));
        assert!(!garden.activate(e, 2.0));
        assert_eq!(garden.snapshot(e).unwrap().activation_time, Some(1.0));
    }

    #[test]
    fn test_all_grown_for_kind_needs_one_instance() {
        let mut world = World::new();
        let a = spawn(&mut world, 0, FlowerKind::Tulip, Vec3::ZERO);
        spawn(&mut world, 1, FlowerKind::Daisy, Vec3::ZERO);
        world.get_mut::<FlowerInstance>(a).unwrap().state = FlowerState::Grown;

        let mut state: SystemState<Garden> = SystemState::new(&mut world);
        let garden = state.get_mut(&mut world);
        assert!(garden.all_grown_for_kind(FlowerKind::Tulip));
        assert!(!garden.all_grown_for_kind(FlowerKind::Daisy));
        assert!(!garden.all_grown_for_kind(FlowerKind::Cactus));
    }

    #[test]
    fn test_species_center() {
        let mut world = World::new();
        spawn(&mut world, 0, FlowerKind::Cosmos, Vec3::new(0.0, 0.0, 0.0));
        spawn(&mut world, 1, FlowerKind::Cosmos, Vec3::new(4.0, 2.0, -2.0));
        let mut state: SystemState<Garden> = SystemState::new(&mut world);
        let garden = state.get_mut(&mut world);
        assert_eq!(
            garden.species_center(FlowerKind::Cosmos),
            Some(Vec3::new(2.0, 1.0, -1.0))
        );
        assert_eq!(garden.species_center(FlowerKind::Tulip), None);
    }

    #[test]
    fn test_wind_sway_uses_phase() {
        let mut world = World::new();
        let e = spawn(&mut world, 0, FlowerKind::Daisy, Vec3::ZERO);
        world.get_mut::<FlowerInstance>(e).unwrap().phase = std::f32::consts::FRAC_PI_2;
        world.insert_resource(WorldTime::default());
        world.insert_resource(Wind::default());
        let mut schedule = Schedule::default();
        schedule.add_systems(apply_wind_sway);
        schedule.run(&mut world);
        let sway = world.get::<WindSway>(e).unwrap();
        assert!((sway.rotation_z - 0.12).abs() < 1e-6);
    }
}
