//! Garden gameplay events and their observers.
//!
//! - [`WateringEvent`]: a watering action activated one or more flowers.
//! - [`SpeciesCompletedEvent`]: every flower of one species is grown. Fires
//!   once per species.
//! - [`GardenCompletedEvent`]: every species in the layout is complete.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec3;
use log::info;

use crate::components::flower::FlowerKind;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::score::{SpeciesLabel, SpeciesLabels, WateringScore};

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WateringEvent {
    /// Zone position the action was centered on.
    pub center: Vec3,
    /// Flowers activated by this action.
    pub activated: u32,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct SpeciesCompletedEvent {
    pub kind: FlowerKind,
    /// Mean position of the species.
    pub center: Vec3,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GardenCompletedEvent {}

pub fn observe_watering(trigger: On<WateringEvent>, score: Res<WateringScore>) {
    let event = trigger.event();
    info!(
        "Watered {} flowers at ({:.1}, {:.1}), score {}/{}",
        event.activated, event.center.x, event.center.z, score.watered, score.total
    );
}

/// Put up the species label.
pub fn observe_species_completed(
    trigger: On<SpeciesCompletedEvent>,
    mut labels: ResMut<SpeciesLabels>,
) {
    let event = trigger.event();
    let label = SpeciesLabel::new(event.kind, event.center);
    info!("Species complete: {}", label.text);
    labels.0.push(label);
}

pub fn observe_garden_completed(
    _trigger: On<GardenCompletedEvent>,
    mut next_state: ResMut<NextGameState>,
) {
    info!("Every species has bloomed");
    next_state.set(GameStates::Completed);
}
