//! Progress counters read by the UI layer.

use bevy_ecs::prelude::Resource;
use glam::Vec3;
use rustc_hash::FxHashSet;

use crate::components::flower::FlowerKind;

/// Running watering score.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct WateringScore {
    /// Flowers activated by player watering actions.
    pub watered: u32,
    /// Flowers loaded into the garden so far.
    pub total: u32,
    /// Watering actions that activated at least one flower.
    pub actions: u32,
}

impl WateringScore {
    /// Record one successful watering action.
    pub fn record(&mut self, activated: u32) {
        if activated == 0 {
            return;
        }
        self.watered += activated;
        self.actions += 1;
    }
}

/// Which species have fully bloomed.
///
/// The completed set lives outside the flowers so each species fires its
/// completion exactly once.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpeciesProgress {
    /// Species present in the layout.
    pub expected: FxHashSet<FlowerKind>,
    pub completed: FxHashSet<FlowerKind>,
    /// Pause between the last species and the garden completing.
    pub completion_delay: f32,
    /// When the garden-complete notification is due.
    pub garden_complete_at: Option<f32>,
    pub garden_complete: bool,
}

impl SpeciesProgress {
    pub fn new(expected: impl IntoIterator<Item = FlowerKind>, completion_delay: f32) -> Self {
        Self {
            expected: expected.into_iter().collect(),
            completion_delay,
            ..Self::default()
        }
    }

    /// Mark `kind` complete. Returns `false` if it already was.
    pub fn complete(&mut self, kind: FlowerKind) -> bool {
        self.completed.insert(kind)
    }

    pub fn is_complete(&self, kind: FlowerKind) -> bool {
        self.completed.contains(&kind)
    }

    /// Every expected species completed.
    pub fn all_complete(&self) -> bool {
        !self.expected.is_empty() && self.expected.iter().all(|k| self.completed.contains(k))
    }
}

/// A floating species label for the text layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesLabel {
    pub kind: FlowerKind,
    pub text: String,
    pub position: Vec3,
}

impl SpeciesLabel {
    /// Label centered above `center`, the mean position of the species.
    pub fn new(kind: FlowerKind, center: Vec3) -> Self {
        Self {
            kind,
            text: format!("{}: {}", kind.name(), kind.meaning()),
            position: center + Vec3::Y * kind.label_offset(),
        }
    }
}

/// Labels shown so far, in completion order.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpeciesLabels(pub Vec<SpeciesLabel>);
