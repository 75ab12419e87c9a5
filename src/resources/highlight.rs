//! Per-tick highlight sets for the outline layer.

use bevy_ecs::prelude::*;

/// Flower entities the outline layer should draw this tick.
///
/// Recomputed every tick by
/// [`update_highlight_sets`](crate::systems::flowers::update_highlight_sets).
#[derive(Resource, Debug, Clone, Default)]
pub struct HighlightSets {
    /// Dormant flowers inside the player zone, nearest first.
    pub eligible: Vec<Entity>,
    /// Every flower not yet grown.
    pub ungrown: Vec<Entity>,
}
