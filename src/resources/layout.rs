//! Flower layout: where each species is planted.
//!
//! The layout lists, per species, how many flowers to plant and the X/Z
//! rectangle they are scattered over. Planting is deterministic for a given
//! seed. A position with no ground under it is skipped, so the garden may end
//! up with fewer flowers than the layout asks for.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "species": [
//!     { "kind": "daffodil", "count": 30, "x_range": [-70, -40], "z_range": [-30, -10], "random_rotation": true },
//!     { "kind": "cactus", "count": 10, "x_range": [-42, -35], "z_range": [0, 20] }
//!   ]
//! }
//! ```

use bevy_ecs::prelude::Resource;
use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::flower::{FlowerId, FlowerKind};
use crate::error::{self, Result};
use crate::resources::spatial::SpatialResolver;

/// Largest random spawn rotation, in degrees.
pub const MAX_SPAWN_ROTATION_DEG: f32 = 20.0;

/// Upper bound on the up-front allocation for planted flowers.
const MAX_CAPACITY_HINT: u32 = 4096;

/// Planting rule for one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub kind: FlowerKind,
    pub count: u32,
    pub x_range: [f32; 2],
    pub z_range: [f32; 2],
    #[serde(default)]
    pub random_rotation: bool,
}

impl SpawnConfig {
    pub fn new(kind: FlowerKind, count: u32, x_range: [f32; 2], z_range: [f32; 2]) -> Self {
        Self {
            kind,
            count,
            x_range,
            z_range,
            random_rotation: false,
        }
    }

    pub fn with_random_rotation(mut self) -> Self {
        self.random_rotation = true;
        self
    }
}

/// Everything needed to build one flower once its model is loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowerSeed {
    pub id: FlowerId,
    pub kind: FlowerKind,
    /// Ground point the flower stands on.
    pub ground: Vec3,
    /// Spawn rotation around Y, in radians.
    pub rotation_y: f32,
    /// Sway phase in `[0, 2π)`.
    pub phase: f32,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowerLayout {
    pub species: Vec<SpawnConfig>,
}

impl Default for FlowerLayout {
    fn default() -> Self {
        use FlowerKind::*;
        Self {
            species: vec![
                SpawnConfig::new(Daffodil, 30, [-70.0, -40.0], [-30.0, -10.0]).with_random_rotation(),
                SpawnConfig::new(Sunflower, 20, [-40.0, 10.0], [-60.0, -40.0]),
                SpawnConfig::new(Hyacinth, 35, [0.0, 40.0], [-35.0, -20.0]).with_random_rotation(),
                SpawnConfig::new(Cactus, 10, [-42.0, -35.0], [0.0, 20.0]),
                SpawnConfig::new(Cosmos, 50, [-30.0, -15.0], [30.0, 50.0]).with_random_rotation(),
                SpawnConfig::new(Daisy, 100, [10.0, 40.0], [-5.0, 20.0]).with_random_rotation(),
                SpawnConfig::new(Marigold, 30, [50.0, 65.0], [-25.0, 10.0]).with_random_rotation(),
                SpawnConfig::new(MorningGlory, 20, [-5.0, 5.0], [25.0, 50.0]).with_random_rotation(),
                SpawnConfig::new(Tulip, 30, [-25.0, -5.0], [-20.0, 15.0]).with_random_rotation(),
            ],
        }
    }
}

impl FlowerLayout {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = error::read_to_string(path)?;
        error::parse_json(path, &text)
    }

    /// Flowers the layout asks for, before ground checks.
    pub fn requested(&self) -> u32 {
        self.species
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.count))
    }

    /// Scatter every species over its rectangle.
    ///
    /// Ids are assigned in order over the planted flowers only.
    pub fn plant(&self, resolver: &SpatialResolver, seed: u64) -> Vec<FlowerSeed> {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut seeds = Vec::with_capacity(self.requested().min(MAX_CAPACITY_HINT) as usize);
        let mut skipped = 0u32;

        for config in &self.species {
            for _ in 0..config.count {
                let x = rand_range(&mut rng, config.x_range);
                let z = rand_range(&mut rng, config.z_range);
                let rotation_y = if config.random_rotation {
                    (rng.f32() * MAX_SPAWN_ROTATION_DEG).to_radians()
                } else {
                    0.0
                };
                let phase = rng.f32() * std::f32::consts::TAU;

                let Some(height) = resolver.sample_ground_height(x, z) else {
                    skipped += 1;
                    continue;
                };
                seeds.push(FlowerSeed {
                    id: FlowerId(seeds.len() as u32),
                    kind: config.kind,
                    ground: Vec3::new(x, height, z),
                    rotation_y,
                    phase,
                });
            }
        }

        if skipped > 0 {
            debug!("{} flower positions had no ground and were skipped", skipped);
        }
        info!(
            "Planted {} of {} flowers over {} species",
            seeds.len(),
            self.requested(),
            self.species.len()
        );
        seeds
    }
}

fn rand_range(rng: &mut fastrand::Rng, [a, b]: [f32; 2]) -> f32 {
    a + (b - a) * rng.f32()
}
