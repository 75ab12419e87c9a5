//! Wind parameters for flower sway.

use bevy_ecs::prelude::Resource;

/// Idle sway is `sin(elapsed * speed + phase) * strength` radians around Z.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Wind {
    pub strength: f32,
    pub speed: f32,
}

impl Default for Wind {
    fn default() -> Self {
        Self {
            strength: 0.12,
            speed: 1.8,
        }
    }
}

impl Wind {
    pub fn sway(&self, elapsed: f32, phase: f32) -> f32 {
        (elapsed * self.speed + phase).sin() * self.strength
    }
}
