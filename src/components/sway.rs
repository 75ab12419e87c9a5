use bevy_ecs::prelude::Component;

/// Current idle sway angle around Z, in radians.
///
/// Kept apart from [`FlowerInstance`](crate::components::flower::FlowerInstance)
/// so the growth state machine never sees it.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct WindSway {
    pub rotation_z: f32,
}
