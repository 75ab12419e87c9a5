//! Player movement and animation systems.
use bevy_ecs::prelude::*;

use crate::resources::player::PlayerAvatar;
use crate::resources::spatial::SpatialResolver;
use crate::resources::worldtime::WorldTime;

/// Resolve this tick's movement against the terrain.
pub fn move_player(resolver: Res<SpatialResolver>, mut player: ResMut<PlayerAvatar>) {
    player.step(&resolver);
}

/// Advance the player clock with the frame's elapsed time.
pub fn tick_player(time: Res<WorldTime>, mut player: ResMut<PlayerAvatar>) {
    player.tick(time.delta);
}
