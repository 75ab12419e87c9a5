use bevy_ecs::prelude::*;

use crate::resources::camera::CameraRig;
use crate::resources::player::PlayerAvatar;
use crate::resources::worldtime::WorldTime;

/// Derive the camera pose from the player position.
pub fn update_camera(
    time: Res<WorldTime>,
    player: Res<PlayerAvatar>,
    mut camera: ResMut<CameraRig>,
) {
    camera.update(player.position, time.elapsed);
}
