//! Write simulation state onto the loaded models.
//!
//! This is the boundary with the renderer: after every other system ran,
//! each model handle receives the transform, tint and clip of the state it
//! represents.
use bevy_ecs::prelude::*;
use glam::Vec3;

use crate::components::flower::FlowerInstance;
use crate::components::model::{AvatarModel, FlowerModel};
use crate::components::sway::WindSway;
use crate::resources::assets::ModelTransform;
use crate::resources::player::PlayerAvatar;

pub fn sync_flower_models(mut query: Query<(&FlowerInstance, &WindSway, &mut FlowerModel)>) {
    for (flower, sway, mut model) in query.iter_mut() {
        model.0.set_transform(ModelTransform {
            position: flower.position,
            rotation: Vec3::new(0.0, flower.rotation_y, sway.rotation_z),
            scale: flower.scale,
        });
        model.0.set_tint(flower.color);
    }
}

/// Place the avatar on the ground under the zone position and keep its clip
/// in step with the animation mode.
pub fn sync_avatar_model(player: Res<PlayerAvatar>, avatar: Option<ResMut<AvatarModel>>) {
    let Some(mut avatar) = avatar else {
        return;
    };
    avatar.0.set_transform(ModelTransform {
        position: player.position - Vec3::Y * player.settings.height_offset,
        rotation: Vec3::new(0.0, player.facing_angle, 0.0),
        scale: Vec3::ONE,
    });
    let clip = player.current_clip();
    if avatar.0.clip() != Some(clip) {
        avatar.0.play_clip(clip);
    }
}
