//! Loaded model handles attached to simulation state.

use bevy_ecs::prelude::*;

use crate::resources::assets::ModelHandle;

/// Visual model of one flower, written by the model sync system.
#[derive(Component, Debug)]
pub struct FlowerModel(pub Box<dyn ModelHandle>);

/// Visual model of the player avatar. Absent until the asset thread delivers it.
#[derive(Resource, Debug)]
pub struct AvatarModel(pub Box<dyn ModelHandle>);
