//! Messages exchanged with the asset worker thread.

use bevy_ecs::message::Message;

use crate::resources::assets::ModelHandle;
use crate::resources::layout::FlowerSeed;

/// Commands sent *to* the asset thread
#[derive(Debug, Clone)]
pub enum AssetCmd {
    LoadFlower(FlowerSeed),
    LoadAvatar,
    Shutdown,
}

/// Results sent *back* from the asset thread
#[derive(Message, Debug)]
pub enum AssetMessage {
    FlowerLoaded {
        seed: FlowerSeed,
        model: Box<dyn ModelHandle>,
    },
    AvatarLoaded {
        model: Box<dyn ModelHandle>,
    },
    LoadFailed {
        key: String,
        error: String,
    },
}
