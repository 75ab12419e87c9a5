//! Asset loading backed by a dedicated thread.
//!
//! - [`asset_thread`] runs on its own OS thread, owns the [`ModelLoader`] and
//!   answers [`AssetCmd`]s with [`AssetMessage`]s.
//! - [`poll_asset_messages`] non-blockingly drains the thread's receiver into
//!   the ECS message queue each frame.
//! - [`spawn_loaded_models`] turns delivered models into flower entities and
//!   the avatar model resource.
//!
//! A flower whose model has not arrived yet does not exist in the world, so
//! every flower query simply sees a smaller garden until loading finishes.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};

use crate::components::flower::FlowerInstance;
use crate::components::model::{AvatarModel, FlowerModel};
use crate::components::sway::WindSway;
use crate::events::assets::{AssetCmd, AssetMessage};
use crate::resources::assets::{AVATAR_KEY, AssetBridge, ModelLoader};
use crate::resources::layout::FlowerSeed;
use crate::resources::score::WateringScore;

/// Queue the avatar and every planted flower for loading.
pub fn request_garden_models(bridge: &AssetBridge, seeds: &[FlowerSeed]) {
    bridge.request(AssetCmd::LoadAvatar);
    for seed in seeds {
        bridge.request(AssetCmd::LoadFlower(*seed));
    }
    debug!("Requested {} flower models", seeds.len());
}

/// Drain any pending results from the asset thread into
/// [`Messages<AssetMessage>`].
pub fn poll_asset_messages(bridge: Res<AssetBridge>, mut writer: MessageWriter<AssetMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Spawn flowers and install the avatar model as they arrive.
///
/// Each loaded flower adds one to [`WateringScore::total`]. Failed loads are
/// logged and otherwise ignored.
pub fn spawn_loaded_models(
    mut commands: Commands,
    mut messages: ResMut<Messages<AssetMessage>>,
    mut score: ResMut<WateringScore>,
) {
    for message in messages.drain() {
        match message {
            AssetMessage::FlowerLoaded { seed, model } => {
                commands.spawn((
                    FlowerInstance::new(seed.id, seed.kind, seed.ground, seed.rotation_y, seed.phase),
                    WindSway::default(),
                    FlowerModel(model),
                ));
                score.total += 1;
            }
            AssetMessage::AvatarLoaded { model } => {
                commands.insert_resource(AvatarModel(model));
            }
            AssetMessage::LoadFailed { key, error } => {
                warn!("model '{}' failed to load: {}", key, error);
            }
        }
    }
}

/// Entry point of the dedicated asset thread.
///
/// Blocks on the command channel and exits on [`AssetCmd::Shutdown`] or
/// when every sender is gone.
pub fn asset_thread(
    mut loader: impl ModelLoader,
    rx_cmd: Receiver<AssetCmd>,
    tx_msg: Sender<AssetMessage>,
) {
    info!(
        "[assets] thread starting (id={:?})",
        std::thread::current().id()
    );

    for cmd in rx_cmd.iter() {
        let message = match cmd {
            AssetCmd::LoadFlower(seed) => {
                let key = seed.kind.model_key();
                match loader.load(key) {
                    Ok(model) => AssetMessage::FlowerLoaded { seed, model },
                    Err(error) => AssetMessage::LoadFailed {
                        key: key.to_string(),
                        error,
                    },
                }
            }
            AssetCmd::LoadAvatar => match loader.load(AVATAR_KEY) {
                Ok(model) => AssetMessage::AvatarLoaded { model },
                Err(error) => AssetMessage::LoadFailed {
                    key: AVATAR_KEY.to_string(),
                    error,
                },
            },
            AssetCmd::Shutdown => break,
        };
        if tx_msg.send(message).is_err() {
            // Receiver dropped: the world is gone.
            break;
        }
    }

    info!("[assets] thread exiting");
}
