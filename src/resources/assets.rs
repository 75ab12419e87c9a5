//! Model handles and the bridge to the background asset thread.
//!
//! The simulation never decodes models itself. A [`ModelLoader`] running on
//! the asset thread turns model keys into [`ModelHandle`]s, which the core
//! only uses to write transforms, tints and animation clips.
//!
//! Use [`setup_assets`] once during initialization to spawn the asset thread
//! and insert the [`AssetBridge`] and `Messages<AssetMessage>` resources.
//! Call [`shutdown_assets`] during teardown to stop and join the thread.

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};
use glam::Vec3;

use crate::error::{GardenError, Result};
use crate::events::assets::{AssetCmd, AssetMessage};
use crate::resources::player::AnimationClip;
use crate::systems::assets::asset_thread;

/// Model key of the player avatar.
pub const AVATAR_KEY: &str = "avatar";

/// Transform written to a model each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub position: Vec3,
    /// Euler rotation in radians (X, Y, Z).
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// What the core can do with a loaded model.
pub trait ModelHandle: Send + Sync + std::fmt::Debug {
    fn set_transform(&mut self, transform: ModelTransform);
    fn transform(&self) -> ModelTransform;
    fn set_tint(&mut self, color: Vec3);
    /// Switch to a named clip, restarting it.
    fn play_clip(&mut self, clip: AnimationClip);
    /// Clip currently playing, if any.
    fn clip(&self) -> Option<AnimationClip>;
}

/// Produces model handles on the asset thread.
pub trait ModelLoader: Send + 'static {
    fn load(&mut self, key: &str) -> std::result::Result<Box<dyn ModelHandle>, String>;
}

/// Model that only remembers what was written to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessModel {
    pub key: String,
    pub transform: ModelTransform,
    pub tint: Vec3,
    pub clip: Option<AnimationClip>,
    /// How many times a clip was (re)started.
    pub clip_starts: u32,
}

impl HeadlessModel {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }
}

impl ModelHandle for HeadlessModel {
    fn set_transform(&mut self, transform: ModelTransform) {
        self.transform = transform;
    }

    fn transform(&self) -> ModelTransform {
        self.transform
    }

    fn set_tint(&mut self, color: Vec3) {
        self.tint = color;
    }

    fn play_clip(&mut self, clip: AnimationClip) {
        self.clip = Some(clip);
        self.clip_starts += 1;
    }

    fn clip(&self) -> Option<AnimationClip> {
        self.clip
    }
}

/// Loader producing [`HeadlessModel`]s for any key.
#[derive(Debug, Default)]
pub struct HeadlessLoader;

impl ModelLoader for HeadlessLoader {
    fn load(&mut self, key: &str) -> std::result::Result<Box<dyn ModelHandle>, String> {
        Ok(Box::new(HeadlessModel::new(key)))
    }
}

/// Shared bridge between the ECS world and the asset thread.
#[derive(Resource)]
pub struct AssetBridge {
    /// Sender for [`AssetCmd`] messages (ECS -> asset thread).
    pub tx_cmd: Sender<AssetCmd>,
    /// Receiver for [`AssetMessage`] messages (asset thread -> ECS).
    pub rx_msg: Receiver<AssetMessage>,
    /// Join handle for the background asset thread.
    pub handle: std::thread::JoinHandle<()>,
}

impl AssetBridge {
    /// Queue a load. A closed channel means the thread is gone; the request
    /// is dropped and the model simply never appears.
    pub fn request(&self, cmd: AssetCmd) {
        if self.tx_cmd.send(cmd).is_err() {
            log::warn!("asset thread is gone, load request dropped");
        }
    }
}

/// Spawn the asset thread and register bridge resources.
pub fn setup_assets(world: &mut World, loader: impl ModelLoader) -> Result<()> {
    let (tx_cmd, rx_cmd) = unbounded::<AssetCmd>();
    let (tx_msg, rx_msg) = unbounded::<AssetMessage>();

    let handle = std::thread::Builder::new()
        .name("assets".into())
        .spawn(move || asset_thread(loader, rx_cmd, tx_msg))
        .map_err(|e| GardenError::Assets(format!("failed to spawn asset thread: {}", e)))?;

    world.insert_resource(AssetBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.insert_resource(Messages::<AssetMessage>::default());
    Ok(())
}

/// Gracefully request shutdown of the asset thread and join it.
pub fn shutdown_assets(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AssetBridge>() {
        let _ = bridge.tx_cmd.send(AssetCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
