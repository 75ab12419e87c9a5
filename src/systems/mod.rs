//! Garden systems.
//!
//! This module groups all ECS systems that advance the simulation. They run
//! chained in a fixed order built by [`crate::game::build_schedule`].
//!
//! Submodules overview
//! - [`assets`] – bridge with the asset thread and spawning of loaded models
//! - [`autopilot`] – scripted input for headless runs
//! - [`camera`] – derive the camera pose from the player
//! - [`flowers`] – flower access, growth, sway, completion and highlights
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`input`] – turn [`crate::resources::input::InputState`] into player intents
//! - [`models`] – write simulation state onto model handles
//! - [`player`] – player movement and animation clock
//! - [`time`] – update simulation time and delta
//! - [`watering`] – the shared watering operation

pub mod assets;
pub mod autopilot;
pub mod camera;
pub mod flowers;
pub mod gamestate;
pub mod input;
pub mod models;
pub mod player;
pub mod time;
pub mod watering;
