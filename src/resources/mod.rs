//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: the terrain, the player and camera
//! state machines, input, timing, configuration and progress counters. Each
//! submodule documents the semantics and intended usage of its resource(s).
//!
//! Overview
//! - `assets` – model handle traits and the bridge to the asset thread
//! - `camera` – follow/zoom camera state machine
//! - `gameconfig` – INI-backed tuning values
//! - `gamestate` – authoritative state and pending transitions
//! - `highlight` – entity sets for the outline layer
//! - `input` – per-frame input written by an adapter
//! - `layout` – data-driven flower placement
//! - `player` – avatar movement and animation state machine
//! - `score` – watering score and species completion
//! - `spatial` – ground height, obstacles and bounds
//! - `terrain` – terrain description file and resolver construction
//! - `wind` – wind sway parameters
//! - `worldtime` – simulation time and delta

pub mod assets;
pub mod camera;
pub mod gameconfig;
pub mod gamestate;
pub mod highlight;
pub mod input;
pub mod layout;
pub mod player;
pub mod score;
pub mod spatial;
pub mod terrain;
pub mod wind;
pub mod worldtime;
