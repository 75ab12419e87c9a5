//! Event types and observers used by the garden.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them.
//!
//! Submodules:
//! - [`assets`] – commands and messages for the background asset thread
//! - [`gamestate`] – state transition notifications for the high-level game flow
//! - [`garden`] – watering, species completion and garden completion

pub mod assets;
pub mod gamestate;
pub mod garden;
