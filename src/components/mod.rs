//! ECS components for entities.
//!
//! Every flower in the garden is one entity. Components carry its lifecycle
//! state, its wind sway and the model handle the renderer draws.
//!
//! Submodules overview:
//! - [`flower`] – species, growth timing and the per-flower state machine
//! - [`model`] – model handles owned by flowers and the avatar
//! - [`sway`] – idle wind rotation applied on top of the flower pose

pub mod flower;
pub mod model;
pub mod sway;
