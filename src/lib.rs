//! Gardenkeeper library.
//!
//! The real-time core of a 3D garden-watering game: flower growth, the
//! player avatar and the camera, resolved against a static terrain. This
//! module exposes the ECS components, resources, systems and events for use
//! in integration tests and by a rendering host.

pub mod components;
pub mod easing;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
