//! Input systems.
//!
//! - [`update_input_state`] derives the per-key edge flags from the keys the
//!   adapter reported as held.
//! - [`player_input_system`] turns the frame's input into player intents:
//!   held keys move, the water key and in-zone clicks water, other clicks
//!   walk to the clicked point, and a camera drag hands the camera over.
//! - [`clear_frame_input`] drops the one-shot inputs at the end of the frame.
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::camera::CameraRig;
use crate::resources::input::InputState;
use crate::resources::player::{MoveRequest, PlayerAvatar};
use crate::resources::score::WateringScore;
use crate::resources::spatial::SpatialResolver;
use crate::resources::worldtime::WorldTime;
use crate::systems::flowers::Garden;
use crate::systems::watering::{in_player_zone, water_nearby};

/// Refresh the `InputState` key flags for this frame.
pub fn update_input_state(mut input: ResMut<InputState>) {
    input.refresh();
}

/// Translate input into player, camera and flower actions.
#[allow(clippy::too_many_arguments)]
pub fn player_input_system(
    mut commands: Commands,
    time: Res<WorldTime>,
    input: Res<InputState>,
    resolver: Res<SpatialResolver>,
    mut player: ResMut<PlayerAvatar>,
    mut camera: ResMut<CameraRig>,
    mut garden: Garden,
    mut score: ResMut<WateringScore>,
) {
    let now = time.elapsed;

    if input.camera_drag_started {
        camera.begin_user_control();
    }

    if input.action_grow_all.just_pressed {
        let started = garden.activate_all(now);
        info!("Grow-all: {} flowers started growing", started);
    }

    // Held keys.
    let direction = input.movement_direction();
    if direction.length_squared() > 0.0 {
        if player.request_move(MoveRequest::Direction(direction), &resolver) {
            camera.resume_follow();
        }
    } else if player.held_direction.is_some() {
        player.release_direction();
    }

    // Pointer: water when the click lands in the zone next to eligible
    // flowers, otherwise walk there.
    if let Some(point) = input.pointer_click {
        let watered = if in_player_zone(&player, point) {
            water_nearby(&mut player, &mut camera, &mut garden, &mut score, now)
        } else {
            None
        };
        match watered {
            Some(event) => commands.trigger(event),
            None => {
                player.request_move(MoveRequest::Toward(point), &resolver);
                camera.resume_follow();
            }
        }
    }

    if input.action_water.just_pressed {
        if let Some(event) = water_nearby(&mut player, &mut camera, &mut garden, &mut score, now) {
            commands.trigger(event);
        }
    }
}

/// Drop one-shot inputs once the frame has consumed them.
pub fn clear_frame_input(mut input: ResMut<InputState>) {
    input.end_frame();
}
