use crate::components::model::AvatarModel;
use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use bevy_ecs::prelude::*;

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    // Check if there is a pending state change
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        // If there is, trigger the GameStateChangedEvent
        commands.trigger(GameStateChangedEvent {});
    }
}

/// Open the garden once the avatar model has arrived.
pub fn finish_setup(
    state: Res<GameState>,
    avatar: Option<Res<AvatarModel>>,
    mut next_state: ResMut<NextGameState>,
) {
    if *state.get() == GameStates::Setup
        && avatar.is_some()
        && *next_state.get() == NextGameStates::Unchanged
    {
        next_state.set(GameStates::Playing);
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}
