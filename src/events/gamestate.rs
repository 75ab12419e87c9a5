//! Game state transition event and observer.
//!
//! Systems request a change to the high-level [`GameStates`] by updating
//! [`NextGameState`]. `check_pending_state` then emits a
//! [`GameStateChangedEvent`], and the observer in this module applies the
//! transition to [`GameState`] and runs the enter/exit hooks.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::player::PlayerAvatar;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending game state transition should be
/// applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending game state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], runs the exit hook
///   of the old state and the enter hook of the new one, then resets
///   [`NextGameState`] to [`Unchanged`].
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    mut player: Option<ResMut<PlayerAvatar>>,
) {
    debug!("GameStateChangedEvent triggered");

    if let (Some(next_game_state), Some(game_state)) =
        (next_game_state.as_deref_mut(), game_state.as_deref_mut())
    {
        // Clone the next state value first so we don't keep an immutable borrow while mutating.
        let next_state_value = next_game_state.get().clone();
        match next_state_value {
            Pending(new_state) => {
                let old_state = game_state.get().clone();
                info!(
                    "Transitioning from {:?} to {:?}",
                    game_state.get(),
                    new_state
                );
                game_state.set(new_state.clone());
                next_game_state.reset();
                on_state_exit(&old_state);
                on_state_enter(&new_state, player.as_deref_mut());
            }
            Unchanged => {
                debug!("No state change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}",
            next_game_state.is_some(),
            game_state.is_some()
        );
    }
}

/// Internal: state-specific "enter" hook.
fn on_state_enter(state: &GameStates, player: Option<&mut PlayerAvatar>) {
    match state {
        GameStates::None => debug!("Entered None state"),
        GameStates::Setup => debug!("Entered Setup state, waiting for the avatar"),
        GameStates::Playing => info!("Garden is open"),
        GameStates::Completed => {
            // Input stops here; let any walk in progress end where it is.
            if let Some(player) = player {
                player.stop_moving();
            }
            info!("Garden completed");
        }
    }
}

/// Internal: state-specific "exit" hook.
fn on_state_exit(state: &GameStates) {
    match state {
        GameStates::None => debug!("Exited None state"),
        GameStates::Setup => debug!("Exited Setup state"),
        GameStates::Playing => debug!("Exited Playing state"),
        GameStates::Completed => debug!("Exited Completed state"),
    }
}
