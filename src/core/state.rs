//! Core domain: game state definitions.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum GameState {
    /// Content loading.
    #[default]
    Boot,
    Run,
    Paused,
}

impl GameState {
    /// Where the pause key leads from here, if anywhere.
    pub fn toggled_pause(self) -> Option<GameState> {
        match self {
            GameState::Run => Some(GameState::Paused),
            GameState::Paused => Some(GameState::Run),
            GameState::Boot => None,
        }
    }
}
