//! Content domain: data-driven player configuration.

mod data;
mod loader;
mod registry;
mod validation;


pub use data::{AbilitiesDef, PlayerDef};
pub use loader::{load_player_content, parse_ron, ContentLoadError, PLAYER_FILE};
pub use registry::ContentRegistry;
pub use validation::{validate_player_content, ValidationError};

use std::path::Path;

use bevy::prelude::*;

use crate::core::GameState;

pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContentRegistry>()
            .add_systems(OnEnter(GameState::Boot), load_content);
    }
}

/// Load and validate content; anything wrong falls back or gets logged.
fn load_content(mut commands: Commands) {
    let registry = match load_player_content(Path::new(DATA_DIR)) {
        Ok(player) => ContentRegistry {
            player,
            from_file: true,
        },
        Err(err) => {
            error!("{}; using built-in defaults", err);
            ContentRegistry::default()
        }
    };

    for err in validate_player_content(&registry.player) {
        error!("Invalid content: {}", err);
    }

    info!("{}", registry.summary());
    commands.insert_resource(registry.player.movement.clone());
    commands.insert_resource(registry);
}
