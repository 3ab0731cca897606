//! ContentRegistry resource holding the loaded player definition.

use bevy::prelude::*;

use super::data::PlayerDef;

/// Loaded game content, or the built-in defaults when loading failed.
#[derive(Resource, Debug, Default)]
pub struct ContentRegistry {
    pub player: PlayerDef,
    /// Whether `player` came from disk.
    pub from_file: bool,
}

impl ContentRegistry {
    /// Returns a summary of loaded content for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded ({}):\n\
             - Health: {}\n\
             - Abilities: {}\n\
             - Ability parts: {}\n\
             - Max speed: {}\n\
             - Jump height: {:.1}",
            if self.from_file { "file" } else { "defaults" },
            self.player.health,
            self.player.abilities.names().join(", "),
            self.player.parts.iter().map(|def| def.parts.len()).sum::<usize>(),
            self.player.movement.max_speed,
            self.player.movement.single_jump_height(),
        )
    }
}
