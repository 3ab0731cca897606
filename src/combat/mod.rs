//! Combat domain: player health, turrets and hazards.

mod components;
mod events;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{DamageOutcome, KillZone, PlayerHealth, Projectile, Turret, TurretConfig};
pub use events::{PlayerHit, PlayerKilled};
pub use systems::spawn_turret;

use bevy::prelude::*;

use crate::combat::systems::{
    age_projectiles, apply_player_damage, kill_zone_contacts, projectile_contacts, tick_turrets,
};
use crate::core::GameState;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayerHit>()
            .add_message::<PlayerKilled>()
            .add_systems(
                Update,
                (
                    tick_turrets,
                    age_projectiles,
                    projectile_contacts,
                    kill_zone_contacts,
                    apply_player_damage,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
