//! Save domain: checkpoint saves and reloading on death.

use std::collections::HashSet;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::abilities::{publish_change, AbilityChanged, AbilityPartsChanged, AbilitySet};
use crate::combat::{PlayerHealth, PlayerKilled};
use crate::core::CurrentLevel;
use crate::movement::{LocomotionState, Player};
use crate::save::{
    Checkpoint, CheckpointReached, LastCheckpoint, ObjectSnapshot, SaveGame, SaveStore,
    Saveable, CHECKPOINT_SLOT,
};

pub const START_CHECKPOINT: &str = "start";

type SaveableQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Saveable,
        &'static Transform,
        Option<&'static Visibility>,
        Option<&'static AbilitySet>,
        Option<&'static PlayerHealth>,
    ),
>;

/// Build a save from every saveable object.
fn snapshot_scene(scene: &str, checkpoint: &str, objects: &SaveableQuery) -> SaveGame {
    let objects = objects
        .iter()
        .map(|(saveable, transform, visibility, set, health)| {
            let mut snapshot = ObjectSnapshot::capture(&saveable.name, transform, visibility);
            if let Some(set) = set {
                snapshot.abilities = set.enabled_names();
            }
            snapshot.health = health.map(PlayerHealth::current);
            snapshot
        })
        .collect();

    SaveGame {
        scene: scene.to_string(),
        checkpoint: checkpoint.to_string(),
        objects,
    }
}

fn write_checkpoint(
    store: &SaveStore,
    level: &CurrentLevel,
    checkpoint: &str,
    objects: &SaveableQuery,
) -> bool {
    let game = snapshot_scene(&level.scene, checkpoint, objects);
    match store.write(CHECKPOINT_SLOT, &game) {
        Ok(path) => {
            info!(
                "Checkpoint '{}' saved: {} object(s) -> {}",
                checkpoint,
                game.objects.len(),
                path.display()
            );
            true
        }
        Err(err) => {
            error!("Checkpoint '{}' not saved: {}", checkpoint, err);
            false
        }
    }
}

/// The level start counts as the first checkpoint.
pub(crate) fn save_initial_checkpoint(
    store: Res<SaveStore>,
    level: Res<CurrentLevel>,
    mut last: ResMut<LastCheckpoint>,
    players: Query<(), With<Player>>,
    objects: SaveableQuery,
) {
    if last.id.is_some() || players.is_empty() {
        return;
    }

    write_checkpoint(&store, &level, START_CHECKPOINT, &objects);
    last.id = Some(START_CHECKPOINT.to_string());
}

pub(crate) fn checkpoint_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut reached: MessageWriter<CheckpointReached>,
    store: Res<SaveStore>,
    level: Res<CurrentLevel>,
    mut last: ResMut<LastCheckpoint>,
    checkpoints: Query<&Checkpoint>,
    players: Query<&PlayerHealth, With<Player>>,
    objects: SaveableQuery,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (checkpoint_entity, player_entity) in pairs {
            let Ok(checkpoint) = checkpoints.get(checkpoint_entity) else {
                continue;
            };
            let Ok(health) = players.get(player_entity) else {
                continue;
            };
            if health.is_dead() || !last.accepts(&checkpoint.id) {
                continue;
            }

            if write_checkpoint(&store, &level, &checkpoint.id, &objects) {
                last.id = Some(checkpoint.id.clone());
                reached.write(CheckpointReached {
                    id: checkpoint.id.clone(),
                });
            }
        }
    }
}

type RespawnQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Saveable,
        &'static mut Transform,
        &'static mut Position,
        &'static mut LinearVelocity,
        &'static mut PlayerHealth,
        &'static mut AbilitySet,
        &'static mut LocomotionState,
    ),
    With<Player>,
>;

type RestoreQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Saveable,
        &'static mut Transform,
        Option<&'static mut Position>,
        &'static mut Visibility,
    ),
    Without<Player>,
>;

/// Put the player and every saved object back where the checkpoint left them.
pub(crate) fn reload_on_death(
    mut killed: MessageReader<PlayerKilled>,
    mut changed: MessageWriter<AbilityChanged>,
    mut parts: MessageWriter<AbilityPartsChanged>,
    store: Res<SaveStore>,
    level: Res<CurrentLevel>,
    mut players: RespawnQuery,
    mut others: RestoreQuery,
) {
    let mut handled = HashSet::new();

    for event in killed.read() {
        if !handled.insert(event.player) {
            continue;
        }
        let Ok((
            saveable,
            mut transform,
            mut position,
            mut velocity,
            mut health,
            mut set,
            mut state,
        )) = players.get_mut(event.player)
        else {
            warn!("Killed entity {:?} is not a saveable player", event.player);
            continue;
        };

        velocity.0 = Vec2::ZERO;
        health.restore_health();
        state.jump_requested = false;
        state.jump_boost_timer = 0.0;

        let game = match store.read(&level.scene, CHECKPOINT_SLOT) {
            Ok(game) => game,
            Err(err) => {
                error!("Reload failed, respawning at level start: {}", err);
                transform.translation = level.spawn_point.extend(transform.translation.z);
                position.0 = level.spawn_point;
                continue;
            }
        };

        match game.find(&saveable.name) {
            Some(snapshot) => {
                snapshot.apply_to(&mut transform);
                position.0 = snapshot.position();
                if let Some(hp) = snapshot.health {
                    health.set_health(hp);
                }

                let (ability_changes, errors) = set.restore(&snapshot.abilities);
                for err in errors {
                    warn!("Saved ability not restored: {}", err);
                }
                for change in ability_changes {
                    publish_change(event.player, change, &mut changed, &mut parts);
                }
            }
            None => {
                warn!("Save has no entry for '{}'", saveable.name);
                position.0 = level.spawn_point;
                transform.translation = level.spawn_point.extend(transform.translation.z);
            }
        }

        for (saveable, mut transform, position, mut visibility) in &mut others {
            let Some(snapshot) = game.find(&saveable.name) else {
                continue;
            };
            snapshot.apply_to(&mut transform);
            if let Some(mut position) = position {
                position.0 = snapshot.position();
            }
            *visibility = if snapshot.active {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }

        info!("Player reloaded at checkpoint '{}'", game.checkpoint);
    }
}
