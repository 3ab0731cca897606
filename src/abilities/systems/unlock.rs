//! Abilities domain: unlocking abilities through level triggers.

use std::collections::HashSet;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::abilities::{
    AbilityChange, AbilityChanged, AbilityPartsChanged, AbilitySet, AbilityTrigger, TriggerSpent,
};
use crate::movement::Player;

/// Announce a roster change and its part visibility.
pub fn publish_change(
    entity: Entity,
    change: AbilityChange,
    changed: &mut MessageWriter<AbilityChanged>,
    parts: &mut MessageWriter<AbilityPartsChanged>,
) {
    if let Some(visibility) = change.parts {
        parts.write(AbilityPartsChanged {
            entity,
            ability: change.name.clone(),
            visibility,
        });
    }
    changed.write(AbilityChanged {
        entity,
        name: change.name,
        kind: change.kind,
        enabled: change.enabled,
    });
}

pub(crate) fn unlock_on_trigger_contact(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut changed: MessageWriter<AbilityChanged>,
    mut parts: MessageWriter<AbilityPartsChanged>,
    triggers: Query<&AbilityTrigger, Without<TriggerSpent>>,
    mut players: Query<&mut AbilitySet, With<Player>>,
) {
    // A trigger can show up in several collision messages in one tick.
    let mut spent = HashSet::new();

    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (trigger_entity, player_entity) in pairs {
            let Ok(trigger) = triggers.get(trigger_entity) else {
                continue;
            };
            let Ok(mut set) = players.get_mut(player_entity) else {
                continue;
            };
            if !spent.insert(trigger_entity) {
                continue;
            }

            match set.enable(&trigger.ability_name) {
                Ok(Some(change)) => {
                    info!("Ability unlocked: {}", change.name);
                    publish_change(player_entity, change, &mut changed, &mut parts);
                }
                Ok(None) => {}
                Err(err) => warn!("Ability trigger failed: {}", err),
            }

            retire_trigger(&mut commands, trigger_entity);
        }
    }
}

/// Keep each trigger's active state in line with the player's roster: spent
/// while the ability is owned, live again once it isn't.
pub(crate) fn reconcile_triggers(
    mut commands: Commands,
    triggers: Query<(Entity, &AbilityTrigger, Has<TriggerSpent>)>,
    players: Query<&AbilitySet, With<Player>>,
) {
    let Ok(set) = players.single() else {
        return;
    };

    for (entity, trigger, spent) in &triggers {
        let owned = set.roster().is_enabled(&trigger.ability_name);
        if owned && !spent {
            debug!("Trigger for '{}' already owned", trigger.ability_name);
            retire_trigger(&mut commands, entity);
        } else if !owned && spent {
            debug!("Trigger for '{}' reactivated", trigger.ability_name);
            commands
                .entity(entity)
                .remove::<(TriggerSpent, ColliderDisabled)>()
                .insert(Visibility::Inherited);
        }
    }
}

fn retire_trigger(commands: &mut Commands, entity: Entity) {
    commands
        .entity(entity)
        .insert((TriggerSpent, ColliderDisabled, Visibility::Hidden));
}
