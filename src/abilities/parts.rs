//! Abilities domain: visual parts shown or hidden per ability.

use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Content entry: the player's part names belonging to one ability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityPartsDef {
    pub ability: String,
    pub parts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartsVisibility {
    Shown,
    Hidden,
}

impl From<PartsVisibility> for Visibility {
    fn from(value: PartsVisibility) -> Self {
        match value {
            PartsVisibility::Shown => Visibility::Inherited,
            PartsVisibility::Hidden => Visibility::Hidden,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartError {
    /// Two children of the sprite root share a name.
    DuplicatePlayerPart(String),
    EmptyAbilityName { index: usize },
    DuplicateAbility(String),
    EmptyPartName { ability: String, index: usize },
    MissingPart { ability: String, part: String },
    DuplicatePart { ability: String, part: String },
}

impl fmt::Display for PartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartError::DuplicatePlayerPart(name) => {
                write!(f, "player has more than one part named '{}'", name)
            }
            PartError::EmptyAbilityName { index } => {
                write!(f, "parts entry {} has no ability name", index)
            }
            PartError::DuplicateAbility(name) => {
                write!(f, "ability '{}' has two parts entries", name)
            }
            PartError::EmptyPartName { ability, index } => {
                write!(f, "ability '{}' has an empty part name at {}", ability, index)
            }
            PartError::MissingPart { ability, part } => write!(
                f,
                "ability '{}' lists part '{}' but the player has no such part",
                ability, part
            ),
            PartError::DuplicatePart { ability, part } => {
                write!(f, "ability '{}' lists part '{}' twice", ability, part)
            }
        }
    }
}

impl std::error::Error for PartError {}

/// Index the player's named part entities. Later duplicates are dropped.
pub fn index_player_parts(
    named: impl IntoIterator<Item = (String, Entity)>,
) -> (HashMap<String, Entity>, Vec<PartError>) {
    let mut index = HashMap::new();
    let mut errors = Vec::new();

    for (name, entity) in named {
        if index.contains_key(&name) {
            errors.push(PartError::DuplicatePlayerPart(name));
            continue;
        }
        index.insert(name, entity);
    }

    (index, errors)
}

/// Ability name → part entities, built from content and validated against the
/// parts the player actually has. Bad entries are reported and skipped.
#[derive(Component, Debug, Clone, Default)]
pub struct AbilityParts {
    by_ability: HashMap<String, Vec<Entity>>,
}

impl AbilityParts {
    pub fn build(
        defs: &[AbilityPartsDef],
        available: &HashMap<String, Entity>,
    ) -> (Self, Vec<PartError>) {
        let mut by_ability: HashMap<String, Vec<Entity>> = HashMap::new();
        let mut errors = Vec::new();

        for (index, def) in defs.iter().enumerate() {
            if def.ability.is_empty() {
                errors.push(PartError::EmptyAbilityName { index });
                continue;
            }
            if by_ability.contains_key(&def.ability) {
                errors.push(PartError::DuplicateAbility(def.ability.clone()));
                continue;
            }

            let mut seen: Vec<&str> = Vec::new();
            let mut entities = Vec::new();
            for (part_index, part) in def.parts.iter().enumerate() {
                if part.is_empty() {
                    errors.push(PartError::EmptyPartName {
                        ability: def.ability.clone(),
                        index: part_index,
                    });
                } else if seen.contains(&part.as_str()) {
                    errors.push(PartError::DuplicatePart {
                        ability: def.ability.clone(),
                        part: part.clone(),
                    });
                } else if let Some(entity) = available.get(part) {
                    seen.push(part);
                    entities.push(*entity);
                } else {
                    errors.push(PartError::MissingPart {
                        ability: def.ability.clone(),
                        part: part.clone(),
                    });
                }
            }

            if !entities.is_empty() {
                by_ability.insert(def.ability.clone(), entities);
            }
        }

        (Self { by_ability }, errors)
    }

    pub fn parts_for(&self, ability: &str) -> Option<&[Entity]> {
        self.by_ability.get(ability).map(Vec::as_slice)
    }

    pub fn abilities(&self) -> impl Iterator<Item = &str> {
        self.by_ability.keys().map(String::as_str)
    }
}
