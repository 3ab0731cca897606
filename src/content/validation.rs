//! Validation for the player definition.

use std::collections::HashSet;

use super::data::PlayerDef;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for pushing an error with context
macro_rules! invalid {
    ($errors:expr, $source_type:expr, $source_id:expr, $field:expr, $($msg:tt)+) => {
        $errors.push(ValidationError {
            source_type: $source_type,
            source_id: $source_id.to_string(),
            field: $field,
            message: format!($($msg)+),
        })
    };
}

fn check_duration(
    errors: &mut Vec<ValidationError>,
    source: &str,
    field: &'static str,
    value: f32,
) {
    if value < 0.0 {
        invalid!(errors, "Ability", source, field, "negative duration {}", value);
    }
}

fn check_factor(
    errors: &mut Vec<ValidationError>,
    source_type: &'static str,
    source: &str,
    field: &'static str,
    value: f32,
) {
    if !(value > 0.0 && value <= 1.0) {
        invalid!(errors, source_type, source, field, "factor {} outside (0, 1]", value);
    }
}

/// Validate the player definition.
/// Returns a list of validation errors, empty if the content is usable as is.
pub fn validate_player_content(player: &PlayerDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Ability names
    let mut names = HashSet::new();
    for name in player.abilities.names() {
        if name.is_empty() {
            invalid!(errors, "Ability", "", "name", "empty ability name");
        } else if !names.insert(name) {
            invalid!(errors, "Ability", name, "name", "duplicate ability name");
        }
    }

    // Ability timings
    let dash = &player.abilities.dash;
    check_duration(&mut errors, &dash.name, "dash_time", dash.dash_time);
    check_duration(&mut errors, &dash.name, "cooldown", dash.cooldown);

    let shield = &player.abilities.shield;
    check_duration(&mut errors, &shield.name, "duration", shield.duration);
    check_duration(&mut errors, &shield.name, "cooldown", shield.cooldown);
    check_duration(&mut errors, &shield.name, "forgiveness_time", shield.forgiveness_time);
    check_factor(&mut errors, "Ability", &shield.name, "movement_factor", shield.movement_factor);
    check_factor(&mut errors, "Ability", &shield.name, "jump_factor", shield.jump_factor);
    if shield.strength <= 0 {
        invalid!(
            errors,
            "Ability",
            shield.name,
            "strength",
            "non-positive strength {}",
            shield.strength
        );
    }

    let punch = &player.abilities.punch;
    check_duration(&mut errors, &punch.name, "cooldown", punch.cooldown);

    // Parts
    let mut part_abilities = HashSet::new();
    for def in &player.parts {
        if !names.contains(def.ability.as_str()) {
            invalid!(errors, "Parts", def.ability, "ability", "unknown ability");
        }
        if !part_abilities.insert(def.ability.as_str()) {
            invalid!(errors, "Parts", def.ability, "ability", "listed twice");
        }

        let mut seen = HashSet::new();
        for (index, part) in def.parts.iter().enumerate() {
            if part.is_empty() {
                invalid!(errors, "Parts", def.ability, "parts", "empty part name at {}", index);
            } else if !seen.insert(part.as_str()) {
                invalid!(errors, "Parts", def.ability, "parts", "part '{}' listed twice", part);
            }
        }
    }

    // Movement
    let movement = &player.movement;
    if movement.mass <= 0.0 {
        invalid!(errors, "Movement", "player", "mass", "non-positive mass {}", movement.mass);
    }
    check_factor(&mut errors, "Movement", "player", "air_speed_factor", movement.air_speed_factor);
    for (field, value) in [
        ("ground_to_air_forgive_time", movement.ground_to_air_forgive_time),
        ("jump_cooldown", movement.jump_cooldown),
        ("jump_boost_time", movement.jump_boost_time),
        ("air_no_landing_time", movement.air_no_landing_time),
    ] {
        if value < 0.0 {
            invalid!(errors, "Movement", "player", field, "negative duration {}", value);
        }
    }

    // Animation clips
    let clips = &player.animation;
    for (field, value) in [
        ("dash", clips.dash),
        ("punch", clips.punch),
        ("jump_recovery", clips.jump_recovery),
    ] {
        if value < 0.0 {
            invalid!(errors, "Animation", "player", field, "negative duration {}", value);
        }
    }

    if player.health <= 0 {
        invalid!(errors, "Player", "player", "health", "non-positive health {}", player.health);
    }

    errors
}
