//! Abilities domain: the enabled/disabled ability roster.

use std::collections::BTreeMap;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    Dash,
    Shield,
    Punch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    EmptyName,
    Duplicate(String),
    Unknown(String),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::EmptyName => write!(f, "ability name is empty"),
            RosterError::Duplicate(name) => {
                write!(f, "two abilities share the name '{}'", name)
            }
            RosterError::Unknown(name) => write!(f, "no ability named '{}'", name),
        }
    }
}

impl std::error::Error for RosterError {}

/// Result of an enable/disable request on a registered ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterChange {
    Moved(AbilityKind),
    /// Already in the requested set; nothing moved.
    Unchanged(AbilityKind),
}

/// Every registered ability sits in exactly one of the two sets.
#[derive(Debug, Clone, Default)]
pub struct AbilityRoster {
    enabled: BTreeMap<String, AbilityKind>,
    disabled: BTreeMap<String, AbilityKind>,
}

impl AbilityRoster {
    /// New abilities start disabled.
    pub fn register(&mut self, name: &str, kind: AbilityKind) -> Result<(), RosterError> {
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }
        if self.contains(name) {
            return Err(RosterError::Duplicate(name.to_string()));
        }
        self.disabled.insert(name.to_string(), kind);
        Ok(())
    }

    pub fn enable(&mut self, name: &str) -> Result<RosterChange, RosterError> {
        if let Some(kind) = self.enabled.get(name) {
            warn!("Ability '{}' is already enabled", name);
            return Ok(RosterChange::Unchanged(*kind));
        }
        let (name, kind) = self
            .disabled
            .remove_entry(name)
            .ok_or_else(|| RosterError::Unknown(name.to_string()))?;
        self.enabled.insert(name, kind);
        Ok(RosterChange::Moved(kind))
    }

    pub fn disable(&mut self, name: &str) -> Result<RosterChange, RosterError> {
        if let Some(kind) = self.disabled.get(name) {
            warn!("Ability '{}' is already disabled", name);
            return Ok(RosterChange::Unchanged(*kind));
        }
        let (name, kind) = self
            .enabled
            .remove_entry(name)
            .ok_or_else(|| RosterError::Unknown(name.to_string()))?;
        self.disabled.insert(name, kind);
        Ok(RosterChange::Moved(kind))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.enabled.contains_key(name) || self.disabled.contains_key(name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains_key(name)
    }

    pub fn enabled_names(&self) -> Vec<String> {
        self.enabled.keys().cloned().collect()
    }

    pub fn disabled_names(&self) -> Vec<String> {
        self.disabled.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.enabled.len() + self.disabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
