//! Abilities domain: the player's abilities behind one roster.

use bevy::prelude::*;

use crate::abilities::{
    AbilityKind, AbilityRoster, Dash, DashConfig, PartsVisibility, Punch, PunchConfig,
    RosterChange, RosterError, Shield, ShieldConfig,
};

/// What an enable/disable request actually changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityChange {
    pub name: String,
    pub kind: AbilityKind,
    pub enabled: bool,
    /// Part visibility the ability wants after the change, if any.
    pub parts: Option<PartsVisibility>,
}

#[derive(Component, Debug, Clone)]
pub struct AbilitySet {
    roster: AbilityRoster,
    pub dash: Dash,
    pub shield: Shield,
    pub punch: Punch,
}

impl AbilitySet {
    /// Registers all three abilities, disabled. Registration errors (empty or
    /// shared names) are returned; the offending ability stays unreachable.
    pub fn new(
        dash: DashConfig,
        shield: ShieldConfig,
        punch: PunchConfig,
    ) -> (Self, Vec<RosterError>) {
        let mut roster = AbilityRoster::default();
        let errors: Vec<RosterError> = [
            (dash.name.as_str(), AbilityKind::Dash),
            (shield.name.as_str(), AbilityKind::Shield),
            (punch.name.as_str(), AbilityKind::Punch),
        ]
        .into_iter()
        .filter_map(|(name, kind)| roster.register(name, kind).err())
        .collect();
        if roster.is_empty() {
            warn!("No ability could be registered");
        }

        let set = Self {
            roster,
            dash: Dash::new(dash),
            shield: Shield::new(shield),
            punch: Punch::new(punch),
        };
        (set, errors)
    }

    pub fn roster(&self) -> &AbilityRoster {
        &self.roster
    }

    pub fn enabled_names(&self) -> Vec<String> {
        self.roster.enabled_names()
    }

    /// `Ok(None)` if the ability was already enabled.
    pub fn enable(&mut self, name: &str) -> Result<Option<AbilityChange>, RosterError> {
        let kind = match self.roster.enable(name)? {
            RosterChange::Moved(kind) => kind,
            RosterChange::Unchanged(_) => return Ok(None),
        };

        let parts = match kind {
            AbilityKind::Dash => {
                self.dash.grant();
                Some(PartsVisibility::Shown)
            }
            AbilityKind::Shield => {
                self.shield.grant();
                None
            }
            AbilityKind::Punch => {
                self.punch.grant();
                Some(PartsVisibility::Shown)
            }
        };

        Ok(Some(AbilityChange {
            name: name.to_string(),
            kind,
            enabled: true,
            parts,
        }))
    }

    /// `Ok(None)` if the ability was already disabled. Disabling always
    /// releases the ability's parts.
    pub fn disable(&mut self, name: &str) -> Result<Option<AbilityChange>, RosterError> {
        let kind = match self.roster.disable(name)? {
            RosterChange::Moved(kind) => kind,
            RosterChange::Unchanged(_) => return Ok(None),
        };

        match kind {
            AbilityKind::Dash => self.dash.revoke(),
            AbilityKind::Shield => self.shield.revoke(),
            AbilityKind::Punch => self.punch.revoke(),
        }

        Ok(Some(AbilityChange {
            name: name.to_string(),
            kind,
            enabled: false,
            parts: Some(PartsVisibility::Hidden),
        }))
    }

    /// Make the enabled set exactly `names`. Unknown names are returned as
    /// errors and skipped.
    pub fn restore(&mut self, names: &[String]) -> (Vec<AbilityChange>, Vec<RosterError>) {
        let mut changes = Vec::new();
        let mut errors = Vec::new();

        for current in self.roster.enabled_names() {
            if !names.contains(&current) {
                match self.disable(&current) {
                    Ok(change) => changes.extend(change),
                    Err(err) => errors.push(err),
                }
            }
        }
        for name in names {
            if self.roster.is_enabled(name) {
                continue;
            }
            match self.enable(name) {
                Ok(change) => changes.extend(change),
                Err(err) => errors.push(err),
            }
        }

        (changes, errors)
    }
}
