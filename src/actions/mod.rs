//! Actions domain: action gate wiring and public exports.

mod gate;


pub use gate::{ActionGate, ActionKind, ActionRules, LATCH_FRAMES};

use bevy::prelude::*;

pub struct ActionsPlugin;

impl Plugin for ActionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Last, age_action_latches);
    }
}

/// Frame boundary: ages every dominating-action latch by one frame.
fn age_action_latches(mut gates: Query<&mut ActionGate>) {
    for mut gate in &mut gates {
        if gate.is_latched() {
            gate.end_frame();
        }
    }
}
