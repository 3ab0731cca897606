mod abilities;
mod actions;
mod animation;
mod audio;
mod combat;
mod content;
mod core;
mod movement;
mod save;
mod world;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cyborg".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            actions::ActionsPlugin,
            animation::AnimationPlugin,
            movement::MovementPlugin,
            abilities::AbilitiesPlugin,
            combat::CombatPlugin,
            save::SavePlugin,
            audio::SfxPlugin,
            world::WorldPlugin,
        ))
        .run();
}
