//! Core domain: boot flow, pausing and the camera.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::resources::CameraFollow;
use crate::core::state::GameState;
use crate::movement::Player;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Content is loaded on entering Boot, so the first update can start the run.
pub(crate) fn finish_boot(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Run);
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    if let Some(next) = state.get().toggled_pause() {
        info!("Game state: {:?} -> {:?}", state.get(), next);
        next_state.set(next);
    }
}

pub(crate) fn pause_physics(mut time: ResMut<Time<Physics>>) {
    time.pause();
}

pub(crate) fn resume_physics(mut time: ResMut<Time<Physics>>) {
    time.unpause();
}

pub(crate) fn camera_follow_player(
    time: Res<Time>,
    follow: Res<CameraFollow>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let next = follow.step(
        camera_transform.translation.truncate(),
        player_transform.translation.truncate(),
        time.delta_secs(),
    );
    camera_transform.translation = next.extend(camera_transform.translation.z);
}
