//! Audio domain: sound effects behind an injected service, and faded music.

mod events;
mod music;
mod service;
mod synth;
mod systems;


pub use events::{PlaySfx, StopSfx};
pub use music::{level_track_tones, MusicPlayer, MusicVoice, SinkAction, LEVEL_TRACK};
pub use service::{SfxKind, SfxService, SfxVoice};

use bevy::prelude::*;

use crate::audio::systems::{
    audio_hotkeys, drive_music, load_audio, pause_music, play_requested_sfx,
    prune_finished_voices, restart_music_on_death, resume_music, sfx_on_gameplay_events,
    sfx_on_state_entry, shield_hum, start_level_music, stop_requested_sfx,
};
use crate::core::GameState;

pub struct SfxPlugin;

impl Plugin for SfxPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SfxService>()
            .init_resource::<MusicPlayer>()
            .add_message::<PlaySfx>()
            .add_message::<StopSfx>()
            .add_systems(Startup, load_audio)
            .add_systems(OnExit(GameState::Boot), start_level_music)
            .add_systems(OnEnter(GameState::Paused), pause_music)
            .add_systems(OnExit(GameState::Paused), resume_music)
            .add_systems(Update, (audio_hotkeys, restart_music_on_death, drive_music).chain())
            .add_systems(
                PostUpdate,
                (
                    sfx_on_state_entry,
                    sfx_on_gameplay_events,
                    shield_hum,
                    prune_finished_voices,
                    stop_requested_sfx,
                    play_requested_sfx,
                )
                    .chain(),
            );
    }
}
