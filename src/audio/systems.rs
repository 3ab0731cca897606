//! Audio domain: loading clips and turning gameplay into sound.

use std::collections::HashMap;
use std::path::Path;

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::abilities::{AbilityChanged, AbilitySet};
use crate::animation::{AnimationDriver, AnimationState};
use crate::audio::synth::{render, wav_bytes, Tone};
use crate::audio::{
    level_track_tones, MusicPlayer, MusicVoice, PlaySfx, SfxKind, SfxService, SfxVoice, SinkAction,
    StopSfx, LEVEL_TRACK,
};
use crate::combat::{PlayerHit, PlayerKilled};
use crate::save::CheckpointReached;

const SFX_DIR: &str = "audio/sfx";
const MUSIC_DIR: &str = "audio/music";
const MUSIC_FADE_IN: f32 = 1.0;
const MUSIC_FADE_OUT: f32 = 0.5;
const VOLUME_STEP: f32 = 0.1;

/// A shipped file under `assets/<path>` wins; otherwise the tones are
/// rendered into an in-memory clip.
fn clip_or_synth(
    asset_server: &AssetServer,
    sources: &mut Assets<AudioSource>,
    path: &str,
    tones: &[Tone],
    decay: bool,
) -> Handle<AudioSource> {
    if Path::new("assets").join(path).exists() {
        return asset_server.load(path.to_string());
    }
    debug!("No clip at {}; synthesizing", path);
    let bytes = wav_bytes(&render(tones, decay));
    sources.add(AudioSource {
        bytes: bytes.into(),
    })
}

pub(crate) fn load_audio(
    asset_server: Res<AssetServer>,
    mut sources: ResMut<Assets<AudioSource>>,
    mut sfx: ResMut<SfxService>,
    mut music: ResMut<MusicPlayer>,
) {
    for kind in SfxKind::ALL {
        let path = format!("{}/{}", SFX_DIR, kind.file_name());
        let clip = clip_or_synth(&asset_server, &mut sources, &path, kind.tones(), true);
        sfx.insert_clip(kind, clip);
    }

    let path = format!("{}/{}.ogg", MUSIC_DIR, LEVEL_TRACK);
    let clip = clip_or_synth(&asset_server, &mut sources, &path, &level_track_tones(), false);
    music.add_track(LEVEL_TRACK, clip);

    info!("Audio loaded: {} sound effects, music '{}'", SfxKind::ALL.len(), LEVEL_TRACK);
}

/// M mutes effects; minus and equals step effect and music volume together.
pub(crate) fn audio_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sfx: ResMut<SfxService>,
    mut music: ResMut<MusicPlayer>,
) {
    if keyboard.just_pressed(KeyCode::KeyM) {
        let muted = !sfx.is_muted();
        sfx.set_muted(muted);
        info!("Sound effects {}", if muted { "muted" } else { "unmuted" });
    }

    let step = if keyboard.just_pressed(KeyCode::Equal) {
        VOLUME_STEP
    } else if keyboard.just_pressed(KeyCode::Minus) {
        -VOLUME_STEP
    } else {
        return;
    };
    let volume = sfx.master_volume() + step;
    sfx.set_master_volume(volume);
    let volume = music.max_volume() + step;
    music.set_volume(volume);
    debug!(
        "Volume: effects {:.1}, music {:.1}",
        sfx.master_volume(),
        music.max_volume()
    );
}

pub(crate) fn start_level_music(mut music: ResMut<MusicPlayer>) {
    music.play_looped(LEVEL_TRACK, MUSIC_FADE_IN, MUSIC_FADE_OUT);
}

pub(crate) fn pause_music(mut music: ResMut<MusicPlayer>) {
    debug!("Pausing music from {:?}", music.state());
    music.stop(MUSIC_FADE_OUT);
}

pub(crate) fn resume_music(mut music: ResMut<MusicPlayer>) {
    if !music.resume(MUSIC_FADE_IN) {
        music.play_looped(LEVEL_TRACK, MUSIC_FADE_IN, MUSIC_FADE_OUT);
    }
}

/// A death restarts the level loop from its beginning.
pub(crate) fn restart_music_on_death(
    mut deaths: MessageReader<PlayerKilled>,
    mut music: ResMut<MusicPlayer>,
) {
    if deaths.read().count() > 0 {
        music.play_looped_from_start(LEVEL_TRACK, MUSIC_FADE_IN, MUSIC_FADE_OUT);
    }
}

/// Advance fades and apply the player's queued sink changes.
pub(crate) fn drive_music(
    time: Res<Time<Real>>,
    mut commands: Commands,
    mut music: ResMut<MusicPlayer>,
    mut sinks: Query<&mut AudioSink, With<MusicVoice>>,
    voices: Query<Entity, With<MusicVoice>>,
) {
    music.tick(time.delta_secs());

    for action in music.drain_actions() {
        match action {
            SinkAction::Start { track } => {
                for voice in &voices {
                    commands.entity(voice).despawn();
                }
                let Some(clip) = music.clip(&track) else {
                    warn!("Music track '{}' has no clip", track);
                    continue;
                };
                commands.spawn((
                    Name::new("Music"),
                    AudioPlayer::new(clip),
                    PlaybackSettings::LOOP.with_volume(Volume::Linear(music.volume())),
                    MusicVoice,
                ));
                debug!("Music started: {:?}", music.current_track());
            }
            SinkAction::Pause => {
                for sink in &sinks {
                    sink.pause();
                }
            }
            SinkAction::Resume => {
                for sink in &sinks {
                    sink.play();
                }
            }
        }
    }

    for mut sink in &mut sinks {
        sink.set_volume(Volume::Linear(music.volume()));
    }
}

/// The shield hum lasts while the shield is up and is cut when it drops.
pub(crate) fn shield_hum(
    mut commands: Commands,
    mut sfx: ResMut<SfxService>,
    mut stop: MessageWriter<StopSfx>,
    players: Query<(Entity, &AbilitySet)>,
    mut hums: Local<HashMap<Entity, Entity>>,
) {
    for (player, set) in &players {
        match (set.shield.is_on(), hums.get(&player).copied()) {
            (true, None) => {
                if let Some(voice) = sfx.play(&mut commands, SfxKind::ShieldOn) {
                    hums.insert(player, voice);
                }
            }
            (false, Some(voice)) => {
                hums.remove(&player);
                // The hum may already have run out on its own.
                if sfx.owns(voice) {
                    stop.write(StopSfx { voice });
                }
            }
            _ => {}
        }
    }
}

pub(crate) fn prune_finished_voices(
    mut sfx: ResMut<SfxService>,
    voices: Query<(), With<SfxVoice>>,
) {
    let before = sfx.voice_count();
    sfx.prune(|voice| voices.contains(voice));
    if sfx.voice_count() != before {
        trace!("Sound voices: {} -> {}", before, sfx.voice_count());
    }
}

pub(crate) fn stop_requested_sfx(
    mut commands: Commands,
    mut requests: MessageReader<StopSfx>,
    mut sfx: ResMut<SfxService>,
) {
    for request in requests.read() {
        sfx.stop(&mut commands, request.voice);
    }
}

pub(crate) fn play_requested_sfx(
    mut commands: Commands,
    mut requests: MessageReader<PlaySfx>,
    mut sfx: ResMut<SfxService>,
) {
    for request in requests.read() {
        sfx.play(&mut commands, request.kind);
    }
}

/// Sounds for entering animation states that stand for an action.
pub(crate) fn sfx_on_state_entry(
    drivers: Query<(Entity, &AnimationDriver)>,
    mut last: Local<HashMap<Entity, AnimationState>>,
    mut play: MessageWriter<PlaySfx>,
) {
    for (entity, driver) in &drivers {
        let state = driver.state();
        if last.insert(entity, state) == Some(state) {
            continue;
        }

        let kind = match state {
            AnimationState::Jump => SfxKind::Jump,
            AnimationState::Dash => SfxKind::Dash,
            AnimationState::Punch => SfxKind::Punch,
            AnimationState::Idle
            | AnimationState::Run
            | AnimationState::JumpRecovery
            | AnimationState::Shield => continue,
        };
        play.write(PlaySfx { kind });
    }
}

pub(crate) fn sfx_on_gameplay_events(
    mut abilities: MessageReader<AbilityChanged>,
    mut hits: MessageReader<PlayerHit>,
    mut deaths: MessageReader<PlayerKilled>,
    mut checkpoints: MessageReader<CheckpointReached>,
    mut play: MessageWriter<PlaySfx>,
) {
    for change in abilities.read() {
        if change.enabled {
            play.write(PlaySfx {
                kind: SfxKind::Unlock,
            });
        }
    }
    for _ in hits.read() {
        play.write(PlaySfx { kind: SfxKind::Hit });
    }
    for _ in deaths.read() {
        play.write(PlaySfx {
            kind: SfxKind::Death,
        });
    }
    for _ in checkpoints.read() {
        play.write(PlaySfx {
            kind: SfxKind::Checkpoint,
        });
    }
}
