//! Audio domain: the sound effect service.

use std::collections::{HashMap, HashSet};

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::audio::synth::{Tone, Wave};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SfxKind {
    Jump,
    Dash,
    ShieldOn,
    Punch,
    /// Ability unlocked through a trigger
    Unlock,
    /// Player took damage
    Hit,
    Death,
    Checkpoint,
    /// Turret fired
    Shot,
}

impl SfxKind {
    pub const ALL: [SfxKind; 9] = [
        SfxKind::Jump,
        SfxKind::Dash,
        SfxKind::ShieldOn,
        SfxKind::Punch,
        SfxKind::Unlock,
        SfxKind::Hit,
        SfxKind::Death,
        SfxKind::Checkpoint,
        SfxKind::Shot,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SfxKind::Jump => "jump.ogg",
            SfxKind::Dash => "dash.ogg",
            SfxKind::ShieldOn => "shield_on.ogg",
            SfxKind::Punch => "punch.ogg",
            SfxKind::Unlock => "unlock.ogg",
            SfxKind::Hit => "hit.ogg",
            SfxKind::Death => "death.ogg",
            SfxKind::Checkpoint => "checkpoint.ogg",
            SfxKind::Shot => "shot.ogg",
        }
    }

    /// Fallback clip when no file ships for this kind.
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SfxKind::Jump => JUMP_TONES,
            SfxKind::Dash => DASH_TONES,
            SfxKind::ShieldOn => SHIELD_TONES,
            SfxKind::Punch => PUNCH_TONES,
            SfxKind::Unlock => UNLOCK_TONES,
            SfxKind::Hit => HIT_TONES,
            SfxKind::Death => DEATH_TONES,
            SfxKind::Checkpoint => CHECKPOINT_TONES,
            SfxKind::Shot => SHOT_TONES,
        }
    }
}

const JUMP_TONES: &[Tone] = &[Tone::new(Wave::Square, 220.0, 440.0, 0.12, 0.3)];
const DASH_TONES: &[Tone] = &[Tone::new(Wave::Noise, 0.0, 0.0, 0.18, 0.35)];
// Long enough to outlast the shield; cut when it drops.
const SHIELD_TONES: &[Tone] = &[Tone::new(Wave::Triangle, 180.0, 200.0, 1.2, 0.25)];
const PUNCH_TONES: &[Tone] = &[Tone::new(Wave::Sine, 150.0, 60.0, 0.1, 0.6)];
const UNLOCK_TONES: &[Tone] = &[
    Tone::note(Wave::Triangle, 523.0, 0.08, 0.4),
    Tone::note(Wave::Triangle, 659.0, 0.08, 0.4),
    Tone::note(Wave::Triangle, 784.0, 0.16, 0.4),
];
const HIT_TONES: &[Tone] = &[Tone::new(Wave::Square, 300.0, 120.0, 0.15, 0.35)];
const DEATH_TONES: &[Tone] = &[Tone::new(Wave::Square, 400.0, 80.0, 0.6, 0.35)];
const CHECKPOINT_TONES: &[Tone] = &[
    Tone::note(Wave::Sine, 660.0, 0.1, 0.4),
    Tone::note(Wave::Sine, 880.0, 0.2, 0.4),
];
const SHOT_TONES: &[Tone] = &[Tone::new(Wave::Noise, 0.0, 0.0, 0.08, 0.25)];

/// A one-shot sound spawned by the service.
#[derive(Component, Debug)]
pub struct SfxVoice {
    pub kind: SfxKind,
}

/// Plays sound effects for whoever holds it as a resource. Kinds without a
/// clip are silent.
#[derive(Resource, Debug)]
pub struct SfxService {
    clips: HashMap<SfxKind, Handle<AudioSource>>,
    voices: HashSet<Entity>,
    master_volume: f32,
    muted: bool,
}

impl Default for SfxService {
    fn default() -> Self {
        Self {
            clips: HashMap::new(),
            voices: HashSet::new(),
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl SfxService {
    pub fn insert_clip(&mut self, kind: SfxKind, clip: Handle<AudioSource>) {
        self.clips.insert(kind, clip);
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn owns(&self, voice: Entity) -> bool {
        self.voices.contains(&voice)
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Spawn a voice that despawns itself when the clip ends.
    pub fn play(&mut self, commands: &mut Commands, kind: SfxKind) -> Option<Entity> {
        if self.muted {
            return None;
        }
        let clip = self.clips.get(&kind)?.clone();

        let voice = commands
            .spawn((
                AudioPlayer::new(clip),
                PlaybackSettings::DESPAWN.with_volume(Volume::Linear(self.master_volume)),
                SfxVoice { kind },
            ))
            .id();
        self.voices.insert(voice);
        Some(voice)
    }

    /// Stopping a voice the service didn't spawn is a no-op.
    pub fn stop(&mut self, commands: &mut Commands, voice: Entity) -> bool {
        if !self.voices.remove(&voice) {
            warn!("Asked to stop sound {:?}, which the sfx service doesn't own", voice);
            return false;
        }
        commands.entity(voice).despawn();
        true
    }

    /// Forget voices that finished on their own.
    pub fn prune(&mut self, alive: impl Fn(Entity) -> bool) {
        self.voices.retain(|voice| alive(*voice));
    }
}
