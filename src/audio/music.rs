//! Audio domain: one music track at a time, with timed fades.
//!
//! [`MusicPlayer`] is plain state. Requests queue [`SinkAction`]s and
//! [`MusicPlayer::tick`] advances fades; a system drains the actions and
//! mirrors [`MusicPlayer::volume`] onto the playing sink every frame. A new
//! track waits for the current one to finish fading out.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::audio::synth::{Tone, Wave};

pub const LEVEL_TRACK: &str = "level";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicState {
    Stopped,
    FadeIn,
    Playing,
    FadeOut,
}

/// What the music system has to do to the sink entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkAction {
    /// Replace whatever plays with a loop of `track`.
    Start { track: String },
    Pause,
    Resume,
}

#[derive(Debug, Clone, PartialEq)]
struct TrackRequest {
    track: String,
    fade_in: f32,
}

#[derive(Debug, Clone, Copy, Default)]
struct Fade {
    elapsed: f32,
    duration: f32,
    from: f32,
}

/// Marks the entity playing the current track.
#[derive(Component, Debug)]
pub struct MusicVoice;

#[derive(Resource, Debug)]
pub struct MusicPlayer {
    tracks: HashMap<String, Handle<AudioSource>>,
    max_volume: f32,
    volume: f32,
    state: MusicState,
    fade: Fade,
    current: Option<String>,
    pending: Option<TrackRequest>,
    actions: Vec<SinkAction>,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self {
            tracks: HashMap::new(),
            max_volume: 0.5,
            volume: 0.0,
            state: MusicState::Stopped,
            fade: Fade::default(),
            current: None,
            pending: None,
            actions: Vec::new(),
        }
    }
}

impl MusicPlayer {
    /// Empty names and duplicates are refused.
    pub fn add_track(&mut self, name: &str, clip: Handle<AudioSource>) -> bool {
        if name.is_empty() {
            warn!("Music track without a name skipped");
            return false;
        }
        if self.tracks.contains_key(name) {
            warn!("Two music tracks are named '{}'; keeping the first", name);
            return false;
        }
        self.tracks.insert(name.to_string(), clip);
        true
    }

    pub fn clip(&self, name: &str) -> Option<Handle<AudioSource>> {
        self.tracks.get(name).cloned()
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn max_volume(&self) -> f32 {
        self.max_volume
    }

    pub fn current_track(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Takes effect now, and for whatever plays next.
    pub fn set_volume(&mut self, volume: f32) {
        self.max_volume = volume.clamp(0.0, 1.0);
        if self.max_volume == 0.0 {
            debug!("Music muted");
        }
        if self.state == MusicState::Playing {
            self.volume = self.max_volume;
        }
    }

    /// Loop `track`; keeps playing without a restart if it already is.
    pub fn play_looped(&mut self, track: &str, fade_in: f32, fade_out: f32) -> bool {
        if !self.knows(track) {
            return false;
        }
        if self.is_playing(track) {
            return true;
        }
        self.switch_to(track, fade_in, fade_out);
        true
    }

    /// Loop `track` from its beginning, even if it already plays.
    pub fn play_looped_from_start(&mut self, track: &str, fade_in: f32, fade_out: f32) -> bool {
        if !self.knows(track) {
            return false;
        }
        self.switch_to(track, fade_in, fade_out);
        true
    }

    /// Fade out whatever plays. The sink is paused, not dropped, so
    /// [`Self::resume`] picks up where it stopped.
    pub fn stop(&mut self, fade_out: f32) {
        match self.state {
            MusicState::Stopped | MusicState::FadeOut => {}
            MusicState::FadeIn | MusicState::Playing => {
                if fade_out <= 0.0 {
                    self.finish_fade_out();
                } else {
                    self.state = MusicState::FadeOut;
                    self.fade = Fade {
                        elapsed: 0.0,
                        duration: fade_out,
                        from: self.volume,
                    };
                }
            }
        }
    }

    /// Continue the stopped track. False if nothing is stopped or a new
    /// track is already queued.
    pub fn resume(&mut self, fade_in: f32) -> bool {
        if self.state != MusicState::Stopped || self.current.is_none() || self.pending.is_some() {
            return false;
        }
        self.actions.push(SinkAction::Resume);
        self.begin_fade_in(fade_in);
        true
    }

    pub fn tick(&mut self, dt: f32) {
        match self.state {
            MusicState::FadeIn => {
                self.fade.elapsed += dt;
                let progress = (self.fade.elapsed / self.fade.duration).min(1.0);
                self.volume = self.max_volume * progress;
                if progress >= 1.0 {
                    self.state = MusicState::Playing;
                }
            }
            MusicState::FadeOut => {
                self.fade.elapsed += dt;
                let left = (self.fade.duration - self.fade.elapsed).max(0.0);
                self.volume = self.fade.from * left / self.fade.duration;
                if left <= 0.0 {
                    self.finish_fade_out();
                }
            }
            MusicState::Stopped | MusicState::Playing => {}
        }
    }

    pub fn drain_actions(&mut self) -> Vec<SinkAction> {
        std::mem::take(&mut self.actions)
    }

    fn knows(&self, track: &str) -> bool {
        let known = self.tracks.contains_key(track);
        if !known {
            warn!("No music track named '{}'", track);
        }
        known
    }

    fn is_playing(&self, track: &str) -> bool {
        self.current.as_deref() == Some(track)
            && self.pending.is_none()
            && matches!(self.state, MusicState::FadeIn | MusicState::Playing)
    }

    fn switch_to(&mut self, track: &str, fade_in: f32, fade_out: f32) {
        self.pending = Some(TrackRequest {
            track: track.to_string(),
            fade_in,
        });
        self.stop(fade_out);
        if self.state == MusicState::Stopped {
            self.start_pending();
        }
    }

    fn finish_fade_out(&mut self) {
        self.state = MusicState::Stopped;
        self.volume = 0.0;
        if self.pending.is_some() {
            self.start_pending();
        } else if self.current.is_some() {
            self.actions.push(SinkAction::Pause);
        }
    }

    fn start_pending(&mut self) {
        let Some(request) = self.pending.take() else {
            return;
        };
        self.actions.push(SinkAction::Start {
            track: request.track.clone(),
        });
        self.current = Some(request.track);
        self.begin_fade_in(request.fade_in);
    }

    fn begin_fade_in(&mut self, fade_in: f32) {
        if fade_in <= 0.0 {
            self.state = MusicState::Playing;
            self.volume = self.max_volume;
        } else {
            self.state = MusicState::FadeIn;
            self.volume = 0.0;
            self.fade = Fade {
                elapsed: 0.0,
                duration: fade_in,
                from: 0.0,
            };
        }
    }
}

/// Fallback level loop: a square-wave arpeggio over a triangle bass.
pub fn level_track_tones() -> Vec<Tone> {
    const STEP: f32 = 0.18;
    let roots = [220.0, 174.6, 130.8, 196.0];

    let mut tones = Vec::new();
    for root in roots {
        for ratio in [1.0, 1.25, 1.5, 2.0] {
            tones.push(Tone::note(Wave::Square, root * ratio, STEP, 0.12));
        }
        tones.push(Tone::note(Wave::Triangle, root * 0.5, STEP * 2.0, 0.3));
    }
    tones
}
