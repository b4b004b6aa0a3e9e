//! Audio cues for game events
//!
//! The engine never plays sound itself: it queues `GameEvent`s, and the
//! driver hands them to an `AudioManager`, which picks the cue and forwards
//! it to whatever backend actually makes noise.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Ball released
    Throw,
    /// Ball went through the hoop
    Score,
    /// Round over, target reached
    Win,
    /// Round over, target missed
    Lose,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Throw => "throw",
            SoundEffect::Score => "score",
            SoundEffect::Win => "win",
            SoundEffect::Lose => "lose",
        }
    }

    /// Cue for an engine event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Thrown { .. } => Some(SoundEffect::Throw),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::GameOver { win: true, .. } => Some(SoundEffect::Win),
            GameEvent::GameOver { win: false, .. } => Some(SoundEffect::Lose),
            GameEvent::Spawned { .. } | GameEvent::Grabbed { .. } => None,
        }
    }
}

/// Something that can play a cue; fire-and-forget
pub trait SoundBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Backend that only writes cues to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl SoundBackend for LogBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::info!("♪ {} (volume {:.2})", effect.as_str(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<B: SoundBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// The throw cue is optional (off unless enabled)
    throw_enabled: bool,
}

impl<B: SoundBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            throw_enabled: false,
        }
    }

    /// Manager configured from player settings
    pub fn from_settings(backend: B, settings: &Settings) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio.set_throw_enabled(settings.throw_sound);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn set_throw_enabled(&mut self, enabled: bool) {
        self.throw_enabled = enabled;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if effect == SoundEffect::Throw && !self.throw_enabled {
            return;
        }
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Play the cues for a batch of drained engine events
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
