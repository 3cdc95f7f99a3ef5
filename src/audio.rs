//! Audio manager
//!
//! Turns simulation events into sound cues and hands them to a backend.
//! The simulation never talks to audio directly: the caller drains
//! [`GameEvent`]s after each tick and feeds them through [`AudioManager::handle_event`].

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Relaxed loop for the menu
    Menu,
    /// Upbeat loop while flying
    Gameplay,
}

/// Sound cues a backend must be able to play
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCue {
    /// Start a looping music track at `volume`
    PlayMusic { track: MusicTrack, volume: f32 },
    /// Fade the current music out over `millis`
    FadeOutMusic { millis: u32 },
    /// Start the looping wing-flap sound
    StartFlying { volume: f32 },
    /// Stop the wing-flap loop
    StopFlying,
    /// One-shot impact sound
    Hit { volume: f32 },
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, cue: AudioCue);
}

/// Backend that only logs cues (headless runs and tests)
#[derive(Debug, Default)]
pub struct LogBackend {
    /// Every cue received, oldest first
    pub played: Vec<AudioCue>,
}

impl AudioBackend for LogBackend {
    fn play(&mut self, cue: AudioCue) {
        log::debug!("audio: {:?}", cue);
        self.played.push(cue);
    }
}

/// Fade applied to gameplay music when the chicken gets hit
const HIT_FADE_MILLIS: u32 = 500;

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.4,
            muted: false,
        }
    }

    /// Build a manager with volumes from settings
    pub fn with_settings(backend: B, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn effective_sfx(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_music(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// React to one simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        let cue = match event {
            GameEvent::EnteredMenu => AudioCue::PlayMusic {
                track: MusicTrack::Menu,
                volume: self.effective_music(),
            },
            GameEvent::EnteredActivePlay => AudioCue::PlayMusic {
                track: MusicTrack::Gameplay,
                volume: self.effective_music(),
            },
            GameEvent::LiftSoundStarted => AudioCue::StartFlying {
                volume: self.effective_sfx(),
            },
            GameEvent::LiftSoundStopped => AudioCue::StopFlying,
            GameEvent::Impact => {
                self.backend.play(AudioCue::Hit {
                    volume: self.effective_sfx(),
                });
                AudioCue::FadeOutMusic {
                    millis: HIT_FADE_MILLIS,
                }
            }
            GameEvent::EnteredScoreRecording { .. }
            | GameEvent::ObstacleRetired { .. }
            | GameEvent::ViewportRescaled { .. }
            | GameEvent::Quit => return,
        };
        self.backend.play(cue);
    }

    /// React to a batch of events in order
    pub fn handle_events<'a>(&mut self, events: impl IntoIterator<Item = &'a GameEvent>) {
        for event in events {
            self.handle_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impact_plays_hit_and_fades_music() {
        let mut audio = AudioManager::new(LogBackend::default());
        audio.handle_events(&[GameEvent::LiftSoundStopped, GameEvent::Impact]);
        assert_eq!(
            audio.backend().played,
            vec![
                AudioCue::StopFlying,
                AudioCue::Hit { volume: 0.8 },
                AudioCue::FadeOutMusic { millis: 500 },
            ]
        );
    }

    #[test]
    fn test_mode_changes_switch_music() {
        let mut audio = AudioManager::new(LogBackend::default());
        audio.set_master_volume(1.0);
        audio.set_music_volume(0.5);
        audio.handle_event(&GameEvent::EnteredActivePlay);
        audio.handle_event(&GameEvent::EnteredMenu);
        assert_eq!(
            audio.backend().played,
            vec![
                AudioCue::PlayMusic {
                    track: MusicTrack::Gameplay,
                    volume: 0.5
                },
                AudioCue::PlayMusic {
                    track: MusicTrack::Menu,
                    volume: 0.5
                },
            ]
        );
    }

    #[test]
    fn test_muted_plays_silently() {
        let mut audio = AudioManager::new(LogBackend::default());
        audio.set_muted(true);
        audio.handle_event(&GameEvent::LiftSoundStarted);
        assert_eq!(audio.backend().played, vec![AudioCue::StartFlying { volume: 0.0 }]);
    }

    #[test]
    fn test_silent_events_are_ignored() {
        let mut audio = AudioManager::new(LogBackend::default());
        audio.handle_events(&[
            GameEvent::ObstacleRetired { score: 1 },
            GameEvent::EnteredScoreRecording { score: 1 },
            GameEvent::Quit,
        ]);
        assert!(audio.backend().played.is_empty());
    }

    #[test]
    fn test_volumes_are_clamped() {
        let mut audio = AudioManager::new(LogBackend::default());
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(-1.0);
        audio.handle_event(&GameEvent::LiftSoundStarted);
        assert_eq!(audio.backend().played, vec![AudioCue::StartFlying { volume: 0.0 }]);
    }
}
