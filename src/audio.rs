//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Each effect is a single oscillator voice described by [`Voice`]; the web
//! backend turns voices into Web Audio nodes. Off the web the manager is
//! silent.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fires
    Shoot,
    /// Player leaves the ground
    Jump,
    /// A shot connects (either side)
    EnemyHit,
    /// Weapon pickup collected
    PowerUp,
    /// Something blew up
    Explosion,
    /// Turret or boss fires
    TurretShoot,
    /// Extra life collected
    LifeUp,
    /// Boss defeated or campaign won
    LevelClear,
    /// Out of lives
    GameOver,
}

impl SoundEffect {
    /// The cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::PlayerShot => Some(SoundEffect::Shoot),
            GameEvent::PlayerJumped => Some(SoundEffect::Jump),
            GameEvent::EnemyShot => Some(SoundEffect::TurretShoot),
            GameEvent::EnemyHit | GameEvent::PlayerHit => Some(SoundEffect::EnemyHit),
            GameEvent::Explosion => Some(SoundEffect::Explosion),
            GameEvent::PowerUpCollected => Some(SoundEffect::PowerUp),
            GameEvent::LifeUp => Some(SoundEffect::LifeUp),
            GameEvent::BossDefeated | GameEvent::Victory => Some(SoundEffect::LevelClear),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::BossSpawned | GameEvent::LevelStarted { .. } | GameEvent::Restarted => None,
        }
    }

    /// Synthesis parameters
    pub fn voice(self) -> Voice {
        match self {
            // Retro "pew": square wave dropping in pitch
            SoundEffect::Shoot => Voice {
                wave: Wave::Square,
                pitch: Pitch::Exponential(880.0, 110.0),
                gain: 0.1,
                fade: Fade::Exponential,
                duration: 0.1,
            },
            SoundEffect::Jump => Voice {
                wave: Wave::Square,
                pitch: Pitch::Linear(150.0, 300.0),
                gain: 0.1,
                fade: Fade::Linear,
                duration: 0.1,
            },
            SoundEffect::EnemyHit => Voice {
                wave: Wave::Sawtooth,
                pitch: Pitch::Exponential(100.0, 0.01),
                gain: 0.1,
                fade: Fade::Exponential,
                duration: 0.1,
            },
            // A major arpeggio
            SoundEffect::PowerUp => Voice {
                wave: Wave::Sine,
                pitch: Pitch::Steps(&[(0.0, 440.0), (0.1, 554.0), (0.2, 659.0), (0.3, 880.0)]),
                gain: 0.1,
                fade: Fade::Linear,
                duration: 0.4,
            },
            SoundEffect::Explosion => Voice {
                wave: Wave::Sawtooth,
                pitch: Pitch::Exponential(100.0, 10.0),
                gain: 0.3,
                fade: Fade::Exponential,
                duration: 0.3,
            },
            // Lower pitch thump
            SoundEffect::TurretShoot => Voice {
                wave: Wave::Triangle,
                pitch: Pitch::Exponential(300.0, 50.0),
                gain: 0.1,
                fade: Fade::Exponential,
                duration: 0.15,
            },
            SoundEffect::LifeUp => Voice {
                wave: Wave::Square,
                pitch: Pitch::Steps(&[
                    (0.0, 659.0),
                    (0.1, 784.0),
                    (0.2, 1318.0),
                    (0.3, 1046.0),
                    (0.4, 1568.0),
                    (0.5, 2093.0),
                ]),
                gain: 0.1,
                fade: Fade::Linear,
                duration: 0.6,
            },
            SoundEffect::LevelClear => Voice {
                wave: Wave::Triangle,
                pitch: Pitch::Steps(&[(0.0, 400.0), (0.1, 500.0), (0.2, 600.0), (0.3, 800.0)]),
                gain: 0.3,
                fade: Fade::Exponential,
                duration: 0.5,
            },
            SoundEffect::GameOver => Voice {
                wave: Wave::Sine,
                pitch: Pitch::Steps(&[(0.0, 400.0), (0.2, 350.0), (0.4, 300.0), (0.6, 200.0)]),
                gain: 0.3,
                fade: Fade::Exponential,
                duration: 0.8,
            },
        }
    }
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// Frequency over the life of a voice (Hz, times in seconds from start)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pitch {
    Exponential(f32, f32),
    Linear(f32, f32),
    Steps(&'static [(f64, f32)]),
}

impl Pitch {
    pub fn start_frequency(&self) -> f32 {
        match self {
            Pitch::Exponential(from, _) | Pitch::Linear(from, _) => *from,
            Pitch::Steps(steps) => steps.first().map_or(440.0, |(_, f)| *f),
        }
    }
}

/// How the gain decays to silence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    Exponential,
    Linear,
}

/// One oscillator with a pitch curve and a gain envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub wave: Wave,
    pub pitch: Pitch,
    /// Peak gain before volume scaling
    pub gain: f32,
    pub fade: Fade,
    /// Seconds until the oscillator stops
    pub duration: f64,
}

/// Gain multiplier from user settings, zero when muted
fn settings_volume(settings: &Settings) -> f32 {
    settings.effective_sfx_gain()
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Fade, Pitch, SoundEffect, Voice, Wave, settings_volume};
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    impl From<Wave> for OscillatorType {
        fn from(wave: Wave) -> Self {
            match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
                Wave::Triangle => OscillatorType::Triangle,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new(&Settings::default())
        }
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings_volume(settings),
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings_volume(settings);
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Play the cue of every event that has one
        pub fn handle_events(&self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(SoundEffect::for_event) {
                self.play(effect);
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.resume();
            self.play_voice(ctx, effect.voice());
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        fn play_voice(&self, ctx: &AudioContext, voice: Voice) {
            let Some((osc, gain)) =
                self.create_osc(ctx, voice.pitch.start_frequency(), voice.wave.into())
            else {
                return;
            };
            let t = ctx.current_time();
            let end = t + voice.duration;

            let freq = osc.frequency();
            match voice.pitch {
                Pitch::Exponential(from, to) => {
                    freq.set_value_at_time(from, t).ok();
                    freq.exponential_ramp_to_value_at_time(to, end).ok();
                }
                Pitch::Linear(from, to) => {
                    freq.set_value_at_time(from, t).ok();
                    freq.linear_ramp_to_value_at_time(to, end).ok();
                }
                Pitch::Steps(steps) => {
                    for (offset, f) in steps {
                        freq.set_value_at_time(*f, t + offset).ok();
                    }
                }
            }

            gain.gain().set_value_at_time(voice.gain * self.volume, t).ok();
            match voice.fade {
                Fade::Exponential => {
                    gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
                }
                Fade::Linear => {
                    gain.gain().linear_ramp_to_value_at_time(0.0, end).ok();
                }
            }

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Silent stand-in used off the web
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct AudioManager {
    volume: f32,
    /// Effects requested so far
    pub played: u64,
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            volume: settings_volume(settings),
            played: 0,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings_volume(settings);
    }

    pub fn resume(&self) {}

    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        self.played += 1;
        log::trace!("sfx {:?}", effect);
    }
}
