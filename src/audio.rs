//! Event sounds
//!
//! Sounds are short synthesized note sequences; nothing is loaded from
//! files. Recipes and event mapping are plain data so they work on every
//! target, while playback through Web Audio exists only in the browser.

use crate::sim::{FoodKind, GameEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Eat,
    EatGolden,
    PowerUp,
    Portal,
    Death,
    Spawn,
    Start,
    GameOver,
    HighScore,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

/// One enveloped tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Start frequency (Hz)
    pub freq: f32,
    /// Glide target reached at the end of the note
    pub slide_to: Option<f32>,
    pub wave: Wave,
    /// Peak gain before master volume
    pub level: f32,
    /// Seconds after the sound starts
    pub delay: f64,
    /// Seconds until the envelope has decayed
    pub length: f64,
}

const fn note(freq: f32, wave: Wave, level: f32, delay: f64, length: f64) -> Note {
    Note {
        freq,
        slide_to: None,
        wave,
        level,
        delay,
        length,
    }
}

const fn glide(freq: f32, to: f32, wave: Wave, level: f32, delay: f64, length: f64) -> Note {
    Note {
        freq,
        slide_to: Some(to),
        wave,
        level,
        delay,
        length,
    }
}

const EAT: &[Note] = &[glide(440.0, 880.0, Wave::Square, 0.15, 0.0, 0.08)];
const EAT_GOLDEN: &[Note] = &[
    note(880.0, Wave::Triangle, 0.3, 0.0, 0.12),
    note(1320.0, Wave::Triangle, 0.3, 0.08, 0.2),
];
const POWER_UP: &[Note] = &[
    note(523.0, Wave::Triangle, 0.25, 0.0, 0.12),
    note(659.0, Wave::Triangle, 0.25, 0.05, 0.12),
    note(784.0, Wave::Triangle, 0.25, 0.1, 0.12),
];
const PORTAL: &[Note] = &[
    glide(1200.0, 300.0, Wave::Sine, 0.3, 0.0, 0.2),
    glide(900.0, 200.0, Wave::Sine, 0.15, 0.03, 0.2),
];
const DEATH: &[Note] = &[
    glide(220.0, 40.0, Wave::Sawtooth, 0.35, 0.0, 0.35),
    note(80.0, Wave::Sine, 0.4, 0.0, 0.2),
];
const SPAWN: &[Note] = &[glide(200.0, 400.0, Wave::Sine, 0.2, 0.0, 0.25)];
const START: &[Note] = &[glide(200.0, 600.0, Wave::Triangle, 0.3, 0.0, 0.2)];
const GAME_OVER: &[Note] = &[
    note(400.0, Wave::Sine, 0.3, 0.0, 0.3),
    note(350.0, Wave::Sine, 0.3, 0.2, 0.3),
    note(300.0, Wave::Sine, 0.3, 0.4, 0.3),
    note(200.0, Wave::Sine, 0.3, 0.6, 0.5),
];
const HIGH_SCORE: &[Note] = &[
    note(500.0, Wave::Triangle, 0.25, 0.0, 0.25),
    note(600.0, Wave::Triangle, 0.25, 0.08, 0.25),
    note(700.0, Wave::Triangle, 0.25, 0.16, 0.25),
    note(800.0, Wave::Triangle, 0.25, 0.24, 0.25),
    note(1000.0, Wave::Triangle, 0.25, 0.32, 0.4),
];

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::FoodEaten {
                kind: FoodKind::Apple,
                ..
            } => Some(SoundEffect::Eat),
            GameEvent::FoodEaten {
                kind: FoodKind::Golden,
                ..
            } => Some(SoundEffect::EatGolden),
            GameEvent::PowerUpCollected { .. } => Some(SoundEffect::PowerUp),
            GameEvent::PortalUsed { .. } => Some(SoundEffect::Portal),
            GameEvent::SnakeDied { .. } => Some(SoundEffect::Death),
            GameEvent::SnakeSpawned { .. } => Some(SoundEffect::Spawn),
            GameEvent::GameOver => Some(SoundEffect::GameOver),
            GameEvent::FoodExpired { .. } | GameEvent::SnakeOut { .. } => None,
        }
    }

    pub fn notes(self) -> &'static [Note] {
        match self {
            SoundEffect::Eat => EAT,
            SoundEffect::EatGolden => EAT_GOLDEN,
            SoundEffect::PowerUp => POWER_UP,
            SoundEffect::Portal => PORTAL,
            SoundEffect::Death => DEATH,
            SoundEffect::Spawn => SPAWN,
            SoundEffect::Start => START,
            SoundEffect::GameOver => GAME_OVER,
            SoundEffect::HighScore => HIGH_SCORE,
        }
    }

    /// Seconds until the last note has decayed
    pub fn duration(self) -> f64 {
        self.notes()
            .iter()
            .map(|n| n.delay + n.length)
            .fold(0.0, f64::max)
    }
}

/// Sounds for one tick's events, duplicates collapsed (two snakes eating
/// at once play one chime)
pub fn sounds_for(events: &[GameEvent]) -> Vec<SoundEffect> {
    let mut sounds: Vec<SoundEffect> = Vec::new();
    for sound in events.iter().filter_map(SoundEffect::for_event) {
        if !sounds.contains(&sound) {
            sounds.push(sound);
        }
    }
    sounds
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorType};

    use super::{Note, SoundEffect, Wave, sounds_for};
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    fn oscillator_type(wave: Wave) -> OscillatorType {
        match wave {
            Wave::Sine => OscillatorType::Sine,
            Wave::Square => OscillatorType::Square,
            Wave::Triangle => OscillatorType::Triangle,
            Wave::Sawtooth => OscillatorType::Sawtooth,
        }
    }

    /// Web Audio output with one master gain bus
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master: Option<GainNode>,
        gain: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            let master = ctx.as_ref().and_then(|ctx| {
                let gain = ctx.create_gain().ok()?;
                gain.connect_with_audio_node(&ctx.destination()).ok()?;
                Some(gain)
            });
            if master.is_none() {
                log::warn!("Web Audio unavailable, sound disabled");
            }
            let mut manager = Self {
                ctx,
                master,
                gain: 0.8,
                muted: false,
            };
            manager.update_master();
            manager
        }

        /// Browsers keep the context suspended until a user gesture
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.gain = settings.sfx_gain();
            self.update_master();
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            self.update_master();
        }

        fn update_master(&self) {
            if let Some(master) = &self.master {
                let gain = if self.muted { 0.0 } else { self.gain };
                master.gain().set_value(gain);
            }
        }

        pub fn play_events(&self, events: &[GameEvent]) {
            for sound in sounds_for(events) {
                self.play(sound);
            }
        }

        pub fn play(&self, effect: SoundEffect) {
            if self.muted || self.gain <= 0.0 {
                return;
            }
            let (Some(ctx), Some(master)) = (&self.ctx, &self.master) else {
                return;
            };
            self.resume();
            let start = ctx.current_time();
            for note in effect.notes() {
                if play_note(ctx, master, note, start).is_none() {
                    log::debug!("Dropped a note of {:?}", effect);
                }
            }
        }
    }

    fn play_note(ctx: &AudioContext, master: &GainNode, note: &Note, start: f64) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let env = ctx.create_gain().ok()?;
        osc.set_type(oscillator_type(note.wave));
        osc.connect_with_audio_node(&env).ok()?;
        env.connect_with_audio_node(master).ok()?;

        let t = start + note.delay;
        let end = t + note.length;
        osc.frequency().set_value_at_time(note.freq, t).ok()?;
        if let Some(to) = note.slide_to {
            osc.frequency().exponential_ramp_to_value_at_time(to, end).ok()?;
        }
        env.gain().set_value_at_time(note.level, t).ok()?;
        env.gain().exponential_ramp_to_value_at_time(0.01, end).ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(end + 0.05).ok()?;
        Some(())
    }
}
