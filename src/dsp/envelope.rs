use crate::MIN_TIME;

/*
ADSR Envelope
=============

Linear attack/decay/sustain/release generator. One call to `next_sample`
per output sample; the returned level multiplies the voice.

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

Per-sample steps come from the stage time and the sample rate:

    attack   +1 / (attack * fs)                      until level = 1
    decay    -(1 - sustain) / (decay * fs)           until level = sustain
    release  start * (1 - elapsed / (release * fs))  until level = 0

Retrigger
---------

note_on enters Attack from the CURRENT level instead of snapping to zero, so
a note played during another note's release ramps up without a click.
note_off enters Release from whatever level the envelope is at, including
the middle of the attack.

  Idle ──note_on──→ Attack ──1.0──→ Decay ──S──→ Sustain
    ↑                  │               │            │
    │               note_off        note_off     note_off
    │                  ↓               ↓            ↓
    └──────0.0─────── Release ←────────┴────────────┘

Stage times are refreshed once per block from the parameter snapshot.
*/

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

pub struct Envelope {
    sample_rate: f32,

    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,

    stage: EnvelopeState,
    level: f32,

    // Captured at note_off so release hits 0.0 exactly.
    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        Self::adsr(sample_rate, 0.1, 0.2, 0.8, 0.5)
    }

    pub fn adsr(sample_rate: f32, attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        let mut env = Self {
            sample_rate,
            attack_time: MIN_TIME,
            decay_time: MIN_TIME,
            sustain_level: 0.0,
            release_time: MIN_TIME,

            stage: EnvelopeState::Idle,
            level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        };
        env.set_parameters(attack, decay, sustain, release);
        env
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Update stage times. Takes effect on the next sample; an in-flight
    /// release keeps the length it was started with.
    pub fn set_parameters(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.attack_time = attack.max(MIN_TIME);
        self.decay_time = decay.max(MIN_TIME);
        self.sustain_level = sustain.clamp(0.0, 1.0);
        self.release_time = release.max(MIN_TIME);
    }

    /// Gate high: ramp toward 1.0 from the current level.
    pub fn note_on(&mut self) {
        self.stage = EnvelopeState::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: start the release phase from the current level.
    pub fn note_off(&mut self) {
        if self.stage == EnvelopeState::Idle {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * self.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeState::Release;
    }

    /// Advance one sample and return the new level.
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level += 1.0 / (self.attack_time * self.sample_rate);

                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                let target = self.sustain_level;
                self.level -= (1.0 - target) / (self.decay_time * self.sample_rate);

                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {
                self.level = self.sustain_level;
            }

            EnvelopeState::Release => {
                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// True for every stage except Idle.
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
        self.release_start_level = 0.0;
        self.release_elapsed_samples = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}
