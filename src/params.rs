//! Parameter schema and per-block snapshots.
//!
//! The engine never owns parameter storage. A host-side store (automation,
//! GUI knobs, a preset file) hands the engine a [`SynthParams`] snapshot once
//! per block, already clamped to the ranges declared here. The engine reads
//! the snapshot and does no further validation beyond its own numeric guards.

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::dsp::oscillator::Waveform;

/// Every parameter the synth exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Waveform,
    Attack,
    Decay,
    Sustain,
    Release,
    VibratoRate,
    VibratoDepth,
    SineChorusRate,
    SineChorusDepth,
    TremoloRate,
    TremoloDepth,
    SawCombTime,
    SawCombFeedback,
    FormantFreq,
    FormantResonance,
    SawDrive,
    SawShape,
    SquarePunchDecay,
    SquareBitcrushRate,
    SquareBitcrushDepth,
    BarkFilterFreq,
    BarkFilterResonance,
    TriGlideTime,
    TriGlideDepth,
    TriChirpRate,
    TriChirpDepth,
    TriEchoTime,
    TriEchoMix,
}

impl ParamId {
    pub const ALL: [ParamId; 28] = [
        ParamId::Waveform,
        ParamId::Attack,
        ParamId::Decay,
        ParamId::Sustain,
        ParamId::Release,
        ParamId::VibratoRate,
        ParamId::VibratoDepth,
        ParamId::SineChorusRate,
        ParamId::SineChorusDepth,
        ParamId::TremoloRate,
        ParamId::TremoloDepth,
        ParamId::SawCombTime,
        ParamId::SawCombFeedback,
        ParamId::FormantFreq,
        ParamId::FormantResonance,
        ParamId::SawDrive,
        ParamId::SawShape,
        ParamId::SquarePunchDecay,
        ParamId::SquareBitcrushRate,
        ParamId::SquareBitcrushDepth,
        ParamId::BarkFilterFreq,
        ParamId::BarkFilterResonance,
        ParamId::TriGlideTime,
        ParamId::TriGlideDepth,
        ParamId::TriChirpRate,
        ParamId::TriChirpDepth,
        ParamId::TriEchoTime,
        ParamId::TriEchoMix,
    ];

    /// Stable string id, as used in presets.
    pub fn id(self) -> &'static str {
        match self {
            ParamId::Waveform => "waveform",
            ParamId::Attack => "attack",
            ParamId::Decay => "decay",
            ParamId::Sustain => "sustain",
            ParamId::Release => "release",
            ParamId::VibratoRate => "vibratoRate",
            ParamId::VibratoDepth => "vibratoDepth",
            ParamId::SineChorusRate => "sineChorusRate",
            ParamId::SineChorusDepth => "sineChorusDepth",
            ParamId::TremoloRate => "tremoloRate",
            ParamId::TremoloDepth => "tremoloDepth",
            ParamId::SawCombTime => "sawCombTime",
            ParamId::SawCombFeedback => "sawCombFeedback",
            ParamId::FormantFreq => "formantFreq",
            ParamId::FormantResonance => "formantResonance",
            ParamId::SawDrive => "sawDrive",
            ParamId::SawShape => "sawShape",
            ParamId::SquarePunchDecay => "squarePunchDecay",
            ParamId::SquareBitcrushRate => "squareBitcrushRate",
            ParamId::SquareBitcrushDepth => "squareBitcrushDepth",
            ParamId::BarkFilterFreq => "barkFilterFreq",
            ParamId::BarkFilterResonance => "barkFilterResonance",
            ParamId::TriGlideTime => "triGlideTime",
            ParamId::TriGlideDepth => "triGlideDepth",
            ParamId::TriChirpRate => "triChirpRate",
            ParamId::TriChirpDepth => "triChirpDepth",
            ParamId::TriEchoTime => "triEchoTime",
            ParamId::TriEchoMix => "triEchoMix",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.id() == id)
    }

    /// Declared range (inclusive).
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            ParamId::Waveform => 0.0..=3.0,
            ParamId::Attack => 0.01..=1.0,
            ParamId::Decay => 0.01..=1.0,
            ParamId::Sustain => 0.0..=1.0,
            ParamId::Release => 0.01..=3.0,
            ParamId::VibratoRate => 0.0..=10.0,
            ParamId::VibratoDepth => 0.0..=0.05,
            ParamId::SineChorusRate => 0.0..=10.0,
            ParamId::SineChorusDepth => 0.0..=1.0,
            ParamId::TremoloRate => 0.0..=20.0,
            ParamId::TremoloDepth => 0.0..=1.0,
            ParamId::SawCombTime => 1.0..=30.0,
            ParamId::SawCombFeedback => 0.0..=0.7,
            ParamId::FormantFreq => 200.0..=2000.0,
            ParamId::FormantResonance => 0.0..=2.5,
            ParamId::SawDrive => 0.9..=10.0,
            ParamId::SawShape => 0.0..=1.0,
            ParamId::SquarePunchDecay => 0.01..=0.3,
            ParamId::SquareBitcrushRate => 100.0..=8000.0,
            ParamId::SquareBitcrushDepth => 1.0..=16.0,
            ParamId::BarkFilterFreq => 300.0..=3000.0,
            ParamId::BarkFilterResonance => 0.1..=2.0,
            ParamId::TriGlideTime => 0.0..=0.2,
            ParamId::TriGlideDepth => 1.0..=24.0,
            ParamId::TriChirpRate => 1.0..=50.0,
            ParamId::TriChirpDepth => 0.0..=1.0,
            ParamId::TriEchoTime => 10.0..=250.0,
            ParamId::TriEchoMix => 0.0..=1.0,
        }
    }

    /// Declared default, before clamping.
    ///
    /// `SquareBitcrushRate` declares 10 kHz against an 8 kHz maximum;
    /// [`SynthParams::default`] clamps it on construction.
    pub fn default_value(self) -> f32 {
        match self {
            ParamId::Waveform => 0.0,
            ParamId::Attack => 0.1,
            ParamId::Decay => 0.2,
            ParamId::Sustain => 0.8,
            ParamId::Release => 0.5,
            ParamId::VibratoRate => 5.0,
            ParamId::VibratoDepth => 0.001,
            ParamId::SineChorusRate => 1.5,
            ParamId::SineChorusDepth => 0.3,
            ParamId::TremoloRate => 4.0,
            ParamId::TremoloDepth => 0.5,
            ParamId::SawCombTime => 10.0,
            ParamId::SawCombFeedback => 0.25,
            ParamId::FormantFreq => 800.0,
            ParamId::FormantResonance => 1.0,
            ParamId::SawDrive => 3.0,
            ParamId::SawShape => 0.5,
            ParamId::SquarePunchDecay => 0.05,
            ParamId::SquareBitcrushRate => 10_000.0,
            ParamId::SquareBitcrushDepth => 16.0,
            ParamId::BarkFilterFreq => 800.0,
            ParamId::BarkFilterResonance => 1.0,
            ParamId::TriGlideTime => 0.05,
            ParamId::TriGlideDepth => 12.0,
            ParamId::TriChirpRate => 20.0,
            ParamId::TriChirpDepth => 0.5,
            ParamId::TriEchoTime => 80.0,
            ParamId::TriEchoMix => 0.3,
        }
    }

    pub fn clamp(self, value: f32) -> f32 {
        let range = self.range();
        let value = if value.is_nan() { self.default_value() } else { value };
        value.clamp(*range.start(), *range.end())
    }
}

/// One block's worth of parameter values.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParams {
    pub waveform: Waveform,

    // Amplitude envelope (seconds / level)
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,

    // Sine
    pub vibrato_rate: f32,
    pub vibrato_depth: f32,
    pub sine_chorus_rate: f32,
    pub sine_chorus_depth: f32,
    pub tremolo_rate: f32,
    pub tremolo_depth: f32,

    // Saw
    pub saw_comb_time: f32,
    pub saw_comb_feedback: f32,
    pub formant_freq: f32,
    pub formant_resonance: f32,
    pub saw_drive: f32,
    pub saw_shape: f32,

    // Square
    pub square_punch_decay: f32,
    pub square_bitcrush_rate: f32,
    pub square_bitcrush_depth: f32,
    pub bark_filter_freq: f32,
    pub bark_filter_resonance: f32,

    // Triangle
    pub tri_glide_time: f32,
    pub tri_glide_depth: f32,
    pub tri_chirp_rate: f32,
    pub tri_chirp_depth: f32,
    pub tri_echo_time: f32,
    pub tri_echo_mix: f32,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::declared_defaults().clamped()
    }
}

impl SynthParams {
    /// Table defaults exactly as declared, including the out-of-range one.
    pub fn declared_defaults() -> Self {
        let mut params = Self {
            waveform: Waveform::Sine,
            attack: 0.0,
            decay: 0.0,
            sustain: 0.0,
            release: 0.0,
            vibrato_rate: 0.0,
            vibrato_depth: 0.0,
            sine_chorus_rate: 0.0,
            sine_chorus_depth: 0.0,
            tremolo_rate: 0.0,
            tremolo_depth: 0.0,
            saw_comb_time: 0.0,
            saw_comb_feedback: 0.0,
            formant_freq: 0.0,
            formant_resonance: 0.0,
            saw_drive: 0.0,
            saw_shape: 0.0,
            square_punch_decay: 0.0,
            square_bitcrush_rate: 0.0,
            square_bitcrush_depth: 0.0,
            bark_filter_freq: 0.0,
            bark_filter_resonance: 0.0,
            tri_glide_time: 0.0,
            tri_glide_depth: 0.0,
            tri_chirp_rate: 0.0,
            tri_chirp_depth: 0.0,
            tri_echo_time: 0.0,
            tri_echo_mix: 0.0,
        };
        for id in ParamId::ALL {
            params.write_raw(id, id.default_value());
        }
        params
    }

    /// Copy of `self` with every value pulled into its declared range.
    pub fn clamped(mut self) -> Self {
        for id in ParamId::ALL {
            let value = self.get(id);
            self.write_raw(id, id.clamp(value));
        }
        self
    }

    /// Parameters whose current value lies outside the declared range.
    pub fn out_of_range(&self) -> impl Iterator<Item = ParamId> + '_ {
        ParamId::ALL
            .into_iter()
            .filter(move |&id| !id.range().contains(&self.get(id)))
    }

    pub fn get(&self, id: ParamId) -> f32 {
        match self.field(id) {
            Some(value) => value,
            None => self.waveform.index() as f32,
        }
    }

    /// Store a clamped value, as the owning parameter store would.
    pub fn set(&mut self, id: ParamId, value: f32) {
        self.write_raw(id, id.clamp(value));
    }

    fn write_raw(&mut self, id: ParamId, value: f32) {
        match self.field_mut(id) {
            Some(slot) => *slot = value,
            None => self.waveform = Waveform::from_index(value.round().max(0.0) as usize),
        }
    }

    fn field(&self, id: ParamId) -> Option<f32> {
        let mut copy = *self;
        copy.field_mut(id).map(|slot| *slot)
    }

    fn field_mut(&mut self, id: ParamId) -> Option<&mut f32> {
        let slot = match id {
            ParamId::Waveform => return None,
            ParamId::Attack => &mut self.attack,
            ParamId::Decay => &mut self.decay,
            ParamId::Sustain => &mut self.sustain,
            ParamId::Release => &mut self.release,
            ParamId::VibratoRate => &mut self.vibrato_rate,
            ParamId::VibratoDepth => &mut self.vibrato_depth,
            ParamId::SineChorusRate => &mut self.sine_chorus_rate,
            ParamId::SineChorusDepth => &mut self.sine_chorus_depth,
            ParamId::TremoloRate => &mut self.tremolo_rate,
            ParamId::TremoloDepth => &mut self.tremolo_depth,
            ParamId::SawCombTime => &mut self.saw_comb_time,
            ParamId::SawCombFeedback => &mut self.saw_comb_feedback,
            ParamId::FormantFreq => &mut self.formant_freq,
            ParamId::FormantResonance => &mut self.formant_resonance,
            ParamId::SawDrive => &mut self.saw_drive,
            ParamId::SawShape => &mut self.saw_shape,
            ParamId::SquarePunchDecay => &mut self.square_punch_decay,
            ParamId::SquareBitcrushRate => &mut self.square_bitcrush_rate,
            ParamId::SquareBitcrushDepth => &mut self.square_bitcrush_depth,
            ParamId::BarkFilterFreq => &mut self.bark_filter_freq,
            ParamId::BarkFilterResonance => &mut self.bark_filter_resonance,
            ParamId::TriGlideTime => &mut self.tri_glide_time,
            ParamId::TriGlideDepth => &mut self.tri_glide_depth,
            ParamId::TriChirpRate => &mut self.tri_chirp_rate,
            ParamId::TriChirpDepth => &mut self.tri_chirp_depth,
            ParamId::TriEchoTime => &mut self.tri_echo_time,
            ParamId::TriEchoMix => &mut self.tri_echo_mix,
        };
        Some(slot)
    }
}

#[cfg(feature = "serde")]
impl SynthParams {
    /// Parse a JSON preset. Missing fields take their defaults; values
    /// outside their range are clamped and logged.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let raw: SynthParams = serde_json::from_str(json)?;

        for id in raw.out_of_range() {
            tracing::warn!(
                param = id.id(),
                value = raw.get(id),
                "preset value out of range, clamping"
            );
        }

        Ok(raw.clamped())
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let params = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), waveform = params.waveform.name(), "loaded preset");
        Ok(params)
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
