//! The four character voices.
//!
//! All voices share one [`VoiceCore`]: the phase accumulator, the amplitude
//! envelope, and the monophonic note slot. Switching waveform mid-note keeps
//! the note sounding and simply runs it through a different chain. Each voice
//! owns only the state unique to its chain (filters, delay lines, one-shot
//! sweeps) and keeps it for the life of the engine.
//!
//! | voice      | chain                                                        |
//! | ---------- | ------------------------------------------------------------ |
//! | `sine`     | vibrato → tremolo → swept bandpass → block chorus            |
//! | `saw`      | swept lowpass → formant bandpass → drive/shape → comb        |
//! | `square`   | punch transient → bitcrusher → swept "bark" bandpass         |
//! | `triangle` | glide → chirp AM → echo                                      |

mod saw;
mod sine;
mod square;
mod triangle;

pub use saw::SawVoice;
pub use sine::SineVoice;
pub use square::SquareVoice;
pub use triangle::TriangleVoice;

use crate::{
    dsp::{envelope::Envelope, oscillator::PhaseOscillator},
    io::converter::midi_note_to_freq,
    params::SynthParams,
    synth::note::NoteTracker,
};

/// State every voice reads and advances: phase, amplitude envelope, note slot.
pub struct VoiceCore {
    sample_rate: f32,
    osc: PhaseOscillator,
    envelope: Envelope,
    notes: NoteTracker,
    frequency: f32,
}

impl VoiceCore {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            osc: PhaseOscillator::new(),
            envelope: Envelope::new(sample_rate),
            notes: NoteTracker::new(),
            frequency: 0.0,
        }
    }

    /// Track `note`, retune the oscillator, and open the envelope gate.
    /// The oscillator phase is left where it is.
    pub fn note_on(&mut self, note: u8) {
        self.frequency = midi_note_to_freq(note);
        self.osc.set_frequency(self.frequency, self.sample_rate);
        self.envelope.note_on();
        self.notes.hold(note);
    }

    /// Release the envelope if `note` is the tracked note; otherwise nothing.
    pub fn note_off(&mut self, note: u8) -> bool {
        let released = self.notes.release(note);
        if released {
            self.envelope.note_off();
        }
        released
    }

    /// Release whatever note is tracked.
    pub fn release_all(&mut self) {
        if self.notes.release_any().is_some() {
            self.envelope.note_off();
        }
    }

    /// Refresh per-block envelope settings.
    pub fn apply_params(&mut self, params: &SynthParams) {
        self.envelope
            .set_parameters(params.attack, params.decay, params.sustain, params.release);
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Target frequency of the tracked (or last) note.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn oscillator(&self) -> &PhaseOscillator {
        &self.osc
    }

    pub fn held_note(&self) -> Option<u8> {
        self.notes.held()
    }

    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }
}
