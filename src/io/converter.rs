use crate::{io::midi::MidiEvent, synth::message::SynthMessage};

/// MIDI controller number for "all notes off".
const CC_ALL_NOTES_OFF: u8 = 123;

/// Map a MIDI event to a synth message. `channel_filter` of `None` listens
/// on every channel.
pub fn midi_to_synth(midi: MidiEvent, channel_filter: Option<u8>) -> Option<SynthMessage> {
    let accepts = |channel: u8| channel_filter.map_or(true, |c| c == channel);

    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } if accepts(channel) => Some(SynthMessage::NoteOn {
            note: key,
            velocity,
        }),
        MidiEvent::NoteOff {
            channel,
            key,
            velocity,
        } if accepts(channel) => Some(SynthMessage::NoteOff {
            note: key,
            velocity,
        }),
        MidiEvent::ControlChange {
            channel,
            controller: CC_ALL_NOTES_OFF,
            ..
        } if accepts(channel) => Some(SynthMessage::AllNotesOff),
        _ => None,
    }
}

/// Equal-tempered frequency of a MIDI note, A4 (69) = 440 Hz.
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_440() {
        assert_eq!(midi_note_to_freq(69), 440.0);
        assert!((midi_note_to_freq(57) - 220.0).abs() < 1e-3);
    }

    #[test]
    fn channel_filter_drops_other_channels() {
        let event = MidiEvent::NoteOn {
            channel: 2,
            key: 60,
            velocity: 90,
        };
        assert_eq!(midi_to_synth(event, Some(0)), None);
        assert_eq!(
            midi_to_synth(event, None),
            Some(SynthMessage::NoteOn {
                note: 60,
                velocity: 90
            })
        );
    }

    #[test]
    fn cc_123_releases_everything() {
        let event = MidiEvent::ControlChange {
            channel: 0,
            controller: 123,
            value: 0,
        };
        assert_eq!(midi_to_synth(event, Some(0)), Some(SynthMessage::AllNotesOff));

        let other = MidiEvent::ControlChange {
            channel: 0,
            controller: 1,
            value: 64,
        };
        assert_eq!(midi_to_synth(other, None), None);
    }
}
