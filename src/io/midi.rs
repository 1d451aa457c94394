/// Channel-voice MIDI messages the synth understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
}

impl MidiEvent {
    /// Parse one raw channel-voice message.
    ///
    /// Note-on with velocity 0 is reported as note-off. System messages,
    /// running status, and truncated messages return `None`.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if status < 0x80 || status >= 0xF0 {
            return None;
        }

        let channel = status & 0x0F;
        let data_byte = |i: usize| data.get(i).copied().filter(|b| *b < 0x80);

        match status & 0xF0 {
            0x80 => Some(MidiEvent::NoteOff {
                channel,
                key: data_byte(0)?,
                velocity: data_byte(1)?,
            }),
            0x90 => {
                let key = data_byte(0)?;
                let velocity = data_byte(1)?;
                if velocity == 0 {
                    Some(MidiEvent::NoteOff {
                        channel,
                        key,
                        velocity,
                    })
                } else {
                    Some(MidiEvent::NoteOn {
                        channel,
                        key,
                        velocity,
                    })
                }
            }
            0xB0 => Some(MidiEvent::ControlChange {
                channel,
                controller: data_byte(0)?,
                value: data_byte(1)?,
            }),
            0xC0 => Some(MidiEvent::ProgramChange {
                channel,
                program: data_byte(0)?,
            }),
            0xE0 => {
                let lsb = data_byte(0)? as i16;
                let msb = data_byte(1)? as i16;
                Some(MidiEvent::PitchBend {
                    channel,
                    value: ((msb << 7) | lsb) - 8192,
                })
            }
            _ => None,
        }
    }
}
