use rtrb::Consumer;

/// Note events delivered to the engine, consumed at block granularity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SynthMessage {
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8, velocity: u8 },
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}

/// A receiver that never yields anything, for blocks with no MIDI input.
pub struct NoMessages;

impl MessageReceiver for NoMessages {
    fn pop(&mut self) -> Option<SynthMessage> {
        None
    }
}
