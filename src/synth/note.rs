/// Single-slot note tracking.
///
/// The synth is strictly monophonic with no note stack: a new note-on
/// replaces the slot, and a note-off only counts if it names the note that is
/// currently in the slot. Releasing notes out of order can therefore leave a
/// later note sounding until its own release arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteTracker {
    held: Option<u8>,
}

impl NoteTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&mut self, note: u8) {
        self.held = Some(note);
    }

    /// Clear the slot if `note` is the tracked note. Returns whether it was.
    pub fn release(&mut self, note: u8) -> bool {
        if self.held == Some(note) {
            self.held = None;
            true
        } else {
            false
        }
    }

    /// Clear the slot regardless of which note is in it.
    pub fn release_any(&mut self) -> Option<u8> {
        self.held.take()
    }

    pub fn held(&self) -> Option<u8> {
        self.held
    }
}
