// Purpose: note messages and monophonic note tracking
// The engine drains messages once per block and routes them to the active voice

pub mod message;
pub mod note;
