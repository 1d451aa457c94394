/*
Engine -> Display Channel
=========================

The audio thread must never wait on the display. Two single-producer,
single-consumer rings carry everything the display needs:

    audio thread                          display thread
    ------------                          --------------
    ScopeTap::push_samples  --samples-->  ScopeReader::poll
    ScopeTap::push_frame    --frames--->    rolling window (newest at end)
                                            latest DisplayFrame

The engine pushes samples as each chunk is rendered and one frame per
processed block. Pushes never block: when a ring is full the rest of the
samples (or the frame) is dropped and counted. The display only ever sees the most recent audio, so
losing a few samples while it is behind is harmless.
*/

use rtrb::{Consumer, Producer, RingBuffer};

use crate::dsp::Waveform;

/// Samples kept in the display's rolling window unless asked otherwise.
pub const DEFAULT_WINDOW: usize = 2048;
/// Frame ring depth. The display only reads the newest one.
const FRAME_CAPACITY: usize = 64;

/// Per-block engine state for the display.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayFrame {
    pub envelope_level: f32,
    pub note: Option<u8>,
    pub waveform: Waveform,
}

/// Audio-thread half. Owned by the engine.
pub struct ScopeTap {
    samples: Producer<f32>,
    frames: Producer<DisplayFrame>,
    dropped: u64,
}

impl ScopeTap {
    /// Push rendered samples. Whatever does not fit is dropped.
    pub fn push_samples(&mut self, block: &[f32]) {
        for (pushed, &sample) in block.iter().enumerate() {
            if self.samples.push(sample).is_err() {
                self.dropped += (block.len() - pushed) as u64;
                break;
            }
        }
    }

    /// Push the state at the end of a processed block.
    pub fn push_frame(&mut self, frame: DisplayFrame) {
        let _ = self.frames.push(frame);
    }

    /// Samples discarded so far because the display fell behind.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Display-thread half.
pub struct ScopeReader {
    samples: Consumer<f32>,
    frames: Consumer<DisplayFrame>,
    window: Vec<f32>,
    latest: DisplayFrame,
    frames_received: u64,
}

impl ScopeReader {
    /// Drain both rings. Returns true if anything new arrived.
    pub fn poll(&mut self) -> bool {
        let mut updated = false;

        let available = self.samples.slots();
        if available > 0 {
            if let Ok(chunk) = self.samples.read_chunk(available) {
                let (first, second) = chunk.as_slices();
                append_rolling(&mut self.window, first);
                append_rolling(&mut self.window, second);
                chunk.commit_all();
                updated = true;
            }
        }

        while let Ok(frame) = self.frames.pop() {
            self.latest = frame;
            self.frames_received += 1;
            updated = true;
        }

        updated
    }

    /// Most recent samples, oldest first.
    pub fn window(&self) -> &[f32] {
        &self.window
    }

    pub fn latest(&self) -> DisplayFrame {
        self.latest
    }

    /// Frames taken off the ring so far; one per processed engine block.
    pub fn frames_received(&self) -> u64 {
        self.frames_received
    }
}

/// Shift `window` left by `incoming.len()` and copy `incoming` onto the end.
fn append_rolling(window: &mut [f32], incoming: &[f32]) {
    let len = window.len();
    if incoming.len() >= len {
        window.copy_from_slice(&incoming[incoming.len() - len..]);
        return;
    }

    window.copy_within(incoming.len().., 0);
    window[len - incoming.len()..].copy_from_slice(incoming);
}

/// Create a tap/reader pair with a sample ring of `capacity` and the default window.
pub fn channel(capacity: usize) -> (ScopeTap, ScopeReader) {
    channel_with_window(capacity, DEFAULT_WINDOW)
}

pub fn channel_with_window(capacity: usize, window: usize) -> (ScopeTap, ScopeReader) {
    let (sample_tx, sample_rx) = RingBuffer::new(capacity.max(1));
    let (frame_tx, frame_rx) = RingBuffer::new(FRAME_CAPACITY);

    let tap = ScopeTap {
        samples: sample_tx,
        frames: frame_tx,
        dropped: 0,
    };
    let reader = ScopeReader {
        samples: sample_rx,
        frames: frame_rx,
        window: vec![0.0; window.max(1)],
        latest: DisplayFrame::default(),
        frames_received: 0,
    };

    (tap, reader)
}
