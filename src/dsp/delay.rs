/*
Circular Delay Line
===================

One fixed-capacity ring of samples. The write head moves forward one slot per
sample; reads look back `delay` slots from the write head:

    read = (write + capacity - delay) % capacity

The delay is clamped to 1..=capacity-1 so a read never lands on the slot that
is about to be overwritten.

Two recursive uses sit on top of the raw read/write pair:

  comb    delayed = read(d); out = in + delayed * fb; write(out)
          The processed sample goes back in, so each pass through the loop
          is scaled by fb again.

  echo    The caller reads, mixes, and writes whatever feedback signal it
          wants (see the triangle voice).

The buffer is allocated once when the sample rate is known and never resized
on the audio thread.
*/

/// Convert a delay time in milliseconds to a whole number of samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> usize {
    (ms * sample_rate / 1000.0).round().max(0.0) as usize
}

pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Allocate a delay line holding `capacity` samples (at least 2).
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(2)],
            write_pos: 0,
        }
    }

    /// Allocate enough room for `seconds` of audio at `sample_rate`.
    pub fn with_duration(seconds: f32, sample_rate: f32) -> Self {
        let capacity = (seconds * sample_rate).ceil() as usize + 1;
        Self::new(capacity)
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Clamp a requested delay into the range the buffer can serve.
    #[inline]
    pub fn clamp_delay(&self, delay_samples: usize) -> usize {
        delay_samples.clamp(1, self.buffer.len() - 1)
    }

    /// Read the sample written `delay_samples` writes ago.
    #[inline]
    pub fn read(&self, delay_samples: usize) -> f32 {
        let capacity = self.buffer.len();
        let delay = self.clamp_delay(delay_samples);
        let read_pos = (self.write_pos + capacity - delay) % capacity;
        self.buffer[read_pos]
    }

    /// Fractional read with linear interpolation between neighbouring slots.
    pub fn read_interpolated(&self, delay_samples: f32) -> f32 {
        let max_delay = ((self.buffer.len() - 2) as f32).max(1.0);
        let delay = delay_samples.clamp(1.0, max_delay);
        let whole = delay.floor();
        let frac = delay - whole;

        let a = self.read(whole as usize);
        let b = self.read(whole as usize + 1);
        a + (b - a) * frac
    }

    /// Store `sample` at the write head and advance it.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Recursive comb: returns `input + delayed * feedback` and writes that
    /// same value back into the line.
    #[inline]
    pub fn process_feedback(&mut self, input: f32, delay_samples: usize, feedback: f32) -> f32 {
        let delayed = self.read(delay_samples);
        let processed = input + delayed * feedback;
        self.write(processed);
        processed
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
