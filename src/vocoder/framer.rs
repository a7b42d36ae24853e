//! Ring-buffered framing and overlap-add reconstruction.
//!
//! The FIFO holds the most recent N samples. Each incoming sample first
//! releases whatever synthesized sample sits at its slot, then takes that
//! slot. Once a hop's worth has been exchanged the cursor advances, a full
//! frame is read out starting at the cursor, and the resynthesized frame is
//! summed into an accumulator sharing the same cursor. The hop at the cursor
//! is then complete, so it is copied back into the FIFO to be released during
//! the next hop.

use rustfft::num_complex::Complex;

use crate::core::ring_buffer::RingBuffer;
use crate::core::types::{Sample, STFT_SIZE, STFT_STEP};
use crate::core::window::{window, OUTPUT_SCALE};

/// Time-domain state of the vocoder.
#[derive(Debug, Clone)]
pub struct Framer {
    fifo: RingBuffer<f64>,
    output_accum: RingBuffer<f64>,
    /// Start of the oldest hop; always a multiple of the hop size.
    pos: usize,
    /// Samples exchanged since the last completed hop.
    count: usize,
}

impl Default for Framer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framer {
    /// Initial cursor position.
    pub const START_POS: usize = STFT_SIZE - STFT_STEP;

    pub fn new() -> Self {
        Self {
            fifo: RingBuffer::with_capacity(STFT_SIZE),
            output_accum: RingBuffer::with_capacity(STFT_SIZE),
            pos: Self::START_POS,
            count: 0,
        }
    }

    /// Zeroes both buffers and rewinds the cursor.
    pub fn reset(&mut self) {
        self.fifo.clear();
        self.output_accum.clear();
        self.pos = Self::START_POS;
        self.count = 0;
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Releases queued samples into `output` and stores `input` in their
    /// place, stopping at the end of the current hop.
    ///
    /// Returns the number of samples exchanged.
    pub fn exchange(&mut self, input: &[Sample], output: &mut [Sample]) -> usize {
        let todo = (STFT_STEP - self.count).min(input.len()).min(output.len());
        let slots = self.fifo.segment_mut(self.pos + self.count, todo);
        for ((slot, out), &sample) in slots.iter_mut().zip(output.iter_mut()).zip(input) {
            *out = *slot as Sample;
            *slot = sample as f64;
        }
        self.count += todo;
        todo
    }

    /// Advances the cursor by one hop if the current hop is full.
    ///
    /// Returns whether a hop completed and a frame is ready to analyze.
    #[inline]
    pub fn advance_if_full(&mut self) -> bool {
        if self.count < STFT_STEP {
            return false;
        }
        self.count = 0;
        self.pos = self.fifo.wrap(self.pos + STFT_STEP);
        true
    }

    /// Copies the N samples starting at the cursor into `frame`, windowed.
    pub fn extract_frame(&self, frame: &mut [Complex<f64>]) {
        let (older, newer) = self.fifo.split_at_cursor(self.pos);
        for ((dst, &sample), &w) in frame
            .iter_mut()
            .zip(older.iter().chain(newer))
            .zip(window().iter())
        {
            *dst = Complex::new(sample * w, 0.0);
        }
    }

    /// Windows the real part of `frame`, sums it into the accumulator at the
    /// cursor, then moves the completed hop into the FIFO.
    pub fn overlap_add(&mut self, frame: &[Complex<f64>]) {
        let (older, newer) = self.output_accum.split_at_cursor_mut(self.pos);
        for ((acc, c), &w) in older
            .iter_mut()
            .chain(newer.iter_mut())
            .zip(frame)
            .zip(window().iter())
        {
            *acc += w * c.re * OUTPUT_SCALE;
        }

        let done = self.output_accum.segment_mut(self.pos, STFT_STEP);
        self.fifo
            .segment_mut(self.pos, STFT_STEP)
            .copy_from_slice(done);
        done.fill(0.0);
    }
}
