//! Block-level phase vocoder pitch shifter.

use rustfft::num_complex::Complex;

use crate::core::fft::{RustFftTransform, SpectralTransform, COMPLEX_ZERO};
use crate::core::fixed::PitchRatio;
use crate::core::types::{Sample, STFT_SIZE};
use crate::vocoder::analyzer::Analyzer;
use crate::vocoder::framer::Framer;
use crate::vocoder::remap::BinRemapper;
use crate::vocoder::resynth::Resynthesizer;

/// Mono pitch shifter: framer, analysis, bin remapping, resynthesis and
/// overlap-add, run once per hop.
///
/// All buffers are allocated in [`with_transform`](Self::with_transform) and
/// reused; [`process`](Self::process) never allocates, blocks or fails.
/// Output lags input by [`LATENCY_SAMPLES`](crate::core::types::LATENCY_SAMPLES).
pub struct PhaseVocoder<T: SpectralTransform = RustFftTransform> {
    framer: Framer,
    analyzer: Analyzer,
    remapper: BinRemapper,
    resynth: Resynthesizer,
    fft_buffer: Vec<Complex<f64>>,
    transform: T,
}

impl PhaseVocoder<RustFftTransform> {
    /// Creates a vocoder backed by rustfft.
    pub fn new() -> Self {
        Self::with_transform(RustFftTransform::new(STFT_SIZE))
    }
}

impl Default for PhaseVocoder<RustFftTransform> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SpectralTransform> PhaseVocoder<T> {
    /// Creates a vocoder around an external transform of size `STFT_SIZE`.
    pub fn with_transform(transform: T) -> Self {
        debug_assert_eq!(transform.size(), STFT_SIZE);
        Self {
            framer: Framer::new(),
            analyzer: Analyzer::new(),
            remapper: BinRemapper::new(),
            resynth: Resynthesizer::new(),
            fft_buffer: vec![COMPLEX_ZERO; STFT_SIZE],
            transform,
        }
    }

    /// Zeroes every buffer and phase memory and rewinds the cursor.
    pub fn reset(&mut self) {
        self.framer.reset();
        self.analyzer.reset();
        self.remapper.reset();
        self.resynth.reset();
        self.fft_buffer.fill(COMPLEX_ZERO);
    }

    /// Pitch-shifts `input` by `ratio`, writing the same number of samples
    /// to `output`.
    ///
    /// Only `min(input.len(), output.len())` samples are processed.
    pub fn process(&mut self, input: &[Sample], output: &mut [Sample], ratio: PitchRatio) {
        let samples_to_do = input.len().min(output.len());
        let mut base = 0;
        while base < samples_to_do {
            base += self
                .framer
                .exchange(&input[base..samples_to_do], &mut output[base..samples_to_do]);

            if !self.framer.advance_if_full() {
                break;
            }
            self.process_hop(ratio);
        }
    }

    /// One analysis/resynthesis cycle on the frame at the cursor.
    fn process_hop(&mut self, ratio: PitchRatio) {
        self.framer.extract_frame(&mut self.fft_buffer);
        self.transform.forward(&mut self.fft_buffer);

        self.analyzer.analyze(&self.fft_buffer);
        self.remapper.remap(self.analyzer.bins(), ratio);
        self.resynth
            .synthesize(self.remapper.bins(), &mut self.fft_buffer);

        self.transform.inverse(&mut self.fft_buffer);
        self.framer.overlap_add(&self.fft_buffer);
    }

    /// Accumulated synthesis phase per bin.
    #[inline]
    pub fn synthesis_phase(&self) -> &[f64] {
        self.resynth.sum_phase()
    }

    /// Current FIFO cursor.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.framer.pos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{LATENCY_SAMPLES, STFT_STEP};
    use crate::core::window::PASSTHROUGH_GAIN;
    use std::f64::consts::PI;

    fn sine(freq: f64, sr: f64, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (2.0 * PI * freq * i as f64 / sr).sin() as f32 * 0.5)
            .collect()
    }

    fn run(pv: &mut PhaseVocoder, input: &[f32], block: usize, ratio: PitchRatio) -> Vec<f32> {
        let mut output = vec![0.0f32; input.len()];
        for (i, o) in input.chunks(block).zip(output.chunks_mut(block)) {
            pv.process(i, o, ratio);
        }
        output
    }

    #[test]
    fn test_cold_start_is_silent() {
        let mut pv = PhaseVocoder::new();
        let input = sine(440.0, 44100.0, LATENCY_SAMPLES);
        let output = run(&mut pv, &input, 128, PitchRatio::UNITY);
        assert!(output.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_unity_reconstructs_delayed_input() {
        let mut pv = PhaseVocoder::new();
        let input = sine(440.0, 44100.0, 16 * STFT_SIZE);
        let output = run(&mut pv, &input, 300, PitchRatio::UNITY);
        let gain = PASSTHROUGH_GAIN as f32;
        for n in 3 * STFT_SIZE..input.len() {
            let err = (output[n] - gain * input[n - LATENCY_SAMPLES]).abs();
            assert!(err < 1e-4, "sample {}: err {}", n, err);
        }
    }

    #[test]
    fn test_block_size_does_not_change_output() {
        let input = sine(1000.0, 48000.0, 8 * STFT_SIZE);
        let ratio = PitchRatio::from_cents(700);
        let mut a = PhaseVocoder::new();
        let mut b = PhaseVocoder::new();
        let out_a = run(&mut a, &input, 1, ratio);
        let out_b = run(&mut b, &input, 1000, ratio);
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_cursor_advances_per_hop() {
        let mut pv = PhaseVocoder::new();
        assert_eq!(pv.cursor(), STFT_SIZE - STFT_STEP);
        let mut out = vec![0.0; STFT_STEP];
        pv.process(&vec![0.0; STFT_STEP], &mut out, PitchRatio::UNITY);
        assert_eq!(pv.cursor(), 0);
        pv.process(&vec![0.0; STFT_STEP - 1], &mut out[..STFT_STEP - 1], PitchRatio::UNITY);
        assert_eq!(pv.cursor(), 0);
        pv.process(&[0.0], &mut out[..1], PitchRatio::UNITY);
        assert_eq!(pv.cursor(), STFT_STEP);
    }

    #[test]
    fn test_reset_restores_cold_state() {
        let input = sine(330.0, 44100.0, 6 * STFT_SIZE);
        let ratio = PitchRatio::from_cents(-500);
        let mut pv = PhaseVocoder::new();
        let first = run(&mut pv, &input, 512, ratio);
        pv.reset();
        assert!(pv.synthesis_phase().iter().all(|&p| p == 0.0));
        let second = run(&mut pv, &input, 512, ratio);
        assert_eq!(first, second);
    }

    #[test]
    fn test_mismatched_lengths_process_shorter() {
        let mut pv = PhaseVocoder::new();
        let mut out = vec![3.0f32; 10];
        pv.process(&[0.1; 20], &mut out, PitchRatio::UNITY);
        assert!(out.iter().all(|&s| s == 0.0));
    }
}
