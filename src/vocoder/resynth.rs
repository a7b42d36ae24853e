//! Phase accumulation and spectrum reconstruction.

use rustfft::num_complex::Complex;

use crate::core::types::{FrequencyBin, NUM_BINS};
use crate::vocoder::phase::{wrap_phase, EXPECTED_CYCLES};

/// Integrates each synthesis bin's frequency into a running phase and
/// rebuilds a conjugate-symmetric spectrum from it.
#[derive(Debug, Clone)]
pub struct Resynthesizer {
    sum_phase: Vec<f64>,
}

impl Default for Resynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Resynthesizer {
    pub fn new() -> Self {
        Self {
            sum_phase: vec![0.0; NUM_BINS],
        }
    }

    pub fn reset(&mut self) {
        self.sum_phase.fill(0.0);
    }

    /// Accumulated synthesis phase per bin, always within [-π, π].
    #[inline]
    pub fn sum_phase(&self) -> &[f64] {
        &self.sum_phase
    }

    /// Writes the full spectrum for `bins` into `spectrum`.
    ///
    /// The first `NUM_BINS` entries come from the bins; the rest mirror them
    /// as complex conjugates so the inverse transform is real.
    pub fn synthesize(&mut self, bins: &[FrequencyBin], spectrum: &mut [Complex<f64>]) {
        for ((sum_phase, bin), out) in self
            .sum_phase
            .iter_mut()
            .zip(bins)
            .zip(spectrum.iter_mut())
        {
            // Wrapping keeps the integrator from losing precision as it grows.
            *sum_phase = wrap_phase(*sum_phase + bin.freq_bin * EXPECTED_CYCLES);
            *out = Complex::from_polar(bin.magnitude, *sum_phase);
        }

        let size = spectrum.len();
        for k in NUM_BINS..size {
            spectrum[k] = spectrum[size - k].conj();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fft::COMPLEX_ZERO;
    use crate::core::types::STFT_SIZE;
    use std::f64::consts::PI;

    #[test]
    fn test_conjugate_symmetry() {
        let bins: Vec<FrequencyBin> = (0..NUM_BINS)
            .map(|k| FrequencyBin {
                magnitude: 1.0 + k as f64 * 0.01,
                freq_bin: k as f64 * 1.37,
            })
            .collect();
        let mut r = Resynthesizer::new();
        let mut spectrum = vec![COMPLEX_ZERO; STFT_SIZE];
        r.synthesize(&bins, &mut spectrum);
        for k in 1..STFT_SIZE / 2 {
            assert_eq!(spectrum[STFT_SIZE - k], spectrum[k].conj());
        }
        assert!((spectrum[5].norm() - bins[5].magnitude).abs() < 1e-12);
    }

    #[test]
    fn test_phase_advances_quarter_cycle_per_bin() {
        let mut bins = vec![FrequencyBin::ZERO; NUM_BINS];
        bins[1] = FrequencyBin { magnitude: 1.0, freq_bin: 1.0 };
        let mut r = Resynthesizer::new();
        let mut spectrum = vec![COMPLEX_ZERO; STFT_SIZE];
        r.synthesize(&bins, &mut spectrum);
        assert!((r.sum_phase()[1] - PI / 2.0).abs() < 1e-12);
        r.synthesize(&bins, &mut spectrum);
        assert!((r.sum_phase()[1].abs() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_phase_stays_bounded_over_many_hops() {
        let bins: Vec<FrequencyBin> = (0..NUM_BINS)
            .map(|k| FrequencyBin {
                magnitude: 1.0,
                freq_bin: k as f64 * 3.7 + 0.123,
            })
            .collect();
        let mut r = Resynthesizer::new();
        let mut spectrum = vec![COMPLEX_ZERO; STFT_SIZE];
        for _ in 0..10_000 {
            r.synthesize(&bins, &mut spectrum);
            assert!(r.sum_phase().iter().all(|&p| p.abs() <= PI + 1e-9));
        }
    }

    #[test]
    fn test_reset() {
        let bins = vec![FrequencyBin { magnitude: 1.0, freq_bin: 2.5 }; NUM_BINS];
        let mut r = Resynthesizer::new();
        let mut spectrum = vec![COMPLEX_ZERO; STFT_SIZE];
        r.synthesize(&bins, &mut spectrum);
        r.reset();
        assert!(r.sum_phase().iter().all(|&p| p == 0.0));
    }
}
