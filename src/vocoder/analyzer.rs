//! Spectral analysis: magnitude and true bin frequency per analysis bin.

use std::f64::consts::FRAC_1_PI;

use rustfft::num_complex::Complex;

use crate::core::types::{FrequencyBin, NUM_BINS, OVERSAMPLE_FACTOR};
use crate::vocoder::phase::{wrap_unit, EXPECTED_CYCLES};

/// Converts a spectrum into (magnitude, fractional bin) pairs by tracking
/// the phase advance of each bin between consecutive hops.
#[derive(Debug, Clone)]
pub struct Analyzer {
    last_phase: Vec<f64>,
    bins: Vec<FrequencyBin>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            last_phase: vec![0.0; NUM_BINS],
            bins: vec![FrequencyBin::ZERO; NUM_BINS],
        }
    }

    pub fn reset(&mut self) {
        self.last_phase.fill(0.0);
        self.bins.fill(FrequencyBin::ZERO);
    }

    /// Analysis bins produced by the last call to [`analyze`](Self::analyze).
    #[inline]
    pub fn bins(&self) -> &[FrequencyBin] {
        &self.bins
    }

    /// Raw phases observed on the last hop.
    #[inline]
    pub fn last_phase(&self) -> &[f64] {
        &self.last_phase
    }

    /// Analyzes the non-redundant half of a forward-transformed frame.
    pub fn analyze(&mut self, spectrum: &[Complex<f64>]) {
        for (k, ((bin, last_phase), c)) in self
            .bins
            .iter_mut()
            .zip(self.last_phase.iter_mut())
            .zip(spectrum)
            .enumerate()
        {
            let magnitude = c.norm();
            let phase = c.arg();

            // The expected per-hop advance grows by 1/R of a cycle per bin,
            // so it repeats every R bins.
            let bin_offset = (k % OVERSAMPLE_FACTOR) as f64;
            let delta = (phase - *last_phase) - bin_offset * EXPECTED_CYCLES;
            *last_phase = phase;

            // Deviation from the bin centre, in bins.
            let deviation = wrap_unit(delta * FRAC_1_PI) * (0.5 * OVERSAMPLE_FACTOR as f64);

            *bin = FrequencyBin {
                magnitude,
                freq_bin: k as f64 + deviation,
            };
        }
    }
}
