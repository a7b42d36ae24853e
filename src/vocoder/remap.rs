//! Analysis-to-synthesis bin shifting.

use crate::core::fixed::PitchRatio;
use crate::core::types::{FrequencyBin, NUM_BINS, STFT_HALF_SIZE};

/// Moves analysis bins to `round(k * ratio)` and merges collisions.
///
/// Magnitudes landing on the same synthesis bin are summed. The carried
/// frequency comes from a contributor whose magnitude strictly exceeds the
/// destination's running total at the time it arrives, so a single dominant
/// partial keeps its frequency while weaker neighbours only add energy.
/// Unrelated partials sharing one bin can't be represented separately.
#[derive(Debug, Clone)]
pub struct BinRemapper {
    bins: Vec<FrequencyBin>,
}

impl Default for BinRemapper {
    fn default() -> Self {
        Self::new()
    }
}

impl BinRemapper {
    pub fn new() -> Self {
        Self {
            bins: vec![FrequencyBin::ZERO; NUM_BINS],
        }
    }

    pub fn reset(&mut self) {
        self.bins.fill(FrequencyBin::ZERO);
    }

    /// Synthesis bins produced by the last call to [`remap`](Self::remap).
    #[inline]
    pub fn bins(&self) -> &[FrequencyBin] {
        &self.bins
    }

    pub fn remap(&mut self, analysis: &[FrequencyBin], ratio: PitchRatio) {
        self.bins.fill(FrequencyBin::ZERO);

        let shift = ratio.as_f64();
        let bin_count = ratio.bin_count(NUM_BINS);
        for (k, src) in analysis.iter().enumerate().take(bin_count) {
            let j = ratio.scale_index(k, STFT_HALF_SIZE);
            let dst = &mut self.bins[j];
            if src.magnitude > dst.magnitude {
                dst.freq_bin = src.freq_bin * shift;
            }
            dst.magnitude += src.magnitude;
        }
    }
}
