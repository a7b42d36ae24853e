//! Analysis/synthesis window.
//!
//! A single squared-sine (Hann) table is shared read-only by every pitch
//! shifter instance. It is built on first use and never torn down.

use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::core::types::{OVERSAMPLE_FACTOR, STFT_HALF_SIZE, STFT_SIZE, STFT_STEP};

/// Process-wide window table, applied on both analysis and synthesis.
pub static STFT_WINDOW: LazyLock<[f64; STFT_SIZE]> = LazyLock::new(hann_window);

/// Sum of the squared window over all overlapping hops.
///
/// For the squared-sine window this is 3R/8 at every sample position.
pub const WINDOW_OLA_GAIN: f64 = 3.0 * OVERSAMPLE_FACTOR as f64 / 8.0;

/// Scale applied to every resynthesized frame before overlap-add: 4 / (R * N).
pub const OUTPUT_SCALE: f64 = 4.0 / (OVERSAMPLE_FACTOR * STFT_SIZE) as f64;

/// Gain of the whole chain at unity ratio.
///
/// The unnormalized inverse transform contributes N, the two window passes
/// sum to `WINDOW_OLA_GAIN` over the overlapping hops, and `OUTPUT_SCALE`
/// takes the rest. With the squared-sine window at R = 4 this is 1.5.
pub const PASSTHROUGH_GAIN: f64 = STFT_SIZE as f64 * WINDOW_OLA_GAIN * OUTPUT_SCALE;

/// Returns the shared window table.
#[inline]
pub fn window() -> &'static [f64; STFT_SIZE] {
    &STFT_WINDOW
}

/// Builds a periodic Hann window sampled at half-sample offsets, so the
/// first and last weights are small but non-zero and the table is exactly
/// symmetric.
fn hann_window() -> [f64; STFT_SIZE] {
    let mut table = [0.0; STFT_SIZE];
    let scale = PI / STFT_SIZE as f64;
    for i in 0..STFT_HALF_SIZE {
        let val = ((i as f64 + 0.5) * scale).sin();
        table[i] = val * val;
        table[STFT_SIZE - 1 - i] = val * val;
    }
    table
}

/// Sum of `window[n + r * hop]^2` over every hop offset that lands in the
/// frame, for position `n` within the first hop.
pub fn squared_overlap_sum(window: &[f64], hop: usize, n: usize) -> f64 {
    if hop == 0 {
        return 0.0;
    }
    window
        .iter()
        .skip(n)
        .step_by(hop)
        .map(|&w| w * w)
        .sum()
}

/// Largest deviation of the squared overlap sum from `WINDOW_OLA_GAIN`
/// across one hop.
pub fn cola_deviation(window: &[f64]) -> f64 {
    (0..STFT_STEP)
        .map(|n| (squared_overlap_sum(window, STFT_STEP, n) - WINDOW_OLA_GAIN).abs())
        .fold(0.0, f64::max)
}
