//! Spectral transform contract and its rustfft-backed implementation.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Zero-valued complex number, used for FFT buffer initialization.
pub const COMPLEX_ZERO: Complex<f64> = Complex::new(0.0, 0.0);

/// Fixed-size, in-place complex DFT.
///
/// `forward` produces the unnormalized transform and `inverse` its
/// unnormalized counterpart, so a round trip scales by `size()`. Callers apply
/// normalization themselves. Implementations must not allocate or block in
/// either direction.
pub trait SpectralTransform: Send {
    /// Transform length in samples.
    fn size(&self) -> usize;

    /// Forward transform of `buffer` in place. `buffer.len()` equals `size()`.
    fn forward(&mut self, buffer: &mut [Complex<f64>]);

    /// Inverse transform of `buffer` in place. `buffer.len()` equals `size()`.
    fn inverse(&mut self, buffer: &mut [Complex<f64>]);
}

/// Pre-planned rustfft transform pair with its own scratch space.
pub struct RustFftTransform {
    size: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl RustFftTransform {
    /// Plans forward and inverse transforms of `size` points.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        Self {
            size,
            forward,
            inverse,
            scratch: vec![COMPLEX_ZERO; scratch_len],
        }
    }
}

impl SpectralTransform for RustFftTransform {
    #[inline]
    fn size(&self) -> usize {
        self.size
    }

    fn forward(&mut self, buffer: &mut [Complex<f64>]) {
        self.forward.process_with_scratch(buffer, &mut self.scratch);
    }

    fn inverse(&mut self, buffer: &mut [Complex<f64>]) {
        self.inverse.process_with_scratch(buffer, &mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_scales_by_size() {
        let mut fft = RustFftTransform::new(16);
        assert_eq!(fft.size(), 16);
        let input: Vec<Complex<f64>> = (0..16).map(|i| Complex::new(i as f64, 0.0)).collect();
        let mut buf = input.clone();
        fft.forward(&mut buf);
        fft.inverse(&mut buf);
        for (a, b) in input.iter().zip(buf.iter()) {
            assert!((a.re * 16.0 - b.re).abs() < 1e-9);
            assert!(b.im.abs() < 1e-9);
        }
    }

    #[test]
    fn test_forward_is_unnormalized() {
        let mut fft = RustFftTransform::new(8);
        let mut buf = vec![Complex::new(1.0, 0.0); 8];
        fft.forward(&mut buf);
        assert!((buf[0].re - 8.0).abs() < 1e-12);
        for c in &buf[1..] {
            assert!(c.norm() < 1e-12);
        }
    }
}
