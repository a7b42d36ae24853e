//! Fixed-point pitch ratio.
//!
//! The ratio is kept as an unsigned integer with [`FRAC_BITS`] fractional
//! bits so that analysis-to-synthesis bin mapping rounds identically on every
//! platform. The floating value used to rescale frequencies is derived from the
//! integer, never stored separately, so the two can't disagree.

/// Fractional bits of the fixed-point ratio.
pub const FRAC_BITS: u32 = 16;
/// Fixed-point representation of 1.0.
pub const FRAC_ONE: u32 = 1 << FRAC_BITS;
/// Fixed-point representation of 0.5, used for round-half-up.
pub const FRAC_HALF: u32 = FRAC_ONE >> 1;

/// Pitch ratio in 16.16 fixed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PitchRatio {
    fixed: u32,
}

impl Default for PitchRatio {
    fn default() -> Self {
        Self::UNITY
    }
}

impl PitchRatio {
    /// A ratio of exactly 1.0.
    pub const UNITY: PitchRatio = PitchRatio { fixed: FRAC_ONE };

    /// Creates a ratio from a raw fixed-point value.
    #[inline]
    pub const fn from_fixed(fixed: u32) -> Self {
        Self { fixed }
    }

    /// Converts a floating ratio, truncating toward zero.
    ///
    /// Negative and NaN inputs become 0; values too large for the integer
    /// saturate.
    #[inline]
    pub fn from_f32(ratio: f32) -> Self {
        Self {
            fixed: (ratio * FRAC_ONE as f32) as u32,
        }
    }

    /// Ratio for a transposition of `cents` (2^(cents/1200)).
    #[inline]
    pub fn from_cents(cents: i32) -> Self {
        Self::from_f32(2.0f32.powf(cents as f32 / 1200.0))
    }

    /// Raw fixed-point value.
    #[inline]
    pub fn fixed(&self) -> u32 {
        self.fixed
    }

    /// Floating value of the fixed-point ratio.
    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.fixed as f64 * (1.0 / FRAC_ONE as f64)
    }

    /// Destination index for source index `k`: round(k * ratio), half up.
    ///
    /// The result is clamped to `max_index`.
    #[inline]
    pub fn scale_index(&self, k: usize, max_index: usize) -> usize {
        let scaled = (k as u64 * self.fixed as u64 + FRAC_HALF as u64) >> FRAC_BITS;
        (scaled.min(max_index as u64)) as usize
    }

    /// Number of leading source indices whose scaled index stays below
    /// `num_bins`.
    ///
    /// A zero ratio maps everything onto index 0, so every index qualifies.
    #[inline]
    pub fn bin_count(&self, num_bins: usize) -> usize {
        if self.fixed == 0 {
            return num_bins;
        }
        let bin_limit = ((num_bins as u64) << FRAC_BITS) - FRAC_HALF as u64 - 1;
        let count = bin_limit / self.fixed as u64 + 1;
        count.min(num_bins as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unity() {
        assert_eq!(PitchRatio::UNITY.fixed(), 65536);
        assert_eq!(PitchRatio::UNITY.as_f64(), 1.0);
        assert_eq!(PitchRatio::from_cents(0), PitchRatio::UNITY);
        assert_eq!(PitchRatio::default(), PitchRatio::UNITY);
    }

    #[test]
    fn test_octaves_are_exact() {
        assert_eq!(PitchRatio::from_cents(1200).fixed(), 2 * FRAC_ONE);
        assert_eq!(PitchRatio::from_cents(-1200).fixed(), FRAC_ONE / 2);
        assert_eq!(PitchRatio::from_cents(1200).as_f64(), 2.0);
    }

    #[test]
    fn test_semitone_truncates() {
        let r = PitchRatio::from_cents(100);
        let expected = (2.0f32.powf(100.0 / 1200.0) * 65536.0) as u32;
        assert_eq!(r.fixed(), expected);
        assert!((r.as_f64() - 1.059463).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_inputs_saturate() {
        assert_eq!(PitchRatio::from_f32(-1.0).fixed(), 0);
        assert_eq!(PitchRatio::from_f32(f32::NAN).fixed(), 0);
        assert_eq!(PitchRatio::from_f32(f32::INFINITY).fixed(), u32::MAX);
    }

    #[test]
    fn test_scale_index_rounds_half_up() {
        let r = PitchRatio::from_fixed(FRAC_ONE + FRAC_HALF); // 1.5
        assert_eq!(r.scale_index(0, 512), 0);
        assert_eq!(r.scale_index(1, 512), 2); // 1.5 -> 2
        assert_eq!(r.scale_index(2, 512), 3);
        assert_eq!(r.scale_index(3, 512), 5); // 4.5 -> 5
    }

    #[test]
    fn test_scale_index_clamped() {
        let r = PitchRatio::from_cents(2400);
        assert_eq!(r.scale_index(512, 512), 512);
    }

    #[test]
    fn test_bin_count_unity_scans_everything() {
        assert_eq!(PitchRatio::UNITY.bin_count(513), 513);
        assert_eq!(PitchRatio::from_cents(-1200).bin_count(513), 513);
    }

    #[test]
    fn test_bin_count_octave_up() {
        // k * 2 rounds to <= 512 for k <= 256.
        assert_eq!(PitchRatio::from_cents(1200).bin_count(513), 257);
    }

    #[test]
    fn test_bin_count_keeps_last_destination_in_range() {
        for fixed in [1u32, 1000, 65535, 65536, 65537, 100_000, 131_072, 262_144, u32::MAX] {
            let r = PitchRatio::from_fixed(fixed);
            let count = r.bin_count(513);
            assert!(count >= 1);
            let last = (count as u64 - 1) * fixed as u64 + FRAC_HALF as u64;
            assert!(last >> FRAC_BITS <= 512, "fixed {} overflowed", fixed);
            if count < 513 {
                let next = count as u64 * fixed as u64 + FRAC_HALF as u64;
                assert!(next >> FRAC_BITS > 512, "fixed {} under-scanned", fixed);
            }
        }
    }

    #[test]
    fn test_zero_ratio_does_not_divide() {
        let r = PitchRatio::from_fixed(0);
        assert_eq!(r.bin_count(513), 513);
        assert_eq!(r.scale_index(400, 512), 0);
    }
}
