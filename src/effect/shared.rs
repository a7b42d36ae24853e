//! Lock-free parameter cell between the control thread and the audio thread.
//!
//! Writers only overwrite whole fields and readers tolerate seeing a mix of
//! old and new values for at most one block, so every access is Relaxed.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use atomic_float::AtomicF32;
use log::trace;

use crate::core::fixed::{PitchRatio, FRAC_ONE};
use crate::core::types::MAX_OUTPUT_CHANNELS;
use crate::effect::params::PshifterProps;
use crate::effect::EffectTarget;

/// Source direction of the shifted signal: straight ahead.
pub const FRONT_DIRECTION: [f32; 3] = [0.0, 0.0, -1.0];

/// Pitch ratio and target gains of one pitch shifter.
#[derive(Debug)]
pub struct SharedParams {
    ratio: AtomicU32,
    target_gains: [AtomicF32; MAX_OUTPUT_CHANNELS],
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedParams {
    /// Unity ratio, all gains silent.
    pub fn new() -> Self {
        Self {
            ratio: AtomicU32::new(FRAC_ONE),
            target_gains: std::array::from_fn(|_| AtomicF32::new(0.0)),
        }
    }

    #[inline]
    pub fn ratio(&self) -> PitchRatio {
        PitchRatio::from_fixed(self.ratio.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_ratio(&self, ratio: PitchRatio) {
        self.ratio.store(ratio.fixed(), Ordering::Relaxed);
    }

    /// Copies the target gains into `out`; extra entries are left alone.
    #[inline]
    pub fn load_target_gains(&self, out: &mut [f32]) {
        for (dst, gain) in out.iter_mut().zip(&self.target_gains) {
            *dst = gain.load(Ordering::Relaxed);
        }
    }

    /// Stores `gains`; channels past its end are set silent.
    pub fn store_target_gains(&self, gains: &[f32]) {
        for (i, cell) in self.target_gains.iter().enumerate() {
            cell.store(gains.get(i).copied().unwrap_or(0.0), Ordering::Relaxed);
        }
    }

    /// Recomputes ratio and target gains from tuning and routing.
    pub fn apply(&self, props: &PshifterProps, target: &EffectTarget<'_>) {
        let ratio = props.pitch_ratio();
        self.set_ratio(ratio);

        let mut gains = [0.0f32; MAX_OUTPUT_CHANNELS];
        target
            .panner
            .pan_gains(FRONT_DIRECTION, target.slot_gain, &mut gains);
        self.store_target_gains(&gains);

        trace!(
            "pitch shifter update: {} cents, ratio {:#x} ({:.6}), gains {:?}",
            props.total_cents(),
            ratio.fixed(),
            ratio.as_f64(),
            &gains[..target.panner.num_channels().min(MAX_OUTPUT_CHANNELS)]
        );
    }

    /// Back to unity ratio and silent gains.
    pub fn reset(&self) {
        self.set_ratio(PitchRatio::UNITY);
        self.store_target_gains(&[]);
    }
}

/// Control-side handle to a running pitch shifter.
///
/// Cloneable and `Send + Sync`; updates through it reach the effect at the
/// start of its next processing call.
#[derive(Debug, Clone)]
pub struct PitchShifterHandle {
    shared: Arc<SharedParams>,
}

impl PitchShifterHandle {
    pub(crate) fn new(shared: Arc<SharedParams>) -> Self {
        Self { shared }
    }

    pub fn update(&self, props: &PshifterProps, target: &EffectTarget<'_>) {
        self.shared.apply(props, target);
    }

    pub fn pitch_ratio(&self) -> PitchRatio {
        self.shared.ratio()
    }

    pub fn target_gains(&self) -> [f32; MAX_OUTPUT_CHANNELS] {
        let mut gains = [0.0; MAX_OUTPUT_CHANNELS];
        self.shared.load_target_gains(&mut gains);
        gains
    }
}
