//! Direction-to-gain mapping for the output channels.

use std::f32::consts::FRAC_PI_2;

/// Computes per-channel gains for a source at `direction`.
///
/// `direction` is a unit vector in OpenAL orientation: +x right, +y up,
/// -z forward.
pub trait Panner: Send + Sync {
    /// Number of output channels this panner drives.
    fn num_channels(&self) -> usize;

    /// Writes `num_channels()` gains, each scaled by `gain`, into `out`.
    /// Entries past `num_channels()` are zeroed.
    fn pan_gains(&self, direction: [f32; 3], gain: f32, out: &mut [f32]);
}

/// Single-channel output; direction is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonoPanner;

impl Panner for MonoPanner {
    fn num_channels(&self) -> usize {
        1
    }

    fn pan_gains(&self, _direction: [f32; 3], gain: f32, out: &mut [f32]) {
        out.fill(0.0);
        if let Some(first) = out.first_mut() {
            *first = gain;
        }
    }
}

/// Left/right output with an equal-power law on the direction's x component.
#[derive(Debug, Clone, Copy, Default)]
pub struct StereoPanner;

impl Panner for StereoPanner {
    fn num_channels(&self) -> usize {
        2
    }

    fn pan_gains(&self, direction: [f32; 3], gain: f32, out: &mut [f32]) {
        out.fill(0.0);
        // pan: -1.0 = full left, 0.0 = center, 1.0 = full right
        let pan = if direction[0].is_finite() {
            direction[0].clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let angle = (pan + 1.0) * 0.5 * FRAC_PI_2;
        if let [left, right, ..] = out {
            *left = angle.cos() * gain;
            *right = angle.sin() * gain;
        }
    }
}
