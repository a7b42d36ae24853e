//! Gain-ramped mixing of a mono line into multichannel output.

use crate::core::types::{BufferLine, Sample, BUFFER_LINE_SIZE};

/// Gains at or below this are treated as silent.
pub const GAIN_SILENCE_THRESHOLD: f32 = 0.00001;

/// Adds `input` into each line of `outputs`, starting at `out_pos`.
///
/// Each channel's gain moves linearly from `current_gains[c]` toward
/// `target_gains[c]` over `counter` samples, then holds. `current_gains` is
/// updated to where the ramp stopped so the next call continues from there.
/// Channels beyond the length of either gain slice are left untouched.
pub fn mix_samples(
    input: &[Sample],
    outputs: &mut [BufferLine],
    current_gains: &mut [f32],
    target_gains: &[f32],
    counter: usize,
    out_pos: usize,
) {
    let len = input.len().min(BUFFER_LINE_SIZE.saturating_sub(out_pos));
    if len == 0 {
        return;
    }
    let input = &input[..len];
    let delta = if counter > 0 { 1.0 / counter as f32 } else { 0.0 };
    let min_len = len.min(counter);

    for ((line, gain), &target) in outputs
        .iter_mut()
        .zip(current_gains.iter_mut())
        .zip(target_gains)
    {
        let dst = &mut line[out_pos..out_pos + len];
        let mut pos = 0;

        let step = (target - *gain) * delta;
        if step.abs() > f32::EPSILON {
            let start = *gain;
            for (i, (out, &s)) in dst.iter_mut().zip(input).take(min_len).enumerate() {
                *out += s * (start + step * i as f32);
            }
            pos = min_len;
            *gain = if pos == counter {
                target
            } else {
                start + step * pos as f32
            };
        } else {
            *gain = target;
        }

        if gain.abs() <= GAIN_SILENCE_THRESHOLD {
            continue;
        }
        let g = *gain;
        for (out, &s) in dst[pos..].iter_mut().zip(&input[pos..]) {
            *out += s * g;
        }
    }
}
