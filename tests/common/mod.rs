#![allow(dead_code)]

use std::f32::consts::PI;

use pitchshift::core::new_buffer_lines;
use pitchshift::{EffectProps, EffectState, EffectTarget, MonoPanner, BUFFER_LINE_SIZE};
use rustfft::{num_complex::Complex, FftPlanner};

pub const SAMPLE_RATE: u32 = 44_100;

pub fn gen_sine(freq_hz: f32, sr: u32, n: usize, amp: f32) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let phase = 2.0 * PI * freq_hz * i as f32 / sr as f32;
            amp * phase.sin()
        })
        .collect()
}

pub fn gen_two_tone(
    freq_a: f32,
    amp_a: f32,
    freq_b: f32,
    amp_b: f32,
    sr: u32,
    n: usize,
) -> Vec<f32> {
    (0..n)
        .map(|i| {
            let t = i as f32 / sr as f32;
            amp_a * (2.0 * PI * freq_a * t).sin() + amp_b * (2.0 * PI * freq_b * t).sin()
        })
        .collect()
}

/// Deterministic white-ish noise in [-amp, amp] (xorshift32).
pub fn gen_noise(n: usize, amp: f32, seed: u32) -> Vec<f32> {
    let mut state = seed.max(1);
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32 * 2.0 - 1.0) * amp
        })
        .collect()
}

pub fn windowed_rms(signal: &[f32], start: usize, len: usize) -> f64 {
    let start = start.min(signal.len());
    let end = (start + len).min(signal.len());
    if end <= start {
        return 0.0;
    }
    let sum_sq: f64 = signal[start..end]
        .iter()
        .map(|&s| {
            let v = s as f64;
            v * v
        })
        .sum();
    (sum_sq / (end - start) as f64).sqrt()
}

/// Frequency of the strongest spectral peak in `signal[start..start + n]`
/// (Hann windowed, parabolic interpolation). `n` must be a power of two.
pub fn peak_frequency(signal: &[f32], sr: u32, start: usize, n: usize) -> f64 {
    assert!(n.is_power_of_two());
    assert!(start + n <= signal.len());
    let mut buf: Vec<Complex<f64>> = signal[start..start + n]
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let w = 0.5 - 0.5 * (2.0 * std::f64::consts::PI * i as f64 / n as f64).cos();
            Complex::new(s as f64 * w, 0.0)
        })
        .collect();
    FftPlanner::new().plan_fft_forward(n).process(&mut buf);

    let mags: Vec<f64> = buf[..n / 2].iter().map(|c| c.norm()).collect();
    let k = (1..mags.len() - 1)
        .max_by(|&a, &b| mags[a].total_cmp(&mags[b]))
        .unwrap_or(1);
    let (a, b, c) = (mags[k - 1], mags[k], mags[k + 1]);
    let denom = a - 2.0 * b + c;
    let offset = if denom.abs() > f64::EPSILON {
        0.5 * (a - c) / denom
    } else {
        0.0
    };
    (k as f64 + offset) * sr as f64 / n as f64
}

/// Width of one analysis bin of the vocoder, in Hz.
pub fn bin_hz(sr: u32) -> f64 {
    sr as f64 / pitchshift::core::STFT_SIZE as f64
}

/// Drives `effect` over `input` in blocks of `block` samples into a single
/// output channel. No latency compensation.
pub fn run_effect(
    effect: &mut dyn EffectState,
    props: &EffectProps,
    input: &[f32],
    block: usize,
) -> Vec<f32> {
    let block = block.clamp(1, BUFFER_LINE_SIZE);
    effect.update(
        props,
        &EffectTarget {
            slot_gain: 1.0,
            panner: &MonoPanner,
        },
    );
    let mut samples_in = new_buffer_lines(1);
    let mut samples_out = new_buffer_lines(1);
    let mut output = Vec::with_capacity(input.len());
    for chunk in input.chunks(block) {
        samples_in[0][..chunk.len()].copy_from_slice(chunk);
        samples_out[0][..chunk.len()].fill(0.0);
        effect.process(chunk.len(), &samples_in, &mut samples_out);
        output.extend_from_slice(&samples_out[0][..chunk.len()]);
    }
    output
}
