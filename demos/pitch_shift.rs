//! Pitch shifting example.
//!
//! Transposes a sine tone by a few intervals and reports the dominant output
//! frequency of each.
//!
//! Run with: cargo run --example pitch_shift

use std::f32::consts::PI;

use pitchshift::PshifterProps;
use rustfft::{num_complex::Complex, FftPlanner};

/// Frequency of the strongest FFT bin over `signal`, with parabolic
/// interpolation between neighbours.
fn dominant_frequency(signal: &[f32], sample_rate: u32) -> f64 {
    let n = signal.len().next_power_of_two() / 2;
    let start = signal.len() - n;
    let mut buf: Vec<Complex<f64>> = signal[start..]
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
    (k as f64 + offset) * sample_rate as f64 / n as f64
}

fn main() {
    let sample_rate = 44100u32;

    // Generate a 2-second 440 Hz (A4) sine wave
    let duration_secs = 2.0;
    let num_samples = (duration_secs * sample_rate as f32) as usize;
    let input: Vec<f32> = (0..num_samples)
        .map(|i| 0.5 * (2.0 * PI * 440.0 * i as f32 / sample_rate as f32).sin())
        .collect();

    println!("Pitch Shift Demo");
    println!(
        "Input: {} samples ({:.2}s), 440 Hz (A4)\n",
        input.len(),
        duration_secs
    );

    let shifts = [
        ("+1 semitone ", PshifterProps::new(1, 0)),
        ("+1 octave   ", PshifterProps::new(12, 0)),
        ("-1 octave   ", PshifterProps::new(-12, 0)),
        ("-5 semitones", PshifterProps::new(-5, 0)),
        ("+7 st -20 c ", PshifterProps::new(7, -20)),
    ];
    for (label, props) in shifts {
        let ratio = props.pitch_ratio().as_f64();
        let output = pitchshift::pitch_shift(&input, &props);
        println!(
            "{} (ratio {:.4}): expected ~{:.0} Hz, measured {:.1} Hz",
            label,
            ratio,
            440.0 * ratio,
            dominant_frequency(&output, sample_rate)
        );
    }

    println!(
        "\nAll outputs have the same length as input ({} samples).",
        input.len()
    );
}
