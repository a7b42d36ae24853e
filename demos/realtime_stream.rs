//! Real-time streaming example.
//!
//! Runs the pitch shifter block by block on an "audio" thread while a
//! "control" thread sweeps the tuning through a handle, like a pitch knob
//! being turned during playback.
//!
//! Run with: cargo run --example realtime_stream

use std::f32::consts::PI;
use std::sync::mpsc;
use std::thread;

use pitchshift::core::new_buffer_lines;
use pitchshift::{
    DeviceParams, EffectState, EffectTarget, PitchShifterState, PshifterProps, StereoPanner,
    LATENCY_SAMPLES,
};

fn main() {
    let sample_rate = 44100u32;
    let block_size = 512;

    let mut effect = PitchShifterState::new();
    effect.device_update(&DeviceParams {
        sample_rate,
        num_channels: 2,
    });
    let handle = effect.handle();

    println!("Real-time Streaming Demo");
    println!(
        "Latency: {} samples ({:.1}ms)",
        LATENCY_SAMPLES,
        LATENCY_SAMPLES as f64 * 1000.0 / sample_rate as f64
    );

    // Control thread: sweep from -12 to +12 semitones, one step per message.
    let (tx, rx) = mpsc::channel::<()>();
    let control = thread::spawn(move || {
        let target = EffectTarget {
            slot_gain: 0.8,
            panner: &StereoPanner,
        };
        for coarse in -12..=12 {
            handle.update(&PshifterProps::new(coarse, 0), &target);
            if rx.recv().is_err() {
                break;
            }
        }
    });

    // Audio thread (here: main): 4 seconds of two-tone input.
    let total_samples = sample_rate as usize * 4;
    let mut samples_in = new_buffer_lines(1);
    let mut samples_out = new_buffer_lines(2);
    let mut peak = 0.0f32;
    let mut blocks = 0usize;

    let mut pos = 0;
    while pos < total_samples {
        let todo = block_size.min(total_samples - pos);
        for (i, s) in samples_in[0][..todo].iter_mut().enumerate() {
            let t = (pos + i) as f32 / sample_rate as f32;
            *s = 0.5 * (2.0 * PI * 440.0 * t).sin() + 0.3 * (2.0 * PI * 660.0 * t).sin();
        }
        for line in samples_out.iter_mut() {
            line[..todo].fill(0.0);
        }

        effect.process(todo, &samples_in, &mut samples_out);
        peak = samples_out
            .iter()
            .flat_map(|line| line[..todo].iter())
            .fold(peak, |p, &s| p.max(s.abs()));

        blocks += 1;
        if blocks % 16 == 0 {
            // Ask the control thread for the next tuning step.
            let _ = tx.send(());
        }
        pos += todo;
    }
    drop(tx);
    let _ = control.join();

    println!(
        "Input:  {} samples ({:.2}s)",
        total_samples,
        total_samples as f64 / sample_rate as f64
    );
    println!("Blocks processed: {}", blocks);
    println!("Final ratio: {:.4}", effect.pitch_ratio().as_f64());
    println!("Output peak: {:.3}", peak);
}
