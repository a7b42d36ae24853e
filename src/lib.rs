#![forbid(unsafe_code)]
//! Real-time phase vocoder pitch shifter.
//!
//! `pitchshift` transposes a mono sample stream by up to two octaves while
//! keeping its timing. Each block is framed into overlapping 1024-sample
//! windows, analyzed for the true frequency of every bin, remapped by the
//! pitch ratio, resynthesized and overlap-added back. Latency is a constant
//! [`LATENCY_SAMPLES`]; processing never allocates, locks or fails.
//!
//! # Quick Start
//!
//! ```
//! use pitchshift::PshifterProps;
//!
//! // 1 second of 440 Hz sine at 44.1 kHz
//! let input: Vec<f32> = (0..44100)
//!     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
//!     .collect();
//!
//! // Up a fifth
//! let output = pitchshift::pitch_shift(&input, &PshifterProps::new(7, 0));
//! assert_eq!(output.len(), input.len());
//! ```
//!
//! # Real-time use
//!
//! Hosts drive an effect through [`EffectState`] and update it from a control
//! thread through a [`PitchShifterHandle`]:
//!
//! ```
//! use pitchshift::{
//!     core::new_buffer_lines, DeviceParams, EffectState, EffectTarget, PitchShifterState,
//!     PshifterProps, StereoPanner,
//! };
//!
//! let mut effect = PitchShifterState::new();
//! effect.device_update(&DeviceParams { sample_rate: 48000, num_channels: 2 });
//!
//! let handle = effect.handle();
//! handle.update(
//!     &PshifterProps::new(-12, 0),
//!     &EffectTarget { slot_gain: 1.0, panner: &StereoPanner },
//! );
//!
//! let samples_in = new_buffer_lines(1);
//! let mut samples_out = new_buffer_lines(2);
//! effect.process(256, &samples_in, &mut samples_out);
//! ```

pub mod core;
pub mod effect;
pub mod error;
pub mod io;
pub mod render;
pub mod vocoder;

pub use crate::core::types::{BufferLine, Sample, BUFFER_LINE_SIZE, LATENCY_SAMPLES};
pub use crate::core::PitchRatio;
pub use effect::{
    create_effect, DeviceParams, EffectProps, EffectState, EffectTarget, EffectType, MonoPanner,
    Panner, PitchShifterHandle, PitchShifterState, PshifterProps, StereoPanner,
};
pub use error::{PitchShiftError, Result};
pub use render::{render, RenderOptions};
pub use vocoder::PhaseVocoder;

/// Pitch-shifts a whole mono signal and returns the result aligned to the
/// input (latency removed).
pub fn pitch_shift(input: &[Sample], props: &PshifterProps) -> Vec<Sample> {
    let mut effect = PitchShifterState::new();
    render(
        &mut effect,
        &EffectProps::PitchShifter(*props),
        input,
        &RenderOptions::default(),
    )
}
