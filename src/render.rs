//! Offline rendering: drives an effect block by block over a whole signal.

use crate::core::types::{new_buffer_lines, Sample, BUFFER_LINE_SIZE};
use crate::effect::panning::{MonoPanner, Panner, StereoPanner};
use crate::effect::{DeviceParams, EffectProps, EffectState, EffectTarget};

/// Settings for [`render`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub sample_rate: u32,
    /// 1 renders mono, anything larger renders stereo.
    pub num_channels: usize,
    /// Samples per processing call, clamped to `1..=BUFFER_LINE_SIZE`.
    pub block_size: usize,
    pub slot_gain: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            num_channels: 1,
            block_size: BUFFER_LINE_SIZE,
            slot_gain: 1.0,
        }
    }
}

impl RenderOptions {
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_channels(mut self, num_channels: usize) -> Self {
        self.num_channels = num_channels;
        self
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_slot_gain(mut self, slot_gain: f32) -> Self {
        self.slot_gain = slot_gain;
        self
    }

    fn panner(&self) -> &'static dyn Panner {
        if self.num_channels > 1 {
            &StereoPanner
        } else {
            &MonoPanner
        }
    }
}

/// Runs mono `input` through `effect` and returns interleaved output with
/// the same number of frames.
///
/// The effect is reset first. The input is followed by the effect's latency
/// worth of silence, and that many leading output frames are dropped, so
/// output frame `n` lines up with input frame `n`.
pub fn render(
    effect: &mut dyn EffectState,
    props: &EffectProps,
    input: &[Sample],
    options: &RenderOptions,
) -> Vec<Sample> {
    let panner = options.panner();
    let num_channels = panner.num_channels();
    let block_size = options.block_size.clamp(1, BUFFER_LINE_SIZE);

    effect.device_update(&DeviceParams {
        sample_rate: options.sample_rate,
        num_channels,
    });
    effect.update(
        props,
        &EffectTarget {
            slot_gain: options.slot_gain,
            panner,
        },
    );

    let latency = effect.latency_samples();
    let total = input.len() + latency;
    let mut samples_in = new_buffer_lines(1);
    let mut samples_out = new_buffer_lines(num_channels);
    let mut output = Vec::with_capacity(input.len() * num_channels);

    let mut pos = 0;
    while pos < total {
        let todo = block_size.min(total - pos);

        let line = &mut samples_in[0][..todo];
        line.fill(0.0);
        if pos < input.len() {
            let avail = (input.len() - pos).min(todo);
            line[..avail].copy_from_slice(&input[pos..pos + avail]);
        }
        for out in samples_out.iter_mut() {
            out[..todo].fill(0.0);
        }

        effect.process(todo, &samples_in, &mut samples_out);

        for i in 0..todo {
            if pos + i >= latency {
                output.extend(samples_out.iter().map(|line| line[i]));
            }
        }
        pos += todo;
    }
    output
}
