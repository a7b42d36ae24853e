//! Pitch shifter effect.
//!
//! Runs the first input line through a [`PhaseVocoder`] into a private mono
//! line, then mixes that line into every output channel with smoothed gains.

use std::sync::Arc;

use log::{debug, warn};

use crate::core::types::{
    new_buffer_line, BufferLine, BUFFER_LINE_SIZE, LATENCY_SAMPLES, MAX_OUTPUT_CHANNELS,
    MIN_CROSSFADE_SAMPLES,
};
use crate::core::PitchRatio;
use crate::effect::mixer::mix_samples;
use crate::effect::params::EffectProps;
use crate::effect::shared::{PitchShifterHandle, SharedParams};
use crate::effect::{DeviceParams, EffectState, EffectTarget, EffectType};
use crate::vocoder::PhaseVocoder;

pub struct PitchShifterState {
    vocoder: PhaseVocoder,
    buffer_out: Box<BufferLine>,
    current_gains: [f32; MAX_OUTPUT_CHANNELS],
    /// Audio-side copy of the shared target gains, refreshed once per call.
    target_gains: [f32; MAX_OUTPUT_CHANNELS],
    shared: Arc<SharedParams>,
}

impl Default for PitchShifterState {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchShifterState {
    pub fn new() -> Self {
        Self {
            vocoder: PhaseVocoder::new(),
            buffer_out: new_buffer_line(),
            current_gains: [0.0; MAX_OUTPUT_CHANNELS],
            target_gains: [0.0; MAX_OUTPUT_CHANNELS],
            shared: Arc::new(SharedParams::new()),
        }
    }

    /// Handle for pushing updates from another thread.
    pub fn handle(&self) -> PitchShifterHandle {
        PitchShifterHandle::new(Arc::clone(&self.shared))
    }

    pub fn pitch_ratio(&self) -> PitchRatio {
        self.shared.ratio()
    }

    /// Gains the mixer ended the last block on.
    pub fn current_gains(&self) -> &[f32; MAX_OUTPUT_CHANNELS] {
        &self.current_gains
    }

    pub fn vocoder(&self) -> &PhaseVocoder {
        &self.vocoder
    }
}

impl EffectState for PitchShifterState {
    fn effect_type(&self) -> EffectType {
        EffectType::PitchShifter
    }

    fn device_update(&mut self, device: &DeviceParams) {
        self.vocoder.reset();
        self.buffer_out.fill(0.0);
        self.current_gains = [0.0; MAX_OUTPUT_CHANNELS];
        self.target_gains = [0.0; MAX_OUTPUT_CHANNELS];
        self.shared.reset();
        debug!(
            "pitch shifter reset for {} Hz, {} channels",
            device.sample_rate, device.num_channels
        );
    }

    fn update(&mut self, props: &EffectProps, target: &EffectTarget<'_>) {
        match props {
            EffectProps::PitchShifter(props) => self.shared.apply(props, target),
            other => warn!(
                "pitch shifter ignoring props for {} effect",
                other.effect_type()
            ),
        }
    }

    fn process(
        &mut self,
        samples_to_do: usize,
        samples_in: &[BufferLine],
        samples_out: &mut [BufferLine],
    ) {
        let Some(input) = samples_in.first() else {
            return;
        };
        let samples_to_do = samples_to_do.min(BUFFER_LINE_SIZE);
        let ratio = self.shared.ratio();

        let buffer_out = &mut self.buffer_out[..samples_to_do];
        self.vocoder
            .process(&input[..samples_to_do], buffer_out, ratio);

        self.shared.load_target_gains(&mut self.target_gains);
        let num_channels = samples_out.len().min(MAX_OUTPUT_CHANNELS);
        mix_samples(
            &self.buffer_out[..samples_to_do],
            &mut samples_out[..num_channels],
            &mut self.current_gains[..num_channels],
            &self.target_gains[..num_channels],
            samples_to_do.max(MIN_CROSSFADE_SAMPLES),
            0,
        );
    }

    fn latency_samples(&self) -> usize {
        LATENCY_SAMPLES
    }
}
