//! The silent effect: accepts every call and mixes nothing.

use log::debug;

use crate::core::types::BufferLine;
use crate::effect::params::EffectProps;
use crate::effect::{DeviceParams, EffectState, EffectTarget, EffectType};

#[derive(Debug, Default)]
pub struct NullState;

impl NullState {
    pub fn new() -> Self {
        Self
    }
}

impl EffectState for NullState {
    fn effect_type(&self) -> EffectType {
        EffectType::Null
    }

    fn device_update(&mut self, device: &DeviceParams) {
        debug!("null effect: device update at {} Hz", device.sample_rate);
    }

    fn update(&mut self, _props: &EffectProps, _target: &EffectTarget<'_>) {}

    fn process(
        &mut self,
        _samples_to_do: usize,
        _samples_in: &[BufferLine],
        _samples_out: &mut [BufferLine],
    ) {
    }
}
