//! Effect framework: a closed set of effect types behind one processing
//! interface, plus the factory that builds them.
//!
//! A host drives an effect in three ways:
//! - [`EffectState::device_update`] when the output device changes; clears all state
//! - [`EffectState::update`] when properties or routing change
//! - [`EffectState::process`] once per block on the audio thread

pub mod mixer;
pub mod null;
pub mod panning;
pub mod params;
pub mod pshifter;
pub mod shared;

use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::types::BufferLine;
use crate::error::PitchShiftError;

pub use mixer::{mix_samples, GAIN_SILENCE_THRESHOLD};
pub use null::NullState;
pub use panning::{MonoPanner, Panner, StereoPanner};
pub use params::{load_props, save_props, EffectProps, PshifterProps};
pub use pshifter::PitchShifterState;
pub use shared::{PitchShifterHandle, SharedParams};

/// Output device format an effect is prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceParams {
    pub sample_rate: u32,
    pub num_channels: usize,
}

impl Default for DeviceParams {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            num_channels: 2,
        }
    }
}

/// Routing of an effect's output: slot gain and the panner for the output
/// channel layout.
#[derive(Clone, Copy)]
pub struct EffectTarget<'a> {
    pub slot_gain: f32,
    pub panner: &'a dyn Panner,
}

impl fmt::Debug for EffectTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectTarget")
            .field("slot_gain", &self.slot_gain)
            .field("channels", &self.panner.num_channels())
            .finish()
    }
}

/// Processing interface shared by every effect type.
pub trait EffectState: Send {
    fn effect_type(&self) -> EffectType;

    /// Clears all processing state for a (possibly new) device.
    fn device_update(&mut self, device: &DeviceParams);

    /// Applies properties and routing. Props for another effect type are
    /// ignored.
    fn update(&mut self, props: &EffectProps, target: &EffectTarget<'_>);

    /// Processes `samples_to_do` samples of `samples_in`, mixing the result
    /// into `samples_out`. Never allocates, blocks or fails.
    fn process(
        &mut self,
        samples_to_do: usize,
        samples_in: &[BufferLine],
        samples_out: &mut [BufferLine],
    );

    /// Delay from input to output in samples.
    fn latency_samples(&self) -> usize {
        0
    }
}

/// Every effect this crate can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Null,
    PitchShifter,
}

impl EffectType {
    pub const ALL: [EffectType; 2] = [EffectType::Null, EffectType::PitchShifter];

    pub fn name(&self) -> &'static str {
        match self {
            EffectType::Null => "null",
            EffectType::PitchShifter => "pitch_shifter",
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectType {
    type Err = PitchShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "null" | "none" => Ok(EffectType::Null),
            "pitch_shifter" | "pitch-shifter" | "pshifter" => Ok(EffectType::PitchShifter),
            _ => Err(PitchShiftError::UnknownEffect(s.to_string())),
        }
    }
}

/// Builds a zeroed instance of `effect_type`.
pub fn create_effect(effect_type: EffectType) -> Box<dyn EffectState> {
    debug!("Creating {} effect", effect_type);
    match effect_type {
        EffectType::Null => Box::new(NullState::new()),
        EffectType::PitchShifter => Box::new(PitchShifterState::new()),
    }
}
