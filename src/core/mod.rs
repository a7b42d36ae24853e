//! Core types, fixed-point ratio, window table, ring buffer and transform contract.

pub mod fft;
pub mod fixed;
pub mod ring_buffer;
pub mod types;
pub mod window;

pub use fft::{RustFftTransform, SpectralTransform};
pub use fixed::PitchRatio;
pub use ring_buffer::RingBuffer;
pub use types::*;
pub use window::{window, OUTPUT_SCALE, PASSTHROUGH_GAIN, STFT_WINDOW};
