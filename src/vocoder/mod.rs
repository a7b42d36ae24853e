//! Phase vocoder stages and the block processor that runs them.
//!
//! Each hop flows framer -> forward transform -> [`Analyzer`] ->
//! [`BinRemapper`] -> [`Resynthesizer`] -> inverse transform -> framer.

pub mod analyzer;
pub mod framer;
pub mod phase;
pub mod phase_vocoder;
pub mod remap;
pub mod resynth;

pub use analyzer::Analyzer;
pub use framer::Framer;
pub use phase::{wrap_phase, wrap_unit};
pub use phase_vocoder::PhaseVocoder;
pub use remap::BinRemapper;
pub use resynth::Resynthesizer;
