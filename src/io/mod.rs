//! File I/O for the offline renderer and tests.

pub mod wav;

pub use wav::{read_wav_file, write_wav_file_float, WavAudio};
