//! Error types for the pitchshift crate.
//!
//! Only the control and offline paths can fail. Block processing is
//! infallible and never returns these.

use thiserror::Error;

/// Errors raised while configuring the effect or doing file I/O.
#[derive(Error, Debug)]
pub enum PitchShiftError {
    #[error("coarse tune {value} outside {min}..={max} semitones")]
    CoarseTuneOutOfRange { value: i32, min: i32, max: i32 },

    #[error("fine tune {value} outside {min}..={max} cents")]
    FineTuneOutOfRange { value: i32, min: i32, max: i32 },

    #[error("unknown effect type: {0}")]
    UnknownEffect(String),

    #[error("unsupported WAV layout: {0}")]
    UnsupportedWav(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PitchShiftError>;
