//! WAV reading and writing through hound.

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::info;

use crate::core::types::Sample;
use crate::error::{PitchShiftError, Result};

/// Decoded WAV contents, samples interleaved and scaled to [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct WavAudio {
    pub samples: Vec<Sample>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl WavAudio {
    pub fn new(samples: Vec<Sample>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    /// Number of sample frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        if self.channels == 0 {
            return 0;
        }
        self.samples.len() / self.channels as usize
    }

    /// Averages all channels into one.
    pub fn to_mono(&self) -> Vec<Sample> {
        match self.channels {
            0 => Vec::new(),
            1 => self.samples.clone(),
            n => {
                let scale = 1.0 / n as f32;
                self.samples
                    .chunks_exact(n as usize)
                    .map(|frame| frame.iter().sum::<f32>() * scale)
                    .collect()
            }
        }
    }
}

/// Reads a mono or stereo WAV file in any integer or 32-bit float format.
pub fn read_wav_file(path: impl AsRef<Path>) -> Result<WavAudio> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    if !(1..=2).contains(&spec.channels) {
        return Err(PitchShiftError::UnsupportedWav(format!(
            "{} channels (only mono and stereo are supported)",
            spec.channels
        )));
    }

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            if spec.bits_per_sample == 0 || spec.bits_per_sample > 32 {
                return Err(PitchShiftError::UnsupportedWav(format!(
                    "{}-bit integer samples",
                    spec.bits_per_sample
                )));
            }
            let scale = 1.0 / (1u64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    info!(
        "Read {}: {} Hz, {} channel(s), {}-bit {:?}, {} frames",
        path.display(),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format,
        samples.len() / spec.channels as usize
    );
    Ok(WavAudio::new(samples, spec.sample_rate, spec.channels))
}

/// Writes interleaved samples as a 32-bit float WAV file, clamped to [-1.0, 1.0].
pub fn write_wav_file_float(path: impl AsRef<Path>, audio: &WavAudio) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: audio.channels,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &s in &audio.samples {
        writer.write_sample(s.clamp(-1.0, 1.0))?;
    }
    writer.finalize()?;
    info!(
        "Wrote {}: {} Hz, {} channel(s), {} frames",
        path.display(),
        audio.sample_rate,
        audio.channels,
        audio.num_frames()
    );
    Ok(())
}
