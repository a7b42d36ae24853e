/// A single audio sample as exchanged with the host (32-bit float, range -1.0 to 1.0).
pub type Sample = f32;

/// Analysis frame length in samples. Must be a power of two.
pub const STFT_SIZE: usize = 1024;
/// Half the frame length.
pub const STFT_HALF_SIZE: usize = STFT_SIZE >> 1;
/// Number of overlapping analyses per frame period.
pub const OVERSAMPLE_FACTOR: usize = 4;
/// Number of new samples consumed between two analyses.
pub const STFT_STEP: usize = STFT_SIZE / OVERSAMPLE_FACTOR;
/// Number of non-redundant bins of a real signal's spectrum.
pub const NUM_BINS: usize = STFT_HALF_SIZE + 1;

const _: () = assert!(STFT_SIZE % OVERSAMPLE_FACTOR == 0);
const _: () = assert!(STFT_SIZE.is_power_of_two());

/// Delay between an input sample and its processed counterpart, in samples.
pub const LATENCY_SAMPLES: usize = STFT_SIZE;

/// Maximum number of samples handed over per processing call.
pub const BUFFER_LINE_SIZE: usize = 1024;

/// Capacity of the per-channel gain vectors (third-order ambisonics).
pub const MAX_OUTPUT_CHANNELS: usize = 16;

/// Shortest gain ramp applied when mixing a block into the output.
pub const MIN_CROSSFADE_SAMPLES: usize = 512;

/// One block of samples for a single channel.
pub type BufferLine = [Sample; BUFFER_LINE_SIZE];

/// Magnitude and fractional frequency (in bins) of one spectral component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrequencyBin {
    pub magnitude: f64,
    pub freq_bin: f64,
}

impl FrequencyBin {
    pub const ZERO: FrequencyBin = FrequencyBin {
        magnitude: 0.0,
        freq_bin: 0.0,
    };
}

/// Returns a zeroed buffer line on the heap.
pub fn new_buffer_line() -> Box<BufferLine> {
    Box::new([0.0; BUFFER_LINE_SIZE])
}

/// Returns `count` zeroed buffer lines.
pub fn new_buffer_lines(count: usize) -> Vec<BufferLine> {
    vec![[0.0; BUFFER_LINE_SIZE]; count]
}
