/// Number of transport words per DMA buffer.
pub const BUFFER_LENGTH: usize = 512;

/// Number of entries in the default sine wavetable (indexed by the top 12 accumulator bits).
pub const WAVETABLE_SIZE: usize = 4096;

/// Default tuning word: `2^32 / 100`, one waveform period every 100 samples.
pub const DEFAULT_TUNING_WORD: u32 = 42_949_673;

/// Mask applied to each table value before it is written to the buffer.
///
/// The I2S transmitter is configured for right-justified 16-bit words, so only
/// the low half of each `u32` is significant.
pub const SAMPLE_MASK: u32 = 0x0000_FFFF;

/// Nominal output sample rate in Hz.
pub const SAMPLE_RATE_HZ: u32 = 44_100;

/// Bits per sample handed to the transport.
pub const WORD_BITS: u8 = 16;

/// Interleaved channels per frame.
pub const CHANNEL_COUNT: u8 = 2;

/// Frame length passed to the I2S driver with each transfer.
pub const FRAME_LENGTH: u32 = 512;
