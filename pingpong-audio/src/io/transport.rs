//! Interface to the DMA transport that moves buffers to the I2S peripheral.
//!
//! The transport driver itself (channel setup, register programming, start
//! and stop) lives outside this crate. The exchange controller only needs two
//! capabilities from it: start a transfer and report when one finishes.

use crate::constants::{CHANNEL_COUNT, FRAME_LENGTH, WORD_BITS};

use super::exchange::BufferId;

/// Transfer parameters that stay fixed for the lifetime of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamConfig {
    /// Significant bits per sample word.
    pub word_bits: u8,
    /// Interleaved channels per frame.
    pub channels: u8,
    /// Frame length handed to the I2S driver.
    pub frame_len: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            word_bits: WORD_BITS,
            channels: CHANNEL_COUNT,
            frame_len: FRAME_LENGTH,
        }
    }
}

/// One buffer handed to the transport.
///
/// The pointed-to words stay valid and unmodified until the transport signals
/// completion of this transfer; the exchange controller guarantees this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    ptr: *const u32,
    words: usize,
    buffer: BufferId,
    config: StreamConfig,
}

impl TransferRequest {
    pub(crate) fn new(words: &[u32], buffer: BufferId, config: StreamConfig) -> Self {
        TransferRequest {
            ptr: words.as_ptr(),
            words: words.len(),
            buffer,
            config,
        }
    }

    /// Start address of the buffer.
    pub fn as_ptr(&self) -> *const u32 {
        self.ptr
    }

    /// Length of the buffer in `u32` words.
    pub fn words(&self) -> usize {
        self.words
    }

    /// Length of the buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.words * core::mem::size_of::<u32>()
    }

    /// Significant bits per sample word.
    pub fn word_bits(&self) -> u8 {
        self.config.word_bits
    }

    /// Interleaved channel count.
    pub fn channels(&self) -> u8 {
        self.config.channels
    }

    /// Frame length for the I2S driver.
    pub fn frame_len(&self) -> u32 {
        self.config.frame_len
    }

    /// Which half of the ping-pong pair this transfer reads.
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }
}

/// Opaque identifier the transport assigns to a started transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransferHandle(pub u32);

/// DMA transport capability consumed by the exchange controller.
pub trait Transport {
    /// Error type for transfer submission.
    type Error;

    /// Start an asynchronous transfer and return immediately.
    ///
    /// The transport must not read the buffer after it has signalled
    /// completion of this transfer.
    fn submit(&mut self, request: TransferRequest) -> Result<TransferHandle, Self::Error>;

    /// Register the notification invoked once per finished transfer.
    ///
    /// The callback may run in interrupt context, concurrently with the
    /// foreground loop. Route it to
    /// [`CompletionSignal::on_transport_complete`](super::CompletionSignal::on_transport_complete)
    /// and do no other work there.
    fn on_complete(&mut self, callback: fn());
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn submit(&mut self, request: TransferRequest) -> Result<TransferHandle, Self::Error> {
        (**self).submit(request)
    }

    fn on_complete(&mut self, callback: fn()) {
        (**self).on_complete(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_i2s_setup() {
        let config = StreamConfig::default();
        assert_eq!(config.word_bits, 16);
        assert_eq!(config.channels, 2);
        assert_eq!(config.frame_len, 512);
    }

    #[test]
    fn request_reports_byte_length() {
        let words = [0u32; 512];
        let request = TransferRequest::new(&words, BufferId::B, StreamConfig::default());
        assert_eq!(request.words(), 512);
        assert_eq!(request.byte_len(), 2048);
        assert_eq!(request.as_ptr(), words.as_ptr());
        assert_eq!(request.buffer(), BufferId::B);
    }
}
