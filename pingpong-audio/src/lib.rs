//! # pingpong-audio
//!
//! A `no_std`, allocation-free core for streaming a generated waveform to an
//! I2S peripheral over DMA. Two buffers alternate: while the transport
//! transmits one, the producer regenerates the other, so playback never
//! stalls as long as a refill is faster than a transfer.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Synthesis | [`synth`] | Phase accumulator, tuning word, wavetable, oscillator |
//! | Trait | [`producer`] | `WaveformProducer` trait and the pure `fill` function |
//! | I/O | [`io`] | Transport interface, completion signal, buffer exchange |
//! | Errors | [`error`] | `StreamError` |
//!
//! ## Quick start
//!
//! ```ignore
//! use pingpong_audio::constants::BUFFER_LENGTH;
//! use pingpong_audio::io::{CompletionSignal, ExchangeController, Transport};
//! use pingpong_audio::synth::{TableOscillator, Wavetable};
//!
//! static SIGNAL: CompletionSignal = CompletionSignal::new();
//!
//! let table = Wavetable::<4096>::sine(i16::MAX);
//! let mut osc = TableOscillator::new(&table);
//! osc.set_frequency(441.0, 44_100);
//!
//! // `dma` implements `Transport` for the board's I2S DMA channel.
//! dma.on_complete(|| SIGNAL.on_transport_complete());
//!
//! let mut stream = ExchangeController::new(buffers, &SIGNAL, dma, osc);
//! stream.submit_initial()?;
//! stream.run()?;
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `defmt` | no | `defmt::Format` derives and stream start/stop/underrun logging |
//!
//! ## Stream parameters
//!
//! - **Buffer length:** 512 words ([`constants::BUFFER_LENGTH`])
//! - **Sample word:** `u32`, right-justified 16-bit ([`constants::SAMPLE_MASK`])
//! - **Wavetable:** 4096 entries, indexed by accumulator bits 31..20
//! - **Default tuning word:** `2^32 / 100` ([`constants::DEFAULT_TUNING_WORD`])

#![cfg_attr(not(test), no_std)]

pub mod constants;
pub mod error;
pub mod producer;
pub mod synth;
pub mod io;

pub use error::StreamError;
