//! DMA streaming: the ping-pong buffer exchange and the interfaces it needs
//! from the transport driver.
//!
//! ## Components
//!
//! | Item | Context | Description |
//! |------|---------|-------------|
//! | [`ExchangeController`] | foreground | Owns both buffers, submits and refills them |
//! | [`CompletionSignal`] | ISR + foreground | Atomic completion counter |
//! | [`Transport`] | driver | Starts transfers, reports completions |
//! | [`TimingProbe`] | foreground | Optional GPIO marker around each submit |
//!
//! ## Ownership
//!
//! ```text
//!          ┌──────────── submit(active) ───────────►┌───────────┐
//! Exchange │  buffers[active]  (read by DMA only)   │ Transport │
//! Control- │  buffers[!active] (written by producer)│  (DMA)    │
//!   ler    ◄──── CompletionSignal ◄── on_complete ──└───────────┘
//! ```
//!
//! The interrupt handler only raises the completion signal. Everything else,
//! including the selector flip, runs in the foreground.

pub mod transport;
pub mod completion;
pub mod exchange;
pub mod probe;

pub use transport::{StreamConfig, TransferHandle, TransferRequest, Transport};
pub use completion::CompletionSignal;
pub use exchange::{BufferId, ExchangeController, ExchangeStats, StreamParts, Unsent};
pub use probe::{NoProbe, TimingProbe};

#[cfg(test)]
pub(crate) mod mock;
