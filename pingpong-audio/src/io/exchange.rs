//! Ping-pong buffer exchange between the waveform producer and the DMA
//! transport.
//!
//! [`ExchangeController`] owns two sample buffers. At any instant one is
//! *active* (handed to the transport) and the other is *free* (being refilled).
//! When the transport reports completion the roles swap:
//!
//! ```text
//!            submit A                 submit B                 submit A
//! DMA    ────[ A in flight ]──────────[ B in flight ]──────────[ A ...
//! CPU         refill B ──►  wait       refill A ──►  wait       refill B
//!                              ▲                        ▲
//!                          completion               completion
//! ```
//!
//! ## Cycle
//!
//! 1. [`submit_initial()`](ExchangeController::submit_initial) fills A then B
//!    from one continuous accumulator stream and submits A.
//! 2. [`step()`](ExchangeController::step) waits for a completion, consumes
//!    it, flips the selector, submits the newly active buffer, then refills
//!    the buffer that just finished transmitting.
//!
//! The next transfer is always started before the refill, so refill cost
//! never delays the transport. The refill then races the *next* transfer: if
//! that transfer completes before the refill returns, an underrun is counted.
//!
//! ## Usage
//!
//! ```ignore
//! static SIGNAL: CompletionSignal = CompletionSignal::new();
//!
//! // Both buffers must live in DMA-reachable memory for the whole stream.
//! let buffers: &'static mut [[u32; BUFFER_LENGTH]; 2] = dma_buffers();
//!
//! dma.on_complete(|| SIGNAL.on_transport_complete());
//! let mut stream = ExchangeController::new(
//!     buffers,
//!     &SIGNAL,
//!     dma,
//!     oscillator,
//! );
//! stream.submit_initial()?;
//! stream.run()?;
//! ```

use core::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::error::StreamError;
use crate::producer::WaveformProducer;

use super::completion::CompletionSignal;
use super::probe::{NoProbe, TimingProbe};
use super::transport::{StreamConfig, TransferHandle, TransferRequest, Transport};

/// One half of the ping-pong pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferId {
    /// First buffer; transmitted first.
    A,
    /// Second buffer.
    B,
}

impl BufferId {
    /// The other buffer.
    pub const fn other(self) -> Self {
        match self {
            BufferId::A => BufferId::B,
            BufferId::B => BufferId::A,
        }
    }

    const fn index(self) -> usize {
        match self {
            BufferId::A => 0,
            BufferId::B => 1,
        }
    }
}

/// Event counters kept by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExchangeStats {
    /// Transfers successfully submitted.
    pub transfers: u32,
    /// Completions consumed.
    pub completions: u32,
    /// Refills that finished after the transfer they raced had completed.
    pub underruns: u32,
    /// Completions consumed while a further completion was already pending.
    pub overlapped_completions: u32,
}

/// Buffers of an idle stream that hold samples not yet transmitted.
///
/// The producer's accumulator is already past these samples, so a stream
/// that resumes must send them before anything new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unsent {
    /// Neither buffer; the next start fills both.
    Nothing,
    /// Both buffers, A first.
    Both,
    /// Only this buffer; the other has been transmitted.
    One(BufferId),
}

/// Everything a stopped controller hands back.
///
/// Pass it to [`ExchangeController::resume`] to continue the waveform where
/// the transport left off.
pub struct StreamParts<'a, T, P, const N: usize, D = NoProbe> {
    /// The transport, idle.
    pub transport: T,
    /// The producer, with its accumulator where the stream left it.
    pub producer: P,
    /// Both buffers; the transport no longer references either.
    pub buffers: &'a mut [[u32; N]; 2],
    /// Which buffers still hold samples the transport never sent.
    pub unsent: Unsent,
    /// The transfer parameters the stream used.
    pub config: StreamConfig,
    /// The timing probe pin.
    pub probe: D,
}

/// Double-buffered DMA stream controller.
///
/// Generic over the [`Transport`], the [`WaveformProducer`], the buffer length
/// `N` (in `u32` words) and an optional timing probe pin `D`.
pub struct ExchangeController<'a, T, P, const N: usize, D = NoProbe> {
    buffers: &'a mut [[u32; N]; 2],
    signal: &'a CompletionSignal,
    transport: T,
    producer: P,
    config: StreamConfig,
    probe: TimingProbe<D>,
    /// Buffer owned by the transport; `None` while idle.
    active: Option<BufferId>,
    /// Only meaningful while idle.
    unsent: Unsent,
    in_flight: Option<TransferHandle>,
    stats: ExchangeStats,
}

impl<'a, T, P, const N: usize> ExchangeController<'a, T, P, N>
where
    T: Transport,
    P: WaveformProducer,
{
    /// Create an idle controller over `buffers`.
    ///
    /// `signal` must be the one the transport's completion callback raises.
    pub fn new(
        buffers: &'a mut [[u32; N]; 2],
        signal: &'a CompletionSignal,
        transport: T,
        producer: P,
    ) -> Self {
        const { assert!(N > 0, "buffers must hold at least one word") };
        ExchangeController {
            buffers,
            signal,
            transport,
            producer,
            config: StreamConfig::default(),
            probe: TimingProbe::new(NoProbe),
            active: None,
            unsent: Unsent::Nothing,
            in_flight: None,
            stats: ExchangeStats::default(),
        }
    }
}

impl<'a, T, P, const N: usize, D> ExchangeController<'a, T, P, N, D>
where
    T: Transport,
    P: WaveformProducer,
    D: OutputPin,
{
    /// Rebuild an idle controller from a stopped stream.
    ///
    /// The first [`submit_initial`](Self::submit_initial) sends whatever the
    /// old stream had refilled but not transmitted, so the waveform continues
    /// without a gap. Building with [`new`](ExchangeController::new) from the
    /// same parts instead starts over from the producer's current phase.
    pub fn resume(parts: StreamParts<'a, T, P, N, D>, signal: &'a CompletionSignal) -> Self {
        ExchangeController {
            buffers: parts.buffers,
            signal,
            transport: parts.transport,
            producer: parts.producer,
            config: parts.config,
            probe: TimingProbe::new(parts.probe),
            active: None,
            unsent: parts.unsent,
            in_flight: None,
            stats: ExchangeStats::default(),
        }
    }

    /// Replace the transfer parameters. Takes effect on the next submission.
    pub fn with_config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a timing probe pin, toggled around every submission.
    pub fn with_probe<Q: OutputPin>(self, pin: Q) -> ExchangeController<'a, T, P, N, Q> {
        ExchangeController {
            buffers: self.buffers,
            signal: self.signal,
            transport: self.transport,
            producer: self.producer,
            config: self.config,
            probe: TimingProbe::new(pin),
            active: self.active,
            unsent: self.unsent,
            in_flight: self.in_flight,
            stats: self.stats,
        }
    }

    /// Pre-fill both buffers and start transmitting A.
    ///
    /// Buffers still holding unsent samples (after a rejected transfer, or on
    /// a [`resume`](Self::resume)d stream) are sent first instead of being
    /// overwritten. Discards completions left on the signal by an earlier
    /// stream. If the transport rejects the transfer the controller stays
    /// idle and this may be retried.
    pub fn submit_initial(&mut self) -> Result<TransferHandle, StreamError<T::Error>> {
        if self.active.is_some() {
            return Err(StreamError::AlreadyStarted);
        }
        self.signal.clear();

        let first = match self.unsent {
            Unsent::Nothing => {
                self.refill(BufferId::A);
                self.refill(BufferId::B);
                self.unsent = Unsent::Both;
                BufferId::A
            }
            Unsent::Both => BufferId::A,
            Unsent::One(id) => id,
        };

        let handle = self.submit(first)?;
        self.active = Some(first);
        if let Unsent::One(id) = self.unsent {
            self.refill(id.other());
        }
        self.unsent = Unsent::Nothing;

        #[cfg(feature = "defmt")]
        defmt::info!("stream started: {=usize} words per buffer", N);

        Ok(handle)
    }

    /// Act on one pending completion, if there is one.
    ///
    /// Returns `Ok(true)` when a completion was consumed and the buffers were
    /// exchanged, `Ok(false)` when nothing was pending. Never blocks.
    pub fn poll(&mut self) -> Result<bool, StreamError<T::Error>> {
        let finished = self.active.ok_or(StreamError::NotStarted)?;

        let Some(pending) = self.signal.consume() else {
            return Ok(false);
        };
        self.in_flight = None;
        self.stats.completions = self.stats.completions.saturating_add(1);
        let overlapped = pending > 1;
        if overlapped {
            self.stats.overlapped_completions =
                self.stats.overlapped_completions.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("{=u32} completions pending at once", pending);
        }

        let next = finished.other();
        if let Err(e) = self.submit(next) {
            // Back to idle: `next` still holds the samples due after the ones
            // just transmitted.
            self.active = None;
            self.unsent = Unsent::One(next);
            return Err(e);
        }
        self.active = Some(next);

        self.refill(finished);

        // A surplus completion already counted as an overlap is still pending
        // here and must not be counted twice.
        if !overlapped && self.signal.pending() > 0 {
            self.stats.underruns = self.stats.underruns.saturating_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("underrun: refill of {} outlasted transfer of {}", finished, next);
        }

        Ok(true)
    }

    /// Wait for the next completion and exchange the buffers.
    ///
    /// Busy-waits on the completion signal; this is the only blocking point
    /// of the stream.
    pub fn step(&mut self) -> Result<(), StreamError<T::Error>> {
        loop {
            if self.poll()? {
                return Ok(());
            }
            core::hint::spin_loop();
        }
    }

    /// Stream until the transport rejects a transfer.
    pub fn run(&mut self) -> Result<Infallible, StreamError<T::Error>> {
        loop {
            self.step()?;
        }
    }

    /// Stop issuing transfers, wait for the one in flight to finish, and
    /// release everything.
    ///
    /// The buffer refilled for the next transfer is never sent; the returned
    /// [`StreamParts::unsent`] names it.
    pub fn stop(self) -> StreamParts<'a, T, P, N, D> {
        if self.in_flight.is_some() {
            while self.signal.consume().is_none() {
                core::hint::spin_loop();
            }
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "stream stopped after {=u32} transfers, {=u32} underruns",
            self.stats.transfers,
            self.stats.underruns
        );

        StreamParts {
            transport: self.transport,
            producer: self.producer,
            buffers: self.buffers,
            unsent: match self.active {
                Some(id) => Unsent::One(id.other()),
                None => self.unsent,
            },
            config: self.config,
            probe: self.probe.release(),
        }
    }

    /// Buffer currently owned by the transport, `None` before the stream starts.
    pub fn active(&self) -> Option<BufferId> {
        self.active
    }

    /// Handle of the transfer in flight, if any.
    pub fn in_flight(&self) -> Option<TransferHandle> {
        self.in_flight
    }

    /// Event counters so far.
    pub fn stats(&self) -> ExchangeStats {
        self.stats
    }

    /// Read access to one of the buffers.
    pub fn buffer(&self, id: BufferId) -> &[u32; N] {
        &self.buffers[id.index()]
    }

    /// The transfer parameters in use.
    pub fn config(&self) -> StreamConfig {
        self.config
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The producer.
    pub fn producer(&self) -> &P {
        &self.producer
    }

    /// Mutable access to the producer, e.g. to retune it between refills.
    pub fn producer_mut(&mut self) -> &mut P {
        &mut self.producer
    }

    fn submit(&mut self, id: BufferId) -> Result<TransferHandle, StreamError<T::Error>> {
        debug_assert!(self.in_flight.is_none(), "submitting while a transfer is in flight");

        let request = TransferRequest::new(&self.buffers[id.index()], id, self.config);
        let transport = &mut self.transport;
        let handle = self
            .probe
            .measure(|| transport.submit(request))
            .map_err(StreamError::Transport)?;

        self.in_flight = Some(handle);
        self.stats.transfers = self.stats.transfers.saturating_add(1);
        Ok(handle)
    }

    fn refill(&mut self, id: BufferId) {
        debug_assert_ne!(self.active, Some(id), "refilling the buffer owned by the transport");

        self.producer.fill(&mut self.buffers[id.index()]);
    }
}
