//! Software stand-ins for the DMA transport and producer, used by the
//! exchange and integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::producer::WaveformProducer;

use super::exchange::BufferId;
use super::transport::{TransferHandle, TransferRequest, Transport};

/// Something that happened on the simulated bus, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    /// A transfer of the buffer at `ptr` was started.
    Submit { ptr: *const u32, buffer: BufferId },
    /// The in-flight transfer finished.
    Complete,
    /// The producer started writing the buffer at `ptr`.
    Fill { ptr: *const u32 },
}

pub(crate) type Timeline = Rc<RefCell<Vec<Event>>>;

/// A transfer the mock accepted, with the buffer contents at submit time.
#[derive(Debug, Clone)]
pub(crate) struct Submission {
    pub(crate) handle: TransferHandle,
    pub(crate) request: TransferRequest,
    pub(crate) samples: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MockError;

/// Transport that records submissions and completes only when told to.
#[derive(Default)]
pub(crate) struct MockTransport {
    pub(crate) submissions: Vec<Submission>,
    callback: Option<fn()>,
    next_handle: u32,
    fail_next: bool,
    timeline: Option<Timeline>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_timeline(timeline: Timeline) -> Self {
        MockTransport {
            timeline: Some(timeline),
            ..Self::default()
        }
    }

    /// Simulate the DMA finishing the in-flight transfer.
    pub(crate) fn complete(&self) {
        if let Some(timeline) = &self.timeline {
            timeline.borrow_mut().push(Event::Complete);
        }
        if let Some(callback) = self.callback {
            callback();
        }
    }

    /// Reject the next submission.
    pub(crate) fn fail_next(&mut self) {
        self.fail_next = true;
    }

    /// Buffers submitted so far, in order.
    pub(crate) fn submitted_buffers(&self) -> Vec<BufferId> {
        self.submissions.iter().map(|s| s.request.buffer()).collect()
    }

    /// Every sample transmitted so far, in order.
    pub(crate) fn transmitted(&self) -> Vec<u32> {
        self.submissions
            .iter()
            .flat_map(|s| s.samples.iter().copied())
            .collect()
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn submit(&mut self, request: TransferRequest) -> Result<TransferHandle, MockError> {
        if self.fail_next {
            self.fail_next = false;
            return Err(MockError);
        }

        // SAFETY: the controller keeps the buffer alive and unwritten while
        // it is submitted, which covers this read.
        let samples =
            unsafe { core::slice::from_raw_parts(request.as_ptr(), request.words()) }.to_vec();

        if let Some(timeline) = &self.timeline {
            timeline.borrow_mut().push(Event::Submit {
                ptr: request.as_ptr(),
                buffer: request.buffer(),
            });
        }

        let handle = TransferHandle(self.next_handle);
        self.next_handle += 1;
        self.submissions.push(Submission {
            handle,
            request,
            samples,
        });
        Ok(handle)
    }

    fn on_complete(&mut self, callback: fn()) {
        self.callback = Some(callback);
    }
}

/// Producer that writes a running counter and logs where it writes.
#[derive(Default)]
pub(crate) struct CountingProducer {
    pub(crate) next: u32,
    pub(crate) fills: usize,
    timeline: Option<Timeline>,
    /// Called after each fill; lets a test simulate the DMA finishing
    /// while the producer was still busy.
    pub(crate) after_fill: Option<fn()>,
}

impl CountingProducer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_timeline(timeline: Timeline) -> Self {
        CountingProducer {
            timeline: Some(timeline),
            ..Self::default()
        }
    }
}

impl WaveformProducer for CountingProducer {
    fn fill(&mut self, buffer: &mut [u32]) {
        if let Some(timeline) = &self.timeline {
            timeline.borrow_mut().push(Event::Fill {
                ptr: buffer.as_ptr(),
            });
        }
        for sample in buffer.iter_mut() {
            *sample = self.next;
            self.next = self.next.wrapping_add(1);
        }
        self.fills += 1;
        if let Some(hook) = self.after_fill {
            hook();
        }
    }
}
