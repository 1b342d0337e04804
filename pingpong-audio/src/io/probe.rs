//! Scope probe for transfer submission latency.
//!
//! Drives a GPIO high immediately before a transfer is submitted and low
//! again once the transport returns, so the time spent starting each DMA
//! transfer can be measured on a logic analyser.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

/// Pin that does nothing; the default when no probe is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProbe;

impl ErrorType for NoProbe {
    type Error = Infallible;
}

impl OutputPin for NoProbe {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Wraps an output pin used as a timing marker.
pub struct TimingProbe<D> {
    pin: D,
}

impl<D: OutputPin> TimingProbe<D> {
    /// Attach to `pin`, driving it low.
    pub fn new(mut pin: D) -> Self {
        let _ = pin.set_low();
        TimingProbe { pin }
    }

    /// Run `f` with the pin held high.
    ///
    /// Pin errors are ignored: the probe is a measurement aid and must never
    /// disturb the stream.
    pub fn measure<R>(&mut self, f: impl FnOnce() -> R) -> R {
        let _ = self.pin.set_high();
        let result = f();
        let _ = self.pin.set_low();
        result
    }

    /// Give the pin back.
    pub fn release(self) -> D {
        self.pin
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Pin that records every level it is driven to.
    #[derive(Default)]
    pub(crate) struct RecordingPin {
        pub(crate) levels: Vec<bool>,
    }

    impl ErrorType for RecordingPin {
        type Error = Infallible;
    }

    impl OutputPin for RecordingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.levels.push(true);
            Ok(())
        }
    }

    #[test]
    fn new_drives_pin_low() {
        let probe = TimingProbe::new(RecordingPin::default());
        assert_eq!(probe.release().levels, [false]);
    }

    #[test]
    fn measure_brackets_the_call() {
        let mut probe = TimingProbe::new(RecordingPin::default());
        let value = probe.measure(|| 7);
        assert_eq!(value, 7);
        assert_eq!(probe.release().levels, [false, true, false]);
    }

    #[test]
    fn no_probe_is_silent() {
        let mut probe = TimingProbe::new(NoProbe);
        assert_eq!(probe.measure(|| "ok"), "ok");
    }
}
