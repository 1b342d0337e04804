//! Waveform synthesis: phase accumulator, lookup table and the oscillator
//! that combines them into a [`WaveformProducer`](crate::producer::WaveformProducer).

mod phase;
mod wavetable;
mod oscillator;

pub use phase::{PhaseAccumulator, TuningWord};
pub use wavetable::Wavetable;
pub use oscillator::TableOscillator;
