//! Wavetable oscillator driving the exchange controller.
//!
//! Phase accumulator with a plain table lookup, no interpolation: the top
//! bits of the accumulator select a table entry. Cost per sample is one add,
//! one shift, one load and one mask, so a buffer fill is fixed-time.

use crate::constants::{SAMPLE_MASK, WAVETABLE_SIZE};
use crate::producer::{self, WaveformProducer};

use super::phase::{PhaseAccumulator, TuningWord};
use super::wavetable::Wavetable;

/// Table-lookup oscillator.
///
/// # Example
/// ```ignore
/// let table = Wavetable::<4096>::sine(i16::MAX);
/// let mut osc = TableOscillator::new(&table);
/// osc.set_frequency(440.0, 44_100);
/// ```
pub struct TableOscillator<'t, const L: usize = WAVETABLE_SIZE> {
    table: &'t Wavetable<L>,
    accumulator: PhaseAccumulator,
    tuning_word: TuningWord,
    mask: u32,
}

impl<'t, const L: usize> TableOscillator<'t, L> {
    /// Oscillator at phase 0 with the default tuning word and 16-bit mask.
    pub fn new(table: &'t Wavetable<L>) -> Self {
        TableOscillator {
            table,
            accumulator: PhaseAccumulator::default(),
            tuning_word: TuningWord::default(),
            mask: SAMPLE_MASK,
        }
    }

    /// Set the per-sample phase increment directly.
    pub fn set_tuning_word(&mut self, word: TuningWord) {
        self.tuning_word = word;
    }

    /// Set the output frequency.
    pub fn set_frequency(&mut self, hz: f32, sample_rate_hz: u32) {
        self.tuning_word = TuningWord::from_frequency(hz, sample_rate_hz);
    }

    /// Set the mask applied to every table value.
    pub fn set_mask(&mut self, mask: u32) {
        self.mask = mask;
    }

    /// Jump to an absolute phase.
    pub fn set_phase(&mut self, accumulator: PhaseAccumulator) {
        self.accumulator = accumulator;
    }

    /// Current accumulator state (the phase of the last sample written).
    pub fn phase(&self) -> PhaseAccumulator {
        self.accumulator
    }

    /// Current tuning word.
    pub fn tuning_word(&self) -> TuningWord {
        self.tuning_word
    }
}

impl<const L: usize> WaveformProducer for TableOscillator<'_, L> {
    fn fill(&mut self, buffer: &mut [u32]) {
        self.accumulator = producer::fill(
            self.table,
            buffer,
            self.accumulator,
            self.tuning_word,
            self.mask,
        );
    }
}
