//! Phase accumulator and tuning word newtypes.
//!
//! The accumulator is a 32-bit fixed-point phase: `0` is 0° and `2^32` wraps
//! back to 0°. The tuning word is the phase increment applied per sample, so
//! the output frequency is `word / 2^32 * sample_rate`.

use crate::constants::DEFAULT_TUNING_WORD;

/// Full-scale phase (`2^32`) as a float.
const PHASE_FULL_SCALE: f64 = 4_294_967_296.0;

/// Per-sample phase increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct TuningWord(u32);

impl TuningWord {
    /// Wrap a raw 32-bit increment.
    pub const fn from_raw(word: u32) -> Self {
        TuningWord(word)
    }

    /// Compute the increment for `hz` at `sample_rate_hz`.
    ///
    /// Rounds to the nearest representable increment. Negative, NaN, or zero
    /// sample rates produce a zero word; frequencies at or above the sample
    /// rate saturate at `u32::MAX`.
    pub fn from_frequency(hz: f32, sample_rate_hz: u32) -> Self {
        if sample_rate_hz == 0 || hz.is_nan() || hz <= 0.0 {
            return TuningWord(0);
        }
        let word = libm::round(f64::from(hz) / f64::from(sample_rate_hz) * PHASE_FULL_SCALE);
        if word >= f64::from(u32::MAX) {
            TuningWord(u32::MAX)
        } else {
            TuningWord(word as u32)
        }
    }

    /// Frequency in Hz this word produces at `sample_rate_hz`.
    pub fn frequency(self, sample_rate_hz: u32) -> f32 {
        (f64::from(self.0) / PHASE_FULL_SCALE * f64::from(sample_rate_hz)) as f32
    }

    /// The raw increment.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for TuningWord {
    fn default() -> Self {
        TuningWord(DEFAULT_TUNING_WORD)
    }
}

/// Wrapping 32-bit phase accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PhaseAccumulator(u32);

impl PhaseAccumulator {
    /// Accumulator starting at `phase`.
    pub const fn new(phase: u32) -> Self {
        PhaseAccumulator(phase)
    }

    /// Advance by one sample and return the new phase.
    #[inline(always)]
    pub fn advance(&mut self, word: TuningWord) -> u32 {
        self.0 = self.0.wrapping_add(word.0);
        self.0
    }

    /// Phase after `samples` more increments, without mutating `self`.
    pub fn advanced_by(self, word: TuningWord, samples: usize) -> Self {
        // Wrapping arithmetic mod 2^32 makes truncating `samples` exact.
        PhaseAccumulator(self.0.wrapping_add(word.0.wrapping_mul(samples as u32)))
    }

    /// Current phase.
    pub const fn get(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_word_is_hundredth_of_sample_rate() {
        let word = TuningWord::from_frequency(441.0, 44_100);
        assert_eq!(word, TuningWord::default());
        assert_eq!(word.get(), 42_949_673);
    }

    #[test]
    fn frequency_round_trips_within_resolution() {
        let word = TuningWord::from_frequency(1000.0, 48_000);
        let hz = word.frequency(48_000);
        assert!((hz - 1000.0).abs() < 0.001, "got {hz}");
    }

    #[test]
    fn degenerate_inputs_give_zero_word() {
        assert_eq!(TuningWord::from_frequency(440.0, 0).get(), 0);
        assert_eq!(TuningWord::from_frequency(-1.0, 44_100).get(), 0);
        assert_eq!(TuningWord::from_frequency(f32::NAN, 44_100).get(), 0);
    }

    #[test]
    fn frequency_above_sample_rate_saturates() {
        assert_eq!(TuningWord::from_frequency(96_000.0, 44_100).get(), u32::MAX);
    }

    #[test]
    fn advance_wraps() {
        let mut acc = PhaseAccumulator::new(u32::MAX - 1);
        assert_eq!(acc.advance(TuningWord::from_raw(3)), 1);
        assert_eq!(acc.get(), 1);
    }

    #[test]
    fn advanced_by_matches_repeated_advance() {
        let word = TuningWord::from_raw(0x9E37_79B9);
        let start = PhaseAccumulator::new(12345);
        let mut stepped = start;
        for _ in 0..1000 {
            stepped.advance(word);
        }
        assert_eq!(start.advanced_by(word, 1000), stepped);
    }
}
