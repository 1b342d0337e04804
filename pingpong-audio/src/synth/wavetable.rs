//! Read-only amplitude lookup table indexed by accumulator phase.

use crate::constants::WAVETABLE_SIZE;

/// Fixed lookup table of `L` transport words.
///
/// `L` must be a power of two (at least 2). The table is indexed by the top
/// `log2(L)` bits of the phase accumulator, i.e. `phase >> SHIFT`.
pub struct Wavetable<const L: usize = WAVETABLE_SIZE> {
    values: [u32; L],
}

impl<const L: usize> Wavetable<L> {
    /// Right shift that maps a 32-bit phase onto a table index.
    pub const SHIFT: u32 = {
        assert!(L >= 2 && L.is_power_of_two(), "wavetable length must be a power of two >= 2");
        assert!(L <= 1 << 31, "wavetable cannot be wider than the accumulator");
        32 - L.trailing_zeros()
    };

    /// Wrap precomputed table values.
    pub const fn from_values(values: [u32; L]) -> Self {
        // Force evaluation of the length check for this `L`.
        let _ = Self::SHIFT;
        Wavetable { values }
    }

    /// One period of a sine wave with peak `amplitude`.
    ///
    /// Each entry holds the 16-bit two's complement sample in its low half,
    /// the layout a right-justified 16-bit I2S word expects.
    pub fn sine(amplitude: i16) -> Self {
        let peak = f64::from(amplitude);
        let step = 2.0 * core::f64::consts::PI / L as f64;
        let values = core::array::from_fn(|i| {
            let sample = libm::round(peak * libm::sin(step * i as f64)) as i16;
            u32::from(sample as u16)
        });
        Self::from_values(values)
    }

    /// Table entry for `phase`.
    #[inline(always)]
    pub fn lookup(&self, phase: u32) -> u32 {
        // `phase >> SHIFT` is always < L.
        self.values[(phase >> Self::SHIFT) as usize]
    }

    /// Raw table values.
    pub fn values(&self) -> &[u32; L] {
        &self.values
    }
}
