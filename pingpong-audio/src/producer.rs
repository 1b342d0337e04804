use crate::synth::{PhaseAccumulator, TuningWord, Wavetable};

/// Source of sample words for the exchange controller.
///
/// Each call to [`fill()`](Self::fill) must write every word of `buffer` and
/// continue exactly where the previous call left off, so consecutive buffers
/// form one unbroken stream regardless of which physical buffer was written.
/// Implementations must run in bounded time and must not block.
///
/// The caller guarantees `buffer` is not currently owned by the transport.
pub trait WaveformProducer {
    /// Write one buffer's worth of samples.
    fn fill(&mut self, buffer: &mut [u32]);
}

impl<P: WaveformProducer + ?Sized> WaveformProducer for &mut P {
    fn fill(&mut self, buffer: &mut [u32]) {
        (**self).fill(buffer)
    }
}

/// Fill `buffer` from `table` starting at accumulator state `acc`.
///
/// Sample `i` is `table[(acc + (i + 1) * word) >> SHIFT] & mask`. Returns the
/// accumulator advanced by `buffer.len() * word`. Pure: identical inputs always
/// produce identical output.
pub fn fill<const L: usize>(
    table: &Wavetable<L>,
    buffer: &mut [u32],
    acc: PhaseAccumulator,
    word: TuningWord,
    mask: u32,
) -> PhaseAccumulator {
    let mut acc = acc;
    for sample in buffer.iter_mut() {
        let phase = acc.advance(word);
        *sample = table.lookup(phase) & mask;
    }
    acc
}
