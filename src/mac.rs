//! The capability S2V (and therefore SIV) is built against: `reset`,
//! `write`, `sum`, `block_size`. [`crate::cmac::Cmac`] and
//! [`crate::pmac::Pmac`] both implement this trait rather than S2V
//! switching on a runtime tag internally (see Design Notes, "MAC as a
//! capability").

/// A block-cipher-based MAC with CMAC/PMAC's incremental write shape.
pub trait Mac {
    /// Zeroes the accumulator and tail position. Subkeys/offset tables are
    /// retained — they are derived once at construction.
    fn reset(&mut self);

    /// Accumulates `data`. May be called multiple times; the concatenation
    /// of all inputs since the last `reset` is what `sum` authenticates.
    fn write(&mut self, data: &[u8]);

    /// Appends the tag for everything written since the last `reset` to
    /// `out`, without mutating internal state — `write` may continue
    /// afterwards, and repeated `sum` calls are idempotent.
    fn sum(&self, out: &mut Vec<u8>);

    /// The underlying cipher's block size, and the tag length.
    fn block_size(&self) -> usize;
}
