
use bitvec::prelude::*;

use crate::branch::Outcome;

/// A global history register.
///
/// Bit 0 is the most recent outcome. Pushing a new outcome moves every bit
/// one position towards the end of the register and discards the oldest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

// NOTE: This *reverses* the all of the bits and presents them in a format
// where the leftmost bit is the oldest (index n) and the rightmost bit is
// the most recent (index 0).
impl std::fmt::Display for HistoryRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let x: String = self.data.as_bitslice().iter().by_vals()
            .map(|b| if b { '1' } else { '0' })
            .rev()
            .collect();
        write!(f, "{}", x)
    }
}

impl HistoryRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        assert!(len > 0 && len < usize::BITS as usize);
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }

    /// Clear all bits in the register.
    pub fn clear(&mut self) {
        self.data.fill(false);
    }

    /// Shift in a new outcome.
    pub fn push(&mut self, outcome: Outcome) {
        self.data.shift_right(1);
        self.data.set(0, outcome.is_taken());
    }

    /// Return the contents of the register as an integer, where bit 0 is
    /// the most recent outcome.
    pub fn value(&self) -> usize {
        self.data.load_le::<usize>()
    }

    /// Return a mask covering every bit in the register.
    pub fn mask(&self) -> usize {
        (1 << self.len) - 1
    }
}
