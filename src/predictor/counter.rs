//! Implementation of a saturating counter.

use crate::Outcome;

/// Configuration for building a [`SaturatingCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounterConfig {
    /// The saturation ceiling. The floor is always zero.
    pub max: u8,
}
impl SaturatingCounterConfig {
    /// A two-bit counter.
    pub const TWO_BIT: Self = Self { max: 3 };

    pub fn storage_bits(&self) -> usize {
        (u8::BITS - self.max.leading_zeros()) as usize
    }
    pub fn build(self) -> SaturatingCounter {
        SaturatingCounter {
            max: self.max,
            ctr: 0,
        }
    }
}

/// An N-bit saturating counter in the range `0..=max`.
///
/// Values in the upper half of the range predict 'taken'.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    max: u8,
    ctr: u8,
}
impl SaturatingCounter {
    /// Move the counter one step up or down, clamping at either end.
    pub fn bump(&mut self, up: bool) {
        self.ctr = if up {
            self.ctr.saturating_add(1).min(self.max)
        } else {
            self.ctr.saturating_sub(1)
        };
    }

    pub fn value(&self) -> u8 { self.ctr }
    pub fn max(&self) -> u8 { self.max }

    /// Returns 'true' if the counter is in the upper half of its range.
    pub fn is_high(&self) -> bool {
        self.ctr > self.max / 2
    }

    /// Return the current predicted direction.
    pub fn predict(&self) -> Outcome {
        Outcome::from(self.is_high())
    }

    /// Returns 'true' if the counter sits at either end of its range.
    pub fn is_saturated(&self) -> bool {
        self.ctr == 0 || self.ctr == self.max
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn all_taken_saturates_at_ceiling() {
        let mut ctr = SaturatingCounterConfig::TWO_BIT.build();
        let mut seen = Vec::new();
        for _ in 0..6 {
            ctr.bump(true);
            seen.push(ctr.value());
        }
        assert_eq!(seen, vec![1, 2, 3, 3, 3, 3]);
        assert!(ctr.is_saturated());
    }

    #[test]
    fn all_not_taken_saturates_at_floor() {
        let mut ctr = SaturatingCounterConfig::TWO_BIT.build();
        for _ in 0..3 { ctr.bump(true); }
        let mut seen = Vec::new();
        for _ in 0..5 {
            ctr.bump(false);
            seen.push(ctr.value());
        }
        assert_eq!(seen, vec![2, 1, 0, 0, 0]);
    }

    #[test]
    fn two_bit_threshold() {
        let mut ctr = SaturatingCounterConfig::TWO_BIT.build();
        assert_eq!(ctr.predict(), Outcome::N);
        ctr.bump(true);
        assert_eq!(ctr.predict(), Outcome::N);
        ctr.bump(true);
        assert_eq!(ctr.value(), 2);
        assert_eq!(ctr.predict(), Outcome::T);
    }

    #[test]
    fn storage_bits() {
        assert_eq!(SaturatingCounterConfig::TWO_BIT.storage_bits(), 2);
        assert_eq!(SaturatingCounterConfig { max: 1 }.storage_bits(), 1);
        assert_eq!(SaturatingCounterConfig { max: 7 }.storage_bits(), 3);
        assert_eq!(SaturatingCounterConfig { max: 255 }.storage_bits(), 8);
        assert_eq!(SaturatingCounterConfig { max: 0 }.storage_bits(), 0);
    }

    #[test]
    fn full_width_ceiling() {
        let mut ctr = SaturatingCounterConfig { max: u8::MAX }.build();
        for _ in 0..300 { ctr.bump(true); }
        assert_eq!(ctr.value(), u8::MAX);
        assert!(ctr.is_saturated());
        ctr.bump(false);
        assert_eq!(ctr.value(), u8::MAX - 1);
    }

    #[test]
    fn zero_ceiling_never_moves() {
        let mut ctr = SaturatingCounterConfig { max: 0 }.build();
        ctr.bump(true);
        assert_eq!(ctr.value(), 0);
        assert_eq!(ctr.predict(), Outcome::N);
    }
}
