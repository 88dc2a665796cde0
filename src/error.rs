//! Errors reported while building a predictor from a configuration.

use thiserror::Error;

/// Widest global history register supported by [`crate::TournamentConfig`].
pub const MAX_GHIST_BITS: usize = 30;

/// Largest counter ceiling supported by [`crate::SaturatingCounterConfig`].
pub const MAX_COUNTER_CEILING: u8 = 127;

/// A rejected [`crate::TournamentConfig`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Table sizes are used as index masks.
    #[error("{table} table size {size} is not a non-zero power of two")]
    NotPowerOfTwo { table: &'static str, size: usize },

    #[error("global history width of {bits} bits is outside 1..={limit}", limit = MAX_GHIST_BITS)]
    HistoryWidth { bits: usize },

    #[error("counter ceiling {max} is outside 1..={limit}", limit = MAX_COUNTER_CEILING)]
    CounterCeiling { max: u8 },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        let e = ConfigError::NotPowerOfTwo { table: "bimodal", size: 500 };
        assert_eq!(e.to_string(),
            "bimodal table size 500 is not a non-zero power of two");
        let e = ConfigError::HistoryWidth { bits: 31 };
        assert_eq!(e.to_string(),
            "global history width of 31 bits is outside 1..=30");
    }
}
