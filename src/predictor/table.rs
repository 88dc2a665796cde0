//! Types for implementing a table of predictors.

use crate::history::*;
use crate::predictor::counter::*;

/// A function used to create an index from a program counter value.
///
/// Ideally this is some kind of hash function.
pub type PcIndexFn<T> = fn(&T, pc: u64) -> usize;

/// A function used to create an index from (a) a program counter value, and;
/// (b) a reference to some [HistoryRegister] used for global history.
pub type GhrIndexFn<T> = fn(&T, pc: u64, ghr: &HistoryRegister) -> usize;

/// A user-provided strategy for indexing into a [PredictorTable].
pub enum IndexStrategy<T> {
    FromPc(PcIndexFn<T>),
    FromGhr(GhrIndexFn<T>),
}
impl<T> Clone for IndexStrategy<T> {
    fn clone(&self) -> Self { *self }
}
impl<T> Copy for IndexStrategy<T> {}
impl<T> std::fmt::Debug for IndexStrategy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::FromPc(_) => write!(f, "FromPc"),
            Self::FromGhr(_) => write!(f, "FromGhr"),
        }
    }
}

/// Inputs used to form an index into a [CounterTable].
#[derive(Clone, Copy, Debug)]
pub struct TableInput<'a> {
    /// Program counter associated with a predicted branch
    pub pc: u64,

    /// Global history at the time of the prediction
    pub ghr: &'a HistoryRegister,
}

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of input to the table used to form an index.
    type Input<'a>;

    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Given some input, return the corresponding index into the table.
    fn get_index(&self, input: Self::Input<'_>) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: usize) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        debug_assert!(self.size().is_power_of_two());
        self.size() - 1
    }
}

/// A table of [SaturatingCounter], also known as a pattern history table.
pub struct CounterTable {
    /// Saturating counter configuration
    cfg: SaturatingCounterConfig,

    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Number of entries
    size: usize,

    /// Index function
    index_strat: IndexStrategy<Self>,
}
impl CounterTable {
    /// Create a table with every counter at zero.
    /// The caller is responsible for `size` being a power of two.
    pub fn new(size: usize,
        index_strat: IndexStrategy<Self>,
        cfg: SaturatingCounterConfig
    ) -> Self
    {
        assert!(size.is_power_of_two());
        let data = vec![cfg.build(); size];
        Self {
            cfg,
            data,
            size,
            index_strat,
        }
    }

    /// Return every counter to zero.
    pub fn clear(&mut self) {
        self.data.fill(self.cfg.build());
    }

    /// Iterate over all counters in index order.
    pub fn iter(&self) -> impl Iterator<Item = &SaturatingCounter> {
        self.data.iter()
    }

    /// Get the [approximate] number of storage bits.
    pub fn storage_bits(&self) -> usize {
        self.cfg.storage_bits() * self.size
    }
}

impl std::fmt::Debug for CounterTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("CounterTable")
            .field("cfg", &self.cfg)
            .field("size", &self.size)
            .field("index_strat", &self.index_strat)
            .finish()
    }
}

impl PredictorTable for CounterTable {
    type Input<'a> = TableInput<'a>;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.size }

    fn get_index(&self, input: TableInput<'_>) -> usize {
        let idx = match self.index_strat {
            IndexStrategy::FromPc(f) => f(self, input.pc),
            IndexStrategy::FromGhr(f) => f(self, input.pc, input.ghr),
        };
        idx & self.index_mask()
    }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        let index = idx & self.index_mask();
        &self.data[index]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}
