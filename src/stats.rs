//! Helpers for collecting statistics.

use std::collections::*;
use bitvec::prelude::*;
use itertools::*;

use crate::branch::*;

/// Running accuracy counters kept by a predictor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccuracyStats {
    /// Number of resolved predictions
    pub predictions: u64,

    /// Number of correct predictions
    pub hits: u64,
}
impl AccuracyStats {
    pub fn new() -> Self { Self::default() }

    /// Count one resolved prediction.
    pub fn record(&mut self, hit: bool) {
        self.predictions += 1;
        if hit { self.hits += 1; }
    }

    /// Return the number of mispredictions.
    pub fn misses(&self) -> u64 { self.predictions - self.hits }

    /// Return the hit rate, or zero before any prediction resolves.
    pub fn hit_rate(&self) -> f64 {
        if self.predictions == 0 { return 0.0; }
        self.hits as f64 / self.predictions as f64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Container for recording simple statistics while iterating over a
/// stream of branches.
pub struct BranchStats {
    /// Per-branch data (indexed by program counter value)
    pub data: BTreeMap<u64, BranchData>,

    /// Global accuracy
    pub global: AccuracyStats,
}
impl BranchStats {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            global: AccuracyStats::new(),
        }
    }

    /// Return the global hit rate.
    pub fn hit_rate(&self) -> f64 { self.global.hit_rate() }

    /// Return the global hit count.
    pub fn global_hits(&self) -> u64 { self.global.hits }

    /// Return the global miss count.
    pub fn global_miss(&self) -> u64 { self.global.misses() }

    /// Return the total branch count.
    pub fn global_brns(&self) -> u64 { self.global.predictions }

    /// Update global and per-branch statistics with a prediction made
    /// for `record`.
    pub fn update(&mut self, record: &BranchRecord, prediction: Outcome) {
        let hit = prediction == record.outcome;
        self.global.record(hit);

        let data = self.get_mut(record.pc);
        data.occ += 1;
        data.pat.push(record.outcome.into());
        if hit { data.hits += 1; }
    }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: u64) -> Option<&BranchData> {
        self.data.get(&pc)
    }

    /// Returns a mutable reference to data collected for a particular branch.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: u64) -> &mut BranchData {
        self.data.entry(pc).or_default()
    }

    /// Returns the number of unique observed branch instructions.
    pub fn num_unique_branches(&self) -> usize {
        self.data.len()
    }

    /// Returns the `n` most frequently executed branches.
    pub fn get_common_branches(&self, n: usize) -> Vec<(u64, &BranchData)> {
        self.data.iter()
            .sorted_by_key(|(_, s)| s.occ)
            .rev()
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }

    /// Returns up to `n` branches executed at least `min_occ` times with the
    /// lowest hit rates, worst first.
    pub fn get_low_rate_branches(&self, n: usize, min_occ: usize)
        -> Vec<(u64, &BranchData)>
    {
        self.data.iter()
            .filter(|(_, s)| s.occ >= min_occ)
            .sorted_by(|x, y| x.1.hit_rate().total_cmp(&y.1.hit_rate()))
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

impl Default for BranchStats {
    fn default() -> Self { Self::new() }
}

/// Container for per-branch statistics.
#[derive(Clone, Debug, Default)]
pub struct BranchData {
    /// Number of times this branch was encountered.
    pub occ: usize,

    /// Number of correct predictions for this branch.
    pub hits: usize,

    /// Record of all observed outcomes for this branch.
    pub pat: BitVec,
}
impl BranchData {
    /// Return the hit rate for this branch.
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.occ as f64
    }

    pub fn is_always_taken(&self) -> bool {
        self.pat.count_ones() == self.pat.len()
    }

    pub fn is_never_taken(&self) -> bool {
        self.pat.count_zeros() == self.pat.len()
    }
}
