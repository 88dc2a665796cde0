//! A tournament predictor arbitrating between a bimodal and a gshare
//! component.
//!
//! See the following:
//!  - "Combining Branch Predictors" (McFarling, 1993).

use log::{debug, trace};

use crate::error::*;
use crate::history::*;
use crate::predictor::*;
use crate::stats::AccuracyStats;
use crate::Outcome;

/// Configuration for a [`TournamentPredictor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TournamentConfig {
    /// Number of entries in the bimodal table
    pub bimodal_size: usize,

    /// Number of entries in the choice table
    pub choice_size: usize,

    /// Width of the global history register. The gshare table has
    /// `1 << ghist_bits` entries.
    pub ghist_bits: usize,

    /// Parameters for the saturating counters in all three tables
    pub ctr: SaturatingCounterConfig,
}
impl TournamentConfig {
    pub const DEFAULT: Self = Self {
        bimodal_size: 512,
        choice_size: 512,
        ghist_bits: 15,
        ctr: SaturatingCounterConfig::TWO_BIT,
    };

    /// Number of entries in the gshare table.
    pub fn global_size(&self) -> usize { 1 << self.ghist_bits }

    /// Get the [approximate] number of storage bits.
    pub fn storage_bits(&self) -> usize {
        let entries = self.bimodal_size + self.choice_size + self.global_size();
        entries * self.ctr.storage_bits() + self.ghist_bits
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_GHIST_BITS).contains(&self.ghist_bits) {
            return Err(ConfigError::HistoryWidth { bits: self.ghist_bits });
        }
        for (table, size) in [
            ("bimodal", self.bimodal_size),
            ("choice", self.choice_size),
        ] {
            if !size.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo { table, size });
            }
        }
        if !(1..=MAX_COUNTER_CEILING).contains(&self.ctr.max) {
            return Err(ConfigError::CounterCeiling { max: self.ctr.max });
        }
        Ok(())
    }

    /// Use this configuration to create a new [`TournamentPredictor`].
    pub fn build(self) -> Result<TournamentPredictor, ConfigError> {
        self.validate()?;
        Ok(TournamentPredictor::from_valid_config(self))
    }
}
impl Default for TournamentConfig {
    fn default() -> Self { Self::DEFAULT }
}

/// Identifies the component that provided a [`TournamentPrediction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TournamentProvider {
    Bimodal,
    Global,
}

/// Container for output from [`TournamentPredictor::lookup`], including the
/// predicted outcome and how it was made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TournamentPrediction {
    /// The component chosen by the choice table
    pub provider: TournamentProvider,

    /// The final predicted direction
    pub outcome: Outcome,

    /// Direction predicted by the bimodal component
    pub bimodal_outcome: Outcome,

    /// Direction predicted by the gshare component
    pub global_outcome: Outcome,

    pub bimodal_idx: usize,
    pub global_idx: usize,
    pub choice_idx: usize,
}

fn index_pc(table: &CounterTable, pc: u64) -> usize {
    (pc & table.index_mask() as u64) as usize
}

fn index_gshare(table: &CounterTable, pc: u64, ghr: &HistoryRegister)
    -> usize
{
    ghr.value() ^ index_pc(table, pc)
}

/// A tournament predictor.
///
/// A per-address bimodal table and a gshare table each predict a direction,
/// and a per-address choice table picks one of them. Choice counters in the
/// upper half of their range select the bimodal component.
///
/// The choice counter moves up when only the gshare component was right and
/// down when only the bimodal component was right. Since high values select
/// the bimodal component, this favors whichever component was *wrong*.
///
/// Outcomes must be reported in program order. There is no support for
/// speculative history.
#[derive(Debug)]
pub struct TournamentPredictor {
    /// The configuration used to create this object
    cfg: TournamentConfig,

    bimodal: CounterTable,
    global: CounterTable,
    choice: CounterTable,

    ghr: HistoryRegister,

    stat: AccuracyStats,
}

impl TournamentPredictor {
    /// Create a predictor with [`TournamentConfig::DEFAULT`] and all state
    /// cleared.
    pub fn new() -> Self {
        Self::from_valid_config(TournamentConfig::DEFAULT)
    }

    fn from_valid_config(cfg: TournamentConfig) -> Self {
        let res = Self {
            bimodal: CounterTable::new(cfg.bimodal_size,
                IndexStrategy::FromPc(index_pc), cfg.ctr),
            global: CounterTable::new(cfg.global_size(),
                IndexStrategy::FromGhr(index_gshare), cfg.ctr),
            choice: CounterTable::new(cfg.choice_size,
                IndexStrategy::FromPc(index_pc), cfg.ctr),
            ghr: HistoryRegister::new(cfg.ghist_bits),
            stat: AccuracyStats::new(),
            cfg,
        };
        debug!("built tournament predictor: bimodal={} global={} choice={} \
            ghist_bits={} ({} storage bits)",
            cfg.bimodal_size, cfg.global_size(), cfg.choice_size,
            cfg.ghist_bits, cfg.storage_bits(),
        );
        res
    }

    /// Clear all tables and the global history register.
    ///
    /// Accuracy counters are left untouched; see
    /// [`TournamentPredictor::reset_stats`].
    pub fn initialize(&mut self) {
        self.bimodal.clear();
        self.global.clear();
        self.choice.clear();
        self.ghr.clear();
        debug!("tournament predictor initialized ({} predictions so far)",
            self.stat.predictions);
    }

    /// Reset the running accuracy counters.
    pub fn reset_stats(&mut self) {
        debug!("resetting accuracy: {}/{} correct",
            self.stat.hits, self.stat.predictions);
        self.stat.reset();
    }

    /// Compute the prediction for the branch at `pc` along with the indices
    /// and component outcomes used to form it.
    pub fn lookup(&self, pc: u64) -> TournamentPrediction {
        let input = TableInput { pc, ghr: &self.ghr };
        let bimodal_idx = self.bimodal.get_index(input);
        let global_idx = self.global.get_index(input);
        let choice_idx = self.choice.get_index(input);

        let bimodal_outcome = self.bimodal.get_entry(bimodal_idx).predict();
        let global_outcome = self.global.get_entry(global_idx).predict();

        let (provider, outcome) = if self.choice.get_entry(choice_idx).is_high() {
            (TournamentProvider::Bimodal, bimodal_outcome)
        } else {
            (TournamentProvider::Global, global_outcome)
        };

        TournamentPrediction {
            provider,
            outcome,
            bimodal_outcome,
            global_outcome,
            bimodal_idx,
            global_idx,
            choice_idx,
        }
    }

    /// Predict the direction of the branch at `pc`.
    ///
    /// NOTE: `history_token` is accepted for interface compatibility with
    /// trace replay engines but never used; indexing relies only on the
    /// internal global history register.
    pub fn predict(&self, pc: u64, _history_token: u64) -> Outcome {
        self.lookup(pc).outcome
    }

    /// Train the predictor with the resolved direction of the branch at `pc`.
    ///
    /// The prediction is recomputed against the current state rather than
    /// taken from an earlier call to [`TournamentPredictor::predict`].
    pub fn update(&mut self, pc: u64, _history_token: u64, outcome: Outcome) {
        let p = self.lookup(pc);
        self.stat.record(p.outcome == outcome);

        let taken = outcome.is_taken();
        self.bimodal.get_entry_mut(p.bimodal_idx).bump(taken);
        self.global.get_entry_mut(p.global_idx).bump(taken);

        // The choice counter only moves when exactly one component was
        // right: up on a gshare hit, down on a bimodal hit.
        let bimodal_hit = p.bimodal_outcome == outcome;
        let global_hit = p.global_outcome == outcome;
        if bimodal_hit != global_hit {
            let choice = self.choice.get_entry_mut(p.choice_idx);
            let before = choice.is_high();
            choice.bump(global_hit);
            if choice.is_high() != before {
                trace!("choice[{:#x}] now prefers {:?}", p.choice_idx,
                    if choice.is_high() {
                        TournamentProvider::Bimodal
                    } else {
                        TournamentProvider::Global
                    }
                );
            }
        }

        self.ghr.push(outcome);
    }

    pub fn config(&self) -> &TournamentConfig { &self.cfg }
    pub fn stats(&self) -> &AccuracyStats { &self.stat }
    pub fn ghr(&self) -> &HistoryRegister { &self.ghr }

    /// Return the global history register as an integer.
    pub fn ghist(&self) -> usize { self.ghr.value() }

    pub fn bimodal_table(&self) -> &CounterTable { &self.bimodal }
    pub fn global_table(&self) -> &CounterTable { &self.global }
    pub fn choice_table(&self) -> &CounterTable { &self.choice }

    pub fn bimodal_counter(&self, idx: usize) -> u8 {
        self.bimodal.get_entry(idx).value()
    }
    pub fn global_counter(&self, idx: usize) -> u8 {
        self.global.get_entry(idx).value()
    }
    pub fn choice_counter(&self, idx: usize) -> u8 {
        self.choice.get_entry(idx).value()
    }
}

impl Default for TournamentPredictor {
    fn default() -> Self { Self::new() }
}

impl BranchPredictor for TournamentPredictor {
    fn name(&self) -> &'static str { "TournamentPredictor" }
    fn reset(&mut self) { self.initialize(); }
    fn predict(&self, pc: u64, history_token: u64) -> Outcome {
        TournamentPredictor::predict(self, pc, history_token)
    }
    fn update(&mut self, pc: u64, history_token: u64, outcome: Outcome) {
        TournamentPredictor::update(self, pc, history_token, outcome)
    }
}
