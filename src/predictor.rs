//! Predictor building blocks and the tournament predictor.

pub mod table;
pub mod counter;
pub mod tournament;

pub use table::*;
pub use counter::*;
pub use tournament::*;

use crate::Outcome;

/// Interface to a predictor with some internal state which is only subject to
/// change by the correct branch outcome.
pub trait BranchPredictor {
    fn name(&self) -> &'static str;

    /// Reset the internal state of the predictor.
    fn reset(&mut self);

    /// Return the predicted outcome for the branch at `pc`.
    fn predict(&self, pc: u64, history_token: u64) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, pc: u64, history_token: u64, outcome: Outcome);
}
