//! Deterministic synthetic branch streams used to exercise predictors.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::branch::*;

/// A pattern of conditional branches.
#[derive(Clone, Debug, PartialEq)]
pub enum Workload {
    /// A loop-closing branch at `pc`, taken `trip - 1` times and then
    /// not-taken once.
    Loop { pc: u64, trip: usize },

    /// `count` branches spaced 4 bytes apart from `base`. Even-numbered
    /// branches are taken with probability `p_taken`, odd-numbered ones with
    /// probability `1 - p_taken`.
    Biased { base: u64, count: usize, p_taken: f64 },

    /// A random branch at `pc` immediately followed by a branch at `pc + 8`
    /// that repeats its outcome.
    Correlated { pc: u64 },
}

impl Workload {
    /// A small set of workloads covering each pattern.
    pub fn builtin() -> Vec<(&'static str, Self)> {
        vec![
            ("loop-8", Self::Loop { pc: 0x1000_0040, trip: 8 }),
            ("loop-33", Self::Loop { pc: 0x1000_0400, trip: 33 }),
            ("biased-64", Self::Biased { base: 0x2000_0000, count: 64,
                p_taken: 0.9 }),
            ("correlated", Self::Correlated { pc: 0x3000_0100 }),
        ]
    }

    /// Generate `len` branch records using a generator seeded with `seed`.
    pub fn generate(&self, seed: u64, len: usize) -> Vec<BranchRecord> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut res = Vec::with_capacity(len);
        match *self {
            Self::Loop { pc, trip } => {
                let trip = trip.max(1);
                for i in 0..len {
                    let taken = (i + 1) % trip != 0;
                    res.push(BranchRecord::new(pc, taken.into()));
                }
            },
            Self::Biased { base, count, p_taken } => {
                let count = count.max(1);
                let p_taken = p_taken.clamp(0.0, 1.0);
                for _ in 0..len {
                    let n = rng.gen_range(0..count);
                    let p = if n % 2 == 0 { p_taken } else { 1.0 - p_taken };
                    let pc = base + 4 * n as u64;
                    res.push(BranchRecord::new(pc, rng.gen_bool(p).into()));
                }
            },
            Self::Correlated { pc } => {
                let mut last = Outcome::N;
                for i in 0..len {
                    if i % 2 == 0 {
                        last = rng.gen::<bool>().into();
                        res.push(BranchRecord::new(pc, last));
                    } else {
                        res.push(BranchRecord::new(pc + 8, last));
                    }
                }
            },
        }
        res
    }
}
