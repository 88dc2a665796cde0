
use proptest::prelude::*;

use tourney::*;
use tourney::synth::*;

fn replay(p: &mut TournamentPredictor, records: &[BranchRecord]) -> Vec<Outcome> {
    records.iter().map(|r| {
        let prediction = p.predict(r.pc, 0);
        p.update(r.pc, 0, r.outcome);
        prediction
    }).collect()
}

fn branch_stream() -> impl Strategy<Value = Vec<(u64, bool)>> {
    prop::collection::vec((0u64..0x4000, any::<bool>()), 0..400)
}

proptest! {
    #[test]
    fn counters_stay_in_range(stream in branch_stream()) {
        let mut p = TournamentPredictor::new();
        for (pc, taken) in stream {
            p.update(pc, 0, taken.into());
            prop_assert!(p.ghist() <= (1 << 15) - 1);
        }
        for table in [p.bimodal_table(), p.global_table(), p.choice_table()] {
            prop_assert!(table.iter().all(|c| c.value() <= 3));
        }
    }

    #[test]
    fn accuracy_accounting(stream in branch_stream()) {
        let mut p = TournamentPredictor::new();
        let mut hits = 0;
        for (pc, taken) in stream.iter().copied() {
            if p.predict(pc, 0) == Outcome::from(taken) { hits += 1; }
            p.update(pc, 0, taken.into());
        }
        prop_assert_eq!(p.stats().predictions, stream.len() as u64);
        prop_assert_eq!(p.stats().hits, hits);
        prop_assert!(p.stats().hits <= p.stats().predictions);
    }

    #[test]
    fn arbitration_follows_choice_counter(
        stream in branch_stream(),
        pc in any::<u64>()
    ) {
        let mut p = TournamentPredictor::new();
        for (pc, taken) in stream {
            p.update(pc, 0, taken.into());
        }
        let l = p.lookup(pc);
        if p.choice_counter(l.choice_idx) > 1 {
            prop_assert_eq!(p.predict(pc, 0), l.bimodal_outcome);
        } else {
            prop_assert_eq!(p.predict(pc, 0), l.global_outcome);
        }
    }

    #[test]
    fn index_formulas(pc in any::<u64>(), stream in branch_stream()) {
        let mut p = TournamentPredictor::new();
        for (pc, taken) in stream {
            p.update(pc, 0, taken.into());
        }
        let ghist = p.ghist() as u64;
        let l = p.lookup(pc);
        prop_assert_eq!(l.bimodal_idx as u64, pc % 512);
        prop_assert_eq!(l.choice_idx as u64, pc % 512);
        prop_assert_eq!(l.global_idx as u64, (ghist ^ (pc % (1 << 15))) % (1 << 15));

        let alias = p.lookup(pc.wrapping_add(512));
        prop_assert_eq!(alias.bimodal_idx, l.bimodal_idx);
        prop_assert_eq!(alias.choice_idx, l.choice_idx);
    }
}

#[test]
fn index_examples() {
    let mut p = TournamentPredictor::new();
    let l = p.lookup(0x1234_5678);
    assert_eq!(l.bimodal_idx, 0x078);
    assert_eq!(l.global_idx, 0x5678);

    // Distinct gshare entries for an address and its bimodal alias.
    let a = p.lookup(0x10);
    let b = p.lookup(0x10 + 512);
    assert_eq!(a.bimodal_idx, b.bimodal_idx);
    assert_eq!(a.global_idx, 0x10);
    assert_eq!(b.global_idx, 0x210);

    p.update(0, 0, Outcome::T);
    p.update(0, 0, Outcome::N);
    p.update(0, 0, Outcome::T);
    assert_eq!(p.ghist(), 0b101);
    let l = p.lookup(0x7_ffff);
    assert_eq!(l.bimodal_idx, 0x1ff);
    assert_eq!(l.global_idx, 0x7fff ^ 0b101);
}

#[test]
fn identical_runs_are_deterministic() {
    for (_, w) in Workload::builtin() {
        let records = w.generate(42, 5_000);
        let mut a = TournamentPredictor::new();
        let mut b = TournamentPredictor::new();
        assert_eq!(replay(&mut a, &records), replay(&mut b, &records));
        assert_eq!(a.ghist(), b.ghist());
        assert_eq!(a.stats(), b.stats());
        assert!(a.bimodal_table().iter().eq(b.bimodal_table().iter()));
        assert!(a.global_table().iter().eq(b.global_table().iter()));
        assert!(a.choice_table().iter().eq(b.choice_table().iter()));
    }
}

#[test]
fn initialize_restores_zero_state() {
    let records = Workload::Correlated { pc: 0x800 }.generate(1, 1_000);
    let mut a = TournamentPredictor::new();
    replay(&mut a, &records);
    a.initialize();

    let mut fresh = TournamentPredictor::new();
    assert_eq!(replay(&mut a, &records), replay(&mut fresh, &records));
    assert_eq!(a.stats().predictions, 2_000);
    assert_eq!(fresh.stats().predictions, 1_000);
}

#[test]
fn loop_branch_is_learned() {
    let records = Workload::Loop { pc: 0x4000, trip: 8 }.generate(0, 8_000);
    let mut p = TournamentPredictor::new();
    replay(&mut p, &records);
    assert!(p.stats().hit_rate() > 0.8, "hit rate {}", p.stats().hit_rate());
}

#[test]
fn usable_through_trait_object() {
    let mut p: Box<dyn BranchPredictor> = Box::new(TournamentPredictor::new());
    assert_eq!(p.name(), "TournamentPredictor");
    for _ in 0..3 {
        p.update(0x20, 0, Outcome::T);
    }
    assert_eq!(p.predict(0x20, 0), Outcome::N);
    p.reset();
    assert_eq!(p.predict(0x20, 0), Outcome::N);
}
