/// Evaluate a [`TournamentPredictor`] against the built-in synthetic
/// workloads.

use tourney::*;
use tourney::stats::*;
use tourney::synth::*;

use log::info;
use std::env;

const DEFAULT_LEN: usize = 100_000;

fn run_test(name: &str, records: &[BranchRecord]) {
    let mut stat = BranchStats::new();
    let mut p = TournamentPredictor::new();

    for record in records {
        let prediction = p.predict(record.pc, 0);
        stat.update(record, prediction);
        p.update(record.pc, 0, record.outcome);
    }

    println!("  {:12} Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
        name,
        stat.global_hits(),
        stat.global_brns(),
        stat.hit_rate() * 100.0,
        stat.global_miss()
    );
    info!("{}: predictor reports {}/{} correct, ghr={}",
        name, p.stats().hits, p.stats().predictions, p.ghr());

    for (pc, data) in stat.get_low_rate_branches(2, 100) {
        println!("    {:016x} {:8}/{:8} {:.4}",
            pc, data.hits, data.occ, data.hit_rate()
        );
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let len = match args.get(1).map(|s| s.parse::<usize>()) {
        None => DEFAULT_LEN,
        Some(Ok(len)) => len,
        Some(Err(e)) => {
            println!("usage: {} [records per workload] ({})", args[0], e);
            return;
        },
    };

    let cfg = TournamentConfig::DEFAULT;
    println!("[*] Tournament predictor, {} storage bits", cfg.storage_bits());
    for (name, workload) in Workload::builtin() {
        let records = workload.generate(0, len);
        run_test(name, &records);
    }
}
