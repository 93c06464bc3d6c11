//! Search latency per difficulty, for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo run --release --example search_bench -p adaptive_engine -- [preset] [fen]
//!
//! Examples:
//!   # Every preset over the built-in positions
//!   cargo run --release --example search_bench -p adaptive_engine
//!
//!   # Grandmaster on Kiwipete
//!   cargo flamegraph --example search_bench -p adaptive_engine -- 4 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"

use adaptive_engine::{Preset, SearchParams, Searcher};
use chess_core::Position;
use std::env;
use std::time::Instant;

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Italian",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn main() {
    let args: Vec<String> = env::args().collect();
    let preset = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .and_then(Preset::from_number);

    let presets: Vec<Preset> = match preset {
        Some(p) => vec![p],
        None => Preset::ALL.to_vec(),
    };

    let positions: Vec<(String, Position)> = match args.get(2) {
        Some(fen) => match Position::from_fen(fen) {
            Ok(pos) => vec![("Custom".to_string(), pos)],
            Err(e) => {
                eprintln!("Bad FEN: {e}");
                return;
            }
        },
        None => TEST_POSITIONS
            .iter()
            .filter_map(|(name, fen)| Some((name.to_string(), Position::from_fen(fen).ok()?)))
            .collect(),
    };

    for preset in presets {
        // Blunders skip the search, so time the full-strength search at
        // the preset's depth.
        let params = SearchParams::exact(preset.depth());
        println!("=== {preset} (depth {}) ===", params.depth);

        let mut total_nodes = 0u64;
        let mut total_time = std::time::Duration::ZERO;
        for (name, pos) in &positions {
            let mut searcher = Searcher::seeded(0);
            print!("{name:.<30}");

            let start = Instant::now();
            let result = searcher.best_move(pos, params);
            let elapsed = start.elapsed();

            total_nodes += result.nodes;
            total_time += elapsed;
            let best = result
                .best_move
                .map_or_else(|| "-".to_string(), |m| m.to_string());
            println!(
                " {best:<6} {:>10} nodes in {elapsed:>8.3?}",
                result.nodes
            );
        }
        println!("TOTAL: {total_nodes} nodes in {total_time:.3?}");
        println!();
    }
}
