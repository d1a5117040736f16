//! Perft/divide diagnostic runner.
//!
//! Usage:
//! `cargo run --release --bin perft -- <depth> "<fen>" [premoves...]`
//! `cargo run --release --bin perft -- 4 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" e1g1`
//!
//! Premoves are coordinate moves ("e2e4", "e7e8q") played before counting.
//! Output lists one "move: nodes" line per root move, compatible with the
//! divide output of other engines, followed by the totals.

use std::time::Instant;

use log::info;

use chessie::game_state::chess_rules::STARTING_POSITION_FEN;
use chessie::move_generation::perft::perft_divide;
use chessie::utils::fen_generator::generate_fen;
use chessie::utils::fen_parser::parse_fen;
use chessie::utils::long_algebraic::parse_uci_move;

fn usage() -> String {
    "usage: perft <depth> \"<fen>\" [premoves...]".to_owned()
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let depth = args
        .first()
        .ok_or_else(usage)?
        .parse::<u8>()
        .map_err(|e| format!("invalid depth: {e}"))?;
    let fen = args.get(1).map(String::as_str).unwrap_or(STARTING_POSITION_FEN);

    let mut board = parse_fen(fen).map_err(|e| e.to_string())?;
    for text in args.iter().skip(2) {
        let (mv, promotion) = parse_uci_move(&board, text).map_err(|e| e.to_string())?;
        board.apply_move(mv, promotion).map_err(|e| e.to_string())?;
    }
    if args.len() > 2 {
        info!("position after premoves: {}", generate_fen(&board));
    }

    let started = Instant::now();
    let report = perft_divide(&mut board, depth).map_err(|e| e.to_string())?;
    let elapsed = started.elapsed();

    for (mv, nodes) in &report.divide {
        println!("{mv}: {nodes}");
    }
    println!();
    println!("{}", report.totals.nodes);
    println!(
        "captures={} en_passant={} castles={} promotions={}",
        report.totals.captures, report.totals.en_passant, report.totals.castles, report.totals.promotions
    );
    info!(
        "depth {depth}: {} nodes in {} ms",
        report.totals.nodes,
        elapsed.as_millis()
    );
    Ok(())
}
