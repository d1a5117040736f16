//! Ranks every legal move of a position with Chessie.
//!
//! Usage:
//! `cargo run --release -- "<fen>"`
//! `cargo run --release -- "<fen>" --depth 4 --no-see --deterministic`
//!
//! Without a FEN the starting position is searched.

use chessie::game_state::board::Board;
use chessie::game_state::chess_rules::STARTING_POSITION_FEN;
use chessie::moves::move_record::MoveRecord;
use chessie::search::chessie_bot::{ChessieBot, SearchConfig};
use chessie::utils::fen_generator::generate_fen;
use chessie::utils::render_game_state::render_board;

const VALUE_FLAGS: [&str; 1] = ["--depth"];

fn parse_arg_u8(args: &[String], flag: &str, default: u8) -> u8 {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u8>() {
                return v.max(1);
            }
        }
    }
    default
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|arg| arg == flag)
}

fn positional_fen(args: &[String]) -> Option<&str> {
    let mut i = 0;
    while i < args.len() {
        if VALUE_FLAGS.contains(&args[i].as_str()) {
            i += 2;
            continue;
        }
        if !args[i].starts_with("--") {
            return Some(args[i].as_str());
        }
        i += 1;
    }
    None
}

fn config_from_args(args: &[String]) -> SearchConfig {
    let defaults = SearchConfig::default();
    SearchConfig::default()
        .with_depth(parse_arg_u8(args, "--depth", defaults.depth))
        .with_move_ordering(!has_flag(args, "--no-ordering"))
        .with_see_pruning(!has_flag(args, "--no-see"))
        .with_alpha_beta(!has_flag(args, "--no-alpha-beta"))
        .with_deterministic(defaults.deterministic || has_flag(args, "--deterministic"))
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let fen = positional_fen(&args).unwrap_or(STARTING_POSITION_FEN);
    let config = config_from_args(&args);

    let mut board = Board::from_fen(fen).map_err(|e| e.to_string())?;
    println!("{}", render_board(&board));
    println!("fen: {}", generate_fen(&board));
    println!("searching depth {} for {}", config.depth, board.side_to_move().name());

    let outcome = ChessieBot::new(config)
        .rank_potential_moves(&mut board)
        .map_err(|e| e.to_string())?;

    if outcome.ranked.is_empty() {
        println!("no legal moves");
        return Ok(());
    }

    for (rank, entry) in outcome.ranked.iter().enumerate() {
        let record = MoveRecord::from_board(&mut board, entry.mv, entry.promotion).map_err(|e| e.to_string())?;
        println!(
            "{:>3}. {:<10} {:>8}  {}",
            rank + 1,
            record.pretty_algebraic,
            entry.evaluation,
            entry.line
        );
    }
    println!(
        "{} states evaluated in {} ms",
        outcome.states_evaluated,
        outcome.elapsed.as_millis()
    );
    Ok(())
}
