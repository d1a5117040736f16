//! Crate root module declarations for the Chessie chess engine.
//!
//! Exposes the board model, legal move generation with perft, the
//! alpha-beta search and the FEN/notation helpers so the binaries, benches
//! and tests import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod bitboards;
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod piece_map;
    pub mod undo_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod chess_move;
    pub mod move_record;
}

pub mod move_generation {
    pub mod board_calculator;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod chessie_bot;
    pub mod move_ordering;
    pub mod static_exchange;
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
