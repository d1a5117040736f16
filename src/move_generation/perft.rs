//! Perft node counting.
//!
//! Walks the legal move tree in place with quiet apply/undo. Promotions count
//! once per promotion piece. Leaf counters classify the moves made at the
//! last ply.

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::PieceKind;
use crate::move_generation::board_calculator::{get_all_valid_moves, promotion_choices};
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn record_leaf(&mut self, mv: &Move, promotion: Option<PieceKind>) {
        self.nodes += 1;
        if mv.is_capture() {
            self.captures += 1;
        }
        if mv.en_passant {
            self.en_passant += 1;
        }
        if mv.is_castle() {
            self.castles += 1;
        }
        if promotion.is_some() {
            self.promotions += 1;
        }
    }

    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

/// Leaf counts below each root move plus the aggregate counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerftReport {
    pub divide: Vec<(String, u64)>,
    pub totals: PerftCounts,
}

/// Number of leaf positions `depth` plies below `board`.
pub fn perft(board: &mut Board, depth: u8) -> ChessResult<u64> {
    Ok(perft_counts(board, depth)?.nodes)
}

pub fn perft_counts(board: &mut Board, depth: u8) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }

    perft_recurse(board, depth, &mut counts)?;
    Ok(counts)
}

pub fn perft_divide(board: &mut Board, depth: u8) -> ChessResult<PerftReport> {
    let mut report = PerftReport::default();
    if depth == 0 {
        report.totals.nodes = 1;
        return Ok(report);
    }

    for mv in get_all_valid_moves(board, true)? {
        for &promotion in promotion_choices(&mv) {
            let mut below = PerftCounts::default();
            if depth == 1 {
                below.record_leaf(&mv, promotion);
            } else {
                board.apply_move_quiet(mv, promotion)?;
                let result = perft_recurse(board, depth - 1, &mut below);
                board.undo_move_quiet()?;
                result?;
            }

            report
                .divide
                .push((move_to_long_algebraic(&mv, promotion), below.nodes));
            report.totals.merge(below);
        }
    }

    Ok(report)
}

fn perft_recurse(board: &mut Board, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    for mv in get_all_valid_moves(board, false)? {
        for &promotion in promotion_choices(&mv) {
            if depth == 1 {
                counts.record_leaf(&mv, promotion);
                continue;
            }

            board.apply_move_quiet(mv, promotion)?;
            let result = perft_recurse(board, depth - 1, counts);
            board.undo_move_quiet()?;
            result?;
        }
    }

    Ok(())
}
