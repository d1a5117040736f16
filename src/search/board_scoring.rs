//! Static evaluation.
//!
//! Scores are white-positive: material plus piece-square bonuses, replaced by
//! a mate score when the side to move is checkmated and by zero on
//! stalemate.

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::board_calculator::{has_any_legal_move, is_check};

pub const MATE_SCORE: i32 = 999_998;
/// Bound used to open the alpha-beta window.
pub const MAX_SCORE: i32 = 999_999;

// Tables are from white's side, a1 first. Black reads them mirrored.

const PAWN_PST: [i32; 64] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10, -20, -20,  10,  10,   5,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,   5,  10,  25,  25,  10,   5,   5,
    10,  10,  20,  30,  30,  20,  10,  10,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,   0,   0,   0,   0,   0,   0,
];

const KNIGHT_PST: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP_PST: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

const ROOK_PST: [i32; 64] = [
     0,   0,   0,   5,   5,   0,   0,   0,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     5,  10,  10,  10,  10,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

const QUEEN_PST: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

const KING_PST: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

#[inline]
fn pst(kind: PieceKind) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_PST,
        PieceKind::Knight => &KNIGHT_PST,
        PieceKind::Bishop => &BISHOP_PST,
        PieceKind::Rook => &ROOK_PST,
        PieceKind::Queen => &QUEEN_PST,
        PieceKind::King => &KING_PST,
    }
}

/// Piece-square bonus for `piece` on `square`, white-positive.
#[inline]
pub fn positional_value(piece: Piece, square: Square) -> i32 {
    let index = match piece.color {
        Color::White => square,
        Color::Black => square ^ 56,
    };
    pst(piece.kind)[index as usize] * piece.color.sign()
}

/// Sum of signed piece values.
pub fn material_balance(board: &Board) -> i32 {
    [Color::White, Color::Black]
        .iter()
        .map(|&color| {
            let map = board.piece_map(color);
            NON_KING_KINDS
                .iter()
                .map(|&kind| Piece::new(color, kind).signed_value() * map.squares_of(kind).len() as i32)
                .sum::<i32>()
        })
        .sum()
}

pub fn positional_balance(board: &Board) -> i32 {
    [Color::White, Color::Black]
        .iter()
        .flat_map(|&color| board.piece_map(color).all_pieces(false))
        .map(|located| positional_value(located.piece, located.square))
        .sum()
}

/// White-positive static score of `board`.
pub fn evaluate(board: &mut Board) -> ChessResult<i32> {
    let side = board.side_to_move();
    if !has_any_legal_move(board, side)? {
        if is_check(board, side) {
            return Ok(-side.sign() * MATE_SCORE);
        }
        return Ok(0);
    }

    Ok(material_balance(board) + positional_balance(board))
}
