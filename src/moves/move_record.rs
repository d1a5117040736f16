//! Human-readable record of a played move.
//!
//! A record is built after the fact for move history display; search never
//! looks at it.

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::board_calculator::{get_all_valid_moves_for, is_check, is_mate, is_promotion};
use crate::moves::chess_move::Move;

pub const MOVE_TYPE_SIMPLE: u8 = 0;
pub const MOVE_TYPE_CAPTURE: u8 = 1 << 0;
pub const MOVE_TYPE_EN_PASSANT: u8 = 1 << 1;
pub const MOVE_TYPE_CASTLE: u8 = 1 << 2;
pub const MOVE_TYPE_PROMOTION: u8 = 1 << 3;
pub const MOVE_TYPE_CHECK: u8 = 1 << 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub promotion: Option<PieceKind>,
    pub move_type: u8,
    pub algebraic: String,
    pub pretty_algebraic: String,
}

impl MoveRecord {
    /// Builds the record from the move plus the other legal moves of the same
    /// side, which are needed to disambiguate the origin square.
    pub fn new(
        mv: Move,
        available_moves: &[Move],
        promotion: Option<PieceKind>,
        gives_check: bool,
        gives_mate: bool,
    ) -> Self {
        // the board promotes to a queen when no piece is named
        let promotion = is_promotion(mv.piece, mv.end).then(|| promotion.unwrap_or(PieceKind::Queen));
        let move_type = classify(&mv, promotion, gives_check);
        let suffix = if gives_mate {
            "#"
        } else if gives_check {
            "+"
        } else {
            ""
        };

        let body = if let Some(rook_start) = mv.castling_rook_start {
            if rook_start & 7 == 0 { "O-O-O" } else { "O-O" }.to_owned()
        } else if mv.piece.kind == PieceKind::Pawn {
            pawn_body(&mv, promotion)
        } else {
            piece_body(&mv, available_moves)
        };

        let algebraic = format!("{body}{suffix}");
        let pretty_algebraic = if mv.piece.kind == PieceKind::Pawn || mv.is_castle() {
            algebraic.clone()
        } else {
            algebraic.replacen(mv.piece.kind.type_letter(), &mv.piece.icon().to_string(), 1)
        };

        Self {
            mv,
            promotion,
            move_type,
            algebraic,
            pretty_algebraic,
        }
    }

    /// Builds the record for `mv` about to be played on `board`, working out
    /// check and mate by applying and undoing it.
    pub fn from_board(board: &mut Board, mv: Move, promotion: Option<PieceKind>) -> ChessResult<Self> {
        let mover = mv.piece.color;
        let available = get_all_valid_moves_for(board, mover, true)?;

        board.apply_move_quiet(mv, promotion)?;
        let outcome = is_check(board, mover.opposite())
            .then(|| is_mate(board, mover.opposite()))
            .transpose();
        board.undo_move_quiet()?;

        let gives_mate = outcome?;
        Ok(Self::new(
            mv,
            &available,
            promotion,
            gives_mate.is_some(),
            gives_mate.unwrap_or(false),
        ))
    }

    #[inline]
    pub fn has_type(&self, flag: u8) -> bool {
        self.move_type & flag != 0
    }
}

fn classify(mv: &Move, promotion: Option<PieceKind>, gives_check: bool) -> u8 {
    let mut move_type = MOVE_TYPE_SIMPLE;
    if mv.is_castle() {
        move_type |= MOVE_TYPE_CASTLE;
    } else {
        if mv.en_passant {
            move_type |= MOVE_TYPE_EN_PASSANT;
        } else if mv.is_capture() {
            move_type |= MOVE_TYPE_CAPTURE;
        }
        if promotion.is_some() {
            move_type |= MOVE_TYPE_PROMOTION;
        }
    }
    if gives_check {
        move_type |= MOVE_TYPE_CHECK;
    }
    move_type
}

fn pawn_body(mv: &Move, promotion: Option<PieceKind>) -> String {
    let mut out = String::new();
    if mv.is_capture() {
        out.push(mv.start_coord().file_char());
        out.push('x');
    }
    out.push_str(&mv.end_coord().to_string());
    if let Some(kind) = promotion {
        out.push('=');
        out.push(kind.type_letter());
    }
    if mv.en_passant {
        out.push_str(" e.p.");
    }
    out
}

fn piece_body(mv: &Move, available_moves: &[Move]) -> String {
    let origin = mv.start_coord();
    let rivals: Vec<SquareCoord> = available_moves
        .iter()
        .filter(|other| other.end == mv.end && other.start != mv.start && other.piece == mv.piece)
        .map(Move::start_coord)
        .collect();

    let mut out = String::new();
    out.push(mv.piece.kind.type_letter());

    if !rivals.is_empty() {
        let file_shared = rivals.iter().any(|rival| rival.file == origin.file);
        let rank_shared = rivals.iter().any(|rival| rival.rank == origin.rank);
        if !file_shared {
            out.push(origin.file_char());
        } else if !rank_shared {
            out.push(origin.rank_char());
        } else {
            out.push(origin.file_char());
            out.push(origin.rank_char());
        }
    }

    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&mv.end_coord().to_string());
    out
}
