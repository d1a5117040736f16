//! Immutable move descriptor.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_rules::castle_rook_target;
use crate::game_state::chess_types::*;

/// A move as produced by the generator.
///
/// Identity is `(piece, start, end)`: two moves compare equal even if one of
/// them was built without capture information. Promotion is not part of the
/// move; it is chosen when the move is applied.
#[derive(Debug, Clone, Copy, Eq)]
pub struct Move {
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub start: Square,
    pub end: Square,
    pub castling_rook_start: Option<Square>,
    pub en_passant: bool,
}

impl Move {
    pub fn new(piece: Piece, start: Square, end: Square, captured: Option<Piece>) -> Self {
        Self {
            piece,
            captured,
            start,
            end,
            castling_rook_start: None,
            en_passant: false,
        }
    }

    pub fn castle(king: Piece, start: Square, end: Square, rook_start: Square) -> Self {
        Self {
            castling_rook_start: Some(rook_start),
            ..Self::new(king, start, end, None)
        }
    }

    pub fn en_passant(pawn: Piece, start: Square, end: Square) -> Self {
        Self {
            captured: Some(Piece::new(pawn.color.opposite(), PieceKind::Pawn)),
            en_passant: true,
            ..Self::new(pawn, start, end, None)
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.castling_rook_start.is_some()
    }

    /// Square the castling rook lands on.
    pub fn castling_rook_end(&self) -> Option<Square> {
        self.castling_rook_start
            .map(|_| castle_rook_target(self.start, self.end))
    }

    /// Square of the pawn removed by an en passant capture.
    pub fn en_passant_victim_square(&self) -> Option<Square> {
        if !self.en_passant {
            return None;
        }
        Some(if self.end > self.start {
            self.end - 8
        } else {
            self.end + 8
        })
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.start.abs_diff(self.end) == 16
    }

    /// Value of the captured piece, zero for quiet moves.
    pub fn captured_value(&self) -> i32 {
        self.captured.map_or(0, |piece| piece.unsigned_value())
    }

    pub fn start_coord(&self) -> SquareCoord {
        SquareCoord::from_index(self.start)
    }

    pub fn end_coord(&self) -> SquareCoord {
        SquareCoord::from_index(self.end)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece && self.start == other.start && self.end == other.end
    }
}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.piece.hash(state);
        self.start.hash(state);
        self.end.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start_coord(), self.end_coord())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const WHITE_PAWN: Piece = Piece::new(Color::White, PieceKind::Pawn);

    #[test]
    fn identity_ignores_capture_details() {
        let quiet = Move::new(WHITE_PAWN, 36, 43, None);
        let capture = Move::en_passant(WHITE_PAWN, 36, 43);
        assert_eq!(quiet, capture);

        let mut set = HashSet::new();
        set.insert(quiet);
        assert!(set.contains(&capture));
    }

    #[test]
    fn derived_squares() {
        let ep = Move::en_passant(WHITE_PAWN, 36, 43);
        assert_eq!(ep.en_passant_victim_square(), Some(35));
        let black_ep = Move::en_passant(Piece::new(Color::Black, PieceKind::Pawn), 27, 20);
        assert_eq!(black_ep.en_passant_victim_square(), Some(28));

        let king = Piece::new(Color::White, PieceKind::King);
        assert_eq!(Move::castle(king, 4, 2, 0).castling_rook_end(), Some(3));
        assert!(Move::new(WHITE_PAWN, 12, 28, None).is_double_pawn_push());
        assert!(!Move::new(WHITE_PAWN, 12, 20, None).is_double_pawn_push());
        assert_eq!(Move::new(WHITE_PAWN, 12, 28, None).to_string(), "e2e4");
    }
}
