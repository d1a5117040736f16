//! Primitive chess types shared by every layer of the crate.
//!
//! Squares are `u8` indices with `0 == a1`, `7 == h1` and `63 == h8`
//! (`rank * 8 + file`). A piece is a kind plus a color; an empty square is
//! `None`, so "no piece" can never carry a color.

use std::fmt;
use std::ops::{Add, Sub};

/// Board square index (`0..=63`).
pub type Square = u8;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 300;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Color::Black)
    }

    /// `+1` for white, `-1` for black. Evaluations are white-positive.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank delta of a single pawn advance.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank on which this color's pawns promote.
    #[inline]
    pub const fn last_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Kinds stored in the per-type location lists of a piece map.
pub const NON_KING_KINDS: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// Promotion choices in the order search and perft try them.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Bishop,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value in centipawns. The king carries none.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => PAWN_VALUE,
            PieceKind::Knight => KNIGHT_VALUE,
            PieceKind::Bishop => BISHOP_VALUE,
            PieceKind::Rook => ROOK_VALUE,
            PieceKind::Queen => QUEEN_VALUE,
            PieceKind::King => 0,
        }
    }

    /// Upper-case letter used in SAN and FEN.
    pub const fn type_letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub const fn can_promote_to(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// White-positive material value.
    #[inline]
    pub const fn signed_value(self) -> i32 {
        self.kind.value() * self.color.sign()
    }

    #[inline]
    pub const fn unsigned_value(self) -> i32 {
        self.kind.value()
    }

    pub const fn fen_char(self) -> char {
        let letter = self.kind.type_letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };

        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };

        Some(Self::new(color, kind))
    }

    pub const fn icon(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}

/// Castle availability bits.
pub type CastleRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastleRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastleRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastleRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastleRights = 1 << 3;
pub const CASTLE_ALL_WHITE: CastleRights = CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE;
pub const CASTLE_ALL_BLACK: CastleRights = CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE;
pub const CASTLE_ALL: CastleRights = CASTLE_ALL_WHITE | CASTLE_ALL_BLACK;

/// Rank/file step between two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveVector {
    pub d_rank: i8,
    pub d_file: i8,
}

impl MoveVector {
    pub const UP: MoveVector = MoveVector::new(1, 0);
    pub const DOWN: MoveVector = MoveVector::new(-1, 0);
    pub const RIGHT: MoveVector = MoveVector::new(0, 1);
    pub const LEFT: MoveVector = MoveVector::new(0, -1);
    pub const UP_RIGHT: MoveVector = MoveVector::new(1, 1);
    pub const UP_LEFT: MoveVector = MoveVector::new(1, -1);
    pub const DOWN_RIGHT: MoveVector = MoveVector::new(-1, 1);
    pub const DOWN_LEFT: MoveVector = MoveVector::new(-1, -1);

    pub const fn new(d_rank: i8, d_file: i8) -> Self {
        Self { d_rank, d_file }
    }

    #[inline]
    pub const fn scaled(self, scale: i8) -> Self {
        Self::new(self.d_rank * scale, self.d_file * scale)
    }
}

/// Rank/file pair. May be off the board; check `is_valid` before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SquareCoord {
    pub rank: i8,
    pub file: i8,
}

impl SquareCoord {
    #[inline]
    pub const fn new(rank: i8, file: i8) -> Self {
        Self { rank, file }
    }

    #[inline]
    pub const fn from_index(square: Square) -> Self {
        Self {
            rank: (square >> 3) as i8,
            file: (square & 7) as i8,
        }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.rank >= 0 && self.rank <= 7 && self.file >= 0 && self.file <= 7
    }

    #[inline]
    pub const fn index(self) -> Square {
        (self.rank as u8) * 8 + self.file as u8
    }

    #[inline]
    pub const fn bitboard_mask(self) -> u64 {
        1u64 << self.index()
    }

    pub const fn file_char(self) -> char {
        (b'a' + self.file as u8) as char
    }

    pub const fn rank_char(self) -> char {
        (b'1' + self.rank as u8) as char
    }
}

impl Add<MoveVector> for SquareCoord {
    type Output = SquareCoord;

    fn add(self, step: MoveVector) -> SquareCoord {
        SquareCoord::new(self.rank + step.d_rank, self.file + step.d_file)
    }
}

impl Sub<MoveVector> for SquareCoord {
    type Output = SquareCoord;

    fn sub(self, step: MoveVector) -> SquareCoord {
        SquareCoord::new(self.rank - step.d_rank, self.file - step.d_file)
    }
}

impl fmt::Display for SquareCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_coord_index_matches_rank_file_layout() {
        let e4 = SquareCoord::new(3, 4);
        assert_eq!(e4.index(), 28);
        assert_eq!(SquareCoord::from_index(28), e4);
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(SquareCoord::from_index(63).to_string(), "h8");
    }

    #[test]
    fn stepping_off_the_board_is_invalid() {
        let h1 = SquareCoord::from_index(7);
        assert!(!(h1 + MoveVector::RIGHT).is_valid());
        assert!(!(h1 + MoveVector::DOWN).is_valid());
        assert!((h1 + MoveVector::UP_LEFT).is_valid());
        assert_eq!((h1 + MoveVector::UP_LEFT).index(), 14);
    }

    #[test]
    fn piece_letters_round_trip_with_color() {
        for ch in ['P', 'N', 'B', 'R', 'Q', 'K', 'p', 'n', 'b', 'r', 'q', 'k'] {
            let piece = Piece::from_fen_char(ch).expect("letter should parse");
            assert_eq!(piece.fen_char(), ch);
        }
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('3'), None);
    }

    #[test]
    fn signed_values_favor_white() {
        assert_eq!(Piece::new(Color::White, PieceKind::Rook).signed_value(), 500);
        assert_eq!(Piece::new(Color::Black, PieceKind::Knight).signed_value(), -300);
        assert_eq!(Piece::new(Color::Black, PieceKind::King).signed_value(), 0);
    }
}
