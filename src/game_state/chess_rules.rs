//! Canonical chess-rule constants.
//!
//! Starting position plus the square masks castling is checked against.
//! Black masks are the white masks shifted up seven ranks.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const WHITE_QUEENSIDE_ROOK_HOME: Square = 0;
pub const WHITE_KINGSIDE_ROOK_HOME: Square = 7;
pub const BLACK_QUEENSIDE_ROOK_HOME: Square = 56;
pub const BLACK_KINGSIDE_ROOK_HOME: Square = 63;

pub const WHITE_KING_HOME: Square = 4;
pub const BLACK_KING_HOME: Square = 60;

/// Squares between king and rook that must be empty (b1, c1, d1).
pub const WHITE_QUEENSIDE_CLEARANCE: u64 = 0b0000_1110;
/// Squares the king stands on or crosses (c1, d1, e1).
pub const WHITE_QUEENSIDE_THREAT_MASK: u64 = 0b0001_1100;
pub const WHITE_KINGSIDE_CLEARANCE: u64 = 0b0110_0000;
pub const WHITE_KINGSIDE_THREAT_MASK: u64 = 0b0111_0000;

pub const BLACK_QUEENSIDE_CLEARANCE: u64 = WHITE_QUEENSIDE_CLEARANCE << 56;
pub const BLACK_QUEENSIDE_THREAT_MASK: u64 = WHITE_QUEENSIDE_THREAT_MASK << 56;
pub const BLACK_KINGSIDE_CLEARANCE: u64 = WHITE_KINGSIDE_CLEARANCE << 56;
pub const BLACK_KINGSIDE_THREAT_MASK: u64 = WHITE_KINGSIDE_THREAT_MASK << 56;

/// One castle option: the right it needs, where the rook starts, where the
/// king lands and which squares must be empty or unattacked.
#[derive(Debug, Clone, Copy)]
pub struct CastleOption {
    pub right: CastleRights,
    pub rook_home: Square,
    pub king_target: Square,
    pub clearance: u64,
    pub threat_mask: u64,
}

const WHITE_CASTLES: [CastleOption; 2] = [
    CastleOption {
        right: CASTLE_WHITE_KINGSIDE,
        rook_home: WHITE_KINGSIDE_ROOK_HOME,
        king_target: WHITE_KING_HOME + 2,
        clearance: WHITE_KINGSIDE_CLEARANCE,
        threat_mask: WHITE_KINGSIDE_THREAT_MASK,
    },
    CastleOption {
        right: CASTLE_WHITE_QUEENSIDE,
        rook_home: WHITE_QUEENSIDE_ROOK_HOME,
        king_target: WHITE_KING_HOME - 2,
        clearance: WHITE_QUEENSIDE_CLEARANCE,
        threat_mask: WHITE_QUEENSIDE_THREAT_MASK,
    },
];

const BLACK_CASTLES: [CastleOption; 2] = [
    CastleOption {
        right: CASTLE_BLACK_KINGSIDE,
        rook_home: BLACK_KINGSIDE_ROOK_HOME,
        king_target: BLACK_KING_HOME + 2,
        clearance: BLACK_KINGSIDE_CLEARANCE,
        threat_mask: BLACK_KINGSIDE_THREAT_MASK,
    },
    CastleOption {
        right: CASTLE_BLACK_QUEENSIDE,
        rook_home: BLACK_QUEENSIDE_ROOK_HOME,
        king_target: BLACK_KING_HOME - 2,
        clearance: BLACK_QUEENSIDE_CLEARANCE,
        threat_mask: BLACK_QUEENSIDE_THREAT_MASK,
    },
];

#[inline]
pub fn castle_options(color: Color) -> &'static [CastleOption; 2] {
    match color {
        Color::White => &WHITE_CASTLES,
        Color::Black => &BLACK_CASTLES,
    }
}

#[inline]
pub const fn king_home(color: Color) -> Square {
    match color {
        Color::White => WHITE_KING_HOME,
        Color::Black => BLACK_KING_HOME,
    }
}

/// Castle right lost when a rook leaves, or something lands on, `square`.
#[inline]
pub const fn castle_right_for_rook_home(square: Square) -> CastleRights {
    match square {
        WHITE_QUEENSIDE_ROOK_HOME => CASTLE_WHITE_QUEENSIDE,
        WHITE_KINGSIDE_ROOK_HOME => CASTLE_WHITE_KINGSIDE,
        BLACK_QUEENSIDE_ROOK_HOME => CASTLE_BLACK_QUEENSIDE,
        BLACK_KINGSIDE_ROOK_HOME => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}

#[inline]
pub const fn castle_rights_of(color: Color) -> CastleRights {
    match color {
        Color::White => CASTLE_ALL_WHITE,
        Color::Black => CASTLE_ALL_BLACK,
    }
}

/// Rook landing square for a king moving `king_start -> king_end` by two files.
#[inline]
pub const fn castle_rook_target(king_start: Square, king_end: Square) -> Square {
    if king_end > king_start {
        king_end - 1
    } else {
        king_end + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_masks_cover_eighth_rank_squares() {
        // b8 c8 d8
        assert_eq!(BLACK_QUEENSIDE_CLEARANCE, (1 << 57) | (1 << 58) | (1 << 59));
        // e8 f8 g8
        assert_eq!(BLACK_KINGSIDE_THREAT_MASK, (1 << 60) | (1 << 61) | (1 << 62));
    }

    #[test]
    fn rook_targets_sit_beside_the_king() {
        assert_eq!(castle_rook_target(4, 6), 5);
        assert_eq!(castle_rook_target(4, 2), 3);
        assert_eq!(castle_rook_target(60, 62), 61);
        assert_eq!(castle_rook_target(60, 58), 59);
    }
}
