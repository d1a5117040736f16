//! Attack patterns for every piece type.
//!
//! Leapers (knight, king, pawn captures) use tables built at compile time.
//! Sliders trace rays against an occupancy mask; the first occupied square on
//! a ray is included (it may be a capture) and ends the ray.

use crate::game_state::chess_types::*;

pub const ROOK_DIRECTIONS: [MoveVector; 4] = [
    MoveVector::UP,
    MoveVector::DOWN,
    MoveVector::RIGHT,
    MoveVector::LEFT,
];

pub const BISHOP_DIRECTIONS: [MoveVector; 4] = [
    MoveVector::UP_RIGHT,
    MoveVector::UP_LEFT,
    MoveVector::DOWN_RIGHT,
    MoveVector::DOWN_LEFT,
];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub const KNIGHT_ATTACKS: [u64; 64] = generate_leaper_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = generate_leaper_table(&KING_OFFSETS);
pub const PAWN_ATTACKS: [[u64; 64]; 2] = [generate_pawn_table(1), generate_pawn_table(-1)];

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` on `square` captures on.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    PAWN_ATTACKS[color.index()][square as usize]
}

pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    ROOK_DIRECTIONS
        .iter()
        .fold(0, |acc, dir| acc | trace_ray(square, *dir, occupancy))
}

pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0, |acc, dir| acc | trace_ray(square, *dir, occupancy))
}

pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

/// Attack mask of `piece` standing on `square` with the given occupancy.
pub fn piece_attacks(piece: Piece, square: Square, occupancy: u64) -> u64 {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, square),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, occupancy),
        PieceKind::Rook => rook_attacks(square, occupancy),
        PieceKind::Queen => queen_attacks(square, occupancy),
        PieceKind::King => king_attacks(square),
    }
}

/// Walks from `square` along `dir` until the board edge or the first
/// occupied square, which is included.
pub fn trace_ray(square: Square, dir: MoveVector, occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    let mut coord = SquareCoord::from_index(square) + dir;

    while coord.is_valid() {
        let bit = coord.bitboard_mask();
        attacks |= bit;
        if occupancy & bit != 0 {
            break;
        }
        coord = coord + dir;
    }

    attacks
}

const fn generate_leaper_table(offsets: &[(i32, i32); 8]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let rank = (sq / 8) as i32;
        let file = (sq % 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0;
        while i < offsets.len() {
            attacks |= set_if_valid(rank + offsets[i].0, file + offsets[i].1);
            i += 1;
        }
        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn generate_pawn_table(direction: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let rank = (sq / 8) as i32;
        let file = (sq % 8) as i32;
        table[sq] = set_if_valid(rank + direction, file - 1) | set_if_valid(rank + direction, file + 1);
        sq += 1;
    }

    table
}

const fn set_if_valid(rank: i32, file: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    1u64 << ((rank as usize) * 8 + file as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaper_counts_from_center_and_corner() {
        let d4 = 27;
        assert_eq!(knight_attacks(d4).count_ones(), 8);
        assert_eq!(king_attacks(d4).count_ones(), 8);
        assert_eq!(knight_attacks(0).count_ones(), 2);
        assert_eq!(king_attacks(0).count_ones(), 3);
    }

    #[test]
    fn pawn_attacks_point_toward_the_opponent() {
        // e4 pawn
        assert_eq!(pawn_attacks(Color::White, 28), (1 << 35) | (1 << 37));
        assert_eq!(pawn_attacks(Color::Black, 28), (1 << 19) | (1 << 21));
        // a-file pawns have a single capture square
        assert_eq!(pawn_attacks(Color::White, 8).count_ones(), 1);
    }

    #[test]
    fn rays_stop_on_first_blocker() {
        let d4 = 27;
        assert_eq!(rook_attacks(d4, 0).count_ones(), 14);
        assert_eq!(bishop_attacks(d4, 0).count_ones(), 13);

        // blocker on d6 hides d7 and d8
        let blocked = rook_attacks(d4, 1 << 43);
        assert_ne!(blocked & (1 << 43), 0);
        assert_eq!(blocked & (1 << 51), 0);
        assert_eq!(blocked.count_ones(), 12);
    }
}
