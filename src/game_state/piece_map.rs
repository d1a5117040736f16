//! Per-color index of where each piece stands.
//!
//! Non-king pieces live in fixed eight-slot lists per kind (unordered, swap
//! removal). The king is tracked on its own. A bitboard per kind and an
//! overall occupancy mask are kept in step with every add, move and remove.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::attack_tables::piece_attacks;

const SLOTS_PER_KIND: usize = 8;

/// A piece together with the square it stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocatedPiece {
    pub piece: Piece,
    pub square: Square,
}

#[derive(Debug, Clone)]
pub struct PieceMap {
    color: Color,
    locations: [[Square; SLOTS_PER_KIND]; 5],
    counts: [u8; 5],
    king: Option<Square>,
    kind_bitboards: [u64; 6],
    occupancy: u64,
}

// Slot order shifts with capture and undo; equality only looks at placement.
impl PartialEq for PieceMap {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
            && self.king == other.king
            && self.kind_bitboards == other.kind_bitboards
            && self.occupancy == other.occupancy
    }
}

impl Eq for PieceMap {}

impl PieceMap {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            locations: [[0; SLOTS_PER_KIND]; 5],
            counts: [0; 5],
            king: None,
            kind_bitboards: [0; 6],
            occupancy: 0,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn occupancy(&self) -> u64 {
        self.occupancy
    }

    #[inline]
    pub fn bitboard(&self, kind: PieceKind) -> u64 {
        self.kind_bitboards[kind.index()]
    }

    #[inline]
    pub fn king_square(&self) -> Option<Square> {
        self.king
    }

    /// Squares holding pieces of `kind`, in storage order.
    pub fn squares_of(&self, kind: PieceKind) -> &[Square] {
        match kind {
            PieceKind::King => match &self.king {
                Some(square) => std::slice::from_ref(square),
                None => &[],
            },
            _ => {
                let idx = kind.index();
                &self.locations[idx][..self.counts[idx] as usize]
            }
        }
    }

    pub fn piece_count(&self) -> u32 {
        self.occupancy.count_ones()
    }

    /// Records a new piece. A second king or a ninth piece of one kind is
    /// refused with `PieceMapFull`.
    pub fn add(&mut self, kind: PieceKind, square: Square) -> ChessResult<()> {
        if kind == PieceKind::King {
            if self.king.is_some() {
                return Err(ChessError::PieceMapFull {
                    color: self.color,
                    kind,
                });
            }
            self.king = Some(square);
        } else {
            let idx = kind.index();
            let count = self.counts[idx] as usize;
            if count >= SLOTS_PER_KIND {
                return Err(ChessError::PieceMapFull {
                    color: self.color,
                    kind,
                });
            }
            self.locations[idx][count] = square;
            self.counts[idx] += 1;
        }

        self.set_bits(kind, square);
        Ok(())
    }

    pub fn remove(&mut self, kind: PieceKind, square: Square) -> ChessResult<()> {
        if kind == PieceKind::King {
            if self.king != Some(square) {
                return Err(self.not_found(kind, square));
            }
            self.king = None;
        } else {
            let idx = kind.index();
            let slot = self.slot_of(kind, square)?;
            let last = self.counts[idx] as usize - 1;
            self.locations[idx][slot] = self.locations[idx][last];
            self.counts[idx] -= 1;
        }

        self.clear_bits(kind, square);
        Ok(())
    }

    /// Relocates a piece, keeping its slot so storage order is stable.
    pub fn move_piece(&mut self, kind: PieceKind, from: Square, to: Square) -> ChessResult<()> {
        if kind == PieceKind::King {
            if self.king != Some(from) {
                return Err(self.not_found(kind, from));
            }
            self.king = Some(to);
        } else {
            let slot = self.slot_of(kind, from)?;
            self.locations[kind.index()][slot] = to;
        }

        self.clear_bits(kind, from);
        self.set_bits(kind, to);
        Ok(())
    }

    /// Every piece of this color. Storage order unless `sorted`, in which
    /// case pieces come back by ascending square.
    pub fn all_pieces(&self, sorted: bool) -> Vec<LocatedPiece> {
        let mut pieces: Vec<LocatedPiece> = ALL_PIECE_KINDS
            .iter()
            .flat_map(|&kind| {
                let piece = Piece::new(self.color, kind);
                self.squares_of(kind)
                    .iter()
                    .map(move |&square| LocatedPiece { piece, square })
            })
            .collect();

        if sorted {
            pieces.sort_by_key(|located| located.square);
        }
        pieces
    }

    /// Non-king pieces of this color attacking `target` through `occupancy`.
    pub fn attackers(&self, target: Square, occupancy: u64) -> Vec<LocatedPiece> {
        let target_bit = 1u64 << target;
        let mut found = Vec::new();

        for &kind in &NON_KING_KINDS {
            let piece = Piece::new(self.color, kind);
            for &square in self.squares_of(kind) {
                if square != target && piece_attacks(piece, square, occupancy) & target_bit != 0 {
                    found.push(LocatedPiece { piece, square });
                }
            }
        }

        found
    }

    /// Union of attack masks of every piece of this color.
    pub fn threats(&self, occupancy: u64) -> u64 {
        ALL_PIECE_KINDS.iter().fold(0, |acc, &kind| {
            let piece = Piece::new(self.color, kind);
            self.squares_of(kind)
                .iter()
                .fold(acc, |acc, &square| acc | piece_attacks(piece, square, occupancy))
        })
    }

    fn slot_of(&self, kind: PieceKind, square: Square) -> ChessResult<usize> {
        self.squares_of(kind)
            .iter()
            .position(|&s| s == square)
            .ok_or_else(|| self.not_found(kind, square))
    }

    fn not_found(&self, kind: PieceKind, square: Square) -> ChessError {
        ChessError::PieceNotFound {
            color: self.color,
            kind,
            square,
        }
    }

    #[inline]
    fn set_bits(&mut self, kind: PieceKind, square: Square) {
        let bit = 1u64 << square;
        self.kind_bitboards[kind.index()] |= bit;
        self.occupancy |= bit;
    }

    #[inline]
    fn clear_bits(&mut self, kind: PieceKind, square: Square) {
        let bit = !(1u64 << square);
        self.kind_bitboards[kind.index()] &= bit;
        self.occupancy &= bit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_move_remove_keep_occupancy_in_sync() {
        let mut map = PieceMap::new(Color::White);
        map.add(PieceKind::Knight, 1).expect("add b1 knight");
        map.add(PieceKind::Knight, 6).expect("add g1 knight");
        map.add(PieceKind::King, 4).expect("add king");
        assert_eq!(map.piece_count(), 3);

        map.move_piece(PieceKind::Knight, 1, 18).expect("move b1-c3");
        assert_eq!(map.squares_of(PieceKind::Knight), &[18, 6]);
        assert_eq!(map.bitboard(PieceKind::Knight), (1 << 18) | (1 << 6));

        map.remove(PieceKind::Knight, 18).expect("remove c3");
        assert_eq!(map.squares_of(PieceKind::Knight), &[6]);
        assert_eq!(map.occupancy(), (1 << 6) | (1 << 4));
        assert_eq!(map.king_square(), Some(4));
    }

    #[test]
    fn second_king_is_rejected() {
        let mut map = PieceMap::new(Color::White);
        map.add(PieceKind::King, 4).expect("first king");
        assert_eq!(
            map.add(PieceKind::King, 0),
            Err(ChessError::PieceMapFull {
                color: Color::White,
                kind: PieceKind::King,
            })
        );
        assert_eq!(map.king_square(), Some(4));
        assert_eq!(map.occupancy(), 1 << 4);
    }

    #[test]
    fn ninth_piece_of_a_kind_is_rejected() {
        let mut map = PieceMap::new(Color::Black);
        for square in 8..16 {
            map.add(PieceKind::Queen, square).expect("slot available");
        }
        assert_eq!(
            map.add(PieceKind::Queen, 20),
            Err(ChessError::PieceMapFull {
                color: Color::Black,
                kind: PieceKind::Queen
            })
        );
    }

    #[test]
    fn removing_missing_piece_is_an_error() {
        let mut map = PieceMap::new(Color::White);
        map.add(PieceKind::Rook, 0).expect("add rook");
        assert!(matches!(
            map.remove(PieceKind::Rook, 7),
            Err(ChessError::PieceNotFound { square: 7, .. })
        ));
        assert!(map.move_piece(PieceKind::King, 4, 5).is_err());
    }

    #[test]
    fn sorted_listing_orders_by_square() {
        let mut map = PieceMap::new(Color::White);
        map.add(PieceKind::Rook, 7).expect("rook");
        map.add(PieceKind::Pawn, 12).expect("pawn");
        map.add(PieceKind::King, 4).expect("king");
        let squares: Vec<Square> = map.all_pieces(true).iter().map(|p| p.square).collect();
        assert_eq!(squares, vec![4, 7, 12]);
    }

    #[test]
    fn attackers_skip_blocked_sliders() {
        let mut map = PieceMap::new(Color::White);
        map.add(PieceKind::Rook, 0).expect("a1 rook");
        map.add(PieceKind::Bishop, 2).expect("c1 bishop");
        // target a4; bishop on c1 does not reach it
        let occupancy = map.occupancy() | (1 << 8);
        assert!(map.attackers(24, occupancy).is_empty());
        let open = map.attackers(24, map.occupancy());
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].square, 0);
    }
}
