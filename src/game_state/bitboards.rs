use crate::game_state::piece_map::PieceMap;

/// Occupancy and threat masks seen from one side.
///
/// `threats` holds every square the opponent attacks. `king_threats` is the
/// same projection with this side's king lifted off the board, so a slider
/// checking the king also covers the squares behind it; the king may not
/// step onto any of those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboards {
    pub all_pieces: u64,
    pub threats: u64,
    pub king_threats: u64,
}

impl Bitboards {
    /// Builds the snapshot for the side owning `own`.
    pub fn compute(own: &PieceMap, opponent: &PieceMap) -> Self {
        let all_pieces = own.occupancy() | opponent.occupancy();
        let king_bit = own.king_square().map_or(0, |square| 1u64 << square);

        Self {
            all_pieces,
            threats: opponent.threats(all_pieces),
            king_threats: opponent.threats(all_pieces & !king_bit),
        }
    }
}
