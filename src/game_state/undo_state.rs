use crate::game_state::chess_types::*;

/// One reversible sub-operation of an applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoEntry {
    /// `piece` went from `from` to `to`. When `to` held a victim the
    /// capture entry puts it back, so `to` is only cleared if it was empty.
    Moved {
        piece: Piece,
        from: Square,
        to: Square,
        dest_was_empty: bool,
    },
    /// `piece` was taken off `square`.
    Captured { piece: Piece, square: Square },
    /// The pawn on `square` became `piece`.
    Promoted { piece: Piece, square: Square },
}

/// Single undo record for `apply_move` / `undo_move`.
///
/// Entries are reversed tertiary first, then secondary, then primary.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub primary: UndoEntry,
    pub secondary: Option<UndoEntry>,
    pub tertiary: Option<UndoEntry>,

    pub prev_castle_rights: CastleRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_zobrist_key: u64,
}
