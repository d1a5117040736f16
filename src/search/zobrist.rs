//! Zobrist hashing for fast position identity.
//!
//! Keys come from a seeded `StdRng`, so hashes are stable across runs. The
//! board keeps its key up to date move by move; `compute_hash` builds the
//! same value from scratch and is used at load time and in tests.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

const ZOBRIST_SEED: u64 = 0x5EED_C4E5_51E0_0001;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    /// Eight files plus a final "no en passant" slot.
    en_passant: [u64; 9],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for kind in color {
            for key in kind {
                *key = rng.next_u64();
            }
        }
    }

    let side_to_move = rng.next_u64();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.next_u64();
    }

    let mut en_passant = [0u64; 9];
    for key in &mut en_passant {
        *key = rng.next_u64();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant,
    }
}

#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][square as usize]
}

/// Mixed in while black is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

#[inline]
pub fn castling_key(rights: CastleRights) -> u64 {
    tables().castling[(rights & 0x0F) as usize]
}

/// Key for the en passant file, or the "none" key when there is no target.
#[inline]
pub fn en_passant_key(square: Option<Square>) -> u64 {
    let slot = square.map_or(8, |sq| (sq & 7) as usize);
    tables().en_passant[slot]
}

/// Hash of `board` computed from its current contents.
pub fn compute_hash(board: &Board) -> u64 {
    let mut key = (0u8..64).fold(0u64, |key, square| match board.piece_at(square) {
        Some(piece) => key ^ piece_square_key(piece, square),
        None => key,
    });

    if board.side_to_move() == Color::Black {
        key ^= side_to_move_key();
    }
    key ^= castling_key(board.castle_rights());
    key ^= en_passant_key(board.en_passant_square());
    key
}
