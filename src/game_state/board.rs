//! Mutable board with reconstructive undo.
//!
//! `Board` keeps a square array and one `PieceMap` per color in lock step.
//! Moves are applied in place and reversed from an undo stack; the board is
//! never cloned during search. Threat bitboards are cached per color and
//! dropped on every apply and undo.

use std::cell::Cell;
use std::fmt;

use log::trace;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::bitboards::Bitboards;
use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::game_state::piece_map::PieceMap;
use crate::game_state::undo_state::{UndoEntry, UndoState};
use crate::moves::chess_move::Move;
use crate::search::zobrist;
use crate::utils::fen_parser::parse_fen;

/// Callback fired after every public apply or undo.
pub type BoardObserver = Box<dyn FnMut()>;

pub struct Board {
    squares: [Option<Piece>; 64],
    piece_maps: [PieceMap; 2],

    side_to_move: Color,
    castle_rights: CastleRights,
    en_passant_square: Option<Square>,

    halfmove_clock: u16,
    ply: u32,

    zobrist_key: u64,
    undo_stack: Vec<UndoState>,

    bitboard_cache: [Cell<Option<Bitboards>>; 2],
    observers: Vec<BoardObserver>,
}

impl Board {
    /// Board with no pieces, white to move and no castle rights.
    pub fn empty() -> Self {
        let mut board = Self {
            squares: [None; 64],
            piece_maps: [PieceMap::new(Color::White), PieceMap::new(Color::Black)],
            side_to_move: Color::White,
            castle_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            ply: 0,
            zobrist_key: 0,
            undo_stack: Vec::new(),
            bitboard_cache: [Cell::new(None), Cell::new(None)],
            observers: Vec::new(),
        };
        board.zobrist_key = zobrist::compute_hash(&board);
        board
    }

    /// Standard starting position.
    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    /// Assembles a board from loose position data. Used by the FEN parser.
    pub fn from_parts(
        placements: impl IntoIterator<Item = (Square, Piece)>,
        side_to_move: Color,
        castle_rights: CastleRights,
        en_passant_square: Option<Square>,
        halfmove_clock: u16,
        ply: u32,
    ) -> ChessResult<Self> {
        let mut board = Self::empty();
        for (square, piece) in placements {
            board.piece_maps[piece.color.index()].add(piece.kind, square)?;
            board.squares[square as usize] = Some(piece);
        }

        board.side_to_move = side_to_move;
        board.castle_rights = castle_rights;
        board.en_passant_square = en_passant_square;
        board.halfmove_clock = halfmove_clock;
        board.ply = ply;
        board.zobrist_key = zobrist::compute_hash(&board);
        Ok(board)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    #[inline]
    pub fn piece_map(&self, color: Color) -> &PieceMap {
        &self.piece_maps[color.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.piece_map(color).king_square()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castle_rights(&self) -> CastleRights {
        self.castle_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn fullmove_number(&self) -> u32 {
        self.ply / 2 + 1
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    /// Number of applied moves that can still be undone.
    pub fn history_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Occupancy and threat masks for `color`, computed on first use after a
    /// change and cached until the next apply or undo.
    pub fn get_bitboards(&self, color: Color) -> Bitboards {
        let cache = &self.bitboard_cache[color.index()];
        if let Some(boards) = cache.get() {
            return boards;
        }

        let boards = Bitboards::compute(self.piece_map(color), self.piece_map(color.opposite()));
        cache.set(Some(boards));
        boards
    }

    /// Registers a callback run after every `apply_move` and `undo_move`.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut() + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Applies `mv` and notifies observers.
    ///
    /// A pawn reaching its last rank becomes `promotion`, or a queen when no
    /// piece is given.
    pub fn apply_move(&mut self, mv: Move, promotion: Option<PieceKind>) -> ChessResult<()> {
        self.apply_move_quiet(mv, promotion)?;
        self.notify_observers();
        Ok(())
    }

    /// Reverts the most recent move and notifies observers.
    pub fn undo_move(&mut self) -> ChessResult<()> {
        self.undo_move_quiet()?;
        self.notify_observers();
        Ok(())
    }

    /// `apply_move` without observer notification; search and move
    /// generation use this pair.
    pub fn apply_move_quiet(&mut self, mv: Move, promotion: Option<PieceKind>) -> ChessResult<()> {
        let color = mv.piece.color;
        let promotes = mv.piece.kind == PieceKind::Pawn
            && SquareCoord::from_index(mv.end).rank as u8 == color.last_rank();
        let promoted_kind = match promotion {
            Some(kind) if !kind.can_promote_to() => {
                return Err(ChessError::InvalidPromotionPiece(kind));
            }
            Some(kind) => kind,
            None => PieceKind::Queen,
        };

        // Every lookup that can fail happens before the first mutation.
        if self.squares[mv.start as usize] != Some(mv.piece) {
            return Err(ChessError::PieceNotFound {
                color,
                kind: mv.piece.kind,
                square: mv.start,
            });
        }
        let castling_rook = match mv.castling_rook_start {
            Some(rook_start) => {
                let rook = Piece::new(color, PieceKind::Rook);
                if self.squares[rook_start as usize] != Some(rook) {
                    return Err(ChessError::PieceNotFound {
                        color,
                        kind: PieceKind::Rook,
                        square: rook_start,
                    });
                }
                Some((rook, rook_start, castle_rook_target(mv.start, mv.end)))
            }
            None => None,
        };
        if promotes && self.piece_map(color).squares_of(promoted_kind).len() >= 8 {
            return Err(ChessError::PieceMapFull {
                color,
                kind: promoted_kind,
            });
        }

        let prev_castle_rights = self.castle_rights;
        let prev_en_passant_square = self.en_passant_square;
        let prev_halfmove_clock = self.halfmove_clock;
        let prev_zobrist_key = self.zobrist_key;

        let mut key = self.zobrist_key
            ^ zobrist::castling_key(self.castle_rights)
            ^ zobrist::en_passant_key(self.en_passant_square);

        let dest_was_empty = self.squares[mv.end as usize].is_none();
        let victim_square = mv.en_passant_victim_square().unwrap_or(mv.end);
        let mut secondary = None;

        if let Some(victim) = self.squares[victim_square as usize] {
            self.remove_piece(victim, victim_square)?;
            key ^= zobrist::piece_square_key(victim, victim_square);
            secondary = Some(UndoEntry::Captured {
                piece: victim,
                square: victim_square,
            });
        }

        self.relocate_piece(mv.piece, mv.start, mv.end)?;
        key ^= zobrist::piece_square_key(mv.piece, mv.start) ^ zobrist::piece_square_key(mv.piece, mv.end);
        let primary = UndoEntry::Moved {
            piece: mv.piece,
            from: mv.start,
            to: mv.end,
            dest_was_empty,
        };

        if let Some((rook, rook_start, rook_end)) = castling_rook {
            self.relocate_piece(rook, rook_start, rook_end)?;
            key ^= zobrist::piece_square_key(rook, rook_start) ^ zobrist::piece_square_key(rook, rook_end);
            secondary = Some(UndoEntry::Moved {
                piece: rook,
                from: rook_start,
                to: rook_end,
                dest_was_empty: true,
            });
        }

        let mut tertiary = None;
        if promotes {
            let promoted = Piece::new(color, promoted_kind);
            self.remove_piece(mv.piece, mv.end)?;
            self.place_piece(promoted, mv.end)?;
            key ^= zobrist::piece_square_key(mv.piece, mv.end) ^ zobrist::piece_square_key(promoted, mv.end);
            tertiary = Some(UndoEntry::Promoted {
                piece: promoted,
                square: mv.end,
            });
        }

        if mv.piece.kind == PieceKind::King {
            self.castle_rights &= !castle_rights_of(color);
        }
        if mv.piece.kind == PieceKind::Rook {
            self.castle_rights &= !castle_right_for_rook_home(mv.start);
        }
        self.castle_rights &= !castle_right_for_rook_home(mv.end);

        self.en_passant_square = mv
            .is_double_pawn_push()
            .then(|| (mv.start + mv.end) / 2);

        if mv.piece.kind == PieceKind::Pawn || secondary_is_capture(secondary) {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }

        self.side_to_move = self.side_to_move.opposite();
        self.ply += 1;

        key ^= zobrist::castling_key(self.castle_rights)
            ^ zobrist::en_passant_key(self.en_passant_square)
            ^ zobrist::side_to_move_key();
        self.zobrist_key = key;

        self.undo_stack.push(UndoState {
            primary,
            secondary,
            tertiary,
            prev_castle_rights,
            prev_en_passant_square,
            prev_halfmove_clock,
            prev_zobrist_key,
        });
        self.invalidate_bitboards();

        trace!("applied {mv} (ply {})", self.ply);
        Ok(())
    }

    pub fn undo_move_quiet(&mut self) -> ChessResult<()> {
        let undo = self.undo_stack.pop().ok_or(ChessError::EmptyMoveHistory)?;

        for entry in [undo.tertiary, undo.secondary, Some(undo.primary)]
            .into_iter()
            .flatten()
        {
            self.revert_entry(entry)?;
        }

        self.castle_rights = undo.prev_castle_rights;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.zobrist_key = undo.prev_zobrist_key;
        self.side_to_move = self.side_to_move.opposite();
        self.ply -= 1;
        self.invalidate_bitboards();

        trace!("undid move (ply {})", self.ply);
        Ok(())
    }

    /// Eight lines of FEN letters, rank 8 first, `-` for empty squares.
    pub fn debug_view(&self) -> String {
        let mut out = String::with_capacity(72);
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                out.push(self.piece_at(rank * 8 + file).map_or('-', Piece::fen_char));
            }
            out.push('\n');
        }
        out
    }

    fn revert_entry(&mut self, entry: UndoEntry) -> ChessResult<()> {
        match entry {
            UndoEntry::Moved {
                piece,
                from,
                to,
                dest_was_empty,
            } => {
                self.piece_maps[piece.color.index()].move_piece(piece.kind, to, from)?;
                self.squares[from as usize] = Some(piece);
                if dest_was_empty {
                    self.squares[to as usize] = None;
                }
            }
            UndoEntry::Captured { piece, square } => {
                self.piece_maps[piece.color.index()].add(piece.kind, square)?;
                self.squares[square as usize] = Some(piece);
            }
            UndoEntry::Promoted { piece, square } => {
                let pawn = Piece::new(piece.color, PieceKind::Pawn);
                self.remove_piece(piece, square)?;
                self.place_piece(pawn, square)?;
            }
        }
        Ok(())
    }

    fn place_piece(&mut self, piece: Piece, square: Square) -> ChessResult<()> {
        self.piece_maps[piece.color.index()].add(piece.kind, square)?;
        self.squares[square as usize] = Some(piece);
        Ok(())
    }

    fn remove_piece(&mut self, piece: Piece, square: Square) -> ChessResult<()> {
        self.piece_maps[piece.color.index()].remove(piece.kind, square)?;
        self.squares[square as usize] = None;
        Ok(())
    }

    fn relocate_piece(&mut self, piece: Piece, from: Square, to: Square) -> ChessResult<()> {
        self.piece_maps[piece.color.index()].move_piece(piece.kind, from, to)?;
        self.squares[from as usize] = None;
        self.squares[to as usize] = Some(piece);
        Ok(())
    }

    fn invalidate_bitboards(&self) {
        for cache in &self.bitboard_cache {
            cache.set(None);
        }
    }

    fn notify_observers(&mut self) {
        for observer in &mut self.observers {
            observer();
        }
    }
}

fn secondary_is_capture(entry: Option<UndoEntry>) -> bool {
    matches!(entry, Some(UndoEntry::Captured { .. }))
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
            && self.piece_maps == other.piece_maps
            && self.side_to_move == other.side_to_move
            && self.castle_rights == other.castle_rights
            && self.en_passant_square == other.en_passant_square
            && self.halfmove_clock == other.halfmove_clock
            && self.ply == other.ply
            && self.zobrist_key == other.zobrist_key
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("position", &self.debug_view())
            .field("side_to_move", &self.side_to_move)
            .field("castle_rights", &format_args!("{:04b}", self.castle_rights))
            .field("en_passant_square", &self.en_passant_square)
            .field("halfmove_clock", &self.halfmove_clock)
            .field("ply", &self.ply)
            .field("history_len", &self.undo_stack.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
