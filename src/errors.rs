//! Errors used throughout the chess core.
//!
//! `ChessError` is the single error type of the crate. Input-shaped variants
//! (bad FEN fields, unparseable move strings) are recoverable and meant to be
//! shown to a user. Bookkeeping variants (`PieceMapFull`, `PieceNotFound`,
//! `EmptyMoveHistory`) mean the board or the move generator is broken; callers
//! should abort the operation rather than try to repair state.

use crate::game_state::chess_types::{Color, PieceKind};

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// FEN string was structurally malformed (missing fields, bad rank layout).
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid piece letter '{0}'")]
    InvalidPieceChar(char),

    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castle availability letter '{0}'")]
    InvalidCastleChar(char),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassantSquare(String),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid UCI move '{0}'")]
    InvalidUciMove(String),

    #[error("invalid promotion letter '{0}'")]
    InvalidPromotionChar(char),

    #[error("no piece on square {0}")]
    NoPieceOnSquare(String),

    #[error("piece on {0} does not belong to the side to move")]
    NotSideToMove(String),

    /// A piece may only promote to knight, bishop, rook or queen.
    #[error("cannot promote to {0:?}")]
    InvalidPromotionPiece(PieceKind),

    /// More pieces of one kind than the piece map has slots for.
    #[error("piece map for {color:?} is full for {kind:?}")]
    PieceMapFull { color: Color, kind: PieceKind },

    /// The piece map has no record of a piece the board says is there.
    #[error("no {color:?} {kind:?} recorded on square {square}")]
    PieceNotFound {
        color: Color,
        kind: PieceKind,
        square: u8,
    },

    #[error("undo requested with no moves applied")]
    EmptyMoveHistory,
}
