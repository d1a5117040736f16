//! FEN-to-Board parser.
//!
//! Builds a fully populated board (square array, piece maps, rights, clocks
//! and hash) from a Forsyth-Edwards Notation string. The halfmove and
//! fullmove fields may be omitted and default to `0` and `1`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Board> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessError::InvalidFen("missing board layout".to_owned()))?;
    let side_part = parts
        .next()
        .ok_or_else(|| ChessError::InvalidFen("missing side to move".to_owned()))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| ChessError::InvalidFen("missing castle availability".to_owned()))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| ChessError::InvalidFen("missing en passant square".to_owned()))?;
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(ChessError::InvalidFen("extra trailing fields".to_owned()));
    }

    let placements = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castle_rights = parse_castling_rights(castling_part)?;
    let en_passant_square = parse_en_passant_square(en_passant_part)?;

    let halfmove_clock = match halfmove_part {
        Some(text) => text
            .parse::<u16>()
            .map_err(|_| ChessError::InvalidFen(format!("invalid halfmove clock '{text}'")))?,
        None => 0,
    };
    let fullmove_number = match fullmove_part {
        Some(text) => text
            .parse::<u32>()
            .map_err(|_| ChessError::InvalidFen(format!("invalid fullmove number '{text}'")))?,
        None => 1,
    };
    let ply = fullmove_number.saturating_sub(1) * 2 + u32::from(side_to_move.is_black());

    Board::from_parts(
        placements,
        side_to_move,
        castle_rights,
        en_passant_square,
        halfmove_clock,
        ply,
    )
}

fn parse_board(board_part: &str) -> ChessResult<Vec<(Square, Piece)>> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFen(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    let mut placements = Vec::with_capacity(32);

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::InvalidFen(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(ChessError::InvalidPieceChar(ch))?;

            if file >= 8 {
                return Err(ChessError::InvalidFen(format!(
                    "rank '{rank_str}' has too many files"
                )));
            }

            placements.push((board_rank * 8 + file, piece));
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::InvalidFen(format!(
                "rank '{rank_str}' does not sum to 8 files"
            )));
        }
    }

    Ok(placements)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastleRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    castling_part.chars().try_fold(0, |rights, ch| match ch {
        'K' => Ok(rights | CASTLE_WHITE_KINGSIDE),
        'Q' => Ok(rights | CASTLE_WHITE_QUEENSIDE),
        'k' => Ok(rights | CASTLE_BLACK_KINGSIDE),
        'q' => Ok(rights | CASTLE_BLACK_QUEENSIDE),
        _ => Err(ChessError::InvalidCastleChar(ch)),
    })
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| ChessError::InvalidEnPassantSquare(en_passant_part.to_owned()))?;
    let rank = square / 8;
    if rank != 2 && rank != 5 {
        return Err(ChessError::InvalidEnPassantSquare(en_passant_part.to_owned()));
    }
    Ok(Some(square))
}
