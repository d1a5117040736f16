//! UCI-style coordinate moves ("e2e4", "e7e8q").
//!
//! Strings are resolved against the board so the resulting `Move` carries the
//! captured piece, castling rook and en passant flag. Legality is not checked
//! here; callers filter through the move generator when they need it.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::{castle_options, king_home};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

pub fn move_to_long_algebraic(mv: &Move, promotion: Option<PieceKind>) -> String {
    let mut out = mv.to_string();
    if let Some(kind) = promotion {
        out.push(kind.type_letter().to_ascii_lowercase());
    }
    out
}

pub fn parse_uci_move(board: &Board, text: &str) -> ChessResult<(Move, Option<PieceKind>)> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidUciMove(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    let piece = board
        .piece_at(from)
        .ok_or_else(|| ChessError::NoPieceOnSquare(text[0..2].to_owned()))?;
    if piece.color != board.side_to_move() {
        return Err(ChessError::NotSideToMove(text[0..2].to_owned()));
    }

    let target = board.piece_at(to);
    if target.is_some_and(|victim| victim.color == piece.color) {
        return Err(ChessError::InvalidUciMove(text.to_owned()));
    }

    let mv = if piece.kind == PieceKind::King && from.abs_diff(to) == 2 {
        let own_rook = Piece::new(piece.color, PieceKind::Rook);
        let option = castle_options(piece.color)
            .iter()
            .find(|option| option.king_target == to)
            .filter(|option| {
                from == king_home(piece.color)
                    && board.castle_rights() & option.right != 0
                    && board.piece_at(option.rook_home) == Some(own_rook)
            })
            .ok_or_else(|| ChessError::InvalidUciMove(text.to_owned()))?;
        Move::castle(piece, from, to, option.rook_home)
    } else if piece.kind == PieceKind::Pawn
        && target.is_none()
        && from % 8 != to % 8
        && board.en_passant_square() == Some(to)
    {
        Move::en_passant(piece, from, to)
    } else {
        Move::new(piece, from, to, target)
    };

    let reaches_last_rank =
        piece.kind == PieceKind::Pawn && to / 8 == piece.color.last_rank();
    let promotion = match text.chars().nth(4) {
        Some(ch) => {
            if !reaches_last_rank {
                return Err(ChessError::InvalidUciMove(text.to_owned()));
            }
            Some(char_to_promotion(ch)?)
        }
        None if reaches_last_rank => {
            return Err(ChessError::InvalidUciMove(text.to_owned()));
        }
        None => None,
    };

    Ok((mv, promotion))
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Ok(PieceKind::Knight),
        'b' => Ok(PieceKind::Bishop),
        'r' => Ok(PieceKind::Rook),
        'q' => Ok(PieceKind::Queen),
        _ => Err(ChessError::InvalidPromotionChar(ch)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_captures_castles_and_en_passant() {
        let board = Board::from_fen("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1")
            .expect("fixture FEN should parse");

        let (ep, _) = parse_uci_move(&board, "e5d6").expect("en passant should resolve");
        assert!(ep.en_passant);
        assert_eq!(ep.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));

        let (castle, _) = parse_uci_move(&board, "e1c1").expect("castle should resolve");
        assert_eq!(castle.castling_rook_start, Some(0));
        assert_eq!(castle.castling_rook_end(), Some(3));

        let (capture, _) = parse_uci_move(&board, "a1a8").expect("capture should resolve");
        assert_eq!(capture.captured, Some(Piece::new(Color::Black, PieceKind::Rook)));
    }

    #[test]
    fn castles_need_rights_and_rook_at_home() {
        let bare = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("fixture FEN");
        assert_eq!(
            parse_uci_move(&bare, "e1c1"),
            Err(ChessError::InvalidUciMove("e1c1".to_owned()))
        );

        // right still set but the rook is gone
        let no_rook = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w Q - 0 1").expect("fixture FEN");
        assert!(matches!(
            parse_uci_move(&no_rook, "e1c1"),
            Err(ChessError::InvalidUciMove(_))
        ));

        let no_right = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w K - 0 1").expect("fixture FEN");
        assert!(matches!(
            parse_uci_move(&no_right, "e1c1"),
            Err(ChessError::InvalidUciMove(_))
        ));
        assert!(parse_uci_move(&no_right, "e1g1").is_ok());
    }

    #[test]
    fn promotion_letter_is_required_exactly_on_promotions() {
        let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("fixture FEN");
        let (mv, promotion) = parse_uci_move(&board, "a7a8n").expect("promotion should resolve");
        assert_eq!(promotion, Some(PieceKind::Knight));
        assert_eq!(move_to_long_algebraic(&mv, promotion), "a7a8n");

        assert_eq!(
            parse_uci_move(&board, "a7a8"),
            Err(ChessError::InvalidUciMove("a7a8".to_owned()))
        );
        assert_eq!(
            parse_uci_move(&board, "a7a8k"),
            Err(ChessError::InvalidPromotionChar('k'))
        );
        assert_eq!(
            parse_uci_move(&board, "e1e2q"),
            Err(ChessError::InvalidUciMove("e1e2q".to_owned()))
        );
    }

    #[test]
    fn rejects_empty_squares_and_wrong_side() {
        let board = Board::new_game();
        assert_eq!(
            parse_uci_move(&board, "e4e5"),
            Err(ChessError::NoPieceOnSquare("e4".to_owned()))
        );
        assert_eq!(
            parse_uci_move(&board, "e7e5"),
            Err(ChessError::NotSideToMove("e7".to_owned()))
        );
        assert!(matches!(
            parse_uci_move(&board, "e2"),
            Err(ChessError::InvalidUciMove(_))
        ));
    }
}
