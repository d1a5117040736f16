//! Legal move generation and check detection.
//!
//! Per-piece generators produce pseudo-legal moves. Each candidate is then
//! applied quietly, tested for leaving the mover's king attacked and undone.
//! Every apply on these paths is paired with exactly one undo before
//! returning.

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::piece_map::LocatedPiece;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::generate_slider_moves;
use crate::moves::chess_move::Move;

/// Turns every set bit of `targets` into a move, recording whatever piece
/// stands on the destination as the capture.
pub fn push_targets(board: &Board, piece: Piece, from: Square, mut targets: u64, out: &mut Vec<Move>) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        out.push(Move::new(piece, from, to, board.piece_at(to)));
        targets &= targets - 1;
    }
}

/// Pseudo-legal moves for one piece. Moves may leave the own king in check.
pub fn get_potential_moves_for_piece(board: &Board, located: LocatedPiece) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    let LocatedPiece { piece, square } = located;

    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, piece, square, &mut out),
        PieceKind::Knight => generate_knight_moves(board, piece, square, &mut out),
        PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
            generate_slider_moves(board, piece, square, &mut out)
        }
        PieceKind::King => generate_king_moves(board, piece, square, &mut out),
    }

    out
}

/// Legal moves for one piece.
pub fn get_valid_moves_for_piece(board: &mut Board, located: LocatedPiece) -> ChessResult<Vec<Move>> {
    let candidates = get_potential_moves_for_piece(board, located);
    let mut legal = Vec::with_capacity(candidates.len());

    // Squares the opponent reaches once the king steps away; a king can
    // never end its move on one of them.
    let king_threats = if located.piece.kind == PieceKind::King {
        board.get_bitboards(located.piece.color).king_threats
    } else {
        0
    };

    for mv in candidates {
        if !mv.is_castle() && king_threats & (1u64 << mv.end) != 0 {
            continue;
        }
        if !does_move_cause_check(board, mv)? {
            legal.push(mv);
        }
    }

    Ok(legal)
}

/// Legal moves for `color`. With `deterministic` set, pieces are visited in
/// square order instead of piece-map storage order.
pub fn get_all_valid_moves_for(board: &mut Board, color: Color, deterministic: bool) -> ChessResult<Vec<Move>> {
    let pieces = board.piece_map(color).all_pieces(deterministic);
    let mut legal = Vec::with_capacity(64);

    for located in pieces {
        legal.extend(get_valid_moves_for_piece(board, located)?);
    }

    Ok(legal)
}

/// Legal moves for the side to move.
pub fn get_all_valid_moves(board: &mut Board, deterministic: bool) -> ChessResult<Vec<Move>> {
    let color = board.side_to_move();
    get_all_valid_moves_for(board, color, deterministic)
}

/// Whether `color` has at least one legal move. Stops at the first one.
pub fn has_any_legal_move(board: &mut Board, color: Color) -> ChessResult<bool> {
    for located in board.piece_map(color).all_pieces(false) {
        for mv in get_potential_moves_for_piece(board, located) {
            if !does_move_cause_check(board, mv)? {
                return Ok(true);
            }
        }
    }

    Ok(false)
}

/// Applies `mv`, reports whether its mover is left in check, and undoes it.
pub fn does_move_cause_check(board: &mut Board, mv: Move) -> ChessResult<bool> {
    board.apply_move_quiet(mv, None)?;
    let in_check = is_check(board, mv.piece.color);
    board.undo_move_quiet()?;
    Ok(in_check)
}

/// True iff `color`'s king stands on a square the opponent attacks.
pub fn is_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => board.get_bitboards(color).threats & (1u64 << king) != 0,
        None => false,
    }
}

/// True iff `color` has no legal move. Checkmate and stalemate are not told
/// apart here; pair with `is_check` for that.
pub fn is_mate(board: &mut Board, color: Color) -> ChessResult<bool> {
    Ok(!has_any_legal_move(board, color)?)
}

const PROMOTION_CHOICES: [Option<PieceKind>; 4] = [
    Some(PROMOTION_KINDS[0]),
    Some(PROMOTION_KINDS[1]),
    Some(PROMOTION_KINDS[2]),
    Some(PROMOTION_KINDS[3]),
];

/// Promotion pieces to try for `mv`: all four for a promoting pawn move,
/// otherwise just `None`.
pub fn promotion_choices(mv: &Move) -> &'static [Option<PieceKind>] {
    if is_promotion(mv.piece, mv.end) {
        &PROMOTION_CHOICES
    } else {
        &[None]
    }
}

/// True iff a pawn moving to `destination` reaches its last rank.
pub fn is_promotion(piece: Piece, destination: Square) -> bool {
    piece.kind == PieceKind::Pawn && destination / 8 == piece.color.last_rank()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    const CHECK_FIXTURES: [&str; 8] = [
        STARTING_POSITION_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        "4k3/8/8/8/8/8/3n4/4K3 w - - 0 1",
        "4k3/8/8/8/1b6/8/3P4/4K3 w - - 0 1",
        "4k3/8/8/8/8/8/5p2/4K3 w - - 0 1",
        "4k3/4r3/8/8/8/8/8/4K3 w - - 0 1",
    ];

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).expect("fixture FEN should parse")
    }

    fn brute_force_check(board: &Board, color: Color) -> bool {
        let Some(king) = board.king_square(color) else {
            return false;
        };
        board
            .piece_map(color.opposite())
            .all_pieces(false)
            .into_iter()
            .flat_map(|located| get_potential_moves_for_piece(board, located))
            .any(|mv| mv.end == king)
    }

    #[test]
    fn is_check_agrees_with_brute_force() {
        for fen in CHECK_FIXTURES {
            let subject = board(fen);
            for color in [Color::White, Color::Black] {
                assert_eq!(
                    is_check(&subject, color),
                    brute_force_check(&subject, color),
                    "{fen} for {color:?}"
                );
            }
        }
    }

    #[test]
    fn generated_moves_never_leave_king_in_check() {
        for fen in CHECK_FIXTURES {
            let mut subject = board(fen);
            let reference = board(fen);
            let color = subject.side_to_move();
            for mv in get_all_valid_moves(&mut subject, true).expect("generation") {
                subject.apply_move_quiet(mv, None).expect("apply");
                assert!(!is_check(&subject, color), "{mv} leaves king in check in {fen}");
                subject.undo_move_quiet().expect("undo");
            }
            assert_eq!(subject, reference);
        }
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let mut subject = Board::new_game();
        assert_eq!(get_all_valid_moves(&mut subject, false).expect("generation").len(), 20);
    }

    #[test]
    fn checkmate_and_stalemate_have_no_moves() {
        // fool's mate
        let mut mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(is_check(&mated, Color::White));
        assert!(is_mate(&mut mated, Color::White).expect("mate test"));
        assert!(get_all_valid_moves(&mut mated, false).expect("generation").is_empty());

        let mut stalemated = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!is_check(&stalemated, Color::Black));
        assert!(is_mate(&mut stalemated, Color::Black).expect("mate test"));

        let mut open = Board::new_game();
        assert!(!is_mate(&mut open, Color::White).expect("mate test"));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_line() {
        // white bishop d2 pinned by the b4 bishop
        let mut subject = board("4k3/8/8/8/1b6/8/3B4/4K3 w - - 0 1");
        let bishop = LocatedPiece {
            piece: Piece::new(Color::White, PieceKind::Bishop),
            square: 11,
        };
        let moves = get_valid_moves_for_piece(&mut subject, bishop).expect("generation");
        let mut ends: Vec<Square> = moves.iter().map(|mv| mv.end).collect();
        ends.sort_unstable();
        // c3 and the capture on b4
        assert_eq!(ends, vec![18, 25]);
    }

    #[test]
    fn king_cannot_retreat_along_checking_ray() {
        // rook e7 checks e1; e2 is still on the ray
        let mut subject = board("4k3/4r3/8/8/8/8/8/4K3 w - - 0 1");
        let king = LocatedPiece {
            piece: Piece::new(Color::White, PieceKind::King),
            square: 4,
        };
        let ends: Vec<Square> = get_valid_moves_for_piece(&mut subject, king)
            .expect("generation")
            .iter()
            .map(|mv| mv.end)
            .collect();
        assert!(!ends.contains(&12));
        assert_eq!(ends.len(), 4);
    }

    #[test]
    fn promotion_squares() {
        let white_pawn = Piece::new(Color::White, PieceKind::Pawn);
        let black_pawn = Piece::new(Color::Black, PieceKind::Pawn);
        assert!(is_promotion(white_pawn, 60));
        assert!(!is_promotion(white_pawn, 52));
        assert!(is_promotion(black_pawn, 3));
        assert!(!is_promotion(Piece::new(Color::White, PieceKind::Rook), 60));

        let promoting = Move::new(white_pawn, 52, 60, None);
        assert_eq!(promotion_choices(&promoting).len(), 4);
        assert_eq!(promotion_choices(&promoting)[0], Some(PieceKind::Queen));
        assert_eq!(promotion_choices(&Move::new(white_pawn, 12, 20, None)), &[None]);
    }
}
