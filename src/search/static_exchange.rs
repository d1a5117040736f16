//! Static exchange evaluation.
//!
//! Plays out the recapture sequence on a single square with each side always
//! using its cheapest remaining attacker, without touching the board. The
//! result is white-positive like every other score in the crate.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::piece_map::LocatedPiece;
use crate::moves::chess_move::Move;

/// Net material swing of the capture `mv` once both sides have recaptured
/// greedily on its destination. Quiet moves score zero.
///
/// A side out of attackers ends the exchange; there is no option to stop
/// early while attackers remain.
pub fn static_exchange(board: &Board, mv: &Move) -> i32 {
    let Some(captured) = mv.captured else {
        return 0;
    };

    let mut cleared = 1u64 << mv.start;
    if let Some(victim_square) = mv.en_passant_victim_square() {
        cleared |= 1u64 << victim_square;
    }
    let attackers = gather_attackers(board, mv.end, cleared);

    let mut net = -captured.signed_value();
    let mut occupant = mv.piece;
    let mut side = mv.piece.color.opposite();
    let mut next = [0usize; 2];

    while let Some(attacker) = attackers[side.index()].get(next[side.index()]) {
        next[side.index()] += 1;
        net -= occupant.signed_value();
        occupant = attacker.piece;
        side = side.opposite();
    }

    net
}

/// True when SEE says the capture loses material for the side playing it.
pub fn is_losing_capture(board: &Board, mv: &Move) -> bool {
    if !mv.is_capture() {
        return false;
    }
    let see = static_exchange(board, mv).signum();
    see != 0 && see != mv.piece.color.sign()
}

/// Attackers of `target` per color, cheapest first. Squares in `cleared`
/// are treated as empty and their pieces excluded. An attacker found on a
/// line is lifted off the board so pieces lined up behind it join in.
fn gather_attackers(board: &Board, target: Square, cleared: u64) -> [Vec<LocatedPiece>; 2] {
    let mut occupancy = board.get_bitboards(Color::White).all_pieces & !cleared;
    let mut seen = cleared;
    let mut found: [Vec<LocatedPiece>; 2] = [Vec::new(), Vec::new()];

    loop {
        let mut added = false;
        for color in [Color::White, Color::Black] {
            for attacker in board.piece_map(color).attackers(target, occupancy) {
                let bit = 1u64 << attacker.square;
                if seen & bit != 0 {
                    continue;
                }
                seen |= bit;
                occupancy &= !bit;
                found[color.index()].push(attacker);
                added = true;
            }
        }
        if !added {
            break;
        }
    }

    for list in &mut found {
        list.sort_by_key(|attacker| attacker.piece.unsigned_value());
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::parse_uci_move;

    fn see(fen: &str, text: &str) -> i32 {
        let board = Board::from_fen(fen).expect("fixture FEN should parse");
        let (mv, _) = parse_uci_move(&board, text).expect("move should resolve");
        static_exchange(&board, &mv)
    }

    #[test]
    fn pawn_takes_pawn_defended_once_backed_once() {
        assert_eq!(see("k7/8/3p4/4p3/3P1P2/8/8/K7 w - - 0 1", "d4e5"), 100);
    }

    #[test]
    fn symmetric_pawn_trade_is_even() {
        assert_eq!(see("k7/8/3p1p2/4p3/3P1P2/8/8/K7 w - - 0 1", "d4e5"), 0);
        assert_eq!(see("k7/8/3p1p2/4p3/3P4/8/8/K7 w - - 0 1", "d4e5"), 0);
    }

    #[test]
    fn black_capture_is_negative_when_good_for_black() {
        assert_eq!(see("k7/8/3p1p2/4P3/3P4/8/8/K7 b - - 0 1", "d6e5"), -100);
    }

    #[test]
    fn knight_lost_to_pawn_recapture() {
        assert_eq!(see("k7/8/3p4/4p3/8/3N4/8/K7 w - - 0 1", "d3e5"), -200);
    }

    #[test]
    fn queen_takes_defended_rook() {
        assert_eq!(see("k7/8/4r3/4r3/3Q4/8/8/K7 w - - 0 1", "d4e5"), -400);
        assert_eq!(see("k7/8/4r3/4r3/3Q1P2/8/8/K7 w - - 0 1", "d4e5"), 100);
    }

    #[test]
    fn battery_behind_attacker_joins_the_exchange() {
        // white rooks e1 and e2 against one black rook on e7 defending e5
        let fen = "k7/4r3/8/4p3/8/8/4R3/K3R3 w - - 0 1";
        assert_eq!(see(fen, "e2e5"), 100);

        let board = Board::from_fen(fen).expect("fixture FEN should parse");
        let (mv, _) = parse_uci_move(&board, "e2e5").expect("move should resolve");
        assert!(!is_losing_capture(&board, &mv));
    }

    #[test]
    fn quiet_moves_score_zero() {
        assert_eq!(see(crate::game_state::chess_rules::STARTING_POSITION_FEN, "e2e4"), 0);
    }

    #[test]
    fn losing_capture_detection_respects_side() {
        let board = Board::from_fen("k7/8/3p4/4p3/8/3N4/8/K7 w - - 0 1").expect("fixture FEN");
        let (mv, _) = parse_uci_move(&board, "d3e5").expect("move should resolve");
        assert!(is_losing_capture(&board, &mv));

        let board = Board::from_fen("k7/8/3p1p2/4P3/3P4/8/8/K7 b - - 0 1").expect("fixture FEN");
        let (mv, _) = parse_uci_move(&board, "d6e5").expect("move should resolve");
        assert!(!is_losing_capture(&board, &mv));
    }
}
