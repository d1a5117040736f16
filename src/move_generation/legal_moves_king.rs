use crate::game_state::board::Board;
use crate::game_state::chess_rules::{castle_options, king_home};
use crate::game_state::chess_types::*;
use crate::move_generation::board_calculator::push_targets;
use crate::moves::attack_tables::king_attacks;
use crate::moves::chess_move::Move;

pub fn generate_king_moves(board: &Board, king: Piece, from: Square, out: &mut Vec<Move>) {
    let own_occ = board.piece_map(king.color).occupancy();
    push_targets(board, king, from, king_attacks(from) & !own_occ, out);

    generate_castling_moves(board, king, from, out);
}

/// Castling needs the right, the king and rook on their home squares, empty
/// clearance squares and no threat on any square the king stands on or
/// crosses.
fn generate_castling_moves(board: &Board, king: Piece, from: Square, out: &mut Vec<Move>) {
    let color = king.color;
    if from != king_home(color) || board.castle_rights() == 0 {
        return;
    }

    let bitboards = board.get_bitboards(color);
    let rook = Piece::new(color, PieceKind::Rook);

    for option in castle_options(color) {
        if board.castle_rights() & option.right == 0 {
            continue;
        }
        if board.piece_at(option.rook_home) != Some(rook) {
            continue;
        }
        if bitboards.all_pieces & option.clearance != 0 {
            continue;
        }
        if bitboards.threats & option.threat_mask != 0 {
            continue;
        }

        out.push(Move::castle(king, from, option.king_target, option.rook_home));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn castles(fen: &str, from: Square) -> Vec<Square> {
        let board = Board::from_fen(fen).expect("fixture FEN should parse");
        let king = board.piece_at(from).expect("king on square");
        let mut out = Vec::new();
        generate_king_moves(&board, king, from, &mut out);
        let mut ends: Vec<Square> = out
            .iter()
            .filter(|mv| mv.is_castle())
            .map(|mv| mv.end)
            .collect();
        ends.sort_unstable();
        ends
    }

    #[test]
    fn both_sides_available_when_clear() {
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 4), vec![2, 6]);
        assert_eq!(castles("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", 60), vec![58, 62]);
    }

    #[test]
    fn attacked_transit_square_blocks_castling() {
        // black rook on f8 covers f1
        assert_eq!(castles("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1", 4), vec![2]);
        // in check: no castling at all
        assert_eq!(
            castles("r3k2r/4r3/8/8/8/8/8/R3K2R w KQkq - 0 1", 4),
            Vec::<Square>::new()
        );
    }

    #[test]
    fn b_file_attack_does_not_stop_queenside_castling() {
        // b1 only needs to be empty, not safe
        assert_eq!(castles("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", 4), vec![2]);
    }

    #[test]
    fn missing_rook_or_right_prevents_castling() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/4K2R w Q - 0 1", 4), Vec::<Square>::new());
        assert_eq!(castles("4k3/8/8/8/8/8/8/R3K3 w K - 0 1", 4), Vec::<Square>::new());
    }
}
