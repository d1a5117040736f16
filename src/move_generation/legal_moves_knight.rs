use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::board_calculator::push_targets;
use crate::moves::attack_tables::knight_attacks;
use crate::moves::chess_move::Move;

pub fn generate_knight_moves(board: &Board, knight: Piece, from: Square, out: &mut Vec<Move>) {
    let own_occ = board.piece_map(knight.color).occupancy();
    push_targets(board, knight, from, knight_attacks(from) & !own_occ, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_knight_skips_own_pieces() {
        let board = Board::new_game();
        let knight = Piece::new(Color::White, PieceKind::Knight);
        let mut out = Vec::new();
        generate_knight_moves(&board, knight, 1, &mut out);
        let mut ends: Vec<Square> = out.iter().map(|mv| mv.end).collect();
        ends.sort_unstable();
        assert_eq!(ends, vec![16, 18]);
    }
}
