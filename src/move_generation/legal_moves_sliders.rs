use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::board_calculator::push_targets;
use crate::moves::attack_tables::{bishop_attacks, queen_attacks, rook_attacks};
use crate::moves::chess_move::Move;

/// Ray moves for a bishop, rook or queen. Each ray stops on the first
/// occupied square, which is kept only when it holds an enemy piece.
pub fn generate_slider_moves(board: &Board, slider: Piece, from: Square, out: &mut Vec<Move>) {
    let occupancy = board.get_bitboards(slider.color).all_pieces;
    let own_occ = board.piece_map(slider.color).occupancy();

    let attacks = match slider.kind {
        PieceKind::Bishop => bishop_attacks(from, occupancy),
        PieceKind::Rook => rook_attacks(from, occupancy),
        PieceKind::Queen => queen_attacks(from, occupancy),
        _ => 0,
    };

    push_targets(board, slider, from, attacks & !own_occ, out);
}
