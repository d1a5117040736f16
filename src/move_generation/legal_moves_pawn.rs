use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::board_calculator::push_targets;
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::chess_move::Move;

/// Pushes, double pushes from the start rank, diagonal captures and en
/// passant for the pawn on `from`. Promotion choice is left to the caller.
pub fn generate_pawn_moves(board: &Board, pawn: Piece, from: Square, out: &mut Vec<Move>) {
    let color = pawn.color;
    let occupancy = board.get_bitboards(color).all_pieces;
    let enemy_occ = board.piece_map(color.opposite()).occupancy();
    let coord = SquareCoord::from_index(from);
    let step = MoveVector::UP.scaled(color.pawn_direction());

    let single = coord + step;
    if single.is_valid() && occupancy & single.bitboard_mask() == 0 {
        out.push(Move::new(pawn, from, single.index(), None));

        let double = single + step;
        if coord.rank as u8 == color.pawn_start_rank() && occupancy & double.bitboard_mask() == 0 {
            out.push(Move::new(pawn, from, double.index(), None));
        }
    }

    let attacks = pawn_attacks(color, from);
    push_targets(board, pawn, from, attacks & enemy_occ, out);

    if let Some(ep_square) = board.en_passant_square() {
        if attacks & (1u64 << ep_square) != 0 && board.piece_at(ep_square).is_none() {
            out.push(Move::en_passant(pawn, from, ep_square));
        }
    }
}
