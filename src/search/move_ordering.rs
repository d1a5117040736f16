//! MVV-LVA ordering applied before alpha-beta recursion.

use std::cmp::Reverse;

use crate::moves::chess_move::Move;

/// Sort key: most valuable victim first, then least valuable attacker.
/// Quiet moves share one key so the stable sort leaves them in place
/// relative to each other.
#[inline]
pub fn ordering_key(mv: &Move) -> (Reverse<i32>, i32) {
    let victim = mv.captured_value();
    let attacker = if victim > 0 { mv.piece.unsigned_value() } else { 0 };
    (Reverse(victim), attacker)
}

/// Orders `moves` in place. Keys are computed once per move per call.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_cached_key(ordering_key);
}
