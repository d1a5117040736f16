//! Depth-limited minimax with alpha-beta pruning.
//!
//! Every root move is searched with a full window and ranked best-first for
//! the side to move. Interior nodes prune on strict bound crossings, order
//! captures MVV-LVA and skip captures SEE judges losing; each toggle lives in
//! `SearchConfig`. The board is searched in place and left exactly as it was
//! handed in.

use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::board_calculator::{get_all_valid_moves, promotion_choices};
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{evaluate, MAX_SCORE};
use crate::search::move_ordering::order_moves;
use crate::search::static_exchange::is_losing_capture;
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below each root move.
    pub depth: u8,
    pub use_move_ordering: bool,
    pub use_see_pruning: bool,
    pub use_alpha_beta: bool,
    /// Visit pieces in square order so results do not depend on piece-map
    /// history.
    pub deterministic: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            use_move_ordering: true,
            use_see_pruning: true,
            use_alpha_beta: true,
            deterministic: cfg!(debug_assertions),
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_move_ordering(mut self, enabled: bool) -> Self {
        self.use_move_ordering = enabled;
        self
    }

    pub fn with_see_pruning(mut self, enabled: bool) -> Self {
        self.use_see_pruning = enabled;
        self
    }

    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.use_alpha_beta = enabled;
        self
    }

    pub fn with_deterministic(mut self, enabled: bool) -> Self {
        self.deterministic = enabled;
        self
    }
}

/// One root move with its score and the line that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedMove {
    pub evaluation: i32,
    pub mv: Move,
    pub promotion: Option<PieceKind>,
    pub line: String,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best first for the side that was to move.
    pub ranked: Vec<RankedMove>,
    pub states_evaluated: u64,
    pub elapsed: Duration,
}

impl SearchOutcome {
    pub fn best(&self) -> Option<&RankedMove> {
        self.ranked.first()
    }
}

#[derive(Debug, Default)]
pub struct ChessieBot {
    config: SearchConfig,
    states_evaluated: u64,
}

impl ChessieBot {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            states_evaluated: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Scores every legal move of the side to move and sorts them best
    /// first: descending for white, ascending for black.
    pub fn rank_potential_moves(&mut self, board: &mut Board) -> ChessResult<SearchOutcome> {
        let started = Instant::now();
        self.states_evaluated = 0;

        let side = board.side_to_move();
        let mut root_moves = self.candidate_moves(board)?;
        if root_moves.is_empty() {
            let unpruned = self.legal_moves(board)?;
            if !unpruned.is_empty() {
                warn!("every root move was pruned as a losing capture; ranking all {} moves", unpruned.len());
            }
            root_moves = unpruned;
        }

        let maximizing = side.opposite() == Color::White;
        let mut ranked = Vec::with_capacity(root_moves.len());

        for mv in root_moves {
            for &promotion in promotion_choices(&mv) {
                board.apply_move_quiet(mv, promotion)?;
                let result = self.search(board, self.config.depth, maximizing, -MAX_SCORE, MAX_SCORE);
                board.undo_move_quiet()?;
                let (evaluation, line) = result?;

                let line = join_line(&move_to_long_algebraic(&mv, promotion), &line);
                debug!("{line}: {evaluation}");
                ranked.push(RankedMove {
                    evaluation,
                    mv,
                    promotion,
                    line,
                });
            }
        }

        ranked.sort_by_key(|entry| -entry.evaluation * side.sign());

        let elapsed = started.elapsed();
        info!(
            "{} states evaluated for {} in {} ms",
            self.states_evaluated,
            side.name(),
            elapsed.as_millis()
        );

        Ok(SearchOutcome {
            ranked,
            states_evaluated: self.states_evaluated,
            elapsed,
        })
    }

    /// Minimax value of `board` searched `depth` plies deep, with the best
    /// line found below it as space-separated coordinate moves.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> ChessResult<(i32, String)> {
        if depth == 0 {
            return self.leaf(board);
        }

        let mut best: Option<(i32, String)> = None;

        'moves: for mv in self.candidate_moves(board)? {
            for &promotion in promotion_choices(&mv) {
                board.apply_move_quiet(mv, promotion)?;
                let result = self.search(board, depth - 1, !maximizing, alpha, beta);
                board.undo_move_quiet()?;
                let (score, line) = result?;

                let improves = match &best {
                    None => true,
                    Some((current, _)) if maximizing => score > *current,
                    Some((current, _)) => score < *current,
                };
                if improves {
                    best = Some((score, join_line(&move_to_long_algebraic(&mv, promotion), &line)));
                }

                if !self.config.use_alpha_beta {
                    continue;
                }
                let best_score = best.as_ref().map_or(score, |(value, _)| *value);
                if maximizing {
                    if best_score > beta {
                        break 'moves;
                    }
                    alpha = alpha.max(best_score);
                } else {
                    if best_score < alpha {
                        break 'moves;
                    }
                    beta = beta.min(best_score);
                }
            }
        }

        match best {
            Some(found) => Ok(found),
            None => self.leaf(board),
        }
    }

    fn leaf(&mut self, board: &mut Board) -> ChessResult<(i32, String)> {
        self.states_evaluated += 1;
        Ok((evaluate(board)?, String::new()))
    }

    fn legal_moves(&self, board: &mut Board) -> ChessResult<Vec<Move>> {
        let mut moves = get_all_valid_moves(board, self.config.deterministic)?;
        if self.config.use_move_ordering {
            order_moves(&mut moves);
        }
        Ok(moves)
    }

    /// Legal moves, ordered, minus captures SEE calls losing for the mover.
    fn candidate_moves(&self, board: &mut Board) -> ChessResult<Vec<Move>> {
        let mut moves = self.legal_moves(board)?;
        if self.config.use_see_pruning {
            moves.retain(|mv| !is_losing_capture(board, mv));
        }
        Ok(moves)
    }
}

fn join_line(head: &str, tail: &str) -> String {
    if tail.is_empty() {
        head.to_owned()
    } else {
        format!("{head} {tail}")
    }
}
