//! Minimax search with alpha-beta pruning, capture-first move ordering and
//! random blunder injection at the root.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chess_core::{legal_moves_into, Color, Move, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::difficulty::SearchParams;
use crate::eval::evaluate;

const INF: i32 = 1_000_000;

/// Outcome of one root search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// None only when the side to move has no legal move
    pub best_move: Option<Move>,
    /// The move was picked at random instead of searched
    pub blunder: bool,
    /// White-positive minimax value of `best_move`; None for blunders and
    /// positions without moves
    pub score: Option<i32>,
    pub depth: u8,
    pub nodes: u64,
}

impl SearchResult {
    /// A result carrying no move, used for terminal positions and failed
    /// background searches.
    pub fn no_move(depth: u8) -> Self {
        Self {
            best_move: None,
            blunder: false,
            score: None,
            depth,
            nodes: 0,
        }
    }
}

/// Root search driver. Owns the random source used for blunders, so two
/// searchers built from the same seed make the same choices.
pub struct Searcher {
    rng: StdRng,
    nodes: u64,
    stopper: Option<Arc<AtomicBool>>,
}

impl Searcher {
    pub fn new(rng: StdRng) -> Self {
        Self {
            rng,
            nodes: 0,
            stopper: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Abandon the search between root moves once `stopper` is set. The
    /// result of a stopped search is incomplete and meant to be discarded.
    pub fn with_stopper(mut self, stopper: Arc<AtomicBool>) -> Self {
        self.stopper = Some(stopper);
        self
    }

    fn stopped(&self) -> bool {
        self.stopper
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Pick a move for the side to move in `pos`.
    ///
    /// With probability `params.blunder_chance` a uniformly random legal move
    /// is returned without searching. Otherwise every root move is scored by
    /// minimax to `params.depth - 1` further plies; White keeps the highest
    /// score, Black the lowest, and on ties the earliest move in
    /// capture-first order wins.
    pub fn best_move(&mut self, pos: &Position, params: SearchParams) -> SearchResult {
        let depth = params.depth.max(1);
        let mut tmp = pos.clone();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut tmp, &mut moves);

        if moves.is_empty() {
            return SearchResult::no_move(depth);
        }

        if params.blunder_chance > 0.0 && self.rng.gen::<f64>() < params.blunder_chance {
            if let Some(&mv) = moves.choose(&mut self.rng) {
                debug!(%mv, chance = params.blunder_chance, "blunder injected");
                return SearchResult {
                    best_move: Some(mv),
                    blunder: true,
                    score: None,
                    depth,
                    nodes: 0,
                };
            }
        }

        order_captures_first(&tmp, &mut moves);
        self.nodes = 0;

        let maximizing = tmp.side_to_move == Color::White;
        let mut alpha = -INF;
        let mut beta = INF;
        let mut best = moves[0];
        let mut best_score = if maximizing { -INF } else { INF };

        for mv in moves {
            if self.stopped() {
                debug!(nodes = self.nodes, "search stopped");
                break;
            }
            let undo = tmp.make_move(mv);
            self.nodes += 1;
            let score = minimax(
                &mut tmp,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                &mut self.nodes,
            );
            tmp.unmake_move(mv, undo);

            // Strict comparison: a later move must beat the incumbent.
            if maximizing {
                if score > best_score {
                    best_score = score;
                    best = mv;
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best = mv;
                }
                beta = beta.min(best_score);
            }
        }

        debug!(%best, score = best_score, depth, nodes = self.nodes, "search finished");
        SearchResult {
            best_move: Some(best),
            blunder: false,
            score: Some(best_score),
            depth,
            nodes: self.nodes,
        }
    }
}

/// Minimax value of `pos` to `depth` plies, White maximizing.
///
/// Children are visited captures first and the loop stops as soon as
/// `beta <= alpha`. The position is restored before returning.
pub fn minimax(
    pos: &mut Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 || pos.is_insufficient_material() {
        return evaluate(pos);
    }

    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    if moves.is_empty() {
        return evaluate(pos);
    }
    order_captures_first(pos, &mut moves);

    let mut best = if maximizing { -INF } else { INF };
    for mv in moves {
        let undo = pos.make_move(mv);
        *nodes += 1;
        let score = minimax(pos, depth - 1, alpha, beta, !maximizing, nodes);
        pos.unmake_move(mv, undo);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }
    best
}

/// Stable partition: captures (en passant included) ahead of quiet moves,
/// each group keeping generation order.
pub fn order_captures_first(pos: &Position, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| !pos.is_capture(mv));
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
