//! Hook for natural-language commentary on engine moves.
//!
//! The engine only describes what it played; turning that into prose is up
//! to whoever implements [`MoveExplainer`].

use chess_core::{move_to_san, Move, Position};

/// Everything an explainer needs to comment on one engine move.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplanationRequest {
    pub mv: Move,
    /// Position before the move was played
    pub before: Position,
    /// Adaptive level the move was computed at
    pub level: u8,
    /// The move was a deliberate random pick
    pub blunder: bool,
}

impl ExplanationRequest {
    pub fn san(&self) -> String {
        move_to_san(&self.before, self.mv)
    }
}

pub trait MoveExplainer: Send {
    fn explain(&mut self, request: &ExplanationRequest) -> String;
}

impl<F> MoveExplainer for F
where
    F: FnMut(&ExplanationRequest) -> String + Send,
{
    fn explain(&mut self, request: &ExplanationRequest) -> String {
        self(request)
    }
}
