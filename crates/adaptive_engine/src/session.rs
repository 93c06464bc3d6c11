//! One game against the adaptive engine, driven by a foreground loop.
//!
//! The session owns the live position, the move history, the difficulty
//! controller and the coordinator. Player input goes through [`Session::play`];
//! the loop calls [`Session::tick`] every frame to pick up the engine's reply
//! once its background search has finished.

use chess_core::{
    game_status, legal_moves, move_to_san, move_to_uci, parse_uci_move, Color, GameStatus, Move,
    Position,
};
use tracing::{debug, info, warn};

use crate::analysis::{analyze, GameAnalysis, PlyRecord};
use crate::config::EngineConfig;
use crate::coordinator::{ComputationHandle, ComputationKind, ComputationState, Coordinator};
use crate::difficulty::{DifficultyController, GameOutcome, Preset};
use crate::error::{EngineError, Result};
use crate::explain::{ExplanationRequest, MoveExplainer};
use crate::search::SearchResult;

/// The engine's answer to a player move.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineReply {
    pub mv: Move,
    pub san: String,
    pub blunder: bool,
    pub score: Option<i32>,
    pub request: ExplanationRequest,
    /// Commentary from the installed explainer, if any
    pub explanation: Option<String>,
}

pub struct Session {
    config: EngineConfig,
    position: Position,
    history: Vec<PlyRecord>,
    controller: DifficultyController,
    coordinator: Coordinator,
    pending: Option<ComputationHandle>,
    hint: Option<ComputationHandle>,
    outcome: Option<GameOutcome>,
    explainer: Option<Box<dyn MoveExplainer>>,
}

impl Session {
    /// Start a game from the initial position. If the engine has White its
    /// first move is submitted straight away.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::from_position(config, Position::startpos())
    }

    /// Start from a set-up position. Whoever is to move in `position` moves
    /// first.
    pub fn from_position(config: EngineConfig, position: Position) -> Result<Self> {
        let controller = DifficultyController::from_config(&config)?;
        let coordinator = Coordinator::new(config.seed);
        let mut session = Self {
            config,
            position,
            history: Vec::new(),
            controller,
            coordinator,
            pending: None,
            hint: None,
            outcome: None,
            explainer: None,
        };
        session.start_engine_turn_if_due()?;
        Ok(session)
    }

    pub fn with_explainer(mut self, explainer: impl MoveExplainer + 'static) -> Self {
        self.explainer = Some(Box::new(explainer));
        self
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &[PlyRecord] {
        &self.history
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn controller(&self) -> &DifficultyController {
        &self.controller
    }

    pub fn engine_color(&self) -> Color {
        self.config.engine_color
    }

    pub fn player_color(&self) -> Color {
        self.config.player_color()
    }

    pub fn is_players_turn(&self) -> bool {
        self.outcome.is_none() && self.position.side_to_move == self.player_color()
    }

    /// Whether the engine is still computing its move.
    pub fn is_thinking(&mut self) -> bool {
        self.coordinator.is_pending(ComputationKind::EngineMove)
    }

    /// An engine move has been submitted and not yet picked up by
    /// [`Session::tick`], finished or not.
    pub fn awaits_engine_move(&self) -> bool {
        self.pending.is_some()
    }

    /// Play a player move. Flags on `mv` are ignored; it is matched against
    /// the legal moves by squares and promotion piece.
    pub fn play(&mut self, mv: Move) -> Result<()> {
        if self.outcome.is_some() {
            return Err(EngineError::GameOver);
        }
        if self.is_thinking() {
            return Err(EngineError::ComputationPending("engine-move"));
        }
        if self.position.side_to_move != self.player_color() {
            return Err(EngineError::NotPlayersTurn);
        }
        let legal = legal_moves(&self.position)
            .into_iter()
            .find(|m| m.from == mv.from && m.to == mv.to && m.promo == mv.promo)
            .ok_or_else(|| EngineError::IllegalMove(move_to_uci(mv)))?;

        self.cancel_hint();
        self.push_move(legal, false, false);
        self.after_move()
    }

    /// [`Session::play`] for a move in long algebraic notation ("e2e4").
    pub fn play_uci(&mut self, text: &str) -> Result<()> {
        let mv = parse_uci_move(&self.position, text)
            .ok_or_else(|| EngineError::IllegalMove(text.to_string()))?;
        self.play(mv)
    }

    /// Pick up the engine's move if its search has finished. Never blocks.
    pub fn tick(&mut self) -> Option<EngineReply> {
        let handle = self.pending?;
        let state = self.coordinator.poll(&handle);
        self.settle(state)
    }

    /// Like [`Session::tick`] but blocks until the pending search settles.
    pub fn wait_for_engine(&mut self) -> Option<EngineReply> {
        let handle = self.pending?;
        let state = self.coordinator.wait(&handle);
        self.settle(state)
    }

    fn settle(&mut self, state: ComputationState) -> Option<EngineReply> {
        let result = match state {
            ComputationState::Pending => return None,
            ComputationState::Cancelled => {
                self.pending = None;
                return None;
            }
            ComputationState::Done(result) => result,
        };
        self.pending = None;

        let Some(mv) = result.best_move else {
            warn!("engine search returned no move");
            return None;
        };
        if !legal_moves(&self.position).contains(&mv) {
            warn!(%mv, "engine move no longer legal; searching again");
            if let Err(err) = self.start_engine_turn_if_due() {
                warn!(%err, "could not restart engine search");
            }
            return None;
        }

        let request = ExplanationRequest {
            mv,
            before: self.position.clone(),
            level: self.controller.level(),
            blunder: result.blunder,
        };
        let explanation = self
            .explainer
            .as_mut()
            .map(|explainer| explainer.explain(&request));
        let san = self.push_move(mv, true, result.blunder);
        debug!(%san, blunder = result.blunder, nodes = result.nodes, "engine moved");

        if let Err(err) = self.after_move() {
            warn!(%err, "could not continue after engine move");
        }

        Some(EngineReply {
            mv,
            san,
            blunder: result.blunder,
            score: result.score,
            request,
            explanation,
        })
    }

    /// Ask for a suggested move for the player. Runs the same search the
    /// engine would use for its own move.
    pub fn request_hint(&mut self) -> Result<ComputationHandle> {
        if self.outcome.is_some() {
            return Err(EngineError::GameOver);
        }
        if !self.is_players_turn() {
            return Err(EngineError::NotPlayersTurn);
        }
        let handle = self
            .coordinator
            .submit_hint(&self.position, self.controller.params())?;
        self.hint = Some(handle);
        Ok(handle)
    }

    /// A hint has been requested and neither picked up nor cancelled.
    pub fn awaits_hint(&self) -> bool {
        self.hint.is_some()
    }

    /// The hint, once its search has finished.
    pub fn poll_hint(&mut self) -> Option<SearchResult> {
        let handle = self.hint?;
        match self.coordinator.poll(&handle) {
            ComputationState::Pending => None,
            ComputationState::Cancelled => {
                self.hint = None;
                None
            }
            ComputationState::Done(result) => {
                self.hint = None;
                Some(result)
            }
        }
    }

    fn cancel_hint(&mut self) {
        if let Some(handle) = self.hint.take() {
            self.coordinator.cancel(&handle);
        }
    }

    /// Take back the last player move and any engine reply after it.
    /// Refused while the engine is thinking.
    pub fn undo(&mut self) -> Result<()> {
        if self.is_thinking() {
            return Err(EngineError::ComputationPending("engine-move"));
        }
        if !self.history.iter().any(|record| !record.by_engine) {
            return Err(EngineError::NothingToUndo);
        }
        self.cancel_hint();
        self.pending = None;

        while let Some(record) = self.history.pop() {
            self.position = record.before;
            if !record.by_engine {
                break;
            }
        }
        self.outcome = None;
        debug!(plies = self.history.len(), "moves taken back");
        Ok(())
    }

    /// Start over with a fresh controller. The locked preset survives only
    /// when `keep_preset` is set.
    pub fn restart(&mut self, keep_preset: bool) -> Result<()> {
        let preset = self.controller.preset();
        let mut controller = DifficultyController::new(self.config.initial_level);
        if keep_preset {
            if let Some(preset) = preset {
                controller.set_preset(preset.number())?;
            }
        }
        self.controller = controller;
        info!(label = %self.controller.difficulty_label(), "session restarted");
        self.new_game()
    }

    /// Next game of a series: fresh board, same controller.
    pub fn new_game(&mut self) -> Result<()> {
        self.new_game_from(Position::startpos())
    }

    /// Next game of a series, from a set-up position.
    pub fn new_game_from(&mut self, position: Position) -> Result<()> {
        self.coordinator.cancel_kind(ComputationKind::EngineMove);
        self.cancel_hint();
        self.pending = None;
        self.position = position;
        self.history.clear();
        self.outcome = None;
        self.start_engine_turn_if_due()
    }

    pub fn set_preset(&mut self, n: u8) -> Result<Preset> {
        self.controller.set_preset(n)
    }

    pub fn clear_preset(&mut self) {
        self.controller.clear_preset();
    }

    pub fn difficulty_label(&self) -> String {
        self.controller.difficulty_label()
    }

    pub fn analysis(&self) -> GameAnalysis {
        analyze(&self.history, self.outcome)
    }

    fn push_move(&mut self, mv: Move, by_engine: bool, blunder: bool) -> String {
        let san = move_to_san(&self.position, mv);
        self.history.push(PlyRecord {
            before: self.position.clone(),
            mv,
            san: san.clone(),
            by_engine,
            blunder,
        });
        self.position.make_move(mv);
        san
    }

    fn after_move(&mut self) -> Result<()> {
        let outcome = match game_status(&self.position) {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate { winner } if winner == self.engine_color() => {
                Some(GameOutcome::EngineWon)
            }
            GameStatus::Checkmate { .. } => Some(GameOutcome::PlayerWon),
            GameStatus::Stalemate | GameStatus::InsufficientMaterial => Some(GameOutcome::Draw),
        };

        if let Some(outcome) = outcome {
            self.outcome = Some(outcome);
            info!(?outcome, plies = self.history.len(), "game over");
            self.controller.record(outcome);
            return Ok(());
        }
        self.start_engine_turn_if_due()
    }

    fn start_engine_turn_if_due(&mut self) -> Result<()> {
        if self.outcome.is_some() || self.position.side_to_move != self.engine_color() {
            return Ok(());
        }
        let handle = self
            .coordinator
            .submit(&self.position, self.controller.params())?;
        self.pending = Some(handle);
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
