//! Series runner: adaptive engine against a fixed-strength partner

use std::thread;
use std::time::Duration;

use adaptive_engine::{EngineConfig, Preset, SearchParams, Searcher, Session};
use anyhow::{Context, Result};
use chess_core::Position;
use tracing::{debug, info};

use crate::report::{GameRecord, SparringReport};

/// Configuration for a sparring series
#[derive(Debug, Clone)]
pub struct SparringConfig {
    /// Number of games to play
    pub games: u32,
    /// Plies per game before it is abandoned as unfinished
    pub max_plies: u32,
    /// Strength of the side playing against the adaptive engine
    pub partner: Preset,
    /// Partner plays the session's hint instead of searching itself
    pub use_hints: bool,
    /// How long the foreground loop sleeps between polls
    pub poll_interval: Duration,
    /// Settings for the adaptive engine
    pub engine: EngineConfig,
    /// Print progress during the series
    pub verbose: bool,
}

impl Default for SparringConfig {
    fn default() -> Self {
        Self {
            games: 6,
            max_plies: 200,
            partner: Preset::Medium,
            use_hints: false,
            poll_interval: Duration::from_millis(2),
            engine: EngineConfig::default(),
            verbose: true,
        }
    }
}

/// Runs a series of games through one session, so the adaptive level
/// carries over from game to game.
pub struct SparringRunner {
    config: SparringConfig,
}

impl SparringRunner {
    pub fn new(config: SparringConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<SparringReport> {
        self.run_from(&Position::startpos())
    }

    /// Run the series with every game starting from `start`.
    pub fn run_from(&self, start: &Position) -> Result<SparringReport> {
        let mut session = Session::from_position(self.config.engine.clone(), start.clone())
            .context("failed to start session")?;
        let partner_seed = self.config.engine.seed.map(|s| s.wrapping_add(1));
        let mut partner = match partner_seed {
            Some(seed) => Searcher::seeded(seed),
            None => Searcher::from_entropy(),
        };
        let mut report = SparringReport::new(&self.config);

        for game in 0..self.config.games {
            if game > 0 {
                session.new_game_from(start.clone())?;
            }
            let record = self.play_game(&mut session, &mut partner, game + 1)?;

            if self.config.verbose {
                println!(
                    "Game {}/{}: {} in {} plies - level {} -> {} ({})",
                    game + 1,
                    self.config.games,
                    record.result_label(),
                    record.plies,
                    record.level_before,
                    record.level_after,
                    record.difficulty
                );
            }
            report.add_game(record);
        }

        Ok(report)
    }

    /// Play one game to the end (or the ply limit) through the session's
    /// non-blocking interface.
    fn play_game(
        &self,
        session: &mut Session,
        partner: &mut Searcher,
        number: u32,
    ) -> Result<GameRecord> {
        let level_before = session.controller().level();
        let partner_params = SearchParams::for_preset(self.config.partner);
        let mut engine_blunders = 0;

        while !session.is_over() && (session.history().len() as u32) < self.config.max_plies {
            if session.is_players_turn() {
                let mv = if self.config.use_hints {
                    self.await_hint(session)?
                } else {
                    partner.best_move(session.position(), partner_params).best_move
                };
                let Some(mv) = mv else {
                    break;
                };
                session
                    .play(mv)
                    .with_context(|| format!("partner move {mv} rejected"))?;
                continue;
            }

            match session.tick() {
                Some(reply) => {
                    if reply.blunder {
                        engine_blunders += 1;
                    }
                    debug!(game = number, san = %reply.san, blunder = reply.blunder, "engine replied");
                }
                None if session.awaits_engine_move() => thread::sleep(self.config.poll_interval),
                // Nothing submitted and still the engine's turn: the search
                // produced no move.
                None => break,
            }
        }

        let analysis = session.analysis();
        let record = GameRecord {
            game: number,
            outcome: session.outcome(),
            plies: session.history().len() as u32,
            level_before,
            level_after: session.controller().level(),
            difficulty: session.difficulty_label(),
            engine_blunders,
            player_mistakes: analysis.mistakes as u32,
            player_blunders: analysis.blunders as u32,
        };
        info!(
            game = number,
            outcome = record.result_label(),
            plies = record.plies,
            level = record.level_after,
            "game finished"
        );
        Ok(record)
    }

    fn await_hint(&self, session: &mut Session) -> Result<Option<chess_core::Move>> {
        session.request_hint().context("hint request refused")?;
        Ok(self.collect_hint(session))
    }

    /// Poll the outstanding hint until it settles. None when it produced no
    /// move or was cancelled.
    fn collect_hint(&self, session: &mut Session) -> Option<chess_core::Move> {
        loop {
            if let Some(result) = session.poll_hint() {
                return result.best_move;
            }
            if !session.awaits_hint() {
                return None;
            }
            thread::sleep(self.config.poll_interval);
        }
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
