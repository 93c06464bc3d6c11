//! Sparring results storage and reporting

use std::path::Path;

use adaptive_engine::GameOutcome;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::match_runner::SparringConfig;

/// One finished (or abandoned) game of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: u32,
    /// None when the ply limit was hit
    pub outcome: Option<GameOutcome>,
    pub plies: u32,
    pub level_before: u8,
    pub level_after: u8,
    pub difficulty: String,
    pub engine_blunders: u32,
    pub player_mistakes: u32,
    pub player_blunders: u32,
}

impl GameRecord {
    pub fn result_label(&self) -> &'static str {
        match self.outcome {
            Some(GameOutcome::EngineWon) => "engine won",
            Some(GameOutcome::PlayerWon) => "partner won",
            Some(GameOutcome::Draw) => "draw",
            None => "unfinished",
        }
    }
}

/// Complete series results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparringReport {
    pub partner: String,
    pub initial_level: u8,
    pub games: Vec<GameRecord>,
}

impl SparringReport {
    pub fn new(config: &SparringConfig) -> Self {
        Self {
            partner: config.partner.name().to_string(),
            initial_level: config.engine.initial_level,
            games: Vec::new(),
        }
    }

    pub fn add_game(&mut self, record: GameRecord) {
        self.games.push(record);
    }

    /// (engine wins, partner wins, draws or unfinished)
    pub fn tally(&self) -> (u32, u32, u32) {
        self.games
            .iter()
            .fold((0, 0, 0), |(e, p, d), g| match g.outcome {
                Some(GameOutcome::EngineWon) => (e + 1, p, d),
                Some(GameOutcome::PlayerWon) => (e, p + 1, d),
                _ => (e, p, d + 1),
            })
    }

    pub fn final_level(&self) -> u8 {
        self.games
            .last()
            .map_or(self.initial_level, |g| g.level_after)
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents).context("failed to parse report")
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Sparring vs {} ===\n\n", self.partner));
        report.push_str(&format!(
            "{:<6} {:<12} {:>6} {:>7} {:>9} {:>9}\n",
            "Game", "Result", "Plies", "Level", "Blunders", "Mistakes"
        ));
        report.push_str(&"-".repeat(54));
        report.push('\n');

        for g in &self.games {
            report.push_str(&format!(
                "{:<6} {:<12} {:>6} {:>3}->{:<3} {:>9} {:>9}\n",
                g.game,
                g.result_label(),
                g.plies,
                g.level_before,
                g.level_after,
                g.engine_blunders,
                g.player_mistakes
            ));
        }

        let (engine, partner, other) = self.tally();
        report.push_str(&format!(
            "\nEngine {engine} - Partner {partner} - Other {other}; level {} -> {}\n",
            self.initial_level,
            self.final_level()
        ));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
