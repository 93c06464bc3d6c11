//! Difficulty control: fixed presets and an adaptive 1-10 level driven by
//! game outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;
/// Search depth never exceeds this, whatever the level.
pub const MAX_DEPTH: u8 = 4;
/// Consecutive results on one side needed to move the adaptive level.
pub const STREAK_TO_ADJUST: u8 = 2;

/// A named, fixed (depth, blunder chance) pair that locks the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Easy,
    Medium,
    Hard,
    Grandmaster,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Easy,
        Preset::Medium,
        Preset::Hard,
        Preset::Grandmaster,
    ];

    /// Presets are numbered 1-4 from weakest to strongest.
    pub fn from_number(n: u8) -> Option<Preset> {
        match n {
            1 => Some(Preset::Easy),
            2 => Some(Preset::Medium),
            3 => Some(Preset::Hard),
            4 => Some(Preset::Grandmaster),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Preset::Easy => 1,
            Preset::Medium => 2,
            Preset::Hard => 3,
            Preset::Grandmaster => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Easy => "Easy",
            Preset::Medium => "Medium",
            Preset::Hard => "Hard",
            Preset::Grandmaster => "Grandmaster",
        }
    }

    pub fn depth(self) -> u8 {
        match self {
            Preset::Easy => 2,
            Preset::Medium => 3,
            Preset::Hard | Preset::Grandmaster => 4,
        }
    }

    pub fn blunder_chance(self) -> f64 {
        match self {
            Preset::Easy => 0.55,
            Preset::Medium => 0.20,
            Preset::Hard => 0.05,
            Preset::Grandmaster => 0.0,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a finished game ended, from the engine's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    PlayerWon,
    EngineWon,
    Draw,
}

/// What a search is asked to do: how deep to look and how often to
/// deliberately throw the move away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchParams {
    pub depth: u8,
    pub blunder_chance: f64,
    /// Adaptive level at the time the parameters were taken.
    pub level: u8,
}

impl SearchParams {
    /// Full-strength parameters at `depth`.
    pub fn exact(depth: u8) -> Self {
        Self {
            depth,
            blunder_chance: 0.0,
            level: MAX_LEVEL,
        }
    }

    pub fn for_preset(preset: Preset) -> Self {
        Self {
            depth: preset.depth(),
            blunder_chance: preset.blunder_chance(),
            level: MAX_LEVEL,
        }
    }
}

/// Read-only view of the controller's mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultySetting {
    Preset(Preset),
    Adaptive {
        level: u8,
        player_streak: u8,
        engine_streak: u8,
    },
}

/// Search depth for an adaptive level.
pub fn depth_for_level(level: u8) -> u8 {
    (level / 3).clamp(1, MAX_DEPTH)
}

/// Blunder probability for an adaptive level. Non-increasing in the level.
pub fn blunder_chance_for_level(level: u8) -> f64 {
    match level {
        9.. => 0.0,
        7..=8 => 0.05,
        5..=6 => 0.15,
        3..=4 => 0.30,
        _ => 0.50,
    }
}

/// Turns game outcomes into search strength.
///
/// In adaptive mode two consecutive player wins raise the level by one and
/// two consecutive engine wins drop it by one. A locked preset freezes the level
/// and the streaks until it is cleared.
#[derive(Clone, Debug)]
pub struct DifficultyController {
    level: u8,
    preset: Option<Preset>,
    player_streak: u8,
    engine_streak: u8,
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(EngineConfig::default().initial_level)
    }
}

impl DifficultyController {
    /// Adaptive controller at `level` (clamped to 1-10).
    pub fn new(level: u8) -> Self {
        Self {
            level: level.clamp(MIN_LEVEL, MAX_LEVEL),
            preset: None,
            player_streak: 0,
            engine_streak: 0,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut controller = Self::new(config.initial_level);
        if config.preset != 0 {
            controller.set_preset(config.preset)?;
        }
        Ok(controller)
    }

    /// Lock to preset `n` (1-4). The adaptive level is kept underneath and
    /// comes back when the preset is cleared.
    pub fn set_preset(&mut self, n: u8) -> Result<Preset> {
        let preset = Preset::from_number(n).ok_or(EngineError::InvalidPreset(n))?;
        self.preset = Some(preset);
        self.player_streak = 0;
        self.engine_streak = 0;
        info!(preset = preset.name(), "difficulty preset locked");
        Ok(preset)
    }

    /// Return to adaptive mode at the retained level.
    pub fn clear_preset(&mut self) {
        if self.preset.take().is_some() {
            info!(level = self.level, "difficulty back to adaptive");
        }
    }

    pub fn preset(&self) -> Option<Preset> {
        self.preset
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn depth(&self) -> u8 {
        match self.preset {
            Some(p) => p.depth(),
            None => depth_for_level(self.level),
        }
    }

    pub fn blunder_chance(&self) -> f64 {
        match self.preset {
            Some(p) => p.blunder_chance(),
            None => blunder_chance_for_level(self.level),
        }
    }

    pub fn params(&self) -> SearchParams {
        SearchParams {
            depth: self.depth(),
            blunder_chance: self.blunder_chance(),
            level: self.level,
        }
    }

    pub fn setting(&self) -> DifficultySetting {
        match self.preset {
            Some(p) => DifficultySetting::Preset(p),
            None => DifficultySetting::Adaptive {
                level: self.level,
                player_streak: self.player_streak,
                engine_streak: self.engine_streak,
            },
        }
    }

    /// "Adaptive (N/10)" or the preset's name.
    pub fn difficulty_label(&self) -> String {
        match self.preset {
            Some(p) => p.name().to_string(),
            None => format!("Adaptive ({}/{})", self.level, MAX_LEVEL),
        }
    }

    /// Feed a decisive result into the streak counters.
    pub fn on_game_end(&mut self, player_won: bool) -> Option<u8> {
        self.record(if player_won {
            GameOutcome::PlayerWon
        } else {
            GameOutcome::EngineWon
        })
    }

    /// Apply a finished game. Returns the new level when it changed.
    ///
    /// A result that breaks the opposite streak only resets both counters.
    /// Draws and games played under a preset are ignored.
    pub fn record(&mut self, outcome: GameOutcome) -> Option<u8> {
        if self.preset.is_some() {
            return None;
        }
        match outcome {
            GameOutcome::Draw => None,
            GameOutcome::PlayerWon => {
                if self.engine_streak > 0 {
                    self.reset_streaks();
                    return None;
                }
                self.player_streak += 1;
                if self.player_streak >= STREAK_TO_ADJUST {
                    self.reset_streaks();
                    return self.shift_level(1);
                }
                None
            }
            GameOutcome::EngineWon => {
                if self.player_streak > 0 {
                    self.reset_streaks();
                    return None;
                }
                self.engine_streak += 1;
                if self.engine_streak >= STREAK_TO_ADJUST {
                    self.reset_streaks();
                    return self.shift_level(-1);
                }
                None
            }
        }
    }

    fn reset_streaks(&mut self) {
        self.player_streak = 0;
        self.engine_streak = 0;
    }

    fn shift_level(&mut self, delta: i8) -> Option<u8> {
        let next = (self.level as i8 + delta).clamp(MIN_LEVEL as i8, MAX_LEVEL as i8) as u8;
        if next == self.level {
            return None;
        }
        info!(from = self.level, to = next, "adaptive level changed");
        self.level = next;
        Some(next)
    }
}

#[cfg(test)]
#[path = "difficulty_tests.rs"]
mod difficulty_tests;
