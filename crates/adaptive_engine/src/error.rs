//! Error types for the adaptive engine.

use std::path::PathBuf;

use thiserror::Error;

/// Generic result type for the adaptive engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Contract violations and rejected requests.
///
/// Nothing here is fatal to the process; a failed background search is not
/// an error at all, it degrades to "no move".
#[derive(Debug, Error)]
pub enum EngineError {
    /// A computation of the same kind is still pending. The game loop must
    /// gate input until it settles or cancel it first.
    #[error("a {0} computation is already pending")]
    ComputationPending(&'static str),

    #[error("unknown difficulty preset {0} (expected 1-4)")]
    InvalidPreset(u8),

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("it is not the player's turn")]
    NotPlayersTurn,

    #[error("the game is over")]
    GameOver,

    #[error("there is no player move to take back")]
    NothingToUndo,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("initial_level must be within 1-10, got {0}")]
    Level(u8),

    #[error("preset must be 0 (adaptive) or 1-4, got {0}")]
    Preset(u8),
}
