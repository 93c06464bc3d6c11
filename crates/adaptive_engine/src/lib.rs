//! Adaptive Chess Opponent
//!
//! Minimax search with alpha-beta pruning over a material / center /
//! mobility evaluation. Strength is set either by a fixed preset or by an
//! adaptive 1-10 level that follows the player's results, and weaker
//! settings deliberately blunder now and then. Searches run in the
//! background so the game loop never blocks.

pub mod analysis;
pub mod config;
pub mod coordinator;
pub mod difficulty;
pub mod error;
pub mod eval;
pub mod explain;
pub mod search;
pub mod session;

pub use analysis::{analyze, GameAnalysis, MoveClass, MoveReview, PlyRecord, Verdict};
pub use config::EngineConfig;
pub use coordinator::{ComputationHandle, ComputationKind, ComputationState, Coordinator};
pub use difficulty::{
    DifficultyController, DifficultySetting, GameOutcome, Preset, SearchParams, MAX_LEVEL,
    MIN_LEVEL,
};
pub use error::{ConfigError, EngineError, Result};
pub use eval::{evaluate, evaluate_for, MATE_SCORE};
pub use explain::{ExplanationRequest, MoveExplainer};
pub use search::{order_captures_first, SearchResult, Searcher};
pub use session::{EngineReply, Session};
