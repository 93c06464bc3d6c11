//! Sparring runner for the adaptive opponent
//!
//! Plays a series of games between the adaptive engine and a sparring
//! partner of fixed strength, driving the engine through the same
//! non-blocking session API a GUI would use, and records how the adaptive
//! level moves from game to game.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p sparring -- --games 6 --partner 2 --config engine.toml
//! ```

mod match_runner;
mod report;

pub use match_runner::*;
pub use report::*;
