//! Chess rules for the adaptive opponent.
//!
//! A plain 64-square mailbox with legal move generation, make/unmake,
//! check / mate / stalemate / insufficient-material predicates, FEN and
//! move notation. The search crate treats everything here as a black box.

pub mod board;
pub mod fen;
pub mod movegen;
pub mod notation;
pub mod types;

pub use board::*;
pub use fen::FenError;
pub use movegen::*;
pub use notation::*;
pub use types::*;
