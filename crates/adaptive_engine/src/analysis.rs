//! Post-game review of the moves both sides played.

use std::fmt;

use chess_core::{Color, Move, PieceKind, Position};
use serde::Serialize;

use crate::difficulty::GameOutcome;
use crate::eval::evaluate_for;

/// Player moves whose evaluation swing falls below this are blunders.
pub const BLUNDER_SWING: i32 = -150;
pub const MISTAKE_SWING: i32 = -60;
pub const EXCELLENT_SWING: i32 = 100;
/// Capturing a piece worth at least this many pawns is a great capture.
pub const GREAT_CAPTURE_PAWNS: u8 = 3;

/// One ply as it was played.
#[derive(Clone, Debug, PartialEq)]
pub struct PlyRecord {
    pub before: Position,
    pub mv: Move,
    pub san: String,
    pub by_engine: bool,
    /// The engine played this move as a deliberate blunder
    pub blunder: bool,
}

impl PlyRecord {
    pub fn mover(&self) -> Color {
        self.before.side_to_move
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MoveClass {
    GreatCapture { captured: PieceKind, pawns: u8 },
    Excellent,
    Mistake,
    Blunder,
    Quiet,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MoveReview {
    pub ply: usize,
    pub move_number: usize,
    pub by_engine: bool,
    pub san: String,
    /// Evaluation change from the mover's point of view
    pub swing: i32,
    pub class: MoveClass,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Clean,
    Good,
    KeepPracticing,
}

impl Verdict {
    pub fn from_counts(mistakes: usize, blunders: usize) -> Verdict {
        if blunders == 0 && mistakes <= 1 {
            Verdict::Clean
        } else if blunders <= 1 {
            Verdict::Good
        } else {
            Verdict::KeepPracticing
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Verdict::Clean => "Outstanding game, very clean play!",
            Verdict::Good => "Good game, just a few errors.",
            Verdict::KeepPracticing => "Keep practicing and focus on not dropping pieces.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameAnalysis {
    pub outcome: Option<GameOutcome>,
    pub reviews: Vec<MoveReview>,
    pub great_moves: usize,
    pub mistakes: usize,
    pub blunders: usize,
    pub verdict: Verdict,
}

/// Material value of a piece in whole pawns.
pub fn pawn_value(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight | PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

/// Classify one ply.
pub fn classify(record: &PlyRecord) -> (MoveClass, i32) {
    let mover = record.mover();
    let mut after = record.before.clone();
    after.make_move(record.mv);
    let swing = evaluate_for(&after, mover) - evaluate_for(&record.before, mover);

    if let Some(captured) = record.before.piece_at(record.mv.to) {
        let pawns = pawn_value(captured.kind);
        if pawns >= GREAT_CAPTURE_PAWNS {
            return (
                MoveClass::GreatCapture {
                    captured: captured.kind,
                    pawns,
                },
                swing,
            );
        }
    }

    if record.by_engine {
        return (MoveClass::Quiet, swing);
    }
    let class = if swing < BLUNDER_SWING {
        MoveClass::Blunder
    } else if swing < MISTAKE_SWING {
        MoveClass::Mistake
    } else if swing > EXCELLENT_SWING {
        MoveClass::Excellent
    } else {
        MoveClass::Quiet
    };
    (class, swing)
}

/// Review a whole game.
pub fn analyze(history: &[PlyRecord], outcome: Option<GameOutcome>) -> GameAnalysis {
    let mut reviews = Vec::with_capacity(history.len());
    let (mut great_moves, mut mistakes, mut blunders) = (0, 0, 0);

    for (ply, record) in history.iter().enumerate() {
        let (class, swing) = classify(record);
        match class {
            MoveClass::GreatCapture { .. } | MoveClass::Excellent => great_moves += 1,
            MoveClass::Mistake => mistakes += 1,
            MoveClass::Blunder => blunders += 1,
            MoveClass::Quiet => {}
        }
        reviews.push(MoveReview {
            ply,
            move_number: ply / 2 + 1,
            by_engine: record.by_engine,
            san: record.san.clone(),
            swing,
            class,
        });
    }

    GameAnalysis {
        outcome,
        reviews,
        great_moves,
        mistakes,
        blunders,
        verdict: Verdict::from_counts(mistakes, blunders),
    }
}

impl fmt::Display for MoveReview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let who = if self.by_engine { "AI" } else { "You" };
        write!(f, "{:>2}. {:<3} {:<8}", self.move_number, who, self.san)?;
        match self.class {
            MoveClass::GreatCapture { captured, pawns } => {
                write!(f, " Great capture! Won a {} (+{pawns})", captured.name())
            }
            MoveClass::Excellent => write!(f, " Excellent move!"),
            MoveClass::Mistake => write!(f, " Mistake, a better move was available."),
            MoveClass::Blunder => write!(f, " Blunder! This lost significant material."),
            MoveClass::Quiet => Ok(()),
        }
    }
}

impl fmt::Display for GameAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self.outcome {
            Some(GameOutcome::PlayerWon) => "You won!",
            Some(GameOutcome::EngineWon) => "AI won!",
            Some(GameOutcome::Draw) => "Draw!",
            None => "Unfinished",
        };
        writeln!(f, "Result: {result}   Moves played: {}", self.reviews.len())?;
        writeln!(f)?;
        for review in &self.reviews {
            writeln!(f, "{review}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Summary: {} great moves | {} mistakes | {} blunders",
            self.great_moves, self.mistakes, self.blunders
        )?;
        write!(f, "{}", self.verdict.describe())
    }
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod analysis_tests;
