//! Static position evaluation: material, center control and mobility.

use chess_core::{legal_moves_into, Color, PieceKind, Position};

/// Score for a checkmated position, in centipawns.
pub const MATE_SCORE: i32 = 10_000;

/// Bonus for a piece standing on d4, e4, d5 or e5.
pub const CENTER_BONUS: i32 = 30;
/// Bonus for a piece on c3-f3 or c6-f6.
pub const NEAR_CENTER_BONUS: i32 = 10;
/// Weight applied to the legal-move-count difference.
pub const MOBILITY_WEIGHT: i32 = 5;

const CENTER: [u8; 4] = [27, 28, 35, 36];
const NEAR_CENTER: [u8; 8] = [18, 19, 20, 21, 42, 43, 44, 45];

/// Evaluates the position from White's point of view.
///
/// Returns a score in centipawns:
/// - Positive = good for White
/// - Negative = good for Black
/// - `-MATE_SCORE` / `+MATE_SCORE` when White / Black is checkmated
/// - exactly 0 for stalemate and insufficient material
///
/// Pure: the same position always gets the same score.
pub fn evaluate(pos: &Position) -> i32 {
    let mut scratch = pos.clone();
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut scratch, &mut moves);

    if moves.is_empty() {
        if pos.in_check(pos.side_to_move) {
            return -pos.side_to_move.sign() * MATE_SCORE;
        }
        return 0;
    }
    if pos.is_insufficient_material() {
        return 0;
    }

    let mut score = 0i32;
    for (sq, pc) in pos.pieces() {
        let sign = pc.color.sign();
        score += sign * piece_value(pc.kind);
        if CENTER.contains(&sq) {
            score += sign * CENTER_BONUS;
        } else if NEAR_CENTER.contains(&sq) {
            score += sign * NEAR_CENTER_BONUS;
        }
    }

    // Mobility is counted with the turn handed to each side in turn, on an
    // otherwise identical board.
    let mover_count = moves.len() as i32;
    let mut flipped = pos.with_side_to_move(pos.side_to_move.other());
    legal_moves_into(&mut flipped, &mut moves);
    let other_count = moves.len() as i32;

    let (white_count, black_count) = match pos.side_to_move {
        Color::White => (mover_count, other_count),
        Color::Black => (other_count, mover_count),
    };
    score + MOBILITY_WEIGHT * (white_count - black_count)
}

/// Evaluation from `side`'s point of view.
pub fn evaluate_for(pos: &Position, side: Color) -> i32 {
    side.sign() * evaluate(pos)
}

/// Returns the material value of a piece in centipawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 0,
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
