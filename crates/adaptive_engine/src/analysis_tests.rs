use super::*;
use chess_core::{move_to_san, parse_uci_move};

/// Play `moves` from `fen`, alternating player and engine starting with the
/// side to move, and record every ply.
fn record_game(fen: &str, moves: &[&str], player: Color) -> Vec<PlyRecord> {
    let mut pos = Position::from_fen(fen).unwrap();
    let mut history = Vec::new();
    for uci in moves {
        let mv = parse_uci_move(&pos, uci).unwrap_or_else(|| panic!("illegal {uci}"));
        history.push(PlyRecord {
            before: pos.clone(),
            mv,
            san: move_to_san(&pos, mv),
            by_engine: pos.side_to_move != player,
            blunder: false,
        });
        pos.make_move(mv);
    }
    history
}

#[test]
fn test_capturing_a_rook_is_great() {
    let history = record_game("4k3/8/8/3r4/8/8/8/3RK3 w - - 0 1", &["d1d5"], Color::White);
    let (class, swing) = classify(&history[0]);
    assert_eq!(
        class,
        MoveClass::GreatCapture {
            captured: PieceKind::Rook,
            pawns: 5
        }
    );
    assert!(swing > 0);
}

#[test]
fn test_engine_captures_also_count() {
    let history = record_game("4k3/8/8/3r4/8/8/8/3RK3 b - - 0 1", &["d5d1"], Color::White);
    assert!(history[0].by_engine);
    assert!(matches!(
        classify(&history[0]).0,
        MoveClass::GreatCapture { pawns: 5, .. }
    ));
}

#[test]
fn test_pawn_capture_is_not_great() {
    let history = record_game("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1", &["e4d5"], Color::White);
    assert!(!matches!(
        classify(&history[0]).0,
        MoveClass::GreatCapture { .. }
    ));
}

#[test]
fn test_stalemating_a_won_game_is_a_blunder() {
    let history = record_game("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1", &["f1f7"], Color::White);
    let (class, swing) = classify(&history[0]);
    assert_eq!(class, MoveClass::Blunder);
    assert!(swing < BLUNDER_SWING, "swing {swing}");
}

#[test]
fn test_mating_move_is_excellent() {
    let history = record_game("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", &["e1e8"], Color::White);
    assert_eq!(classify(&history[0]).0, MoveClass::Excellent);
}

#[test]
fn test_engine_moves_are_never_judged() {
    let mut history = record_game("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1", &["f1f7"], Color::White);
    history[0].by_engine = true;
    assert_eq!(classify(&history[0]).0, MoveClass::Quiet);
}

#[test]
fn test_summary_and_verdict() {
    let history = record_game(
        chess_core::START_FEN,
        &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"],
        Color::White,
    );
    let analysis = analyze(&history, None);
    assert_eq!(analysis.reviews.len(), 6);
    assert_eq!(analysis.reviews[0].move_number, 1);
    assert_eq!(analysis.reviews[5].move_number, 3);
    assert_eq!(analysis.reviews[0].san, "e4");
    assert_eq!(analysis.blunders, 0);
    assert_eq!(analysis.verdict, Verdict::Clean);

    let text = analysis.to_string();
    assert!(text.starts_with("Result: Unfinished   Moves played: 6"));
    assert!(text.contains("Summary:"));
}

#[test]
fn test_verdict_thresholds() {
    assert_eq!(Verdict::from_counts(0, 0), Verdict::Clean);
    assert_eq!(Verdict::from_counts(1, 0), Verdict::Clean);
    assert_eq!(Verdict::from_counts(2, 0), Verdict::Good);
    assert_eq!(Verdict::from_counts(5, 1), Verdict::Good);
    assert_eq!(Verdict::from_counts(0, 2), Verdict::KeepPracticing);
}

#[test]
fn test_blunder_counted_in_summary() {
    let history = record_game("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1", &["f1f7"], Color::White);
    let analysis = analyze(&history, Some(GameOutcome::Draw));
    assert_eq!(analysis.blunders, 1);
    assert_eq!(analysis.verdict, Verdict::Good);
    assert!(analysis.to_string().contains("Blunder!"));
}

#[test]
fn test_pawn_values() {
    assert_eq!(pawn_value(PieceKind::Pawn), 1);
    assert_eq!(pawn_value(PieceKind::Knight), 3);
    assert_eq!(pawn_value(PieceKind::Bishop), 3);
    assert_eq!(pawn_value(PieceKind::Rook), 5);
    assert_eq!(pawn_value(PieceKind::Queen), 9);
    assert_eq!(pawn_value(PieceKind::King), 0);
}
