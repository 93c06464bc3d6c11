use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn config(level: u8, preset: u8, engine_color: Color) -> EngineConfig {
    EngineConfig {
        initial_level: level,
        preset,
        engine_color,
        seed: Some(17),
    }
}

fn black_engine() -> Session {
    Session::new(config(5, 0, Color::Black)).unwrap()
}

#[test]
fn test_player_starts_against_black_engine() {
    let mut session = black_engine();
    assert!(session.is_players_turn());
    assert!(!session.is_thinking());
    assert!(session.tick().is_none());
    assert_eq!(session.difficulty_label(), "Adaptive (5/10)");
}

#[test]
fn test_player_move_then_engine_reply() {
    let mut session = black_engine();
    session.play_uci("e2e4").unwrap();
    assert!(!session.is_players_turn());

    let reply = session.wait_for_engine().expect("engine should reply");
    assert_eq!(reply.request.before.side_to_move, Color::Black);
    assert_eq!(session.history().len(), 2);
    assert!(session.history()[1].by_engine);
    assert_eq!(session.history()[1].mv, reply.mv);
    assert_eq!(session.position().side_to_move, Color::White);
    assert!(session.is_players_turn());
}

#[test]
fn test_rejected_moves() {
    let mut session = black_engine();
    assert!(matches!(
        session.play_uci("e2e5"),
        Err(EngineError::IllegalMove(_))
    ));
    assert!(matches!(
        session.play_uci("e7e5"),
        Err(EngineError::IllegalMove(_))
    ));

    session.play_uci("d2d4").unwrap();
    // Engine to move: either still thinking or waiting to be picked up
    assert!(matches!(
        session.play_uci("e2e4"),
        Err(EngineError::ComputationPending(_)) | Err(EngineError::NotPlayersTurn)
    ));
}

#[test]
fn test_undo_takes_back_both_plies() {
    let mut session = black_engine();
    assert!(matches!(session.undo(), Err(EngineError::NothingToUndo)));

    session.play_uci("e2e4").unwrap();
    session.wait_for_engine().unwrap();
    session.play_uci("d2d4").unwrap();
    session.wait_for_engine().unwrap();
    assert_eq!(session.history().len(), 4);

    session.undo().unwrap();
    assert_eq!(session.history().len(), 2);
    session.undo().unwrap();
    assert!(session.history().is_empty());
    assert_eq!(session.position(), &Position::startpos());
}

#[test]
fn test_undo_refused_while_engine_thinks() {
    // Grandmaster searches four plies, which takes a while from here
    let pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let mut session = Session::from_position(config(5, 4, Color::Black), pos.clone()).unwrap();
    session.play_uci("e2a6").unwrap();

    match session.undo() {
        Err(EngineError::ComputationPending(_)) => {
            session.wait_for_engine().unwrap();
            session.undo().unwrap();
        }
        Ok(()) => {}
        Err(other) => panic!("unexpected error {other}"),
    }
    assert_eq!(session.position(), &pos);
}

#[test]
fn test_engine_as_white_moves_first() {
    let mut session = Session::new(config(5, 0, Color::White)).unwrap();
    assert!(!session.is_players_turn());
    assert!(matches!(
        session.request_hint(),
        Err(EngineError::NotPlayersTurn)
    ));
    let reply = session.wait_for_engine().unwrap();
    assert_eq!(reply.request.before, Position::startpos());
    assert!(session.history()[0].by_engine);
    assert!(session.is_players_turn());

    // Undo needs a player move to take back
    assert!(matches!(session.undo(), Err(EngineError::NothingToUndo)));
}

#[test]
fn test_hint_is_a_legal_player_move() {
    let mut session = black_engine();
    session.request_hint().unwrap();
    let hint = loop {
        if let Some(result) = session.poll_hint() {
            break result;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    };
    let mv = hint.best_move.unwrap();
    assert!(legal_moves(session.position()).contains(&mv));
    session.play(mv).unwrap();
}

#[test]
fn test_player_move_cancels_outstanding_hint() {
    let mut session = black_engine();
    session.request_hint().unwrap();
    assert!(session.awaits_hint());

    session.play_uci("d2d4").unwrap();
    assert!(!session.awaits_hint());
    assert_eq!(session.poll_hint(), None);
    assert_eq!(session.poll_hint(), None);
}

#[test]
fn test_player_checkmate_ends_game() {
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let mut session = Session::from_position(config(5, 0, Color::Black), pos).unwrap();
    session.play_uci("e1e8").unwrap();

    assert_eq!(session.outcome(), Some(GameOutcome::PlayerWon));
    assert!(!session.is_thinking());
    assert_eq!(
        session.controller().setting(),
        crate::difficulty::DifficultySetting::Adaptive {
            level: 5,
            player_streak: 1,
            engine_streak: 0
        }
    );
    assert!(matches!(session.play_uci("g1f1"), Err(EngineError::GameOver)));
    assert!(matches!(session.request_hint(), Err(EngineError::GameOver)));
    assert_eq!(session.analysis().outcome, Some(GameOutcome::PlayerWon));
}

#[test]
fn test_engine_checkmate_ends_game() {
    let pos = Position::from_fen("4r1k1/5ppp/8/8/8/8/5PPP/4R1K1 b - - 0 1").unwrap();
    let mut session = Session::from_position(config(10, 0, Color::Black), pos).unwrap();

    let reply = session.wait_for_engine().unwrap();
    assert_eq!(reply.mv, Move::new(60, 4));
    assert_eq!(reply.san, "Rxe1#");
    assert!(!reply.blunder);
    assert_eq!(session.outcome(), Some(GameOutcome::EngineWon));
    assert_eq!(
        session.controller().setting(),
        crate::difficulty::DifficultySetting::Adaptive {
            level: 10,
            player_streak: 0,
            engine_streak: 1
        }
    );
}

#[test]
fn test_stalemate_is_a_draw() {
    let pos = Position::from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1").unwrap();
    let mut session = Session::from_position(config(5, 0, Color::Black), pos).unwrap();
    session.play_uci("f1f7").unwrap();
    assert_eq!(session.outcome(), Some(GameOutcome::Draw));
    assert_eq!(session.controller().level(), 5);
}

#[test]
fn test_undo_reopens_finished_game() {
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let mut session = Session::from_position(config(5, 0, Color::Black), pos.clone()).unwrap();
    session.play_uci("e1e8").unwrap();
    session.undo().unwrap();
    assert_eq!(session.outcome(), None);
    assert_eq!(session.position(), &pos);
}

#[test]
fn test_restart_keeps_preset_only_when_asked() {
    let mut session = black_engine();
    session.set_preset(3).unwrap();
    assert_eq!(session.difficulty_label(), "Hard");

    session.play_uci("e2e4").unwrap();
    session.restart(true).unwrap();
    assert_eq!(session.difficulty_label(), "Hard");
    assert!(session.history().is_empty());
    assert!(session.is_players_turn());

    session.restart(false).unwrap();
    assert_eq!(session.difficulty_label(), "Adaptive (5/10)");

    assert!(matches!(session.set_preset(7), Err(EngineError::InvalidPreset(7))));
    session.set_preset(1).unwrap();
    session.clear_preset();
    assert_eq!(session.difficulty_label(), "Adaptive (5/10)");
}

#[test]
fn test_explainer_sees_every_engine_move() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let mut session = black_engine().with_explainer(move |request: &ExplanationRequest| {
        seen.fetch_add(1, Ordering::SeqCst);
        format!("I played {}", request.san())
    });

    session.play_uci("e2e4").unwrap();
    let reply = session.wait_for_engine().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(reply.explanation, Some(format!("I played {}", reply.san)));
    assert_eq!(reply.request.level, 5);
}
