use super::*;
use adaptive_engine::GameOutcome;

const PARTNER_MATES: &str = "6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1";

fn quiet(config: SparringConfig) -> SparringConfig {
    SparringConfig {
        verbose: false,
        ..config
    }
}

#[test]
fn test_short_series_stops_at_ply_limit() {
    let config = quiet(SparringConfig {
        games: 2,
        max_plies: 6,
        partner: Preset::Easy,
        engine: EngineConfig {
            seed: Some(1),
            ..Default::default()
        },
        ..Default::default()
    });
    let report = SparringRunner::new(config).run().unwrap();

    assert_eq!(report.games.len(), 2);
    for game in &report.games {
        assert!(game.plies <= 6);
        assert_eq!(game.level_before, 5);
    }
    assert_eq!(report.games[0].level_after, report.games[1].level_before);
}

#[test]
fn test_partner_wins_raise_the_level() {
    let start = Position::from_fen(PARTNER_MATES).unwrap();
    let config = quiet(SparringConfig {
        games: 2,
        partner: Preset::Grandmaster,
        engine: EngineConfig {
            initial_level: 6,
            seed: Some(2),
            ..Default::default()
        },
        ..Default::default()
    });
    let report = SparringRunner::new(config).run_from(&start).unwrap();

    assert_eq!(report.tally(), (0, 2, 0));
    assert!(report
        .games
        .iter()
        .all(|g| g.outcome == Some(GameOutcome::PlayerWon) && g.plies == 1));
    assert_eq!(report.games[0].level_after, 6);
    assert_eq!(report.games[1].level_after, 7);
    assert_eq!(report.final_level(), 7);
}

#[test]
fn test_partner_can_play_hints() {
    let start = Position::from_fen(PARTNER_MATES).unwrap();
    let config = quiet(SparringConfig {
        games: 2,
        use_hints: true,
        engine: EngineConfig {
            initial_level: 9,
            seed: Some(3),
            ..Default::default()
        },
        ..Default::default()
    });
    let report = SparringRunner::new(config).run_from(&start).unwrap();

    assert_eq!(report.tally(), (0, 2, 0));
    assert_eq!(report.final_level(), 10);
    assert_eq!(report.games[1].difficulty, "Adaptive (10/10)");
}

#[test]
fn test_cancelled_hint_is_not_waited_on() {
    let runner = SparringRunner::new(quiet(SparringConfig::default()));
    let mut session = Session::new(EngineConfig {
        seed: Some(6),
        ..Default::default()
    })
    .unwrap();

    // Playing a move cancels the hint that was still outstanding
    session.request_hint().unwrap();
    session.play_uci("e2e4").unwrap();
    assert!(!session.awaits_hint());
    assert_eq!(runner.collect_hint(&mut session), None);

    // Nothing requested at all
    session.wait_for_engine().unwrap();
    assert_eq!(runner.collect_hint(&mut session), None);
}

#[test]
fn test_locked_preset_never_moves() {
    let start = Position::from_fen(PARTNER_MATES).unwrap();
    let config = quiet(SparringConfig {
        games: 3,
        partner: Preset::Grandmaster,
        engine: EngineConfig {
            preset: 3,
            seed: Some(4),
            ..Default::default()
        },
        ..Default::default()
    });
    let report = SparringRunner::new(config).run_from(&start).unwrap();

    assert_eq!(report.tally(), (0, 3, 0));
    assert!(report
        .games
        .iter()
        .all(|g| g.difficulty == "Hard" && g.level_after == 5));
}
