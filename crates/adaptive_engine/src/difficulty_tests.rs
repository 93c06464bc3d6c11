use super::*;

#[test]
fn test_level_mapping() {
    let depths: Vec<u8> = (1..=10).map(depth_for_level).collect();
    assert_eq!(depths, vec![1, 1, 1, 1, 1, 2, 2, 2, 3, 3]);

    assert_eq!(blunder_chance_for_level(1), 0.50);
    assert_eq!(blunder_chance_for_level(2), 0.50);
    assert_eq!(blunder_chance_for_level(3), 0.30);
    assert_eq!(blunder_chance_for_level(5), 0.15);
    assert_eq!(blunder_chance_for_level(7), 0.05);
    assert_eq!(blunder_chance_for_level(9), 0.0);
    assert_eq!(blunder_chance_for_level(10), 0.0);
}

#[test]
fn test_blunder_chance_never_increases_with_level() {
    for level in MIN_LEVEL..MAX_LEVEL {
        assert!(blunder_chance_for_level(level + 1) <= blunder_chance_for_level(level));
        assert!(depth_for_level(level + 1) >= depth_for_level(level));
        assert!((1..=MAX_DEPTH).contains(&depth_for_level(level)));
    }
}

#[test]
fn test_presets() {
    let table: Vec<(u8, u8, f64)> = Preset::ALL
        .iter()
        .map(|p| (p.number(), p.depth(), p.blunder_chance()))
        .collect();
    assert_eq!(
        table,
        vec![(1, 2, 0.55), (2, 3, 0.20), (3, 4, 0.05), (4, 4, 0.0)]
    );
    for p in Preset::ALL {
        assert_eq!(Preset::from_number(p.number()), Some(p));
    }
    assert_eq!(Preset::from_number(0), None);
    assert_eq!(Preset::from_number(5), None);
}

#[test]
fn test_two_player_wins_raise_the_level() {
    let mut dc = DifficultyController::new(5);
    assert_eq!(dc.on_game_end(true), None);
    assert_eq!(dc.on_game_end(true), Some(6));
    assert_eq!(dc.level(), 6);
    assert_eq!(
        dc.setting(),
        DifficultySetting::Adaptive {
            level: 6,
            player_streak: 0,
            engine_streak: 0
        }
    );
}

#[test]
fn test_two_engine_wins_lower_the_level() {
    let mut dc = DifficultyController::new(6);
    dc.on_game_end(false);
    assert_eq!(dc.on_game_end(false), Some(5));
    assert_eq!(dc.level(), 5);
}

#[test]
fn test_level_goes_up_and_back_down() {
    let mut dc = DifficultyController::new(5);
    dc.on_game_end(true);
    dc.on_game_end(true);
    assert_eq!(dc.level(), 6);
    dc.on_game_end(false);
    dc.on_game_end(false);
    assert_eq!(dc.level(), 5);
}

#[test]
fn test_broken_streak_resets_both_counters() {
    let mut dc = DifficultyController::new(5);
    dc.on_game_end(true);
    dc.on_game_end(false);
    assert_eq!(
        dc.setting(),
        DifficultySetting::Adaptive {
            level: 5,
            player_streak: 0,
            engine_streak: 0
        }
    );

    // A fresh pair is needed afterwards
    dc.on_game_end(false);
    assert_eq!(dc.level(), 5);
    assert_eq!(dc.on_game_end(false), Some(4));
}

#[test]
fn test_draws_leave_streaks_alone() {
    let mut dc = DifficultyController::new(5);
    dc.on_game_end(true);
    assert_eq!(dc.record(GameOutcome::Draw), None);
    assert_eq!(dc.on_game_end(true), Some(6));
}

#[test]
fn test_level_is_clamped() {
    let mut dc = DifficultyController::new(1);
    dc.on_game_end(false);
    assert_eq!(dc.on_game_end(false), None);
    assert_eq!(dc.level(), MIN_LEVEL);

    let mut dc = DifficultyController::new(10);
    dc.on_game_end(true);
    assert_eq!(dc.on_game_end(true), None);
    assert_eq!(dc.level(), MAX_LEVEL);

    assert_eq!(DifficultyController::new(0).level(), MIN_LEVEL);
    assert_eq!(DifficultyController::new(42).level(), MAX_LEVEL);
}

#[test]
fn test_preset_locks_across_games() {
    let mut dc = DifficultyController::new(5);
    dc.set_preset(2).unwrap();
    for player_won in [true, true, true] {
        assert_eq!(dc.on_game_end(player_won), None);
        assert_eq!(dc.depth(), 3);
        assert_eq!(dc.blunder_chance(), 0.20);
        assert_eq!(dc.preset(), Some(Preset::Medium));
    }
    assert_eq!(dc.level(), 5);
    assert_eq!(dc.difficulty_label(), "Medium");
}

#[test]
fn test_clear_preset_restores_adaptive_level() {
    let mut dc = DifficultyController::new(8);
    dc.set_preset(4).unwrap();
    assert_eq!(dc.depth(), 4);
    dc.clear_preset();
    assert_eq!(dc.preset(), None);
    assert_eq!(dc.depth(), 2);
    assert_eq!(dc.blunder_chance(), 0.05);
    assert_eq!(dc.difficulty_label(), "Adaptive (8/10)");
}

#[test]
fn test_invalid_preset_rejected() {
    let mut dc = DifficultyController::new(5);
    assert!(matches!(dc.set_preset(0), Err(EngineError::InvalidPreset(0))));
    assert!(matches!(dc.set_preset(9), Err(EngineError::InvalidPreset(9))));
    assert_eq!(dc.preset(), None);
}

#[test]
fn test_params_follow_mode() {
    let mut dc = DifficultyController::new(9);
    let params = dc.params();
    assert_eq!((params.depth, params.blunder_chance, params.level), (3, 0.0, 9));
    dc.set_preset(1).unwrap();
    let params = dc.params();
    assert_eq!((params.depth, params.blunder_chance), (2, 0.55));
}

#[test]
fn test_from_config() {
    let config = EngineConfig {
        initial_level: 3,
        preset: 3,
        ..Default::default()
    };
    let dc = DifficultyController::from_config(&config).unwrap();
    assert_eq!(dc.level(), 3);
    assert_eq!(dc.preset(), Some(Preset::Hard));

    let bad = EngineConfig {
        initial_level: 12,
        ..Default::default()
    };
    assert!(matches!(
        DifficultyController::from_config(&bad),
        Err(EngineError::Config(_))
    ));
}
