use f1_race::entities::*;

// ── Reference defaults ────────────────────────────────────────────────────────

#[test]
fn default_config_matches_reference_session() {
    let c = SessionConfig::default();
    assert_eq!(c.viewport_width, 350.0);
    assert_eq!(c.viewport_height, 500.0);
    assert_eq!(c.shoulder_width, 50.0);
    assert_eq!(c.car_width, 50.0);
    assert_eq!(c.car_height, 100.0);
    assert_eq!(c.player_start_x, 150.0);
    assert_eq!(c.player_y, 390.0);
    assert_eq!(c.move_step_px, 10.0);
    assert_eq!(c.tick_interval_ms, 50);
    assert_eq!(c.score_interval_ms, 1000);
    assert_eq!(c.score_increment, 10);
    let ids: Vec<u32> = c.opponents.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn drivable_bounds_follow_from_geometry() {
    let c = SessionConfig::default();
    assert_eq!(c.min_x(), 50.0);
    assert_eq!(c.max_x(), 250.0);
}

// ── Config deserialization ────────────────────────────────────────────────────

#[test]
fn partial_json_config_falls_back_to_defaults() {
    let c: SessionConfig = serde_json::from_str(r#"{"viewportWidth": 700.0}"#).unwrap();
    assert_eq!(c.viewport_width, 700.0);
    assert_eq!(c.viewport_height, 500.0);
    assert_eq!(c.opponents.len(), 3);
}

#[test]
fn opponent_spec_speed_defaults_when_absent() {
    let json = r#"{"opponents": [{"id": 7, "x0": 100.0, "y0": -50.0}]}"#;
    let c: SessionConfig = serde_json::from_str(json).unwrap();
    assert_eq!(c.opponents, vec![OpponentSpec { id: 7, x: 100.0, y: -50.0, speed: 2.0 }]);
}

#[test]
fn config_round_trips_through_json() {
    let c = SessionConfig::default();
    let json = serde_json::to_string(&c).unwrap();
    let back: SessionConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(c, back);
}

// ── Misc ──────────────────────────────────────────────────────────────────────

#[test]
fn config_error_names_the_offending_numbers() {
    let e = ConfigError::NoDrivableRange { shoulder: 50.0, car: 50.0, viewport: 120.0 };
    let msg = e.to_string();
    assert!(msg.contains("50"));
    assert!(msg.contains("120"));
}

#[test]
fn session_clone_is_independent() {
    let original = GameSession {
        config: SessionConfig::default(),
        player: PlayerCar { x: 150.0 },
        opponents: vec![OpponentCar { id: 1, x: 60.0, y: -150.0, speed: 2.5 }],
        phase: SessionPhase::Running,
        score: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.opponents[0].y = 0.0;

    assert_eq!(original.player.x, 150.0);
    assert_eq!(original.score, 0);
    assert_eq!(original.opponents[0].y, -150.0);
}
