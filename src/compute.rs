//! Pure session-transition functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameSession` and returns a brand-new `GameSession`.  Each mutating
//! transition re-runs the collision arbiter before returning, so no caller
//! can ever observe a state where the player overlaps an opponent and the
//! session is still running.

use crate::entities::{
    ConfigError, GameSession, OpponentCar, PlayerCar, Rect, RenderFrame, SessionConfig,
    SessionPhase,
};
use crate::geometry::overlaps;

// ── Constructor ──────────────────────────────────────────────────────────────

/// Build a fresh running session from `config`.
///
/// Fails fast when the shoulders leave the player no drivable range; every
/// later operation on a successfully-built session is total.
pub fn init_session(config: SessionConfig) -> Result<GameSession, ConfigError> {
    if 2.0 * config.shoulder_width + config.car_width > config.viewport_width {
        return Err(ConfigError::NoDrivableRange {
            shoulder: config.shoulder_width,
            car: config.car_width,
            viewport: config.viewport_width,
        });
    }

    let opponents: Vec<OpponentCar> = config
        .opponents
        .iter()
        .map(|spec| OpponentCar { id: spec.id, x: spec.x, y: spec.y, speed: spec.speed })
        .collect();

    let start_x = config.player_start_x.clamp(config.min_x(), config.max_x());
    log::debug!(
        "session start: player at x={start_x}, {} opponents, drivable range [{}, {}]",
        opponents.len(),
        config.min_x(),
        config.max_x(),
    );

    Ok(GameSession {
        player: PlayerCar { x: start_x },
        opponents,
        phase: SessionPhase::Running,
        score: 0,
        config,
    })
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// One discrete step left.  Ignored (not queued) once the session is over.
pub fn move_player_left(state: &GameSession) -> GameSession {
    move_player_to(state, state.player.x - state.config.move_step_px)
}

/// One discrete step right.  Ignored (not queued) once the session is over.
pub fn move_player_right(state: &GameSession) -> GameSession {
    move_player_to(state, state.player.x + state.config.move_step_px)
}

fn move_player_to(state: &GameSession, requested_x: f32) -> GameSession {
    if state.phase == SessionPhase::Over {
        return state.clone();
    }
    let bounded_x = requested_x.clamp(state.config.min_x(), state.config.max_x());
    let next = GameSession {
        player: PlayerCar { x: bounded_x },
        ..state.clone()
    };
    check_collisions(&next)
}

// ── Periodic transitions ─────────────────────────────────────────────────────

/// Advance one opponent by its own speed.  Writes only the given slot;
/// a no-op once the session is over or for an out-of-range slot.
pub fn tick_opponent(state: &GameSession, slot: usize) -> GameSession {
    if state.phase == SessionPhase::Over || slot >= state.opponents.len() {
        return state.clone();
    }
    let mut opponents = state.opponents.clone();
    opponents[slot].y += opponents[slot].speed;
    let next = GameSession { opponents, ..state.clone() };
    check_collisions(&next)
}

/// One score-clock tick.  A no-op once the session is over.
pub fn tick_score(state: &GameSession) -> GameSession {
    if state.phase == SessionPhase::Over {
        return state.clone();
    }
    GameSession {
        score: state.score + state.config.score_increment,
        ..state.clone()
    }
}

// ── Lifecycle / collision arbiter ────────────────────────────────────────────

/// Evaluate the lose condition: the first opponent box overlapping the
/// player flips the latch to `Over` and the scan stops.  Opponents that
/// have fallen past the bottom of the viewport are excluded.  Idempotent:
/// an already-over session is returned untouched.
pub fn check_collisions(state: &GameSession) -> GameSession {
    if state.phase == SessionPhase::Over {
        return state.clone();
    }
    let player = player_rect(state);
    for opponent in &state.opponents {
        if opponent.y > state.config.viewport_height {
            continue;
        }
        if overlaps(&player, &opponent_rect(&state.config, opponent)) {
            log::info!(
                "collision with opponent {} at y={:.1}; final score {}",
                opponent.id,
                opponent.y,
                state.score,
            );
            return GameSession {
                phase: SessionPhase::Over,
                ..state.clone()
            };
        }
    }
    state.clone()
}

// ── Read-side snapshot ───────────────────────────────────────────────────────

/// Point-in-time view for the renderer, sampled at whatever cadence it
/// likes.  Off-screen opponents are omitted.
pub fn snapshot(state: &GameSession) -> RenderFrame {
    RenderFrame {
        player: player_rect(state),
        opponents: state
            .opponents
            .iter()
            .filter(|o| o.y <= state.config.viewport_height)
            .map(|o| (o.id, opponent_rect(&state.config, o)))
            .collect(),
        phase: state.phase,
        score: state.score,
    }
}

/// The player's current bounding box.
pub fn player_rect(state: &GameSession) -> Rect {
    Rect {
        x: state.player.x,
        y: state.config.player_y,
        w: state.config.car_width,
        h: state.config.car_height,
    }
}

/// An opponent's current bounding box.
pub fn opponent_rect(config: &SessionConfig, opponent: &OpponentCar) -> Rect {
    Rect {
        x: opponent.x,
        y: opponent.y,
        w: config.car_width,
        h: config.car_height,
    }
}
