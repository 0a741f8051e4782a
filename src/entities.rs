//! All game entity and configuration types — pure data, no logic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in viewport pixels, top-left origin (y grows
/// downward).  Used for both rendering placement and collision testing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

// ── Session lifecycle ─────────────────────────────────────────────────────────

/// One-way latch: the only transition is `Running → Over`, performed by the
/// collision arbiter.  No transition back exists within a session; playing
/// again means constructing a fresh `GameSession`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    Over,
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// The player's car.  Only `x` ever changes; the vertical coordinate and the
/// car dimensions live in `SessionConfig` and are fixed for the session.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerCar {
    pub x: f32,
}

/// One opponent car, occupying a fixed slot for the whole session.  `x`,
/// `speed` and the dimensions never change; `y` grows monotonically while
/// the session is running.
#[derive(Clone, Debug, PartialEq)]
pub struct OpponentCar {
    /// Opaque identity, unique within the roster.
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Pixels travelled per tick.
    pub speed: f32,
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn default_opponent_speed() -> f32 {
    2.0
}

/// Starting state for one opponent in the roster.  The JSON keys for the
/// starting position are `x0`/`y0`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentSpec {
    pub id: u32,
    #[serde(rename = "x0")]
    pub x: f32,
    #[serde(rename = "y0")]
    pub y: f32,
    #[serde(default = "default_opponent_speed")]
    pub speed: f32,
}

/// Session parameters, fixed at construction.  `Default` reproduces the
/// reference session; a JSON config file may override any subset of fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Width of the undrivable margin on each side of the track.
    pub shoulder_width: f32,
    pub car_width: f32,
    pub car_height: f32,
    pub player_start_x: f32,
    /// The player's fixed vertical coordinate.
    pub player_y: f32,
    /// Pixels moved per discrete left/right input event.
    pub move_step_px: f32,
    /// Period of each opponent's motion tick.
    pub tick_interval_ms: u64,
    /// Period of the score clock.
    pub score_interval_ms: u64,
    /// Points awarded per score tick.
    pub score_increment: u32,
    pub opponents: Vec<OpponentSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            viewport_width: 350.0,
            viewport_height: 500.0,
            shoulder_width: 50.0,
            car_width: 50.0,
            car_height: 100.0,
            player_start_x: 150.0,
            player_y: 390.0, // one car height + 10px above the bottom edge
            move_step_px: 10.0,
            tick_interval_ms: 50,
            score_interval_ms: 1000,
            score_increment: 10,
            opponents: vec![
                OpponentSpec { id: 1, x: 60.0, y: -150.0, speed: 2.5 },
                OpponentSpec { id: 2, x: 150.0, y: -250.0, speed: 2.0 },
                OpponentSpec { id: 3, x: 240.0, y: -200.0, speed: 3.0 },
            ],
        }
    }
}

impl SessionConfig {
    /// Leftmost drivable x for the player car.
    pub fn min_x(&self) -> f32 {
        self.shoulder_width
    }

    /// Rightmost drivable x for the player car's left edge.
    pub fn max_x(&self) -> f32 {
        self.viewport_width - self.shoulder_width - self.car_width
    }
}

/// Session construction failures.  The only rejected input is a geometry
/// that leaves the player no drivable range.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error(
        "no drivable range: two shoulders of {shoulder}px plus a {car}px car \
         exceed the {viewport}px viewport"
    )]
    NoDrivableRange { shoulder: f32, car: f32, viewport: f32 },
}

// ── Aggregate root ────────────────────────────────────────────────────────────

/// The entire session state — single source of truth.  Cloneable so pure
/// update functions can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    pub config: SessionConfig,
    pub player: PlayerCar,
    /// Fixed arena of opponent slots; each motion tick writes one slot only.
    pub opponents: Vec<OpponentCar>,
    pub phase: SessionPhase,
    pub score: u32,
}

// ── Presentation boundary ─────────────────────────────────────────────────────

/// Point-in-time snapshot handed to the renderer.  Opponents that have
/// fallen past the bottom of the viewport are omitted.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub player: Rect,
    pub opponents: Vec<(u32, Rect)>,
    pub phase: SessionPhase,
    pub score: u32,
}
