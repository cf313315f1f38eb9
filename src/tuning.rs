//! Data-driven balance values
//!
//! Everything that shapes difficulty lives here so a hosting page can
//! re-balance the game without recompiling. Defaults mirror the constants
//! in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs for one session.
///
/// Deserialization fills missing fields from the defaults, so an override
/// blob only needs the values it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a run
    pub starting_lives: u8,
    /// Horizontal distance per move command (percent of playfield width)
    pub move_step_percent: f32,
    /// Fall distance per millisecond at speed 1.0, in pixels
    pub base_fall_rate: f32,
    /// Speed added at every speed threshold
    pub speed_increment: f32,
    /// Score points between speed increases
    pub speed_score_interval: u64,

    // === Spawn cadence ===
    /// Milliseconds between spawns at the start of a run
    pub spawn_interval_start_ms: f32,
    /// The interval never ramps below this
    pub spawn_interval_floor_ms: f32,
    /// Milliseconds removed at every interval threshold
    pub spawn_interval_step_ms: f32,
    /// Score points between interval decreases
    pub interval_score_interval: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            move_step_percent: PLAYER_MOVE_STEP,
            base_fall_rate: BASE_FALL_RATE,
            speed_increment: SPEED_INCREMENT,
            speed_score_interval: SPEED_SCORE_INTERVAL,

            spawn_interval_start_ms: SPAWN_INTERVAL_START_MS,
            spawn_interval_floor_ms: SPAWN_INTERVAL_FLOOR_MS,
            spawn_interval_step_ms: SPAWN_INTERVAL_STEP_MS,
            interval_score_interval: INTERVAL_SCORE_INTERVAL,
        }
    }
}

impl Tuning {
    /// Parse an override blob, falling back to defaults when it is missing
    /// or malformed.
    pub fn from_json(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("using default tuning");
            return Self::default();
        };
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => {
                log::info!("loaded tuning overrides");
                tuning.sanitized()
            }
            Err(err) => {
                log::warn!("ignoring invalid tuning JSON: {err}");
                Self::default()
            }
        }
    }

    /// Replace values the simulation cannot run with (zero score intervals
    /// drive modulo checks, non-positive cadence values stall spawning) by
    /// their defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.speed_score_interval == 0 {
            self.speed_score_interval = defaults.speed_score_interval;
        }
        if self.interval_score_interval == 0 {
            self.interval_score_interval = defaults.interval_score_interval;
        }
        if !(self.spawn_interval_start_ms > 0.0) {
            self.spawn_interval_start_ms = defaults.spawn_interval_start_ms;
        }
        if !(self.spawn_interval_floor_ms > 0.0) {
            self.spawn_interval_floor_ms = defaults.spawn_interval_floor_ms;
        }
        if !(self.spawn_interval_step_ms > 0.0) {
            self.spawn_interval_step_ms = defaults.spawn_interval_step_ms;
        }
        if !(self.base_fall_rate > 0.0) {
            self.base_fall_rate = defaults.base_fall_rate;
        }
        if !(self.move_step_percent > 0.0) {
            self.move_step_percent = defaults.move_step_percent;
        }
        self
    }
}
