//! Per-frame simulation step and synchronous command handling
//!
//! `tick` advances one frame of gameplay; `handle_command` applies player
//! and UI input between frames. Both mutate the session in place and report
//! what happened as [`SessionEvent`]s for the presentation adapter.

use super::collision;
use super::state::{GamePhase, GameSession, SessionEvent};
use crate::consts::*;

/// Player/UI input, applied synchronously between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Begin a run (accepted on the menu only)
    Start,
    /// Begin a fresh run (accepted after a game over only)
    Restart,
    TogglePause,
    ToggleMute,
    MoveLeft,
    MoveRight,
}

/// Advance the session by one frame.
///
/// No-op unless the session is Playing: paused and ended sessions keep
/// receiving frame callbacks (the clock chain stays alive) but nothing
/// advances.
pub fn tick(session: &mut GameSession, delta_ms: f32) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    if session.phase != GamePhase::Playing {
        return events;
    }
    let delta_ms = delta_ms.max(0.0);

    // One point per frame, not per unit time - frame-rate dependent by design
    session.score += 1;

    run_difficulty_ramp(session, &mut events);
    spawn_tick(session, delta_ms, &mut events);
    advance_obstacles(session, delta_ms, &mut events);
    resolve_collisions(session, &mut events);

    events
}

/// Apply a command. Returns the events the command produced; commands that
/// are not accepted in the current phase produce none and change nothing.
pub fn handle_command(session: &mut GameSession, command: Command) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    match command {
        Command::Start => {
            if session.phase == GamePhase::Menu {
                begin_run(session, &mut events);
            }
        }
        Command::Restart => {
            if session.phase == GamePhase::GameOver {
                begin_run(session, &mut events);
            }
        }
        Command::TogglePause => match session.phase {
            GamePhase::Playing => {
                session.phase = GamePhase::Paused;
                events.push(SessionEvent::PauseChanged { paused: true });
            }
            GamePhase::Paused => {
                session.phase = GamePhase::Playing;
                events.push(SessionEvent::PauseChanged { paused: false });
            }
            _ => {}
        },
        Command::ToggleMute => {
            session.muted = !session.muted;
            events.push(SessionEvent::MuteChanged {
                muted: session.muted,
            });
        }
        Command::MoveLeft => move_player(session, -session.tuning.move_step_percent),
        Command::MoveRight => move_player(session, session.tuning.move_step_percent),
    }
    events
}

fn begin_run(session: &mut GameSession, events: &mut Vec<SessionEvent>) {
    session.reset_run();
    log::info!("run started (seed {})", session.seed);
    events.push(SessionEvent::Started);
}

/// Movement only lands while Playing; the position stays on the playfield
fn move_player(session: &mut GameSession, delta_percent: f32) {
    if session.phase != GamePhase::Playing {
        return;
    }
    session.player_position = (session.player_position + delta_percent)
        .clamp(PLAYER_MIN_POSITION, PLAYER_MAX_POSITION);
}

/// Score-driven difficulty, re-checked every frame. Score moves by exactly
/// 1 per frame, so each modulo condition holds on exactly one frame per
/// threshold crossing.
fn run_difficulty_ramp(session: &mut GameSession, events: &mut Vec<SessionEvent>) {
    let tuning = session.tuning;

    if session.score > 0 && session.score % tuning.speed_score_interval == 0 {
        session.game_speed += tuning.speed_increment;
        log::debug!(
            "difficulty: speed x{:.1} at score {}",
            session.game_speed,
            session.score
        );
        events.push(SessionEvent::SpeedIncreased {
            game_speed: session.game_speed,
        });
    }

    if session.score > 0
        && session.score % tuning.interval_score_interval == 0
        && session.spawn_interval_ms > tuning.spawn_interval_floor_ms
    {
        session.spawn_interval_ms = (session.spawn_interval_ms - tuning.spawn_interval_step_ms)
            .max(tuning.spawn_interval_floor_ms);
        log::debug!(
            "difficulty: spawn interval {}ms at score {}",
            session.spawn_interval_ms,
            session.score
        );
        events.push(SessionEvent::SpawnIntervalDecreased {
            interval_ms: session.spawn_interval_ms,
        });
    }
}

/// Accumulate elapsed time and spawn one obstacle once the accumulator
/// strictly exceeds the spawn interval. Reset-not-subtract: the cadence is
/// periodic-ish and tolerant of frame jitter.
fn spawn_tick(session: &mut GameSession, delta_ms: f32, events: &mut Vec<SessionEvent>) {
    session.spawn_accumulator_ms += delta_ms;
    if session.spawn_accumulator_ms > session.spawn_interval_ms {
        let (id, x_percent) = session.spawn_obstacle();
        session.spawn_accumulator_ms = 0.0;
        events.push(SessionEvent::ObstacleSpawned { id, x_percent });
    }
}

/// Drop every obstacle by `fall rate * delta * speed`, pruning the ones that
/// left the bottom of the playfield. `retain_mut` keeps the sweep stable
/// while removing.
fn advance_obstacles(session: &mut GameSession, delta_ms: f32, events: &mut Vec<SessionEvent>) {
    let dy = session.tuning.base_fall_rate * delta_ms * session.game_speed;
    let bottom = session.viewport_height;
    session.obstacles.retain_mut(|obstacle| {
        obstacle.y_px += dy;
        if obstacle.y_px > bottom {
            events.push(SessionEvent::ObstacleRemoved { id: obstacle.id });
            false
        } else {
            true
        }
    });
}

/// Every overlapping obstacle costs one life, all in the same pass - two
/// simultaneous hits cost two lives. Lives hitting zero ends the run on the
/// same tick.
fn resolve_collisions(session: &mut GameSession, events: &mut Vec<SessionEvent>) {
    let player = session.player_box();
    let hits = collision::check_collisions(&player, &session.obstacles, session.viewport_width);
    if hits.is_empty() {
        return;
    }

    for id in hits {
        session.obstacles.retain(|o| o.id != id);
        session.lives = session.lives.saturating_sub(1);
        events.push(SessionEvent::Collision {
            id,
            lives_left: session.lives,
        });
        events.push(SessionEvent::ObstacleRemoved { id });
    }

    if session.lives == 0 {
        end_run(session, events);
    }
}

/// Lives ran out: empty the obstacle collection on the same tick and freeze
/// the score for display.
fn end_run(session: &mut GameSession, events: &mut Vec<SessionEvent>) {
    for obstacle in session.obstacles.drain(..) {
        events.push(SessionEvent::ObstacleRemoved { id: obstacle.id });
    }
    session.phase = GamePhase::GameOver;
    log::info!("game over at score {}", session.score);
    events.push(SessionEvent::GameOver {
        final_score: session.score,
    });
}
