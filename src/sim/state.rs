//! Game session state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for a start command
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
}

/// Opaque handle for a live obstacle and its visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u32);

/// A falling obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Horizontal position (percent of playfield width), fixed at spawn
    pub x_percent: f32,
    /// Vertical position (pixels from the top edge), grows as it falls
    pub y_px: f32,
}

impl Obstacle {
    /// Bounding box in pixels, given the playfield width
    pub fn bounding_box(&self, viewport_width: f32) -> Aabb {
        let left = self.x_percent / 100.0 * viewport_width;
        Aabb::new(
            Vec2::new(left, self.y_px),
            Vec2::new(left + OBSTACLE_WIDTH, self.y_px + OBSTACLE_HEIGHT),
        )
    }
}

/// Discrete outcome of a step or command, consumed by the presentation
/// adapter. Continuous state (positions, score text) is synced separately
/// every frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A run began (start or restart)
    Started,
    PauseChanged { paused: bool },
    MuteChanged { muted: bool },
    ObstacleSpawned { id: ObstacleId, x_percent: f32 },
    ObstacleRemoved { id: ObstacleId },
    /// An obstacle hit the player; it has been removed and a life deducted
    Collision { id: ObstacleId, lives_left: u8 },
    SpeedIncreased { game_speed: f32 },
    SpawnIntervalDecreased { interval_ms: f32 },
    GameOver { final_score: u64 },
}

/// Complete session state. Owns the obstacle collection and the difficulty
/// parameters; nothing outside `sim` mutates lives or score.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Horizontal player position (percent of playfield width)
    pub player_position: f32,
    /// Difficulty: fall-speed multiplier
    pub game_speed: f32,
    /// Difficulty: milliseconds between spawns
    pub spawn_interval_ms: f32,
    /// Delta accumulated since the last spawn
    pub spawn_accumulator_ms: f32,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Mute toggle - survives restarts
    pub muted: bool,
    /// Playfield size in pixels, pushed in by the host
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Balance values
    pub tuning: Tuning,
    rng: Pcg32,
    next_id: u32,
}

impl GameSession {
    /// Create a session on the menu screen with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            score: 0,
            lives: tuning.starting_lives,
            player_position: STARTING_PLAYER_POSITION,
            game_speed: STARTING_GAME_SPEED,
            spawn_interval_ms: tuning.spawn_interval_start_ms,
            spawn_accumulator_ms: 0.0,
            obstacles: Vec::new(),
            muted: false,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Update the playfield dimensions (host pushes these at start and on
    /// resize)
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width.max(1.0);
        self.viewport_height = height.max(1.0);
    }

    /// Player bounding box in pixels, anchored near the bottom edge
    pub fn player_box(&self) -> Aabb {
        let left = self.player_position / 100.0 * self.viewport_width;
        let bottom = self.viewport_height - PLAYER_BOTTOM_OFFSET;
        Aabb::new(
            Vec2::new(left, bottom - PLAYER_HEIGHT),
            Vec2::new(left + PLAYER_WIDTH, bottom),
        )
    }

    /// Reset every per-run field to its starting value and enter Playing.
    /// The mute toggle, the RNG stream, and the viewport carry over.
    pub(super) fn reset_run(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.player_position = STARTING_PLAYER_POSITION;
        self.game_speed = STARTING_GAME_SPEED;
        self.spawn_interval_ms = self.tuning.spawn_interval_start_ms;
        self.spawn_accumulator_ms = 0.0;
        self.obstacles.clear();
        self.phase = GamePhase::Playing;
    }

    /// Spawn one obstacle above the playfield at a random horizontal position
    pub(super) fn spawn_obstacle(&mut self) -> (ObstacleId, f32) {
        let x_percent = self.rng.random_range(0.0..SPAWN_MAX_X_PERCENT);
        let id = self.next_obstacle_id();
        self.obstacles.push(Obstacle {
            id,
            x_percent,
            y_px: OBSTACLE_SPAWN_Y,
        });
        (id, x_percent)
    }

    fn next_obstacle_id(&mut self) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_on_menu() {
        let session = GameSession::new(7);
        assert_eq!(session.phase, GamePhase::Menu);
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, STARTING_LIVES);
        assert_eq!(session.player_position, STARTING_PLAYER_POSITION);
        assert!(session.obstacles.is_empty());
        assert!(!session.muted);
    }

    #[test]
    fn test_player_box_geometry() {
        let mut session = GameSession::new(7);
        session.set_viewport(1000.0, 800.0);
        session.player_position = 50.0;

        let hit = session.player_box();
        assert_eq!(hit.min.x, 500.0);
        assert_eq!(hit.max.x, 500.0 + PLAYER_WIDTH);
        assert_eq!(hit.max.y, 800.0 - PLAYER_BOTTOM_OFFSET);
        assert_eq!(hit.min.y, hit.max.y - PLAYER_HEIGHT);
    }

    #[test]
    fn test_obstacle_box_geometry() {
        let obstacle = Obstacle {
            id: ObstacleId(1),
            x_percent: 10.0,
            y_px: 40.0,
        };
        let hit = obstacle.bounding_box(1000.0);
        assert_eq!(hit.min, Vec2::new(100.0, 40.0));
        assert_eq!(
            hit.max,
            Vec2::new(100.0 + OBSTACLE_WIDTH, 40.0 + OBSTACLE_HEIGHT)
        );
    }

    #[test]
    fn test_spawn_positions_within_range() {
        let mut session = GameSession::new(42);
        for _ in 0..200 {
            let (_, x) = session.spawn_obstacle();
            assert!((0.0..SPAWN_MAX_X_PERCENT).contains(&x));
        }
    }

    #[test]
    fn test_spawned_ids_are_unique() {
        let mut session = GameSession::new(42);
        let (first, _) = session.spawn_obstacle();
        let (second, _) = session.spawn_obstacle();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameSession::new(99999);
        let mut b = GameSession::new(99999);
        for _ in 0..50 {
            assert_eq!(a.spawn_obstacle().1, b.spawn_obstacle().1);
        }
    }
}
