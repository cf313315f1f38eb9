//! Meteor Dodge - a falling-obstacle dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, game state)
//! - `clock`: Frame clock with pause/resume delta bookkeeping
//! - `presentation`: Capability interface the simulation drives
//! - `dom`: Browser DOM/audio presentation (wasm32 only)
//! - `tuning`: Data-driven game balance

pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod presentation;
pub mod sim;
pub mod tuning;

pub use clock::FrameClock;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Lives at the start of a run
    pub const STARTING_LIVES: u8 = 3;
    /// Player spawn position (percent of playfield width)
    pub const STARTING_PLAYER_POSITION: f32 = 50.0;
    /// Horizontal movement per command (percent)
    pub const PLAYER_MOVE_STEP: f32 = 5.0;
    /// Player position clamp range
    pub const PLAYER_MIN_POSITION: f32 = 0.0;
    pub const PLAYER_MAX_POSITION: f32 = 100.0;

    /// Base fall rate (pixels per millisecond at speed 1.0)
    pub const BASE_FALL_RATE: f32 = 0.2;
    /// Speed multiplier at the start of a run
    pub const STARTING_GAME_SPEED: f32 = 1.0;
    /// Speed multiplier gain per difficulty step
    pub const SPEED_INCREMENT: f32 = 0.1;
    /// Score between speed steps
    pub const SPEED_SCORE_INTERVAL: u64 = 500;

    /// Spawn interval at the start of a run
    pub const SPAWN_INTERVAL_START_MS: f32 = 1500.0;
    /// Spawn interval never drops below this
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 500.0;
    /// Spawn interval reduction per difficulty step
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 100.0;
    /// Score between spawn-interval steps
    pub const INTERVAL_SCORE_INTERVAL: u64 = 1000;

    /// Obstacles spawn anywhere in [0, this) percent
    pub const SPAWN_MAX_X_PERCENT: f32 = 90.0;
    /// Spawn height - obstacles start fully above the playfield
    pub const OBSTACLE_SPAWN_Y: f32 = -50.0;
    /// Obstacle sprite size (pixels)
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 50.0;

    /// Player sprite size (pixels)
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Gap between the player sprite and the bottom edge (pixels)
    pub const PLAYER_BOTTOM_OFFSET: f32 = 20.0;

    /// Viewport fallback until the host reports a size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;

    /// Background music volume
    pub const MUSIC_VOLUME: f32 = 0.6;
    /// Music volume while ducked after a collision
    pub const DUCK_VOLUME: f32 = 0.2;
    /// Delay before a ducked volume restores (milliseconds)
    pub const DUCK_RESTORE_DELAY_MS: i32 = 1000;
}
