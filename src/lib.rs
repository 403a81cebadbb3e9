//! Lane Runner - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Simulation loop (movement, spawning, collisions, timers)
//! - `app`: Screen flow (start, playing, game over) around the simulation
//! - `snapshot`: Read-only view handed to the presentation layer
//! - `best_score`: Best-score persistence
//! - `tuning`: Data-driven game balance

pub mod app;
pub mod best_score;
pub mod sim;
pub mod snapshot;
pub mod tuning;

pub use app::{App, Screen};
pub use best_score::{MemoryScoreStore, ScoreStore};
pub use snapshot::Snapshot;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal frame length in milliseconds (delta 1.0 == one frame)
    pub const FRAME_MS: f64 = 16.0;
    /// Largest delta a single frame may advance, in nominal frames
    pub const MAX_FRAME_DELTA: f32 = 2.0;

    /// Run speed
    pub const INITIAL_SPEED: f32 = 12.0;
    pub const MAX_SPEED: f32 = 25.0;
    /// Speed gained per nominal frame
    pub const SPEED_RAMP: f32 = 0.001;
    /// Score gained per unit of distance (floored per frame)
    pub const SCORE_RATE: f32 = 0.1;
    /// Track units an entity moves per unit of run distance
    pub const TRACK_SCALE: f32 = 2.0;

    /// Track geometry (distance along the track, player at 0)
    pub const TRACK_LENGTH: f32 = 2000.0;
    pub const SPAWN_DISTANCE: f32 = 1800.0;
    pub const CULL_DISTANCE: f32 = -100.0;

    /// Spawning
    pub const SPAWN_INTERVAL_MS: f64 = 800.0;
    pub const OBSTACLE_CHANCE: f64 = 0.7;
    pub const COIN_CHANCE: f64 = 0.6;

    /// Collision bands (exclusive on both ends)
    pub const HIT_ZONE_NEAR: f32 = 20.0;
    pub const HIT_ZONE_FAR: f32 = 80.0;
    pub const CAPTURE_BAND_NEAR: f32 = 20.0;
    pub const CAPTURE_BAND_FAR: f32 = 100.0;

    /// Vertical state durations
    pub const JUMP_MS: f64 = 600.0;
    pub const SLIDE_MS: f64 = 500.0;
    /// Delay between the crash and the game-over notification
    pub const GAME_OVER_DELAY_MS: f64 = 500.0;

    /// Minimum swipe displacement (CSS pixels)
    pub const SWIPE_THRESHOLD: f32 = 30.0;

    /// Presentation: horizontal distance between lane centers
    pub const LANE_WIDTH: f32 = 80.0;
}
