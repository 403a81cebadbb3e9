//! Simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only comes in through frame timestamps
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod input;
pub mod simulation;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{avoids, collect_coins, find_collision, resolve_collisions};
pub use input::{Command, Swipe};
pub use simulation::Simulation;
pub use spawner::{SpawnRoll, Spawner};
pub use state::{
    Coin, EntityId, GameEvent, Lane, Obstacle, ObstacleKind, Player, RunOutcome, RunState,
    VerticalState,
};
pub use tick::{TickInput, frame_delta, tick};
pub use timers::{TimerEvent, TimerQueue};
