//! Run state and core simulation types
//!
//! Everything the presentation layer may observe about a run lives here.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// One of the three lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Lane offset from center: -1, 0 or 1
    pub fn offset(self) -> i8 {
        match self {
            Lane::Left => -1,
            Lane::Center => 0,
            Lane::Right => 1,
        }
    }

    /// Lane for an offset, clamped to [-1, 1]
    pub fn from_offset(offset: i32) -> Self {
        match offset.clamp(-1, 1) {
            -1 => Lane::Left,
            0 => Lane::Center,
            _ => Lane::Right,
        }
    }

    /// Neighbouring lane to the left (stays put at the edge)
    pub fn shifted_left(self) -> Self {
        Self::from_offset(self.offset() as i32 - 1)
    }

    /// Neighbouring lane to the right (stays put at the edge)
    pub fn shifted_right(self) -> Self {
        Self::from_offset(self.offset() as i32 + 1)
    }
}

/// Player avoidance posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalState {
    #[default]
    Running,
    Jumping,
    Sliding,
}

/// The player character
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub lane: Lane,
    pub vertical: VerticalState,
}

/// Entity identifier, unique across runs of one simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    /// Run generation the entity was spawned in
    pub run: u32,
    /// Spawn sequence within the run (starts at 0)
    pub seq: u32,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Tall wall - jump over it
    Barrier,
    /// Low beam - slide under or jump over it
    Low,
    /// Hole in the track - jump over it
    Pit,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Barrier, ObstacleKind::Low, ObstacleKind::Pit];
}

/// An obstacle on the track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: EntityId,
    pub lane: Lane,
    pub kind: ObstacleKind,
    /// Distance ahead of the player (decreases as it approaches)
    pub distance: f32,
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: EntityId,
    pub lane: Lane,
    pub distance: f32,
    pub collected: bool,
}

/// Final result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub score: u64,
    pub coins: u64,
}

/// Something that happened during a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned(EntityId),
    CoinSpawned(EntityId),
    CoinCollected(EntityId),
    /// Player hit an obstacle; the run is now inactive
    Crashed { obstacle: EntityId, kind: ObstacleKind },
    /// Delayed terminal notification, once per run
    GameOver(RunOutcome),
}

/// Complete state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Run generation (increments on every start)
    pub run: u32,
    pub player: Player,
    pub score: u64,
    pub coins: u64,
    pub speed: f32,
    /// Distance covered this run
    pub distance: f32,
    pub active: bool,
    /// Obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Coins in spawn order
    pub coin_items: Vec<Coin>,
    /// Score and coins frozen at the crash
    pub outcome: Option<RunOutcome>,
    next_seq: u32,
}

impl RunState {
    /// Fresh state for the given run generation
    pub fn new(run: u32, tuning: &Tuning) -> Self {
        Self {
            run,
            player: Player::default(),
            score: 0,
            coins: 0,
            speed: tuning.initial_speed,
            distance: 0.0,
            active: true,
            obstacles: Vec::new(),
            coin_items: Vec::new(),
            outcome: None,
            next_seq: 0,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId {
            run: self.run,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        id
    }

    /// End the run and freeze its outcome. Returns false if already ended.
    pub fn end_run(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.outcome = Some(RunOutcome {
            score: self.score,
            coins: self.coins,
        });
        true
    }
}
