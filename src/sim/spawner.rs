//! Obstacle and coin spawning
//!
//! Spawns are rate-limited by wall-clock time, not by run speed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Coin, GameEvent, Lane, Obstacle, ObstacleKind, RunState};
use crate::tuning::Tuning;

/// Outcome of the random draws for one spawn interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpawnRoll {
    pub obstacle: Option<(ObstacleKind, Lane)>,
    pub coin: Option<Lane>,
}

impl SpawnRoll {
    /// Draw obstacle and coin independently
    pub fn roll<R: Rng>(rng: &mut R, tuning: &Tuning) -> Self {
        let obstacle = if rng.random_bool(tuning.obstacle_chance) {
            let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
            let lane = Lane::ALL[rng.random_range(0..Lane::ALL.len())];
            Some((kind, lane))
        } else {
            None
        };

        let coin = if rng.random_bool(tuning.coin_chance) {
            Some(Lane::ALL[rng.random_range(0..Lane::ALL.len())])
        } else {
            None
        };

        Self { obstacle, coin }
    }
}

/// Spawn interval bookkeeping
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Wall-clock time of the last spawn interval (None = never)
    last_spawn_ms: Option<f64>,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if a new interval has started at `now_ms`
    pub fn ready(&self, now_ms: f64, tuning: &Tuning) -> bool {
        match self.last_spawn_ms {
            None => true,
            Some(last) => now_ms - last >= tuning.spawn_interval_ms,
        }
    }

    /// Run one spawn attempt. Draws from `rng` only if the interval elapsed.
    pub fn spawn<R: Rng>(
        &mut self,
        state: &mut RunState,
        rng: &mut R,
        tuning: &Tuning,
        now_ms: f64,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.ready(now_ms, tuning) {
            return;
        }
        self.last_spawn_ms = Some(now_ms);

        let roll = SpawnRoll::roll(rng, tuning);
        place(state, roll, tuning, events);
    }
}

/// Add the rolled entities at the spawn distance
pub fn place(state: &mut RunState, roll: SpawnRoll, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    if let Some((kind, lane)) = roll.obstacle {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane,
            kind,
            distance: tuning.spawn_distance,
        });
        log::trace!("spawn obstacle {:?} {:?} in {:?}", id, kind, lane);
        events.push(GameEvent::ObstacleSpawned(id));
    }

    if let Some(lane) = roll.coin {
        let id = state.next_entity_id();
        state.coin_items.push(Coin {
            id,
            lane,
            distance: tuning.spawn_distance,
            collected: false,
        });
        log::trace!("spawn coin {:?} in {:?}", id, lane);
        events.push(GameEvent::CoinSpawned(id));
    }
}
