//! Presentation snapshot
//!
//! A read-only copy of what the renderer needs for one frame, with the
//! perspective math already applied. Serializable so it can cross into JS.

use serde::{Deserialize, Serialize};

use crate::consts::{LANE_WIDTH, TRACK_LENGTH};
use crate::sim::{Coin, EntityId, Lane, Obstacle, ObstacleKind, RunState, VerticalState};

/// Perspective scale for an entity at `distance`
pub fn depth_scale(distance: f32) -> f32 {
    (1.0 - distance / TRACK_LENGTH).max(0.1)
}

/// Fade-in opacity for an entity at `distance`
pub fn depth_opacity(distance: f32) -> f32 {
    ((TRACK_LENGTH - distance) / 500.0).clamp(0.0, 1.0)
}

/// Horizontal offset of a lane center from the track center (pixels)
pub fn lane_x(lane: Lane) -> f32 {
    lane.offset() as f32 * LANE_WIDTH
}

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Obstacle(ObstacleKind),
    Coin,
}

/// One entity placed on screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: EntityId,
    pub kind: SpriteKind,
    pub x: f32,
    pub distance: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Sprite {
    fn obstacle(o: &Obstacle) -> Self {
        Self {
            id: o.id,
            kind: SpriteKind::Obstacle(o.kind),
            x: lane_x(o.lane),
            distance: o.distance,
            scale: depth_scale(o.distance),
            opacity: depth_opacity(o.distance),
        }
    }

    fn coin(c: &Coin) -> Self {
        Self {
            id: c.id,
            kind: SpriteKind::Coin,
            x: lane_x(c.lane),
            distance: c.distance,
            scale: depth_scale(c.distance),
            // Collected coins fade out until removed
            opacity: if c.collected { 0.0 } else { depth_opacity(c.distance) },
        }
    }
}

/// Frame view of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub lane: i8,
    pub player_x: f32,
    pub vertical: VerticalState,
    pub score: u64,
    pub coins: u64,
    /// Speed as shown on the HUD
    pub speed_kmh: u32,
    pub active: bool,
    /// Obstacles then coins, each in spawn order
    pub sprites: Vec<Sprite>,
}

impl Snapshot {
    pub fn capture(state: &RunState) -> Self {
        let sprites = state
            .obstacles
            .iter()
            .map(Sprite::obstacle)
            .chain(state.coin_items.iter().map(Sprite::coin))
            .collect();

        Self {
            lane: state.player.lane.offset(),
            player_x: lane_x(state.player.lane),
            vertical: state.player.vertical,
            score: state.score,
            coins: state.coins,
            speed_kmh: (state.speed * 10.0).floor() as u32,
            active: state.active,
            sprites,
        }
    }

    /// JSON form for the JS side
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_depth_math() {
        assert_eq!(depth_scale(0.0), 1.0);
        assert_eq!(depth_scale(1000.0), 0.5);
        assert_eq!(depth_scale(1990.0), 0.1);
        assert_eq!(depth_opacity(1800.0), 0.4);
        assert_eq!(depth_opacity(100.0), 1.0);
        assert_eq!(depth_opacity(2100.0), 0.0);
    }

    #[test]
    fn test_capture() {
        let tuning = Tuning::default();
        let mut state = RunState::new(1, &tuning);
        state.player.lane = Lane::Right;
        state.score = 77;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane: Lane::Left,
            kind: ObstacleKind::Low,
            distance: 1000.0,
        });
        let id = state.next_entity_id();
        state.coin_items.push(Coin {
            id,
            lane: Lane::Center,
            distance: 50.0,
            collected: true,
        });

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.lane, 1);
        assert_eq!(snap.player_x, 80.0);
        assert_eq!(snap.score, 77);
        assert_eq!(snap.speed_kmh, 120);
        assert_eq!(snap.sprites.len(), 2);
        assert_eq!(snap.sprites[0].x, -80.0);
        assert_eq!(snap.sprites[0].kind, SpriteKind::Obstacle(ObstacleKind::Low));
        assert_eq!(snap.sprites[1].opacity, 0.0);
        assert!(snap.to_json().unwrap().contains("\"score\":77"));
    }
}
