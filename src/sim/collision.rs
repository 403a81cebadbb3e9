//! Collision and coin collection
//!
//! Both checks are lane-based: an entity interacts with the player only when
//! it shares the player's lane and sits inside the relevant distance band.
//! `step` is how far entities moved this frame, so an entity that crossed a
//! whole band in one frame still counts.

use super::state::{EntityId, GameEvent, ObstacleKind, RunState, VerticalState};
use crate::tuning::Tuning;

/// Can the player's posture clear this obstacle?
pub fn avoids(kind: ObstacleKind, vertical: VerticalState) -> bool {
    match kind {
        ObstacleKind::Barrier => vertical == VerticalState::Jumping,
        ObstacleKind::Low => matches!(vertical, VerticalState::Jumping | VerticalState::Sliding),
        ObstacleKind::Pit => vertical == VerticalState::Jumping,
    }
}

/// First obstacle in the hit zone that the player fails to avoid
pub fn find_collision(
    state: &RunState,
    tuning: &Tuning,
    step: f32,
) -> Option<(EntityId, ObstacleKind)> {
    let player = &state.player;
    state
        .obstacles
        .iter()
        .filter(|o| o.lane == player.lane && tuning.hit_zone.swept(o.distance + step, o.distance))
        .find(|o| !avoids(o.kind, player.vertical))
        .map(|o| (o.id, o.kind))
}

/// End the run if the player hit something. Returns true on a crash.
pub fn resolve_collisions(
    state: &mut RunState,
    tuning: &Tuning,
    step: f32,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !state.active {
        return false;
    }
    match find_collision(state, tuning, step) {
        Some((obstacle, kind)) => {
            state.end_run();
            log::info!(
                "Crashed into {:?} in lane {} at score {}",
                kind,
                state.player.lane.offset(),
                state.score
            );
            events.push(GameEvent::Crashed { obstacle, kind });
            true
        }
        None => false,
    }
}

/// Mark coins in the capture band as collected. Returns the number taken.
pub fn collect_coins(
    state: &mut RunState,
    tuning: &Tuning,
    step: f32,
    events: &mut Vec<GameEvent>,
) -> u32 {
    if !state.active {
        return 0;
    }
    let lane = state.player.lane;
    let mut taken = 0;
    for coin in state.coin_items.iter_mut() {
        if coin.collected
            || coin.lane != lane
            || !tuning.capture_band.swept(coin.distance + step, coin.distance)
        {
            continue;
        }
        coin.collected = true;
        taken += 1;
        events.push(GameEvent::CoinCollected(coin.id));
    }
    state.coins += taken as u64;
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Lane, Obstacle};

    fn with_obstacle(kind: ObstacleKind, lane: Lane, distance: f32) -> RunState {
        let tuning = Tuning::default();
        let mut state = RunState::new(1, &tuning);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            lane,
            kind,
            distance,
        });
        state
    }

    #[test]
    fn test_avoidance_table() {
        use ObstacleKind::*;
        use VerticalState::*;
        let table = [
            (Barrier, Running, false),
            (Barrier, Jumping, true),
            (Barrier, Sliding, false),
            (Low, Running, false),
            (Low, Sliding, true),
            (Low, Jumping, true),
            (Pit, Running, false),
            (Pit, Jumping, true),
            (Pit, Sliding, false),
        ];
        for (kind, vertical, expected) in table {
            assert_eq!(avoids(kind, vertical), expected, "{:?} while {:?}", kind, vertical);
        }
    }

    #[test]
    fn test_crash_in_hit_zone() {
        let tuning = Tuning::default();
        let mut state = with_obstacle(ObstacleKind::Barrier, Lane::Center, 50.0);
        let mut events = Vec::new();
        assert!(resolve_collisions(&mut state, &tuning, 0.0, &mut events));
        assert!(!state.active);
        assert!(matches!(events[0], GameEvent::Crashed { kind: ObstacleKind::Barrier, .. }));
    }

    #[test]
    fn test_other_lane_is_safe() {
        let tuning = Tuning::default();
        let mut state = with_obstacle(ObstacleKind::Barrier, Lane::Left, 50.0);
        assert!(!resolve_collisions(&mut state, &tuning, 0.0, &mut Vec::new()));
        assert!(state.active);
    }

    #[test]
    fn test_outside_hit_zone_is_safe() {
        let tuning = Tuning::default();
        for distance in [20.0, 80.0, 150.0, -10.0] {
            let mut state = with_obstacle(ObstacleKind::Pit, Lane::Center, distance);
            assert!(!resolve_collisions(&mut state, &tuning, 0.0, &mut Vec::new()), "at {}", distance);
        }
    }

    #[test]
    fn test_first_unavoided_obstacle_ends_run() {
        let tuning = Tuning::default();
        let mut state = with_obstacle(ObstacleKind::Low, Lane::Center, 40.0);
        let pit = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id: pit,
            lane: Lane::Center,
            kind: ObstacleKind::Pit,
            distance: 60.0,
        });
        state.player.vertical = VerticalState::Sliding;

        let mut events = Vec::new();
        assert!(resolve_collisions(&mut state, &tuning, 0.0, &mut events));
        assert_eq!(
            events,
            vec![GameEvent::Crashed {
                obstacle: pit,
                kind: ObstacleKind::Pit
            }]
        );
    }

    #[test]
    fn test_coin_collected_once() {
        let tuning = Tuning::default();
        let mut state = RunState::new(1, &tuning);
        let id = state.next_entity_id();
        state.coin_items.push(Coin {
            id,
            lane: Lane::Center,
            distance: 90.0,
            collected: false,
        });

        let mut events = Vec::new();
        assert_eq!(collect_coins(&mut state, &tuning, 0.0, &mut events), 1);
        // Still inside the band on the next frame
        state.coin_items[0].distance = 60.0;
        assert_eq!(collect_coins(&mut state, &tuning, 0.0, &mut events), 0);
        assert_eq!(state.coins, 1);
        assert_eq!(events, vec![GameEvent::CoinCollected(id)]);
    }

    #[test]
    fn test_obstacle_crossing_whole_zone_still_hits() {
        let tuning = Tuning::default();
        // Was at 90, now at -10 after a 100 unit step
        let mut state = with_obstacle(ObstacleKind::Barrier, Lane::Center, -10.0);
        assert!(resolve_collisions(&mut state, &tuning, 100.0, &mut Vec::new()));

        // Already past the zone before this frame
        let mut state = with_obstacle(ObstacleKind::Barrier, Lane::Center, -10.0);
        assert!(!resolve_collisions(&mut state, &tuning, 25.0, &mut Vec::new()));

        // Jumping clears it either way
        let mut state = with_obstacle(ObstacleKind::Barrier, Lane::Center, -10.0);
        state.player.vertical = VerticalState::Jumping;
        assert!(!resolve_collisions(&mut state, &tuning, 100.0, &mut Vec::new()));
    }

    #[test]
    fn test_coin_crossing_whole_band_is_collected() {
        let tuning = Tuning::default();
        let mut state = RunState::new(1, &tuning);
        let id = state.next_entity_id();
        state.coin_items.push(Coin {
            id,
            lane: Lane::Center,
            distance: 10.0,
            collected: false,
        });
        assert_eq!(collect_coins(&mut state, &tuning, 100.0, &mut Vec::new()), 1);
        assert!(state.coin_items[0].collected);
    }
}
