//! Per-frame simulation step
//!
//! Advances one run by a frame-rate-independent delta measured in nominal
//! frames (one nominal frame is `Tuning::frame_ms`).

use rand::Rng;

use super::collision::{collect_coins, resolve_collisions};
use super::input::{Command, apply_command, end_vertical};
use super::spawner::Spawner;
use super::state::{GameEvent, RunState};
use super::timers::{TimerEvent, TimerQueue};
use crate::tuning::Tuning;

/// Everything a single frame consumes
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Host timestamp of this frame (ms)
    pub now_ms: f64,
    /// Scaled, clamped delta in nominal frames
    pub delta: f32,
    /// Commands queued since the previous frame, oldest first
    pub commands: Vec<Command>,
}

/// Convert wall-clock elapsed time into a clamped frame delta
pub fn frame_delta(elapsed_ms: f64, tuning: &Tuning) -> f32 {
    let delta = (elapsed_ms / tuning.frame_ms) as f32;
    if delta.is_nan() {
        return 0.0;
    }
    delta.clamp(0.0, tuning.max_frame_delta)
}

/// Advance the run by one frame
pub fn tick<R: Rng>(
    state: &mut RunState,
    timers: &mut TimerQueue,
    spawner: &mut Spawner,
    rng: &mut R,
    tuning: &Tuning,
    input: &TickInput,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let now = input.now_ms;

    for timer in timers.pop_due(now) {
        match timer {
            TimerEvent::EndVertical(vertical) => end_vertical(state, vertical),
            TimerEvent::GameOver => {
                if let Some(outcome) = state.outcome {
                    log::info!("Game over: score {}, coins {}", outcome.score, outcome.coins);
                    events.push(GameEvent::GameOver(outcome));
                }
            }
        }
    }

    // Frozen after the crash; only the game-over timer above may still fire
    if !state.active {
        return events;
    }

    // Last input wins within the frame
    for &command in &input.commands {
        apply_command(state, timers, tuning, command, now);
    }

    let delta = input.delta;
    let speed = state.speed;

    // Distance and score
    state.distance += speed * delta;
    state.score += (speed * delta * tuning.score_rate).floor() as u64;

    // Speed ramp
    state.speed = (speed + tuning.speed_ramp * delta).min(tuning.max_speed).max(speed);

    spawner.spawn(state, rng, tuning, now, &mut events);

    // Move entities toward the player and cull what passed behind
    let step = speed * delta * tuning.track_scale;
    let cull = tuning.cull_distance;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.distance -= step;
    }
    state.obstacles.retain(|o| o.distance > cull);

    // Coins collected last frame leave now
    state.coin_items.retain(|c| !c.collected);
    for coin in state.coin_items.iter_mut() {
        coin.distance -= step;
    }
    state.coin_items.retain(|c| c.distance > cull);

    if resolve_collisions(state, tuning, step, &mut events) {
        timers.cancel_where(|e| matches!(e, TimerEvent::EndVertical(_)));
        timers.schedule(now, tuning.game_over_delay_ms, TimerEvent::GameOver);
        return events;
    }

    collect_coins(state, tuning, step, &mut events);

    events
}
