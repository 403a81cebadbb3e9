//! Input normalization
//!
//! Keyboard keys and touch swipes both reduce to a [`Command`]. Commands are
//! queued by the host and applied at the start of the next frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{RunState, VerticalState};
use super::timers::{TimerEvent, TimerQueue};
use crate::tuning::Tuning;

/// Logical player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    ShiftLeft,
    ShiftRight,
    Jump,
    Slide,
}

impl Command {
    /// Map a `KeyboardEvent.key` value to a command
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Command::ShiftLeft),
            "ArrowRight" | "d" | "D" => Some(Command::ShiftRight),
            "ArrowUp" | "w" | "W" | " " => Some(Command::Jump),
            "ArrowDown" | "s" | "S" => Some(Command::Slide),
            _ => None,
        }
    }
}

/// A touch gesture from touchstart to touchend (screen coordinates, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub start: Vec2,
    pub end: Vec2,
}

impl Swipe {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Classify the gesture. The dominant axis decides between lane shift
    /// and jump/slide; displacement must exceed `threshold` on that axis.
    pub fn classify(&self, threshold: f32) -> Option<Command> {
        let delta = self.end - self.start;

        if delta.x.abs() > delta.y.abs() {
            if delta.x > threshold {
                Some(Command::ShiftRight)
            } else if delta.x < -threshold {
                Some(Command::ShiftLeft)
            } else {
                None
            }
        } else if delta.y < -threshold {
            Some(Command::Jump)
        } else if delta.y > threshold {
            Some(Command::Slide)
        } else {
            None
        }
    }
}

/// Apply one command to the run. Returns true if it changed anything.
pub fn apply_command(
    state: &mut RunState,
    timers: &mut TimerQueue,
    tuning: &Tuning,
    command: Command,
    now_ms: f64,
) -> bool {
    if !state.active {
        return false;
    }

    match command {
        Command::ShiftLeft => {
            let lane = state.player.lane.shifted_left();
            let changed = lane != state.player.lane;
            state.player.lane = lane;
            changed
        }
        Command::ShiftRight => {
            let lane = state.player.lane.shifted_right();
            let changed = lane != state.player.lane;
            state.player.lane = lane;
            changed
        }
        Command::Jump => begin_vertical(state, timers, VerticalState::Jumping, tuning.jump_ms, now_ms),
        Command::Slide => begin_vertical(state, timers, VerticalState::Sliding, tuning.slide_ms, now_ms),
    }
}

fn begin_vertical(
    state: &mut RunState,
    timers: &mut TimerQueue,
    vertical: VerticalState,
    duration_ms: f64,
    now_ms: f64,
) -> bool {
    // Already airborne or sliding
    if state.player.vertical != VerticalState::Running {
        return false;
    }
    state.player.vertical = vertical;
    timers.schedule(now_ms, duration_ms, TimerEvent::EndVertical(vertical));
    true
}

/// Timer callback: drop back to running unless the run ended or the
/// posture already changed
pub fn end_vertical(state: &mut RunState, vertical: VerticalState) {
    if state.active && state.player.vertical == vertical {
        state.player.vertical = VerticalState::Running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Lane;
    use proptest::prelude::*;

    fn fresh() -> (RunState, TimerQueue, Tuning) {
        let tuning = Tuning::default();
        (RunState::new(1, &tuning), TimerQueue::new(), tuning)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Command::from_key("ArrowLeft"), Some(Command::ShiftLeft));
        assert_eq!(Command::from_key("ArrowRight"), Some(Command::ShiftRight));
        assert_eq!(Command::from_key("ArrowUp"), Some(Command::Jump));
        assert_eq!(Command::from_key("ArrowDown"), Some(Command::Slide));
        assert_eq!(Command::from_key("Escape"), None);
    }

    #[test]
    fn test_swipe_dominant_axis() {
        let origin = Vec2::new(100.0, 100.0);
        // Mostly horizontal, some vertical drift
        let swipe = Swipe::new(origin, origin + Vec2::new(60.0, -40.0));
        assert_eq!(swipe.classify(30.0), Some(Command::ShiftRight));
        let swipe = Swipe::new(origin, origin + Vec2::new(-60.0, 10.0));
        assert_eq!(swipe.classify(30.0), Some(Command::ShiftLeft));
        // Upward is negative y on screen
        let swipe = Swipe::new(origin, origin + Vec2::new(5.0, -50.0));
        assert_eq!(swipe.classify(30.0), Some(Command::Jump));
        let swipe = Swipe::new(origin, origin + Vec2::new(5.0, 50.0));
        assert_eq!(swipe.classify(30.0), Some(Command::Slide));
    }

    #[test]
    fn test_swipe_diagonal_tie_is_vertical() {
        let origin = Vec2::new(100.0, 100.0);
        let swipe = Swipe::new(origin, origin + Vec2::new(40.0, -40.0));
        assert_eq!(swipe.classify(30.0), Some(Command::Jump));
        let swipe = Swipe::new(origin, origin + Vec2::new(-40.0, 40.0));
        assert_eq!(swipe.classify(30.0), Some(Command::Slide));
    }

    #[test]
    fn test_swipe_threshold_filters_taps() {
        let origin = Vec2::ZERO;
        assert_eq!(Swipe::new(origin, Vec2::new(30.0, 0.0)).classify(30.0), None);
        assert_eq!(Swipe::new(origin, Vec2::new(0.0, -30.0)).classify(30.0), None);
        assert_eq!(Swipe::new(origin, Vec2::new(2.0, 1.0)).classify(30.0), None);
    }

    #[test]
    fn test_jump_ignored_while_sliding() {
        let (mut state, mut timers, tuning) = fresh();
        assert!(apply_command(&mut state, &mut timers, &tuning, Command::Slide, 0.0));
        assert!(!apply_command(&mut state, &mut timers, &tuning, Command::Jump, 10.0));
        assert_eq!(state.player.vertical, VerticalState::Sliding);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn test_reversion_after_duration() {
        let (mut state, mut timers, tuning) = fresh();
        apply_command(&mut state, &mut timers, &tuning, Command::Jump, 1000.0);
        assert!(timers.pop_due(1599.0).is_empty());
        for event in timers.pop_due(1600.0) {
            if let TimerEvent::EndVertical(v) = event {
                end_vertical(&mut state, v);
            }
        }
        assert_eq!(state.player.vertical, VerticalState::Running);
    }

    #[test]
    fn test_reversion_after_run_end_is_noop() {
        let (mut state, mut timers, tuning) = fresh();
        apply_command(&mut state, &mut timers, &tuning, Command::Jump, 0.0);
        state.end_run();
        end_vertical(&mut state, VerticalState::Jumping);
        assert_eq!(state.player.vertical, VerticalState::Jumping);
    }

    #[test]
    fn test_inactive_run_ignores_input() {
        let (mut state, mut timers, tuning) = fresh();
        state.end_run();
        assert!(!apply_command(&mut state, &mut timers, &tuning, Command::ShiftLeft, 0.0));
        assert!(!apply_command(&mut state, &mut timers, &tuning, Command::Jump, 0.0));
        assert_eq!(state.player.lane, Lane::Center);
        assert!(timers.is_empty());
    }

    fn any_command() -> impl Strategy<Value = Command> {
        prop_oneof![
            Just(Command::ShiftLeft),
            Just(Command::ShiftRight),
            Just(Command::Jump),
            Just(Command::Slide),
        ]
    }

    proptest! {
        #[test]
        fn prop_lane_stays_in_range(commands in prop::collection::vec(any_command(), 0..64)) {
            let (mut state, mut timers, tuning) = fresh();
            for (i, command) in commands.into_iter().enumerate() {
                apply_command(&mut state, &mut timers, &tuning, command, i as f64 * 16.0);
                let offset = state.player.lane.offset();
                prop_assert!((-1..=1).contains(&offset));
            }
        }

        #[test]
        fn prop_short_swipes_never_register(dx in -30.0f32..=30.0, dy in -30.0f32..=30.0) {
            let swipe = Swipe::new(Vec2::ZERO, Vec2::new(dx, dy));
            prop_assert_eq!(swipe.classify(30.0), None);
        }
    }
}
