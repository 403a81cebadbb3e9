//! Deferred events tied to a run
//!
//! Jump/slide reversion and the game-over notification are scheduled here
//! instead of as free-running callbacks. Every entry carries the run
//! generation it was scheduled in; resetting the queue for a new run drops
//! everything older.

use serde::{Deserialize, Serialize};

use super::state::VerticalState;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Return to running if still in the given state
    EndVertical(VerticalState),
    /// Emit the terminal notification
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    run: u32,
    due_ms: f64,
    event: TimerEvent,
}

/// Pending timers for the current run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerQueue {
    run: u32,
    next_seq: u64,
    pending: Vec<Scheduled>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every pending timer and adopt a new run generation
    pub fn reset(&mut self, run: u32) {
        if !self.pending.is_empty() {
            log::debug!("Discarding {} timers from run {}", self.pending.len(), self.run);
        }
        self.pending.clear();
        self.run = run;
    }

    /// Schedule `event` to fire `delay_ms` after `now_ms`
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, event: TimerEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            seq,
            run: self.run,
            due_ms: now_ms + delay_ms.max(0.0),
            event,
        });
    }

    /// Cancel every timer whose event matches
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&TimerEvent) -> bool) {
        self.pending.retain(|t| !pred(&t.event));
    }

    /// Remove and return the events due at `now_ms`, earliest first
    pub fn pop_due(&mut self, now_ms: f64) -> Vec<TimerEvent> {
        let run = self.run;
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|t| {
            if t.due_ms <= now_ms {
                if t.run == run {
                    due.push(t.clone());
                }
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| {
            a.due_ms
                .partial_cmp(&b.due_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.seq.cmp(&b.seq))
        });
        due.into_iter().map(|t| t.event).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
