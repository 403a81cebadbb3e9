//! The simulation loop host interface
//!
//! Owns the run state plus everything that must be reset between runs
//! (timers, spawn clock, queued input). The host calls [`Simulation::advance`]
//! once per display refresh with its frame timestamp.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::input::Command;
use super::spawner::Spawner;
use super::state::{GameEvent, RunState};
use super::tick::{TickInput, frame_delta, tick};
use super::timers::TimerQueue;
use crate::tuning::Tuning;

pub struct Simulation {
    tuning: Tuning,
    state: RunState,
    timers: TimerQueue,
    spawner: Spawner,
    rng: Pcg32,
    /// Commands queued since the last frame
    pending: Vec<Command>,
    last_frame_ms: Option<f64>,
    /// Runs started so far (also the current run generation)
    runs: u32,
}

impl Simulation {
    /// Create an idle simulation; call [`Simulation::start`] to begin a run
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        let mut state = RunState::new(0, &tuning);
        state.active = false;
        Self {
            state,
            timers: TimerQueue::new(),
            spawner: Spawner::new(),
            rng: Pcg32::seed_from_u64(seed),
            pending: Vec::new(),
            last_frame_ms: None,
            runs: 0,
            tuning,
        }
    }

    /// Begin a new run, discarding everything from the previous one
    pub fn start(&mut self) {
        self.runs += 1;
        self.state = RunState::new(self.runs, &self.tuning);
        self.timers.reset(self.runs);
        self.spawner = Spawner::new();
        self.pending.clear();
        self.last_frame_ms = None;
        log::info!("Run {} started", self.runs);
    }

    /// Queue a command for the next frame. Ignored while no run is active.
    pub fn push_command(&mut self, command: Command) {
        if self.state.active {
            self.pending.push(command);
        } else {
            log::trace!("Dropping {:?}: run inactive", command);
        }
    }

    /// Run one frame at host time `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let delta = match self.last_frame_ms {
            Some(last) => frame_delta(now_ms - last, &self.tuning),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        let input = TickInput {
            now_ms,
            delta,
            commands: std::mem::take(&mut self.pending),
        };
        tick(
            &mut self.state,
            &mut self.timers,
            &mut self.spawner,
            &mut self.rng,
            &self.tuning,
            &input,
        )
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Number of runs started so far
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Timers still waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}
