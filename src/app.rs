//! Screen flow around the simulation
//!
//! Start screen → Playing → GameOver screen, with restart and menu intents.
//! The app owns the best-score store; the simulation only reports outcomes.

use serde::{Deserialize, Serialize};

use crate::best_score::ScoreStore;
use crate::sim::{Command, GameEvent, RunOutcome, Simulation};
use crate::snapshot::Snapshot;
use crate::tuning::Tuning;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Start,
    Playing,
    GameOver,
}

type GameOverListener = Box<dyn FnMut(u64, u64)>;

pub struct App<S: ScoreStore> {
    screen: Screen,
    sim: Simulation,
    store: S,
    best_score: u64,
    last_outcome: Option<RunOutcome>,
    on_game_over: Option<GameOverListener>,
}

impl<S: ScoreStore> App<S> {
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        let best_score = store.read();
        Self {
            screen: Screen::Start,
            sim: Simulation::new(tuning, seed),
            store,
            best_score,
            last_outcome: None,
            on_game_over: None,
        }
    }

    /// Called with `(score, coins)` once per finished run
    pub fn set_on_game_over(&mut self, listener: impl FnMut(u64, u64) + 'static) {
        self.on_game_over = Some(Box::new(listener));
    }

    /// Start (or restart) a run
    pub fn start(&mut self) {
        self.last_outcome = None;
        self.sim.start();
        self.screen = Screen::Playing;
    }

    /// Back to the start screen (only from GameOver)
    pub fn menu(&mut self) {
        if self.screen == Screen::GameOver {
            self.screen = Screen::Start;
        }
    }

    /// Forward a player command while playing
    pub fn command(&mut self, command: Command) {
        if self.screen == Screen::Playing {
            self.sim.push_command(command);
        }
    }

    /// Run one display frame
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        if self.screen != Screen::Playing {
            return Vec::new();
        }

        let events = self.sim.advance(now_ms);
        for event in &events {
            if let GameEvent::GameOver(outcome) = event {
                self.finish(*outcome);
            }
        }
        events
    }

    fn finish(&mut self, outcome: RunOutcome) {
        if outcome.score > self.best_score {
            log::info!("New best score {} (was {})", outcome.score, self.best_score);
            self.best_score = outcome.score;
            self.store.write(outcome.score);
        }
        self.last_outcome = Some(outcome);
        self.screen = Screen::GameOver;

        if let Some(listener) = self.on_game_over.as_mut() {
            listener(outcome.score, outcome.coins);
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Outcome shown on the GameOver screen
    pub fn last_outcome(&self) -> Option<RunOutcome> {
        self.last_outcome
    }

    /// True if the last run set the best score
    pub fn is_new_high_score(&self) -> bool {
        self.last_outcome
            .is_some_and(|o| o.score > 0 && o.score == self.best_score)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.sim.state())
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn swipe_threshold(&self) -> f32 {
        self.sim.tuning().swipe_threshold
    }
}
