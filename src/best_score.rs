//! Best-score persistence
//!
//! A single integer, persisted to LocalStorage in the browser. The
//! simulation never touches storage; the app layer owns a [`ScoreStore`].

use std::cell::Cell;
use std::rc::Rc;

/// Storage for the best score
pub trait ScoreStore {
    /// Stored best score, 0 if absent or unreadable
    fn read(&self) -> u64;
    /// Replace the stored best score
    fn write(&mut self, score: u64);
}

/// Parse a stored score, ignoring surrounding whitespace
///
/// Stricter than a numeric-prefix parse: `"123abc"` is unreadable and reads as 0.
pub fn parse_score(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// In-memory store (native builds and tests)
///
/// Clones share the same cell so a test can keep a handle after moving the
/// store into an [`App`](crate::App).
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Rc<Cell<u64>>,
    writes: Rc<Cell<u32>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u64) -> Self {
        let store = Self::default();
        store.best.set(best);
        store
    }

    /// Number of writes so far
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn read(&self) -> u64 {
        self.best.get()
    }

    fn write(&mut self, score: u64) {
        self.best.set(score);
        self.writes.set(self.writes.get() + 1);
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScoreStore;

#[cfg(target_arch = "wasm32")]
impl LocalScoreStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "lane_runner_best_score";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalScoreStore {
    fn read(&self) -> u64 {
        if let Some(storage) = Self::storage() {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                match parse_score(&raw) {
                    Some(best) => {
                        log::info!("Loaded best score {}", best);
                        return best;
                    }
                    None => log::warn!("Ignoring unreadable best score {:?}", raw),
                }
            }
        }

        log::info!("No best score found, starting fresh");
        0
    }

    fn write(&mut self, score: u64) {
        if let Some(storage) = Self::storage() {
            match storage.set_item(Self::STORAGE_KEY, &score.to_string()) {
                Ok(()) => log::info!("Best score saved ({})", score),
                Err(e) => log::warn!("Failed to save best score: {:?}", e),
            }
        }
    }
}
