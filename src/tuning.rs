//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance can be changed without a
//! rebuild. Overrides are persisted in LocalStorage as partial JSON.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A distance range along the track, exclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub near: f32,
    pub far: f32,
}

impl Band {
    pub const fn new(near: f32, far: f32) -> Self {
        Self { near, far }
    }

    /// True if `distance` lies strictly between `near` and `far`
    #[inline]
    pub fn contains(&self, distance: f32) -> bool {
        distance > self.near && distance < self.far
    }

    /// True if an entity that moved from `from` to `to` this frame is inside
    /// the band now, or jumped clean over it
    #[inline]
    pub fn swept(&self, from: f32, to: f32) -> bool {
        self.contains(to) || (from >= self.far && to <= self.near)
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Frame timing ===
    /// Milliseconds per nominal frame
    pub frame_ms: f64,
    /// Per-frame delta cap, in nominal frames
    pub max_frame_delta: f32,

    // === Progression ===
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_ramp: f32,
    pub score_rate: f32,
    pub track_scale: f32,

    // === Track ===
    pub spawn_distance: f32,
    pub cull_distance: f32,

    // === Spawning ===
    pub spawn_interval_ms: f64,
    pub obstacle_chance: f64,
    pub coin_chance: f64,

    // === Collisions ===
    /// Obstacles in this band can hit the player
    pub hit_zone: Band,
    /// Coins in this band are collected
    pub capture_band: Band,

    // === Player ===
    pub jump_ms: f64,
    pub slide_ms: f64,
    pub game_over_delay_ms: f64,
    pub swipe_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_MS,
            max_frame_delta: MAX_FRAME_DELTA,

            initial_speed: INITIAL_SPEED,
            max_speed: MAX_SPEED,
            speed_ramp: SPEED_RAMP,
            score_rate: SCORE_RATE,
            track_scale: TRACK_SCALE,

            spawn_distance: SPAWN_DISTANCE,
            cull_distance: CULL_DISTANCE,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            obstacle_chance: OBSTACLE_CHANCE,
            coin_chance: COIN_CHANCE,

            hit_zone: Band::new(HIT_ZONE_NEAR, HIT_ZONE_FAR),
            capture_band: Band::new(CAPTURE_BAND_NEAR, CAPTURE_BAND_FAR),

            jump_ms: JUMP_MS,
            slide_ms: SLIDE_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Repair values that would break simulation invariants
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        if !(self.frame_ms > 0.0) {
            log::warn!("tuning: frame_ms {} invalid, using default", self.frame_ms);
            self.frame_ms = defaults.frame_ms;
        }
        if !(self.max_frame_delta > 0.0) {
            log::warn!("tuning: max_frame_delta {} invalid, using default", self.max_frame_delta);
            self.max_frame_delta = defaults.max_frame_delta;
        }
        if !(self.initial_speed >= 0.0) {
            self.initial_speed = defaults.initial_speed;
        }
        if !(self.max_speed >= self.initial_speed) {
            log::warn!(
                "tuning: max_speed {} below initial_speed {}, clamping",
                self.max_speed,
                self.initial_speed
            );
            self.max_speed = self.initial_speed;
        }
        // Speed must never decrease
        if !(self.speed_ramp >= 0.0) {
            self.speed_ramp = 0.0;
        }
        self.obstacle_chance = clamp_probability(self.obstacle_chance);
        self.coin_chance = clamp_probability(self.coin_chance);
        if !(self.spawn_interval_ms >= 0.0) {
            self.spawn_interval_ms = defaults.spawn_interval_ms;
        }
        if !(self.cull_distance < self.spawn_distance) {
            log::warn!("tuning: cull distance must be behind spawn distance, using defaults");
            self.spawn_distance = defaults.spawn_distance;
            self.cull_distance = defaults.cull_distance;
        }
        if !(self.hit_zone.near < self.hit_zone.far) {
            log::warn!("tuning: hit_zone {:?} is empty, using default", self.hit_zone);
            self.hit_zone = defaults.hit_zone;
        }
        if !(self.capture_band.near < self.capture_band.far) {
            log::warn!("tuning: capture_band {:?} is empty, using default", self.capture_band);
            self.capture_band = defaults.capture_band;
        }

        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "lane_runner_tuning";

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring malformed tuning overrides: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_is_exclusive() {
        let band = Band::new(20.0, 80.0);
        assert!(!band.contains(20.0));
        assert!(band.contains(20.5));
        assert!(band.contains(79.9));
        assert!(!band.contains(80.0));
    }

    #[test]
    fn test_band_sweep() {
        let band = Band::new(20.0, 80.0);
        // Ended inside
        assert!(band.swept(100.0, 50.0));
        // Jumped clean over
        assert!(band.swept(90.0, -10.0));
        assert!(band.swept(80.0, 20.0));
        // Started inside and left: already checked last frame
        assert!(!band.swept(50.0, -10.0));
        // Not there yet
        assert!(!band.swept(200.0, 100.0));
    }

    #[test]
    fn test_sanitize_repairs_empty_bands() {
        let tuning = Tuning {
            hit_zone: Band::new(80.0, 20.0),
            capture_band: Band::new(50.0, 50.0),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.hit_zone, Tuning::default().hit_zone);
        assert_eq!(tuning.capture_band, Tuning::default().capture_band);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_speed": 30.0 }"#).unwrap();
        assert_eq!(tuning.max_speed, 30.0);
        assert_eq!(tuning.initial_speed, INITIAL_SPEED);
        assert_eq!(tuning.hit_zone, Band::new(HIT_ZONE_NEAR, HIT_ZONE_FAR));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_sanitize_repairs_speed_range() {
        let tuning = Tuning {
            initial_speed: 20.0,
            max_speed: 10.0,
            speed_ramp: -1.0,
            coin_chance: 3.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(tuning.max_speed, 20.0);
        assert_eq!(tuning.speed_ramp, 0.0);
        assert_eq!(tuning.coin_chance, 1.0);
    }

    #[test]
    fn test_defaults_survive_sanitize() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }
}
