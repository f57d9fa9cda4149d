//! Game balance and tuning
//!
//! Every constant the simulation uses lives here so the two classic tuning
//! variants (and anything a player saves) are just data. Persisted in
//! LocalStorage on the web.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    #[default]
    Classic,
    Relaxed,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "Classic",
            Preset::Relaxed => "Relaxed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Preset::Classic),
            "relaxed" | "easy" => Some(Preset::Relaxed),
            _ => None,
        }
    }

    /// Pick the preset out of a URL query such as `?preset=relaxed&x=1`
    pub fn from_query(query: &str) -> Option<Self> {
        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "preset")
            .and_then(|(_, value)| Self::from_str(value))
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Outcome ===
    /// Score that wins the round
    pub target_score: i64,
    /// Score at or below which the round is lost
    pub lose_threshold: i64,
    /// Delay between the winning tap and the win screen (seconds)
    pub win_settle_secs: f32,

    // === Cadence ===
    /// Seconds between spawns
    pub spawn_interval_secs: f32,
    /// Simulation ticks per second
    pub tick_rate_hz: f32,

    // === Falling entities ===
    /// Initial baseline fall speed (field units per tick)
    pub base_speed: f32,
    /// Baseline speed added every tick
    pub speed_increment: f32,
    /// Largest random bonus added on top of the baseline at spawn
    pub speed_bonus_max: f32,
    /// Chance that a spawn is a heart (the rest are bombs)
    pub heart_probability: f64,
    pub size_min: f32,
    pub size_max: f32,
    /// Spin is drawn from [-max, max] radians per tick
    pub rotation_speed_max: f32,
    /// Heart pulse phase advance per tick (radians)
    pub pulse_speed: f32,
    /// Heart scale oscillation amplitude
    pub pulse_amplitude: f32,

    // === Scoring ===
    pub heart_points: i64,
    pub bomb_points: i64,

    // === Hit testing ===
    /// Flat tolerance added to every entity's visual radius
    pub hit_margin: f32,
    /// Extra tolerance per unit of fall speed
    pub hit_speed_factor: f32,
    /// Cap on the speed-based tolerance
    pub hit_speed_cap: f32,

    // === Particles ===
    pub burst_size: usize,
    /// Burst velocity is drawn from [-speed, speed] per axis
    pub burst_speed: f32,
    pub particle_lifetime_ticks: i32,
    pub particle_size_min: f32,
    pub particle_size_max: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: 500,
            lose_threshold: -100,
            win_settle_secs: 1.5,

            spawn_interval_secs: 1.0,
            tick_rate_hz: 60.0,

            base_speed: 1.2,
            speed_increment: 0.001,
            speed_bonus_max: 0.3,
            heart_probability: 0.7,
            size_min: 50.0,
            size_max: 60.0,
            rotation_speed_max: 0.01,
            pulse_speed: 0.02,
            pulse_amplitude: 0.08,

            heart_points: 10,
            bomb_points: -20,

            hit_margin: 10.0,
            hit_speed_factor: 2.0,
            hit_speed_cap: 12.0,

            burst_size: 8,
            burst_speed: 3.0,
            particle_lifetime_ticks: 25,
            particle_size_min: 1.0,
            particle_size_max: 4.0,
        }
    }
}

impl GameConfig {
    /// Create a config from a tuning preset
    pub fn from_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a tuning preset (updates difficulty-dependent values)
    pub fn apply_preset(&mut self, preset: Preset) {
        let defaults = Self::default();
        match preset {
            Preset::Classic => {
                self.target_score = defaults.target_score;
                self.base_speed = defaults.base_speed;
                self.hit_margin = defaults.hit_margin;
            }
            Preset::Relaxed => {
                self.target_score = 300;
                self.base_speed = 1.0;
                self.hit_margin = 16.0;
            }
        }
    }

    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Seconds per simulation tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> GameError {
            GameError::InvalidConfig {
                field,
                reason: reason.into(),
            }
        }

        let floats = [
            ("win_settle_secs", self.win_settle_secs),
            ("base_speed", self.base_speed),
            ("speed_increment", self.speed_increment),
            ("speed_bonus_max", self.speed_bonus_max),
            ("size_min", self.size_min),
            ("size_max", self.size_max),
            ("rotation_speed_max", self.rotation_speed_max),
            ("pulse_speed", self.pulse_speed),
            ("pulse_amplitude", self.pulse_amplitude),
            ("hit_margin", self.hit_margin),
            ("hit_speed_factor", self.hit_speed_factor),
            ("hit_speed_cap", self.hit_speed_cap),
            ("burst_speed", self.burst_speed),
            ("particle_size_min", self.particle_size_min),
            ("particle_size_max", self.particle_size_max),
        ];
        if let Some((field, _)) = floats.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(*field, "must be a finite number"));
        }

        if self.target_score <= 0 {
            return Err(invalid("target_score", "must be positive"));
        }
        if self.lose_threshold >= 0 {
            return Err(invalid("lose_threshold", "must be below zero"));
        }
        if !(self.spawn_interval_secs > 0.0 && self.spawn_interval_secs.is_finite()) {
            return Err(invalid("spawn_interval_secs", "must be a positive number"));
        }
        if !(self.tick_rate_hz > 0.0 && self.tick_rate_hz.is_finite()) {
            return Err(invalid("tick_rate_hz", "must be a positive number"));
        }
        if !(self.win_settle_secs >= 0.0) {
            return Err(invalid("win_settle_secs", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.heart_probability) {
            return Err(invalid("heart_probability", "must be within [0, 1]"));
        }
        if !(self.size_min > 0.0 && self.size_min <= self.size_max) {
            return Err(invalid(
                "size_min",
                format!("need 0 < size_min <= size_max, got {}..{}", self.size_min, self.size_max),
            ));
        }
        if !(self.base_speed >= 0.0) {
            return Err(invalid("base_speed", "must not be negative"));
        }
        if !(self.speed_increment >= 0.0) {
            return Err(invalid("speed_increment", "must not be negative"));
        }
        if !(self.speed_bonus_max >= 0.0) {
            return Err(invalid("speed_bonus_max", "must not be negative"));
        }
        if !(self.hit_margin >= 0.0 && self.hit_speed_factor >= 0.0 && self.hit_speed_cap >= 0.0) {
            return Err(invalid("hit_margin", "hit radius terms must not be negative"));
        }
        if self.particle_lifetime_ticks <= 0 {
            return Err(invalid("particle_lifetime_ticks", "must be positive"));
        }
        if !(self.particle_size_min > 0.0 && self.particle_size_min <= self.particle_size_max) {
            return Err(invalid("particle_size_min", "need 0 < min <= max"));
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "heart_catcher_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("No LocalStorage, config not saved");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => match storage.set_item(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Config saved"),
                Err(e) => log::warn!("Failed to save config: {:?}", e),
            },
            Err(e) => log::warn!("Failed to serialize config: {}", e),
        }
    }

    /// Load config from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path).map_err(|e| GameError::InvalidConfig {
            field: "path",
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json(&json)
    }
}
