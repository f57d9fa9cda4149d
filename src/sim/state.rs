//! Game state and core simulation types
//!
//! Everything a tick, spawn, or tap mutates lives here. The random source is
//! owned by the session controller and passed in, so two states compare equal
//! exactly when the visible game is the same.

use serde::{Deserialize, Serialize};

use super::entity::{FallingEntity, Particle};
use crate::config::GameConfig;

/// Complete per-session simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Score (may go negative)
    pub score: i64,
    /// Score that wins the round
    pub target_score: i64,
    /// Drivers and taps act only while active
    pub active: bool,
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Hearts tapped
    pub hearts_clicked: u32,
    /// Hearts that fell off the bottom
    pub hearts_missed: u32,
    /// Baseline fall speed for new spawns (ramps up every tick)
    pub current_speed: f32,
    /// Falling entities in spawn order
    pub entities: Vec<FallingEntity>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an inactive state with the config's starting values
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            target_score: config.target_score,
            active: false,
            paused: false,
            time_ticks: 0,
            hearts_clicked: 0,
            hearts_missed: 0,
            current_speed: config.base_speed,
            entities: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }

    /// Wipe the session back to a fresh, active round
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
        self.active = true;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Whether drivers and taps may touch this state
    #[inline]
    pub fn is_live(&self) -> bool {
        self.active && !self.paused
    }

    /// Progress toward the target score, clamped to [0, 1]
    pub fn progress(&self) -> f32 {
        (self.score as f32 / self.target_score as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let config = GameConfig::default();
        let state = GameState::new(&config);
        assert!(!state.active);
        assert!(!state.is_live());
        assert_eq!(state.current_speed, config.base_speed);
        assert_eq!(state.target_score, 500);
    }

    #[test]
    fn test_reset_restores_everything() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.reset(&config);
        let fresh = state.clone();

        state.score = -40;
        state.current_speed = 9.0;
        state.hearts_clicked = 3;
        state.hearts_missed = 2;
        state.time_ticks = 99;
        state.paused = true;
        state.next_entity_id();

        state.reset(&config);
        assert_eq!(state, fresh);
        assert!(state.is_live());
    }

    #[test]
    fn test_progress_is_clamped() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        state.score = 250;
        assert!((state.progress() - 0.5).abs() < 1e-6);
        state.score = -60;
        assert_eq!(state.progress(), 0.0);
        state.score = 900;
        assert_eq!(state.progress(), 1.0);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(&GameConfig::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
