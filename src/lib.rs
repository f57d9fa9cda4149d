//! Heart Catcher - a falling-hearts tap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, hit testing, game state)
//! - `game`: Session controller and win/lose state machine
//! - `driver`: Fixed-interval periodic drivers (spawn cadence, tick cadence)
//! - `renderer`: Drawing seam between the simulation and a surface
//! - `config`: Data-driven game balance

pub mod config;
pub mod driver;
pub mod error;
pub mod game;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, Preset};
pub use error::GameError;
pub use game::{Game, GameEvent, GamePhase};

/// Game configuration constants
pub mod consts {
    /// Largest wall-clock frame delta fed to the drivers (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum fires per driver per frame to prevent spiral of death
    pub const MAX_CATCHUP: u32 = 8;

    /// Fallback field size when the surface has no container to measure
    pub const FALLBACK_FIELD_WIDTH: f32 = 400.0;
    pub const FALLBACK_FIELD_HEIGHT: f32 = 500.0;
    /// Height reserved below the canvas for the HUD buttons
    pub const HUD_STRIP_HEIGHT: f32 = 60.0;
}
