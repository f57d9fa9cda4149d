//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Discrete ticks only
//! - Seeded RNG only (passed in by the caller)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod entity;
pub mod field;
pub mod hit;
pub mod spawn;
pub mod state;
pub mod tick;

pub use entity::{BOMB_COLOR, EntityKind, FallingEntity, HEART_COLOR, Particle, Pulse};
pub use field::Field;
pub use hit::{HitOutcome, find_hit, handle_tap, hit_radius};
pub use spawn::spawn;
pub use state::GameState;
pub use tick::{TickReport, step};
