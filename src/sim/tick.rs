//! Fixed timestep simulation tick
//!
//! Advances falling entities and particles by one discrete step and applies
//! the difficulty ramp.

use super::entity::EntityKind;
use super::field::Field;
use super::state::GameState;
use crate::config::GameConfig;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Whether the tick ran at all (false while paused or inactive)
    pub advanced: bool,
    /// Hearts that fell off the bottom this tick
    pub hearts_missed: u32,
    /// Bombs that fell off the bottom this tick
    pub bombs_dropped: u32,
}

/// Advance the game state by one tick
pub fn step(state: &mut GameState, config: &GameConfig, field: &Field) -> TickReport {
    // Don't tick if paused or inactive
    if !state.is_live() {
        return TickReport::default();
    }

    let mut report = TickReport {
        advanced: true,
        ..Default::default()
    };

    // Difficulty ramp
    state.current_speed += config.speed_increment;
    state.time_ticks += 1;

    for entity in &mut state.entities {
        entity.advance(config.pulse_amplitude);
    }

    // Drop anything past the bottom edge; only hearts count as missed
    let bottom = field.bottom();
    state.entities.retain(|entity| {
        if entity.pos.y <= bottom {
            return true;
        }
        match entity.kind {
            EntityKind::Heart => report.hearts_missed += 1,
            EntityKind::Bomb => report.bombs_dropped += 1,
        }
        false
    });
    state.hearts_missed += report.hearts_missed;

    state.particles.retain_mut(|particle| particle.advance());

    report
}
