//! Spawner: one new falling entity per spawn-driver fire

use rand::Rng;

use super::entity::FallingEntity;
use super::field::Field;
use super::state::GameState;
use crate::config::GameConfig;

/// Append one freshly rolled entity. Inert while inactive or paused.
pub fn spawn(state: &mut GameState, config: &GameConfig, field: &Field, rng: &mut impl Rng) {
    if !state.is_live() {
        return;
    }

    let id = state.next_entity_id();
    let entity = FallingEntity::spawn(id, rng, config, field, state.current_speed);
    log::debug!(
        "Spawned {:?} #{} at x={:.1} speed={:.3}",
        entity.kind,
        entity.id,
        entity.pos.x,
        entity.speed
    );
    state.entities.push(entity);
}
