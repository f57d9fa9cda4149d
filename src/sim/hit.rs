//! Tap hit testing
//!
//! A tap consumes at most one entity. Entities are scanned newest first so the
//! one drawn on top wins overlaps, and each gets a forgiving hit circle that
//! grows with fall speed.

use glam::Vec2;
use rand::Rng;

use super::entity::{EntityKind, FallingEntity, Particle};
use super::state::GameState;
use crate::config::GameConfig;

/// Result of a tap that consumed an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitOutcome {
    pub entity_id: u32,
    pub kind: EntityKind,
    /// Score change applied
    pub delta: i64,
    /// Score after the hit
    pub score: i64,
}

/// Effective tap tolerance around an entity's center
#[inline]
pub fn hit_radius(entity: &FallingEntity, config: &GameConfig) -> f32 {
    let speed_bonus = (entity.speed * config.hit_speed_factor).min(config.hit_speed_cap);
    entity.size / 2.0 + config.hit_margin + speed_bonus
}

/// Index of the entity a tap lands on, newest first
pub fn find_hit(entities: &[FallingEntity], tap: Vec2, config: &GameConfig) -> Option<usize> {
    if !tap.is_finite() {
        return None;
    }
    entities
        .iter()
        .rposition(|entity| entity.center().distance(tap) < hit_radius(entity, config))
}

/// Apply a tap at field coordinates. No-op while paused, inactive, or on a miss.
pub fn handle_tap(
    state: &mut GameState,
    tap: Vec2,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<HitOutcome> {
    if !state.is_live() {
        return None;
    }

    let index = find_hit(&state.entities, tap, config)?;
    let entity = state.entities.remove(index);
    let center = entity.center();
    let delta = entity.kind.points(config);

    state.score += delta;
    if entity.kind == EntityKind::Heart {
        state.hearts_clicked += 1;
    }
    Particle::burst(center, entity.kind, rng, config, &mut state.particles);

    log::debug!(
        "Hit {:?} #{} ({:+}) -> score {}",
        entity.kind,
        entity.id,
        delta,
        state.score
    );

    Some(HitOutcome {
        entity_id: entity.id,
        kind: entity.kind,
        delta,
        score: state.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn live_state(config: &GameConfig) -> GameState {
        let mut state = GameState::new(config);
        state.reset(config);
        state
    }

    fn place(state: &mut GameState, kind: EntityKind, pos: Vec2, speed: f32) -> u32 {
        let id = state.next_entity_id();
        state.entities.push(FallingEntity {
            id,
            kind,
            pos,
            size: 50.0,
            speed,
            rotation: 0.0,
            rotation_speed: 0.0,
            pulse: None,
            scale: 1.0,
        });
        id
    }

    #[test]
    fn test_hit_radius_grows_with_speed_up_to_cap() {
        let config = GameConfig::default();
        let mut state = live_state(&config);
        place(&mut state, EntityKind::Heart, Vec2::ZERO, 1.0);
        let e = &mut state.entities[0];
        assert_eq!(hit_radius(e, &config), 25.0 + 10.0 + 2.0);
        e.speed = 4.0;
        assert_eq!(hit_radius(e, &config), 25.0 + 10.0 + 8.0);
        e.speed = 50.0;
        assert_eq!(hit_radius(e, &config), 25.0 + 10.0 + 12.0);
    }

    #[test]
    fn test_heart_hit() {
        let config = GameConfig::default();
        let mut state = live_state(&config);
        let mut rng = Pcg32::seed_from_u64(1);
        let id = place(&mut state, EntityKind::Heart, Vec2::new(100.0, 100.0), 1.0);

        let hit = handle_tap(&mut state, Vec2::new(125.0, 125.0), &config, &mut rng).unwrap();
        assert_eq!(hit.entity_id, id);
        assert_eq!(hit.delta, 10);
        assert_eq!(state.score, 10);
        assert_eq!(state.hearts_clicked, 1);
        assert!(state.entities.is_empty());
        assert_eq!(state.particles.len(), 8);
    }

    #[test]
    fn test_bomb_hit() {
        let config = GameConfig::default();
        let mut state = live_state(&config);
        let mut rng = Pcg32::seed_from_u64(1);
        place(&mut state, EntityKind::Bomb, Vec2::new(100.0, 100.0), 1.0);

        let hit = handle_tap(&mut state, Vec2::new(125.0, 125.0), &config, &mut rng).unwrap();
        assert_eq!(hit.kind, EntityKind::Bomb);
        assert_eq!(state.score, -20);
        assert_eq!(state.hearts_clicked, 0);
        assert!(state.entities.is_empty());
        assert_eq!(state.particles.len(), 8);
        assert!(state.particles.iter().all(|p| p.color == EntityKind::Bomb.color()));
    }

    #[test]
    fn test_newest_entity_wins_overlap() {
        let config = GameConfig::default();
        let mut state = live_state(&config);
        let mut rng = Pcg32::seed_from_u64(1);
        let older = place(&mut state, EntityKind::Heart, Vec2::new(100.0, 100.0), 1.0);
        let newer = place(&mut state, EntityKind::Bomb, Vec2::new(110.0, 110.0), 1.0);

        let hit = handle_tap(&mut state, Vec2::new(130.0, 130.0), &config, &mut rng).unwrap();
        assert_eq!(hit.entity_id, newer);
        // Only one entity per tap
        assert_eq!(state.entities.len(), 1);
        assert_eq!(state.entities[0].id, older);
    }

    #[test]
    fn test_miss_and_inert_taps_change_nothing() {
        let config = GameConfig::default();
        let mut state = live_state(&config);
        let mut rng = Pcg32::seed_from_u64(1);
        place(&mut state, EntityKind::Heart, Vec2::new(100.0, 100.0), 1.0);

        let before = state.clone();
        assert!(handle_tap(&mut state, Vec2::new(300.0, 300.0), &config, &mut rng).is_none());
        assert!(handle_tap(&mut state, Vec2::new(f32::NAN, 125.0), &config, &mut rng).is_none());
        assert!(handle_tap(&mut state, Vec2::new(f32::INFINITY, 1.0), &config, &mut rng).is_none());
        assert_eq!(state, before);

        state.paused = true;
        let before = state.clone();
        assert!(handle_tap(&mut state, Vec2::new(125.0, 125.0), &config, &mut rng).is_none());
        assert_eq!(state, before);

        state.paused = false;
        state.active = false;
        let before = state.clone();
        assert!(handle_tap(&mut state, Vec2::new(125.0, 125.0), &config, &mut rng).is_none());
        assert_eq!(state, before);
    }

    proptest! {
        #[test]
        fn prop_center_tap_always_hits(x in -100.0f32..500.0, y in -100.0f32..600.0, speed in 0.0f32..100.0) {
            let config = GameConfig::default();
            let mut state = live_state(&config);
            let mut rng = Pcg32::seed_from_u64(2);
            let id = place(&mut state, EntityKind::Heart, Vec2::new(x, y), speed);
            let center = state.entities[0].center();

            let hit = handle_tap(&mut state, center, &config, &mut rng);
            prop_assert_eq!(hit.map(|h| h.entity_id), Some(id));
        }

        #[test]
        fn prop_far_tap_never_hits(angle in 0.0f32..std::f32::consts::TAU, extra in 0.01f32..200.0, speed in 0.0f32..100.0) {
            let config = GameConfig::default();
            let mut state = live_state(&config);
            let mut rng = Pcg32::seed_from_u64(2);
            place(&mut state, EntityKind::Bomb, Vec2::new(200.0, 200.0), speed);
            let center = state.entities[0].center();
            let reach = 25.0 + config.hit_margin + config.hit_speed_cap + extra;
            let tap = center + Vec2::new(angle.cos(), angle.sin()) * reach;

            prop_assert!(handle_tap(&mut state, tap, &config, &mut rng).is_none());
            prop_assert_eq!(state.entities.len(), 1);
        }
    }
}
