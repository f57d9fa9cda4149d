//! Falling entities and particle effects

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::field::Field;
use crate::config::GameConfig;

/// Heart particle colour (0xRRGGBB)
pub const HEART_COLOR: u32 = 0xff4757;
/// Bomb particle colour (0xRRGGBB)
pub const BOMB_COLOR: u32 = 0x2d3436;

/// What fell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Heart,
    Bomb,
}

impl EntityKind {
    /// Burst colour for this kind
    pub fn color(&self) -> u32 {
        match self {
            EntityKind::Heart => HEART_COLOR,
            EntityKind::Bomb => BOMB_COLOR,
        }
    }

    /// Score change when tapped
    pub fn points(&self, config: &GameConfig) -> i64 {
        match self {
            EntityKind::Heart => config.heart_points,
            EntityKind::Bomb => config.bomb_points,
        }
    }
}

/// Heart "breathing" oscillator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pulse {
    pub phase: f32,
    pub speed: f32,
}

/// Uniform sample in [min, max); degenerate ranges return `min`
fn uniform(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    min + (max - min) * rng.random::<f32>()
}

/// A heart or bomb on its way down
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height (entities are square)
    pub size: f32,
    /// Fall distance per tick
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Hearts only
    pub pulse: Option<Pulse>,
    /// Render scale, driven by the pulse
    pub scale: f32,
}

impl FallingEntity {
    /// Roll a new entity just above the top of the field
    pub fn spawn(
        id: u32,
        rng: &mut impl Rng,
        config: &GameConfig,
        field: &Field,
        baseline_speed: f32,
    ) -> Self {
        let kind = if rng.random_bool(config.heart_probability) {
            EntityKind::Heart
        } else {
            EntityKind::Bomb
        };
        let size = uniform(rng, config.size_min, config.size_max);
        let x = field.max_spawn_x(size) * rng.random::<f32>();
        let speed = baseline_speed + uniform(rng, 0.0, config.speed_bonus_max);
        let rotation_speed = uniform(rng, -config.rotation_speed_max, config.rotation_speed_max);

        let pulse = match kind {
            EntityKind::Heart => Some(Pulse {
                phase: 0.0,
                speed: config.pulse_speed,
            }),
            EntityKind::Bomb => None,
        };

        Self {
            id,
            kind,
            pos: Vec2::new(x, -size),
            size,
            speed,
            rotation: 0.0,
            rotation_speed,
            pulse,
            scale: 1.0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Move, spin, and (for hearts) breathe by one tick
    pub fn advance(&mut self, pulse_amplitude: f32) {
        self.pos.y += self.speed;
        self.rotation += self.rotation_speed;
        if let Some(pulse) = &mut self.pulse {
            pulse.phase += pulse.speed;
            self.scale = 1.0 + pulse.phase.sin() * pulse_amplitude;
        }
    }
}

/// A short-lived spark from a tap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 0xRRGGBB
    pub color: u32,
    /// Ticks remaining
    pub life: i32,
}

impl Particle {
    /// Emit a burst of particles from `center`, coloured for `kind`
    pub fn burst(
        center: Vec2,
        kind: EntityKind,
        rng: &mut impl Rng,
        config: &GameConfig,
        out: &mut Vec<Particle>,
    ) {
        out.reserve(config.burst_size);
        for _ in 0..config.burst_size {
            let vel = Vec2::new(
                uniform(rng, -config.burst_speed, config.burst_speed),
                uniform(rng, -config.burst_speed, config.burst_speed),
            );
            out.push(Particle {
                pos: center,
                vel,
                size: uniform(rng, config.particle_size_min, config.particle_size_max),
                color: kind.color(),
                life: config.particle_lifetime_ticks,
            });
        }
    }

    /// Move one tick and burn a tick of life. Returns false once expired.
    pub fn advance(&mut self) -> bool {
        self.pos += self.vel;
        self.life -= 1;
        self.life > 0
    }
}
