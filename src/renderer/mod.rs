//! Rendering seam
//!
//! The simulation never draws. After every tick (and on start/resize) the
//! session hands its renderer a borrowed [`Frame`] snapshot; the renderer owns
//! the surface and any assets. The web build paints with Canvas2D.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use glam::Vec2;

use crate::game::GamePhase;
use crate::sim::{FallingEntity, Field, GameState, Particle};

/// Progress bar colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTone {
    /// Score below zero
    Negative,
    Normal,
    /// Target reached
    Complete,
}

/// Read-only view of one moment of the game
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: GamePhase,
    pub field: Field,
    pub entities: &'a [FallingEntity],
    pub particles: &'a [Particle],
    pub score: i64,
    pub target_score: i64,
    pub hearts_clicked: u32,
    pub hearts_missed: u32,
    /// score / target, clamped to [0, 1]
    pub progress: f32,
}

impl<'a> Frame<'a> {
    pub fn capture(state: &'a GameState, phase: GamePhase, field: Field) -> Self {
        Self {
            phase,
            field,
            entities: &state.entities,
            particles: &state.particles,
            score: state.score,
            target_score: state.target_score,
            hearts_clicked: state.hearts_clicked,
            hearts_missed: state.hearts_missed,
            progress: state.progress(),
        }
    }

    pub fn progress_tone(&self) -> ProgressTone {
        if self.score >= self.target_score {
            ProgressTone::Complete
        } else if self.score < 0 {
            ProgressTone::Negative
        } else {
            ProgressTone::Normal
        }
    }

    /// Whether the play backdrop (rather than the menu backdrop) applies
    pub fn in_play(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Paused)
    }

    /// Center, rotation, and scale of every entity, in draw order
    pub fn entity_transforms(&self) -> impl Iterator<Item = (&'a FallingEntity, Vec2, f32, f32)> + 'a {
        let entities: &'a [FallingEntity] = self.entities;
        entities
            .iter()
            .map(|e| (e, e.center(), e.rotation, e.scale))
    }
}

/// A drawing surface the session can paint into
pub trait Renderer {
    /// Surface size in pixels, or `None` when there is nothing to draw on
    fn surface_size(&self) -> Option<Vec2>;

    /// Paint one frame
    fn render(&mut self, frame: &Frame<'_>);
}

/// Headless renderer with a fixed surface, for native runs and tests
#[derive(Debug, Clone, Copy)]
pub struct NullRenderer {
    size: Vec2,
}

impl NullRenderer {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }
}

impl Default for NullRenderer {
    fn default() -> Self {
        use crate::consts::{FALLBACK_FIELD_HEIGHT, FALLBACK_FIELD_WIDTH};
        Self::new(FALLBACK_FIELD_WIDTH, FALLBACK_FIELD_HEIGHT)
    }
}

impl Renderer for NullRenderer {
    fn surface_size(&self) -> Option<Vec2> {
        Some(self.size)
    }

    fn render(&mut self, _frame: &Frame<'_>) {}
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn surface_size(&self) -> Option<Vec2> {
        (**self).surface_size()
    }

    fn render(&mut self, frame: &Frame<'_>) {
        (**self).render(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn test_progress_tone() {
        let config = GameConfig::default();
        let mut state = GameState::new(&config);
        let field = Field::new(400.0, 500.0).unwrap();

        state.score = -10;
        assert_eq!(Frame::capture(&state, GamePhase::Playing, field).progress_tone(), ProgressTone::Negative);
        state.score = 0;
        assert_eq!(Frame::capture(&state, GamePhase::Playing, field).progress_tone(), ProgressTone::Normal);
        state.score = 500;
        let frame = Frame::capture(&state, GamePhase::Won, field);
        assert_eq!(frame.progress_tone(), ProgressTone::Complete);
        assert_eq!(frame.progress, 1.0);
        assert!(!frame.in_play());
    }

    #[test]
    fn test_null_renderer_reports_surface() {
        let renderer = NullRenderer::new(320.0, 480.0);
        assert_eq!(renderer.surface_size(), Some(Vec2::new(320.0, 480.0)));
        let boxed: Box<dyn Renderer> = Box::new(NullRenderer::default());
        assert_eq!(boxed.surface_size(), Some(Vec2::new(400.0, 500.0)));
    }
}
