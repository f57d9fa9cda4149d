//! Playing field geometry
//!
//! The field is the rectangle entities fall through, in surface pixels with
//! the origin at the top-left corner and y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    /// Create a field, rejecting empty or non-finite surfaces
    pub fn new(width: f32, height: f32) -> Result<Self, GameError> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(width) || !usable(height) {
            return Err(GameError::MissingSurface { width, height });
        }
        Ok(Self { width, height })
    }

    /// y coordinate past which entities are gone
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.height
    }

    /// Whether a point lies on the field (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.is_finite()
            && (0.0..=self.width).contains(&point.x)
            && (0.0..=self.height).contains(&point.y)
    }

    /// Widest x an entity of `size` may start at without poking off the right edge
    #[inline]
    pub fn max_spawn_x(&self, size: f32) -> f32 {
        (self.width - size).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rejects_empty_surface() {
        assert!(Field::new(400.0, 500.0).is_ok());
        assert!(matches!(
            Field::new(0.0, 500.0),
            Err(GameError::MissingSurface { .. })
        ));
        assert!(Field::new(400.0, -1.0).is_err());
        assert!(Field::new(f32::NAN, 500.0).is_err());
        assert!(Field::new(f32::INFINITY, 500.0).is_err());
    }

    #[test]
    fn test_field_contains() {
        let field = Field::new(400.0, 500.0).unwrap();
        assert!(field.contains(Vec2::new(0.0, 0.0)));
        assert!(field.contains(Vec2::new(400.0, 500.0)));
        assert!(!field.contains(Vec2::new(-1.0, 10.0)));
        assert!(!field.contains(Vec2::new(10.0, 501.0)));
        assert!(!field.contains(Vec2::new(f32::NAN, 10.0)));
    }

    #[test]
    fn test_max_spawn_x_clamps_narrow_fields() {
        let field = Field::new(400.0, 500.0).unwrap();
        assert_eq!(field.max_spawn_x(50.0), 350.0);
        let narrow = Field::new(30.0, 500.0).unwrap();
        assert_eq!(narrow.max_spawn_x(50.0), 0.0);
    }
}
