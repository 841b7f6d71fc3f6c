//! Island outlines

use crate::foundation::math::{self, Vec2, Vec3};

/// Closed outline of one connected region of collision geometry
///
/// May be empty; an empty island is valid, zero-area geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IslandPolygon {
    points: Vec<Vec2>,
}

impl IslandPolygon {
    /// Create an island from its outline
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Outline points in path order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Point buffer, for sources to fill in place
    pub fn points_mut(&mut self) -> &mut Vec<Vec2> {
        &mut self.points
    }

    /// Number of outline points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the outline has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area, positive for outer boundaries and negative for holes
    pub fn signed_area(&self) -> f32 {
        math::signed_area(&self.points)
    }

    /// Lift the outline onto the z = 0 plane into a reusable buffer
    pub fn lift_into(&self, out: &mut Vec<Vec3>) {
        math::lift_into(&self.points, out);
    }
}
