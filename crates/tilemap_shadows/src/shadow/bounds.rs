//! Bounding volumes for shadow meshes

use crate::foundation::math::Vec3;

/// Sphere enclosing a shadow caster's outline, used by the lighting system to
/// cull casters against lights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center
    pub center: Vec3,
    /// Sphere radius
    pub radius: f32,
}

impl BoundingSphere {
    /// Create a new sphere
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere centered on the points' bounding box that contains them
    ///
    /// An empty slice gives a zero-radius sphere at the origin.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };

        let (min, max) = points.iter().fold((*first, *first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        });
        let center = (min + max) * 0.5;
        let radius = points
            .iter()
            .map(|p| (p - center).magnitude())
            .fold(0.0_f32, f32::max);

        Self { center, radius }
    }

    /// Check if this sphere contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).magnitude_squared() <= self.radius * self.radius
    }
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::new(Vec3::zeros(), 0.0)
    }
}
