//! Math utilities and types
//!
//! Provides the small set of math types the shadow pipeline needs. Collision
//! outlines live in 2D, shadow meshes are built in 3D (z = 0 plane).

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Lift a 2D outline point onto the z = 0 plane
pub fn lift(point: Vec2) -> Vec3 {
    Vec3::new(point.x, point.y, 0.0)
}

/// Drop the z component of a 3D point
pub fn flatten(point: Vec3) -> Vec2 {
    Vec2::new(point.x, point.y)
}

/// Lift a whole outline into `out`, replacing its contents
///
/// `out` is reused between islands so a pass does not allocate per path once
/// the buffer has grown to the largest island.
pub fn lift_into(points: &[Vec2], out: &mut Vec<Vec3>) {
    out.clear();
    out.extend(points.iter().copied().map(lift));
}

/// Signed area of a closed 2D outline (positive when counter-clockwise)
pub fn signed_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area * 0.5
}
