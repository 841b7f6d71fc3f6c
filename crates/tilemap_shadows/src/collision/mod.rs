//! Collision geometry sources
//!
//! A [`CollisionSource`] exposes the merged outline of a collider as a list of
//! closed polygons, one per island (outer boundaries and holes alike). The
//! synchronizer only reads it; how the outlines are produced is up to the
//! physics backend. [`TilemapCollider`] is a self-contained tile-grid source.

mod island;
mod tilemap_collider;

pub use island::IslandPolygon;
pub use tilemap_collider::TilemapCollider;

use crate::foundation::math::Vec2;

/// Simulation mode of the body a collider is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyType {
    /// Never moves; the usual choice for level geometry
    Static,
    /// Moved explicitly, not by forces
    Kinematic,
    /// Fully simulated
    #[default]
    Dynamic,
}

/// Provider of island outlines
///
/// Island order must be stable for unchanged geometry; consumers index into
/// it and never re-sort.
pub trait CollisionSource {
    /// Ask the source to expose merged per-island paths
    ///
    /// Called at the start of every pass before any query.
    fn set_composite_consumption(&mut self, enabled: bool);

    /// Number of islands currently exposed
    fn island_count(&self) -> usize;

    /// Replace `out` with the outline of island `index`, returning its length
    ///
    /// Out-of-range indices clear `out` and return 0.
    fn get_path(&self, index: usize, out: &mut Vec<Vec2>) -> usize;

    /// Simulation mode of the attached body
    fn body_type(&self) -> BodyType {
        BodyType::Static
    }

    /// Change the simulation mode of the attached body
    fn set_body_type(&mut self, _body_type: BodyType) {}
}
