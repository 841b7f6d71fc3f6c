//! Shadow caster components

use super::{BoundingSphere, ShadowMesh};

/// Shadow-casting shape for one collision island
///
/// Lives on a child node of the tilemap owner. The synchronizer rewrites its
/// flags, mesh and bounds on every pass in which its island still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowCaster {
    /// Extrudable shadow geometry
    pub mesh: ShadowMesh,
    /// Cast shadows onto the caster's own renderer
    pub self_shadows: bool,
    /// Let the renderer's silhouette take part in shadowing
    pub use_renderer_silhouette: bool,
    /// Bounds returned by the mesh builder for the current mesh
    pub bounding_sphere: BoundingSphere,
}

impl Default for ShadowCaster {
    fn default() -> Self {
        Self {
            mesh: ShadowMesh::default(),
            self_shadows: false,
            use_renderer_silhouette: true,
            bounding_sphere: BoundingSphere::default(),
        }
    }
}

/// Marker telling the lighting system to treat every caster below this node
/// as a single caster
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeShadowCaster;
