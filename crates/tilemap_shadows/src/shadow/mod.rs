//! Shadow caster data
//!
//! The components the synchronizer maintains and the mesh-building seam it
//! drives. Rendering the meshes is left to the host's lighting system.

mod bounds;
mod caster;
mod mesh;

pub use bounds::BoundingSphere;
pub use caster::{ShadowCaster, CompositeShadowCaster};
pub use mesh::{ShadowMesh, ShadowVertex, MeshBuilder, EdgeMeshBuilder};
