//! Shadow mesh buffers and the mesh-building seam

use bytemuck::{Pod, Zeroable};

use super::BoundingSphere;
use crate::foundation::math::{flatten, Vec2, Vec3};

/// One shadow mesh vertex
///
/// `extrusion` is the outward edge normal; vertices with a zero extrusion sit
/// on the outline and the others are pushed away from the light by the
/// shadow shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShadowVertex {
    /// Position in the owner's local space
    pub position: [f32; 3],
    /// Extrusion direction in the XY plane
    pub extrusion: [f32; 2],
}

impl ShadowVertex {
    fn new(position: Vec3, extrusion: Vec2) -> Self {
        Self {
            position: position.into(),
            extrusion: extrusion.into(),
        }
    }
}

/// Owned geometry buffer of a shadow caster
///
/// Rebuilt in place so a caster keeps its allocation across passes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShadowMesh {
    /// Vertex data
    pub vertices: Vec<ShadowVertex>,
    /// Triangle list indices into `vertices`
    pub indices: Vec<u32>,
}

impl ShadowMesh {
    /// Drop all geometry while keeping capacity
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex data as raw bytes for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Turns a closed outline into shadow geometry
///
/// Implemented by the host's lighting system. The builder overwrites `mesh`
/// and returns the bounds the lighting system should use for the result.
pub trait MeshBuilder {
    /// Regenerate `mesh` from a closed outline on the z = 0 plane
    fn generate(&mut self, mesh: &mut ShadowMesh, outline: &[Vec3]) -> BoundingSphere;
}

/// Reference builder: one extrudable quad per outline edge
///
/// Each edge `a -> b` yields four vertices (`a`, `b` on the outline and `a`,
/// `b` carrying the edge's outward normal) and two triangles. Outlines with
/// fewer than two points produce an empty mesh.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeMeshBuilder;

impl EdgeMeshBuilder {
    /// Outward normal of a directed edge of a counter-clockwise outline
    fn edge_normal(a: Vec3, b: Vec3) -> Vec2 {
        let edge = flatten(b - a);
        Vec2::new(edge.y, -edge.x)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec2::zeros)
    }
}

impl MeshBuilder for EdgeMeshBuilder {
    fn generate(&mut self, mesh: &mut ShadowMesh, outline: &[Vec3]) -> BoundingSphere {
        mesh.clear();

        if outline.len() >= 2 {
            mesh.vertices.reserve(outline.len() * 4);
            mesh.indices.reserve(outline.len() * 6);

            for (i, &a) in outline.iter().enumerate() {
                let b = outline[(i + 1) % outline.len()];
                let normal = Self::edge_normal(a, b);
                let base = u32::try_from(mesh.vertices.len()).unwrap_or(u32::MAX);

                mesh.vertices.extend([
                    ShadowVertex::new(a, Vec2::zeros()),
                    ShadowVertex::new(b, Vec2::zeros()),
                    ShadowVertex::new(a, normal),
                    ShadowVertex::new(b, normal),
                ]);
                mesh.indices.extend([base, base + 1, base + 3, base, base + 3, base + 2]);
            }
        }

        BoundingSphere::from_points(outline)
    }
}
