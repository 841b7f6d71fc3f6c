//! # Tilemap Shadows
//!
//! Keeps a set of 2D shadow casters in sync with the composite collision
//! outline of a tilemap, one caster per island.
//!
//! ## Features
//!
//! - **Index-Aligned Reconciliation**: casters are reused by island index,
//!   created on growth and destroyed on shrinkage
//! - **Ground-Truth Rescan**: every pass rebuilds its bookkeeping from the
//!   casters that actually exist in the scene
//! - **Composite Wrapper**: optional single-caster mode for multi-island maps
//! - **Pluggable Collaborators**: collision source, mesh builder and scene graph
//!   are traits, so the core runs without a live engine
//!
//! ## Quick Start
//!
//! ```rust
//! use tilemap_shadows::prelude::*;
//!
//! let mut world = World::new();
//! let owner = world.spawn("Tilemap");
//!
//! let mut sync = ShadowSynchronizer::new(owner, ShadowSyncConfig::default())
//!     .with_source(TilemapCollider::from_ascii("##..#\n##..#"))
//!     .with_mesh_builder(EdgeMeshBuilder);
//!
//! let outcome = sync.regenerate(&mut world);
//! assert!(outcome.is_completed());
//! assert_eq!(sync.registry().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod scene;
pub mod collision;
pub mod shadow;
pub mod sync;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        collision::{BodyType, CollisionSource, IslandPolygon, TilemapCollider},
        config::{Config, ConfigError, ShadowSyncConfig},
        ecs::{Component, DestroyMode, Entity, World},
        foundation::math::{Vec2, Vec3},
        scene::{SceneError, SceneGraph},
        shadow::{BoundingSphere, CompositeShadowCaster, EdgeMeshBuilder, MeshBuilder, ShadowCaster, ShadowMesh},
        sync::{CompositeAction, PassOutcome, PassReport, ShadowSynchronizer, SyncError},
    };
}
