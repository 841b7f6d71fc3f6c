//! Shadow synchronization pipeline
//!
//! One pass runs three stages in a fixed order:
//!
//! ```text
//! CollisionSource ──extract──▶ islands ──reconcile──▶ caster registry ──composite──▶ wrapper
//! ```
//!
//! - [`extract`]: pull the island outlines from the collision source
//! - [`reconcile`]: align one shadow caster per island, by index
//! - [`composite`]: add or remove the composite wrapper on the owner

pub mod extract;
pub mod reconcile;
pub mod composite;
mod synchronizer;

pub use extract::extract_islands;
pub use reconcile::{reconcile, ReconcileReport};
pub use composite::{apply_composite, decide_composite, CompositeAction};
pub use synchronizer::{ShadowSynchronizer, PassOutcome, PassReport};

use crate::ecs::Entity;
use crate::scene::SceneError;
use thiserror::Error;

/// Reasons a pass is skipped
///
/// None of these are fatal: the synchronizer logs them and leaves the scene
/// as it was, and the next pass starts from a fresh scan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// No collision source attached yet
    #[error("Collision source is not attached")]
    SourceUnavailable,

    /// No mesh builder attached yet
    #[error("Mesh builder is not attached")]
    MeshBuilderUnavailable,

    /// The owner node is gone or being destroyed
    #[error("Owner entity {0:?} is not alive")]
    OwnerMissing(Entity),

    /// The island count changed while the paths were being read
    #[error("Collision source reported {expected} islands, then {actual}")]
    InconsistentSource {
        /// Count before reading paths
        expected: usize,
        /// Count after reading paths
        actual: usize,
    },

    /// A registered caster node no longer carries its component
    #[error("Shadow caster {index} ({entity:?}) has no ShadowCaster component")]
    MissingCaster {
        /// Registry index
        index: usize,
        /// Caster node
        entity: Entity,
    },

    /// Scene graph operation failed
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

impl SyncError {
    /// Whether the error only means a collaborator is not ready yet
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::SourceUnavailable | Self::MeshBuilderUnavailable | Self::OwnerMissing(_))
    }
}
