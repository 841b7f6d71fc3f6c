//! Pass orchestration

use super::{apply_composite, extract_islands, reconcile, CompositeAction, SyncError};
use crate::collision::{BodyType, CollisionSource, IslandPolygon};
use crate::config::ShadowSyncConfig;
use crate::ecs::Entity;
use crate::foundation::math::Vec3;
use crate::scene::SceneGraph;
use crate::shadow::{EdgeMeshBuilder, MeshBuilder};

/// Summary of a completed pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassReport {
    /// Islands read from the collision source
    pub island_count: usize,
    /// Casters adopted from the scene at pass start
    pub scanned: usize,
    /// Casters created
    pub created: usize,
    /// Casters destroyed
    pub destroyed: usize,
    /// Casters rebuilt
    pub updated: usize,
    /// Composite wrapper change
    pub composite: CompositeAction,
}

/// Result of [`ShadowSynchronizer::regenerate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// The pass ran to completion
    Completed(PassReport),
    /// The pass was skipped; the scene was left as it was
    Skipped(SyncError),
}

impl PassOutcome {
    /// Whether the pass ran
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Report of a completed pass
    pub fn report(&self) -> Option<&PassReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::Skipped(_) => None,
        }
    }
}

/// Keeps one shadow caster per collision island under an owner node
///
/// The synchronizer owns its collaborators (the collision source and the mesh
/// builder) and the registry bookkeeping; the scene graph owning the nodes is
/// passed in for each pass. Passes are synchronous and must not overlap.
pub struct ShadowSynchronizer<S, B = EdgeMeshBuilder> {
    owner: Entity,
    /// Settings read at the start of every pass
    pub config: ShadowSyncConfig,
    source: Option<S>,
    mesh_builder: Option<B>,
    registry: Vec<Entity>,
    islands: Vec<IslandPolygon>,
    // extraction target; swapped with `islands` once a read is accepted
    island_scratch: Vec<IslandPolygon>,
    outline_buffer: Vec<Vec3>,
}

impl<S, B> ShadowSynchronizer<S, B>
where
    S: CollisionSource,
    B: MeshBuilder,
{
    /// Create a synchronizer for `owner` with no collaborators attached
    pub fn new(owner: Entity, config: ShadowSyncConfig) -> Self {
        Self {
            owner,
            config,
            source: None,
            mesh_builder: None,
            registry: Vec::with_capacity(32),
            islands: Vec::new(),
            island_scratch: Vec::new(),
            outline_buffer: Vec::with_capacity(256),
        }
    }

    /// Attach a collision source
    pub fn with_source(mut self, source: S) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach a mesh builder
    pub fn with_mesh_builder(mut self, builder: B) -> Self {
        self.mesh_builder = Some(builder);
        self
    }

    /// Node the casters live under
    pub fn owner(&self) -> Entity {
        self.owner
    }

    /// Caster nodes by island index, as of the last completed pass
    pub fn registry(&self) -> &[Entity] {
        &self.registry
    }

    /// Island outlines read by the last pass that got past extraction
    ///
    /// A read rejected as inconsistent is discarded, so this stays aligned
    /// with [`ShadowSynchronizer::registry`].
    pub fn islands(&self) -> &[IslandPolygon] {
        &self.islands
    }

    /// Attached collision source
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    /// Attached collision source, for editing geometry between passes
    pub fn source_mut(&mut self) -> Option<&mut S> {
        self.source.as_mut()
    }

    /// Replace the collision source, returning the previous one
    pub fn attach_source(&mut self, source: S) -> Option<S> {
        self.source.replace(source)
    }

    /// Remove the collision source; later passes are skipped until one is attached
    pub fn detach_source(&mut self) -> Option<S> {
        self.source.take()
    }

    /// Replace the mesh builder, returning the previous one
    pub fn attach_mesh_builder(&mut self, builder: B) -> Option<B> {
        self.mesh_builder.replace(builder)
    }

    /// Remove the mesh builder
    pub fn detach_mesh_builder(&mut self) -> Option<B> {
        self.mesh_builder.take()
    }

    /// Run one synchronization pass
    ///
    /// Never fails loudly: a missing collaborator or an inconsistent source
    /// skips the pass and is reported in the outcome.
    pub fn regenerate<G: SceneGraph>(&mut self, scene: &mut G) -> PassOutcome {
        match self.try_regenerate(scene) {
            Ok(report) => {
                log::debug!(
                    "Shadow pass: {} island(s), {} created, {} destroyed, composite {:?}",
                    report.island_count,
                    report.created,
                    report.destroyed,
                    report.composite
                );
                PassOutcome::Completed(report)
            }
            Err(err) => {
                if err.is_unavailable() {
                    log::debug!("Skipping shadow pass: {}", err);
                } else {
                    log::warn!("Skipping shadow pass: {}", err);
                }
                PassOutcome::Skipped(err)
            }
        }
    }

    /// Run one synchronization pass, surfacing the reason it was skipped
    pub fn try_regenerate<G: SceneGraph>(&mut self, scene: &mut G) -> Result<PassReport, SyncError> {
        let config = self.config.clone();

        if !scene.is_alive(self.owner) {
            return Err(SyncError::OwnerMissing(self.owner));
        }
        let source = self.source.as_mut().ok_or(SyncError::SourceUnavailable)?;
        let builder = self.mesh_builder.as_mut().ok_or(SyncError::MeshBuilderUnavailable)?;

        let island_count = extract_islands(source, &mut self.island_scratch)?;
        std::mem::swap(&mut self.islands, &mut self.island_scratch);

        let reconciled = reconcile(
            scene,
            self.owner,
            &self.islands,
            &mut self.registry,
            builder,
            &config,
            &mut self.outline_buffer,
        )?;

        let composite = apply_composite(scene, self.owner, island_count, config.use_composite)?;

        Ok(PassReport {
            island_count,
            scanned: reconciled.scanned,
            created: reconciled.created,
            destroyed: reconciled.destroyed,
            updated: reconciled.updated,
            composite,
        })
    }

    /// Rebind both collaborators and regenerate
    ///
    /// Hosts call this when the owner is enabled or after a reload, when any
    /// in-memory state may be stale.
    pub fn reinitialize<G: SceneGraph>(&mut self, scene: &mut G, source: S, builder: B) -> PassOutcome {
        self.source = Some(source);
        self.mesh_builder = Some(builder);
        log::info!("Reinitialized shadow synchronizer for {:?}", self.owner);
        self.regenerate(scene)
    }

    /// Regenerate, then make a dynamic body static
    ///
    /// Level geometry should not be simulated; this is what a freshly added
    /// synchronizer does to its collider's body.
    pub fn reset<G: SceneGraph>(&mut self, scene: &mut G) -> PassOutcome {
        let outcome = self.regenerate(scene);
        if let Some(source) = self.source.as_mut() {
            if source.body_type() == BodyType::Dynamic {
                source.set_body_type(BodyType::Static);
                log::info!("Made tilemap body static");
            }
        }
        outcome
    }
}
