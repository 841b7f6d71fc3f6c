//! Index-aligned reconciliation of shadow casters against islands
//!
//! After [`reconcile`] returns `Ok`, the registry holds exactly one caster per
//! island and caster `i` was rebuilt from island `i` of the same pass.

use super::SyncError;
use crate::collision::IslandPolygon;
use crate::config::ShadowSyncConfig;
use crate::ecs::{DestroyMode, Entity};
use crate::foundation::math::Vec3;
use crate::scene::SceneGraph;
use crate::shadow::{MeshBuilder, ShadowCaster};

/// What one reconciliation changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Casters adopted from the scene at the start of the pass
    pub scanned: usize,
    /// Casters created for new islands
    pub created: usize,
    /// Casters destroyed because their island is gone
    pub destroyed: usize,
    /// Casters rebuilt, created ones included
    pub updated: usize,
}

/// Replace the registry with the casters that actually exist under `owner`
///
/// Bookkeeping from earlier passes is never trusted: casters left by a previous
/// session are adopted, and casters removed behind the synchronizer's back
/// simply drop out.
pub fn rescan_registry<G: SceneGraph>(scene: &G, owner: Entity, registry: &mut Vec<Entity>) {
    registry.clear();
    registry.extend(scene.descendants_with::<ShadowCaster>(owner));
}

/// Destroy every caster at index `>= island_count`, highest index first
pub fn shrink_registry<G: SceneGraph>(
    scene: &mut G,
    registry: &mut Vec<Entity>,
    island_count: usize,
    mode: DestroyMode,
) -> Result<usize, SyncError> {
    let mut destroyed = 0;
    while registry.len() > island_count {
        let Some(entity) = registry.pop() else { break };
        log::trace!("Destroying shadow caster {} ({:?})", registry.len(), entity);
        scene.destroy(entity, mode)?;
        destroyed += 1;
    }
    Ok(destroyed)
}

/// Run the full reconciliation for one pass
///
/// `outline` is scratch space for the lifted outline handed to the builder.
pub fn reconcile<G, B>(
    scene: &mut G,
    owner: Entity,
    islands: &[IslandPolygon],
    registry: &mut Vec<Entity>,
    builder: &mut B,
    config: &ShadowSyncConfig,
    outline: &mut Vec<Vec3>,
) -> Result<ReconcileReport, SyncError>
where
    G: SceneGraph,
    B: MeshBuilder + ?Sized,
{
    let mut report = ReconcileReport::default();

    rescan_registry(scene, owner, registry);
    report.scanned = registry.len();

    report.destroyed = shrink_registry(scene, registry, islands.len(), config.destroy_mode)?;

    for (index, island) in islands.iter().enumerate() {
        if index >= registry.len() {
            let entity = scene.create_child(&config.caster_name, owner)?;
            scene.add_component(entity, ShadowCaster::default())?;
            registry.push(entity);
            report.created += 1;
        }

        let entity = registry[index];
        let caster = scene
            .get_component_mut::<ShadowCaster>(entity)
            .ok_or(SyncError::MissingCaster { index, entity })?;

        caster.self_shadows = config.self_shadow;
        caster.use_renderer_silhouette = config.use_silhouette;

        island.lift_into(outline);
        caster.bounding_sphere = builder.generate(&mut caster.mesh, outline.as_slice());
        report.updated += 1;

        log::trace!("Rebuilt shadow caster {} from {} point(s)", index, island.len());
    }

    debug_assert_eq!(registry.len(), islands.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::World;
    use crate::foundation::math::Vec2;
    use crate::shadow::EdgeMeshBuilder;

    fn square(x: f32) -> IslandPolygon {
        IslandPolygon::new(vec![
            Vec2::new(x, 0.0),
            Vec2::new(x + 1.0, 0.0),
            Vec2::new(x + 1.0, 1.0),
            Vec2::new(x, 1.0),
        ])
    }

    fn run(world: &mut World, owner: Entity, islands: &[IslandPolygon], registry: &mut Vec<Entity>, config: &ShadowSyncConfig) -> ReconcileReport {
        reconcile(world, owner, islands, registry, &mut EdgeMeshBuilder, config, &mut Vec::new()).unwrap()
    }

    #[test]
    fn test_creates_named_children_at_origin() {
        let mut world = World::new();
        let owner = world.spawn("Tilemap");
        let mut registry = Vec::new();

        let report = run(&mut world, owner, &[square(0.0), square(3.0)], &mut registry, &ShadowSyncConfig::default());

        assert_eq!(report.created, 2);
        assert_eq!(report.updated, 2);
        assert_eq!(registry.len(), 2);
        for &entity in &registry {
            assert_eq!(world.parent(entity), Some(owner));
            assert_eq!(world.name(entity), Some("TMShadowCaster"));
            assert_eq!(world.local_position(entity), Some(Vec3::zeros()));
        }
        let second = world.get_component::<ShadowCaster>(registry[1]).unwrap();
        assert!((second.bounding_sphere.center.x - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_shrink_destroys_tail_only() {
        let mut world = World::new();
        let owner = world.spawn("Tilemap");
        let mut registry = Vec::new();
        let config = ShadowSyncConfig::default();
        run(&mut world, owner, &[square(0.0), square(2.0), square(4.0)], &mut registry, &config);
        let before = registry.clone();

        let report = run(&mut world, owner, &[square(0.0)], &mut registry, &config);

        assert_eq!(report.destroyed, 2);
        assert_eq!(registry, vec![before[0]]);
        assert!(!world.contains(before[1]));
        assert!(!world.contains(before[2]));
    }

    #[test]
    fn test_adopts_existing_children_instead_of_duplicating() {
        let mut world = World::new();
        let owner = world.spawn("Tilemap");
        let leftover = world.spawn_child(owner, "TMShadowCaster").unwrap();
        world.add_component(leftover, ShadowCaster::default()).unwrap();
        world.spawn_child(owner, "Decoration").unwrap();

        // stale bookkeeping from an earlier session
        let mut registry = vec![leftover, leftover, leftover];
        let report = run(&mut world, owner, &[square(0.0)], &mut registry, &ShadowSyncConfig::default());

        assert_eq!(report.scanned, 1);
        assert_eq!(report.created, 0);
        assert_eq!(registry, vec![leftover]);
        assert_eq!(world.descendants_with::<ShadowCaster>(owner), vec![leftover]);
    }

    #[test]
    fn test_deferred_mode_hides_destroyed_casters_from_next_scan() {
        let mut world = World::new();
        let owner = world.spawn("Tilemap");
        let mut registry = Vec::new();
        let config = ShadowSyncConfig::default().with_destroy_mode(DestroyMode::Deferred);

        run(&mut world, owner, &[square(0.0), square(2.0)], &mut registry, &config);
        run(&mut world, owner, &[square(0.0)], &mut registry, &config);
        assert_eq!(world.pending_destroy_count(), 1);

        // second pass in the same frame must not re-adopt the pending caster
        let report = run(&mut world, owner, &[square(0.0)], &mut registry, &config);
        assert_eq!(report.scanned, 1);
        assert_eq!(report.destroyed, 0);

        assert_eq!(world.flush_destroyed(), 1);
        assert_eq!(world.children(owner).len(), 1);
    }

    #[test]
    fn test_empty_island_is_valid() {
        let mut world = World::new();
        let owner = world.spawn("Tilemap");
        let mut registry = Vec::new();

        let report = run(&mut world, owner, &[IslandPolygon::default()], &mut registry, &ShadowSyncConfig::default());

        assert_eq!(report.created, 1);
        let caster = world.get_component::<ShadowCaster>(registry[0]).unwrap();
        assert!(caster.mesh.is_empty());
        assert!(caster.bounding_sphere.radius.abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_component_is_reported() {
        struct NoComponentScene(World);

        impl SceneGraph for NoComponentScene {
            fn create_child(&mut self, name: &str, parent: Entity) -> Result<Entity, crate::scene::SceneError> {
                self.0.spawn_child(parent, name)
            }
            fn destroy(&mut self, entity: Entity, mode: DestroyMode) -> Result<(), crate::scene::SceneError> {
                self.0.destroy(entity, mode)
            }
            fn descendants_with<T: crate::ecs::Component>(&self, parent: Entity) -> Vec<Entity> {
                self.0.descendants_with::<T>(parent)
            }
            fn get_component<T: crate::ecs::Component>(&self, entity: Entity) -> Option<&T> {
                self.0.get_component(entity)
            }
            fn get_component_mut<T: crate::ecs::Component>(&mut self, _entity: Entity) -> Option<&mut T> {
                None
            }
            fn add_component<T: crate::ecs::Component>(&mut self, entity: Entity, component: T) -> Result<(), crate::scene::SceneError> {
                self.0.add_component(entity, component)
            }
            fn remove_component<T: crate::ecs::Component>(&mut self, entity: Entity) -> Option<T> {
                self.0.remove_component(entity)
            }
            fn is_alive(&self, entity: Entity) -> bool {
                self.0.is_alive(entity)
            }
        }

        let mut world = World::new();
        let owner = world.spawn("Tilemap");
        let mut scene = NoComponentScene(world);
        let mut registry = Vec::new();

        let result = reconcile(
            &mut scene,
            owner,
            &[square(0.0)],
            &mut registry,
            &mut EdgeMeshBuilder,
            &ShadowSyncConfig::default(),
            &mut Vec::new(),
        );
        assert!(matches!(result, Err(SyncError::MissingCaster { index: 0, .. })));
    }
}
