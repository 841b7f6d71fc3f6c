//! Scene graph trait and implementations

use crate::ecs::{Component, DestroyMode, Entity, World};
use thiserror::Error;

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The handle does not refer to a live node
    #[error("Entity not found: {0:?}")]
    EntityNotFound(Entity),

    /// The node is scheduled for destruction and can no longer be modified
    #[error("Entity is pending destruction: {0:?}")]
    PendingDestroy(Entity),

    /// The node already carries a component of this type
    #[error("Entity {entity:?} already has a {component} component")]
    ComponentAlreadyPresent {
        /// Target node
        entity: Entity,
        /// Component type name
        component: &'static str,
    },
}

/// Node allocation and component access needed by the shadow synchronizer
///
/// Implementations own node lifetime. Creating a child places it at the
/// parent's local origin; destroying a node reclaims its subtree and every
/// resource attached to it, either immediately or at a later flush depending
/// on the [`DestroyMode`].
pub trait SceneGraph {
    /// Create a named child node under `parent`
    fn create_child(&mut self, name: &str, parent: Entity) -> Result<Entity, SceneError>;

    /// Destroy a node and its subtree
    fn destroy(&mut self, entity: Entity, mode: DestroyMode) -> Result<(), SceneError>;

    /// Live descendants of `parent` carrying `T`, in stable depth-first order
    fn descendants_with<T: Component>(&self, parent: Entity) -> Vec<Entity>;

    /// Borrow a component
    fn get_component<T: Component>(&self, entity: Entity) -> Option<&T>;

    /// Mutably borrow a component
    fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T>;

    /// Attach a component
    fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), SceneError>;

    /// Detach a component, returning it if it was present
    fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T>;

    /// Whether the node exists and is not scheduled for destruction
    fn is_alive(&self, entity: Entity) -> bool;
}

impl SceneGraph for World {
    fn create_child(&mut self, name: &str, parent: Entity) -> Result<Entity, SceneError> {
        self.spawn_child(parent, name)
    }

    fn destroy(&mut self, entity: Entity, mode: DestroyMode) -> Result<(), SceneError> {
        World::destroy(self, entity, mode)
    }

    fn descendants_with<T: Component>(&self, parent: Entity) -> Vec<Entity> {
        World::descendants_with::<T>(self, parent)
    }

    fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        World::get_component(self, entity)
    }

    fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        World::get_component_mut(self, entity)
    }

    fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), SceneError> {
        World::add_component(self, entity, component)
    }

    fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        World::remove_component(self, entity)
    }

    fn is_alive(&self, entity: Entity) -> bool {
        World::is_alive(self, entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::ShadowCaster;

    fn spawn_caster<S: SceneGraph>(scene: &mut S, parent: Entity) -> Entity {
        let entity = scene.create_child("caster", parent).unwrap();
        scene.add_component(entity, ShadowCaster::default()).unwrap();
        entity
    }

    #[test]
    fn test_world_through_trait() {
        let mut world = World::new();
        let owner = world.spawn("owner");
        let a = spawn_caster(&mut world, owner);
        let b = spawn_caster(&mut world, owner);

        assert_eq!(SceneGraph::descendants_with::<ShadowCaster>(&world, owner), vec![a, b]);

        SceneGraph::destroy(&mut world, a, DestroyMode::Immediate).unwrap();
        assert!(!SceneGraph::is_alive(&world, a));
        assert_eq!(SceneGraph::descendants_with::<ShadowCaster>(&world, owner), vec![b]);
    }

    #[test]
    fn test_create_child_of_missing_parent_fails() {
        let mut world = World::new();
        let owner = world.spawn("owner");
        World::destroy(&mut world, owner, DestroyMode::Immediate).unwrap();
        assert_eq!(
            world.create_child("orphan", owner),
            Err(SceneError::EntityNotFound(owner))
        );
    }
}
