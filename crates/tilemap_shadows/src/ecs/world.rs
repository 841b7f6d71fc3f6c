//! ECS World implementation

use super::{Component, Entity, NodeFlags};
use crate::foundation::collections::{HandleMap, SlotMap};
use crate::foundation::math::Vec3;
use crate::scene::SceneError;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// How a node is torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DestroyMode {
    /// Remove the node, its subtree and their components right away
    #[default]
    Immediate,
    /// Hide the node from scans now and reclaim it at [`World::flush_destroyed`]
    Deferred,
}

#[derive(Debug)]
struct Node {
    name: String,
    parent: Option<Entity>,
    children: Vec<Entity>,
    local_position: Vec3,
    flags: NodeFlags,
}

impl Node {
    fn new(name: String, parent: Option<Entity>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            local_position: Vec3::zeros(),
            flags: NodeFlags::empty(),
        }
    }

    fn is_pending_destroy(&self) -> bool {
        self.flags.contains(NodeFlags::PENDING_DESTROY)
    }
}

/// Type-erased component column
trait ComponentColumn: Send + Sync {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentColumn for HandleMap<Entity, T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing all entities and components
///
/// Nodes form a forest: every node has at most one parent and an ordered list
/// of children. Child order is creation order and is what scans report.
pub struct World {
    nodes: SlotMap<Entity, Node>,
    component_storages: HashMap<TypeId, Box<dyn ComponentColumn>>,
    pending_destroy: Vec<Entity>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            component_storages: HashMap::new(),
            pending_destroy: Vec::new(),
        }
    }

    /// Create a new root entity
    pub fn spawn(&mut self, name: impl Into<String>) -> Entity {
        self.nodes.insert(Node::new(name.into(), None))
    }

    /// Create a new entity parented under `parent` at its local origin
    pub fn spawn_child(&mut self, parent: Entity, name: impl Into<String>) -> Result<Entity, SceneError> {
        self.ensure_alive(parent)?;
        let child = self.nodes.insert(Node::new(name.into(), Some(parent)));
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        Ok(child)
    }

    /// Whether the handle refers to a node that exists, pending or not
    pub fn contains(&self, entity: Entity) -> bool {
        self.nodes.contains_key(entity)
    }

    /// Whether the node exists and is not scheduled for destruction
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.nodes.get(entity).is_some_and(|node| !node.is_pending_destroy())
    }

    fn ensure_alive(&self, entity: Entity) -> Result<(), SceneError> {
        match self.nodes.get(entity) {
            None => Err(SceneError::EntityNotFound(entity)),
            Some(node) if node.is_pending_destroy() => Err(SceneError::PendingDestroy(entity)),
            Some(_) => Ok(()),
        }
    }

    /// Node name
    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.nodes.get(entity).map(|node| node.name.as_str())
    }

    /// Parent of a node, `None` for roots and unknown handles
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.nodes.get(entity).and_then(|node| node.parent)
    }

    /// Direct children in creation order
    pub fn children(&self, entity: Entity) -> &[Entity] {
        self.nodes.get(entity).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Position relative to the parent
    pub fn local_position(&self, entity: Entity) -> Option<Vec3> {
        self.nodes.get(entity).map(|node| node.local_position)
    }

    /// Total node count, including nodes pending destruction
    pub fn entity_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes waiting for [`World::flush_destroyed`]
    pub fn pending_destroy_count(&self) -> usize {
        self.pending_destroy.len()
    }

    fn column<T: Component>(&self) -> Option<&HandleMap<Entity, T>> {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|column| column.as_any().downcast_ref())
    }

    fn column_mut<T: Component>(&mut self) -> Option<&mut HandleMap<Entity, T>> {
        self.component_storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|column| column.as_any_mut().downcast_mut())
    }

    /// Add a component to an entity
    ///
    /// Fails if the entity already carries a component of this type.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), SceneError> {
        self.ensure_alive(entity)?;
        if self.has_component::<T>(entity) {
            return Err(SceneError::ComponentAlreadyPresent {
                entity,
                component: std::any::type_name::<T>(),
            });
        }

        if let Some(column) = self.column_mut::<T>() {
            column.insert(entity, component);
            return Ok(());
        }

        // first component of this type: build the column typed, then erase it
        let mut column = HandleMap::<Entity, T>::new();
        column.insert(entity, component);
        self.component_storages.insert(TypeId::of::<T>(), Box::new(column));
        Ok(())
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.column::<T>()?.get(entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.column_mut::<T>()?.get_mut(entity)
    }

    /// Whether the entity carries a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.column::<T>().is_some_and(|column| column.contains_key(entity))
    }

    /// Detach and return a component
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.column_mut::<T>()?.remove(entity)
    }

    /// Every live descendant of `root` carrying `T`, depth-first in child order
    ///
    /// `root` itself is not included. Subtrees scheduled for destruction are
    /// skipped.
    pub fn descendants_with<T: Component>(&self, root: Entity) -> Vec<Entity> {
        let mut found = Vec::new();
        let mut stack: Vec<Entity> = self.children(root).iter().rev().copied().collect();

        while let Some(entity) = stack.pop() {
            let Some(node) = self.nodes.get(entity) else { continue };
            if node.is_pending_destroy() {
                continue;
            }
            if self.has_component::<T>(entity) {
                found.push(entity);
            }
            stack.extend(node.children.iter().rev().copied());
        }

        found
    }

    /// Destroy a node and its subtree
    pub fn destroy(&mut self, entity: Entity, mode: DestroyMode) -> Result<(), SceneError> {
        match mode {
            DestroyMode::Immediate => {
                if !self.contains(entity) {
                    return Err(SceneError::EntityNotFound(entity));
                }
                self.despawn_recursive(entity);
                self.pending_destroy.retain(|pending| self.nodes.contains_key(*pending));
                Ok(())
            }
            DestroyMode::Deferred => {
                self.ensure_alive(entity)?;
                if let Some(node) = self.nodes.get_mut(entity) {
                    node.flags.insert(NodeFlags::PENDING_DESTROY);
                }
                self.pending_destroy.push(entity);
                Ok(())
            }
        }
    }

    /// Reclaim every node destroyed with [`DestroyMode::Deferred`]
    ///
    /// Returns how many scheduled subtrees were removed.
    pub fn flush_destroyed(&mut self) -> usize {
        let pending = std::mem::take(&mut self.pending_destroy);
        let mut removed = 0;
        for entity in pending {
            if self.contains(entity) {
                self.despawn_recursive(entity);
                removed += 1;
            }
        }
        if removed > 0 {
            log::debug!("Reclaimed {} deferred node(s)", removed);
        }
        removed
    }

    fn despawn_recursive(&mut self, root: Entity) {
        if let Some(parent) = self.parent(root) {
            if let Some(node) = self.nodes.get_mut(parent) {
                node.children.retain(|child| *child != root);
            }
        }

        let mut stack = vec![root];
        while let Some(entity) = stack.pop() {
            if let Some(node) = self.nodes.remove(entity) {
                stack.extend(node.children);
                for column in self.component_storages.values_mut() {
                    column.remove_entity(entity);
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::{CompositeShadowCaster, ShadowCaster};

    #[test]
    fn test_spawn_child_links_hierarchy() {
        let mut world = World::new();
        let root = world.spawn("Tilemap");
        let a = world.spawn_child(root, "a").unwrap();
        let b = world.spawn_child(root, "b").unwrap();

        assert_eq!(world.children(root), &[a, b]);
        assert_eq!(world.parent(a), Some(root));
        assert_eq!(world.name(b), Some("b"));
        assert_eq!(world.local_position(a), Some(Vec3::zeros()));
        assert_eq!(world.entity_count(), 3);
    }

    #[test]
    fn test_components_add_get_remove() {
        let mut world = World::new();
        let e = world.spawn("node");

        world.add_component(e, ShadowCaster::default()).unwrap();
        assert!(world.has_component::<ShadowCaster>(e));
        assert!(!world.has_component::<CompositeShadowCaster>(e));

        world.get_component_mut::<ShadowCaster>(e).unwrap().self_shadows = true;
        assert!(world.get_component::<ShadowCaster>(e).unwrap().self_shadows);

        let err = world.add_component(e, ShadowCaster::default()).unwrap_err();
        assert!(matches!(err, SceneError::ComponentAlreadyPresent { .. }));

        assert!(world.remove_component::<ShadowCaster>(e).is_some());
        assert!(world.remove_component::<ShadowCaster>(e).is_none());
    }

    #[test]
    fn test_component_columns_are_shared_per_type() {
        let mut world = World::new();
        let a = world.spawn("a");
        let b = world.spawn("b");

        world.add_component(a, ShadowCaster::default()).unwrap();
        world.add_component(b, ShadowCaster { self_shadows: true, ..ShadowCaster::default() }).unwrap();
        world.add_component(b, CompositeShadowCaster).unwrap();

        assert_eq!(world.component_storages.len(), 2);
        assert!(!world.get_component::<ShadowCaster>(a).unwrap().self_shadows);
        assert!(world.get_component::<ShadowCaster>(b).unwrap().self_shadows);
        assert!(!world.has_component::<CompositeShadowCaster>(a));

        // an emptied column is reused by the next insert
        world.remove_component::<CompositeShadowCaster>(b);
        world.add_component(a, CompositeShadowCaster).unwrap();
        assert_eq!(world.component_storages.len(), 2);
        assert!(world.has_component::<CompositeShadowCaster>(a));
    }

    #[test]
    fn test_immediate_destroy_removes_subtree_and_components() {
        let mut world = World::new();
        let root = world.spawn("root");
        let child = world.spawn_child(root, "child").unwrap();
        let grandchild = world.spawn_child(child, "grandchild").unwrap();
        world.add_component(grandchild, ShadowCaster::default()).unwrap();

        world.destroy(child, DestroyMode::Immediate).unwrap();

        assert!(!world.contains(child));
        assert!(!world.contains(grandchild));
        assert!(world.children(root).is_empty());
        assert!(world.get_component::<ShadowCaster>(grandchild).is_none());
        assert!(matches!(
            world.destroy(child, DestroyMode::Immediate),
            Err(SceneError::EntityNotFound(_))
        ));
    }

    #[test]
    fn test_stale_handle_does_not_alias_new_node() {
        let mut world = World::new();
        let first = world.spawn("first");
        world.add_component(first, ShadowCaster::default()).unwrap();
        world.destroy(first, DestroyMode::Immediate).unwrap();

        let second = world.spawn("second");
        assert_ne!(first, second);
        assert!(world.get_component::<ShadowCaster>(first).is_none());
        assert_eq!(world.name(first), None);
    }

    #[test]
    fn test_deferred_destroy_hides_until_flush() {
        let mut world = World::new();
        let root = world.spawn("root");
        let a = world.spawn_child(root, "a").unwrap();
        let b = world.spawn_child(root, "b").unwrap();
        world.add_component(a, ShadowCaster::default()).unwrap();
        world.add_component(b, ShadowCaster::default()).unwrap();

        world.destroy(b, DestroyMode::Deferred).unwrap();

        assert!(world.contains(b));
        assert!(!world.is_alive(b));
        assert_eq!(world.descendants_with::<ShadowCaster>(root), vec![a]);
        assert!(matches!(world.spawn_child(b, "late"), Err(SceneError::PendingDestroy(_))));
        assert!(matches!(world.destroy(b, DestroyMode::Deferred), Err(SceneError::PendingDestroy(_))));

        assert_eq!(world.flush_destroyed(), 1);
        assert!(!world.contains(b));
        assert_eq!(world.pending_destroy_count(), 0);
        assert_eq!(world.flush_destroyed(), 0);
    }

    #[test]
    fn test_immediate_destroy_of_pending_node_clears_queue() {
        let mut world = World::new();
        let e = world.spawn("e");
        world.destroy(e, DestroyMode::Deferred).unwrap();
        world.destroy(e, DestroyMode::Immediate).unwrap();
        assert_eq!(world.pending_destroy_count(), 0);
    }

    #[test]
    fn test_descendants_with_is_depth_first_and_excludes_root() {
        let mut world = World::new();
        let root = world.spawn("root");
        world.add_component(root, ShadowCaster::default()).unwrap();
        let a = world.spawn_child(root, "a").unwrap();
        let a1 = world.spawn_child(a, "a1").unwrap();
        let b = world.spawn_child(root, "b").unwrap();
        let plain = world.spawn_child(root, "plain").unwrap();
        for e in [a, a1, b] {
            world.add_component(e, ShadowCaster::default()).unwrap();
        }

        assert_eq!(world.descendants_with::<ShadowCaster>(root), vec![a, a1, b]);
        assert!(world.descendants_with::<CompositeShadowCaster>(root).is_empty());
        assert!(world.descendants_with::<ShadowCaster>(plain).is_empty());
    }
}
