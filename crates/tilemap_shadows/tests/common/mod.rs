//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::cell::Cell;

use tilemap_shadows::prelude::*;

/// Scene event seen by [`RecordingScene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneEvent {
    Created(Entity),
    Destroyed(Entity),
}

/// `World` wrapper that logs node creation and destruction order
#[derive(Default)]
pub struct RecordingScene {
    pub world: World,
    pub events: Vec<SceneEvent>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destroyed(&self) -> Vec<Entity> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SceneEvent::Destroyed(entity) => Some(*entity),
                SceneEvent::Created(_) => None,
            })
            .collect()
    }

    pub fn created(&self) -> Vec<Entity> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SceneEvent::Created(entity) => Some(*entity),
                SceneEvent::Destroyed(_) => None,
            })
            .collect()
    }
}

impl SceneGraph for RecordingScene {
    fn create_child(&mut self, name: &str, parent: Entity) -> Result<Entity, SceneError> {
        let entity = self.world.spawn_child(parent, name)?;
        self.events.push(SceneEvent::Created(entity));
        Ok(entity)
    }

    fn destroy(&mut self, entity: Entity, mode: DestroyMode) -> Result<(), SceneError> {
        self.world.destroy(entity, mode)?;
        self.events.push(SceneEvent::Destroyed(entity));
        Ok(())
    }

    fn descendants_with<T: Component>(&self, parent: Entity) -> Vec<Entity> {
        self.world.descendants_with::<T>(parent)
    }

    fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.world.get_component(entity)
    }

    fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.world.get_component_mut(entity)
    }

    fn add_component<T: Component>(&mut self, entity: Entity, component: T) -> Result<(), SceneError> {
        self.world.add_component(entity, component)
    }

    fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.world.remove_component(entity)
    }

    fn is_alive(&self, entity: Entity) -> bool {
        self.world.is_alive(entity)
    }
}

/// Collision source with directly scripted islands
///
/// Island `i` is a `size × 1` rectangle starting at `x = 10 * i`, so every
/// island has a distinct bounding-sphere center.
///
/// A non-zero `count_drift` is added to the island count once any path has
/// been read in the current request, mimicking geometry that changes while
/// it is being read.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    pub paths: Vec<Vec<Vec2>>,
    pub composite_requests: usize,
    pub count_drift: usize,
    paths_read: Cell<bool>,
}

impl ScriptedSource {
    pub fn with_islands(count: usize) -> Self {
        let mut source = Self::default();
        source.set_islands(count, 1.0);
        source
    }

    pub fn set_islands(&mut self, count: usize, size: f32) {
        self.paths = (0..count).map(|i| rect(island_x(i), size)).collect();
    }

    pub fn center_x(index: usize, size: f32) -> f32 {
        island_x(index) + size * 0.5
    }
}

#[allow(clippy::cast_precision_loss)]
fn island_x(index: usize) -> f32 {
    10.0 * index as f32
}

fn rect(x: f32, width: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(x, 0.0),
        Vec2::new(x + width, 0.0),
        Vec2::new(x + width, 1.0),
        Vec2::new(x, 1.0),
    ]
}

impl CollisionSource for ScriptedSource {
    fn set_composite_consumption(&mut self, enabled: bool) {
        if enabled {
            self.composite_requests += 1;
        }
        self.paths_read.set(false);
    }

    fn island_count(&self) -> usize {
        if self.paths_read.get() {
            self.paths.len() + self.count_drift
        } else {
            self.paths.len()
        }
    }

    fn get_path(&self, index: usize, out: &mut Vec<Vec2>) -> usize {
        self.paths_read.set(true);
        out.clear();
        if let Some(path) = self.paths.get(index) {
            out.extend_from_slice(path);
        }
        out.len()
    }
}

pub fn caster<'a>(scene: &'a RecordingScene, entity: Entity) -> &'a ShadowCaster {
    scene
        .world
        .get_component::<ShadowCaster>(entity)
        .expect("registered entity carries a ShadowCaster")
}

pub fn has_wrapper(scene: &RecordingScene, owner: Entity) -> bool {
    scene.world.has_component::<CompositeShadowCaster>(owner)
}
