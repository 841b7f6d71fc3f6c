//! Entity-Component-System implementation
//!
//! A deliberately small ECS: an arena of named nodes arranged in a parent/child
//! hierarchy, with type-erased component columns keyed by generational handles.
//! It is the default host for shadow casters and the reference implementation
//! of [`SceneGraph`](crate::scene::SceneGraph).

pub mod world;
pub mod entity;
pub mod component;

pub use world::{World, DestroyMode};
pub use entity::{Entity, NodeFlags};
pub use component::Component;
