//! Scene graph abstraction
//!
//! The synchronizer never creates or destroys nodes itself. Every lifetime
//! operation goes through the [`SceneGraph`] trait so the host engine decides
//! how nodes are allocated and reclaimed:
//!
//! ```text
//! ShadowSynchronizer
//!      ↓  create_child / destroy / descendants_with / components
//! SceneGraph (trait)
//!      ↓
//! World (reference arena) or a host engine adapter
//! ```

mod scene_graph;

pub use scene_graph::{SceneGraph, SceneError};
