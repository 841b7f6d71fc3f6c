//! Specialized collection types

pub use slotmap::{new_key_type, SecondaryMap, SlotMap};

/// Handle-keyed dense storage for per-node data
///
/// Component columns are keyed by the same generational handles as the node
/// arena, so a destroyed node's stale handle can never alias a new node's data.
pub type HandleMap<K, T> = SecondaryMap<K, T>;
