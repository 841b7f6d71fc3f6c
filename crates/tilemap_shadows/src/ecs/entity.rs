//! Entity implementation

use bitflags::bitflags;

use crate::foundation::collections::new_key_type;

new_key_type! {
    /// Entity identifier
    ///
    /// Generational: a handle to a destroyed node never resolves to a node
    /// created later in the same slot.
    pub struct Entity;
}

bitflags! {
    /// Per-node state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u8 {
        /// Scheduled for destruction at the next flush
        const PENDING_DESTROY = 1 << 0;
    }
}
