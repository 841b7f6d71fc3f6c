//! Shadow synchronizer settings

use serde::{Deserialize, Serialize};

use super::Config;
use crate::ecs::DestroyMode;

/// Name given to shadow caster nodes created by the synchronizer
pub const DEFAULT_CASTER_NAME: &str = "TMShadowCaster";

/// # Shadow Synchronizer Configuration
///
/// Plain mutable settings. The synchronizer snapshots them once at the start
/// of every pass, so edits made between passes take effect on the next one
/// for every caster, including casters whose geometry did not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSyncConfig {
    /// Use the renderer's silhouette when casting
    pub use_silhouette: bool,
    /// Whether the tilemap casts shadows onto itself
    pub self_shadow: bool,
    /// Treat all islands as one large caster instead of individual islands
    /// shadowing each other
    pub use_composite: bool,
    /// Name for newly created caster nodes
    pub caster_name: String,
    /// How removed casters are torn down
    pub destroy_mode: DestroyMode,
}

impl ShadowSyncConfig {
    /// Set the silhouette flag
    pub fn with_silhouette(mut self, enabled: bool) -> Self {
        self.use_silhouette = enabled;
        self
    }

    /// Set the self-shadow flag
    pub fn with_self_shadow(mut self, enabled: bool) -> Self {
        self.self_shadow = enabled;
        self
    }

    /// Set the composite flag
    pub fn with_composite(mut self, enabled: bool) -> Self {
        self.use_composite = enabled;
        self
    }

    /// Set the destruction mode
    pub fn with_destroy_mode(mut self, mode: DestroyMode) -> Self {
        self.destroy_mode = mode;
        self
    }
}

impl Default for ShadowSyncConfig {
    fn default() -> Self {
        Self {
            use_silhouette: true,
            self_shadow: false,
            use_composite: false,
            caster_name: DEFAULT_CASTER_NAME.to_string(),
            destroy_mode: DestroyMode::Immediate,
        }
    }
}

impl Config for ShadowSyncConfig {}
