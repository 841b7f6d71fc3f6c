//! Composite wrapper decision
//!
//! The wrapper exists exactly when composite mode is on and there is more
//! than one island to merge. Turning the mode off always removes it.

use super::SyncError;
use crate::ecs::Entity;
use crate::scene::SceneGraph;
use crate::shadow::CompositeShadowCaster;

/// What the composite stage did to the owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeAction {
    /// Wrapper added
    Create,
    /// Wrapper removed
    Destroy,
    /// Already in the right state
    Unchanged,
}

/// Decide the wrapper action for one pass
pub fn decide_composite(island_count: usize, composite_enabled: bool, wrapper_exists: bool) -> CompositeAction {
    let wanted = composite_enabled && island_count > 1;
    match (wanted, wrapper_exists) {
        (true, false) => CompositeAction::Create,
        (false, true) => CompositeAction::Destroy,
        _ => CompositeAction::Unchanged,
    }
}

/// Bring the wrapper on `owner` in line with the current island count
pub fn apply_composite<G: SceneGraph>(
    scene: &mut G,
    owner: Entity,
    island_count: usize,
    composite_enabled: bool,
) -> Result<CompositeAction, SyncError> {
    let exists = scene.get_component::<CompositeShadowCaster>(owner).is_some();
    let action = decide_composite(island_count, composite_enabled, exists);

    match action {
        CompositeAction::Create => {
            scene.add_component(owner, CompositeShadowCaster)?;
            log::debug!("Added composite shadow caster for {} islands", island_count);
        }
        CompositeAction::Destroy => {
            scene.remove_component::<CompositeShadowCaster>(owner);
            log::debug!("Removed composite shadow caster");
        }
        CompositeAction::Unchanged => {}
    }

    Ok(action)
}
