//! Island extraction

use super::SyncError;
use crate::collision::{CollisionSource, IslandPolygon};

/// Read every island outline from `source` into `islands`
///
/// `islands` is resized to the island count and each entry refilled in place,
/// so point buffers are reused from pass to pass. Source order is kept as is.
///
/// The count is queried again after the paths are read; if it moved, the
/// outlines may belong to two different geometries and the pass must not use
/// them.
pub fn extract_islands<S>(source: &mut S, islands: &mut Vec<IslandPolygon>) -> Result<usize, SyncError>
where
    S: CollisionSource + ?Sized,
{
    source.set_composite_consumption(true);

    let count = source.island_count();
    islands.truncate(count);
    islands.resize_with(count, IslandPolygon::default);

    for (index, island) in islands.iter_mut().enumerate() {
        source.get_path(index, island.points_mut());
    }

    let recount = source.island_count();
    if recount != count {
        return Err(SyncError::InconsistentSource {
            expected: count,
            actual: recount,
        });
    }

    Ok(count)
}
