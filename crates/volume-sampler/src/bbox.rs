//! Resolution of a grid's occupied index-space bounds.
//!
//! Grids written to disk carry their active bounds as `file_bbox_min` and
//! `file_bbox_max` metadata. The bounds are only a hint: when they are
//! missing, mistyped or hold the sentinel corners of an empty box, the grid
//! is treated as having no extent and sampling is skipped.

use thiserror::Error;
use tracing::debug;

use crate::grid::{Grid, Metadata, MetadataError, FILE_BBOX_MAX, FILE_BBOX_MIN};
use crate::types::{Coord, IndexBoundingBox};

/// Why stored bounds could not be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundsFallback {
    /// A metadata key was absent or had the wrong type.
    #[error("{0}")]
    Lookup(MetadataError),

    /// The minimum corner holds `i32::MAX` on some axis.
    #[error("file_bbox_min is the empty sentinel {0:?}")]
    MinSentinel(Coord),

    /// The maximum corner holds `i32::MIN` on some axis.
    #[error("file_bbox_max is the empty sentinel {0:?}")]
    MaxSentinel(Coord),

    /// The stored minimum exceeds the stored maximum.
    #[error("stored bounds are inverted: min {min:?} > max {max:?}")]
    Inverted { min: Coord, max: Coord },
}

/// Read the stored bounds, reporting why they are unusable.
pub fn stored_index_bbox(metadata: &Metadata) -> Result<IndexBoundingBox, BoundsFallback> {
    let min = metadata.vec3i(FILE_BBOX_MIN).map_err(BoundsFallback::Lookup)?;
    if min.iter().any(|v| *v == i32::MAX) {
        return Err(BoundsFallback::MinSentinel(min));
    }

    let max = metadata.vec3i(FILE_BBOX_MAX).map_err(BoundsFallback::Lookup)?;
    if max.iter().any(|v| *v == i32::MIN) {
        return Err(BoundsFallback::MaxSentinel(max));
    }

    let bbox = IndexBoundingBox::new(min, max);
    if bbox.is_empty() {
        return Err(BoundsFallback::Inverted { min, max });
    }
    Ok(bbox)
}

/// Index-space bounding box of a grid, or the empty box when the grid has
/// no usable stored bounds.
pub fn resolve_index_bbox<G: Grid + ?Sized>(grid: &G) -> IndexBoundingBox {
    match stored_index_bbox(grid.metadata()) {
        Ok(bbox) => bbox,
        Err(reason) => {
            debug!(grid = %grid.name(), reason = %reason, "No usable stored bounds");
            IndexBoundingBox::empty()
        }
    }
}
