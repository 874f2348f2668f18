//! Grid abstraction consumed by the volume sampler.
//!
//! A grid is an immutable scalar field over integer coordinates, positioned
//! in world space by an affine [`Transform`] and carrying typed
//! [`Metadata`]. The sampler only ever reads from a grid, possibly from many
//! worker threads at once.

pub mod interpolation;
pub mod metadata;
pub mod sparse;
pub mod transform;

pub use metadata::{MetaValue, Metadata, MetadataError, FILE_BBOX_MAX, FILE_BBOX_MIN};
pub use sparse::SparseGrid;
pub use transform::Transform;

use nalgebra::Point3;

/// Read-only access to a sparse scalar grid.
///
/// Implementations must be safe to sample concurrently.
pub trait Grid: Send + Sync {
    /// Human-readable grid name for diagnostics.
    fn name(&self) -> &str;

    /// Index-to-world transform of the grid.
    fn transform(&self) -> &Transform;

    /// Metadata stored alongside the grid.
    fn metadata(&self) -> &Metadata;

    /// Sample the field at a world-space position with trilinear
    /// interpolation.
    fn sample_world(&self, position: &Point3<f64>) -> f32;

    /// Number of explicitly stored voxels.
    fn active_voxel_count(&self) -> u64;
}
