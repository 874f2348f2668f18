//! Sparse Volume to 3D Texture Sampler
//!
//! This crate converts a sparse scalar grid (an unbounded field of values
//! addressed by integer coordinates) into a dense lattice of normalized
//! samples ready to upload as a 3D texture. It provides:
//!
//! - **Bounds resolution**: Occupied index-space extent from stored metadata
//! - **Lattice sampling**: Cell-centred trilinear sampling in world space
//! - **Parallel reduction**: Per-partition min/max merged after the join
//! - **Normalization**: In-place remap of every sample into [0, 1]
//!
//! # Architecture
//!
//! ```text
//! Volume::fill_buffer(dest)
//!      │
//!      ├─► resolve_index_bbox(grid)
//!      │
//!      ├─► LatticeSampler (world bbox + lattice extents)
//!      │
//!      ├─► write_lattice          rayon over x-row partitions
//!      │         │
//!      │         └─► per-partition ValueRange, merged in order
//!      │
//!      ├─► normalize_samples      rayon over flat buffer chunks
//!      │
//!      └─► VolumeSummary          range + world scale
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use volume_sampler::{Coord, IndexBoundingBox, LatticeExtents, SparseGrid, Volume};
//!
//! let mut grid = SparseGrid::new(0.0).with_name("density");
//! let bbox = IndexBoundingBox::new(Coord::new(0, 0, 0), Coord::new(7, 7, 7));
//! grid.fill_box(&bbox, |c| c.x as f32);
//! grid.stamp_file_bbox();
//!
//! let extents = LatticeExtents::new(4, 4, 4)?;
//! let mut volume = Volume::new(Arc::new(grid), extents)?;
//!
//! let mut texture = vec![0.0f32; volume.required_samples()];
//! volume.fill_buffer(Some(&mut texture))?;
//!
//! assert_eq!(volume.summary().x_scale, 7.0);
//! # Ok::<(), volume_sampler::VolumeError>(())
//! ```

pub mod bbox;
pub mod config;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod range;
pub mod sampler;
pub mod types;
pub mod volume;
pub mod writer;

// Re-export commonly used types at crate root
pub use bbox::{resolve_index_bbox, stored_index_bbox, BoundsFallback};
pub use config::{DegenerateRangePolicy, VolumeConfig};
pub use error::{Result, VolumeError};
pub use grid::{Grid, MetaValue, Metadata, MetadataError, SparseGrid, Transform};
pub use normalize::normalize_samples;
pub use range::ValueRange;
pub use sampler::LatticeSampler;
pub use types::{
    Coord, IndexBoundingBox, LatticeExtents, TextureFormat, VolumeSummary, WorldBoundingBox,
    CHANNELS_PER_VOXEL,
};
pub use volume::{Volume, VolumeState};
pub use writer::write_lattice;
