//! Common sparse grid fixtures for volume sampling tests.
//!
//! All fixtures return grids with stamped `file_bbox_min`/`file_bbox_max`
//! metadata unless stated otherwise.

use std::sync::Arc;

use volume_sampler::grid::{FILE_BBOX_MAX, FILE_BBOX_MIN};
use volume_sampler::{Coord, IndexBoundingBox, MetaValue, SparseGrid, Transform};

use crate::generators::{constant_field, linear_ramp_field};

/// Common index-space bounds for testing.
pub mod bounds {
    use volume_sampler::{Coord, IndexBoundingBox};

    /// The unit cube (0,0,0)-(1,1,1).
    pub fn unit() -> IndexBoundingBox {
        IndexBoundingBox::new(Coord::new(0, 0, 0), Coord::new(1, 1, 1))
    }

    /// A 17-voxel cube (0,0,0)-(16,16,16), spanning several leaves.
    pub fn cube_16() -> IndexBoundingBox {
        IndexBoundingBox::new(Coord::new(0, 0, 0), Coord::new(16, 16, 16))
    }

    /// A box straddling the origin with negative coordinates.
    pub fn centered() -> IndexBoundingBox {
        IndexBoundingBox::new(Coord::new(-8, -4, -2), Coord::new(8, 4, 2))
    }
}

/// Grid whose only stored information is the unit-cube bounds metadata and a
/// background of `value`, so every sample reads `value`.
pub fn unit_constant_grid(value: f32) -> SparseGrid {
    let mut grid = SparseGrid::new(value).with_name("unit_constant");
    write_bounds(&mut grid, &bounds::unit());
    grid
}

/// Grid over `bbox` filled by `field`, with stamped bounds metadata.
pub fn grid_from_field<F>(name: &str, bbox: &IndexBoundingBox, transform: Transform, field: F) -> SparseGrid
where
    F: Fn(&Coord) -> f32,
{
    let mut grid = SparseGrid::new(0.0)
        .with_name(name)
        .with_transform(transform);
    grid.fill_box(bbox, field);
    grid.stamp_file_bbox();
    grid
}

/// Unit-cube grid ramping linearly from 0.0 at x=0 to 10.0 at x=1.
pub fn unit_ramp_grid() -> SparseGrid {
    grid_from_field(
        "unit_ramp",
        &bounds::unit(),
        Transform::identity(),
        linear_ramp_field(0, 0, 1, 0.0, 10.0),
    )
}

/// Constant field of `value` over the 16-cube with voxel size `voxel_size`.
pub fn cube_constant_grid(value: f32, voxel_size: f64) -> SparseGrid {
    grid_from_field(
        "cube_constant",
        &bounds::cube_16(),
        transform_with_voxel_size(voxel_size),
        constant_field(value),
    )
}

/// Grid with values but no bounds metadata at all.
pub fn grid_without_bounds() -> SparseGrid {
    let mut grid = SparseGrid::new(0.0).with_name("no_bounds");
    grid.fill_box(&bounds::unit(), constant_field(1.0));
    grid
}

/// Wrap a grid for use with `Volume`.
pub fn shared(grid: SparseGrid) -> Arc<SparseGrid> {
    Arc::new(grid)
}

/// Write explicit bounds metadata without looking at the grid contents.
pub fn write_bounds(grid: &mut SparseGrid, bbox: &IndexBoundingBox) {
    if let (Some(min), Some(max)) = (bbox.min(), bbox.max()) {
        grid.metadata_mut().insert(FILE_BBOX_MIN, MetaValue::Vec3i(min));
        grid.metadata_mut().insert(FILE_BBOX_MAX, MetaValue::Vec3i(max));
    }
}

/// Uniform voxel-size transform, panicking on invalid sizes.
pub fn transform_with_voxel_size(voxel_size: f64) -> Transform {
    Transform::from_voxel_size(voxel_size).expect("voxel size must be positive")
}
