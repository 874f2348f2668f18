//! Procedural scalar fields for baking.

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::debug;
use volume_sampler::{Coord, Grid, IndexBoundingBox, SparseGrid, Transform};

/// Field written into every voxel of the baked cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldKind {
    /// 1.0 everywhere.
    Constant,
    /// The voxel's x index.
    RampX,
    /// Signed distance to a sphere centred in the cube.
    Sphere,
}

impl FieldKind {
    fn value_at(&self, coord: &Coord, extent: i32) -> f32 {
        match self {
            FieldKind::Constant => 1.0,
            FieldKind::RampX => coord.x as f32,
            FieldKind::Sphere => {
                let center = extent as f32 / 2.0;
                let radius = extent as f32 / 3.0;
                let d = coord.cast::<f32>().add_scalar(-center);
                d.norm() - radius
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Constant => "constant",
            FieldKind::RampX => "ramp_x",
            FieldKind::Sphere => "sphere",
        }
    }
}

/// Build a grid over `[0, extent]` on every axis with uniform `voxel_size`
/// and stamped bounds metadata.
pub fn build_grid(kind: FieldKind, extent: i32, voxel_size: f64) -> Result<SparseGrid> {
    let transform = Transform::from_voxel_size(voxel_size)
        .with_context(|| format!("invalid voxel size {}", voxel_size))?;

    let bbox = IndexBoundingBox::new(Coord::zeros(), Coord::repeat(extent));
    if bbox.is_empty() {
        anyhow::bail!("extent must be non-negative, got {}", extent);
    }

    let mut grid = SparseGrid::new(0.0)
        .with_name(kind.name())
        .with_transform(transform);
    grid.fill_box(&bbox, |c| kind.value_at(c, extent));
    let stamped = grid.stamp_file_bbox();

    debug!(
        field = kind.name(),
        active = grid.active_voxel_count(),
        leaves = grid.leaf_count(),
        bbox = ?stamped,
        "Built procedural grid"
    );

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use volume_sampler::resolve_index_bbox;

    #[test]
    fn test_build_grid_bounds() {
        for kind in [FieldKind::Constant, FieldKind::RampX, FieldKind::Sphere] {
            let grid = build_grid(kind, 9, 1.0).unwrap();
            let bbox = resolve_index_bbox(&grid);
            assert_eq!(bbox.min(), Some(Coord::new(0, 0, 0)));
            assert_eq!(bbox.max(), Some(Coord::new(9, 9, 9)));
            assert_eq!(grid.active_voxel_count(), 1000);
        }
    }

    #[test]
    fn test_ramp_values() {
        let grid = build_grid(FieldKind::RampX, 4, 1.0).unwrap();
        assert_eq!(grid.value(&Coord::new(3, 1, 2)), 3.0);
    }

    #[test]
    fn test_sphere_sign() {
        let grid = build_grid(FieldKind::Sphere, 12, 1.0).unwrap();
        assert!(grid.value(&Coord::new(6, 6, 6)) < 0.0);
        assert!(grid.value(&Coord::new(0, 0, 0)) > 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(build_grid(FieldKind::Constant, 4, 0.0).is_err());
        assert!(build_grid(FieldKind::Constant, -1, 1.0).is_err());
    }
}
