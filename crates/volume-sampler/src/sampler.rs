//! Cell-centred lattice sampling of a grid.

use nalgebra::{Point3, Vector3};

use crate::grid::Grid;
use crate::types::{LatticeExtents, WorldBoundingBox};

/// Maps lattice cells to world-space positions inside a bounding box and
/// samples the grid there.
///
/// Stateless once built; safe to share between worker threads.
pub struct LatticeSampler<'g, G: Grid + ?Sized> {
    grid: &'g G,
    world_bbox: WorldBoundingBox,
    origin: Point3<f64>,
    cell_size: Vector3<f64>,
}

impl<'g, G: Grid + ?Sized> LatticeSampler<'g, G> {
    pub fn new(grid: &'g G, extents: &LatticeExtents, world_bbox: WorldBoundingBox) -> Self {
        let origin = world_bbox.min().unwrap_or_else(Point3::origin);
        let cell_size = world_bbox.extents().component_div(&extents.as_vector());
        Self {
            grid,
            world_bbox,
            origin,
            cell_size,
        }
    }

    /// The world-space region covered by the lattice.
    pub fn world_bbox(&self) -> &WorldBoundingBox {
        &self.world_bbox
    }

    /// World-space centre of lattice cell `(x, y, z)`.
    ///
    /// `world_min + (index + 0.5) / lattice_extents * world_extents`
    #[inline]
    pub fn cell_center(&self, x: u32, y: u32, z: u32) -> Point3<f64> {
        let index = Vector3::new(f64::from(x), f64::from(y), f64::from(z)).add_scalar(0.5);
        self.origin + index.component_mul(&self.cell_size)
    }

    /// Sample the grid at the centre of cell `(x, y, z)`.
    #[inline]
    pub fn sample(&self, x: u32, y: u32, z: u32) -> f32 {
        self.grid.sample_world(&self.cell_center(x, y, z))
    }
}
