//! Affine mapping between grid index space and world space.

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::types::{IndexBoundingBox, WorldBoundingBox};

/// Affine index-to-world transform with its cached inverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    index_to_world: Matrix4<f64>,
    world_to_index: Matrix4<f64>,
}

impl Transform {
    /// Identity transform: world coordinates equal index coordinates.
    pub fn identity() -> Self {
        Self {
            index_to_world: Matrix4::identity(),
            world_to_index: Matrix4::identity(),
        }
    }

    /// Uniform voxel size with the index origin at the world origin.
    ///
    /// Returns `None` if the voxel size is not positive.
    pub fn from_voxel_size(voxel_size: f64) -> Option<Self> {
        Self::from_voxel_size_and_origin(
            Vector3::repeat(voxel_size),
            Point3::origin(),
        )
    }

    /// Per-axis voxel size with index (0,0,0) placed at `origin`.
    pub fn from_voxel_size_and_origin(voxel_size: Vector3<f64>, origin: Point3<f64>) -> Option<Self> {
        if voxel_size.iter().any(|s| *s <= 0.0 || !s.is_finite()) {
            return None;
        }
        let matrix = Matrix4::new_translation(&origin.coords)
            * Matrix4::new_nonuniform_scaling(&voxel_size);
        Self::from_matrix(matrix)
    }

    /// Arbitrary affine matrix. Returns `None` if it cannot be inverted.
    pub fn from_matrix(index_to_world: Matrix4<f64>) -> Option<Self> {
        let world_to_index = index_to_world.try_inverse()?;
        Some(Self {
            index_to_world,
            world_to_index,
        })
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.index_to_world
    }

    /// Map an index-space position to world space.
    #[inline]
    pub fn index_to_world(&self, index: &Point3<f64>) -> Point3<f64> {
        self.index_to_world.transform_point(index)
    }

    /// Map a world-space position to (fractional) index space.
    #[inline]
    pub fn world_to_index(&self, world: &Point3<f64>) -> Point3<f64> {
        self.world_to_index.transform_point(world)
    }

    /// World-space box enclosing the eight transformed corners of `bbox`.
    ///
    /// The corners are treated as points, so a single-voxel box maps to a
    /// zero-size world box. The empty index box maps to the empty world box.
    pub fn index_bbox_to_world(&self, bbox: &IndexBoundingBox) -> WorldBoundingBox {
        let (min, max) = match (bbox.min(), bbox.max()) {
            (Some(min), Some(max)) => (min.cast::<f64>(), max.cast::<f64>()),
            _ => return WorldBoundingBox::empty(),
        };

        let mut world = WorldBoundingBox::empty();
        for corner in 0..8 {
            let index = Point3::new(
                if corner & 1 == 0 { min.x } else { max.x },
                if corner & 2 == 0 { min.y } else { max.y },
                if corner & 4 == 0 { min.z } else { max.z },
            );
            world.expand_to_include(&self.index_to_world(&index));
        }
        world
    }

    /// Length of one voxel edge along each axis in world units.
    pub fn voxel_size(&self) -> Vector3<f64> {
        let m = &self.index_to_world;
        Vector3::new(
            m.fixed_view::<3, 1>(0, 0).norm(),
            m.fixed_view::<3, 1>(0, 1).norm(),
            m.fixed_view::<3, 1>(0, 2).norm(),
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
