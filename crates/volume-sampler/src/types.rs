//! Core types for volume sampling.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VolumeError};

/// Integer coordinate in grid index space.
pub type Coord = Vector3<i32>;

/// Number of channel slots written per lattice voxel.
///
/// The destination texture is RGBA; every channel receives the same sample.
pub const CHANNELS_PER_VOXEL: usize = 4;

/// Inclusive bounding box in grid index space.
///
/// An empty box is a distinct state rather than a box with `min > max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexBoundingBox {
    bounds: Option<(Coord, Coord)>,
}

impl IndexBoundingBox {
    /// Create a bounding box from inclusive corners.
    ///
    /// Returns the empty box if `min` exceeds `max` on any axis.
    pub fn new(min: Coord, max: Coord) -> Self {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Self::empty();
        }
        Self {
            bounds: Some((min, max)),
        }
    }

    /// The empty bounding box.
    pub fn empty() -> Self {
        Self { bounds: None }
    }

    /// Check if the box contains no voxels.
    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Minimum corner, if the box is non-empty.
    pub fn min(&self) -> Option<Coord> {
        self.bounds.map(|(min, _)| min)
    }

    /// Maximum corner, if the box is non-empty.
    pub fn max(&self) -> Option<Coord> {
        self.bounds.map(|(_, max)| max)
    }

    /// Number of voxels along each axis (zero for the empty box).
    pub fn dim(&self) -> Vector3<u64> {
        match self.bounds {
            Some((min, max)) => Vector3::new(
                (i64::from(max.x) - i64::from(min.x) + 1) as u64,
                (i64::from(max.y) - i64::from(min.y) + 1) as u64,
                (i64::from(max.z) - i64::from(min.z) + 1) as u64,
            ),
            None => Vector3::zeros(),
        }
    }

    /// Total number of voxels enclosed.
    pub fn volume(&self) -> u64 {
        let dim = self.dim();
        dim.x * dim.y * dim.z
    }

    /// Check if a coordinate lies inside the box.
    pub fn contains(&self, coord: &Coord) -> bool {
        match self.bounds {
            Some((min, max)) => {
                coord.x >= min.x
                    && coord.x <= max.x
                    && coord.y >= min.y
                    && coord.y <= max.y
                    && coord.z >= min.z
                    && coord.z <= max.z
            }
            None => false,
        }
    }

    /// Grow the box so it includes `coord`.
    pub fn expand_to_include(&mut self, coord: &Coord) {
        self.bounds = Some(match self.bounds {
            Some((min, max)) => (
                Coord::new(min.x.min(coord.x), min.y.min(coord.y), min.z.min(coord.z)),
                Coord::new(max.x.max(coord.x), max.y.max(coord.y), max.z.max(coord.z)),
            ),
            None => (*coord, *coord),
        });
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldBoundingBox {
    bounds: Option<(Point3<f64>, Point3<f64>)>,
}

impl WorldBoundingBox {
    /// Smallest box enclosing both points.
    pub fn from_corners(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            bounds: Some((point_min(&a, &b), point_max(&a, &b))),
        }
    }

    /// The empty world box.
    pub fn empty() -> Self {
        Self { bounds: None }
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// Minimum corner, if the box is non-empty.
    pub fn min(&self) -> Option<Point3<f64>> {
        self.bounds.map(|(min, _)| min)
    }

    /// Maximum corner, if the box is non-empty.
    pub fn max(&self) -> Option<Point3<f64>> {
        self.bounds.map(|(_, max)| max)
    }

    /// Size of the box along each axis (zero for the empty box).
    pub fn extents(&self) -> Vector3<f64> {
        match self.bounds {
            Some((min, max)) => max - min,
            None => Vector3::zeros(),
        }
    }

    /// Grow the box so it includes `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.bounds = Some(match self.bounds {
            Some((min, max)) => (point_min(&min, point), point_max(&max, point)),
            None => (*point, *point),
        });
    }
}

fn point_min(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z))
}

fn point_max(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z))
}

/// Resolution of the destination lattice.
///
/// All dimensions are at least 1 and the full sample count is addressable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeExtents {
    width: u32,
    height: u32,
    depth: u32,
}

impl LatticeExtents {
    /// Create lattice extents, rejecting zero-volume or unaddressable sizes.
    pub fn new(width: u32, height: u32, depth: u32) -> Result<Self> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(VolumeError::InvalidExtents {
                width,
                height,
                depth,
            });
        }

        let samples = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(depth as usize))
            .and_then(|n| n.checked_mul(CHANNELS_PER_VOXEL));
        if samples.is_none() {
            return Err(VolumeError::ExtentsTooLarge {
                width,
                height,
                depth,
            });
        }

        Ok(Self {
            width,
            height,
            depth,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of lattice cells (`width * height * depth`).
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Number of buffer slots needed to hold the lattice.
    pub fn sample_count(&self) -> usize {
        self.cell_count() * CHANNELS_PER_VOXEL
    }

    /// Number of x-rows in the lattice (`height * depth`).
    pub fn row_count(&self) -> usize {
        self.height as usize * self.depth as usize
    }

    /// Flat offset of the first channel slot of cell `(x, y, z)`.
    pub fn sample_offset(&self, x: u32, y: u32, z: u32) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        (x as usize + y as usize * width + z as usize * width * height) * CHANNELS_PER_VOXEL
    }

    /// Extents as a floating point vector.
    pub fn as_vector(&self) -> Vector3<f64> {
        Vector3::new(
            f64::from(self.width),
            f64::from(self.height),
            f64::from(self.depth),
        )
    }
}

impl std::fmt::Display for LatticeExtents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Texture format of the destination buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextureFormat {
    /// Four 32-bit float channels per voxel.
    #[default]
    RgbaFloat,
}

impl TextureFormat {
    /// Numeric tag understood by the texture consumer.
    pub fn code(&self) -> i32 {
        match self {
            Self::RgbaFloat => 20,
        }
    }
}

/// Summary of a volume, read by the caller after each fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub voxel_count: u64,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub texture_format: i32,
    /// Smallest raw sample seen by the last successful fill.
    pub min_value: f32,
    /// Largest raw sample seen by the last successful fill.
    pub max_value: f32,
    /// World-space size along x, multiplied by the volume's scale factor.
    pub x_scale: f32,
    pub y_scale: f32,
    pub z_scale: f32,
}

impl VolumeSummary {
    /// Create a summary with fixed counts and cleared range/scale fields.
    pub fn new(extents: &LatticeExtents, format: TextureFormat) -> Self {
        Self {
            voxel_count: extents.cell_count() as u64,
            width: extents.width(),
            height: extents.height(),
            depth: extents.depth(),
            texture_format: format.code(),
            min_value: 0.0,
            max_value: 0.0,
            x_scale: 0.0,
            y_scale: 0.0,
            z_scale: 0.0,
        }
    }

    /// Clear the fields written by a fill.
    pub fn clear_results(&mut self) {
        self.min_value = 0.0;
        self.max_value = 0.0;
        self.x_scale = 0.0;
        self.y_scale = 0.0;
        self.z_scale = 0.0;
    }

    /// Serialize the summary as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
