//! In-memory sparse grid backed by fixed-size leaf blocks.
//!
//! Voxels are grouped into 8x8x8 leaves stored in a hash map keyed by the
//! leaf origin. Voxels that were never written read back as the background
//! value, so the grid covers an unbounded index domain while only storing
//! the touched blocks.

use std::collections::HashMap;

use nalgebra::Point3;
use tracing::debug;

use super::interpolation::sample_trilinear;
use super::metadata::{MetaValue, Metadata, FILE_BBOX_MAX, FILE_BBOX_MIN};
use super::transform::Transform;
use super::Grid;
use crate::types::{Coord, IndexBoundingBox};

const LEAF_LOG2: i32 = 3;
const LEAF_DIM: i32 = 1 << LEAF_LOG2;
const LEAF_MASK: i32 = LEAF_DIM - 1;
const LEAF_VOXELS: usize = (LEAF_DIM * LEAF_DIM * LEAF_DIM) as usize;

/// Dense block of voxels with a per-voxel active flag.
#[derive(Debug, Clone)]
struct Leaf {
    values: Box<[f32; LEAF_VOXELS]>,
    active: [u64; LEAF_VOXELS / 64],
}

impl Leaf {
    fn new(background: f32) -> Self {
        Self {
            values: Box::new([background; LEAF_VOXELS]),
            active: [0; LEAF_VOXELS / 64],
        }
    }

    #[inline]
    fn offset(coord: &Coord) -> usize {
        ((coord.x & LEAF_MASK)
            | ((coord.y & LEAF_MASK) << LEAF_LOG2)
            | ((coord.z & LEAF_MASK) << (2 * LEAF_LOG2))) as usize
    }

    #[inline]
    fn is_active(&self, offset: usize) -> bool {
        self.active[offset / 64] & (1 << (offset % 64)) != 0
    }

    fn set(&mut self, offset: usize, value: f32) {
        self.values[offset] = value;
        self.active[offset / 64] |= 1 << (offset % 64);
    }

    fn active_count(&self) -> u64 {
        self.active.iter().map(|word| u64::from(word.count_ones())).sum()
    }

    fn local_coord(offset: usize) -> Coord {
        let offset = offset as i32;
        Coord::new(
            offset & LEAF_MASK,
            (offset >> LEAF_LOG2) & LEAF_MASK,
            (offset >> (2 * LEAF_LOG2)) & LEAF_MASK,
        )
    }
}

/// Sparse scalar grid with a background value.
#[derive(Debug, Clone)]
pub struct SparseGrid {
    name: String,
    background: f32,
    transform: Transform,
    metadata: Metadata,
    leaves: HashMap<Coord, Leaf>,
}

impl SparseGrid {
    /// Create an empty grid where every voxel reads `background`.
    pub fn new(background: f32) -> Self {
        Self {
            name: String::new(),
            background,
            transform: Transform::identity(),
            metadata: Metadata::new(),
            leaves: HashMap::new(),
        }
    }

    /// Replace the index-to-world transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the grid name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn background(&self) -> f32 {
        self.background
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    #[inline]
    fn leaf_origin(coord: &Coord) -> Coord {
        Coord::new(coord.x & !LEAF_MASK, coord.y & !LEAF_MASK, coord.z & !LEAF_MASK)
    }

    /// Store a value and mark the voxel active.
    pub fn set_value(&mut self, coord: &Coord, value: f32) {
        let background = self.background;
        self.leaves
            .entry(Self::leaf_origin(coord))
            .or_insert_with(|| Leaf::new(background))
            .set(Leaf::offset(coord), value);
    }

    /// Value at `coord`, or the background if nothing was stored there.
    #[inline]
    pub fn value(&self, coord: &Coord) -> f32 {
        match self.leaves.get(&Self::leaf_origin(coord)) {
            Some(leaf) => leaf.values[Leaf::offset(coord)],
            None => self.background,
        }
    }

    pub fn is_active(&self, coord: &Coord) -> bool {
        self.leaves
            .get(&Self::leaf_origin(coord))
            .map(|leaf| leaf.is_active(Leaf::offset(coord)))
            .unwrap_or(false)
    }

    /// Number of allocated leaf blocks.
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Write `f(coord)` into every voxel of `bbox`.
    pub fn fill_box<F>(&mut self, bbox: &IndexBoundingBox, f: F)
    where
        F: Fn(&Coord) -> f32,
    {
        let (min, max) = match (bbox.min(), bbox.max()) {
            (Some(min), Some(max)) => (min, max),
            _ => return,
        };
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    let coord = Coord::new(x, y, z);
                    let value = f(&coord);
                    self.set_value(&coord, value);
                }
            }
        }
    }

    /// Iterate over active voxels and their values, in no particular order.
    pub fn iter_active(&self) -> impl Iterator<Item = (Coord, f32)> + '_ {
        self.leaves.iter().flat_map(|(origin, leaf)| {
            (0..LEAF_VOXELS)
                .filter(move |offset| leaf.is_active(*offset))
                .map(move |offset| (origin + Leaf::local_coord(offset), leaf.values[offset]))
        })
    }

    /// Tight index-space bounds of all active voxels.
    pub fn eval_active_bbox(&self) -> IndexBoundingBox {
        let mut bbox = IndexBoundingBox::empty();
        for (coord, _) in self.iter_active() {
            bbox.expand_to_include(&coord);
        }
        bbox
    }

    /// Record the active bounds under the `file_bbox_min`/`file_bbox_max`
    /// metadata keys, the way grids are annotated when written to disk.
    ///
    /// An empty grid records the sentinel corners (`i32::MAX` for the
    /// minimum, `i32::MIN` for the maximum).
    pub fn stamp_file_bbox(&mut self) -> IndexBoundingBox {
        let bbox = self.eval_active_bbox();
        let (min, max) = match (bbox.min(), bbox.max()) {
            (Some(min), Some(max)) => (min, max),
            _ => (Coord::repeat(i32::MAX), Coord::repeat(i32::MIN)),
        };
        self.metadata.insert(FILE_BBOX_MIN, MetaValue::Vec3i(min));
        self.metadata.insert(FILE_BBOX_MAX, MetaValue::Vec3i(max));
        debug!(
            grid = %self.name,
            empty = bbox.is_empty(),
            min = ?min,
            max = ?max,
            "Stamped file bounding box metadata"
        );
        bbox
    }
}

impl Grid for SparseGrid {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn sample_world(&self, position: &Point3<f64>) -> f32 {
        let index = self.transform.world_to_index(position);
        sample_trilinear(&index, |coord| self.value(coord))
    }

    fn active_voxel_count(&self) -> u64 {
        self.leaves.values().map(Leaf::active_count).sum()
    }
}
