//! Parallel lattice writer with per-partition range reduction.
//!
//! The lattice is split into partitions of whole x-rows. Each partition owns
//! the disjoint buffer slice for its rows and its own [`ValueRange`]; the
//! ranges are collected in partition order and merged once all partitions
//! have finished.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::grid::Grid;
use crate::range::ValueRange;
use crate::sampler::LatticeSampler;
use crate::types::{LatticeExtents, CHANNELS_PER_VOXEL};

/// Sample every lattice cell into `buffer` and return the range of the raw
/// samples.
///
/// Each cell's value is written to all [`CHANNELS_PER_VOXEL`] slots at
/// offset `(x + y * width + z * width * height) * 4`.
///
/// Returns `None` without touching the buffer when the sampler covers an
/// empty world box or the buffer is too short for the lattice.
pub fn write_lattice<G: Grid + ?Sized>(
    sampler: &LatticeSampler<'_, G>,
    extents: &LatticeExtents,
    buffer: &mut [f32],
    rows_per_partition: usize,
) -> Option<ValueRange> {
    if sampler.world_bbox().is_empty() {
        debug!("World bounding box is empty, nothing to sample");
        return None;
    }

    let sample_count = extents.sample_count();
    if buffer.len() < sample_count {
        warn!(
            required = sample_count,
            actual = buffer.len(),
            "Destination buffer too small for lattice"
        );
        return None;
    }

    let height = extents.height() as usize;
    let row_len = extents.width() as usize * CHANNELS_PER_VOXEL;
    let rows_per_partition = rows_per_partition.clamp(1, extents.row_count());
    let partition_len = rows_per_partition * row_len;

    // One accumulator per partition, indexed by partition id.
    let partition_ranges: Vec<ValueRange> = buffer[..sample_count]
        .par_chunks_mut(partition_len)
        .enumerate()
        .map(|(partition, slab)| {
            let mut range = ValueRange::new();
            let first_row = partition * rows_per_partition;

            for (i, row) in slab.chunks_exact_mut(row_len).enumerate() {
                let row_index = first_row + i;
                let y = (row_index % height) as u32;
                let z = (row_index / height) as u32;

                for (x, voxel) in row.chunks_exact_mut(CHANNELS_PER_VOXEL).enumerate() {
                    let value = sampler.sample(x as u32, y, z);
                    voxel.fill(value);
                    range.add_value(value);
                }
            }

            range
        })
        .collect();

    let range = partition_ranges
        .iter()
        .fold(ValueRange::new(), |acc, partition| acc.merged(partition));

    debug!(
        partitions = partition_ranges.len(),
        cells = extents.cell_count(),
        min = range.min(),
        max = range.max(),
        "Sampled lattice"
    );

    Some(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{SparseGrid, Transform};
    use crate::types::{Coord, IndexBoundingBox, WorldBoundingBox};

    fn ramp_grid() -> (SparseGrid, IndexBoundingBox) {
        let mut grid = SparseGrid::new(0.0)
            .with_transform(Transform::from_voxel_size(1.0).unwrap());
        let bbox = IndexBoundingBox::new(Coord::new(0, 0, 0), Coord::new(6, 6, 6));
        grid.fill_box(&bbox, |c| (c.x + 10 * c.y + 100 * c.z) as f32);
        (grid, bbox)
    }

    #[test]
    fn test_all_slots_written_and_replicated() {
        let (grid, bbox) = ramp_grid();
        let extents = LatticeExtents::new(3, 4, 5).unwrap();
        let world = grid.transform().index_bbox_to_world(&bbox);
        let sampler = LatticeSampler::new(&grid, &extents, world);

        let mut buffer = vec![f32::NAN; extents.sample_count()];
        let range = write_lattice(&sampler, &extents, &mut buffer, 2).unwrap();

        for voxel in buffer.chunks_exact(CHANNELS_PER_VOXEL) {
            assert!(!voxel[0].is_nan());
            assert!(voxel.iter().all(|v| *v == voxel[0]));
        }

        let expected: ValueRange = buffer.iter().copied().collect();
        assert_eq!(range, expected);
    }

    #[test]
    fn test_offsets_match_cell_layout() {
        let (grid, bbox) = ramp_grid();
        let extents = LatticeExtents::new(3, 4, 5).unwrap();
        let world = grid.transform().index_bbox_to_world(&bbox);
        let sampler = LatticeSampler::new(&grid, &extents, world);

        let mut buffer = vec![0.0; extents.sample_count()];
        write_lattice(&sampler, &extents, &mut buffer, 1).unwrap();

        for z in 0..5 {
            for y in 0..4 {
                for x in 0..3 {
                    let offset = extents.sample_offset(x, y, z);
                    assert_eq!(buffer[offset], sampler.sample(x, y, z));
                }
            }
        }
    }

    #[test]
    fn test_partition_size_does_not_change_output() {
        let (grid, bbox) = ramp_grid();
        let extents = LatticeExtents::new(5, 3, 7).unwrap();
        let world = grid.transform().index_bbox_to_world(&bbox);
        let sampler = LatticeSampler::new(&grid, &extents, world);

        let mut reference = vec![0.0; extents.sample_count()];
        let reference_range = write_lattice(&sampler, &extents, &mut reference, 1).unwrap();

        for rows in [2, 3, 7, 21, 1000] {
            let mut buffer = vec![0.0; extents.sample_count()];
            let range = write_lattice(&sampler, &extents, &mut buffer, rows).unwrap();
            assert_eq!(buffer, reference, "rows per partition {}", rows);
            assert_eq!(range, reference_range);
        }
    }

    #[test]
    fn test_oversized_partition_is_one_slab() {
        let (grid, bbox) = ramp_grid();
        let extents = LatticeExtents::new(3, 2, 2).unwrap();
        let world = grid.transform().index_bbox_to_world(&bbox);
        let sampler = LatticeSampler::new(&grid, &extents, world);

        let mut reference = vec![0.0; extents.sample_count()];
        let reference_range = write_lattice(&sampler, &extents, &mut reference, 1).unwrap();

        let mut buffer = vec![0.0; extents.sample_count()];
        let range = write_lattice(&sampler, &extents, &mut buffer, usize::MAX).unwrap();
        assert_eq!(buffer, reference);
        assert_eq!(range, reference_range);
    }

    #[test]
    fn test_empty_world_box_leaves_buffer() {
        let grid = SparseGrid::new(1.0);
        let extents = LatticeExtents::new(2, 2, 2).unwrap();
        let sampler = LatticeSampler::new(&grid, &extents, WorldBoundingBox::empty());

        let mut buffer = vec![-7.0; extents.sample_count()];
        assert!(write_lattice(&sampler, &extents, &mut buffer, 4).is_none());
        assert!(buffer.iter().all(|v| *v == -7.0));
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let (grid, bbox) = ramp_grid();
        let extents = LatticeExtents::new(2, 2, 2).unwrap();
        let world = grid.transform().index_bbox_to_world(&bbox);
        let sampler = LatticeSampler::new(&grid, &extents, world);

        let mut buffer = vec![-7.0; extents.sample_count() - 1];
        assert!(write_lattice(&sampler, &extents, &mut buffer, 4).is_none());
        assert!(buffer.iter().all(|v| *v == -7.0));
    }
}
