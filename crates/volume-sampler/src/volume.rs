//! Volume facade: turns a grid into a filled texture buffer plus summary.
//!
//! A [`Volume`] is created once per grid with a fixed lattice resolution.
//! Every call to [`Volume::fill_buffer`] recomputes the lattice from scratch:
//!
//! ```text
//! fill_buffer(dest)
//!      │
//!      ├─► resolve_index_bbox(grid)        stored bounds or empty
//!      │
//!      ├─► transform.index_bbox_to_world   world min corner + extents
//!      │
//!      ├─► write_lattice                   raw samples, reduced range
//!      │
//!      ├─► normalize_samples               rescale to [0, 1]
//!      │
//!      └─► publish range and scale into the summary
//! ```
//!
//! A failed fill leaves both the summary and the destination untouched.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::bbox::resolve_index_bbox;
use crate::config::VolumeConfig;
use crate::error::{Result, VolumeError};
use crate::grid::Grid;
use crate::normalize::normalize_samples;
use crate::sampler::LatticeSampler;
use crate::types::{LatticeExtents, TextureFormat, VolumeSummary};
use crate::writer::write_lattice;

/// Lifecycle state of a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeState {
    /// Summary counts are fixed, no samples have been produced.
    Constructed,
    /// The last fill succeeded and the summary reflects it.
    Filled,
}

/// A grid bound to a fixed lattice resolution.
#[derive(Debug)]
pub struct Volume<G: Grid> {
    grid: Arc<G>,
    extents: LatticeExtents,
    config: VolumeConfig,
    scale_factor: f32,
    summary: VolumeSummary,
    state: VolumeState,
}

impl<G: Grid> Volume<G> {
    /// Create a volume with the default configuration.
    pub fn new(grid: Arc<G>, extents: LatticeExtents) -> Result<Self> {
        Self::with_config(grid, extents, VolumeConfig::default())
    }

    /// Create a volume with an explicit configuration.
    pub fn with_config(grid: Arc<G>, extents: LatticeExtents, config: VolumeConfig) -> Result<Self> {
        config.validate()?;

        debug!(
            grid = %grid.name(),
            active_voxels = grid.active_voxel_count(),
            metadata_entries = grid.metadata().len(),
            voxel_size = ?grid.transform().voxel_size(),
            extents = %extents,
            "Creating volume"
        );

        let summary = VolumeSummary::new(&extents, TextureFormat::RgbaFloat);
        Ok(Self {
            grid,
            extents,
            config,
            scale_factor: 1.0,
            summary,
            state: VolumeState::Constructed,
        })
    }

    pub fn grid(&self) -> &Arc<G> {
        &self.grid
    }

    pub fn extents(&self) -> &LatticeExtents {
        &self.extents
    }

    pub fn config(&self) -> &VolumeConfig {
        &self.config
    }

    pub fn state(&self) -> VolumeState {
        self.state
    }

    /// Current summary snapshot.
    pub fn summary(&self) -> &VolumeSummary {
        &self.summary
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    /// Set the factor applied to world extents when reporting scale.
    ///
    /// Only affects subsequent fills.
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Number of `f32` slots a destination buffer must provide.
    pub fn required_samples(&self) -> usize {
        self.extents.sample_count()
    }

    /// Return to the constructed state, clearing range and scale fields.
    pub fn reset(&mut self) {
        self.summary.clear_results();
        self.state = VolumeState::Constructed;
    }

    /// Sample the grid into `destination` and update the summary.
    ///
    /// On error neither the summary nor the destination is modified.
    pub fn fill_buffer(&mut self, destination: Option<&mut [f32]>) -> Result<()> {
        debug!(grid = %self.grid.name(), extents = %self.extents, "Filling volume buffer");

        let destination = match destination {
            Some(buffer) => buffer,
            None => {
                warn!(grid = %self.grid.name(), "Destination buffer is missing");
                return Err(VolumeError::NullDestination);
            }
        };

        let required = self.extents.sample_count();
        if destination.len() < required {
            warn!(
                grid = %self.grid.name(),
                required,
                actual = destination.len(),
                "Destination buffer too small"
            );
            return Err(VolumeError::buffer_too_small(required, destination.len()));
        }

        let index_bbox = resolve_index_bbox(self.grid.as_ref());
        if index_bbox.is_empty() {
            warn!(grid = %self.grid.name(), "Grid has no stored bounding box, skipping fill");
            return Err(VolumeError::empty_bounding_box(self.grid.name()));
        }

        let world_bbox = self.grid.transform().index_bbox_to_world(&index_bbox);
        let world_extents = world_bbox.extents();

        let sampler = LatticeSampler::new(self.grid.as_ref(), &self.extents, world_bbox);
        let rows_per_partition = self.config.rows_per_partition(self.extents.width() as usize);
        let range = match write_lattice(&sampler, &self.extents, destination, rows_per_partition) {
            Some(range) => range,
            None => {
                warn!(grid = %self.grid.name(), "Sampling domain is empty, skipping fill");
                return Err(VolumeError::EmptyDomain);
            }
        };

        let samples = &mut destination[..required];
        normalize_samples(samples, &range, self.config.degenerate_policy);

        self.summary.min_value = range.min();
        self.summary.max_value = range.max();
        self.summary.x_scale = world_extents.x as f32 * self.scale_factor;
        self.summary.y_scale = world_extents.y as f32 * self.scale_factor;
        self.summary.z_scale = world_extents.z as f32 * self.scale_factor;
        self.state = VolumeState::Filled;

        info!(
            grid = %self.grid.name(),
            extents = %self.extents,
            min = range.min(),
            max = range.max(),
            degenerate = range.is_degenerate(),
            x_scale = self.summary.x_scale,
            y_scale = self.summary.y_scale,
            z_scale = self.summary.z_scale,
            "Filled volume buffer"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{MetaValue, SparseGrid, FILE_BBOX_MAX, FILE_BBOX_MIN};
    use crate::types::Coord;

    fn unit_grid(value: f32) -> Arc<SparseGrid> {
        let mut grid = SparseGrid::new(value).with_name("unit");
        grid.metadata_mut()
            .insert(FILE_BBOX_MIN, MetaValue::Vec3i(Coord::new(0, 0, 0)));
        grid.metadata_mut()
            .insert(FILE_BBOX_MAX, MetaValue::Vec3i(Coord::new(1, 1, 1)));
        Arc::new(grid)
    }

    #[test]
    fn test_construct_state() {
        let extents = LatticeExtents::new(2, 3, 4).unwrap();
        let volume = Volume::new(unit_grid(1.0), extents).unwrap();
        assert_eq!(volume.state(), VolumeState::Constructed);
        assert_eq!(volume.summary().voxel_count, 24);
        assert_eq!(volume.required_samples(), 96);
        assert_eq!(volume.scale_factor(), 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let extents = LatticeExtents::new(2, 2, 2).unwrap();
        let config = VolumeConfig {
            partition_cells: 0,
            ..VolumeConfig::default()
        };
        assert!(matches!(
            Volume::with_config(unit_grid(1.0), extents, config),
            Err(VolumeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_huge_partition_cells_fill() {
        let extents = LatticeExtents::new(3, 2, 2).unwrap();
        let config = VolumeConfig {
            partition_cells: usize::MAX,
            ..VolumeConfig::default()
        };
        let mut volume = Volume::with_config(unit_grid(2.0), extents, config).unwrap();
        let mut buffer = vec![-1.0; volume.required_samples()];

        volume.fill_buffer(Some(&mut buffer)).unwrap();

        assert!(buffer.iter().all(|v| *v == 0.0));
        assert_eq!(volume.state(), VolumeState::Filled);
    }

    #[test]
    fn test_null_destination() {
        let extents = LatticeExtents::new(2, 2, 2).unwrap();
        let mut volume = Volume::new(unit_grid(1.0), extents).unwrap();
        assert_eq!(volume.fill_buffer(None), Err(VolumeError::NullDestination));
        assert_eq!(volume.state(), VolumeState::Constructed);
    }

    #[test]
    fn test_short_destination() {
        let extents = LatticeExtents::new(2, 2, 2).unwrap();
        let mut volume = Volume::new(unit_grid(1.0), extents).unwrap();
        let mut buffer = vec![9.0; 31];
        assert_eq!(
            volume.fill_buffer(Some(&mut buffer)),
            Err(VolumeError::buffer_too_small(32, 31))
        );
        assert!(buffer.iter().all(|v| *v == 9.0));
    }

    #[test]
    fn test_constant_field_fill() {
        let extents = LatticeExtents::new(2, 2, 2).unwrap();
        let mut volume = Volume::new(unit_grid(5.0), extents).unwrap();
        let mut buffer = vec![-1.0; 32];

        volume.fill_buffer(Some(&mut buffer)).unwrap();

        assert!(buffer.iter().all(|v| *v == 0.0));
        assert_eq!(volume.summary().min_value, 5.0);
        assert_eq!(volume.summary().max_value, 5.0);
        assert_eq!(volume.state(), VolumeState::Filled);
    }

    #[test]
    fn test_reset_clears_results() {
        let extents = LatticeExtents::new(2, 2, 2).unwrap();
        let mut volume = Volume::new(unit_grid(5.0), extents).unwrap();
        let mut buffer = vec![0.0; 32];
        volume.fill_buffer(Some(&mut buffer)).unwrap();
        assert_eq!(volume.summary().x_scale, 1.0);

        volume.reset();
        assert_eq!(volume.state(), VolumeState::Constructed);
        assert_eq!(volume.summary().min_value, 0.0);
        assert_eq!(volume.summary().x_scale, 0.0);
        assert_eq!(volume.summary().voxel_count, 8);
    }

    #[test]
    fn test_larger_buffer_tail_untouched() {
        let extents = LatticeExtents::new(2, 2, 2).unwrap();
        let mut volume = Volume::new(unit_grid(5.0), extents).unwrap();
        let mut buffer = vec![-3.0; 40];
        volume.fill_buffer(Some(&mut buffer)).unwrap();
        assert!(buffer[32..].iter().all(|v| *v == -3.0));
    }
}
