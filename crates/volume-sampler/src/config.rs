//! Configuration for the volume sampler.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VolumeError};

/// How samples are normalized when every sample has the same value.
///
/// A constant field has a zero-width range, so `(v - min) / (max - min)` is
/// undefined. The policy picks the constant written instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateRangePolicy {
    /// Write 0.0 to every slot.
    #[default]
    Zero,
    /// Write 0.5 to every slot.
    Midpoint,
    /// Write 1.0 to every slot.
    One,
}

impl DegenerateRangePolicy {
    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "midpoint" | "half" => Self::Midpoint,
            "one" => Self::One,
            _ => Self::Zero,
        }
    }

    /// Value written for every sample of a constant field.
    pub fn fill_value(&self) -> f32 {
        match self {
            Self::Zero => 0.0,
            Self::Midpoint => 0.5,
            Self::One => 1.0,
        }
    }
}

impl std::fmt::Display for DegenerateRangePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::Midpoint => write!(f, "midpoint"),
            Self::One => write!(f, "one"),
        }
    }
}

/// Configuration for filling volumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeConfig {
    /// Target number of lattice cells handled by one parallel partition.
    /// Partitions are always whole lattice rows.
    pub partition_cells: usize,

    /// Normalization used when the sampled range has zero width.
    pub degenerate_policy: DegenerateRangePolicy,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            partition_cells: 4096,
            degenerate_policy: DegenerateRangePolicy::Zero,
        }
    }
}

impl VolumeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("VOLUME_PARTITION_CELLS") {
            if let Ok(cells) = val.parse() {
                config.partition_cells = cells;
            }
        }

        if let Ok(val) = std::env::var("VOLUME_DEGENERATE_POLICY") {
            config.degenerate_policy = DegenerateRangePolicy::from_str(&val);
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.partition_cells == 0 {
            return Err(VolumeError::invalid_config("partition_cells must be > 0"));
        }

        Ok(())
    }

    /// Number of whole lattice rows per partition for rows of `row_len` cells.
    pub fn rows_per_partition(&self, row_len: usize) -> usize {
        (self.partition_cells / row_len.max(1)).max(1)
    }
}
