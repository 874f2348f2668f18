//! Error types for volume sampling.

use thiserror::Error;

/// Errors that can occur while building or filling a volume.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VolumeError {
    /// The caller did not supply a destination buffer.
    #[error("destination buffer is missing")]
    NullDestination,

    /// The destination buffer cannot hold the full lattice.
    #[error("destination buffer holds {actual} samples, lattice needs {required}")]
    BufferTooSmall { required: usize, actual: usize },

    /// The grid carries no usable index-space bounding box.
    #[error("grid '{0}' has no valid stored bounding box")]
    EmptyBoundingBox(String),

    /// Nothing to sample: the world-space domain is empty.
    #[error("sampling domain is empty")]
    EmptyDomain,

    /// Requested lattice has a zero dimension.
    #[error("invalid lattice extents {width}x{height}x{depth}: all dimensions must be >= 1")]
    InvalidExtents { width: u32, height: u32, depth: u32 },

    /// Requested lattice does not fit in addressable memory.
    #[error("lattice {width}x{height}x{depth} is too large to address")]
    ExtentsTooLarge { width: u32, height: u32, depth: u32 },

    /// Configuration error.
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// Summary serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl VolumeError {
    /// Create a BufferTooSmall error.
    pub fn buffer_too_small(required: usize, actual: usize) -> Self {
        Self::BufferTooSmall { required, actual }
    }

    /// Create an EmptyBoundingBox error.
    pub fn empty_bounding_box(grid: impl Into<String>) -> Self {
        Self::EmptyBoundingBox(grid.into())
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the failure happened before any sampling work was attempted
    /// because of how the caller invoked the fill.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::NullDestination | Self::BufferTooSmall { .. })
    }
}

impl From<serde_json::Error> for VolumeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for volume operations.
pub type Result<T> = std::result::Result<T, VolumeError>;
