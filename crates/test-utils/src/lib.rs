//! Shared test utilities for the volume-sampler workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Scalar field generators
//! - Pre-built sparse grid fixtures
//! - Approximate float assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that every voxel of an RGBA sample buffer holds four identical
/// channel values.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_channels_replicated;
///
/// assert_channels_replicated!(&buffer);
/// ```
#[macro_export]
macro_rules! assert_channels_replicated {
    ($buffer:expr) => {{
        let buffer: &[f32] = $buffer;
        assert_eq!(buffer.len() % 4, 0, "buffer length is not a multiple of 4");
        for (voxel, channels) in buffer.chunks_exact(4).enumerate() {
            if channels.iter().any(|v| v.to_bits() != channels[0].to_bits()) {
                panic!(
                    "assertion failed: voxel {} has differing channels {:?}",
                    voxel, channels
                );
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_channels_replicated_passes() {
        let buffer = vec![1.0, 1.0, 1.0, 1.0, 0.5, 0.5, 0.5, 0.5];
        assert_channels_replicated!(&buffer);
    }

    #[test]
    #[should_panic(expected = "voxel 1")]
    fn test_assert_channels_replicated_fails() {
        let buffer = vec![1.0, 1.0, 1.0, 1.0, 0.5, 0.5, 0.25, 0.5];
        assert_channels_replicated!(&buffer);
    }
}
