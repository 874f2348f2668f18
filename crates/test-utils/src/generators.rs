//! Scalar field generators for building synthetic grids.
//!
//! Each generator returns a closure over integer index coordinates that can
//! be handed to `SparseGrid::fill_box`. The fields are simple enough that
//! expected sample values can be worked out by hand.

use nalgebra::Vector3;
use volume_sampler::Coord;

/// Field with the same value everywhere.
pub fn constant_field(value: f32) -> impl Fn(&Coord) -> f32 {
    move |_| value
}

/// Field varying linearly along one axis.
///
/// Index `start` maps to `from` and index `end` maps to `to`.
///
/// # Example
///
/// ```
/// use test_utils::linear_ramp_field;
/// use volume_sampler::Coord;
///
/// let ramp = linear_ramp_field(0, 0, 10, 0.0, 10.0);
/// assert_eq!(ramp(&Coord::new(5, 3, 3)), 5.0);
/// ```
pub fn linear_ramp_field(
    axis: usize,
    start: i32,
    end: i32,
    from: f32,
    to: f32,
) -> impl Fn(&Coord) -> f32 {
    assert!(axis < 3, "axis must be 0, 1 or 2");
    assert!(end != start, "ramp needs a non-empty span");
    let span = (end - start) as f32;
    move |c| from + (to - from) * (c[axis] - start) as f32 / span
}

/// Distance from `center` minus `radius`: negative inside the sphere,
/// positive outside.
pub fn sphere_distance_field(center: Vector3<f32>, radius: f32) -> impl Fn(&Coord) -> f32 {
    move |c| (c.cast::<f32>() - center).norm() - radius
}

/// Field encoding its own coordinate: `x + 100 * y + 10000 * z`.
///
/// Useful for checking that samples land at the right buffer offsets.
pub fn coordinate_field() -> impl Fn(&Coord) -> f32 {
    |c| (c.x + 100 * c.y + 10_000 * c.z) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_field() {
        let field = constant_field(5.0);
        assert_eq!(field(&Coord::new(-100, 7, 3)), 5.0);
    }

    #[test]
    fn test_linear_ramp_endpoints() {
        let ramp = linear_ramp_field(2, 4, 8, 1.0, -1.0);
        assert_eq!(ramp(&Coord::new(0, 0, 4)), 1.0);
        assert_eq!(ramp(&Coord::new(0, 0, 6)), 0.0);
        assert_eq!(ramp(&Coord::new(0, 0, 8)), -1.0);
    }

    #[test]
    fn test_sphere_distance_sign() {
        let sphere = sphere_distance_field(Vector3::new(4.0, 4.0, 4.0), 2.0);
        assert!(sphere(&Coord::new(4, 4, 4)) < 0.0);
        assert_eq!(sphere(&Coord::new(6, 4, 4)), 0.0);
        assert!(sphere(&Coord::new(0, 0, 0)) > 0.0);
    }

    #[test]
    fn test_coordinate_field() {
        let field = coordinate_field();
        assert_eq!(field(&Coord::new(3, 2, 1)), 10_203.0);
    }
}
