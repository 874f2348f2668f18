//! Interpolation methods for grid sampling.

use nalgebra::{Point3, Vector3};

use crate::types::Coord;

/// Offsets of the eight corners of a unit cell, in the order expected by
/// [`trilinear`]: x varies fastest, then y, then z.
pub const CELL_CORNERS: [[i32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// Trilinear interpolation between the eight corners of a cell.
///
/// `t` is the fractional position inside the cell, each component in [0, 1].
pub fn trilinear(corners: &[f32; 8], t: &Vector3<f64>) -> f32 {
    let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;

    let c = corners.map(f64::from);
    let x00 = lerp(c[0], c[1], t.x);
    let x10 = lerp(c[2], c[3], t.x);
    let x01 = lerp(c[4], c[5], t.x);
    let x11 = lerp(c[6], c[7], t.x);

    let y0 = lerp(x00, x10, t.y);
    let y1 = lerp(x01, x11, t.y);

    lerp(y0, y1, t.z) as f32
}

/// Sample a field at a fractional index-space position.
///
/// `value` returns the stored value at an integer coordinate; the eight
/// neighbours around `floor(index)` are blended with trilinear weights.
pub fn sample_trilinear<F>(index: &Point3<f64>, value: F) -> f32
where
    F: Fn(&Coord) -> f32,
{
    let base = index.map(f64::floor);
    let t = index - base;
    let origin = Coord::new(base.x as i32, base.y as i32, base.z as i32);

    let mut corners = [0.0f32; 8];
    for (slot, [dx, dy, dz]) in corners.iter_mut().zip(CELL_CORNERS) {
        *slot = value(&Coord::new(origin.x + dx, origin.y + dy, origin.z + dz));
    }

    trilinear(&corners, &t)
}
