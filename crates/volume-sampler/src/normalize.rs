//! In-place remapping of raw samples into [0, 1].

use rayon::prelude::*;

use crate::config::DegenerateRangePolicy;
use crate::range::ValueRange;

/// Number of buffer slots handed to one worker per normalization task.
const NORMALIZE_CHUNK: usize = 16 * 1024;

/// Inverse of linear interpolation: where `x` sits between `a` and `b`.
///
/// Evaluated in f64 so that `b - a` cannot overflow for finite f32 bounds.
#[inline]
fn unlerp(a: f32, b: f32, x: f32) -> f32 {
    let (a, b, x) = (f64::from(a), f64::from(b), f64::from(x));
    ((x - a) / (b - a)) as f32
}

/// Rescale every sample as `(v - min) / (max - min)`.
///
/// A zero-width range writes the policy's constant instead of dividing by
/// zero. An empty range leaves the buffer untouched.
pub fn normalize_samples(samples: &mut [f32], range: &ValueRange, policy: DegenerateRangePolicy) {
    if range.is_empty() {
        return;
    }

    if range.is_degenerate() {
        let fill = policy.fill_value();
        samples
            .par_chunks_mut(NORMALIZE_CHUNK)
            .for_each(|chunk| chunk.fill(fill));
        return;
    }

    let (min, max) = (range.min(), range.max());
    samples.par_chunks_mut(NORMALIZE_CHUNK).for_each(|chunk| {
        for value in chunk.iter_mut() {
            *value = unlerp(min, max, *value);
        }
    });
}
