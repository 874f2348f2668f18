//! Running min/max accumulator for sample values.

use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Minimum and maximum of a stream of samples.
///
/// A fresh range is empty: its minimum is the largest representable value and
/// its maximum the lowest, so the first `add_value` always narrows both.
/// Adding values only ever widens the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T = f32> {
    min: T,
    max: T,
}

impl<T: Float> ValueRange<T> {
    /// Create an empty range.
    pub fn new() -> Self {
        Self {
            min: T::max_value(),
            max: T::min_value(),
        }
    }

    /// Create a range with explicit bounds.
    pub fn from_bounds(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> T {
        self.min
    }

    pub fn max(&self) -> T {
        self.max
    }

    /// Fold a sample into the range.
    #[inline]
    pub fn add_value(&mut self, value: T) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Widen this range to the union with `other`.
    pub fn merge(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        self.add_value(other.min);
        self.add_value(other.max);
    }

    /// Union of two ranges.
    pub fn merged(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    /// True until at least one value has been added.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// True when every sample had the same value.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// `max - min`, or zero for an empty range.
    pub fn width(&self) -> T {
        if self.is_empty() {
            T::zero()
        } else {
            self.max - self.min
        }
    }

    /// Check if a value lies within the range.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T: Float> Default for ValueRange<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FromIterator<T> for ValueRange<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut range = Self::new();
        for value in iter {
            range.add_value(value);
        }
        range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_range() {
        let range: ValueRange = ValueRange::new();
        assert!(range.is_empty());
        assert_eq!(range.min(), f32::MAX);
        assert_eq!(range.max(), f32::MIN);
        assert_eq!(range.width(), 0.0);
    }

    #[test]
    fn test_single_value_narrows_both_bounds() {
        let mut range = ValueRange::new();
        range.add_value(-3.5f32);
        assert!(!range.is_empty());
        assert!(range.is_degenerate());
        assert_eq!(range.min(), -3.5);
        assert_eq!(range.max(), -3.5);
    }

    #[test]
    fn test_add_value_only_widens() {
        let mut range = ValueRange::from_bounds(0.0f64, 10.0);
        range.add_value(5.0);
        assert_eq!((range.min(), range.max()), (0.0, 10.0));
        range.add_value(12.0);
        range.add_value(-1.0);
        assert_eq!((range.min(), range.max()), (-1.0, 12.0));
    }

    #[test]
    fn test_merge_union() {
        let a = ValueRange::from_bounds(1.0f32, 4.0);
        let b = ValueRange::from_bounds(-2.0f32, 3.0);
        let merged = a.merged(&b);
        assert_eq!((merged.min(), merged.max()), (-2.0, 4.0));
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let a = ValueRange::from_bounds(1.0f32, 4.0);
        assert_eq!(a.merged(&ValueRange::new()), a);
        assert_eq!(ValueRange::new().merged(&a), a);
    }

    #[test]
    fn test_merge_grouping_does_not_matter() {
        let a = ValueRange::from_bounds(0.5f32, 2.0);
        let b = ValueRange::from_bounds(-7.0f32, 1.0);
        let c = ValueRange::from_bounds(3.0f32, 3.0);

        let left = a.merged(&b).merged(&c);
        let right = a.merged(&b.merged(&c));
        let swapped = c.merged(&a).merged(&b);
        let sequential: ValueRange = [0.5, 2.0, -7.0, 1.0, 3.0].into_iter().collect();

        assert_eq!(left, sequential);
        assert_eq!(right, sequential);
        assert_eq!(swapped, sequential);
    }
}
