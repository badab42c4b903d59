//! The N-dimensional axis-aligned box (spec §4.1).
//!
//! Axis order is significant: it must match the coefficient order of the
//! region and the integrand provider for a given run. A `Hypercube` is
//! immutable after construction; `split` yields fresh children.

use nalgebra::DVector;

use crate::error::{IntegrationError, Result};

/// Closed interval `[low, high]` with `low <= high` and both endpoints
/// finite. Degenerate (`low == high`) intervals are allowed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    #[inline]
    fn new_unchecked(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    #[inline]
    pub fn len(&self) -> f64 {
        self.high - self.low
    }

    #[inline]
    pub fn mid(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// An axis-aligned box: an ordered sequence of N closed intervals.
///
/// Invariants: `N >= 1` and fixed for the box's lifetime; axis order is
/// part of the contract and is never reordered internally.
#[derive(Clone, Debug, PartialEq)]
pub struct Hypercube {
    intervals: Vec<Interval>,
}

impl Hypercube {
    /// Construct from an ordered list of `(low, high)` pairs, one per axis.
    pub fn new(bounds: impl IntoIterator<Item = (f64, f64)>) -> Result<Self> {
        let mut intervals = Vec::new();
        for (axis, (low, high)) in bounds.into_iter().enumerate() {
            if !(low.is_finite() && high.is_finite()) || low > high {
                return Err(IntegrationError::InvalidInterval { axis, low, high });
            }
            intervals.push(Interval::new_unchecked(low, high));
        }
        if intervals.is_empty() {
            return Err(IntegrationError::DimensionMismatch {
                expected: 1,
                actual: 0,
            });
        }
        Ok(Self { intervals })
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.intervals.len()
    }

    #[inline]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// `Π (bᵢ − aᵢ)`. Zero on any degenerate axis; callers must not rely on
    /// strict positivity.
    pub fn volume(&self) -> f64 {
        self.intervals.iter().map(Interval::len).product()
    }

    /// Midpoint of the box, one coordinate per axis.
    pub fn midpoint(&self) -> DVector<f64> {
        DVector::from_iterator(self.dims(), self.intervals.iter().map(Interval::mid))
    }

    /// Split into 2^N congruent sub-boxes by bisecting every axis at its
    /// midpoint. Enumeration is fixed: bit `i` of the child index selects
    /// the low (0) or high (1) half on axis `i`, so axis 0 varies fastest.
    /// This order is part of the deterministic-replay contract (spec §4.1).
    pub fn split(&self) -> Vec<Hypercube> {
        let n = self.dims();
        let count = 1usize << n;
        let mut children = Vec::with_capacity(count);
        for mask in 0..count {
            let mut ivs = Vec::with_capacity(n);
            for (axis, iv) in self.intervals.iter().enumerate() {
                let mid = iv.mid();
                ivs.push(if mask & (1 << axis) == 0 {
                    Interval::new_unchecked(iv.low, mid)
                } else {
                    Interval::new_unchecked(mid, iv.high)
                });
            }
            children.push(Hypercube { intervals: ivs });
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_of_unit_square() {
        let hc = Hypercube::new([(0.0, 1.0), (0.0, 1.0)]).unwrap();
        assert!((hc.volume() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn volume_handles_degenerate_axis() {
        let hc = Hypercube::new([(0.0, 1.0), (2.0, 2.0)]).unwrap();
        assert_eq!(hc.volume(), 0.0);
        assert_eq!(hc.split().len(), 4);
    }

    #[test]
    fn split_produces_2_to_the_n_children_axis0_fastest() {
        let hc = Hypercube::new([(0.0, 2.0), (0.0, 4.0)]).unwrap();
        let children = hc.split();
        assert_eq!(children.len(), 4);
        // mask 0: (lo,lo); mask 1: (hi,lo); mask 2: (lo,hi); mask 3: (hi,hi)
        assert_eq!(children[0].intervals()[0].low, 0.0);
        assert_eq!(children[0].intervals()[1].low, 0.0);
        assert_eq!(children[1].intervals()[0].low, 1.0);
        assert_eq!(children[1].intervals()[1].low, 0.0);
        assert_eq!(children[2].intervals()[0].low, 0.0);
        assert_eq!(children[2].intervals()[1].low, 2.0);
        assert_eq!(children[3].intervals()[0].low, 1.0);
        assert_eq!(children[3].intervals()[1].low, 2.0);
        let total: f64 = children.iter().map(Hypercube::volume).sum();
        assert!((total - hc.volume()).abs() < 1e-12);
    }

    #[test]
    fn rejects_inverted_interval() {
        let err = Hypercube::new([(1.0, 0.0)]).unwrap_err();
        assert!(matches!(err, IntegrationError::InvalidInterval { axis: 0, .. }));
    }

    #[test]
    fn rejects_non_finite_bound() {
        let err = Hypercube::new([(0.0, f64::INFINITY)]).unwrap_err();
        assert!(matches!(err, IntegrationError::InvalidInterval { .. }));
    }

    #[test]
    fn midpoint_matches_interval_midpoints() {
        let hc = Hypercube::new([(0.0, 2.0), (-1.0, 1.0)]).unwrap();
        let mid = hc.midpoint();
        assert!((mid[0] - 1.0).abs() < 1e-12);
        assert!((mid[1] - 0.0).abs() < 1e-12);
    }
}
