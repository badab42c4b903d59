//! Ellipsoid region: a single quadratic inequality `Σ aᵢ(xᵢ−cᵢ)² <= d`
//! (spec §4.4).
//!
//! `classify` is exact (two corner-style tests against the axis-aligned
//! box). The measure of an indeterminate box is not available in closed
//! form, so `measure_bounds` linearizes the quadratic at the box midpoint
//! and reuses [`single_section_measure`] twice: once with the linearized
//! threshold loosened by the tangent remainder bound (a subset of the true
//! region, hence the lower bound) and once at the bare tangent (a superset,
//! hence the upper bound). Both are sound because the coefficients are
//! required non-negative — see the open question in DESIGN.md about why
//! that requirement matters here.

use nalgebra::DVector;

use crate::error::{IntegrationError, Result};
use crate::hypercube::Hypercube;
use crate::linear::single_section_measure;

use super::{Classification, Region};

/// `Σ aᵢ(xᵢ − cᵢ)² <= d`, with `aᵢ >= 0` and `d >= 0`.
#[derive(Clone, Debug)]
pub struct Ellipsoid {
    a: DVector<f64>,
    c: DVector<f64>,
    d: f64,
    /// Precomputed `Σ aᵢ`.
    s: f64,
}

impl Ellipsoid {
    pub fn new(a: DVector<f64>, c: DVector<f64>, d: f64) -> Result<Self> {
        if a.len() != c.len() {
            return Err(IntegrationError::DimensionMismatch {
                expected: a.len(),
                actual: c.len(),
            });
        }
        if d < 0.0 {
            return Err(IntegrationError::InvalidEllipsoid {
                reason: format!("threshold d must be >= 0, got {d}"),
            });
        }
        if let Some(neg) = a.iter().position(|&ai| ai < 0.0) {
            return Err(IntegrationError::InvalidEllipsoid {
                reason: format!("coefficient a[{neg}] must be >= 0, got {}", a[neg]),
            });
        }
        let s = a.sum();
        Ok(Self { a, c, d, s })
    }
}

impl Region for Ellipsoid {
    /// Stateless: a single quadratic constraint has nothing to prune.
    type Context = ();

    fn dims(&self) -> usize {
        self.a.len()
    }

    fn initial_context(&self) {}

    fn classify(&self, hc: &Hypercube, _ctx: &()) -> (Classification, ()) {
        let intervals = hc.intervals();

        // Farthest-corner test: if even the point of H farthest from the
        // center (per axis) lies within the ellipsoid, all of H does.
        let mut farthest_sq = 0.0;
        for i in 0..self.a.len() {
            let iv = intervals[i];
            let far = if iv.low + iv.high < 2.0 * self.c[i] {
                iv.low
            } else {
                iv.high
            };
            farthest_sq += self.a[i] * (far - self.c[i]).powi(2);
        }
        if farthest_sq <= self.d {
            return (Classification::Contained, ());
        }

        // Closest-point test: if even the point of H closest to the
        // center lies outside the ellipsoid, none of H is inside.
        let mut closest_sq = 0.0;
        for i in 0..self.a.len() {
            let iv = intervals[i];
            let close = self.c[i].clamp(iv.low, iv.high);
            closest_sq += self.a[i] * (close - self.c[i]).powi(2);
        }
        if closest_sq >= self.d {
            return (Classification::Rejected, ());
        }

        (Classification::Indeterminate, ())
    }

    fn measure_bounds(&self, hc: &Hypercube, _ctx: &()) -> (f64, f64) {
        let mid = hc.midpoint();
        let mut e = DVector::zeros(self.a.len());
        let mut g = -self.d;
        let mut tau: f64 = 0.0;
        for i in 0..self.a.len() {
            let iv = hc.intervals()[i];
            let delta = mid[i] - self.c[i];
            e[i] = 2.0 * self.a[i] * delta;
            g += self.a[i] * delta * delta - e[i] * mid[i];
            tau = tau.max(iv.len());
        }
        // The loosened threshold tightens the half-space (larger negative
        // slack required), so it selects a subset of the true region: mlow.
        // The bare tangent threshold is the looser test and selects a
        // superset: mhigh.
        let mlow = single_section_measure(hc, &e, g + self.s * tau * tau / 4.0);
        let mhigh = single_section_measure(hc, &e, g);
        (mlow, mhigh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    fn unit_circle() -> Ellipsoid {
        Ellipsoid::new(dvector![1.0, 1.0], dvector![0.0, 0.0], 1.0).unwrap()
    }

    #[test]
    fn box_well_inside_is_contained() {
        let e = unit_circle();
        let hc = Hypercube::new([(-0.3, 0.3), (-0.3, 0.3)]).unwrap();
        let (state, _) = e.classify(&hc, &());
        assert_eq!(state, Classification::Contained);
    }

    #[test]
    fn box_far_outside_is_rejected() {
        let e = unit_circle();
        let hc = Hypercube::new([(10.0, 11.0), (10.0, 11.0)]).unwrap();
        let (state, _) = e.classify(&hc, &());
        assert_eq!(state, Classification::Rejected);
    }

    #[test]
    fn box_straddling_boundary_is_indeterminate() {
        let e = unit_circle();
        let hc = Hypercube::new([(0.5, 1.5), (-0.1, 0.1)]).unwrap();
        let (state, _) = e.classify(&hc, &());
        assert_eq!(state, Classification::Indeterminate);
    }

    #[test]
    fn measure_bounds_bracket_the_quadrant_area() {
        let e = unit_circle();
        // First quadrant slice of the unit disc inside [0,2]x[0,2]: area pi/4.
        let hc = Hypercube::new([(0.0, 2.0), (0.0, 2.0)]).unwrap();
        let (state, _) = e.classify(&hc, &());
        assert_eq!(state, Classification::Indeterminate);
        let (mlow, mhigh) = e.measure_bounds(&hc, &());
        assert!(mlow <= std::f64::consts::FRAC_PI_4 + 1e-9);
        assert!(mhigh >= std::f64::consts::FRAC_PI_4 - 1e-9);
        assert!(mlow <= mhigh);
    }

    #[test]
    fn rejects_negative_coefficient() {
        let err = Ellipsoid::new(dvector![-1.0], dvector![0.0], 1.0).unwrap_err();
        assert!(matches!(err, IntegrationError::InvalidEllipsoid { .. }));
    }

    #[test]
    fn rejects_negative_threshold() {
        let err = Ellipsoid::new(dvector![1.0], dvector![0.0], -1.0).unwrap_err();
        assert!(matches!(err, IntegrationError::InvalidEllipsoid { .. }));
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let err = Ellipsoid::new(dvector![1.0, 1.0], dvector![0.0], 1.0).unwrap_err();
        assert!(matches!(err, IntegrationError::DimensionMismatch { .. }));
    }
}
