//! Polytope region: the closed intersection of a finite list of linear
//! inequalities (spec §4.3).

use nalgebra::DVector;

use crate::error::{IntegrationError, Result};
use crate::hypercube::Hypercube;
use crate::linear::{linear_max, linear_min, single_section_measure, LinearInequality};

use super::{Classification, Region};

/// Finite ordered list of linear inequalities `<e,x> + d <= 0`.
#[derive(Clone, Debug)]
pub struct Polytope {
    inequalities: Vec<LinearInequality>,
    dims: usize,
}

impl Polytope {
    /// Build from an ordered list of `(e, d)` pairs, each `e` of length
    /// `dims`.
    pub fn new(inequalities: Vec<(DVector<f64>, f64)>, dims: usize) -> Result<Self> {
        let mut built = Vec::with_capacity(inequalities.len());
        for (e, d) in inequalities {
            if e.len() != dims {
                return Err(IntegrationError::DimensionMismatch {
                    expected: dims,
                    actual: e.len(),
                });
            }
            built.push(LinearInequality::new(e, d));
        }
        Ok(Self {
            inequalities: built,
            dims,
        })
    }
}

impl Region for Polytope {
    /// Still-live constraint indices, carried down the subdivision tree so
    /// already-satisfied constraints aren't rechecked (spec §4.3).
    type Context = Vec<usize>;

    fn dims(&self) -> usize {
        self.dims
    }

    fn initial_context(&self) -> Self::Context {
        (0..self.inequalities.len()).collect()
    }

    fn classify(&self, hc: &Hypercube, ctx: &Self::Context) -> (Classification, Self::Context) {
        let live: Vec<usize> = ctx
            .iter()
            .copied()
            .filter(|&i| {
                let ineq = &self.inequalities[i];
                linear_max(hc, &ineq.e, ineq.d) > 0.0
            })
            .collect();

        if live.is_empty() {
            return (Classification::Contained, live);
        }
        for &i in &live {
            let ineq = &self.inequalities[i];
            if linear_min(hc, &ineq.e, ineq.d) >= 0.0 {
                return (Classification::Rejected, live);
            }
        }
        (Classification::Indeterminate, live)
    }

    fn measure_bounds(&self, hc: &Hypercube, ctx: &Self::Context) -> (f64, f64) {
        match ctx.as_slice() {
            [only] => {
                let ineq = &self.inequalities[*only];
                let m = single_section_measure(hc, &ineq.e, ineq.d);
                (m, m)
            }
            _ => (0.0, hc.volume()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn empty_constraint_list_is_contained() {
        let poly = Polytope::new(vec![], 2).unwrap();
        let hc = Hypercube::new([(0.0, 1.0), (0.0, 1.0)]).unwrap();
        let (state, _) = poly.classify(&hc, &poly.initial_context());
        assert_eq!(state, Classification::Contained);
    }

    #[test]
    fn satisfied_constraint_is_dropped_leaving_contained() {
        // x <= 10 is trivially satisfied everywhere on [0,1]^2.
        let poly = Polytope::new(vec![(dvector![1.0, 0.0], -10.0)], 2).unwrap();
        let hc = Hypercube::new([(0.0, 1.0), (0.0, 1.0)]).unwrap();
        let (state, ctx) = poly.classify(&hc, &poly.initial_context());
        assert_eq!(state, Classification::Contained);
        assert!(ctx.is_empty());
    }

    #[test]
    fn violated_constraint_is_rejected() {
        // x <= -10 is never true on [0,1]^2.
        let poly = Polytope::new(vec![(dvector![1.0, 0.0], 10.0)], 2).unwrap();
        let hc = Hypercube::new([(0.0, 1.0), (0.0, 1.0)]).unwrap();
        let (state, _) = poly.classify(&hc, &poly.initial_context());
        assert_eq!(state, Classification::Rejected);
    }

    #[test]
    fn single_live_constraint_gives_exact_measure_bounds() {
        let poly = Polytope::new(vec![(dvector![1.0, 1.0], -1.0)], 2).unwrap();
        let hc = Hypercube::new([(0.0, 1.0), (0.0, 1.0)]).unwrap();
        let (state, ctx) = poly.classify(&hc, &poly.initial_context());
        assert_eq!(state, Classification::Indeterminate);
        let (mlow, mhigh) = poly.measure_bounds(&hc, &ctx);
        assert!((mlow - 0.5).abs() < 1e-9);
        assert!((mhigh - 0.5).abs() < 1e-9);
    }

    #[test]
    fn multiple_live_constraints_fall_back_to_volume_bracket() {
        let poly = Polytope::new(
            vec![(dvector![1.0, 0.0], -0.6), (dvector![0.0, 1.0], -0.6)],
            2,
        )
        .unwrap();
        let hc = Hypercube::new([(0.0, 1.0), (0.0, 1.0)]).unwrap();
        let (state, ctx) = poly.classify(&hc, &poly.initial_context());
        assert_eq!(state, Classification::Indeterminate);
        let (mlow, mhigh) = poly.measure_bounds(&hc, &ctx);
        assert_eq!(mlow, 0.0);
        assert!((mhigh - hc.volume()).abs() < 1e-12);
    }

    #[test]
    fn dimension_mismatch_is_rejected_at_construction() {
        let err = Polytope::new(vec![(dvector![1.0], 0.0)], 2).unwrap_err();
        assert!(matches!(err, IntegrationError::DimensionMismatch { .. }));
    }
}
