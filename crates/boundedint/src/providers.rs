//! Reference [`IntegrandProvider`](crate::integrator::IntegrandProvider)
//! implementations (spec §4.6): the standard multivariate normal density and
//! monomial/power-product functions.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::hypercube::Hypercube;
use crate::integrator::IntegrandProvider;

/// The standard multivariate normal density `φ(x) = (2π)^(−n/2) exp(−‖x‖²/2)`
/// with independent unit-variance axes.
pub struct StandardNormalDensity {
    dims: usize,
    standard: Normal,
}

impl StandardNormalDensity {
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            standard: Normal::new(0.0, 1.0).expect("N(0,1) is always a valid normal distribution"),
        }
    }
}

impl IntegrandProvider for StandardNormalDensity {
    fn dims(&self) -> usize {
        self.dims
    }

    fn integral(&self, hc: &Hypercube) -> f64 {
        hc.intervals()
            .iter()
            .map(|iv| self.standard.cdf(iv.high) - self.standard.cdf(iv.low))
            .product()
    }

    fn range(&self, hc: &Hypercube) -> (f64, f64) {
        let n = self.dims as f64;
        let common = (2.0 * std::f64::consts::PI).powf(-n / 2.0);

        // Farthest point from the origin per axis (exact: the sign of the
        // interval's midpoint tells us which endpoint has larger |x|),
        // giving the largest sum of squares and thus the smallest density.
        let mut max_sq_sum = 0.0;
        // Closest point to the origin per axis (0 if the interval straddles
        // zero), giving the smallest sum of squares and largest density.
        let mut min_sq_sum = 0.0;
        for iv in hc.intervals() {
            let (a, b) = (iv.low, iv.high);
            max_sq_sum += if a + b < 0.0 { a * a } else { b * b };
            min_sq_sum += if a >= 0.0 {
                a * a
            } else if b < 0.0 {
                b * b
            } else {
                0.0
            };
        }

        let flow = common * (-max_sq_sum / 2.0).exp();
        let fhigh = common * (-min_sq_sum / 2.0).exp();
        (flow, fhigh)
    }
}

/// `f(x) = x1^e1 * x2^e2 * ... * xN^eN`, a monomial/power-product.
pub struct Monomial {
    exponents: Vec<u32>,
}

impl Monomial {
    pub fn new(exponents: Vec<u32>) -> Self {
        Self { exponents }
    }
}

impl IntegrandProvider for Monomial {
    fn dims(&self) -> usize {
        self.exponents.len()
    }

    fn integral(&self, hc: &Hypercube) -> f64 {
        let mut rv = 1.0;
        for (iv, &e) in hc.intervals().iter().zip(&self.exponents) {
            let exponent = (e + 1) as i32;
            rv *= (iv.high.powi(exponent) - iv.low.powi(exponent)) / exponent as f64;
        }
        rv
    }

    fn range(&self, hc: &Hypercube) -> (f64, f64) {
        // Mirrors the original's literal enumeration: per axis, the set of
        // candidate endpoint values (plus 0 when an even exponent's interval
        // straddles zero) is cross-multiplied into the running set of
        // partial products, and the global min/max is taken only at the
        // end. Sign flips across axes mean no per-axis min/max composes
        // correctly on its own.
        let mut values = vec![1.0_f64];
        for (iv, &e) in hc.intervals().iter().zip(&self.exponents) {
            let (a, b) = (iv.low, iv.high);
            // NOTE: 0^p is taken to be 0 for any p, including p == 0,
            // matching the reference implementation's literal convention.
            let first = if a == 0.0 { 0.0 } else { a.powi(e as i32) };
            let second = if b == 0.0 { 0.0 } else { b.powi(e as i32) };
            let straddles_zero_even_power = e % 2 == 0 && a <= 0.0 && b >= 0.0;

            let mut next = Vec::with_capacity(values.len() * 3);
            for &v in &values {
                next.push(v * first);
                next.push(v * second);
                if straddles_zero_even_power {
                    next.push(0.0);
                }
            }
            values = next;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }
}
