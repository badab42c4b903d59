//! Exact half-space × hypercube intersection measure (spec §4.2).
//!
//! This is the engine's numerical heart: `single_section_measure` computes
//! the exact Lebesgue measure of `{x in H : <e,x> + d <= 0}` by recursing
//! over the set of axes not yet pinned to an endpoint, short-circuiting
//! through "trivially inside"/"trivially outside" tests before any
//! arithmetic that could suffer catastrophic cancellation (`max + d`,
//! `min + d` are computed once up front and never recombined unsafely).
//!
//! The active-axis set is threaded explicitly as an index slice rather than
//! a mutable per-axis flag, per the design note on recursion state: it
//! keeps each call's contract self-contained and avoids backtracking logic.

use nalgebra::DVector;

use crate::hypercube::Hypercube;

/// Linear inequality `<e, x> + d <= 0` over an N-axis box.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearInequality {
    pub e: DVector<f64>,
    pub d: f64,
}

impl LinearInequality {
    pub fn new(e: DVector<f64>, d: f64) -> Self {
        Self { e, d }
    }
}

/// Maximum of `<e,x> + d` over `hc`.
pub fn linear_max(hc: &Hypercube, e: &DVector<f64>, d: f64) -> f64 {
    let mut rv = d;
    for (iv, &ei) in hc.intervals().iter().zip(e.iter()) {
        rv += ei * if ei >= 0.0 { iv.high } else { iv.low };
    }
    rv
}

/// Minimum of `<e,x> + d` over `hc`.
pub fn linear_min(hc: &Hypercube, e: &DVector<f64>, d: f64) -> f64 {
    let mut rv = d;
    for (iv, &ei) in hc.intervals().iter().zip(e.iter()) {
        rv += ei * if ei >= 0.0 { iv.low } else { iv.high };
    }
    rv
}

/// Exact Lebesgue measure of `{x in hc : <e,x> + d <= 0}`.
pub fn single_section_measure(hc: &Hypercube, e: &DVector<f64>, d: f64) -> f64 {
    let n = hc.dims();
    let intervals = hc.intervals();

    let mut u = DVector::zeros(n);
    let mut v = DVector::zeros(n);
    let mut min = 0.0;
    let mut max = 0.0;
    let mut en = 0.0;
    for i in 0..n {
        let iv = intervals[i];
        let ei = e[i];
        if ei >= 0.0 {
            u[i] = iv.low;
            v[i] = iv.high;
        } else {
            u[i] = iv.high;
            v[i] = iv.low;
        }
        min += u[i] * ei;
        max += v[i] * ei;
        en += ei * ei;
    }

    let active: Vec<usize> = (0..n).collect();
    recurse(hc, e, &u, &v, d, min, max, en, &active)
}

#[allow(clippy::too_many_arguments)]
fn recurse(
    hc: &Hypercube,
    e: &DVector<f64>,
    u: &DVector<f64>,
    v: &DVector<f64>,
    d: f64,
    min: f64,
    max: f64,
    en: f64,
    active: &[usize],
) -> f64 {
    // Trivially inside: the half-space covers hc on the currently active axes.
    if max + d <= 0.0 {
        return active
            .iter()
            .map(|&i| hc.intervals()[i].len())
            .product();
    }
    // Trivially outside.
    if min + d >= 0.0 {
        return 0.0;
    }

    if let [i] = *active {
        let iv = hc.intervals()[i];
        let ei = e[i];
        return if ei == 0.0 {
            if d > 0.0 {
                0.0
            } else {
                iv.len()
            }
        } else {
            let u_star = -d / ei;
            if ei > 0.0 {
                clip(u_star, iv.low, iv.high) - iv.low
            } else {
                iv.high - clip(u_star, iv.low, iv.high)
            }
        };
    }

    // Straddling half-space with >= 2 active axes: recurse on each axis in
    // turn, pinning it to its low/high endpoint and folding the pinned
    // contribution into `d`.
    let t = -(max + d) / en;
    let count = active.len() as f64;
    let mut rv = 0.0;
    let mut rest = Vec::with_capacity(active.len() - 1);
    for (pos, &i) in active.iter().enumerate() {
        let iv = hc.intervals()[i];
        let ei = e[i];
        let min2 = min - u[i] * ei;
        let max2 = max - v[i] * ei;
        let en2 = en - ei * ei;
        let w = v[i] + t * ei;

        rest.clear();
        rest.extend_from_slice(&active[..pos]);
        rest.extend_from_slice(&active[pos + 1..]);

        let low_branch = recurse(hc, e, u, v, d + iv.low * ei, min2, max2, en2, &rest);
        let high_branch = recurse(hc, e, u, v, d + iv.high * ei, min2, max2, en2, &rest);
        rv += low_branch * (w - iv.low) / count + high_branch * (iv.high - w) / count;
    }
    rv
}

#[inline]
fn clip(x: f64, low: f64, high: f64) -> f64 {
    x.max(low).min(high)
}
