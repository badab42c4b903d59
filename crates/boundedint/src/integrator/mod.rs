//! The adaptive subdivision driver (spec §4.5): breadth-first partition of
//! a root box until every indeterminate leaf is either resolved or small
//! enough (`depth >= max_splits`), accumulating sound lower/upper bounds
//! from the region's measure estimate and the integrand's range estimate.
//!
//! The driver is single-threaded and synchronous (spec §5): it never
//! blocks, never cancels mid-run, and is a pure function of its inputs —
//! identical inputs and FP environment produce bitwise-identical `sum` and
//! `error` (spec §8 property 7).

use std::collections::VecDeque;

use crate::config::Tolerances;
use crate::error::{IntegrationError, Result};
use crate::hypercube::Hypercube;
use crate::region::{Classification, Region};

/// An integrand provider bound to a single mathematical function `f`
/// (spec §4.6): the exact integral over a fully-contained box, and a
/// sound (not necessarily tight) range envelope over any box.
pub trait IntegrandProvider {
    /// Number of axes `f` is defined over.
    fn dims(&self) -> usize;

    /// Exact integral of `f` over `hc`. Only called for `Contained` boxes.
    fn integral(&self, hc: &Hypercube) -> f64;

    /// `(flow, fhigh)` with `flow <= f(x) <= fhigh` for all `x` in `hc`.
    fn range(&self, hc: &Hypercube) -> (f64, f64);
}

/// Outcome of an integration run (spec §3).
#[derive(Clone, Debug)]
pub struct IntegrationResult {
    /// Lower bound on the integral.
    pub sum: f64,
    /// Non-negative; `sum + error` is the upper bound.
    pub error: f64,
    /// The root box the run started from.
    pub origin: Hypercube,
    /// Terminal boxes in visitation order, present only when tracing was
    /// requested.
    pub cubes: Option<Vec<(Hypercube, Classification)>>,
}

impl IntegrationResult {
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        self.sum + self.error
    }

    /// `(contained, rejected, indeterminate)` leaf counts, derived from the
    /// trace. `None` if tracing was not requested.
    pub fn counts_by_classification(&self) -> Option<(usize, usize, usize)> {
        let cubes = self.cubes.as_ref()?;
        let mut counts = (0, 0, 0);
        for (_, state) in cubes {
            match state {
                Classification::Contained => counts.0 += 1,
                Classification::Rejected => counts.1 += 1,
                Classification::Indeterminate => counts.2 += 1,
            }
        }
        Some(counts)
    }
}

/// Integrate `provider`'s function over `root`, restricted by `region`,
/// subdividing indeterminate boxes up to `max_splits` deep (spec §6).
pub fn integrate<R: Region, P: IntegrandProvider>(
    region: &R,
    root: &Hypercube,
    provider: &P,
    max_splits: u32,
    return_cubes: bool,
    tol: Tolerances,
) -> Result<IntegrationResult> {
    if root.dims() != region.dims() {
        return Err(IntegrationError::DimensionMismatch {
            expected: region.dims(),
            actual: root.dims(),
        });
    }
    if root.dims() != provider.dims() {
        return Err(IntegrationError::DimensionMismatch {
            expected: provider.dims(),
            actual: root.dims(),
        });
    }

    let mut sum = 0.0_f64;
    let mut error = 0.0_f64;
    let mut cubes = return_cubes.then(Vec::new);

    let mut queue: VecDeque<(Hypercube, u32, R::Context)> = VecDeque::new();
    queue.push_back((root.clone(), 0, region.initial_context()));

    while let Some((hc, depth, ctx)) = queue.pop_front() {
        let (state, next_ctx) = region.classify(&hc, &ctx);

        match state {
            Classification::Rejected => {
                if let Some(trace) = cubes.as_mut() {
                    trace.push((hc, state));
                }
            }
            Classification::Contained => {
                sum += provider.integral(&hc);
                check_finite(sum, depth, "sum")?;
                if let Some(trace) = cubes.as_mut() {
                    trace.push((hc, state));
                }
            }
            Classification::Indeterminate if depth < max_splits => {
                for child in hc.split() {
                    queue.push_back((child, depth + 1, next_ctx.clone()));
                }
            }
            Classification::Indeterminate => {
                let (mlow, mhigh) = region.measure_bounds(&hc, &next_ctx);
                let (flow, fhigh) = provider.range(&hc);

                sum += flow.min(0.0) * mhigh + flow.max(0.0) * mlow;
                check_finite(sum, depth, "sum")?;

                let mut leaf_error =
                    (fhigh.max(0.0) - flow.min(0.0)) * mhigh + (fhigh.min(0.0) - flow.max(0.0)) * mlow;
                if leaf_error < 0.0 {
                    if tol.strict_nonneg || leaf_error < -tol.nonneg_guard_eps {
                        return Err(IntegrationError::NegativeError { leaf_error });
                    }
                    leaf_error = 0.0;
                }
                error += leaf_error;
                check_finite(error, depth, "error")?;

                if let Some(trace) = cubes.as_mut() {
                    trace.push((hc, state));
                }
            }
        }
    }

    Ok(IntegrationResult {
        sum,
        error,
        origin: root.clone(),
        cubes,
    })
}

fn check_finite(x: f64, depth: u32, which: &str) -> Result<()> {
    if !x.is_finite() {
        return Err(IntegrationError::NonFiniteResult {
            depth,
            reason: format!("accumulated {which} {x} is not finite"),
        });
    }
    Ok(())
}
