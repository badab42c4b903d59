//! Region classifiers: polytopes (a list of linear inequalities) and
//! ellipsoids (a single quadratic inequality).
//!
//! Both implement the same [`Region`] trait so the integrator driver (see
//! [`crate::integrator`]) can stay generic over which kind of constraint is
//! restricting the root box.

mod ellipsoid;
mod polytope;

pub use ellipsoid::Ellipsoid;
pub use polytope::Polytope;

use crate::hypercube::Hypercube;

/// Classification of a box relative to a region: `H ⊆ R`, `H ∩ R = ∅`, or
/// neither (spec §3, §4.3, §4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Contained,
    Rejected,
    Indeterminate,
}

/// A region that can classify a box and, when indeterminate, bound the
/// measure of its own restriction within that box.
///
/// `Context` carries whatever per-branch state a region wants propagated
/// down the subdivision tree alongside each queued box — e.g. the
/// polytope's still-live constraint indices (spec §4.3, design note on
/// region context propagation). Regions with no such state use `()`.
pub trait Region {
    type Context: Clone;

    /// Number of axes this region is defined over.
    fn dims(&self) -> usize;

    /// Context seeded at the root box.
    fn initial_context(&self) -> Self::Context;

    /// Classify `hc` against `ctx`, returning the context to propagate to
    /// `hc`'s children if it is subdivided further.
    fn classify(&self, hc: &Hypercube, ctx: &Self::Context) -> (Classification, Self::Context);

    /// Sound `(low, high)` bounds on the measure of the region restricted
    /// to `hc`. Only meaningful (and only called by the driver) when `hc`
    /// classified as `Indeterminate`.
    fn measure_bounds(&self, hc: &Hypercube, ctx: &Self::Context) -> (f64, f64);
}
