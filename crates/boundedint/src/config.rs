//! Numerical tolerance knobs (mirrors the teacher's `GeomCfg`/`SearchCfg`
//! pattern: a small `Copy` struct of epsilons, threaded through by value
//! rather than hidden behind a global).

/// Tolerances governing how the driver treats floating-point noise at the
/// boundary of the `error >= 0` invariant (spec §4.5, §7, §8 property 1).
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    /// Magnitude below which a negative leaf `error` is treated as benign
    /// floating-point noise and clamped to zero instead of failing the run.
    pub nonneg_guard_eps: f64,
    /// When `true`, any negative leaf error — even one within
    /// `nonneg_guard_eps` of zero — is surfaced as
    /// [`crate::IntegrationError::NegativeError`] instead of being clamped.
    /// Useful when developing a new integrand's `range` and wanting the
    /// soundness check to fire eagerly.
    pub strict_nonneg: bool,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            nonneg_guard_eps: 1e-9,
            strict_nonneg: false,
        }
    }
}
