//! Bounded numerical integration over N-dimensional hypercubes, restricted
//! to a polytope or ellipsoid region, with sound lower/upper bounds on the
//! result (see each module's docs for the governing invariants).

pub mod config;
pub mod error;
pub mod hypercube;
pub mod integrator;
pub mod linear;
pub mod providers;
pub mod region;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::Tolerances;
pub use error::{IntegrationError, Result};
pub use hypercube::{Hypercube, Interval};
pub use integrator::{integrate, IntegrandProvider, IntegrationResult};
pub use linear::{linear_max, linear_min, single_section_measure, LinearInequality};
pub use region::{Classification, Ellipsoid, Polytope, Region};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::config::Tolerances;
    pub use crate::error::{IntegrationError, Result};
    pub use crate::hypercube::Hypercube;
    pub use crate::integrator::{integrate, IntegrandProvider, IntegrationResult};
    pub use crate::providers::{Monomial, StandardNormalDensity};
    pub use crate::region::{Classification, Ellipsoid, Polytope, Region};
}
