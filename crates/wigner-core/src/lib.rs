//! Angular-momentum coupling coefficients by stable three-term recursion.
//!
//! The evaluators fill a whole series in one call: Wigner 3j symbols over
//! every admissible `l1` or `m2`, Wigner small-d matrix elements over a
//! degree range, and Legendre polynomials over a degree range. Closed-form
//! factorial evaluation of 3j symbols overflows for moderate quantum
//! numbers, so the series evaluators recurse bidirectionally and match the
//! two branches in a numerically stable overlap region.

pub mod common;
pub mod domain;
pub mod numerics;

pub use common::{INTEGER_TOLERANCE, is_near_integer, parity_phase, step_count};
pub use domain::{DegreeRange, InvalidDegreeRange};
pub use numerics::legendre::{LegendreApi, LegendreInput, legendre_p_l};
pub use numerics::threej::{
    ThreeJError, ThreeJOverLInput, ThreeJOverMInput, ThreeJSeries, ThreeJSeriesApi, Wigner3jInput,
    wigner_3j, wigner_3j_l, wigner_3j_m,
};
pub use numerics::wigner_d::{WignerDApi, WignerDInput, wigner_d_l};
pub use numerics::{stable_sum, stable_weighted_sum};
