//! Tolerance policy shared by the domain solvers.
//!
//! Quantum numbers arrive as doubles that must represent integers or
//! half-integers. They are typically small and exactly representable, so the
//! "is this an integer" checks use one fixed epsilon rather than anything
//! scale-dependent.

/// Fixed tolerance for deciding whether a derived quantum number is an
/// integer, and the guard added before truncating a range length.
pub const INTEGER_TOLERANCE: f64 = 0.1;

/// Whether `value` lies within [`INTEGER_TOLERANCE`] of an integer.
pub fn is_near_integer(value: f64) -> bool {
    (value - value.round()).abs() <= INTEGER_TOLERANCE
}

/// Number of unit steps in the inclusive range `[min, max]`.
///
/// The caller must have established `max >= min` and that `max - min` is
/// near-integer; the tolerance guards against a mathematically integral
/// difference rounding just below the next whole number.
pub fn step_count(min: f64, max: f64) -> usize {
    (max - min + 1.0 + INTEGER_TOLERANCE).floor() as usize
}

/// `(-1)^exponent` for an `exponent` that is an integer up to floating
/// rounding. Parity is unaffected by the sign of the exponent.
pub fn parity_phase(exponent: f64) -> f64 {
    if ((exponent.abs() + INTEGER_TOLERANCE).floor() as i64) % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}
