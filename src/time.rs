//! A simple continuous-time model.
//!
//! Durations and instants are plain non-negative `f64` values. Because
//! the response-time fixed-point iteration (see [`crate::rta`]) is
//! carried out in floating-point arithmetic, equality and
//! less-or-equal tests must tolerate small numerical error; [`EPSILON`]
//! is that tolerance.

pub type Duration = f64;

// Syntactic sugar: a hint as to whether a value denotes an interval
// length or a specific point in time.
pub type Instant = Duration;

/// Convergence tolerance for the response-time fixed-point search.
/// The tolerance is a contract, not an implementation detail: exact
/// equality on floating-point results is unreliable, so every
/// fixed-point comparison in this crate goes through [`approx_eq`] or
/// [`approx_le`] rather than `==`/`<=`.
pub const EPSILON: Duration = 1e-9;

/// `a == b`, up to [`EPSILON`].
pub fn approx_eq(a: Duration, b: Duration) -> bool {
    (a - b).abs() <= EPSILON
}

/// `a <= b`, up to [`EPSILON`].
pub fn approx_le(a: Duration, b: Duration) -> bool {
    a <= b + EPSILON
}
