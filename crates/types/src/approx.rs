//! Approximate floating-point comparison.
//!
//! GPS readings for the same physical location jitter by a few map units, so
//! every ordering and equality decision in the index goes through these
//! epsilon-aware comparisons instead of raw `f64` operators.

/// Returns true if `left` is less than `right` by more than `epsilon`.
///
/// Values within `epsilon` of each other compare as neither less nor
/// greater; callers treat that band as equality.
pub fn approx_less_than(left: f64, right: f64, epsilon: f64) -> bool {
    right - left > epsilon
}

/// Returns true if the difference between the values is less than `epsilon`.
pub fn almost_equal(left: f64, right: f64, epsilon: f64) -> bool {
    (left - right).abs() < epsilon
}
