//! Tolerance-aware floating point comparisons.
//!
//! Action costs, g-costs, and node evaluations are all `f64`s accumulated by
//! repeated addition, so comparing them with raw `<` invites ordering noise
//! (a node re-reached along a permuted action sequence can differ from its
//! stored cost in the last few bits). Every cost comparison in the engine
//! goes through these functions instead.

/// The tolerance within which two costs are considered equal.
pub const TOLERANCE: f64 = 1e-6;

/// Returns true if `a` is less than `b` by more than the tolerance.
#[inline(always)]
pub fn fp_less(a: f64, b: f64) -> bool {
    a < b - TOLERANCE
}

/// Returns true if `a` is greater than `b` by more than the tolerance.
#[inline(always)]
pub fn fp_greater(a: f64, b: f64) -> bool {
    a > b + TOLERANCE
}

/// Returns true if `a` and `b` are within the tolerance of each other.
#[inline(always)]
pub fn fp_equal(a: f64, b: f64) -> bool {
    !fp_less(a, b) && !fp_greater(a, b)
}

/// The smaller of `a` and `b` under tolerant comparison.
#[inline(always)]
pub fn fp_min(a: f64, b: f64) -> f64 {
    if fp_greater(a, b) {
        b
    } else {
        a
    }
}

/// The larger of `a` and `b` under tolerant comparison.
#[inline(always)]
pub fn fp_max(a: f64, b: f64) -> f64 {
    if fp_greater(b, a) {
        b
    } else {
        a
    }
}
