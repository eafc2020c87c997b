//! Comparison utilities.

use ck_core::Real;

/// Largest absolute element of `xs`, `0` for an empty slice.
///
/// NaN propagates, so a failed evaluation is never reported as small.
pub fn max_abs(xs: &[Real]) -> Real {
    xs.iter().fold(0.0, |acc: Real, &x| {
        if x.is_nan() || acc.is_nan() {
            Real::NAN
        } else {
            acc.max(x.abs())
        }
    })
}
