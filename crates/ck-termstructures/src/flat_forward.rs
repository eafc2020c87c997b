//! `FlatForward` — a yield term structure with a constant forward rate.
//!
//! This is the simplest possible yield curve: a constant continuously-compounded
//! rate that applies for all maturities.

use ck_core::Time;
use ck_math::{scalar::lit, Scalar};

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;

/// A flat (constant) forward-rate yield term structure.
///
/// Discount factors are `P(t) = exp(-r·t)`.  The curve is defined for every
/// `t >= 0`, so it never reports a domain warning for positive times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatForward<T: Scalar = f64> {
    rate: T,
}

impl<T: Scalar> FlatForward<T> {
    /// Create a flat-forward curve from a continuously-compounded rate.
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// Create a flat-forward curve from an annually compounded rate.
    pub fn from_annual(rate: T) -> Self {
        Self {
            rate: (T::one() + rate).ln(),
        }
    }

    /// The continuously-compounded flat rate.
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Scalar> TermStructure for FlatForward<T> {
    fn max_time(&self) -> Time {
        Time::INFINITY
    }
}

impl<T: Scalar> YieldTermStructure<T> for FlatForward<T> {
    fn discount_impl(&self, t: Time) -> T {
        (-self.rate * lit(t)).exp()
    }

    fn zero_rate_impl(&self, _t: Time) -> T {
        self.rate
    }

    fn forward_rate_impl(&self, _t: Time) -> T {
        self.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn flat_forward_discount() {
        let curve = FlatForward::new(0.05);

        // At time zero, discount = 1
        assert_abs_diff_eq!(curve.discount(0.0), 1.0, epsilon = 1e-15);
        // At 1 year, discount = exp(-0.05)
        assert_abs_diff_eq!(curve.discount(1.0), (-0.05_f64).exp(), epsilon = 1e-12);
        // At 10 years
        assert_abs_diff_eq!(curve.discount(10.0), (-0.5_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn flat_forward_zero_and_forward_rate() {
        let curve = FlatForward::new(0.03);

        assert_abs_diff_eq!(curve.zero_rate(0.5), 0.03, epsilon = 1e-15);
        assert_abs_diff_eq!(curve.zero_rate(5.0), 0.03, epsilon = 1e-15);
        assert_abs_diff_eq!(curve.forward_rate(3.0), 0.03, epsilon = 1e-15);
        assert_abs_diff_eq!(curve.forward_rate_between(1.0, 4.0), 0.03, epsilon = 1e-14);
    }

    #[test]
    fn flat_forward_with_annual_compounding() {
        let curve = FlatForward::from_annual(0.05);
        // Annual 5% → continuous = ln(1.05) ≈ 0.04879
        assert_abs_diff_eq!(curve.rate(), (1.05_f64).ln(), epsilon = 1e-15);
        assert_abs_diff_eq!(curve.discount(2.0), 1.0 / 1.05_f64.powi(2), epsilon = 1e-14);
    }

    #[test]
    fn never_out_of_range_forwards() {
        let curve = FlatForward::new(0.01);
        assert!(curve.domain_warning(1e6).is_none());
    }
}
