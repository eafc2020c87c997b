//! `ZeroCurve` — a yield curve interpolating the integrated zero rate.
//!
//! The curve stores pillar times `t_i` and continuously-compounded zero
//! rates `r_i`, anchors the curve at `(0, 0)`, and interpolates
//! `y(t) = t·r(t)` (the integral of the instantaneous forward rate) rather
//! than the rate itself.  Hence
//!
//! ```text
//! P(t) = exp(-y(t))      z(t) = y(t) / t      f(t) = y'(t)
//! ```
//!
//! so a `C²` spline in `y` gives a continuous forward curve.

use std::sync::Arc;

use ck_core::{errors::Result, Pillar, Time};
use ck_math::{Interpolation1D, LinearInterpolation, NaturalCubicSpline, Scalar};

use crate::term_structure::TermStructure;
use crate::yield_term_structure::YieldTermStructure;

/// Trait for creating an interpolation from `(xs, ys)` slices.
///
/// This lets callers choose the interpolation method without the curve
/// needing to know the concrete type.
pub trait InterpolationBuilder<T: Scalar = f64>: std::fmt::Debug {
    /// Build an interpolation from the given x and y values.
    fn build(&self, xs: &[T], ys: &[T]) -> Result<Arc<dyn Interpolation1D<T>>>;
}

/// Linear interpolation builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear;

impl<T: Scalar> InterpolationBuilder<T> for Linear {
    fn build(&self, xs: &[T], ys: &[T]) -> Result<Arc<dyn Interpolation1D<T>>> {
        Ok(Arc::new(LinearInterpolation::new(xs, ys)?))
    }
}

/// Natural cubic spline builder.
///
/// With only two knots the natural spline is the straight line through
/// them, so linear interpolation is returned in that case.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubicNatural;

impl<T: Scalar> InterpolationBuilder<T> for CubicNatural {
    fn build(&self, xs: &[T], ys: &[T]) -> Result<Arc<dyn Interpolation1D<T>>> {
        if xs.len() == 2 {
            return Linear.build(xs, ys);
        }
        Ok(Arc::new(NaturalCubicSpline::new(xs, ys)?))
    }
}

/// A yield curve defined by zero rates at pillar times.
///
/// Cloning is cheap: the interpolation state is shared.
#[derive(Debug, Clone)]
pub struct ZeroCurve<T: Scalar = f64> {
    times: Vec<Time>,
    rates: Vec<T>,
    interp: Arc<dyn Interpolation1D<T>>,
}

impl<T: Scalar> ZeroCurve<T> {
    /// Build a natural-cubic-spline curve from pillar times and zero rates.
    ///
    /// # Errors
    /// `DegenerateInput` if `times` is empty, not strictly increasing, holds a
    /// non-positive or non-finite time, or the slices differ in length.
    pub fn new(times: &[Time], rates: &[T]) -> Result<Self> {
        Self::with_interpolation(times, rates, &CubicNatural)
    }

    /// Build a curve interpolating `t·r(t)` with the given scheme.
    pub fn with_interpolation(
        times: &[Time],
        rates: &[T],
        builder: &dyn InterpolationBuilder<T>,
    ) -> Result<Self> {
        ck_core::validate_pillar_times(times, "zero curve")?;
        ck_core::ensure_input!(
            times.len() == rates.len(),
            "times and rates must have the same length ({} vs {})",
            times.len(),
            rates.len()
        );

        let mut xs = Vec::with_capacity(times.len() + 1);
        let mut ys = Vec::with_capacity(times.len() + 1);
        xs.push(T::zero());
        ys.push(T::zero());
        for (&t, &r) in times.iter().zip(rates) {
            let t = T::from_real(t);
            xs.push(t);
            ys.push(t * r);
        }
        let interp = builder.build(&xs, &ys)?;

        Ok(Self {
            times: times.to_vec(),
            rates: rates.to_vec(),
            interp,
        })
    }

    /// Rebuild a spline curve from persisted `(time, zero rate)` pillars.
    pub fn from_pillars(pillars: &[Pillar]) -> Result<Self> {
        let (times, rates) = Pillar::unzip(pillars);
        let rates: Vec<T> = rates.into_iter().map(T::from_real).collect();
        Self::new(&times, &rates)
    }

    /// The curve's `(time, zero rate)` pillars, without the anchor at 0.
    pub fn pillars(&self) -> Vec<Pillar> {
        self.times
            .iter()
            .zip(&self.rates)
            .map(|(&t, r)| Pillar::new(t, r.to_real()))
            .collect()
    }

    /// Return the pillar times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Return the pillar zero rates.
    pub fn rates(&self) -> &[T] {
        &self.rates
    }

    /// The integrated rate `y(t) = t·z(t)`.
    fn integrated(&self, t: Time) -> T {
        self.interp.operator(T::from_real(t))
    }
}

impl<T: Scalar> TermStructure for ZeroCurve<T> {
    fn max_time(&self) -> Time {
        self.times[self.times.len() - 1]
    }
}

impl<T: Scalar> YieldTermStructure<T> for ZeroCurve<T> {
    /// `exp(-y(t))`, exactly `1` at `t <= 0`.
    fn discount_impl(&self, t: Time) -> T {
        if t <= 0.0 {
            return T::one();
        }
        (-self.integrated(t)).exp()
    }

    /// `y(t) / t`, with `0` returned at `t <= 0` to avoid `0/0`.
    fn zero_rate_impl(&self, t: Time) -> T {
        if t <= 0.0 {
            return T::zero();
        }
        self.integrated(t) / T::from_real(t)
    }

    fn forward_rate_impl(&self, t: Time) -> T {
        self.interp.derivative(T::from_real(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn sample() -> ZeroCurve {
        ZeroCurve::new(&[0.5, 1.0, 2.0, 5.0], &[0.02, 0.025, 0.03, 0.035]).unwrap()
    }

    #[test]
    fn anchor_at_zero() {
        let curve = sample();
        assert_eq!(curve.discount(0.0), 1.0);
        assert_eq!(curve.zero_rate(0.0), 0.0);
    }

    #[test]
    fn pillars_reproduced() {
        let curve = sample();
        for p in curve.pillars() {
            assert_abs_diff_eq!(curve.zero_rate(p.time), p.value, epsilon = 1e-14);
            assert_abs_diff_eq!(curve.discount(p.time), (-p.value * p.time).exp(), epsilon = 1e-14);
        }
    }

    #[test]
    fn forward_is_derivative_of_log_discount() {
        let curve = sample();
        for &t in &[0.3, 1.5, 4.0, 7.0] {
            let h = 1e-6;
            let fd = (curve.discount(t - h).ln() - curve.discount(t + h).ln()) / (2.0 * h);
            assert_abs_diff_eq!(curve.forward_rate(t), fd, epsilon = 1e-7);
        }
    }

    #[test]
    fn single_pillar_is_flat() {
        let curve = ZeroCurve::new(&[2.0], &[0.03]).unwrap();
        for &t in &[0.5, 2.0, 10.0] {
            assert_abs_diff_eq!(curve.zero_rate(t), 0.03, epsilon = 1e-15);
            assert_abs_diff_eq!(curve.forward_rate(t), 0.03, epsilon = 1e-15);
        }
    }

    #[test]
    fn linear_scheme_available() {
        let curve = ZeroCurve::with_interpolation(&[1.0, 2.0], &[0.02, 0.03], &Linear).unwrap();
        // y(1.5) = (0.02 + 0.06) / 2
        assert_abs_diff_eq!(curve.zero_rate(1.5), 0.04 / 1.5, epsilon = 1e-15);
    }

    #[test]
    fn extrapolation_warns_but_evaluates() {
        let curve = sample();
        assert!(curve.domain_warning(8.0).is_some());
        assert!(curve.domain_warning(5.0).is_none());
        let batch = curve.discounts(&[1.0, 8.0]);
        assert!(batch[1].is_finite() && batch[1] < batch[0]);
    }

    #[test]
    fn pillar_round_trip() {
        let curve = sample();
        let restored = ZeroCurve::<f64>::from_pillars(&curve.pillars()).unwrap();
        for &t in &[0.1, 0.75, 3.3, 6.0] {
            assert_eq!(restored.discount(t), curve.discount(t));
        }
    }

    #[test]
    fn single_precision_curve() {
        let curve = ZeroCurve::<f32>::new(&[1.0, 2.0, 3.0], &[0.02, 0.025, 0.03]).unwrap();
        assert_eq!(curve.discount(0.0), 1.0_f32);
        assert!((curve.zero_rate(2.0) - 0.025).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_pillars() {
        use ck_core::Error;
        for (times, rates) in [
            (vec![], vec![]),
            (vec![0.0, 1.0], vec![0.01, 0.02]),
            (vec![1.0, 1.0], vec![0.01, 0.02]),
            (vec![2.0, 1.0], vec![0.01, 0.02]),
            (vec![1.0, 2.0], vec![0.01]),
        ] {
            let err = ZeroCurve::<f64>::new(&times, &rates).unwrap_err();
            assert!(matches!(err, Error::DegenerateInput(_)), "{times:?}: {err}");
        }
    }

    proptest! {
        #[test]
        fn discount_anchor_for_any_curve(
            rates in prop::collection::vec(-0.02f64..0.1, 1..8),
        ) {
            let times: Vec<f64> = (1..=rates.len()).map(|i| i as f64).collect();
            let curve = ZeroCurve::new(&times, &rates).unwrap();
            prop_assert_eq!(curve.discount(0.0), 1.0);
            for (&t, &r) in times.iter().zip(&rates) {
                prop_assert!((curve.zero_rate(t) - r).abs() < 1e-12);
            }
        }
    }
}
