//! Natural cubic spline interpolation.
//!
//! The spline is twice continuously differentiable and its second derivative
//! `M` vanishes at both end knots.  The interior second derivatives solve the
//! `(N-2) × (N-2)` tridiagonal system
//!
//! ```text
//! h[i-1]/6 · M[i-1] + (h[i-1] + h[i])/3 · M[i] + h[i]/6 · M[i+1]
//!     = (f[i+1] - f[i]) / h[i] - (f[i] - f[i-1]) / h[i-1]
//! ```
//!
//! with `h[i] = x[i+1] - x[i]`.  On the segment `[x[i-1], x[i]]` of length `h`
//! the spline is
//!
//! ```text
//! S(x) = (x[i] - x)^3 / (6h) · M[i-1] + (x[i] - x) · (f[i-1]/h - h/6 · M[i-1])
//!      + (x - x[i-1])^3 / (6h) · M[i] + (x - x[i-1]) · (f[i]/h - h/6 · M[i])
//! ```
//!
//! Points outside `[x[0], x[N-1]]` continue the nearest boundary cubic.

use ck_core::errors::Result;

use super::{check_knots, locate_segment, Interpolation1D};
use crate::scalar::{lit, Scalar};
use crate::tridiagonal::TridiagonalSystem;

/// Natural cubic spline through `N ≥ 3` strictly increasing knots.
///
/// Immutable once built; evaluation only reads the knots and the second
/// derivatives, so a spline can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalCubicSpline<T: Scalar = f64> {
    x: Vec<T>,
    fx: Vec<T>,
    second_der: Vec<T>,
}

impl<T: Scalar> NaturalCubicSpline<T> {
    /// Build the spline through `(x[i], fx[i])`.
    ///
    /// # Errors
    /// `DegenerateInput` if the slices differ in length, hold fewer than 3
    /// points or non-finite values, or `x` is not strictly increasing.
    pub fn new(x: &[T], fx: &[T]) -> Result<Self> {
        check_knots(x, fx, 3)?;

        let (system, rhs) = Self::build_system(x, fx);
        let interior = system.solve(&rhs)?;

        let mut second_der = Vec::with_capacity(x.len());
        second_der.push(T::zero());
        second_der.extend(interior);
        second_der.push(T::zero());

        Ok(Self {
            x: x.to_vec(),
            fx: fx.to_vec(),
            second_der,
        })
    }

    /// Assemble the interior second-derivative system `A · M = c`.
    fn build_system(x: &[T], fx: &[T]) -> (TridiagonalSystem<T>, Vec<T>) {
        let n = x.len();
        let three = lit::<T>(3.0);
        let six = lit::<T>(6.0);

        let mut system = TridiagonalSystem::new(n - 2);
        let mut rhs = Vec::with_capacity(n - 2);
        for row in 0..n - 2 {
            let i = row + 1;
            let h_prev = x[i] - x[i - 1];
            let h = x[i + 1] - x[i];
            system.diag[row] = (h_prev + h) / three;
            if row > 0 {
                system.lower[row] = h_prev / six;
            }
            if row + 1 < n - 2 {
                system.upper[row] = h / six;
            }
            rhs.push((fx[i + 1] - fx[i]) / h - (fx[i] - fx[i - 1]) / h_prev);
        }
        (system, rhs)
    }

    /// Knot abscissas.
    pub fn xs(&self) -> &[T] {
        &self.x
    }

    /// Knot values.
    pub fn ys(&self) -> &[T] {
        &self.fx
    }

    /// Second derivatives at the knots; the first and last are exactly zero.
    pub fn second_derivatives(&self) -> &[T] {
        &self.second_der
    }

    /// Second derivative at `x`, linear between knots.
    pub fn second_derivative(&self, x: T) -> T {
        let i = locate_segment(&self.x, x);
        let h = self.x[i] - self.x[i - 1];
        ((self.x[i] - x) * self.second_der[i - 1] + (x - self.x[i - 1]) * self.second_der[i]) / h
    }
}

impl<T: Scalar> Interpolation1D<T> for NaturalCubicSpline<T> {
    fn x_min(&self) -> T {
        self.x[0]
    }

    fn x_max(&self) -> T {
        self.x[self.x.len() - 1]
    }

    fn operator(&self, x: T) -> T {
        let i = locate_segment(&self.x, x);
        let six = lit::<T>(6.0);
        let h = self.x[i] - self.x[i - 1];
        let (m0, m1) = (self.second_der[i - 1], self.second_der[i]);
        let a = self.x[i] - x;
        let b = x - self.x[i - 1];

        let first_term = a * a * a / (six * h) * m0 + a * (self.fx[i - 1] / h - h / six * m0);
        let second_term = b * b * b / (six * h) * m1 + b * (self.fx[i] / h - h / six * m1);
        first_term + second_term
    }

    fn derivative(&self, x: T) -> T {
        let i = locate_segment(&self.x, x);
        let two = lit::<T>(2.0);
        let six = lit::<T>(6.0);
        let h = self.x[i] - self.x[i - 1];
        let (m0, m1) = (self.second_der[i - 1], self.second_der[i]);
        let a = self.x[i] - x;
        let b = x - self.x[i - 1];

        -(a * a) / (two * h) * m0 - (self.fx[i - 1] / h - h / six * m0)
            + b * b / (two * h) * m1
            + (self.fx[i] / h - h / six * m1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn passes_through_nodes() {
        let xs: [f64; 5] = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 1.0, 0.5, 2.0, 1.5];
        let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let v = f.operator(x);
            assert!((v - y).abs() < 1e-12, "at x={x}: expected {y}, got {v}");
        }
    }

    #[test]
    fn natural_boundary_is_exactly_zero() {
        let f = NaturalCubicSpline::new(&[0.0, 0.5, 2.0, 3.0], &[1.0, -1.0, 4.0, 0.0]).unwrap();
        let m = f.second_derivatives();
        assert_eq!(m.len(), 4);
        assert_eq!(m[0], 0.0);
        assert_eq!(m[3], 0.0);
        assert_eq!(f.second_derivative(0.0), 0.0);
    }

    #[test]
    fn reproduces_linear_data() {
        let xs = [0.0, 1.0, 2.5, 3.0, 7.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x - 1.0).collect();
        let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
        for i in 0..=40 {
            let x = -1.0 + 9.0 * (i as f64) / 40.0;
            assert_abs_diff_eq!(f.operator(x), 2.0 * x - 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(f.derivative(x), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn three_knot_closed_form() {
        // One interior unknown: (h0+h1)/3 · M1 = (f2-f1)/h1 - (f1-f0)/h0
        let f = NaturalCubicSpline::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
        assert_abs_diff_eq!(f.second_derivatives()[1], -3.0, epsilon = 1e-14);
        assert_abs_diff_eq!(f.operator(0.5), 0.6875, epsilon = 1e-14);
    }

    #[test]
    fn continuous_first_and_second_derivative_at_interior_knots() {
        let xs = [0.0, 0.7, 1.3, 2.0, 4.0];
        let ys = [0.0, 0.4, -0.2, 1.1, 0.5];
        let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
        let eps = 1e-9;
        for &k in &xs[1..4] {
            assert_abs_diff_eq!(f.derivative(k - eps), f.derivative(k + eps), epsilon = 1e-7);
            assert_abs_diff_eq!(
                f.second_derivative(k - eps),
                f.second_derivative(k + eps),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let xs = [0.0, 1.0, 2.0, 5.0];
        let ys = [0.0, 0.02, 0.05, 0.15];
        let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
        for &x in &[0.3, 1.7, 3.2, 6.0] {
            let h = 1e-6;
            let fd = (f.operator(x + h) - f.operator(x - h)) / (2.0 * h);
            assert_abs_diff_eq!(f.derivative(x), fd, epsilon = 1e-8);
        }
    }

    #[test]
    fn extrapolation_continues_boundary_cubic() {
        let f = NaturalCubicSpline::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
        // Left of the first knot the first segment's cubic is used.
        let left = f.operator(-1.0);
        let a = 1.0 - (-1.0_f64);
        let b = -1.0 - 0.0;
        let expected = a * (0.0 - 0.0) + b * b * b / 6.0 * -3.0 + b * (1.0 + 0.5);
        assert_abs_diff_eq!(left, expected, epsilon = 1e-14);
        assert!(!f.is_in_range(-1.0));
    }

    #[test]
    fn generic_over_single_precision() {
        let f = NaturalCubicSpline::<f32>::new(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, 0.0, 1.0]).unwrap();
        assert!((f.operator(2.0) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_inputs_rejected() {
        use ck_core::Error;
        let two = NaturalCubicSpline::new(&[0.0, 1.0], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(two, Error::DegenerateInput(_)));
        let dup = NaturalCubicSpline::new(&[0.0, 1.0, 1.0], &[0.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(dup, Error::DegenerateInput(_)));
        let dec = NaturalCubicSpline::new(&[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0]).unwrap_err();
        assert!(matches!(dec, Error::DegenerateInput(_)));
        let len = NaturalCubicSpline::new(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(len, Error::DegenerateInput(_)));
    }

    fn knots() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (3usize..12).prop_flat_map(|n| {
            (
                prop::collection::vec(0.05f64..3.0, n),
                prop::collection::vec(-5.0f64..5.0, n),
            )
                .prop_map(|(gaps, ys)| {
                    let xs = gaps
                        .iter()
                        .scan(0.0, |acc, g| {
                            *acc += g;
                            Some(*acc)
                        })
                        .collect();
                    (xs, ys)
                })
        })
    }

    proptest! {
        #[test]
        fn interpolates_every_knot((xs, ys) in knots()) {
            let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
            for (&x, &y) in xs.iter().zip(&ys) {
                prop_assert!((f.operator(x) - y).abs() < 1e-9, "at x={}: {} vs {}", x, f.operator(x), y);
            }
        }

        #[test]
        fn natural_boundary_for_any_knots((xs, ys) in knots()) {
            let f = NaturalCubicSpline::new(&xs, &ys).unwrap();
            let m = f.second_derivatives();
            prop_assert_eq!(m[0], 0.0);
            prop_assert_eq!(m[m.len() - 1], 0.0);
        }
    }
}
