//! 1D interpolation trait and implementations.

use ck_core::errors::Result;

use crate::scalar::Scalar;

mod natural_cubic;

pub use natural_cubic::NaturalCubicSpline;

/// A 1D interpolation function `f: R → R` defined by a set of known points.
pub trait Interpolation1D<T: Scalar = f64>: std::fmt::Debug + Send + Sync {
    /// Evaluate the interpolation at `x`.
    fn operator(&self, x: T) -> T;

    /// First derivative at `x`.
    fn derivative(&self, x: T) -> T;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> T;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> T;

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: T) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

/// Index `i` of the segment `[xs[i-1], xs[i]]` used to evaluate at `x`.
///
/// This is the "right" sorted-search position of `x` clamped to
/// `[1, xs.len() - 1]`: points below the first knot use the first segment,
/// points at or beyond the last knot use the last one.  `xs` must be sorted
/// and hold at least two points.
#[inline]
pub fn locate_segment<T: Scalar>(xs: &[T], x: T) -> usize {
    xs.partition_point(|&xi| xi <= x).clamp(1, xs.len() - 1)
}

/// Check that `xs` and `ys` can define an interpolation with at least
/// `min_points` knots: equal lengths, finite values, strictly increasing `xs`.
pub(crate) fn check_knots<T: Scalar>(xs: &[T], ys: &[T], min_points: usize) -> Result<()> {
    ck_core::ensure_input!(
        xs.len() == ys.len(),
        "xs and ys must have the same length ({} vs {})",
        xs.len(),
        ys.len()
    );
    ck_core::ensure_input!(
        xs.len() >= min_points,
        "need at least {min_points} points for interpolation, got {}",
        xs.len()
    );
    ck_core::ensure_input!(
        xs.iter().chain(ys).all(|v| v.is_finite()),
        "interpolation data must be finite"
    );
    for (i, w) in xs.windows(2).enumerate() {
        ck_core::ensure_input!(
            w[1] - w[0] > T::zero(),
            "abscissas must be strictly increasing (spacing {i} is {:?})",
            w[1] - w[0]
        );
    }
    Ok(())
}

// ── Linear ────────────────────────────────────────────────────────────────────

/// Linear interpolation.
///
/// `f(x) = y[i-1] + (y[i] - y[i-1]) * (x - x[i-1]) / (x[i] - x[i-1])`,
/// continued linearly outside the knot range.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolation<T: Scalar = f64> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Scalar> LinearInterpolation<T> {
    /// Construct a linear interpolation from sorted `xs` and corresponding `ys`.
    ///
    /// # Errors
    /// `DegenerateInput` if the slices have different lengths, fewer than 2
    /// points, or `xs` is not strictly increasing.
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self> {
        check_knots(xs, ys, 2)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    fn slope(&self, i: usize) -> T {
        (self.ys[i] - self.ys[i - 1]) / (self.xs[i] - self.xs[i - 1])
    }
}

impl<T: Scalar> Interpolation1D<T> for LinearInterpolation<T> {
    fn x_min(&self) -> T {
        self.xs[0]
    }

    fn x_max(&self) -> T {
        self.xs[self.xs.len() - 1]
    }

    fn operator(&self, x: T) -> T {
        let i = locate_segment(&self.xs, x);
        self.ys[i - 1] + (x - self.xs[i - 1]) * self.slope(i)
    }

    fn derivative(&self, x: T) -> T {
        self.slope(locate_segment(&self.xs, x))
    }
}
