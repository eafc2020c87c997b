//! The numeric abstraction curves are generic over.
//!
//! Everything numeric in a curve evaluation (elementwise arithmetic,
//! `exp`/`ln`, the tridiagonal solve behind the spline) only needs
//! [`num_traits::Float`].  `Scalar` adds the two conversions that connect a
//! generic number to the `f64` world of schedules, quotes, and solvers.
//!
//! `f64` and `f32` implement it here.  A forward-mode dual number that
//! implements `Float` can implement `Scalar` the same way and flow through
//! splines, curves, and valuers unchanged, yielding sensitivities.

use std::fmt::Debug;

use ck_core::Real;
use num_traits::Float;

/// A floating-point number usable as the value type of curves and valuers.
pub trait Scalar: Float + Debug + Send + Sync + 'static {
    /// Lift a plain `Real` (schedule time, constant, quote) into `Self`.
    fn from_real(x: Real) -> Self;

    /// The plain value, dropping any attached derivative information.
    fn to_real(self) -> Real;
}

impl Scalar for f64 {
    #[inline]
    fn from_real(x: Real) -> Self {
        x
    }

    #[inline]
    fn to_real(self) -> Real {
        self
    }
}

impl Scalar for f32 {
    #[inline]
    fn from_real(x: Real) -> Self {
        x as f32
    }

    #[inline]
    fn to_real(self) -> Real {
        f64::from(self)
    }
}

/// Shorthand for [`Scalar::from_real`] inside generic code.
#[inline]
pub fn lit<T: Scalar>(x: Real) -> T {
    T::from_real(x)
}
