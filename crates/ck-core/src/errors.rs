//! Error types for curvekit.
//!
//! A single `thiserror`-derived enum covers construction-time input problems,
//! calibration failures, and solver non-convergence.  The `ensure!`,
//! `ensure_input!`, and `fail!` macros return early with the matching variant.
//!
//! Out-of-range evaluation is *not* an error: curves extrapolate by policy and
//! report the situation as a [`DomainWarning`] value.

use thiserror::Error;

use crate::{Real, Size, Time};

/// The top-level error type used throughout curvekit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Input that cannot define a curve, schedule, or spline: too few knots,
    /// non-increasing or duplicated abscissas, non-positive spacing.
    ///
    /// Raised at construction time and never retried.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// The root solver for a bootstrap pillar did not converge.
    ///
    /// Fatal for the whole curve, since every later pillar depends on it.
    #[error("calibration failed at pillar {pillar}: last residual {last_residual:e}")]
    CalibrationFailure {
        /// Index of the failing pillar in quote order.
        pillar: Size,
        /// Residual at the last trial value.
        last_residual: Real,
    },

    /// A pillar solved to a value the curve cannot accept (e.g. a negative
    /// default intensity), which signals quotes inconsistent with each other.
    #[error("quote at pillar {pillar} is inconsistent: solved value {value:e}")]
    QuoteInconsistency {
        /// Index of the offending pillar in quote order.
        pillar: Size,
        /// The solved value.
        value: Real,
    },

    /// A 1-D solver exhausted its iteration budget.
    #[error("solver did not converge after {iterations} iterations (x = {last_x}, f(x) = {last_residual:e})")]
    NoConvergence {
        /// Number of iterations performed.
        iterations: Size,
        /// Last abscissa tried.
        last_x: Real,
        /// Function value at `last_x`.
        last_residual: Real,
    },

    /// Precondition violated.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

/// Shorthand `Result` type used throughout curvekit.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A query time fell outside the fitted pillar range.
///
/// Curves keep evaluating (by continuing the boundary segment, or flat hazard
/// beyond the last pillar); this record lets callers notice that they did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainWarning {
    /// The requested time.
    pub time: Time,
    /// Lower end of the fitted range.
    pub min_time: Time,
    /// Upper end of the fitted range.
    pub max_time: Time,
}

impl std::fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "time {} outside fitted range [{}, {}], extrapolating",
            self.time, self.min_time, self.max_time
        )
    }
}

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ck_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ck_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::DegenerateInput(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ck_core::{ensure_input, errors::Error};
/// fn knots(n: usize) -> ck_core::errors::Result<usize> {
///     ensure_input!(n >= 3, "need at least 3 knots, got {n}");
///     Ok(n)
/// }
/// assert!(knots(3).is_ok());
/// assert!(matches!(knots(2), Err(Error::DegenerateInput(_))));
/// ```
#[macro_export]
macro_rules! ensure_input {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::DegenerateInput(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use ck_core::{fail, errors::Error};
/// fn always_err() -> ck_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
