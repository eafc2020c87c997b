//! # ck-math
//!
//! Mathematical utilities for curve construction: the [`Scalar`] numeric
//! abstraction, a tridiagonal linear solver, 1D interpolation (linear and
//! natural cubic spline), and bracketing 1D root finders.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// 1D interpolation schemes.
pub mod interpolations;

/// The numeric capability every curve computation is generic over.
pub mod scalar;

/// 1D root-finding solvers.
pub mod solvers1d;

/// Tridiagonal linear systems.
pub mod tridiagonal;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::max_abs;
pub use interpolations::{locate_segment, Interpolation1D, LinearInterpolation, NaturalCubicSpline};
pub use scalar::Scalar;
pub use solvers1d::{bracket_root, brent, try_brent, try_brent_in, Bracket, SolverKind, SolverOutcome};
pub use tridiagonal::TridiagonalSystem;
