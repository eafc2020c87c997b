//! # ck-termstructures
//!
//! Discount curves and default-probability curves.
//!
//! Curves are immutable value objects: times are plain [`Time`](ck_core::Time)
//! values in years, curve values are any [`Scalar`](ck_math::Scalar).  Every
//! curve evaluates outside its fitted range (extrapolation is a documented
//! policy, not an error) and reports such queries through
//! [`TermStructure::domain_warning`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `TermStructure` — base trait for all term structures.
pub mod term_structure;

/// `YieldTermStructure` — discount curves.
pub mod yield_term_structure;

/// `FlatForward` — constant forward-rate yield curve.
pub mod flat_forward;

/// `ZeroCurve` — spline over the integrated zero rate `t·r(t)`.
pub mod zero_curve;

/// `DefaultProbabilityTermStructure` — credit default-probability curves.
pub mod default_probability_term_structure;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use default_probability_term_structure::{
    DefaultProbabilityTermStructure, FlatHazardRate, HazardRateCurve,
};
pub use flat_forward::FlatForward;
pub use term_structure::TermStructure;
pub use yield_term_structure::YieldTermStructure;
pub use zero_curve::{CubicNatural, InterpolationBuilder, Linear, ZeroCurve};
