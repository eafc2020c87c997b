//! # ck-bootstrap
//!
//! Sequential calibration of curves to market quotes.
//!
//! Pillars are fitted shortest maturity first.  For pillar `i` the values of
//! pillars `0..i` are frozen and a 1-D root finder adjusts the new value until
//! the pillar's instrument reprices its quote.  The procedure is a fold over
//! the quotes: each step consumes a [`BootstrapState`] and returns a new one
//! holding one more pillar and a freshly built, immutable curve.
//!
//! Two ready-made curves sit on top of the generic engine:
//!
//! * [`PiecewiseZeroCurve`] — spline zero curve fitted to par swap rates
//! * [`PiecewiseDefaultCurve`] — piecewise-constant hazard curve fitted to
//!   CDS par spreads

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Solver settings and instrument conventions.
pub mod config;

/// Calibration instruments for swap and CDS quotes.
pub mod helpers;

/// The generic pillar-by-pillar engine and its state.
pub mod iterative_bootstrap;

/// `PiecewiseZeroCurve` — zero curve bootstrapped from par swap rates.
pub mod piecewise_yield_curve;

/// `PiecewiseDefaultCurve` — hazard curve bootstrapped from CDS spreads.
pub mod piecewise_default_curve;

/// Serializable calibration diagnostics.
pub mod report;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use config::{BootstrapConfig, CdsConventions, RootFinder, SwapConventions};
pub use helpers::{CdsHelper, SwapRateHelper};
pub use iterative_bootstrap::{
    BootstrapState, Calibrated, CalibrationHelper, CurveBuilder, IterativeBootstrap,
};
pub use piecewise_default_curve::{HazardCurveBuilder, PiecewiseDefaultCurve};
pub use piecewise_yield_curve::{PiecewiseZeroCurve, ZeroCurveBuilder};
pub use report::{CalibrationReport, PillarFit};
