//! # curvekit
//!
//! Discount and default-probability curves built from sparse market quotes.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `ck-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! curvekit = "0.1"
//! ```
//!
//! ```rust
//! use curvekit::prelude::*;
//!
//! let swaps: Vec<MarketQuote> = [(1.0, 0.02), (2.0, 0.025), (5.0, 0.03)]
//!     .into_iter()
//!     .map(MarketQuote::from)
//!     .collect();
//! let config = BootstrapConfig::default();
//! let rates = PiecewiseZeroCurve::bootstrap(&swaps, &SwapConventions::default(), &config).unwrap();
//!
//! let spreads: Vec<MarketQuote> = [(1.0, 0.008), (5.0, 0.015)]
//!     .into_iter()
//!     .map(MarketQuote::from)
//!     .collect();
//! let credit =
//!     PiecewiseDefaultCurve::bootstrap(&spreads, &rates, &CdsConventions::default(), &config)
//!         .unwrap();
//!
//! let swap = VanillaSwap::payer(0.0, 5.0, 1.0, 0.03).unwrap();
//! assert!((swap.par_rate(&rates) - 0.03_f64).abs() < 1e-8);
//! assert!(credit.survival_probability(5.0) < 1.0);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ck_core as core;

/// Numerics: spline and linear interpolation, tridiagonal solver, 1-D root finders.
pub use ck_math as math;

/// Discount and default-probability term structures.
pub use ck_termstructures as termstructures;

/// Swaps and credit default swaps.
pub use ck_instruments as instruments;

/// Sequential curve calibration.
pub use ck_bootstrap as bootstrap;

/// The types most programs need.
pub mod prelude {
    pub use ck_bootstrap::{
        BootstrapConfig, CalibrationReport, CdsConventions, PiecewiseDefaultCurve,
        PiecewiseZeroCurve, SwapConventions,
    };
    pub use ck_core::{DomainWarning, Error, MarketQuote, Pillar, Real, Result, Time};
    pub use ck_instruments::{CreditDefaultSwap, SwapType, TimeSchedule, VanillaSwap};
    pub use ck_termstructures::{
        DefaultProbabilityTermStructure, FlatForward, FlatHazardRate, HazardRateCurve,
        TermStructure, YieldTermStructure, ZeroCurve,
    };
}
