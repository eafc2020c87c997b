//! `PiecewiseZeroCurve` — a zero curve bootstrapped from par swap rates.
//!
//! Each quote `(T_i, s_i)` becomes a payer swap from the conventions' start to
//! `T_i`, and pillar `i` is the zero rate at `T_i` that makes the swap's par
//! rate equal `s_i` on the spline through the pillars fitted so far.
//!
//! # Example
//!
//! ```
//! use ck_bootstrap::{BootstrapConfig, PiecewiseZeroCurve, SwapConventions};
//! use ck_core::MarketQuote;
//! use ck_termstructures::YieldTermStructure;
//!
//! let quotes: Vec<MarketQuote> = [(1.0, 0.02), (2.0, 0.025), (5.0, 0.03)]
//!     .into_iter()
//!     .map(MarketQuote::from)
//!     .collect();
//! let curve = PiecewiseZeroCurve::bootstrap(
//!     &quotes,
//!     &SwapConventions::default(),
//!     &BootstrapConfig::default(),
//! )
//! .unwrap();
//! assert!(curve.discount(5.0) < curve.discount(1.0));
//! ```

use ck_core::{errors::Result, MarketQuote, Pillar, Rate, Real, Time};
use ck_termstructures::{
    CubicNatural, InterpolationBuilder, TermStructure, YieldTermStructure, ZeroCurve,
};

use crate::config::{BootstrapConfig, SwapConventions};
use crate::helpers::SwapRateHelper;
use crate::iterative_bootstrap::{Calibrated, CurveBuilder, IterativeBootstrap};
use crate::report::CalibrationReport;

/// Lower end of the default zero-rate search (−10 %).
const MIN_RATE: Rate = -0.10;

/// Upper end of the default zero-rate search (+30 %).
const MAX_RATE: Rate = 0.30;

/// Builds [`ZeroCurve`]s with a chosen interpolation of `t·r(t)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroCurveBuilder<I = CubicNatural> {
    interpolation: I,
}

impl<I: InterpolationBuilder> ZeroCurveBuilder<I> {
    /// Builder using `interpolation`.
    pub fn new(interpolation: I) -> Self {
        Self { interpolation }
    }
}

impl<I: InterpolationBuilder> CurveBuilder for ZeroCurveBuilder<I> {
    type Curve = ZeroCurve;

    fn build(&self, times: &[Time], values: &[Real]) -> Result<ZeroCurve> {
        ZeroCurve::with_interpolation(times, values, &self.interpolation)
    }

    fn bracket(&self) -> (Real, Real) {
        (MIN_RATE, MAX_RATE)
    }
}

/// A zero curve fitted to par swap rates.
#[derive(Debug, Clone)]
pub struct PiecewiseZeroCurve {
    curve: ZeroCurve,
    report: CalibrationReport,
}

impl PiecewiseZeroCurve {
    /// Bootstrap a natural-spline zero curve.
    ///
    /// # Errors
    /// * `DegenerateInput` — empty quotes, a non-positive or non-finite
    ///   maturity, or maturities that are not strictly increasing; raised
    ///   before any solve
    /// * `Config` — invalid `config`
    /// * `CalibrationFailure` — a pillar could not be solved
    pub fn bootstrap(
        quotes: &[MarketQuote],
        conventions: &SwapConventions,
        config: &BootstrapConfig,
    ) -> Result<Self> {
        Self::bootstrap_with(quotes, conventions, config, CubicNatural)
    }

    /// Bootstrap with an explicit interpolation scheme.
    pub fn bootstrap_with<I: InterpolationBuilder>(
        quotes: &[MarketQuote],
        conventions: &SwapConventions,
        config: &BootstrapConfig,
        interpolation: I,
    ) -> Result<Self> {
        ck_core::validate_quotes(quotes)?;
        config.validate()?;
        let helpers = quotes
            .iter()
            .map(|q| SwapRateHelper::from_quote(q, conventions))
            .collect::<Result<Vec<_>>>()?;

        let Calibrated { curve, report } =
            IterativeBootstrap::new(ZeroCurveBuilder::new(interpolation), config).run(&helpers)?;
        Ok(Self { curve, report })
    }

    /// The fitted curve.
    pub fn curve(&self) -> &ZeroCurve {
        &self.curve
    }

    /// Calibration diagnostics.
    pub fn report(&self) -> &CalibrationReport {
        &self.report
    }

    /// Fitted `(maturity, zero rate)` pillars, aligned with the quotes.
    pub fn pillars(&self) -> Vec<Pillar> {
        self.curve.pillars()
    }

    /// Fitted zero rates, aligned with the quotes.
    pub fn rates(&self) -> &[Rate] {
        self.curve.rates()
    }

    /// Drop the diagnostics and keep the curve.
    pub fn into_curve(self) -> ZeroCurve {
        self.curve
    }
}

impl TermStructure for PiecewiseZeroCurve {
    fn max_time(&self) -> Time {
        self.curve.max_time()
    }
}

impl YieldTermStructure for PiecewiseZeroCurve {
    fn discount_impl(&self, t: Time) -> Real {
        self.curve.discount_impl(t)
    }

    fn zero_rate_impl(&self, t: Time) -> Rate {
        self.curve.zero_rate_impl(t)
    }

    fn forward_rate_impl(&self, t: Time) -> Rate {
        self.curve.forward_rate_impl(t)
    }
}
