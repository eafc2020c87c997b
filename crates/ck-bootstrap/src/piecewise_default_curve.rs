//! `PiecewiseDefaultCurve` — a hazard curve bootstrapped from CDS spreads.
//!
//! Segment `i` holds a constant intensity on `[T_{i−1}, T_i)`.  Solving
//! pillar `i` rebuilds the curve from every earlier intensity plus the trial
//! one, since survival compounds over all previous segments.  A CDS maturing
//! at `T_i` only sees survival up to `T_i`, so later pillars never disturb
//! earlier quotes.

use ck_core::{errors::Result, HazardRate, MarketQuote, Pillar, Probability, Real, Time};
use ck_termstructures::{DefaultProbabilityTermStructure, HazardRateCurve, TermStructure, YieldTermStructure};

use crate::config::{BootstrapConfig, CdsConventions};
use crate::helpers::CdsHelper;
use crate::iterative_bootstrap::{Calibrated, CurveBuilder, IterativeBootstrap};
use crate::report::CalibrationReport;

/// Builds [`HazardRateCurve`]s; intensities are floored at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct HazardCurveBuilder;

impl CurveBuilder for HazardCurveBuilder {
    type Curve = HazardRateCurve;

    fn build(&self, times: &[Time], values: &[Real]) -> Result<HazardRateCurve> {
        HazardRateCurve::new(times, values)
    }

    fn bracket(&self) -> (Real, Real) {
        (0.0, 0.5)
    }

    fn value_floor(&self) -> Option<Real> {
        Some(0.0)
    }
}

/// A piecewise-constant hazard curve fitted to par CDS spreads.
#[derive(Debug, Clone)]
pub struct PiecewiseDefaultCurve {
    curve: HazardRateCurve,
    report: CalibrationReport,
}

impl PiecewiseDefaultCurve {
    /// Bootstrap against `discount`.
    ///
    /// # Errors
    /// * `DegenerateInput` — bad quote maturities, raised before any solve
    /// * `InvalidArgument` — recovery rate outside `[0, 1]`
    /// * `Config` — invalid `config`
    /// * `QuoteInconsistency` — a segment needs a negative intensity and
    ///   `allow_negative_values` is off
    /// * `CalibrationFailure` — a pillar could not be solved
    pub fn bootstrap(
        quotes: &[MarketQuote],
        discount: &dyn YieldTermStructure,
        conventions: &CdsConventions,
        config: &BootstrapConfig,
    ) -> Result<Self> {
        ck_core::validate_quotes(quotes)?;
        config.validate()?;
        let helpers = quotes
            .iter()
            .map(|q| CdsHelper::from_quote(q, discount, conventions))
            .collect::<Result<Vec<_>>>()?;

        let Calibrated { curve, report } =
            IterativeBootstrap::new(HazardCurveBuilder, config).run(&helpers)?;
        Ok(Self { curve, report })
    }

    /// The fitted curve.
    pub fn curve(&self) -> &HazardRateCurve {
        &self.curve
    }

    /// Calibration diagnostics.
    pub fn report(&self) -> &CalibrationReport {
        &self.report
    }

    /// Fitted `(maturity, intensity)` pillars, aligned with the quotes.
    pub fn pillars(&self) -> Vec<Pillar> {
        self.curve.pillars()
    }

    /// Fitted intensities, one per segment.
    pub fn hazard_rates(&self) -> &[HazardRate] {
        self.curve.hazard_rates()
    }

    /// Drop the diagnostics and keep the curve.
    pub fn into_curve(self) -> HazardRateCurve {
        self.curve
    }
}

impl TermStructure for PiecewiseDefaultCurve {
    fn max_time(&self) -> Time {
        self.curve.max_time()
    }
}

impl DefaultProbabilityTermStructure for PiecewiseDefaultCurve {
    fn survival_probability_impl(&self, t: Time) -> Probability {
        self.curve.survival_probability_impl(t)
    }

    fn hazard_rate_impl(&self, t: Time) -> HazardRate {
        self.curve.hazard_rate_impl(t)
    }
}
