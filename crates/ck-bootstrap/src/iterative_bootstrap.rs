//! The generic pillar-by-pillar bootstrap.
//!
//! A [`CurveBuilder`] turns `(times, values)` into an immutable curve and a
//! [`CalibrationHelper`] measures how far a curve misprices one market
//! quote.  [`IterativeBootstrap::run`] folds the helpers, shortest maturity
//! first, through [`BootstrapState::calibrate`]:
//!
//! ```text
//! state_0 = empty
//! state_i+1 = state_i.calibrate(helper_i)      // solves value_i, freezes it
//! ```
//!
//! Each step solves `helper_i.implied_quote(build(frozen ∪ {x})) = quote_i`
//! for `x`: the search interval is widened until the residual changes sign,
//! then the configured root finder runs inside it.  A pillar that cannot be
//! solved aborts the whole bootstrap with `CalibrationFailure`.
//!
//! A later pillar may move the value of an earlier instrument: a natural
//! spline is non-local, so any payment date between knots shifts when a
//! later knot is added.  After the first pass, further sweeps re-solve every
//! pillar against the complete curve until all quotes reprice within the
//! accuracy, the values stop moving, or `max_sweeps` is used up.  If any
//! quote is then still off by more than `repricing_tolerance`, the run fails
//! with `CalibrationFailure` naming the worst pillar.

use ck_core::{errors::Result, Error, Pillar, Real, Size, Time};
use ck_math::{bracket_root, comparison::max_abs, SolverKind};
use tracing::{debug, info, warn};

use crate::config::BootstrapConfig;
use crate::report::{CalibrationReport, PillarFit};

/// Builds a curve from fitted pillars.
pub trait CurveBuilder {
    /// The curve type produced.
    type Curve;

    /// Build the curve through `(times[k], values[k])`.
    fn build(&self, times: &[Time], values: &[Real]) -> Result<Self::Curve>;

    /// Default initial search interval for a pillar value.
    fn bracket(&self) -> (Real, Real);

    /// Smallest admissible pillar value, if any.
    fn value_floor(&self) -> Option<Real> {
        None
    }
}

/// An instrument that pins down one pillar.
pub trait CalibrationHelper<C: ?Sized> {
    /// Time of the pillar this instrument calibrates.
    fn pillar_time(&self) -> Time;

    /// The market quote.
    fn quote(&self) -> Real;

    /// The quote implied by `curve`.
    fn implied_quote(&self, curve: &C) -> Result<Real>;

    /// `implied_quote(curve) − quote()`.
    fn residual(&self, curve: &C) -> Result<Real> {
        Ok(self.implied_quote(curve)? - self.quote())
    }
}

/// The pillars accepted so far and the curve built from them.
///
/// Owned by a running bootstrap; every step consumes the state and returns
/// the next one.
#[derive(Debug, Clone)]
pub struct BootstrapState<C> {
    times: Vec<Time>,
    values: Vec<Real>,
    fits: Vec<PillarFit>,
    curve: Option<C>,
}

impl<C> Default for BootstrapState<C> {
    fn default() -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
            fits: Vec::new(),
            curve: None,
        }
    }
}

impl<C> BootstrapState<C> {
    /// The initial state: no pillars solved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pillars solved.
    pub fn solved(&self) -> Size {
        self.values.len()
    }

    /// Times of the solved pillars.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Values of the solved pillars.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// The curve through the solved pillars, `None` before the first step.
    pub fn curve(&self) -> Option<&C> {
        self.curve.as_ref()
    }

    /// Solved pillars as `(time, value)` records.
    pub fn pillars(&self) -> Vec<Pillar> {
        self.times
            .iter()
            .zip(&self.values)
            .map(|(&t, &v)| Pillar::new(t, v))
            .collect()
    }

    /// Solve the next pillar against `helper` and freeze it.
    ///
    /// # Errors
    /// `CalibrationFailure` if no root is found, `QuoteInconsistency` if the
    /// root is below the builder's floor, or any error raised while building
    /// curves or pricing the helper.
    pub fn calibrate<B, H>(mut self, bootstrap: &IterativeBootstrap<'_, B>, helper: &H) -> Result<Self>
    where
        B: CurveBuilder<Curve = C>,
        H: CalibrationHelper<C> + ?Sized,
    {
        let pillar = self.values.len();
        let time = helper.pillar_time();
        self.times.push(time);
        self.values.push(0.0);

        let (value, curve, fit) = bootstrap.solve_pillar(pillar, &self.times, &self.values, helper)?;
        debug!(
            pillar,
            time,
            value,
            iterations = fit.iterations,
            residual = fit.residual,
            "pillar calibrated"
        );

        self.values[pillar] = value;
        self.fits.push(fit);
        self.curve = Some(curve);
        Ok(self)
    }

    fn finish(self, sweeps: Size, max_repricing_error: Real) -> Result<Calibrated<C>> {
        let pillars = self.pillars();
        let curve = self
            .curve
            .ok_or_else(|| Error::Runtime("bootstrap finished without any pillar".into()))?;
        Ok(Calibrated {
            curve,
            report: CalibrationReport {
                pillars,
                fits: self.fits,
                sweeps,
                max_repricing_error,
            },
        })
    }
}

/// A calibrated curve with its diagnostics.
#[derive(Debug, Clone)]
pub struct Calibrated<C> {
    /// The fitted curve.
    pub curve: C,
    /// How the fit went.
    pub report: CalibrationReport,
}

/// Sequential bootstrap driven by a [`CurveBuilder`] and a [`BootstrapConfig`].
#[derive(Debug, Clone)]
pub struct IterativeBootstrap<'a, B> {
    builder: B,
    config: &'a BootstrapConfig,
}

impl<'a, B: CurveBuilder> IterativeBootstrap<'a, B> {
    /// Create a bootstrap.
    pub fn new(builder: B, config: &'a BootstrapConfig) -> Self {
        Self { builder, config }
    }

    /// The curve builder.
    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Calibrate one pillar per helper, in order.
    ///
    /// Pillar times are checked before any solve: they must be positive,
    /// finite, and strictly increasing.  A quote still mispriced by more than
    /// `repricing_tolerance` once the sweeps stop is a `CalibrationFailure`.
    pub fn run<H>(&self, helpers: &[H]) -> Result<Calibrated<B::Curve>>
    where
        H: CalibrationHelper<B::Curve>,
    {
        self.config.validate()?;
        let times: Vec<Time> = helpers.iter().map(|h| h.pillar_time()).collect();
        ck_core::validate_pillar_times(&times, "calibration pillars")?;

        let mut state = helpers
            .iter()
            .try_fold(BootstrapState::new(), |state, helper| state.calibrate(self, helper))?;

        let mut sweeps = 1;
        let mut residuals = self.repricing_residuals(&state, helpers)?;
        let mut max_error = max_abs(&residuals);
        while sweeps < self.config.max_sweeps && !(max_error <= self.config.accuracy) {
            let (next, step) = self.sweep(state, helpers)?;
            state = next;
            sweeps += 1;
            residuals = self.repricing_residuals(&state, helpers)?;
            max_error = max_abs(&residuals);
            debug!(sweep = sweeps, max_error, step, "refinement sweep finished");
            // values stopped moving: the solver cannot do better
            if step <= self.config.accuracy {
                break;
            }
        }

        if !(max_error <= self.config.repricing_tolerance) {
            let pillar = residuals
                .iter()
                .position(|r| r.is_nan() || r.abs() >= max_error)
                .unwrap_or(0);
            warn!(
                sweeps,
                pillar,
                max_error,
                tolerance = self.config.repricing_tolerance,
                "quotes not repriced when the sweep budget ran out"
            );
            return Err(Error::CalibrationFailure {
                pillar,
                last_residual: residuals[pillar],
            });
        }

        info!(pillars = helpers.len(), sweeps, max_error, "bootstrap finished");
        state.finish(sweeps, max_error)
    }

    /// Re-solve every pillar against the full curve, in order.
    ///
    /// Also returns the largest change of any pillar value.
    fn sweep<H>(
        &self,
        mut state: BootstrapState<B::Curve>,
        helpers: &[H],
    ) -> Result<(BootstrapState<B::Curve>, Real)>
    where
        H: CalibrationHelper<B::Curve>,
    {
        let mut step: Real = 0.0;
        for (pillar, helper) in helpers.iter().enumerate() {
            let (value, curve, fit) = self.solve_pillar(pillar, &state.times, &state.values, helper)?;
            step = step.max((value - state.values[pillar]).abs());
            state.values[pillar] = value;
            state.fits[pillar].iterations += fit.iterations;
            state.fits[pillar].residual = fit.residual;
            state.curve = Some(curve);
        }
        Ok((state, step))
    }

    /// Residual of every quote on the current curve, in pillar order.
    fn repricing_residuals<H>(&self, state: &BootstrapState<B::Curve>, helpers: &[H]) -> Result<Vec<Real>>
    where
        H: CalibrationHelper<B::Curve>,
    {
        let curve = state
            .curve
            .as_ref()
            .ok_or_else(|| Error::Runtime("no curve to reprice on".into()))?;
        helpers.iter().map(|h| h.residual(curve)).collect()
    }

    /// Solve `values[pillar]` with every other value held fixed.
    ///
    /// Returns the accepted value, the curve built with it, and the fit.
    fn solve_pillar<H>(
        &self,
        pillar: Size,
        times: &[Time],
        values: &[Real],
        helper: &H,
    ) -> Result<(Real, B::Curve, PillarFit)>
    where
        H: CalibrationHelper<B::Curve> + ?Sized,
    {
        let mut trial = values.to_vec();
        let mut residual = |x: Real| -> Result<Real> {
            trial[pillar] = x;
            let curve = self.builder.build(times, &trial)?;
            helper.residual(&curve)
        };

        let (lo, hi) = match self.config.bracket {
            Some([lo, hi]) => (lo, hi),
            None => self.builder.bracket(),
        };
        let bracket = bracket_root(&mut residual, lo, hi, self.config.max_bracket_expansions)
            .map_err(|e| self.calibration_failure(pillar, e))?;
        let outcome = SolverKind::from(self.config.root_finder)
            .solve_in(
                &mut residual,
                bracket,
                self.config.accuracy,
                self.config.max_iterations,
            )
            .map_err(|e| self.calibration_failure(pillar, e))?;

        let mut value = outcome.root;
        if let Some(floor) = self.builder.value_floor() {
            if value < floor && !self.config.allow_negative_values {
                if floor - value > self.config.accuracy {
                    warn!(pillar, value, floor, "solved pillar value below floor");
                    return Err(Error::QuoteInconsistency { pillar, value });
                }
                value = floor;
            }
        }

        let mut accepted = values.to_vec();
        accepted[pillar] = value;
        let curve = self.builder.build(times, &accepted)?;
        let fit = PillarFit {
            iterations: outcome.iterations,
            residual: helper.residual(&curve)?,
        };
        Ok((value, curve, fit))
    }

    fn calibration_failure(&self, pillar: Size, error: Error) -> Error {
        let last_residual = match error {
            Error::NoConvergence { last_residual, .. } => last_residual,
            // non-finite residual during the search
            Error::Runtime(_) => Real::NAN,
            other => return other,
        };
        warn!(pillar, last_residual, "pillar calibration failed");
        Error::CalibrationFailure {
            pillar,
            last_residual,
        }
    }
}
