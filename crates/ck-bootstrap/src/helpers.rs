//! Calibration instruments.
//!
//! A helper couples one market quote with the instrument that reprices it.
//! Both helpers measure their residual in quote units: par rate or par
//! spread minus the market quote.

use ck_core::{errors::Result, MarketQuote, Real, Time};
use ck_instruments::{CreditDefaultSwap, VanillaSwap};
use ck_termstructures::{HazardRateCurve, YieldTermStructure};

use crate::config::{CdsConventions, SwapConventions};
use crate::iterative_bootstrap::CalibrationHelper;

/// A par swap rate quote.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRateHelper {
    swap: VanillaSwap,
    quote: Real,
}

impl SwapRateHelper {
    /// Helper for a swap struck at the quoted rate.
    pub fn new(swap: VanillaSwap) -> Self {
        let quote = swap.fixed_rate;
        Self { swap, quote }
    }

    /// Helper for a quote under the given conventions.
    ///
    /// # Errors
    /// `DegenerateInput` if the swap schedule cannot be built.
    pub fn from_quote(quote: &MarketQuote, conventions: &SwapConventions) -> Result<Self> {
        let swap = VanillaSwap::payer(
            conventions.start,
            quote.maturity,
            conventions.fixed_interval,
            quote.value,
        )?;
        Ok(Self::new(swap))
    }

    /// The underlying swap.
    pub fn swap(&self) -> &VanillaSwap {
        &self.swap
    }
}

impl<C: YieldTermStructure + ?Sized> CalibrationHelper<C> for SwapRateHelper {
    fn pillar_time(&self) -> Time {
        self.swap.maturity()
    }

    fn quote(&self) -> Real {
        self.quote
    }

    fn implied_quote(&self, curve: &C) -> Result<Real> {
        Ok(self.swap.par_rate(curve))
    }
}

/// A par CDS spread quote, priced against a fixed discount curve.
#[derive(Debug, Clone)]
pub struct CdsHelper<'a> {
    cds: CreditDefaultSwap,
    quote: Real,
    discount: &'a dyn YieldTermStructure,
}

impl<'a> CdsHelper<'a> {
    /// Helper for `cds` quoted at par spread `quote`.
    pub fn new(cds: CreditDefaultSwap, quote: Real, discount: &'a dyn YieldTermStructure) -> Self {
        Self {
            cds,
            quote,
            discount,
        }
    }

    /// Helper for a quote under the given conventions.
    ///
    /// # Errors
    /// `DegenerateInput` for an invalid schedule, `InvalidArgument` for a
    /// recovery rate outside `[0, 1]`.
    pub fn from_quote(
        quote: &MarketQuote,
        discount: &'a dyn YieldTermStructure,
        conventions: &CdsConventions,
    ) -> Result<Self> {
        let cds = CreditDefaultSwap::new(
            conventions.start,
            quote.maturity,
            conventions.payment_interval,
            conventions.default_interval,
            conventions.recovery_rate,
        )?;
        Ok(Self::new(cds, quote.value, discount))
    }

    /// The underlying contract.
    pub fn cds(&self) -> &CreditDefaultSwap {
        &self.cds
    }
}

impl CalibrationHelper<HazardRateCurve> for CdsHelper<'_> {
    fn pillar_time(&self) -> Time {
        self.cds.maturity()
    }

    fn quote(&self) -> Real {
        self.quote
    }

    fn implied_quote(&self, curve: &HazardRateCurve) -> Result<Real> {
        Ok(self.cds.par_spread(self.discount, curve))
    }
}
