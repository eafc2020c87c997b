//! Credit default swaps.
//!
//! The premium leg pays the running spread on a payment schedule; the
//! protection leg pays `1 − R` at the end of the default-observation period
//! in which default happens.  With `P` the discount curve and `S` the
//! survival curve:
//!
//! ```text
//! DV01 = Σ α_i · P(pay_i) · S(pay_i)
//! DL   = (1 − R) · Σ P(def_i) · (S(def_{i−1}) − S(def_i))
//! ```
//!
//! The par spread is `DL / DV01`; a receiver (protection seller) at spread
//! `s` is worth `DV01·s − DL`.

use ck_core::{errors::Result, Probability, Spread, Time};
use ck_math::{scalar::lit, Scalar};
use ck_termstructures::{DefaultProbabilityTermStructure, YieldTermStructure};

use crate::schedule::TimeSchedule;

/// The two leg values of a CDS per unit notional and unit spread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsLegs<T: Scalar = f64> {
    /// Risky annuity of the premium leg.
    pub dv01: T,
    /// Expected discounted loss of the protection leg.
    pub dl: T,
}

/// A credit default swap on unit notional.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditDefaultSwap {
    premium: TimeSchedule,
    protection: TimeSchedule,
    recovery_rate: Probability,
}

impl CreditDefaultSwap {
    /// Create a CDS from `start` to `end` with premiums every
    /// `payment_interval` and default observed every `default_interval`.
    ///
    /// # Errors
    /// `DegenerateInput` for an invalid schedule, `InvalidArgument` if
    /// `recovery_rate` is outside `[0, 1]`.
    pub fn new(
        start: Time,
        end: Time,
        payment_interval: Time,
        default_interval: Time,
        recovery_rate: Probability,
    ) -> Result<Self> {
        Self::from_schedules(
            TimeSchedule::new(start, end, payment_interval)?,
            TimeSchedule::new(start, end, default_interval)?,
            recovery_rate,
        )
    }

    /// Create a CDS from explicit premium and protection schedules.
    pub fn from_schedules(
        premium: TimeSchedule,
        protection: TimeSchedule,
        recovery_rate: Probability,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&recovery_rate) {
            return Err(ck_core::Error::InvalidArgument(format!(
                "recovery rate must lie in [0, 1], got {recovery_rate}"
            )));
        }
        Ok(Self {
            premium,
            protection,
            recovery_rate,
        })
    }

    /// Premium (payment) schedule.
    pub fn premium_schedule(&self) -> &TimeSchedule {
        &self.premium
    }

    /// Default-observation schedule.
    pub fn protection_schedule(&self) -> &TimeSchedule {
        &self.protection
    }

    /// Recovery rate.
    pub fn recovery_rate(&self) -> Probability {
        self.recovery_rate
    }

    /// Maturity of the contract.
    pub fn maturity(&self) -> Time {
        self.premium.end().max(self.protection.end())
    }

    /// Value both legs.
    pub fn legs<T, D, C>(&self, discount: &D, credit: &C) -> CdsLegs<T>
    where
        T: Scalar,
        D: YieldTermStructure<T> + ?Sized,
        C: DefaultProbabilityTermStructure<T> + ?Sized,
    {
        let dv01 = self
            .premium
            .payment_times()
            .iter()
            .zip(self.premium.accrual_fractions())
            .fold(T::zero(), |acc, (&t, a)| {
                acc + lit::<T>(a) * discount.discount(t) * credit.survival_probability(t)
            });

        let times = self.protection.observation_times();
        let mut previous = credit.survival_probability(times[0]);
        let mut expected = T::zero();
        for &t in &times[1..] {
            let survival = credit.survival_probability(t);
            expected = expected + discount.discount(t) * (previous - survival);
            previous = survival;
        }
        let dl = lit::<T>(1.0 - self.recovery_rate) * expected;

        CdsLegs { dv01, dl }
    }

    /// Running spread that makes the contract worth zero, `DL / DV01`.
    pub fn par_spread<T, D, C>(&self, discount: &D, credit: &C) -> T
    where
        T: Scalar,
        D: YieldTermStructure<T> + ?Sized,
        C: DefaultProbabilityTermStructure<T> + ?Sized,
    {
        let CdsLegs { dv01, dl } = self.legs(discount, credit);
        dl / dv01
    }

    /// Value to the protection seller at contractual spread `spread`,
    /// `DV01·s − DL`.
    pub fn receiver_npv<T, D, C>(&self, discount: &D, credit: &C, spread: Spread) -> T
    where
        T: Scalar,
        D: YieldTermStructure<T> + ?Sized,
        C: DefaultProbabilityTermStructure<T> + ?Sized,
    {
        let CdsLegs { dv01, dl } = self.legs(discount, credit);
        dv01 * lit(spread) - dl
    }

    /// Value to the protection buyer at contractual spread `spread`.
    pub fn payer_npv<T, D, C>(&self, discount: &D, credit: &C, spread: Spread) -> T
    where
        T: Scalar,
        D: YieldTermStructure<T> + ?Sized,
        C: DefaultProbabilityTermStructure<T> + ?Sized,
    {
        -self.receiver_npv(discount, credit, spread)
    }
}
