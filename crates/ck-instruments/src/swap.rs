//! Fixed-for-floating interest-rate swaps.
//!
//! The floating leg is valued by principal substitution: a floating leg
//! resetting on its own curve is worth `P(start) − P(end)`.  The fixed leg is
//! the fixed rate times the annuity (PV01) of the fixed schedule.

use ck_core::{errors::Result, Rate, Real, Time};
use ck_math::{scalar::lit, Scalar};
use ck_termstructures::YieldTermStructure;

use crate::schedule::TimeSchedule;

/// Swap type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwapType {
    /// Payer (pay fixed, receive floating).
    #[default]
    Payer,
    /// Receiver (receive fixed, pay floating).
    Receiver,
}

impl SwapType {
    /// +1 for Payer, −1 for Receiver.
    pub fn sign(self) -> Real {
        match self {
            SwapType::Payer => 1.0,
            SwapType::Receiver => -1.0,
        }
    }
}

/// A standard fixed-for-floating interest rate swap on unit notional.
#[derive(Debug, Clone, PartialEq)]
pub struct VanillaSwap {
    /// Swap type (payer = pay fixed).
    pub swap_type: SwapType,
    /// Fixed leg coupon rate.
    pub fixed_rate: Rate,
    /// Fixed leg schedule; its end is the swap maturity.
    pub schedule: TimeSchedule,
}

impl VanillaSwap {
    /// Create a new vanilla swap.
    pub fn new(swap_type: SwapType, fixed_rate: Rate, schedule: TimeSchedule) -> Self {
        Self {
            swap_type,
            fixed_rate,
            schedule,
        }
    }

    /// A payer swap from `start` to `end` with fixed payments every
    /// `interval`, struck at `fixed_rate`.
    pub fn payer(start: Time, end: Time, interval: Time, fixed_rate: Rate) -> Result<Self> {
        Ok(Self::new(
            SwapType::Payer,
            fixed_rate,
            TimeSchedule::new(start, end, interval)?,
        ))
    }

    /// Swap maturity.
    pub fn maturity(&self) -> Time {
        self.schedule.end()
    }

    /// Annuity of the fixed leg, `Σ α_i · P(t_i)`.
    pub fn pv01<T, C>(&self, curve: &C) -> T
    where
        T: Scalar,
        C: YieldTermStructure<T> + ?Sized,
    {
        self.schedule
            .payment_times()
            .iter()
            .zip(self.schedule.accrual_fractions())
            .fold(T::zero(), |acc, (&t, a)| acc + lit::<T>(a) * curve.discount(t))
    }

    /// Present value of the fixed leg.
    pub fn fixed_leg_npv<T, C>(&self, curve: &C) -> T
    where
        T: Scalar,
        C: YieldTermStructure<T> + ?Sized,
    {
        lit::<T>(self.fixed_rate) * self.pv01(curve)
    }

    /// Present value of the floating leg, `P(start) − P(end)`.
    pub fn floating_leg_npv<T, C>(&self, curve: &C) -> T
    where
        T: Scalar,
        C: YieldTermStructure<T> + ?Sized,
    {
        curve.discount(self.schedule.start()) - curve.discount(self.schedule.end())
    }

    /// Fixed rate that makes the swap worth zero.
    ///
    /// For a spot-starting swap this is `(1 − P(T)) / PV01`.
    pub fn par_rate<T, C>(&self, curve: &C) -> T
    where
        T: Scalar,
        C: YieldTermStructure<T> + ?Sized,
    {
        self.floating_leg_npv(curve) / self.pv01(curve)
    }

    /// Present value today from the holder's side.
    pub fn npv<T, C>(&self, curve: &C) -> T
    where
        T: Scalar,
        C: YieldTermStructure<T> + ?Sized,
    {
        lit::<T>(self.swap_type.sign()) * (self.floating_leg_npv(curve) - self.fixed_leg_npv(curve))
    }

    /// Present value at a later time `t`, in units of money at `t`.
    ///
    /// Cash flows are discounted with forward discount factors
    /// `P(t, T) = P(T) / P(t)` and only fixed payments after `t` count.  Once
    /// the swap has started, the floating leg is taken as resetting at `t`,
    /// so it is worth `1 − P(t, end)`.
    pub fn npv_at<T, C>(&self, curve: &C, t: Time) -> T
    where
        T: Scalar,
        C: YieldTermStructure<T> + ?Sized,
    {
        let (start, end) = (self.schedule.start(), self.schedule.end());
        let floating = if t <= start {
            curve.discount_between(t, start) - curve.discount_between(t, end)
        } else if t < end {
            T::one() - curve.discount_between(t, end)
        } else {
            T::zero()
        };

        let annuity = self
            .schedule
            .payment_times()
            .iter()
            .zip(self.schedule.accrual_fractions())
            .filter(|(&ti, _)| ti > t)
            .fold(T::zero(), |acc, (&ti, a)| {
                acc + lit::<T>(a) * curve.discount_between(t, ti)
            });

        lit::<T>(self.swap_type.sign()) * (floating - lit::<T>(self.fixed_rate) * annuity)
    }
}
