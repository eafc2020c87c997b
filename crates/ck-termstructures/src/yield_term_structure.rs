//! `YieldTermStructure` — discount curves.
//!
//! This module defines the `YieldTermStructure` trait together with the three
//! fundamental quantities any yield curve must provide:
//!
//! * **discount factor** — `P(0,t)`
//! * **zero rate** — the continuously-compounded zero rate for maturity *t*
//! * **forward rate** — the instantaneous forward rate at *t*, or the
//!   continuously-compounded forward rate between two times

use ck_core::Time;
use ck_math::{scalar::lit, Scalar};

use crate::term_structure::{evaluate_batch, trace_extrapolation, TermStructure};

/// Small time step used for numerical instantaneous forward rates.
const DT: Time = 1.0e-4;

/// A yield (interest-rate) term structure with values of type `T`.
///
/// Implementors must provide **at least one** of the three low-level methods:
///
/// * [`discount_impl`](YieldTermStructure::discount_impl)
/// * [`zero_rate_impl`](YieldTermStructure::zero_rate_impl)
/// * [`forward_rate_impl`](YieldTermStructure::forward_rate_impl) (together
///   with one of the other two)
///
/// Default implementations of the others follow from
/// `P(t) = exp(-z(t)·t)` and `f(t) = -∂ ln P / ∂t`.
pub trait YieldTermStructure<T: Scalar = f64>: TermStructure {
    // ── Low-level impl hooks ─────────────────────────────────────────────

    /// Return the discount factor for time `t`.
    ///
    /// Default: computed from `zero_rate_impl`.
    fn discount_impl(&self, t: Time) -> T {
        if t == 0.0 {
            return T::one();
        }
        let r = self.zero_rate_impl(t);
        (-r * lit(t)).exp()
    }

    /// Return the continuously-compounded zero rate for time `t`.
    ///
    /// Default: computed from `discount_impl`.
    fn zero_rate_impl(&self, t: Time) -> T {
        if t == 0.0 {
            // Use the instantaneous forward rate at t=0 as the limit
            return self.forward_rate_impl(0.0);
        }
        let df = self.discount_impl(t);
        -df.ln() / lit(t)
    }

    /// Return the instantaneous forward rate at time `t`.
    ///
    /// Default: central difference of `-ln P`.
    fn forward_rate_impl(&self, t: Time) -> T {
        let t1 = (t - DT / 2.0).max(0.0);
        let t2 = t + DT / 2.0;
        let df1 = self.discount_impl(t1);
        let df2 = self.discount_impl(t2);
        (df1.ln() - df2.ln()) / lit(t2 - t1)
    }

    // ── Public interface ─────────────────────────────────────────────────

    /// Discount factor `P(0, t)`.
    fn discount(&self, t: Time) -> T {
        trace_extrapolation(self, t, "discount");
        self.discount_impl(t)
    }

    /// Continuously-compounded zero rate for maturity `t`.
    fn zero_rate(&self, t: Time) -> T {
        trace_extrapolation(self, t, "zero_rate");
        self.zero_rate_impl(t)
    }

    /// Instantaneous forward rate at `t`.
    fn forward_rate(&self, t: Time) -> T {
        trace_extrapolation(self, t, "forward_rate");
        self.forward_rate_impl(t)
    }

    /// Forward discount factor `P(t1, t2) = P(0, t2) / P(0, t1)`.
    fn discount_between(&self, t1: Time, t2: Time) -> T {
        self.discount_impl(t2) / self.discount_impl(t1)
    }

    /// Continuously-compounded forward rate between `t1` and `t2`.
    ///
    /// Falls back to the instantaneous forward when `t1 == t2`.
    fn forward_rate_between(&self, t1: Time, t2: Time) -> T {
        if t2 == t1 {
            return self.forward_rate_impl(t1);
        }
        (self.discount_impl(t1) / self.discount_impl(t2)).ln() / lit(t2 - t1)
    }

    /// Discount factors for a batch of times, in input order.
    fn discounts(&self, times: &[Time]) -> Vec<T> {
        evaluate_batch(self, times, |t| self.discount_impl(t))
    }

    /// Zero rates for a batch of times, in input order.
    fn zero_rates(&self, times: &[Time]) -> Vec<T> {
        evaluate_batch(self, times, |t| self.zero_rate_impl(t))
    }
}
