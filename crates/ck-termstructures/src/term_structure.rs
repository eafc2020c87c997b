//! `TermStructure` — base trait for all term structures.
//!
//! Every term structure is anchored at time 0 and has a **maximum time**, the
//! last fitted pillar.  Queries beyond it still evaluate; the curve says how
//! through its extrapolation policy.
//!
//! Extrapolation is reported, never refused.  [`TermStructure::domain_warning`]
//! returns it as a value for any time.  Scalar queries also emit a `trace!`
//! event and batched queries one `debug!` event per batch.

use ck_core::{DomainWarning, Time};
use ck_math::Scalar;

/// Base trait for all term structures.
pub trait TermStructure: std::fmt::Debug + Send + Sync {
    /// The latest time covered by fitted data.
    fn max_time(&self) -> Time;

    /// Check whether a time is in the fitted range `[0, max_time]`.
    fn check_range_time(&self, t: Time) -> bool {
        t >= 0.0 && t <= self.max_time()
    }

    /// A [`DomainWarning`] if `t` lies outside the fitted range.
    fn domain_warning(&self, t: Time) -> Option<DomainWarning> {
        if self.check_range_time(t) {
            None
        } else {
            Some(DomainWarning {
                time: t,
                min_time: 0.0,
                max_time: self.max_time(),
            })
        }
    }
}

/// Emit a trace event when a scalar query at `t` extrapolates.
#[inline]
pub(crate) fn trace_extrapolation<S>(curve: &S, t: Time, quantity: &'static str)
where
    S: TermStructure + ?Sized,
{
    if tracing::enabled!(tracing::Level::TRACE) {
        if let Some(warning) = curve.domain_warning(t) {
            tracing::trace!(%warning, quantity, "curve evaluation extrapolates");
        }
    }
}

/// Evaluate `f` at every time in `times`, keeping the input order.
///
/// Emits a single debug event when any query extrapolates.  With the
/// `parallel` feature the evaluations run on the rayon pool.
pub(crate) fn evaluate_batch<S, T, F>(curve: &S, times: &[Time], f: F) -> Vec<T>
where
    S: TermStructure + ?Sized,
    T: Scalar,
    F: Fn(Time) -> T + Send + Sync,
{
    let mut outside = times.iter().filter_map(|&t| curve.domain_warning(t));
    if let Some(first) = outside.next() {
        let count = 1 + outside.count();
        tracing::debug!(%first, count, "batched curve evaluation extrapolates");
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        times.par_iter().map(|&t| f(t)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        times.iter().map(|&t| f(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefaultProbabilityTermStructure, YieldTermStructure};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct Fitted(Time);

    impl TermStructure for Fitted {
        fn max_time(&self) -> Time {
            self.0
        }
    }

    impl YieldTermStructure for Fitted {
        fn zero_rate_impl(&self, _t: Time) -> f64 {
            0.03
        }
    }

    impl DefaultProbabilityTermStructure for Fitted {
        fn hazard_rate_impl(&self, _t: Time) -> f64 {
            0.02
        }
    }

    #[test]
    fn range_and_warnings() {
        let ts = Fitted(5.0);
        assert!(ts.check_range_time(0.0));
        assert!(ts.check_range_time(5.0));
        assert!(ts.domain_warning(2.5).is_none());

        let w = ts.domain_warning(7.0).unwrap();
        assert_eq!(w.time, 7.0);
        assert_eq!(w.max_time, 5.0);
        assert!(ts.domain_warning(-0.1).is_some());
    }

    /// Collects formatted events.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn traced(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn scalar_extrapolation_is_traced() {
        let curve = Fitted(5.0);

        let inside = traced(|| {
            curve.discount(2.0);
            curve.survival_probability(2.0);
        });
        assert!(inside.is_empty(), "{inside}");

        let outside = traced(|| {
            let df: f64 = curve.discount(7.0);
            assert!(df > 0.0 && df < 1.0);
            curve.survival_probability(-1.0);
        });
        assert!(outside.contains("curve evaluation extrapolates"), "{outside}");
        assert!(outside.contains("discount"), "{outside}");
        assert!(outside.contains("survival_probability"), "{outside}");
    }

    #[test]
    fn batch_keeps_order() {
        let ts = Fitted(1.0);
        let out = evaluate_batch(&ts, &[0.5, 2.0, 0.25], |t| 2.0 * t);
        assert_eq!(out, vec![1.0, 4.0, 0.5]);
    }
}
