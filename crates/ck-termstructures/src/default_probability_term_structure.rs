//! `DefaultProbabilityTermStructure` — credit / default-probability term
//! structures.
//!
//! Provides the `DefaultProbabilityTermStructure` trait plus:
//! * `FlatHazardRate` — constant hazard-rate curve
//! * `HazardRateCurve` — piecewise-constant hazard-rate curve

use ck_core::{errors::Result, Pillar, Time};
use ck_math::{locate_segment, scalar::lit, Scalar};

use crate::term_structure::{evaluate_batch, trace_extrapolation, TermStructure};

/// A default-probability term structure.
///
/// Implementors must provide **at least one** of:
/// * [`survival_probability_impl`](DefaultProbabilityTermStructure::survival_probability_impl)
/// * [`hazard_rate_impl`](DefaultProbabilityTermStructure::hazard_rate_impl)
///   (only correct on its own for a constant intensity)
///
/// The others are derived.
pub trait DefaultProbabilityTermStructure<T: Scalar = f64>: TermStructure {
    /// Survival probability `S(t) = P(τ > t)`.
    ///
    /// Default: `exp(−h(t)·t)`.
    fn survival_probability_impl(&self, t: Time) -> T {
        if t <= 0.0 {
            return T::one();
        }
        let h = self.hazard_rate_impl(t);
        (-h * lit(t)).exp()
    }

    /// Hazard rate `h(t)`.
    ///
    /// Default: `-d ln S(t) / dt` by central difference.
    fn hazard_rate_impl(&self, t: Time) -> T {
        let dt = 1.0e-4;
        let t1 = (t - dt / 2.0).max(0.0);
        let t2 = t + dt / 2.0;
        let s1 = self.survival_probability_impl(t1);
        let s2 = self.survival_probability_impl(t2);
        if s2 <= T::zero() {
            return T::zero();
        }
        (s1.ln() - s2.ln()) / lit(t2 - t1)
    }

    /// Default density `f(t) = h(t) · S(t)`.
    fn default_density_impl(&self, t: Time) -> T {
        self.hazard_rate_impl(t) * self.survival_probability_impl(t)
    }

    // ── Public interface ─────────────────────────────────────────────────

    /// Survival probability for a time; exactly `1` at `t <= 0`.
    fn survival_probability(&self, t: Time) -> T {
        trace_extrapolation(self, t, "survival_probability");
        self.survival_probability_impl(t)
    }

    /// Default (cumulative) probability `F(t) = 1 − S(t)`.
    fn default_probability(&self, t: Time) -> T {
        trace_extrapolation(self, t, "default_probability");
        T::one() - self.survival_probability_impl(t)
    }

    /// Hazard rate for a time.
    fn hazard_rate(&self, t: Time) -> T {
        trace_extrapolation(self, t, "hazard_rate");
        self.hazard_rate_impl(t)
    }

    /// Default density for a time.
    fn default_density(&self, t: Time) -> T {
        trace_extrapolation(self, t, "default_density");
        self.default_density_impl(t)
    }

    /// Survival probabilities for a batch of times, in input order.
    fn survival_probabilities(&self, times: &[Time]) -> Vec<T> {
        evaluate_batch(self, times, |t| self.survival_probability_impl(t))
    }
}

// ── FlatHazardRate ────────────────────────────────────────────────────────────

/// A constant hazard-rate default-probability term structure.
///
/// `S(t) = exp(-h·t)` where `h` is a constant hazard rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatHazardRate<T: Scalar = f64> {
    hazard_rate: T,
}

impl<T: Scalar> FlatHazardRate<T> {
    /// Create a flat hazard-rate curve.
    pub fn new(hazard_rate: T) -> Self {
        Self { hazard_rate }
    }

    /// The constant hazard rate.
    pub fn hazard_rate_value(&self) -> T {
        self.hazard_rate
    }
}

impl<T: Scalar> TermStructure for FlatHazardRate<T> {
    fn max_time(&self) -> Time {
        Time::INFINITY
    }
}

impl<T: Scalar> DefaultProbabilityTermStructure<T> for FlatHazardRate<T> {
    fn survival_probability_impl(&self, t: Time) -> T {
        if t <= 0.0 {
            return T::one();
        }
        (-self.hazard_rate * lit(t)).exp()
    }

    fn hazard_rate_impl(&self, _t: Time) -> T {
        self.hazard_rate
    }
}

// ── HazardRateCurve ───────────────────────────────────────────────────────────

/// A default-probability curve with piecewise-constant intensities.
///
/// Intensity `λ_k` applies on `[t_{k-1}, t_k)` with `t_0 = 0`.  Survival at
/// the pillars is the running product of `exp(−λ_k·Δt_k)`; between pillars
/// the partial-segment decay is applied to the product at the left pillar.
/// Beyond the last pillar the last intensity is extended flat.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardRateCurve<T: Scalar = f64> {
    /// `[0, t_1, .., t_n]`.
    knots: Vec<Time>,
    intensities: Vec<T>,
    /// Survival at each knot, `[1, S(t_1), .., S(t_n)]`.
    survival: Vec<T>,
}

impl<T: Scalar> HazardRateCurve<T> {
    /// Build a curve from pillar times and one intensity per segment.
    ///
    /// Negative intensities are accepted here; the bootstrapper decides
    /// whether they are admissible.
    ///
    /// # Errors
    /// `DegenerateInput` for empty, non-increasing, or non-positive times,
    /// mismatched lengths, or non-finite intensities.
    pub fn new(times: &[Time], intensities: &[T]) -> Result<Self> {
        ck_core::validate_pillar_times(times, "hazard rate curve")?;
        ck_core::ensure_input!(
            times.len() == intensities.len(),
            "times and intensities must have the same length ({} vs {})",
            times.len(),
            intensities.len()
        );
        ck_core::ensure_input!(
            intensities.iter().all(|h| h.is_finite()),
            "hazard rates must be finite"
        );

        let mut knots = Vec::with_capacity(times.len() + 1);
        knots.push(0.0);
        knots.extend_from_slice(times);

        let mut survival = Vec::with_capacity(knots.len());
        survival.push(T::one());
        for (k, &h) in intensities.iter().enumerate() {
            let dt = lit::<T>(knots[k + 1] - knots[k]);
            survival.push(survival[k] * (-h * dt).exp());
        }

        Ok(Self {
            knots,
            intensities: intensities.to_vec(),
            survival,
        })
    }

    /// Rebuild a curve from persisted `(time, intensity)` pillars.
    pub fn from_pillars(pillars: &[Pillar]) -> Result<Self> {
        let (times, values) = Pillar::unzip(pillars);
        let values: Vec<T> = values.into_iter().map(T::from_real).collect();
        Self::new(&times, &values)
    }

    /// The curve's `(time, intensity)` pillars.
    pub fn pillars(&self) -> Vec<Pillar> {
        self.times()
            .iter()
            .zip(&self.intensities)
            .map(|(&t, h)| Pillar::new(t, h.to_real()))
            .collect()
    }

    /// Return the pillar times.
    pub fn times(&self) -> &[Time] {
        &self.knots[1..]
    }

    /// Return the per-segment intensities.
    pub fn hazard_rates(&self) -> &[T] {
        &self.intensities
    }

    /// Index `k` of the segment whose intensity applies at `t > 0`.
    fn segment(&self, t: Time) -> usize {
        // Clamping to the last intensity gives flat extrapolation.
        locate_segment(&self.knots, t).min(self.intensities.len()) - 1
    }
}

impl<T: Scalar> TermStructure for HazardRateCurve<T> {
    fn max_time(&self) -> Time {
        self.knots[self.knots.len() - 1]
    }
}

impl<T: Scalar> DefaultProbabilityTermStructure<T> for HazardRateCurve<T> {
    fn survival_probability_impl(&self, t: Time) -> T {
        if t <= 0.0 {
            return T::one();
        }
        let k = self.segment(t);
        self.survival[k] * (-self.intensities[k] * lit(t - self.knots[k])).exp()
    }

    fn hazard_rate_impl(&self, t: Time) -> T {
        if t <= 0.0 {
            return self.intensities[0];
        }
        self.intensities[self.segment(t)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn flat_hazard_survival() {
        let curve = FlatHazardRate::new(0.02);

        assert_eq!(curve.survival_probability(0.0), 1.0);
        // S(5) = exp(-0.02 * 5) = exp(-0.1)
        assert_abs_diff_eq!(curve.survival_probability(5.0), (-0.1_f64).exp(), epsilon = 1e-12);

        let s = curve.survival_probability(5.0);
        let d = curve.default_probability(5.0);
        assert_abs_diff_eq!(s + d, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn flat_hazard_density() {
        let curve = FlatHazardRate::new(0.02);

        // f(t) = h · S(t) = 0.02 * exp(-0.02 * 3)
        let expected = 0.02 * (-0.06_f64).exp();
        assert_abs_diff_eq!(curve.default_density(3.0), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.hazard_rate(10.0), 0.02, epsilon = 1e-15);
    }

    fn sample() -> HazardRateCurve {
        HazardRateCurve::new(&[1.0, 3.0, 5.0], &[0.01, 0.02, 0.03]).unwrap()
    }

    #[test]
    fn cumulative_products_at_pillars() {
        let curve = sample();
        assert_abs_diff_eq!(curve.survival_probability(1.0), (-0.01_f64).exp(), epsilon = 1e-15);
        assert_abs_diff_eq!(curve.survival_probability(3.0), (-0.05_f64).exp(), epsilon = 1e-15);
        assert_abs_diff_eq!(curve.survival_probability(5.0), (-0.11_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn partial_segment_decay() {
        let curve = sample();
        // S(2) = exp(-0.01) · exp(-0.02 · 1)
        assert_abs_diff_eq!(curve.survival_probability(2.0), (-0.03_f64).exp(), epsilon = 1e-15);
        assert_abs_diff_eq!(curve.survival_probability(0.5), (-0.005_f64).exp(), epsilon = 1e-15);
        assert_eq!(curve.hazard_rate(2.0), 0.02);
        assert_eq!(curve.hazard_rate(0.5), 0.01);
        assert_eq!(curve.hazard_rate(3.0), 0.03);
    }

    #[test]
    fn flat_extrapolation_of_last_intensity() {
        let curve = sample();
        assert_abs_diff_eq!(curve.survival_probability(7.0), (-0.17_f64).exp(), epsilon = 1e-15);
        assert_eq!(curve.hazard_rate(50.0), 0.03);
        assert!(curve.domain_warning(7.0).is_some());
    }

    #[test]
    fn anchor_and_batch() {
        let curve = sample();
        assert_eq!(curve.survival_probability(0.0), 1.0);
        assert_eq!(curve.survival_probability(-1.0), 1.0);
        let batch = curve.survival_probabilities(&[0.0, 2.0, 7.0]);
        assert_eq!(batch[0], 1.0);
        assert_eq!(batch[1], curve.survival_probability(2.0));
        assert_eq!(batch[2], curve.survival_probability(7.0));
    }

    #[test]
    fn pillar_round_trip() {
        let curve = sample();
        let restored = HazardRateCurve::<f64>::from_pillars(&curve.pillars()).unwrap();
        assert_eq!(restored, curve);
    }

    #[test]
    fn rejects_degenerate_pillars() {
        assert!(HazardRateCurve::new(&[1.0, 1.0], &[0.01, 0.02]).is_err());
        assert!(HazardRateCurve::new(&[-1.0], &[0.01]).is_err());
        assert!(HazardRateCurve::new(&[1.0], &[f64::NAN]).is_err());
        assert!(HazardRateCurve::<f64>::new(&[], &[]).is_err());
    }

    proptest! {
        #[test]
        fn survival_non_increasing_for_non_negative_intensities(
            hs in prop::collection::vec(0.0f64..0.5, 1..6),
            t1 in 0.0f64..10.0,
            dt in 0.0f64..5.0,
        ) {
            let times: Vec<f64> = (1..=hs.len()).map(|i| i as f64).collect();
            let curve = HazardRateCurve::new(&times, &hs).unwrap();
            prop_assert_eq!(curve.survival_probability(0.0), 1.0);
            prop_assert!(curve.survival_probability(t1 + dt) <= curve.survival_probability(t1) + 1e-15);
        }
    }
}
