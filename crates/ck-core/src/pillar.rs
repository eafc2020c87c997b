//! Curve pillars and market quotes.
//!
//! A [`Pillar`] is one calibration knot of a fitted curve; a [`MarketQuote`]
//! is the market observation the bootstrap fits it to.  Both are plain
//! `(time, value)` records that serialize losslessly, so a fitted curve can be
//! stored as its ordered pillars and rebuilt later.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::{Real, Time};

/// One knot of a curve: a maturity and the value fitted there (a zero rate or
/// a default intensity).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    /// Maturity in years, strictly positive.
    pub time: Time,
    /// Fitted value at `time`.
    pub value: Real,
}

impl Pillar {
    /// Create a pillar.
    pub fn new(time: Time, value: Real) -> Self {
        Self { time, value }
    }

    /// Split a pillar slice into parallel time and value vectors.
    pub fn unzip(pillars: &[Pillar]) -> (Vec<Time>, Vec<Real>) {
        pillars.iter().map(|p| (p.time, p.value)).unzip()
    }
}

/// A market observation driving one bootstrap step: the maturity of the
/// instrument and its quoted par rate or spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Instrument maturity in years; becomes the pillar time.
    pub maturity: Time,
    /// Quoted par swap rate or par CDS spread.
    pub value: Real,
}

impl MarketQuote {
    /// Create a quote.
    pub fn new(maturity: Time, value: Real) -> Self {
        Self { maturity, value }
    }
}

impl From<(Time, Real)> for MarketQuote {
    fn from((maturity, value): (Time, Real)) -> Self {
        Self::new(maturity, value)
    }
}

/// Check that `times` are finite, strictly positive, and strictly increasing.
///
/// `what` names the sequence in the error message.
pub fn validate_pillar_times(times: &[Time], what: &str) -> Result<()> {
    crate::ensure_input!(!times.is_empty(), "{what}: no pillar times given");
    let mut previous = 0.0;
    for (i, &t) in times.iter().enumerate() {
        crate::ensure_input!(t.is_finite(), "{what}: time {i} is not finite ({t})");
        crate::ensure_input!(t > 0.0, "{what}: time {i} must be positive, got {t}");
        crate::ensure_input!(
            t > previous,
            "{what}: times must be strictly increasing, got {t} after {previous}"
        );
        previous = t;
    }
    Ok(())
}

/// Check a quote set before any root solving: at least one quote, finite
/// values, and maturities strictly positive and strictly increasing (which
/// also rules out duplicated pillar times).
pub fn validate_quotes(quotes: &[MarketQuote]) -> Result<()> {
    let times: Vec<Time> = quotes.iter().map(|q| q.maturity).collect();
    validate_pillar_times(&times, "quotes")?;
    for (i, q) in quotes.iter().enumerate() {
        crate::ensure_input!(
            q.value.is_finite(),
            "quotes: value {i} is not finite ({})",
            q.value
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn quotes(pairs: &[(f64, f64)]) -> Vec<MarketQuote> {
        pairs.iter().copied().map(MarketQuote::from).collect()
    }

    #[test]
    fn increasing_quotes_are_valid() {
        assert!(validate_quotes(&quotes(&[(1.0, 0.02), (2.0, 0.025), (5.0, 0.03)])).is_ok());
    }

    #[test]
    fn non_positive_maturity_is_degenerate() {
        let err = validate_quotes(&quotes(&[(0.0, 0.02), (2.0, 0.025)])).unwrap_err();
        assert!(matches!(err, Error::DegenerateInput(_)), "{err}");
        let err = validate_quotes(&quotes(&[(-1.0, 0.02)])).unwrap_err();
        assert!(matches!(err, Error::DegenerateInput(_)), "{err}");
    }

    #[test]
    fn duplicated_maturity_is_degenerate() {
        let err = validate_quotes(&quotes(&[(1.0, 0.02), (1.0, 0.025)])).unwrap_err();
        assert!(matches!(err, Error::DegenerateInput(_)), "{err}");
    }

    #[test]
    fn empty_and_nan_are_degenerate() {
        assert!(validate_quotes(&[]).is_err());
        assert!(validate_quotes(&quotes(&[(1.0, f64::NAN)])).is_err());
    }

    #[test]
    fn pillars_persist_as_json() {
        let pillars = vec![Pillar::new(1.0, 0.02), Pillar::new(2.5, 0.0275)];
        let json = serde_json::to_string(&pillars).unwrap();
        let back: Vec<Pillar> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pillars);
        let (times, values) = Pillar::unzip(&back);
        assert_eq!(times, vec![1.0, 2.5]);
        assert_eq!(values, vec![0.02, 0.0275]);
    }
}
