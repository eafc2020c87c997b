//! Calibration diagnostics.
//!
//! A [`CalibrationReport`] is plain data: it serializes with serde and its
//! `pillars` are enough to rebuild the fitted curve.

use ck_core::{Pillar, Real, Size};
use serde::{Deserialize, Serialize};

/// Solver outcome for one pillar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarFit {
    /// Solver iterations spent on this pillar across all sweeps.
    pub iterations: Size,
    /// Quote residual at the last accepted value.
    pub residual: Real,
}

/// Summary of a finished bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReport {
    /// Fitted `(time, value)` pillars in quote order.
    pub pillars: Vec<Pillar>,
    /// Per-pillar solver outcome, aligned with `pillars`.
    pub fits: Vec<PillarFit>,
    /// Passes over the pillars that were run.
    pub sweeps: Size,
    /// Largest `|implied − quote|` over all instruments on the final curve.
    pub max_repricing_error: Real,
}

impl CalibrationReport {
    /// Fitted values in quote order.
    pub fn values(&self) -> Vec<Real> {
        self.pillars.iter().map(|p| p.value).collect()
    }

    /// Total solver iterations over all pillars and sweeps.
    pub fn total_iterations(&self) -> Size {
        self.fits.iter().map(|f| f.iterations).sum()
    }
}
