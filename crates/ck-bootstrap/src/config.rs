//! Bootstrap configuration.
//!
//! Settings load from TOML; every field is optional and falls back to its
//! default.
//!
//! ```toml
//! accuracy = 1e-12
//! max_iterations = 100
//! max_bracket_expansions = 50
//! max_sweeps = 50
//! repricing_tolerance = 1e-10
//! allow_negative_values = false
//! root_finder = "brent"
//! bracket = [-0.1, 0.3]
//! ```

use std::path::Path;

use ck_core::{errors::Result, Error, Probability, Real, Time};
use ck_math::SolverKind;
use serde::{Deserialize, Serialize};

/// Root-finding algorithm used per pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootFinder {
    /// Brent's method.
    #[default]
    Brent,
    /// Bisection.
    Bisection,
}

impl From<RootFinder> for SolverKind {
    fn from(value: RootFinder) -> Self {
        match value {
            RootFinder::Brent => SolverKind::Brent,
            RootFinder::Bisection => SolverKind::Bisection,
        }
    }
}

/// Solver settings shared by every bootstrap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    /// Target accuracy of each pillar solve, on the quote residual.
    pub accuracy: Real,
    /// Iteration budget of each pillar solve.
    pub max_iterations: usize,
    /// How many times the search interval may be widened to find a sign change.
    pub max_bracket_expansions: usize,
    /// Total passes over the pillars; `1` is a single sequential pass.
    pub max_sweeps: usize,
    /// Largest quote residual accepted once the sweeps stop.
    pub repricing_tolerance: Real,
    /// Accept solved values below the curve builder's floor.
    pub allow_negative_values: bool,
    /// Root finder.
    pub root_finder: RootFinder,
    /// Initial search interval, overriding the curve builder's default.
    pub bracket: Option<[Real; 2]>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            accuracy: 1.0e-12,
            max_iterations: 100,
            max_bracket_expansions: 50,
            max_sweeps: 50,
            repricing_tolerance: 1.0e-10,
            allow_negative_values: false,
            root_finder: RootFinder::Brent,
            bracket: None,
        }
    }
}

impl BootstrapConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    /// `Config` if the document does not parse or a value is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Check every field, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if !(self.accuracy.is_finite() && self.accuracy > 0.0) {
            errors.push(format!("accuracy must be positive, got {}", self.accuracy));
        }
        if self.max_iterations == 0 {
            errors.push("max_iterations must be greater than 0".to_string());
        }
        if self.max_sweeps == 0 {
            errors.push("max_sweeps must be greater than 0".to_string());
        }
        if !(self.repricing_tolerance.is_finite() && self.repricing_tolerance > 0.0) {
            errors.push(format!(
                "repricing_tolerance must be positive, got {}",
                self.repricing_tolerance
            ));
        }
        if let Some([lo, hi]) = self.bracket {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                errors.push(format!("bracket [{lo}, {hi}] must be finite and increasing"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(errors.join("; ")))
        }
    }
}

/// Conventions of the par swaps behind a rate quote set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwapConventions {
    /// Start of every swap.
    pub start: Time,
    /// Fixed leg payment interval in years.
    pub fixed_interval: Time,
}

impl Default for SwapConventions {
    fn default() -> Self {
        Self {
            start: 0.0,
            fixed_interval: 1.0,
        }
    }
}

/// Conventions of the CDS contracts behind a spread quote set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CdsConventions {
    /// Start of protection.
    pub start: Time,
    /// Premium payment interval in years.
    pub payment_interval: Time,
    /// Default observation interval in years.
    pub default_interval: Time,
    /// Recovery rate in `[0, 1]`.
    pub recovery_rate: Probability,
}

impl Default for CdsConventions {
    fn default() -> Self {
        Self {
            start: 0.0,
            payment_interval: 0.25,
            default_interval: 0.25,
            recovery_rate: 0.4,
        }
    }
}
