//! # ck-core
//!
//! Core types, pillars, quotes, and error definitions for curvekit.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace – type aliases, the error hierarchy with its
//! `ensure!` family of macros, and the `(time, value)` pillar and quote
//! records that curves are built from and persisted as.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_input!` / `fail!` macros.
pub mod errors;

/// Curve pillars, market quotes, and their ordering checks.
pub mod pillar;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// A rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A spread over a reference rate, or a CDS running spread.
pub type Spread = Real;

/// A discount factor, `1` at time zero.
pub type DiscountFactor = Real;

/// A probability in `[0, 1]`.
pub type Probability = Real;

/// An instantaneous default intensity.
pub type HazardRate = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{DomainWarning, Error, Result};
pub use pillar::{validate_pillar_times, validate_quotes, MarketQuote, Pillar};
