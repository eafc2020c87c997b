//! # ck-instruments
//!
//! Instruments the curves are calibrated to: fixed-for-floating swaps and
//! credit default swaps on year-fraction [`TimeSchedule`]s.
//!
//! Valuers are pure functions of the instrument and the curves passed in.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cds;
pub mod schedule;
pub mod swap;

pub use cds::{CdsLegs, CreditDefaultSwap};
pub use schedule::TimeSchedule;
pub use swap::{SwapType, VanillaSwap};
