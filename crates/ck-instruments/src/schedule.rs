//! Year-fraction schedules.
//!
//! A [`TimeSchedule`] is generated backwards from the end time in steps of
//! the interval, so a short stub, if any, falls at the front:
//!
//! ```text
//! start=0, end=2.5, interval=1  →  [0, 0.5, 1.5, 2.5]
//! ```

use ck_core::{errors::Result, Time};

/// Times closer than this to `start` are merged into it.
const STUB_TOLERANCE: Time = 1.0e-12;

/// An immutable grid `start = t_0 < t_1 < … < t_n = end`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSchedule {
    times: Vec<Time>,
}

impl TimeSchedule {
    /// Build the schedule from `start` to `end` with the given interval.
    ///
    /// # Errors
    /// `DegenerateInput` if an input is not finite, `interval <= 0`, or
    /// `end <= start`.
    pub fn new(start: Time, end: Time, interval: Time) -> Result<Self> {
        ck_core::ensure_input!(
            start.is_finite() && end.is_finite() && interval.is_finite(),
            "schedule inputs must be finite (start {start}, end {end}, interval {interval})"
        );
        ck_core::ensure_input!(interval > 0.0, "schedule interval must be positive, got {interval}");
        ck_core::ensure_input!(end > start, "schedule end {end} must be after start {start}");

        let mut times = vec![end];
        let mut k = 1.0;
        loop {
            let t = end - k * interval;
            if t <= start + STUB_TOLERANCE {
                break;
            }
            times.push(t);
            k += 1.0;
        }
        times.push(start);
        times.reverse();
        Ok(Self { times })
    }

    /// First time of the grid.
    pub fn start(&self) -> Time {
        self.times[0]
    }

    /// Last time of the grid.
    pub fn end(&self) -> Time {
        self.times[self.times.len() - 1]
    }

    /// All grid times including `start`.
    pub fn observation_times(&self) -> &[Time] {
        &self.times
    }

    /// Grid times after `start`, i.e. the payment dates.
    pub fn payment_times(&self) -> &[Time] {
        &self.times[1..]
    }

    /// Accrual fraction of each payment period, aligned with
    /// [`payment_times`](Self::payment_times).
    pub fn accrual_fractions(&self) -> Vec<Time> {
        self.times.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Number of payment periods.
    pub fn len(&self) -> usize {
        self.times.len() - 1
    }

    /// Always `false`: a schedule has at least one period.
    pub fn is_empty(&self) -> bool {
        false
    }
}
