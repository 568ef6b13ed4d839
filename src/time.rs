//! Time units for configuring intervals.
//!
//! Intervals are configured as an `(amount, unit)` pair so that config files can
//! say `{"polling_interval": 250, "polling_unit": "milliseconds"}`. The amount is
//! signed so that a bad value surfaces as a validation error instead of a parse
//! failure.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validate::require_positive;

/// Granularity of a configured interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Converts `amount` of this unit to a `Duration`.
    ///
    /// Saturates at `Duration::MAX` on overflow.
    #[must_use]
    pub fn to_duration(self, amount: u64) -> Duration {
        match self {
            Self::Nanoseconds => Duration::from_nanos(amount),
            Self::Microseconds => Duration::from_micros(amount),
            Self::Milliseconds => Duration::from_millis(amount),
            Self::Seconds => Duration::from_secs(amount),
            Self::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            Self::Hours => Duration::from_secs(amount.saturating_mul(3_600)),
            Self::Days => Duration::from_secs(amount.saturating_mul(86_400)),
        }
    }

    /// Converts a signed, strictly positive `amount` to a `Duration`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonPositive` naming `field` if `amount <= 0`.
    pub fn to_positive_duration(self, amount: i64, field: &str) -> Result<Duration, ValidationError> {
        let amount = require_positive(amount, field)?;
        // Positive i64 always fits in u64.
        Ok(self.to_duration(amount.unsigned_abs()))
    }
}
