use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::TimeUnit;

/// Field name reported when the polling interval is rejected.
pub(crate) const POLLING_INTERVAL_FIELD: &str = "polling interval";

/// Polling configuration, loadable from any serde format.
///
/// Missing fields fall back to the defaults (100 milliseconds). The interval
/// is only validated when a monitor is built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Amount of `polling_unit` between predicate evaluations.
    pub polling_interval: i64,
    /// Unit of `polling_interval`.
    pub polling_unit: TimeUnit,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            polling_interval: 100,
            polling_unit: TimeUnit::Milliseconds,
        }
    }
}

impl PollingConfig {
    /// Creates a config for `amount` of `unit`.
    #[must_use]
    pub const fn new(polling_interval: i64, polling_unit: TimeUnit) -> Self {
        Self {
            polling_interval,
            polling_unit,
        }
    }

    /// The configured interval as a `Duration`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonPositive` if the interval is zero or negative.
    pub fn polling_duration(&self) -> Result<Duration, ValidationError> {
        self.polling_unit
            .to_positive_duration(self.polling_interval, POLLING_INTERVAL_FIELD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = PollingConfig::default();
        assert_eq!(cfg.polling_duration().unwrap(), Duration::from_millis(100));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let cfg: PollingConfig = serde_json::from_str(r#"{"polling_interval": 2}"#).unwrap();
        assert_eq!(cfg.polling_unit, TimeUnit::Milliseconds);
        assert_eq!(cfg.polling_duration().unwrap(), Duration::from_millis(2));

        let cfg: PollingConfig =
            serde_json::from_str(r#"{"polling_interval": 3, "polling_unit": "seconds"}"#).unwrap();
        assert_eq!(cfg, PollingConfig::new(3, TimeUnit::Seconds));
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        let err = PollingConfig::new(-1, TimeUnit::Seconds).polling_duration().unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositive {
                field: POLLING_INTERVAL_FIELD.to_string(),
                value: -1,
            }
        );
    }
}
