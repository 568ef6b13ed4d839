use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::concurrent::{sleep_for_outcome, CancellationToken, WaitOutcome};
use crate::error::{ChainWaitError, ChainWaitResult, ValidationError};
use crate::time::TimeUnit;
use crate::validate::require_present;

use super::config::{PollingConfig, POLLING_INTERVAL_FIELD};

type BoxedPredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Waits for a predicate over a fixed input to become true by re-evaluating it
/// at a fixed interval.
///
/// Useful when the condition being waited on offers no notification
/// mechanism. The predicate should be cheap and free of side effects; it is
/// evaluated once per interval with no deduplication.
///
/// A monitor holds only immutable configuration, so a single instance can be
/// used from several threads at once.
///
/// # Example
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::time::Duration;
/// use chainwait::{CancellationToken, PollingMonitor};
///
/// let monitor = PollingMonitor::new(|flag: &AtomicBool| flag.load(Ordering::SeqCst), Duration::from_millis(5))?;
/// let flag = AtomicBool::new(true);
/// assert!(monitor.await_until_true_within(&flag, Duration::from_secs(1), &CancellationToken::new())?);
/// # Ok::<(), chainwait::ChainWaitError>(())
/// ```
pub struct PollingMonitor<T> {
    predicate: BoxedPredicate<T>,
    polling_interval: Duration,
}

impl<T> PollingMonitor<T> {
    /// Creates a monitor that re-evaluates `predicate` every `polling_interval`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonPositive` if `polling_interval` is zero.
    pub fn new<P>(predicate: P, polling_interval: Duration) -> ChainWaitResult<Self>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(predicate), polling_interval)
    }

    /// Creates a monitor using the interval from `config`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonPositive` if the configured interval is not
    /// strictly positive.
    pub fn from_config<P>(predicate: P, config: &PollingConfig) -> ChainWaitResult<Self>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let polling_interval = config.polling_duration()?;
        Self::from_boxed(Box::new(predicate), polling_interval)
    }

    /// Starts a builder.
    #[must_use]
    pub fn builder() -> PollingMonitorBuilder<T> {
        PollingMonitorBuilder::default()
    }

    fn from_boxed(predicate: BoxedPredicate<T>, polling_interval: Duration) -> ChainWaitResult<Self> {
        if polling_interval.is_zero() {
            return Err(ValidationError::NonPositive {
                field: POLLING_INTERVAL_FIELD.to_string(),
                value: 0,
            }
            .into());
        }
        Ok(Self {
            predicate,
            polling_interval,
        })
    }

    /// The interval slept between predicate evaluations.
    #[must_use]
    pub const fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    /// Performs a single polling step.
    ///
    /// Evaluates the predicate once and, if it is false, sleeps for one polling
    /// interval and returns. It does not re-check after sleeping; callers that
    /// want to keep waiting invoke it again.
    ///
    /// # Errors
    ///
    /// Returns `ChainWaitError::Cancelled` without evaluating the predicate if
    /// `token` is already cancelled, or if it is cancelled during the sleep.
    /// The token stays cancelled.
    pub fn await_until_true(&self, input: &T, token: &CancellationToken) -> ChainWaitResult<()> {
        check_cancelled(token)?;
        if !(self.predicate)(input) {
            self.sleep_for_polling_interval(token)?;
        }
        Ok(())
    }

    /// Polls until the predicate is true or `timeout` elapses.
    ///
    /// Returns `Ok(true)` as soon as the predicate holds. An initially true
    /// predicate returns without sleeping. Otherwise the predicate is
    /// re-evaluated every polling interval while the deadline has not passed,
    /// and `Ok(false)` is returned once it has. The sleep is not cut short by
    /// the deadline, so the call may overrun `timeout` by up to one interval.
    /// A zero timeout checks the predicate exactly once.
    ///
    /// # Errors
    ///
    /// Returns `ChainWaitError::Cancelled` if `token` is cancelled at the head
    /// of an iteration or during a sleep. The token stays cancelled.
    pub fn await_until_true_within(
        &self,
        input: &T,
        timeout: Duration,
        token: &CancellationToken,
    ) -> ChainWaitResult<bool> {
        if (self.predicate)(input) {
            return Ok(true);
        }

        // An unrepresentable deadline never arrives.
        let deadline = Instant::now().checked_add(timeout);
        let mut evaluations: u64 = 1;

        while deadline.map_or(true, |deadline| Instant::now() < deadline) {
            check_cancelled(token)?;
            evaluations += 1;
            if (self.predicate)(input) {
                trace!(evaluations, "predicate satisfied");
                return Ok(true);
            }
            self.sleep_for_polling_interval(token)?;
        }

        debug!(
            evaluations,
            ?timeout,
            polling_interval = ?self.polling_interval,
            "predicate not satisfied before deadline"
        );
        Ok(false)
    }

    fn sleep_for_polling_interval(&self, token: &CancellationToken) -> ChainWaitResult<()> {
        match sleep_for_outcome(self.polling_interval, token) {
            WaitOutcome::Cancelled => Err(ChainWaitError::Cancelled),
            WaitOutcome::Completed | WaitOutcome::TimedOut => Ok(()),
        }
    }
}

fn check_cancelled(token: &CancellationToken) -> ChainWaitResult<()> {
    if token.is_cancelled() {
        debug!("polling cancelled");
        return Err(ChainWaitError::Cancelled);
    }
    Ok(())
}

impl<T> fmt::Debug for PollingMonitor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingMonitor")
            .field("polling_interval", &self.polling_interval)
            .finish_non_exhaustive()
    }
}

/// Builder for [`PollingMonitor`].
///
/// # Example
/// ```
/// use chainwait::{PollingMonitor, TimeUnit};
///
/// let monitor = PollingMonitor::<u32>::builder()
///     .predicate(|n| *n > 3)
///     .polling_interval(250, TimeUnit::Milliseconds)
///     .build()?;
/// assert_eq!(monitor.polling_interval().as_millis(), 250);
/// # Ok::<(), chainwait::ChainWaitError>(())
/// ```
pub struct PollingMonitorBuilder<T> {
    predicate: Option<BoxedPredicate<T>>,
    polling_interval: i64,
    polling_unit: Option<TimeUnit>,
}

impl<T> Default for PollingMonitorBuilder<T> {
    fn default() -> Self {
        Self {
            predicate: None,
            polling_interval: 0,
            polling_unit: None,
        }
    }
}

impl<T> PollingMonitorBuilder<T> {
    /// Sets the predicate to monitor.
    #[must_use]
    pub fn predicate<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Sets the polling interval as an amount of `unit`.
    #[must_use]
    pub fn polling_interval(mut self, amount: i64, unit: TimeUnit) -> Self {
        self.polling_interval = amount;
        self.polling_unit = Some(unit);
        self
    }

    /// Sets only the amount of the polling interval.
    #[must_use]
    pub fn polling_amount(mut self, amount: i64) -> Self {
        self.polling_interval = amount;
        self
    }

    /// Sets only the unit of the polling interval.
    #[must_use]
    pub fn polling_unit(mut self, unit: TimeUnit) -> Self {
        self.polling_unit = Some(unit);
        self
    }

    /// Builds the monitor.
    ///
    /// # Errors
    ///
    /// - `ValidationError::MissingArgument` if the predicate or the polling unit
    ///   was never set (checked in that order)
    /// - `ValidationError::NonPositive` if the polling amount is not strictly
    ///   positive
    pub fn build(self) -> ChainWaitResult<PollingMonitor<T>> {
        let predicate = require_present(self.predicate, "predicate")?;
        let unit = require_present(self.polling_unit, "polling unit")?;
        let polling_interval = unit.to_positive_duration(self.polling_interval, POLLING_INTERVAL_FIELD)?;
        PollingMonitor::from_boxed(predicate, polling_interval)
    }
}

impl<T> fmt::Debug for PollingMonitorBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingMonitorBuilder")
            .field("has_predicate", &self.predicate.is_some())
            .field("polling_interval", &self.polling_interval)
            .field("polling_unit", &self.polling_unit)
            .finish()
    }
}
