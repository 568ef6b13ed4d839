use std::time::Duration;

use crossbeam_channel::select;
use tracing::{debug, trace};

use super::cancellation::CancellationToken;
use super::latch::CompletionSignal;

/// How a blocking wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitOutcome {
    /// The awaited signal fired, or a sleep ran for its full duration.
    Completed,
    /// The timeout elapsed first.
    TimedOut,
    /// The token was cancelled before or during the wait.
    Cancelled,
}

#[allow(missing_docs)]
impl WaitOutcome {
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    #[must_use]
    pub const fn is_timed_out(self) -> bool {
        matches!(self, Self::TimedOut)
    }

    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Blocks until `signal` fires, `timeout` elapses, or `token` is cancelled.
///
/// Cancellation is honoured immediately, both when the token is already
/// cancelled on entry (even if the signal has fired) and when it arrives while
/// blocked. The token is left cancelled.
pub fn await_signal_outcome<S>(signal: &S, timeout: Duration, token: &CancellationToken) -> WaitOutcome
where
    S: CompletionSignal + ?Sized,
{
    if token.is_cancelled() {
        debug!("await on signal skipped: already cancelled");
        return WaitOutcome::Cancelled;
    }
    if signal.is_complete() {
        return WaitOutcome::Completed;
    }

    let outcome = select! {
        recv(signal.listener()) -> _ => WaitOutcome::Completed,
        recv(token.listener()) -> _ => WaitOutcome::Cancelled,
        default(timeout) => {
            if signal.is_complete() {
                WaitOutcome::Completed
            } else {
                WaitOutcome::TimedOut
            }
        }
    };

    match outcome {
        WaitOutcome::Cancelled => debug!(?timeout, "await on signal cancelled"),
        _ => trace!(?timeout, ?outcome, "await on signal finished"),
    }
    outcome
}

/// Returns `true` if `signal` fired within `timeout`.
///
/// `false` covers both timeout and cancellation; check
/// `token.is_cancelled()` to tell them apart, or use [`await_signal_outcome`].
pub fn await_signal<S>(signal: &S, timeout: Duration, token: &CancellationToken) -> bool
where
    S: CompletionSignal + ?Sized,
{
    await_signal_outcome(signal, timeout, token).is_completed()
}

/// Sleeps for `duration` unless `token` is cancelled first.
///
/// Returns `Completed` after a full sleep and `Cancelled` on early return.
pub fn sleep_for_outcome(duration: Duration, token: &CancellationToken) -> WaitOutcome {
    if token.is_cancelled() {
        debug!("sleep skipped: already cancelled");
        return WaitOutcome::Cancelled;
    }

    select! {
        recv(token.listener()) -> _ => {
            debug!(?duration, "sleep cancelled");
            WaitOutcome::Cancelled
        }
        default(duration) => WaitOutcome::Completed
    }
}

/// Sleeps for `duration`, returning early if `token` is cancelled.
pub fn sleep_for(duration: Duration, token: &CancellationToken) {
    let _ = sleep_for_outcome(duration, token);
}
