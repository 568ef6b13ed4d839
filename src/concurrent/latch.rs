use std::fmt;
use std::sync::{Mutex, PoisonError};

use crossbeam_channel::{bounded, Receiver, Sender};

/// An external completion signal that waiters can block on.
///
/// Implementors must disconnect `listener` once `is_complete` turns true and
/// must never send on it. Completion is permanent.
pub trait CompletionSignal: Send + Sync {
    /// Returns true once the signal has fired.
    fn is_complete(&self) -> bool;

    /// Channel that becomes disconnected when the signal fires.
    fn listener(&self) -> &Receiver<()>;
}

/// A countdown gate that fires when its count reaches zero.
///
/// Any number of threads may wait on the same latch concurrently.
pub struct CountDownLatch {
    state: Mutex<LatchState>,
    listener: Receiver<()>,
}

struct LatchState {
    count: usize,
    trigger: Option<Sender<()>>,
}

impl CountDownLatch {
    /// Creates a latch that fires after `count` calls to `count_down`.
    ///
    /// A latch created with a count of zero is already complete.
    #[must_use]
    pub fn new(count: usize) -> Self {
        let (tx, rx) = bounded::<()>(0);
        let trigger = if count == 0 { None } else { Some(tx) };
        Self {
            state: Mutex::new(LatchState { count, trigger }),
            listener: rx,
        }
    }

    /// Decrements the count, firing the latch when it reaches zero.
    ///
    /// Has no effect once the latch has fired.
    pub fn count_down(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.count == 0 {
            return;
        }
        state.count -= 1;
        if state.count == 0 {
            drop(state.trigger.take());
        }
    }

    /// Remaining count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).count
    }
}

impl CompletionSignal for CountDownLatch {
    fn is_complete(&self) -> bool {
        self.count() == 0
    }

    fn listener(&self) -> &Receiver<()> {
        &self.listener
    }
}

impl fmt::Debug for CountDownLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountDownLatch").field("count", &self.count()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crossbeam_channel::RecvTimeoutError;

    use super::*;

    #[test]
    fn test_zero_count_is_complete() {
        let latch = CountDownLatch::new(0);
        assert!(latch.is_complete());
        assert_eq!(
            latch.listener().recv_timeout(Duration::from_millis(5)),
            Err(RecvTimeoutError::Disconnected)
        );
    }

    #[test]
    fn test_count_down_fires_at_zero() {
        let latch = CountDownLatch::new(2);
        latch.count_down();
        assert_eq!(latch.count(), 1);
        assert!(!latch.is_complete());
        assert_eq!(
            latch.listener().recv_timeout(Duration::from_millis(5)),
            Err(RecvTimeoutError::Timeout)
        );

        latch.count_down();
        assert!(latch.is_complete());
        assert_eq!(
            latch.listener().recv_timeout(Duration::from_millis(5)),
            Err(RecvTimeoutError::Disconnected)
        );

        latch.count_down();
        assert_eq!(latch.count(), 0);
    }
}
