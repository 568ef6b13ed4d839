use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::debug;

/// A cancellation request shared by the caller and the code it blocks in.
///
/// Cloning yields another handle to the same state. Once `cancel` is called the
/// token stays cancelled for its whole lifetime; none of the wait primitives
/// consume it.
///
/// Blocked waiters are woken through a channel disconnect: the token owns the
/// only `Sender` and drops it on cancel, which makes every `select!` on the
/// listener ready at once.
#[derive(Clone)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

struct Inner {
    cancelled: AtomicBool,
    trigger: Mutex<Option<Sender<()>>>,
    listener: Receiver<()>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = bounded::<()>(0);
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                trigger: Mutex::new(Some(tx)),
                listener: rx,
            }),
        }
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        // Flag first so that a woken waiter always sees it set.
        if self.inner.cancelled.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut trigger = self.inner.trigger.lock().unwrap_or_else(PoisonError::into_inner);
        drop(trigger.take());
        debug!("cancellation requested");
    }

    /// Returns true once `cancel` has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Channel that becomes disconnected when the token is cancelled.
    ///
    /// Nothing is ever sent on it.
    #[must_use]
    pub fn listener(&self) -> &Receiver<()> {
        &self.inner.listener
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
