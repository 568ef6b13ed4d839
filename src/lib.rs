//! # chainwait - ordered dispatch and cancellable waiting
//!
//! Two small, independent toolkits:
//!
//! - **chain**: route a request to the first handler, in registration order,
//!   whose applicability check accepts it.
//! - **concurrent** / **monitor**: block on a countdown gate, a sleep, or a
//!   polled predicate while honouring an explicit [`CancellationToken`].
//!   Cancellation ends a wait early and is reported as a value, and the token
//!   stays cancelled so callers further up can still see it.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use chainwait::{
//!     await_signal, CancellationToken, CountDownLatch, FirstMatchingHandlerRepository,
//!     HandlerRepository,
//! };
//!
//! let repository = FirstMatchingHandlerRepository::<i32, &str>::builder()
//!     .handler_fn(|n| n % 2 == 0, |_| "Even")
//!     .handler_fn(|_| true, |_| "Odd")
//!     .build();
//! assert_eq!(repository.invoke_appropriate_handler(&7), Some("Odd"));
//!
//! let latch = CountDownLatch::new(1);
//! latch.count_down();
//! assert!(await_signal(&latch, Duration::from_secs(1), &CancellationToken::new()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod chain;
pub mod concurrent;
pub mod error;
pub mod monitor;
pub mod time;
pub mod validate;

// Re-export primary types at crate root for convenience
pub use chain::{handler_fn, FirstMatchingHandlerRepository, FnHandler, Handler, HandlerRepository};
pub use concurrent::{
    await_signal, await_signal_outcome, sleep_for, sleep_for_outcome, CancellationToken, CompletionSignal,
    CountDownLatch, WaitOutcome,
};
pub use error::{ChainWaitError, ChainWaitResult, ValidationError};
pub use monitor::{PollingConfig, PollingMonitor};
pub use time::TimeUnit;
