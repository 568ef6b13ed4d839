//! Cancellation-aware blocking primitives.
//!
//! Rust threads have no interrupt flag, so cancellation is an explicit
//! [`CancellationToken`] passed into every blocking call. The contract shared by
//! everything in this module:
//!
//! - the token is checked before blocking, and an already-cancelled token
//!   returns immediately;
//! - a cancel delivered while blocked wakes the waiter at once instead of
//!   letting it run to its timeout;
//! - the token is never cleared, so code further up the stack still observes
//!   that cancellation happened;
//! - cancellation is reported as a value (`WaitOutcome::Cancelled` or `false`),
//!   never as a panic.

/// Sticky cancellation token.
pub mod cancellation;
/// Countdown gate and the completion-signal capability.
pub mod latch;
/// Wait and sleep primitives.
pub mod wait;

pub use cancellation::CancellationToken;
pub use latch::{CompletionSignal, CountDownLatch};
pub use wait::{await_signal, await_signal_outcome, sleep_for, sleep_for_outcome, WaitOutcome};
