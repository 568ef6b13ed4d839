//! Predicate polling.
//!
//! A [`PollingMonitor`] turns a condition with no notification mechanism into
//! a bounded, cancellable wait by re-evaluating it at a fixed interval. Each
//! call walks its own `waiting -> {satisfied, timed out, cancelled}` path; the
//! monitor itself keeps no state between calls.

/// Polling interval configuration.
pub mod config;
/// The polling monitor and its builder.
pub mod polling;

pub use config::PollingConfig;
pub use polling::{PollingMonitor, PollingMonitorBuilder};
