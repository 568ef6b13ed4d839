//! First-match handler dispatch.
//!
//! A repository holds an ordered list of handlers. A request is routed to the
//! earliest handler whose `can_apply` accepts it; precedence is controlled
//! purely by construction order. Overlapping predicates are expected, and a
//! catch-all placed early shadows everything after it.

/// Handler capability and closure adapter.
pub mod handler;
/// Repository trait and the first-match implementation.
pub mod repository;

pub use handler::{handler_fn, FnHandler, Handler};
pub use repository::{FirstMatchingHandlerRepository, FirstMatchingHandlerRepositoryBuilder, HandlerRepository};
