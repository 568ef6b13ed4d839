use std::fmt;

use tracing::trace;

use super::handler::{handler_fn, Handler};

/// A repository that selects a handler for a request.
///
/// Implementors only provide `get_handler`; lookup and invocation are derived
/// from it so that `has_handler(r) == get_handler(r).is_some()` and
/// `invoke_appropriate_handler(r)` applies exactly the handler `get_handler(r)`
/// returned.
pub trait HandlerRepository<Req, Res> {
    /// Returns the handler responsible for `request`, if any.
    fn get_handler(&self, request: &Req) -> Option<&dyn Handler<Req, Res>>;

    /// Returns true if some handler accepts `request`.
    fn has_handler(&self, request: &Req) -> bool {
        self.get_handler(request).is_some()
    }

    /// Applies the responsible handler to `request`.
    ///
    /// Returns `None` when no handler accepts the request. Whatever the handler
    /// produces, including an `Err` or a panic, reaches the caller unchanged;
    /// no other handler is tried.
    fn invoke_appropriate_handler(&self, request: &Req) -> Option<Res> {
        self.get_handler(request).map(|handler| handler.do_apply(request))
    }
}

/// Immutable, insertion-ordered handler list with first-match selection.
///
/// Built once through [`FirstMatchingHandlerRepositoryBuilder`] and read-only
/// afterwards, so it can be shared across threads (e.g. behind an `Arc`)
/// without synchronization.
///
/// # Example
/// ```
/// use chainwait::chain::{FirstMatchingHandlerRepository, HandlerRepository};
///
/// let repository = FirstMatchingHandlerRepository::<i32, &str>::builder()
///     .handler_fn(|n| n % 2 == 0, |_| "Even")
///     .handler_fn(|n| n % 2 != 0, |_| "Odd")
///     .build();
///
/// assert_eq!(repository.invoke_appropriate_handler(&3), Some("Odd"));
/// assert_eq!(repository.invoke_appropriate_handler(&10), Some("Even"));
/// ```
pub struct FirstMatchingHandlerRepository<Req, Res> {
    handlers: Vec<Box<dyn Handler<Req, Res>>>,
}

impl<Req, Res> FirstMatchingHandlerRepository<Req, Res> {
    /// Creates a repository from an already ordered list of handlers.
    #[must_use]
    pub fn new(handlers: Vec<Box<dyn Handler<Req, Res>>>) -> Self {
        Self { handlers }
    }

    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> FirstMatchingHandlerRepositoryBuilder<Req, Res> {
        FirstMatchingHandlerRepositoryBuilder::default()
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Index of the first handler that accepts `request`.
    pub fn position(&self, request: &Req) -> Option<usize> {
        self.handlers.iter().position(|handler| handler.can_apply(request))
    }
}

impl<Req, T, E> FirstMatchingHandlerRepository<Req, Result<T, E>> {
    /// Invokes the responsible handler and lifts its `Result` outward.
    ///
    /// `Ok(None)` means no handler matched. A handler's `Err` is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns the error produced by the selected handler.
    pub fn try_invoke_appropriate_handler(&self, request: &Req) -> Result<Option<T>, E> {
        self.invoke_appropriate_handler(request).transpose()
    }
}

impl<Req, Res> HandlerRepository<Req, Res> for FirstMatchingHandlerRepository<Req, Res> {
    fn get_handler(&self, request: &Req) -> Option<&dyn Handler<Req, Res>> {
        let Some(index) = self.position(request) else {
            trace!(handlers = self.handlers.len(), "no handler accepts request");
            return None;
        };
        trace!(index, handlers = self.handlers.len(), "handler selected");
        Some(self.handlers[index].as_ref())
    }
}

impl<Req, Res> fmt::Debug for FirstMatchingHandlerRepository<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirstMatchingHandlerRepository")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Builder that accumulates handlers in registration order.
pub struct FirstMatchingHandlerRepositoryBuilder<Req, Res> {
    handlers: Vec<Box<dyn Handler<Req, Res>>>,
}

impl<Req, Res> Default for FirstMatchingHandlerRepositoryBuilder<Req, Res> {
    fn default() -> Self {
        Self { handlers: Vec::new() }
    }
}

impl<Req, Res> FirstMatchingHandlerRepositoryBuilder<Req, Res> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler after those already registered.
    #[must_use]
    pub fn handler(mut self, handler: impl Handler<Req, Res> + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// Appends an already boxed handler.
    #[must_use]
    pub fn boxed_handler(mut self, handler: Box<dyn Handler<Req, Res>>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Appends a handler made of two closures.
    #[must_use]
    pub fn handler_fn<P, F>(self, can_apply: P, do_apply: F) -> Self
    where
        P: Fn(&Req) -> bool + Send + Sync + 'static,
        F: Fn(&Req) -> Res + Send + Sync + 'static,
    {
        self.handler(handler_fn(can_apply, do_apply))
    }

    /// Appends every handler from `handlers`, preserving their order.
    #[must_use]
    pub fn handlers<I>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Handler<Req, Res>>>,
    {
        self.handlers.extend(handlers);
        self
    }

    /// Freezes the handler list.
    #[must_use]
    pub fn build(self) -> FirstMatchingHandlerRepository<Req, Res> {
        FirstMatchingHandlerRepository::new(self.handlers)
    }
}

impl<Req, Res> fmt::Debug for FirstMatchingHandlerRepositoryBuilder<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirstMatchingHandlerRepositoryBuilder")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    struct EvenNumberHandler;

    impl Handler<i32, String> for EvenNumberHandler {
        fn can_apply(&self, request: &i32) -> bool {
            request % 2 == 0
        }

        fn do_apply(&self, _request: &i32) -> String {
            "Even".to_string()
        }
    }

    struct OddNumberHandler;

    impl Handler<i32, String> for OddNumberHandler {
        fn can_apply(&self, request: &i32) -> bool {
            request % 2 != 0
        }

        fn do_apply(&self, _request: &i32) -> String {
            "Odd".to_string()
        }
    }

    #[test]
    fn test_usage_example() {
        let repository = FirstMatchingHandlerRepository::builder()
            .handler(EvenNumberHandler)
            .handler(OddNumberHandler)
            .build();

        let values: Vec<String> = [3, 5, 2, 10]
            .iter()
            .map(|n| repository.invoke_appropriate_handler(n).unwrap())
            .collect();

        assert_eq!(values, vec!["Odd", "Odd", "Even", "Even"]);
    }

    #[test]
    fn test_empty_repository_has_no_handler() {
        let repository = FirstMatchingHandlerRepository::<i32, String>::builder().build();
        assert!(repository.is_empty());
        assert!(repository.get_handler(&1).is_none());
        assert!(!repository.has_handler(&1));
        assert_eq!(repository.invoke_appropriate_handler(&1), None);
    }

    #[test]
    fn test_single_handler_used_when_it_applies() {
        let repository = FirstMatchingHandlerRepository::builder()
            .handler(EvenNumberHandler)
            .build();
        assert_eq!(repository.len(), 1);
        assert_eq!(repository.invoke_appropriate_handler(&4), Some("Even".to_string()));
        assert_eq!(repository.invoke_appropriate_handler(&5), None);
    }

    #[test]
    fn test_early_catch_all_shadows_later_handlers() {
        let repository = FirstMatchingHandlerRepository::<i32, &str>::builder()
            .handler_fn(|_| true, |_| "any")
            .handler_fn(|n| *n == 7, |_| "seven")
            .build();
        assert_eq!(repository.invoke_appropriate_handler(&7), Some("any"));
        assert_eq!(repository.position(&7), Some(0));
    }

    #[test]
    fn test_only_selected_handler_is_applied() {
        let applied = Arc::new(AtomicUsize::new(0));
        let first = Arc::clone(&applied);
        let second = Arc::clone(&applied);

        let repository = FirstMatchingHandlerRepository::<i32, usize>::builder()
            .handler_fn(|n| *n > 0, move |_| first.fetch_add(1, Ordering::SeqCst))
            .handler_fn(|n| *n > 0, move |_| second.fetch_add(100, Ordering::SeqCst))
            .build();

        assert!(repository.has_handler(&1));
        assert_eq!(applied.load(Ordering::SeqCst), 0);

        repository.invoke_appropriate_handler(&1);
        assert_eq!(applied.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_error_propagates_unchanged() {
        let repository = FirstMatchingHandlerRepository::<i32, Result<i32, String>>::builder()
            .handler_fn(|n| *n < 0, |n| Err(format!("negative: {n}")))
            .handler_fn(|_| true, |n| Ok(n * 2))
            .build();

        assert_eq!(repository.try_invoke_appropriate_handler(&4), Ok(Some(8)));
        assert_eq!(
            repository.try_invoke_appropriate_handler(&-1),
            Err("negative: -1".to_string())
        );
        assert_eq!(
            repository.invoke_appropriate_handler(&-1),
            Some(Err("negative: -1".to_string()))
        );
    }

    #[test]
    fn test_try_invoke_without_match() {
        let repository = FirstMatchingHandlerRepository::<i32, Result<i32, String>>::builder()
            .handler_fn(|n| *n == 0, |_| Ok(0))
            .build();
        assert_eq!(repository.try_invoke_appropriate_handler(&1), Ok(None));
    }

    #[test]
    fn test_handlers_appends_in_order() {
        let boxed: Vec<Box<dyn Handler<i32, String>>> =
            vec![Box::new(OddNumberHandler), Box::new(EvenNumberHandler)];
        let repository = FirstMatchingHandlerRepository::builder()
            .handler_fn(|n: &i32| *n == 3, |_: &i32| "Three".to_string())
            .handlers(boxed)
            .build();

        assert_eq!(repository.len(), 3);
        assert_eq!(repository.invoke_appropriate_handler(&3), Some("Three".to_string()));
        assert_eq!(repository.position(&5), Some(1));
        assert_eq!(repository.position(&6), Some(2));
    }

    #[test]
    #[should_panic(expected = "handler exploded")]
    fn test_handler_panic_propagates() {
        let repository = FirstMatchingHandlerRepository::<i32, i32>::builder()
            .handler_fn(|_| true, |_| panic!("handler exploded"))
            .build();
        repository.invoke_appropriate_handler(&1);
    }
}
