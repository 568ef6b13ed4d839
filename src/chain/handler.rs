use std::fmt;

/// A unit that can decide whether it applies to a request and then process it.
///
/// `can_apply` is expected to be free of side effects; repositories may call it
/// any number of times. Handlers are `Send + Sync` so a built repository can be
/// shared between threads without locking.
///
/// A handler that can fail should use a `Result` as its response type. The
/// repository passes it through untouched.
pub trait Handler<Req, Res>: Send + Sync {
    /// Returns true if this handler is able to process `request`.
    fn can_apply(&self, request: &Req) -> bool;

    /// Processes `request`.
    fn do_apply(&self, request: &Req) -> Res;
}

/// Handler built from a pair of closures.
pub struct FnHandler<P, F> {
    can_apply: P,
    do_apply: F,
}

impl<P, F> fmt::Debug for FnHandler<P, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

impl<Req, Res, P, F> Handler<Req, Res> for FnHandler<P, F>
where
    P: Fn(&Req) -> bool + Send + Sync,
    F: Fn(&Req) -> Res + Send + Sync,
{
    fn can_apply(&self, request: &Req) -> bool {
        (self.can_apply)(request)
    }

    fn do_apply(&self, request: &Req) -> Res {
        (self.do_apply)(request)
    }
}

/// Creates a handler from an applicability predicate and an apply function.
///
/// ```
/// use chainwait::chain::{handler_fn, Handler};
///
/// let even = handler_fn(|n: &i32| n % 2 == 0, |_: &i32| "Even");
/// assert!(even.can_apply(&4));
/// assert_eq!(even.do_apply(&4), "Even");
/// ```
pub fn handler_fn<Req, Res, P, F>(can_apply: P, do_apply: F) -> FnHandler<P, F>
where
    P: Fn(&Req) -> bool + Send + Sync,
    F: Fn(&Req) -> Res + Send + Sync,
{
    FnHandler { can_apply, do_apply }
}
