//! Defines types for handlers invoked by the router.
//!
//! A function or closure taking `RouteParams` can be used directly as a handler using the
//! [default implementation of `Handler`][handler-impl], but the trait can also be implemented
//! directly for greater control.
//!
//! [handler-impl]: trait.Handler.html#implementors
use std::future::Future;
use std::pin::Pin;

use futures_util::future::{self, FutureExt};

use crate::router::params::RouteParams;

mod error;

pub use self::error::{HandlerError, IntoHandlerError};

/// A type alias for the trait objects returned by `Handler::invoke`.
///
/// The outcome is only final once this future completes. When it resolves to an error, the
/// `HandlerError` is returned to the host unchanged; the router does not try further routes.
pub type HandlerFuture = dyn Future<Output = Result<HandlingOutcome, HandlerError>> + Send;

/// The result of invoking a `Handler`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandlingOutcome {
    /// The handler dealt with the request. No further routes are considered.
    Handled,

    /// The handler declined the request. The router continues with the next registered route
    /// whose template matches, and finally with the default responder.
    NotHandled,
}

impl HandlingOutcome {
    /// True for `HandlingOutcome::Handled`.
    pub fn is_handled(self) -> bool {
        self == HandlingOutcome::Handled
    }
}

/// A `Handler` receives the parameters bound by a matched route and returns a future which
/// resolves to a `HandlingOutcome`.
///
/// The same handler value is shared by every request routed to it, possibly from several threads
/// at once, so it is invoked through `&self`. Any response is produced as a side effect of the
/// handler; the router never constructs one.
///
/// # Examples
///
/// ```rust
/// use futures_util::future::FutureExt;
/// use signpost::handler::{Handler, HandlerFuture, HandlingOutcome};
/// use signpost::router::params::RouteParams;
/// use std::pin::Pin;
///
/// struct Greeter;
///
/// impl Handler for Greeter {
///     fn invoke(&self, params: RouteParams) -> Pin<Box<HandlerFuture>> {
///         async move {
///             match params.get("name") {
///                 Some(name) => {
///                     println!("Hi {}!", name);
///                     Ok(HandlingOutcome::Handled)
///                 }
///                 None => Ok(HandlingOutcome::NotHandled),
///             }
///         }
///         .boxed()
///     }
/// }
/// #
/// # let outcome = futures_executor::block_on(Greeter.invoke(RouteParams::new())).unwrap();
/// # assert_eq!(outcome, HandlingOutcome::NotHandled);
/// ```
pub trait Handler: Send + Sync {
    /// Handles the request, returning a boxed future which resolves to the outcome.
    fn invoke(&self, params: RouteParams) -> Pin<Box<HandlerFuture>>;
}

impl<F, R> Handler for F
where
    F: Fn(RouteParams) -> R + Send + Sync,
    R: IntoHandlerFuture,
{
    fn invoke(&self, params: RouteParams) -> Pin<Box<HandlerFuture>> {
        self(params).into_handler_future()
    }
}

/// Represents a type which can be converted into the future type returned by a `Handler`.
///
/// This is used to allow functions with different return types to satisfy the `Handler` trait
/// bound via the generic function implementation: synchronous handlers return a
/// `HandlingOutcome` (or a `Result` of one), asynchronous handlers a boxed future.
pub trait IntoHandlerFuture {
    /// Converts this value into a boxed future resolving to a handling outcome.
    fn into_handler_future(self) -> Pin<Box<HandlerFuture>>;
}

impl IntoHandlerFuture for HandlingOutcome {
    fn into_handler_future(self) -> Pin<Box<HandlerFuture>> {
        future::ok(self).boxed()
    }
}

impl IntoHandlerFuture for Result<HandlingOutcome, HandlerError> {
    fn into_handler_future(self) -> Pin<Box<HandlerFuture>> {
        future::ready(self).boxed()
    }
}

impl IntoHandlerFuture for Pin<Box<HandlerFuture>> {
    fn into_handler_future(self) -> Pin<Box<HandlerFuture>> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_executor::block_on;
    use std::io;

    fn invoke<H: Handler>(handler: &H, params: RouteParams) -> Result<HandlingOutcome, HandlerError> {
        block_on(handler.invoke(params))
    }

    #[test]
    fn sync_closure_handler() {
        let handler = |params: RouteParams| {
            if params.contains("name") {
                HandlingOutcome::Handled
            } else {
                HandlingOutcome::NotHandled
            }
        };

        let mut params = RouteParams::new();
        assert_eq!(invoke(&handler, params.clone()).unwrap(), HandlingOutcome::NotHandled);

        params.insert("name", "World");
        assert_eq!(invoke(&handler, params).unwrap(), HandlingOutcome::Handled);
    }

    #[test]
    fn async_closure_handler() {
        let handler = |params: RouteParams| {
            async move {
                let id: u32 = params["id"].parse()?;
                Ok::<_, HandlerError>(if id > 0 {
                    HandlingOutcome::Handled
                } else {
                    HandlingOutcome::NotHandled
                })
            }
            .boxed()
        };

        let mut params = RouteParams::new();
        params.insert("id", "7");
        assert!(invoke(&handler, params).unwrap().is_handled());

        let mut params = RouteParams::new();
        params.insert("id", "seven");
        assert!(invoke(&handler, params).is_err());
    }

    #[test]
    fn fallible_sync_handler() {
        fn failing(_: RouteParams) -> Result<HandlingOutcome, HandlerError> {
            Err(io::Error::new(io::ErrorKind::Other, "downstream unavailable").into_handler_error())
        }

        let err = invoke(&failing, RouteParams::new()).unwrap_err();
        assert_eq!(err.to_string(), "downstream unavailable");
    }
}
