//! Defines the type `RouteMatcher` and default implementations.

pub mod any;

pub use self::any::AnyRouteMatcher;

use hyper::Method;
use log::trace;

/// Determines if pre-defined conditions required for the associated route to be selected have
/// been met, once its template has bound the request path.
pub trait RouteMatcher {
    /// Determines if a request made with `method` meets the conditions. `None` means the host
    /// matched by path alone and supplied no method.
    fn is_match(&self, method: Option<&Method>) -> bool;
}

/// A `RouteMatcher` that succeeds when the request has been made with one or more acceptable
/// HTTP request methods. Lookups which supply no method never satisfy it.
///
/// # Examples
///
/// ```rust
/// # use hyper::Method;
/// # use signpost::router::route::matcher::{RouteMatcher, MethodOnlyRouteMatcher};
/// let methods = vec![Method::GET, Method::HEAD];
/// let matcher = MethodOnlyRouteMatcher::new(methods);
///
/// assert_eq!(matcher.methods(), &[Method::GET, Method::HEAD]);
/// assert!(matcher.is_match(Some(&Method::GET)));
/// assert!(!matcher.is_match(Some(&Method::POST)));
/// assert!(!matcher.is_match(None));
/// ```
#[derive(Clone, Debug)]
pub struct MethodOnlyRouteMatcher {
    methods: Vec<Method>,
}

impl MethodOnlyRouteMatcher {
    /// Creates a new `MethodOnlyRouteMatcher`.
    pub fn new(methods: Vec<Method>) -> Self {
        MethodOnlyRouteMatcher { methods }
    }

    /// The permitted methods.
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

impl RouteMatcher for MethodOnlyRouteMatcher {
    /// Determines if the request was made using a `Method` the instance contains.
    fn is_match(&self, method: Option<&Method>) -> bool {
        match method {
            Some(method) if self.methods.iter().any(|m| m == method) => {
                trace!(" matched request method {} to permitted method", method);
                true
            }
            Some(method) => {
                trace!(" did not match request method {}", method);
                false
            }
            None => {
                trace!(" no request method supplied, route requires one");
                false
            }
        }
    }
}
