//! Defines the type `AnyRouteMatcher`

use hyper::Method;

use crate::router::route::matcher::RouteMatcher;

/// Matches any request without restriction (i.e. will accept any request which has already
/// matched the template of the current route). This is the matcher used by `RouteTable::add`.
///
/// # Examples
///
/// ```rust
/// # use hyper::Method;
/// # use signpost::router::route::matcher::{AnyRouteMatcher, RouteMatcher};
/// let matcher = AnyRouteMatcher::new();
///
/// assert!(matcher.is_match(Some(&Method::DELETE)));
/// assert!(matcher.is_match(None));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnyRouteMatcher {}

impl AnyRouteMatcher {
    /// Creates a new `AnyRouteMatcher`
    pub fn new() -> Self {
        AnyRouteMatcher {}
    }
}

impl RouteMatcher for AnyRouteMatcher {
    fn is_match(&self, _method: Option<&Method>) -> bool {
        true
    }
}
