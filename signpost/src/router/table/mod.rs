//! Defines the `RouteTable`, an ordered collection of `CompiledRoute` values, and the matching
//! walk over it.
//!
//! Registration order is significant: it is the only tie-break between overlapping templates.
//! Matching is first-match-wins, not best-match. A more literal route registered after a broader
//! one is never reached for paths the broader one accepts.

use std::collections::HashSet;
use std::pin::Pin;
use std::slice;
use std::sync::Arc;

use hyper::Method;
use log::trace;

use crate::config::RouterConfig;
use crate::error::{Result, RouteError};
use crate::handler::{Handler, HandlerFuture};
use crate::helpers::http::request::path::RequestPathSegments;
use crate::router::constraint::ConstraintRegistry;
use crate::router::params::RouteParams;
use crate::router::route::matcher::{AnyRouteMatcher, MethodOnlyRouteMatcher, RouteMatcher};
use crate::router::route::CompiledRoute;
use crate::router::template::compile;

/// The outcome of a successful match: the captured parameters and the selected route.
///
/// Borrows the `RouteTable` it was produced from and is meant to be discarded after dispatch.
#[derive(Debug)]
pub struct MatchResult<'a> {
    route: &'a CompiledRoute,
    params: RouteParams,
}

impl<'a> MatchResult<'a> {
    /// The captured parameters.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Consumes the result, returning the captured parameters.
    pub fn into_params(self) -> RouteParams {
        self.params
    }

    /// The selected route.
    pub fn route(&self) -> &'a CompiledRoute {
        self.route
    }

    /// The handler of the selected route.
    pub fn handler(&self) -> &'a Arc<dyn Handler> {
        self.route.handler()
    }

    /// Invokes the selected handler with the captured parameters.
    pub fn invoke(self) -> Pin<Box<HandlerFuture>> {
        self.route.handler().invoke(self.params)
    }
}

/// An ordered collection of compiled routes, built during a single-threaded setup phase and
/// read-only afterwards.
///
/// # Examples
///
/// ```rust
/// use signpost::handler::HandlingOutcome;
/// use signpost::router::params::RouteParams;
/// use signpost::router::table::RouteTable;
///
/// let mut table = RouteTable::new();
/// table
///     .add("hello/{name:alpha}", |_: RouteParams| HandlingOutcome::Handled)
///     .unwrap();
///
/// let result = table.match_path("/hello/World").unwrap();
/// assert_eq!(result.params().get("name"), Some("World"));
///
/// assert!(table.match_path("/hello/123").is_none());
/// ```
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
    constraints: ConstraintRegistry,
    config: RouterConfig,
    names: HashSet<String>,
}

impl RouteTable {
    /// Creates an empty table using the built-in constraints and the default `RouterConfig`.
    pub fn new() -> Self {
        RouteTable::with_constraints(ConstraintRegistry::new(), RouterConfig::default())
    }

    /// Creates an empty table which resolves constraint names against `constraints`.
    pub fn with_constraints(constraints: ConstraintRegistry, config: RouterConfig) -> Self {
        RouteTable {
            routes: vec![],
            constraints,
            config,
            names: HashSet::new(),
        }
    }

    /// Compiles `pattern` and appends a route dispatching to `handler`, for any request method.
    ///
    /// Fails with `RouteError::MalformedTemplate` or `RouteError::UnknownConstraint`, in which
    /// case the table is left unchanged.
    pub fn add<H>(&mut self, pattern: &str, handler: H) -> Result<()>
    where
        H: Handler + 'static,
    {
        self.push(pattern, Box::new(AnyRouteMatcher::new()), Arc::new(handler), None)
    }

    /// As `add`, but the route only matches requests made with one of `methods`.
    pub fn add_for<H>(&mut self, methods: Vec<Method>, pattern: &str, handler: H) -> Result<()>
    where
        H: Handler + 'static,
    {
        let matcher = MethodOnlyRouteMatcher::new(methods);
        self.push(pattern, Box::new(matcher), Arc::new(handler), None)
    }

    /// As `add`, additionally naming the route so that `path_for` can generate paths for it.
    /// Fails with `RouteError::DuplicateRouteName` when the name is already taken.
    pub fn add_named<H>(&mut self, name: &str, pattern: &str, handler: H) -> Result<()>
    where
        H: Handler + 'static,
    {
        if self.names.contains(name) {
            return Err(RouteError::DuplicateRouteName {
                name: name.to_owned(),
            });
        }

        self.push(
            pattern,
            Box::new(AnyRouteMatcher::new()),
            Arc::new(handler),
            Some(name.to_owned()),
        )?;
        self.names.insert(name.to_owned());
        Ok(())
    }

    /// As `add`, with a handler which is shared with other routes or with the application.
    pub fn add_shared(&mut self, pattern: &str, handler: Arc<dyn Handler>) -> Result<()> {
        self.push(pattern, Box::new(AnyRouteMatcher::new()), handler, None)
    }

    /// Appends a route with an arbitrary `RouteMatcher`.
    pub fn add_with_matcher<M>(
        &mut self,
        pattern: &str,
        matcher: M,
        handler: Arc<dyn Handler>,
    ) -> Result<()>
    where
        M: RouteMatcher + Send + Sync + 'static,
    {
        self.push(pattern, Box::new(matcher), handler, None)
    }

    fn push(
        &mut self,
        pattern: &str,
        matcher: Box<dyn RouteMatcher + Send + Sync>,
        handler: Arc<dyn Handler>,
        name: Option<String>,
    ) -> Result<()> {
        let template = compile(pattern)?;
        let route = CompiledRoute::new(template, &self.constraints, matcher, handler, name)?;

        trace!(" adding route #{} `{}`", self.routes.len(), pattern);
        self.routes.push(route);
        Ok(())
    }

    /// The number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Iterates over the routes in registration order.
    pub fn routes(&self) -> slice::Iter<'_, CompiledRoute> {
        self.routes.iter()
    }

    /// The registry constraint names were resolved against.
    pub fn constraints(&self) -> &ConstraintRegistry {
        &self.constraints
    }

    /// The configuration applied while matching.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Finds the first route, in registration order, which binds the percent-decoded `path`.
    /// Routes restricted to particular methods are skipped.
    ///
    /// Returns `None` when no route matches; producing a "not found" response is left to the
    /// caller.
    pub fn match_path(&self, path: &str) -> Option<MatchResult<'_>> {
        self.matches(None, RequestPathSegments::new(path)).next()
    }

    /// As `match_path`, additionally requiring each route's `RouteMatcher` to accept `method`.
    pub fn match_request(&self, method: &Method, path: &str) -> Option<MatchResult<'_>> {
        self.matches(Some(method), RequestPathSegments::new(path)).next()
    }

    /// Lazily yields every route which binds `segments`, in registration order. Used to fall
    /// through to later routes when a handler declines a request.
    pub fn matches(&self, method: Option<&Method>, segments: RequestPathSegments) -> Matches<'_> {
        trace!(" matching {:?}", segments.segments());
        Matches {
            routes: self.routes.iter(),
            method: method.cloned(),
            segments,
            case_sensitive: self.config.is_case_sensitive(),
        }
    }

    /// Generates a path for the route registered under `name`, substituting `values` for its
    /// parameters. Returns `None` for an unknown name, a missing required value, or a value
    /// which the route would not match.
    pub fn path_for(&self, name: &str, values: &RouteParams) -> Option<String> {
        self.routes
            .iter()
            .find(|r| r.name() == Some(name))
            .and_then(|r| r.expand(values))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable::new()
    }
}

/// Iterator over the routes of a `RouteTable` which match a request, in registration order.
pub struct Matches<'a> {
    routes: slice::Iter<'a, CompiledRoute>,
    method: Option<Method>,
    segments: RequestPathSegments,
    case_sensitive: bool,
}

impl<'a> Iterator for Matches<'a> {
    type Item = MatchResult<'a>;

    fn next(&mut self) -> Option<MatchResult<'a>> {
        let method = self.method.as_ref();
        let segments = self.segments.segments();
        let case_sensitive = self.case_sensitive;

        self.routes.find_map(|route| {
            if !route.accepts(method) {
                return None;
            }

            route
                .bind(segments, case_sensitive)
                .map(|params| MatchResult { route, params })
        })
    }
}
