//! Defines the `Router` and supporting types.

pub mod constraint;
pub mod params;
pub mod route;
pub mod table;
pub mod template;

use std::sync::Arc;

use hyper::Method;
use log::{debug, trace};

use crate::config::RouterConfig;
use crate::error::Result;
use crate::handler::{Handler, HandlerError, HandlingOutcome};
use crate::helpers::http::request::path::RequestPathSegments;
use crate::router::constraint::ConstraintRegistry;
use crate::router::params::RouteParams;
use crate::router::table::RouteTable;

struct RouterData {
    table: RouteTable,
    default_responder: Option<Arc<dyn Handler>>,
}

/// Responsible for dispatching requests to the handlers of matching routes, falling back to a
/// default responder when no route handles the request.
///
/// Routes are tried in registration order. Every route whose template and constraints match is
/// invoked in turn until one returns `HandlingOutcome::Handled`. A handler error ends dispatch
/// immediately and is returned unchanged.
///
/// A `Router` is cheap to clone and can be shared between threads; the underlying `RouteTable` is
/// immutable once the router is built.
///
/// # Examples
///
/// ```rust
/// # use futures_executor::block_on;
/// use signpost::handler::HandlingOutcome;
/// use signpost::router::params::RouteParams;
/// use signpost::router::table::RouteTable;
/// use signpost::router::Router;
///
/// let mut table = RouteTable::new();
/// table
///     .add("hello/{name:alpha}", |params: RouteParams| {
///         println!("Hi {}!", &params["name"]);
///         HandlingOutcome::Handled
///     })
///     .unwrap();
///
/// let router = Router::new(table);
///
/// # block_on(async {
/// assert_eq!(router.dispatch("/hello/World").await.unwrap(), HandlingOutcome::Handled);
/// assert_eq!(router.dispatch("/hello/123").await.unwrap(), HandlingOutcome::NotHandled);
/// # });
/// ```
#[derive(Clone)]
pub struct Router {
    data: Arc<RouterData>,
}

impl Router {
    /// Creates a `Router` without a default responder.
    pub fn new(table: RouteTable) -> Router {
        Router::internal_new(table, None)
    }

    /// Creates a `Router` which invokes `responder`, with empty parameters, for requests that no
    /// route handles.
    pub fn with_default<H>(table: RouteTable, responder: H) -> Router
    where
        H: Handler + 'static,
    {
        Router::internal_new(table, Some(Arc::new(responder)))
    }

    fn internal_new(table: RouteTable, default_responder: Option<Arc<dyn Handler>>) -> Router {
        trace!(" creating router with {} routes", table.len());
        Router {
            data: Arc::new(RouterData {
                table,
                default_responder,
            }),
        }
    }

    /// The routes this router dispatches to.
    pub fn table(&self) -> &RouteTable {
        &self.data.table
    }

    /// Dispatches a percent-decoded request path, considering only routes which accept any
    /// method.
    pub async fn dispatch(&self, path: &str) -> std::result::Result<HandlingOutcome, HandlerError> {
        self.dispatch_segments(None, RequestPathSegments::new(path)).await
    }

    /// Dispatches a percent-decoded request path made with `method`.
    pub async fn dispatch_request(
        &self,
        method: &Method,
        path: &str,
    ) -> std::result::Result<HandlingOutcome, HandlerError> {
        self.dispatch_segments(Some(method), RequestPathSegments::new(path))
            .await
    }

    /// Dispatches a raw request path, percent-decoding each segment separately so that an
    /// encoded `/` never splits a segment.
    ///
    /// A path which does not decode to valid UTF-8 matches no route and goes straight to the
    /// default responder.
    pub async fn dispatch_encoded(
        &self,
        method: Option<&Method>,
        raw: &str,
    ) -> std::result::Result<HandlingOutcome, HandlerError> {
        match RequestPathSegments::from_encoded(raw) {
            Some(segments) => self.dispatch_segments(method, segments).await,
            None => {
                debug!(" invalid request path segments `{}`", raw);
                self.respond_default().await
            }
        }
    }

    async fn dispatch_segments(
        &self,
        method: Option<&Method>,
        segments: RequestPathSegments,
    ) -> std::result::Result<HandlingOutcome, HandlerError> {
        for result in self.data.table.matches(method, segments) {
            let template = result.route().template();

            trace!(" dispatching to `{}`", template);
            match result.invoke().await? {
                HandlingOutcome::Handled => return Ok(HandlingOutcome::Handled),
                HandlingOutcome::NotHandled => {
                    debug!(" `{}` did not handle request, trying next route", template)
                }
            }
        }

        self.respond_default().await
    }

    async fn respond_default(&self) -> std::result::Result<HandlingOutcome, HandlerError> {
        match self.data.default_responder {
            Some(ref responder) => {
                trace!(" dispatching to default responder");
                responder.invoke(RouteParams::new()).await
            }
            None => {
                debug!(" no route handled request");
                Ok(HandlingOutcome::NotHandled)
            }
        }
    }
}

/// Performs the setup phase of a `Router`: routes are registered in order, then `build` freezes
/// them.
///
/// Registration methods return the builder on success so that calls can be chained with `?`.
pub struct RouterBuilder {
    table: RouteTable,
    default_responder: Option<Arc<dyn Handler>>,
}

impl RouterBuilder {
    /// Creates a builder using the built-in constraints and the default configuration.
    pub fn new() -> Self {
        RouterBuilder::with_constraints(ConstraintRegistry::new(), RouterConfig::default())
    }

    /// Creates a builder using the built-in constraints and `config`.
    pub fn with_config(config: RouterConfig) -> Self {
        RouterBuilder::with_constraints(ConstraintRegistry::new(), config)
    }

    /// Creates a builder resolving constraint names against `constraints`.
    pub fn with_constraints(constraints: ConstraintRegistry, config: RouterConfig) -> Self {
        RouterBuilder {
            table: RouteTable::with_constraints(constraints, config),
            default_responder: None,
        }
    }

    /// Adds a route for any request method. See `RouteTable::add`.
    pub fn route<H>(&mut self, pattern: &str, handler: H) -> Result<&mut Self>
    where
        H: Handler + 'static,
    {
        self.table.add(pattern, handler)?;
        Ok(self)
    }

    /// Adds a route restricted to `methods`. See `RouteTable::add_for`.
    pub fn route_for<H>(
        &mut self,
        methods: Vec<Method>,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self>
    where
        H: Handler + 'static,
    {
        self.table.add_for(methods, pattern, handler)?;
        Ok(self)
    }

    /// Adds a named route. See `RouteTable::add_named`.
    pub fn named_route<H>(&mut self, name: &str, pattern: &str, handler: H) -> Result<&mut Self>
    where
        H: Handler + 'static,
    {
        self.table.add_named(name, pattern, handler)?;
        Ok(self)
    }

    /// Sets the handler invoked when no route handles a request, replacing any previous one.
    pub fn default_responder<H>(&mut self, responder: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.default_responder = Some(Arc::new(responder));
        self
    }

    /// Freezes the registered routes into a `Router`.
    pub fn build(self) -> Router {
        Router::internal_new(self.table, self.default_responder)
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        RouterBuilder::new()
    }
}

/// Builds a `Router` using the provided closure. Routes are defined using the `RouterBuilder`
/// value passed to the closure, and the `Router` is constructed before returning.
///
/// The first registration error aborts the build and is returned.
///
/// ```rust
/// # use futures_executor::block_on;
/// use signpost::handler::HandlingOutcome;
/// use signpost::router::build_router;
/// use signpost::router::params::RouteParams;
///
/// let router = build_router(|route| {
///     route
///         .route("hello/{name:alpha}", |params: RouteParams| {
///             println!("Hi {}!", &params["name"]);
///             HandlingOutcome::Handled
///         })?
///         .default_responder(|_: RouteParams| {
///             println!("Hello World!");
///             HandlingOutcome::Handled
///         });
///     Ok(())
/// })
/// .unwrap();
///
/// # block_on(async {
/// assert!(router.dispatch("/other").await.unwrap().is_handled());
/// # });
/// ```
pub fn build_router<F>(f: F) -> Result<Router>
where
    F: FnOnce(&mut RouterBuilder) -> Result<()>,
{
    let mut builder = RouterBuilder::new();
    f(&mut builder)?;
    Ok(builder.build())
}
