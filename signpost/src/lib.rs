//! Signpost &ndash; a minimal, extensible request router.
//!
//! Route templates such as `hello/{name:alpha}` are compiled into literal and parameter segments.
//! Parameters may carry an inline constraint, resolved by name against a `ConstraintRegistry`, and
//! the final parameter may be optional (`{id?}`). Requests are matched against routes in
//! registration order, first match wins, and the bound parameters are handed to an asynchronous
//! `Handler` which either handles the request or lets it fall through to the next matching route
//! and finally to a default responder.
//!
//! Signpost never builds responses; handlers produce them as a side effect, and the host is told
//! only whether the request was handled.
//!
//! ```rust
//! # use futures_executor::block_on;
//! use signpost::{build_router, HandlingOutcome, RouteParams};
//!
//! let router = build_router(|route| {
//!     route
//!         .route("hello/{name:alpha}", |params: RouteParams| {
//!             println!("Hi {}!", &params["name"]);
//!             HandlingOutcome::Handled
//!         })?
//!         .default_responder(|_: RouteParams| {
//!             println!("Hello World!");
//!             HandlingOutcome::Handled
//!         });
//!     Ok(())
//! })
//! .unwrap();
//!
//! # block_on(async {
//! router.dispatch("/hello/World").await.unwrap(); // Hi World!
//! router.dispatch("/hello/123").await.unwrap(); // Hello World!
//! # });
//! ```
#![doc(html_root_url = "https://docs.rs/signpost/0.1.0")] // Update when changed in Cargo.toml
#![warn(missing_docs, deprecated)]
// Stricter requirements once we get to pull request stage, all warnings must be resolved.
#![cfg_attr(feature = "ci", deny(warnings))]

pub mod config;
pub mod error;
pub mod handler;
pub mod helpers;
pub mod router;

pub use crate::config::RouterConfig;
pub use crate::error::RouteError;
pub use crate::handler::{Handler, HandlerError, HandlingOutcome, IntoHandlerError};
pub use crate::router::constraint::{Constraint, ConstraintRegistry};
pub use crate::router::params::RouteParams;
pub use crate::router::table::{MatchResult, RouteTable};
pub use crate::router::template::RouteTemplate;
pub use crate::router::{build_router, Router, RouterBuilder};
