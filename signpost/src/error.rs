//! Errors raised while building a route table.
//!
//! Everything in here is a setup-time failure. Constraint rejections and requests which match no
//! route are ordinary routing outcomes and are never reported through `RouteError`.
use thiserror::Error;

/// Failures encountered while compiling route templates and registering routes.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The template text could not be parsed into segments.
    #[error("malformed route template `{template}`: {reason}")]
    MalformedTemplate {
        /// The offending template, as supplied.
        template: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A template referenced a constraint which is not present in the `ConstraintRegistry`.
    #[error("unknown route constraint `{name}`")]
    UnknownConstraint {
        /// The constraint name, without any argument list.
        name: String,
    },

    /// A named route was registered twice within the same table.
    #[error("a route named `{name}` is already registered")]
    DuplicateRouteName {
        /// The repeated route name.
        name: String,
    },
}

impl RouteError {
    pub(crate) fn malformed<T, R>(template: T, reason: R) -> RouteError
    where
        T: Into<String>,
        R: Into<String>,
    {
        RouteError::MalformedTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_constraint<N>(name: N) -> RouteError
    where
        N: Into<String>,
    {
        RouteError::UnknownConstraint { name: name.into() }
    }
}

/// An implementation of the single-parameter Result pattern, using `RouteError`.
pub type Result<T> = ::std::result::Result<T, RouteError>;
