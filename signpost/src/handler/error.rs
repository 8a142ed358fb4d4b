use std::fmt::{self, Debug, Display, Formatter};

use log::debug;

/// Describes an error which occurred inside a `Handler`.
///
/// The router treats this value as opaque: it is neither inspected nor retried, only returned to
/// the host which invoked the dispatch.
pub struct HandlerError {
    cause: anyhow::Error,
}

impl HandlerError {
    /// Returns the cause of this error.
    pub fn cause(&self) -> &anyhow::Error {
        &self.cause
    }

    /// Attempts to downcast the cause to a concrete error type.
    pub fn downcast_cause_ref<E>(&self) -> Option<&E>
    where
        E: Display + Debug + Send + Sync + 'static,
    {
        self.cause.downcast_ref()
    }

    /// Consumes the error, returning its cause.
    pub fn into_cause(self) -> anyhow::Error {
        self.cause
    }
}

impl Debug for HandlerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.cause, f)
    }
}

impl Display for HandlerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.cause, f)
    }
}

/// Allows conversion into a `HandlerError` from any error type usable with `anyhow`.
impl<E> From<E> for HandlerError
where
    E: Into<anyhow::Error> + Display,
{
    fn from(error: E) -> HandlerError {
        debug!(" converting error into HandlerError: {}", error);

        HandlerError {
            cause: error.into(),
        }
    }
}

/// Allows conversion into a `HandlerError` from an implementing type.
///
/// Futures returned from handlers can resolve to an error type with a value that implements this
/// trait.
///
/// # Examples
///
/// ```rust
/// use std::io;
/// use signpost::handler::{HandlerError, HandlingOutcome, IntoHandlerError};
/// use signpost::router::params::RouteParams;
///
/// fn my_handler(_params: RouteParams) -> Result<HandlingOutcome, HandlerError> {
///     let io_error = io::Error::new(io::ErrorKind::Other, "downstream unavailable");
///     Err(io_error.into_handler_error())
/// }
/// #
/// # assert!(my_handler(RouteParams::new()).is_err());
/// ```
pub trait IntoHandlerError {
    /// Converts `self` into a `HandlerError`.
    fn into_handler_error(self) -> HandlerError;
}

impl<E> IntoHandlerError for E
where
    E: Into<HandlerError>,
{
    fn into_handler_error(self) -> HandlerError {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn keeps_cause_for_downcasting() {
        let err: HandlerError = io::Error::new(io::ErrorKind::NotFound, "missing").into();

        assert_eq!(err.to_string(), "missing");
        assert_eq!(
            err.downcast_cause_ref::<io::Error>().map(io::Error::kind),
            Some(io::ErrorKind::NotFound)
        );
        assert!(err.into_cause().is::<io::Error>());
    }
}
