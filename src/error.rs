//! Error handling types

use crate::key::ServiceKey;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service registry
///
/// All failures propagate synchronously to the caller of
/// [`Registry::resolve`](crate::Registry::resolve); nothing is retried or
/// recovered internally. An unresolved dependency during request setup is
/// a configuration error and should be treated as fatal to that path.
#[derive(Error, Debug)]
pub enum Error {
    /// No registration exists and the key has no constructor
    #[error("No registration found for {key}")]
    UnresolvedDependency {
        /// The key that could not be resolved
        key: ServiceKey,
    },

    /// A constructor was invoked but failed
    #[error("Failed to auto-wire {key}: {source}")]
    AutoWireFailure {
        /// The key whose constructor failed
        key: ServiceKey,
        /// The underlying cause (nested resolution failure or constructor error)
        #[source]
        source: Box<Error>,
    },

    /// A key reappeared on the active resolution path
    #[error("Cyclic dependency: {}", render_path(.path))]
    CyclicDependency {
        /// Resolution path, outermost first; the final entry closes the cycle
        path: Vec<ServiceKey>,
    },

    /// Generic string-based error
    #[error("String error: {0}")]
    String(String),

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Create an unresolved dependency error
    pub fn unresolved(key: ServiceKey) -> Self {
        Self::UnresolvedDependency { key }
    }

    /// Create an auto-wire failure wrapping its cause
    pub fn auto_wire(key: ServiceKey, source: Error) -> Self {
        Self::AutoWireFailure {
            key,
            source: Box::new(source),
        }
    }

    /// Create a cyclic dependency error from a resolution path
    pub fn cyclic(path: Vec<ServiceKey>) -> Self {
        Self::CyclicDependency { path }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

fn render_path(path: &[ServiceKey]) -> String {
    path.iter()
        .map(ServiceKey::name)
        .collect::<Vec<_>>()
        .join(" -> ")
}
