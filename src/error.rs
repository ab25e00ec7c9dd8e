//! Error types
//!
//! `ResolveError` is what callers of `HandlerSource` see. Bootstrap failures
//! are grouped under `BootstrapError` so they can be told apart from plain
//! lookup misses.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ResolveError> = std::result::Result<T, E>;

/// Failure to resolve a handler identifier
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No candidate bootstrap file exists
    #[error("Unable to locate `{}`: tried to load that file to retrieve the application", attempted.display())]
    BootstrapNotFound { attempted: PathBuf },

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    /// Nothing knows this identifier
    #[error("handler `{id}` not found")]
    NotFound { id: String },

    #[error("failed to read handler file `{}`", path.display())]
    ReadHandler {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid handler definition in `{}`", path.display())]
    InvalidHandler {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A container binding exists but could not produce its handler
    #[error("failed to build service `{id}`")]
    Service {
        id: String,
        #[source]
        source: HandlerError,
    },
}

impl ResolveError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failure while turning a bootstrap file into a ready application
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to read bootstrap file `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid bootstrap manifest `{}`", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The manifest names something that is not a registered factory
    #[error(
        "Expected the `{}` file to name a registered {expected} factory, instead it named `{actual}`",
        path.display()
    )]
    UnknownFactory {
        path: PathBuf,
        expected: &'static str,
        actual: String,
    },

    #[error("application factory `{factory}` failed: {message}")]
    Factory { factory: String, message: String },

    #[error("kernel bootstrap failed for `{}`", path.display())]
    Kernel {
        path: PathBuf,
        #[source]
        source: KernelError,
    },
}

/// Failure inside the one-time kernel bootstrap
#[derive(Debug, Error)]
pub enum KernelError {
    #[error("invalid application configuration: {0}")]
    Configuration(String),

    #[error("service provider `{provider}` failed: {message}")]
    Provider { provider: String, message: String },
}

/// Failure raised by a handler, or by a container binding building one
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("handler does not accept this event: {0}")]
    UnsupportedEvent(String),

    #[error("{0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_not_found_names_path() {
        let err = ResolveError::BootstrapNotFound {
            attempted: PathBuf::from("/srv/app/bootstrap/app.toml"),
        };
        assert!(err.to_string().contains("/srv/app/bootstrap/app.toml"));
    }

    #[test]
    fn test_unknown_factory_message() {
        let err = BootstrapError::UnknownFactory {
            path: PathBuf::from("/srv/app/bootstrap/app.toml"),
            expected: "application",
            actual: "nope".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/srv/app/bootstrap/app.toml"));
        assert!(msg.contains("application"));
        assert!(msg.contains("`nope`"));
    }

    #[test]
    fn test_bootstrap_error_is_transparent() {
        let inner = BootstrapError::Factory {
            factory: "demo".to_string(),
            message: "boom".to_string(),
        };
        let expected = inner.to_string();
        let err = ResolveError::from(inner);
        assert_eq!(err.to_string(), expected);
        assert!(!err.is_not_found());
        assert!(ResolveError::not_found("x").is_not_found());
    }
}
