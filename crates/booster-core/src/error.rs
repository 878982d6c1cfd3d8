//! Error types for booster-core.

use std::path::{Path, PathBuf};

use crate::routes::Route;

/// Errors that can occur in core Booster operations.
///
/// Marked `#[non_exhaustive]` so new failure classes can be added without
/// breaking downstream matches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Operator input rejected before any request was made.
    #[error("Validation error: {message}")]
    Validation {
        /// Form field that failed validation
        field: Option<String>,
        /// What went wrong, worded for the operator
        message: String,
    },

    /// A protected view was requested without a session.
    #[error("Not logged in (redirect to {redirect})")]
    NotAuthenticated {
        /// Where the operator should be sent instead
        redirect: Route,
    },

    /// Session record could not be loaded, saved or cleared.
    #[error("Session error: {message}")]
    Session {
        /// What went wrong
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error bound to a specific file
    #[error("I/O error at {}: {source}", path.display())]
    IoAt {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience `Result` alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a validation error without a field name.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a validation error for a named form field.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// The error returned when a protected view is reached without a session.
    pub fn not_authenticated() -> Self {
        Error::NotAuthenticated {
            redirect: Route::Login,
        }
    }

    /// Creates a session storage error.
    pub fn session<S: Into<String>>(message: S) -> Self {
        Error::Session {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::IoAt {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns `true` for errors raised by client-side validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }

    /// Text shown to the operator for this error.
    ///
    /// Validation failures show their message verbatim; everything else
    /// uses the display form.
    pub fn operator_message(&self) -> String {
        match self {
            Error::Validation { message, .. } => message.clone(),
            Error::NotAuthenticated { .. } => "Please log in to continue.".to_string(),
            other => other.to_string(),
        }
    }
}
