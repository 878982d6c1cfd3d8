//! Error types for booster-cli

use booster_client::Action;
use thiserror::Error;

/// Result type alias for booster-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in booster-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from booster-core, shown as operator text
    #[error("{}", .0.operator_message())]
    Core(#[from] booster_core::Error),

    /// Error from booster-client
    #[error(transparent)]
    Client(#[from] booster_client::Error),

    /// A failed operation, worded for the operator
    #[error("{message}")]
    Alert {
        /// Alert text
        message: String,
    },

    /// Writing output failed
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates an operator alert.
    pub fn alert<S: Into<String>>(message: S) -> Self {
        Error::Alert {
            message: message.into(),
        }
    }
}

/// Word a client failure as the alert shown for `action`.
pub fn alert_for(action: Action) -> impl FnOnce(booster_client::Error) -> Error {
    move |e| {
        tracing::debug!(?action, error = %e, "Operation failed");
        Error::alert(e.alert(action))
    }
}
