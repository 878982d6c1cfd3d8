//! Error types for booster-client.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Result type alias for booster-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur talking to the backend.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from booster-core (validation, session, config)
    #[error(transparent)]
    Core(#[from] booster_core::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {}", message.as_deref().unwrap_or("request failed"))]
    Http {
        /// Response status code
        status: u16,
        /// The `error` field of the response body, when present
        message: Option<String>,
    },

    /// The request never got a response (connect, timeout, TLS).
    #[error("Network error: {message}")]
    Network {
        /// Transport error text
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {endpoint}: {message}")]
    Decode {
        /// Endpoint path
        endpoint: String,
        /// Decoder message
        message: String,
    },

    /// Push channel protocol error.
    #[error("Push channel error: {message}")]
    Push {
        /// What went wrong
        message: String,
    },

    /// WebSocket transport error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[source] Box<tungstenite::Error>),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Error::Http {
                status: status.as_u16(),
                message: None,
            },
            None if e.is_decode() => Error::Decode {
                endpoint: e.url().map(|u| u.path().to_string()).unwrap_or_default(),
                message: e.to_string(),
            },
            None => Error::network(e.to_string()),
        }
    }
}

impl From<tungstenite::Error> for Error {
    fn from(e: tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(e))
    }
}

impl Error {
    /// Creates a push channel error.
    pub fn push<S: Into<String>>(message: S) -> Self {
        Error::Push {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network<S: Into<String>>(message: S) -> Self {
        Error::Network {
            message: message.into(),
        }
    }

    /// Creates a decode error for an endpoint.
    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Transport-class failure: no usable response reached us.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. } | Error::WebSocket(_))
    }

    /// The backend's own error text, if it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether a protected operation was attempted without a session.
    pub fn is_not_authenticated(&self) -> bool {
        matches!(
            self,
            Error::Core(booster_core::Error::NotAuthenticated { .. })
        )
    }

    /// Inline alert text for a failed `action`.
    pub fn alert(&self, action: Action) -> String {
        if let Error::Core(core) = self {
            return core.operator_message();
        }
        if action == Action::Distribute && self.is_network() {
            return "Network error. Please check your connection and retry.".to_string();
        }
        let server = self.server_message();
        match action {
            Action::Login => format!(
                "Login failed: {}",
                server.map_or_else(|| self.to_string(), str::to_string)
            ),
            Action::Burn | Action::UsageReport => match server {
                Some(msg) => format!("Error: {msg}"),
                None => action.fallback().to_string(),
            },
            Action::ViewWalletGroup | Action::TransactionState | Action::ResumeTransaction => {
                server.map_or_else(|| self.to_string(), str::to_string)
            }
            Action::Signup
            | Action::Distribute
            | Action::Collect
            | Action::Buy
            | Action::Sell => server.unwrap_or(action.fallback()).to_string(),
            _ => action.fallback().to_string(),
        }
    }
}

/// Operator-visible operations, used to word failure alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Log in
    Login,
    /// Create an account
    Signup,
    /// Load the home view's active group and token
    Home,
    /// List wallet groups
    ListWalletGroups,
    /// Create a wallet group
    CreateWalletGroup,
    /// Activate a wallet group
    ActivateWalletGroup,
    /// Show one wallet group
    ViewWalletGroup,
    /// List tokens
    ListTokens,
    /// Add a token
    AddToken,
    /// Activate a token
    ActivateToken,
    /// Distribute AMB
    Distribute,
    /// Collect funds
    Collect,
    /// Burn
    Burn,
    /// Start buying
    Buy,
    /// Start selling
    Sell,
    /// Fetch transaction state
    TransactionState,
    /// Resume a transaction
    ResumeTransaction,
    /// Generate the usage report
    UsageReport,
}

impl Action {
    /// Alert used when the backend gave no reason.
    pub fn fallback(&self) -> &'static str {
        match self {
            Action::Login => "Login failed.",
            Action::Signup => "Registration failed",
            Action::Home => {
                "Could not fetch active group/token. Please add token or try again later."
            }
            Action::ListWalletGroups => "Error fetching wallet groups.",
            Action::CreateWalletGroup => "Error creating group.",
            Action::ActivateWalletGroup => "Error activating group.",
            Action::ViewWalletGroup => "Error fetching wallet group.",
            Action::ListTokens => "Error getting tokens",
            Action::AddToken => "Error adding token",
            Action::ActivateToken => "Error activating token",
            Action::Distribute => "An error occurred while distributing AMB.",
            Action::Collect => "An error occurred while collecting funds.",
            Action::Burn => "An error occurred while burning AMB.",
            Action::Buy => "An error occurred while starting the buy process.",
            Action::Sell => "An error occurred while starting the sell process.",
            Action::TransactionState => "Error fetching transaction state.",
            Action::ResumeTransaction => "Error resuming transaction.",
            Action::UsageReport => "Error generating report.",
        }
    }
}
