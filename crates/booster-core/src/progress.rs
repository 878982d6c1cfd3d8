//! Live transaction-progress state and its reducer.
//!
//! [`TransactionState`] is fetched once from the backend and then patched by
//! push events through [`TransactionState::apply`]. The reducer applies fixed
//! field rules per event kind; it does not order, de-duplicate or detect
//! gaps between events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::events::{PushEvent, TransactionPatch};

/// Status given to a state whose update carried no status.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// Status set by `transactionCompleted`.
pub const STATUS_COMPLETED: &str = "completed";
/// Status set by `transactionError`.
pub const STATUS_ERROR: &str = "error";

/// Operation a transaction state belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Distribute AMB
    Distribute,
    /// Buy
    Buy,
    /// Sell
    Sell,
    /// Collect
    Collect,
    /// Burn
    Burn,
    /// Anything else the backend reports
    Other(String),
}

impl TransactionKind {
    /// Map the backend's `type` field.
    pub fn parse(s: &str) -> Self {
        match s {
            "distribute" => TransactionKind::Distribute,
            "buy" => TransactionKind::Buy,
            "sell" => TransactionKind::Sell,
            "collect" => TransactionKind::Collect,
            "burn" => TransactionKind::Burn,
            other => TransactionKind::Other(other.to_string()),
        }
    }

    /// Badge shown next to the progress panel; empty for unknown kinds.
    pub fn label(&self) -> &str {
        match self {
            TransactionKind::Distribute => "Distribute AMB",
            TransactionKind::Buy => "Buy",
            TransactionKind::Sell => "Sell",
            TransactionKind::Collect => "Collect",
            TransactionKind::Burn => "Burn",
            TransactionKind::Other(_) => "",
        }
    }
}

/// Extra detail attached to some transaction kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    /// AMB sent per wallet by a distribution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_amount: Option<Value>,

    /// Other detail fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The backend's record of the latest (possibly unfinished) batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionState {
    /// Operation type (`distribute`, `buy`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Status text
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,

    /// Wallets processed so far; only the count is interpreted
    #[serde(default, deserialize_with = "null_as_default")]
    pub processed_wallets: Vec<Value>,

    /// Successful wallets
    #[serde(default, deserialize_with = "null_as_default")]
    pub success_count: u64,

    /// Failed wallets
    #[serde(default, deserialize_with = "null_as_default")]
    pub fail_count: u64,

    /// Wallets in the batch
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_wallets: u64,

    /// When the batch started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// When the state last changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,

    /// Kind-specific details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<TransactionDetails>,

    /// Error text after a `transactionError`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Fields this client does not interpret, kept across merges
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl TransactionState {
    /// Typed view of the `type` field.
    pub fn transaction_kind(&self) -> Option<TransactionKind> {
        self.kind.as_deref().map(TransactionKind::parse)
    }

    /// Number of processed wallets.
    pub fn processed(&self) -> u64 {
        self.processed_wallets.len() as u64
    }

    /// Wallets not yet processed.
    pub fn remaining(&self) -> u64 {
        self.total_wallets.saturating_sub(self.processed())
    }

    /// `round(processed / total * 100)`, or 0 when the total is unknown.
    pub fn progress_percentage(&self) -> u64 {
        if self.total_wallets == 0 {
            return 0;
        }
        let ratio = self.processed() as f64 / self.total_wallets as f64;
        (ratio * 100.0).round() as u64
    }

    /// All wallets of a non-empty batch are processed.
    pub fn is_completed(&self) -> bool {
        self.total_wallets > 0 && self.processed() == self.total_wallets
    }

    /// Fold one push event into the state.
    ///
    /// Returns `true` when the event concerned this state. Per-wallet batch
    /// events and unknown events leave it untouched.
    pub fn apply(&mut self, event: &PushEvent, at: DateTime<Utc>) -> bool {
        match event {
            PushEvent::TransactionUpdate(patch) => {
                self.merge(patch, at);
                if let Some(status) = patch.status.as_deref().filter(|s| !s.is_empty()) {
                    self.status = status.to_string();
                } else if self.status.is_empty() {
                    self.status = STATUS_IN_PROGRESS.to_string();
                }
                true
            }
            PushEvent::TransactionCompleted(patch) => {
                self.merge(patch, at);
                self.status = STATUS_COMPLETED.to_string();
                true
            }
            PushEvent::TransactionError(payload) => {
                self.error = payload.error.clone();
                self.status = STATUS_ERROR.to_string();
                self.last_updated = Some(at);
                true
            }
            PushEvent::WalletUpdate { .. }
            | PushEvent::ProcessCompleted { .. }
            | PushEvent::Unknown { .. } => false,
        }
    }

    /// Start a state from an event when none was fetched.
    pub fn from_event(event: &PushEvent, at: DateTime<Utc>) -> Option<Self> {
        let mut state = Self::default();
        state.apply(event, at).then_some(state)
    }

    /// Present fields override, absent ones keep their previous value.
    fn merge(&mut self, patch: &TransactionPatch, at: DateTime<Utc>) {
        if let Some(kind) = &patch.kind {
            self.kind = Some(kind.clone());
        }
        if let Some(wallets) = &patch.processed_wallets {
            self.processed_wallets = wallets.clone();
        }
        if let Some(n) = patch.success_count {
            self.success_count = n;
        }
        if let Some(n) = patch.fail_count {
            self.fail_count = n;
        }
        if let Some(n) = patch.total_wallets {
            self.total_wallets = n;
        }
        for (key, value) in &patch.extra {
            self.merge_extra(key, value);
        }
        self.last_updated = Some(at);
    }

    fn merge_extra(&mut self, key: &str, value: &Value) {
        match key {
            "startTime" if value.is_null() => self.start_time = None,
            "details" if value.is_null() => self.details = None,
            "startTime" => match serde_json::from_value(value.clone()) {
                Ok(t) => self.start_time = Some(t),
                Err(e) => log::warn!("ignoring unparseable startTime {value}: {e}"),
            },
            "details" => match serde_json::from_value(value.clone()) {
                Ok(d) => self.details = Some(d),
                Err(e) => log::warn!("ignoring unparseable details {value}: {e}"),
            },
            "error" => self.error = value.as_str().map(str::to_string),
            // The reducer owns this field
            "lastUpdated" => {}
            _ => {
                self.extra.insert(key.to_string(), value.clone());
            }
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} wallets ({}%)",
            self.processed(),
            self.total_wallets,
            self.progress_percentage()
        )
    }
}
