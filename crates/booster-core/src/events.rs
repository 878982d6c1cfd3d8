//! Typed push-channel events.
//!
//! The backend emits named events into a room keyed by chat id. Names are
//! mapped onto [`PushEvent`] here; the transport lives in `booster-client`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::{ProcessKind, ProcessSummary, TxUpdate};

/// `transactionUpdate`
pub const TRANSACTION_UPDATE: &str = "transactionUpdate";
/// `transactionCompleted`
pub const TRANSACTION_COMPLETED: &str = "transactionCompleted";
/// `transactionError`
pub const TRANSACTION_ERROR: &str = "transactionError";

/// Partial transaction-state payload carried by `transactionUpdate` and
/// `transactionCompleted`.
///
/// Every field is optional: absent fields leave the previous value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    /// Operation type (`distribute`, `buy`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Status text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Wallets processed so far
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_wallets: Option<Vec<Value>>,
    /// Successful wallets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_count: Option<u64>,
    /// Failed wallets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_count: Option<u64>,
    /// Wallets in the batch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_wallets: Option<u64>,
    /// Any other field, merged into the state as-is
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of `transactionError`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Error text
    #[serde(default)]
    pub error: Option<String>,
}

/// An event received on the push channel.
#[derive(Debug, Clone, PartialEq)]
pub enum PushEvent {
    /// Progress of the resumable transaction process
    TransactionUpdate(TransactionPatch),
    /// The resumable transaction process finished
    TransactionCompleted(TransactionPatch),
    /// The resumable transaction process failed
    TransactionError(ErrorPayload),
    /// One wallet of a distribute/buy/sell batch finished
    WalletUpdate {
        /// Which batch
        kind: ProcessKind,
        /// Outcome for the wallet
        update: TxUpdate,
    },
    /// A distribute/buy/sell batch finished
    ProcessCompleted {
        /// Which batch
        kind: ProcessKind,
        /// Aggregate counts
        summary: ProcessSummary,
    },
    /// Any event name this client does not know
    Unknown {
        /// Event name
        name: String,
        /// Raw payload
        payload: Value,
    },
}

const PROCESS_KINDS: [ProcessKind; 3] = [
    ProcessKind::Distribute,
    ProcessKind::Buy,
    ProcessKind::Sell,
];

impl PushEvent {
    /// Decode a named event.
    ///
    /// Unknown names decode to [`PushEvent::Unknown`]; a known name with a
    /// malformed payload is an error.
    pub fn decode(name: &str, payload: Value) -> Result<PushEvent> {
        let event = match name {
            TRANSACTION_UPDATE => PushEvent::TransactionUpdate(serde_json::from_value(payload)?),
            TRANSACTION_COMPLETED => {
                PushEvent::TransactionCompleted(serde_json::from_value(payload)?)
            }
            TRANSACTION_ERROR => PushEvent::TransactionError(serde_json::from_value(payload)?),
            other => match Self::process_event(other) {
                Some((kind, false)) => PushEvent::WalletUpdate {
                    kind,
                    update: serde_json::from_value(payload)?,
                },
                Some((kind, true)) => PushEvent::ProcessCompleted {
                    kind,
                    summary: serde_json::from_value(payload)?,
                },
                None => PushEvent::Unknown {
                    name: other.to_string(),
                    payload,
                },
            },
        };
        Ok(event)
    }

    /// Wire name of this event.
    pub fn name(&self) -> String {
        match self {
            PushEvent::TransactionUpdate(_) => TRANSACTION_UPDATE.to_string(),
            PushEvent::TransactionCompleted(_) => TRANSACTION_COMPLETED.to_string(),
            PushEvent::TransactionError(_) => TRANSACTION_ERROR.to_string(),
            PushEvent::WalletUpdate { kind, .. } => {
                format!("{}TransactionUpdate", kind.event_prefix())
            }
            PushEvent::ProcessCompleted { kind, .. } => {
                format!("{}ProcessCompleted", kind.event_prefix())
            }
            PushEvent::Unknown { name, .. } => name.clone(),
        }
    }

    /// Match `buyTransactionUpdate` / `sellProcessCompleted` style names.
    ///
    /// Returns the kind and whether it is the completion event.
    fn process_event(name: &str) -> Option<(ProcessKind, bool)> {
        PROCESS_KINDS.iter().find_map(|kind| {
            let rest = name.strip_prefix(kind.event_prefix())?;
            match rest {
                "TransactionUpdate" => Some((*kind, false)),
                "ProcessCompleted" => Some((*kind, true)),
                _ => None,
            }
        })
    }
}
