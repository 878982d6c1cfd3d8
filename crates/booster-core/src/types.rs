//! Domain types exchanged with the backend.
//!
//! Field names follow the backend's JSON (`_id`, camelCase); unknown fields
//! are ignored unless a type says otherwise.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::ids::{GroupId, TokenId};

// ============================================================================
// Wallet groups and tokens
// ============================================================================

/// A single custodied wallet inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Public address
    pub address: String,

    /// Private key, only present when the backend chooses to reveal it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl Wallet {
    /// Private key for display, `Hidden` when withheld.
    pub fn private_key_display(&self) -> &str {
        self.private_key.as_deref().unwrap_or("Hidden")
    }
}

/// A named collection of wallets managed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletGroup {
    /// Backend id (absent on some detail views)
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<GroupId>,

    /// Display name
    pub name: String,

    /// Whether this is the account's active group
    #[serde(rename = "isActive", default)]
    pub is_active: bool,

    /// Member wallets
    #[serde(default)]
    pub wallets: Vec<Wallet>,
}

/// A token registered for trading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Backend id
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TokenId>,

    /// Token name
    #[serde(default)]
    pub name: String,

    /// Ticker symbol
    #[serde(default)]
    pub symbol: String,

    /// Contract address
    #[serde(alias = "tokenAddress", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Whether this is the account's active token
    #[serde(rename = "isActive", default)]
    pub is_active: bool,
}

impl Token {
    /// `SYMBOL (Name)` as shown in listings.
    pub fn label(&self) -> String {
        format!("{} ({})", self.symbol, self.name)
    }
}

// ============================================================================
// Batched operations
// ============================================================================

/// The batched operations that report progress over the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessKind {
    /// Native coin distribution from the first wallet to the rest
    Distribute,
    /// Randomized token buys
    Buy,
    /// Randomized token sells
    Sell,
}

impl ProcessKind {
    /// Push-event name prefix (`buy` → `buyTransactionUpdate`).
    pub fn event_prefix(&self) -> &'static str {
        match self {
            ProcessKind::Distribute => "distribute",
            ProcessKind::Buy => "buy",
            ProcessKind::Sell => "sell",
        }
    }

    /// Sentence used when the process finishes.
    pub fn completion_label(&self) -> &'static str {
        match self {
            ProcessKind::Distribute => "Distribution process completed.",
            ProcessKind::Buy => "Buy process completed.",
            ProcessKind::Sell => "Sell process completed.",
        }
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_prefix())
    }
}

/// Direction of a randomized trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeSide {
    /// Buy the active token
    Buy,
    /// Sell the active token
    Sell,
}

impl TradeSide {
    /// The progress stream this side reports on.
    pub fn process_kind(&self) -> ProcessKind {
        match self {
            TradeSide::Buy => ProcessKind::Buy,
            TradeSide::Sell => ProcessKind::Sell,
        }
    }

    /// Lowercase verb (`buy` / `sell`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

/// One wallet's share of a buy or sell request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    /// Wallet that trades
    pub wallet_address: String,
    /// Amount as entered (validated, trimmed)
    pub amount: String,
}

/// Status reported for one wallet's transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TxStatus {
    /// Transaction confirmed
    Success,
    /// Transaction was sent but failed
    Failed,
    /// The backend hit an error for this wallet
    Error,
    /// Any other backend status (`pending`, `in_progress`, ...)
    Other(String),
}

impl TxStatus {
    /// Wire form of the status.
    pub fn as_str(&self) -> &str {
        match self {
            TxStatus::Success => "success",
            TxStatus::Failed => "failed",
            TxStatus::Error => "error",
            TxStatus::Other(s) => s,
        }
    }
}

impl From<String> for TxStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "success" => TxStatus::Success,
            "failed" => TxStatus::Failed,
            "error" => TxStatus::Error,
            _ => TxStatus::Other(s),
        }
    }
}

impl From<TxStatus> for String {
    fn from(status: TxStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-wallet progress event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxUpdate {
    /// Wallet address the update is about
    #[serde(default)]
    pub wallet: String,

    /// Outcome for that wallet
    pub status: TxStatus,

    /// Transaction hash when one was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,

    /// Amount moved; the backend sends either a number or a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Value>,

    /// Error text for failed wallets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate counts sent when a batched process finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummary {
    /// Wallets that succeeded
    #[serde(default)]
    pub success_count: u64,
    /// Wallets that failed
    #[serde(default)]
    pub fail_count: u64,
}

/// Result of collecting funds back into the first wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectResult {
    /// Wallets that transferred successfully
    #[serde(default)]
    pub success_count: u64,
    /// Wallets that failed
    #[serde(default)]
    pub fail_count: u64,
    /// Total AMB collected, number or string as the backend sends it
    #[serde(default)]
    pub total_collected: Value,
}

/// Result of a burn across the group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnResult {
    /// Wallets that burned successfully
    #[serde(default)]
    pub success_count: u64,
    /// Wallets that failed
    #[serde(default)]
    pub fail_count: u64,
}

/// Acknowledgement for operations whose outcome arrives over the push channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionAck {
    /// Optional message from the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Anything else the backend returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Outcome of resuming a paused transaction process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResult {
    /// Optional message from the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Wallets that succeeded during the resumed run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_count: Option<u64>,
    /// Wallets that failed during the resumed run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_count: Option<u64>,
}

/// Render a loosely-typed JSON scalar the way the backend meant it.
///
/// Strings lose their quotes, `null` becomes empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
