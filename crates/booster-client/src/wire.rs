//! Request bodies and response envelopes of the REST API.

use booster_core::validation::TimeRange;
use booster_core::{ChatId, GroupId, OrderDetail, Session, TokenId, TransactionState, WalletGroup};
use serde::{Deserialize, Serialize};

/// `POST /login`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoginRequest {
    /// Chat-id login
    ChatId {
        /// Account key
        #[serde(rename = "chatId")]
        chat_id: String,
    },
    /// Username/password login
    Credentials {
        /// Account name
        username: String,
        /// Pin or password
        password: String,
    },
}

/// `POST /login` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    /// Greeting from the backend
    #[serde(default)]
    pub message: Option<String>,
    /// The account
    pub user: Session,
}

/// `POST /signup`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    /// Account key
    pub chat_id: String,
    /// Account name
    pub username: String,
    /// Password
    pub password: String,
}

/// `POST /signup` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignupResponse {
    /// The new account
    pub user: Session,
}

/// Body carrying only the chat id (`/collect`, `/resume-transaction`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
}

/// `POST /create-wallet-group`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
    /// Name of the new group
    pub group_name: &'a str,
}

/// Create-group response: either the group or `{walletGroup: ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CreateGroupResponse {
    /// Wrapped form
    Wrapped {
        /// The group
        #[serde(rename = "walletGroup")]
        wallet_group: WalletGroup,
    },
    /// Bare form
    Bare(WalletGroup),
}

impl CreateGroupResponse {
    /// The created group, whichever form it came in.
    pub fn into_group(self) -> WalletGroup {
        match self {
            CreateGroupResponse::Wrapped { wallet_group } => wallet_group,
            CreateGroupResponse::Bare(group) => group,
        }
    }
}

/// `POST /activate-wallet-group`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateGroupRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
    /// Group to activate
    pub group_id: &'a GroupId,
}

/// `POST /add-token`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTokenRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
    /// Contract address
    pub token_address: &'a str,
}

/// `POST /activate-token`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateTokenRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
    /// Token to activate
    pub token_id: &'a TokenId,
}

/// `POST /distribute`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributeRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
    /// Per-wallet amount, as entered
    pub amount: &'a str,
}

/// `POST /burn`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
    /// Amount to burn per wallet
    pub burn_amount: f64,
}

/// `POST /buy`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
    /// One entry per wallet
    pub buy_details: &'a [OrderDetail],
    /// Delay bounds
    pub time_range: TimeRange,
}

/// `POST /sell`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
    /// One entry per wallet
    pub sell_details: &'a [OrderDetail],
    /// Delay bounds
    pub time_range: TimeRange,
}

/// `GET /transaction-state` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStateResponse {
    /// Latest state, `null` when nothing is pending
    #[serde(default)]
    pub transaction_state: Option<TransactionState>,
}

/// `POST /usage-report`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReportRequest<'a> {
    /// Account key
    pub chat_id: &'a ChatId,
    /// `YYYY-MM-DD`
    pub from_date: String,
    /// `YYYY-MM-DD`
    pub to_date: String,
    /// Backend user id
    #[serde(rename = "userID")]
    pub user_id: &'a str,
}

/// Error body returned by the backend on failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// The `error` field, else `message`.
    pub(crate) fn into_message(self) -> Option<String> {
        self.error.or(self.message).filter(|m| !m.is_empty())
    }
}
