//! In-memory [`BoosterApi`] for tests.
//!
//! Replies are queued per endpoint and served in order; the last reply for
//! an endpoint keeps being served once its queue is down to one entry. Every
//! call is recorded with its JSON body so tests can assert that validation
//! failures made no request at all.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use booster_core::validation::{ReportRange, TimeRange};
use booster_core::{
    ActionAck, BurnResult, ChatId, CollectResult, GroupId, OrderDetail, ResumeResult, Token,
    TokenId, TransactionState, WalletGroup,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::api::BoosterApi;
use crate::error::{Error, Result};
use crate::wire::{
    ActivateGroupRequest, ActivateTokenRequest, AddTokenRequest, BurnRequest, BuyRequest,
    ChatRequest, CreateGroupRequest, CreateGroupResponse, DistributeRequest, LoginRequest,
    LoginResponse, SellRequest, SignupRequest, SignupResponse, TransactionStateResponse,
    UsageReportRequest,
};

/// A canned reply.
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Success with a JSON body
    Json(Value),
    /// Success with raw bytes (the usage report)
    Bytes(Vec<u8>),
    /// Non-success status with an optional `error` text
    Status {
        /// Status code
        status: u16,
        /// Backend error text
        error: Option<String>,
    },
    /// No response at all
    Unreachable,
}

impl MockReply {
    /// `400` with `{"error": message}`.
    pub fn error(message: impl Into<String>) -> Self {
        MockReply::Status {
            status: 400,
            error: Some(message.into()),
        }
    }
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Endpoint path without the base (`wallet-groups/active`)
    pub endpoint: String,
    /// Chat id from the query string, for GETs
    pub chat_id: Option<ChatId>,
    /// JSON body, `Null` for GETs
    pub body: Value,
}

/// Scriptable API double.
#[derive(Debug, Default)]
pub struct MockApi {
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockApi {
    /// An API with no replies queued; every call fails with `501`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `endpoint`.
    pub fn with_reply(self, endpoint: &str, reply: MockReply) -> Self {
        self.push_reply(endpoint, reply);
        self
    }

    /// Queue a JSON success for `endpoint`.
    pub fn with_json(self, endpoint: &str, body: Value) -> Self {
        self.with_reply(endpoint, MockReply::Json(body))
    }

    /// Queue a reply on a shared instance.
    pub fn push_reply(&self, endpoint: &str, reply: MockReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies
                .entry(endpoint.to_string())
                .or_default()
                .push_back(reply);
        }
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Calls made to one endpoint.
    pub fn calls_to(&self, endpoint: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.endpoint == endpoint)
            .collect()
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    fn record(&self, endpoint: &str, chat_id: Option<&ChatId>, body: Value) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                endpoint: endpoint.to_string(),
                chat_id: chat_id.cloned(),
                body,
            });
        }
    }

    fn next_reply(&self, endpoint: &str) -> Option<MockReply> {
        let mut replies = self.replies.lock().ok()?;
        let queue = replies.get_mut(endpoint)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }

    fn reply(&self, endpoint: &str, chat_id: Option<&ChatId>, body: Value) -> Result<MockReply> {
        self.record(endpoint, chat_id, body);
        match self.next_reply(endpoint) {
            None => Err(Error::Http {
                status: 501,
                message: Some(format!("no mock reply for {endpoint}")),
            }),
            Some(MockReply::Status { status, error }) => Err(Error::Http {
                status,
                message: error,
            }),
            Some(MockReply::Unreachable) => Err(Error::network("connection refused")),
            Some(other) => Ok(other),
        }
    }

    fn json_reply<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        chat_id: Option<&ChatId>,
        body: Value,
    ) -> Result<T> {
        let value = match self.reply(endpoint, chat_id, body)? {
            MockReply::Json(value) => value,
            MockReply::Bytes(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| Error::decode(endpoint, e.to_string()))?,
            MockReply::Status { .. } | MockReply::Unreachable => Value::Null,
        };
        serde_json::from_value(value).map_err(|e| Error::decode(endpoint, e.to_string()))
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &str, chat_id: &ChatId) -> Result<T> {
        self.json_reply(endpoint, Some(chat_id), Value::Null)
    }

    fn post<B: Serialize, T: DeserializeOwned>(&self, endpoint: &str, body: &B) -> Result<T> {
        let body = serde_json::to_value(body).map_err(booster_core::Error::from)?;
        self.json_reply(endpoint, None, body)
    }
}

#[async_trait]
impl BoosterApi for MockApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.post("login", request)
    }

    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse> {
        self.post("signup", request)
    }

    async fn wallet_groups(&self, chat_id: &ChatId) -> Result<Vec<WalletGroup>> {
        self.get("wallet-groups", chat_id)
    }

    async fn active_wallet_group(&self, chat_id: &ChatId) -> Result<Option<WalletGroup>> {
        self.get("wallet-groups/active", chat_id)
    }

    async fn create_wallet_group(&self, chat_id: &ChatId, name: &str) -> Result<WalletGroup> {
        let body = CreateGroupRequest {
            chat_id,
            group_name: name,
        };
        let response: CreateGroupResponse = self.post("create-wallet-group", &body)?;
        Ok(response.into_group())
    }

    async fn activate_wallet_group(
        &self,
        chat_id: &ChatId,
        group_id: &GroupId,
    ) -> Result<ActionAck> {
        self.post(
            "activate-wallet-group",
            &ActivateGroupRequest { chat_id, group_id },
        )
    }

    async fn view_wallet_group(
        &self,
        chat_id: &ChatId,
        group_id: Option<&GroupId>,
    ) -> Result<WalletGroup> {
        match group_id {
            Some(id) => self.get(&format!("view-wallet-group/{id}"), chat_id),
            None => self.get("view-wallet-group", chat_id),
        }
    }

    async fn tokens(&self, chat_id: &ChatId) -> Result<Vec<Token>> {
        self.get("tokens", chat_id)
    }

    async fn active_token(&self, chat_id: &ChatId) -> Result<Option<Token>> {
        self.get("tokens/active", chat_id)
    }

    async fn add_token(&self, chat_id: &ChatId, token_address: &str) -> Result<Token> {
        self.post(
            "add-token",
            &AddTokenRequest {
                chat_id,
                token_address,
            },
        )
    }

    async fn activate_token(&self, chat_id: &ChatId, token_id: &TokenId) -> Result<ActionAck> {
        self.post("activate-token", &ActivateTokenRequest { chat_id, token_id })
    }

    async fn distribute(&self, chat_id: &ChatId, amount: &str) -> Result<ActionAck> {
        self.post("distribute", &DistributeRequest { chat_id, amount })
    }

    async fn collect(&self, chat_id: &ChatId) -> Result<CollectResult> {
        self.post("collect", &ChatRequest { chat_id })
    }

    async fn burn(&self, chat_id: &ChatId, burn_amount: f64) -> Result<BurnResult> {
        self.post(
            "burn",
            &BurnRequest {
                chat_id,
                burn_amount,
            },
        )
    }

    async fn buy(
        &self,
        chat_id: &ChatId,
        details: &[OrderDetail],
        time_range: TimeRange,
    ) -> Result<ActionAck> {
        self.post(
            "buy",
            &BuyRequest {
                chat_id,
                buy_details: details,
                time_range,
            },
        )
    }

    async fn sell(
        &self,
        chat_id: &ChatId,
        details: &[OrderDetail],
        time_range: TimeRange,
    ) -> Result<ActionAck> {
        self.post(
            "sell",
            &SellRequest {
                chat_id,
                sell_details: details,
                time_range,
            },
        )
    }

    async fn transaction_state(&self, chat_id: &ChatId) -> Result<Option<TransactionState>> {
        let response: TransactionStateResponse = self.get("transaction-state", chat_id)?;
        Ok(response.transaction_state)
    }

    async fn resume_transaction(&self, chat_id: &ChatId) -> Result<ResumeResult> {
        self.post("resume-transaction", &ChatRequest { chat_id })
    }

    async fn usage_report(
        &self,
        chat_id: &ChatId,
        range: &ReportRange,
        user_id: &str,
    ) -> Result<Vec<u8>> {
        let body = serde_json::to_value(UsageReportRequest {
            chat_id,
            from_date: range.from_param(),
            to_date: range.to_param(),
            user_id,
        })
        .map_err(booster_core::Error::from)?;
        match self.reply("usage-report", None, body)? {
            MockReply::Bytes(bytes) => Ok(bytes),
            MockReply::Json(value) => Ok(value.to_string().into_bytes()),
            MockReply::Status { .. } | MockReply::Unreachable => Ok(Vec::new()),
        }
    }
}

/// A backend user record as returned by login/signup.
pub fn user_json(chat_id: &str) -> Value {
    json!({
        "_id": format!("user-{chat_id}"),
        "chatId": chat_id,
        "activeWalletGroupId": "g1",
        "activeTokenId": "t1"
    })
}

/// A wallet group with `wallets` addresses.
pub fn group_json(id: &str, name: &str, wallets: &[&str]) -> Value {
    json!({
        "_id": id,
        "name": name,
        "isActive": true,
        "wallets": wallets.iter().map(|a| json!({"address": a})).collect::<Vec<_>>()
    })
}
