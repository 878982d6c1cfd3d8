//! The backend's REST surface as a trait.
//!
//! [`HttpApi`](crate::http::HttpApi) talks to a live backend;
//! `MockApi` (behind the `test-util` feature) replays canned responses in tests.

use async_trait::async_trait;
use booster_core::validation::{ReportRange, TimeRange};
use booster_core::{
    ActionAck, BurnResult, ChatId, CollectResult, GroupId, OrderDetail, ResumeResult, Token,
    TokenId, TransactionState, WalletGroup,
};

use crate::error::Result;
use crate::wire::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};

/// One method per backend endpoint.
///
/// Every account-scoped call takes the chat id explicitly; the trait keeps no
/// session of its own.
#[async_trait]
pub trait BoosterApi: Send + Sync {
    /// `POST /login`
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse>;

    /// `POST /signup`
    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse>;

    /// `GET /wallet-groups`
    async fn wallet_groups(&self, chat_id: &ChatId) -> Result<Vec<WalletGroup>>;

    /// `GET /wallet-groups/active`; `None` when no group is active.
    async fn active_wallet_group(&self, chat_id: &ChatId) -> Result<Option<WalletGroup>>;

    /// `POST /create-wallet-group`
    async fn create_wallet_group(&self, chat_id: &ChatId, name: &str) -> Result<WalletGroup>;

    /// `POST /activate-wallet-group`
    async fn activate_wallet_group(&self, chat_id: &ChatId, group_id: &GroupId)
    -> Result<ActionAck>;

    /// `GET /view-wallet-group[/:id]`; the active group when `group_id` is `None`.
    async fn view_wallet_group(
        &self,
        chat_id: &ChatId,
        group_id: Option<&GroupId>,
    ) -> Result<WalletGroup>;

    /// `GET /tokens`
    async fn tokens(&self, chat_id: &ChatId) -> Result<Vec<Token>>;

    /// `GET /tokens/active`; `None` when no token is active.
    async fn active_token(&self, chat_id: &ChatId) -> Result<Option<Token>>;

    /// `POST /add-token`
    async fn add_token(&self, chat_id: &ChatId, token_address: &str) -> Result<Token>;

    /// `POST /activate-token`
    async fn activate_token(&self, chat_id: &ChatId, token_id: &TokenId) -> Result<ActionAck>;

    /// `POST /distribute`; progress follows on the push channel.
    async fn distribute(&self, chat_id: &ChatId, amount: &str) -> Result<ActionAck>;

    /// `POST /collect`
    async fn collect(&self, chat_id: &ChatId) -> Result<CollectResult>;

    /// `POST /burn`
    async fn burn(&self, chat_id: &ChatId, burn_amount: f64) -> Result<BurnResult>;

    /// `POST /buy`; progress follows on the push channel.
    async fn buy(
        &self,
        chat_id: &ChatId,
        details: &[OrderDetail],
        time_range: TimeRange,
    ) -> Result<ActionAck>;

    /// `POST /sell`; progress follows on the push channel.
    async fn sell(
        &self,
        chat_id: &ChatId,
        details: &[OrderDetail],
        time_range: TimeRange,
    ) -> Result<ActionAck>;

    /// `GET /transaction-state`
    async fn transaction_state(&self, chat_id: &ChatId) -> Result<Option<TransactionState>>;

    /// `POST /resume-transaction`
    async fn resume_transaction(&self, chat_id: &ChatId) -> Result<ResumeResult>;

    /// `POST /usage-report`; returns the PDF bytes.
    async fn usage_report(
        &self,
        chat_id: &ChatId,
        range: &ReportRange,
        user_id: &str,
    ) -> Result<Vec<u8>>;
}
