//! reqwest implementation of [`BoosterApi`].

use std::time::Duration;

use async_trait::async_trait;
use booster_core::validation::{ReportRange, TimeRange};
use booster_core::{
    ActionAck, BurnResult, ChatId, CollectResult, GroupId, OrderDetail, ResumeResult, Token,
    TokenId, TransactionState, WalletGroup,
};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::BoosterApi;
use crate::error::{Error, Result};
use crate::wire::{
    ActivateGroupRequest, ActivateTokenRequest, AddTokenRequest, BurnRequest, BuyRequest,
    ChatRequest, CreateGroupRequest, CreateGroupResponse, DistributeRequest, ErrorBody,
    LoginRequest, LoginResponse, SellRequest, SignupRequest, SignupResponse,
    TransactionStateResponse, UsageReportRequest,
};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for a live backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
    bearer: Option<String>,
}

impl HttpApi {
    /// Client for `base_url` (e.g. `http://localhost:5080/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url).map_err(|e| {
            booster_core::Error::config(format!("Invalid API URL '{base_url}': {e}"))
        })?;
        if base.cannot_be_a_base() {
            return Err(booster_core::Error::config(format!(
                "Invalid API URL '{base_url}': not a base URL"
            ))
            .into());
        }
        // Endpoint paths are appended as segments
        let trimmed = base.path().trim_end_matches('/').to_string();
        base.set_path(&trimmed);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base,
            bearer: None,
        })
    }

    /// Send `Authorization: Bearer <token>` on every request.
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token.filter(|t| !t.is_empty());
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/<segments...>[?chatId=..]`
    fn url(&self, segments: &[&str], chat_id: Option<&ChatId>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| booster_core::Error::config("API URL cannot take a path"))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if let Some(chat_id) = chat_id {
            url.query_pairs_mut().append_pair("chatId", chat_id.as_str());
        }
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send and turn non-success statuses into [`Error::Http`].
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Vec<u8>> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message);
            tracing::warn!(
                endpoint,
                status = status.as_u16(),
                message = message.as_deref().unwrap_or(""),
                "Backend returned an error"
            );
            return Err(Error::Http {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(endpoint, status = status.as_u16(), bytes = body.len(), "Response");
        Ok(body.to_vec())
    }

    fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<T> {
        serde_json::from_slice(body).map_err(|e| Error::decode(endpoint, e.to_string()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        chat_id: &ChatId,
    ) -> Result<T> {
        let endpoint = segments.join("/");
        let url = self.url(segments, Some(chat_id))?;
        tracing::debug!(endpoint = %endpoint, "GET");
        let body = self.send(self.client.get(url), &endpoint).await?;
        Self::decode(&endpoint, &body)
    }

    /// GET for "active" lookups: `null` or 404 mean nothing is active.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        chat_id: &ChatId,
    ) -> Result<Option<T>> {
        match self.get::<Option<T>>(segments, chat_id).await {
            Err(Error::Http { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => Ok(None),
            other => other,
        }
    }

    async fn post_raw<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<Vec<u8>> {
        let url = self.url(&[endpoint], None)?;
        tracing::debug!(endpoint, "POST");
        self.send(self.client.post(url).json(body), endpoint).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let bytes = self.post_raw(endpoint, body).await?;
        Self::decode(endpoint, &bytes)
    }

    /// POST whose reply may be empty.
    async fn post_ack<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Result<ActionAck> {
        let bytes = self.post_raw(endpoint, body).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ActionAck::default());
        }
        Self::decode(endpoint, &bytes)
    }
}

#[async_trait]
impl BoosterApi for HttpApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.post("login", request).await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse> {
        self.post("signup", request).await
    }

    async fn wallet_groups(&self, chat_id: &ChatId) -> Result<Vec<WalletGroup>> {
        self.get(&["wallet-groups"], chat_id).await
    }

    async fn active_wallet_group(&self, chat_id: &ChatId) -> Result<Option<WalletGroup>> {
        self.get_optional(&["wallet-groups", "active"], chat_id).await
    }

    async fn create_wallet_group(&self, chat_id: &ChatId, name: &str) -> Result<WalletGroup> {
        let body = CreateGroupRequest {
            chat_id,
            group_name: name,
        };
        let response: CreateGroupResponse = self.post("create-wallet-group", &body).await?;
        Ok(response.into_group())
    }

    async fn activate_wallet_group(
        &self,
        chat_id: &ChatId,
        group_id: &GroupId,
    ) -> Result<ActionAck> {
        self.post_ack("activate-wallet-group", &ActivateGroupRequest { chat_id, group_id })
            .await
    }

    async fn view_wallet_group(
        &self,
        chat_id: &ChatId,
        group_id: Option<&GroupId>,
    ) -> Result<WalletGroup> {
        match group_id {
            Some(id) => self.get(&["view-wallet-group", id.as_str()], chat_id).await,
            None => self.get(&["view-wallet-group"], chat_id).await,
        }
    }

    async fn tokens(&self, chat_id: &ChatId) -> Result<Vec<Token>> {
        self.get(&["tokens"], chat_id).await
    }

    async fn active_token(&self, chat_id: &ChatId) -> Result<Option<Token>> {
        self.get_optional(&["tokens", "active"], chat_id).await
    }

    async fn add_token(&self, chat_id: &ChatId, token_address: &str) -> Result<Token> {
        self.post(
            "add-token",
            &AddTokenRequest {
                chat_id,
                token_address,
            },
        )
        .await
    }

    async fn activate_token(&self, chat_id: &ChatId, token_id: &TokenId) -> Result<ActionAck> {
        self.post_ack("activate-token", &ActivateTokenRequest { chat_id, token_id })
            .await
    }

    async fn distribute(&self, chat_id: &ChatId, amount: &str) -> Result<ActionAck> {
        self.post_ack("distribute", &DistributeRequest { chat_id, amount })
            .await
    }

    async fn collect(&self, chat_id: &ChatId) -> Result<CollectResult> {
        self.post("collect", &ChatRequest { chat_id }).await
    }

    async fn burn(&self, chat_id: &ChatId, burn_amount: f64) -> Result<BurnResult> {
        self.post(
            "burn",
            &BurnRequest {
                chat_id,
                burn_amount,
            },
        )
        .await
    }

    async fn buy(
        &self,
        chat_id: &ChatId,
        details: &[OrderDetail],
        time_range: TimeRange,
    ) -> Result<ActionAck> {
        let body = BuyRequest {
            chat_id,
            buy_details: details,
            time_range,
        };
        self.post_ack("buy", &body).await
    }

    async fn sell(
        &self,
        chat_id: &ChatId,
        details: &[OrderDetail],
        time_range: TimeRange,
    ) -> Result<ActionAck> {
        let body = SellRequest {
            chat_id,
            sell_details: details,
            time_range,
        };
        self.post_ack("sell", &body).await
    }

    async fn transaction_state(&self, chat_id: &ChatId) -> Result<Option<TransactionState>> {
        let response: TransactionStateResponse =
            self.get(&["transaction-state"], chat_id).await?;
        Ok(response.transaction_state)
    }

    async fn resume_transaction(&self, chat_id: &ChatId) -> Result<ResumeResult> {
        let bytes = self.post_raw("resume-transaction", &ChatRequest { chat_id }).await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(ResumeResult::default());
        }
        Self::decode("resume-transaction", &bytes)
    }

    async fn usage_report(
        &self,
        chat_id: &ChatId,
        range: &ReportRange,
        user_id: &str,
    ) -> Result<Vec<u8>> {
        let body = UsageReportRequest {
            chat_id,
            from_date: range.from_param(),
            to_date: range.to_param(),
            user_id,
        };
        let pdf = self.post_raw("usage-report", &body).await?;
        tracing::info!(bytes = pdf.len(), "Usage report received");
        Ok(pdf)
    }
}
