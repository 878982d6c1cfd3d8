//! Operator-facing operations.
//!
//! [`Dashboard`] ties the REST client to the session store. Every protected
//! operation checks for a session first and validates its input before any
//! request is made.

use std::sync::Arc;

use booster_core::routes::{self, Navigation, Route};
use booster_core::validation::{self, TimeRange, TradeAmounts};
use booster_core::{
    ActionAck, BurnResult, ChatId, CollectResult, GroupId, OrderDetail, ResumeResult, Session,
    SessionStore, Token, TokenId, TradeSide, TransactionState, WalletGroup,
};

use crate::api::BoosterApi;
use crate::error::Result;
use crate::wire::{LoginRequest, SignupRequest};

/// Active group and token shown on the home view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeView {
    /// Active wallet group, if any
    pub group: Option<WalletGroup>,
    /// Active token, if any
    pub token: Option<Token>,
}

/// A buy or sell the backend accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeStarted {
    /// Direction
    pub side: TradeSide,
    /// Group the orders were built from
    pub group: WalletGroup,
    /// One order per wallet
    pub details: Vec<OrderDetail>,
    /// Backend acknowledgement
    pub ack: ActionAck,
}

/// Session-aware facade over [`BoosterApi`].
#[derive(Clone)]
pub struct Dashboard {
    api: Arc<dyn BoosterApi>,
    sessions: Arc<dyn SessionStore>,
}

impl Dashboard {
    /// Creates a dashboard over an API and a session store.
    pub fn new(api: Arc<dyn BoosterApi>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { api, sessions }
    }

    /// The underlying API.
    pub fn api(&self) -> &Arc<dyn BoosterApi> {
        &self.api
    }

    // ------------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------------

    /// The stored session, if logged in.
    pub fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.sessions.load()?)
    }

    /// The stored session, or `NotAuthenticated` redirecting to `/login`.
    pub fn require_session(&self) -> Result<(Session, ChatId)> {
        let session = self
            .sessions
            .load()?
            .ok_or_else(booster_core::Error::not_authenticated)?;
        let chat_id = session
            .chat_key()
            .ok_or_else(|| booster_core::Error::session("Session has no chat id"))?;
        Ok((session, chat_id))
    }

    /// Route a view request through the login guard.
    pub fn navigate(&self, route: Route) -> Result<Navigation> {
        let session = self.sessions.load()?;
        Ok(routes::navigate(route, session.as_ref()))
    }

    /// Log in and persist the returned session.
    pub async fn login(&self, chat_id: &str, pin: Option<&str>) -> Result<Session> {
        let form = validation::login_form(chat_id, pin)?;
        let (request, key) = match form {
            validation::LoginForm::ChatId(chat_id) => (
                LoginRequest::ChatId {
                    chat_id: chat_id.clone(),
                },
                chat_id,
            ),
            validation::LoginForm::Credentials { username, password } => (
                LoginRequest::Credentials {
                    username: username.clone(),
                    password,
                },
                username,
            ),
        };

        let response = self.api.login(&request).await?;
        let mut session = response.user;
        if session.chat_key().is_none() {
            session.chat_id = Some(ChatId::new(key));
        }
        self.sessions.save(&session)?;
        tracing::info!(chat_id = ?session.chat_key(), "Logged in");
        Ok(session)
    }

    /// Create an account and persist the returned session.
    pub async fn signup(
        &self,
        chat_id: &str,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Session> {
        let form = validation::signup_form(chat_id, username, password, confirm_password)?;
        let request = SignupRequest {
            chat_id: form.chat_id.clone(),
            username: form.username,
            password: form.password,
        };

        let response = self.api.signup(&request).await?;
        let mut session = response.user;
        if session.chat_key().is_none() {
            session.chat_id = Some(ChatId::new(form.chat_id));
        }
        self.sessions.save(&session)?;
        tracing::info!(chat_id = ?session.chat_key(), "Registered");
        Ok(session)
    }

    /// Forget the session.
    pub fn logout(&self) -> Result<()> {
        self.sessions.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Groups and tokens
    // ------------------------------------------------------------------------

    /// Active group and token.
    pub async fn home(&self) -> Result<HomeView> {
        let (_, chat_id) = self.require_session()?;
        let group = self.api.active_wallet_group(&chat_id).await?;
        let token = self.api.active_token(&chat_id).await?;
        Ok(HomeView { group, token })
    }

    /// All wallet groups.
    pub async fn wallet_groups(&self) -> Result<Vec<WalletGroup>> {
        let (_, chat_id) = self.require_session()?;
        self.api.wallet_groups(&chat_id).await
    }

    /// Create a wallet group.
    pub async fn create_wallet_group(&self, name: &str) -> Result<WalletGroup> {
        let (_, chat_id) = self.require_session()?;
        let name = validation::group_name(name)?;
        let group = self.api.create_wallet_group(&chat_id, &name).await?;
        tracing::info!(group = %group.name, "Created wallet group");
        Ok(group)
    }

    /// Make a group the active one.
    pub async fn activate_wallet_group(&self, group_id: &GroupId) -> Result<ActionAck> {
        let (_, chat_id) = self.require_session()?;
        self.api.activate_wallet_group(&chat_id, group_id).await
    }

    /// One group with its wallets; the active group when `group_id` is `None`.
    pub async fn view_wallet_group(&self, group_id: Option<&GroupId>) -> Result<WalletGroup> {
        let (_, chat_id) = self.require_session()?;
        self.api.view_wallet_group(&chat_id, group_id).await
    }

    /// All registered tokens.
    pub async fn tokens(&self) -> Result<Vec<Token>> {
        let (_, chat_id) = self.require_session()?;
        self.api.tokens(&chat_id).await
    }

    /// Register a token by contract address.
    pub async fn add_token(&self, address: &str) -> Result<Token> {
        let (_, chat_id) = self.require_session()?;
        let address = validation::token_address(address)?;
        self.api.add_token(&chat_id, &address).await
    }

    /// Make a token the active one.
    pub async fn activate_token(&self, token_id: &TokenId) -> Result<ActionAck> {
        let (_, chat_id) = self.require_session()?;
        self.api.activate_token(&chat_id, token_id).await
    }

    // ------------------------------------------------------------------------
    // Batched operations
    // ------------------------------------------------------------------------

    /// Start distributing `amount` AMB to every wallet of the active group.
    pub async fn distribute(&self, amount: &str) -> Result<ActionAck> {
        let (_, chat_id) = self.require_session()?;
        let amount = validation::distribute_amount(amount)?;
        tracing::info!(amount = amount.as_str(), "Starting distribution");
        self.api.distribute(&chat_id, amount.as_str()).await
    }

    /// Collect all funds back into the first wallet.
    pub async fn collect(&self) -> Result<CollectResult> {
        let (_, chat_id) = self.require_session()?;
        self.api.collect(&chat_id).await
    }

    /// Burn `amount` of the active token from every wallet.
    pub async fn burn(&self, amount: &str) -> Result<BurnResult> {
        let (_, chat_id) = self.require_session()?;
        let amount = validation::burn_amount(amount)?;
        self.api.burn(&chat_id, amount.value()).await
    }

    /// Start buying the active token.
    pub async fn buy(&self, amounts: &TradeAmounts, min: f64, max: f64) -> Result<TradeStarted> {
        self.trade(TradeSide::Buy, amounts, min, max).await
    }

    /// Start selling the active token.
    pub async fn sell(&self, amounts: &TradeAmounts, min: f64, max: f64) -> Result<TradeStarted> {
        self.trade(TradeSide::Sell, amounts, min, max).await
    }

    /// Shared buy/sell flow: validate the delay range and the entered
    /// amounts, load the active group, build one order per wallet, then
    /// submit.
    pub async fn trade(
        &self,
        side: TradeSide,
        amounts: &TradeAmounts,
        min_delay_minutes: f64,
        max_delay_minutes: f64,
    ) -> Result<TradeStarted> {
        let (_, chat_id) = self.require_session()?;
        let time_range = TimeRange::new(min_delay_minutes, max_delay_minutes)?;
        amounts.validate(side)?;

        let group = self
            .api
            .active_wallet_group(&chat_id)
            .await?
            .ok_or_else(|| booster_core::Error::validation("No active wallet group found."))?;
        let details = validation::order_details(side, &group.wallets, amounts)?;

        tracing::info!(
            side = side.as_str(),
            group = %group.name,
            wallets = details.len(),
            min_delay = time_range.min_delay_minutes,
            max_delay = time_range.max_delay_minutes,
            "Starting trade"
        );
        let ack = match side {
            TradeSide::Buy => self.api.buy(&chat_id, &details, time_range).await?,
            TradeSide::Sell => self.api.sell(&chat_id, &details, time_range).await?,
        };
        Ok(TradeStarted {
            side,
            group,
            details,
            ack,
        })
    }

    // ------------------------------------------------------------------------
    // Transaction state and reports
    // ------------------------------------------------------------------------

    /// The latest resumable transaction, if any.
    pub async fn transaction_state(&self) -> Result<Option<TransactionState>> {
        let (_, chat_id) = self.require_session()?;
        self.api.transaction_state(&chat_id).await
    }

    /// Resume a paused transaction.
    pub async fn resume_transaction(&self) -> Result<ResumeResult> {
        let (_, chat_id) = self.require_session()?;
        self.api.resume_transaction(&chat_id).await
    }

    /// Usage report PDF for `from..=to` (`YYYY-MM-DD`).
    pub async fn usage_report(&self, from: Option<&str>, to: Option<&str>) -> Result<Vec<u8>> {
        let (session, chat_id) = self.require_session()?;
        let range = validation::report_range(from, to)?;
        self.api.usage_report(&chat_id, &range, &session.id).await
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard").finish_non_exhaustive()
    }
}
