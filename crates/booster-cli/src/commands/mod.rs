//! Command dispatch.
//!
//! [`Console`] bundles the dashboard service and the push channel; each
//! submodule implements the views of one area on top of it.

mod actions;
mod auth;
mod groups;
mod report;
mod tokens;
mod tx;
mod views;

use std::io::Write;
use std::sync::Arc;

use booster_client::{BoosterApi, Dashboard, HttpApi, PushChannel, Subscription};
use booster_core::SessionStore;

use crate::cli::{Cli, Command};
use crate::config::BoosterConfig;
use crate::config_handlers::handle_config_command;
use crate::error::Result;

/// Services a command runs against.
#[derive(Debug, Clone)]
pub struct Console {
    dashboard: Dashboard,
    push: PushChannel,
}

impl Console {
    /// Console over explicit services.
    pub fn new(dashboard: Dashboard, push: PushChannel) -> Self {
        Self { dashboard, push }
    }

    /// Console for a live backend as configured.
    pub fn from_config(config: &BoosterConfig) -> Result<Self> {
        let sessions = Arc::new(config.session_store()?);
        let bearer = match sessions.load() {
            Ok(session) => session.and_then(|s| s.token),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable session for authorization");
                None
            }
        };

        let api: Arc<dyn BoosterApi> = Arc::new(
            HttpApi::new(&config.api.base_url, config.api_timeout())?.with_bearer(bearer),
        );
        let push = PushChannel::new(config.push.url.clone(), config.push_timeout());
        Ok(Self::new(Dashboard::new(api, sessions), push))
    }

    /// The dashboard service.
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Join the operator's push room, or explain why live updates are off.
    async fn subscribe(&self, out: &mut dyn Write) -> Result<Option<Subscription>> {
        let (session, chat_id) = self.dashboard.require_session()?;
        match self.push.subscribe(&chat_id, session.token.as_deref()).await {
            Ok(subscription) => Ok(Some(subscription)),
            Err(e) => {
                tracing::warn!(error = %e, "Push channel unavailable");
                writeln!(out, "Live updates unavailable: {e}")?;
                Ok(None)
            }
        }
    }

    /// Run one view.
    pub async fn run(&self, command: &Command, out: &mut dyn Write) -> Result<()> {
        match command {
            Command::Login { chat_id, pin } => auth::login(self, chat_id, pin.as_deref(), out).await,
            Command::Signup {
                chat_id,
                username,
                password,
                confirm_password,
            } => auth::signup(self, chat_id, username, password, confirm_password, out).await,
            Command::Logout => auth::logout(self, out),
            Command::Whoami => auth::whoami(self, out),
            Command::Home => views::home(self, out).await,
            Command::Menu => views::menu(out),
            Command::Help => views::help(out),
            Command::Go { path } => views::go(self, path, out).await,
            Command::Groups { action } => groups::run(self, action, out).await,
            Command::Tokens { action } => tokens::run(self, action, out).await,
            Command::Distribute { amount, watch } => {
                actions::distribute(self, amount, *watch, out).await
            }
            Command::Collect => actions::collect(self, out).await,
            Command::Burn { amount } => actions::burn(self, amount, out).await,
            Command::Buy(args) => {
                actions::trade(self, booster_core::TradeSide::Buy, args, out).await
            }
            Command::Sell(args) => {
                actions::trade(self, booster_core::TradeSide::Sell, args, out).await
            }
            Command::Tx { action } => tx::run(self, action, out).await,
            Command::Report { from, to, output } => {
                report::usage_report(self, from.as_deref(), to.as_deref(), output.as_deref(), out)
                    .await
            }
            Command::Config { .. } => Err(crate::error::Error::alert(
                "config commands do not need a backend",
            )),
        }
    }
}

/// Run the parsed command line.
pub async fn execute(cli: &Cli, config: &BoosterConfig, out: &mut dyn Write) -> Result<()> {
    if let Command::Config { action } = &cli.command {
        return Ok(handle_config_command(cli.config.as_deref(), action, out)?);
    }
    let console = Console::from_config(config)?;
    console.run(&cli.command, out).await
}
