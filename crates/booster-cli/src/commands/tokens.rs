//! Token views.

use std::io::Write;

use booster_client::Action;
use booster_core::TokenId;

use super::Console;
use crate::cli::TokensAction;
use crate::error::{Result, alert_for};
use crate::output;

pub(super) async fn run(console: &Console, action: &TokensAction, out: &mut dyn Write) -> Result<()> {
    match action {
        TokensAction::List => list(console, out).await,
        TokensAction::Add { address } => {
            let token = console
                .dashboard
                .add_token(address)
                .await
                .map_err(alert_for(Action::AddToken))?;
            writeln!(out, "Token added/active: {}", token.label())?;
            Ok(())
        }
        TokensAction::Activate { id } => {
            console
                .dashboard
                .activate_token(&TokenId::new(id.as_str()))
                .await
                .map_err(alert_for(Action::ActivateToken))?;
            writeln!(out, "Token activated.")?;
            Ok(())
        }
    }
}

pub(super) async fn list(console: &Console, out: &mut dyn Write) -> Result<()> {
    let tokens = console
        .dashboard
        .tokens()
        .await
        .map_err(alert_for(Action::ListTokens))?;
    write!(out, "{}", output::tokens(&tokens))?;
    Ok(())
}
