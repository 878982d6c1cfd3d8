//! Login, signup, logout and session display.

use std::io::Write;

use booster_client::Action;

use super::Console;
use crate::error::{Result, alert_for};
use crate::output;

pub(super) async fn login(
    console: &Console,
    chat_id: &str,
    pin: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let session = console
        .dashboard
        .login(chat_id, pin)
        .await
        .map_err(alert_for(Action::Login))?;
    let who = session
        .chat_key()
        .map(|c| c.to_string())
        .unwrap_or_else(|| session.id.clone());
    writeln!(out, "Logged in as {who}.")?;
    Ok(())
}

pub(super) async fn signup(
    console: &Console,
    chat_id: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let session = console
        .dashboard
        .signup(chat_id, username, password, confirm_password)
        .await
        .map_err(alert_for(Action::Signup))?;
    writeln!(out, "Registration successful.")?;
    write!(out, "{}", output::session(&session))?;
    Ok(())
}

pub(super) fn logout(console: &Console, out: &mut dyn Write) -> Result<()> {
    console.dashboard.logout()?;
    writeln!(out, "Logged out.")?;
    Ok(())
}

pub(super) fn whoami(console: &Console, out: &mut dyn Write) -> Result<()> {
    match console.dashboard.current_session()? {
        Some(session) => write!(out, "{}", output::session(&session))?,
        None => writeln!(out, "Not logged in.")?,
    }
    Ok(())
}
