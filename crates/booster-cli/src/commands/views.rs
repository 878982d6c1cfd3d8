//! Home, menu, help and path navigation.

use std::io::Write;

use booster_client::Action;
use booster_core::{Navigation, Route};

use super::{Console, groups, tokens};
use crate::error::{Error, Result, alert_for};
use crate::output;

pub(super) async fn home(console: &Console, out: &mut dyn Write) -> Result<()> {
    let view = console
        .dashboard
        .home()
        .await
        .map_err(alert_for(Action::Home))?;
    write!(out, "{}", output::home(&view))?;
    Ok(())
}

pub(super) fn menu(out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", output::menu())?;
    Ok(())
}

pub(super) fn help(out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", output::help())?;
    Ok(())
}

/// Open a view by path, through the login guard.
pub(super) async fn go(console: &Console, path: &str, out: &mut dyn Write) -> Result<()> {
    let route = Route::parse(path).ok_or_else(|| Error::alert(format!("Unknown view '{path}'")))?;
    let route = match console.dashboard.navigate(route)? {
        Navigation::Render(route) => route,
        Navigation::Redirect(target) => {
            writeln!(out, "Please log in to continue. Redirecting to {target}.")?;
            target
        }
    };

    writeln!(out, "{}", route.title())?;
    match route {
        Route::Home => home(console, out).await,
        Route::Help => help(out),
        Route::WalletGroups => groups::list(console, out).await,
        Route::ViewWalletGroup(id) => groups::view(console, id.as_ref(), out).await,
        Route::Tokens => tokens::list(console, out).await,
        other => {
            writeln!(out, "Run `booster {}`.", usage(&other))?;
            Ok(())
        }
    }
}

/// Command that performs a form view.
fn usage(route: &Route) -> &'static str {
    match route {
        Route::Login => "login <chat-id> [--pin <pin>]",
        Route::Signup => {
            "signup --chat-id <id> --username <name> --password <pw> --confirm-password <pw>"
        }
        Route::CreateWalletGroup => "groups create <name>",
        Route::Distribute => "distribute <amount> [--watch]",
        Route::Collect => "collect",
        Route::Burn => "burn <amount>",
        Route::Buy => "buy --amount <amount> [--wallet ADDRESS=AMOUNT] [--watch]",
        Route::Sell => "sell --amount <amount> [--wallet ADDRESS=AMOUNT] [--watch]",
        Route::UsageReport => "report --from <YYYY-MM-DD> --to <YYYY-MM-DD>",
        Route::Home
        | Route::WalletGroups
        | Route::ViewWalletGroup(_)
        | Route::Tokens
        | Route::Help => "menu",
    }
}
