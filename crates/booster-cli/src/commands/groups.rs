//! Wallet group views.

use std::io::Write;

use booster_client::Action;
use booster_core::GroupId;

use super::Console;
use crate::cli::GroupsAction;
use crate::error::{Result, alert_for};
use crate::output;

pub(super) async fn run(console: &Console, action: &GroupsAction, out: &mut dyn Write) -> Result<()> {
    match action {
        GroupsAction::List => list(console, out).await,
        GroupsAction::Create { name } => {
            let group = console
                .dashboard
                .create_wallet_group(name)
                .await
                .map_err(alert_for(Action::CreateWalletGroup))?;
            writeln!(out, "Created wallet group: {}", group.name)?;
            Ok(())
        }
        GroupsAction::Activate { id } => {
            console
                .dashboard
                .activate_wallet_group(&GroupId::new(id.as_str()))
                .await
                .map_err(alert_for(Action::ActivateWalletGroup))?;
            writeln!(out, "Wallet group activated.")?;
            Ok(())
        }
        GroupsAction::View { id } => {
            let id = id.as_deref().map(GroupId::from);
            view(console, id.as_ref(), out).await
        }
    }
}

pub(super) async fn list(console: &Console, out: &mut dyn Write) -> Result<()> {
    let groups = console
        .dashboard
        .wallet_groups()
        .await
        .map_err(alert_for(Action::ListWalletGroups))?;
    write!(out, "{}", output::wallet_groups(&groups))?;
    Ok(())
}

pub(super) async fn view(
    console: &Console,
    id: Option<&GroupId>,
    out: &mut dyn Write,
) -> Result<()> {
    let group = console
        .dashboard
        .view_wallet_group(id)
        .await
        .map_err(alert_for(Action::ViewWalletGroup))?;
    write!(out, "{}", output::wallet_group(&group))?;
    Ok(())
}
