//! Resumable transaction state.

use std::io::Write;

use booster_client::Action;
use booster_core::progress::{STATUS_COMPLETED, STATUS_ERROR, TransactionState};

use super::Console;
use crate::cli::TxAction;
use crate::error::{Result, alert_for};
use crate::output;

pub(super) async fn run(console: &Console, action: &TxAction, out: &mut dyn Write) -> Result<()> {
    match action {
        TxAction::State { watch } => state(console, *watch, out).await,
        TxAction::Resume => {
            let result = console
                .dashboard
                .resume_transaction()
                .await
                .map_err(alert_for(Action::ResumeTransaction))?;
            writeln!(out, "{}", output::resume_result(&result))?;
            Ok(())
        }
    }
}

async fn state(console: &Console, watch: bool, out: &mut dyn Write) -> Result<()> {
    let subscription = if watch {
        console.subscribe(out).await?
    } else {
        None
    };

    let mut current = console
        .dashboard
        .transaction_state()
        .await
        .map_err(alert_for(Action::TransactionState))?;
    match &current {
        Some(state) => write!(out, "{}", output::transaction_state(state))?,
        None => writeln!(out, "No transaction found.")?,
    }

    let Some(mut subscription) = subscription else {
        return Ok(());
    };
    if current.as_ref().is_some_and(is_finished) {
        subscription.close().await;
        return Ok(());
    }

    while let Some(event) = subscription.next().await {
        let now = chrono::Utc::now();
        let changed = match current.as_mut() {
            Some(state) => state.apply(&event, now),
            None => {
                current = TransactionState::from_event(&event, now);
                current.is_some()
            }
        };
        let Some(state) = current.as_ref().filter(|_| changed) else {
            continue;
        };
        writeln!(out)?;
        write!(out, "{}", output::transaction_state(state))?;
        if is_finished(state) {
            break;
        }
    }
    subscription.close().await;
    Ok(())
}

fn is_finished(state: &TransactionState) -> bool {
    state.status == STATUS_COMPLETED || state.status == STATUS_ERROR
}
