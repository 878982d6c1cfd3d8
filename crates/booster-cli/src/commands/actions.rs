//! Batched operations: distribute, collect, burn, buy and sell.
//!
//! With `--watch`, the push room is joined before the request is sent and
//! per-wallet results are printed until the completion event arrives.

use std::io::Write;

use booster_client::{Action, Subscription};
use booster_core::feed::status_line;
use booster_core::validation::{self, TimeRange, TradeAmounts};
use booster_core::{ActionAck, ActionFeed, ProcessKind, TradeSide};

use super::Console;
use crate::cli::TradeArgs;
use crate::error::{Result, alert_for};
use crate::output;

pub(super) async fn distribute(
    console: &Console,
    amount: &str,
    watch: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let subscription = if watch {
        validation::distribute_amount(amount)?;
        console.subscribe(out).await?
    } else {
        None
    };

    let ack = console
        .dashboard
        .distribute(amount)
        .await
        .map_err(alert_for(Action::Distribute))?;
    print_ack(&ack, ProcessKind::Distribute, out)?;

    if let Some(subscription) = subscription {
        follow(subscription, ProcessKind::Distribute, out).await?;
    }
    Ok(())
}

pub(super) async fn collect(console: &Console, out: &mut dyn Write) -> Result<()> {
    let result = console
        .dashboard
        .collect()
        .await
        .map_err(alert_for(Action::Collect))?;
    writeln!(out, "{}", output::collect_result(&result))?;
    Ok(())
}

pub(super) async fn burn(console: &Console, amount: &str, out: &mut dyn Write) -> Result<()> {
    let result = console
        .dashboard
        .burn(amount)
        .await
        .map_err(alert_for(Action::Burn))?;
    writeln!(out, "{}", output::burn_result(&result))?;
    Ok(())
}

pub(super) async fn trade(
    console: &Console,
    side: TradeSide,
    args: &TradeArgs,
    out: &mut dyn Write,
) -> Result<()> {
    let amounts = args.wallets.iter().fold(
        TradeAmounts {
            uniform: args.amount.clone(),
            ..TradeAmounts::default()
        },
        |amounts, (address, amount)| amounts.with_wallet(address, amount),
    );
    let action = match side {
        TradeSide::Buy => Action::Buy,
        TradeSide::Sell => Action::Sell,
    };
    let kind = side.process_kind();

    let subscription = if args.watch {
        TimeRange::new(args.min_delay, args.max_delay)?;
        amounts.validate(side)?;
        console.subscribe(out).await?
    } else {
        None
    };

    let started = console
        .dashboard
        .trade(side, &amounts, args.min_delay, args.max_delay)
        .await
        .map_err(alert_for(action))?;
    writeln!(
        out,
        "{} wallets in {}, {}-{} min between trades.",
        started.details.len(),
        started.group.name,
        args.min_delay,
        args.max_delay
    )?;
    print_ack(&started.ack, kind, out)?;

    if let Some(subscription) = subscription {
        follow(subscription, kind, out).await?;
    }
    Ok(())
}

fn print_ack(ack: &ActionAck, kind: ProcessKind, out: &mut dyn Write) -> Result<()> {
    match &ack.message {
        Some(message) => writeln!(out, "{message}")?,
        None => writeln!(out, "{} process started.", kind_name(kind))?,
    }
    Ok(())
}

fn kind_name(kind: ProcessKind) -> &'static str {
    match kind {
        ProcessKind::Distribute => "Distribution",
        ProcessKind::Buy => "Buy",
        ProcessKind::Sell => "Sell",
    }
}

/// Print wallet results as they arrive, then the completion summary.
async fn follow(mut subscription: Subscription, kind: ProcessKind, out: &mut dyn Write) -> Result<()> {
    let mut feed = ActionFeed::new(kind);
    while let Some(event) = subscription.next().await {
        if !feed.apply(&event) {
            tracing::debug!(event = %event.name(), "Ignoring event for another process");
            continue;
        }
        if feed.is_finished() {
            break;
        }
        if let Some(update) = feed.updates().last() {
            writeln!(out, "{}", status_line(kind, update))?;
        }
    }

    match feed.summary_message() {
        Some(summary) => writeln!(out, "{summary}")?,
        None => writeln!(
            out,
            "Live updates ended before the process completed ({}).",
            subscription.handle().state()
        )?,
    }
    subscription.close().await;
    Ok(())
}
