//! Terminal rendering of views.
//!
//! Every function returns the text instead of printing it; commands decide
//! where it goes.

use std::fmt::Write as _;

use booster_client::HomeView;
use booster_core::progress::TransactionState;
use booster_core::routes::{self, HELP_TOPICS, Route};
use booster_core::types::display_value;
use booster_core::validation::ReportRange;
use booster_core::{BurnResult, CollectResult, ResumeResult, Session, Token, WalletGroup};

const BAR_WIDTH: usize = 30;

/// `[#######.......] 38%`
pub fn progress_bar(percent: u64, width: usize) -> String {
    let percent = percent.min(100);
    let filled = (width as u64 * percent / 100) as usize;
    format!(
        "[{}{}] {percent}%",
        "#".repeat(filled),
        ".".repeat(width - filled)
    )
}

/// The progress panel for a resumable transaction.
pub fn transaction_state(state: &TransactionState) -> String {
    let mut text = String::from("Prev/On-going TX");
    if let Some(kind) = state.transaction_kind() {
        let label = kind.label();
        if !label.is_empty() {
            let _ = write!(text, " [{label}]");
        }
    }
    let done = state.is_completed();
    if done {
        text.push_str(" Completed");
    }
    text.push('\n');

    let _ = write!(
        text,
        "Progress: {}/{} wallets",
        state.processed(),
        state.total_wallets
    );
    if done {
        text.push_str(" • All wallets processed");
    }
    let _ = writeln!(text);
    let _ = writeln!(text, "{}", progress_bar(state.progress_percentage(), BAR_WIDTH));

    if let Some(start) = state.start_time {
        let _ = writeln!(text, "Started: {}", start.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(updated) = state.last_updated {
        let _ = writeln!(text, "Last Updated: {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(amount) = state
        .details
        .as_ref()
        .and_then(|d| d.distribution_amount.as_ref())
    {
        let _ = writeln!(text, "Distribution Amount: {} AMB per wallet", display_value(amount));
    }

    let _ = writeln!(text, "Status: {}", if done { "Completed" } else { "In Progress" });
    let _ = writeln!(text, "Processed: {} wallets", state.processed());
    let _ = writeln!(text, "Remaining: {} wallets", state.remaining());
    let _ = writeln!(text, "Success: {} transactions", state.success_count);
    let _ = writeln!(text, "Failed: {} transactions", state.fail_count);
    if let Some(error) = &state.error {
        let _ = writeln!(text, "Error: {error}");
    }
    text
}

/// Home view: active group and token.
pub fn home(view: &HomeView) -> String {
    let group = view
        .group
        .as_ref()
        .map_or("None selected.".to_string(), |g| g.name.clone());
    let token = view
        .token
        .as_ref()
        .map_or("None selected.".to_string(), Token::label);
    format!("Active Wallet Group\n  {group}\nActive Token\n  {token}\n")
}

/// Main menu with each entry's path.
pub fn menu() -> String {
    routes::main_menu()
        .iter()
        .map(|route| format!("{:<22} {}\n", route.title(), route.path()))
        .collect()
}

/// Help topics.
pub fn help() -> String {
    let mut text = format!("{}\n", Route::Help.title());
    for topic in HELP_TOPICS {
        let _ = writeln!(text, "  - {topic}");
    }
    text
}

/// One line per group, active group marked.
pub fn wallet_groups(groups: &[WalletGroup]) -> String {
    if groups.is_empty() {
        return "No wallet groups.\n".to_string();
    }
    groups
        .iter()
        .map(|g| {
            format!(
                "{} {:<24} {} ({} wallets)\n",
                if g.is_active { "*" } else { " " },
                g.id.as_ref().map(ToString::to_string).unwrap_or_default(),
                g.name,
                g.wallets.len()
            )
        })
        .collect()
}

/// A group's wallets with their keys.
pub fn wallet_group(group: &WalletGroup) -> String {
    let mut text = format!("{}\n", group.name);
    for (i, wallet) in group.wallets.iter().enumerate() {
        let _ = writeln!(
            text,
            "{:>3}. Address: {}\n     Private Key: {}",
            i + 1,
            wallet.address,
            wallet.private_key_display()
        );
    }
    text
}

/// One line per token, active token marked.
pub fn tokens(tokens: &[Token]) -> String {
    if tokens.is_empty() {
        return "No tokens.\n".to_string();
    }
    tokens
        .iter()
        .map(|t| {
            format!(
                "{} {:<24} {:<20} {}\n",
                if t.is_active { "*" } else { " " },
                t.id.as_ref().map(ToString::to_string).unwrap_or_default(),
                t.label(),
                t.address.as_deref().unwrap_or("")
            )
        })
        .collect()
}

/// Stored session.
pub fn session(session: &Session) -> String {
    let mut text = String::new();
    if let Some(chat_id) = session.chat_key() {
        let _ = writeln!(text, "Chat ID: {chat_id}");
    }
    if let Some(username) = &session.username {
        let _ = writeln!(text, "Username: {username}");
    }
    if !session.id.is_empty() {
        let _ = writeln!(text, "User ID: {}", session.id);
    }
    if let Some(group) = &session.active_wallet_group_id {
        let _ = writeln!(text, "Active wallet group: {group}");
    }
    if let Some(token) = &session.active_token_id {
        let _ = writeln!(text, "Active token: {token}");
    }
    text
}

/// Collect summary.
pub fn collect_result(result: &CollectResult) -> String {
    format!(
        "Funds Collected.\nSuccess: {}, Fail: {}, Total Collected: {} AMB",
        result.success_count,
        result.fail_count,
        display_value(&result.total_collected)
    )
}

/// Burn summary.
pub fn burn_result(result: &BurnResult) -> String {
    format!(
        "Burn completed.\nSuccess: {}, Fail: {}",
        result.success_count, result.fail_count
    )
}

/// Resume summary.
pub fn resume_result(result: &ResumeResult) -> String {
    let mut text = result
        .message
        .clone()
        .unwrap_or_else(|| "Transaction resumed.".to_string());
    if let (Some(success), Some(fail)) = (result.success_count, result.fail_count) {
        let _ = write!(text, "\nSuccess: {success}, Fail: {fail}");
    }
    text
}

/// `UsageReport_<from>_<to>.pdf`
pub fn report_file_name(range: &ReportRange) -> String {
    format!("UsageReport_{}_{}.pdf", range.from_param(), range.to_param())
}
