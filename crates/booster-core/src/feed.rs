//! Per-wallet activity feed for distribute, buy and sell batches.

use crate::events::PushEvent;
use crate::types::{display_value, ProcessKind, ProcessSummary, TxStatus, TxUpdate};

/// Running list of wallet outcomes for one batch kind.
///
/// Updates are kept in arrival order. Updates arriving after the summary are
/// still appended.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionFeed {
    kind: ProcessKind,
    updates: Vec<TxUpdate>,
    summary: Option<ProcessSummary>,
}

impl ActionFeed {
    /// An empty feed listening for `kind` events.
    pub fn new(kind: ProcessKind) -> Self {
        Self {
            kind,
            updates: Vec::new(),
            summary: None,
        }
    }

    /// Batch kind this feed follows.
    pub fn kind(&self) -> ProcessKind {
        self.kind
    }

    /// Fold an event in. Returns `true` if it belonged to this feed.
    pub fn apply(&mut self, event: &PushEvent) -> bool {
        match event {
            PushEvent::WalletUpdate { kind, update } if *kind == self.kind => {
                self.updates.push(update.clone());
                true
            }
            PushEvent::ProcessCompleted { kind, summary } if *kind == self.kind => {
                self.summary = Some(*summary);
                true
            }
            _ => false,
        }
    }

    /// Wallet outcomes so far.
    pub fn updates(&self) -> &[TxUpdate] {
        &self.updates
    }

    /// Final counts, once the batch has finished.
    pub fn summary(&self) -> Option<&ProcessSummary> {
        self.summary.as_ref()
    }

    /// Whether the completion event has arrived.
    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }

    /// `Buy process completed.\nSuccess: N, Fail: M` once finished.
    pub fn summary_message(&self) -> Option<String> {
        self.summary
            .map(|s| completion_message(self.kind, &s))
    }

    /// One display line per update, in arrival order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.updates.iter().map(|u| status_line(self.kind, u))
    }
}

/// Completion text for a finished batch.
pub fn completion_message(kind: ProcessKind, summary: &ProcessSummary) -> String {
    format!(
        "{}\nSuccess: {}, Fail: {}",
        kind.completion_label(),
        summary.success_count,
        summary.fail_count
    )
}

/// Describe one wallet's outcome.
pub fn status_line(kind: ProcessKind, update: &TxUpdate) -> String {
    let hash = update.tx_hash.as_deref().unwrap_or_default();
    match &update.status {
        TxStatus::Success => match kind {
            ProcessKind::Distribute => {
                let amount = update.amount.as_ref().map(display_value).unwrap_or_default();
                format!("✅ Success: Distributed {amount} AMB. Tx Hash: {hash}")
            }
            ProcessKind::Buy => format!("✅ Success: Bought tokens. Tx Hash: {hash}"),
            ProcessKind::Sell => format!("✅ Success: Sold tokens. Tx Hash: {hash}"),
        },
        TxStatus::Failed => match kind {
            ProcessKind::Distribute => "❌ Failed to distribute AMB.".to_string(),
            ProcessKind::Buy => "❌ Failed to buy tokens.".to_string(),
            ProcessKind::Sell => "❌ Failed to sell tokens.".to_string(),
        },
        TxStatus::Error => format!(
            "❗ Error: {}",
            update.error.as_deref().unwrap_or("unknown error")
        ),
        TxStatus::Other(status) => format!("⚠️ {}", status.replacen('_', " ", 1).to_uppercase()),
    }
}
