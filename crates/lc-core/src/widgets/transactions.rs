//! Disbursement approval desk.
//!
//! Everything here is local: approving or rejecting only rewrites the row's
//! status, appends an audit entry and yields a notice.

use std::fmt;

use lc_api_types::{Amount, Transaction, TransactionId};

use crate::notice::Notice;
use crate::widgets::audit::{AuditLog, DEFAULT_ACTOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionAction {
    Approve,
    Reject,
}

impl TransactionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionAction::Approve => "approve",
            TransactionAction::Reject => "reject",
        }
    }

    /// Status a row takes once the action is applied.
    pub fn resulting_status(self) -> &'static str {
        match self {
            TransactionAction::Approve => "Success",
            TransactionAction::Reject => "Rejected",
        }
    }
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionFilter {
    pub status: String,
    pub kind: String,
    pub date: String,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        fn field(want: &str, have: &str) -> bool {
            want.is_empty() || want == have
        }
        field(&self.status, &t.status) && field(&self.kind, &t.kind) && field(&self.date, &t.date)
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.kind.is_empty() && self.date.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAction {
    pub action: TransactionAction,
    pub id: TransactionId,
}

impl PendingAction {
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to {} transaction #{}?",
            self.action, self.id
        )
    }
}

/// Seed rows shown before any backend feed exists.
pub fn demo_transactions() -> Vec<Transaction> {
    let row = |id, user: &str, amount: &str, status: &str, kind: &str, date: &str| Transaction {
        id,
        user: user.to_string(),
        amount: Amount::from(amount),
        status: status.to_string(),
        kind: kind.to_string(),
        date: date.to_string(),
    };
    vec![
        row(1, "Ravi", "5000", "Pending", "Disbursement", "2025-10-15"),
        row(2, "Sneha", "7000", "Success", "Refund", "2025-10-16"),
        row(3, "Mani", "6000", "Failed", "Disbursement", "2025-10-17"),
        row(4, "Kumar", "8000", "Pending", "Disbursement", "2025-10-18"),
    ]
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionDesk {
    transactions: Vec<Transaction>,
    filter: TransactionFilter,
    pending: Option<PendingAction>,
    audit: AuditLog,
}

impl TransactionDesk {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            ..Self::default()
        }
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    pub fn set_status_filter(&mut self, status: impl Into<String>) {
        self.filter.status = status.into();
    }

    pub fn set_kind_filter(&mut self, kind: impl Into<String>) {
        self.filter.kind = kind.into();
    }

    pub fn set_date_filter(&mut self, date: impl Into<String>) {
        self.filter.date = date.into();
    }

    pub fn reset_filters(&mut self) {
        self.filter = TransactionFilter::default();
    }

    /// Rows passing the current filter, recomputed on every call so status
    /// changes are reflected immediately.
    pub fn visible(&self) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Open the confirmation for `action` on `id`.
    pub fn request(&mut self, action: TransactionAction, id: TransactionId) {
        self.pending = Some(PendingAction { action, id });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn confirm(&mut self, timestamp: &str) -> Option<Notice> {
        let PendingAction { action, id } = self.pending.take()?;
        self.apply(action, id, timestamp)
    }

    /// `None` when no row has that id.
    pub fn apply(
        &mut self,
        action: TransactionAction,
        id: TransactionId,
        timestamp: &str,
    ) -> Option<Notice> {
        let row = self.transactions.iter_mut().find(|t| t.id == id)?;
        row.status = action.resulting_status().to_string();
        self.audit.record(
            DEFAULT_ACTOR,
            format!("{} transaction #{id}", action.as_str().to_uppercase()),
            timestamp,
        );
        tracing::info!(transaction = id, %action, "transaction updated");
        Some(match action {
            TransactionAction::Approve => {
                Notice::success(format!("Transaction #{id} Approved Successfully!"))
            }
            TransactionAction::Reject => Notice::error(format!("Transaction #{id} Rejected.")),
        })
    }

    pub fn add_note(&mut self, note: &str, timestamp: &str) {
        self.audit
            .record(DEFAULT_ACTOR, format!("Added note: {note}"), timestamp);
    }
}
