use lc_api_types::Loan;

use crate::error::ApiError;
use crate::format::{display_date, or_placeholder, PLACEHOLDER};
use crate::resource::{FetchTicket, Resource, ResourceState};

pub const LOANS_FAILED: &str = "Failed to fetch loan data";
pub const NO_LOANS: &str = "No loans found.";

/// One rendered row of the loan history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanRow {
    pub loan_id: String,
    pub customer: String,
    pub loan_type: String,
    pub principal: String,
    pub total_due_count: String,
    pub due_amount: String,
    pub interest: String,
    pub repayment_mode: String,
    pub status: String,
    pub applied_on: String,
}

impl LoanRow {
    pub fn from_loan(loan: &Loan) -> Self {
        Self {
            loan_id: loan.loan_id.to_string(),
            customer: or_placeholder(loan.customer.as_ref().map(|c| c.full_name.as_str())),
            loan_type: or_placeholder(loan.loan_type.as_ref().map(|t| t.name.as_str())),
            principal: loan.principal_amount.to_string(),
            total_due_count: loan
                .total_due_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            due_amount: loan.due_amount.to_string(),
            interest: loan.interest_percentage.to_string(),
            repayment_mode: loan.repayment_mode.clone(),
            status: loan.loan_status.clone(),
            applied_on: display_date(&loan.created_at),
        }
    }
}

/// Read-only table of every loan.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanHistory {
    loans: Resource<Vec<Loan>>,
}

impl Default for LoanHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanHistory {
    pub fn new() -> Self {
        Self {
            loans: Resource::new(LOANS_FAILED),
        }
    }

    pub fn state(&self) -> &ResourceState<Vec<Loan>> {
        self.loans.state()
    }

    pub fn activate(&mut self) -> FetchTicket {
        self.loans.activate()
    }

    pub fn deactivate(&mut self) {
        self.loans.deactivate();
    }

    pub fn settle(&mut self, ticket: FetchTicket, result: Result<Vec<Loan>, ApiError>) -> bool {
        self.loans.settle(ticket, result)
    }

    /// Rendered rows once loaded.
    pub fn rows(&self) -> Option<Vec<LoanRow>> {
        self.loans
            .data()
            .map(|loans| loans.iter().map(LoanRow::from_loan).collect())
    }
}
