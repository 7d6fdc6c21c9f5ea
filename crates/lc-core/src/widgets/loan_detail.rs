use lc_api_types::{LoanDetails, LoanId, LoanSchedule, LoanSummary};

use crate::error::ApiError;
use crate::resource::{FetchTicket, Resource, ResourceState};

pub const DETAIL_FAILED: &str = "Failed to load loan details.";
pub const LOAN_NOT_FOUND: &str = "No loan found.";
pub const NO_DUES: &str = "No dues found for this loan.";

/// What the detail panel shows once the fetch has settled.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView<'a> {
    NotFound,
    Found {
        loan: &'a LoanSummary,
        schedules: &'a [LoanSchedule],
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoanDetail {
    loan_id: LoanId,
    details: Resource<LoanDetails>,
}

impl LoanDetail {
    pub fn new(loan_id: LoanId) -> Self {
        Self {
            loan_id,
            details: Resource::new(DETAIL_FAILED),
        }
    }

    pub fn loan_id(&self) -> LoanId {
        self.loan_id
    }

    pub fn state(&self) -> &ResourceState<LoanDetails> {
        self.details.state()
    }

    pub fn activate(&mut self) -> FetchTicket {
        self.details.activate()
    }

    pub fn deactivate(&mut self) {
        self.details.deactivate();
    }

    pub fn settle(&mut self, ticket: FetchTicket, result: Result<LoanDetails, ApiError>) -> bool {
        self.details.settle(ticket, result)
    }

    pub fn view(&self) -> Option<DetailView<'_>> {
        let details = self.details.data()?;
        Some(match &details.loan {
            Some(loan) => DetailView::Found {
                loan,
                schedules: &details.schedules,
            },
            None => DetailView::NotFound,
        })
    }
}
