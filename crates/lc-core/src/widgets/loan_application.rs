//! Three-step loan application: pick a customer, fill in the terms, review
//! and submit.
//!
//! The customer and loan-type pickers come from one composite fetch, so the
//! form is usable only when both lists arrived.

use std::fmt;
use std::str::FromStr;

use lc_api_types::{Customer, CustomerId, Loan, LoanApplicationRequest, LoanType, LoanTypeId};

use crate::error::{ApiError, ValidationError};
use crate::mutation::InFlight;
use crate::notice::Notice;
use crate::resource::{FetchTicket, Resource, ResourceState};

pub const OPTIONS_FAILED: &str = "Failed to load customers and loan types.";
pub const SUBMIT_OK: &str = "Loan application submitted successfully!";
pub const SUBMIT_FAILED: &str = "Failed to submit loan application.";
pub const STEPS: u8 = 3;
/// Status every new application is filed with.
pub const NEW_LOAN_STATUS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaymentMode {
    Monthly,
    Weekly,
    Daily,
}

impl RepaymentMode {
    pub const ALL: [RepaymentMode; 3] = [RepaymentMode::Monthly, RepaymentMode::Weekly, RepaymentMode::Daily];

    pub fn as_str(self) -> &'static str {
        match self {
            RepaymentMode::Monthly => "monthly",
            RepaymentMode::Weekly => "weekly",
            RepaymentMode::Daily => "daily",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepaymentMode::Monthly => "Monthly",
            RepaymentMode::Weekly => "Weekly",
            RepaymentMode::Daily => "Daily",
        }
    }
}

impl fmt::Display for RepaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(RepaymentMode::Monthly),
            "weekly" => Ok(RepaymentMode::Weekly),
            "daily" => Ok(RepaymentMode::Daily),
            other => Err(format!("unknown repayment mode: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoanFormOptions {
    pub customers: Vec<Customer>,
    pub loan_types: Vec<LoanType>,
}

impl From<(Vec<Customer>, Vec<LoanType>)> for LoanFormOptions {
    fn from((customers, loan_types): (Vec<Customer>, Vec<LoanType>)) -> Self {
        Self { customers, loan_types }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn positive<T: FromStr + PartialOrd + Default>(raw: &str) -> Option<T> {
    raw.trim().parse::<T>().ok().filter(|v| *v > T::default())
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoanApplication {
    options: Resource<LoanFormOptions>,
    step: u8,
    customer: Option<CustomerId>,
    loan_type: Option<LoanTypeId>,
    principal: String,
    months: String,
    interest: String,
    mode: Option<RepaymentMode>,
    created_by: String,
    submitting: InFlight<()>,
    error: Option<ValidationError>,
    outcome: Option<Notice>,
}

impl Default for LoanApplication {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanApplication {
    pub fn new() -> Self {
        Self {
            options: Resource::new(OPTIONS_FAILED),
            step: 1,
            customer: None,
            loan_type: None,
            principal: String::new(),
            months: String::new(),
            interest: String::new(),
            mode: None,
            created_by: String::new(),
            submitting: InFlight::new(),
            error: None,
            outcome: None,
        }
    }

    // ── Pickers ──

    pub fn state(&self) -> &ResourceState<LoanFormOptions> {
        self.options.state()
    }

    pub fn options(&self) -> Option<&LoanFormOptions> {
        self.options.data()
    }

    pub fn activate(&mut self) -> FetchTicket {
        self.options.activate()
    }

    pub fn deactivate(&mut self) {
        self.options.deactivate();
    }

    pub fn settle(
        &mut self,
        ticket: FetchTicket,
        result: Result<(Vec<Customer>, Vec<LoanType>), ApiError>,
    ) -> bool {
        self.options.settle(ticket, result.map(LoanFormOptions::from))
    }

    // ── Steps ──

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn next(&mut self) {
        self.step = (self.step + 1).min(STEPS);
    }

    pub fn prev(&mut self) {
        self.step = self.step.saturating_sub(1).max(1);
    }

    /// Progress bar width in percent.
    pub fn progress(&self) -> u8 {
        (self.step - 1) * 100 / (STEPS - 1)
    }

    // ── Fields ──

    pub fn select_customer(&mut self, id: Option<CustomerId>) {
        self.customer = id;
    }

    pub fn selected_customer(&self) -> Option<&Customer> {
        let id = self.customer?;
        self.options()?.customers.iter().find(|c| c.customer_id == id)
    }

    pub fn select_loan_type(&mut self, id: Option<LoanTypeId>) {
        self.loan_type = id;
    }

    pub fn loan_type(&self) -> Option<LoanTypeId> {
        self.loan_type
    }

    pub fn set_principal(&mut self, raw: impl Into<String>) {
        self.principal = raw.into();
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn set_months(&mut self, raw: impl Into<String>) {
        self.months = raw.into();
    }

    pub fn months(&self) -> &str {
        &self.months
    }

    pub fn set_interest(&mut self, raw: impl Into<String>) {
        self.interest = raw.into();
    }

    pub fn interest(&self) -> &str {
        &self.interest
    }

    pub fn set_mode(&mut self, mode: Option<RepaymentMode>) {
        self.mode = mode;
    }

    pub fn mode(&self) -> Option<RepaymentMode> {
        self.mode
    }

    pub fn set_created_by(&mut self, raw: impl Into<String>) {
        self.created_by = raw.into();
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.any()
    }

    pub fn outcome(&self) -> Option<&Notice> {
        self.outcome.as_ref()
    }

    /// Per-installment amount: principal plus flat interest, split evenly.
    /// Needs amount, period and rate.
    pub fn emi(&self) -> Option<f64> {
        let principal: f64 = positive(&self.principal)?;
        let months: u32 = positive(&self.months)?;
        let rate = self.interest.trim().parse::<f64>().ok().filter(|r| *r >= 0.0)?;
        let payable = principal + principal * rate / 100.0;
        Some(round2(payable / f64::from(months)))
    }

    pub fn total_payable(&self) -> Option<f64> {
        let months: u32 = positive(&self.months)?;
        self.emi().map(|emi| round2(emi * f64::from(months)))
    }

    // ── Submit ──

    /// Check every mandatory field and build the request. `Ok(None)` while
    /// a submission is already in flight.
    pub fn begin_submit(&mut self) -> Result<Option<LoanApplicationRequest>, ValidationError> {
        self.outcome = None;
        let principal: Option<f64> = positive(&self.principal);
        let months: Option<u32> = positive(&self.months);
        let created_by: Option<i64> = positive(&self.created_by);

        let mut missing = Vec::new();
        if self.customer.is_none() {
            missing.push("Customer");
        }
        if self.loan_type.is_none() {
            missing.push("Loan Type");
        }
        if principal.is_none() {
            missing.push("Loan Amount");
        }
        if months.is_none() {
            missing.push("Total Due Count");
        }
        if self.mode.is_none() {
            missing.push("Repayment Mode");
        }
        if created_by.is_none() {
            missing.push("Created By");
        }

        let (Some(customer_id), Some(loan_type_id), Some(principal), Some(months), Some(mode), Some(created_by)) =
            (self.customer, self.loan_type, principal, months, self.mode, created_by)
        else {
            let err = ValidationError::MissingFields(missing);
            self.error = Some(err.clone());
            return Err(err);
        };
        self.error = None;

        if !self.submitting.try_begin(()) {
            return Ok(None);
        }
        Ok(Some(LoanApplicationRequest {
            customer_id,
            loan_type_id,
            principal_amount: principal,
            total_due_count: months,
            due_amount: self.emi().unwrap_or(0.0),
            interest_percentage: self.interest.trim().parse().unwrap_or(0.0),
            repayment_mode: mode.as_str().to_string(),
            loan_status: NEW_LOAN_STATUS.to_string(),
            created_by,
        }))
    }

    /// Success resets the form to step one, keeping the loaded pickers.
    /// Failure keeps every field for another try.
    pub fn finish_submit(&mut self, result: Result<Loan, ApiError>) -> Notice {
        self.submitting.finish(&());
        let notice = match result {
            Ok(loan) => {
                tracing::info!(loan = loan.loan_id, "loan application submitted");
                let options = std::mem::replace(&mut self.options, Resource::new(OPTIONS_FAILED));
                *self = Self { options, ..Self::new() };
                Notice::success(SUBMIT_OK)
            }
            Err(err) => {
                tracing::warn!(error = %err, "loan application failed");
                Notice::error(err.action_message(SUBMIT_FAILED))
            }
        };
        self.outcome = Some(notice.clone());
        notice
    }
}
