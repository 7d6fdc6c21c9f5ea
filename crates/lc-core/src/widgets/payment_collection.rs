//! Agent-side payment collection for one loan's installments.

use std::fmt;
use std::str::FromStr;

use lc_api_types::{CollectPaymentRequest, CollectResponse, LoanId, LoanSchedule, ScheduleId};

use crate::error::{ApiError, ValidationError};
use crate::mutation::InFlight;
use crate::notice::Notice;
use crate::resource::{FetchTicket, Resource, ResourceState};

pub const COLLECTION_LOAD_FAILED: &str = "Failed to load loan details.";
pub const COLLECT_FAILED: &str = "Failed to collect payment.";
pub const COLLECT_OK: &str = "Payment collected successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Upi,
    Card,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Upi, PaymentMethod::Card];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Parse a user-typed amount. Empty → missing; zero, negative or garbage
/// → non-positive.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingAmount);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(ValidationError::NonPositiveAmount),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectDispatch {
    pub schedule: ScheduleId,
    pub request: CollectPaymentRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentCollection {
    loan: LoanId,
    schedules: Resource<Vec<LoanSchedule>>,
    selected: Option<ScheduleId>,
    method: PaymentMethod,
    amount: String,
    collecting: InFlight<()>,
    last: Option<Notice>,
}

impl PaymentCollection {
    pub fn new(loan: LoanId) -> Self {
        Self {
            loan,
            schedules: Resource::new(COLLECTION_LOAD_FAILED),
            selected: None,
            method: PaymentMethod::default(),
            amount: String::new(),
            collecting: InFlight::new(),
            last: None,
        }
    }

    pub fn loan(&self) -> LoanId {
        self.loan
    }

    pub fn state(&self) -> &ResourceState<Vec<LoanSchedule>> {
        self.schedules.state()
    }

    pub fn activate(&mut self) -> FetchTicket {
        self.schedules.activate()
    }

    pub fn deactivate(&mut self) {
        self.schedules.deactivate();
    }

    /// Keep only this loan's installments from the full schedule list.
    pub fn settle(&mut self, ticket: FetchTicket, result: Result<Vec<LoanSchedule>, ApiError>) -> bool {
        let loan = self.loan;
        self.schedules.settle(
            ticket,
            result.map(|all| all.into_iter().filter(|s| s.loan == loan).collect()),
        )
    }

    pub fn select(&mut self, schedule: Option<ScheduleId>) {
        self.selected = schedule;
    }

    pub fn selected(&self) -> Option<ScheduleId> {
        self.selected
    }

    pub fn set_method(&mut self, method: PaymentMethod) {
        self.method = method;
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn is_collecting(&self) -> bool {
        self.collecting.any()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.last.as_ref()
    }

    /// `Ok(None)` while a collection is already in flight.
    pub fn begin_collect(&mut self) -> Result<Option<CollectDispatch>, ValidationError> {
        let schedule = self.selected.ok_or(ValidationError::NoScheduleSelected)?;
        parse_amount(&self.amount)?;
        if !self.collecting.try_begin(()) {
            return Ok(None);
        }
        Ok(Some(CollectDispatch {
            schedule,
            request: CollectPaymentRequest {
                payment_method: self.method.as_str().to_string(),
                paid_amount: self.amount.trim().to_string(),
            },
        }))
    }

    pub fn finish_collect(
        &mut self,
        dispatch: &CollectDispatch,
        result: Result<CollectResponse, ApiError>,
    ) -> Notice {
        self.collecting.finish(&());
        let notice = match result {
            Ok(response) => {
                if let Some(updated) = response.schedule {
                    self.schedules.patch(|list| {
                        if let Some(s) = list.iter_mut().find(|s| s.id == updated.id) {
                            *s = updated;
                        }
                    });
                }
                self.amount.clear();
                tracing::info!(schedule = dispatch.schedule, "payment collected");
                Notice::success(response.message.unwrap_or_else(|| COLLECT_OK.to_string()))
            }
            Err(err) => {
                tracing::warn!(schedule = dispatch.schedule, error = %err, "payment collection failed");
                Notice::error(err.action_message(COLLECT_FAILED))
            }
        };
        self.last = Some(notice.clone());
        notice
    }
}
