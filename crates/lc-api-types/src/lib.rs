//! Shared API types for the loan console.
//!
//! These mirror the JSON the loan-management backend returns. Every field is
//! defaulted so that a sparse or slightly different payload still decodes;
//! the console renders placeholders for whatever is missing.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

pub type LoanId = i64;
pub type ScheduleId = i64;
pub type AgentId = i64;
pub type CustomerId = i64;
pub type TransactionId = i64;
pub type LoanTypeId = i64;
pub type UserId = i64;

// ── Amounts ──

/// A monetary amount exactly as the backend sent it.
///
/// The backend serialises decimals either as JSON numbers (`1000`) or as
/// strings (`"1000.00"`). The original text is kept for display so nothing is
/// lost to float formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Amount(String);

impl Amount {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric value, if the raw text parses.
    pub fn value(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Amount {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl<'de> Visitor<'de> for AmountVisitor {
            type Value = Amount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
                Ok(Amount(v.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Amount, E> {
                Ok(Amount::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Amount, E> {
                Ok(Amount::default())
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Amount, D::Error> {
                d.deserialize_any(AmountVisitor)
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}

// ── Loans ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CustomerRef {
    #[serde(default)]
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoanTypeRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Loan {
    #[serde(default)]
    pub loan_id: LoanId,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    #[serde(default)]
    pub loan_type: Option<LoanTypeRef>,
    #[serde(default)]
    pub principal_amount: Amount,
    #[serde(default)]
    pub total_due_count: Option<u32>,
    #[serde(default)]
    pub due_amount: Amount,
    #[serde(default)]
    pub interest_percentage: Amount,
    #[serde(default)]
    pub repayment_mode: String,
    #[serde(default)]
    pub loan_status: String,
    #[serde(default)]
    pub created_at: String,
}

impl Loan {
    /// Date the loan was applied for, from `created_at`.
    pub fn applied_on(&self) -> Option<NaiveDate> {
        parse_date(&self.created_at)
    }
}

/// Loan header as returned by the loan-details endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoanSummary {
    #[serde(default)]
    pub id: LoanId,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub loan_amount: Amount,
    #[serde(default)]
    pub interest_rate: Amount,
    #[serde(default)]
    pub duration_months: Option<u32>,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoanDetails {
    #[serde(default)]
    pub loan: Option<LoanSummary>,
    #[serde(default)]
    pub schedules: Vec<LoanSchedule>,
}

// ── Installments ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoanSchedule {
    #[serde(default)]
    pub id: ScheduleId,
    #[serde(default)]
    pub loan: LoanId,
    #[serde(default)]
    pub installment_no: u32,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub principal_amount: Amount,
    #[serde(default)]
    pub interest_amount: Amount,
    #[serde(default)]
    pub total_due: Amount,
    #[serde(default)]
    pub remaining_principal: Amount,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assigned_to: Option<AgentId>,
}

impl LoanSchedule {
    pub fn due_on(&self) -> Option<NaiveDate> {
        parse_date(&self.due_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Agent {
    #[serde(default)]
    pub id: AgentId,
    #[serde(default)]
    pub username: String,
}

// ── Customers ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Customer {
    #[serde(default)]
    pub customer_id: CustomerId,
    #[serde(default)]
    pub customer_code: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub segment: Option<String>,
    #[serde(default)]
    pub relationship_score: Option<u32>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub aadhar_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoanType {
    #[serde(default)]
    pub loan_type_id: LoanTypeId,
    #[serde(default)]
    pub name: String,
}

/// One entry of a customer's communication log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Activity {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub activity: String,
}

// ── Disbursement transactions ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Transaction {
    #[serde(default)]
    pub id: TransactionId,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub amount: Amount,
    #[serde(default)]
    pub status: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub date: String,
}

// ── Request bodies ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignRequest {
    pub assigned_to: AgentId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectPaymentRequest {
    pub payment_method: String,
    pub paid_amount: String,
}

/// Body of both customer create (`POST`) and edit (`PUT`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomerForm {
    pub customer_code: String,
    pub full_name: String,
    pub nickname: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub aadhar_number: String,
    pub document_url: String,
}

impl CustomerForm {
    /// Prefill from an existing record for editing.
    pub fn from_customer(c: &Customer) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            customer_code: c.customer_code.clone(),
            full_name: c.full_name.clone(),
            nickname: text(&c.nickname),
            phone: c.phone.clone(),
            email: text(&c.email),
            address: text(&c.address),
            aadhar_number: text(&c.aadhar_number),
            document_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationRequest {
    pub customer_id: CustomerId,
    pub loan_type_id: LoanTypeId,
    pub principal_amount: f64,
    pub total_due_count: u32,
    pub due_amount: f64,
    pub interest_percentage: f64,
    pub repayment_mode: String,
    pub loan_status: String,
    pub created_by: UserId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ── Mutation responses ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AssignResponse {
    #[serde(default)]
    pub message: Option<String>,
    /// Agent the backend recorded, when it echoes one back.
    #[serde(default)]
    pub assigned_to: Option<AgentId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CollectResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub schedule: Option<LoanSchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub documents: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ApiUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user: ApiUser,
}

/// Error payload shapes the backend uses on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// First non-empty human-readable reason, if any.
    pub fn reason(&self) -> Option<String> {
        [&self.message, &self.error, &self.detail]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Parse either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .or_else(|| {
            raw.get(..10)
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_numbers_and_strings() {
        let loan: Loan = serde_json::from_str(
            r#"{"loan_id": 1, "principal_amount": 1000, "due_amount": "250.50", "interest_percentage": 12.5}"#,
        )
        .unwrap();
        assert_eq!(loan.principal_amount.as_str(), "1000");
        assert_eq!(loan.due_amount.as_str(), "250.50");
        assert_eq!(loan.interest_percentage.value(), Some(12.5));
    }

    #[test]
    fn amount_null_is_empty() {
        let schedule: LoanSchedule =
            serde_json::from_str(r#"{"id": 3, "total_due": null}"#).unwrap();
        assert!(schedule.total_due.is_empty());
        assert_eq!(schedule.total_due.value(), None);
    }

    #[test]
    fn loan_defaults_fill_missing_fields() {
        let loan: Loan = serde_json::from_str(r#"{"loan_id": 7}"#).unwrap();
        assert_eq!(loan.loan_id, 7);
        assert!(loan.customer.is_none());
        assert!(loan.loan_type.is_none());
        assert_eq!(loan.loan_status, "");
        assert_eq!(loan.applied_on(), None);
    }

    #[test]
    fn schedule_with_unassigned_agent() {
        let json = r#"{
            "id": 5,
            "loan": 2,
            "installment_no": 3,
            "due_date": "2025-11-01",
            "principal_amount": "900.00",
            "interest_amount": "100.00",
            "total_due": "1000.00",
            "remaining_principal": "1800.00",
            "status": "Pending",
            "assigned_to": null
        }"#;
        let s: LoanSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, 5);
        assert_eq!(s.assigned_to, None);
        assert_eq!(s.due_on(), NaiveDate::from_ymd_opt(2025, 11, 1));
    }

    #[test]
    fn transaction_type_field_is_renamed() {
        let t: Transaction = serde_json::from_str(
            r#"{"id": 1, "user": "Ravi", "amount": 5000, "status": "Pending", "type": "Disbursement", "date": "2025-10-15"}"#,
        )
        .unwrap();
        assert_eq!(t.kind, "Disbursement");
        assert_eq!(t.amount.to_string(), "5000");
    }

    #[test]
    fn error_body_prefers_message_then_error_then_detail() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Agent not found", "detail": "x"}"#).unwrap();
        assert_eq!(body.reason().as_deref(), Some("Agent not found"));

        let body: ErrorBody = serde_json::from_str(r#"{"message": "  "}"#).unwrap();
        assert_eq!(body.reason(), None);
    }

    #[test]
    fn parse_date_handles_timestamps_and_dates() {
        let expected = NaiveDate::from_ymd_opt(2025, 10, 15);
        assert_eq!(parse_date("2025-10-15T08:30:00Z"), expected);
        assert_eq!(parse_date("2025-10-15"), expected);
        assert_eq!(parse_date("2025-10-15T08:30:00.123456"), expected);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn customer_form_prefills_optional_fields_as_empty() {
        let c: Customer = serde_json::from_str(
            r#"{"customer_id": 9, "customer_code": "C009", "full_name": "Asha", "phone": "98", "address": "Pune"}"#,
        )
        .unwrap();
        let form = CustomerForm::from_customer(&c);
        assert_eq!(form.customer_code, "C009");
        assert_eq!(form.address, "Pune");
        assert_eq!(form.email, "");
        assert_eq!(form.aadhar_number, "");
    }
}
