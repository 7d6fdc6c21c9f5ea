//! Per-widget controllers. Each holds the widget's state and exposes the
//! transitions the UI drives; rendering lives in the front end.

pub mod assigned_loans;
pub mod audit;
pub mod bulk_reminder;
pub mod customer_form;
pub mod customers;
pub mod document_upload;
pub mod drafts;
pub mod loan_application;
pub mod loan_detail;
pub mod loan_history;
pub mod payment_collection;
pub mod schedule_board;
pub mod status;
pub mod transactions;

pub use assigned_loans::AssignedLoans;
pub use audit::{AuditEntry, AuditLog};
pub use bulk_reminder::{BulkReminder, ReminderChannel, ReminderReceipt, ReminderSender, SimulatedSender};
pub use customer_form::{CustomerEditor, CustomerField, NewCustomerForm};
pub use customers::{CustomerDirectory, ProfileCard};
pub use document_upload::DocumentUploader;
pub use drafts::{EscalationDraft, ManualPaymentDraft, NoteDraft, TagSet};
pub use loan_application::{LoanApplication, LoanFormOptions, RepaymentMode};
pub use loan_detail::{DetailView, LoanDetail};
pub use loan_history::{LoanHistory, LoanRow};
pub use payment_collection::{PaymentCollection, PaymentMethod};
pub use schedule_board::{BoardData, ScheduleBoard, ScheduleRow};
pub use status::{BadgeTone, IndicatorColor};
pub use transactions::{TransactionAction, TransactionDesk, TransactionFilter};
