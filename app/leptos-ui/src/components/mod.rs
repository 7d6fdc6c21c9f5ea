pub mod bulk_reminder;
pub mod customer_forms;
pub mod document_uploader;
pub mod loan_application;
pub mod modals;
pub mod nav_bar;
pub mod notes;
pub mod payment_panel;
pub mod records;
pub mod spinner;
pub mod status_badge;
pub mod toast_stack;
