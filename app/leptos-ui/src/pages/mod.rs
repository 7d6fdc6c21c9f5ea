pub mod assigned;
pub mod customers;
pub mod disbursements;
pub mod loans;
pub mod login;
pub mod repayments;
