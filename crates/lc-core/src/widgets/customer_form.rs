//! Customer create and edit forms. Both write to the backend and hand the
//! server's record back so the directory can be patched by id.

use lc_api_types::{Customer, CustomerForm, CustomerId};

use crate::error::{ApiError, ValidationError};
use crate::mutation::InFlight;
use crate::notice::Notice;

pub const ADD_FAILED: &str = "Failed to add customer. Please check all fields.";
pub const UPDATE_FAILED: &str = "Failed to update customer";
pub const UPDATE_OK: &str = "Customer details updated.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Code,
    FullName,
    Nickname,
    Phone,
    Email,
    Address,
    Aadhar,
    DocumentUrl,
}

impl CustomerField {
    pub const ALL: [CustomerField; 8] = [
        CustomerField::Code,
        CustomerField::FullName,
        CustomerField::Nickname,
        CustomerField::Phone,
        CustomerField::Email,
        CustomerField::Address,
        CustomerField::Aadhar,
        CustomerField::DocumentUrl,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CustomerField::Code => "Customer Code",
            CustomerField::FullName => "Full Name",
            CustomerField::Nickname => "Nickname",
            CustomerField::Phone => "Phone",
            CustomerField::Email => "Email",
            CustomerField::Address => "Address",
            CustomerField::Aadhar => "Aadhar Number",
            CustomerField::DocumentUrl => "Document URL",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            CustomerField::Code | CustomerField::FullName | CustomerField::Phone | CustomerField::Aadhar
        )
    }

    pub fn get(self, form: &CustomerForm) -> &str {
        match self {
            CustomerField::Code => &form.customer_code,
            CustomerField::FullName => &form.full_name,
            CustomerField::Nickname => &form.nickname,
            CustomerField::Phone => &form.phone,
            CustomerField::Email => &form.email,
            CustomerField::Address => &form.address,
            CustomerField::Aadhar => &form.aadhar_number,
            CustomerField::DocumentUrl => &form.document_url,
        }
    }

    fn slot(self, form: &mut CustomerForm) -> &mut String {
        match self {
            CustomerField::Code => &mut form.customer_code,
            CustomerField::FullName => &mut form.full_name,
            CustomerField::Nickname => &mut form.nickname,
            CustomerField::Phone => &mut form.phone,
            CustomerField::Email => &mut form.email,
            CustomerField::Address => &mut form.address,
            CustomerField::Aadhar => &mut form.aadhar_number,
            CustomerField::DocumentUrl => &mut form.document_url,
        }
    }
}

fn missing_required(form: &CustomerForm) -> Vec<CustomerField> {
    CustomerField::ALL
        .into_iter()
        .filter(|f| f.is_required() && f.get(form).trim().is_empty())
        .collect()
}

fn check_required(form: &CustomerForm) -> Result<(), (Vec<CustomerField>, ValidationError)> {
    let missing = missing_required(form);
    if missing.is_empty() {
        return Ok(());
    }
    let labels = missing.iter().map(|f| f.label()).collect();
    Err((missing, ValidationError::MissingFields(labels)))
}

/// "Add customer" form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewCustomerForm {
    form: CustomerForm,
    missing: Vec<CustomerField>,
    error: Option<ValidationError>,
    saving: InFlight<()>,
    outcome: Option<Notice>,
}

impl NewCustomerForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typing into a flagged field clears its flag once it is non-blank.
    pub fn set(&mut self, field: CustomerField, value: impl Into<String>) {
        let value = value.into();
        if !value.trim().is_empty() {
            self.missing.retain(|f| *f != field);
        }
        *field.slot(&mut self.form) = value;
    }

    pub fn value(&self, field: CustomerField) -> &str {
        field.get(&self.form)
    }

    pub fn is_missing(&self, field: CustomerField) -> bool {
        self.missing.contains(&field)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn is_saving(&self) -> bool {
        self.saving.any()
    }

    pub fn outcome(&self) -> Option<&Notice> {
        self.outcome.as_ref()
    }

    /// Validate and mark the form busy. `Ok(None)` while a save is running.
    pub fn begin_create(&mut self) -> Result<Option<CustomerForm>, ValidationError> {
        self.outcome = None;
        if let Err((missing, err)) = check_required(&self.form) {
            self.missing = missing;
            self.error = Some(err.clone());
            return Err(err);
        }
        self.missing.clear();
        self.error = None;
        if !self.saving.try_begin(()) {
            return Ok(None);
        }
        Ok(Some(self.form.clone()))
    }

    /// On success the form is emptied and the new record returned for the
    /// directory; on failure the input is kept.
    pub fn finish_create(&mut self, result: Result<Customer, ApiError>) -> (Notice, Option<Customer>) {
        self.saving.finish(&());
        let (notice, created) = match result {
            Ok(customer) => {
                tracing::info!(customer = customer.customer_id, "customer created");
                self.form = CustomerForm::default();
                let name = if customer.full_name.trim().is_empty() {
                    "Customer".to_string()
                } else {
                    customer.full_name.clone()
                };
                (Notice::success(format!("{name} added successfully!")), Some(customer))
            }
            Err(err) => {
                tracing::warn!(error = %err, "customer create failed");
                (Notice::error(err.action_message(ADD_FAILED)), None)
            }
        };
        self.outcome = Some(notice.clone());
        (notice, created)
    }
}

/// In-place edit of one customer. Read-only until `edit` is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerEditor {
    id: CustomerId,
    saved: CustomerForm,
    form: CustomerForm,
    editing: bool,
    saving: InFlight<()>,
    error: Option<String>,
}

impl CustomerEditor {
    pub fn new(customer: &Customer) -> Self {
        let form = CustomerForm::from_customer(customer);
        Self {
            id: customer.customer_id,
            saved: form.clone(),
            form,
            editing: false,
            saving: InFlight::new(),
            error: None,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_saving(&self) -> bool {
        self.saving.any()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn value(&self, field: CustomerField) -> &str {
        field.get(&self.form)
    }

    pub fn edit(&mut self) {
        self.editing = true;
    }

    /// Drop unsaved input and return to read-only.
    pub fn cancel(&mut self) {
        self.form = self.saved.clone();
        self.editing = false;
        self.error = None;
    }

    /// Ignored unless editing.
    pub fn set(&mut self, field: CustomerField, value: impl Into<String>) {
        if self.editing {
            *field.slot(&mut self.form) = value.into();
        }
    }

    /// `Ok(None)` when not editing or a save is already running.
    pub fn begin_save(&mut self) -> Result<Option<(CustomerId, CustomerForm)>, ValidationError> {
        if !self.editing {
            return Ok(None);
        }
        if let Err((_, err)) = check_required(&self.form) {
            self.error = Some(err.to_string());
            return Err(err);
        }
        if !self.saving.try_begin(()) {
            return Ok(None);
        }
        self.error = None;
        Ok(Some((self.id, self.form.clone())))
    }

    /// Success leaves edit mode showing the server's values and returns the
    /// record for the directory. Failure stays in edit mode.
    pub fn finish_save(&mut self, result: Result<Customer, ApiError>) -> (Notice, Option<Customer>) {
        self.saving.finish(&());
        match result {
            Ok(customer) => {
                tracing::info!(customer = self.id, "customer updated");
                self.saved = CustomerForm::from_customer(&customer);
                self.form = self.saved.clone();
                self.editing = false;
                self.error = None;
                (Notice::success(UPDATE_OK), Some(customer))
            }
            Err(err) => {
                tracing::warn!(customer = self.id, error = %err, "customer update failed");
                let message = err.action_message(UPDATE_FAILED);
                self.error = Some(message.clone());
                (Notice::error(message), None)
            }
        }
    }
}
