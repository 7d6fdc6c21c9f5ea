//! Local-only input widgets. None of these talk to the backend.

use crate::error::ValidationError;
use crate::notice::Notice;
use crate::widgets::payment_collection::parse_amount;

/// Free-text note handed back to the owning page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteDraft {
    text: String,
    error: Option<ValidationError>,
}

impl NoteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.error = None;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn submit(&mut self) -> Result<String, ValidationError> {
        let note = self.text.trim();
        if note.is_empty() {
            let err = ValidationError::Empty("Note");
            self.error = Some(err.clone());
            return Err(err);
        }
        let note = note.to_string();
        self.text.clear();
        self.error = None;
        Ok(note)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EscalationDraft {
    open: bool,
    notes: String,
    error: Option<ValidationError>,
}

impl EscalationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing discards whatever was typed.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.error = None;
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn save(&mut self) -> Result<Notice, ValidationError> {
        let notes = self.notes.trim();
        if notes.is_empty() {
            let err = ValidationError::Empty("Notes");
            self.error = Some(err.clone());
            return Err(err);
        }
        let notice = Notice::success(format!("Saved notes: {notes}"));
        self.close();
        Ok(notice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManualPaymentDraft {
    amount: String,
    error: Option<ValidationError>,
}

impl ManualPaymentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
        self.error = None;
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn submit(&mut self) -> Result<Notice, ValidationError> {
        if let Err(err) = parse_amount(&self.amount) {
            self.error = Some(err.clone());
            return Err(err);
        }
        let notice = Notice::success(format!(
            "Manual payment of \u{20B9}{} added successfully!",
            self.amount.trim()
        ));
        self.amount.clear();
        self.error = None;
        Ok(notice)
    }
}

/// Blacklist / segment tags on a customer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet {
    tags: Vec<String>,
    input: String,
    error: Option<ValidationError>,
}

impl TagSet {
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.error = None;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn add(&mut self) -> Result<(), ValidationError> {
        let tag = self.input.trim();
        let result = if tag.is_empty() {
            Err(ValidationError::Empty("Tag"))
        } else if self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            Err(ValidationError::DuplicateTag(tag.to_string()))
        } else {
            Ok(tag.to_string())
        };
        match result {
            Ok(tag) => {
                self.tags.push(tag);
                self.input.clear();
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }
}
