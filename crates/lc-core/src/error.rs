use thiserror::Error;

/// Message shown when a widget is activated without a stored token.
pub const NOT_LOGGED_IN: &str = "User not logged in";

/// Failure of a request against the loan backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No token in the session; the request was never sent.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The request did not produce an HTTP response.
    #[error("transport: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status}{}", reason_suffix(.reason))]
    Status { status: u16, reason: Option<String> },

    /// The response body did not match the expected shape.
    #[error("decode: {0}")]
    Decode(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default()
}

impl ApiError {
    /// Server-supplied reason, when the backend sent one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ApiError::Status { reason, .. } => reason.as_deref(),
            _ => None,
        }
    }

    /// Text for a failed read. The cause is logged, never displayed.
    pub fn fetch_message(&self, generic: &str) -> String {
        match self {
            ApiError::NotAuthenticated => NOT_LOGGED_IN.to_string(),
            _ => generic.to_string(),
        }
    }

    /// Text for a failed write: the server reason when available.
    pub fn action_message(&self, generic: &str) -> String {
        match self {
            ApiError::NotAuthenticated => NOT_LOGGED_IN.to_string(),
            other => other.reason().unwrap_or(generic).to_string(),
        }
    }
}

/// A user input rejected before any request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an agent first.")]
    NoAgentSelected,
    #[error("Please select a schedule to collect payment for.")]
    NoScheduleSelected,
    #[error("Please select at least one file.")]
    NoFiles,
    #[error("Please enter an amount")]
    MissingAmount,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("Tag \"{0}\" already exists")]
    DuplicateTag(String),
    #[error("Please fill the following mandatory fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_includes_reason() {
        let err = ApiError::Status {
            status: 400,
            reason: Some("Agent not found".into()),
        };
        assert_eq!(err.to_string(), "HTTP 400: Agent not found");

        let bare = ApiError::Status {
            status: 500,
            reason: None,
        };
        assert_eq!(bare.to_string(), "HTTP 500");
    }

    #[test]
    fn fetch_message_hides_cause() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.fetch_message("Failed to fetch loan data"), "Failed to fetch loan data");
        assert_eq!(
            ApiError::NotAuthenticated.fetch_message("Failed to fetch loan data"),
            NOT_LOGGED_IN
        );
    }

    #[test]
    fn action_message_prefers_server_reason() {
        let err = ApiError::Status {
            status: 409,
            reason: Some("Installment already paid".into()),
        };
        assert_eq!(err.action_message("Assignment failed"), "Installment already paid");
        assert_eq!(
            ApiError::Decode("eof".into()).action_message("Assignment failed"),
            "Assignment failed"
        );
    }
}
