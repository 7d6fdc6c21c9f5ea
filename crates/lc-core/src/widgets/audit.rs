pub const NO_ACTIONS: &str = "No actions recorded yet.";
pub const DEFAULT_ACTOR: &str = "Admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub user: String,
    pub action: String,
    pub timestamp: String,
}

/// Append-only log of local operator actions, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        user: impl Into<String>,
        action: impl Into<String>,
        timestamp: impl Into<String>,
    ) {
        self.entries.push(AuditEntry {
            user: user.into(),
            action: action.into(),
            timestamp: timestamp.into(),
        });
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
