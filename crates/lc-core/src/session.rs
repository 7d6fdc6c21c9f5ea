//! Session: where a widget gets its bearer token from.
//!
//! The token is an injected dependency rather than ambient storage, so tests
//! substitute a [`StaticSession`] and the browser plugs in local storage.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Read-only view of the signed-in user. Widgets never rotate or clear it.
pub trait Session {
    /// Bearer token, or `None` when nobody is signed in.
    fn token(&self) -> Option<String>;

    /// Username of the signed-in user, used by the agent views.
    fn username(&self) -> Option<String> {
        None
    }
}

impl<S: Session + ?Sized> Session for &S {
    fn token(&self) -> Option<String> {
        (**self).token()
    }

    fn username(&self) -> Option<String> {
        (**self).username()
    }
}

impl<S: Session + ?Sized> Session for std::rc::Rc<S> {
    fn token(&self) -> Option<String> {
        (**self).token()
    }

    fn username(&self) -> Option<String> {
        (**self).username()
    }
}

/// Treat blank strings the same as a missing value.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Fixed credentials held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: None,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

impl Session for StaticSession {
    fn token(&self) -> Option<String> {
        non_blank(self.token.clone())
    }

    fn username(&self) -> Option<String> {
        non_blank(self.username.clone())
    }
}

/// Credentials persisted as TOML in a single file (used by the CLI).
///
/// The file is read on every access so a `login` in another shell is picked
/// up without restarting anything.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file contents, or an anonymous session when absent/unreadable.
    pub fn load(&self) -> StaticSession {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => toml::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable session file");
                StaticSession::anonymous()
            }),
            Err(_) => StaticSession::anonymous(),
        }
    }

    pub fn store(&self, session: &StaticSession) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(session)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, text)
    }

    pub fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl Session for FileSession {
    fn token(&self) -> Option<String> {
        self.load().token()
    }

    fn username(&self) -> Option<String> {
        self.load().username()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_counts_as_absent() {
        let session = StaticSession::new("   ");
        assert_eq!(session.token(), None);
        assert_eq!(StaticSession::anonymous().token(), None);
        assert_eq!(StaticSession::new("abc").token().as_deref(), Some("abc"));
    }

    #[test]
    fn file_session_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let session = FileSession::new(dir.path().join("nested").join("token"));
        assert_eq!(session.token(), None);

        session
            .store(&StaticSession::new("tok-1").with_username("ravi"))
            .unwrap();
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert_eq!(session.username().as_deref(), Some("ravi"));

        session.clear().unwrap();
        assert_eq!(session.token(), None);
        session.clear().unwrap();
    }
}
