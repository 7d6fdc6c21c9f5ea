//! Transient success/error notifications shown to the user.

use serde::{Deserialize, Serialize};

use crate::config::NoticeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice notice-success",
            NoticeLevel::Info => "notice notice-info",
            NoticeLevel::Error => "notice notice-error",
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            NoticeLevel::Success => "Success:",
            NoticeLevel::Info => "Info:",
            NoticeLevel::Error => "Error:",
        }
    }
}

/// A notice as produced by a widget, before it is posted to a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NoticeLevel::Success
    }
}

/// A notice on the board, with the id used to dismiss it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedNotice {
    pub id: u64,
    pub notice: Notice,
    pub duration_ms: u64,
}

/// Ordered stack of visible notices, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeBoard {
    next_id: u64,
    visible: Vec<PostedNotice>,
    duration_ms: u64,
    max_visible: usize,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(&NoticeConfig::default())
    }
}

impl NoticeBoard {
    pub fn new(config: &NoticeConfig) -> Self {
        Self {
            next_id: 1,
            visible: Vec::new(),
            duration_ms: config.duration_ms,
            max_visible: config.max_visible.max(1),
        }
    }

    /// Post a notice and return its id. The oldest notice is dropped when
    /// the board is full.
    pub fn post(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.visible.push(PostedNotice {
            id,
            notice,
            duration_ms: self.duration_ms,
        });
        if self.visible.len() > self.max_visible {
            let overflow = self.visible.len() - self.max_visible;
            self.visible.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.visible.len();
        self.visible.retain(|n| n.id != id);
        self.visible.len() != before
    }

    pub fn visible(&self) -> &[PostedNotice] {
        &self.visible
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn clear(&mut self) {
        self.visible.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(max_visible: usize) -> NoticeBoard {
        NoticeBoard::new(&NoticeConfig {
            duration_ms: 4000,
            max_visible,
        })
    }

    #[test]
    fn ids_are_unique_and_dismissable() {
        let mut b = board(5);
        let a = b.post(Notice::success("saved"));
        let c = b.post(Notice::error("failed"));
        assert_ne!(a, c);
        assert!(b.dismiss(a));
        assert!(!b.dismiss(a));
        assert_eq!(b.visible().len(), 1);
        assert_eq!(b.visible()[0].notice.message, "failed");
        assert_eq!(b.visible()[0].duration_ms, 4000);
    }

    #[test]
    fn oldest_notice_is_dropped_when_full() {
        let mut b = board(2);
        b.post(Notice::info("one"));
        b.post(Notice::info("two"));
        b.post(Notice::info("three"));
        let messages: Vec<_> = b.visible().iter().map(|n| n.notice.message.as_str()).collect();
        assert_eq!(messages, ["two", "three"]);
    }
}
