//! Toast notices.
//!
//! Short messages shown after a delete or a failure. Each notice expires a
//! fixed time after it was posted; the board is pruned against an injected
//! clock so tests control time.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// An action completed.
    Success,
    /// An action failed.
    Error,
}

/// One toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Tone.
    pub kind: NoticeKind,
    /// Text shown to the user.
    pub message: String,
    /// When the notice disappears.
    pub expires_at: DateTime<Utc>,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.kind {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "!",
        };
        write!(f, "{marker} {}", self.message)
    }
}

/// Active notices, oldest first.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    lifetime: Duration,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    /// Creates a board whose notices live `lifetime_ms` milliseconds.
    #[must_use]
    pub fn new(lifetime_ms: u64) -> Self {
        Self {
            lifetime: Duration::milliseconds(i64::try_from(lifetime_ms).unwrap_or(i64::MAX)),
            notices: Vec::new(),
        }
    }

    /// Posts a notice at `now`.
    pub fn post(&mut self, kind: NoticeKind, message: impl Into<String>, now: DateTime<Utc>) {
        let expires_at = now
            .checked_add_signed(self.lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.notices.push(Notice {
            kind,
            message: message.into(),
            expires_at,
        });
    }

    /// Drops expired notices. Returns true if any were dropped.
    pub fn prune(&mut self, now: DateTime<Utc>) -> bool {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.expires_at > now);
        self.notices.len() != before
    }

    /// Returns the notices still visible at `now`.
    #[must_use]
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Notice> {
        self.notices
            .iter()
            .filter(|notice| notice.expires_at > now)
            .cloned()
            .collect()
    }

    /// Time from `now` until the next notice expires.
    #[must_use]
    pub fn until_next_expiry(&self, now: DateTime<Utc>) -> Option<std::time::Duration> {
        self.notices
            .iter()
            .map(|notice| notice.expires_at)
            .min()
            .map(|at| (at - now).to_std().unwrap_or_default())
    }

    /// Returns true if no notices are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
