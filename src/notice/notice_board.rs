// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::{Arc, Mutex};

/// How a notice should be presented to the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Severity {
    /// Neutral progress information.
    Info,
    /// A completed action, e.g. "details saved".
    Success,
    /// A failed action the user may need to react to.
    Error,
}

/// A single user-visible notification.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    /// Presentation severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
}

#[derive(Default)]
pub struct BoardInner {
    pub(crate) notices: Vec<Notice>,
    pub(crate) error: bool,
}

/// Thread-safe collector of user-visible notifications.
#[derive(Clone, Default)]
pub struct NoticeBoard {
    pub(crate) debug: bool,
    pub(crate) inner: Arc<Mutex<BoardInner>>,
}

impl NoticeBoard {
    /// Whether any error notice has been posted.
    pub fn contains_errors(&self) -> bool {
        self.inner
            .lock()
            .ok()
            .map(|inner| inner.error)
            .unwrap_or(false)
    }

    /// Post an error notice.
    pub fn error(&self, message: String) {
        self.post(Severity::Error, message);
    }

    /// Post an informational notice.
    pub fn info(&self, message: String) {
        self.post(Severity::Info, message);
    }

    /// Create a new notice board.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            inner: Arc::new(Mutex::new(Default::default())),
        }
    }

    /// Returns a snapshot of the posted notices, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.inner
            .lock()
            .ok()
            .map(|inner| inner.notices.clone())
            .unwrap_or_default()
    }

    fn post(&self, severity: Severity, message: String) {
        if !message.is_empty() {
            if self.debug {
                println!("{severity:?}: {message}");
            }
            if let Ok(mut inner) = self.inner.lock() {
                if severity == Severity::Error {
                    inner.error = true;
                }
                inner.notices.push(Notice { severity, message });
            }
        }
    }

    /// Post a success notice.
    pub fn success(&self, message: String) {
        self.post(Severity::Success, message);
    }
}

impl ToString for NoticeBoard {
    fn to_string(&self) -> String {
        if let Ok(inner) = self.inner.lock() {
            if inner.notices.is_empty() {
                String::default()
            } else {
                inner
                    .notices
                    .iter()
                    .map(|notice| notice.message.clone())
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        } else {
            String::default()
        }
    }
}
