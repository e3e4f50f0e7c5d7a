//! NoticeState - User-facing Notices with Ring Buffer
//!
//! Failed loads land here with a [`RetryKind`] naming the load to re-run;
//! the presentation layer shows the message and offers the retry.

use crate::constants::NOTICE_CAPACITY;
use crate::helpers::BoundedDeque;
use crate::services::rate_plans::RatePlanQuery;
use crate::services::reservations::ReservationQuery;
use crate::services::vehicles::UnitQuery;
use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

impl NoticeLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "INFO",
            NoticeLevel::Error => "ERROR",
        }
    }
}

/// The load a retry would re-run, with the query it ran with
#[derive(Debug, Clone, PartialEq)]
pub enum RetryKind {
    CurrentUser,
    Units(UnitQuery),
    Models,
    Branches,
    Drivers,
    Reservations(ReservationQuery),
    RatePlans(RatePlanQuery),
    Conversations,
    Messages(String),
    Profile,
}

impl RetryKind {
    pub fn label(&self) -> &'static str {
        match self {
            RetryKind::CurrentUser => "current user",
            RetryKind::Units(_) => "vehicle units",
            RetryKind::Models => "vehicle models",
            RetryKind::Branches => "branches",
            RetryKind::Drivers => "drivers",
            RetryKind::Reservations(_) => "reservations",
            RetryKind::RatePlans(_) => "rate plans",
            RetryKind::Conversations => "conversations",
            RetryKind::Messages(_) => "messages",
            RetryKind::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub retry: Option<RetryKind>,
    pub timestamp: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct NoticeState {
    entries: BoundedDeque<Notice>,
    next_id: u64,
}

impl NoticeState {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BoundedDeque::new(capacity),
            next_id: 1,
        }
    }

    /// Push a notice, returning its id
    pub fn push(
        &mut self,
        level: NoticeLevel,
        message: impl Into<String>,
        retry: Option<RetryKind>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notice {
            id,
            level,
            message: message.into(),
            retry,
            timestamp: Local::now(),
        });
        id
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeLevel::Info, message, None)
    }

    pub fn error(&mut self, message: impl Into<String>, retry: Option<RetryKind>) -> u64 {
        self.push(NoticeLevel::Error, message, retry)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != before
    }

    /// Dismiss a notice and hand back its retry, if it had one
    pub fn take_retry(&mut self, id: u64) -> Option<RetryKind> {
        let retry = self.entries.iter().find(|n| n.id == id)?.retry.clone();
        self.dismiss(id);
        retry
    }

    /// Oldest to newest
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &Notice> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.entries.last()
    }

    pub fn latest_error(&self) -> Option<&Notice> {
        self.entries.iter().rev().find(|n| n.level == NoticeLevel::Error)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for NoticeState {
    fn default() -> Self {
        Self::new(NOTICE_CAPACITY)
    }
}
