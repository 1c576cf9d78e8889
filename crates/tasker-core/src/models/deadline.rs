//! Due-date classification relative to a reference instant.
//!
//! The windows are literal: "approaching" means pending and due within the
//! next 24 hours, and the relative label switches from "Due today" to "Due
//! tomorrow" at 24h and from "Due tomorrow" to "In N days" at 48h. The two
//! notions overlap near those boundaries and are kept that way.

use jiff::Timestamp;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Urgency bucket of a pending item with a due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// Due date is in the past
    Overdue,
    /// Due within the next 24 hours
    Approaching,
    /// Due later than that
    Scheduled,
}

/// Deadline view of a due date: its urgency and a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deadline {
    pub due: Timestamp,
    /// `None` for completed items
    pub urgency: Option<Urgency>,
    /// Empty for completed items
    pub label: String,
}

impl Deadline {
    /// Classifies `due` for an item with the given completion state.
    pub fn classify(due: Timestamp, completed: bool, now: Timestamp) -> Self {
        Self {
            due,
            urgency: urgency(due, completed, now),
            label: relative_label(due, completed, now),
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.urgency == Some(Urgency::Overdue)
    }

    pub fn is_approaching(&self) -> bool {
        self.urgency == Some(Urgency::Approaching)
    }
}

/// Urgency of a due date; `None` once the item is completed.
pub fn urgency(due: Timestamp, completed: bool, now: Timestamp) -> Option<Urgency> {
    if completed {
        return None;
    }
    let diff = due.as_millisecond() - now.as_millisecond();
    Some(if diff < 0 {
        Urgency::Overdue
    } else if diff < DAY_MS {
        Urgency::Approaching
    } else {
        Urgency::Scheduled
    })
}

/// Relative-time label such as "Due tomorrow" or "Overdue by 3 days".
pub fn relative_label(due: Timestamp, completed: bool, now: Timestamp) -> String {
    if completed {
        return String::new();
    }
    let diff = due.as_millisecond() - now.as_millisecond();
    let abs_diff = diff.abs();
    let days = abs_diff / DAY_MS;

    if diff < 0 {
        if abs_diff < DAY_MS {
            return "Overdue today".to_string();
        }
        let plural = if days == 1 { "" } else { "s" };
        return format!("Overdue by {days} day{plural}");
    }
    if diff < DAY_MS {
        "Due today".to_string()
    } else if diff < 2 * DAY_MS {
        "Due tomorrow".to_string()
    } else {
        format!("In {days} days")
    }
}
