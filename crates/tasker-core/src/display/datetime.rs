//! DateTime display utilities.
//!
//! Creation times are shown in the system timezone. Due dates are calendar
//! days and are shown as the UTC date they were stored at, so a date entered
//! as `2024-06-01` reads back the same everywhere.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that formats it in the system timezone as
/// `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// A due date formatted as `YYYY-MM-DD` (UTC).
pub struct DueDate<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for DueDate<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y-%m-%d"))
    }
}

/// First eight characters of an id, as shown in lists.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_date_is_utc_day() {
        let due: Timestamp = "2024-06-01T00:00:00Z".parse().unwrap();
        assert_eq!(DueDate(&due).to_string(), "2024-06-01");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
