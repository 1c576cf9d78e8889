//! Status and confirmation message types for operation feedback.

use std::fmt;

/// Wrapper type for displaying operation confirmation messages.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }

    /// Failure reported when an id or prefix matched nothing. Lookups that
    /// miss leave the collection untouched.
    pub fn no_match(id: &str) -> Self {
        Self::failure(format!("No task or sub-task matches '{id}'. Nothing changed."))
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}",
            if self.success { "Success:" } else { "Error:" },
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Operation completed");
        assert!(format!("{success}").contains("Success:"));

        let failure = OperationStatus::no_match("abc");
        assert!(!failure.success);
        assert_eq!(
            failure.to_string(),
            "Error: No task or sub-task matches 'abc'. Nothing changed.\n"
        );
    }
}
