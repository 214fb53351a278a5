#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TerminateError {
    #[error("{operation} failed for '{target}': {message}")]
    Provider {
        operation: &'static str,
        target: String,
        message: String,
    },

    #[error("stack '{stack}' does not exist")]
    StackNotFound { stack: String },

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl TerminateError {
    pub fn provider(operation: &'static str, target: &str, message: impl Into<String>) -> Self {
        TerminateError::Provider {
            operation,
            target: target.to_string(),
            message: message.into(),
        }
    }

    /// Stable tag used as the `error_group` field in logs.
    pub fn error_group(&self) -> &'static str {
        match self {
            TerminateError::Provider { operation, .. } => operation,
            TerminateError::StackNotFound { .. } => "stack_not_found",
            TerminateError::Cancelled => "cancelled",
            TerminateError::DeadlineExceeded => "deadline_exceeded",
            TerminateError::InvalidConfiguration { .. } => "invalid_configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let cases = vec![
            (
                TerminateError::provider("delete_objects", "bob-bucket", "access denied"),
                "delete_objects failed for 'bob-bucket': access denied",
            ),
            (
                TerminateError::StackNotFound {
                    stack: "bob".to_string(),
                },
                "stack 'bob' does not exist",
            ),
            (TerminateError::Cancelled, "operation cancelled"),
            (TerminateError::DeadlineExceeded, "deadline exceeded"),
        ];

        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_error_group() {
        assert_eq!(
            TerminateError::provider("list_object_versions", "b", "x").error_group(),
            "list_object_versions"
        );
        assert_eq!(
            TerminateError::StackNotFound {
                stack: "bob".to_string()
            }
            .error_group(),
            "stack_not_found"
        );
        assert_eq!(TerminateError::Cancelled.error_group(), "cancelled");
    }
}
