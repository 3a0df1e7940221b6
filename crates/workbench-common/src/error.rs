//! Error types for the geo workbench model.

use thiserror::Error;

/// Result type alias using WorkbenchError.
pub type WorkbenchResult<T> = Result<T, WorkbenchError>;

/// Primary error type for model construction, decoding and collaborator calls.
#[derive(Debug, Error)]
pub enum WorkbenchError {
    // === Decoding Errors ===
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Unsupported variant: {0}")]
    UnsupportedVariant(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    // === Collaborator Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend request failed: {0}")]
    Backend(String),
}

/// Category of a [`WorkbenchError`], for callers that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    UnsupportedVariant,
    OutOfRange,
    NotFound,
    Backend,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedInput => "MalformedInput",
            ErrorKind::UnsupportedVariant => "UnsupportedVariant",
            ErrorKind::OutOfRange => "OutOfRange",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Backend => "Backend",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WorkbenchError {
    /// Get the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkbenchError::MalformedInput(_) => ErrorKind::MalformedInput,
            WorkbenchError::UnsupportedVariant(_) => ErrorKind::UnsupportedVariant,
            WorkbenchError::OutOfRange(_) => ErrorKind::OutOfRange,
            WorkbenchError::NotFound(_) => ErrorKind::NotFound,
            WorkbenchError::Backend(_) => ErrorKind::Backend,
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        WorkbenchError::MalformedInput(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        WorkbenchError::UnsupportedVariant(message.into())
    }

    pub fn out_of_range(message: impl Into<String>) -> Self {
        WorkbenchError::OutOfRange(message.into())
    }
}

impl From<serde_json::Error> for WorkbenchError {
    fn from(err: serde_json::Error) -> Self {
        WorkbenchError::MalformedInput(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            WorkbenchError::malformed("x").kind(),
            ErrorKind::MalformedInput
        );
        assert_eq!(
            WorkbenchError::unsupported("x").kind(),
            ErrorKind::UnsupportedVariant
        );
        assert_eq!(
            WorkbenchError::out_of_range("x").kind().as_str(),
            "OutOfRange"
        );
    }

    #[test]
    fn test_json_error_is_malformed_input() {
        let err: WorkbenchError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().starts_with("Malformed input: JSON error"));
    }
}
