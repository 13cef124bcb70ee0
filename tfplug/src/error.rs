//! Error types for tfplug

/// Error type for tfplug operations
#[derive(Debug, thiserror::Error)]
pub enum TfplugError {
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Invalid plan for attribute {path}: {reason}")]
    InvalidPlan { path: String, reason: String },

    #[error("Attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Plan cancelled")]
    Cancelled,
}

/// Result type alias for tfplug operations
pub type Result<T> = std::result::Result<T, TfplugError>;
