use thiserror::Error;

/// Errors that can occur while building or serializing a payment message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SepaError {
    /// A field value failed its pattern, length or membership rule.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An entity of the wrong variant was handed to an add operation.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// Invalid message mode or payment method at construction time.
    #[error("construction error: {0}")]
    Construction(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// A single rejected field assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the rejected field (e.g. "MsgId", "creditor IBAN").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl SepaError {
    /// The underlying validation error, if this is a `Validation` failure.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}
