//! Error types for include resolution and plan augmentation.
//!
//! Error codes follow a pattern: L{category}{number}
//! - 1xxx: Request-derived errors (malformed URLs)
//! - 7xxx: Configuration errors (bad whitelist declarations)
//! - 9xxx: Internal errors
//!
//! Configuration errors are programmer errors in relationship declarations
//! and are meant to propagate as hard failures; nothing in this crate turns
//! bad client input into an error (unknown include names are dropped, not
//! rejected).

use std::fmt;
use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request-derived errors (1xxx)
    /// A link URL could not be parsed (L1001).
    InvalidLinkUrl = 1001,

    // Configuration errors (7xxx)
    /// The fetch layer rejected a join method (L7001).
    UnsupportedJoin = 7001,
    /// The fetch layer rejected a fetch option (L7002).
    UnsupportedOption = 7002,

    // Internal errors (9xxx)
    /// Internal error (L9001).
    Internal = 9001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "L7001").
    pub fn code(&self) -> String {
        format!("L{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidLinkUrl => "Invalid link URL",
            Self::UnsupportedJoin => "Unsupported join method",
            Self::UnsupportedOption => "Unsupported fetch option",
            Self::Internal => "Internal error",
        }
    }

    /// Check if this code marks a configuration defect.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnsupportedJoin | Self::UnsupportedOption)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Additional context for an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation that was being performed.
    pub operation: Option<String>,
    /// The relationship involved.
    pub relationship: Option<String>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

/// Errors that can occur during include resolution and plan augmentation.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// Additional context.
    pub context: ErrorContext,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add context about the operation.
    pub fn with_context(mut self, operation: impl Into<String>) -> Self {
        self.context.operation = Some(operation.into());
        self
    }

    /// Set the relationship.
    pub fn with_relationship(mut self, relationship: impl Into<String>) -> Self {
        self.context.relationship = Some(relationship.into());
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create an unsupported-join error.
    pub fn unsupported_join(method: impl Into<String>, relation: impl Into<String>) -> Self {
        let method = method.into();
        let relation = relation.into();
        Self::new(
            ErrorCode::UnsupportedJoin,
            format!("fetch layer does not support join method `{method}` for `{relation}`"),
        )
        .with_relationship(&relation)
        .with_suggestion("Check the fetch directive declared on the relationship spec")
        .with_suggestion("Verify the data-fetch layer registers this join method")
    }

    /// Create an unsupported-option error.
    pub fn unsupported_option(option: impl Into<String>) -> Self {
        let option = option.into();
        Self::new(
            ErrorCode::UnsupportedOption,
            format!("fetch layer does not support option `{option}`"),
        )
        .with_suggestion("Remove the option from the fetch directive or teach the plan about it")
    }

    /// Create an invalid-link-URL error.
    pub fn invalid_link_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(
            ErrorCode::InvalidLinkUrl,
            format!("could not parse request URL `{url}`"),
        )
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    /// Check if this is a configuration error (fatal, not request-recoverable).
    pub fn is_configuration(&self) -> bool {
        self.code.is_configuration()
    }
}
