//! Error types for resource-type declaration and registration.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur while declaring or registering resource types.
///
/// Every variant here is a configuration defect: it is raised at
/// registration time (or on first use for lazily-resolved handles) and is
/// never produced by bad client input.
#[derive(Error, Debug, Diagnostic)]
pub enum SchemaError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(lamina::schema::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(lamina::schema::toml_error))]
    TomlError {
        #[source]
        source: toml::de::Error,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(lamina::schema::config_error))]
    ConfigError { message: String },

    /// Duplicate definition.
    #[error("duplicate {kind} `{name}`")]
    #[diagnostic(code(lamina::schema::duplicate))]
    Duplicate { kind: String, name: String },

    /// A relationship names a target type that is not registered.
    #[error("unresolved schema `{target}` in `{resource}.{relationship}`")]
    #[diagnostic(code(lamina::schema::unresolved_schema))]
    UnresolvedSchema {
        resource: String,
        relationship: String,
        target: String,
    },

    /// Invalid relationship definition.
    #[error("invalid relationship `{resource}.{relationship}`: {message}")]
    #[diagnostic(code(lamina::schema::invalid_relationship))]
    InvalidRelationship {
        resource: String,
        relationship: String,
        message: String,
    },

    /// An includable-name whitelist entry does not match a declared relationship.
    #[error("includable name `{name}` on `{resource}` matches no declared relationship")]
    #[diagnostic(code(lamina::schema::unknown_includable))]
    UnknownIncludable { resource: String, name: String },

    /// Validation error with multiple issues.
    #[error("registry validation failed with {count} error(s)")]
    #[diagnostic(code(lamina::schema::validation_failed))]
    ValidationFailed {
        count: usize,
        #[related]
        errors: Vec<SchemaError>,
    },
}

impl SchemaError {
    /// Create a configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Collapse a list of errors into a single error.
    ///
    /// One error is returned as-is; several are wrapped in
    /// [`SchemaError::ValidationFailed`].
    pub fn from_errors(mut errors: Vec<SchemaError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => Some(errors.remove(0)),
            count => Some(Self::ValidationFailed { count, errors }),
        }
    }
}
