//! Error types for document serialization.

use smol_str::SmolStr;
use thiserror::Error;

use lamina_schema::SchemaError;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while serializing a compound document.
///
/// Serialization fails atomically: when any of these surfaces, no partial
/// document is returned.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A resource value was not a JSON object.
    #[error("`{resource_type}` value is not a JSON object")]
    NotAnObject { resource_type: SmolStr },

    /// A resource value carried no usable id.
    #[error("`{resource_type}` value has no usable `{id_attribute}` attribute")]
    MissingId {
        resource_type: SmolStr,
        id_attribute: SmolStr,
    },

    /// A linkage source value was neither an object nor an id scalar.
    #[error("relationship `{relationship}` linkage value for `{resource_type}` is not an id or object")]
    InvalidLinkageValue {
        resource_type: SmolStr,
        relationship: SmolStr,
    },

    /// A to-many relationship's source value was not an array.
    #[error("to-many relationship `{relationship}` expects a collection value")]
    ExpectedCollection { relationship: SmolStr },

    /// A schema handle failed to resolve.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_errors_convert() {
        let err: DocumentError = SchemaError::config("boom").into();
        assert!(matches!(err, DocumentError::Schema(_)));
    }

    #[test]
    fn test_display_names_the_relationship() {
        let err = DocumentError::ExpectedCollection {
            relationship: "posts".into(),
        };
        assert!(err.to_string().contains("posts"));
    }
}
