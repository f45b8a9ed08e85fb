//! Resource identifiers: the `(type, id)` deduplication key.

use std::fmt;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A `(type, id)` pair identifying one resource without embedding it.
///
/// Two resources with the same identifier are the same resource; the
/// `included` section of a compound document carries each identifier at
/// most once. Ids always serialize as JSON strings, whatever the source
/// attribute's type was.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// JSON:API `type` name.
    #[serde(rename = "type")]
    pub resource_type: SmolStr,
    /// Resource id, as a string.
    pub id: String,
}

impl ResourceIdentifier {
    /// Create an identifier.
    pub fn new(resource_type: impl Into<SmolStr>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_equality() {
        let a = ResourceIdentifier::new("user", "99");
        let b = ResourceIdentifier::new("user", "99");
        let c = ResourceIdentifier::new("profile", "99");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_identifier_serializes_with_type_key() {
        let json = serde_json::to_value(ResourceIdentifier::new("user", "99")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "user", "id": "99"}));
    }

    #[test]
    fn test_identifier_display() {
        assert_eq!(ResourceIdentifier::new("user", "99").to_string(), "user:99");
    }
}
