//! Serialized resource objects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::identifier::ResourceIdentifier;
use crate::relationship::RelationshipObject;

/// Attribute map of a serialized resource.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// One serialized resource: `{type, id, attributes?, relationships?}`.
///
/// Appears as primary `data` and inside `included`. The id attribute never
/// repeats under `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// JSON:API `type` name.
    #[serde(rename = "type")]
    pub resource_type: SmolStr,
    /// Resource id, as a string.
    pub id: String,
    /// Attribute values, omitted when the type declares none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Relationship blocks, omitted when the type declares none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<IndexMap<SmolStr, RelationshipObject>>,
}

impl ResourceObject {
    /// Create a resource object with no attributes or relationships.
    pub fn new(resource_type: impl Into<SmolStr>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            attributes: None,
            relationships: None,
        }
    }

    /// This resource's `(type, id)` identifier.
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.resource_type.clone(), self.id.clone())
    }

    /// Look up a serialized attribute value.
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        self.attributes.as_ref().and_then(|attrs| attrs.get(name))
    }

    /// Look up a relationship block.
    pub fn relationship(&self, name: &str) -> Option<&RelationshipObject> {
        self.relationships.as_ref().and_then(|rels| rels.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_resource_omits_optional_keys() {
        let resource = ResourceObject::new("account", "1");
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"type": "account", "id": "1"})
        );
    }

    #[test]
    fn test_identifier_matches_resource() {
        let resource = ResourceObject::new("user", "99");
        assert_eq!(resource.identifier(), ResourceIdentifier::new("user", "99"));
    }

    #[test]
    fn test_attribute_lookup() {
        let mut attrs = Attributes::new();
        attrs.insert("name".into(), json!("test user"));
        let resource = ResourceObject {
            attributes: Some(attrs),
            ..ResourceObject::new("user", "99")
        };
        assert_eq!(resource.attribute("name"), Some(&json!("test user")));
        assert_eq!(resource.attribute("missing"), None);
    }
}
