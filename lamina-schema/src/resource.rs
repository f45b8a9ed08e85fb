//! Resource-type declarations and capability composition.

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;

use crate::relationship::RelationshipSpec;

/// Declared description of one resource type.
///
/// A resource type pairs a JSON:API `type` name with the attributes and
/// relationships it serializes. Instances are immutable once registered;
/// request-dependent behavior (which relationships to include, pagination
/// state) travels in per-call context values, never in the type itself.
#[derive(Debug, Clone)]
pub struct ResourceType {
    /// JSON:API `type` name.
    pub name: SmolStr,
    /// Owner attribute carrying the resource id.
    pub id_attribute: SmolStr,
    /// Attributes serialized under `attributes`, in declaration order.
    pub attributes: Vec<SmolStr>,
    /// Relationship fields, in declaration order.
    pub relationships: IndexMap<SmolStr, RelationshipSpec>,
    /// Optional behaviors attached to this type.
    pub capabilities: Capabilities,
}

impl ResourceType {
    /// Create a resource type with the given JSON:API `type` name.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            id_attribute: SmolStr::new_static("id"),
            attributes: Vec::new(),
            relationships: IndexMap::new(),
            capabilities: Capabilities::default(),
        }
    }

    /// Set the attribute carrying the resource id. Defaults to `id`.
    pub fn id_attribute(mut self, attribute: impl Into<SmolStr>) -> Self {
        self.id_attribute = attribute.into();
        self
    }

    /// Declare a serialized attribute.
    pub fn attribute(mut self, name: impl Into<SmolStr>) -> Self {
        self.attributes.push(name.into());
        self
    }

    /// Declare several serialized attributes at once.
    pub fn attributes(mut self, names: impl IntoIterator<Item = impl Into<SmolStr>>) -> Self {
        self.attributes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a relationship field.
    pub fn relationship(mut self, spec: RelationshipSpec) -> Self {
        self.relationships.insert(spec.name.clone(), spec);
        self
    }

    /// Attach capabilities.
    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Look up a relationship spec by field name.
    pub fn relationship_spec(&self, name: &str) -> Option<&RelationshipSpec> {
        self.relationships.get(name)
    }

    /// The include whitelist for this type, if inclusion is enabled and
    /// restricted. `None` either way means "no restriction applies".
    pub fn includable(&self) -> Option<&IndexSet<SmolStr>> {
        self.capabilities
            .include
            .as_ref()
            .and_then(|cfg| cfg.includable.as_ref())
    }
}

/// Orthogonal behaviors a resource type opts into.
///
/// Each capability is an independent strategy value composed at
/// construction time; a type without a capability simply never exercises
/// the corresponding machinery.
#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// Relationship inclusion via the `include` query parameter.
    pub include: Option<IncludeConfig>,
    /// Page-number pagination.
    pub pagination: Option<PageConfig>,
    /// Nested validation-error pointer remapping.
    pub nested_errors: bool,
}

impl Capabilities {
    /// No capabilities.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable inclusion.
    pub fn with_include(mut self, config: IncludeConfig) -> Self {
        self.include = Some(config);
        self
    }

    /// Enable pagination.
    pub fn with_pagination(mut self, config: PageConfig) -> Self {
        self.pagination = Some(config);
        self
    }

    /// Enable nested-error remapping.
    pub fn with_nested_errors(mut self) -> Self {
        self.nested_errors = true;
        self
    }
}

/// Inclusion capability configuration.
#[derive(Debug, Clone)]
pub struct IncludeConfig {
    /// Query-string key carrying include names.
    pub query_key: SmolStr,
    /// Names accepted for inclusion. `None` accepts every requested name.
    pub includable: Option<IndexSet<SmolStr>>,
}

impl IncludeConfig {
    /// Accept every requested include name.
    pub fn all() -> Self {
        Self {
            query_key: SmolStr::new_static("include"),
            includable: None,
        }
    }

    /// Accept only the given names.
    pub fn whitelist(names: impl IntoIterator<Item = impl Into<SmolStr>>) -> Self {
        Self {
            query_key: SmolStr::new_static("include"),
            includable: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Override the query-string key. Defaults to `include`.
    pub fn query_key(mut self, key: impl Into<SmolStr>) -> Self {
        self.query_key = key.into();
        self
    }
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self::all()
    }
}

/// Pagination capability configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageConfig {
    /// Query parameter carrying the 1-based page number.
    pub page_param: SmolStr,
    /// Query parameter carrying the requested page size.
    pub size_param: SmolStr,
    /// Page size used when the client does not ask for one.
    pub default_size: u64,
    /// Server-enforced page-size ceiling.
    pub max_size: u64,
}

impl PageConfig {
    /// Override the page-number parameter name.
    pub fn page_param(mut self, name: impl Into<SmolStr>) -> Self {
        self.page_param = name.into();
        self
    }

    /// Override the page-size parameter name.
    pub fn size_param(mut self, name: impl Into<SmolStr>) -> Self {
        self.size_param = name.into();
        self
    }

    /// Set the default page size.
    pub fn default_size(mut self, size: u64) -> Self {
        self.default_size = size;
        self
    }

    /// Set the page-size ceiling.
    pub fn max_size(mut self, size: u64) -> Self {
        self.max_size = size;
        self
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            page_param: SmolStr::new_static("page[number]"),
            size_param: SmolStr::new_static("page[size]"),
            default_size: 10,
            max_size: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationship::RelationshipSpec;

    #[test]
    fn test_resource_type_builder() {
        let ty = ResourceType::new("account")
            .attributes(["balance", "opened_at"])
            .relationship(RelationshipSpec::to_one("owner", "user"));

        assert_eq!(ty.name, "account");
        assert_eq!(ty.id_attribute, "id");
        assert_eq!(ty.attributes.len(), 2);
        assert!(ty.relationship_spec("owner").is_some());
        assert!(ty.relationship_spec("missing").is_none());
    }

    #[test]
    fn test_relationship_order_preserved() {
        let ty = ResourceType::new("account")
            .relationship(RelationshipSpec::to_one("profile", "profile"))
            .relationship(RelationshipSpec::to_one("owner", "user"));

        let names: Vec<&str> = ty.relationships.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["profile", "owner"]);
    }

    #[test]
    fn test_includable_whitelist() {
        let ty = ResourceType::new("account").capabilities(
            Capabilities::new().with_include(IncludeConfig::whitelist(["owner"])),
        );
        let includable = ty.includable().unwrap();
        assert!(includable.contains("owner"));
        assert!(!includable.contains("profile"));

        let open = ResourceType::new("account")
            .capabilities(Capabilities::new().with_include(IncludeConfig::all()));
        assert!(open.includable().is_none());
    }

    #[test]
    fn test_page_config_defaults() {
        let cfg = PageConfig::default();
        assert_eq!(cfg.page_param, "page[number]");
        assert_eq!(cfg.size_param, "page[size]");
        assert_eq!(cfg.max_size, 50);
    }
}
