//! Context-passing resource serialization.
//!
//! A [`Serializer`] is created fresh for one top-level call with the
//! registry and the request's resolved include set, and owns that call's
//! [`IncludedCollector`]. Nothing here mutates schema state, so concurrent
//! requests are independent by construction.
//!
//! Resource instances arrive as `serde_json::Value` maps produced by the
//! data-fetch layer; relationship specs name the attributes inside them.
//!
//! ```rust
//! use indexmap::IndexSet;
//! use lamina_document::serializer::serialize_one;
//! use lamina_schema::{Registry, RelationshipSpec, ResourceType};
//! use serde_json::json;
//!
//! let registry = Registry::builder()
//!     .register(ResourceType::new("user").attribute("name"))
//!     .register(
//!         ResourceType::new("account").relationship(
//!             RelationshipSpec::to_one("owner", "user")
//!                 .attribute("owner_id")
//!                 .include_attribute("owner")
//!                 .linkage_required(),
//!         ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let account = json!({"id": 1, "owner_id": 99, "owner": {"id": 99, "name": "test user"}});
//! let include: IndexSet<smol_str::SmolStr> = ["owner"].into_iter().map(Into::into).collect();
//!
//! let doc = serialize_one(&registry, "account", &account, &include).unwrap();
//! assert_eq!(doc.included.unwrap().len(), 1);
//! ```

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use smol_str::SmolStr;
use tracing::debug;

use lamina_schema::{Registry, RelationshipKind, RelationshipSpec, ResourceType};

use crate::document::CompoundDocument;
use crate::error::{DocumentError, DocumentResult};
use crate::identifier::ResourceIdentifier;
use crate::included::IncludedCollector;
use crate::relationship::{Linkage, RelationshipLinks, RelationshipObject};
use crate::resource::{Attributes, ResourceObject};

/// Per-call serialization state: registry, resolved includes, collector.
#[derive(Debug)]
pub struct Serializer<'a> {
    registry: &'a Registry,
    include: &'a IndexSet<SmolStr>,
    included: IncludedCollector,
}

impl<'a> Serializer<'a> {
    /// Create a serializer for one top-level call.
    pub fn new(registry: &'a Registry, include: &'a IndexSet<SmolStr>) -> Self {
        Self {
            registry,
            include,
            included: IncludedCollector::new(),
        }
    }

    /// The collector accumulated so far.
    pub fn included(&self) -> &IncludedCollector {
        &self.included
    }

    /// Consume the serializer, yielding the `included` array.
    pub fn into_included(self) -> Vec<ResourceObject> {
        self.included.into_vec()
    }

    /// Serialize one resource instance of the given type.
    pub fn resource(&mut self, ty: &ResourceType, value: &Value) -> DocumentResult<ResourceObject> {
        let obj = value
            .as_object()
            .ok_or_else(|| DocumentError::NotAnObject {
                resource_type: ty.name.clone(),
            })?;
        let id = obj
            .get(ty.id_attribute.as_str())
            .and_then(id_string)
            .ok_or_else(|| DocumentError::MissingId {
                resource_type: ty.name.clone(),
                id_attribute: ty.id_attribute.clone(),
            })?;

        let mut attributes = Attributes::new();
        for name in &ty.attributes {
            if *name == ty.id_attribute {
                continue;
            }
            if let Some(value) = obj.get(name.as_str()) {
                attributes.insert(name.to_string(), value.clone());
            }
        }

        let mut relationships = IndexMap::new();
        for spec in ty.relationships.values() {
            relationships.insert(spec.name.clone(), self.relationship(ty, obj, &id, spec)?);
        }

        Ok(ResourceObject {
            resource_type: ty.name.clone(),
            id,
            attributes: (!attributes.is_empty()).then_some(attributes),
            relationships: (!relationships.is_empty()).then_some(relationships),
        })
    }

    /// Serialize one relationship block of an owner instance.
    ///
    /// Linkage comes from the spec's source attribute; when the field is in
    /// the resolved include set, the (possibly alternate) include-time
    /// attribute feeds full serialization into the collector.
    fn relationship(
        &mut self,
        ty: &ResourceType,
        owner: &Map<String, Value>,
        owner_id: &str,
        spec: &RelationshipSpec,
    ) -> DocumentResult<RelationshipObject> {
        let links = links_for(owner, owner_id, spec);
        let included = self.include.contains(spec.name.as_str());

        let registry = self.registry;
        let target = registry.resolve(ty, &spec.target_type)?;

        let data = if spec.linkage_required || included {
            Some(self.linkage(target, spec, owner.get(spec.attribute.as_str()))?)
        } else {
            None
        };

        if included {
            let source = spec.include_attribute.as_ref().unwrap_or(&spec.attribute);
            if let Some(related) = owner.get(source.as_str()).filter(|v| !v.is_null()) {
                debug!(relationship = %spec.name, source = %source, "including related data");
                match spec.kind {
                    RelationshipKind::ToMany => {
                        let items = related.as_array().ok_or_else(|| {
                            DocumentError::ExpectedCollection {
                                relationship: spec.name.clone(),
                            }
                        })?;
                        for item in items {
                            self.include_related(target, item)?;
                        }
                    }
                    RelationshipKind::ToOne => self.include_related(target, related)?,
                }
            }
        }

        Ok(RelationshipObject { links, data })
    }

    /// Serialize a related value into the collector, once per identifier.
    ///
    /// The identifier is reserved before the resource's own relationships
    /// are walked, so cyclic graphs terminate through the collector's
    /// visited-set.
    fn include_related(&mut self, target: &ResourceType, value: &Value) -> DocumentResult<()> {
        let identifier = self.identifier_of(target, None, value)?;
        if !self.included.reserve(identifier.clone()) {
            return Ok(());
        }
        let resource = self.resource(target, value)?;
        self.included.fill(&identifier, resource);
        Ok(())
    }

    fn linkage(
        &self,
        target: &ResourceType,
        spec: &RelationshipSpec,
        value: Option<&Value>,
    ) -> DocumentResult<Linkage> {
        match spec.kind {
            RelationshipKind::ToOne => match value {
                None | Some(Value::Null) => Ok(Linkage::ToOne(None)),
                Some(value) => Ok(Linkage::ToOne(Some(self.identifier_of(
                    target,
                    Some(spec),
                    value,
                )?))),
            },
            RelationshipKind::ToMany => match value {
                None | Some(Value::Null) => Ok(Linkage::ToMany(Vec::new())),
                Some(Value::Array(items)) => Ok(Linkage::ToMany(
                    items
                        .iter()
                        .map(|item| self.identifier_of(target, Some(spec), item))
                        .collect::<DocumentResult<_>>()?,
                )),
                Some(_) => Err(DocumentError::ExpectedCollection {
                    relationship: spec.name.clone(),
                }),
            },
        }
    }

    /// Derive a `(type, id)` identifier from a related value.
    ///
    /// An object contributes its own id field; a scalar is taken as the id
    /// directly (the foreign-key case).
    fn identifier_of(
        &self,
        target: &ResourceType,
        spec: Option<&RelationshipSpec>,
        value: &Value,
    ) -> DocumentResult<ResourceIdentifier> {
        match value {
            Value::Object(obj) => {
                let id = obj
                    .get(target.id_attribute.as_str())
                    .and_then(id_string)
                    .ok_or_else(|| DocumentError::MissingId {
                        resource_type: target.name.clone(),
                        id_attribute: target.id_attribute.clone(),
                    })?;
                Ok(ResourceIdentifier::new(target.name.clone(), id))
            }
            other => {
                let id = id_string(other).ok_or_else(|| DocumentError::InvalidLinkageValue {
                    resource_type: target.name.clone(),
                    relationship: spec.map(|s| s.name.clone()).unwrap_or_default(),
                })?;
                Ok(ResourceIdentifier::new(target.name.clone(), id))
            }
        }
    }
}

/// Serialize a single primary resource into a compound document.
pub fn serialize_one(
    registry: &Registry,
    type_name: &str,
    value: &Value,
    include: &IndexSet<SmolStr>,
) -> DocumentResult<CompoundDocument> {
    let ty = registry.expect(type_name)?;
    let mut serializer = Serializer::new(registry, include);
    let primary = serializer.resource(ty, value)?;
    Ok(CompoundDocument::one(primary).with_included(serializer.into_included()))
}

/// Serialize a page of primary resources into a compound document.
pub fn serialize_many(
    registry: &Registry,
    type_name: &str,
    values: &[Value],
    include: &IndexSet<SmolStr>,
) -> DocumentResult<CompoundDocument> {
    let ty = registry.expect(type_name)?;
    let mut serializer = Serializer::new(registry, include);
    let primary = values
        .iter()
        .map(|value| serializer.resource(ty, value))
        .collect::<DocumentResult<Vec<_>>>()?;
    Ok(CompoundDocument::many(primary).with_included(serializer.into_included()))
}

/// Render a `{placeholder}` link template against an owner instance.
///
/// `{id}` is the owner's id; any other placeholder reads an owner
/// attribute. A placeholder that resolves to nothing kills the whole link.
fn render_link(template: &str, owner_id: &str, owner: &Map<String, Value>) -> Option<String> {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}')?;
        let name = &after[..end];
        if name == "id" {
            out.push_str(owner_id);
        } else {
            out.push_str(&id_string(owner.get(name)?)?);
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    Some(out)
}

fn links_for(
    owner: &Map<String, Value>,
    owner_id: &str,
    spec: &RelationshipSpec,
) -> Option<RelationshipLinks> {
    if !spec.has_links() {
        return None;
    }
    let links = RelationshipLinks {
        self_link: spec
            .self_link
            .as_deref()
            .and_then(|template| render_link(template, owner_id, owner)),
        related: spec
            .related_link
            .as_deref()
            .and_then(|template| render_link(template, owner_id, owner)),
    };
    (!links.is_empty()).then_some(links)
}

/// Stringify an id-bearing scalar. Ids always render as strings.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
