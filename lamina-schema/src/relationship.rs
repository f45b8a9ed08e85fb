//! Relationship specification types.

use smol_str::SmolStr;

/// Cardinality of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    /// Points at a single related resource (e.g. Account has one Owner).
    ToOne,
    /// Points at a collection of related resources (e.g. User has many Posts).
    ToMany,
}

impl RelationshipKind {
    /// Check if this relationship yields multiple resources.
    pub fn is_many(&self) -> bool {
        matches!(self, Self::ToMany)
    }

    /// Check if this relationship yields a single resource.
    pub fn is_one(&self) -> bool {
        matches!(self, Self::ToOne)
    }
}

/// A lazily-resolved handle to a resource type.
///
/// Handles are resolved against the [`Registry`](crate::Registry) once per
/// serialization call. `SelfRef` names the owning type itself, which is how
/// self-referential graphs (a tree of comments, say) are declared without
/// eager construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaRef {
    /// A registered resource type, by name.
    Named(SmolStr),
    /// The owning resource type.
    SelfRef,
}

impl SchemaRef {
    /// Create a handle to a named resource type.
    ///
    /// The literal name `"self"` resolves to the owning type.
    pub fn named(name: impl Into<SmolStr>) -> Self {
        let name = name.into();
        if name == "self" {
            Self::SelfRef
        } else {
            Self::Named(name)
        }
    }
}

impl From<&str> for SchemaRef {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

/// A declarative eager-load instruction for a relationship.
///
/// The `method` names a join/eager-load step understood by the data-fetch
/// layer; `options` are passed through to it verbatim, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDirective {
    /// Join/eager-load method name resolved by the fetch layer.
    pub method: SmolStr,
    /// Additional fetch options, applied after the join in order.
    pub options: Vec<SmolStr>,
}

impl FetchDirective {
    /// Create a directive for the given join method.
    pub fn new(method: impl Into<SmolStr>) -> Self {
        Self {
            method: method.into(),
            options: Vec::new(),
        }
    }

    /// Append a fetch option.
    pub fn option(mut self, option: impl Into<SmolStr>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Set all fetch options at once.
    pub fn options(mut self, options: impl IntoIterator<Item = impl Into<SmolStr>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Declared specification for one relationship field on a resource type.
///
/// Immutable after registration; one per relationship field. The `attribute`
/// is the owner attribute that feeds resource linkage (often a cheap foreign
/// key), while `include_attribute`, when set, is consulted instead once the
/// relationship is actually included, so the heavy related value is only
/// touched on request.
#[derive(Debug, Clone)]
pub struct RelationshipSpec {
    /// Field name; doubles as the query-string include key.
    pub name: SmolStr,
    /// Relation identifier handed to the data-fetch layer when joining.
    pub target_relation: SmolStr,
    /// Cardinality.
    pub kind: RelationshipKind,
    /// Resource type of the related value(s).
    pub target_type: SchemaRef,
    /// Owner attribute the linkage is derived from.
    pub attribute: SmolStr,
    /// Alternate owner attribute consulted when the relationship is included.
    pub include_attribute: Option<SmolStr>,
    /// Emit resource linkage even when the relationship is not included.
    pub linkage_required: bool,
    /// Eager-load instruction applied to the query plan on inclusion.
    pub fetch: Option<FetchDirective>,
    /// Template for the relationship's `self` link.
    pub self_link: Option<String>,
    /// Template for the relationship's `related` link.
    pub related_link: Option<String>,
}

impl RelationshipSpec {
    fn new(name: impl Into<SmolStr>, kind: RelationshipKind, target: impl Into<SchemaRef>) -> Self {
        let name = name.into();
        Self {
            target_relation: name.clone(),
            attribute: name.clone(),
            name,
            kind,
            target_type: target.into(),
            include_attribute: None,
            linkage_required: false,
            fetch: None,
            self_link: None,
            related_link: None,
        }
    }

    /// Create a to-one relationship spec.
    pub fn to_one(name: impl Into<SmolStr>, target: impl Into<SchemaRef>) -> Self {
        Self::new(name, RelationshipKind::ToOne, target)
    }

    /// Create a to-many relationship spec.
    pub fn to_many(name: impl Into<SmolStr>, target: impl Into<SchemaRef>) -> Self {
        Self::new(name, RelationshipKind::ToMany, target)
    }

    /// Set the relation identifier used by the data-fetch layer.
    ///
    /// Defaults to the field name.
    pub fn target_relation(mut self, relation: impl Into<SmolStr>) -> Self {
        self.target_relation = relation.into();
        self
    }

    /// Set the owner attribute the linkage is derived from.
    ///
    /// Defaults to the field name. A scalar attribute value (a bare foreign
    /// key) is taken as the related id directly; an object contributes its
    /// own id field.
    pub fn attribute(mut self, attribute: impl Into<SmolStr>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Set the alternate attribute consulted when the relationship is included.
    pub fn include_attribute(mut self, attribute: impl Into<SmolStr>) -> Self {
        self.include_attribute = Some(attribute.into());
        self
    }

    /// Always emit resource linkage, included or not.
    pub fn linkage_required(mut self) -> Self {
        self.linkage_required = true;
        self
    }

    /// Attach an eager-load directive.
    pub fn fetch(mut self, directive: FetchDirective) -> Self {
        self.fetch = Some(directive);
        self
    }

    /// Set the `self` link template (`{placeholder}`s are filled from owner
    /// attributes; `{id}` is the owner id).
    pub fn self_link(mut self, template: impl Into<String>) -> Self {
        self.self_link = Some(template.into());
        self
    }

    /// Set the `related` link template.
    pub fn related_link(mut self, template: impl Into<String>) -> Self {
        self.related_link = Some(template.into());
        self
    }

    /// Check whether this spec declares any link template.
    pub fn has_links(&self) -> bool {
        self.self_link.is_some() || self.related_link.is_some()
    }
}
