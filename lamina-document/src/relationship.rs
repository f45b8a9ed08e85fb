//! Relationship blocks: links and resource linkage.

use serde::{Deserialize, Serialize};

use lamina_schema::RelationshipKind;

use crate::identifier::ResourceIdentifier;

/// Resource linkage: which resource(s) a relationship points to.
///
/// Serializes as `null` (absent to-one), an identifier object, `[]`
/// (absent or empty to-many), or an identifier array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    /// To-one linkage; `None` renders as `null`.
    ToOne(Option<ResourceIdentifier>),
    /// To-many linkage; an absent collection renders as `[]`.
    ToMany(Vec<ResourceIdentifier>),
}

impl Linkage {
    /// The empty linkage for a relationship of the given kind.
    pub fn empty(kind: RelationshipKind) -> Self {
        match kind {
            RelationshipKind::ToOne => Self::ToOne(None),
            RelationshipKind::ToMany => Self::ToMany(Vec::new()),
        }
    }

    /// Check whether this linkage points at nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::ToOne(target) => target.is_none(),
            Self::ToMany(targets) => targets.is_empty(),
        }
    }
}

/// The `links` object of a relationship block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipLinks {
    /// Link to the relationship itself.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Link to the related resource(s).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
}

impl RelationshipLinks {
    /// Check whether neither link resolved.
    pub fn is_empty(&self) -> bool {
        self.self_link.is_none() && self.related.is_none()
    }
}

/// One relationship value within a resource object: `{links?, data?}`.
///
/// `links` is omitted when neither template resolved; `data` is omitted
/// when linkage was neither declared required nor requested via inclusion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipObject {
    /// Links block, if any link resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<RelationshipLinks>,
    /// Resource linkage, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Linkage>,
}
