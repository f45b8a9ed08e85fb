//! Top-level document shapes.

use serde::{Deserialize, Serialize};

use lamina_query::{PageLinks, PageMeta};

use crate::errors::ErrorEntry;
use crate::resource::ResourceObject;

/// The primary `data` section: one resource or an ordered page of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// A single primary resource.
    One(ResourceObject),
    /// A page of primary resources.
    Many(Vec<ResourceObject>),
}

/// A compound document: primary data plus the flattened side-list of every
/// distinct related resource pulled in transitively.
///
/// `links` and `meta` appear in pagination contexts only; `included` is
/// omitted when nothing was included. A serialization call either yields a
/// whole document or fails — no partial documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundDocument {
    /// Primary resource(s).
    pub data: PrimaryData,
    /// Pagination links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
    /// Pagination metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
    /// Distinct related resources, first-seen order, each exactly once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,
}

impl CompoundDocument {
    /// Create a single-resource document.
    pub fn one(resource: ResourceObject) -> Self {
        Self {
            data: PrimaryData::One(resource),
            links: None,
            meta: None,
            included: None,
        }
    }

    /// Create a resource-collection document.
    pub fn many(resources: Vec<ResourceObject>) -> Self {
        Self {
            data: PrimaryData::Many(resources),
            links: None,
            meta: None,
            included: None,
        }
    }

    /// Attach the `included` array; an empty one leaves the key omitted.
    pub fn with_included(mut self, included: Vec<ResourceObject>) -> Self {
        self.included = (!included.is_empty()).then_some(included);
        self
    }

    /// Attach pagination links.
    pub fn with_links(mut self, links: PageLinks) -> Self {
        self.links = Some(links);
        self
    }

    /// Attach pagination metadata.
    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// A validation-failure document: `errors` only, never alongside `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    /// Formatted error entries, in input order.
    pub errors: Vec<ErrorEntry>,
}

impl ErrorDocument {
    /// Create an error document from entries.
    pub fn new(errors: Vec<ErrorEntry>) -> Self {
        Self { errors }
    }
}
