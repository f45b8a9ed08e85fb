//! # lamina-document
//!
//! Compound-document serialization for the Lamina JSON:API toolkit.
//!
//! This crate turns resource instances (as `serde_json::Value` maps from a
//! data-fetch layer) into JSON:API compound documents:
//! - Resource objects with `{type, id, attributes?, relationships?}`
//! - Relationship blocks carrying links and resource linkage
//! - A deduplicated, first-seen-ordered `included` side-list
//! - Validation-error documents with nested pointer remapping
//!
//! ## Example
//!
//! ```rust
//! use indexmap::IndexSet;
//! use lamina_document::serialize_one;
//! use lamina_schema::{Registry, RelationshipSpec, ResourceType};
//! use serde_json::json;
//! use smol_str::SmolStr;
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
//! let include: IndexSet<SmolStr> = ["owner"].into_iter().map(Into::into).collect();
//! let account = json!({"id": 1, "owner_id": 99, "owner": {"id": 99, "name": "test user"}});
//!
//! let doc = serialize_one(&registry, "account", &account, &include).unwrap();
//! let json = serde_json::to_value(&doc).unwrap();
//! assert_eq!(json["data"]["relationships"]["owner"]["data"]["id"], "99");
//! assert_eq!(json["included"][0]["attributes"]["name"], "test user");
//! ```

pub mod document;
pub mod error;
pub mod errors;
pub mod identifier;
pub mod included;
pub mod relationship;
pub mod resource;
pub mod serializer;

pub use document::{CompoundDocument, ErrorDocument, PrimaryData};
pub use error::{DocumentError, DocumentResult};
pub use errors::{
    ErrorEntry, ErrorSource, FieldErrors, ValidationErrors, format_errors, remap_nested,
};
pub use identifier::ResourceIdentifier;
pub use included::IncludedCollector;
pub use relationship::{Linkage, RelationshipLinks, RelationshipObject};
pub use resource::{Attributes, ResourceObject};
pub use serializer::{Serializer, serialize_many, serialize_one};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::document::{CompoundDocument, ErrorDocument, PrimaryData};
    pub use crate::error::{DocumentError, DocumentResult};
    pub use crate::errors::{ErrorEntry, FieldErrors, ValidationErrors, format_errors};
    pub use crate::identifier::ResourceIdentifier;
    pub use crate::included::IncludedCollector;
    pub use crate::relationship::{Linkage, RelationshipObject};
    pub use crate::resource::ResourceObject;
    pub use crate::serializer::{Serializer, serialize_many, serialize_one};
}
