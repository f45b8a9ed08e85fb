//! # Lamina
//!
//! A JSON:API compound-document toolkit for Rust.
//!
//! Lamina provides:
//! - Declarative resource types with relationship specs and a validating registry
//! - Include-list resolution against a whitelist, with query-plan augmentation
//! - Compound-document serialization with a deduplicated `included` side-list
//! - Page-number pagination links and metadata
//! - Nested validation-error pointer remapping
//!
//! ## Quick Start
//!
//! ```rust
//! use lamina::prelude::*;
//! use serde_json::json;
//!
//! let registry = Registry::builder()
//!     .register(ResourceType::new("user").attribute("name"))
//!     .register(
//!         ResourceType::new("account")
//!             .relationship(
//!                 RelationshipSpec::to_one("owner", "user")
//!                     .attribute("owner_id")
//!                     .include_attribute("owner")
//!                     .linkage_required()
//!                     .fetch(FetchDirective::new("join")),
//!             )
//!             .capabilities(
//!                 Capabilities::new().with_include(IncludeConfig::whitelist(["owner"])),
//!             ),
//!     )
//!     .build()
//!     .unwrap();
//!
//! // Resolve what the client asked to include
//! let account_type = registry.get("account").unwrap();
//! let include = IncludeRequest::from_params(
//!     [("include", "owner")],
//!     account_type.capabilities.include.as_ref().unwrap(),
//! );
//!
//! // Serialize the fetched instance into a compound document
//! let account = json!({"id": 1, "owner_id": 99, "owner": {"id": 99, "name": "test user"}});
//! let doc = serialize_one(&registry, "account", &account, include.resolved()).unwrap();
//! assert!(doc.included.is_some());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Resource-type declarations, registry, and configuration.
pub mod schema {
    pub use lamina_schema::*;
}

/// Include resolution, plan augmentation, and pagination.
pub mod query {
    pub use lamina_query::*;
}

/// Compound-document serialization and error formatting.
pub mod document {
    pub use lamina_document::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::document::{
        CompoundDocument, DocumentError, DocumentResult, ErrorDocument, ErrorEntry, FieldErrors,
        IncludedCollector, Linkage, PrimaryData, RelationshipObject, ResourceIdentifier,
        ResourceObject, Serializer, ValidationErrors, format_errors, serialize_many,
        serialize_one,
    };
    pub use crate::query::{
        IncludeRequest, PageLinks, PageMeta, PageRequest, PagerState, QueryError, QueryPlan,
        QueryResult, augment, augment_for, build_links, build_meta, resolve,
    };
    pub use crate::schema::{
        Capabilities, FetchDirective, IncludeConfig, LaminaConfig, PageConfig, Registry,
        RelationshipKind, RelationshipSpec, ResourceType, SchemaError, SchemaRef, SchemaResult,
    };
}

// Re-export key types at the crate root
pub use document::{CompoundDocument, ErrorDocument, ResourceObject, serialize_many, serialize_one};
pub use query::{IncludeRequest, PagerState, QueryPlan, augment};
pub use schema::{Registry, RelationshipSpec, ResourceType, SchemaError};
