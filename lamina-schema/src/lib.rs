//! # lamina-schema
//!
//! Resource-type declarations and registry for the Lamina JSON:API toolkit.
//!
//! This crate provides:
//! - Declaration types for resource types, attributes, and relationships
//! - A validating registry with fail-fast registration checks
//! - Capability composition (inclusion, pagination, nested-error remapping)
//! - Configuration parser for `lamina.toml` files
//!
//! ## Example
//!
//! ```rust
//! use lamina_schema::{
//!     Capabilities, FetchDirective, IncludeConfig, Registry, RelationshipSpec, ResourceType,
//! };
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
//!     .expect("registry is well-formed");
//!
//! assert!(registry.get("account").is_some());
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod relationship;
pub mod resource;

pub use config::LaminaConfig;
pub use error::{SchemaError, SchemaResult};
pub use registry::{Registry, RegistryBuilder};
pub use relationship::{FetchDirective, RelationshipKind, RelationshipSpec, SchemaRef};
pub use resource::{Capabilities, IncludeConfig, PageConfig, ResourceType};
