//! # lamina-query
//!
//! Request-derived machinery for the Lamina JSON:API toolkit.
//!
//! This crate provides:
//! - Include-list resolution against a declared whitelist (`resolve`,
//!   `IncludeRequest`)
//! - Query-plan augmentation from fetch directives (`QueryPlan`, `augment`)
//! - Page-number pagination links and metadata (`PagerState`, `build_links`)
//! - Env-driven logging initialization (`logging`)
//!
//! ## Include resolution
//!
//! ```rust
//! use lamina_query::include::{DEFAULT_QUERY_KEY, resolve};
//!
//! let params = [("include", "owner,profile"), ("include", "owner")];
//! let resolved = resolve(params, DEFAULT_QUERY_KEY, None);
//!
//! let names: Vec<&str> = resolved.iter().map(|n| n.as_str()).collect();
//! assert_eq!(names, vec!["owner", "profile"]);
//! ```
//!
//! ## Pagination
//!
//! ```rust
//! use lamina_query::pagination::PagerState;
//!
//! let pager = PagerState::new(3, 20, 95);
//! assert_eq!(pager.total_pages(), 5);
//! assert!(pager.has_next());
//! assert!(pager.has_prev());
//! ```

pub mod error;
pub mod include;
pub mod logging;
pub mod pagination;
pub mod plan;

pub use error::{ErrorCode, ErrorContext, QueryError, QueryResult};
pub use include::{DEFAULT_QUERY_KEY, IncludeRequest, resolve};
pub use pagination::{
    PageLinks, PageMeta, PageRequest, PagerState, build_links, build_meta, replace_query_param,
};
pub use plan::{QueryPlan, augment, augment_for};

// Re-export for downstream callers building include sets and plans
pub use indexmap;
pub use smol_str;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{QueryError, QueryResult};
    pub use crate::include::{IncludeRequest, resolve};
    pub use crate::pagination::{PageLinks, PageMeta, PageRequest, PagerState, build_links, build_meta};
    pub use crate::plan::{QueryPlan, augment, augment_for};
}
