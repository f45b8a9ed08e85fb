//! Include-list resolution against a declared whitelist.
//!
//! A client asks for relationship inclusion with one or more `include`
//! query parameters, each a comma-separated list of relationship names:
//!
//! ```text
//! GET /accounts/1?include=owner,profile&include=owner
//! ```
//!
//! [`resolve`] flattens every occurrence, filters against the whitelist when
//! one is configured, and preserves first-seen order with duplicates
//! removed. Unknown names are silently dropped — a deliberate permissive
//! policy, not an error path.

use indexmap::IndexSet;
use smallvec::SmallVec;
use smol_str::SmolStr;
use tracing::debug;

use lamina_schema::IncludeConfig;

/// Default query-string key for include names.
pub const DEFAULT_QUERY_KEY: &str = "include";

/// Resolve requested include names against an optional whitelist.
///
/// `params` is the request's query-parameter multimap; every occurrence of
/// `query_key` contributes its comma-separated values in order. With a
/// whitelist, only listed names survive; without one, every requested name
/// is accepted verbatim. Pure — calling twice with the same input yields
/// the same set.
pub fn resolve<'a>(
    params: impl IntoIterator<Item = (&'a str, &'a str)>,
    query_key: &str,
    whitelist: Option<&IndexSet<SmolStr>>,
) -> IndexSet<SmolStr> {
    let mut resolved = IndexSet::new();

    for (key, value) in params {
        if key != query_key {
            continue;
        }
        for name in value.split(',') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if let Some(allowed) = whitelist {
                if !allowed.contains(name) {
                    debug!(name, "dropping unknown include name");
                    continue;
                }
            }
            resolved.insert(SmolStr::new(name));
        }
    }

    resolved
}

/// The per-request inclusion state: what the client asked for and what
/// survived the whitelist.
///
/// Created once per request and discarded at its end. `resolved` is always
/// a subset of the whitelist when one is configured.
#[derive(Debug, Clone, Default)]
pub struct IncludeRequest {
    requested: SmallVec<[SmolStr; 4]>,
    resolved: IndexSet<SmolStr>,
}

impl IncludeRequest {
    /// Build an include request from query parameters and a type's include
    /// configuration.
    pub fn from_params<'a>(
        params: impl IntoIterator<Item = (&'a str, &'a str)> + Clone,
        config: &IncludeConfig,
    ) -> Self {
        let mut requested = SmallVec::new();
        for (key, value) in params.clone() {
            if key != config.query_key {
                continue;
            }
            for name in value.split(',') {
                let name = name.trim();
                if !name.is_empty() {
                    requested.push(SmolStr::new(name));
                }
            }
        }

        let resolved = resolve(params, &config.query_key, config.includable.as_ref());
        Self { requested, resolved }
    }

    /// Build an include request from an already-resolved set.
    pub fn from_resolved(resolved: IndexSet<SmolStr>) -> Self {
        Self {
            requested: resolved.iter().cloned().collect(),
            resolved,
        }
    }

    /// Raw requested names, in request order, duplicates preserved.
    pub fn requested(&self) -> &[SmolStr] {
        &self.requested
    }

    /// Accepted names, in request order, deduplicated.
    pub fn resolved(&self) -> &IndexSet<SmolStr> {
        &self.resolved
    }

    /// Check whether a relationship name was accepted.
    pub fn contains(&self, name: &str) -> bool {
        self.resolved.contains(name)
    }

    /// Check whether anything was accepted.
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whitelist(names: &[&str]) -> IndexSet<SmolStr> {
        names.iter().map(|n| SmolStr::new(n)).collect()
    }

    #[test]
    fn test_resolve_no_whitelist_accepts_all() {
        let params = [("include", "owner,profile"), ("other", "x")];
        let resolved = resolve(params, DEFAULT_QUERY_KEY, None);
        let names: Vec<&str> = resolved.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["owner", "profile"]);
    }

    #[test]
    fn test_resolve_filters_unknown_names() {
        let allowed = whitelist(&["owner"]);
        let params = [("include", "owner,profile,garbage")];
        let resolved = resolve(params, DEFAULT_QUERY_KEY, Some(&allowed));
        let names: Vec<&str> = resolved.iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["owner"]);
    }

    #[test]
    fn test_resolve_repeated_params_concatenate() {
        let params = [("include", "owner"), ("include", "profile,owner")];
        let resolved = resolve(params, DEFAULT_QUERY_KEY, None);
        let names: Vec<&str> = resolved.iter().map(|n| n.as_str()).collect();
        // Order is first-seen; the duplicate owner does not move or repeat
        assert_eq!(names, vec!["owner", "profile"]);
    }

    #[test]
    fn test_resolve_trims_empty_segments() {
        let params = [("include", "owner,,  ,profile,")];
        let resolved = resolve(params, DEFAULT_QUERY_KEY, None);
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_resolve_is_stable() {
        let allowed = whitelist(&["a", "b"]);
        let params = [("include", "b,a,c")];
        let once = resolve(params, DEFAULT_QUERY_KEY, Some(&allowed));
        let twice = resolve(params, DEFAULT_QUERY_KEY, Some(&allowed));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_include_request_from_params() {
        let config = IncludeConfig::whitelist(["owner", "profile"]);
        let params = [("include", "owner,garbage,owner")];
        let request = IncludeRequest::from_params(params, &config);

        assert_eq!(request.requested().len(), 3);
        assert_eq!(request.resolved().len(), 1);
        assert!(request.contains("owner"));
        assert!(!request.contains("garbage"));
    }

    #[test]
    fn test_include_request_custom_key() {
        let config = IncludeConfig::all().query_key("expand");
        let params = [("include", "owner"), ("expand", "profile")];
        let request = IncludeRequest::from_params(params, &config);
        assert!(request.contains("profile"));
        assert!(!request.contains("owner"));
    }

    #[test]
    fn test_include_request_empty() {
        let config = IncludeConfig::all();
        let request = IncludeRequest::from_params([] as [(&str, &str); 0], &config);
        assert!(request.is_empty());
    }
}
