//! Query-plan augmentation from resolved include names.
//!
//! The data-fetch layer hands in something that implements [`QueryPlan`];
//! [`augment`] walks the resolved include names in request order and applies
//! each relationship's fetch directive so that related data is available
//! without additional round trips. Lamina never issues queries itself.

use indexmap::{IndexMap, IndexSet};
use smol_str::SmolStr;
use tracing::debug;

use lamina_schema::{RelationshipSpec, ResourceType};

use crate::error::QueryResult;

/// The narrow interface Lamina needs from a query plan.
///
/// Both methods must tolerate empty input. A plan that deduplicates joins
/// by name makes [`augment`] idempotent; Lamina relies on the fetch layer
/// for that property rather than tracking applied joins itself.
pub trait QueryPlan {
    /// Apply a named join/eager-load step for a relation.
    ///
    /// An unrecognized `method` is a configuration defect in the
    /// relationship declaration; implementations surface it via
    /// [`QueryError::unsupported_join`](crate::QueryError::unsupported_join).
    fn apply_join(&mut self, method: &str, relation: &str) -> QueryResult<()>;

    /// Apply fetch options, in order.
    fn apply_options(&mut self, options: &[SmolStr]) -> QueryResult<()>;
}

/// Apply the fetch directives of every resolved relationship to a plan.
///
/// Names are visited in resolution order (the client's requested order,
/// filtered). Names absent from `specs`, and specs without a directive,
/// leave the plan untouched. An empty `resolved` set is a no-op.
pub fn augment<P: QueryPlan>(
    mut plan: P,
    resolved: &IndexSet<SmolStr>,
    specs: &IndexMap<SmolStr, RelationshipSpec>,
) -> QueryResult<P> {
    for name in resolved {
        let Some(spec) = specs.get(name) else {
            continue;
        };
        let Some(directive) = &spec.fetch else {
            debug!(relationship = %name, "no fetch directive, relation loads lazily");
            continue;
        };

        debug!(
            relationship = %name,
            method = %directive.method,
            options = directive.options.len(),
            "augmenting query plan"
        );
        plan.apply_join(&directive.method, &spec.target_relation)?;
        if !directive.options.is_empty() {
            plan.apply_options(&directive.options)?;
        }
    }

    Ok(plan)
}

/// [`augment`] against a resource type's declared relationships.
pub fn augment_for<P: QueryPlan>(
    plan: P,
    resolved: &IndexSet<SmolStr>,
    resource_type: &ResourceType,
) -> QueryResult<P> {
    augment(plan, resolved, &resource_type.relationships)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use lamina_schema::FetchDirective;

    /// Fake plan that records applied steps and deduplicates joins by
    /// (method, relation), the way a real fetch layer deduplicates
    /// identical eager loads.
    #[derive(Debug, Default)]
    struct RecordingPlan {
        joins: Vec<(String, String)>,
        options: Vec<String>,
    }

    impl QueryPlan for RecordingPlan {
        fn apply_join(&mut self, method: &str, relation: &str) -> QueryResult<()> {
            if method == "explode" {
                return Err(QueryError::unsupported_join(method, relation));
            }
            let step = (method.to_string(), relation.to_string());
            if !self.joins.contains(&step) {
                self.joins.push(step);
            }
            Ok(())
        }

        fn apply_options(&mut self, options: &[SmolStr]) -> QueryResult<()> {
            self.options.extend(options.iter().map(|o| o.to_string()));
            Ok(())
        }
    }

    fn specs() -> IndexMap<SmolStr, RelationshipSpec> {
        let mut map = IndexMap::new();
        map.insert(
            SmolStr::new("owner"),
            RelationshipSpec::to_one("owner", "user")
                .target_relation("owner_id")
                .fetch(FetchDirective::new("join").options(["preselect", "defer"])),
        );
        map.insert(
            SmolStr::new("profile"),
            RelationshipSpec::to_one("profile", "profile"),
        );
        map
    }

    fn resolved(names: &[&str]) -> IndexSet<SmolStr> {
        names.iter().map(|n| SmolStr::new(n)).collect()
    }

    #[test]
    fn test_augment_applies_join_then_options() {
        let plan = augment(RecordingPlan::default(), &resolved(&["owner"]), &specs()).unwrap();
        assert_eq!(plan.joins, vec![("join".to_string(), "owner_id".to_string())]);
        assert_eq!(plan.options, vec!["preselect", "defer"]);
    }

    #[test]
    fn test_augment_empty_set_is_noop() {
        let plan = augment(RecordingPlan::default(), &resolved(&[]), &specs()).unwrap();
        assert!(plan.joins.is_empty());
        assert!(plan.options.is_empty());
    }

    #[test]
    fn test_augment_skips_directiveless_specs() {
        let plan = augment(
            RecordingPlan::default(),
            &resolved(&["profile", "owner"]),
            &specs(),
        )
        .unwrap();
        // profile has no directive; only owner touches the plan
        assert_eq!(plan.joins.len(), 1);
    }

    #[test]
    fn test_augment_skips_unknown_names() {
        let plan = augment(RecordingPlan::default(), &resolved(&["mystery"]), &specs()).unwrap();
        assert!(plan.joins.is_empty());
    }

    #[test]
    fn test_augment_idempotent_on_deduplicating_plan() {
        // The fake plan deduplicates identical joins, matching the
        // documented expectation of the real fetch layer.
        let names = resolved(&["owner"]);
        let once = augment(RecordingPlan::default(), &names, &specs()).unwrap();
        let twice = augment(once, &names, &specs()).unwrap();
        assert_eq!(twice.joins.len(), 1);
    }

    #[test]
    fn test_augment_surfaces_configuration_error() {
        let mut map = IndexMap::new();
        map.insert(
            SmolStr::new("owner"),
            RelationshipSpec::to_one("owner", "user").fetch(FetchDirective::new("explode")),
        );
        let err = augment(RecordingPlan::default(), &resolved(&["owner"]), &map).unwrap_err();
        assert!(err.is_configuration());
    }
}
