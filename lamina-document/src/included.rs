//! The included-resource collector.

use indexmap::IndexMap;
use tracing::debug;

use crate::identifier::ResourceIdentifier;
use crate::resource::ResourceObject;

/// Accumulates the distinct related resources pulled in by inclusion.
///
/// Deduplicates by `(type, id)` and keeps first-seen order. One collector
/// lives per top-level serialization call and is discarded with it.
///
/// The collector is re-entrant: serializing a collected resource may
/// itself collect further resources. [`reserve`](Self::reserve) marks an
/// identifier as seen *before* its relationships are walked, so traversal
/// of a cyclic reference graph terminates through the visited-set alone —
/// there is no depth limit.
#[derive(Debug, Default)]
pub struct IncludedCollector {
    slots: IndexMap<ResourceIdentifier, Option<ResourceObject>>,
}

impl IncludedCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether an identifier has been seen.
    pub fn contains(&self, identifier: &ResourceIdentifier) -> bool {
        self.slots.contains_key(identifier)
    }

    /// Claim a slot for an identifier ahead of serializing its resource.
    ///
    /// Returns `false` when the identifier was already seen, in which case
    /// the caller must not serialize it again.
    pub fn reserve(&mut self, identifier: ResourceIdentifier) -> bool {
        if self.slots.contains_key(&identifier) {
            return false;
        }
        self.slots.insert(identifier, None);
        true
    }

    /// Fill a slot claimed with [`reserve`](Self::reserve).
    pub fn fill(&mut self, identifier: &ResourceIdentifier, resource: ResourceObject) {
        if let Some(slot) = self.slots.get_mut(identifier) {
            *slot = Some(resource);
        }
    }

    /// Add an already-serialized resource; a no-op for a seen identifier.
    pub fn add(&mut self, resource: ResourceObject) -> bool {
        let identifier = resource.identifier();
        if self.slots.contains_key(&identifier) {
            debug!(%identifier, "skipping duplicate included resource");
            return false;
        }
        self.slots.insert(identifier, Some(resource));
        true
    }

    /// Number of collected identifiers.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if nothing was collected.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Clone out the collected resources, in first-seen order.
    pub fn snapshot(&self) -> Vec<ResourceObject> {
        self.slots.values().filter_map(|slot| slot.clone()).collect()
    }

    /// Consume the collector, yielding the `included` array.
    pub fn into_vec(self) -> Vec<ResourceObject> {
        self.slots.into_values().flatten().collect()
    }
}
