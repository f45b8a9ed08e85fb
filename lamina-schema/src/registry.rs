//! Registry of resource types with fail-fast registration checks.

use indexmap::IndexMap;
use smol_str::SmolStr;
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::relationship::SchemaRef;
use crate::resource::ResourceType;

/// Immutable registry of resource types.
///
/// Built once at startup via [`Registry::builder`]; registration validates
/// the whole graph so that misdeclarations surface as deploy-time errors,
/// not mid-request surprises. Lookups after that are infallible for any
/// reference that passed validation.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: IndexMap<SmolStr, ResourceType>,
}

impl Registry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a resource type by name.
    pub fn get(&self, name: &str) -> Option<&ResourceType> {
        self.types.get(name)
    }

    /// Look up a resource type by name, erroring if absent.
    pub fn expect(&self, name: &str) -> SchemaResult<&ResourceType> {
        self.types
            .get(name)
            .ok_or_else(|| SchemaError::config(format!("resource type `{name}` is not registered")))
    }

    /// Resolve a schema handle relative to its owning type.
    pub fn resolve<'a>(
        &'a self,
        owner: &'a ResourceType,
        handle: &SchemaRef,
    ) -> SchemaResult<&'a ResourceType> {
        match handle {
            SchemaRef::SelfRef => Ok(owner),
            SchemaRef::Named(name) => {
                self.types
                    .get(name)
                    .ok_or_else(|| SchemaError::UnresolvedSchema {
                        resource: owner.name.to_string(),
                        relationship: String::new(),
                        target: name.to_string(),
                    })
            }
        }
    }

    /// All registered types, in registration order.
    pub fn types(&self) -> impl Iterator<Item = &ResourceType> {
        self.types.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Builder that collects resource types and validates them as a set.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<ResourceType>,
}

impl RegistryBuilder {
    /// Add a resource type.
    pub fn register(mut self, ty: ResourceType) -> Self {
        self.types.push(ty);
        self
    }

    /// Validate the collected types and produce a [`Registry`].
    ///
    /// Checks: duplicate type names, relationship handles naming
    /// unregistered types, and includable-whitelist entries that match no
    /// declared relationship. All problems are reported together.
    pub fn build(self) -> SchemaResult<Registry> {
        let mut registry = Registry::default();
        let mut errors = Vec::new();

        for ty in self.types {
            if registry.types.contains_key(&ty.name) {
                errors.push(SchemaError::Duplicate {
                    kind: "resource type".into(),
                    name: ty.name.to_string(),
                });
                continue;
            }
            registry.types.insert(ty.name.clone(), ty);
        }

        for ty in registry.types.values() {
            for spec in ty.relationships.values() {
                if let SchemaRef::Named(target) = &spec.target_type {
                    if !registry.types.contains_key(target) {
                        errors.push(SchemaError::UnresolvedSchema {
                            resource: ty.name.to_string(),
                            relationship: spec.name.to_string(),
                            target: target.to_string(),
                        });
                    }
                }
            }

            if let Some(includable) = ty.includable() {
                for name in includable {
                    if !ty.relationships.contains_key(name) {
                        errors.push(SchemaError::UnknownIncludable {
                            resource: ty.name.to_string(),
                            name: name.to_string(),
                        });
                    }
                }
            }
        }

        if let Some(err) = SchemaError::from_errors(errors) {
            return Err(err);
        }

        debug!(types = registry.types.len(), "registry built");
        Ok(registry)
    }
}
