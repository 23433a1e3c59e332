//! Dynamic page resolvers.
//!
//! A resolver owns the raw API response of one entity collection and a
//! strategy that turns it into entity records. Resolvers are registered per
//! entity-type name; each language gets its own registry.

use std::collections::HashMap;

use serde_json::Value;

use crate::entity::EntityRecord;
use crate::error::GenerateError;

/// Function extracting entity records from a raw response.
pub type ResolveFn = fn(&Value) -> Vec<EntityRecord>;

/// How a resolver extracts entity records.
#[derive(Clone, Debug)]
pub enum ResolveStrategy {
    /// Array at a JSON pointer (empty pointer selects the whole response).
    Pointer(String),
    /// Custom extraction function.
    Function(ResolveFn),
}

/// Resolver for one entity type.
#[derive(Clone, Debug)]
pub struct DynamicPageResolver {
    response: Value,
    strategy: ResolveStrategy,
}

impl DynamicPageResolver {
    /// Create a resolver over a fetched response.
    #[must_use]
    pub fn new(response: Value, strategy: ResolveStrategy) -> Self {
        Self { response, strategy }
    }

    /// Entity records in response order.
    ///
    /// With a pointer strategy, non-object array elements are ignored and a
    /// missing or non-array target yields no records.
    #[must_use]
    pub fn resolve(&self) -> Vec<EntityRecord> {
        match &self.strategy {
            ResolveStrategy::Pointer(pointer) => self
                .response
                .pointer(pointer)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_object)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
            ResolveStrategy::Function(resolve) => resolve(&self.response),
        }
    }
}

/// Resolvers of one language keyed by entity-type name.
#[derive(Debug, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, DynamicPageResolver>,
}

impl ResolverRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the resolver for `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::DuplicateResolver`] if `entity` already has one.
    pub fn register(
        &mut self,
        entity: &str,
        resolver: DynamicPageResolver,
    ) -> Result<(), GenerateError> {
        if self.resolvers.contains_key(entity) {
            return Err(GenerateError::DuplicateResolver {
                entity: entity.to_owned(),
            });
        }
        self.resolvers.insert(entity.to_owned(), resolver);
        Ok(())
    }

    /// Resolver registered for `entity`.
    #[must_use]
    pub fn get(&self, entity: &str) -> Option<&DynamicPageResolver> {
        self.resolvers.get(entity)
    }

    /// Number of registered resolvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Whether no resolver is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}
