//! Mapping resolver
//!
//! [`Mapper`] is the engine's entry point: it owns the frozen type
//! registry, the shared descriptor cache, and the ordered strategy
//! registry. A mapping call resolves the first strategy claiming the type
//! pair and delegates to it; strategies recurse back through the
//! [`MappingContext`](crate::MappingContext) for nested members.

use crate::error::MapError;
use crate::registry::StrategyRegistry;
use crate::strategies::default_strategies;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{DescriptorCache, TypeDescriptor, TypeError, TypeId, TypeRegistry, Value};
use std::sync::Arc;

/// The mapping engine: type registry + descriptor cache + strategy registry
pub struct Mapper {
    types: Arc<TypeRegistry>,
    descriptors: DescriptorCache,
    strategies: StrategyRegistry,
}

impl Mapper {
    /// Create a mapper with the default strategy catalog
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        Self::with_strategies(types, default_strategies())
    }

    /// Create a mapper with a custom ordered strategy catalog
    pub fn with_strategies(
        types: Arc<TypeRegistry>,
        strategies: Vec<Box<dyn MappingStrategy>>,
    ) -> Self {
        Mapper {
            descriptors: DescriptorCache::new(Arc::clone(&types)),
            types,
            strategies: StrategyRegistry::new(strategies),
        }
    }

    /// The type registry
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// The shared descriptor cache
    pub fn descriptors(&self) -> &DescriptorCache {
        &self.descriptors
    }

    /// Descriptor for a type, via the shared cache
    pub fn describe(&self, ty: TypeId) -> Result<Arc<TypeDescriptor>, TypeError> {
        self.descriptors.describe(ty)
    }

    /// Find the first strategy claiming the pair, in registration order
    pub fn resolve(&self, src: TypeId, dest: TypeId) -> Option<&dyn MappingStrategy> {
        self.strategies.resolve(src, dest, &self.types)
    }

    /// Map a value to the destination type, inferring the source type from
    /// the value itself
    ///
    /// A `Null` source has no runtime type; use [`Mapper::map_as`] with the
    /// declared (nullable) source type instead.
    pub fn map(&self, value: &Value, dest: TypeId) -> Result<Value, MapError> {
        let src = self.types.runtime_type(value)?;
        self.map_as(value, src, dest)
    }

    /// Map a value to the destination type with an explicit source type
    pub fn map_as(&self, value: &Value, src: TypeId, dest: TypeId) -> Result<Value, MapError> {
        let mut ctx = MappingContext::new(self);
        self.map_with(value, src, dest, &mut ctx)
    }

    /// Resolve and execute one mapping step within an in-flight context
    ///
    /// Failure policy: an unclaimed pair surfaces as `UnmappedTypePair`
    /// carrying the current path; a strategy error is wrapped exactly once,
    /// here, where the path is still intact, and then propagates unchanged.
    pub(crate) fn map_with(
        &self,
        value: &Value,
        src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let strategy = match self.strategies.resolve(src, dest, &self.types) {
            Some(s) => s,
            None => {
                return Err(MapError::UnmappedTypePair {
                    source: self.types.type_name(src),
                    destination: self.types.type_name(dest),
                    path: ctx.path_string(),
                });
            }
        };

        strategy.map(value, src, dest, ctx).map_err(|err| match err {
            wrapped @ (MapError::StrategyFailure { .. } | MapError::UnmappedTypePair { .. }) => {
                wrapped
            }
            cause => MapError::StrategyFailure {
                strategy: strategy.name(),
                source: self.types.type_name(src),
                destination: self.types.type_name(dest),
                path: ctx.path_string(),
                cause: Box::new(cause),
            },
        })
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("types", &self.types.len())
            .field("strategies", &self.strategies)
            .finish()
    }
}
