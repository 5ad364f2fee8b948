//! Strategy registry
//!
//! A fixed, ordered sequence of mapping strategies, established once at
//! construction and immutable afterward. Resolution is first-match-wins
//! over a linear scan in registration order: narrow strategies shadow broad
//! fallbacks purely by list position, so no specificity scoring is needed.

use crate::strategy::MappingStrategy;
use remap_types::{TypeId, TypeRegistry};

/// Ordered collection of mapping strategies consulted during resolution
pub struct StrategyRegistry {
    strategies: Vec<Box<dyn MappingStrategy>>,
}

impl StrategyRegistry {
    /// Build a registry from an ordered strategy sequence
    ///
    /// The order is a design invariant owned by the caller: strategies that
    /// target narrow, precisely-identified type shapes must precede general
    /// structural ones, which must precede last-resort ones.
    pub fn new(strategies: Vec<Box<dyn MappingStrategy>>) -> Self {
        StrategyRegistry { strategies }
    }

    /// Find the first strategy, in registration order, that claims the pair
    pub fn resolve(
        &self,
        src: TypeId,
        dest: TypeId,
        types: &TypeRegistry,
    ) -> Option<&dyn MappingStrategy> {
        self.strategies
            .iter()
            .find(|s| s.is_match(src, dest, types))
            .map(AsRef::as_ref)
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Strategy names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}
