//! Mapping strategy contract
//!
//! A strategy is a capability: "can I map type X to type Y, and if selected,
//! do it." `is_match` must be pure and cheap (it runs during the linear
//! resolution scan for every candidate pair); `map` must not mutate the
//! source value and must not return a partially built destination disguised
//! as success.

use crate::error::MapError;
use crate::mapper::Mapper;
use remap_types::{DescriptorCache, TypeDescriptor, TypeId, TypeRegistry, Value};
use std::sync::Arc;

/// Maximum recursion depth for nested mappings (prevents stack overflow on
/// deeply nested or self-referential type graphs)
pub const MAX_MAPPING_DEPTH: usize = 100;

/// A mapping capability, selected first-match-wins by registry order
pub trait MappingStrategy: Send + Sync {
    /// Strategy name, used in failure diagnostics
    fn name(&self) -> &'static str;

    /// Whether this strategy can map `src` to `dest`
    fn is_match(&self, src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool;

    /// Execute the mapping
    fn map(
        &self,
        value: &Value,
        src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError>;
}

/// Per-call state threaded through a mapping: depth bound and the member
/// path from the outermost mapping, for diagnostics
pub struct MappingContext<'a> {
    mapper: &'a Mapper,
    depth: usize,
    path: Vec<String>,
}

impl<'a> MappingContext<'a> {
    pub(crate) fn new(mapper: &'a Mapper) -> Self {
        MappingContext {
            mapper,
            depth: 0,
            path: Vec::new(),
        }
    }

    /// The type registry
    pub fn types(&self) -> &TypeRegistry {
        self.mapper.types()
    }

    /// The shared descriptor cache
    pub fn descriptors(&self) -> &DescriptorCache {
        self.mapper.descriptors()
    }

    /// Descriptor for a type, via the shared cache
    pub fn describe(&self, ty: TypeId) -> Result<Arc<TypeDescriptor>, MapError> {
        Ok(self.mapper.descriptors().describe(ty)?)
    }

    /// Current recursion depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Recursively map a nested value, without adding a path segment
    ///
    /// Used when the recursion does not descend into a named member
    /// (e.g. unwrapping a nullable).
    pub fn map_value(
        &mut self,
        value: &Value,
        src: TypeId,
        dest: TypeId,
    ) -> Result<Value, MapError> {
        if self.depth >= MAX_MAPPING_DEPTH {
            return Err(MapError::DepthExceeded {
                max: MAX_MAPPING_DEPTH,
            });
        }
        self.depth += 1;
        let result = self.mapper.map_with(value, src, dest, self);
        self.depth -= 1;
        result
    }

    /// Recursively map a nested member or element, recording the path
    /// segment for diagnostics
    ///
    /// Segments starting with `[` (element indices) attach to the previous
    /// segment without a separator.
    pub fn map_member(
        &mut self,
        segment: &str,
        value: &Value,
        src: TypeId,
        dest: TypeId,
    ) -> Result<Value, MapError> {
        self.path.push(segment.to_string());
        let result = self.map_value(value, src, dest);
        self.path.pop();
        result
    }

    /// The accumulated member path, "<root>" when empty
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            return "<root>".to_string();
        }
        let mut out = String::new();
        for segment in &self.path {
            if !out.is_empty() && !segment.starts_with('[') {
                out.push('.');
            }
            out.push_str(segment);
        }
        out
    }
}
