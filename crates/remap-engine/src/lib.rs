//! Remap Mapping Engine
//!
//! Object-to-object mapping over dynamic values: given a source [`Value`]
//! and a destination type, produce a destination value without hand-written
//! conversion code. Resolution dispatches through an ordered registry of
//! [`MappingStrategy`] implementations, first-match-wins; member-level
//! introspection goes through the shared descriptor cache of
//! [`remap_types`].
//!
//! ```
//! use remap_engine::Mapper;
//! use remap_types::{EnumType, TypeRegistry, Value};
//! use std::sync::Arc;
//!
//! let mut registry = TypeRegistry::new();
//! let color = registry
//!     .register_enum(EnumType::new("Color", ["Red", "Green", "Blue"]))
//!     .unwrap();
//! let str_ty = registry.str_type();
//!
//! let mapper = Mapper::new(Arc::new(registry));
//! let name = mapper.map(&Value::Enum { ty: color, symbol: 2 }, str_ty).unwrap();
//! assert_eq!(name, Value::str("Blue"));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod mapper;
pub mod registry;
pub mod strategies;
pub mod strategy;

pub use error::MapError;
pub use mapper::Mapper;
pub use registry::StrategyRegistry;
pub use strategies::default_strategies;
pub use strategy::{MappingContext, MappingStrategy, MAX_MAPPING_DEPTH};

pub use remap_types::Value;
