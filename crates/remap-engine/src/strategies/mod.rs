//! Concrete mapping strategies
//!
//! The default catalog, in registration order. Order is a design invariant,
//! not an implementation detail: strategies targeting narrow, precisely
//! identified shapes (struct member mapping, string targets, enums) come
//! before general structural ones (lists, maps, assignability, primitive
//! casts), which come before last-resort ones (nullable handling,
//! conversion operators). A broad strategy placed earlier would claim pairs
//! a narrower one was designed to own.

mod assignable;
mod conversion;
mod enum_name;
mod list;
mod map;
mod nullable;
mod primitive_cast;
mod string;
mod struct_members;

pub use assignable::AssignableStrategy;
pub use conversion::ConversionOperatorStrategy;
pub use enum_name::EnumStrategy;
pub use list::ListStrategy;
pub use map::MapStrategy;
pub use nullable::{NullableDestStrategy, NullableSourceStrategy};
pub use primitive_cast::PrimitiveCastStrategy;
pub use string::StringStrategy;
pub use struct_members::StructStrategy;

use crate::strategy::MappingStrategy;

/// The default strategy catalog, in resolution order
pub fn default_strategies() -> Vec<Box<dyn MappingStrategy>> {
    vec![
        Box::new(StructStrategy),
        Box::new(StringStrategy),
        Box::new(EnumStrategy),
        Box::new(ListStrategy),
        Box::new(MapStrategy),
        Box::new(AssignableStrategy),
        Box::new(PrimitiveCastStrategy),
        Box::new(NullableSourceStrategy),
        Box::new(NullableDestStrategy),
        Box::new(ConversionOperatorStrategy::implicit()),
        Box::new(ConversionOperatorStrategy::explicit()),
    ]
}
