//! Remap Type Model
//!
//! Registered types, dynamic values, and the memoized per-type descriptor
//! cache that the remap mapping engine introspects at runtime.

#![warn(missing_docs)]

pub mod descriptor;
pub mod error;
pub mod registry;
pub mod ty;
pub mod value;

pub use descriptor::{DescriptorCache, MemberAccessor, MethodAccessor, TypeDescriptor};
pub use error::TypeError;
pub use registry::TypeRegistry;
pub use ty::{
    ConstructorDef, ConversionDef, ConversionDirection, ConversionKind, ConvertFn, EnumType,
    MemberDef, MethodBody, MethodDef, PrimitiveType, StructType, Type, TypeId,
};
pub use value::Value;
