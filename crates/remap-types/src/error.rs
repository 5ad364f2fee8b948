//! Type model errors

use crate::ty::TypeId;
use thiserror::Error;

/// Errors raised by the type registry, descriptor cache, and value accessors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// A type id not present in the registry
    #[error("Unknown type: {id}")]
    UnknownType {
        /// The id that was not found
        id: TypeId,
    },

    /// A type name not present in the registry
    #[error("Unknown type name: {name}")]
    UnknownTypeName {
        /// The name that was not found
        name: String,
    },

    /// A type name registered twice
    #[error("Duplicate type name: {name}")]
    DuplicateTypeName {
        /// The name that was already taken
        name: String,
    },

    /// A struct-only operation applied to a non-struct type
    #[error("Type {name} is not a struct")]
    NotAStruct {
        /// Name of the offending type
        name: String,
    },

    /// An enum declared with no symbols
    #[error("Enum {name} has no symbols")]
    EmptyEnum {
        /// Name of the offending enum
        name: String,
    },

    /// An enum value carrying a symbol index outside its type's symbol list
    #[error("Enum {name} has no symbol at index {index}")]
    BadEnumSymbol {
        /// Name of the enum type
        name: String,
        /// The out-of-range index
        index: usize,
    },

    /// Instantiation requested for a type with no zero-argument constructor
    #[error("Type {name} has no zero-argument constructor")]
    NoDefaultConstructor {
        /// Name of the offending type
        name: String,
    },

    /// A struct field access against an instance that lacks the field
    #[error("Instance of {ty} has no field '{name}'")]
    MissingField {
        /// Type of the instance
        ty: TypeId,
        /// Name of the missing field
        name: String,
    },

    /// A value of the wrong shape passed to a shape-specific accessor
    #[error("Expected a {expected} value, got {actual}")]
    NotAnInstance {
        /// Expected shape
        expected: &'static str,
        /// Actual shape
        actual: &'static str,
    },

    /// A zero-argument method body failed
    #[error("Method {name} on {ty} failed: {message}")]
    MethodFailed {
        /// Declaring type
        ty: TypeId,
        /// Method name
        name: String,
        /// Failure description
        message: String,
    },

    /// A null value has no runtime type of its own
    #[error("Cannot determine the runtime type of a null value")]
    UntypedNull,

    /// A value whose runtime type was never registered
    #[error("No registered type for {kind} value: {detail}")]
    UnregisteredValueType {
        /// Shape of the value
        kind: &'static str,
        /// What was missing
        detail: String,
    },
}
