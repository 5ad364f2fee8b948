//! Dynamic value representation
//!
//! Every mapping operates on [`Value`], a tagged enum over the shapes the
//! type model can describe. Values are owned trees: there is no shared
//! mutable graph, so cyclic values cannot be constructed (cyclic *types*
//! are still valid input to the engine).

use crate::error::TypeError;
use crate::ty::TypeId;
use rustc_hash::FxHashMap;

/// Runtime representation of a mappable value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value (the empty representation of nullable and struct slots)
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// IEEE 754 double precision float
    Float(f64),

    /// String value
    Str(String),

    /// Enum symbol, stored as an index into the enum's symbol list
    Enum {
        /// The enum type this symbol belongs to
        ty: TypeId,
        /// Index of the symbol in the enum's declaration order
        symbol: usize,
    },

    /// Ordered collection of elements
    List {
        /// Declared element type
        elem: TypeId,
        /// Elements in order
        items: Vec<Value>,
    },

    /// Keyed collection, entry order preserved
    Map {
        /// Declared key type
        key: TypeId,
        /// Declared value type
        value: TypeId,
        /// Entries in insertion order
        entries: Vec<(Value, Value)>,
    },

    /// Struct instance with named fields
    Struct {
        /// The struct type of this instance
        ty: TypeId,
        /// Field values by member name
        fields: FxHashMap<String, Value>,
    },
}

impl Value {
    /// Create a string value
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extract a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Extract a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of this value's shape, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Enum { .. } => "enum",
            Value::List { .. } => "list",
            Value::Map { .. } => "map",
            Value::Struct { .. } => "struct",
        }
    }

    /// Get a field value from a struct instance
    ///
    /// Fails if this value is not a struct or the field is not present.
    pub fn get_field(&self, name: &str) -> Result<&Value, TypeError> {
        match self {
            Value::Struct { ty, fields } => {
                fields.get(name).ok_or_else(|| TypeError::MissingField {
                    ty: *ty,
                    name: name.to_string(),
                })
            }
            other => Err(TypeError::NotAnInstance {
                expected: "struct",
                actual: other.kind(),
            }),
        }
    }

    /// Get a mutable reference to a field of a struct instance
    ///
    /// Fails if this value is not a struct or the field is not present.
    pub fn get_field_mut(&mut self, name: &str) -> Result<&mut Value, TypeError> {
        match self {
            Value::Struct { ty, fields } => {
                let ty = *ty;
                fields.get_mut(name).ok_or_else(|| TypeError::MissingField {
                    ty,
                    name: name.to_string(),
                })
            }
            other => Err(TypeError::NotAnInstance {
                expected: "struct",
                actual: other.kind(),
            }),
        }
    }

    /// Set a field value on a struct instance
    ///
    /// Fails if this value is not a struct. Inserts the field if absent.
    pub fn set_field(&mut self, name: &str, value: Value) -> Result<(), TypeError> {
        match self {
            Value::Struct { fields, .. } => {
                fields.insert(name.to_string(), value);
                Ok(())
            }
            other => Err(TypeError::NotAnInstance {
                expected: "struct",
                actual: other.kind(),
            }),
        }
    }
}
