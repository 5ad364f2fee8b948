//! Core type definitions for the remap type model
//!
//! Types are declared once, registered into a [`TypeRegistry`](crate::TypeRegistry),
//! and addressed by [`TypeId`] everywhere else. Struct types carry the member,
//! method, constructor, and conversion declarations that the descriptor cache
//! and the mapping strategies introspect at runtime.

use crate::error::TypeError;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Unique identifier for a type in the type registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    /// Raw index of this type in the registry
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// The `bool` type
    Bool,
    /// The `int` type (64-bit signed)
    Int,
    /// The `float` type (IEEE 754 double precision)
    Float,
    /// The `str` type
    Str,
}

impl PrimitiveType {
    /// Canonical name of this primitive
    pub fn type_name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Int => "int",
            PrimitiveType::Float => "float",
            PrimitiveType::Str => "str",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A declared data member of a struct type
///
/// Registering a member is the declaration of public accessibility; there are
/// no separate visibility flags. Read/write eligibility for mapping is decided
/// by the descriptor cache from `can_read`/`can_write` and the member's
/// declared type (see [`TypeDescriptor`](crate::TypeDescriptor)).
#[derive(Debug, Clone)]
pub struct MemberDef {
    /// Member name
    pub name: String,
    /// Declared type of the member's value
    pub ty: TypeId,
    /// Whether the member can be read
    pub can_read: bool,
    /// Whether the member can be assigned to
    pub can_write: bool,
}

impl MemberDef {
    /// A member that supports both read and write
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        MemberDef {
            name: name.into(),
            ty,
            can_read: true,
            can_write: true,
        }
    }

    /// A member that can be read but not assigned to
    pub fn read_only(name: impl Into<String>, ty: TypeId) -> Self {
        MemberDef {
            name: name.into(),
            ty,
            can_read: true,
            can_write: false,
        }
    }

    /// A member that can be assigned to but not read
    pub fn write_only(name: impl Into<String>, ty: TypeId) -> Self {
        MemberDef {
            name: name.into(),
            ty,
            can_read: false,
            can_write: true,
        }
    }
}

/// Callable body of a zero-argument method
pub type MethodBody = Arc<dyn Fn(&Value) -> Result<Value, TypeError> + Send + Sync>;

/// A zero-argument, non-void, instance method declared on a struct type
///
/// Only this shape of method is modeled: it is the shape the mapping engine
/// can use as a computed member projection.
#[derive(Clone)]
pub struct MethodDef {
    /// Method name
    pub name: String,
    /// Return type
    pub ret: TypeId,
    /// Method body, invoked with the receiving instance
    pub body: MethodBody,
}

impl MethodDef {
    /// Declare a zero-argument method
    pub fn new<F>(name: impl Into<String>, ret: TypeId, body: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, TypeError> + Send + Sync + 'static,
    {
        MethodDef {
            name: name.into(),
            ret,
            body: Arc::new(body),
        }
    }
}

impl fmt::Debug for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDef")
            .field("name", &self.name)
            .field("ret", &self.ret)
            .finish()
    }
}

/// An instance constructor declared directly on a struct type
///
/// Constructors are not inherited; the descriptor cache only reports those
/// declared on the type itself.
#[derive(Debug, Clone)]
pub struct ConstructorDef {
    /// Constructor parameters as (name, type) pairs
    pub params: Vec<(String, TypeId)>,
}

impl ConstructorDef {
    /// A constructor taking the given parameters
    pub fn new(params: Vec<(String, TypeId)>) -> Self {
        ConstructorDef { params }
    }

    /// The zero-argument constructor
    pub fn default_ctor() -> Self {
        ConstructorDef { params: Vec::new() }
    }

    /// Whether this constructor takes no arguments
    pub fn is_default(&self) -> bool {
        self.params.is_empty()
    }
}

/// Whether a conversion operator applies implicitly or must be explicit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// Applies without an explicit cast
    Implicit,
    /// Requires an explicit cast
    Explicit,
}

/// Direction of a user-defined conversion operator relative to the declaring type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionDirection {
    /// Converts an instance of the declaring type into `other`
    To,
    /// Converts an instance of `other` into the declaring type
    From,
}

/// Callable body of a user-defined conversion operator
pub type ConvertFn = Arc<dyn Fn(&Value) -> Result<Value, TypeError> + Send + Sync>;

/// A user-defined conversion operator declared on a struct type
#[derive(Clone)]
pub struct ConversionDef {
    /// The other side of the conversion
    pub other: TypeId,
    /// Which side the declaring type is on
    pub direction: ConversionDirection,
    /// Implicit or explicit
    pub kind: ConversionKind,
    /// Conversion body, invoked with the value being converted
    pub convert: ConvertFn,
}

impl ConversionDef {
    /// Declare a conversion from the declaring type into `other`
    pub fn to<F>(other: TypeId, kind: ConversionKind, convert: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, TypeError> + Send + Sync + 'static,
    {
        ConversionDef {
            other,
            direction: ConversionDirection::To,
            kind,
            convert: Arc::new(convert),
        }
    }

    /// Declare a conversion from `other` into the declaring type
    pub fn from<F>(other: TypeId, kind: ConversionKind, convert: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, TypeError> + Send + Sync + 'static,
    {
        ConversionDef {
            other,
            direction: ConversionDirection::From,
            kind,
            convert: Arc::new(convert),
        }
    }
}

impl fmt::Debug for ConversionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionDef")
            .field("other", &self.other)
            .field("direction", &self.direction)
            .field("kind", &self.kind)
            .finish()
    }
}

/// An enumeration type: a named, ordered set of symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    /// Enum name
    pub name: String,
    /// Symbol names, in declaration order
    pub symbols: Vec<String>,
}

impl EnumType {
    /// Declare an enum with the given symbols
    pub fn new<I, S>(name: impl Into<String>, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumType {
            name: name.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// Find a symbol by name, case-insensitively
    pub fn find_symbol(&self, name: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s.eq_ignore_ascii_case(name))
    }
}

/// A struct type: named members plus inheritance and conversion declarations
#[derive(Debug, Clone)]
pub struct StructType {
    /// Struct name
    pub name: String,
    /// Base type, if any (must be a registered struct)
    pub base: Option<TypeId>,
    /// Directly implemented interfaces (registered structs used as shapes)
    pub interfaces: Vec<TypeId>,
    /// Declared data members
    pub members: Vec<MemberDef>,
    /// Declared zero-argument methods
    pub methods: Vec<MethodDef>,
    /// Declared instance constructors
    pub constructors: Vec<ConstructorDef>,
    /// Declared conversion operators
    pub conversions: Vec<ConversionDef>,
}

impl StructType {
    /// Declare an empty struct with the given name
    pub fn new(name: impl Into<String>) -> Self {
        StructType {
            name: name.into(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            conversions: Vec::new(),
        }
    }

    /// Set the base type
    pub fn with_base(mut self, base: TypeId) -> Self {
        self.base = Some(base);
        self
    }

    /// Add an implemented interface
    pub fn with_interface(mut self, interface: TypeId) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Add a data member
    pub fn with_member(mut self, member: MemberDef) -> Self {
        self.members.push(member);
        self
    }

    /// Add a zero-argument method
    pub fn with_method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a constructor
    pub fn with_constructor(mut self, ctor: ConstructorDef) -> Self {
        self.constructors.push(ctor);
        self
    }

    /// Add a conversion operator
    pub fn with_conversion(mut self, conversion: ConversionDef) -> Self {
        self.conversions.push(conversion);
        self
    }

    /// Whether a zero-argument constructor is declared
    pub fn has_default_constructor(&self) -> bool {
        self.constructors.iter().any(ConstructorDef::is_default)
    }
}

/// A registered type
#[derive(Debug, Clone)]
pub enum Type {
    /// Primitive type
    Primitive(PrimitiveType),
    /// Nullable wrapper around another type
    Nullable(TypeId),
    /// Ordered collection of elements of one type
    List(TypeId),
    /// Keyed collection with one key type and one value type
    Map {
        /// Key type
        key: TypeId,
        /// Value type
        value: TypeId,
    },
    /// Enumeration type
    Enum(EnumType),
    /// Struct type
    Struct(StructType),
}

impl Type {
    /// View this type as a struct, if it is one
    pub fn as_struct(&self) -> Option<&StructType> {
        match self {
            Type::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// View this type as an enum, if it is one
    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Type::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this type is a collection that can be mutated in place
    /// (enumerable and not a string)
    pub fn is_in_place_mutable(&self) -> bool {
        matches!(self, Type::List(_) | Type::Map { .. })
    }

    /// Short name of this type's kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Primitive(_) => "primitive",
            Type::Nullable(_) => "nullable",
            Type::List(_) => "list",
            Type::Map { .. } => "map",
            Type::Enum(_) => "enum",
            Type::Struct(_) => "struct",
        }
    }
}
