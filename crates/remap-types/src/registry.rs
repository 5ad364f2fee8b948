//! Type registry
//!
//! Single source of truth for registered types. The registry interns every
//! declared type under a dense [`TypeId`], pre-interns the primitives, and
//! deduplicates structural types (nullable, list, map) so that equal shapes
//! share one id. It is built mutably once, then shared immutably (typically
//! behind an `Arc`); nothing in the engine mutates it after construction.

use crate::error::TypeError;
use crate::ty::{ConversionDef, EnumType, MemberDef, PrimitiveType, StructType, Type, TypeId};
use crate::value::Value;
use rustc_hash::{FxHashMap, FxHashSet};

/// Interning key for unnamed structural types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum StructuralKey {
    Nullable(TypeId),
    List(TypeId),
    Map(TypeId, TypeId),
}

/// Registry of all types known to the mapping engine
#[derive(Debug)]
pub struct TypeRegistry {
    types: Vec<Type>,
    names: FxHashMap<String, TypeId>,
    structural: FxHashMap<StructuralKey, TypeId>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a registry with the primitives pre-interned
    pub fn new() -> Self {
        let mut registry = TypeRegistry {
            types: Vec::new(),
            names: FxHashMap::default(),
            structural: FxHashMap::default(),
        };
        for prim in [
            PrimitiveType::Bool,
            PrimitiveType::Int,
            PrimitiveType::Float,
            PrimitiveType::Str,
        ] {
            let id = registry.intern(Type::Primitive(prim));
            registry.names.insert(prim.type_name().to_string(), id);
        }
        registry
    }

    /// The `bool` type
    pub fn bool_type(&self) -> TypeId {
        TypeId(0)
    }

    /// The `int` type
    pub fn int_type(&self) -> TypeId {
        TypeId(1)
    }

    /// The `float` type
    pub fn float_type(&self) -> TypeId {
        TypeId(2)
    }

    /// The `str` type
    pub fn str_type(&self) -> TypeId {
        TypeId(3)
    }

    fn intern(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }

    /// Register a struct type under its declared name
    pub fn register_struct(&mut self, def: StructType) -> Result<TypeId, TypeError> {
        if self.names.contains_key(&def.name) {
            return Err(TypeError::DuplicateTypeName { name: def.name });
        }
        let name = def.name.clone();
        let id = self.intern(Type::Struct(def));
        self.names.insert(name, id);
        Ok(id)
    }

    /// Register an enum type under its declared name
    ///
    /// An enum must declare at least one symbol; its default value is the
    /// first symbol.
    pub fn register_enum(&mut self, def: EnumType) -> Result<TypeId, TypeError> {
        if def.symbols.is_empty() {
            return Err(TypeError::EmptyEnum { name: def.name });
        }
        if self.names.contains_key(&def.name) {
            return Err(TypeError::DuplicateTypeName { name: def.name });
        }
        let name = def.name.clone();
        let id = self.intern(Type::Enum(def));
        self.names.insert(name, id);
        Ok(id)
    }

    /// Declare a member on an already-registered struct
    ///
    /// Self-referential members (`Node { next: Node? }`) need the declaring
    /// type's id for their member type, which only exists after
    /// registration; this is the second half of that two-step declaration.
    pub fn add_member(&mut self, on: TypeId, member: MemberDef) -> Result<(), TypeError> {
        let name = self.type_name(on);
        match self.types.get_mut(on.index()) {
            Some(Type::Struct(s)) => {
                s.members.push(member);
                Ok(())
            }
            Some(_) => Err(TypeError::NotAStruct { name }),
            None => Err(TypeError::UnknownType { id: on }),
        }
    }

    /// Declare a conversion operator on an already-registered struct
    ///
    /// Conversion operators often reference the declaring type's own id
    /// (e.g. to build instances of it), which only exists after
    /// registration; this is the second half of that two-step declaration.
    /// Like every registration, it happens during construction, before the
    /// registry is frozen.
    pub fn add_conversion(
        &mut self,
        on: TypeId,
        conversion: ConversionDef,
    ) -> Result<(), TypeError> {
        let name = self.type_name(on);
        match self.types.get_mut(on.index()) {
            Some(Type::Struct(s)) => {
                s.conversions.push(conversion);
                Ok(())
            }
            Some(_) => Err(TypeError::NotAStruct { name }),
            None => Err(TypeError::UnknownType { id: on }),
        }
    }

    /// Intern the nullable wrapper of `inner`, reusing an existing id
    pub fn nullable_of(&mut self, inner: TypeId) -> TypeId {
        if let Some(&id) = self.structural.get(&StructuralKey::Nullable(inner)) {
            return id;
        }
        let id = self.intern(Type::Nullable(inner));
        self.structural.insert(StructuralKey::Nullable(inner), id);
        id
    }

    /// Intern the list type over `elem`, reusing an existing id
    pub fn list_of(&mut self, elem: TypeId) -> TypeId {
        if let Some(&id) = self.structural.get(&StructuralKey::List(elem)) {
            return id;
        }
        let id = self.intern(Type::List(elem));
        self.structural.insert(StructuralKey::List(elem), id);
        id
    }

    /// Intern the map type over `key`/`value`, reusing an existing id
    pub fn map_of(&mut self, key: TypeId, value: TypeId) -> TypeId {
        if let Some(&id) = self.structural.get(&StructuralKey::Map(key, value)) {
            return id;
        }
        let id = self.intern(Type::Map { key, value });
        self.structural.insert(StructuralKey::Map(key, value), id);
        id
    }

    /// Look up a type by id
    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get(id.index())
    }

    /// Look up a type by id, failing if unknown
    pub fn expect(&self, id: TypeId) -> Result<&Type, TypeError> {
        self.get(id).ok_or(TypeError::UnknownType { id })
    }

    /// Look up a named type (primitive, struct, or enum)
    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.names.get(name).copied()
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry holds no types (never true: primitives are pre-interned)
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Human-readable name of a type, for diagnostics
    pub fn type_name(&self, id: TypeId) -> String {
        match self.get(id) {
            None => format!("type#{}", id.0),
            Some(Type::Primitive(p)) => p.type_name().to_string(),
            Some(Type::Nullable(inner)) => format!("{}?", self.type_name(*inner)),
            Some(Type::List(elem)) => format!("list<{}>", self.type_name(*elem)),
            Some(Type::Map { key, value }) => {
                format!("map<{}, {}>", self.type_name(*key), self.type_name(*value))
            }
            Some(Type::Enum(e)) => e.name.clone(),
            Some(Type::Struct(s)) => s.name.clone(),
        }
    }

    /// Runtime type of a value
    ///
    /// `Null` has no runtime type of its own; callers mapping possibly-null
    /// values supply the declared source type instead.
    pub fn runtime_type(&self, value: &Value) -> Result<TypeId, TypeError> {
        match value {
            Value::Null => Err(TypeError::UntypedNull),
            Value::Bool(_) => Ok(self.bool_type()),
            Value::Int(_) => Ok(self.int_type()),
            Value::Float(_) => Ok(self.float_type()),
            Value::Str(_) => Ok(self.str_type()),
            Value::Enum { ty, .. } | Value::Struct { ty, .. } => Ok(*ty),
            Value::List { elem, .. } => self
                .structural
                .get(&StructuralKey::List(*elem))
                .copied()
                .ok_or_else(|| TypeError::UnregisteredValueType {
                    kind: "list",
                    detail: format!("list<{}>", self.type_name(*elem)),
                }),
            Value::Map { key, value, .. } => self
                .structural
                .get(&StructuralKey::Map(*key, *value))
                .copied()
                .ok_or_else(|| TypeError::UnregisteredValueType {
                    kind: "map",
                    detail: format!("map<{}, {}>", self.type_name(*key), self.type_name(*value)),
                }),
        }
    }

    /// Walk a type's inheritance graph: the type itself, its base chain
    /// most-derived first, then every implemented interface (transitively,
    /// in declaration order), each type listed once
    ///
    /// Non-struct types yield a single-element walk. A cyclic base chain
    /// terminates via the visited set rather than looping.
    pub fn inheritance_walk(&self, ty: TypeId) -> Result<Vec<TypeId>, TypeError> {
        let mut seen = FxHashSet::default();
        let mut chain = Vec::new();

        let mut current = Some(ty);
        while let Some(t) = current {
            if !seen.insert(t) {
                break;
            }
            let def = self.expect(t)?;
            chain.push(t);
            current = match def {
                Type::Struct(s) => s.base,
                _ => None,
            };
        }

        let mut work: Vec<TypeId> = Vec::new();
        for &t in &chain {
            if let Type::Struct(s) = self.expect(t)? {
                work.extend(s.interfaces.iter().copied());
            }
        }

        let mut result = chain;
        let mut i = 0;
        while i < work.len() {
            let iface = work[i];
            i += 1;
            if !seen.insert(iface) {
                continue;
            }
            let def = self.expect(iface)?;
            result.push(iface);
            if let Type::Struct(s) = def {
                if let Some(base) = s.base {
                    work.push(base);
                }
                work.extend(s.interfaces.iter().copied());
            }
        }

        Ok(result)
    }

    /// Check whether a value of type `src` can be used where `dest` is
    /// expected: reflexive, plus struct upcasts through the base chain and
    /// implemented interfaces
    pub fn is_assignable(&self, src: TypeId, dest: TypeId) -> bool {
        if src == dest {
            return true;
        }
        match self.get(src) {
            Some(Type::Struct(_)) => self
                .inheritance_walk(src)
                .map(|walk| walk.contains(&dest))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// The default (empty) value of a type
    ///
    /// Struct-typed slots default to `Null` so that self-referential struct
    /// types can be instantiated without recursion.
    pub fn default_value(&self, ty: TypeId) -> Result<Value, TypeError> {
        match self.expect(ty)? {
            Type::Primitive(PrimitiveType::Bool) => Ok(Value::Bool(false)),
            Type::Primitive(PrimitiveType::Int) => Ok(Value::Int(0)),
            Type::Primitive(PrimitiveType::Float) => Ok(Value::Float(0.0)),
            Type::Primitive(PrimitiveType::Str) => Ok(Value::Str(String::new())),
            Type::Nullable(_) => Ok(Value::Null),
            Type::List(elem) => Ok(Value::List {
                elem: *elem,
                items: Vec::new(),
            }),
            Type::Map { key, value } => Ok(Value::Map {
                key: *key,
                value: *value,
                entries: Vec::new(),
            }),
            Type::Enum(_) => Ok(Value::Enum { ty, symbol: 0 }),
            Type::Struct(_) => Ok(Value::Null),
        }
    }

    /// Name of the symbol carried by an enum value
    pub fn enum_symbol_name(&self, ty: TypeId, symbol: usize) -> Result<&str, TypeError> {
        let def = self.expect(ty)?;
        let e = def.as_enum().ok_or(TypeError::NotAnInstance {
            expected: "enum",
            actual: def.kind_name(),
        })?;
        e.symbols
            .get(symbol)
            .map(String::as_str)
            .ok_or_else(|| TypeError::BadEnumSymbol {
                name: e.name.clone(),
                index: symbol,
            })
    }
}
