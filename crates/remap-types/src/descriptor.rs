//! Per-type descriptors and the descriptor cache
//!
//! A [`TypeDescriptor`] is the memoized answer to "what can I read from,
//! write to, and call on this type": readable members, writable members,
//! zero-argument methods, and declared constructors, with duplicates from
//! multiple inheritance paths collapsed to one representative per name.
//!
//! Descriptors are computed lazily on first use and cached for the life of
//! the [`DescriptorCache`]. Concurrent first requests for the same type may
//! compute the descriptor twice, but exactly one result is ever published;
//! callers always observe a complete, immutable descriptor.

use crate::error::TypeError;
use crate::registry::TypeRegistry;
use crate::ty::{ConstructorDef, MethodBody, Type, TypeId};
use crate::value::Value;
use dashmap::DashMap;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// A readable and/or writable member of a type, bound to its declaring type
#[derive(Debug, Clone)]
pub struct MemberAccessor {
    /// Member name
    pub name: String,
    /// The type in the inheritance walk that contributed this member
    pub declared_in: TypeId,
    /// Declared type of the member's value
    pub ty: TypeId,
    /// Whether the member can be read
    pub can_read: bool,
    /// Whether the member can be assigned to (a `false` here on a writable
    /// member means it is populated by in-place mutation instead)
    pub can_write: bool,
}

impl MemberAccessor {
    /// Read this member from a struct instance
    ///
    /// A field that is absent on the instance reads as `Null`; a non-struct
    /// instance is an error.
    pub fn get(&self, instance: &Value) -> Result<Value, TypeError> {
        match instance {
            Value::Struct { fields, .. } => {
                Ok(fields.get(&self.name).cloned().unwrap_or(Value::Null))
            }
            other => Err(TypeError::NotAnInstance {
                expected: "struct",
                actual: other.kind(),
            }),
        }
    }

    /// Write this member on a struct instance
    pub fn set(&self, instance: &mut Value, value: Value) -> Result<(), TypeError> {
        instance.set_field(&self.name, value)
    }
}

/// A zero-argument method of a type, invocable on an instance
#[derive(Clone)]
pub struct MethodAccessor {
    /// Method name
    pub name: String,
    /// The type in the inheritance walk that contributed this method
    pub declared_in: TypeId,
    /// Return type
    pub ret: TypeId,
    body: MethodBody,
}

impl MethodAccessor {
    /// Invoke the method on an instance
    pub fn invoke(&self, instance: &Value) -> Result<Value, TypeError> {
        (self.body)(instance)
    }
}

impl std::fmt::Debug for MethodAccessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodAccessor")
            .field("name", &self.name)
            .field("declared_in", &self.declared_in)
            .field("ret", &self.ret)
            .finish()
    }
}

/// Cached summary of a type's accessible members, methods, and constructors
///
/// Immutable once computed. Non-struct types yield a valid, empty descriptor.
#[derive(Debug)]
pub struct TypeDescriptor {
    ty: TypeId,
    readable: Vec<MemberAccessor>,
    writable: Vec<MemberAccessor>,
    no_arg_methods: Vec<MethodAccessor>,
    constructors: Vec<ConstructorDef>,
}

impl TypeDescriptor {
    /// The type this descriptor describes
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// Readable members, deduplicated by name, in inheritance-walk order
    pub fn readable_members(&self) -> &[MemberAccessor] {
        &self.readable
    }

    /// Writable members, deduplicated by name, in inheritance-walk order
    pub fn writable_members(&self) -> &[MemberAccessor] {
        &self.writable
    }

    /// Zero-argument, non-void methods, deduplicated by name
    pub fn no_arg_methods(&self) -> &[MethodAccessor] {
        &self.no_arg_methods
    }

    /// Constructors declared directly on the type (not inherited)
    pub fn constructors(&self) -> &[ConstructorDef] {
        &self.constructors
    }

    /// Find a readable member by name
    pub fn readable(&self, name: &str) -> Option<&MemberAccessor> {
        self.readable.iter().find(|m| m.name == name)
    }

    /// Find a writable member by name
    pub fn writable(&self, name: &str) -> Option<&MemberAccessor> {
        self.writable.iter().find(|m| m.name == name)
    }

    /// Find a zero-argument method by name
    pub fn method(&self, name: &str) -> Option<&MethodAccessor> {
        self.no_arg_methods.iter().find(|m| m.name == name)
    }

    /// Whether a zero-argument constructor is declared
    pub fn has_default_constructor(&self) -> bool {
        self.constructors.iter().any(ConstructorDef::is_default)
    }

    /// Create an instance through the zero-argument constructor, every
    /// member initialized to its declared type's default value
    pub fn instantiate(&self, types: &TypeRegistry) -> Result<Value, TypeError> {
        let def = types.expect(self.ty)?;
        if def.as_struct().is_none() {
            return Err(TypeError::NotAStruct {
                name: types.type_name(self.ty),
            });
        }
        if !self.has_default_constructor() {
            return Err(TypeError::NoDefaultConstructor {
                name: types.type_name(self.ty),
            });
        }
        let mut fields = FxHashMap::default();
        for member in self.readable.iter().chain(self.writable.iter()) {
            if !fields.contains_key(&member.name) {
                fields.insert(member.name.clone(), types.default_value(member.ty)?);
            }
        }
        Ok(Value::Struct { ty: self.ty, fields })
    }

    /// Compute the descriptor for a type
    ///
    /// Walks the inheritance chain most-derived first, then implemented
    /// interfaces, collecting member candidates in walk order and
    /// deduplicating by name: readable keeps the first seen; writable keeps
    /// the first read+write candidate if the group has one, otherwise the
    /// first. A member that cannot be assigned to still counts as writable
    /// when its declared type is a list or map (it can be appended to in
    /// place); one that is neither assignable nor in-place mutable is
    /// excluded. Constructors come only from the type itself.
    fn compute(ty: TypeId, types: &TypeRegistry) -> Result<TypeDescriptor, TypeError> {
        let def = types.expect(ty)?;

        let strukt = match def.as_struct() {
            Some(s) => s,
            None => {
                return Ok(TypeDescriptor {
                    ty,
                    readable: Vec::new(),
                    writable: Vec::new(),
                    no_arg_methods: Vec::new(),
                    constructors: Vec::new(),
                });
            }
        };
        let constructors = strukt.constructors.clone();

        let mut readable: Vec<MemberAccessor> = Vec::new();
        let mut writable: Vec<MemberAccessor> = Vec::new();
        let mut no_arg_methods: Vec<MethodAccessor> = Vec::new();

        for walked in types.inheritance_walk(ty)? {
            let walked_def = match types.expect(walked)?.as_struct() {
                Some(s) => s,
                None => continue,
            };

            for member in &walked_def.members {
                let accessor = MemberAccessor {
                    name: member.name.clone(),
                    declared_in: walked,
                    ty: member.ty,
                    can_read: member.can_read,
                    can_write: member.can_write,
                };

                if member.can_read && readable.iter().all(|m| m.name != member.name) {
                    readable.push(accessor.clone());
                }

                let in_place = types
                    .expect(member.ty)
                    .map(Type::is_in_place_mutable)
                    .unwrap_or(false);
                if member.can_write || in_place {
                    match writable.iter_mut().find(|m| m.name == member.name) {
                        None => writable.push(accessor),
                        Some(existing) => {
                            // Prefer the first candidate that supports both
                            // read and write over a one-sided one.
                            if !(existing.can_read && existing.can_write)
                                && accessor.can_read
                                && accessor.can_write
                            {
                                *existing = accessor;
                            }
                        }
                    }
                }
            }

            for method in &walked_def.methods {
                if no_arg_methods.iter().all(|m| m.name != method.name) {
                    no_arg_methods.push(MethodAccessor {
                        name: method.name.clone(),
                        declared_in: walked,
                        ret: method.ret,
                        body: method.body.clone(),
                    });
                }
            }
        }

        Ok(TypeDescriptor {
            ty,
            readable,
            writable,
            no_arg_methods,
            constructors,
        })
    }
}

/// Process-wide cache of type descriptors
///
/// Shared, read-mostly. Failed computations (unknown type ids in the walk)
/// are surfaced to the caller and never cached, so a later retry can succeed.
#[derive(Debug)]
pub struct DescriptorCache {
    types: Arc<TypeRegistry>,
    cache: DashMap<TypeId, Arc<TypeDescriptor>>,
}

impl DescriptorCache {
    /// Create a cache over a frozen type registry
    pub fn new(types: Arc<TypeRegistry>) -> Self {
        DescriptorCache {
            types,
            cache: DashMap::new(),
        }
    }

    /// The registry this cache describes types from
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Get the descriptor for a type, computing and caching it on first use
    ///
    /// Idempotent: the same `Arc` is returned for the same type across
    /// calls. Concurrent first calls may compute twice; the entry API
    /// guarantees a single published result.
    pub fn describe(&self, ty: TypeId) -> Result<Arc<TypeDescriptor>, TypeError> {
        if let Some(descriptor) = self.cache.get(&ty) {
            return Ok(descriptor.clone());
        }
        let computed = Arc::new(TypeDescriptor::compute(ty, &self.types)?);
        Ok(self.cache.entry(ty).or_insert(computed).clone())
    }
}
