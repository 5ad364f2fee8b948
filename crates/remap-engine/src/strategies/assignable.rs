//! Assignable-type fallback

use crate::error::MapError;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{TypeId, TypeRegistry, Value};

/// Copies the value as-is when the destination type is assignable from the
/// source type (identical, or a struct upcast through the base chain or an
/// implemented interface)
pub struct AssignableStrategy;

impl MappingStrategy for AssignableStrategy {
    fn name(&self) -> &'static str {
        "assignable"
    }

    fn is_match(&self, src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool {
        types.is_assignable(src, dest)
    }

    fn map(
        &self,
        value: &Value,
        _src: TypeId,
        _dest: TypeId,
        _ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Mapper;
    use remap_types::{ConstructorDef, MemberDef, StructType, TypeRegistry};
    use std::sync::Arc;

    #[test]
    fn identical_types_copy_through() {
        let types = Arc::new(TypeRegistry::new());
        let mapper = Mapper::new(Arc::clone(&types));
        assert_eq!(
            mapper.map(&Value::Int(5), types.int_type()).unwrap(),
            Value::Int(5)
        );
        assert_eq!(
            mapper.map(&Value::str("x"), types.str_type()).unwrap(),
            Value::str("x")
        );
    }

    #[test]
    fn upcast_to_interface_copies_the_instance() {
        let mut registry = TypeRegistry::new();
        let str_ty = registry.str_type();
        // No default constructor on the interface, so the struct strategy
        // does not claim the pair and assignability is exercised.
        let named = registry
            .register_struct(
                StructType::new("Named").with_member(MemberDef::read_only("name", str_ty)),
            )
            .unwrap();
        let user = registry
            .register_struct(
                StructType::new("User")
                    .with_interface(named)
                    .with_member(MemberDef::new("name", str_ty))
                    .with_constructor(ConstructorDef::default_ctor()),
            )
            .unwrap();
        let types = Arc::new(registry);
        let mapper = Mapper::new(Arc::clone(&types));

        let user_desc = mapper.describe(user).unwrap();
        let mut instance = user_desc.instantiate(mapper.types()).unwrap();
        instance.set_field("name", Value::str("Ada")).unwrap();

        let winner = mapper.resolve(user, named).unwrap();
        assert_eq!(winner.name(), "assignable");

        let mapped = mapper.map(&instance, named).unwrap();
        assert_eq!(mapped, instance);
    }
}
