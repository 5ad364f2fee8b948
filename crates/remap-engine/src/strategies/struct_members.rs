//! Member-by-member struct mapping

use crate::error::MapError;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{MemberAccessor, Type, TypeError, TypeId, TypeRegistry, Value};

/// Maps one struct type to another by matching member names
///
/// The destination must declare a zero-argument constructor. Each writable
/// destination member is populated from the same-named readable source
/// member, or, failing that, from a same-named zero-argument source method
/// (a computed member projection). Member values are mapped recursively
/// through the resolver. Unmatched destination members keep their default
/// value; a `Null` source member with a non-nullable declared type is
/// skipped rather than forced onto the destination.
///
/// A writable member without a setter (admitted because its declared type is
/// a collection) is populated by appending into the existing collection
/// instead of assigning.
pub struct StructStrategy;

impl MappingStrategy for StructStrategy {
    fn name(&self) -> &'static str {
        "struct-members"
    }

    fn is_match(&self, src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool {
        let src_is_struct = types.get(src).and_then(Type::as_struct).is_some();
        let dest_constructible = types
            .get(dest)
            .and_then(Type::as_struct)
            .map(|s| s.has_default_constructor())
            .unwrap_or(false);
        src_is_struct && dest_constructible
    }

    fn map(
        &self,
        value: &Value,
        src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let src_desc = ctx.describe(src)?;
        let dest_desc = ctx.describe(dest)?;
        let mut out = dest_desc.instantiate(ctx.types())?;

        for target in dest_desc.writable_members() {
            let (member_value, member_src_ty) = match src_desc.readable(&target.name) {
                Some(member) => (member.get(value)?, member.ty),
                None => match src_desc.method(&target.name) {
                    Some(method) => (method.invoke(value)?, method.ret),
                    None => continue,
                },
            };

            let src_is_nullable = matches!(
                ctx.types().get(member_src_ty),
                Some(Type::Nullable(_))
            );
            if member_value.is_null() && !src_is_nullable {
                continue;
            }

            let mapped = ctx.map_member(&target.name, &member_value, member_src_ty, target.ty)?;
            if target.can_write {
                target.set(&mut out, mapped)?;
            } else {
                append_in_place(&mut out, target, mapped)?;
            }
        }

        Ok(out)
    }
}

/// Extend a collection-typed member in place instead of assigning to it
fn append_in_place(
    out: &mut Value,
    member: &MemberAccessor,
    mapped: Value,
) -> Result<(), MapError> {
    let slot = out.get_field_mut(&member.name)?;
    match (slot, mapped) {
        (Value::List { items, .. }, Value::List { items: new_items, .. }) => {
            items.extend(new_items);
            Ok(())
        }
        (
            Value::Map { entries, .. },
            Value::Map {
                entries: new_entries,
                ..
            },
        ) => {
            entries.extend(new_entries);
            Ok(())
        }
        (slot, _) => Err(TypeError::NotAnInstance {
            expected: "list or map",
            actual: slot.kind(),
        }
        .into()),
    }
}
