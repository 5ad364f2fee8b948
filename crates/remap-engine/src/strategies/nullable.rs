//! Nullable wrapping and unwrapping

use crate::error::MapError;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{Type, TypeId, TypeRegistry, Value};

/// Unwraps a nullable source
///
/// `Null` propagates to the destination's empty representation: `Null` when
/// the destination is itself nullable (or a struct), the type's default
/// value otherwise. A present value recurses as `inner → dest`.
pub struct NullableSourceStrategy;

impl MappingStrategy for NullableSourceStrategy {
    fn name(&self) -> &'static str {
        "nullable-source"
    }

    fn is_match(&self, src: TypeId, _dest: TypeId, types: &TypeRegistry) -> bool {
        matches!(types.get(src), Some(Type::Nullable(_)))
    }

    fn map(
        &self,
        value: &Value,
        src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let inner = match ctx.types().expect(src)? {
            Type::Nullable(inner) => *inner,
            _ => src,
        };
        if value.is_null() {
            return Ok(ctx.types().default_value(dest)?);
        }
        ctx.map_value(value, inner, dest)
    }
}

/// Wraps into a nullable destination
///
/// The wrapped representation is the inner value itself (`Null` stands for
/// the absent case), so mapping recurses as `src → inner`.
pub struct NullableDestStrategy;

impl MappingStrategy for NullableDestStrategy {
    fn name(&self) -> &'static str {
        "nullable-destination"
    }

    fn is_match(&self, _src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool {
        matches!(types.get(dest), Some(Type::Nullable(_)))
    }

    fn map(
        &self,
        value: &Value,
        src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let inner = match ctx.types().expect(dest)? {
            Type::Nullable(inner) => *inner,
            _ => dest,
        };
        if value.is_null() {
            return Ok(Value::Null);
        }
        ctx.map_value(value, src, inner)
    }
}
