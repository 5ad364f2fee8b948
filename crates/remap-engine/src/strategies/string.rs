//! Scalar-to-string formatting

use crate::error::MapError;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{Type, TypeError, TypeId, TypeRegistry, Value};

/// Maps scalar sources (non-string primitives and enums) to `str`
///
/// Enum symbols render as their declared names, so this strategy shadows
/// the enum strategy for enum-to-string pairs without changing the result.
/// Collection and struct sources deliberately fall through to later
/// strategies rather than producing debug renderings.
pub struct StringStrategy;

impl MappingStrategy for StringStrategy {
    fn name(&self) -> &'static str {
        "string"
    }

    fn is_match(&self, src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool {
        dest == types.str_type()
            && src != types.str_type()
            && matches!(
                types.get(src),
                Some(Type::Primitive(_)) | Some(Type::Enum(_))
            )
    }

    fn map(
        &self,
        value: &Value,
        _src: TypeId,
        _dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let text = match value {
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Enum { ty, symbol } => {
                ctx.types().enum_symbol_name(*ty, *symbol)?.to_string()
            }
            other => {
                return Err(TypeError::NotAnInstance {
                    expected: "scalar",
                    actual: other.kind(),
                }
                .into());
            }
        };
        Ok(Value::Str(text))
    }
}
