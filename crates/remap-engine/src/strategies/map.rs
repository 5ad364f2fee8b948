//! Keyed-collection mapping

use crate::error::MapError;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{Type, TypeError, TypeId, TypeRegistry, Value};

/// Maps a keyed collection to another, entry by entry
///
/// Keys and values are each mapped recursively under their declared types;
/// entry order is preserved.
pub struct MapStrategy;

impl MappingStrategy for MapStrategy {
    fn name(&self) -> &'static str {
        "map"
    }

    fn is_match(&self, src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool {
        matches!(types.get(src), Some(Type::Map { .. }))
            && matches!(types.get(dest), Some(Type::Map { .. }))
    }

    fn map(
        &self,
        value: &Value,
        src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let (src_key, src_value) = match ctx.types().expect(src)? {
            Type::Map { key, value } => (*key, *value),
            other => {
                return Err(TypeError::NotAnInstance {
                    expected: "map",
                    actual: other.kind_name(),
                }
                .into());
            }
        };
        let (dest_key, dest_value) = match ctx.types().expect(dest)? {
            Type::Map { key, value } => (*key, *value),
            other => {
                return Err(TypeError::NotAnInstance {
                    expected: "map",
                    actual: other.kind_name(),
                }
                .into());
            }
        };

        let entries = match value {
            Value::Map { entries, .. } => entries,
            other => {
                return Err(TypeError::NotAnInstance {
                    expected: "map",
                    actual: other.kind(),
                }
                .into());
            }
        };

        let mut mapped = Vec::with_capacity(entries.len());
        for (i, (k, v)) in entries.iter().enumerate() {
            let mk = ctx.map_member(&format!("[{i}].key"), k, src_key, dest_key)?;
            let mv = ctx.map_member(&format!("[{i}].value"), v, src_value, dest_value)?;
            mapped.push((mk, mv));
        }

        Ok(Value::Map {
            key: dest_key,
            value: dest_value,
            entries: mapped,
        })
    }
}
