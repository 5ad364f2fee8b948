//! List-to-list mapping

use crate::error::MapError;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{Type, TypeError, TypeId, TypeRegistry, Value};

/// Maps an ordered collection to another, element by element
///
/// Each element is mapped recursively through the resolver under its
/// declared element type; order is preserved.
pub struct ListStrategy;

impl MappingStrategy for ListStrategy {
    fn name(&self) -> &'static str {
        "list"
    }

    fn is_match(&self, src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool {
        matches!(types.get(src), Some(Type::List(_)))
            && matches!(types.get(dest), Some(Type::List(_)))
    }

    fn map(
        &self,
        value: &Value,
        src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let src_elem = match ctx.types().expect(src)? {
            Type::List(elem) => *elem,
            other => {
                return Err(TypeError::NotAnInstance {
                    expected: "list",
                    actual: other.kind_name(),
                }
                .into());
            }
        };
        let dest_elem = match ctx.types().expect(dest)? {
            Type::List(elem) => *elem,
            other => {
                return Err(TypeError::NotAnInstance {
                    expected: "list",
                    actual: other.kind_name(),
                }
                .into());
            }
        };

        let items = match value {
            Value::List { items, .. } => items,
            other => {
                return Err(TypeError::NotAnInstance {
                    expected: "list",
                    actual: other.kind(),
                }
                .into());
            }
        };

        let mut mapped = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            mapped.push(ctx.map_member(&format!("[{i}]"), item, src_elem, dest_elem)?);
        }

        Ok(Value::List {
            elem: dest_elem,
            items: mapped,
        })
    }
}
