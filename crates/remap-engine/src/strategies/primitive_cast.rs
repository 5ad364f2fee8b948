//! Primitive conversions

use crate::error::MapError;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{TypeError, TypeId, TypeRegistry, Value};

/// Converts between primitives where a sensible coercion exists:
/// int↔float (float-to-int truncates) and string parsing to bool/int/float
///
/// Parse failures are strategy failures, never silent defaults. Formatting
/// to string is owned by [`StringStrategy`](crate::strategies::StringStrategy).
pub struct PrimitiveCastStrategy;

impl MappingStrategy for PrimitiveCastStrategy {
    fn name(&self) -> &'static str {
        "primitive-cast"
    }

    fn is_match(&self, src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool {
        let (int, float, str_ty, bool_ty) = (
            types.int_type(),
            types.float_type(),
            types.str_type(),
            types.bool_type(),
        );
        (src == int && dest == float)
            || (src == float && dest == int)
            || (src == str_ty && (dest == int || dest == float || dest == bool_ty))
    }

    fn map(
        &self,
        value: &Value,
        _src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let types = ctx.types();
        match value {
            Value::Int(i) if dest == types.float_type() => Ok(Value::Float(*i as f64)),
            Value::Float(f) if dest == types.int_type() => Ok(Value::Int(*f as i64)),
            Value::Str(s) if dest == types.int_type() => {
                s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
                    MapError::ParseFailure {
                        text: s.clone(),
                        ty: "int".to_string(),
                    }
                })
            }
            Value::Str(s) if dest == types.float_type() => {
                s.trim().parse::<f64>().map(Value::Float).map_err(|_| {
                    MapError::ParseFailure {
                        text: s.clone(),
                        ty: "float".to_string(),
                    }
                })
            }
            Value::Str(s) if dest == types.bool_type() => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(Value::Bool(true))
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(Value::Bool(false))
                } else {
                    Err(MapError::ParseFailure {
                        text: s.clone(),
                        ty: "bool".to_string(),
                    })
                }
            }
            other => Err(TypeError::NotAnInstance {
                expected: "primitive",
                actual: other.kind(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Mapper;
    use remap_types::TypeRegistry;
    use std::sync::Arc;

    #[test]
    fn numeric_and_string_casts() {
        let types = Arc::new(TypeRegistry::new());
        let mapper = Mapper::new(Arc::clone(&types));

        assert_eq!(
            mapper.map(&Value::Int(3), types.float_type()).unwrap(),
            Value::Float(3.0)
        );
        assert_eq!(
            mapper.map(&Value::Float(3.9), types.int_type()).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            mapper.map(&Value::str(" 17 "), types.int_type()).unwrap(),
            Value::Int(17)
        );
        assert_eq!(
            mapper.map(&Value::str("2.5"), types.float_type()).unwrap(),
            Value::Float(2.5)
        );
        assert_eq!(
            mapper.map(&Value::str("TRUE"), types.bool_type()).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn parse_failure_is_explicit() {
        let types = Arc::new(TypeRegistry::new());
        let mapper = Mapper::new(Arc::clone(&types));

        let err = mapper
            .map(&Value::str("not a number"), types.int_type())
            .unwrap_err();
        match err {
            MapError::StrategyFailure { strategy, cause, .. } => {
                assert_eq!(strategy, "primitive-cast");
                assert!(matches!(*cause, MapError::ParseFailure { .. }));
            }
            other => panic!("expected a strategy failure, got {other:?}"),
        }
    }
}
