//! Enum mapping by symbolic name

use crate::error::MapError;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{Type, TypeError, TypeId, TypeRegistry, Value};

/// Maps enums by symbol name, case-insensitively
///
/// Handles enum→enum, string→enum, and enum→string (the last is normally
/// claimed first by [`StringStrategy`](crate::strategies::StringStrategy)
/// under the default ordering; it is supported here so custom catalogs can
/// omit that strategy). A name with no matching symbol on the destination
/// enum is a failure, never a default symbol.
pub struct EnumStrategy;

impl MappingStrategy for EnumStrategy {
    fn name(&self) -> &'static str {
        "enum-by-name"
    }

    fn is_match(&self, src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool {
        let src_enum = matches!(types.get(src), Some(Type::Enum(_)));
        let dest_enum = matches!(types.get(dest), Some(Type::Enum(_)));
        (src_enum && dest_enum)
            || (src == types.str_type() && dest_enum)
            || (src_enum && dest == types.str_type())
    }

    fn map(
        &self,
        value: &Value,
        _src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let symbol_name = match value {
            Value::Enum { ty, symbol } => ctx.types().enum_symbol_name(*ty, *symbol)?.to_string(),
            Value::Str(s) => s.clone(),
            other => {
                return Err(TypeError::NotAnInstance {
                    expected: "enum or str",
                    actual: other.kind(),
                }
                .into());
            }
        };

        if dest == ctx.types().str_type() {
            return Ok(Value::Str(symbol_name));
        }

        let dest_def = ctx.types().expect(dest)?;
        let dest_enum = dest_def.as_enum().ok_or(TypeError::NotAnInstance {
            expected: "enum",
            actual: dest_def.kind_name(),
        })?;
        match dest_enum.find_symbol(&symbol_name) {
            Some(symbol) => Ok(Value::Enum { ty: dest, symbol }),
            None => Err(MapError::UnknownEnumSymbol {
                symbol: symbol_name,
                ty: dest_enum.name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Mapper;
    use remap_types::{EnumType, TypeRegistry};
    use std::sync::Arc;

    fn setup() -> (Arc<TypeRegistry>, TypeId, TypeId) {
        let mut registry = TypeRegistry::new();
        let color = registry
            .register_enum(EnumType::new("Color", ["Red", "Green", "Blue"]))
            .unwrap();
        let paint = registry
            .register_enum(EnumType::new("Paint", ["BLUE", "GREEN", "RED"]))
            .unwrap();
        (Arc::new(registry), color, paint)
    }

    #[test]
    fn enum_to_enum_matches_names_not_positions() {
        let (types, color, paint) = setup();
        let mapper = Mapper::new(Arc::clone(&types));

        // Color::Red is index 0; Paint::RED is index 2.
        let mapped = mapper
            .map(&Value::Enum { ty: color, symbol: 0 }, paint)
            .unwrap();
        assert_eq!(mapped, Value::Enum { ty: paint, symbol: 2 });
    }

    #[test]
    fn string_to_enum_is_case_insensitive() {
        let (types, color, _) = setup();
        let mapper = Mapper::new(Arc::clone(&types));

        let mapped = mapper.map(&Value::str("green"), color).unwrap();
        assert_eq!(mapped, Value::Enum { ty: color, symbol: 1 });
    }

    #[test]
    fn unknown_symbol_fails_explicitly() {
        let (types, color, _) = setup();
        let mapper = Mapper::new(Arc::clone(&types));

        let err = mapper.map(&Value::str("Purple"), color).unwrap_err();
        match err {
            MapError::StrategyFailure { strategy, cause, .. } => {
                assert_eq!(strategy, "enum-by-name");
                assert!(matches!(*cause, MapError::UnknownEnumSymbol { .. }));
            }
            other => panic!("expected a strategy failure, got {other:?}"),
        }
    }
}
