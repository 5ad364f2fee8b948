//! User-defined conversion operators

use crate::error::MapError;
use crate::strategy::{MappingContext, MappingStrategy};
use remap_types::{ConversionDef, ConversionDirection, ConversionKind, Type, TypeId, TypeRegistry, Value};

/// Invokes a user-defined conversion operator declared on the source type
/// (converting *to* the destination) or on the destination type (converting
/// *from* the source)
///
/// One instance handles one [`ConversionKind`]; the default catalog
/// registers the implicit instance before the explicit one, so an implicit
/// operator wins by list position when both exist.
pub struct ConversionOperatorStrategy {
    kind: ConversionKind,
}

impl ConversionOperatorStrategy {
    /// The implicit-operator instance
    pub fn implicit() -> Self {
        ConversionOperatorStrategy {
            kind: ConversionKind::Implicit,
        }
    }

    /// The explicit-operator instance
    pub fn explicit() -> Self {
        ConversionOperatorStrategy {
            kind: ConversionKind::Explicit,
        }
    }

    fn find<'a>(
        &self,
        types: &'a TypeRegistry,
        src: TypeId,
        dest: TypeId,
    ) -> Option<&'a ConversionDef> {
        let declared_on_source = types
            .get(src)
            .and_then(Type::as_struct)
            .and_then(|s| {
                s.conversions.iter().find(|c| {
                    c.kind == self.kind
                        && c.direction == ConversionDirection::To
                        && c.other == dest
                })
            });
        declared_on_source.or_else(|| {
            types.get(dest).and_then(Type::as_struct).and_then(|s| {
                s.conversions.iter().find(|c| {
                    c.kind == self.kind
                        && c.direction == ConversionDirection::From
                        && c.other == src
                })
            })
        })
    }
}

impl MappingStrategy for ConversionOperatorStrategy {
    fn name(&self) -> &'static str {
        match self.kind {
            ConversionKind::Implicit => "implicit-conversion",
            ConversionKind::Explicit => "explicit-conversion",
        }
    }

    fn is_match(&self, src: TypeId, dest: TypeId, types: &TypeRegistry) -> bool {
        self.find(types, src, dest).is_some()
    }

    fn map(
        &self,
        value: &Value,
        src: TypeId,
        dest: TypeId,
        ctx: &mut MappingContext<'_>,
    ) -> Result<Value, MapError> {
        let types = ctx.types();
        let conversion = self.find(types, src, dest).ok_or_else(|| {
            MapError::ConversionFailed {
                source: types.type_name(src),
                destination: types.type_name(dest),
                message: "no conversion operator declared".to_string(),
            }
        })?;
        (conversion.convert)(value).map_err(|err| MapError::ConversionFailed {
            source: types.type_name(src),
            destination: types.type_name(dest),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::Mapper;
    use remap_types::{ConversionDef, StructType, TypeError, TypeRegistry};
    use std::sync::Arc;

    #[test]
    fn source_declared_operator_converts_to_destination() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let celsius = registry
            .register_struct(StructType::new("Celsius").with_conversion(ConversionDef::to(
                int,
                ConversionKind::Implicit,
                |v| {
                    let degrees = v.get_field("degrees")?.clone();
                    Ok(degrees)
                },
            )))
            .unwrap();
        let types = Arc::new(registry);
        let mapper = Mapper::new(Arc::clone(&types));

        let mut instance = Value::Struct {
            ty: celsius,
            fields: Default::default(),
        };
        instance.set_field("degrees", Value::Int(21)).unwrap();

        assert_eq!(mapper.map(&instance, int).unwrap(), Value::Int(21));
    }

    #[test]
    fn destination_declared_operator_converts_from_source() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let celsius = registry
            .register_struct(StructType::new("Celsius"))
            .unwrap();
        registry
            .add_conversion(
                celsius,
                ConversionDef::from(int, ConversionKind::Explicit, move |v| match v {
                    Value::Int(i) => {
                        let mut fields = rustc_hash::FxHashMap::default();
                        fields.insert("degrees".to_string(), Value::Int(*i));
                        Ok(Value::Struct {
                            ty: celsius,
                            fields,
                        })
                    }
                    other => Err(TypeError::NotAnInstance {
                        expected: "int",
                        actual: other.kind(),
                    }),
                }),
            )
            .unwrap();
        let types = Arc::new(registry);
        let mapper = Mapper::new(Arc::clone(&types));

        let winner = mapper.resolve(int, celsius).unwrap();
        assert_eq!(winner.name(), "explicit-conversion");

        let mapped = mapper.map(&Value::Int(5), celsius).unwrap();
        assert_eq!(mapped.get_field("degrees").unwrap(), &Value::Int(5));
    }

    #[test]
    fn implicit_operator_wins_over_explicit_by_position() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let wrapper = registry
            .register_struct(
                StructType::new("Wrapper")
                    .with_conversion(ConversionDef::to(int, ConversionKind::Explicit, |_| {
                        Ok(Value::Int(-1))
                    }))
                    .with_conversion(ConversionDef::to(int, ConversionKind::Implicit, |_| {
                        Ok(Value::Int(1))
                    })),
            )
            .unwrap();
        let types = Arc::new(registry);
        let mapper = Mapper::new(Arc::clone(&types));

        let winner = mapper.resolve(wrapper, int).unwrap();
        assert_eq!(winner.name(), "implicit-conversion");
    }

    #[test]
    fn failing_operator_reports_conversion_failure() {
        let mut registry = TypeRegistry::new();
        let int = registry.int_type();
        let broken = registry
            .register_struct(StructType::new("Broken").with_conversion(ConversionDef::to(
                int,
                ConversionKind::Implicit,
                |v| {
                    Err(TypeError::NotAnInstance {
                        expected: "anything else",
                        actual: v.kind(),
                    })
                },
            )))
            .unwrap();
        let types = Arc::new(registry);
        let mapper = Mapper::new(Arc::clone(&types));

        let instance = Value::Struct {
            ty: broken,
            fields: Default::default(),
        };
        let err = mapper.map(&instance, int).unwrap_err();
        match err {
            MapError::StrategyFailure { strategy, cause, .. } => {
                assert_eq!(strategy, "implicit-conversion");
                assert!(matches!(*cause, MapError::ConversionFailed { .. }));
            }
            other => panic!("expected a strategy failure, got {other:?}"),
        }
    }
}
