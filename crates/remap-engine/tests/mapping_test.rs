use remap_engine::{MapError, Mapper, MAX_MAPPING_DEPTH};
use remap_types::{
    ConstructorDef, EnumType, MemberDef, StructType, TypeId, TypeRegistry, Value,
};
use std::sync::Arc;

/// `OrderRow { id: int, total: str }` and `OrderView { id: int, total: int }`,
/// plus interned list types over each.
fn order_registry() -> (Arc<TypeRegistry>, TypeId, TypeId, TypeId, TypeId) {
    let mut registry = TypeRegistry::new();
    let int = registry.int_type();
    let str_ty = registry.str_type();
    let row = registry
        .register_struct(
            StructType::new("OrderRow")
                .with_member(MemberDef::new("id", int))
                .with_member(MemberDef::new("total", str_ty))
                .with_constructor(ConstructorDef::default_ctor()),
        )
        .unwrap();
    let view = registry
        .register_struct(
            StructType::new("OrderView")
                .with_member(MemberDef::new("id", int))
                .with_member(MemberDef::new("total", int))
                .with_constructor(ConstructorDef::default_ctor()),
        )
        .unwrap();
    let row_list = registry.list_of(row);
    let view_list = registry.list_of(view);
    (Arc::new(registry), row, view, row_list, view_list)
}

fn order_row(mapper: &Mapper, row: TypeId, id: i64, total: &str) -> Value {
    let desc = mapper.describe(row).unwrap();
    let mut value = desc.instantiate(mapper.types()).unwrap();
    value.set_field("id", Value::Int(id)).unwrap();
    value.set_field("total", Value::str(total)).unwrap();
    value
}

#[test]
fn enum_round_trips_through_symbol_names() {
    let mut registry = TypeRegistry::new();
    let color = registry
        .register_enum(EnumType::new("Color", ["Red", "Green", "Blue"]))
        .unwrap();
    let str_ty = registry.str_type();
    let mapper = Mapper::new(Arc::new(registry));

    for symbol in 0..3 {
        let original = Value::Enum { ty: color, symbol };
        let name = mapper.map(&original, str_ty).unwrap();
        let back = mapper.map(&name, color).unwrap();
        assert_eq!(back, original);
    }
}

#[test]
fn unknown_enum_symbol_is_a_strategy_failure() {
    let mut registry = TypeRegistry::new();
    let color = registry
        .register_enum(EnumType::new("Color", ["Red", "Green", "Blue"]))
        .unwrap();
    let mapper = Mapper::new(Arc::new(registry));

    let err = mapper.map(&Value::str("Purple"), color).unwrap_err();
    match err {
        MapError::StrategyFailure {
            source,
            destination,
            cause,
            ..
        } => {
            assert_eq!(source, "str");
            assert_eq!(destination, "Color");
            assert!(matches!(*cause, MapError::UnknownEnumSymbol { .. }));
        }
        other => panic!("expected a strategy failure, got {other:?}"),
    }
}

#[test]
fn collection_maps_three_elements_in_order() {
    let (types, row, _view, _row_list, view_list) = order_registry();
    let mapper = Mapper::new(types);

    let source = Value::List {
        elem: row,
        items: vec![
            order_row(&mapper, row, 1, "10"),
            order_row(&mapper, row, 2, "20"),
            order_row(&mapper, row, 3, "30"),
        ],
    };

    let mapped = mapper.map(&source, view_list).unwrap();
    match mapped {
        Value::List { items, .. } => {
            assert_eq!(items.len(), 3);
            for (i, item) in items.iter().enumerate() {
                let expected = (i as i64) + 1;
                assert_eq!(item.get_field("id").unwrap(), &Value::Int(expected));
                assert_eq!(
                    item.get_field("total").unwrap(),
                    &Value::Int(expected * 10)
                );
            }
        }
        other => panic!("expected a list, got {other:?}"),
    }
}

#[test]
fn nested_failure_reports_the_member_path() {
    let (types, row, _view, _row_list, view_list) = order_registry();
    let mapper = Mapper::new(types);

    let source = Value::List {
        elem: row,
        items: vec![
            order_row(&mapper, row, 1, "10"),
            order_row(&mapper, row, 2, "not a number"),
        ],
    };

    let err = mapper.map(&source, view_list).unwrap_err();
    match err {
        MapError::StrategyFailure { path, cause, .. } => {
            assert_eq!(path, "[1].total");
            assert!(matches!(*cause, MapError::ParseFailure { .. }));
        }
        other => panic!("expected a strategy failure, got {other:?}"),
    }
}

#[test]
fn unclaimed_pair_never_defaults_silently() {
    let mut registry = TypeRegistry::new();
    let source_ty = registry
        .register_struct(
            StructType::new("Source").with_constructor(ConstructorDef::default_ctor()),
        )
        .unwrap();
    // No zero-argument constructor, no conversions, no shared ancestry:
    // nothing in the default catalog claims this pair.
    let dest_ty = registry
        .register_struct(StructType::new("Opaque").with_constructor(ConstructorDef::new(
            vec![("seed".to_string(), registry.int_type())],
        )))
        .unwrap();
    let mapper = Mapper::new(Arc::new(registry));

    assert!(mapper.resolve(source_ty, dest_ty).is_none());

    let desc = mapper.describe(source_ty).unwrap();
    let source = desc.instantiate(mapper.types()).unwrap();
    let err = mapper.map(&source, dest_ty).unwrap_err();
    match err {
        MapError::UnmappedTypePair {
            source,
            destination,
            ..
        } => {
            assert_eq!(source, "Source");
            assert_eq!(destination, "Opaque");
        }
        other => panic!("expected an unmapped type pair, got {other:?}"),
    }
}

/// Register `Node { value: int, next: Node? }` and a parallel view type.
fn node_registry() -> (Arc<TypeRegistry>, TypeId, TypeId) {
    let mut registry = TypeRegistry::new();
    let int = registry.int_type();
    let str_ty = registry.str_type();

    let node = registry
        .register_struct(
            StructType::new("Node")
                .with_member(MemberDef::new("value", int))
                .with_constructor(ConstructorDef::default_ctor()),
        )
        .unwrap();
    let opt_node = registry.nullable_of(node);
    registry
        .add_member(node, MemberDef::new("next", opt_node))
        .unwrap();

    let view = registry
        .register_struct(
            StructType::new("NodeView")
                .with_member(MemberDef::new("value", str_ty))
                .with_constructor(ConstructorDef::default_ctor()),
        )
        .unwrap();
    let opt_view = registry.nullable_of(view);
    registry
        .add_member(view, MemberDef::new("next", opt_view))
        .unwrap();

    (Arc::new(registry), node, view)
}

fn node_chain(mapper: &Mapper, node: TypeId, length: usize) -> Value {
    let desc = mapper.describe(node).unwrap();
    let mut current = Value::Null;
    for i in (1..=length).rev() {
        let mut next = desc.instantiate(mapper.types()).unwrap();
        next.set_field("value", Value::Int(i as i64)).unwrap();
        next.set_field("next", current).unwrap();
        current = next;
    }
    current
}

#[test]
fn self_referential_type_maps_a_finite_chain() {
    let (types, node, view) = node_registry();
    let mapper = Mapper::new(Arc::clone(&types));

    let chain = node_chain(&mapper, node, 5);
    let mapped = mapper.map(&chain, view).unwrap();

    let mut cursor = &mapped;
    for i in 1..=5 {
        assert_eq!(
            cursor.get_field("value").unwrap(),
            &Value::str(i.to_string())
        );
        cursor = cursor.get_field("next").unwrap();
    }
    assert!(cursor.is_null());
}

#[test]
fn runaway_nesting_hits_the_depth_bound_instead_of_the_stack() {
    let (types, node, view) = node_registry();
    let mapper = Mapper::new(Arc::clone(&types));

    // Each node costs several recursion steps, so this comfortably
    // exceeds the bound.
    let chain = node_chain(&mapper, node, MAX_MAPPING_DEPTH);
    let err = mapper.map(&chain, view).unwrap_err();

    let mut cause: &MapError = &err;
    while let MapError::StrategyFailure { cause: inner, .. } = cause {
        cause = inner;
    }
    assert!(matches!(cause, MapError::DepthExceeded { .. }));
}

#[test]
fn resolution_prefers_earlier_registration_for_overlapping_pairs() {
    let mut registry = TypeRegistry::new();
    let color = registry
        .register_enum(EnumType::new("Color", ["Red", "Green", "Blue"]))
        .unwrap();
    let str_ty = registry.str_type();
    let mapper = Mapper::new(Arc::new(registry));

    // Both the string strategy and the enum strategy can map enum -> str;
    // the string strategy is registered first and must win.
    let winner = mapper.resolve(color, str_ty).unwrap();
    assert_eq!(winner.name(), "string");
}
