//! S1/S2, plus a generated-type-tree realization of the round-trip
//! invariant:
//! `Box(Encode(v)) == v` for every well-formed value of a type tree up to
//! depth 6, built fresh per case rather than against one fixed registry.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use memory_codec::{box_value, unbox_value, Decoder, Encoder, PodValue, Value};
use type_registry::{MemoryLayout, PodKind, Type, TypeIndex, TypeRegistry};

#[test]
fn s1_struct_decodes_and_re_encodes_identically() {
    let (reg, idx) = testdata::s1_struct_registry();
    let layout = MemoryLayout::LP64_LE;
    let ty = reg.get_type(idx).unwrap();
    let bytes: [u8; 8] = [0x01, 0x00, 0x00, 0x00, 0x07, 0x00, 0x00, 0x00];

    let mut dec = Decoder::new(&bytes, layout);
    let decoded = box_value(&mut dec, &reg, &ty).unwrap();
    assert_eq!(
        decoded,
        Value::Struct(vec![Value::Pod(PodValue::U8(1)), Value::Pod(PodValue::U32(7))].into())
    );

    let mut enc = Encoder::new(layout);
    unbox_value(&mut enc, &mut |a| a, &reg, &ty, &decoded).unwrap();
    assert_eq!(enc.into_bytes(), bytes);
}

#[test]
fn s2_array_decodes_with_cursor_aligned_at_the_end() {
    let (reg, idx) = testdata::s2_array_registry();
    let layout = MemoryLayout::LP64_LE;
    let ty = reg.get_type(idx).unwrap();
    let bytes: [u8; 6] = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00];

    let mut dec = Decoder::new(&bytes, layout);
    let decoded = box_value(&mut dec, &reg, &ty).unwrap();
    assert_eq!(
        decoded,
        Value::Array(vec![
            Value::Pod(PodValue::U16(1)),
            Value::Pod(PodValue::U16(2)),
            Value::Pod(PodValue::U16(3)),
        ])
    );
    assert_eq!(dec.position(), 6);
    assert_eq!(dec.position() % 2, 0);
}

/// A type shape, generated independently of any fixed registry so each
/// property case builds its own tree (bounded to depth 6 by
/// `prop_recursive`).
#[derive(Clone, Debug)]
enum Spec {
    U8,
    U32,
    Struct(Vec<Spec>),
    Array(Box<Spec>, u8),
}

fn spec_strategy() -> impl Strategy<Value = Spec> {
    let leaf = prop_oneof![Just(Spec::U8), Just(Spec::U32)];
    leaf.prop_recursive(6, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 1..4).prop_map(Spec::Struct),
            (inner, 1u8..4).prop_map(|(s, n)| Spec::Array(Box::new(s), n)),
        ]
    })
}

fn value_strategy(spec: &Spec) -> BoxedStrategy<Value> {
    match spec {
        Spec::U8 => any::<u8>().prop_map(|v| Value::Pod(PodValue::U8(v))).boxed(),
        Spec::U32 => any::<u32>().prop_map(|v| Value::Pod(PodValue::U32(v))).boxed(),
        Spec::Array(elem, n) => {
            proptest::collection::vec(value_strategy(elem), *n as usize)
                .prop_map(Value::Array)
                .boxed()
        }
        Spec::Struct(fields) => {
            let init: BoxedStrategy<Vec<Value>> = Just(Vec::new()).boxed();
            fields
                .iter()
                .fold(init, |acc, field| {
                    (acc, value_strategy(field))
                        .prop_map(|(mut values, v)| {
                            values.push(v);
                            values
                        })
                        .boxed()
                })
                .prop_map(|values| Value::Struct(values.into()))
                .boxed()
        }
    }
}

fn register(reg: &TypeRegistry, next: &mut u32, spec: &Spec) -> TypeIndex {
    match spec {
        Spec::U8 => {
            let idx = TypeIndex(*next);
            *next += 1;
            reg.register(idx, Type::Pod(PodKind::U8)).unwrap();
            idx
        }
        Spec::U32 => {
            let idx = TypeIndex(*next);
            *next += 1;
            reg.register(idx, Type::Pod(PodKind::U32)).unwrap();
            idx
        }
        Spec::Array(elem, n) => {
            let elem_idx = register(reg, next, elem);
            let idx = TypeIndex(*next);
            *next += 1;
            reg.register(idx, Type::Array(elem_idx, *n as u64)).unwrap();
            idx
        }
        Spec::Struct(fields) => {
            let field_idxs: Vec<TypeIndex> = fields.iter().map(|f| register(reg, next, f)).collect();
            let idx = TypeIndex(*next);
            *next += 1;
            reg.register(
                idx,
                Type::struct_of(field_idxs.into_iter().enumerate().map(|(i, t)| (format!("f{i}"), t))),
            )
            .unwrap();
            idx
        }
    }
}

proptest! {
    #[test]
    fn codec_round_trips_over_bounded_depth_type_trees(
        (spec, value) in spec_strategy().prop_flat_map(|spec| {
            let value_strat = value_strategy(&spec);
            (Just(spec), value_strat)
        })
    ) {
        let reg = TypeRegistry::new();
        let mut next = 0u32;
        let idx = register(&reg, &mut next, &spec);
        let ty = reg.get_type(idx).unwrap();
        let layout = MemoryLayout::LP64_LE;

        let mut enc = Encoder::new(layout);
        unbox_value(&mut enc, &mut |a| a, &reg, &ty, &value).unwrap();
        let bytes = enc.into_bytes();

        let mut dec = Decoder::new(&bytes, layout);
        let decoded = box_value(&mut dec, &reg, &ty).unwrap();
        prop_assert_eq!(decoded, value);
    }
}
