use pretty_assertions::assert_eq;
use proptest::prelude::*;
use type_registry::{MemoryLayout, PodKind, Type, TypeIndex, TypeRegistry};

use crate::{box_value, decode_memory, unbox_value, Decoder, Encoder, PodValue, Pointer, Value};

fn registry_with_struct() -> (TypeRegistry, TypeIndex) {
    let reg = TypeRegistry::new();
    reg.register(TypeIndex(0), Type::Pod(PodKind::U8)).unwrap();
    reg.register(TypeIndex(1), Type::Pod(PodKind::U32)).unwrap();
    reg.register(TypeIndex(2), Type::Pointer(TypeIndex(0)))
        .unwrap();
    reg.register(
        TypeIndex(3),
        Type::struct_of([
            ("flag", TypeIndex(0)),
            ("count", TypeIndex(1)),
            ("next", TypeIndex(2)),
        ]),
    )
    .unwrap();
    (reg, TypeIndex(3))
}

#[test]
fn struct_round_trip_with_padding() {
    let (reg, idx) = registry_with_struct();
    let layout = MemoryLayout::LP64_LE;
    let ty = reg.get_type(idx).unwrap();

    let value = Value::Struct(
        vec![
            Value::Pod(PodValue::U8(7)),
            Value::Pod(PodValue::U32(0xDEAD_BEEF)),
            Value::Pointer(Pointer::real(0x1000)),
        ]
        .into(),
    );

    let mut enc = Encoder::new(layout);
    unbox_value(&mut enc, &mut |a| a, &reg, &ty, &value).unwrap();
    let bytes = enc.into_bytes();

    // u8 at 0, pad to 4, u32 at 4..8, pointer at 8..16, total 16 (already
    // aligned to the struct's own 8-byte alignment).
    assert_eq!(bytes.len(), 16);

    let mut dec = Decoder::new(&bytes, layout);
    let decoded = box_value(&mut dec, &reg, &ty).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn fictional_pointer_runs_through_resolver() {
    let reg = TypeRegistry::new();
    reg.register(TypeIndex(0), Type::Pod(PodKind::U8)).unwrap();
    reg.register(TypeIndex(1), Type::Pointer(TypeIndex(0)))
        .unwrap();
    let layout = MemoryLayout::LP64_LE;
    let ty = reg.get_type(TypeIndex(1)).unwrap();

    let value = Value::Pointer(Pointer::fictional(42));
    let mut enc = Encoder::new(layout);
    unbox_value(&mut enc, &mut |fictional| fictional + 1000, &reg, &ty, &value).unwrap();
    let bytes = enc.into_bytes();

    let mut dec = Decoder::new(&bytes, layout);
    let Value::Pointer(ptr) = box_value(&mut dec, &reg, &ty).unwrap() else {
        panic!("expected pointer");
    };
    assert_eq!(ptr.address, 1042);
}

#[test]
fn slice_decode_truncates_to_whole_elements() {
    let reg = TypeRegistry::new();
    reg.register(TypeIndex(0), Type::Pod(PodKind::U32)).unwrap();
    reg.register(TypeIndex(1), Type::Slice(TypeIndex(0)))
        .unwrap();
    let layout = MemoryLayout::LP64_LE;
    let ty = reg.get_type(TypeIndex(1)).unwrap();

    // 10 bytes only fits 2 whole u32s; the trailing 2 bytes are dropped.
    let bytes = [1u8, 0, 0, 0, 2, 0, 0, 0, 0xFF, 0xFF];
    let mut dec = Decoder::new(&bytes, layout);
    let decoded = decode_memory(&mut dec, &reg, bytes.len() as u64, &ty).unwrap();
    let Value::Slice(values) = decoded else {
        panic!("expected slice");
    };
    assert_eq!(values.len(), 2);
    assert_eq!(values[0], Value::Pod(PodValue::U32(1)));
    assert_eq!(values[1], Value::Pod(PodValue::U32(2)));
}

#[test]
fn zero_size_slice_range_errors() {
    let reg = TypeRegistry::new();
    reg.register(TypeIndex(0), Type::Pod(PodKind::U8)).unwrap();
    reg.register(TypeIndex(1), Type::Slice(TypeIndex(0)))
        .unwrap();
    let layout = MemoryLayout::LP64_LE;
    let ty = reg.get_type(TypeIndex(1)).unwrap();
    let bytes: [u8; 0] = [];
    let mut dec = Decoder::new(&bytes, layout);
    assert!(decode_memory(&mut dec, &reg, 0, &ty).is_err());
}

proptest! {
    #[test]
    fn pod_u32_round_trips(v in any::<u32>()) {
        let reg = TypeRegistry::new();
        reg.register(TypeIndex(0), Type::Pod(PodKind::U32)).unwrap();
        let layout = MemoryLayout::LP64_LE;
        let ty = reg.get_type(TypeIndex(0)).unwrap();

        let mut enc = Encoder::new(layout);
        unbox_value(&mut enc, &mut |a| a, &reg, &ty, &Value::Pod(PodValue::U32(v))).unwrap();
        let bytes = enc.into_bytes();

        let mut dec = Decoder::new(&bytes, layout);
        let decoded = box_value(&mut dec, &reg, &ty).unwrap();
        prop_assert_eq!(decoded, Value::Pod(PodValue::U32(v)));
    }

    #[test]
    fn array_round_trips(vals in proptest::collection::vec(any::<u8>(), 0..16)) {
        let reg = TypeRegistry::new();
        reg.register(TypeIndex(0), Type::Pod(PodKind::U8)).unwrap();
        reg.register(TypeIndex(1), Type::Array(TypeIndex(0), vals.len() as u64))
            .unwrap();
        let layout = MemoryLayout::LP64_LE;
        let ty = reg.get_type(TypeIndex(1)).unwrap();

        let value = Value::Array(vals.iter().map(|b| Value::Pod(PodValue::U8(*b))).collect());
        let mut enc = Encoder::new(layout);
        unbox_value(&mut enc, &mut |a| a, &reg, &ty, &value).unwrap();
        let bytes = enc.into_bytes();

        let mut dec = Decoder::new(&bytes, layout);
        let decoded = box_value(&mut dec, &reg, &ty).unwrap();
        prop_assert_eq!(decoded, value);
    }
}
