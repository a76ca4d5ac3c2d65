use type_registry::{PodKind, Type, TypeIndex, TypeRegistry};

/// Registers `Struct{a: u8, b: u32}`, the layout used by the `{ptr=8, int=4,
/// endian=little}` struct scenario: `a` at offset 0, `b` padded to offset 4.
pub fn s1_struct_registry() -> (TypeRegistry, TypeIndex) {
    let reg = TypeRegistry::new();
    reg.register(TypeIndex(0), Type::Pod(PodKind::U8)).unwrap();
    reg.register(TypeIndex(1), Type::Pod(PodKind::U32)).unwrap();
    let idx = TypeIndex(2);
    reg.register(idx, Type::struct_of([("a", TypeIndex(0)), ("b", TypeIndex(1))]))
        .unwrap();
    (reg, idx)
}

/// Registers `Array(u16, 3)`.
pub fn s2_array_registry() -> (TypeRegistry, TypeIndex) {
    let reg = TypeRegistry::new();
    reg.register(TypeIndex(0), Type::Pod(PodKind::U16)).unwrap();
    let idx = TypeIndex(1);
    reg.register(idx, Type::Array(TypeIndex(0), 3)).unwrap();
    (reg, idx)
}

/// Registers `Slice(u32)`, used by `PutMemory`/fictional-pointer scenarios.
pub fn u32_slice_registry() -> (TypeRegistry, TypeIndex) {
    let reg = TypeRegistry::new();
    reg.register(TypeIndex(0), Type::Pod(PodKind::U32)).unwrap();
    let idx = TypeIndex(1);
    reg.register(idx, Type::Slice(TypeIndex(0))).unwrap();
    (reg, idx)
}
