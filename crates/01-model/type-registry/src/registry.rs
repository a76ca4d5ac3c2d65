use parking_lot::RwLock;
use std::collections::HashMap;

use crate::error::{TypeError, TypeResult};
use crate::layout::MemoryLayout;
use crate::ty::{PodKind, SizedKind, Type, TypeIndex};

/// Process-wide table of [`Type`] descriptors, keyed by stable [`TypeIndex`].
///
/// Write-once per index: once a type is registered it is never replaced, so
/// the table is effectively immutable after load. Reads and writes are
/// guarded by a `parking_lot::RwLock` so the registry can be shared across a
/// process without requiring every caller to be the single writer.
#[derive(Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<TypeIndex, Type>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `ty` at `index`. Errors if `index` already holds a type.
    pub fn register(&self, index: TypeIndex, ty: Type) -> TypeResult<()> {
        let mut types = self.types.write();
        if types.contains_key(&index) {
            return Err(TypeError::AlreadyRegistered(index));
        }
        types.insert(index, ty);
        Ok(())
    }

    /// Fetches the type at `index`, or `IncompleteType` if it was never
    /// registered.
    pub fn get_type(&self, index: TypeIndex) -> TypeResult<Type> {
        self.try_get_type(index)
            .ok_or(TypeError::IncompleteType(index))
    }

    /// Fetches the type at `index` without erroring on a miss.
    pub fn try_get_type(&self, index: TypeIndex) -> Option<Type> {
        self.types.read().get(&index).cloned()
    }

    /// Computes the byte size of `ty` under `layout`, recursing through the
    /// registry for compound types.
    pub fn size_of(&self, ty: &Type, layout: &MemoryLayout) -> TypeResult<u64> {
        Ok(match ty {
            Type::Pod(pod) => size_of_pod(*pod)?,
            Type::Sized(sized) => u64::from(sized_width(*sized, layout)),
            Type::Pointer(_) => u64::from(layout.pointer_size),
            Type::Struct(fields) => self.layout_struct(fields, layout)?.0,
            Type::Array(elem, count) => {
                let elem_ty = self.get_type(*elem)?;
                self.size_of(&elem_ty, layout)? * count
            }
            Type::Pseudonym(underlying) | Type::Enum(underlying) => {
                let inner = self.get_type(*underlying)?;
                self.size_of(&inner, layout)?
            }
            Type::Slice(_) => return Err(TypeError::DynamicallySized("slice")),
            Type::Map => return Err(TypeError::DynamicallySized("map")),
            Type::Reference => return Err(TypeError::DynamicallySized("reference")),
        })
    }

    /// Computes the alignment of `ty` under `layout`.
    pub fn alignment_of(&self, ty: &Type, layout: &MemoryLayout) -> TypeResult<u64> {
        Ok(match ty {
            Type::Pod(pod) => size_of_pod(*pod)?,
            Type::Sized(sized) => u64::from(sized_width(*sized, layout)),
            Type::Pointer(_) => u64::from(layout.pointer_size),
            Type::Struct(fields) => self.layout_struct(fields, layout)?.1,
            Type::Array(elem, _) => {
                let elem_ty = self.get_type(*elem)?;
                self.alignment_of(&elem_ty, layout)?
            }
            Type::Pseudonym(underlying) | Type::Enum(underlying) => {
                let inner = self.get_type(*underlying)?;
                self.alignment_of(&inner, layout)?
            }
            Type::Slice(_) => return Err(TypeError::DynamicallySized("slice")),
            Type::Map => return Err(TypeError::DynamicallySized("map")),
            Type::Reference => return Err(TypeError::DynamicallySized("reference")),
        })
    }

    /// Convenience wrapper resolving `index` then computing its size.
    pub fn size_of_index(&self, index: TypeIndex, layout: &MemoryLayout) -> TypeResult<u64> {
        let ty = self.get_type(index)?;
        self.size_of(&ty, layout)
    }

    /// Convenience wrapper resolving `index` then computing its alignment.
    pub fn alignment_of_index(&self, index: TypeIndex, layout: &MemoryLayout) -> TypeResult<u64> {
        let ty = self.get_type(index)?;
        self.alignment_of(&ty, layout)
    }

    /// Returns `(total_size, alignment)` for a struct's fields, applying
    /// natural C-ABI padding between fields and a trailing pad so the total
    /// size is a multiple of the struct's own alignment.
    fn layout_struct(
        &self,
        fields: &[crate::ty::StructField],
        layout: &MemoryLayout,
    ) -> TypeResult<(u64, u64)> {
        let mut offset = 0u64;
        let mut max_align = 1u64;
        for field in fields {
            let field_ty = self.get_type(field.ty)?;
            let align = layout.clamp_alignment(self.alignment_of(&field_ty, layout)?);
            let size = self.size_of(&field_ty, layout)?;
            offset = align_up(offset, align);
            offset += size;
            max_align = max_align.max(align);
        }
        let total = align_up(offset, max_align);
        Ok((total, max_align))
    }
}

fn align_up(offset: u64, align: u64) -> u64 {
    if align <= 1 {
        return offset;
    }
    (offset + align - 1) & !(align - 1)
}

fn size_of_pod(pod: PodKind) -> TypeResult<u64> {
    Ok(match pod {
        PodKind::U8 | PodKind::I8 | PodKind::Bool => 1,
        PodKind::U16 | PodKind::I16 => 2,
        PodKind::U32 | PodKind::I32 | PodKind::F32 => 4,
        PodKind::U64 | PodKind::I64 | PodKind::F64 => 8,
        // `uint`/`sint` are the source language's native int width, which in
        // this codec family is fixed at 8 bytes regardless of layout (only
        // the explicitly `Sized` family is layout-parameterized).
        PodKind::UInt | PodKind::SInt => 8,
        PodKind::String => return Err(TypeError::DynamicallySized("pod string")),
    })
}

fn sized_width(sized: SizedKind, layout: &MemoryLayout) -> u8 {
    match sized {
        SizedKind::SizedInt | SizedKind::SizedUInt => layout.int_size,
        SizedKind::SizedSize => layout.size_size,
        SizedKind::SizedChar => layout.char_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn registry_with_struct() -> (TypeRegistry, TypeIndex) {
        let reg = TypeRegistry::new();
        reg.register(TypeIndex(0), Type::Pod(PodKind::U8)).unwrap();
        reg.register(TypeIndex(1), Type::Pod(PodKind::U32)).unwrap();
        reg.register(
            TypeIndex(2),
            Type::struct_of([("a", TypeIndex(0)), ("b", TypeIndex(1))]),
        )
        .unwrap();
        (reg, TypeIndex(2))
    }

    #[test]
    fn struct_padding_matches_c_abi() {
        let (reg, idx) = registry_with_struct();
        let layout = MemoryLayout::LP64_LE;
        // u8 at offset 0, pad to 4 for u32, u32 at offset 4 -> total 8.
        assert_eq!(reg.size_of_index(idx, &layout).unwrap(), 8);
        assert_eq!(reg.alignment_of_index(idx, &layout).unwrap(), 4);
    }

    #[test]
    fn incomplete_type_errors() {
        let reg = TypeRegistry::new();
        assert_eq!(
            reg.get_type(TypeIndex(42)),
            Err(TypeError::IncompleteType(TypeIndex(42)))
        );
    }

    #[test]
    fn double_registration_errors() {
        let reg = TypeRegistry::new();
        reg.register(TypeIndex(0), Type::Pod(PodKind::Bool)).unwrap();
        assert_eq!(
            reg.register(TypeIndex(0), Type::Pod(PodKind::Bool)),
            Err(TypeError::AlreadyRegistered(TypeIndex(0)))
        );
    }

    #[test]
    fn pseudonym_and_enum_delegate() {
        let reg = TypeRegistry::new();
        reg.register(TypeIndex(0), Type::Pod(PodKind::U16)).unwrap();
        reg.register(TypeIndex(1), Type::Pseudonym(TypeIndex(0)))
            .unwrap();
        reg.register(TypeIndex(2), Type::Enum(TypeIndex(0))).unwrap();
        let layout = MemoryLayout::LP64_LE;
        assert_eq!(reg.size_of_index(TypeIndex(1), &layout).unwrap(), 2);
        assert_eq!(reg.size_of_index(TypeIndex(2), &layout).unwrap(), 2);
    }

    #[test]
    fn slice_has_no_fixed_size() {
        let reg = TypeRegistry::new();
        reg.register(TypeIndex(0), Type::Pod(PodKind::U8)).unwrap();
        reg.register(TypeIndex(1), Type::Slice(TypeIndex(0)))
            .unwrap();
        let layout = MemoryLayout::LP64_LE;
        assert_eq!(
            reg.size_of_index(TypeIndex(1), &layout),
            Err(TypeError::DynamicallySized("slice"))
        );
    }
}
