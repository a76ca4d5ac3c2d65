//! Boxing (decode bytes -> [`Value`]) and unboxing ([`Value`] -> encode
//! bytes), grounded directly on `memory_box.Box`/`Unbox`/`DecodeMemory`/
//! `EncodeMemory`: every node is aligned before it is read or written, and a
//! struct re-aligns to its own alignment after its last field to account for
//! trailing padding.

use smallvec::SmallVec;
use type_registry::{PodKind, SizedKind, Type, TypeRegistry};

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{MemoryError, MemoryResult};
use crate::value::{PodValue, Pointer, Value};

/// Decodes one value of type `ty` from `dec`.
pub fn box_value(dec: &mut Decoder, registry: &TypeRegistry, ty: &Type) -> MemoryResult<Value> {
    let layout = *dec.layout();
    let align = registry.alignment_of(ty, &layout)?;
    dec.align(align);

    Ok(match ty {
        Type::Pod(pod) => Value::Pod(box_pod(dec, *pod)?),
        Type::Pointer(_) => Value::Pointer(Pointer::real(dec.pointer()?)),
        Type::Struct(fields) => {
            let mut values = SmallVec::with_capacity(fields.len());
            for field in fields {
                let field_ty = registry.get_type(field.ty)?;
                values.push(box_value(dec, registry, &field_ty)?);
            }
            dec.align(align);
            Value::Struct(values)
        }
        Type::Sized(sized) => Value::Pod(box_sized(dec, *sized)?),
        Type::Pseudonym(underlying) | Type::Enum(underlying) => {
            let inner = registry.get_type(*underlying)?;
            box_value(dec, registry, &inner)?
        }
        Type::Array(elem, count) => {
            let elem_ty = registry.get_type(*elem)?;
            let mut entries = Vec::with_capacity(*count as usize);
            for _ in 0..*count {
                entries.push(box_value(dec, registry, &elem_ty)?);
            }
            Value::Array(entries)
        }
        Type::Map => return Err(MemoryError::UnsupportedDecode("map")),
        Type::Reference => return Err(MemoryError::UnsupportedDecode("reference")),
        Type::Slice(_) => return Err(MemoryError::UnsupportedDecode("bare slice")),
    })
}

fn box_pod(dec: &mut Decoder, pod: PodKind) -> MemoryResult<PodValue> {
    Ok(match pod {
        PodKind::UInt => PodValue::UInt(dec.uint()?),
        PodKind::SInt => PodValue::SInt(dec.sint()?),
        PodKind::U8 => PodValue::U8(dec.u8()?),
        PodKind::I8 => PodValue::I8(dec.i8()?),
        PodKind::U16 => PodValue::U16(dec.u16()?),
        PodKind::I16 => PodValue::I16(dec.i16()?),
        PodKind::U32 => PodValue::U32(dec.u32()?),
        PodKind::I32 => PodValue::I32(dec.i32()?),
        PodKind::U64 => PodValue::U64(dec.u64()?),
        PodKind::I64 => PodValue::I64(dec.i64()?),
        PodKind::Bool => PodValue::Bool(dec.bool_()?),
        PodKind::String => PodValue::String(dec.string()?),
        PodKind::F32 => PodValue::F32(dec.f32()?),
        PodKind::F64 => PodValue::F64(dec.f64()?),
    })
}

fn box_sized(dec: &mut Decoder, sized: SizedKind) -> MemoryResult<PodValue> {
    Ok(match sized {
        SizedKind::SizedInt => PodValue::SInt(dec.sized_int()?),
        SizedKind::SizedUInt => PodValue::UInt(dec.sized_uint(dec.layout().int_size)?),
        SizedKind::SizedSize => PodValue::UInt(dec.size()?),
        SizedKind::SizedChar => PodValue::U8(dec.char_()?),
    })
}

/// Decodes a byte range of `size` bytes as `ty`. If `ty` is a `Slice`, reads
/// as many elements of the underlying type as fit in `size` and returns a
/// `Value::Slice`; otherwise decodes exactly one `ty` (ignoring `size`, as
/// the caller is expected to have sized the range to match).
pub fn decode_memory(
    dec: &mut Decoder,
    registry: &TypeRegistry,
    size: u64,
    ty: &Type,
) -> MemoryResult<Value> {
    if let Type::Slice(underlying) = ty {
        if size == 0 {
            return Err(MemoryError::UnsizedSlice);
        }
        let elem_ty = registry.get_type(*underlying)?;
        let elem_size = registry.size_of(&elem_ty, dec.layout())?;
        let n_elems = size / elem_size.max(1);
        let mut values = Vec::with_capacity(n_elems as usize);
        for _ in 0..n_elems {
            values.push(box_value(dec, registry, &elem_ty)?);
        }
        return Ok(Value::Slice(values));
    }
    box_value(dec, registry, ty)
}

/// Encodes `v` as `ty` into `enc`. Pointer addresses marked fictional are run
/// through `ptr_resolver` first, resolving a client-chosen synthetic address
/// to the real allocation it stands in for.
pub fn unbox_value(
    enc: &mut Encoder,
    ptr_resolver: &mut dyn FnMut(u64) -> u64,
    registry: &TypeRegistry,
    ty: &Type,
    v: &Value,
) -> MemoryResult<()> {
    let layout = *enc.layout();
    let align = registry.alignment_of(ty, &layout)?;
    enc.align(align);

    match ty {
        Type::Pod(pod) => unbox_pod(enc, *pod, v)?,
        Type::Pointer(_) => {
            let Value::Pointer(ptr) = v else {
                return Err(MemoryError::ShapeMismatch("pointer"));
            };
            let addr = if ptr.fictional {
                ptr_resolver(ptr.address)
            } else {
                ptr.address
            };
            enc.pointer(addr);
        }
        Type::Struct(fields) => {
            let Value::Struct(values) = v else {
                return Err(MemoryError::ShapeMismatch("struct"));
            };
            if values.len() != fields.len() {
                return Err(MemoryError::StructArity {
                    got: values.len(),
                    want: fields.len(),
                });
            }
            for (field, value) in fields.iter().zip(values.iter()) {
                let field_ty = registry.get_type(field.ty)?;
                unbox_value(enc, ptr_resolver, registry, &field_ty, value)?;
            }
            enc.align(align);
        }
        Type::Sized(sized) => unbox_sized(enc, *sized, v)?,
        Type::Pseudonym(underlying) | Type::Enum(underlying) => {
            let inner = registry.get_type(*underlying)?;
            unbox_value(enc, ptr_resolver, registry, &inner, v)?;
        }
        Type::Array(elem, count) => {
            let Value::Array(entries) = v else {
                return Err(MemoryError::ShapeMismatch("array"));
            };
            if entries.len() as u64 != *count {
                return Err(MemoryError::ArrayArity {
                    got: entries.len(),
                    want: *count as usize,
                });
            }
            let elem_ty = registry.get_type(*elem)?;
            for entry in entries {
                unbox_value(enc, ptr_resolver, registry, &elem_ty, entry)?;
            }
        }
        Type::Map => return Err(MemoryError::UnsupportedEncode("map")),
        Type::Reference => return Err(MemoryError::UnsupportedEncode("reference")),
        Type::Slice(_) => return Err(MemoryError::UnsupportedEncode("bare slice")),
    }
    Ok(())
}

fn unbox_pod(enc: &mut Encoder, pod: PodKind, v: &Value) -> MemoryResult<()> {
    let Value::Pod(pv) = v else {
        return Err(MemoryError::ShapeMismatch("pod"));
    };
    match (pod, pv) {
        (PodKind::UInt, PodValue::UInt(x)) => enc.uint(*x),
        (PodKind::SInt, PodValue::SInt(x)) => enc.sint(*x),
        (PodKind::U8, PodValue::U8(x)) => enc.u8(*x),
        (PodKind::I8, PodValue::I8(x)) => enc.i8(*x),
        (PodKind::U16, PodValue::U16(x)) => enc.u16(*x),
        (PodKind::I16, PodValue::I16(x)) => enc.i16(*x),
        (PodKind::U32, PodValue::U32(x)) => enc.u32(*x),
        (PodKind::I32, PodValue::I32(x)) => enc.i32(*x),
        (PodKind::U64, PodValue::U64(x)) => enc.u64(*x),
        (PodKind::I64, PodValue::I64(x)) => enc.i64(*x),
        (PodKind::Bool, PodValue::Bool(x)) => enc.bool_(*x),
        (PodKind::String, PodValue::String(x)) => enc.string(x),
        (PodKind::F32, PodValue::F32(x)) => enc.f32(*x),
        (PodKind::F64, PodValue::F64(x)) => enc.f64(*x),
        _ => return Err(MemoryError::ShapeMismatch("pod")),
    }
    Ok(())
}

fn unbox_sized(enc: &mut Encoder, sized: SizedKind, v: &Value) -> MemoryResult<()> {
    let Value::Pod(pv) = v else {
        return Err(MemoryError::ShapeMismatch("sized"));
    };
    match (sized, pv) {
        (SizedKind::SizedInt, PodValue::SInt(x)) => enc.sized_int(*x),
        (SizedKind::SizedUInt, PodValue::UInt(x)) => enc.sized_uint(*x, enc.layout().int_size),
        (SizedKind::SizedSize, PodValue::UInt(x)) => enc.size(*x),
        (SizedKind::SizedChar, PodValue::U8(x)) => enc.char_(*x),
        _ => return Err(MemoryError::ShapeMismatch("sized")),
    }
    Ok(())
}

/// Encodes a `Value::Slice` as a run of `underlying`-typed elements. This is
/// the only shape memory encoding supports writing back as a contiguous
/// range; scalar/struct values are unboxed in place via [`unbox_value`].
pub fn encode_memory(
    enc: &mut Encoder,
    ptr_resolver: &mut dyn FnMut(u64) -> u64,
    registry: &TypeRegistry,
    ty: &Type,
    v: &Value,
) -> MemoryResult<()> {
    let Type::Slice(underlying) = ty else {
        return Err(MemoryError::UnsupportedEncode("encode_memory requires a slice type"));
    };
    let Value::Slice(values) = v else {
        return Err(MemoryError::ShapeMismatch("slice"));
    };
    let elem_ty = registry.get_type(*underlying)?;
    for value in values {
        unbox_value(enc, ptr_resolver, registry, &elem_ty, value)?;
    }
    Ok(())
}
