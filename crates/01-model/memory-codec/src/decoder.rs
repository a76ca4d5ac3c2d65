use type_registry::{Endianness, MemoryLayout};

use crate::error::{MemoryError, MemoryResult};

/// Reads primitives out of a byte slice, tracking position and honoring a
/// [`MemoryLayout`]'s widths and endianness.
///
/// This is a cursor over an already-materialized byte range; the range
/// itself (and how it was carved out of a capture's address space) is the
/// concern of the state layer, not this crate.
pub struct Decoder<'a> {
    bytes: &'a [u8],
    pos: u64,
    layout: MemoryLayout,
}

impl<'a> Decoder<'a> {
    pub fn new(bytes: &'a [u8], layout: MemoryLayout) -> Self {
        Decoder {
            bytes,
            pos: 0,
            layout,
        }
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn remaining(&self) -> u64 {
        self.bytes.len() as u64 - self.pos
    }

    /// Advances the cursor to the next multiple of `align`, per the C-ABI
    /// rule that every node is aligned before it is read.
    pub fn align(&mut self, align: u64) {
        if align <= 1 {
            return;
        }
        let rem = self.pos % align;
        if rem != 0 {
            self.pos += align - rem;
        }
    }

    fn take(&mut self, n: u64) -> MemoryResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(MemoryError::OutOfBounds {
                want: n,
                have: self.remaining(),
            });
        }
        let start = self.pos as usize;
        let end = start + n as usize;
        self.pos += n;
        Ok(&self.bytes[start..end])
    }

    pub fn u8(&mut self) -> MemoryResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn i8(&mut self) -> MemoryResult<i8> {
        Ok(self.u8()? as i8)
    }

    pub fn bool_(&mut self) -> MemoryResult<bool> {
        Ok(self.u8()? != 0)
    }

    pub fn u16(&mut self) -> MemoryResult<u16> {
        let b = self.take(2)?;
        Ok(match self.layout.endianness {
            Endianness::Little => u16::from_le_bytes([b[0], b[1]]),
            Endianness::Big => u16::from_be_bytes([b[0], b[1]]),
        })
    }

    pub fn i16(&mut self) -> MemoryResult<i16> {
        Ok(self.u16()? as i16)
    }

    pub fn u32(&mut self) -> MemoryResult<u32> {
        let b = self.take(4)?;
        let arr = [b[0], b[1], b[2], b[3]];
        Ok(match self.layout.endianness {
            Endianness::Little => u32::from_le_bytes(arr),
            Endianness::Big => u32::from_be_bytes(arr),
        })
    }

    pub fn i32(&mut self) -> MemoryResult<i32> {
        Ok(self.u32()? as i32)
    }

    pub fn f32(&mut self) -> MemoryResult<f32> {
        Ok(f32::from_bits(self.u32()?))
    }

    pub fn u64(&mut self) -> MemoryResult<u64> {
        let b = self.take(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(b);
        Ok(match self.layout.endianness {
            Endianness::Little => u64::from_le_bytes(arr),
            Endianness::Big => u64::from_be_bytes(arr),
        })
    }

    pub fn i64(&mut self) -> MemoryResult<i64> {
        Ok(self.u64()? as i64)
    }

    pub fn f64(&mut self) -> MemoryResult<f64> {
        Ok(f64::from_bits(self.u64()?))
    }

    /// Reads a native `uint`/`sint` pod, fixed at 8 bytes regardless of
    /// layout.
    pub fn uint(&mut self) -> MemoryResult<u64> {
        self.u64()
    }

    pub fn sint(&mut self) -> MemoryResult<i64> {
        self.i64()
    }

    /// Reads a layout-width pointer.
    pub fn pointer(&mut self) -> MemoryResult<u64> {
        self.sized_uint(self.layout.pointer_size)
    }

    /// Reads a `Sized(sized_int | sized_uint)` value at the layout's int
    /// width, sign-extended for `Int`.
    pub fn sized_int(&mut self) -> MemoryResult<i64> {
        Ok(self.sized_uint(self.layout.int_size)? as i64)
    }

    pub fn sized_uint(&mut self, width: u8) -> MemoryResult<u64> {
        let b = self.take(u64::from(width))?;
        let mut arr = [0u8; 8];
        match self.layout.endianness {
            Endianness::Little => arr[..b.len()].copy_from_slice(b),
            Endianness::Big => arr[8 - b.len()..].copy_from_slice(b),
        }
        Ok(match self.layout.endianness {
            Endianness::Little => u64::from_le_bytes(arr),
            Endianness::Big => u64::from_be_bytes(arr),
        })
    }

    pub fn size(&mut self) -> MemoryResult<u64> {
        self.sized_uint(self.layout.size_size)
    }

    pub fn char_(&mut self) -> MemoryResult<u8> {
        Ok(self.sized_uint(self.layout.char_size)? as u8)
    }

    /// Reads a length-prefixed UTF-8 string: a `size`-width length followed
    /// by that many raw bytes.
    pub fn string(&mut self) -> MemoryResult<String> {
        let len = self.size()?;
        let bytes = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
