use type_registry::{Endianness, MemoryLayout};

/// Writes primitives into a growing byte buffer, honoring a [`MemoryLayout`]'s
/// widths and endianness. The mirror image of [`crate::decoder::Decoder`].
pub struct Encoder {
    bytes: Vec<u8>,
    layout: MemoryLayout,
}

impl Encoder {
    pub fn new(layout: MemoryLayout) -> Self {
        Encoder {
            bytes: Vec::new(),
            layout,
        }
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    pub fn position(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Pads with zero bytes up to the next multiple of `align`.
    pub fn align(&mut self, align: u64) {
        if align <= 1 {
            return;
        }
        let rem = self.bytes.len() as u64 % align;
        if rem != 0 {
            self.bytes.resize(self.bytes.len() + (align - rem) as usize, 0);
        }
    }

    pub fn u8(&mut self, v: u8) {
        self.bytes.push(v);
    }

    pub fn i8(&mut self, v: i8) {
        self.u8(v as u8);
    }

    pub fn bool_(&mut self, v: bool) {
        self.u8(v as u8);
    }

    pub fn u16(&mut self, v: u16) {
        let b = match self.layout.endianness {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        };
        self.bytes.extend_from_slice(&b);
    }

    pub fn i16(&mut self, v: i16) {
        self.u16(v as u16);
    }

    pub fn u32(&mut self, v: u32) {
        let b = match self.layout.endianness {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        };
        self.bytes.extend_from_slice(&b);
    }

    pub fn i32(&mut self, v: i32) {
        self.u32(v as u32);
    }

    pub fn f32(&mut self, v: f32) {
        self.u32(v.to_bits());
    }

    pub fn u64(&mut self, v: u64) {
        let b = match self.layout.endianness {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        };
        self.bytes.extend_from_slice(&b);
    }

    pub fn i64(&mut self, v: i64) {
        self.u64(v as u64);
    }

    pub fn f64(&mut self, v: f64) {
        self.u64(v.to_bits());
    }

    pub fn uint(&mut self, v: u64) {
        self.u64(v);
    }

    pub fn sint(&mut self, v: i64) {
        self.i64(v);
    }

    pub fn pointer(&mut self, v: u64) {
        self.sized_uint(v, self.layout.pointer_size);
    }

    pub fn sized_int(&mut self, v: i64) {
        self.sized_uint(v as u64, self.layout.int_size);
    }

    pub fn sized_uint(&mut self, v: u64, width: u8) {
        let full = match self.layout.endianness {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        };
        match self.layout.endianness {
            Endianness::Little => self.bytes.extend_from_slice(&full[..width as usize]),
            Endianness::Big => self.bytes.extend_from_slice(&full[8 - width as usize..]),
        }
    }

    pub fn size(&mut self, v: u64) {
        self.sized_uint(v, self.layout.size_size);
    }

    pub fn char_(&mut self, v: u8) {
        self.sized_uint(u64::from(v), self.layout.char_size);
    }

    /// Writes a length-prefixed UTF-8 string: a `size`-width length followed
    /// by the raw bytes.
    pub fn string(&mut self, v: &str) {
        self.size(v.len() as u64);
        self.bytes.extend_from_slice(v.as_bytes());
    }
}
